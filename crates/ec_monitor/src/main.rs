//! # EC Monitor
//!
//! Decodifica o stream de depuração da UART do EC (ENE KB3310, EeePC
//! 701/900) e exibe temperatura da CPU com gauge ASCII e mudanças de PWM
//! do fan.
//!
//! ## Uso
//! ```bash
//! socat -u /dev/ttyUSB0,b115200,raw - | ec_monitor --skip-raw
//! ec_monitor --input /dev/ttyUSB0 --with-hex
//! ec_monitor --test            # captura de exemplo embutida
//! ```

mod cli;
mod display;
mod gauge;
mod source;

use clap::Parser;
use cli::Cli;
use crossbeam_channel::RecvTimeoutError;
use display::{Presenter, format_statistics};
use ec_core::sample::SAMPLE_CAPTURE;
use ec_core::{AppConfig, Decoder};
use source::spawn_reader_thread;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging ──
    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Carregar config ──
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    cli.apply(&mut config);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("Configuração inválida: {e}");
        }
        return ExitCode::FAILURE;
    }

    print_banner(&config, &cli);

    if cli.test {
        run_sample(&config);
        return ExitCode::SUCCESS;
    }

    match run_stream(&config, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

// ──────────────────────────────────────────────
// Modos de execução
// ──────────────────────────────────────────────

/// Loop principal: recebe chunks, decodifica e exibe até o fim do stream
/// ou Ctrl+C.
fn run_stream(config: &AppConfig, cli: &Cli) -> Result<(), source::SourceError> {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst)) {
            warn!("Não foi possível instalar handler de Ctrl+C: {e}");
        }
    }

    let rx = spawn_reader_thread(&cli.source(), config.input.chunk_size)?;
    let poll = Duration::from_millis(config.input.poll_interval_ms.max(1));

    let mut decoder = Decoder::new(&config.decoder);
    let mut presenter = Presenter::new(config.display.clone(), config.gauge.clone());

    while !stop.load(Ordering::SeqCst) {
        match rx.recv_timeout(poll) {
            Ok(chunk) => {
                for event in decoder.process_chunk(&chunk) {
                    presenter.print(&event);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                for event in decoder.finish() {
                    presenter.print(&event);
                }
                break;
            }
        }
    }

    if stop.load(Ordering::SeqCst) {
        println!("\nMonitoramento interrompido pelo usuário");
    }

    let stats = decoder.statistics();
    info!(
        "{} linhas | {} temperaturas | {} fan | {} não reconhecidas",
        stats.total_lines, stats.temperature_events, stats.fan_events, stats.unparsed_lines
    );
    if config.display.debug {
        println!("{}", format_statistics(&stats));
    }

    Ok(())
}

/// Passa a captura de exemplo pelo mesmo decoder.
fn run_sample(config: &AppConfig) {
    let mut decoder = Decoder::new(&config.decoder);
    let mut presenter = Presenter::new(config.display.clone(), config.gauge.clone());

    let mut events = decoder.process_chunk(SAMPLE_CAPTURE.as_bytes());
    events.extend(decoder.finish());
    for event in &events {
        presenter.print(event);
    }

    let rule = "═".repeat(100);
    println!("\n{rule}");
    println!("Resumo do teste:");
    match decoder.trend().previous_temperature() {
        Some(t) => println!("Última temperatura da CPU: {}°C", t.celsius()),
        None => println!("Última temperatura da CPU: N/A"),
    }
    match presenter.last_fan() {
        Some(fan) if config.display.with_hex => println!(
            "Último fan: Mode={}, PWM={} (0x{}, {}%)",
            fan.mode, fan.duty_percent, fan.source_hex, fan.duty_percent
        ),
        Some(fan) => println!(
            "Último fan: Mode={}, PWM={} ({}%)",
            fan.mode, fan.duty_percent, fan.duty_percent
        ),
        None => println!("Último fan: N/A"),
    }
    println!("{}", format_statistics(&decoder.statistics()));
}

fn print_banner(config: &AppConfig, cli: &Cli) {
    let gauge = &config.gauge;
    let [cool, warm, hot] = gauge.thresholds;
    let origin = if cli.test {
        "captura de exemplo".to_string()
    } else {
        cli.source().describe()
    };

    println!();
    println!("══════════════════════════════════════════════");
    println!("   ENE KB3310 EC MONITOR");
    println!("══════════════════════════════════════════════");
    println!("  Origem:      {origin}");
    println!("  Gauge:       {}–{}°C, {} colunas", gauge.min, gauge.max, gauge.width);
    println!("  Barras:      ░<{cool}°C ▒<{warm}°C ▓<{hot}°C █>={hot}°C");
    println!(
        "  Filtro:      {}–{}°C (fora da faixa é ignorado)",
        config.decoder.temp_min, config.decoder.temp_max
    );
    println!("  Fan PWM:     valor hex já é percentual");
    if config.display.with_hex {
        println!("  Valores hex habilitados");
    }
    if config.display.skip_raw && !config.display.debug {
        println!("  Linhas cruas ocultas (--show-raw para exibir)");
    }
    if !cli.test {
        println!("  Ctrl+C para sair");
    }
    println!("══════════════════════════════════════════════");
    println!();
}
