//! Thread de leitura que repassa chunks de bytes para o loop principal.
//!
//! A conexão com o dispositivo fica fora do programa: o stream chega por
//! stdin (`socat`, `cat /dev/ttyUSB0`…) ou por um arquivo/dispositivo.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Chunks em trânsito antes de a leitura bloquear.
const CHANNEL_CAPACITY: usize = 64;

/// Origem dos bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSource {
    Stdin,
    Path(PathBuf),
}

impl ByteSource {
    pub fn describe(&self) -> String {
        match self {
            ByteSource::Stdin => "stdin".into(),
            ByteSource::Path(path) => path.display().to_string(),
        }
    }

    fn open(&self) -> Result<Box<dyn Read + Send>, SourceError> {
        match self {
            ByteSource::Stdin => Ok(Box::new(std::io::stdin())),
            ByteSource::Path(path) => {
                let file = File::open(path).map_err(|source| SourceError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Erros ao preparar a leitura.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Falha ao abrir {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Falha ao criar thread de leitura: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Inicia a thread de leitura. Retorna o receiver do channel.
///
/// O channel fecha no fim do stream ou em erro de leitura.
pub fn spawn_reader_thread(
    source: &ByteSource,
    chunk_size: usize,
) -> Result<Receiver<Vec<u8>>, SourceError> {
    let reader = source.open()?;
    let (tx, rx) = bounded::<Vec<u8>>(CHANNEL_CAPACITY);
    let name = source.describe();

    std::thread::Builder::new()
        .name("uart-reader".into())
        .spawn(move || reader_loop(reader, &tx, chunk_size, &name))
        .map_err(SourceError::Spawn)?;

    Ok(rx)
}

fn reader_loop(mut reader: Box<dyn Read + Send>, tx: &Sender<Vec<u8>>, chunk_size: usize, name: &str) {
    info!("Lendo de {name}");
    let mut buf = vec![0u8; chunk_size.max(1)];

    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                info!("Fim do stream em {name}");
                break;
            }
            Ok(size) => {
                // Bloqueia se o decoder estiver atrasado: perder bytes quebraria linhas
                if tx.send(buf[..size].to_vec()).is_err() {
                    debug!("Loop principal encerrado, parando leitura");
                    break;
                }
            }
            Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                error!("Erro de leitura em {name}: {e}");
                break;
            }
        }
    }
}
