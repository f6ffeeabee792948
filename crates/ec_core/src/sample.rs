//! Captura real do UART usada pelo modo `--test` e pelos testes.

/// Trecho capturado de um EeePC 900 (13 linhas, sem `\n` final).
pub const SAMPLE_CAPTURE: &str = "CPUTmp
37,T(A0,S0)wTTTCPUTmp
37,T(A0,S0)TTwTCPUTmp
CPUTmp
37,T(A0,S0)TTTCPUTmp
37,T(A0,S0)wTTTCPUTmp
CPUTmp
37,T(A0,S0)TTwTCPUTmp
37,T(A0,S0)TTTCPUTmp
36,CFan idx,PWM
03,3C,T(A0,S0)
e80,d51,
REC=3C,51";
