//! Bufferização de linhas sobre leituras fragmentadas da serial.
//!
//! O UART entrega pedaços arbitrários de bytes; uma linha pode chegar
//! dividida em vários chunks. O fragmento final sem `\n` fica guardado até
//! o próximo [`LineBuffer::feed`].
//!
//! A decodificação é ASCII permissiva: bytes fora da faixa ASCII são
//! descartados, nunca geram erro.

/// Terminador de linha do EC.
const LINE_TERMINATOR: u8 = b'\n';

/// Acumula bytes e devolve linhas completas.
#[derive(Debug, Default)]
pub struct LineBuffer {
    tail: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anexa `chunk` ao fragmento pendente e retorna as linhas completas,
    /// em ordem, sem o terminador (e sem `\r` final).
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        for &byte in chunk {
            if !byte.is_ascii() {
                continue;
            }
            if byte == LINE_TERMINATOR {
                let raw = std::mem::take(&mut self.tail);
                lines.push(into_line(raw));
            } else {
                self.tail.push(byte);
            }
        }

        lines
    }

    /// Bytes aguardando terminador.
    pub fn pending(&self) -> usize {
        self.tail.len()
    }

    /// Esvazia o fragmento pendente (fim do stream).
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.tail.is_empty() {
            return None;
        }
        Some(into_line(std::mem::take(&mut self.tail)))
    }
}

fn into_line(mut raw: Vec<u8>) -> String {
    if raw.last() == Some(&b'\r') {
        raw.pop();
    }
    // Só bytes ASCII chegam aqui
    raw.into_iter().map(char::from).collect()
}
