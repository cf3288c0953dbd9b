use crate::error::Result;
use crate::history::ContextWindow;
use crate::models::Model;

/// Ideal code length an entropy coder would spend under a model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CodeLength {
    bits: f64,
    symbols: u64,
}

impl CodeLength {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, log_prob: f64) {
        self.bits -= log_prob;
        self.symbols += 1;
    }

    pub fn bits(&self) -> f64 {
        self.bits
    }

    /// Bytes in compressed size, rounded up
    pub fn bytes(&self) -> u64 {
        (self.bits / 8.0).ceil() as u64
    }

    pub fn symbols(&self) -> u64 {
        self.symbols
    }

    pub fn bits_per_symbol(&self) -> f64 {
        match self.symbols {
            0 => 0.0,
            n => self.bits / n as f64,
        }
    }
}

/// Feeds `data` through `model` from the start of a stream, committing every
/// symbol, and sums up the code length.
pub fn code_length<M: Model>(model: &mut M, data: &[u8]) -> Result<CodeLength> {
    let mut window = ContextWindow::new(model.max_depth());
    let mut stats = CodeLength::new();
    for &symbol in data {
        stats.add(model.observe_and_log_probability(window.as_slice(), symbol)?);
        window.push(symbol);
    }
    Ok(stats)
}
