use std::f64::consts::LOG2_E;

use crate::error::{InvalidArgument, Result};

// Fixed-weight interpolation of two log2 probabilities:
// log2(a * 2^own + (1 - a) * 2^deeper)

#[derive(Clone, Copy, Debug)]
pub struct LogMixer {
    log_alpha: f64,
    log_1_minus_alpha: f64,
}

impl LogMixer {
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(InvalidArgument::MixingWeight(alpha));
        }
        Ok(Self { log_alpha: alpha.log2(), log_1_minus_alpha: (-alpha).ln_1p() * LOG2_E })
    }

    pub fn alpha(&self) -> f64 {
        self.log_alpha.exp2()
    }

    #[inline(always)]
    pub fn mix(&self, own: f64, deeper: f64) -> f64 {
        log2_add(self.log_alpha + own, self.log_1_minus_alpha + deeper)
    }
}

/// log2(2^a + 2^b) without leaving the log domain.
#[inline(always)]
pub fn log2_add(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi + (lo - hi).exp2().ln_1p() * LOG2_E
}
