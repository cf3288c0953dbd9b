use crate::error::{InvalidArgument, Result};

/// Largest alphabet representable with `u8` symbols.
pub const MAX_ALPHABET_SIZE: usize = 1 << u8::BITS;

/// Fixed parameters of a context tree model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CtwConfig {
    /// Number of preceding symbols used as context
    pub max_depth: usize,
    /// Symbols are `0..alphabet_size`
    pub alphabet_size: usize,
    /// Weight of a node's own estimate against the deeper context's (α)
    pub mixing_weight: f64,
}

impl CtwConfig {
    pub fn new(max_depth: usize, alphabet_size: usize, mixing_weight: f64) -> Self {
        Self { max_depth, alphabet_size, mixing_weight }
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_ALPHABET_SIZE).contains(&self.alphabet_size) {
            return Err(InvalidArgument::AlphabetSize(self.alphabet_size));
        }
        // also rejects NaN
        if !(self.mixing_weight > 0.0 && self.mixing_weight < 1.0) {
            return Err(InvalidArgument::MixingWeight(self.mixing_weight));
        }
        Ok(())
    }
}

impl Default for CtwConfig {
    fn default() -> Self {
        Self::new(4, MAX_ALPHABET_SIZE, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(CtwConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_depth_is_valid() {
        assert_eq!(CtwConfig::new(0, 2, 0.5).validate(), Ok(()));
    }

    #[test]
    fn alphabet_bounds() {
        for size in [0, 1, 257, 1000] {
            assert_eq!(
                CtwConfig::new(2, size, 0.5).validate(),
                Err(InvalidArgument::AlphabetSize(size))
            );
        }
        assert!(CtwConfig::new(2, 256, 0.5).validate().is_ok());
    }

    #[test]
    fn mixing_weight_is_open_interval() {
        for w in [0.0, 1.0, -0.1, 1.5, f64::INFINITY] {
            assert_eq!(
                CtwConfig::new(2, 4, w).validate(),
                Err(InvalidArgument::MixingWeight(w))
            );
        }
        assert!(matches!(
            CtwConfig::new(2, 4, f64::NAN).validate(),
            Err(InvalidArgument::MixingWeight(_))
        ));
        assert!(CtwConfig::new(2, 4, 1e-12).validate().is_ok());
    }
}
