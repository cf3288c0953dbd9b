use tracing::warn;

use crate::error::{InvalidArgument, Result};

/// Occurrence counts over a small alphabet with a Krichevsky–Trofimov
/// (add-1/2) estimate.
#[derive(Clone, Debug)]
pub struct SymbolCounter {
    counts: Box<[u32]>,
    total: u64,
}

impl SymbolCounter {
    pub fn new(alphabet_size: usize) -> Self {
        Self { counts: vec![0; alphabet_size].into_boxed_slice(), total: 0 }
    }

    pub fn alphabet_size(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, symbol: u8) -> Result<u32> {
        self.counts
            .get(usize::from(symbol))
            .copied()
            .ok_or_else(|| self.out_of_range(symbol))
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// (count + 1/2) / (total + alphabet_size / 2)
    pub fn estimate(&self, symbol: u8) -> Result<f64> {
        let count = self.count(symbol)?;
        Ok(kt_estimate(count, self.total, self.alphabet_size()))
    }

    pub fn log_estimate(&self, symbol: u8) -> Result<f64> {
        Ok(self.estimate(symbol)?.log2())
    }

    pub fn increment(&mut self, symbol: u8) -> Result<()> {
        let alphabet_size = self.alphabet_size();
        let slot = self
            .counts
            .get_mut(usize::from(symbol))
            .ok_or(InvalidArgument::Symbol { symbol, alphabet_size })?;
        *slot += 1;
        self.total += 1;
        if *slot == u32::MAX {
            warn!(symbol, total = self.total, "counter saturated, halving counts");
            self.halve();
        }
        Ok(())
    }

    // rounds up, so seen symbols stay seen
    fn halve(&mut self) {
        for c in self.counts.iter_mut() {
            *c = (*c >> 1) + (*c & 1);
        }
        self.total = self.counts.iter().map(|&c| u64::from(c)).sum();
    }

    fn out_of_range(&self, symbol: u8) -> InvalidArgument {
        InvalidArgument::Symbol { symbol, alphabet_size: self.alphabet_size() }
    }
}

/// Estimate shared by populated and not-yet-created nodes, so both paths
/// produce bit-identical values.
#[inline(always)]
pub fn kt_estimate(count: u32, total: u64, alphabet_size: usize) -> f64 {
    (f64::from(count) + 0.5) / (total as f64 + alphabet_size as f64 * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counter_is_uniform() {
        for size in [2, 3, 8, 256] {
            let counter = SymbolCounter::new(size);
            for s in 0..size {
                let p = counter.estimate(u8::try_from(s).unwrap()).unwrap();
                assert!((p - 1.0 / size as f64).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn estimate_after_updates() {
        let mut counter = SymbolCounter::new(4);
        counter.increment(1).unwrap();
        counter.increment(1).unwrap();
        counter.increment(3).unwrap();
        assert_eq!(counter.total(), 3);
        assert_eq!(counter.count(1), Ok(2));
        // total + 4/2 = 5
        assert_eq!(counter.estimate(1), Ok(2.5 / 5.0));
        assert_eq!(counter.estimate(3), Ok(1.5 / 5.0));
        assert_eq!(counter.estimate(0), Ok(0.5 / 5.0));
        let sum: f64 = (0..4).map(|s| counter.estimate(s).unwrap()).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_symbol() {
        let mut counter = SymbolCounter::new(3);
        let err = InvalidArgument::Symbol { symbol: 3, alphabet_size: 3 };
        assert_eq!(counter.estimate(3), Err(err.clone()));
        assert_eq!(counter.increment(3), Err(err));
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn halving_keeps_seen_symbols() {
        let mut counter = SymbolCounter::new(2);
        counter.counts[0] = u32::MAX - 1;
        counter.counts[1] = 1;
        counter.total = u64::from(u32::MAX);
        counter.increment(0).unwrap();
        assert_eq!(counter.count(0), Ok(1 << 31));
        assert_eq!(counter.count(1), Ok(1));
        assert_eq!(counter.total(), (1 << 31) + 1);
    }
}
