use rayon::prelude::*;
use tracing::debug;

use crate::config::CtwConfig;
use crate::error::Result;
use crate::helpers::{code_length, CodeLength};
use crate::models::Ctw;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub config: CtwConfig,
    pub code_length: CodeLength,
}

/// Every combination of depth and mixing weight for one alphabet.
pub fn grid(depths: impl IntoIterator<Item = usize>, alphabet_size: usize, weights: &[f64]) -> Vec<CtwConfig> {
    depths
        .into_iter()
        .flat_map(|depth| {
            weights
                .iter()
                .map(move |&w| CtwConfig::new(depth, alphabet_size, w))
        })
        .collect()
}

/// Compresses `data` (on paper) once per config, in parallel, and returns the
/// results best first. Each model still sees the data sequentially.
pub fn search(data: &[u8], configs: &[CtwConfig]) -> Result<Vec<SearchResult>> {
    let mut results = configs
        .par_iter()
        .map(|&config| {
            let mut model = Ctw::new(config)?;
            let code_length = code_length(&mut model, data)?;
            debug!(
                max_depth = config.max_depth,
                mixing_weight = config.mixing_weight,
                bits = code_length.bits(),
                nodes = model.node_count(),
                "[ctw] evaluated"
            );
            Ok(SearchResult { config, code_length })
        })
        .collect::<Result<Vec<_>>>()?;

    // stable, so ties keep the caller's order
    results.sort_by(|a, b| a.code_length.bits().total_cmp(&b.code_length.bits()));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidArgument;

    #[test]
    fn grid_covers_all_pairs() {
        let configs = grid(0..3, 4, &[0.25, 0.5]);
        assert_eq!(configs.len(), 6);
        assert_eq!(configs[0], CtwConfig::new(0, 4, 0.25));
        assert_eq!(configs[5], CtwConfig::new(2, 4, 0.5));
    }

    #[test]
    fn deeper_context_wins_on_periodic_data() {
        let data: Vec<u8> = [0, 1, 2, 3].repeat(256);
        let configs = grid([0, 2], 4, &[0.5]);
        let results = search(&data, &configs).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].config.max_depth, 2);
        assert!(results[0].code_length.bits() < results[1].code_length.bits());
        assert_eq!(results[0].code_length.symbols(), data.len() as u64);
    }

    #[test]
    fn parallel_matches_sequential() {
        let data: Vec<u8> = (0..500u32).map(|i| ((i * 7 + i / 3) % 5) as u8).collect();
        let configs = grid(0..4, 5, &[0.2, 0.6]);
        let results = search(&data, &configs).unwrap();
        for result in results {
            let mut model = Ctw::new(result.config).unwrap();
            let expected = code_length(&mut model, &data).unwrap();
            assert_eq!(result.code_length, expected);
        }
    }

    #[test]
    fn invalid_config_fails_search() {
        let configs = [CtwConfig::new(1, 2, 0.5), CtwConfig::new(1, 1, 0.5)];
        assert_eq!(search(&[0, 1], &configs), Err(InvalidArgument::AlphabetSize(1)));
    }

    #[test]
    fn symbol_outside_alphabet_fails_search() {
        let configs = [CtwConfig::new(1, 2, 0.5)];
        assert_eq!(
            search(&[0, 1, 2], &configs),
            Err(InvalidArgument::Symbol { symbol: 2, alphabet_size: 2 })
        );
    }
}
