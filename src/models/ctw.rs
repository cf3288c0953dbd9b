use std::iter;

use tracing::debug;

use super::context_tree::{ContextTree, ROOT};
use super::node::NodeIndex;
use super::Model;
use crate::config::CtwConfig;
use crate::counters::kt_estimate;
use crate::error::{InvalidArgument, Result};
use crate::mixers::LogMixer;
use crate::u8;

/// Context tree weighting over a symbol alphabet.
///
/// Every depth from 0 to `max_depth` contributes a KT estimate; they are
/// folded from the deepest node up with
/// `p[l] = a * e[l] + (1 - a) * p[l + 1]`, all in log2 space.
///
/// The model never remembers where it is in a stream: the caller passes the
/// last `max_depth` symbols, most recent first, with every call.
#[derive(Clone, Debug)]
pub struct Ctw {
    config: CtwConfig,
    tree: ContextTree,
    mixer: LogMixer,
    observations: u64,
    // scratch for the last walked path, root first
    path: Vec<NodeIndex>,
}

impl Ctw {
    pub fn new(config: CtwConfig) -> Result<Self> {
        config.validate()?;
        let mixer = LogMixer::new(config.mixing_weight)?;
        debug!(
            max_depth = config.max_depth,
            alphabet_size = config.alphabet_size,
            mixing_weight = config.mixing_weight,
            "new context tree model"
        );
        Ok(Self {
            config,
            tree: ContextTree::new(config.max_depth, config.alphabet_size),
            mixer,
            observations: 0,
            path: Vec::with_capacity(config.max_depth + 1),
        })
    }

    pub fn config(&self) -> &CtwConfig {
        &self.config
    }

    pub fn tree(&self) -> &ContextTree {
        &self.tree
    }

    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Number of committed symbols since construction.
    pub fn observation_count(&self) -> u64 {
        self.observations
    }

    /// log2 of the predicted probability of `symbol` after `context`.
    ///
    /// Counts are left untouched, but nodes missing along the context are
    /// created.
    pub fn log_probability(&mut self, context: &[u8], symbol: u8) -> Result<f64> {
        self.check_input(context, symbol)?;
        self.walk(context)?;
        self.mix_along(&self.path, 0, symbol)
    }

    /// Same value as [`Ctw::log_probability`] from the state before the call,
    /// then commits `symbol` to every node on the path.
    pub fn observe_and_log_probability(&mut self, context: &[u8], symbol: u8) -> Result<f64> {
        self.check_input(context, symbol)?;
        self.walk(context)?;
        let lp = self.mix_along(&self.path, 0, symbol)?;
        self.commit(symbol)?;
        Ok(lp)
    }

    /// Commits `symbol` without computing its probability.
    pub fn observe(&mut self, context: &[u8], symbol: u8) -> Result<()> {
        self.check_input(context, symbol)?;
        self.walk(context)?;
        self.commit(symbol)
    }

    /// Like [`Ctw::log_probability`] but never grows the tree, missing nodes
    /// count as empty. Safe to call from several threads at once.
    pub fn peek_log_probability(&self, context: &[u8], symbol: u8) -> Result<f64> {
        self.check_input(context, symbol)?;
        let path = self.tree.find_path(context);
        let missing = self.config.max_depth + 1 - path.len();
        self.mix_along(&path, missing, symbol)
    }

    /// log2 probabilities of every symbol after `context`, indexed by symbol.
    pub fn log_distribution(&mut self, context: &[u8]) -> Result<Vec<f64>> {
        self.check_context(context)?;
        self.walk(context)?;
        (0..self.config.alphabet_size)
            .map(|s| self.mix_along(&self.path, 0, u8!(s)))
            .collect()
    }

    fn check_context(&self, context: &[u8]) -> Result<()> {
        let alphabet_size = self.config.alphabet_size;
        if context.len() != self.config.max_depth {
            return Err(InvalidArgument::ContextLength {
                expected: self.config.max_depth,
                actual: context.len(),
            });
        }
        match context.iter().position(|&s| usize::from(s) >= alphabet_size) {
            Some(position) => Err(InvalidArgument::ContextSymbol {
                position,
                symbol: context[position],
                alphabet_size,
            }),
            None => Ok(()),
        }
    }

    fn check_input(&self, context: &[u8], symbol: u8) -> Result<()> {
        self.check_context(context)?;
        let alphabet_size = self.config.alphabet_size;
        if usize::from(symbol) >= alphabet_size {
            return Err(InvalidArgument::Symbol { symbol, alphabet_size });
        }
        Ok(())
    }

    fn walk(&mut self, context: &[u8]) -> Result<()> {
        self.path.clear();
        self.path.push(ROOT);
        let mut idx = ROOT;
        for &symbol in context {
            idx = self.tree.child_for(idx, symbol)?;
            self.path.push(idx);
        }
        Ok(())
    }

    // `missing` empty levels sit below the deepest node of `path`
    fn mix_along(&self, path: &[NodeIndex], missing: usize, symbol: u8) -> Result<f64> {
        let empty = kt_estimate(0, 0, self.config.alphabet_size).log2();
        let mut estimates = iter::repeat(Ok(empty))
            .take(missing)
            .chain(path.iter().rev().map(|&idx| self.tree.node(idx).log_estimate(symbol)));

        // path always holds the root
        let mut lp = match estimates.next() {
            Some(deepest) => deepest?,
            None => return Ok(empty),
        };
        for own in estimates {
            lp = self.mixer.mix(own?, lp);
        }
        Ok(lp)
    }

    fn commit(&mut self, symbol: u8) -> Result<()> {
        for &idx in &self.path {
            self.tree.node_mut(idx).increment(symbol)?;
        }
        self.observations += 1;
        Ok(())
    }
}

impl Model for Ctw {
    fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    fn log_probability(&mut self, context: &[u8], symbol: u8) -> Result<f64> {
        Ctw::log_probability(self, context, symbol)
    }

    fn observe_and_log_probability(&mut self, context: &[u8], symbol: u8) -> Result<f64> {
        Ctw::observe_and_log_probability(self, context, symbol)
    }
}
