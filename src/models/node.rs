use crate::counters::SymbolCounter;
use crate::error::{InvalidArgument, Result};
use crate::usize;

/// Index of a node inside its `ContextTree`. The root is index 0 and is
/// never anyone's child, so 0 doubles as "no child" in link slots.
pub type NodeIndex = usize;

const NO_CHILD: u32 = 0;

/// Counts for one context suffix plus links to the suffixes extending it by
/// one older symbol.
#[derive(Clone, Debug)]
pub struct Node {
    depth: usize,
    counter: SymbolCounter,
    // empty until the first child is created, leaves at max depth stay empty
    children: Box<[u32]>,
}

impl Node {
    pub fn new(depth: usize, alphabet_size: usize) -> Self {
        Self { depth, counter: SymbolCounter::new(alphabet_size), children: Box::default() }
    }

    /// Length of the context suffix this node stands for.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn counter(&self) -> &SymbolCounter {
        &self.counter
    }

    pub fn local_estimate(&self, symbol: u8) -> Result<f64> {
        self.counter.estimate(symbol)
    }

    pub fn log_estimate(&self, symbol: u8) -> Result<f64> {
        self.counter.log_estimate(symbol)
    }

    pub fn increment(&mut self, symbol: u8) -> Result<()> {
        self.counter.increment(symbol)
    }

    pub fn child(&self, symbol: u8) -> Option<NodeIndex> {
        match self.children.get(usize::from(symbol)) {
            Some(&idx) if idx != NO_CHILD => Some(usize!(idx)),
            _ => None,
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.iter().filter(|&&idx| idx != NO_CHILD).count()
    }

    pub(super) fn link(&mut self, symbol: u8, idx: u32) -> Result<()> {
        debug_assert_ne!(idx, NO_CHILD, "root can't be linked as a child");
        let alphabet_size = self.counter.alphabet_size();
        if usize::from(symbol) >= alphabet_size {
            return Err(InvalidArgument::Symbol { symbol, alphabet_size });
        }
        if self.children.is_empty() {
            self.children = vec![NO_CHILD; alphabet_size].into_boxed_slice();
        }
        self.children[usize::from(symbol)] = idx;
        Ok(())
    }
}
