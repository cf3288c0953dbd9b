use tracing::trace;

use super::node::{Node, NodeIndex};
use crate::error::{InvalidArgument, Result};

pub const ROOT: NodeIndex = 0;

/// Arena owning every node of the tree. Links are indices, nodes are never
/// removed, so an index stays valid for the tree's lifetime.
#[derive(Clone, Debug)]
pub struct ContextTree {
    nodes: Vec<Node>,
    max_depth: usize,
    alphabet_size: usize,
}

impl ContextTree {
    pub fn new(max_depth: usize, alphabet_size: usize) -> Self {
        Self { nodes: vec![Node::new(0, alphabet_size)], max_depth, alphabet_size }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the root always exists
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        &mut self.nodes[idx]
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns the child of `parent` extended by `symbol`, creating an empty
    /// one if it doesn't exist yet.
    pub fn child_for(&mut self, parent: NodeIndex, symbol: u8) -> Result<NodeIndex> {
        if usize::from(symbol) >= self.alphabet_size {
            return Err(InvalidArgument::Symbol { symbol, alphabet_size: self.alphabet_size });
        }
        let node = self.nodes.get(parent).ok_or(InvalidArgument::Node(parent))?;
        if let Some(child) = node.child(symbol) {
            return Ok(child);
        }
        if node.depth() >= self.max_depth {
            return Err(InvalidArgument::Depth { depth: node.depth(), max_depth: self.max_depth });
        }

        let depth = node.depth() + 1;
        let idx = self.nodes.len();
        self.nodes[parent].link(symbol, link_slot(idx)?)?;
        self.nodes.push(Node::new(depth, self.alphabet_size));
        trace!(parent, symbol, depth, idx, "created context node");
        Ok(idx)
    }

    /// Follows existing links only; stops at the first missing child.
    pub fn find_path(&self, context: &[u8]) -> Vec<NodeIndex> {
        let mut path = Vec::with_capacity(context.len() + 1);
        path.push(ROOT);
        let mut idx = ROOT;
        for &symbol in context {
            match self.nodes[idx].child(symbol) {
                Some(child) => idx = child,
                None => break,
            }
            path.push(idx);
        }
        path
    }
}

// checked, link slots are u32 and a wrapped index would alias another node
fn link_slot(idx: NodeIndex) -> Result<u32> {
    u32::try_from(idx).map_err(|_| InvalidArgument::TreeFull(idx))
}
