pub mod context_tree;
pub mod ctw;
pub mod node;


pub use self::{context_tree::*, ctw::*, node::*};
use crate::error::Result;

/// Predicts symbols from an explicit context, most recent symbol first.
///
/// Encoder and decoder must feed the same contexts and symbols in the same
/// order to stay in sync.
pub trait Model {
    fn max_depth(&self) -> usize;
    fn log_probability(&mut self, context: &[u8], symbol: u8) -> Result<f64>;
    fn observe_and_log_probability(&mut self, context: &[u8], symbol: u8) -> Result<f64>;
}
