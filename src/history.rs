/// The last `depth` symbols of a stream, most recent first. Positions before
/// the start of the stream read as symbol 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextWindow {
    symbols: Vec<u8>,
}

impl ContextWindow {
    pub fn new(depth: usize) -> Self {
        Self { symbols: vec![0; depth] }
    }

    pub fn depth(&self) -> usize {
        self.symbols.len()
    }

    pub fn push(&mut self, symbol: u8) {
        if let Some(last) = self.symbols.last_mut() {
            *last = symbol;
            self.symbols.rotate_right(1);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.symbols
    }
}
