mod symbol_counter;

pub use self::symbol_counter::*;
