pub mod config;
pub mod counters;
pub mod error;
pub mod helpers;
pub mod history;
pub mod macros;
pub mod mixers;
pub mod models;
pub mod search;

pub use config::CtwConfig;
pub use error::{InvalidArgument, Result};
pub use models::{Ctw, Model};
