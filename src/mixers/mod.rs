mod log_mixer;

pub use log_mixer::*;
