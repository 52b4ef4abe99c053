//! User interface

mod cli;

pub use cli::*;
