//! Application state module

mod forms;
mod records;

pub use forms::*;
pub use records::*;
