//! Identity field extraction module.

pub mod assembler;
mod parser;
pub mod rules;

pub use assembler::{assemble, preview};
pub use parser::{ExtractedFields, IdentityParser};
