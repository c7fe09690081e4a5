//! Embedding of binary assets as source-level byte-array literals.
//!
//! Each asset is read fully into memory and written out as a generated
//! source file declaring one variable that holds the asset's bytes,
//! wrapped in a package (Go) or module (Rust) namespace.

mod embed;
mod ident;
mod language;
mod literal;
mod manifest;

pub use embed::*;
pub use ident::*;
pub use language::*;
pub use literal::*;
pub use manifest::*;
