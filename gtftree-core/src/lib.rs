//! Core models and errors shared by the gtftree crates.
//!
//! [`models::Entry`] is a single genomic feature, [`models::Strand`] its strand, and
//! [`errors`] holds the error taxonomy used by every fallible operation.
//! [`utils`] validates raw record fields coming from a parsing or binding layer.

pub mod errors;
pub mod models;
pub mod utils;
