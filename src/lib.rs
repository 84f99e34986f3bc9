//! # pperm
//!
//! pperm reconstructs GAP `PartialPermOp` constructor statements from the way GAP
//! prints partial permutations. Each input token, whether written as chains and
//! cycles (`[1,2](3,4)`) or as an identity on a domain
//! (`<identity partial perm on [ 1, 2 ]>`), becomes one unambiguous
//! "domain list, image list" constructor call.
//!
//! The pipeline for a run is:
//!
//! 1. [`batch`] reads lines and decides between single-token lines and one GAP list line;
//! 2. [`parser`] classifies every token and splits chain/cycle notation into fragments;
//! 3. [`partial_perm`] folds the fragments into a single mapping, rejecting conflicts;
//! 4. [`statement`] renders the mapping as a constructor statement;
//! 5. [`format`] joins the statements for output.
//!
//! ```
//! use pperm::{reconstruct_all, format::FormatOptions};
//!
//! let out = reconstruct_all("[ (1,2), <identity partial perm on [ 3 ]> ]".as_bytes(), FormatOptions::default()).unwrap();
//! assert_eq!(out, "[ PartialPermOp([1, 2], [2, 1]),\n  PartialPermOp((), [3]) ]");
//! ```

use std::io::BufRead;

pub mod batch;
pub mod format;
pub mod parser;
pub mod partial_perm;
pub mod statement;

pub use batch::{BatchError, BatchMode, BatchOutput};
pub use parser::{reconstruct, NotationError};
pub use partial_perm::PartialPermMap;
pub use statement::ConstructorStatement;

/// A point moved by a partial permutation.
pub type Point = u64;

/// Reads all of `reader` and renders the result, without the trailing newline.
pub fn reconstruct_all<R: BufRead>(
    reader: R,
    options: format::FormatOptions,
) -> Result<String, BatchError> {
    let output = batch::read_batch(reader)?;
    Ok(format::render(&output, options))
}
