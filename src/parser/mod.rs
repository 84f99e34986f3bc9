//! # Partial permutation notation parser
//!
//! GAP prints a partial permutation in one of two shapes:
//!
//! - **identity form**: `<identity partial perm on [ 1, 2, 3 ]>`, the partial
//!   permutation fixing every point of the listed domain;
//! - **chain/cycle form**: zero or more chains `[a,b,c]` (a→b→c) followed by zero
//!   or more cycles `(a,b,c)` (a→b→c→a), e.g. `[1,2][7,4](3,5)(6)`.
//!
//! [`classify`] decides which of the two grammars a token belongs to and hands back
//! the captured text. The chain/cycle form is then split into typed [`Fragment`]s by
//! [`fragment::decompose`], folded into a [`PartialPermMap`] and finally rendered as a
//! [`ConstructorStatement`]. [`reconstruct`] runs the whole pipeline for one token.
//!
//! ```
//! use pperm::parser::reconstruct;
//!
//! let stmt = reconstruct("[1,2](3,4)").unwrap();
//! assert_eq!(stmt.to_string(), "PartialPermOp([1, 3, 4], [2, 4, 3])");
//!
//! let id = reconstruct("<identity partial perm on [ 4, 2 ]>").unwrap();
//! assert_eq!(id.to_string(), "PartialPermOp((), [4, 2])");
//! ```

use std::{num::IntErrorKind, sync::LazyLock};

use log::debug;
use regex::Regex;

use crate::{partial_perm::PartialPermMap, statement::ConstructorStatement, Point};

pub mod error;
pub use error::NotationError;

pub mod fragment;
pub use fragment::{decompose, Fragment, Fragments};

/// `<identity partial perm on [ 1, 2, 3 ]>`
static IDENTITY_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<identity partial perm on \[ (\d+(?:, \d+)*) \]>$").unwrap()
});

/// Chains (at least two points each) followed by cycles (at least one point each).
static GENERIC_NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:\[\d+,\d+(?:,\d+)*\])*)((?:\(\d+(?:,\d+)*\))*)$").unwrap()
});

/// The grammar a token was recognised by, borrowing the captured sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation<'a> {
    /// Comma separated domain of an identity partial permutation.
    Identity { domain: &'a str },
    /// Concatenated `[...]` chain groups and concatenated `(...)` cycle groups.
    /// Either section may be empty.
    Generic { chains: &'a str, cycles: &'a str },
}

/// Classifies a token, trying the identity grammar before the generic one.
pub fn classify(token: &str) -> Result<Notation<'_>, NotationError> {
    let token = token.trim();

    if let Some(caps) = IDENTITY_NOTATION.captures(token) {
        let domain = caps.get(1).map_or("", |m| m.as_str());
        return Ok(Notation::Identity { domain });
    }

    if let Some(caps) = GENERIC_NOTATION.captures(token) {
        let chains = caps.get(1).map_or("", |m| m.as_str());
        let cycles = caps.get(2).map_or("", |m| m.as_str());
        return Ok(Notation::Generic { chains, cycles });
    }

    Err(NotationError::unrecognized(token))
}

/// Parses a comma separated list of points, ignoring whitespace around each entry.
pub fn parse_points(list: &str) -> Result<Vec<Point>, NotationError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    list.split(',').map(|p| parse_point(p.trim())).collect()
}

fn parse_point(literal: &str) -> Result<Point, NotationError> {
    literal.parse::<Point>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => NotationError::PointOutOfRange {
            literal: literal.to_string(),
        },
        _ => NotationError::unrecognized(literal),
    })
}

/// Turns one token into its canonical constructor statement.
pub fn reconstruct(token: &str) -> Result<ConstructorStatement, NotationError> {
    match classify(token)? {
        Notation::Identity { domain } => {
            debug!("identity notation over [{domain}]");
            Ok(ConstructorStatement::identity(parse_points(domain)?))
        }
        Notation::Generic { chains, cycles } => {
            debug!("generic notation, chains: {chains:?}, cycles: {cycles:?}");
            let fragments = decompose(chains, cycles)?;
            let map = PartialPermMap::from_fragments(&fragments)?;
            Ok(ConstructorStatement::from(&map))
        }
    }
}
