use thiserror::Error;

use crate::Point;

/// Errors raised while turning a single notation token into a constructor statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// The token matches neither the identity nor the chain/cycle grammar.
    #[error("unrecognized partial permutation notation: {token}")]
    UnrecognizedToken { token: String },

    /// Two fragments of the same token send `domain` to different images.
    #[error(
        "ambiguous image given for domain element {domain}: \
         already mapped to {existing}, cannot also map to {conflicting}"
    )]
    AmbiguousMapping {
        domain: Point,
        existing: Point,
        conflicting: Point,
    },

    /// A digit run that does not fit into a [`Point`].
    #[error("point {literal} is out of range")]
    PointOutOfRange { literal: String },
}

impl NotationError {
    pub fn unrecognized(token: impl Into<String>) -> Self {
        NotationError::UnrecognizedToken {
            token: token.into(),
        }
    }
}
