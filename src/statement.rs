//! Canonical `PartialPermOp` constructor statements.

use std::{fmt, str::FromStr, sync::LazyLock};

use itertools::Itertools;
use regex::Regex;

use crate::{
    parser::{parse_points, NotationError},
    partial_perm::PartialPermMap,
    Point,
};

/// Name of the constructor understood by the consuming library.
pub const CONSTRUCTOR: &str = "PartialPermOp";

static IDENTITY_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PartialPermOp\(\(\), \[([\d, ]*)\]\)$").unwrap());

static GENERIC_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PartialPermOp\(\[([\d, ]*)\], \[([\d, ]*)\]\)$").unwrap());

/// A reconstructed constructor call.
///
/// Rendered through [`fmt::Display`]:
///
/// ```
/// use pperm::statement::ConstructorStatement;
///
/// let id = ConstructorStatement::identity(vec![1, 2, 3]);
/// assert_eq!(id.to_string(), "PartialPermOp((), [1, 2, 3])");
///
/// let generic = ConstructorStatement::generic(vec![1, 2], vec![2, 1]).unwrap();
/// assert_eq!(generic.to_string(), "PartialPermOp([1, 2], [2, 1])");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstructorStatement {
    /// Fixes every point of `domain`, written with an empty swap tuple.
    Identity { domain: Vec<Point> },
    /// `domain[i] -> image[i]` for every `i`.
    Generic {
        domain: Vec<Point>,
        image: Vec<Point>,
    },
}

impl ConstructorStatement {
    pub fn identity(domain: Vec<Point>) -> Self {
        ConstructorStatement::Identity { domain }
    }

    /// Fails unless `domain` and `image` have the same length.
    pub fn generic(domain: Vec<Point>, image: Vec<Point>) -> Result<Self, NotationError> {
        if domain.len() != image.len() {
            return Err(NotationError::unrecognized(format!(
                "{CONSTRUCTOR}({}, {})",
                list(&domain),
                list(&image)
            )));
        }
        Ok(ConstructorStatement::Generic { domain, image })
    }

    pub fn domain(&self) -> &[Point] {
        match self {
            ConstructorStatement::Identity { domain } => domain,
            ConstructorStatement::Generic { domain, .. } => domain,
        }
    }

    /// The `(domain, image)` pairs this statement describes, in written order.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let image = match self {
            ConstructorStatement::Identity { domain } => domain,
            ConstructorStatement::Generic { image, .. } => image,
        };
        self.domain().iter().copied().zip(image.iter().copied())
    }
}

impl From<&PartialPermMap> for ConstructorStatement {
    fn from(map: &PartialPermMap) -> Self {
        ConstructorStatement::Generic {
            domain: map.domain().collect(),
            image: map.image().collect(),
        }
    }
}

fn list(points: &[Point]) -> String {
    format!("[{}]", points.iter().join(", "))
}

impl fmt::Display for ConstructorStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorStatement::Identity { domain } => {
                write!(f, "{CONSTRUCTOR}((), {})", list(domain))
            }
            ConstructorStatement::Generic { domain, image } => {
                write!(f, "{CONSTRUCTOR}({}, {})", list(domain), list(image))
            }
        }
    }
}

/// Reads back a statement in exactly the form [`fmt::Display`] writes it.
impl FromStr for ConstructorStatement {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(caps) = IDENTITY_STATEMENT.captures(s) {
            return Ok(ConstructorStatement::identity(parse_points(&caps[1])?));
        }

        if let Some(caps) = GENERIC_STATEMENT.captures(s) {
            let domain = parse_points(&caps[1])?;
            let image = parse_points(&caps[2])?;
            return ConstructorStatement::generic(domain, image);
        }

        Err(NotationError::unrecognized(s))
    }
}
