use itertools::{Either, Itertools};

use super::{parse_points, NotationError};
use crate::Point;

/// A single chain or cycle read off a generic token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fragment {
    /// `[x0,x1,...,xn]`: x0→x1, ..., x(n-1)→xn.
    Chain(Vec<Point>),
    /// `(x0,x1,...,xn)`: x0→x1, ..., x(n-1)→xn, xn→x0.
    Cycle(Vec<Point>),
}

impl Fragment {
    pub fn points(&self) -> &[Point] {
        match self {
            Fragment::Chain(p) | Fragment::Cycle(p) => p,
        }
    }

    /// The `(domain, image)` edges this fragment contributes, in the order they are written.
    ///
    /// A cycle yields its closing edge last; a one point cycle `(x)` is the fixed point x→x.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        match self {
            Fragment::Chain(points) => {
                Either::Left(points.iter().copied().tuple_windows::<(Point, Point)>())
            }
            Fragment::Cycle(points) => Either::Right(
                points
                    .iter()
                    .copied()
                    .zip(points.iter().copied().cycle().skip(1)),
            ),
        }
    }

    pub fn n_edges(&self) -> usize {
        match self {
            Fragment::Chain(p) => p.len().saturating_sub(1),
            Fragment::Cycle(p) => p.len(),
        }
    }
}

/// The chains and cycles of one generic token, each kept in left to right order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    pub chains: Vec<Vec<Point>>,
    pub cycles: Vec<Vec<Point>>,
}

impl Fragments {
    /// All fragments, chains before cycles.
    pub fn iter(&self) -> impl Iterator<Item = Fragment> + '_ {
        self.chains
            .iter()
            .cloned()
            .map(Fragment::Chain)
            .chain(self.cycles.iter().cloned().map(Fragment::Cycle))
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty() && self.cycles.is_empty()
    }
}

impl FromIterator<Fragment> for Fragments {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        let (chains, cycles) = iter.into_iter().partition_map(|f| match f {
            Fragment::Chain(p) => Either::Left(p),
            Fragment::Cycle(p) => Either::Right(p),
        });
        Fragments { chains, cycles }
    }
}

/// Splits the captured chain section (`[..][..]`) and cycle section (`(..)(..)`) of a
/// generic token into their groups. Either section may be empty.
pub fn decompose(chains: &str, cycles: &str) -> Result<Fragments, NotationError> {
    Ok(Fragments {
        chains: groups(chains, '[', ']')?,
        cycles: groups(cycles, '(', ')')?,
    })
}

fn groups(section: &str, open: char, close: char) -> Result<Vec<Vec<Point>>, NotationError> {
    section
        .split_terminator(close)
        .map(|group| {
            let inner = group
                .strip_prefix(open)
                .ok_or_else(|| NotationError::unrecognized(section))?;
            parse_points(inner)
        })
        .collect()
}
