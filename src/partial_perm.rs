//! # Partial permutation mappings
//!
//! A [`PartialPermMap`] is the finite partial function `Point -> Point` assembled from
//! the chain and cycle fragments of a single token. It remembers the order in which
//! domain points were first mapped, which is the order the domain and image lists of
//! the resulting constructor statement are written in.
//!
//! Building the map is the only place where a token can turn out to be ill formed
//! after it passed the grammar: giving one domain point two different images is an
//! [`NotationError::AmbiguousMapping`]. Writing the very same edge twice is accepted
//! and leaves the map unchanged.
//!
//! ```
//! use pperm::parser::decompose;
//! use pperm::partial_perm::PartialPermMap;
//!
//! let fragments = decompose("[1,2]", "(3,4)").unwrap();
//! let map = PartialPermMap::from_fragments(&fragments).unwrap();
//! assert_eq!(map.domain().collect::<Vec<_>>(), vec![1, 3, 4]);
//! assert_eq!(map.image().collect::<Vec<_>>(), vec![2, 4, 3]);
//! ```

use indexmap::{map::Entry, IndexMap};
use log::trace;

use crate::{
    parser::{Fragment, Fragments, NotationError},
    Point,
};

/// Domain to image mapping in first-insertion order.
///
/// Equality compares the mappings as functions, ignoring insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialPermMap {
    map: IndexMap<Point, Point>,
}

impl PartialPermMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds all chains, then all cycles, into one mapping.
    pub fn from_fragments(fragments: &Fragments) -> Result<Self, NotationError> {
        let mut map = Self::new();
        for fragment in fragments.iter() {
            map.insert_fragment(&fragment)?;
        }
        Ok(map)
    }

    /// Maps `domain` to `image`.
    ///
    /// Fails if `domain` already has a different image; an identical edge is a no-op.
    pub fn try_insert(&mut self, domain: Point, image: Point) -> Result<(), NotationError> {
        match self.map.entry(domain) {
            Entry::Occupied(e) if *e.get() == image => {
                trace!("{domain} -> {image} already present");
                Ok(())
            }
            Entry::Occupied(e) => Err(NotationError::AmbiguousMapping {
                domain,
                existing: *e.get(),
                conflicting: image,
            }),
            Entry::Vacant(e) => {
                trace!("{domain} -> {image}");
                e.insert(image);
                Ok(())
            }
        }
    }

    pub fn insert_fragment(&mut self, fragment: &Fragment) -> Result<(), NotationError> {
        for (domain, image) in fragment.edges() {
            self.try_insert(domain, image)?;
        }
        Ok(())
    }

    pub fn get(&self, domain: Point) -> Option<Point> {
        self.map.get(&domain).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn domain(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.map.keys().copied()
    }

    /// Images, aligned with [`PartialPermMap::domain`].
    pub fn image(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.map.values().copied()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = (Point, Point)> + '_ {
        self.map.iter().map(|(&d, &i)| (d, i))
    }
}

impl TryFrom<&Fragments> for PartialPermMap {
    type Error = NotationError;

    fn try_from(fragments: &Fragments) -> Result<Self, Self::Error> {
        Self::from_fragments(fragments)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use itertools::Itertools;
    use proptest::prelude::*;

    use super::*;

    fn build(
        chains: Vec<Vec<Point>>,
        cycles: Vec<Vec<Point>>,
    ) -> Result<PartialPermMap, NotationError> {
        PartialPermMap::from_fragments(&Fragments { chains, cycles })
    }

    #[test]
    fn chains_before_cycles() {
        let map = build(vec![vec![10, 11]], vec![vec![1, 2]]).unwrap();
        assert_eq!(map.edges().collect_vec(), vec![(10, 11), (1, 2), (2, 1)]);
    }

    #[test]
    fn duplicate_identical_edge_is_accepted() {
        let map = build(vec![vec![1, 2], vec![3, 1, 2]], vec![]).unwrap();
        assert_eq!(map.edges().collect_vec(), vec![(1, 2), (3, 1)]);

        let map = build(vec![vec![1, 2]], vec![vec![1, 2]]).unwrap();
        assert_eq!(map.edges().collect_vec(), vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn conflict_names_both_images() {
        let err = build(vec![vec![4, 5]], vec![vec![4, 6]]).unwrap_err();
        assert_eq!(
            err,
            NotationError::AmbiguousMapping {
                domain: 4,
                existing: 5,
                conflicting: 6
            }
        );
        insta::assert_snapshot!(
            err,
            @"ambiguous image given for domain element 4: already mapped to 5, cannot also map to 6"
        );
    }

    #[test]
    fn conflict_inside_one_cycle() {
        assert!(build(vec![], vec![vec![1, 2, 1, 3]]).is_err());
    }

    #[test]
    fn empty_fragments_give_empty_map() {
        let map = build(vec![], vec![]).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    /// Distinct points, so that any split into fragments is conflict free.
    fn distinct_points(min: usize, max: usize) -> impl Strategy<Value = Vec<Point>> {
        proptest::collection::btree_set(0..500 as Point, min..max)
            .prop_map(|s| s.into_iter().collect_vec())
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn chain_edges_are_consecutive_pairs(points in distinct_points(2, 20)) {
            let map = build(vec![points.clone()], vec![]).unwrap();
            let expected = points.iter().copied().tuple_windows::<(Point, Point)>().collect_vec();
            prop_assert_eq!(map.edges().collect_vec(), expected);
        }

        #[test]
        fn cycle_edges_wrap_around(points in distinct_points(1, 20)) {
            let map = build(vec![], vec![points.clone()]).unwrap();
            let edges = map.edges().collect_vec();
            prop_assert_eq!(edges.len(), points.len());
            prop_assert_eq!(edges[edges.len() - 1], (points[points.len() - 1], points[0]));
            for (i, &(d, im)) in edges.iter().enumerate() {
                prop_assert_eq!(d, points[i]);
                prop_assert_eq!(im, points[(i + 1) % points.len()]);
            }
        }

        #[test]
        fn disjoint_chain_and_cycle_add_up(points in distinct_points(3, 30), split in 2usize..30) {
            let split = split.min(points.len() - 1);
            let (chain, cycle) = points.split_at(split);
            let map = build(vec![chain.to_vec()], vec![cycle.to_vec()]).unwrap();
            prop_assert_eq!(map.len(), (chain.len() - 1) + cycle.len());
        }

        #[test]
        fn conflicts_fail_in_any_order(
            x in 0..100 as Point,
            a in 0..100 as Point,
            b in 0..100 as Point,
        ) {
            prop_assume!(a != b);
            for chains in [vec![vec![x, a], vec![x, b]], vec![vec![x, b], vec![x, a]]] {
                let is_ambiguous = matches!(
                    build(chains, vec![]),
                    Err(NotationError::AmbiguousMapping { domain, .. }) if domain == x
                );
                prop_assert!(is_ambiguous);
            }
            let is_ambiguous = matches!(
                build(vec![vec![x, a]], vec![vec![x, b]]),
                Err(NotationError::AmbiguousMapping { domain, .. }) if domain == x
            );
            prop_assert!(is_ambiguous);
        }

        #[test]
        fn edge_set_matches_fragments(points in distinct_points(2, 30), split in 2usize..30) {
            let split = split.min(points.len());
            let (chain, cycle) = points.split_at(split);
            let fragments = Fragments {
                chains: vec![chain.to_vec()],
                cycles: if cycle.is_empty() { vec![] } else { vec![cycle.to_vec()] },
            };
            let map = PartialPermMap::from_fragments(&fragments).unwrap();
            let expected: BTreeSet<_> = fragments.iter().flat_map(|f| f.edges().collect_vec()).collect();
            prop_assert_eq!(map.edges().collect::<BTreeSet<_>>(), expected);
        }
    }
}
