use crate::error::{validate_vertex, Result};
use std::cell::Cell;
use std::mem;

/// Disjoint sets over `0..n` (weighted quick-union with path compression).
#[derive(Clone, Debug)]
pub struct UnionFind {
    // parent if >= 0, negated size of the set if < 0
    link: Vec<Cell<isize>>,
    count: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self { link: vec![Cell::new(-1); n], count: n }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.link.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.link.is_empty()
    }

    /// Number of disjoint sets.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn find(&self, p: usize) -> Result<usize> {
        validate_vertex(p, self.len())?;
        Ok(self.find_root_with_size(p).0)
    }

    pub fn connected(&self, p: usize, q: usize) -> Result<bool> {
        validate_vertex(p, self.len())?;
        validate_vertex(q, self.len())?;
        Ok(self.same_set(p, q))
    }

    // returns true iff the two sets were previously disjoint
    pub fn union(&mut self, p: usize, q: usize) -> Result<bool> {
        validate_vertex(p, self.len())?;
        validate_vertex(q, self.len())?;
        Ok(self.merge(p, q))
    }

    // p, q < len
    pub(crate) fn same_set(&self, p: usize, q: usize) -> bool {
        self.find_root_with_size(p).0 == self.find_root_with_size(q).0
    }

    // p, q < len
    pub(crate) fn merge(&mut self, p: usize, q: usize) -> bool {
        let (mut u, size_u) = self.find_root_with_size(p);
        let (mut v, size_v) = self.find_root_with_size(q);
        if u == v {
            return false;
        }

        if size_u < size_v {
            mem::swap(&mut u, &mut v);
        }
        self.link[v].set(u as isize);
        self.link[u].set(-((size_u + size_v) as isize));
        self.count -= 1;
        true
    }

    fn find_root_with_size(&self, p: usize) -> (usize, usize) {
        let mut root = p;
        while self.link[root].get() >= 0 {
            root = self.link[root].get() as usize;
        }

        // compress
        let mut u = p;
        while u != root {
            let next = self.link[u].get() as usize;
            self.link[u].set(root as isize);
            u = next;
        }

        (root, (-self.link[root].get()) as usize)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use rstest::rstest;

    #[test]
    fn union_and_count() {
        let mut uf = UnionFind::new(10);
        let pairs = [(4, 3), (3, 8), (6, 5), (9, 4), (2, 1), (8, 9), (5, 0), (7, 2), (6, 1), (1, 0), (6, 7)];
        let merged: Vec<bool> = pairs.iter().map(|&(p, q)| uf.union(p, q).unwrap()).collect();

        assert_eq!(merged, vec![true, true, true, true, true, false, true, true, true, false, false]);
        assert_eq!(uf.count(), 2);
        assert!(uf.connected(3, 9).unwrap());
        assert!(uf.connected(0, 7).unwrap());
        assert!(!uf.connected(0, 9).unwrap());
    }

    #[rstest]
    #[case(5, 5)]
    #[case(0, 5)]
    fn out_of_range(#[case] p: usize, #[case] q: usize) {
        let mut uf = UnionFind::new(5);
        assert!(matches!(uf.union(p, q), Err(Error::InvalidVertex { num_nodes: 5, .. })));
        assert_eq!(uf.count(), 5);
    }

    #[test]
    fn merge_in_range() {
        let mut uf = UnionFind::new(4);
        assert!(uf.merge(0, 3));
        assert!(!uf.merge(3, 0));
        assert!(uf.same_set(0, 3));
        assert!(!uf.same_set(1, 3));
        assert_eq!(uf.connected(1, 4), Err(Error::InvalidVertex { vertex: 4, num_nodes: 4 }));
        assert_eq!(uf.count(), 3);
    }

    #[test]
    fn long_chain_is_compressed() {
        let n = 100_000;
        let mut uf = UnionFind::new(n);
        for i in 1..n {
            uf.union(i - 1, i).unwrap();
        }
        assert_eq!(uf.count(), 1);
        assert_eq!(uf.find(n - 1).unwrap(), uf.find(0).unwrap());
    }
}
