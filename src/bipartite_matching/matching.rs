use crate::error::{validate_vertex, Error, Result};

/// A matching of a bipartite graph together with a vertex cover of the same
/// size, which proves it maximum.
#[derive(Clone, PartialEq, Debug)]
pub struct Matching {
    pub(crate) mate: Vec<Option<usize>>,
    pub(crate) size: usize,
    pub(crate) cover: Vec<bool>,
    pub(crate) num_augmentations: usize,
}

impl Matching {
    /// Empty matching over `num_nodes` vertices.
    pub fn unmatched(num_nodes: usize) -> Self {
        Self { mate: vec![None; num_nodes], size: 0, cover: vec![false; num_nodes], num_augmentations: 0 }
    }

    /// Matching made of the given vertex pairs. No vertex may appear twice.
    /// Whether the pairs are edges is only known once a graph is supplied, see
    /// [`AlternatingPath::resume`](crate::AlternatingPath::resume).
    pub fn from_pairs(num_nodes: usize, pairs: &[(usize, usize)]) -> Result<Self> {
        let mut matching = Self::unmatched(num_nodes);
        for &(u, v) in pairs {
            validate_vertex(u, num_nodes)?;
            validate_vertex(v, num_nodes)?;
            if let Some(&w) = [u, v].iter().find(|&&w| matching.mate[w].is_some()) {
                return Err(Error::InvalidMatching { vertex: w });
            }
            if u == v {
                return Err(Error::InvalidMatching { vertex: u });
            }
            matching.mate[u] = Some(v);
            matching.mate[v] = Some(u);
            matching.size += 1;
        }
        Ok(matching)
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.mate.len()
    }

    /// Number of matched pairs.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_perfect(&self) -> bool {
        2 * self.size == self.num_nodes()
    }

    pub fn mate(&self, u: usize) -> Result<Option<usize>> {
        validate_vertex(u, self.num_nodes())?;
        Ok(self.mate[u])
    }

    pub fn is_matched(&self, u: usize) -> Result<bool> {
        Ok(self.mate(u)?.is_some())
    }

    pub fn in_min_vertex_cover(&self, u: usize) -> Result<bool> {
        validate_vertex(u, self.num_nodes())?;
        Ok(self.cover[u])
    }

    pub fn min_vertex_cover(&self) -> Vec<usize> {
        (0..self.num_nodes()).filter(|&u| self.cover[u]).collect()
    }

    /// Matched pairs `(u, v)` with `u < v`, ordered by `u`.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.mate.iter().enumerate().filter_map(|(u, &v)| v.filter(|&v| u < v).map(|v| (u, v))).collect()
    }

    pub fn mates(&self) -> &[Option<usize>] {
        &self.mate
    }

    pub fn cover(&self) -> &[bool] {
        &self.cover
    }

    /// Augmenting paths applied by the run that produced this matching.
    #[inline]
    pub fn num_augmentations(&self) -> usize {
        self.num_augmentations
    }
}
