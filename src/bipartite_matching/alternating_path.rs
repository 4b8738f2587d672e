use crate::augmenting_path::{self, ResidualNetwork};
use crate::bipartite_matching::matching::Matching;
use crate::bipartition::Bipartition;
use crate::check;
use crate::error::{Error, Result};
use crate::graph::AdjacencyList;
use log::{debug, trace};

/// Maximum bipartite matching by shortest alternating paths.
///
/// This is unit-capacity Edmonds-Karp run directly on the graph: searches
/// start from the unmatched vertices of the `false` color class, may leave a
/// `false` vertex along any non-matching edge and a `true` vertex only along
/// its matching edge, and succeed on reaching an unmatched `true` vertex.
#[derive(Default)]
pub struct AlternatingPath {
    // (u, v) pairs to match along the current path
    path: Vec<(usize, usize)>,
}

// residual view of the graph under the current matching
struct Alternating<'a, G> {
    graph: &'a G,
    color: &'a [bool],
    mate: &'a [Option<usize>],
}

impl<G: AdjacencyList> ResidualNetwork for Alternating<'_, G> {
    type Step = ();

    #[inline]
    fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    fn for_each_residual_step<F>(&self, u: usize, mut visit: F)
    where
        F: FnMut(usize, ()),
    {
        for &v in self.graph.neighbors(u) {
            let matched = self.mate[u] == Some(v);
            // forward along unused edges, backward along matched ones
            if matched == self.color[u] {
                visit(v, ());
            }
        }
    }
}

impl AlternatingPath {
    pub fn solve<G: AdjacencyList>(&mut self, graph: &G) -> Result<Matching> {
        self.resume(graph, Matching::unmatched(graph.num_nodes()))
    }

    /// Grows `matching` (which must consist of edges of `graph`) into a
    /// maximum one. A matching that is already maximum comes back unchanged
    /// after one failed search.
    pub fn resume<G: AdjacencyList>(&mut self, graph: &G, matching: Matching) -> Result<Matching> {
        let bipartition = Bipartition::new(graph);
        if !bipartition.is_bipartite() {
            return Err(Error::NotBipartite);
        }
        validate(graph, &matching)?;

        let num_nodes = graph.num_nodes();
        let color = bipartition.colors();
        let mut mate = matching.mate;
        let mut size = matching.size;
        let mut num_augmentations = 0;

        let reached = loop {
            let tree = {
                let network = Alternating { graph, color, mate: &mate };
                let sources = (0..num_nodes).filter(|&u| !color[u] && mate[u].is_none());
                augmenting_path::search(&network, sources, |v| mate[v].is_none())
            };
            let Some(target) = tree.target() else {
                break tree.into_reached();
            };

            // every other edge of the path, starting from the target, becomes matched
            self.path.clear();
            self.path.extend(tree.path_to(target).step_by(2).map(|(u, _, v)| (u, v)));
            for &(u, v) in self.path.iter() {
                mate[u] = Some(v);
                mate[v] = Some(u);
            }

            size += 1;
            num_augmentations += 1;
            trace!("alternating path of {} edges ends at {}", 2 * self.path.len() - 1, target);
        };

        // König: unreached vertices of the start side, reached ones of the other
        let cover = (0..num_nodes).map(|u| color[u] == reached[u]).collect();

        debug!("maximum matching of size {} over {} vertices after {} augmentations", size, num_nodes, num_augmentations);

        let matching = Matching { mate, size, cover, num_augmentations };
        if cfg!(debug_assertions) {
            if let Err(violation) = check::check_matching(graph, &matching) {
                panic!("maximum matching certificate is broken: {violation}");
            }
        }
        Ok(matching)
    }
}

fn validate<G: AdjacencyList>(graph: &G, matching: &Matching) -> Result<()> {
    let num_nodes = graph.num_nodes();
    if matching.num_nodes() != num_nodes {
        return Err(Error::InvalidMatching { vertex: num_nodes.min(matching.num_nodes()) });
    }

    for (u, &v) in matching.mate.iter().enumerate() {
        let Some(v) = v else {
            continue;
        };
        if v >= num_nodes || matching.mate[v] != Some(u) || !graph.neighbors(u).contains(&v) {
            return Err(Error::InvalidMatching { vertex: u });
        }
    }
    Ok(())
}
