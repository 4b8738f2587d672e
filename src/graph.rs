use crate::error::{validate_vertex, Result};

/// Read-only view of an undirected graph over the vertices `0..num_nodes()`.
pub trait AdjacencyList {
    fn num_nodes(&self) -> usize;

    /// Vertices adjacent to `u`, one entry per incident edge.
    fn neighbors(&self, u: usize) -> &[usize];
}

#[derive(Default, Clone, Debug)]
pub struct Graph {
    num_nodes: usize,
    num_edges: usize,
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new(num_nodes: usize) -> Self {
        let mut graph = Self::default();
        graph.add_nodes(num_nodes);
        graph
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_node(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.adjacency.resize_with(self.num_nodes + num_nodes, Vec::new);
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<usize> {
        validate_vertex(u, self.num_nodes)?;
        validate_vertex(v, self.num_nodes)?;

        self.edges.push((u, v));
        self.adjacency[u].push(v);
        if u != v {
            self.adjacency[v].push(u);
        }

        self.num_edges += 1;
        Ok(self.num_edges - 1)
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    #[inline]
    pub fn degree(&self, u: usize) -> usize {
        self.adjacency[u].len()
    }
}

impl AdjacencyList for Graph {
    #[inline]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    fn neighbors(&self, u: usize) -> &[usize] {
        &self.adjacency[u]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn build() {
        let mut graph = Graph::default();
        assert_eq!(graph.add_nodes(3), vec![0, 1, 2]);
        assert_eq!(graph.add_node(), 3);

        assert_eq!(graph.add_edge(0, 1), Ok(0));
        assert_eq!(graph.add_edge(0, 2), Ok(1));
        assert_eq!(graph.add_edge(3, 3), Ok(2));
        assert_eq!(graph.add_edge(0, 4), Err(Error::InvalidVertex { vertex: 4, num_nodes: 4 }));

        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(2), &[0]);
        assert_eq!(graph.neighbors(3), &[3]);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.edges(), &[(0, 1), (0, 2), (3, 3)]);
    }
}
