//! Undirected simple graph in CSR form for yearly kinship networks.
//!
//! The kinship network is rebuilt once per study year, so construction cost
//! dominates over query cost. CSR keeps the per-node neighbor scan cheap and
//! cache-friendly while still allowing isolated nodes (states with no shared
//! kinship group that year) via an explicit node count.
//!
//! # Examples
//!
//! ```
//! use contagio::graph::Graph;
//!
//! // Triangle plus one isolated node.
//! let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 0)], 4);
//!
//! assert_eq!(g.num_nodes(), 4);
//! assert_eq!(g.num_edges(), 3);
//! assert_eq!(g.neighbors(3), &[]);
//! ```

/// Graph node identifier (contiguous integers for cache efficiency).
pub type NodeId = usize;

/// Undirected simple graph using CSR (Compressed Sparse Row) adjacency.
///
/// Node ids are contiguous `0..n`; callers keep their own mapping from
/// state codes to node ids (see [`crate::spillover::YearNetwork`]).
#[derive(Debug, Clone)]
pub struct Graph {
    row_ptr: Vec<usize>,      // Offset into col_indices (length = n_nodes + 1)
    col_indices: Vec<NodeId>, // Flattened sorted neighbor lists
    n_nodes: usize,
    n_edges: usize,
}

impl Graph {
    /// Create an edgeless graph with `n_nodes` isolated nodes.
    #[must_use]
    pub fn empty(n_nodes: usize) -> Self {
        Self {
            row_ptr: vec![0; n_nodes + 1],
            col_indices: Vec::new(),
            n_nodes,
            n_edges: 0,
        }
    }

    /// Build an undirected graph from an edge list.
    ///
    /// `n_nodes` is explicit rather than inferred from the maximum endpoint
    /// so that trailing isolated nodes are represented. Duplicate edges and
    /// self-loops are dropped.
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is `>= n_nodes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use contagio::graph::Graph;
    ///
    /// let g = Graph::from_edges(&[(0, 1), (1, 0), (2, 2)], 3);
    /// assert_eq!(g.num_edges(), 1); // reverse duplicate and self-loop dropped
    /// ```
    #[must_use]
    pub fn from_edges(edges: &[(NodeId, NodeId)], n_nodes: usize) -> Self {
        let mut adj_list: Vec<Vec<NodeId>> = vec![Vec::new(); n_nodes];
        for &(source, target) in edges {
            assert!(
                source < n_nodes && target < n_nodes,
                "edge ({source}, {target}) out of range for {n_nodes} nodes"
            );
            if source == target {
                continue;
            }
            adj_list[source].push(target);
            adj_list[target].push(source);
        }

        for neighbors in &mut adj_list {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        let mut row_ptr = Vec::with_capacity(n_nodes + 1);
        let mut col_indices = Vec::new();

        row_ptr.push(0);
        for neighbors in &adj_list {
            col_indices.extend_from_slice(neighbors);
            row_ptr.push(col_indices.len());
        }

        // Each undirected edge appears twice in the adjacency.
        let n_edges = col_indices.len() / 2;

        Self {
            row_ptr,
            col_indices,
            n_nodes,
            n_edges,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Number of (unordered) edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.n_edges
    }

    /// Neighbors of node `v` in O(1) lookup, sorted ascending.
    ///
    /// Out-of-range ids return an empty slice.
    #[must_use]
    pub fn neighbors(&self, v: NodeId) -> &[NodeId] {
        if v >= self.n_nodes {
            return &[];
        }
        let start = self.row_ptr[v];
        let end = self.row_ptr[v + 1];
        &self.col_indices[start..end]
    }

    /// Degree of node `v`.
    #[must_use]
    pub fn degree(&self, v: NodeId) -> usize {
        self.neighbors(v).len()
    }

    /// Whether an edge exists between `u` and `v`.
    #[must_use]
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Induced subgraph over `nodes`, with ids renumbered to `0..nodes.len()`
    /// in the given order.
    ///
    /// An edge survives iff both endpoints are in `nodes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use contagio::graph::Graph;
    ///
    /// let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 0), (2, 3)], 4);
    /// let sub = g.induced_subgraph(&[0, 1, 2]);
    /// assert_eq!(sub.num_nodes(), 3);
    /// assert_eq!(sub.num_edges(), 3); // the triangle; edge to 3 is cut
    /// ```
    #[must_use]
    pub fn induced_subgraph(&self, nodes: &[NodeId]) -> Self {
        let mut remap = vec![usize::MAX; self.n_nodes];
        for (new_id, &old_id) in nodes.iter().enumerate() {
            remap[old_id] = new_id;
        }

        let mut edges = Vec::new();
        for &old_id in nodes {
            let u = remap[old_id];
            for &w in self.neighbors(old_id) {
                let v = remap[w];
                if v != usize::MAX && u < v {
                    edges.push((u, v));
                }
            }
        }

        Self::from_edges(&edges, nodes.len())
    }

    /// Global transitivity: 3 x triangles / connected triads.
    ///
    /// Returns `None` when the graph admits no triad at all (every node has
    /// degree < 2), mirroring the undefined case that the spillover metrics
    /// map to a sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use contagio::graph::Graph;
    ///
    /// let triangle = Graph::from_edges(&[(0, 1), (1, 2), (2, 0)], 3);
    /// assert_eq!(triangle.transitivity(), Some(1.0));
    ///
    /// let single_edge = Graph::from_edges(&[(0, 1)], 2);
    /// assert_eq!(single_edge.transitivity(), None);
    /// ```
    #[must_use]
    pub fn transitivity(&self) -> Option<f64> {
        let mut triangles = 0usize;
        let mut triads = 0usize;

        for v in 0..self.n_nodes {
            let neighbors = self.neighbors(v);
            let deg = neighbors.len();

            if deg < 2 {
                continue;
            }

            triads += deg * (deg - 1) / 2;

            for i in 0..neighbors.len() {
                for j in (i + 1)..neighbors.len() {
                    if self.has_edge(neighbors[i], neighbors[j]) {
                        triangles += 1;
                    }
                }
            }
        }

        if triads == 0 {
            return None;
        }

        // triangles here already counts each triangle once per corner with
        // degree >= 2, i.e. three times total, so no extra factor of 3.
        Some(triangles as f64 / triads as f64)
    }

    /// Transitivity of the closed neighborhood of `v` (self + direct
    /// neighbors).
    ///
    /// Returns `None` either when `v` is isolated or when the ego subgraph
    /// admits no triads (e.g. exactly one neighbor); callers distinguish the
    /// two cases via [`Graph::degree`].
    ///
    /// # Examples
    ///
    /// ```
    /// use contagio::graph::Graph;
    ///
    /// let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 0)], 3);
    /// assert_eq!(g.ego_transitivity(0), Some(1.0));
    /// ```
    #[must_use]
    pub fn ego_transitivity(&self, v: NodeId) -> Option<f64> {
        let neighbors = self.neighbors(v);
        if neighbors.is_empty() {
            return None;
        }

        let mut closed: Vec<NodeId> = Vec::with_capacity(neighbors.len() + 1);
        closed.push(v);
        closed.extend_from_slice(neighbors);

        self.induced_subgraph(&closed).transitivity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let g = Graph::empty(5);
        assert_eq!(g.num_nodes(), 5);
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.neighbors(2), &[]);
    }

    #[test]
    fn test_from_edges_basic() {
        let g = Graph::from_edges(&[(0, 1), (1, 2)], 3);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.neighbors(1), &[0, 2]);
    }

    #[test]
    fn test_isolated_nodes_kept() {
        let g = Graph::from_edges(&[(0, 1)], 4);
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.degree(2), 0);
        assert_eq!(g.degree(3), 0);
    }

    #[test]
    fn test_duplicate_and_self_loop_dropped() {
        let g = Graph::from_edges(&[(0, 1), (1, 0), (0, 1), (2, 2)], 3);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.neighbors(2), &[]);
    }

    #[test]
    fn test_has_edge() {
        let g = Graph::from_edges(&[(0, 1), (1, 2)], 3);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 0));
        assert!(!g.has_edge(0, 2));
    }

    #[test]
    fn test_out_of_range_neighbors() {
        let g = Graph::from_edges(&[(0, 1)], 2);
        assert_eq!(g.neighbors(10), &[]);
        assert!(!g.has_edge(10, 0));
    }

    #[test]
    fn test_induced_subgraph_renumbers() {
        // Square with one diagonal: 0-1, 1-2, 2-3, 3-0, 0-2
        let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)], 4);
        let sub = g.induced_subgraph(&[1, 2, 0]);
        assert_eq!(sub.num_nodes(), 3);
        // Triangle 0-1-2 survives under new ids.
        assert_eq!(sub.num_edges(), 3);
        assert_eq!(sub.transitivity(), Some(1.0));
    }

    #[test]
    fn test_transitivity_triangle() {
        let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 0)], 3);
        let t = g.transitivity().unwrap();
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transitivity_path_is_zero() {
        // Path 0-1-2: one triad at node 1, no triangle.
        let g = Graph::from_edges(&[(0, 1), (1, 2)], 3);
        assert_eq!(g.transitivity(), Some(0.0));
    }

    #[test]
    fn test_transitivity_undefined() {
        let g = Graph::from_edges(&[(0, 1)], 2);
        assert_eq!(g.transitivity(), None);
        assert_eq!(Graph::empty(3).transitivity(), None);
    }

    #[test]
    fn test_ego_transitivity_triangle_member() {
        let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 0)], 3);
        for v in 0..3 {
            assert_eq!(g.ego_transitivity(v), Some(1.0));
        }
    }

    #[test]
    fn test_ego_transitivity_isolated() {
        let g = Graph::from_edges(&[(0, 1)], 3);
        assert_eq!(g.ego_transitivity(2), None);
    }

    #[test]
    fn test_ego_transitivity_single_neighbor_undefined() {
        // Node 0 has one neighbor; ego graph is a single edge.
        let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)], 4);
        assert_eq!(g.ego_transitivity(0), None);
        assert_eq!(g.degree(0), 1);
    }

    #[test]
    fn test_ego_transitivity_star_center() {
        // Star: center 0 with three unconnected leaves.
        let g = Graph::from_edges(&[(0, 1), (0, 2), (0, 3)], 4);
        let t = g.ego_transitivity(0).unwrap();
        assert!((t - 0.0).abs() < 1e-12);
    }
}
