//! Commitment graph for ranked pairs.

/// Directed graph of committed preferences over `0..m`.
///
/// An edge `(i, j)` means "`i` is committed ahead of `j`". Edges are only
/// added through [`try_commit`](Self::try_commit), which refuses any edge
/// that would close a cycle, so the graph is acyclic after every call.
/// The adjacency lists are updated on every commit because each later
/// candidate edge queries them.
#[derive(Debug, Clone)]
pub struct CommitmentGraph {
    members: Vec<usize>,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
    // Scratch space for reachability searches, cleared after each query.
    visited: Vec<bool>,
    touched: Vec<usize>,
    stack: Vec<usize>,
}

impl CommitmentGraph {
    /// Creates an empty graph over `members`, a duplicate-free subset of
    /// `0..universe`.
    pub fn new(universe: usize, members: &[usize]) -> Self {
        Self {
            members: members.to_vec(),
            adjacency: vec![Vec::new(); universe],
            edges: Vec::new(),
            visited: vec![false; universe],
            touched: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Vertices of the graph, in the order they were supplied.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Committed edges in commit order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Successors of `v`.
    pub fn successors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    /// Number of entities `v` is committed ahead of directly.
    pub fn out_degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Returns `true` if a directed path of at least one edge leads from
    /// `s` to `t`.
    pub fn reachable(&mut self, s: usize, t: usize) -> bool {
        self.stack.clear();
        self.stack.push(s);
        self.visited[s] = true;
        self.touched.clear();
        self.touched.push(s);
        let mut found = false;

        'search: while let Some(v) = self.stack.pop() {
            for &w in &self.adjacency[v] {
                if w == t {
                    found = true;
                    break 'search;
                }
                if !self.visited[w] {
                    self.visited[w] = true;
                    self.touched.push(w);
                    self.stack.push(w);
                }
            }
        }

        for &v in &self.touched {
            self.visited[v] = false;
        }
        found
    }

    /// Commits `(i, j)` unless `j` already reaches `i`. Returns whether the
    /// edge was added.
    pub fn try_commit(&mut self, i: usize, j: usize) -> bool {
        if self.reachable(j, i) {
            return false;
        }
        self.adjacency[i].push(j);
        self.edges.push((i, j));
        true
    }

    /// Kahn's algorithm over the member set.
    pub fn is_acyclic(&self) -> bool {
        let mut in_degree = vec![0usize; self.adjacency.len()];
        for &(_, j) in &self.edges {
            in_degree[j] += 1;
        }
        let mut ready: Vec<usize> = self
            .members
            .iter()
            .copied()
            .filter(|&v| in_degree[v] == 0)
            .collect();
        let mut removed = 0;
        while let Some(v) = ready.pop() {
            removed += 1;
            for &w in &self.adjacency[v] {
                in_degree[w] -= 1;
                if in_degree[w] == 0 {
                    ready.push(w);
                }
            }
        }
        removed == self.members.len()
    }
}
