use petgraph::algo::{connected_components, min_spanning_tree};
use petgraph::data::FromElements;
use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::analysis::SimilarityScores;
use crate::dataset::UserRecord;
use crate::error::Result;

/// Weight given to a plain follow edge.
pub const FOLLOW_WEIGHT: f64 = 1.0;

/// Undirected username graph. At most one edge per node pair.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    graph: UnGraph<String, f64>,
    node_indices: HashMap<String, NodeIndex>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// One edge between each user and each of their followers.
    pub fn from_followers(dataset: &[UserRecord]) -> Self {
        let mut social = SocialGraph::new();
        for user in dataset {
            for follower in &user.followers {
                social.add_edge(&user.username, follower, FOLLOW_WEIGHT);
            }
        }
        debug!(
            nodes = social.node_count(),
            edges = social.edge_count(),
            "follower graph built"
        );
        social
    }

    /// Link every pair scoring above `threshold`, weighted `1 / score` so
    /// closer users are cheaper to connect. Returns how many edges were
    /// added or reweighted.
    pub fn add_similarity_edges(&mut self, scores: &SimilarityScores, threshold: f64) -> usize {
        let mut touched = 0;
        for (pair, score) in scores.above(threshold) {
            self.add_edge(pair.first(), pair.second(), 1.0 / score);
            touched += 1;
        }
        debug!(touched, threshold, "similarity edges added");
        touched
    }

    pub fn add_node(&mut self, username: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(username) {
            return idx;
        }
        let idx = self.graph.add_node(username.to_string());
        self.node_indices.insert(username.to_string(), idx);
        idx
    }

    /// Adds the edge, or overwrites the weight of the one already there.
    /// `a == b` gives a self-loop.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: f64) {
        let node1 = self.add_node(a);
        let node2 = self.add_node(b);
        if let Some(edge) = self.graph.find_edge(node1, node2) {
            self.graph[edge] = weight;
        } else {
            self.graph.add_edge(node1, node2, weight);
        }
    }

    /// Kruskal spanning forest; one tree per connected component.
    pub fn minimum_spanning_tree(&self) -> SocialGraph {
        let graph: UnGraph<String, f64> = UnGraph::from_elements(min_spanning_tree(&self.graph));
        let node_indices = graph
            .node_indices()
            .map(|idx| (graph[idx].clone(), idx))
            .collect();
        SocialGraph {
            graph,
            node_indices,
        }
    }

    /// Read-only view of the underlying petgraph graph.
    pub fn inner(&self) -> &UnGraph<String, f64> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.node_indices.contains_key(username)
    }

    pub fn node(&self, username: &str) -> Option<NodeIndex> {
        self.node_indices.get(username).copied()
    }

    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let edge = self.graph.find_edge(self.node(a)?, self.node(b)?)?;
        Some(self.graph[edge])
    }

    /// `(source, target, weight)` for every edge.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                *edge.weight(),
            )
        })
    }

    pub fn to_dot(&self) -> String {
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[DotConfig::EdgeNoLabel, DotConfig::NodeNoLabel],
            &|_, edge| format!("label=\"{:.2}\"", edge.weight()),
            &|_, (_, username)| format!("label=\"{}\"", username),
        );
        format!("{:?}", dot)
    }

    pub fn write_dot(&self, filename: &Path) -> Result<()> {
        std::fs::write(filename, self.to_dot())?;
        Ok(())
    }
}
