//! Force-directed node placement for drawing a [`SocialGraph`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use crate::graph::SocialGraph;

const MIN_DISTANCE: f64 = 0.01;
const START_TEMPERATURE: f64 = 0.1;

/// Node position in layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Fruchterman-Reingold placement, centred on the origin and scaled so the
/// widest coordinate sits at ±1.
///
/// Nodes repel each other by `k² / d` and edges pull by `w·d² / k` with
/// `k = 1/√n`. Each step moves a node at most the current temperature,
/// which cools linearly from 0.1.
pub fn spring_layout(
    social: &SocialGraph,
    iterations: usize,
    seed: u64,
) -> HashMap<String, Point> {
    let graph = social.inner();
    let n = graph.node_count();
    let mut layout = HashMap::with_capacity(n);
    if n == 0 {
        return layout;
    }
    if n == 1 {
        for idx in graph.node_indices() {
            layout.insert(graph[idx].clone(), Point { x: 0.0, y: 0.0 });
        }
        return layout;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<[f64; 2]> = (0..n)
        .map(|_| [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
        .collect();

    let mut attraction = vec![vec![0.0; n]; n];
    for edge in graph.raw_edges() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a != b {
            attraction[a][b] = edge.weight;
            attraction[b][a] = edge.weight;
        }
    }

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = START_TEMPERATURE;
    let cooling = temperature / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut moves = vec![[0.0f64; 2]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = k * k / (distance * distance) - attraction[i][j] * distance / k;
                moves[i][0] += dx * force;
                moves[i][1] += dy * force;
            }
        }
        for (p, m) in pos.iter_mut().zip(&moves) {
            let length = (m[0] * m[0] + m[1] * m[1]).sqrt().max(MIN_DISTANCE);
            p[0] += m[0] * temperature / length;
            p[1] += m[1] * temperature / length;
        }
        temperature -= cooling;
    }

    rescale(&mut pos);
    for idx in graph.node_indices() {
        let [x, y] = pos[idx.index()];
        layout.insert(graph[idx].clone(), Point { x, y });
    }
    layout
}

fn rescale(pos: &mut [[f64; 2]]) {
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p[1]).sum::<f64>() / n;
    let mut extent: f64 = 0.0;
    for p in pos.iter_mut() {
        p[0] -= mean_x;
        p[1] -= mean_y;
        extent = extent.max(p[0].abs()).max(p[1].abs());
    }
    if extent > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= extent;
            p[1] /= extent;
        }
    }
}
