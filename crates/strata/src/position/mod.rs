//! Horizontal placement.
//!
//! Levels are processed one at a time in sweep direction. Each member wants to sit at the
//! barycenter of its neighbors in the level placed just before; members are sorted by that
//! preference, start as singleton groups, and neighboring groups that overlap (spacing included)
//! are merged until none do. Members then take consecutive slots inside their group.

pub mod group;

pub use group::{Member, NodeGroup};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::level::Level;
use crate::model::{AuxEdge, AuxNode};
use crate::normalize::AuxGraph;
use crate::util::with_num;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Neighbors are predecessors in the level above.
    Down,
    /// Neighbors are successors in the level below.
    Up,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub levels: usize,
    pub merges: usize,
}

pub fn run(aux: &mut AuxGraph, config: &LayoutConfig) -> Result<PlacementStats> {
    let mut stats = PlacementStats::default();
    let level_count = aux.levels.len();

    for sweep_ix in 0..config.sweeps {
        let sweep = if sweep_ix % 2 == 0 {
            Sweep::Down
        } else {
            Sweep::Up
        };
        let ranks: Vec<usize> = match sweep {
            Sweep::Down => (0..level_count).collect(),
            Sweep::Up => (0..level_count).rev().collect(),
        };
        for r in ranks {
            let placed_before = sweep_ix > 0;
            let level = &mut aux.levels[r];
            stats.merges += arrange_level(&mut aux.graph, level, sweep, placed_before, config)?;
            stats.levels += 1;
        }
    }

    translate(&mut aux.graph, config.margin_x)?;
    Ok(stats)
}

/// Mean x of the neighbors of `n` in the level placed before it, if it has any.
pub fn barycenter(aux: &Graph<AuxNode, AuxEdge>, n: NodeId, sweep: Sweep) -> Option<f64> {
    let neighbors: Vec<NodeId> = match sweep {
        Sweep::Down => aux.predecessors(n).collect(),
        Sweep::Up => aux.successors(n).collect(),
    };
    if neighbors.is_empty() {
        return None;
    }
    let sum: f64 = neighbors
        .iter()
        .filter_map(|&w| aux.payload(w).ok())
        .map(|node| node.x)
        .sum();
    Some(sum / neighbors.len() as f64)
}

/// Places one level and returns how many group merges it took.
fn arrange_level(
    aux: &mut Graph<AuxNode, AuxEdge>,
    level: &mut Level,
    sweep: Sweep,
    placed_before: bool,
    config: &LayoutConfig,
) -> Result<usize> {
    // Members without placed neighbors keep their slot: they inherit the preference of the
    // member before them (or keep their own x once a previous sweep placed them).
    let mut wanted: Vec<(NodeId, f64)> = Vec::with_capacity(level.len());
    let mut inherited = 0.0;
    for &n in level.nodes() {
        let center = match barycenter(aux, n, sweep) {
            Some(b) => b,
            None if placed_before => aux.payload(n)?.x,
            None => inherited,
        };
        inherited = center;
        wanted.push((n, center));
    }
    // Ties keep their encounter order.
    with_num(aux, |aux, encounter| {
        for (pos, &n) in level.nodes().iter().enumerate() {
            aux.set_node_number(n, encounter, pos as u32)?;
        }
        wanted.sort_unstable_by(|a, b| {
            a.1.total_cmp(&b.1).then_with(|| {
                aux.node_number(a.0, encounter)
                    .cmp(&aux.node_number(b.0, encounter))
            })
        });
        Ok(())
    })?;
    level.reorder(aux, wanted.iter().map(|(n, _)| *n).collect())?;

    let mut merges = 0usize;
    let mut groups: Vec<NodeGroup> = Vec::with_capacity(wanted.len());
    for (n, center) in wanted {
        let node = aux.payload(n)?;
        groups.push(NodeGroup::new(
            Member {
                node: n,
                kind: node.kind,
                width: node.width,
            },
            center,
        ));
        while groups.len() >= 2 {
            let len = groups.len();
            if !groups[len - 2].interleaves(&groups[len - 1], config) {
                break;
            }
            let (Some(right), Some(left)) = (groups.pop(), groups.pop()) else {
                break;
            };
            groups.push(left.merge(right, config));
            merges += 1;
        }
    }

    for group in &groups {
        for (n, x) in group.positions(config) {
            aux.node_mut(n)?.payload_mut().x = x;
        }
    }
    tracing::trace!(
        rank = level.rank(),
        members = level.len(),
        groups = groups.len(),
        merges,
        "arranged level"
    );
    Ok(merges)
}

/// Shifts every node so the leftmost node edge sits at `margin`.
fn translate(aux: &mut Graph<AuxNode, AuxEdge>, margin: f64) -> Result<()> {
    let min_left = aux
        .nodes()
        .map(|(_, node)| node.payload().left())
        .fold(f64::INFINITY, f64::min);
    if !min_left.is_finite() {
        return Ok(());
    }
    let dx = margin - min_left;
    let ids: Vec<NodeId> = aux.node_ids().collect();
    for n in ids {
        aux.node_mut(n)?.payload_mut().x += dx;
    }
    Ok(())
}
