//! The `layout` entry point: classify -> rank -> build aux graph -> place -> collect.

use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::graph::Graph;
use crate::model::{EdgeRoute, Layout, NodePlacement, NodeSize, Point};
use crate::normalize::AuxGraph;
use crate::{acyclic, normalize, position, rank};

/// Lays out `g`, returning a rank and coordinates per node and a route per edge.
///
/// `g` is borrowed mutably only for its marker and numeration slots; nodes, edges and payloads
/// are left untouched. Any error aborts the whole call.
pub fn layout<N, E>(g: &mut Graph<N, E>, config: &LayoutConfig) -> Result<Layout>
where
    N: NodeSize,
{
    config.validate()?;
    check_sizes(g)?;

    let span = tracing::debug_span!("layout", nodes = g.node_count(), edges = g.edge_count());
    let _guard = span.enter();

    let classification = acyclic::run(g)?;
    tracing::debug!(
        back_edges = classification.back_edge_count(),
        roots = classification.roots().len(),
        "classified edges"
    );

    let ranking = rank::run(g, &classification)?;
    tracing::debug!(max_rank = ranking.max_rank(), "ranked nodes");

    let mut aux = normalize::run(g, &classification, &ranking, config)?;
    tracing::debug!(
        levels = aux.levels.len(),
        controls = aux.control_count(),
        "built auxiliary graph"
    );

    let stats = position::run(&mut aux, config)?;
    tracing::debug!(
        levels = stats.levels,
        merges = stats.merges,
        "placed levels"
    );

    collect(g, &classification, &aux, config)
}

fn check_sizes<N, E>(g: &Graph<N, E>) -> Result<()>
where
    N: NodeSize,
{
    for (v, node) in g.nodes() {
        let (width, height) = (node.payload().width(), node.payload().height());
        let valid = |d: f64| d.is_finite() && d >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(LayoutError::InvalidNodeSize {
                node: v,
                width,
                height,
            });
        }
    }
    Ok(())
}

/// Center y of every rank band.
fn band_centers(aux: &AuxGraph, config: &LayoutConfig) -> (Vec<f64>, f64) {
    let mut centers = Vec::with_capacity(aux.levels.len());
    let mut top = config.margin_y;
    for (ix, level) in aux.levels.iter().enumerate() {
        if ix > 0 {
            top += config.rank_spacing;
        }
        let h = level.height(&aux.graph);
        centers.push(top + h / 2.0);
        top += h;
    }
    (centers, top)
}

/// y of anything placed on `rank`. Ranks without a band sit on the top margin.
fn band_y(centers: &[f64], rank: u32, config: &LayoutConfig) -> f64 {
    centers
        .get(rank as usize)
        .copied()
        .unwrap_or(config.margin_y)
}

fn collect<N, E>(
    g: &Graph<N, E>,
    classification: &acyclic::Classification,
    aux: &AuxGraph,
    config: &LayoutConfig,
) -> Result<Layout> {
    let (centers, bottom) = band_centers(aux, config);
    let mut out = Layout::new(aux.max_rank());
    for v in g.node_ids() {
        let a = aux
            .aux_node(v)
            .ok_or(LayoutError::UnrankedNode { node: v })?;
        let node = aux.graph.payload(a)?;
        out.push_node(NodePlacement {
            node: v,
            rank: node.rank,
            order: node.order,
            x: node.x,
            y: band_y(&centers, node.rank, config),
            width: node.width,
            height: node.height,
        });
    }

    let right_edge = aux
        .graph
        .nodes()
        .map(|(_, node)| node.payload().right())
        .fold(config.margin_x, f64::max);

    for e in g.edge_ids() {
        let inverted = classification.is_back_edge(e);
        let mut points: Vec<Point> = Vec::new();
        for &c in aux.chain(e) {
            let control = aux.graph.payload(c)?;
            points.push(Point {
                x: control.x,
                y: band_y(&centers, control.rank, config),
            });
        }
        if inverted {
            points.reverse();
        }
        out.push_edge(EdgeRoute {
            edge: e,
            inverted,
            self_loop: classification.is_self_loop(e),
            points,
        });
    }

    if !aux.graph.is_empty() {
        out.width = right_edge + config.margin_x;
        out.height = bottom + config.margin_y;
    }
    Ok(out)
}
