//! Mergeable placement groups.
//!
//! A group is a run of level members that share one interval. Its width is the members' widths
//! plus the kind-dependent spacing between consecutive members, so laying the members out from
//! `left()` fills the interval exactly.

use crate::config::LayoutConfig;
use crate::graph::NodeId;
use crate::model::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Member {
    pub node: NodeId,
    pub kind: NodeKind,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeGroup {
    members: Vec<Member>,
    center: f64,
    width: f64,
}

impl NodeGroup {
    pub fn new(member: Member, center: f64) -> Self {
        Self {
            width: member.width,
            members: vec![member],
            center,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn left(&self) -> f64 {
        self.center - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center + self.width / 2.0
    }

    fn first_kind(&self) -> NodeKind {
        self.members.first().map(|m| m.kind).unwrap_or_default()
    }

    fn last_kind(&self) -> NodeKind {
        self.members.last().map(|m| m.kind).unwrap_or_default()
    }

    /// Whether `right` (the next group to the right) starts before this group ends plus the
    /// spacing required between the two touching members.
    pub fn interleaves(&self, right: &NodeGroup, config: &LayoutConfig) -> bool {
        let gap = config.spacing(self.last_kind(), right.first_kind());
        self.right() + gap > right.left()
    }

    /// Joins `right` after this group's members. The merged group is centered on the midpoint of
    /// the two former centers.
    pub fn merge(mut self, right: NodeGroup, config: &LayoutConfig) -> NodeGroup {
        self.center = (self.center + right.center) / 2.0;
        self.members.extend(right.members);
        self.width = span(&self.members, config);
        self
    }

    /// Center x of every member, left to right.
    pub fn positions(&self, config: &LayoutConfig) -> Vec<(NodeId, f64)> {
        let mut out = Vec::with_capacity(self.members.len());
        let mut cursor = self.left();
        let mut prev: Option<&Member> = None;
        for m in &self.members {
            if let Some(p) = prev {
                cursor += config.spacing(p.kind, m.kind);
            }
            out.push((m.node, cursor + m.width / 2.0));
            cursor += m.width;
            prev = Some(m);
        }
        out
    }
}

fn span(members: &[Member], config: &LayoutConfig) -> f64 {
    let widths: f64 = members.iter().map(|m| m.width).sum();
    let gaps: f64 = members
        .windows(2)
        .map(|pair| config.spacing(pair[0].kind, pair[1].kind))
        .sum();
    widths + gaps
}
