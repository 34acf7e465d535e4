//! Layout tuning knobs.
//!
//! All distances are in the same unit as node sizes. The three spacing values are the minimum
//! horizontal gaps between neighbors in a level, picked by the kinds of the two neighbors.

use crate::error::{LayoutError, Result};
use crate::model::NodeKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Gap between two real nodes.
    pub simple_spacing: f64,
    /// Gap between a real node and an edge-control node.
    pub mixed_spacing: f64,
    /// Gap between two edge-control nodes.
    pub control_spacing: f64,
    /// Width given to edge-control nodes.
    pub control_width: f64,
    /// Vertical gap between two rank bands.
    pub rank_spacing: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Number of placement sweeps; the first goes top-down, then they alternate.
    pub sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            simple_spacing: 40.0,
            mixed_spacing: 20.0,
            control_spacing: 10.0,
            control_width: 0.0,
            rank_spacing: 50.0,
            margin_x: 0.0,
            margin_y: 0.0,
            sweeps: 1,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        let config = Self::deserialize(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("simpleSpacing", self.simple_spacing),
            ("mixedSpacing", self.mixed_spacing),
            ("controlSpacing", self.control_spacing),
            ("controlWidth", self.control_width),
            ("rankSpacing", self.rank_spacing),
            ("marginX", self.margin_x),
            ("marginY", self.margin_y),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.sweeps == 0 {
            return Err(LayoutError::InvalidConfig(
                "sweeps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Minimum gap between two horizontally adjacent nodes of the given kinds.
    pub fn spacing(&self, left: NodeKind, right: NodeKind) -> f64 {
        match (left, right) {
            (NodeKind::Simple, NodeKind::Simple) => self.simple_spacing,
            (NodeKind::EdgeControl, NodeKind::EdgeControl) => self.control_spacing,
            _ => self.mixed_spacing,
        }
    }
}
