//! Relationships between classifiers
//!
//! A relationship holds non-owning [`ClassifierId`] references into its
//! diagram's classifier collection. Self-relationships are legal at this
//! level; policy against creating them belongs to interactive callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ClassifierId;

/// Kind of relationship between two classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    Inheritance,
    Implementation,
    Association,
    Aggregation,
    Composition,
    Dependency,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Inheritance => write!(f, "inheritance"),
            RelationKind::Implementation => write!(f, "implementation"),
            RelationKind::Association => write!(f, "association"),
            RelationKind::Aggregation => write!(f, "aggregation"),
            RelationKind::Composition => write!(f, "composition"),
            RelationKind::Dependency => write!(f, "dependency"),
        }
    }
}

impl RelationKind {
    /// Kinds that carry multiplicity expressions on their ends
    pub fn supports_multiplicity(self) -> bool {
        matches!(
            self,
            RelationKind::Association | RelationKind::Aggregation | RelationKind::Composition
        )
    }
}

/// Line pattern for rendering a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Display style of a relationship line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub pattern: LinePattern,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            width: 1.0,
            pattern: LinePattern::Solid,
        }
    }
}

/// A 2D control point on a relationship line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A relationship between two classifiers in a diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: ClassifierId,
    pub target: ClassifierId,
    pub kind: RelationKind,
    pub source_role: Option<String>,
    pub target_role: Option<String>,
    pub source_multiplicity: Option<String>,
    pub target_multiplicity: Option<String>,
    pub source_tooltip: Option<String>,
    pub target_tooltip: Option<String>,
    pub style: LineStyle,
    pub control_points: Vec<Point>,
}

impl Relationship {
    pub fn new(source: ClassifierId, target: ClassifierId, kind: RelationKind) -> Self {
        Self {
            source,
            target,
            kind,
            source_role: None,
            target_role: None,
            source_multiplicity: None,
            target_multiplicity: None,
            source_tooltip: None,
            target_tooltip: None,
            style: LineStyle::default(),
            control_points: Vec::new(),
        }
    }

    pub fn with_roles(
        mut self,
        source_role: impl Into<String>,
        target_role: impl Into<String>,
    ) -> Self {
        self.source_role = Some(source_role.into());
        self.target_role = Some(target_role.into());
        self
    }

    pub fn with_source_multiplicity(mut self, multiplicity: impl Into<String>) -> Self {
        self.source_multiplicity = Some(multiplicity.into());
        self
    }

    pub fn with_target_multiplicity(mut self, multiplicity: impl Into<String>) -> Self {
        self.target_multiplicity = Some(multiplicity.into());
        self
    }

    pub fn with_control_point(mut self, point: Point) -> Self {
        self.control_points.push(point);
        self
    }
}
