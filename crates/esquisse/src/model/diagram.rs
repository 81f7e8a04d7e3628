//! The diagram aggregate
//!
//! Classifiers and relationships share one insertion-ordered element list so
//! z-order is preserved for rendering. All mutation goes through this API,
//! whether elements come from batch analysis or one-at-a-time editing, so the
//! referential invariants hold uniformly: a relationship can only be added
//! once both endpoints are present, and removing a classifier cascades to
//! every relationship referencing it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{DiagramError, Endpoint};

use super::{Classifier, Relationship};

/// Stable surrogate key for a classifier within its diagram
///
/// Ids are handed out by [`Diagram`] and never reused, so they stay valid
/// across removals of other elements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ClassifierId(u32);

impl ClassifierId {
    /// Build an id from its raw value. Only useful for tests and
    /// deserialization; diagrams assign ids themselves.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ClassifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable surrogate key for a relationship within its diagram
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RelationshipId(u32);

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry in the diagram's unified element list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Element {
    Classifier {
        id: ClassifierId,
        node: Classifier,
    },
    Relationship {
        id: RelationshipId,
        edge: Relationship,
    },
}

/// A UML class diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub show_grid: bool,
    pub snap_to_grid: bool,
    pub grid_size: f64,
    pub background_color: String,
    elements: Vec<Element>,
    next_id: u32,
}

impl Diagram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            author: None,
            version: None,
            show_grid: true,
            snap_to_grid: true,
            grid_size: 20.0,
            background_color: "#FFFFFF".to_string(),
            elements: Vec::new(),
            next_id: 0,
        }
    }

    fn bump(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a classifier, returning its id
    pub fn add_classifier(&mut self, node: Classifier) -> ClassifierId {
        let id = ClassifierId(self.bump());
        self.elements.push(Element::Classifier { id, node });
        id
    }

    /// Remove a classifier and every relationship referencing it as source
    /// or target. Returns the removed classifier, or `None` if the id is
    /// unknown.
    pub fn remove_classifier(&mut self, id: ClassifierId) -> Option<Classifier> {
        let mut removed = None;
        self.elements.retain(|element| match element {
            Element::Classifier { id: cid, node } if *cid == id => {
                removed = Some(node.clone());
                false
            }
            Element::Relationship { edge, .. } if edge.source == id || edge.target == id => false,
            _ => true,
        });
        removed
    }

    /// Add a relationship after checking both endpoints are present.
    ///
    /// Fails with [`DiagramError::DanglingEndpoint`] and leaves the diagram
    /// unchanged when an endpoint is absent.
    pub fn add_relationship(
        &mut self,
        edge: Relationship,
    ) -> Result<RelationshipId, DiagramError> {
        if !self.contains_classifier(edge.source) {
            return Err(DiagramError::dangling(Endpoint::Source, edge.source));
        }
        if !self.contains_classifier(edge.target) {
            return Err(DiagramError::dangling(Endpoint::Target, edge.target));
        }
        let id = RelationshipId(self.bump());
        self.elements.push(Element::Relationship { id, edge });
        Ok(id)
    }

    /// Remove a relationship, returning it if the id was known
    pub fn remove_relationship(&mut self, id: RelationshipId) -> Option<Relationship> {
        let position = self.elements.iter().position(
            |element| matches!(element, Element::Relationship { id: rid, .. } if *rid == id),
        )?;
        match self.elements.remove(position) {
            Element::Relationship { edge, .. } => Some(edge),
            // position() only matches relationship entries
            Element::Classifier { .. } => None,
        }
    }

    /// Add a batch of relationships, skipping any whose endpoints are
    /// missing, and return how many were added. Dropped edges are logged.
    pub fn extend_relationships(
        &mut self,
        edges: impl IntoIterator<Item = Relationship>,
    ) -> usize {
        let mut added = 0;
        for edge in edges {
            match self.add_relationship(edge) {
                Ok(_) => added += 1,
                Err(error) => tracing::warn!(%error, "dropping relationship"),
            }
        }
        added
    }

    pub fn contains_classifier(&self, id: ClassifierId) -> bool {
        self.classifier(id).is_some()
    }

    /// Look up a classifier by id
    pub fn classifier(&self, id: ClassifierId) -> Option<&Classifier> {
        self.elements.iter().find_map(|element| match element {
            Element::Classifier { id: cid, node } if *cid == id => Some(node),
            _ => None,
        })
    }

    /// Mutable lookup of a classifier by id
    pub fn classifier_mut(&mut self, id: ClassifierId) -> Option<&mut Classifier> {
        self.elements.iter_mut().find_map(|element| match element {
            Element::Classifier { id: cid, node } if *cid == id => Some(node),
            _ => None,
        })
    }

    /// First classifier whose simple name matches, in insertion order
    pub fn classifier_by_name(&self, name: &str) -> Option<(ClassifierId, &Classifier)> {
        self.classifiers().find(|(_, node)| node.name == name)
    }

    /// All classifiers in insertion order
    pub fn classifiers(&self) -> impl Iterator<Item = (ClassifierId, &Classifier)> {
        self.elements.iter().filter_map(|element| match element {
            Element::Classifier { id, node } => Some((*id, node)),
            _ => None,
        })
    }

    /// All relationships in insertion order
    pub fn relationships(&self) -> impl Iterator<Item = (RelationshipId, &Relationship)> {
        self.elements.iter().filter_map(|element| match element {
            Element::Relationship { id, edge } => Some((*id, edge)),
            _ => None,
        })
    }

    pub fn classifier_count(&self) -> usize {
        self.classifiers().count()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships().count()
    }

    /// Total element count, classifiers and relationships together
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}
