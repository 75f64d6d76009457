//! Element data model shared by all helpers.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable unique identifier for an element.
pub type ElementId = Uuid;

/// Display color (RGBA8). Semantically opaque to this crate: it is carried,
/// compared, and handed to the render surface, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// A positioned, sized, rotatable rectangular element with optional nesting.
///
/// `id` is immutable for the element's lifetime and unique within any single
/// snapshot. `parent_id` links form a forest; cycle prevention is the host's
/// responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Parent element for nesting (None = top level).
    #[serde(default)]
    pub parent_id: Option<ElementId>,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the element (non-negative).
    pub width: f64,
    /// Height of the element (non-negative).
    pub height: f64,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Display color (None = host default styling).
    #[serde(default)]
    pub color: Option<Color>,
}

impl Element {
    /// Create a new top-level element with a fresh id.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: None,
            position,
            width,
            height,
            rotation: 0.0,
            color: None,
        }
    }

    /// Nest this element under a parent.
    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Set the display color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Get the element's axis-aligned bounding box (ignores rotation).
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Get the center point of the element.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    /// Compare the geometric and display state field-wise, id excluded.
    ///
    /// Exact equality on position, size, rotation, color, and parent link.
    /// This is the comparison the diff engine classifies "modified" by.
    pub fn same_appearance(&self, other: &Element) -> bool {
        self.position.x == other.position.x
            && self.position.y == other.position.y
            && self.width == other.width
            && self.height == other.height
            && self.rotation == other.rotation
            && self.color == other.color
            && self.parent_id == other.parent_id
    }
}

/// Snapshot precondition violations.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("duplicate element id: {0}")]
    DuplicateId(ElementId),
    #[error("negative size {width}x{height} for element {id}")]
    NegativeSize {
        id: ElementId,
        width: f64,
        height: f64,
    },
}

/// Check the preconditions the other helpers assume of a snapshot:
/// unique ids and non-negative sizes.
///
/// The helpers themselves stay total over whatever they are given; hosts
/// that cannot guarantee well-formed input call this gate first.
pub fn validate_snapshot(elements: &[Element]) -> Result<(), SnapshotError> {
    let mut seen = std::collections::HashSet::new();
    for element in elements {
        if !seen.insert(element.id) {
            return Err(SnapshotError::DuplicateId(element.id));
        }
        if element.width < 0.0 || element.height < 0.0 {
            return Err(SnapshotError::NegativeSize {
                id: element.id,
                width: element.width,
                height: element.height,
            });
        }
    }
    Ok(())
}

/// Serialize a snapshot to JSON.
pub fn snapshot_to_json(elements: &[Element]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(elements)
}

/// Deserialize a snapshot from JSON.
pub fn snapshot_from_json(json: &str) -> Result<Vec<Element>, serde_json::Error> {
    serde_json::from_str(json)
}
