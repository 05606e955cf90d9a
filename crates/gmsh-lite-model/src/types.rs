// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for MSH data representation
//!
//! Tags are kept exactly as written in the file. Cross references between
//! entities (bounding tags, physical tags) are never resolved here.

use crate::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoding of the mesh body, declared in `$MeshFormat`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum FileType {
    #[default]
    Ascii,
    Binary,
}

impl FileType {
    /// Map the file-type flag (0 or 1)
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(FileType::Ascii),
            1 => Some(FileType::Binary),
            _ => None,
        }
    }
}

/// Byte order detected from the binary endianness marker
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the host
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => f.write_str("little-endian"),
            ByteOrder::Big => f.write_str("big-endian"),
        }
    }
}

/// Cartesian coordinate triple
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Named physical group
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PhysicalName {
    /// Dimension of the group (0 to 3)
    pub dimension: i32,
    /// Group tag, unique within a dimension
    pub tag: i32,
    pub name: String,
}

/// Zero-dimensional geometric entity
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PointEntity {
    pub tag: i32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub physical_tags: Vec<i32>,
}

/// Curve, surface or volume entity
///
/// The three kinds share one layout and are stored in separate collections
/// of the [`Document`](crate::Document).
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MultiDimEntity {
    pub tag: i32,
    /// Bounding box minimum corner
    pub min: Point,
    /// Bounding box maximum corner
    pub max: Point,
    pub physical_tags: Vec<i32>,
    /// Tags of the bounding entities; a negative sign marks reversed orientation
    pub bounding_tags: Vec<i32>,
}

/// Nodes of one entity block
///
/// `coordinates[i]` belongs to `tags[i]`. When `parametric` is set,
/// `parametric_coordinates[i]` holds `min(dimension, 3)` values for the same
/// node.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct NodeBlock {
    pub dimension: i32,
    pub entity_tag: i32,
    pub parametric: bool,
    pub tags: Vec<u64>,
    pub coordinates: Vec<Point>,
    pub parametric_coordinates: Option<Vec<Vec<f64>>>,
}

impl NodeBlock {
    /// Number of nodes in the block
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate over `(tag, coordinate)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Point)> + '_ {
        self.tags.iter().copied().zip(self.coordinates.iter())
    }
}

/// Single element and its connectivity
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Element {
    pub tag: u64,
    /// Exactly `element_type.arity()` node tags
    pub node_tags: Vec<u64>,
}

/// Elements of one entity block, all of the same type
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ElementBlock {
    pub dimension: i32,
    /// Tag of the owning entity
    pub tag: i32,
    pub element_type: ElementType,
    /// Physical group tag carried by legacy (2.x) files; `None` for 4.x
    pub physical_tag: Option<i32>,
    pub elements: Vec<Element>,
}

impl ElementBlock {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_flag() {
        assert_eq!(FileType::from_flag(0), Some(FileType::Ascii));
        assert_eq!(FileType::from_flag(1), Some(FileType::Binary));
        assert_eq!(FileType::from_flag(2), None);
    }

    #[test]
    fn test_node_block_iter() {
        let block = NodeBlock {
            dimension: 1,
            entity_tag: 1,
            parametric: false,
            tags: vec![3, 4],
            coordinates: vec![Point::new(0.5, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)],
            parametric_coordinates: None,
        };
        let pairs: Vec<_> = block.iter().map(|(t, p)| (t, p.x)).collect();
        assert_eq!(pairs, vec![(3, 0.5), (4, 1.0)]);
        assert_eq!(block.len(), 2);
    }
}
