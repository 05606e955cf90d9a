// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed MSH document

use crate::{ByteOrder, ElementBlock, FileType, MultiDimEntity, NodeBlock, PhysicalName, PointEntity};
use serde::{Deserialize, Serialize};

/// Fully parsed MSH document
///
/// Built by a parser in a single pass and handed out afterwards as an
/// immutable value. Collections appear in file order.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    pub(crate) version: f64,
    pub(crate) file_type: FileType,
    pub(crate) byte_order: Option<ByteOrder>,
    pub(crate) physical_names: Vec<PhysicalName>,
    pub(crate) point_entities: Vec<PointEntity>,
    pub(crate) curve_entities: Vec<MultiDimEntity>,
    pub(crate) surface_entities: Vec<MultiDimEntity>,
    pub(crate) volume_entities: Vec<MultiDimEntity>,
    pub(crate) nodes: Vec<NodeBlock>,
    pub(crate) element_blocks: Vec<ElementBlock>,
}

impl Document {
    /// File format version, e.g. `4.1`
    pub fn version(&self) -> f64 {
        self.version
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn is_ascii(&self) -> bool {
        self.file_type == FileType::Ascii
    }

    pub fn is_binary(&self) -> bool {
        self.file_type == FileType::Binary
    }

    /// Byte order of binary payloads, `None` for ASCII files
    pub fn byte_order(&self) -> Option<ByteOrder> {
        self.byte_order
    }

    pub fn physical_names(&self) -> &[PhysicalName] {
        &self.physical_names
    }

    /// Find the physical name with the given dimension and tag
    pub fn physical_name(&self, dimension: i32, tag: i32) -> Option<&str> {
        self.physical_names
            .iter()
            .find(|pn| pn.dimension == dimension && pn.tag == tag)
            .map(|pn| pn.name.as_str())
    }

    pub fn point_entities(&self) -> &[PointEntity] {
        &self.point_entities
    }

    pub fn curve_entities(&self) -> &[MultiDimEntity] {
        &self.curve_entities
    }

    pub fn surface_entities(&self) -> &[MultiDimEntity] {
        &self.surface_entities
    }

    pub fn volume_entities(&self) -> &[MultiDimEntity] {
        &self.volume_entities
    }

    /// Node entity blocks
    pub fn nodes(&self) -> &[NodeBlock] {
        &self.nodes
    }

    pub fn element_blocks(&self) -> &[ElementBlock] {
        &self.element_blocks
    }

    /// Total number of nodes over all blocks
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(NodeBlock::len).sum()
    }

    /// Total number of elements over all blocks
    pub fn element_count(&self) -> usize {
        self.element_blocks.iter().map(ElementBlock::len).sum()
    }
}

/// Mutable accumulator used while a parse is in progress
///
/// Parsers append to the builder section by section and call
/// [`DocumentBuilder::build`] once the input is exhausted.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_format(&mut self, version: f64, file_type: FileType, byte_order: Option<ByteOrder>) {
        self.doc.version = version;
        self.doc.file_type = file_type;
        self.doc.byte_order = byte_order;
    }

    pub fn physical_names(&self) -> &[PhysicalName] {
        &self.doc.physical_names
    }

    pub fn push_physical_name(&mut self, name: PhysicalName) {
        self.doc.physical_names.push(name);
    }

    pub fn push_point_entity(&mut self, entity: PointEntity) {
        self.doc.point_entities.push(entity);
    }

    pub fn push_curve_entity(&mut self, entity: MultiDimEntity) {
        self.doc.curve_entities.push(entity);
    }

    pub fn push_surface_entity(&mut self, entity: MultiDimEntity) {
        self.doc.surface_entities.push(entity);
    }

    pub fn push_volume_entity(&mut self, entity: MultiDimEntity) {
        self.doc.volume_entities.push(entity);
    }

    pub fn push_node_block(&mut self, block: NodeBlock) {
        self.doc.nodes.push(block);
    }

    pub fn push_element_block(&mut self, block: ElementBlock) {
        self.doc.element_blocks.push(block);
    }

    /// Finish the parse and hand out the document
    pub fn build(self) -> Document {
        self.doc
    }
}
