// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MSH 2.x grammar
//!
//! 2.x files have flat node and element lists. Counts are always textual;
//! in binary files the records after the count are blobs of 4-byte `int`s
//! and 8-byte `double`s.

use super::{ParseOptions, SectionGrammar};
use crate::reader::SectionReader;
use gmsh_lite_model::{
    DocumentBuilder, Element, ElementBlock, ElementType, NodeBlock, ParseError, Point, Result,
};
use log::{debug, trace};

/// Grammar for MSH 2.x files
#[derive(Clone, Copy, Debug, Default)]
pub struct LegacyGrammar;

impl SectionGrammar for LegacyGrammar {
    /// 2.x has no entities; some writers still emit the section
    fn entities(
        &self,
        reader: &mut SectionReader<'_>,
        _doc: &mut DocumentBuilder,
        _options: &ParseOptions,
    ) -> Result<()> {
        trace!("skipping $Entities in a 2.x file");
        reader.skip_section("Entities")
    }

    fn nodes(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        _options: &ParseOptions,
    ) -> Result<()> {
        let count = reader.text_size()?;
        debug!("nodes: {count} nodes");
        reader.begin_binary();

        let capacity = reader.capacity_hint(count);
        let mut tags = Vec::with_capacity(capacity);
        let mut coordinates = Vec::with_capacity(capacity);
        for _ in 0..count {
            let tag = if reader.is_binary() {
                reader.blob_tag()?
            } else {
                reader.text_size()?
            };
            let x = reader.float()?;
            let y = reader.float()?;
            let z = reader.float()?;
            tags.push(tag);
            coordinates.push(Point::new(x, y, z));
        }

        if !tags.is_empty() {
            doc.push_node_block(NodeBlock {
                dimension: 3,
                entity_tag: 0,
                parametric: false,
                tags,
                coordinates,
                parametric_coordinates: None,
            });
        }

        reader.end_section("Nodes")
    }

    fn elements(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        _options: &ParseOptions,
    ) -> Result<()> {
        let count = reader.text_size()?;
        debug!("elements: {count} elements");
        reader.begin_binary();

        let mut blocks = BlockGrouper::default();
        if reader.is_binary() {
            read_binary_elements(reader, count, &mut blocks)?;
        } else {
            for _ in 0..count {
                let tag = reader.text_size()?;
                let element_type = ElementType::from_code(reader.text_i32()?)?;
                let num_tags = reader.text_size()?;
                let mut tags = Vec::with_capacity(reader.capacity_hint(num_tags));
                for _ in 0..num_tags {
                    tags.push(reader.text_i32()?);
                }
                let mut node_tags = Vec::with_capacity(element_type.arity());
                for _ in 0..element_type.arity() {
                    node_tags.push(reader.text_size()?);
                }
                blocks.push(element_type, &tags, Element { tag, node_tags });
            }
        }

        for block in blocks.finish() {
            doc.push_element_block(block);
        }
        reader.end_section("Elements")
    }
}

/// Binary 2.x elements come in runs of one type:
/// `int type, int nFollow, int nTags` then `nFollow` records.
fn read_binary_elements(
    reader: &mut SectionReader<'_>,
    count: u64,
    blocks: &mut BlockGrouper,
) -> Result<()> {
    let mut total = 0u64;
    while total < count {
        let line = reader.tokens().line();
        let element_type = ElementType::from_code(reader.blob_i32()?)?;
        let follow = reader.blob_i32()?;
        let num_tags = reader.blob_tag()?;
        let follow = u64::try_from(follow)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| ParseError::TypeMismatch {
                line,
                expected: "positive element count",
                found: "binary value",
                text: follow.to_string(),
            })?;

        total += follow;
        if total > count {
            return Err(ParseError::CountMismatch {
                section: "Elements".to_string(),
                declared: count,
                actual: total,
            });
        }

        let arity = element_type.arity();
        for _ in 0..follow {
            let tag = reader.blob_tag()?;
            let mut tags = Vec::with_capacity(reader.capacity_hint(num_tags));
            for _ in 0..num_tags {
                tags.push(reader.blob_i32()?);
            }
            let mut node_tags = Vec::with_capacity(arity);
            for _ in 0..arity {
                node_tags.push(reader.blob_tag()?);
            }
            blocks.push(element_type, &tags, Element { tag, node_tags });
        }
    }
    Ok(())
}

/// Collects consecutive elements sharing type, entity and physical tag
#[derive(Default)]
struct BlockGrouper {
    blocks: Vec<ElementBlock>,
}

impl BlockGrouper {
    /// `tags[0]` is the physical group, `tags[1]` the elementary entity
    fn push(&mut self, element_type: ElementType, tags: &[i32], element: Element) {
        let physical_tag = tags.first().copied();
        let entity_tag = tags.get(1).copied().unwrap_or(0);

        if let Some(last) = self.blocks.last_mut() {
            if last.element_type == element_type
                && last.tag == entity_tag
                && last.physical_tag == physical_tag
            {
                last.elements.push(element);
                return;
            }
        }

        self.blocks.push(ElementBlock {
            dimension: i32::from(element_type.dimension()),
            tag: entity_tag,
            element_type,
            physical_tag,
            elements: vec![element],
        });
    }

    fn finish(self) -> Vec<ElementBlock> {
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Encoding;
    use gmsh_lite_model::{ByteOrder, Document, ErrorKind};

    fn ascii(
        input: &[u8],
        section: fn(
            &LegacyGrammar,
            &mut SectionReader<'_>,
            &mut DocumentBuilder,
            &ParseOptions,
        ) -> Result<()>,
    ) -> Result<Document> {
        let mut reader = SectionReader::new(input);
        let mut doc = DocumentBuilder::new();
        section(&LegacyGrammar, &mut reader, &mut doc, &ParseOptions::default())?;
        Ok(doc.build())
    }

    #[test]
    fn test_nodes() {
        let doc = ascii(
            b"3\n1 0 0 0\n2 1 0 0\n7 1 1 0\n$EndNodes\n",
            LegacyGrammar::nodes,
        )
        .unwrap();
        let block = &doc.nodes()[0];
        assert_eq!(block.dimension, 3);
        assert_eq!(block.entity_tag, 0);
        assert!(!block.parametric);
        assert_eq!(block.tags, vec![1, 2, 7]);
        assert_eq!(block.coordinates[2], Point::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_no_nodes_no_block() {
        let doc = ascii(b"0\n$EndNodes\n", LegacyGrammar::nodes).unwrap();
        assert!(doc.nodes().is_empty());
    }

    #[test]
    fn test_elements_grouped() {
        let input = b"5
1 15 2 1 1 1
2 1 2 5 1 1 2
3 1 2 5 1 2 3
4 1 2 6 2 3 4
5 2 2 0 3 1 2 3
$EndElements
";
        let doc = ascii(input, LegacyGrammar::elements).unwrap();
        let blocks = doc.element_blocks();
        assert_eq!(blocks.len(), 4);

        assert_eq!(blocks[0].element_type, ElementType::Point);
        assert_eq!(blocks[0].dimension, 0);

        assert_eq!(blocks[1].element_type, ElementType::Line2);
        assert_eq!(blocks[1].physical_tag, Some(5));
        assert_eq!(blocks[1].tag, 1);
        assert_eq!(blocks[1].elements.len(), 2);
        assert_eq!(blocks[1].elements[1].node_tags, vec![2, 3]);

        assert_eq!(blocks[2].physical_tag, Some(6));
        assert_eq!(blocks[2].tag, 2);

        assert_eq!(blocks[3].dimension, 2);
        assert_eq!(blocks[3].elements[0].tag, 5);
    }

    #[test]
    fn test_element_without_tags() {
        let doc = ascii(b"1\n1 1 0 1 2\n$EndElements\n", LegacyGrammar::elements).unwrap();
        let block = &doc.element_blocks()[0];
        assert_eq!(block.physical_tag, None);
        assert_eq!(block.tag, 0);
    }

    #[test]
    fn test_entities_skipped() {
        let mut reader = SectionReader::new(b"1 0 0 0\n1 0 0 0 0\n$EndEntities\n$Nodes\n");
        let mut doc = DocumentBuilder::new();
        LegacyGrammar
            .entities(&mut reader, &mut doc, &ParseOptions::default())
            .unwrap();
        assert!(reader.tokens().read().unwrap().is_marker("Nodes"));
    }

    fn binary_body(body: &[u8]) -> Vec<u8> {
        let mut input = b"2\n".to_vec();
        input.extend_from_slice(body);
        input.extend_from_slice(b"\n$EndElements\n");
        input
    }

    fn ints(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_binary_elements() {
        // one header block holding two 2-node lines in physical 3, entity 4
        let body = ints(&[1, 2, 2, 10, 3, 4, 1, 2, 11, 3, 4, 2, 3]);
        let input = binary_body(&body);
        let mut reader = SectionReader::new(&input);
        reader.set_encoding(Encoding::Binary(ByteOrder::Little));
        let mut doc = DocumentBuilder::new();
        LegacyGrammar
            .elements(&mut reader, &mut doc, &ParseOptions::default())
            .unwrap();
        let doc = doc.build();
        let block = &doc.element_blocks()[0];
        assert_eq!(block.physical_tag, Some(3));
        assert_eq!(block.tag, 4);
        assert_eq!(block.elements[1].tag, 11);
        assert_eq!(block.elements[1].node_tags, vec![2, 3]);
    }

    #[test]
    fn test_binary_elements_overrun() {
        let body = ints(&[15, 3, 0, 1, 1, 2, 2, 3, 3]);
        let input = binary_body(&body);
        let mut reader = SectionReader::new(&input);
        reader.set_encoding(Encoding::Binary(ByteOrder::Little));
        let mut doc = DocumentBuilder::new();
        let err = LegacyGrammar
            .elements(&mut reader, &mut doc, &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::CountMismatch { declared: 2, actual: 3, .. }
        ));
    }

    #[test]
    fn test_binary_elements_empty_run() {
        let body = ints(&[15, 0, 0]);
        let input = binary_body(&body);
        let mut reader = SectionReader::new(&input);
        reader.set_encoding(Encoding::Binary(ByteOrder::Little));
        let mut doc = DocumentBuilder::new();
        let err = LegacyGrammar
            .elements(&mut reader, &mut doc, &ParseOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }
}
