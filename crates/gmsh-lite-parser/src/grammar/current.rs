// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MSH 4.1 grammar
//!
//! Bodies of `$Entities`, `$Nodes` and `$Elements` are fully binary in
//! binary files (`int` = 4 bytes, `size_t` = 8 bytes, `double` = 8 bytes)
//! and whitespace separated text otherwise. The field order is the same.

use super::{check_total, ParseOptions, SectionGrammar};
use crate::reader::SectionReader;
use gmsh_lite_model::{
    DocumentBuilder, Element, ElementBlock, ElementType, MultiDimEntity, NodeBlock, Point,
    PointEntity, Result,
};
use log::debug;

/// Grammar for MSH 4.1 files
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentGrammar;

impl SectionGrammar for CurrentGrammar {
    fn entities(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        _options: &ParseOptions,
    ) -> Result<()> {
        reader.begin_binary();

        let num_points = reader.size()?;
        let num_curves = reader.size()?;
        let num_surfaces = reader.size()?;
        let num_volumes = reader.size()?;
        debug!(
            "entities: {num_points} points, {num_curves} curves, {num_surfaces} surfaces, {num_volumes} volumes"
        );

        for _ in 0..num_points {
            let tag = reader.int()?;
            let x = reader.float()?;
            let y = reader.float()?;
            let z = reader.float()?;
            let physical_tags = reader.int_array()?;
            doc.push_point_entity(PointEntity {
                tag,
                x,
                y,
                z,
                physical_tags,
            });
        }
        for _ in 0..num_curves {
            doc.push_curve_entity(read_multi_dim_entity(reader)?);
        }
        for _ in 0..num_surfaces {
            doc.push_surface_entity(read_multi_dim_entity(reader)?);
        }
        for _ in 0..num_volumes {
            doc.push_volume_entity(read_multi_dim_entity(reader)?);
        }

        reader.end_section("Entities")
    }

    fn nodes(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        options: &ParseOptions,
    ) -> Result<()> {
        reader.begin_binary();

        let num_blocks = reader.size()?;
        let num_nodes = reader.size()?;
        let min_tag = reader.size()?;
        let max_tag = reader.size()?;
        debug!("nodes: {num_blocks} blocks, {num_nodes} nodes, tags {min_tag}..={max_tag}");

        let mut total = 0u64;
        for _ in 0..num_blocks {
            let dimension = reader.int()?;
            let entity_tag = reader.int()?;
            let parametric = reader.int()? != 0;
            let tags = reader.array(SectionReader::size)?;

            let mut coordinates = Vec::with_capacity(tags.len());
            let mut parametric_coordinates = parametric.then(|| Vec::with_capacity(tags.len()));
            for _ in 0..tags.len() {
                coordinates.push(read_point(reader)?);
                if let Some(params) = parametric_coordinates.as_mut() {
                    let count = parametric_coordinate_count(dimension);
                    let mut values = Vec::with_capacity(count);
                    for _ in 0..count {
                        values.push(reader.float()?);
                    }
                    params.push(values);
                }
            }

            total += tags.len() as u64;
            doc.push_node_block(NodeBlock {
                dimension,
                entity_tag,
                parametric,
                tags,
                coordinates,
                parametric_coordinates,
            });
        }

        check_total("Nodes", num_nodes, total, options)?;
        reader.end_section("Nodes")
    }

    fn elements(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        options: &ParseOptions,
    ) -> Result<()> {
        reader.begin_binary();

        let num_blocks = reader.size()?;
        let num_elements = reader.size()?;
        let min_tag = reader.size()?;
        let max_tag = reader.size()?;
        debug!(
            "elements: {num_blocks} blocks, {num_elements} elements, tags {min_tag}..={max_tag}"
        );

        let mut total = 0u64;
        for _ in 0..num_blocks {
            let dimension = reader.int()?;
            let tag = reader.int()?;
            let element_type = ElementType::from_code(reader.int()?)?;
            let count = reader.size()?;
            let arity = element_type.arity();

            let mut elements = Vec::with_capacity(reader.capacity_hint(count));
            for _ in 0..count {
                let tag = reader.size()?;
                let mut node_tags = Vec::with_capacity(arity);
                for _ in 0..arity {
                    node_tags.push(reader.size()?);
                }
                elements.push(Element { tag, node_tags });
            }

            total += count;
            doc.push_element_block(ElementBlock {
                dimension,
                tag,
                element_type,
                physical_tag: None,
                elements,
            });
        }

        check_total("Elements", num_elements, total, options)?;
        reader.end_section("Elements")
    }
}

fn read_point(reader: &mut SectionReader<'_>) -> Result<Point> {
    let x = reader.float()?;
    let y = reader.float()?;
    let z = reader.float()?;
    Ok(Point::new(x, y, z))
}

fn read_multi_dim_entity(reader: &mut SectionReader<'_>) -> Result<MultiDimEntity> {
    let tag = reader.int()?;
    let min = read_point(reader)?;
    let max = read_point(reader)?;
    let physical_tags = reader.int_array()?;
    let bounding_tags = reader.int_array()?;
    Ok(MultiDimEntity {
        tag,
        min,
        max,
        physical_tags,
        bounding_tags,
    })
}

/// u for curves, u v for surfaces, u v w for volumes
fn parametric_coordinate_count(dimension: i32) -> usize {
    usize::from(dimension >= 1) + usize::from(dimension >= 2) + usize::from(dimension == 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Encoding;
    use gmsh_lite_model::{ByteOrder, ErrorKind, ParseError};

    fn run(
        input: &[u8],
        section: fn(
            &CurrentGrammar,
            &mut SectionReader<'_>,
            &mut DocumentBuilder,
            &ParseOptions,
        ) -> Result<()>,
    ) -> Result<gmsh_lite_model::Document> {
        let mut reader = SectionReader::new(input);
        let mut doc = DocumentBuilder::new();
        section(&CurrentGrammar, &mut reader, &mut doc, &ParseOptions::default())?;
        Ok(doc.build())
    }

    #[test]
    fn test_entities() {
        let input = b"1 1 1 0
1 0 0 0 1 2
1 0 0 0 1 0 0 1 203 2 1 -2
1 0 0 0 1 1 0 1 100 4 1 2 3 4
$EndEntities
";
        let doc = run(input, CurrentGrammar::entities).unwrap();
        assert_eq!(doc.point_entities()[0].physical_tags, vec![2]);
        let curve = &doc.curve_entities()[0];
        assert_eq!(curve.max, Point::new(1.0, 0.0, 0.0));
        assert_eq!(curve.physical_tags, vec![203]);
        assert_eq!(curve.bounding_tags, vec![1, -2]);
        assert_eq!(doc.surface_entities()[0].bounding_tags, vec![1, 2, 3, 4]);
        assert!(doc.volume_entities().is_empty());
    }

    #[test]
    fn test_parametric_nodes() {
        let input = b"2 3 1 3
0 1 0 1
1
0 0 0
1 2 1 2
2
3
0.25 0 0 0.25
0.75 0 0 0.75
$EndNodes
";
        let doc = run(input, CurrentGrammar::nodes).unwrap();
        let nodes = doc.nodes();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].parametric_coordinates, None);
        assert_eq!(nodes[1].tags, vec![2, 3]);
        assert_eq!(nodes[1].coordinates[1], Point::new(0.75, 0.0, 0.0));
        assert_eq!(
            nodes[1].parametric_coordinates,
            Some(vec![vec![0.25], vec![0.75]])
        );
    }

    #[test]
    fn test_parametric_counts() {
        assert_eq!(parametric_coordinate_count(0), 0);
        assert_eq!(parametric_coordinate_count(1), 1);
        assert_eq!(parametric_coordinate_count(2), 2);
        assert_eq!(parametric_coordinate_count(3), 3);
    }

    #[test]
    fn test_elements_use_arity() {
        let input = b"1 2 1 2
2 1 2 2
1 1 2 3
2 1 3 4
$EndElements
";
        let doc = run(input, CurrentGrammar::elements).unwrap();
        let block = &doc.element_blocks()[0];
        assert_eq!(block.element_type, ElementType::Tri3);
        assert_eq!(block.elements[1].node_tags, vec![1, 3, 4]);
    }

    #[test]
    fn test_unknown_element_type() {
        let input = b"1 1 1 1\n2 1 99 1\n1 1 2 3\n$EndElements\n";
        let err = run(input, CurrentGrammar::elements).unwrap_err();
        assert!(matches!(err, ParseError::UnknownElementType(99)));
    }

    #[test]
    fn test_elements_short_block_hits_end_marker() {
        let input = b"1 1 1 1\n2 1 2 1\n1 1 2\n$EndElements\n";
        let err = run(input, CurrentGrammar::elements).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_binary_nodes() {
        let mut input = b"\n".to_vec();
        for header in [1u64, 2, 1, 2] {
            input.extend_from_slice(&header.to_le_bytes());
        }
        for field in [2i32, 1, 0] {
            input.extend_from_slice(&field.to_le_bytes());
        }
        input.extend_from_slice(&2u64.to_le_bytes());
        input.extend_from_slice(&1u64.to_le_bytes());
        input.extend_from_slice(&2u64.to_le_bytes());
        for coord in [0.0f64, 0.0, 0.0, 1.0, 0.5, 0.0] {
            input.extend_from_slice(&coord.to_le_bytes());
        }
        input.extend_from_slice(b"\n$EndNodes\n");

        let mut reader = SectionReader::new(&input);
        reader.set_encoding(Encoding::Binary(ByteOrder::Little));
        let mut doc = DocumentBuilder::new();
        CurrentGrammar
            .nodes(&mut reader, &mut doc, &ParseOptions::default())
            .unwrap();
        let doc = doc.build();
        assert_eq!(doc.nodes()[0].dimension, 2);
        assert_eq!(doc.nodes()[0].tags, vec![1, 2]);
        assert_eq!(doc.nodes()[0].coordinates[1], Point::new(1.0, 0.5, 0.0));
    }
}
