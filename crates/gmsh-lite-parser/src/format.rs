// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `$MeshFormat` section and schema generation detection

use crate::reader::{Encoding, SectionReader};
use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use gmsh_lite_model::{ByteOrder, FileType, ParseError, Result};
use log::{debug, warn};

/// Incompatible generations of the MSH grammar
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Generation {
    /// MSH 2.x: flat node and element lists, no entities
    Legacy,
    /// MSH 4.1 and later 4.x: entity blocks
    Current,
}

impl Generation {
    /// Pick the grammar for a declared version
    ///
    /// 4.0 uses a different block layout than 4.1 and is not supported.
    pub fn detect(version: f64, text: &str) -> Result<Self> {
        if (2.0..3.0).contains(&version) {
            Ok(Generation::Legacy)
        } else if (4.1..5.0).contains(&version) {
            Ok(Generation::Current)
        } else {
            Err(ParseError::UnsupportedVersion(text.to_string()))
        }
    }
}

/// Decoded `$MeshFormat` header
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MeshFormat {
    pub version: f64,
    pub generation: Generation,
    pub file_type: FileType,
    pub byte_order: Option<ByteOrder>,
}

impl MeshFormat {
    /// Encoding the rest of the file uses
    pub fn encoding(&self) -> Encoding {
        match self.byte_order {
            Some(order) => Encoding::Binary(order),
            None => Encoding::Ascii,
        }
    }
}

/// Parse the body of `$MeshFormat` up to and including `$EndMeshFormat`
pub fn parse_mesh_format(reader: &mut SectionReader<'_>) -> Result<MeshFormat> {
    let version_token = reader.tokens().read()?;
    let version = version_token.as_float()?;
    let generation = Generation::detect(version, version_token.text)?;

    let flag = reader.text_int()?;
    let file_type = FileType::from_flag(flag).ok_or(ParseError::InvalidFileType(flag))?;

    let data_size = reader.text_int()?;
    let expected = std::mem::size_of::<f64>();
    if data_size != expected as i64 {
        return Err(ParseError::UnsupportedDataSize {
            found: data_size,
            expected,
        });
    }

    let byte_order = match file_type {
        FileType::Ascii => None,
        FileType::Binary => {
            reader.tokens().skip_line_break();
            let marker = reader.tokens().read_raw_bytes(4)?;
            Some(detect_byte_order(marker)?)
        }
    };

    reader.end_section("MeshFormat")?;

    debug!(
        "MSH {} ({:?}, {:?}), {:?} grammar",
        version_token.text, file_type, byte_order, generation
    );

    Ok(MeshFormat {
        version,
        generation,
        file_type,
        byte_order,
    })
}

/// The marker is the integer 1 written in the writer's native order
fn detect_byte_order(marker: &[u8]) -> Result<ByteOrder> {
    let order = if LittleEndian::read_u32(marker) == 1 {
        ByteOrder::Little
    } else if BigEndian::read_u32(marker) == 1 {
        ByteOrder::Big
    } else {
        return Err(ParseError::UnknownByteOrder(LittleEndian::read_u32(marker)));
    };

    if order != ByteOrder::native() {
        warn!(
            "binary payload is {}, host is {}; swapping bytes",
            order,
            ByteOrder::native()
        );
    }
    Ok(order)
}
