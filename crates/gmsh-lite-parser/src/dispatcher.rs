// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section dispatcher
//!
//! Reads section markers one after another and hands each body to the
//! parser for that section. Every section parser consumes its own `$End`
//! marker, so between sections the next token must be an opening marker
//! or the end of the stream.

use crate::format::parse_mesh_format;
use crate::grammar::{self, ParseOptions, SectionGrammar};
use crate::reader::SectionReader;
use crate::tokenizer::TokenKind;
use gmsh_lite_model::{Document, DocumentBuilder, ParseError, Result};
use log::{debug, trace};

/// Sections the parser understands
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Section {
    MeshFormat,
    PhysicalNames,
    Entities,
    Nodes,
    Elements,
    /// Known to the format but not modeled
    Unmodeled,
    Unknown,
}

impl Section {
    fn from_marker(marker: &str) -> Self {
        match marker.strip_prefix('$').unwrap_or(marker) {
            "MeshFormat" => Section::MeshFormat,
            "PhysicalNames" => Section::PhysicalNames,
            "Entities" => Section::Entities,
            "Nodes" => Section::Nodes,
            "Elements" => Section::Elements,
            "PartitionedEntities" | "Periodic" | "GhostElements" | "Parametrizations"
            | "NodeData" | "ElementData" | "ElementNodeData" | "InterpolationScheme" => {
                Section::Unmodeled
            }
            _ => Section::Unknown,
        }
    }
}

/// Single-pass state machine over one MSH buffer
pub struct Dispatcher<'a> {
    reader: SectionReader<'a>,
    doc: DocumentBuilder,
    grammar: Option<&'static dyn SectionGrammar>,
    options: ParseOptions,
    sections: usize,
}

impl<'a> Dispatcher<'a> {
    pub fn new(content: &'a [u8], options: ParseOptions) -> Self {
        Self {
            reader: SectionReader::new(content),
            doc: DocumentBuilder::new(),
            grammar: None,
            options,
            sections: 0,
        }
    }

    /// Parse every section and hand back the finished document
    pub fn run(mut self) -> Result<Document> {
        loop {
            let token = self.reader.tokens().read()?;
            match token.kind {
                TokenKind::EndOfStream => break,
                TokenKind::SectionMarker => {
                    self.sections += 1;
                    self.section(token.text)?;
                }
                _ => return Err(ParseError::MissingSectionStart { line: token.line }),
            }
        }

        if self.sections == 0 {
            return Err(ParseError::MissingSectionStart {
                line: self.reader.tokens().line(),
            });
        }
        if self.grammar.is_none() {
            return Err(ParseError::MissingMeshFormat {
                found: "end of file".to_string(),
            });
        }
        Ok(self.doc.build())
    }

    fn section(&mut self, marker: &str) -> Result<()> {
        let section = Section::from_marker(marker);
        debug!("section {marker}");

        let grammar = match (section, self.grammar) {
            (Section::MeshFormat, _) => return self.mesh_format(),
            (Section::Unmodeled | Section::Unknown, _) => {
                trace!("skipping {marker}");
                return self.reader.skip_section(marker);
            }
            (_, Some(grammar)) => grammar,
            (_, None) => {
                return Err(ParseError::MissingMeshFormat {
                    found: marker.to_string(),
                })
            }
        };

        let reader = &mut self.reader;
        let doc = &mut self.doc;
        let options = &self.options;
        match section {
            Section::PhysicalNames => grammar.physical_names(reader, doc, options),
            Section::Entities => grammar.entities(reader, doc, options),
            Section::Nodes => grammar.nodes(reader, doc, options),
            Section::Elements => grammar.elements(reader, doc, options),
            Section::MeshFormat | Section::Unmodeled | Section::Unknown => Ok(()),
        }
    }

    fn mesh_format(&mut self) -> Result<()> {
        let format = parse_mesh_format(&mut self.reader)?;
        self.reader.set_encoding(format.encoding());
        self.doc
            .set_format(format.version, format.file_type, format.byte_order);
        self.grammar = Some(grammar::select(format.generation));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmsh_lite_model::ErrorKind;

    fn parse(input: &[u8]) -> Result<Document> {
        Dispatcher::new(input, ParseOptions::default()).run()
    }

    #[test]
    fn test_section_names() {
        assert_eq!(Section::from_marker("$Nodes"), Section::Nodes);
        assert_eq!(Section::from_marker("$NodeData"), Section::Unmodeled);
        assert_eq!(Section::from_marker("$Comments"), Section::Unknown);
    }

    #[test]
    fn test_header_only() {
        let doc = parse(b"$MeshFormat\n4.1 0 8\n$EndMeshFormat\n").unwrap();
        assert_eq!(doc.version(), 4.1);
        assert!(doc.is_ascii());
        assert!(doc.nodes().is_empty());
    }

    #[test]
    fn test_empty_input() {
        let err = parse(b"").unwrap_err();
        assert!(matches!(err, ParseError::MissingSectionStart { .. }));
        assert!(err
            .to_string()
            .starts_with("Expected start of section marker not found"));
    }

    #[test]
    fn test_stray_number() {
        let err = parse(b"$MeshFormat\n4.1 0 8\n$EndMeshFormat\n42\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingSectionStart { line: 4 }));
    }

    #[test]
    fn test_modeled_section_before_format() {
        let err = parse(b"$Nodes\n0 0 0 0\n$EndNodes\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(matches!(err, ParseError::MissingMeshFormat { ref found } if found == "$Nodes"));
    }

    #[test]
    fn test_format_never_seen() {
        let err = parse(b"$Comments\nhello\n$EndComments\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingMeshFormat { .. }));
    }

    #[test]
    fn test_skips_unmodeled_sections() {
        let input = b"$Comments\n\"unbalanced\n$EndComments\n$MeshFormat\n4.1 0 8\n$EndMeshFormat\n\
$NodeData\n1\n\"view\"\n1\n0.0\n3\n0\n1\n0\n$EndNodeData\n";
        let doc = parse(input).unwrap();
        assert_eq!(doc.version(), 4.1);
    }

    #[test]
    fn test_unterminated_skip() {
        let err = parse(b"$MeshFormat\n4.1 0 8\n$EndMeshFormat\n$Periodic\n0\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
