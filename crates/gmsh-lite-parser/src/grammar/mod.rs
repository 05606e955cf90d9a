// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Version-specific section grammars
//!
//! Both MSH generations share the section skeleton but lay out the
//! `$Entities`, `$Nodes` and `$Elements` bodies differently. One strategy
//! per generation implements [`SectionGrammar`]; the dispatcher selects it
//! once, right after `$MeshFormat`.

mod current;
mod legacy;

pub use current::CurrentGrammar;
pub use legacy::LegacyGrammar;

use crate::format::Generation;
use crate::reader::SectionReader;
use gmsh_lite_model::{DocumentBuilder, ParseError, PhysicalName, Result};
use log::warn;
use rustc_hash::FxHashSet;

/// Options that influence how section bodies are validated
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// Treat header totals that disagree with block contents as errors
    pub strict_totals: bool,
}

/// Grammar for the modeled sections of one MSH generation
///
/// Each method is entered right after the opening marker and must consume
/// the section body including its `$End` marker.
pub trait SectionGrammar: Send + Sync {
    /// `$PhysicalNames`, textual in every generation and encoding
    fn physical_names(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        _options: &ParseOptions,
    ) -> Result<()> {
        read_physical_names(reader, doc)
    }

    fn entities(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        options: &ParseOptions,
    ) -> Result<()>;

    fn nodes(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        options: &ParseOptions,
    ) -> Result<()>;

    fn elements(
        &self,
        reader: &mut SectionReader<'_>,
        doc: &mut DocumentBuilder,
        options: &ParseOptions,
    ) -> Result<()>;
}

static LEGACY: LegacyGrammar = LegacyGrammar;
static CURRENT: CurrentGrammar = CurrentGrammar;

/// Strategy for a detected generation
pub fn select(generation: Generation) -> &'static dyn SectionGrammar {
    match generation {
        Generation::Legacy => &LEGACY,
        Generation::Current => &CURRENT,
    }
}

fn read_physical_names(reader: &mut SectionReader<'_>, doc: &mut DocumentBuilder) -> Result<()> {
    let count = reader.text_size()?;

    let mut seen: FxHashSet<(i32, i32)> = doc
        .physical_names()
        .iter()
        .map(|pn| (pn.dimension, pn.tag))
        .collect();

    for _ in 0..count {
        let dimension = reader.text_i32()?;
        let tag = reader.text_i32()?;
        let name = reader.text_string()?;
        if !seen.insert((dimension, tag)) {
            warn!("physical name '{name}' reuses tag {tag} in dimension {dimension}");
        }
        doc.push_physical_name(PhysicalName {
            dimension,
            tag,
            name,
        });
    }

    reader.end_section("PhysicalNames")
}

/// Compare a header total with what the blocks actually held
fn check_total(section: &str, declared: u64, actual: u64, options: &ParseOptions) -> Result<()> {
    if declared == actual {
        return Ok(());
    }
    if options.strict_totals {
        return Err(ParseError::CountMismatch {
            section: section.to_string(),
            declared,
            actual,
        });
    }
    warn!("{section}: header declares {declared} entries, blocks contain {actual}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmsh_lite_model::ErrorKind;

    #[test]
    fn test_physical_names() {
        let mut reader =
            SectionReader::new(b"3\n0 2 \"left\"\n0 3 \"right\"\n1 1 \"block\"\n$EndPhysicalNames\n");
        let mut doc = DocumentBuilder::new();
        read_physical_names(&mut reader, &mut doc).unwrap();
        let doc = doc.build();
        assert_eq!(doc.physical_names().len(), 3);
        assert_eq!(doc.physical_name(1, 1), Some("block"));
    }

    #[test]
    fn test_physical_names_wrong_kind() {
        let mut reader = SectionReader::new(b"1\n1 1 block\n$EndPhysicalNames\n");
        let mut doc = DocumentBuilder::new();
        let err = read_physical_names(&mut reader, &mut doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_check_total() {
        let lenient = ParseOptions::default();
        assert!(check_total("Nodes", 5, 4, &lenient).is_ok());

        let strict = ParseOptions {
            strict_totals: true,
        };
        assert!(check_total("Nodes", 5, 5, &strict).is_ok());
        let err = check_total("Nodes", 5, 4, &strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
