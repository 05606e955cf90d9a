// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MSH files on disk

use crate::MshParser;
use gmsh_lite_model::{Document, MeshParser, ParseError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// An MSH file read into memory, ready to parse
///
/// The file handle only lives inside [`MshFile::open`].
#[derive(Debug, Clone)]
pub struct MshFile {
    path: PathBuf,
    content: Vec<u8>,
}

impl MshFile {
    /// Read the whole file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = {
            let mut file = File::open(&path).map_err(|source| ParseError::Open {
                path: path.clone(),
                source,
            })?;
            let mut content = Vec::new();
            file.read_to_end(&mut content)
                .map_err(|e| ParseError::Io(e).in_file(&path))?;
            content
        };
        Ok(Self { path, content })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Parse with default options
    pub fn parse(&self) -> Result<Document> {
        self.parse_with(&MshParser::new())
    }

    /// Parse with a configured parser; errors carry the file path
    pub fn parse_with(&self, parser: &MshParser) -> Result<Document> {
        parser
            .parse(&self.content)
            .map_err(|e| e.in_file(&self.path))
    }
}
