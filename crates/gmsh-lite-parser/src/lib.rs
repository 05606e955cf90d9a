// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! gmsh-lite parser - single-pass MSH reader
//!
//! Reads Gmsh MSH 2.x and 4.1 files, ASCII or binary, into the
//! [`Document`] model defined in `gmsh-lite-model`.
//!
//! # Features
//!
//! - **One pass** over an in-memory buffer, no backtracking
//! - **Number recognition** using `nom` combinators and `lexical-core`
//! - **Fast skipping** of unmodeled sections using `memchr`
//! - **Binary payloads** in either byte order using `byteorder`
//!
//! # Example
//!
//! ```ignore
//! use gmsh_lite_parser::MshFile;
//!
//! let doc = MshFile::open("mesh.msh")?.parse()?;
//! for block in doc.element_blocks() {
//!     println!("{} x {}", block.len(), block.element_type);
//! }
//! ```

mod dispatcher;
mod file;
mod format;
mod grammar;
mod reader;
mod tokenizer;

pub use file::MshFile;
pub use grammar::ParseOptions;
pub use tokenizer::{Token, TokenKind, Tokenizer};

pub use gmsh_lite_model::{Document, MeshParser, ParseError, Result};

use dispatcher::Dispatcher;
use std::path::Path;

/// Main MSH parser implementing `MeshParser`
#[derive(Debug, Clone, Copy, Default)]
pub struct MshParser {
    /// Reject files whose Nodes/Elements header totals disagree with the
    /// per-block counts
    pub strict_totals: bool,
}

impl MshParser {
    /// Create a parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether header totals must match the blocks
    pub fn with_strict_totals(mut self, enabled: bool) -> Self {
        self.strict_totals = enabled;
        self
    }

    fn options(&self) -> ParseOptions {
        ParseOptions {
            strict_totals: self.strict_totals,
        }
    }
}

impl MeshParser for MshParser {
    fn parse(&self, content: &[u8]) -> Result<Document> {
        Dispatcher::new(content, self.options()).run()
    }
}

/// Quick parse function for simple use cases
pub fn parse_bytes(content: &[u8]) -> Result<Document> {
    MshParser::new().parse(content)
}

/// Open and parse the file at `path`
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    MshFile::open(path)?.parse()
}
