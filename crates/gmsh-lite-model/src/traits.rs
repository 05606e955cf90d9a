// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for MSH parsing

use crate::{Document, Result};

/// Main parsing interface - entry point for parsing MSH content
///
/// Implementations consume the complete file content and either return the
/// fully built [`Document`] or the first error encountered. There is no
/// partial result.
///
/// # Example
///
/// ```ignore
/// use gmsh_lite_model::MeshParser;
///
/// let parser: Box<dyn MeshParser> = get_parser();
/// let doc = parser.parse(&bytes)?;
/// println!("Version: {}", doc.version());
/// ```
pub trait MeshParser: Send + Sync {
    /// Parse raw MSH content, ASCII or binary
    fn parse(&self, content: &[u8]) -> Result<Document>;
}
