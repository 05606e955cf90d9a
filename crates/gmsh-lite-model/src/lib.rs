// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! gmsh-lite Model - Shared types and traits for MSH mesh parsing
//!
//! This crate holds the strongly typed representation of an MSH mesh file
//! and the pieces of the format that are pure data: the element type table,
//! the error taxonomy and the parser trait. It performs no I/O.
//!
//! # Architecture
//!
//! - [`Document`] - The parsed result: physical names, entities, node and
//!   element blocks
//! - [`ElementType`] - Closed set of element codes with [`arity`] and
//!   [`topological_dimension`]
//! - [`ParseError`] / [`ErrorKind`] - Every failure a parse can report
//! - [`MeshParser`] - Entry point implemented by parser backends
//!
//! # Example
//!
//! ```ignore
//! use gmsh_lite_model::{MeshParser, ElementType};
//!
//! let doc = parser.parse(&bytes)?;
//! for block in doc.element_blocks() {
//!     assert!(block.elements.iter().all(|e| e.node_tags.len() == block.element_type.arity()));
//! }
//! ```

pub mod document;
pub mod element;
pub mod error;
pub mod traits;
pub mod types;

// Re-export all public types
pub use document::*;
pub use element::*;
pub use error::*;
pub use traits::*;
pub use types::*;
