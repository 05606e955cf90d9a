// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field-level reads shared by all section grammars
//!
//! [`SectionReader`] wraps the [`Tokenizer`] and remembers how the mesh body
//! is encoded. Grammars ask for an `int`, `size` or `float` and the reader
//! either coerces the next token or decodes a blob, depending on that
//! encoding. The `text_*` and `blob_*` variants bypass the encoding for
//! fields the format always writes one way.

use crate::tokenizer::{TokenKind, Tokenizer};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use gmsh_lite_model::{ByteOrder, ParseError, Result};

const INT_SIZE: usize = 4;
const SIZE_T_SIZE: usize = 8;
const DOUBLE_SIZE: usize = 8;

/// How the numeric payload of modeled sections is stored
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Encoding {
    #[default]
    Ascii,
    Binary(ByteOrder),
}

/// Token and blob reads with the body encoding as state
pub struct SectionReader<'a> {
    tokens: Tokenizer<'a>,
    encoding: Encoding,
}

impl<'a> SectionReader<'a> {
    /// Create a reader over MSH content; ASCII until told otherwise
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            tokens: Tokenizer::new(input),
            encoding: Encoding::Ascii,
        }
    }

    pub fn tokens(&mut self) -> &mut Tokenizer<'a> {
        &mut self.tokens
    }

    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.encoding, Encoding::Binary(_))
    }

    // ========================================================================
    // Textual fields
    // ========================================================================

    pub fn text_int(&mut self) -> Result<i64> {
        self.tokens.read()?.as_int()
    }

    pub fn text_i32(&mut self) -> Result<i32> {
        let token = self.tokens.read()?;
        let value = token.as_int()?;
        i32::try_from(value).map_err(|_| token.mismatch("32-bit integer"))
    }

    /// Non-negative count or tag
    pub fn text_size(&mut self) -> Result<u64> {
        let token = self.tokens.read()?;
        let value = token.as_int()?;
        u64::try_from(value).map_err(|_| token.mismatch("non-negative integer"))
    }

    pub fn text_float(&mut self) -> Result<f64> {
        self.tokens.read()?.as_float()
    }

    pub fn text_string(&mut self) -> Result<String> {
        self.tokens.read()?.as_string().map(str::to_string)
    }

    // ========================================================================
    // Binary fields
    // ========================================================================

    /// Skip the line break that separates text from a following binary
    /// payload. No-op for ASCII bodies.
    pub fn begin_binary(&mut self) {
        if self.is_binary() {
            self.tokens.skip_line_break();
        }
    }

    fn byte_order(&self) -> ByteOrder {
        match self.encoding {
            Encoding::Binary(order) => order,
            Encoding::Ascii => ByteOrder::native(),
        }
    }

    pub fn blob_i32(&mut self) -> Result<i32> {
        let order = self.byte_order();
        let mut bytes = self.tokens.read_raw_bytes(INT_SIZE)?;
        let value = match order {
            ByteOrder::Little => bytes.read_i32::<LittleEndian>()?,
            ByteOrder::Big => bytes.read_i32::<BigEndian>()?,
        };
        Ok(value)
    }

    pub fn blob_u64(&mut self) -> Result<u64> {
        let order = self.byte_order();
        let mut bytes = self.tokens.read_raw_bytes(SIZE_T_SIZE)?;
        let value = match order {
            ByteOrder::Little => bytes.read_u64::<LittleEndian>()?,
            ByteOrder::Big => bytes.read_u64::<BigEndian>()?,
        };
        Ok(value)
    }

    pub fn blob_f64(&mut self) -> Result<f64> {
        let order = self.byte_order();
        let mut bytes = self.tokens.read_raw_bytes(DOUBLE_SIZE)?;
        let value = match order {
            ByteOrder::Little => bytes.read_f64::<LittleEndian>()?,
            ByteOrder::Big => bytes.read_f64::<BigEndian>()?,
        };
        Ok(value)
    }

    /// 32-bit blob that must be a valid tag or count
    pub fn blob_tag(&mut self) -> Result<u64> {
        let line = self.tokens.line();
        let value = self.blob_i32()?;
        u64::try_from(value).map_err(|_| ParseError::TypeMismatch {
            line,
            expected: "non-negative integer",
            found: "negative binary value",
            text: value.to_string(),
        })
    }

    // ========================================================================
    // Encoding-aware fields
    // ========================================================================

    /// C `int`
    pub fn int(&mut self) -> Result<i32> {
        match self.encoding {
            Encoding::Ascii => self.text_i32(),
            Encoding::Binary(_) => self.blob_i32(),
        }
    }

    /// C `size_t`
    pub fn size(&mut self) -> Result<u64> {
        match self.encoding {
            Encoding::Ascii => self.text_size(),
            Encoding::Binary(_) => self.blob_u64(),
        }
    }

    /// C `double`
    pub fn float(&mut self) -> Result<f64> {
        match self.encoding {
            Encoding::Ascii => self.text_float(),
            Encoding::Binary(_) => self.blob_f64(),
        }
    }

    /// Count-prefixed array; the count is a `size`, items come from `item`
    pub fn array<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let count = self.size()?;
        let mut items = Vec::with_capacity(self.capacity_hint(count));
        for _ in 0..count {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Count-prefixed array of `int`s
    pub fn int_array(&mut self) -> Result<Vec<i32>> {
        self.array(Self::int)
    }

    /// Clamp a declared count so corrupt headers cannot force huge allocations
    pub fn capacity_hint(&self, declared: u64) -> usize {
        usize::try_from(declared)
            .unwrap_or(usize::MAX)
            .min(self.tokens_remaining())
    }

    fn tokens_remaining(&self) -> usize {
        self.tokens.remaining()
    }

    // ========================================================================
    // Section framing
    // ========================================================================

    /// Consume `$End<section>` or fail naming the expected marker
    pub fn end_section(&mut self, section: &str) -> Result<()> {
        let token = self.tokens.read()?;
        let expected = format!("$End{section}");
        if token.kind == TokenKind::SectionMarker && token.text == expected {
            Ok(())
        } else {
            Err(ParseError::MissingEndMarker {
                expected,
                line: token.line,
            })
        }
    }

    /// Pass over a section body without validating it, consuming the next
    /// section marker
    pub fn skip_section(&mut self, section: &str) -> Result<()> {
        self.tokens.skip_to_section_marker();
        let token = self.tokens.read()?;
        if token.kind == TokenKind::SectionMarker {
            Ok(())
        } else {
            Err(ParseError::eof(format!("{section} section")))
        }
    }
}
