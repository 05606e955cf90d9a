// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element type codes and their fixed node arity
//!
//! The MSH format identifies element shapes by an integer code. Every code
//! the format defines is listed here; anything else is rejected with
//! [`ParseError::UnknownElementType`].

use crate::{ParseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// MSH element type
///
/// Discriminants are the integer codes used in the file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ElementType {
    // ========================================================================
    // Points and lines
    // ========================================================================
    Point = 15,
    Line2 = 1,
    Line3 = 8,
    Line4 = 26,
    Line5 = 27,
    Line6 = 28,

    // ========================================================================
    // Triangles (complete and incomplete)
    // ========================================================================
    Tri3 = 2,
    Tri6 = 9,
    Tri10 = 21,
    Tri15 = 23,
    Tri21 = 25,
    #[serde(rename = "ITRI9")]
    ITri9 = 20,
    #[serde(rename = "ITRI12")]
    ITri12 = 22,
    #[serde(rename = "ITRI15")]
    ITri15 = 24,

    // ========================================================================
    // Quadrilaterals
    // ========================================================================
    Quad4 = 3,
    Quad8 = 16,
    Quad9 = 10,

    // ========================================================================
    // Tetrahedra
    // ========================================================================
    Tet4 = 4,
    Tet10 = 11,
    Tet20 = 29,
    Tet35 = 30,
    Tet56 = 31,

    // ========================================================================
    // Hexahedra
    // ========================================================================
    Hex8 = 5,
    Hex20 = 17,
    Hex27 = 12,
    Hex64 = 92,
    Hex125 = 93,

    // ========================================================================
    // Prisms and pyramids
    // ========================================================================
    Prism6 = 6,
    Prism15 = 18,
    Prism18 = 13,
    Pyramid5 = 7,
    Pyramid13 = 19,
    Pyramid14 = 14,
}

impl ElementType {
    /// Every element type, in code order
    pub const ALL: [ElementType; 33] = [
        ElementType::Line2,
        ElementType::Tri3,
        ElementType::Quad4,
        ElementType::Tet4,
        ElementType::Hex8,
        ElementType::Prism6,
        ElementType::Pyramid5,
        ElementType::Line3,
        ElementType::Tri6,
        ElementType::Quad9,
        ElementType::Tet10,
        ElementType::Hex27,
        ElementType::Prism18,
        ElementType::Pyramid14,
        ElementType::Point,
        ElementType::Quad8,
        ElementType::Hex20,
        ElementType::Prism15,
        ElementType::Pyramid13,
        ElementType::ITri9,
        ElementType::Tri10,
        ElementType::ITri12,
        ElementType::Tri15,
        ElementType::ITri15,
        ElementType::Tri21,
        ElementType::Line4,
        ElementType::Line5,
        ElementType::Line6,
        ElementType::Tet20,
        ElementType::Tet35,
        ElementType::Tet56,
        ElementType::Hex64,
        ElementType::Hex125,
    ];

    /// Look up an element type by its file code
    pub fn from_code(code: i32) -> Result<Self> {
        let ty = match code {
            1 => ElementType::Line2,
            2 => ElementType::Tri3,
            3 => ElementType::Quad4,
            4 => ElementType::Tet4,
            5 => ElementType::Hex8,
            6 => ElementType::Prism6,
            7 => ElementType::Pyramid5,
            8 => ElementType::Line3,
            9 => ElementType::Tri6,
            10 => ElementType::Quad9,
            11 => ElementType::Tet10,
            12 => ElementType::Hex27,
            13 => ElementType::Prism18,
            14 => ElementType::Pyramid14,
            15 => ElementType::Point,
            16 => ElementType::Quad8,
            17 => ElementType::Hex20,
            18 => ElementType::Prism15,
            19 => ElementType::Pyramid13,
            20 => ElementType::ITri9,
            21 => ElementType::Tri10,
            22 => ElementType::ITri12,
            23 => ElementType::Tri15,
            24 => ElementType::ITri15,
            25 => ElementType::Tri21,
            26 => ElementType::Line4,
            27 => ElementType::Line5,
            28 => ElementType::Line6,
            29 => ElementType::Tet20,
            30 => ElementType::Tet35,
            31 => ElementType::Tet56,
            92 => ElementType::Hex64,
            93 => ElementType::Hex125,
            _ => return Err(ParseError::UnknownElementType(code)),
        };
        Ok(ty)
    }

    /// Integer code used in the file
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Number of nodes per element
    pub fn arity(self) -> usize {
        match self {
            ElementType::Point => 1,
            ElementType::Line2 => 2,
            ElementType::Line3 => 3,
            ElementType::Line4 => 4,
            ElementType::Line5 => 5,
            ElementType::Line6 => 6,
            ElementType::Tri3 => 3,
            ElementType::Tri6 => 6,
            ElementType::Tri10 => 10,
            ElementType::Tri15 => 15,
            ElementType::Tri21 => 21,
            ElementType::ITri9 => 9,
            ElementType::ITri12 => 12,
            ElementType::ITri15 => 15,
            ElementType::Quad4 => 4,
            ElementType::Quad8 => 8,
            ElementType::Quad9 => 9,
            ElementType::Tet4 => 4,
            ElementType::Tet10 => 10,
            ElementType::Tet20 => 20,
            ElementType::Tet35 => 35,
            ElementType::Tet56 => 56,
            ElementType::Hex8 => 8,
            ElementType::Hex20 => 20,
            ElementType::Hex27 => 27,
            ElementType::Hex64 => 64,
            ElementType::Hex125 => 125,
            ElementType::Prism6 => 6,
            ElementType::Prism15 => 15,
            ElementType::Prism18 => 18,
            ElementType::Pyramid5 => 5,
            ElementType::Pyramid13 => 13,
            ElementType::Pyramid14 => 14,
        }
    }

    /// Topological dimension (0 to 3)
    pub fn dimension(self) -> u8 {
        match self {
            ElementType::Point => 0,
            ElementType::Line2
            | ElementType::Line3
            | ElementType::Line4
            | ElementType::Line5
            | ElementType::Line6 => 1,
            ElementType::Tri3
            | ElementType::Tri6
            | ElementType::Tri10
            | ElementType::Tri15
            | ElementType::Tri21
            | ElementType::ITri9
            | ElementType::ITri12
            | ElementType::ITri15
            | ElementType::Quad4
            | ElementType::Quad8
            | ElementType::Quad9 => 2,
            ElementType::Tet4
            | ElementType::Tet10
            | ElementType::Tet20
            | ElementType::Tet35
            | ElementType::Tet56
            | ElementType::Hex8
            | ElementType::Hex20
            | ElementType::Hex27
            | ElementType::Hex64
            | ElementType::Hex125
            | ElementType::Prism6
            | ElementType::Prism15
            | ElementType::Prism18
            | ElementType::Pyramid5
            | ElementType::Pyramid13
            | ElementType::Pyramid14 => 3,
        }
    }

    /// Short upper-case name, e.g. `TRI3`
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Point => "POINT",
            ElementType::Line2 => "LINE2",
            ElementType::Line3 => "LINE3",
            ElementType::Line4 => "LINE4",
            ElementType::Line5 => "LINE5",
            ElementType::Line6 => "LINE6",
            ElementType::Tri3 => "TRI3",
            ElementType::Tri6 => "TRI6",
            ElementType::Tri10 => "TRI10",
            ElementType::Tri15 => "TRI15",
            ElementType::Tri21 => "TRI21",
            ElementType::ITri9 => "ITRI9",
            ElementType::ITri12 => "ITRI12",
            ElementType::ITri15 => "ITRI15",
            ElementType::Quad4 => "QUAD4",
            ElementType::Quad8 => "QUAD8",
            ElementType::Quad9 => "QUAD9",
            ElementType::Tet4 => "TET4",
            ElementType::Tet10 => "TET10",
            ElementType::Tet20 => "TET20",
            ElementType::Tet35 => "TET35",
            ElementType::Tet56 => "TET56",
            ElementType::Hex8 => "HEX8",
            ElementType::Hex20 => "HEX20",
            ElementType::Hex27 => "HEX27",
            ElementType::Hex64 => "HEX64",
            ElementType::Hex125 => "HEX125",
            ElementType::Prism6 => "PRISM6",
            ElementType::Prism15 => "PRISM15",
            ElementType::Prism18 => "PRISM18",
            ElementType::Pyramid5 => "PYRAMID5",
            ElementType::Pyramid13 => "PYRAMID13",
            ElementType::Pyramid14 => "PYRAMID14",
        }
    }
}

impl TryFrom<i32> for ElementType {
    type Error = ParseError;

    fn try_from(code: i32) -> Result<Self> {
        ElementType::from_code(code)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of nodes per element for a raw type code
pub fn arity(code: i32) -> Result<usize> {
    ElementType::from_code(code).map(ElementType::arity)
}

/// Topological dimension for a raw type code
pub fn topological_dimension(code: i32) -> Result<u8> {
    ElementType::from_code(code).map(ElementType::dimension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_codes_round_trip() {
        for ty in ElementType::ALL {
            assert_eq!(ElementType::from_code(ty.code()).unwrap(), ty);
        }
    }

    #[test]
    fn test_arity_table() {
        let expected = [
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 4),
            (5, 8),
            (6, 6),
            (7, 5),
            (8, 3),
            (9, 6),
            (10, 9),
            (11, 10),
            (12, 27),
            (13, 18),
            (14, 14),
            (15, 1),
            (16, 8),
            (17, 20),
            (18, 15),
            (19, 13),
            (20, 9),
            (21, 10),
            (22, 12),
            (23, 15),
            (24, 15),
            (25, 21),
            (26, 4),
            (27, 5),
            (28, 6),
            (29, 20),
            (30, 35),
            (31, 56),
            (92, 64),
            (93, 125),
        ];
        assert_eq!(expected.len(), ElementType::ALL.len());
        for (code, nodes) in expected {
            assert_eq!(arity(code).unwrap(), nodes, "code {code}");
        }
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(topological_dimension(15).unwrap(), 0);
        assert_eq!(topological_dimension(1).unwrap(), 1);
        assert_eq!(topological_dimension(28).unwrap(), 1);
        assert_eq!(topological_dimension(2).unwrap(), 2);
        assert_eq!(topological_dimension(16).unwrap(), 2);
        assert_eq!(topological_dimension(24).unwrap(), 2);
        assert_eq!(topological_dimension(4).unwrap(), 3);
        assert_eq!(topological_dimension(93).unwrap(), 3);
        assert_eq!(topological_dimension(19).unwrap(), 3);
    }

    #[test]
    fn test_unknown_codes() {
        for code in [0, -1, 32, 91, 94, 1000] {
            let err = arity(code).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownElementType);
            assert!(err.to_string().contains(&code.to_string()));

            let err = topological_dimension(code).unwrap_err();
            assert!(matches!(err, ParseError::UnknownElementType(c) if c == code));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementType::Tri3.to_string(), "TRI3");
        assert_eq!(ElementType::ITri12.to_string(), "ITRI12");
        assert_eq!(ElementType::try_from(93).unwrap(), ElementType::Hex125);
    }
}
