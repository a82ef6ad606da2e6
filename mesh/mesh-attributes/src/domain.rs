//! Element domains an attribute can be aligned to.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::AttributeError;

/// The element kind an attribute's values are aligned to.
///
/// An attribute in domain `D` carries exactly one value per element of `D`,
/// and value `i` belongs to element `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeDomain {
    /// One value per vertex.
    Vertex,
    /// One value per edge.
    Edge,
    /// One value per (triangle) face.
    Face,
    /// One value per face corner.
    FaceCorner,
}

impl AttributeDomain {
    /// All domains, in lookup order.
    pub const ALL: [Self; 4] = [Self::Vertex, Self::Edge, Self::Face, Self::FaceCorner];

    /// Lower-case name of the domain.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Edge => "edge",
            Self::Face => "face",
            Self::FaceCorner => "face_corner",
        }
    }
}

impl fmt::Display for AttributeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeDomain {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AttributeError::UnknownDomain(s.to_string()))
    }
}
