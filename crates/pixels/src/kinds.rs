use percept_common::{Named, StableHash};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PixelError;
use crate::taxonomy::{TaxonomyEntry, traits_of};

/// Concrete buffer layout of an image.
///
/// Naming: pixel format, then bits per channel, then channel data type
/// (`U` unsigned int, `I` signed int, `F` float).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PixelType {
    Rgb8U,
    Bgr8U,
    Rgba8U,
    Bgra8U,
    Grey8U,
    Depth16U,
    Depth32F,
    Label16I,
}

impl PixelType {
    pub const COUNT: usize = 8;

    pub const ALL: [PixelType; Self::COUNT] = [
        PixelType::Rgb8U,
        PixelType::Bgr8U,
        PixelType::Rgba8U,
        PixelType::Bgra8U,
        PixelType::Grey8U,
        PixelType::Depth16U,
        PixelType::Depth32F,
        PixelType::Label16I,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PixelType::Rgb8U => "Rgb8U",
            PixelType::Bgr8U => "Bgr8U",
            PixelType::Rgba8U => "Rgba8U",
            PixelType::Bgra8U => "Bgra8U",
            PixelType::Grey8U => "Grey8U",
            PixelType::Depth16U => "Depth16U",
            PixelType::Depth32F => "Depth32F",
            PixelType::Label16I => "Label16I",
        }
    }

    /// Taxonomy entry for this type. Shorthand for [`traits_of`].
    pub fn traits(self) -> TaxonomyEntry {
        traits_of(self)
    }

    pub fn format(self) -> PixelFormat {
        traits_of(self).format()
    }

    pub fn scalar(self) -> PixelScalar {
        traits_of(self).scalar()
    }

    pub fn is_depth(self) -> bool {
        self.format() == PixelFormat::Depth
    }
}

/// Semantic meaning of pixels, and channel order when there are several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PixelFormat {
    Rgb,
    Bgr,
    Rgba,
    Bgra,
    Grey,
    Depth,
    Label,
}

impl PixelFormat {
    pub const COUNT: usize = 7;

    pub const ALL: [PixelFormat; Self::COUNT] = [
        PixelFormat::Rgb,
        PixelFormat::Bgr,
        PixelFormat::Rgba,
        PixelFormat::Bgra,
        PixelFormat::Grey,
        PixelFormat::Depth,
        PixelFormat::Label,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PixelFormat::Rgb => "Rgb",
            PixelFormat::Bgr => "Bgr",
            PixelFormat::Rgba => "Rgba",
            PixelFormat::Bgra => "Bgra",
            PixelFormat::Grey => "Grey",
            PixelFormat::Depth => "Depth",
            PixelFormat::Label => "Label",
        }
    }

    /// Number of channels every pixel of this format carries.
    pub const fn num_channels(self) -> usize {
        match self {
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
            PixelFormat::Grey | PixelFormat::Depth | PixelFormat::Label => 1,
        }
    }
}

/// Per-channel numeric representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PixelScalar {
    /// `u8`
    #[serde(rename = "8U")]
    U8,
    /// `i16`
    #[serde(rename = "16I")]
    I16,
    /// `u16`
    #[serde(rename = "16U")]
    U16,
    /// `f32`
    #[serde(rename = "32F")]
    F32,
}

impl PixelScalar {
    pub const COUNT: usize = 4;

    pub const ALL: [PixelScalar; Self::COUNT] = [
        PixelScalar::U8,
        PixelScalar::I16,
        PixelScalar::U16,
        PixelScalar::F32,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PixelScalar::U8 => "8U",
            PixelScalar::I16 => "16I",
            PixelScalar::U16 => "16U",
            PixelScalar::F32 => "32F",
        }
    }

    /// Byte size of a single channel value.
    pub const fn byte_size(self) -> usize {
        match self {
            PixelScalar::U8 => 1,
            PixelScalar::I16 | PixelScalar::U16 => 2,
            PixelScalar::F32 => 4,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, PixelScalar::F32)
    }
}

fn parse_named<T: Named + Copy>(all: &[T], kind: &'static str, s: &str) -> Result<T, PixelError> {
    all.iter()
        .copied()
        .find(|v| v.name() == s)
        .ok_or_else(|| PixelError::UnknownName {
            kind,
            name: s.to_string(),
        })
}

impl Named for PixelType {
    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl Named for PixelFormat {
    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl Named for PixelScalar {
    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl StableHash for PixelType {
    const HASH_DOMAIN: &'static str = "PixelType";
}

impl StableHash for PixelFormat {
    const HASH_DOMAIN: &'static str = "PixelFormat";
}

impl StableHash for PixelScalar {
    const HASH_DOMAIN: &'static str = "PixelScalar";
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for PixelScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PixelType {
    type Err = PixelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, "PixelType", s)
    }
}

impl FromStr for PixelFormat {
    type Err = PixelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, "PixelFormat", s)
    }
}

impl FromStr for PixelScalar {
    type Err = PixelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, "PixelScalar", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    // Exhaustive match: adding a variant without extending ALL fails here.
    fn type_ordinal(t: PixelType) -> usize {
        match t {
            PixelType::Rgb8U => 0,
            PixelType::Bgr8U => 1,
            PixelType::Rgba8U => 2,
            PixelType::Bgra8U => 3,
            PixelType::Grey8U => 4,
            PixelType::Depth16U => 5,
            PixelType::Depth32F => 6,
            PixelType::Label16I => 7,
        }
    }

    fn format_ordinal(f: PixelFormat) -> usize {
        match f {
            PixelFormat::Rgb => 0,
            PixelFormat::Bgr => 1,
            PixelFormat::Rgba => 2,
            PixelFormat::Bgra => 3,
            PixelFormat::Grey => 4,
            PixelFormat::Depth => 5,
            PixelFormat::Label => 6,
        }
    }

    fn scalar_ordinal(s: PixelScalar) -> usize {
        match s {
            PixelScalar::U8 => 0,
            PixelScalar::I16 => 1,
            PixelScalar::U16 => 2,
            PixelScalar::F32 => 3,
        }
    }

    #[test]
    fn all_tables_cover_every_variant() {
        for (i, t) in PixelType::ALL.iter().enumerate() {
            assert_eq!(type_ordinal(*t), i);
        }
        for (i, f) in PixelFormat::ALL.iter().enumerate() {
            assert_eq!(format_ordinal(*f), i);
        }
        for (i, s) in PixelScalar::ALL.iter().enumerate() {
            assert_eq!(scalar_ordinal(*s), i);
        }
    }

    #[test]
    fn names_are_non_empty_and_distinct() {
        let types: HashSet<_> = PixelType::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(types.len(), PixelType::COUNT);
        let formats: HashSet<_> = PixelFormat::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(formats.len(), PixelFormat::COUNT);
        let scalars: HashSet<_> = PixelScalar::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(scalars.len(), PixelScalar::COUNT);
        assert!(types.iter().chain(&formats).chain(&scalars).all(|n| !n.is_empty()));
    }

    #[test]
    fn display_goes_through_name() {
        assert_eq!(format!("{}", PixelType::Depth32F), "Depth32F");
        assert_eq!(format!("{:>6}|", PixelFormat::Rgb), "   Rgb|");
        assert_eq!(format!("image of {}", PixelScalar::U16), "image of 16U");
    }

    #[test]
    fn from_str_inverts_to_string() {
        for t in PixelType::ALL {
            assert_eq!(t.to_string().parse::<PixelType>(), Ok(t));
        }
        for f in PixelFormat::ALL {
            assert_eq!(f.to_string().parse::<PixelFormat>(), Ok(f));
        }
        for s in PixelScalar::ALL {
            assert_eq!(s.to_string().parse::<PixelScalar>(), Ok(s));
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "Expr".parse::<PixelType>().unwrap_err();
        assert_eq!(
            err,
            PixelError::UnknownName {
                kind: "PixelType",
                name: "Expr".into()
            }
        );
        assert!(err.to_string().contains("Expr"));
        assert!("rgb".parse::<PixelFormat>().is_err());
    }

    #[test]
    fn pixel_type_is_a_map_key() {
        let mut counts: HashMap<PixelType, usize> = HashMap::new();
        for t in PixelType::ALL {
            *counts.entry(t).or_default() += 1;
        }
        *counts.entry(PixelType::Depth16U).or_default() += 1;
        assert_eq!(counts.len(), PixelType::COUNT);
        assert_eq!(counts[&PixelType::Depth16U], 2);
    }

    #[test]
    fn stable_hashes_are_distinct_and_repeatable() {
        let hashes: HashSet<u64> = PixelType::ALL.iter().map(|t| t.stable_hash()).collect();
        assert_eq!(hashes.len(), PixelType::COUNT);
        for t in PixelType::ALL {
            assert_eq!(t.stable_hash(), t.stable_hash());
        }
        // Same spelling in different enumerations does not collide.
        assert_ne!(
            PixelFormat::Depth.stable_hash(),
            percept_common::stable_hash_of("PixelType", "Depth")
        );
    }

    #[test]
    fn serde_uses_textual_names() {
        assert_eq!(serde_json::to_string(&PixelType::Label16I).unwrap(), "\"Label16I\"");
        assert_eq!(serde_json::to_string(&PixelScalar::F32).unwrap(), "\"32F\"");
        let s: PixelScalar = serde_json::from_str("\"16I\"").unwrap();
        assert_eq!(s, PixelScalar::I16);
        for s in PixelScalar::ALL {
            assert_eq!(serde_json::to_string(&s).unwrap(), format!("\"{s}\""));
        }
    }

    #[test]
    fn format_channel_counts() {
        assert_eq!(PixelFormat::Bgr.num_channels(), 3);
        assert_eq!(PixelFormat::Rgba.num_channels(), 4);
        assert_eq!(PixelFormat::Depth.num_channels(), 1);
        assert_eq!(PixelScalar::F32.byte_size(), 4);
        assert!(PixelScalar::F32.is_float());
        assert!(!PixelScalar::U16.is_float());
    }
}
