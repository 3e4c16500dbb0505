use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use crate::layout::{self, Channel, DepthTraits, ImageTraits};
use crate::{PixelFormat, PixelScalar, PixelType};

/// One channel value tagged with its representation.
///
/// Serializes as a bare number. Non-finite floats, which JSON cannot hold,
/// serialize as the strings `"inf"`, `"-inf"` and `"NaN"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValue {
    U8(u8),
    I16(i16),
    U16(u16),
    F32(f32),
}

impl ChannelValue {
    pub fn scalar(self) -> PixelScalar {
        match self {
            ChannelValue::U8(_) => PixelScalar::U8,
            ChannelValue::I16(_) => PixelScalar::I16,
            ChannelValue::U16(_) => PixelScalar::U16,
            ChannelValue::F32(_) => PixelScalar::F32,
        }
    }
}

/// Values of different representations are unordered.
impl PartialOrd for ChannelValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (ChannelValue::U8(a), ChannelValue::U8(b)) => a.partial_cmp(b),
            (ChannelValue::I16(a), ChannelValue::I16(b)) => a.partial_cmp(b),
            (ChannelValue::U16(a), ChannelValue::U16(b)) => a.partial_cmp(b),
            (ChannelValue::F32(a), ChannelValue::F32(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelValue::U8(v) => write!(f, "{v}"),
            ChannelValue::I16(v) => write!(f, "{v}"),
            ChannelValue::U16(v) => write!(f, "{v}"),
            ChannelValue::F32(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for ChannelValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            ChannelValue::U8(v) => serializer.serialize_u8(v),
            ChannelValue::I16(v) => serializer.serialize_i16(v),
            ChannelValue::U16(v) => serializer.serialize_u16(v),
            ChannelValue::F32(v) if v.is_finite() => serializer.serialize_f32(v),
            ChannelValue::F32(_) => serializer.collect_str(self),
        }
    }
}

/// Out-of-range markers of a depth pixel type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthSentinels {
    pub too_close: ChannelValue,
    pub too_far: ChannelValue,
}

/// Fixed metadata of one pixel type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxonomyEntry {
    pixel_type: PixelType,
    format: PixelFormat,
    scalar: PixelScalar,
    num_channels: usize,
    channel_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth_sentinels: Option<DepthSentinels>,
}

impl TaxonomyEntry {
    fn of<T: ImageTraits>() -> Self {
        Self {
            pixel_type: T::PIXEL_TYPE,
            format: T::PIXEL_FORMAT,
            scalar: T::PIXEL_SCALAR,
            num_channels: T::NUM_CHANNELS,
            channel_bytes: size_of::<T::ChannelType>(),
            depth_sentinels: None,
        }
    }

    fn of_depth<T: DepthTraits>() -> Self {
        Self {
            depth_sentinels: Some(DepthSentinels {
                too_close: T::TOO_CLOSE.to_value(),
                too_far: T::TOO_FAR.to_value(),
            }),
            ..Self::of::<T>()
        }
    }

    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn scalar(&self) -> PixelScalar {
        self.scalar
    }

    /// 1, 3, or 4.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Width of the channel representation in bytes.
    pub fn channel_bytes(&self) -> usize {
        self.channel_bytes
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.num_channels * self.channel_bytes
    }

    /// `Some` exactly for depth formats.
    pub fn depth_sentinels(&self) -> Option<DepthSentinels> {
        self.depth_sentinels
    }
}

/// Taxonomy lookup. Exhaustive over `PixelType`: a new variant does not
/// compile until it has a layout here.
pub fn traits_of(pixel_type: PixelType) -> TaxonomyEntry {
    match pixel_type {
        PixelType::Rgb8U => TaxonomyEntry::of::<layout::Rgb8U>(),
        PixelType::Bgr8U => TaxonomyEntry::of::<layout::Bgr8U>(),
        PixelType::Rgba8U => TaxonomyEntry::of::<layout::Rgba8U>(),
        PixelType::Bgra8U => TaxonomyEntry::of::<layout::Bgra8U>(),
        PixelType::Grey8U => TaxonomyEntry::of::<layout::Grey8U>(),
        PixelType::Depth16U => TaxonomyEntry::of_depth::<layout::Depth16U>(),
        PixelType::Depth32F => TaxonomyEntry::of_depth::<layout::Depth32F>(),
        PixelType::Label16I => TaxonomyEntry::of::<layout::Label16I>(),
    }
}
