//! Compile-time pixel layouts.
//!
//! Each marker type names one [`PixelType`] and carries its channel
//! representation as an associated type. Only depth layouts implement
//! [`DepthTraits`]:
//!
//! ```
//! use percept_pixels::DepthTraits;
//! use percept_pixels::layout::Depth16U;
//!
//! assert_eq!(Depth16U::TOO_FAR, u16::MAX);
//! ```
//!
//! ```compile_fail
//! use percept_pixels::DepthTraits;
//! use percept_pixels::layout::Rgb8U;
//!
//! let _ = Rgb8U::TOO_FAR;
//! ```

use bytemuck::Pod;
use std::fmt::Debug;

use crate::taxonomy::ChannelValue;
use crate::{PixelFormat, PixelScalar, PixelType};

mod sealed {
    pub trait Sealed {}
}

/// A scalar type that can hold one channel of a pixel.
pub trait Channel: Pod + PartialOrd + Debug + Send + Sync + sealed::Sealed {
    const SCALAR: PixelScalar;

    fn to_value(self) -> ChannelValue;
}

impl sealed::Sealed for u8 {}
impl Channel for u8 {
    const SCALAR: PixelScalar = PixelScalar::U8;

    fn to_value(self) -> ChannelValue {
        ChannelValue::U8(self)
    }
}

impl sealed::Sealed for i16 {}
impl Channel for i16 {
    const SCALAR: PixelScalar = PixelScalar::I16;

    fn to_value(self) -> ChannelValue {
        ChannelValue::I16(self)
    }
}

impl sealed::Sealed for u16 {}
impl Channel for u16 {
    const SCALAR: PixelScalar = PixelScalar::U16;

    fn to_value(self) -> ChannelValue {
        ChannelValue::U16(self)
    }
}

impl sealed::Sealed for f32 {}
impl Channel for f32 {
    const SCALAR: PixelScalar = PixelScalar::F32;

    fn to_value(self) -> ChannelValue {
        ChannelValue::F32(self)
    }
}

/// Static description of one pixel layout.
pub trait ImageTraits: sealed::Sealed {
    type ChannelType: Channel;

    const PIXEL_TYPE: PixelType;
    const NUM_CHANNELS: usize;
    const PIXEL_FORMAT: PixelFormat;
    const PIXEL_SCALAR: PixelScalar = <Self::ChannelType as Channel>::SCALAR;

    /// Bytes occupied by one pixel.
    const BYTES_PER_PIXEL: usize = Self::NUM_CHANNELS * size_of::<Self::ChannelType>();
}

/// Outcome of comparing a depth measurement against the layout's sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthReading {
    /// Below the sensor's minimum range.
    TooClose,
    InRange,
    /// Beyond the sensor's maximum range.
    TooFar,
    /// Not comparable (NaN).
    Invalid,
}

/// Sentinels for depth layouts.
///
/// `TOO_CLOSE` is zero rather than negative infinity: unsigned layouts have
/// no negative infinity, several cameras report zero natively, and a
/// forgotten lower-bound check on zero does less damage downstream.
/// `TOO_FAR` is the largest finite value, or `+inf` for float layouts.
pub trait DepthTraits: ImageTraits {
    const TOO_CLOSE: Self::ChannelType;
    const TOO_FAR: Self::ChannelType;

    fn classify(value: Self::ChannelType) -> DepthReading {
        if value.partial_cmp(&value).is_none() {
            DepthReading::Invalid
        } else if value <= Self::TOO_CLOSE {
            DepthReading::TooClose
        } else if value >= Self::TOO_FAR {
            DepthReading::TooFar
        } else {
            DepthReading::InRange
        }
    }
}

macro_rules! pixel_layout {
    ($(#[$doc:meta])* $name:ident, $channel:ty, $channels:expr, $format:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl ImageTraits for $name {
            type ChannelType = $channel;
            const PIXEL_TYPE: PixelType = PixelType::$name;
            const NUM_CHANNELS: usize = $channels;
            const PIXEL_FORMAT: PixelFormat = PixelFormat::$format;
        }
    };
}

pixel_layout!(
    /// 8-bit RGB colour.
    Rgb8U, u8, 3, Rgb
);
pixel_layout!(
    /// 8-bit BGR colour.
    Bgr8U, u8, 3, Bgr
);
pixel_layout!(
    /// 8-bit RGBA colour.
    Rgba8U, u8, 4, Rgba
);
pixel_layout!(
    /// 8-bit BGRA colour.
    Bgra8U, u8, 4, Bgra
);
pixel_layout!(
    /// 8-bit greyscale.
    Grey8U, u8, 1, Grey
);
pixel_layout!(
    /// 16-bit unsigned depth, typically millimetres.
    Depth16U, u16, 1, Depth
);
pixel_layout!(
    /// 32-bit float depth, typically metres.
    Depth32F, f32, 1, Depth
);
pixel_layout!(
    /// 16-bit signed render label.
    Label16I, i16, 1, Label
);

impl DepthTraits for Depth16U {
    const TOO_CLOSE: u16 = 0;
    const TOO_FAR: u16 = u16::MAX;
}

impl DepthTraits for Depth32F {
    const TOO_CLOSE: f32 = 0.0;
    const TOO_FAR: f32 = f32::INFINITY;
}

// Layout channel counts must agree with the format's channel count.
const _: () = {
    assert!(Rgb8U::NUM_CHANNELS == PixelFormat::Rgb.num_channels());
    assert!(Bgr8U::NUM_CHANNELS == PixelFormat::Bgr.num_channels());
    assert!(Rgba8U::NUM_CHANNELS == PixelFormat::Rgba.num_channels());
    assert!(Bgra8U::NUM_CHANNELS == PixelFormat::Bgra.num_channels());
    assert!(Grey8U::NUM_CHANNELS == PixelFormat::Grey.num_channels());
    assert!(Depth16U::NUM_CHANNELS == PixelFormat::Depth.num_channels());
    assert!(Depth32F::NUM_CHANNELS == PixelFormat::Depth.num_channels());
    assert!(Label16I::NUM_CHANNELS == PixelFormat::Label.num_channels());
};
