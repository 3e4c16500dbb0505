//! Pixel Taxonomy: classifies image buffers by channel layout, numeric
//! representation, and semantic meaning.
//!
//! Two views of the same table are provided:
//! - [`layout`]: one zero-sized marker per [`PixelType`] implementing
//!   [`ImageTraits`]. Depth markers additionally implement [`DepthTraits`],
//!   so asking a colour or label layout for its depth sentinels is a type error.
//! - [`traits_of`]: an exhaustive runtime lookup returning a [`TaxonomyEntry`]
//!   built from those markers, for code that only has a `PixelType` value.
//!
//! # Invariants
//! - Every `PixelType` maps to exactly one `PixelFormat` and one `PixelScalar`.
//! - For depth types, `TOO_CLOSE` is the representation's zero and `TOO_FAR`
//!   its maximum finite value (or `+inf` for floats); `TOO_CLOSE < TOO_FAR`.
//! - The table is fixed for the lifetime of the program.
//!
//! There is no symbolic-expression pixel type; that channel kind is not supported.

mod error;
mod kinds;
pub mod layout;
mod taxonomy;

pub use error::PixelError;
pub use kinds::{PixelFormat, PixelScalar, PixelType};
pub use layout::{Channel, DepthReading, DepthTraits, ImageTraits};
pub use taxonomy::{ChannelValue, DepthSentinels, TaxonomyEntry, traits_of};

pub fn crate_info() -> &'static str {
    "percept-pixels v0.1.0"
}
