use percept_common::Named;
use percept_pixels::PixelType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Render pass kinds. The discriminant is the dense index used by
/// [`PerPass`]; `COUNT` is the number of passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPass {
    Color = 0,
    Label = 1,
    Depth = 2,
}

impl RenderPass {
    pub const COUNT: usize = 3;

    /// All passes in index order.
    pub const ALL: [RenderPass; Self::COUNT] = [RenderPass::Color, RenderPass::Label, RenderPass::Depth];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RenderPass::Color => "color",
            RenderPass::Label => "label",
            RenderPass::Depth => "depth",
        }
    }

    /// Pixel type of the buffer this pass writes.
    pub const fn output_pixel_type(self) -> PixelType {
        match self {
            RenderPass::Color => PixelType::Rgba8U,
            RenderPass::Label => PixelType::Label16I,
            RenderPass::Depth => PixelType::Depth32F,
        }
    }
}

impl Named for RenderPass {
    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for RenderPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One value per render pass, stored densely and indexed by [`RenderPass`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerPass<T>([T; RenderPass::COUNT]);

impl<T> PerPass<T> {
    pub fn new(color: T, label: T, depth: T) -> Self {
        Self([color, label, depth])
    }

    pub fn from_fn(mut f: impl FnMut(RenderPass) -> T) -> Self {
        Self(std::array::from_fn(|i| f(RenderPass::ALL[i])))
    }

    pub fn get(&self, pass: RenderPass) -> &T {
        &self.0[pass.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (RenderPass, &T)> {
        RenderPass::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<RenderPass> for PerPass<T> {
    type Output = T;

    fn index(&self, pass: RenderPass) -> &T {
        &self.0[pass.index()]
    }
}

impl<T> IndexMut<RenderPass> for PerPass<T> {
    fn index_mut(&mut self, pass: RenderPass) -> &mut T {
        &mut self.0[pass.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_are_dense() {
        assert_eq!(RenderPass::Color.index(), 0);
        assert_eq!(RenderPass::Label.index(), 1);
        assert_eq!(RenderPass::Depth.index(), 2);
        for (i, pass) in RenderPass::ALL.iter().enumerate() {
            assert_eq!(pass.index(), i);
        }
    }

    #[test]
    fn per_pass_indexes_by_pass() {
        let mut data = PerPass::new("c", "l", "d");
        assert_eq!(data[RenderPass::Color], "c");
        assert_eq!(data[RenderPass::Label], "l");
        assert_eq!(*data.get(RenderPass::Depth), "d");
        data[RenderPass::Depth] = "z";
        assert_eq!(data[RenderPass::Depth], "z");
    }

    #[test]
    fn from_fn_visits_each_pass() {
        let data = PerPass::from_fn(|pass| pass.index() * 10);
        let collected: Vec<_> = data.iter().map(|(p, v)| (p, *v)).collect();
        assert_eq!(
            collected,
            vec![
                (RenderPass::Color, 0),
                (RenderPass::Label, 10),
                (RenderPass::Depth, 20)
            ]
        );
    }

    #[test]
    fn output_types_match_pass() {
        assert!(RenderPass::Depth.output_pixel_type().is_depth());
        assert_eq!(RenderPass::Label.output_pixel_type(), PixelType::Label16I);
        assert_eq!(RenderPass::Color.to_string(), "color");
    }
}
