use glam::{DMat4, DVec3};
use percept_common::RigidTransform;

use crate::{PerPass, RenderError, RenderPass, ShaderBinding};

/// One scene object's renderable state: which geometry, where, how scaled,
/// and which shader each pass uses.
///
/// The geometry is scaled about its own origin G, then posed in the world
/// frame W. Scale need not be uniform, and negative components are accepted:
/// they mirror the geometry and, for an odd count, turn it inside out
/// (see [`flips_winding`](Self::flips_winding)).
///
/// Records are replaced wholesale; there are no field setters.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRecord {
    geometry: usize,
    pose: RigidTransform,
    scale: DVec3,
    shader_data: PerPass<ShaderBinding>,
}

impl InstanceRecord {
    /// `geometry` indexes the owner's geometry table. Every binding must carry
    /// a valid shader id.
    pub fn new(
        geometry: usize,
        pose: RigidTransform,
        scale: DVec3,
        color: ShaderBinding,
        depth: ShaderBinding,
        label: ShaderBinding,
    ) -> Result<Self, RenderError> {
        let shader_data = PerPass::new(color, label, depth);
        if let Some((pass, _)) = shader_data.iter().find(|(_, b)| !b.is_valid()) {
            return Err(RenderError::InvalidShader { pass });
        }
        Ok(Self {
            geometry,
            pose,
            scale,
            shader_data,
        })
    }

    /// Index into the geometry table that owns the mesh.
    pub fn geometry(&self) -> usize {
        self.geometry
    }

    /// `X_WG`: pose of the geometry frame in the world frame.
    pub fn pose(&self) -> &RigidTransform {
        &self.pose
    }

    pub fn scale(&self) -> DVec3 {
        self.scale
    }

    pub fn binding(&self, pass: RenderPass) -> &ShaderBinding {
        &self.shader_data[pass]
    }

    pub fn bindings(&self) -> &PerPass<ShaderBinding> {
        &self.shader_data
    }

    /// Model matrix: scale about G, then pose into W.
    pub fn model_matrix(&self) -> DMat4 {
        self.pose.to_matrix() * DMat4::from_scale(self.scale)
    }

    /// True when an odd number of scale components is negative, which
    /// reverses triangle winding.
    pub fn flips_winding(&self) -> bool {
        (self.scale.x < 0.0) ^ (self.scale.y < 0.0) ^ (self.scale.z < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShaderId;
    use glam::DQuat;

    fn valid() -> ShaderBinding {
        ShaderBinding::new(ShaderId::new())
    }

    #[test]
    fn construction_round_trips() {
        let (color, depth, label) = (valid(), valid(), valid());
        let inst = InstanceRecord::new(
            0,
            RigidTransform::IDENTITY,
            DVec3::ONE,
            color.clone(),
            depth.clone(),
            label.clone(),
        )
        .unwrap();
        assert_eq!(inst.geometry(), 0);
        assert_eq!(*inst.pose(), RigidTransform::IDENTITY);
        assert_eq!(inst.scale(), DVec3::new(1.0, 1.0, 1.0));
        assert_eq!(inst.binding(RenderPass::Color), &color);
        assert_eq!(inst.binding(RenderPass::Depth), &depth);
        assert_eq!(inst.binding(RenderPass::Label), &label);
    }

    #[test]
    fn invalid_depth_binding_fails() {
        let err = InstanceRecord::new(
            0,
            RigidTransform::IDENTITY,
            DVec3::ONE,
            valid(),
            ShaderBinding::invalid(),
            valid(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidShader {
                pass: RenderPass::Depth
            }
        );
    }

    #[test]
    fn each_invalid_pass_is_reported() {
        for pass in RenderPass::ALL {
            let pick = |p: RenderPass| {
                if p == pass {
                    ShaderBinding::invalid()
                } else {
                    valid()
                }
            };
            let err = InstanceRecord::new(
                3,
                RigidTransform::IDENTITY,
                DVec3::ONE,
                pick(RenderPass::Color),
                pick(RenderPass::Depth),
                pick(RenderPass::Label),
            )
            .unwrap_err();
            assert_eq!(err, RenderError::InvalidShader { pass });
        }
    }

    #[test]
    fn negative_scale_is_accepted() {
        let inst = InstanceRecord::new(
            1,
            RigidTransform::IDENTITY,
            DVec3::new(-1.0, 1.0, 1.0),
            valid(),
            valid(),
            valid(),
        )
        .unwrap();
        assert!(inst.flips_winding());
        let mirrored = inst.model_matrix().transform_point3(DVec3::new(2.0, 3.0, 4.0));
        assert_eq!(mirrored, DVec3::new(-2.0, 3.0, 4.0));
    }

    #[test]
    fn even_negative_scale_keeps_winding() {
        let inst = InstanceRecord::new(
            1,
            RigidTransform::IDENTITY,
            DVec3::new(-1.0, -2.0, 1.0),
            valid(),
            valid(),
            valid(),
        )
        .unwrap();
        assert!(!inst.flips_winding());
    }

    #[test]
    fn model_matrix_scales_then_poses() {
        let pose = RigidTransform::new(
            DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2),
            DVec3::new(10.0, 0.0, 0.0),
        )
        .unwrap();
        let inst = InstanceRecord::new(
            0,
            pose,
            DVec3::new(2.0, 1.0, 1.0),
            valid(),
            valid(),
            valid(),
        )
        .unwrap();
        // (1,0,0) -> scaled (2,0,0) -> rotated (0,2,0) -> translated (10,2,0)
        let p = inst.model_matrix().transform_point3(DVec3::X);
        assert!((p - DVec3::new(10.0, 2.0, 0.0)).length() < 1e-9);
    }
}
