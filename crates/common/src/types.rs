use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;
use uuid::Uuid;

use crate::PoseError;

/// Unique identifier for a scene object that owns a render instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Rigid pose: rotation followed by translation, no scale or shear.
///
/// Read `X_WG` as "the pose of frame G measured in frame W". Composition
/// follows the frame subscripts: `X_WA * X_AB == X_WB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RigidTransformRepr")]
pub struct RigidTransform {
    rotation: DQuat,
    translation: DVec3,
}

impl RigidTransform {
    pub const IDENTITY: Self = Self {
        rotation: DQuat::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Builds a pose from a rotation and a translation. The rotation is
    /// normalized; it must be finite and non-zero.
    pub fn new(rotation: DQuat, translation: DVec3) -> Result<Self, PoseError> {
        if !rotation.is_finite() || rotation.length_squared() == 0.0 {
            return Err(PoseError::DegenerateRotation(rotation.to_array()));
        }
        Ok(Self {
            rotation: rotation.normalize(),
            translation,
        })
    }

    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            rotation: DQuat::IDENTITY,
            translation,
        }
    }

    pub fn from_rotation(rotation: DQuat) -> Result<Self, PoseError> {
        Self::new(rotation, DVec3::ZERO)
    }

    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    /// Homogeneous matrix form.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.translation)
    }

    pub fn transform_point(&self, p: DVec3) -> DVec3 {
        self.rotation * p + self.translation
    }

    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            rotation,
            translation: -(rotation * self.translation),
        }
    }
}

/// Wire form; deserialized poses go through [`RigidTransform::new`].
#[derive(Deserialize)]
struct RigidTransformRepr {
    rotation: DQuat,
    translation: DVec3,
}

impl TryFrom<RigidTransformRepr> for RigidTransform {
    type Error = PoseError;

    fn try_from(repr: RigidTransformRepr) -> Result<Self, PoseError> {
        Self::new(repr.rotation, repr.translation)
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: RigidTransform) -> RigidTransform {
        RigidTransform {
            rotation: (self.rotation * rhs.rotation).normalize(),
            translation: self.rotation * rhs.translation + self.translation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn object_id_uniqueness() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn default_is_identity() {
        let x = RigidTransform::default();
        assert_eq!(x, RigidTransform::IDENTITY);
        assert_eq!(x.rotation(), DQuat::IDENTITY);
        assert_eq!(x.translation(), DVec3::ZERO);
        assert_eq!(x.to_matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn new_normalizes_rotation() {
        let x = RigidTransform::new(DQuat::from_xyzw(0.0, 0.0, 0.0, 2.0), DVec3::X).unwrap();
        assert!((x.rotation().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_rotation_is_rejected() {
        let zero = DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            RigidTransform::new(zero, DVec3::ZERO),
            Err(PoseError::DegenerateRotation([0.0; 4]))
        );
        let nan = DQuat::from_xyzw(f64::NAN, 0.0, 0.0, 1.0);
        assert!(matches!(
            RigidTransform::from_rotation(nan),
            Err(PoseError::DegenerateRotation(_))
        ));
    }

    #[test]
    fn compose_follows_frames() {
        let x_wa = RigidTransform::from_translation(DVec3::new(1.0, 0.0, 0.0));
        let x_ab = RigidTransform::new(
            DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2),
            DVec3::new(0.0, 2.0, 0.0),
        )
        .unwrap();
        let x_wb = x_wa * x_ab;
        // B's x-axis unit point lands on W's +y after the quarter turn.
        let p = x_wb.transform_point(DVec3::X);
        assert!(approx(p, DVec3::new(1.0, 3.0, 0.0)));
    }

    #[test]
    fn inverse_round_trips() {
        let x = RigidTransform::new(
            DQuat::from_rotation_y(0.7),
            DVec3::new(-3.0, 4.0, 0.5),
        )
        .unwrap();
        let p = DVec3::new(0.25, -1.0, 9.0);
        assert!(approx(x.inverse().transform_point(x.transform_point(p)), p));
        let ident = x * x.inverse();
        assert!(approx(ident.translation(), DVec3::ZERO));
    }

    #[test]
    fn serde_preserves_pose() {
        let x = RigidTransform::from_translation(DVec3::new(1.0, 2.0, 3.0));
        let json = serde_json::to_string(&x).unwrap();
        assert!(json.contains("translation"));
        let back: RigidTransform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn deserialize_normalizes_rotation() {
        let json = r#"{"rotation":[0.0,0.0,0.0,2.0],"translation":[1.0,2.0,3.0]}"#;
        let x: RigidTransform = serde_json::from_str(json).unwrap();
        assert_eq!(x.rotation(), DQuat::IDENTITY);
        assert_eq!(x.translation(), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn deserialize_rejects_zero_rotation() {
        let json = r#"{"rotation":[0.0,0.0,0.0,0.0],"translation":[0.0,0.0,0.0]}"#;
        let err = serde_json::from_str::<RigidTransform>(json).unwrap_err();
        assert!(err.to_string().contains("rotation"), "{err}");
    }
}
