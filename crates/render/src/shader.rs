use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a compiled shader program.
///
/// Zero is reserved as the invalid id; [`ShaderId::new`] never returns it.
/// `Default` yields the invalid id, matching an unassigned binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ShaderId(u64);

impl ShaderId {
    pub const INVALID: ShaderId = ShaderId(0);

    /// Allocates a fresh, valid id unique within this process.
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps an id handed out by the shader subsystem.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

/// A per-draw uniform value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec4([f32; 4]),
}

/// A shader program together with the uniform state one draw needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShaderBinding {
    shader_id: ShaderId,
    #[serde(default)]
    uniforms: BTreeMap<String, UniformValue>,
}

impl ShaderBinding {
    pub fn new(shader_id: ShaderId) -> Self {
        Self {
            shader_id,
            uniforms: BTreeMap::new(),
        }
    }

    /// A binding with the invalid shader id. Instance construction rejects it.
    pub fn invalid() -> Self {
        Self::new(ShaderId::INVALID)
    }

    pub fn with_uniform(mut self, name: impl Into<String>, value: UniformValue) -> Self {
        self.uniforms.insert(name.into(), value);
        self
    }

    pub fn shader_id(&self) -> ShaderId {
        self.shader_id
    }

    pub fn is_valid(&self) -> bool {
        self.shader_id.is_valid()
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Uniforms in name order.
    pub fn uniforms(&self) -> &BTreeMap<String, UniformValue> {
        &self.uniforms
    }
}
