//! JSON scene descriptions: meshes already uploaded by some GPU context, and
//! the instances that reference them.

use anyhow::{Context, Result};
use glam::{DQuat, DVec3};
use percept_common::{ObjectId, RigidTransform};
use percept_render::{
    GeometryRecord, GlHandle, InstanceRecord, MeshUpload, RenderError, RenderTables, ShaderBinding,
    ShaderId,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub meshes: Vec<MeshDescription>,
    #[serde(default)]
    pub instances: Vec<InstanceDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDescription {
    pub vertex_array: GlHandle,
    pub vertex_buffer: GlHandle,
    pub index_buffer: GlHandle,
    pub index_count: i32,
    #[serde(default)]
    pub has_tex_coord: bool,
    pub vertex_count: i32,
    /// Floats in the vertex buffer. When present, the buffer layout is
    /// checked against `vertex_count`.
    #[serde(default)]
    pub vertex_buffer_len: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceDescription {
    pub mesh: usize,
    #[serde(default)]
    pub translation: DVec3,
    /// `[x, y, z, w]`
    #[serde(default = "identity_rotation")]
    pub rotation: DQuat,
    #[serde(default = "unit_scale")]
    pub scale: DVec3,
    pub shaders: PassShaders,
}

/// Raw shader ids per pass; zero is the invalid id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PassShaders {
    pub color: u64,
    pub label: u64,
    pub depth: u64,
}

fn identity_rotation() -> DQuat {
    DQuat::IDENTITY
}

fn unit_scale() -> DVec3 {
    DVec3::ONE
}

impl MeshDescription {
    pub fn to_geometry(&self) -> Result<GeometryRecord, RenderError> {
        let record = GeometryRecord::new(
            self.vertex_array,
            self.vertex_buffer,
            self.index_buffer,
            self.index_count,
            self.has_tex_coord,
            self.vertex_count,
        )?;
        match self.vertex_buffer_len {
            Some(vertex_buffer_len) => GeometryRecord::from_upload(&MeshUpload {
                vertex_array: self.vertex_array,
                vertex_buffer: self.vertex_buffer,
                index_buffer: self.index_buffer,
                vertex_count: record.vertex_count() as usize,
                vertex_buffer_len,
                index_count: record.index_count() as usize,
                has_tex_coord: self.has_tex_coord,
            }),
            None => Ok(record),
        }
    }
}

impl InstanceDescription {
    pub fn to_instance(&self) -> Result<InstanceRecord> {
        let pose = RigidTransform::new(self.rotation, self.translation)?;
        let instance = InstanceRecord::new(
            self.mesh,
            pose,
            self.scale,
            ShaderBinding::new(ShaderId::from_raw(self.shaders.color)),
            ShaderBinding::new(ShaderId::from_raw(self.shaders.depth)),
            ShaderBinding::new(ShaderId::from_raw(self.shaders.label)),
        )?;
        Ok(instance)
    }
}

impl SceneDescription {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        let scene = serde_json::from_str(&data)
            .with_context(|| format!("parsing scene {}", path.display()))?;
        Ok(scene)
    }

    /// Builds render tables. Object ids are returned in instance order.
    pub fn build_tables(&self) -> Result<(RenderTables, Vec<ObjectId>)> {
        let mut tables = RenderTables::new();
        for (i, mesh) in self.meshes.iter().enumerate() {
            let geometry = mesh.to_geometry().with_context(|| format!("mesh {i}"))?;
            tables
                .add_geometry(geometry)
                .with_context(|| format!("mesh {i}"))?;
        }

        let mut ids = Vec::with_capacity(self.instances.len());
        for (i, desc) in self.instances.iter().enumerate() {
            let instance = desc.to_instance().with_context(|| format!("instance {i}"))?;
            let id = ObjectId::new();
            tables
                .add_instance(id, instance)
                .with_context(|| format!("instance {i}"))?;
            ids.push(id);
        }
        tracing::info!(
            meshes = tables.geometry_count(),
            instances = tables.instance_count(),
            "scene loaded"
        );
        Ok((tables, ids))
    }
}
