use percept_common::ObjectId;
use std::collections::BTreeMap;

use crate::{GeometryRecord, InstanceRecord, RenderError, RenderPass, ShaderBinding};

/// One draw for one pass: the instance, the geometry it references, and
/// the binding that pass uses.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub object: ObjectId,
    pub instance: &'a InstanceRecord,
    pub geometry: &'a GeometryRecord,
    pub binding: &'a ShaderBinding,
}

/// The renderer-owned geometry table and instance set.
///
/// Geometries are index-addressable and live as long as the tables. Instances
/// are keyed by scene object and iterate in a deterministic order. Mutation
/// needs `&mut self`, so one owner at a time; callers sharing the tables
/// across threads must serialize access with the GPU context they describe.
#[derive(Debug, Clone, Default)]
pub struct RenderTables {
    geometries: Vec<GeometryRecord>,
    instances: BTreeMap<ObjectId, InstanceRecord>,
}

impl RenderTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an uploaded mesh and returns its table index.
    pub fn add_geometry(&mut self, geometry: GeometryRecord) -> Result<usize, RenderError> {
        if let Err(e) = geometry.ensure_defined("cannot register an undefined geometry") {
            tracing::warn!("{e}");
            return Err(e);
        }
        let index = self.geometries.len();
        self.geometries.push(geometry);
        tracing::debug!(
            index,
            vertex_count = geometry.vertex_count(),
            index_count = geometry.index_count(),
            "geometry registered"
        );
        Ok(index)
    }

    pub fn geometry(&self, index: usize) -> Option<&GeometryRecord> {
        self.geometries.get(index)
    }

    pub fn geometries(&self) -> &[GeometryRecord] {
        &self.geometries
    }

    /// Adds the instance for a scene object entering the renderable set.
    pub fn add_instance(
        &mut self,
        object: ObjectId,
        instance: InstanceRecord,
    ) -> Result<(), RenderError> {
        self.check_geometry_index(object, &instance)?;
        if self.instances.contains_key(&object) {
            tracing::warn!(?object, "instance already present");
            return Err(RenderError::DuplicateInstance(object));
        }
        tracing::debug!(?object, geometry = instance.geometry(), "instance added");
        self.instances.insert(object, instance);
        Ok(())
    }

    /// Swaps in a new record for an existing object. Returns the old one.
    pub fn replace_instance(
        &mut self,
        object: ObjectId,
        instance: InstanceRecord,
    ) -> Result<InstanceRecord, RenderError> {
        self.check_geometry_index(object, &instance)?;
        match self.instances.get_mut(&object) {
            Some(slot) => {
                tracing::debug!(?object, geometry = instance.geometry(), "instance replaced");
                Ok(std::mem::replace(slot, instance))
            }
            None => {
                tracing::warn!(?object, "replace for unknown instance");
                Err(RenderError::UnknownInstance(object))
            }
        }
    }

    /// Removes the instance of an object leaving the scene.
    pub fn remove_instance(&mut self, object: ObjectId) -> Option<InstanceRecord> {
        let removed = self.instances.remove(&object);
        if removed.is_some() {
            tracing::debug!(?object, "instance removed");
        }
        removed
    }

    pub fn instance(&self, object: ObjectId) -> Option<&InstanceRecord> {
        self.instances.get(&object)
    }

    pub fn instances(&self) -> impl Iterator<Item = (ObjectId, &InstanceRecord)> {
        self.instances.iter().map(|(id, inst)| (*id, inst))
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Everything to draw for `pass`, in object order. Every referenced
    /// geometry is checked for definedness first.
    pub fn draw_list(&self, pass: RenderPass) -> Result<Vec<DrawItem<'_>>, RenderError> {
        let _span = tracing::info_span!("draw_list", %pass).entered();
        let mut items = Vec::with_capacity(self.instances.len());
        for (object, instance) in &self.instances {
            let geometry = self.geometries.get(instance.geometry()).ok_or(
                RenderError::GeometryOutOfRange {
                    index: instance.geometry(),
                    len: self.geometries.len(),
                },
            )?;
            geometry.ensure_defined("draw references an undefined geometry")?;
            items.push(DrawItem {
                object: *object,
                instance,
                geometry,
                binding: instance.binding(pass),
            });
        }
        tracing::trace!(count = items.len(), "draw list built");
        Ok(items)
    }

    fn check_geometry_index(
        &self,
        object: ObjectId,
        instance: &InstanceRecord,
    ) -> Result<(), RenderError> {
        let index = instance.geometry();
        if index >= self.geometries.len() {
            tracing::warn!(?object, index, "instance references missing geometry");
            return Err(RenderError::GeometryOutOfRange {
                index,
                len: self.geometries.len(),
            });
        }
        Ok(())
    }
}
