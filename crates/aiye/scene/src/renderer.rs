//! Renderer integration: materials, animation time and highlighting.

use aiye_types::{OrganRecord, OrganType};
use aiye_visuals::{is_frozen, material_for, VisualDescriptor};
use parking_lot::Mutex;
use tracing::debug;

use crate::graph::{OrganModels, SceneModel};

/// Scale factor applied to the selected organ.
pub const DEFAULT_SELECTION_SCALE: f32 = 1.1;

/// What [`SceneRenderer::update_organ_visuals`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualUpdate {
    /// A fresh descriptor was applied.
    Applied,
    /// Healthy skin; the existing material was kept.
    Frozen,
    /// No model is bound to the organ's type.
    NoModel,
}

/// Assign `descriptor` to every mesh under `model` and point each mesh
/// back at `organ`.
pub fn apply_descriptor(model: &mut SceneModel, descriptor: &VisualDescriptor, organ: &OrganRecord) {
    model.root_mut().traverse_meshes_mut(&mut |mesh| {
        mesh.material = *descriptor;
        mesh.organ = Some(organ.clone());
    });
}

/// Owns the organ models and applies visual state to them.
///
/// Shared between the synchronizer (material updates, highlight) and the
/// host's render loop (`advance`); each call holds the lock only for its
/// own synchronous work.
pub struct SceneRenderer {
    models: Mutex<OrganModels>,
    selection_scale: f32,
}

impl SceneRenderer {
    pub fn new(models: OrganModels) -> Self {
        Self::with_selection_scale(models, DEFAULT_SELECTION_SCALE)
    }

    pub fn with_selection_scale(models: OrganModels, selection_scale: f32) -> Self {
        Self {
            models: Mutex::new(models),
            selection_scale,
        }
    }

    /// Re-map the organ's material from its current state.
    ///
    /// Healthy skin at or above the freeze score keeps whatever it had.
    pub fn update_organ_visuals(&self, organ: &OrganRecord) -> VisualUpdate {
        let mut models = self.models.lock();
        let Some(model) = models.get_mut(organ.organ_type) else {
            return VisualUpdate::NoModel;
        };

        if is_frozen(organ.organ_type, organ.symptom_state, organ.health_score) {
            debug!(organ_id = %organ.id, "Keeping healthy skin material");
            return VisualUpdate::Frozen;
        }

        let descriptor = material_for(organ.organ_type, organ.symptom_state, organ.health_score);
        apply_descriptor(model, &descriptor, organ);
        debug!(
            organ_id = %organ.id,
            organ_type = %organ.organ_type,
            behavior = ?descriptor.behavior(),
            "Applied organ material"
        );
        VisualUpdate::Applied
    }

    /// Write `time` into every mesh material of the given organs' models.
    /// Materials without a time uniform are skipped.
    pub fn advance(&self, live: impl IntoIterator<Item = OrganType>, time: f32) {
        let mut models = self.models.lock();
        for organ_type in live {
            if let Some(model) = models.get_mut(organ_type) {
                model.root_mut().traverse_meshes_mut(&mut |mesh| {
                    mesh.material.set_time(time);
                });
            }
        }
    }

    /// Enlarge the model of `organ_type` and return every other model to
    /// its original scale.
    ///
    /// The original scale is captured the first time a model is
    /// highlighted and never overwritten, so repeated calls do not compound.
    pub fn highlight(&self, organ_type: OrganType) {
        let mut models = self.models.lock();

        for (_, model) in models.iter_mut() {
            if let Some(original) = model.original_scale() {
                model.set_scale(original);
            }
        }

        if let Some(model) = models.get_mut(organ_type) {
            let original = model.remember_original_scale();
            model.set_scale(original * self.selection_scale);
        }
    }

    /// Organ rendered by the named mesh of the named model.
    pub fn pick(&self, model_key: &str, mesh_name: &str) -> Option<OrganRecord> {
        let models = self.models.lock();
        let organ = models
            .iter()
            .find(|(_, model)| model.key() == model_key)
            .and_then(|(_, model)| model.find_mesh(mesh_name))
            .and_then(|mesh| mesh.organ.clone());
        organ
    }

    pub fn scale_of(&self, organ_type: OrganType) -> Option<f32> {
        self.models.lock().get(organ_type).map(SceneModel::scale)
    }

    /// Material of the first mesh of the organ's model.
    pub fn descriptor_of(&self, organ_type: OrganType) -> Option<VisualDescriptor> {
        let models = self.models.lock();
        let model = models.get(organ_type)?;
        let first = model.meshes().first().map(|mesh| mesh.material);
        first
    }

    /// Run `f` against the organ's model while holding the scene lock.
    pub fn with_model<R>(&self, organ_type: OrganType, f: impl FnOnce(&SceneModel) -> R) -> Option<R> {
        self.models.lock().get(organ_type).map(f)
    }
}
