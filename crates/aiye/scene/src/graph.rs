//! Scene graph types.

use std::collections::BTreeMap;

use aiye_types::{OrganRecord, OrganType};
use aiye_visuals::VisualDescriptor;

/// A drawable mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub material: VisualDescriptor,
    /// Organ this mesh currently renders, for picking and inspection.
    pub organ: Option<OrganRecord>,
}

impl Mesh {
    /// A mesh with the default material and no organ attached.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            material: VisualDescriptor::default(),
            organ: None,
        }
    }
}

/// A node in a model's hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Group {
        name: String,
        children: Vec<SceneNode>,
    },
    Mesh(Mesh),
}

impl SceneNode {
    pub fn group(name: impl Into<String>, children: Vec<SceneNode>) -> Self {
        SceneNode::Group {
            name: name.into(),
            children,
        }
    }

    pub fn mesh(name: impl Into<String>) -> Self {
        SceneNode::Mesh(Mesh::new(name))
    }

    /// Visit every mesh in the subtree, depth first.
    pub fn traverse_meshes(&self, f: &mut impl FnMut(&Mesh)) {
        match self {
            SceneNode::Group { children, .. } => {
                for child in children {
                    child.traverse_meshes(f);
                }
            }
            SceneNode::Mesh(mesh) => f(mesh),
        }
    }

    /// Mutable variant of [`SceneNode::traverse_meshes`].
    pub fn traverse_meshes_mut(&mut self, f: &mut impl FnMut(&mut Mesh)) {
        match self {
            SceneNode::Group { children, .. } => {
                for child in children {
                    child.traverse_meshes_mut(f);
                }
            }
            SceneNode::Mesh(mesh) => f(mesh),
        }
    }
}

/// One loaded 3D model. The renderer only touches its materials and its
/// uniform scale, never its geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneModel {
    key: String,
    scale: f32,
    original_scale: Option<f32>,
    root: SceneNode,
}

impl SceneModel {
    pub fn new(key: impl Into<String>, root: SceneNode) -> Self {
        Self {
            key: key.into(),
            scale: 1.0,
            original_scale: None,
            root,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Scale recorded the first time this model was highlighted.
    pub fn original_scale(&self) -> Option<f32> {
        self.original_scale
    }

    /// Record the current scale as the original one, unless already set.
    pub fn remember_original_scale(&mut self) -> f32 {
        *self.original_scale.get_or_insert(self.scale)
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SceneNode {
        &mut self.root
    }

    pub fn meshes(&self) -> Vec<&Mesh> {
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    pub fn find_mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes().into_iter().find(|m| m.name == name)
    }
}

fn collect<'a>(node: &'a SceneNode, out: &mut Vec<&'a Mesh>) {
    match node {
        SceneNode::Group { children, .. } => {
            for child in children {
                collect(child, out);
            }
        }
        SceneNode::Mesh(mesh) => out.push(mesh),
    }
}

/// The organ models present in the scene, at most one per organ type.
#[derive(Debug, Clone, Default)]
pub struct OrganModels {
    models: BTreeMap<OrganType, SceneModel>,
}

impl OrganModels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, organ_type: OrganType, model: SceneModel) -> Self {
        self.models.insert(organ_type, model);
        self
    }

    pub fn insert(&mut self, organ_type: OrganType, model: SceneModel) -> Option<SceneModel> {
        self.models.insert(organ_type, model)
    }

    pub fn get(&self, organ_type: OrganType) -> Option<&SceneModel> {
        self.models.get(&organ_type)
    }

    pub fn get_mut(&mut self, organ_type: OrganType) -> Option<&mut SceneModel> {
        self.models.get_mut(&organ_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OrganType, &SceneModel)> {
        self.models.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&OrganType, &mut SceneModel)> {
        self.models.iter_mut()
    }

    /// Placeholder models (a group with two meshes) for every organ type,
    /// keyed by [`OrganType::model_key`]. Used when no real assets are loaded.
    pub fn placeholders() -> Self {
        OrganType::ALL
            .into_iter()
            .fold(Self::new(), |models, organ_type| {
                let key = organ_type.model_key();
                let root = SceneNode::group(
                    key,
                    vec![
                        SceneNode::mesh(format!("{key}-outer")),
                        SceneNode::mesh(format!("{key}-inner")),
                    ],
                );
                models.with(organ_type, SceneModel::new(key, root))
            })
    }
}
