//! Aiye scene
//!
//! A minimal scene graph for the three organ models and the renderer glue
//! that keeps their materials in step with organ state:
//! - Material assignment with a mesh to organ back-reference
//! - Per-frame `time` uniform updates
//! - Selection highlighting by scale

pub mod graph;
pub mod renderer;

pub use graph::{Mesh, OrganModels, SceneModel, SceneNode};
pub use renderer::{apply_descriptor, SceneRenderer, VisualUpdate, DEFAULT_SELECTION_SCALE};
