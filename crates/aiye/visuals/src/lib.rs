//! Aiye visual mapper
//!
//! Maps an organ's `(type, symptom state, health score)` to a renderable
//! material description. Each organ type owns its own shader program and
//! animation behavior:
//! - Lungs breathe (normal displacement, pulsing when inflamed)
//! - Veins flow (directional displacement along the vessel axis)
//! - Skin glows (holographic grid with a fresnel rim)
//!
//! The mapper is pure. Time is a uniform carried by each descriptor and is
//! advanced by the renderer, never by this crate.

pub mod animation;
pub mod mapper;
pub mod palette;
pub mod program;

pub use animation::{AnimationBehavior, Shade};
pub use mapper::{is_frozen, material_for, VisualDescriptor, SKIN_FREEZE_SCORE};
pub use palette::{color_pair, ColorPair};
pub use program::{
    BasicMaterial, Blending, LungsUniforms, ProgramKind, RenderState, ShaderProgram,
    ShaderSources, SkinUniforms, UniformKind, UniformSpec, UniformValue, VeinsUniforms,
};
