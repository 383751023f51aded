//! Typed shader programs and their uniform schemas.
//!
//! Each organ type has a program pair (vertex + fragment). The uniforms a
//! program consumes are described as data so a host renderer can bind them
//! without knowing which organ it is drawing.

use aiye_types::Rgb;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationBehavior;

const LUNGS_VERT: &str = include_str!("shaders/lungs.vert");
const LUNGS_FRAG: &str = include_str!("shaders/lungs.frag");
const VEINS_VERT: &str = include_str!("shaders/veins.vert");
const VEINS_FRAG: &str = include_str!("shaders/veins.frag");
const SKIN_VERT: &str = include_str!("shaders/skin.vert");
const SKIN_FRAG: &str = include_str!("shaders/skin.frag");

/// GLSL type of a uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniformKind {
    Float,
    Vec3,
}

/// Name and type of one uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSpec {
    pub name: &'static str,
    pub kind: UniformKind,
}

const fn float(name: &'static str) -> UniformSpec {
    UniformSpec {
        name,
        kind: UniformKind::Float,
    }
}

const fn vec3(name: &'static str) -> UniformSpec {
    UniformSpec {
        name,
        kind: UniformKind::Vec3,
    }
}

const LUNGS_SCHEMA: &[UniformSpec] = &[
    vec3("primaryColor"),
    vec3("damageColor"),
    float("time"),
    float("healthScore"),
    float("inflammation"),
];

const VEINS_SCHEMA: &[UniformSpec] = &[
    vec3("healthyColor"),
    vec3("acidicColor"),
    float("time"),
    float("healthScore"),
    float("inflammation"),
];

const SKIN_SCHEMA: &[UniformSpec] = &[
    vec3("glowColor"),
    vec3("whiteColor"),
    vec3("viewVector"),
    float("time"),
    float("inflammation"),
];

/// A uniform value ready for upload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UniformValue {
    Float(f32),
    Vec3([f32; 3]),
}

/// Uniforms of the breathing lungs program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LungsUniforms {
    pub primary_color: Rgb,
    pub damage_color: Rgb,
    pub time: f32,
    /// Normalized to [0, 1].
    pub health_score: f32,
    /// 1.0 when inflamed, 0.0 otherwise.
    pub inflammation: f32,
}

/// Uniforms of the flowing veins program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VeinsUniforms {
    pub healthy_color: Rgb,
    pub acidic_color: Rgb,
    pub time: f32,
    /// Normalized to [0, 1]; the fragment stage squares it.
    pub health_score: f32,
    pub inflammation: f32,
}

/// Uniforms of the holographic skin program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkinUniforms {
    pub glow_color: Rgb,
    pub white_color: Rgb,
    /// Camera direction, written by the host each frame if it wants a
    /// view-dependent rim.
    pub view_vector: [f32; 3],
    pub time: f32,
    pub inflammation: f32,
}

/// Plain unlit material used before any organ data arrives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicMaterial {
    pub color: Rgb,
    pub opacity: f32,
}

/// Which program a material runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramKind {
    Lungs,
    Veins,
    Skin,
    Default,
}

impl ProgramKind {
    pub fn behavior(self) -> AnimationBehavior {
        match self {
            ProgramKind::Lungs => AnimationBehavior::Breathing,
            ProgramKind::Veins => AnimationBehavior::Flow,
            ProgramKind::Skin => AnimationBehavior::Hologram,
            ProgramKind::Default => AnimationBehavior::Static,
        }
    }
}

/// Vertex and fragment sources of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// Blend equation for the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Blending {
    Normal,
    Additive,
}

/// Fixed pipeline state a host applies alongside the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderState {
    pub double_sided: bool,
    pub blending: Blending,
    pub transparent: bool,
    pub depth_write: bool,
}

impl RenderState {
    /// Glowing translucent organ shells.
    pub const ADDITIVE_SHELL: RenderState = RenderState {
        double_sided: true,
        blending: Blending::Additive,
        transparent: true,
        depth_write: false,
    };

    pub const BASIC_TRANSPARENT: RenderState = RenderState {
        double_sided: false,
        blending: Blending::Normal,
        transparent: true,
        depth_write: true,
    };
}

/// A shader program together with its current uniform values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "program", rename_all = "lowercase")]
pub enum ShaderProgram {
    Lungs(LungsUniforms),
    Veins(VeinsUniforms),
    Skin(SkinUniforms),
    Default(BasicMaterial),
}

impl ShaderProgram {
    pub fn kind(&self) -> ProgramKind {
        match self {
            ShaderProgram::Lungs(_) => ProgramKind::Lungs,
            ShaderProgram::Veins(_) => ProgramKind::Veins,
            ShaderProgram::Skin(_) => ProgramKind::Skin,
            ShaderProgram::Default(_) => ProgramKind::Default,
        }
    }

    /// Uniforms the program declares. Empty for the default material.
    pub fn schema(&self) -> &'static [UniformSpec] {
        match self {
            ShaderProgram::Lungs(_) => LUNGS_SCHEMA,
            ShaderProgram::Veins(_) => VEINS_SCHEMA,
            ShaderProgram::Skin(_) => SKIN_SCHEMA,
            ShaderProgram::Default(_) => &[],
        }
    }

    /// Current uniform values, in schema order.
    pub fn uniforms(&self) -> Vec<(&'static str, UniformValue)> {
        use UniformValue::{Float, Vec3};

        match self {
            ShaderProgram::Lungs(u) => vec![
                ("primaryColor", Vec3(u.primary_color.to_array())),
                ("damageColor", Vec3(u.damage_color.to_array())),
                ("time", Float(u.time)),
                ("healthScore", Float(u.health_score)),
                ("inflammation", Float(u.inflammation)),
            ],
            ShaderProgram::Veins(u) => vec![
                ("healthyColor", Vec3(u.healthy_color.to_array())),
                ("acidicColor", Vec3(u.acidic_color.to_array())),
                ("time", Float(u.time)),
                ("healthScore", Float(u.health_score)),
                ("inflammation", Float(u.inflammation)),
            ],
            ShaderProgram::Skin(u) => vec![
                ("glowColor", Vec3(u.glow_color.to_array())),
                ("whiteColor", Vec3(u.white_color.to_array())),
                ("viewVector", Vec3(u.view_vector)),
                ("time", Float(u.time)),
                ("inflammation", Float(u.inflammation)),
            ],
            ShaderProgram::Default(_) => Vec::new(),
        }
    }

    /// Value of the `time` uniform, if the program has one.
    pub fn time(&self) -> Option<f32> {
        match self {
            ShaderProgram::Lungs(u) => Some(u.time),
            ShaderProgram::Veins(u) => Some(u.time),
            ShaderProgram::Skin(u) => Some(u.time),
            ShaderProgram::Default(_) => None,
        }
    }

    /// Write the `time` uniform. Returns `false` when the program has none.
    pub fn set_time(&mut self, time: f32) -> bool {
        match self {
            ShaderProgram::Lungs(u) => u.time = time,
            ShaderProgram::Veins(u) => u.time = time,
            ShaderProgram::Skin(u) => u.time = time,
            ShaderProgram::Default(_) => return false,
        }
        true
    }

    /// GLSL sources. The default material is a fixed-function one.
    pub fn sources(&self) -> Option<ShaderSources> {
        match self {
            ShaderProgram::Lungs(_) => Some(ShaderSources {
                vertex: LUNGS_VERT,
                fragment: LUNGS_FRAG,
            }),
            ShaderProgram::Veins(_) => Some(ShaderSources {
                vertex: VEINS_VERT,
                fragment: VEINS_FRAG,
            }),
            ShaderProgram::Skin(_) => Some(ShaderSources {
                vertex: SKIN_VERT,
                fragment: SKIN_FRAG,
            }),
            ShaderProgram::Default(_) => None,
        }
    }

    pub fn render_state(&self) -> RenderState {
        match self {
            ShaderProgram::Default(_) => RenderState::BASIC_TRANSPARENT,
            _ => RenderState::ADDITIVE_SHELL,
        }
    }
}
