//! Organ state to material mapping.

use aiye_types::{OrganType, Rgb, SymptomState};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationBehavior, SKIN_WHITE_MIX};
use crate::palette::{color_pair, DEFAULT_COLOR, SKIN_POLLUTED, SKIN_POLLUTION_SCORE};
use crate::program::{
    BasicMaterial, LungsUniforms, RenderState, ShaderProgram, SkinUniforms, UniformSpec,
    VeinsUniforms,
};

/// Healthy skin at or above this score keeps whatever material it has.
pub const SKIN_FREEZE_SCORE: f64 = 80.0;

const DEFAULT_OPACITY: f32 = 0.5;

/// Everything a renderer needs to draw one organ in its current state.
///
/// Colors and the animation class are fixed at construction; only the
/// `time` uniform changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualDescriptor {
    program: ShaderProgram,
}

impl Default for VisualDescriptor {
    /// Plain translucent blue, used for meshes nothing has been mapped onto.
    fn default() -> Self {
        Self {
            program: ShaderProgram::Default(BasicMaterial {
                color: Rgb::from_hex(DEFAULT_COLOR),
                opacity: DEFAULT_OPACITY,
            }),
        }
    }
}

impl VisualDescriptor {
    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn behavior(&self) -> AnimationBehavior {
        self.program.kind().behavior()
    }

    pub fn render_state(&self) -> RenderState {
        self.program.render_state()
    }

    pub fn uniform_schema(&self) -> &'static [UniformSpec] {
        self.program.schema()
    }

    /// 1.0 when the organ is inflamed, 0.0 otherwise.
    pub fn inflammation(&self) -> f32 {
        match &self.program {
            ShaderProgram::Lungs(u) => u.inflammation,
            ShaderProgram::Veins(u) => u.inflammation,
            ShaderProgram::Skin(u) => u.inflammation,
            ShaderProgram::Default(_) => 0.0,
        }
    }

    /// Weight given to the healthy color when blending the color pair.
    ///
    /// Linear in the score for Lungs, squared for Veins. Skin and the
    /// default material do not blend by score.
    pub fn blend_weight(&self) -> Option<f32> {
        match &self.program {
            ShaderProgram::Lungs(u) => Some(u.health_score),
            ShaderProgram::Veins(u) => Some(u.health_score * u.health_score),
            ShaderProgram::Skin(_) | ShaderProgram::Default(_) => None,
        }
    }

    /// Base color before any time-dependent term.
    pub fn base_color(&self) -> Rgb {
        match &self.program {
            ShaderProgram::Lungs(u) => u.damage_color.mix(u.primary_color, u.health_score),
            ShaderProgram::Veins(u) => u
                .acidic_color
                .mix(u.healthy_color, u.health_score * u.health_score),
            ShaderProgram::Skin(u) => u.glow_color.mix(u.white_color, SKIN_WHITE_MIX),
            ShaderProgram::Default(m) => m.color,
        }
    }

    pub fn time(&self) -> Option<f32> {
        self.program.time()
    }

    /// Advance the `time` uniform. No-op (returns `false`) for materials
    /// without one.
    pub fn set_time(&mut self, time: f32) -> bool {
        self.program.set_time(time)
    }
}

/// Build the material for an organ in the given state.
///
/// Pure and deterministic: equal inputs give equal descriptors, with `time`
/// starting at zero.
pub fn material_for(
    organ_type: OrganType,
    state: SymptomState,
    health_score: f64,
) -> VisualDescriptor {
    let health = (health_score.clamp(0.0, 100.0) / 100.0) as f32;
    let inflammation = if state == SymptomState::Inflamed { 1.0 } else { 0.0 };
    let colors = color_pair(organ_type, state);

    let program = match organ_type {
        OrganType::Lungs => ShaderProgram::Lungs(LungsUniforms {
            primary_color: colors.primary,
            damage_color: colors.secondary,
            time: 0.0,
            health_score: health,
            inflammation,
        }),
        OrganType::Veins => ShaderProgram::Veins(VeinsUniforms {
            healthy_color: colors.primary,
            acidic_color: colors.secondary,
            time: 0.0,
            health_score: health,
            inflammation,
        }),
        OrganType::Skin => {
            let glow = if state != SymptomState::Inflamed && health_score < SKIN_POLLUTION_SCORE {
                Rgb::from_hex(SKIN_POLLUTED)
            } else {
                colors.primary
            };
            ShaderProgram::Skin(SkinUniforms {
                glow_color: glow,
                white_color: colors.secondary,
                view_vector: [0.0; 3],
                time: 0.0,
                inflammation,
            })
        }
    };

    VisualDescriptor { program }
}

/// Whether the organ's current material must be left untouched.
///
/// Healthy skin keeps its hologram look rather than being re-mapped on
/// every update.
pub fn is_frozen(organ_type: OrganType, state: SymptomState, health_score: f64) -> bool {
    organ_type == OrganType::Skin
        && state == SymptomState::Healthy
        && health_score >= SKIN_FREEZE_SCORE
}
