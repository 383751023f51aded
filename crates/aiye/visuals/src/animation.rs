//! CPU evaluation of the per-organ animation behaviors.
//!
//! These functions mirror what the GLSL programs do per vertex and per
//! fragment, so a host without a GPU pipeline (or a test) can see how
//! `time` perturbs each organ.

use aiye_types::Rgb;
use serde::{Deserialize, Serialize};

use crate::program::ShaderProgram;

pub const BREATHING_SPEED: f32 = 2.0;
pub const BREATHING_AMPLITUDE: f32 = 0.02;
pub const PULSE_SPEED: f32 = 5.0;
pub const PULSE_AMPLITUDE: f32 = 0.05;
pub const FLICKER_SPEED: f32 = 10.0;
pub const LUNGS_FLICKER_MIX: f32 = 0.6;
pub const VEINS_CORROSION_MIX: f32 = 0.7;
pub const SKIN_FLICKER_MIX: f32 = 0.5;
pub const FLOW_SPEED: f32 = 3.0;
pub const FLOW_AMPLITUDE: f32 = 0.01;
pub const FLOW_SHADING_SPEED: f32 = 2.0;
pub const SKIN_WHITE_MIX: f32 = 0.1;
pub const GRID_SIZE: f32 = 5.0;
pub const GRID_LINE_WIDTH: f32 = 0.15;

const SKIN_EMBER: u32 = 0xFF6600;

/// The kind of motion a program produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationBehavior {
    /// Displacement along the surface normal.
    Breathing,
    /// Travelling wave across the vessel axis.
    Flow,
    /// No displacement, grid and rim glow.
    Hologram,
    /// Nothing moves.
    Static,
}

/// Color and opacity of one fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub color: Rgb,
    pub alpha: f32,
}

/// Vertex offset the program applies at `position` with surface `normal`.
pub fn displacement(program: &ShaderProgram, position: [f32; 3], normal: [f32; 3]) -> [f32; 3] {
    match program {
        ShaderProgram::Lungs(u) => {
            let mut amount =
                (u.time * BREATHING_SPEED).sin() * BREATHING_AMPLITUDE * (1.0 - u.inflammation);
            if u.inflammation > 0.5 {
                amount += (u.time * PULSE_SPEED).sin() * PULSE_AMPLITUDE * u.inflammation;
            }
            [normal[0] * amount, normal[1] * amount, normal[2] * amount]
        }
        ShaderProgram::Veins(u) => {
            let wave = (position[1] * 2.0 - u.time * FLOW_SPEED).sin() * FLOW_AMPLITUDE;
            [wave, 0.0, 0.0]
        }
        ShaderProgram::Skin(_) | ShaderProgram::Default(_) => [0.0; 3],
    }
}

/// Fragment color at `position`, given the rim (fresnel) term computed by
/// the vertex stage.
pub fn shade(program: &ShaderProgram, position: [f32; 3], rim: f32) -> Shade {
    match program {
        ShaderProgram::Lungs(u) => {
            let scar = smoothstep(
                u.health_score,
                u.health_score + 0.3,
                hash(position[0], position[1], 12.9898, 78.233, 43758.5453),
            );
            let mut color = u.damage_color.mix(u.primary_color, u.health_score);
            if u.inflammation > 0.5 {
                let flicker = (u.time * FLICKER_SPEED + position[0] * 5.0).sin() * 0.5 + 0.5;
                color = color.mix(u.damage_color, flicker * LUNGS_FLICKER_MIX);
            }
            Shade {
                color: color.add(u.primary_color.scale(rim * 0.5)),
                alpha: 0.3 + rim * 0.6 + scar * 0.2,
            }
        }
        ShaderProgram::Veins(u) => {
            let flow = (position[1] * 3.0 - u.time * FLOW_SHADING_SPEED).sin() * 0.5 + 0.5;
            let mut color = u
                .acidic_color
                .mix(u.healthy_color, u.health_score * u.health_score);
            if u.inflammation > 0.5 {
                let corrosion = hash(position[0], position[2], 12.9, 78.2, 43758.5);
                color = color.mix(u.acidic_color, corrosion * VEINS_CORROSION_MIX);
            }
            Shade {
                color: color.scale(0.7 + flow * 0.3),
                alpha: 0.3 + flow * 0.4,
            }
        }
        ShaderProgram::Skin(u) => {
            let grid = grid_strength(position);
            let mut tint = u.glow_color.mix(u.white_color, SKIN_WHITE_MIX);
            if u.inflammation > 0.5 {
                let flicker = (u.time * FLICKER_SPEED + position[1] * 5.0).sin() * 0.5 + 0.5;
                tint = tint.mix(Rgb::from_hex(SKIN_EMBER), flicker * SKIN_FLICKER_MIX);
            }
            Shade {
                color: tint.scale(rim * 1.2 + grid),
                alpha: rim * 0.3 + grid * 0.5,
            }
        }
        ShaderProgram::Default(m) => Shade {
            color: m.color,
            alpha: m.opacity,
        },
    }
}

/// Grid line strength in [0, 1].
///
/// The GPU version divides by `fwidth`; here the line width is taken in
/// world units instead.
fn grid_strength(position: [f32; 3]) -> f32 {
    let nearest = position
        .iter()
        .map(|p| ((p / GRID_SIZE - 0.5).rem_euclid(1.0) - 0.5).abs() * GRID_SIZE)
        .fold(f32::INFINITY, f32::min);
    1.0 - (nearest / GRID_LINE_WIDTH).min(1.0)
}

fn hash(x: f32, y: f32, kx: f32, ky: f32, scale: f32) -> f32 {
    let v = (x * kx + y * ky).sin() * scale;
    v - v.floor()
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
