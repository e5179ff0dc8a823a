use bevy::prelude::*;

/// The two poses the scene morphs between.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TreeState {
    Scattered,
    #[default]
    Assembled,
}

impl TreeState {
    /// Progress target this state drives toward.
    pub fn target(self) -> f32 {
        match self {
            TreeState::Scattered => 0.0,
            TreeState::Assembled => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TreeState::Scattered => TreeState::Assembled,
            TreeState::Assembled => TreeState::Scattered,
        }
    }
}

/// Fired by the UI (button click or Space) to flip the morph direction.
#[derive(Event, Default)]
pub struct ToggleEvent;

/// Closed set of instanced ornament families. Each variant carries its own
/// placement, coloring and per-frame rules.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum OrnamentKind {
    Gift,
    Bauble,
    CandyCane,
    Bow,
    Star,
    Light,
}

/// Static per-instance data: the two endpoint poses plus the attributes that
/// never change after generation. Built once per group; read-only afterwards.
#[derive(Clone, Debug)]
pub struct DualPosition {
    pub scatter_pos: Vec3,
    pub tree_pos: Vec3,
    /// Target orientation once assembled, Euler XYZ.
    pub rotation: Vec3,
    pub scale: f32,
    pub color: Color,
    /// Per-instance bobbing rate, strictly positive.
    pub float_speed: f32,
    /// Bobbing phase offset in [0, 2pi).
    pub float_phase: f32,
}

// Audio resources
#[derive(Resource)]
pub struct SceneAudio {
    pub toggle_sfx: Handle<AudioSource>,
}
