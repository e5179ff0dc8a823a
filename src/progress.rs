//! The single animation driver for the whole scene.
//!
//! One damped scalar chases the toggle target, a direction-dependent easing
//! curve reshapes it, and the rate of change of the eased value feeds the
//! spin physics of every consumer. Everything downstream (ornaments, ribbon,
//! foliage shader) only ever reads this resource.

use bevy::prelude::*;

use crate::constants::{ASSEMBLE_RATE, SCATTER_RATE};
use crate::sampling::{damp, ease_in_out_back, ease_in_out_cubic};
use crate::types::{ToggleEvent, TreeState};

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MorphProgress>()
            .add_event::<ToggleEvent>()
            .add_systems(Update, (handle_toggle, advance_progress).chain());
    }
}

/// Continuous morph state. `linear` is the damped progress in [0, 1];
/// `eased` is the reshaped value consumers interpolate with, and it may
/// overshoot outside [0, 1] while scattering. `velocity` is the absolute
/// rate of change of `eased`, in units per second.
#[derive(Resource, Debug)]
pub struct MorphProgress {
    pub state: TreeState,
    pub linear: f32,
    pub eased: f32,
    pub velocity: f32,
}

impl Default for MorphProgress {
    fn default() -> Self {
        // The scene opens fully assembled.
        Self {
            state: TreeState::Assembled,
            linear: 1.0,
            eased: 1.0,
            velocity: 0.0,
        }
    }
}

impl MorphProgress {
    /// Advance the morph by one frame. Kept free of any ECS access so the
    /// transition behavior can be driven directly in tests.
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        // Assembly damps gently; scattering snaps. The asymmetry is what
        // makes the explosion read as violent and the rebuild as graceful.
        let rate = match self.state {
            TreeState::Assembled => ASSEMBLE_RATE,
            TreeState::Scattered => SCATTER_RATE,
        };
        self.linear = damp(self.linear, self.state.target(), rate, dt);

        let next_eased = match self.state {
            TreeState::Assembled => ease_in_out_cubic(self.linear),
            TreeState::Scattered => ease_in_out_back(self.linear),
        };

        self.velocity = (next_eased - self.eased).abs() / dt;
        self.eased = next_eased;
    }
}

pub fn handle_toggle(
    mut events: EventReader<ToggleEvent>,
    mut progress: ResMut<MorphProgress>,
) {
    for _ in events.read() {
        progress.state = progress.state.toggled();
        info!("🎄 Morph target flipped: {:?}", progress.state);
    }
}

pub fn advance_progress(time: Res<Time>, mut progress: ResMut<MorphProgress>) {
    progress.advance(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(progress: &mut MorphProgress, seconds: f32) {
        let steps = (seconds / DT) as usize;
        for _ in 0..steps {
            progress.advance(DT);
        }
    }

    #[test]
    fn test_linear_stays_bounded_under_toggling() {
        let mut progress = MorphProgress::default();
        // Flip direction at awkward mid-flight moments.
        for i in 0..8 {
            run(&mut progress, 0.1 + i as f32 * 0.23);
            assert!(progress.linear >= 0.0 && progress.linear <= 1.0);
            progress.state = progress.state.toggled();
        }
        for _ in 0..2_000 {
            progress.advance(DT);
            assert!(
                progress.linear >= 0.0 && progress.linear <= 1.0,
                "linear escaped: {}",
                progress.linear
            );
        }
    }

    #[test]
    fn test_eased_overshoots_only_while_scattering() {
        let mut progress = MorphProgress::default();
        progress.state = TreeState::Scattered;

        let mut overshot = false;
        for _ in 0..600 {
            progress.advance(DT);
            if progress.eased < 0.0 || progress.eased > 1.0 {
                overshot = true;
            }
        }
        assert!(overshot, "back ease never left [0, 1] during scatter");

        // Assembling from rest only ever produces in-range values.
        progress.state = TreeState::Assembled;
        for _ in 0..2_000 {
            progress.advance(DT);
            assert!(progress.eased >= 0.0 && progress.eased <= 1.0);
        }
    }

    #[test]
    fn test_round_trip_reconverges() {
        let mut progress = MorphProgress::default();

        progress.state = TreeState::Scattered;
        run(&mut progress, 5.0);
        assert!(progress.linear < 0.01);

        progress.state = TreeState::Assembled;
        run(&mut progress, 12.0);
        assert!(progress.linear > 0.999, "linear {}", progress.linear);
        assert!((progress.eased - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_velocity_is_nonnegative_speed() {
        let mut progress = MorphProgress::default();
        progress.state = TreeState::Scattered;
        let mut peak: f32 = 0.0;
        for _ in 0..600 {
            progress.advance(DT);
            assert!(progress.velocity >= 0.0);
            peak = peak.max(progress.velocity);
        }
        // A full scatter has to move, so the finite difference must spike.
        assert!(peak > 0.5, "peak velocity {}", peak);
    }

    #[test]
    fn test_zero_dt_is_a_no_op() {
        let mut progress = MorphProgress::default();
        progress.state = TreeState::Scattered;
        progress.advance(0.0);
        assert_eq!(progress.linear, 1.0);
        assert_eq!(progress.eased, 1.0);
    }
}
