use bevy::prelude::Color;

// Tree silhouette (shared by foliage, ornament placement and the ribbon)
pub const TREE_HEIGHT: f32 = 14.0;
pub const TREE_RADIUS: f32 = 5.0;

// Scatter cloud radii (the explosion cloud is biased toward the camera)
pub const ORNAMENT_SCATTER_RADIUS: f32 = 25.0;
pub const FOLIAGE_SCATTER_RADIUS: f32 = 30.0; // wider spread for the dense point cloud

// Instance counts
pub const FOLIAGE_COUNT: usize = 12_000;
pub const BAUBLE_COUNT: usize = 120;
pub const GIFT_COUNT: usize = 80;
pub const CANDY_CANE_COUNT: usize = 25;
pub const BOW_COUNT: usize = 36;
pub const LIGHT_COUNT: usize = 300;

// ===== MORPH PROGRESS =====

/// Damping rate while assembling (slow, graceful landing).
pub const ASSEMBLE_RATE: f32 = 1.0;
/// Damping rate while scattering (fast, violent burst).
pub const SCATTER_RATE: f32 = 3.0;

// ===== INSTANCE CHOREOGRAPHY =====

pub const FLOAT_AMPLITUDE: f32 = 0.5;      // vertical bobbing amplitude
pub const BASE_FLOAT_SPEED: f32 = 0.5;     // idle spin rate, rad/s
pub const SPIN_FACTOR: f32 = 15.0;         // extra spin per unit of transition velocity
pub const ALIGN_EXPONENT: i32 = 4;         // alignment weight = progress^4, snaps in late

// Star choreography. Thresholds are visual tuning; all driven by the
// progress scalar so the sequence reverses cleanly.
pub const STAR_RISE_START: f32 = 0.7;      // below this the star hides at the origin
pub const STAR_SCALE_END: f32 = 0.9;       // scale-up finishes here
pub const STAR_SPIN_START: f32 = 0.8;      // slow spin once mostly risen
pub const STAR_HOVER_START: f32 = 0.99;    // hover bob only when fully settled
pub const STAR_SPIN_SPEED: f32 = 0.5;      // rad/s
pub const STAR_HOVER_FREQ: f32 = 2.0;
pub const STAR_HOVER_AMPLITUDE: f32 = 0.1;
pub const STAR_APEX_Y: f32 = TREE_HEIGHT / 2.0 + 0.5;

// ===== WRAPPING RIBBON =====

pub const RIBBON_TURNS: f32 = 3.5;
pub const RIBBON_BASE_RADIUS: f32 = 6.0;   // slightly outside the foliage
pub const RIBBON_TIP_RADIUS: f32 = 0.5;
pub const RIBBON_WIDTH: f32 = 0.15;
pub const RIBBON_THICKNESS: f32 = 0.02;
pub const RIBBON_SPINE_STEPS: usize = 400;

// Scattered pose: large, lifted, right in front of the camera so it reads
// as flying in through the screen.
pub const RIBBON_SCATTER_SCALE: f32 = 4.0;
pub const RIBBON_SCATTER_Y: f32 = 10.0;
pub const RIBBON_SCATTER_Z: f32 = 25.0;
pub const RIBBON_DRIFT_SPEED: f32 = 0.05;  // residual spin when settled, rad/s

// ===== ORBIT CAMERA =====

pub const CAMERA_START_DISTANCE: f32 = 35.0;
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_MIN_DISTANCE: f32 = 10.0;
pub const CAMERA_MAX_DISTANCE: f32 = 50.0;
pub const CAMERA_ROTATION_SPEED: f32 = 0.005;
pub const CAMERA_ZOOM_SPEED: f32 = 2.0;
/// Pitch limits matching a polar clamp of [60, 100] degrees from straight up.
pub const CAMERA_PITCH_MIN: f32 = -0.524;
pub const CAMERA_PITCH_MAX: f32 = 0.175;
/// Slow showcase rotation, only while the tree is assembled.
pub const AUTO_ROTATE_SPEED: f32 = 0.05;

// ===== AUDIO =====

pub const VOLUME_TOGGLE_SFX: f32 = 0.5;

// ===== PALETTE =====

pub const EMERALD_DEEP: Color = Color::srgb(0.0, 0.141, 0.106);    // #00241B
pub const GOLD_METALLIC: Color = Color::srgb(0.831, 0.686, 0.216); // #D4AF37
pub const GOLD_BRIGHT: Color = Color::srgb(1.0, 0.843, 0.0);       // #FFD700
pub const RED_VELVET: Color = Color::srgb(0.545, 0.0, 0.0);        // #8B0000
pub const SILVER_MIST: Color = Color::srgb(0.753, 0.753, 0.753);   // #C0C0C0
pub const WHITE_GLOW: Color = Color::srgb(1.0, 0.992, 0.816);      // #FFFDD0
pub const CANDY_RED: Color = Color::srgb(0.831, 0.0, 0.0);         // #D40000
pub const CANDY_WHITE: Color = Color::srgb(1.0, 1.0, 1.0);
pub const RIBBON_RED: Color = Color::srgb(0.769, 0.118, 0.227);    // #C41E3A

pub const BACKGROUND: Color = Color::srgb(0.0, 0.020, 0.016);      // #000504
pub const AMBIENT_TINT: Color = Color::srgb(0.0, 0.102, 0.078);    // #001A14
pub const SPOT_WARM_WHITE: Color = Color::srgb(1.0, 0.980, 0.929); // #FFFAED
