pub const WINDOW_TITLE: &str = "homebound";

/// Duration of one reference frame, all per-frame factors are expressed against it
pub const FRAME_MS: f32 = 1000.0 / 60.0;
pub const MAX_FRAME_MS: f32 = 100.0;

/// Height the pixel constants below were tuned for
pub const REFERENCE_HEIGHT: f32 = 1080.0;

pub const STAR_COUNT: usize = 260;
pub const STAR_SEED: u64 = 2025;

pub const INTRO_IDLE_MS: f32 = 1800.0;
pub const INTRO_LIFT_MS: f32 = 10000.0;
pub const INTRO_IDLE_SHAKE: f32 = 3.0;
pub const INTRO_LIFT_SHAKE_FROM: f32 = 6.0;
pub const INTRO_LIFT_SHAKE_TO: f32 = 1.0;
pub const INTRO_GROUND_DROP: f32 = 0.9;
pub const INTRO_EXTRA_SHAKE_GAIN: f32 = 1.8;

pub const HIT_DELAY_MIN_MS: f32 = 3600.0;
pub const HIT_DELAY_MAX_MS: f32 = 6200.0;
pub const HIT_IMPACT_MS: f32 = 650.0;
pub const HIT_TUMBLE_MS: f32 = 2800.0;
pub const HIT_RECOVER_MS: f32 = 1200.0;
pub const HIT_SPIN_DEG_PER_SEC: f32 = 520.0;
pub const HIT_SPIN_DAMP: f32 = 0.72;
pub const HIT_RECOVER_DAMP_GAIN: f32 = 0.6;
pub const HIT_FLING_PX: f32 = 0.010;
pub const HIT_FLING_FALLBACK: f32 = 0.2;
pub const PRE_TURBULENCE_MS: f32 = 1600.0;
pub const PRE_TURBULENCE_PX: f32 = 10.0;
pub const PRE_TURBULENCE_TILT_DEG: f32 = 6.0;

pub const COLLISION_DURATION_MS: f32 = 6000.0;
pub const COLLISION_COOLDOWN_MS: f32 = 4000.0;
pub const COLLISION_SHAKE: f32 = 30.0;
pub const COLLISION_SHAKE_EXP: f32 = 2.2;
pub const COLLISION_FLASH_HZ: f32 = 3.5;
pub const COLLISION_MAX_TILT_DEG: f32 = 3.0;
pub const COLLISION_NEAR_DZ: f32 = 60.0;
pub const COLLISION_FAR_DZ: f32 = 260.0;
pub const RED_ALERT_COLOR: [u8; 3] = [255, 30, 30];

pub const RELIGHT_FLASH_MS: f32 = 220.0;
pub const RELIGHT_FADE_MS: f32 = 1200.0;
pub const RELIGHT_FLICKER_HZ: f32 = 13.0;
pub const RELIGHT_FLICKER_AMP: f32 = 0.28;
pub const RELIGHT_BASE_ALPHA: f32 = 210.0;
pub const BLACKOUT_ALPHA: f32 = 240.0;
pub const BLACKOUT_BREATH: f32 = 0.04;

pub const ARRIVAL_APPROACH_DISTANCE: f32 = 2600.0;
pub const ARRIVAL_SPIN_INHERIT: f32 = 0.9;
pub const ARRIVAL_SPIN_DAMP: f32 = 0.92;
pub const ARRIVAL_STARS_ONLY_MS: f32 = 5000.0;
pub const ARRIVAL_REVEAL_MS: f32 = 1800.0;
pub const ARRIVAL_MIN_STEP: f32 = 0.6;
pub const ARRIVAL_APPROACH_RATE: f32 = 0.04;
pub const CAMERA_YAW_START_DEG: f32 = 90.0;
pub const CAMERA_YAW_END_DEG: f32 = 0.0;
pub const CAMERA_TURN_MS: f32 = 2200.0;
pub const CAMERA_MAX_SHIFT: f32 = 1.25;

pub const SCAN_DURATION_MS: f32 = 5000.0;
pub const SCAN_RESULT_MS: f32 = 1800.0;
pub const SCAN_TURNS: f32 = 2.0;

pub const LOCK_MAX_AHEAD: f32 = 1100.0;
pub const LOCK_MIN_SIZE: f32 = 10.0;
pub const LOCK_HYSTERESIS_MS: f32 = 450.0;
pub const LOCK_FADE_MS: f32 = 220.0;
pub const LOCK_INNER_PULSE_MS: f32 = 900.0;

pub const PLANET_SCALE: f32 = 520.0;
pub const PLANET_MIN_DZ: f32 = 60.0;
pub const PLANET_HIDE_DZ: f32 = -800.0;
pub const PLANET_MIN_SIZE: f32 = 6.0;
pub const PLANET_MAX_SIZE: f32 = 0.8;
pub const PLANET_SPREAD: f32 = 0.6;
pub const SLIDE_TRIGGER_Z: f32 = 140.0;
pub const SLIDE_EXIT_Z: f32 = -600.0;

pub const ASTEROID_COUNT: usize = 50;
pub const ASTEROID_MIN_DZ: f32 = 180.0;
pub const ASTEROID_MIN_SIZE: f32 = 2.0;
pub const ASTEROID_MAX_SIZE: f32 = 0.22;
pub const ASTEROID_SPREAD: f32 = 0.75;
pub const ASTEROID_VISIBLE_BEHIND: f32 = -2000.0;
pub const ASTEROID_VISIBLE_AHEAD: f32 = 20000.0;
pub const BELT_GAP: f32 = 2000.0;
pub const BELT_DEPTH: f32 = 3000.0;
pub const BELT_LOCK_MARGIN: f32 = 2000.0;
pub const BELT_Y_RANGE: f32 = 0.6;
pub const BELT_X_RANGE: f32 = 1.2;
pub const BELT_X_WRAP: f32 = 1.35;
pub const BELT_Y_WRAP: f32 = 0.5;
pub const ASTEROID_VX_MIN: f32 = 0.00025;
pub const ASTEROID_VX_MAX: f32 = 0.002;
pub const ASTEROID_VY_ABS: f32 = 0.0004;
pub const ASTEROID_ROT_ABS: f32 = 0.0004;

pub const INITIAL_DEPTH_BEHIND_FIRST: f32 = 800.0;
pub const SCROLL_GAIN: f32 = 0.75;
pub const DRAG_GAIN: f32 = 1.2;
/// Browser-style wheel delta reported for one notch
pub const WHEEL_NOTCH_DELTA: f32 = 100.0;

pub const RADAR_AHEAD_MAX: f32 = 4500.0;
pub const RADAR_SPREAD: f32 = 1.35;
pub const RADAR_PX_PLANET: f32 = 9.0;
pub const RADAR_PX_ASTEROID: f32 = 4.0;
pub const RADAR_MARKER_SIZE: f32 = 20.0;
pub const RADAR_MARKER_OFFSET: (f32, f32) = (6.0, 82.0);
pub const RADAR_PANEL_Y: f32 = 0.38;
pub const RADAR_PANEL_W: f32 = 0.52;
pub const RADAR_PANEL_H: f32 = 0.30;
pub const RADAR_CLIP_L: f32 = -220.0;
pub const RADAR_CLIP_R: f32 = 12.0;
pub const RADAR_CLIP_T: f32 = -10.0;

pub const COCKPIT_BASE_SIZE: (f32, f32) = (144.0, 90.0);
pub const COCKPIT_BLEED: f32 = 1.045;
pub const COCKPIT_OFFSET_Y_WINDOWED: f32 = -57.0;
pub const COCKPIT_WINDOW_INSET: f32 = 0.085;
pub const COCKPIT_CONSOLE_CROP: f32 = 120.0;

pub const HELP_PANEL_X: f32 = -0.355;
pub const HELP_PANEL_Y: f32 = 0.375;
pub const HELP_PAD: (f32, f32) = (12.0, 10.0);
pub const HELP_NUDGE_X: f32 = -40.0;
pub const HELP_LINE_HEIGHT: f32 = 16.0;

pub const HUD_LINE_HEIGHT: f32 = 20.0;
pub const HUD_RIGHT_LINE_HEIGHT: f32 = 22.0;
pub const HUD_SCAN_BAR_HEIGHT: f32 = 10.0;

pub const ENGINE_VOLUME: f32 = 0.6;

pub const TRANSPARENT: u8 = 0;
pub const SPACE_BG: u8 = 1;
pub const STAR_RAMP_START: u8 = 16;
pub const STAR_RAMP_LEN: u8 = 16;
/// Mint ramp from the background to the lock color, indexed by opacity
pub const MINT_RAMP_START: u8 = 32;
pub const MINT_RAMP_LEN: u8 = 16;
pub const HUD_TEXT: u8 = 48;
pub const RADAR_PLANET: u8 = 49;
pub const RADAR_PLANET_GLOW: u8 = 50;
pub const RADAR_ASTEROID: u8 = 51;
pub const SHIP_MARKER: u8 = 56;
pub const SWEEP: u8 = 57;
pub const SHIP_MARKER_GLOW: u8 = 58;
pub const SCAN_BAR_BG: u8 = 59;
pub const SCAN_BAR_FILL: u8 = 60;
pub const WHITE: u8 = 61;
pub const PLANET_RAMPS_START: u8 = 64;
pub const PLANET_RAMP_LEN: u8 = 8;
pub const ROCK_RAMP_START: u8 = 128;
pub const GROUND_RAMP_START: u8 = 144;
pub const METAL_RAMP_START: u8 = 160;
pub const RAMP_LEN: u8 = 16;
pub const COLOR_CUBE_START: u8 = 192;

pub const SPACE_BG_COLOR: [u8; 3] = [8, 10, 20];
pub const LOCK_COLOR: [u8; 3] = [160, 255, 220];
pub const HUD_TEXT_COLOR: [u8; 3] = [180, 255, 220];

/// Dark and lit end of each planet's color ramp
pub const PLANET_COLORS: [([u8; 3], [u8; 3]); 6] = [
    ([18, 24, 52], [150, 190, 230]),
    ([46, 20, 12], [230, 150, 90]),
    ([20, 38, 20], [150, 210, 130]),
    ([40, 30, 48], [210, 170, 230]),
    ([48, 40, 18], [240, 220, 140]),
    ([16, 36, 40], [130, 220, 220])
];

pub const HELP_LINES: [&str; 5] = [
    "Scroll to drift",
    "[R] reset",
    "[F] fullscreen",
    "[I] HUD on/off",
    "[S] active scan"
];

pub const PROMPT_TITLE: &str = "MISSION COMPLETE";
pub const PROMPT_LINE_1: &str = "Survey finished. Course set for Earth.";
pub const PROMPT_LINE_2: &str = "Commence departure?";
pub const PROMPT_BUTTON: &str = "LAUNCH [Y]";
pub const PROMPT_BUTTON_SIZE: (f32, f32) = (220.0, 42.0);
