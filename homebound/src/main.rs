use std::path::PathBuf;

use retro_cockpit::palette::Palette;
use retro_cockpit::rendering::blittable::SizedSurface;
use retro_cockpit::rendering::fonts::glyph_font::Font;
use retro_cockpit::utility::StopWatch;
use retro_cockpit::window::{BlitContext, ContextHandler, KeyCode, KeyMods, WindowMode};
use crate::assets::{build_palette, NoiseTrack, Sounds, Sprites};
use crate::cockpit::CockpitFrame;
use crate::config::CockpitConfig;
use crate::constants::{FRAME_MS, MAX_FRAME_MS, WINDOW_TITLE};
use crate::flight::Flight;
use crate::prefs::HudPrefs;
use crate::scene::{default_planets, spawn_asteroids, starfield, Asteroid, Belt, Planet, Star, Viewport};
use crate::sequencer::{FrameClock, Sequencer};
use crate::target_lock::TargetLock;

mod arrival;
mod assets;
mod cockpit;
mod collision;
mod config;
mod constants;
mod easing;
mod flight;
mod hit;
mod hud;
mod input;
mod intro;
mod power;
mod prefs;
mod radar;
mod scan;
mod scene;
mod sequencer;
mod subsystems;
mod target_lock;

pub struct HomeboundApp {
    pub config: CockpitConfig,
    pub prefs: HudPrefs,
    pub prefs_path: Option<PathBuf>,
    pub palette: Palette,
    pub sprites: Sprites,
    pub sounds: Sounds,
    pub engine_handle: Option<usize>,
    pub warning_handle: Option<usize>,
    pub font: Font,
    pub cockpit_frame: Option<CockpitFrame>,
    pub planets: Vec<Planet>,
    pub belt: Belt,
    pub asteroids: Vec<Asteroid>,
    pub stars: Vec<Star>,
    pub flight: Flight,
    pub sequencer: Sequencer,
    pub target_lock: TargetLock,
    pub noise: NoiseTrack,
    pub bump_allocator: bumpalo::Bump,
    /// Milliseconds since start
    pub now: f32,
    pub launch_button_hovered: bool
}

impl ContextHandler for HomeboundApp {
    fn get_window_title(&self) -> &'static str { WINDOW_TITLE }

    fn get_window_mode(&self) -> WindowMode { self.config.window.resolution.into() }

    fn init(&mut self, ctx: &mut BlitContext) {
        ctx.set_palette(&self.palette);
        ctx.set_global_playback_volume(self.config.audio.master_volume);
        self.ensure_engine_loop(ctx);
        log::info!(
            "{} planets, {} asteroids, depth {} of {}",
            self.planets.len(),
            self.asteroids.len(),
            self.flight.depth,
            self.flight.max_depth()
        );
    }

    fn on_mouse_down(&mut self, ctx: &mut BlitContext, button_number: u8) {
        self.handle_mouse_down(ctx, button_number);
    }

    fn on_mouse_up(&mut self, _ctx: &mut BlitContext, button_number: u8) {
        self.handle_mouse_up(button_number);
    }

    fn on_mouse_wheel(&mut self, _ctx: &mut BlitContext, _dx: f32, dy: f32) {
        self.handle_mouse_wheel(dy);
    }

    fn on_key_down(&mut self, ctx: &mut BlitContext, key_code: KeyCode, _key_mods: KeyMods) {
        self.handle_key_down(ctx, key_code);
    }

    fn update(&mut self, ctx: &mut BlitContext, dt: f32) {
        let _stop_watch = StopWatch::named("frame");

        let dt_ms = (dt * 1000.0).min(MAX_FRAME_MS);
        self.now += dt_ms;
        let vp = Viewport::new(ctx.get_width() as f32, ctx.get_height() as f32);

        self.update_pointer(ctx, &vp);

        let warning_playing = self.warning_handle
            .map(|handle| ctx.playback_in_progress(handle))
            .unwrap_or(false);
        let clock = FrameClock {
            now: self.now,
            dt_frames: dt_ms / FRAME_MS,
            warning_playing,
            width: vp.width
        };
        let home_depth = self.flight.start_depth();
        let frame = self.sequencer.update(clock, &mut self.flight.depth, home_depth);
        self.handle_sequence_events(ctx);

        self.update_asteroids(dt_ms / 1000.0, &vp);
        self.update_target_lock(&vp);

        self.render(ctx, &vp, &frame);
        self.update_palette(ctx);
    }
}

impl HomeboundApp {
    pub fn new(config: CockpitConfig, prefs: HudPrefs, prefs_path: Option<PathBuf>) -> Self {
        let palette = build_palette();
        let noise_seed = config.seed.map(|seed| seed as u32).unwrap_or_else(rand::random);
        let sprites = Sprites::load(&config.images_dir(), &palette, noise_seed);
        let sounds = Sounds::load(&config.sounds_dir());

        let cockpit_frame = if sprites.cockpit.is_none() {
            match CockpitFrame::build() {
                Ok(frame) => Some(frame),
                Err(error) => {
                    log::warn!("{:?}, cockpit frame disabled", error);
                    None
                }
            }
        } else {
            None
        };

        let planets = default_planets();
        let belt = Belt::behind(&planets);
        let mut sequencer = Sequencer::new(config.seed);
        let asteroids = spawn_asteroids(sequencer.rng(), &belt, sprites.asteroids.len());
        let flight = Flight::new(&planets, &belt);

        Self {
            config,
            prefs,
            prefs_path,
            palette,
            sprites,
            sounds,
            engine_handle: None,
            warning_handle: None,
            font: Font::new(),
            cockpit_frame,
            planets,
            belt,
            asteroids,
            stars: starfield(),
            flight,
            sequencer,
            target_lock: TargetLock::new(),
            noise: NoiseTrack::new(noise_seed),
            bump_allocator: bumpalo::Bump::new(),
            now: 0.0,
            launch_button_hovered: false
        }
    }
}

fn load_config() -> CockpitConfig {
    let dir = match CockpitConfig::default_dir() {
        Some(dir) => dir,
        None => {
            log::warn!("no config directory on this platform, using defaults");
            return CockpitConfig::default();
        }
    };
    match CockpitConfig::load_or_create(&dir) {
        Ok(config) => config,
        Err(error) => {
            log::warn!("{}, using defaults", error);
            CockpitConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let prefs_path = HudPrefs::default_path();
    let prefs = prefs_path
        .as_deref()
        .map(HudPrefs::load_or_default)
        .unwrap_or_default();
    let start_options = config.start_options();

    retro_cockpit::window::start(HomeboundApp::new(config, prefs, prefs_path), start_options);
}
