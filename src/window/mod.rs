use std::collections::HashSet;
use std::convert::TryFrom;
use std::time::Instant;
use orom_miniquad::*;

use crate::audio::{AudioError, SoundDriver, SoundHandle};
use crate::palette::Palette;
use crate::rendering::blittable::{BufferProvider, BufferProviderMut, ClipRect, PixelTarget, SizedSurface};

/// Keys the cockpit reacts to, anything else is dropped before reaching the handler.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum KeyCode {
    Enter,
    KpEnter,
    F,
    I,
    R,
    S,
    Y,
    F11
}

#[derive(Copy, Clone, Debug, Default)]
pub struct KeyMods {
    pub shift: bool,
    pub control: bool,
    pub option: bool,
    pub command: bool,
}

impl From<orom_miniquad::KeyMods> for KeyMods {
    fn from(keymods: orom_miniquad::KeyMods) -> Self {
        Self {
            shift: keymods.shift,
            option: keymods.alt,
            control: keymods.ctrl,
            command: keymods.logo
        }
    }
}

impl TryFrom<orom_miniquad::KeyCode> for KeyCode {
    type Error = ();

    fn try_from(value: orom_miniquad::KeyCode) -> Result<Self, Self::Error> {
        match value {
            orom_miniquad::KeyCode::Enter => Ok(KeyCode::Enter),
            orom_miniquad::KeyCode::KpEnter => Ok(KeyCode::KpEnter),
            orom_miniquad::KeyCode::F => Ok(KeyCode::F),
            orom_miniquad::KeyCode::I => Ok(KeyCode::I),
            orom_miniquad::KeyCode::R => Ok(KeyCode::R),
            orom_miniquad::KeyCode::S => Ok(KeyCode::S),
            orom_miniquad::KeyCode::Y => Ok(KeyCode::Y),
            orom_miniquad::KeyCode::F11 => Ok(KeyCode::F11),
            _ => Err(()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CursorKind {
    Default,
    Pointer
}

impl From<CursorKind> for CursorIcon {
    fn from(kind: CursorKind) -> Self {
        match kind {
            CursorKind::Default => CursorIcon::Default,
            CursorKind::Pointer => CursorIcon::Pointer
        }
    }
}

/// Everything a [`ContextHandler`] can touch during a frame.
///
/// The framebuffer holds palette indices; the palette is uploaded every frame,
/// so rewriting it is the cheap way to tint the whole picture.
pub struct BlitContext {
    sound_driver: Option<SoundDriver>,
    buffer_width: usize,
    buffer_height: usize,
    palette: Palette,
    buffer_pixels: Vec<u8>,
    mouse_x: f32,
    mouse_y: f32,
    mouse_buttons: [bool; 3],
    keys_pressed: HashSet<KeyCode>,
    clip_stack: Vec<ClipRect>,
    fullscreen: bool,
    fullscreen_request: Option<bool>,
    cursor: CursorKind
}

impl SizedSurface for BlitContext {
    fn get_width(&self) -> usize {
        self.buffer_width
    }

    fn get_height(&self) -> usize {
        self.buffer_height
    }
}

impl BufferProvider<u8> for BlitContext {
    fn get_buffer(&self) -> &[u8] { &self.buffer_pixels }
}

impl BufferProviderMut<u8> for BlitContext {
    fn get_buffer_mut(&mut self) -> &mut [u8] { &mut self.buffer_pixels }
}

impl PixelTarget for BlitContext {
    fn get_clip(&self) -> ClipRect {
        self.clip_stack
            .last()
            .copied()
            .unwrap_or_else(|| ClipRect::from_surface(self))
    }
}

impl BlitContext {
    /// A context without a window or audio device. The stage builds its own with [`BlitContext::new`] too.
    pub fn new(window_mode: WindowMode) -> Self {
        let (buffer_width, buffer_height) = window_mode.get_buffer_dimensions();
        Self {
            sound_driver: None,
            buffer_width,
            buffer_height,
            palette: Palette::new(),
            buffer_pixels: vec![0u8; buffer_width * buffer_height],
            mouse_x: 0.0,
            mouse_y: 0.0,
            mouse_buttons: [false; 3],
            keys_pressed: HashSet::new(),
            clip_stack: Vec::new(),
            fullscreen: false,
            fullscreen_request: None,
            cursor: CursorKind::Default
        }
    }

    pub fn init_audio(&mut self) -> Result<(), AudioError> {
        let driver = SoundDriver::try_create()?;
        self.sound_driver = Some(driver);
        Ok(())
    }

    pub fn borrow_sound_driver(&mut self) -> Option<&mut SoundDriver> {
        self.sound_driver.as_mut()
    }

    pub fn has_audio(&self) -> bool {
        self.sound_driver.is_some()
    }

    pub fn play_sound(&mut self, sound: &SoundHandle) -> Option<usize> {
        self.sound_driver.as_mut().map(|driver| driver.play_sound(sound.clone()))
    }

    pub fn play_sound_looped(&mut self, sound: &SoundHandle) -> Option<usize> {
        self.sound_driver.as_mut().map(|driver| driver.play_sound_looped(sound.clone()))
    }

    pub fn stop_sound(&mut self, play_handle: usize) {
        if let Some(driver) = self.sound_driver.as_mut() {
            driver.stop_playback(play_handle);
        }
    }

    pub fn set_sound_volume(&mut self, play_handle: usize, volume: f32) {
        if let Some(driver) = self.sound_driver.as_ref() {
            driver.set_volume(play_handle, volume);
        }
    }

    pub fn playback_in_progress(&self, play_handle: usize) -> bool {
        self.sound_driver
            .as_ref()
            .map_or(false, |driver| driver.playback_in_progress(play_handle))
    }

    pub fn set_global_playback_volume(&mut self, volume: f32) {
        if let Some(driver) = self.sound_driver.as_ref() {
            driver.set_global_volume(volume);
        }
    }

    pub fn clear(&mut self, color_idx: u8) {
        for pixel in self.buffer_pixels.iter_mut() {
            *pixel = color_idx;
        }
    }

    /// Narrows drawing to `rect`, intersected with the clip already active.
    pub fn push_clip(&mut self, rect: ClipRect) {
        let clipped = self.get_clip().intersect(&rect);
        self.clip_stack.push(clipped);
    }

    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    pub fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        self.keys_pressed.contains(&key_code)
    }

    pub fn is_mouse_button_pressed(&self, button_number: u8) -> bool {
        self.mouse_buttons.get(button_number as usize).copied().unwrap_or(false)
    }

    pub fn get_mouse_pos(&self) -> (f32, f32) {
        (self.mouse_x, self.mouse_y)
    }

    pub fn set_mouse_pos(&mut self, pos: (f32, f32)) {
        self.mouse_x = pos.0;
        self.mouse_y = pos.1;
    }

    pub fn get_palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: &Palette) {
        self.palette.clone_from(palette);
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn request_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen_request = Some(fullscreen);
    }

    pub fn set_cursor(&mut self, cursor: CursorKind) {
        self.cursor = cursor;
    }

    pub fn get_cursor(&self) -> CursorKind {
        self.cursor
    }

    fn take_fullscreen_request(&mut self) -> Option<bool> {
        let request = self.fullscreen_request.take();
        if let Some(fullscreen) = request {
            self.fullscreen = fullscreen;
        }
        request
    }
}

pub trait ContextHandler {
    fn get_window_title(&self) -> &'static str;
    fn get_window_mode(&self) -> WindowMode;
    fn on_mouse_down(&mut self, _ctx: &mut BlitContext, _button_number: u8){}
    fn on_mouse_up(&mut self, _ctx: &mut BlitContext, _button_number: u8){}
    fn on_mouse_wheel(&mut self, _ctx: &mut BlitContext, _dx: f32, _dy: f32){}
    fn on_key_down(&mut self, _ctx: &mut BlitContext, _key_code: KeyCode, _key_mods: KeyMods){}
    fn on_key_up(&mut self, _ctx: &mut BlitContext, _key_code: KeyCode, _key_mods: KeyMods){}
    fn init(&mut self, ctx: &mut BlitContext);
    fn update(&mut self, ctx: &mut BlitContext, dt: f32);
}

/// Scale of the framebuffer quad in clip space so it fits the window with its aspect preserved.
pub fn letterbox_scale(screen: (f32, f32), buffer: (usize, usize)) -> (f32, f32) {
    if screen.0 <= 0.0 || screen.1 <= 0.0 || buffer.0 == 0 || buffer.1 == 0 {
        return (1.0, 1.0);
    }
    let screen_aspect = screen.0 / screen.1;
    let buffer_aspect = buffer.0 as f32 / buffer.1 as f32;
    if screen_aspect > buffer_aspect {
        (buffer_aspect / screen_aspect, 1.0)
    } else {
        (1.0, screen_aspect / buffer_aspect)
    }
}

/// Maps a window position to framebuffer pixels; positions on the bars land outside the buffer.
pub fn screen_to_buffer(pos: (f32, f32), screen: (f32, f32), buffer: (usize, usize)) -> (f32, f32) {
    let (sx, sy) = letterbox_scale(screen, buffer);
    let nx = (pos.0 / screen.0.max(1.0) * 2.0 - 1.0) / sx;
    let ny = (pos.1 / screen.1.max(1.0) * 2.0 - 1.0) / sy;
    (
        (nx + 1.0) * 0.5 * buffer.0 as f32,
        (ny + 1.0) * 0.5 * buffer.1 as f32
    )
}

/// Window creation settings that do not depend on the handler.
#[derive(Copy, Clone, Debug)]
pub struct StartOptions {
    pub window_width: i32,
    pub window_height: i32,
    pub fullscreen: bool
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fullscreen: false
        }
    }
}

pub struct Stage<CtxHandler: ContextHandler> {
    pipeline: Pipeline,
    bindings: Bindings,
    context_data: BlitContext,
    handler: CtxHandler,
    buffer_texture: Texture,
    colors_texture: Texture,
    applied_cursor: CursorKind,
    last_instant: Instant
}

impl<CtxHandler: ContextHandler> Stage<CtxHandler> {
    pub fn new(ctx: &mut Context, handler: CtxHandler, options: StartOptions) -> Stage<CtxHandler> {
        #[rustfmt::skip]
        let verts: &[f32] = &[
            /* pos         uv */
            -1.0, -1.0,    0.0, 1.0,
             1.0,  1.0,    1.0, 0.0,
            -1.0,  1.0,    0.0, 0.0,
             1.0, -1.0,    1.0, 1.0,
        ];

        let vertex_buffer = Buffer::immutable(
            ctx,
            BufferType::VertexBuffer,
            &verts
        );

        let index_buffer = Buffer::immutable(
            ctx,
            BufferType::IndexBuffer,
            &[0u16, 1, 2, 0, 3, 1]
        );

        let mut context_data = BlitContext::new(handler.get_window_mode());
        context_data.fullscreen = options.fullscreen;
        if let Err(error) = context_data.init_audio() {
            log::warn!("Failed to init audio: {}", error);
        }

        let mut handler = handler;
        handler.init(&mut context_data);

        let colors_texture = Texture::from_data_and_format(
            ctx,
            context_data.palette.as_bytes(),
            TextureParams {
                format: TextureFormat::RGB8,
                wrap: TextureWrap::Clamp,
                filter: FilterMode::Nearest,
                width: 256,
                height: 1,
                depth: 1
            },
            TextureKind::Texture2D
        );

        let buffer_texture = Texture::from_data_and_format(
            ctx,
            &context_data.buffer_pixels,
            TextureParams {
                format: TextureFormat::Alpha,
                wrap: TextureWrap::Clamp,
                filter: FilterMode::Nearest,
                width: context_data.buffer_width as _,
                height: context_data.buffer_height as _,
                depth: 1
            },
            TextureKind::Texture2D
        );

        let bindings = Bindings {
            vertex_buffers: vec![vertex_buffer],
            index_buffer,
            images: vec![colors_texture, buffer_texture]
        };

        let shader = Shader::new(
            ctx,
            palette_shader::VERTEX,
            palette_shader::FRAGMENT,
            palette_shader::meta()
        ).unwrap(); // crash if failed to create a shader

        let pipeline = Pipeline::new(
            ctx,
            &[BufferLayout::default()],
            &[
                VertexAttribute::new("pos", VertexFormat::Float2),
                VertexAttribute::new("uv", VertexFormat::Float2),
            ],
            shader
        );

        Self {
            pipeline,
            bindings,
            context_data,
            handler,
            buffer_texture,
            colors_texture,
            applied_cursor: CursorKind::Default,
            last_instant: Instant::now()
        }
    }

    fn buffer_dimensions(&self) -> (usize, usize) {
        (self.context_data.buffer_width, self.context_data.buffer_height)
    }

    fn update_mouse_position(&mut self, ctx: &mut Context, x: f32, y: f32) {
        let pos = screen_to_buffer((x, y), ctx.screen_size(), self.buffer_dimensions());
        self.context_data.set_mouse_pos(pos);
    }
}

fn mouse_button_number(button: MouseButton) -> Option<u8> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Middle => Some(1),
        MouseButton::Right => Some(2),
        _ => None
    }
}

impl<CtxHandler: ContextHandler> EventHandler for Stage<CtxHandler> {
    fn update(&mut self, ctx: &mut Context) {
        let dt = self.last_instant.elapsed().as_micros() as f32 / 1000000.0;
        self.last_instant = Instant::now();
        if let Some(driver) = &mut self.context_data.sound_driver {
            driver.maintain();
        }
        self.handler.update(&mut self.context_data, dt);

        if let Some(fullscreen) = self.context_data.take_fullscreen_request() {
            log::info!("fullscreen: {}", fullscreen);
            ctx.set_fullscreen(fullscreen);
        }
        if self.applied_cursor != self.context_data.cursor {
            self.applied_cursor = self.context_data.cursor;
            ctx.set_mouse_cursor(self.applied_cursor.into());
        }

        self.colors_texture.update(ctx, self.context_data.palette.as_bytes());
        self.buffer_texture.update(ctx, &self.context_data.buffer_pixels);
    }

    fn draw(&mut self, ctx: &mut Context) {
        let (sx, sy) = letterbox_scale(ctx.screen_size(), self.buffer_dimensions());

        ctx.begin_default_pass(PassAction::clear_color(0.0, 0.0, 0.0, 1.0));
        ctx.apply_pipeline(&self.pipeline);
        ctx.apply_bindings(&self.bindings);
        ctx.apply_uniforms(&palette_shader::Uniforms { scale: [sx, sy] });
        ctx.draw(0, 6, 1);
        ctx.end_render_pass();

        ctx.commit_frame();
    }

    fn mouse_motion_event(&mut self, ctx: &mut Context, x: f32, y: f32) {
        self.update_mouse_position(ctx, x, y);
    }

    fn mouse_wheel_event(&mut self, _ctx: &mut Context, x: f32, y: f32) {
        self.handler.on_mouse_wheel(&mut self.context_data, x, y);
    }

    fn mouse_button_down_event(&mut self, ctx: &mut Context, button: MouseButton, x: f32, y: f32) {
        self.update_mouse_position(ctx, x, y);
        if let Some(number) = mouse_button_number(button) {
            self.context_data.mouse_buttons[number as usize] = true;
            self.handler.on_mouse_down(&mut self.context_data, number);
        }
    }

    fn mouse_button_up_event(&mut self, ctx: &mut Context, button: MouseButton, x: f32, y: f32) {
        self.update_mouse_position(ctx, x, y);
        if let Some(number) = mouse_button_number(button) {
            self.context_data.mouse_buttons[number as usize] = false;
            self.handler.on_mouse_up(&mut self.context_data, number);
        }
    }

    fn key_down_event(
        &mut self,
        _ctx: &mut Context,
        keycode: orom_miniquad::KeyCode,
        keymods: orom_miniquad::KeyMods,
        repeat: bool,
    ) {
        let new_key_mods = KeyMods::from(keymods);
        if repeat {
            return;
        }
        if let Ok(key_code) = KeyCode::try_from(keycode) {
            self.context_data.keys_pressed.insert(key_code);
            self.handler.on_key_down(
                &mut self.context_data,
                key_code,
                new_key_mods
            );
        }
    }

    fn key_up_event(
        &mut self,
        _ctx: &mut Context,
        keycode: orom_miniquad::KeyCode,
        keymods: orom_miniquad::KeyMods
    ) {
        let new_key_mods = KeyMods::from(keymods);
        if let Ok(key_code) = KeyCode::try_from(keycode) {
            self.context_data.keys_pressed.remove(&key_code);
            self.handler.on_key_up(
                &mut self.context_data,
                key_code,
                new_key_mods
            );
        }
    }
}

mod palette_shader {
    use orom_miniquad::*;

    pub const VERTEX:&str = r#"#version 100
        attribute vec2 pos;
        attribute vec2 uv;

        uniform vec2 scale;

        varying lowp vec2 texcoord;

        void main() {
            gl_Position = vec4(pos * scale, 0.0, 1.0);
            texcoord = uv;
        }
    "#;

    pub const FRAGMENT:&str = r#"#version 100
        varying lowp vec2 texcoord;

        uniform sampler2D colors;
        uniform sampler2D tex;

        lowp vec3 fetch(lowp vec2 texcoord) {
            lowp float idx = texture2D(tex, texcoord).x;
            lowp vec2 uv = vec2((idx * 255.0 + 0.5) / 256.0, 0.5);
            return texture2D(colors, uv).xyz;
        }

        void main() {
            gl_FragColor = vec4(fetch(texcoord), 1.0);
        }
    "#;

    pub fn meta() -> ShaderMeta {
        ShaderMeta {
            images: vec!["colors".to_string(), "tex".to_string()],
            uniforms: UniformBlockLayout {
                uniforms: vec![UniformDesc::new("scale", UniformType::Float2)]
            }
        }
    }

    #[repr(C)]
    pub struct Uniforms {
        pub scale: [f32; 2]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowMode {
    Wide480x270,
    Wide640x360
}
impl WindowMode {
    pub fn get_buffer_dimensions(&self) -> (usize, usize) {
        match self {
            WindowMode::Wide480x270 => (480, 270),
            WindowMode::Wide640x360 => (640, 360),
        }
    }
}

pub fn start<CtxHandler: 'static + ContextHandler>(handler: CtxHandler, options: StartOptions) {
    let conf = conf::Conf {
        window_title: handler.get_window_title().to_string(),
        window_width: options.window_width,
        window_height: options.window_height,
        high_dpi: true,
        fullscreen: options.fullscreen,
        sample_count: 1,
        window_resizable: true
    };

    orom_miniquad::start(conf, move |mut ctx| {
        UserData::owning(Stage::new(&mut ctx, handler, options), ctx)
    });
}
