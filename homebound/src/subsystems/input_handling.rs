use retro_cockpit::rendering::blittable::SizedSurface;
use retro_cockpit::rendering::fonts::glyph_font::GLYPH_HEIGHT;
use retro_cockpit::window::{BlitContext, CursorKind, KeyCode};
use crate::HomeboundApp;
use crate::constants::PROMPT_BUTTON;
use crate::hud::PromptLayout;
use crate::input::{command_for_key, wheel_delta, Command};
use crate::scene::Viewport;

const LEFT_BUTTON: u8 = 0;

impl HomeboundApp {
    pub fn font_scale(&self, vp: &Viewport) -> i32 {
        self.prefs.font_scale(vp.px_scale(), GLYPH_HEIGHT as f32)
    }

    pub fn prompt_layout(&self, vp: &Viewport) -> PromptLayout {
        let scale = self.font_scale(vp);
        let line_height = (self.font.line_height() * scale) as f32;
        let label_width = (self.font.measure_text_width(PROMPT_BUTTON) * scale) as f32;
        PromptLayout::new(vp, line_height, (label_width + 12.0, line_height + 6.0))
    }

    /// Hover state for the launch button and pointer drag, once per frame.
    pub fn update_pointer(&mut self, ctx: &mut BlitContext, vp: &Viewport) {
        let (mx, my) = ctx.get_mouse_pos();
        if self.sequencer.intro.is_awaiting() {
            self.launch_button_hovered = self.prompt_layout(vp).button.contains(mx, my);
        } else {
            self.launch_button_hovered = false;
            if self.flight.is_dragging() {
                if self.sequencer.accepts_flight_input() {
                    self.flight.drag_to(my / vp.px_scale());
                } else {
                    self.flight.end_drag();
                }
            }
        }
        ctx.set_cursor(if self.launch_button_hovered { CursorKind::Pointer } else { CursorKind::Default });
    }

    pub fn handle_key_down(&mut self, ctx: &mut BlitContext, key_code: KeyCode) {
        let awaiting = self.sequencer.intro.is_awaiting();
        match command_for_key(key_code, awaiting) {
            Some(Command::Launch) => self.launch(),
            Some(Command::Reset) => self.reset_flight(),
            Some(Command::ToggleFullscreen) => ctx.request_fullscreen(!ctx.is_fullscreen()),
            Some(Command::ToggleHud) => self.toggle_hud(),
            Some(Command::Scan) => {
                if self.sequencer.start_scan(self.now) {
                    log::info!("active scan started");
                }
            }
            None => ()
        }
    }

    pub fn handle_mouse_down(&mut self, ctx: &mut BlitContext, button_number: u8) {
        if button_number != LEFT_BUTTON {
            return;
        }
        if self.sequencer.intro.is_awaiting() {
            let vp = Viewport::new(ctx.get_width() as f32, ctx.get_height() as f32);
            let (mx, my) = ctx.get_mouse_pos();
            if self.prompt_layout(&vp).button.contains(mx, my) {
                self.launch();
            }
        } else if self.sequencer.accepts_flight_input() {
            let vp = Viewport::new(ctx.get_width() as f32, ctx.get_height() as f32);
            let (_, my) = ctx.get_mouse_pos();
            self.flight.begin_drag(my / vp.px_scale());
        }
    }

    pub fn handle_mouse_up(&mut self, button_number: u8) {
        if button_number == LEFT_BUTTON {
            self.flight.end_drag();
        }
    }

    pub fn handle_mouse_wheel(&mut self, dy: f32) {
        if self.sequencer.accepts_flight_input() {
            self.flight.scroll(wheel_delta(dy));
        }
    }

    fn launch(&mut self) {
        self.sequencer.start_launch(self.now);
    }

    fn reset_flight(&mut self) {
        self.flight.reset();
        self.target_lock.clear();
        log::info!("flight reset to depth {}", self.flight.depth);
    }

    fn toggle_hud(&mut self) {
        self.prefs.show_hud = !self.prefs.show_hud;
        log::info!("hud {}", if self.prefs.show_hud { "on" } else { "off" });
        if let Some(path) = &self.prefs_path {
            if let Err(error) = self.prefs.save(path) {
                log::warn!("{}", error);
            }
        }
    }
}
