mod cockpit_rendering;
mod hud_rendering;
mod input_handling;
mod radar_rendering;
mod rendering;
mod sound_handling;
mod world_updating;
