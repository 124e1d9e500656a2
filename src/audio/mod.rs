use std::collections::VecDeque;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::sync::Arc;
use rodio::{Source, StreamError, PlayError, decoder::DecoderError, Sink};
use rodio::dynamic_mixer::{DynamicMixerController, mixer};
use thiserror::Error;

type MemoryDecoder = rodio::Decoder<Cursor<&'static[u8]>>;
type FileDecoder = rodio::Decoder<BufReader<std::fs::File>>;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Stream(#[from] StreamError),
    #[error("failed to create a sink: {0}")]
    Play(#[from] PlayError),
    #[error("failed to decode sound: {0}")]
    Decoder(#[from] DecoderError),
    #[error("failed to open sound file: {0}")]
    Io(#[from] std::io::Error)
}

#[derive(Clone)]
pub enum SoundHandle {
    Memory(rodio::source::Buffered<MemoryDecoder>),
    File(rodio::source::Buffered<FileDecoder>)
}
impl SoundHandle {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let file = std::fs::File::open(path)?;
        Self::from_file(file)
    }
    pub fn from_file(file: std::fs::File) -> Result<Self, AudioError> {
        let reader = BufReader::new(file);
        let decoder = rodio::Decoder::new(reader)?;
        Ok(Self::File(decoder.buffered()))
    }
    pub fn from_memory(bytes: &'static [u8]) -> Result<Self, AudioError> {
        let cursor = Cursor::new(bytes);
        let decoder = rodio::Decoder::new(cursor)?;
        Ok(Self::Memory(decoder.buffered()))
    }
}

pub struct SoundDriver {
    _stream: rodio::OutputStream,
    active_sounds: Vec<Option<rodio::Sink>>,
    free_list: VecDeque<usize>,
    global_sink: Sink,
    global_mixer_controller: Arc<DynamicMixerController<f32>>
}
impl SoundDriver {
    pub fn try_create() -> Result<Self, AudioError> {
        let (_stream, handle) = rodio::OutputStream::try_default()?;
        let free_list = VecDeque::new();
        let active_sounds = Vec::new();
        let global_sink = rodio::Sink::try_new(&handle)?;
        let (global_mixer_controller, global_dynamic_mixer) =
            mixer(2, 44100);
        global_sink.append(global_dynamic_mixer);
        Ok(Self {
            _stream,
            active_sounds,
            free_list,
            global_sink,
            global_mixer_controller
        })
    }

    pub fn set_global_volume(&self, volume: f32) {
        self.global_sink.set_volume(volume);
    }

    pub fn play_sound(&mut self, sound: SoundHandle) -> usize {
        self.start_sink(sound, false)
    }

    /// Plays until stopped.
    pub fn play_sound_looped(&mut self, sound: SoundHandle) -> usize {
        self.start_sink(sound, true)
    }

    fn start_sink(&mut self, sound: SoundHandle, looped: bool) -> usize {
        let (sink, queue_rx) = Sink::new_idle();
        self.global_mixer_controller.add(queue_rx);
        match (sound, looped) {
            (SoundHandle::Memory(memory_sound), false) => sink.append(memory_sound),
            (SoundHandle::Memory(memory_sound), true) => sink.append(memory_sound.repeat_infinite()),
            (SoundHandle::File(file_sound), false) => sink.append(file_sound),
            (SoundHandle::File(file_sound), true) => sink.append(file_sound.repeat_infinite())
        }
        let id = self.free_list
            .pop_back()
            .unwrap_or(self.active_sounds.len());
        if id < self.active_sounds.len() {
            self.active_sounds[id] = Some(sink);
        } else {
            self.active_sounds.push(Some(sink))
        }
        log::debug!("sound #{} started (looped: {})", id, looped);
        id
    }

    pub fn playback_in_progress(&self, play_handle: usize) -> bool {
        match self.active_sounds.get(play_handle) {
            Some(Some(sink)) => !sink.empty(),
            _ => false
        }
    }

    pub fn set_volume(&self, play_handle: usize, volume: f32) {
        if let Some(Some(sink)) = self.active_sounds.get(play_handle) {
            sink.set_volume(volume);
        }
    }

    pub fn pause_playback(&self, play_handle: usize) {
        if let Some(Some(sink)) = self.active_sounds.get(play_handle) {
            sink.pause();
        }
    }

    pub fn continue_playback(&self, play_handle: usize) {
        if let Some(Some(sink)) = self.active_sounds.get(play_handle) {
            sink.play();
        }
    }

    pub fn stop_playback(&mut self, play_handle: usize) {
        if play_handle >= self.active_sounds.len() { return; }
        if let Some(sink) = self.active_sounds[play_handle].take() {
            sink.stop();
            self.free_list.push_back(play_handle);
        }
    }

    pub fn maintain(&mut self) {
        for i in 0..self.active_sounds.len() {
            let should_free = matches!(&self.active_sounds[i], Some(sink) if sink.empty());
            if should_free {
                self.active_sounds[i] = None;
                self.free_list.push_back(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SoundHandle::from_path("/definitely/not/here.wav");
        assert!(matches!(result, Err(AudioError::Io(_))));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        static GARBAGE: [u8; 16] = [0x42; 16];
        let result = SoundHandle::from_memory(&GARBAGE);
        assert!(matches!(result, Err(AudioError::Decoder(_))));
    }
}
