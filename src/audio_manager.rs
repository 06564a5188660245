use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::sync::Arc;
use std::time::{Duration, Instant};
use std::{fs::File, io::Read};

fn load_bytes(path: &str) -> Option<Vec<u8>> {
    let mut f = File::open(path).ok()?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).ok()?;
    Some(buf)
}

fn load_bytes_any(paths: &[&str]) -> Option<Vec<u8>> {
    for p in paths {
        if let Some(b) = load_bytes(p) {
            return Some(b);
        }
    }
    None
}

/// Audio opcional: si no hay dispositivo o faltan los archivos, el juego
/// sigue en silencio.
pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bg_sink: Option<Sink>,
    foot_sink: Sink,
    step: Option<Arc<Vec<u8>>>,
    last_step: Instant,
    step_interval: Duration,
    last_paces: f32,
}

impl AudioManager {
    pub fn new() -> Option<Self> {
        let (_stream, handle) = OutputStream::try_default().ok()?;
        let foot_sink = Sink::try_new(&handle).ok()?;
        let mut am = Self {
            _stream,
            handle,
            bg_sink: None,
            foot_sink,
            step: None,
            last_step: Instant::now(),
            step_interval: Duration::from_millis(360),
            last_paces: 0.0,
        };
        am.step = load_bytes_any(&[
            "assets/step.wav",
            "assets/footstep.wav",
            "assets/sounds/step.wav",
        ])
        .map(Arc::new);
        am.play_music_loop_auto();
        Some(am)
    }

    fn play_music_loop_auto(&mut self) {
        if self.bg_sink.is_some() {
            return;
        }
        let candidates = [
            "assets/music_bg.wav",
            "assets/music.ogg",
            "assets/sounds/music.wav",
        ];
        if let Some(bytes) = load_bytes_any(&candidates) {
            if let Ok(dec) = Decoder::new_looped(Cursor::new(bytes)) {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.append(dec);
                    sink.set_volume(0.35);
                    self.bg_sink = Some(sink);
                }
            }
        }
    }

    /// Un paso suena cada cierto trecho caminado; `paces` viene con signo,
    /// aquí solo importa cuánto se movió desde el cuadro anterior.
    pub fn update(&mut self, paces: f32) {
        let moved = (paces - self.last_paces).abs();
        self.last_paces = paces;
        if moved > 0.0 && self.last_step.elapsed() >= self.step_interval {
            self.last_step = Instant::now();
            self.play_step();
        }
    }

    fn play_step(&self) {
        if let Some(d) = self.step.clone() {
            if let Ok(dec) = Decoder::new(Cursor::new(d.as_ref().clone())) {
                self.foot_sink.append(dec);
            }
        }
    }
}
