//! # Audio Module
//!
//! Generative background music loop.
//!
//! A detached thread feeds a rodio sink with a four-step chord/bass
//! pattern. The loop shares nothing with the turn engine; the game only
//! signals start and stop.

use log::warn;
use rodio::source::{SineWave, Source, Zero};
use rodio::{OutputStream, Sink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Quarter-note length at 100 BPM.
const STEP: Duration = Duration::from_millis(600);

/// Eighth-note length, how long each hit rings.
const HIT: Duration = Duration::from_millis(300);

/// Chord roots, cycled per step: C3, Eb3, G3, Bb3.
const PATTERN: [f32; 4] = [130.81, 155.56, 196.00, 233.08];

/// Bass line, cycled per step: C2, C2, G2, C2.
const BASS: [f32; 4] = [65.41, 65.41, 98.00, 65.41];

/// Handle to the background music loop.
///
/// Dropping the handle stops the loop.
pub struct MusicPlayer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MusicPlayer {
    /// Starts the music loop on a background thread.
    ///
    /// A missing or failing audio device is logged and otherwise ignored;
    /// the game runs fine in silence.
    pub fn start() -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            let (_stream, stream_handle) = match OutputStream::try_default() {
                Ok(out) => out,
                Err(e) => {
                    warn!("no audio output available, music disabled: {e}");
                    return;
                }
            };
            let sink = match Sink::try_new(&stream_handle) {
                Ok(sink) => sink,
                Err(e) => {
                    warn!("failed to open audio sink, music disabled: {e}");
                    return;
                }
            };

            let mut step = 0usize;
            while !thread_stop.load(Ordering::Relaxed) {
                for _ in 0..4 {
                    queue_step(&sink, step);
                    step += 1;
                }
                sink.sleep_until_end();
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stops the loop and waits for the audio thread to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Appends one pattern step to the sink: an eighth-note chord and bass
/// hit, then an eighth note of rest.
fn queue_step(sink: &Sink, step: usize) {
    // Chord tones voiced one and two octaves above the pattern roots.
    let high = PATTERN[step % 4] * 2.0;
    let higher = PATTERN[(step + 2) % 4] * 4.0;
    let bass = BASS[step % 4];

    let hit = SineWave::new(high)
        .amplify(0.2)
        .mix(SineWave::new(higher).amplify(0.2))
        .mix(SineWave::new(bass).amplify(0.4))
        .take_duration(HIT);
    sink.append(hit);

    let rest = Zero::<f32>::new(1, 44_100).take_duration(STEP - HIT);
    sink.append(rest);
}
