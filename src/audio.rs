use log::{debug, warn};
use tinyaudio::prelude::*;

const PITCH: f32 = 220.0;

/// Square-wave tone generator, started and stopped by the sound timer.
pub struct Beeper {
    inner: Option<Box<dyn BaseAudioOutputDevice>>,
    params: OutputDeviceParameters,
}

impl Beeper {
    pub fn new() -> Self {
        Self {
            inner: None,
            params: OutputDeviceParameters {
                channels_count: 2,
                sample_rate: 44100,
                channel_sample_count: 4410,
            },
        }
    }

    pub fn set_tone(&mut self, on: bool) {
        if on {
            self.start();
        } else {
            self.stop();
        }
    }

    fn start(&mut self) {
        if self.inner.is_some() {
            return;
        }
        let params = self.params;
        let device = run_output_device(params, {
            let mut clock = 0f32;
            move |data| {
                for samples in data.chunks_mut(params.channels_count) {
                    clock = (clock + 1.0) % params.sample_rate as f32;
                    let phase = (clock * PITCH / params.sample_rate as f32).fract();
                    let value = if phase < 0.5 { 0.2 } else { -0.2 };
                    for sample in samples {
                        *sample = value;
                    }
                }
            }
        });
        match device {
            Ok(device) => {
                debug!("Tone started");
                self.inner = Some(device);
            }
            Err(e) => warn!("Audio device unavailable [{e}]"),
        }
    }

    fn stop(&mut self) {
        self.inner.take();
    }
}

impl Default for Beeper {
    fn default() -> Self {
        Self::new()
    }
}
