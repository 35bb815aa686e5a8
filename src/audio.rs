//! Sound output.
//!
//! A single SDL2 playback device runs a small software mixer. Every
//! [`play`](Mixer::play) adds a voice; the audio callback sums all active
//! voices and drops the ones that have finished.

use std::sync::Arc;

use anyhow::Context;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use sdl2::AudioSubsystem;

use crate::assets::Sound;

/// Output sample rate of the mixer. Sounds are converted to it on load.
pub const MIXER_FREQUENCY: i32 = 44_100;
/// Interleaved output channels of the mixer.
pub const MIXER_CHANNELS: u8 = 2;

struct Voice {
    samples: Arc<[i16]>,
    pos: usize,
}

struct MixerCallback {
    voices: Vec<Voice>,
}

impl AudioCallback for MixerCallback {
    type Channel = i16;

    fn callback(&mut self, out: &mut [i16]) {
        mix_into(out, &mut self.voices);
    }
}

/// Sums every voice into `out`, advancing their positions and dropping the
/// finished ones.
fn mix_into(out: &mut [i16], voices: &mut Vec<Voice>) {
    out.fill(0);
    for voice in voices.iter_mut() {
        let remaining = &voice.samples[voice.pos..];
        let n = remaining.len().min(out.len());
        for (o, s) in out.iter_mut().zip(&remaining[..n]) {
            *o = o.saturating_add(*s);
        }
        voice.pos += n;
    }
    voices.retain(|v| v.pos < v.samples.len());
}

/// An open playback device.
pub struct Mixer {
    device: AudioDevice<MixerCallback>,
    _subsystem: AudioSubsystem,
}

impl Mixer {
    /// Opens the default playback device at the mixer format and starts it.
    pub fn open(subsystem: AudioSubsystem) -> anyhow::Result<Mixer> {
        let desired = AudioSpecDesired {
            freq: Some(MIXER_FREQUENCY),
            channels: Some(MIXER_CHANNELS),
            samples: None,
        };
        let device = subsystem
            .open_playback(None, &desired, |spec| {
                log::debug!(
                    "audio device opened: {} Hz, {} channels",
                    spec.freq,
                    spec.channels
                );
                MixerCallback { voices: Vec::new() }
            })
            .map_err(anyhow::Error::msg)
            .context("failed to open audio device")?;
        device.resume();
        Ok(Mixer {
            device,
            _subsystem: subsystem,
        })
    }

    /// Starts playing `sound`. Does nothing if the sound failed to load.
    pub fn play(&mut self, sound: &Sound) {
        if let Some(samples) = sound.samples() {
            self.device.lock().voices.push(Voice { samples, pos: 0 });
        }
    }

    /// Number of sounds still playing.
    pub fn active_voices(&mut self) -> usize {
        self.device.lock().voices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(samples: &[i16]) -> Voice {
        Voice {
            samples: samples.into(),
            pos: 0,
        }
    }

    #[test]
    fn voices_are_summed_and_dropped() {
        let mut voices = vec![voice(&[1, 2, 3]), voice(&[10, 10, 10, 10, 10, 10])];
        let mut out = [0_i16; 4];
        mix_into(&mut out, &mut voices);
        assert_eq!(out, [11, 12, 13, 10]);
        assert_eq!(voices.len(), 1);

        mix_into(&mut out, &mut voices);
        assert_eq!(out, [10, 10, 0, 0]);
        assert!(voices.is_empty());
    }

    #[test]
    fn mixing_saturates() {
        let mut voices = vec![voice(&[i16::MAX, i16::MIN]), voice(&[100, -100])];
        let mut out = [0_i16; 2];
        mix_into(&mut out, &mut voices);
        assert_eq!(out, [i16::MAX, i16::MIN]);
    }
}
