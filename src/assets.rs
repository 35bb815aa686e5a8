//! Image and sound loading.
//!
//! Loading never stops a game from starting. [`Image::load`] and
//! [`Sound::load`] log failures and hand back an inert placeholder: a 1×1
//! transparent image, or a sound that plays nothing. Use the `try_load`
//! variants to handle the error yourself.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use sdl2::audio::{AudioCVT, AudioFormat, AudioSpecWAV};

use crate::audio::{MIXER_CHANNELS, MIXER_FREQUENCY};
use crate::graphics::Surface;

/// A decoded image.
#[derive(Clone, Debug)]
pub struct Image {
    surface: Surface,
}

impl Image {
    /// Loads an image, falling back to a 1×1 transparent placeholder.
    pub fn load(path: impl AsRef<Path>) -> Image {
        let path = path.as_ref();
        Image::try_load(path).unwrap_or_else(|e| {
            log::warn!("{:#}", e);
            Image::placeholder()
        })
    }

    /// Loads and decodes an image file.
    pub fn try_load(path: impl AsRef<Path>) -> anyhow::Result<Image> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to load image '{}'", path.display()))?;
        decode(&bytes).with_context(|| format!("failed to load image '{}'", path.display()))
    }

    /// Wraps an existing surface.
    pub fn from_surface(surface: Surface) -> Image {
        Image { surface }
    }

    fn placeholder() -> Image {
        Image::from_surface(Surface::new(1, 1))
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(feature = "png-decoder")]
fn decode(bytes: &[u8]) -> anyhow::Result<Image> {
    let (header, data) =
        png_decoder::decode(bytes).map_err(|e| anyhow::anyhow!("invalid png: {:?}", e))?;
    let surface = Surface::from_rgba(header.width, header.height, data)
        .context("decoded pixel data does not match the image size")?;
    Ok(Image::from_surface(surface))
}

#[cfg(not(feature = "png-decoder"))]
fn decode(_bytes: &[u8]) -> anyhow::Result<Image> {
    anyhow::bail!("image decoding requires the `png-decoder` feature")
}

/// A sound converted to the mixer's sample format.
#[derive(Clone, Debug, Default)]
pub struct Sound {
    samples: Option<Arc<[i16]>>,
}

impl Sound {
    /// Loads a WAV file. On failure the sound is disabled and playing it
    /// does nothing.
    pub fn load(path: impl AsRef<Path>) -> Sound {
        let path = path.as_ref();
        Sound::try_load(path).unwrap_or_else(|e| {
            log::warn!("{:#}", e);
            Sound::default()
        })
    }

    /// Loads a WAV file and converts it for playback.
    pub fn try_load(path: impl AsRef<Path>) -> anyhow::Result<Sound> {
        let path = path.as_ref();
        let context = || format!("failed to load sound '{}'", path.display());
        let wav = AudioSpecWAV::load_wav(path)
            .map_err(anyhow::Error::msg)
            .with_context(context)?;
        let cvt = AudioCVT::new(
            wav.format,
            wav.channels,
            wav.freq,
            AudioFormat::s16_sys(),
            MIXER_CHANNELS,
            MIXER_FREQUENCY,
        )
        .map_err(anyhow::Error::msg)
        .with_context(context)?;
        let bytes = cvt.convert(wav.buffer().to_vec());
        let samples = bytes
            .chunks_exact(2)
            .map(|b| i16::from_ne_bytes([b[0], b[1]]))
            .collect();
        Ok(Sound {
            samples: Some(samples),
        })
    }

    /// Returns true if the sound has data to play.
    pub fn is_loaded(&self) -> bool {
        self.samples.is_some()
    }

    pub(crate) fn samples(&self) -> Option<Arc<[i16]>> {
        self.samples.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_image_becomes_placeholder() {
        let image = Image::load("definitely/not/here.png");
        assert_eq!((image.width(), image.height()), (1, 1));
        assert_eq!(image.surface().data(), &[0, 0, 0, 0]);
    }

    #[test]
    fn corrupt_image_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a png at all").unwrap();
        let err = Image::try_load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to load image"));
        assert_eq!(Image::load(file.path()).width(), 1);
    }

    #[test]
    fn missing_sound_is_disabled() {
        assert!(!Sound::load("definitely/not/here.wav").is_loaded());
        assert!(Sound::try_load("definitely/not/here.wav").is_err());
    }

    #[test]
    fn corrupt_sound_is_disabled() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"RIFF....WAVEjunk").unwrap();
        assert!(!Sound::load(file.path()).is_loaded());
    }
}
