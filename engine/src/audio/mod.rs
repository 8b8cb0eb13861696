//! Audio Module
//!
//! Collision sound cues played through rodio. A cue fires only when the
//! collision's impact velocity clears the cue's threshold; volume scales
//! linearly with impact strength up to a cap. Playback is fire-and-forget.
//!
//! A missing audio device or missing sound files degrade the bank to a
//! silent no-op rather than taking the playground down.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// The three collision sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Generic "hit" - spawned boxes
    Generic,
    /// Metallic clang - spawned spheres
    Metal,
    /// Glass ping - the marble
    Glass,
}

impl SoundCue {
    /// File stem of the cue's clip inside the sounds directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            SoundCue::Generic => "hit",
            SoundCue::Metal => "metal",
            SoundCue::Glass => "glass",
        }
    }
}

/// Gating and volume tuning for collision sounds.
///
/// `Default` is the playground's built-in tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AudioTuning {
    /// Minimum impact velocity for the generic and metal cues
    pub generic_threshold: f32,
    /// Minimum impact velocity for the glass cue
    pub glass_threshold: f32,
    /// Volume per unit of impact velocity below the cap point
    pub volume_scale: f32,
    /// Impact velocity at and beyond which volume is capped
    pub full_volume_impact: f32,
    /// Capped volume
    pub max_volume: f32,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self {
            generic_threshold: 1.5,
            glass_threshold: 0.5,
            volume_scale: 0.1,
            full_volume_impact: 10.0,
            max_volume: 0.9,
        }
    }
}

impl AudioTuning {
    /// Impact-velocity threshold below which the cue stays silent.
    pub fn threshold_for(&self, cue: SoundCue) -> f32 {
        match cue {
            SoundCue::Generic | SoundCue::Metal => self.generic_threshold,
            SoundCue::Glass => self.glass_threshold,
        }
    }

    /// Playback volume for an impact, or `None` when gated out.
    pub fn volume_for_impact(&self, cue: SoundCue, impact_velocity: f32) -> Option<f32> {
        if impact_velocity <= self.threshold_for(cue) {
            return None;
        }
        if impact_velocity < self.full_volume_impact {
            Some(impact_velocity * self.volume_scale)
        } else {
            Some(self.max_volume)
        }
    }
}

/// Errors from loading the sound bank.
#[derive(Debug)]
pub enum AudioError {
    /// Standard I/O error while reading a clip file.
    Io(std::io::Error),
    /// No usable audio output device.
    Output(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Io(e) => write!(f, "IO error: {e}"),
            AudioError::Output(e) => write!(f, "audio output unavailable: {e}"),
        }
    }
}

impl std::error::Error for AudioError {}

impl From<std::io::Error> for AudioError {
    fn from(e: std::io::Error) -> Self {
        AudioError::Io(e)
    }
}

/// Owns the output stream and the encoded clip bytes for all cues.
pub struct SoundBank {
    // The stream must stay alive for playback; dropping it silences the bank.
    output: Option<(OutputStream, OutputStreamHandle)>,
    clips: Vec<(SoundCue, Arc<[u8]>)>,
    tuning: AudioTuning,
}

impl SoundBank {
    /// Load `hit.mp3`, `metal.mp3` and `glass.mp3` from a directory and open
    /// the default audio output.
    pub fn load(sounds_dir: &Path, tuning: AudioTuning) -> Result<Self, AudioError> {
        let output =
            OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;

        let mut clips = Vec::new();
        for cue in [SoundCue::Generic, SoundCue::Metal, SoundCue::Glass] {
            let path = sounds_dir.join(format!("{}.mp3", cue.file_stem()));
            let bytes = std::fs::read(&path)?;
            clips.push((cue, Arc::from(bytes.into_boxed_slice())));
        }

        Ok(Self {
            output: Some(output),
            clips,
            tuning,
        })
    }

    /// A bank that never plays anything. Used headless and as the fallback
    /// when loading fails.
    pub fn disabled() -> Self {
        Self {
            output: None,
            clips: Vec::new(),
            tuning: AudioTuning::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn tuning(&self) -> &AudioTuning {
        &self.tuning
    }

    /// Play a cue for a collision, subject to gating. Decode or playback
    /// problems are ignored: sound is best-effort.
    pub fn play(&self, cue: SoundCue, impact_velocity: f32) {
        let Some(volume) = self.tuning.volume_for_impact(cue, impact_velocity) else {
            return;
        };
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Some(bytes) = self
            .clips
            .iter()
            .find(|(c, _)| *c == cue)
            .map(|(_, bytes)| Arc::clone(bytes))
        else {
            return;
        };

        if let Ok(decoder) = Decoder::new(Cursor::new(bytes.to_vec())) {
            let _ = handle.play_raw(decoder.convert_samples::<f32>().amplify(volume));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gating_below_threshold() {
        let tuning = AudioTuning::default();
        assert_eq!(tuning.volume_for_impact(SoundCue::Metal, 1.0), None);
        assert_eq!(tuning.volume_for_impact(SoundCue::Generic, 1.5), None);
        // Glass has the lower threshold.
        assert!(tuning.volume_for_impact(SoundCue::Glass, 1.0).is_some());
        assert_eq!(tuning.volume_for_impact(SoundCue::Glass, 0.5), None);
    }

    #[test]
    fn test_volume_proportional_to_impact() {
        let tuning = AudioTuning::default();
        let volume = tuning.volume_for_impact(SoundCue::Metal, 4.0).unwrap();
        assert!((volume - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_volume_capped_at_max() {
        let tuning = AudioTuning::default();
        assert_eq!(tuning.volume_for_impact(SoundCue::Metal, 50.0), Some(0.9));
        assert_eq!(tuning.volume_for_impact(SoundCue::Glass, 10.0), Some(0.9));
    }

    #[test]
    fn test_disabled_bank_is_silent_noop() {
        let bank = SoundBank::disabled();
        assert!(!bank.is_enabled());
        // Must not panic even for impacts that would play loudly.
        bank.play(SoundCue::Glass, 100.0);
    }
}
