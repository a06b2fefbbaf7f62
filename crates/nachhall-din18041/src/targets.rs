//! Volume-scaled DIN 18041 target database.
//!
//! Each room category carries one profile record: a base RT60 at the 100 m³
//! reference volume, a volume-scaling exponent, a tolerance band, and
//! per-octave adjustment factors. Categories whose acoustic needs grow
//! faster with size (music, sport) carry larger exponents; speech rooms
//! trade low-band warmth against high-band clarity in their adjustment
//! tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reference volume the base RT60 values are defined at, in m³.
pub const REFERENCE_VOLUME_M3: f32 = 100.0;

/// Octave-band center frequencies DIN 18041 targets are defined for,
/// ascending.
pub const OCTAVE_BANDS_HZ: [u32; 6] = [125, 250, 500, 1000, 2000, 4000];

/// Errors from target computation.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum TargetError {
    /// Room volume must be positive and finite.
    #[error("room volume must be positive, got {0} m³")]
    InvalidVolume(f32),

    /// The frequency is not one of the DIN 18041 octave bands.
    #[error("no DIN 18041 target defined for {0} Hz")]
    UnknownBand(u32),
}

/// Room-use category per DIN 18041. Closed set; never extended at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Teaching rooms for speech communication.
    Classroom,
    /// Open and cellular office space.
    Office,
    /// Meeting rooms with conversational speech.
    ConferenceRoom,
    /// Large rooms for frontal speech.
    LectureHall,
    /// Rehearsal and performance rooms.
    MusicRoom,
    /// Gymnasiums and sports halls.
    SportsHall,
}

impl RoomType {
    /// All categories, for iteration.
    pub const ALL: [RoomType; 6] = [
        RoomType::Classroom,
        RoomType::Office,
        RoomType::ConferenceRoom,
        RoomType::LectureHall,
        RoomType::MusicRoom,
        RoomType::SportsHall,
    ];

    /// The category's target profile record.
    pub fn profile(self) -> &'static RoomProfile {
        match self {
            RoomType::Classroom => &CLASSROOM,
            RoomType::Office => &OFFICE,
            RoomType::ConferenceRoom => &CONFERENCE_ROOM,
            RoomType::LectureHall => &LECTURE_HALL,
            RoomType::MusicRoom => &MUSIC_ROOM,
            RoomType::SportsHall => &SPORTS_HALL,
        }
    }
}

/// Target configuration for one room category.
///
/// `band_adjustments` are multiplicative factors indexed like
/// [`OCTAVE_BANDS_HZ`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomProfile {
    /// Target RT60 in seconds at the 100 m³ reference volume, 500 Hz.
    pub base_rt60_s: f32,
    /// Exponent of the `(volume / 100)` scaling term.
    pub volume_exponent: f32,
    /// Tolerance band in seconds, applied symmetrically.
    pub tolerance_s: f32,
    /// Per-band multiplicative adjustments, 125 Hz to 4 kHz.
    pub band_adjustments: [f32; 6],
}

const CLASSROOM: RoomProfile = RoomProfile {
    base_rt60_s: 0.6,
    volume_exponent: 0.08,
    tolerance_s: 0.10,
    band_adjustments: [1.2, 1.1, 1.0, 1.0, 0.9, 0.9],
};

const OFFICE: RoomProfile = RoomProfile {
    base_rt60_s: 0.5,
    volume_exponent: 0.05,
    tolerance_s: 0.10,
    band_adjustments: [1.1, 1.05, 1.0, 1.0, 0.95, 0.9],
};

const CONFERENCE_ROOM: RoomProfile = RoomProfile {
    base_rt60_s: 0.55,
    volume_exponent: 0.06,
    tolerance_s: 0.10,
    band_adjustments: [1.15, 1.05, 1.0, 1.0, 0.95, 0.9],
};

const LECTURE_HALL: RoomProfile = RoomProfile {
    base_rt60_s: 0.7,
    volume_exponent: 0.10,
    tolerance_s: 0.15,
    band_adjustments: [1.2, 1.1, 1.0, 1.0, 0.9, 0.85],
};

const MUSIC_ROOM: RoomProfile = RoomProfile {
    base_rt60_s: 1.0,
    volume_exponent: 0.15,
    tolerance_s: 0.20,
    band_adjustments: [1.2, 1.1, 1.0, 1.0, 1.0, 0.9],
};

const SPORTS_HALL: RoomProfile = RoomProfile {
    base_rt60_s: 1.8,
    volume_exponent: 0.15,
    tolerance_s: 0.30,
    band_adjustments: [1.15, 1.1, 1.0, 1.0, 0.95, 0.9],
};

/// A per-band regulatory target with its tolerance window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Din18041Target {
    /// Octave-band center frequency in Hz.
    pub frequency_hz: u32,
    /// Target RT60 in seconds, volume-scaled and band-adjusted.
    pub target_rt60: f32,
    /// Symmetric tolerance in seconds.
    pub tolerance_seconds: f32,
}

impl Din18041Target {
    /// Lowest compliant RT60.
    pub fn lower_bound(&self) -> f32 {
        self.target_rt60 - self.tolerance_seconds
    }

    /// Highest compliant RT60.
    pub fn upper_bound(&self) -> f32 {
        self.target_rt60 + self.tolerance_seconds
    }
}

/// Target for one category, volume, and octave band.
///
/// `target = base * (volume / 100)^exponent * band_adjustment`.
pub fn target(
    room_type: RoomType,
    volume_m3: f32,
    frequency_hz: u32,
) -> Result<Din18041Target, TargetError> {
    if volume_m3 <= 0.0 || !volume_m3.is_finite() {
        return Err(TargetError::InvalidVolume(volume_m3));
    }
    let band = OCTAVE_BANDS_HZ
        .iter()
        .position(|&f| f == frequency_hz)
        .ok_or(TargetError::UnknownBand(frequency_hz))?;

    let profile = room_type.profile();
    let scale = (volume_m3 / REFERENCE_VOLUME_M3).powf(profile.volume_exponent);

    Ok(Din18041Target {
        frequency_hz,
        target_rt60: profile.base_rt60_s * scale * profile.band_adjustments[band],
        tolerance_seconds: profile.tolerance_s,
    })
}

/// Targets for all octave bands, ascending frequency.
pub fn targets(room_type: RoomType, volume_m3: f32) -> Result<Vec<Din18041Target>, TargetError> {
    OCTAVE_BANDS_HZ
        .iter()
        .map(|&f| target(room_type, volume_m3, f))
        .collect()
}
