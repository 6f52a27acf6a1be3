use defmt::Format;
use lora_phy::mod_params;
use snafu::Snafu;

/// US region center frequency (905.2 MHz).
pub const LORA_FREQUENCY_US_IN_HZ: u32 = 905_200_000;

/// Channel bandwidths supported by the gateway radio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub enum Bandwidth {
    _7_81KHz,
    _10_42KHz,
    _15_63KHz,
    _20_83KHz,
    _31_25KHz,
    _41_67KHz,
    _62_5KHz,
    _125KHz,
    _250KHz,
    _500KHz,
}

impl Bandwidth {
    /// Validates a raw bandwidth value in kHz.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidBandwidth` for any value outside the
    /// supported set.
    #[allow(clippy::float_cmp)]
    pub fn try_from_khz(khz: f32) -> Result<Self, ProfileError> {
        if khz == 7.81 {
            Ok(Self::_7_81KHz)
        } else if khz == 10.42 {
            Ok(Self::_10_42KHz)
        } else if khz == 15.63 {
            Ok(Self::_15_63KHz)
        } else if khz == 20.83 {
            Ok(Self::_20_83KHz)
        } else if khz == 31.25 {
            Ok(Self::_31_25KHz)
        } else if khz == 41.67 {
            Ok(Self::_41_67KHz)
        } else if khz == 62.5 {
            Ok(Self::_62_5KHz)
        } else if khz == 125.0 {
            Ok(Self::_125KHz)
        } else if khz == 250.0 {
            Ok(Self::_250KHz)
        } else if khz == 500.0 {
            Ok(Self::_500KHz)
        } else {
            Err(ProfileError::InvalidBandwidth { khz })
        }
    }

    #[must_use]
    pub const fn khz(self) -> f32 {
        match self {
            Self::_7_81KHz => 7.81,
            Self::_10_42KHz => 10.42,
            Self::_15_63KHz => 15.63,
            Self::_20_83KHz => 20.83,
            Self::_31_25KHz => 31.25,
            Self::_41_67KHz => 41.67,
            Self::_62_5KHz => 62.5,
            Self::_125KHz => 125.0,
            Self::_250KHz => 250.0,
            Self::_500KHz => 500.0,
        }
    }

    #[must_use]
    pub const fn hz(self) -> u32 {
        match self {
            Self::_7_81KHz => 7_810,
            Self::_10_42KHz => 10_420,
            Self::_15_63KHz => 15_630,
            Self::_20_83KHz => 20_830,
            Self::_31_25KHz => 31_250,
            Self::_41_67KHz => 41_670,
            Self::_62_5KHz => 62_500,
            Self::_125KHz => 125_000,
            Self::_250KHz => 250_000,
            Self::_500KHz => 500_000,
        }
    }
}

impl From<Bandwidth> for mod_params::Bandwidth {
    fn from(bandwidth: Bandwidth) -> Self {
        match bandwidth {
            Bandwidth::_7_81KHz => Self::_7KHz,
            Bandwidth::_10_42KHz => Self::_10KHz,
            Bandwidth::_15_63KHz => Self::_15KHz,
            Bandwidth::_20_83KHz => Self::_20KHz,
            Bandwidth::_31_25KHz => Self::_31KHz,
            Bandwidth::_41_67KHz => Self::_41KHz,
            Bandwidth::_62_5KHz => Self::_62KHz,
            Bandwidth::_125KHz => Self::_125KHz,
            Bandwidth::_250KHz => Self::_250KHz,
            Bandwidth::_500KHz => Self::_500KHz,
        }
    }
}

/// Spreading factors supported by the gateway radio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub enum SpreadingFactor {
    _5,
    _6,
    _7,
    _8,
    _9,
    _10,
    _11,
    _12,
}

impl SpreadingFactor {
    #[must_use]
    pub const fn factor(self) -> u8 {
        match self {
            Self::_5 => 5,
            Self::_6 => 6,
            Self::_7 => 7,
            Self::_8 => 8,
            Self::_9 => 9,
            Self::_10 => 10,
            Self::_11 => 11,
            Self::_12 => 12,
        }
    }
}

impl TryFrom<u8> for SpreadingFactor {
    type Error = ProfileError;

    fn try_from(factor: u8) -> Result<Self, Self::Error> {
        match factor {
            5 => Ok(Self::_5),
            6 => Ok(Self::_6),
            7 => Ok(Self::_7),
            8 => Ok(Self::_8),
            9 => Ok(Self::_9),
            10 => Ok(Self::_10),
            11 => Ok(Self::_11),
            12 => Ok(Self::_12),
            _ => Err(ProfileError::InvalidSpreadingFactor { factor }),
        }
    }
}

impl From<SpreadingFactor> for mod_params::SpreadingFactor {
    fn from(spreading_factor: SpreadingFactor) -> Self {
        match spreading_factor {
            SpreadingFactor::_5 => Self::_5,
            SpreadingFactor::_6 => Self::_6,
            SpreadingFactor::_7 => Self::_7,
            SpreadingFactor::_8 => Self::_8,
            SpreadingFactor::_9 => Self::_9,
            SpreadingFactor::_10 => Self::_10,
            SpreadingFactor::_11 => Self::_11,
            SpreadingFactor::_12 => Self::_12,
        }
    }
}

/// Forward-error-correction ratios (4/5 through 4/8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub enum CodingRate {
    _4_5,
    _4_6,
    _4_7,
    _4_8,
}

impl CodingRate {
    #[must_use]
    pub const fn denominator(self) -> u8 {
        match self {
            Self::_4_5 => 5,
            Self::_4_6 => 6,
            Self::_4_7 => 7,
            Self::_4_8 => 8,
        }
    }
}

impl TryFrom<u8> for CodingRate {
    type Error = ProfileError;

    fn try_from(denominator: u8) -> Result<Self, Self::Error> {
        match denominator {
            5 => Ok(Self::_4_5),
            6 => Ok(Self::_4_6),
            7 => Ok(Self::_4_7),
            8 => Ok(Self::_4_8),
            _ => Err(ProfileError::InvalidCodingRate { denominator }),
        }
    }
}

impl From<CodingRate> for mod_params::CodingRate {
    fn from(coding_rate: CodingRate) -> Self {
        match coding_rate {
            CodingRate::_4_5 => Self::_4_5,
            CodingRate::_4_6 => Self::_4_6,
            CodingRate::_4_7 => Self::_4_7,
            CodingRate::_4_8 => Self::_4_8,
        }
    }
}

/// A complete modulation selection: one bandwidth, one spreading factor,
/// one coding rate. No joint-validity rule between the three is enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Format)]
pub struct RadioProfile {
    pub bandwidth: Bandwidth,
    pub spreading_factor: SpreadingFactor,
    pub coding_rate: CodingRate,
}

impl RadioProfile {
    #[must_use]
    pub const fn new(
        bandwidth: Bandwidth,
        spreading_factor: SpreadingFactor,
        coding_rate: CodingRate,
    ) -> Self {
        Self {
            bandwidth,
            spreading_factor,
            coding_rate,
        }
    }

    /// Builds a profile from raw configuration values.
    ///
    /// # Errors
    ///
    /// Returns a `ProfileError` if any of the three values falls outside its
    /// supported set.
    pub fn from_raw(khz: f32, factor: u8, denominator: u8) -> Result<Self, ProfileError> {
        Ok(Self {
            bandwidth: Bandwidth::try_from_khz(khz)?,
            spreading_factor: SpreadingFactor::try_from(factor)?,
            coding_rate: CodingRate::try_from(denominator)?,
        })
    }
}

#[derive(Debug, Snafu, Format)]
pub enum ProfileError {
    #[snafu(display("Unsupported bandwidth: {} kHz", khz))]
    InvalidBandwidth { khz: f32 },
    #[snafu(display("Unsupported spreading factor: {}", factor))]
    InvalidSpreadingFactor { factor: u8 },
    #[snafu(display("Unsupported coding rate: 4/{}", denominator))]
    InvalidCodingRate { denominator: u8 },
}
