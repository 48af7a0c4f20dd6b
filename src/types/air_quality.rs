// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Air quality levels and the European air quality index.
//!
//! Pollutant densities are expected in µg/m³; no unit conversion is done.

use std::fmt;

use crate::accessory::CharacteristicKind;

/// Overall air quality level as exposed by the accessory protocol.
///
/// `Unknown` (0) is the sentinel for "no level could be computed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum AirQuality {
    /// No level available.
    Unknown = 0,
    /// Excellent air quality.
    Excellent = 1,
    /// Good air quality.
    Good = 2,
    /// Fair air quality.
    Fair = 3,
    /// Inferior air quality.
    Inferior = 4,
    /// Poor air quality.
    Poor = 5,
}

impl AirQuality {
    /// Returns the numeric level (0-5).
    #[must_use]
    pub const fn value(&self) -> u8 {
        *self as u8
    }

    /// Converts a reported index level into an air quality level.
    ///
    /// The reading is rounded to the nearest level and clamped to 0-5.
    /// NaN yields [`AirQuality::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use esphome_bridge::types::AirQuality;
    ///
    /// assert_eq!(AirQuality::from_level(2.6), AirQuality::Fair);
    /// assert_eq!(AirQuality::from_level(12.0), AirQuality::Poor);
    /// assert_eq!(AirQuality::from_level(-1.0), AirQuality::Unknown);
    /// ```
    #[must_use]
    pub fn from_level(level: f64) -> Self {
        let level = level.round();
        if level.is_nan() || level <= 0.0 {
            Self::Unknown
        } else if level <= 1.0 {
            Self::Excellent
        } else if level <= 2.0 {
            Self::Good
        } else if level <= 3.0 {
            Self::Fair
        } else if level <= 4.0 {
            Self::Inferior
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for AirQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "Unknown",
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Inferior => "Inferior",
            Self::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// A pollutant whose density an air quality sensor can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    /// Particulate matter under 2.5 µm.
    Pm25,
    /// Particulate matter under 10 µm.
    Pm10,
    /// Ozone.
    Ozone,
    /// Nitrogen dioxide.
    NitrogenDioxide,
    /// Sulphur dioxide.
    SulphurDioxide,
    /// Volatile organic compounds.
    Voc,
}

impl Pollutant {
    /// Returns the density characteristic that carries this pollutant.
    #[must_use]
    pub const fn density_characteristic(&self) -> CharacteristicKind {
        match self {
            Self::Pm25 => CharacteristicKind::Pm25Density,
            Self::Pm10 => CharacteristicKind::Pm10Density,
            Self::Ozone => CharacteristicKind::OzoneDensity,
            Self::NitrogenDioxide => CharacteristicKind::No2Density,
            Self::SulphurDioxide => CharacteristicKind::So2Density,
            Self::Voc => CharacteristicKind::VocDensity,
        }
    }

    /// Returns the pollutant carried by a density characteristic.
    #[must_use]
    pub const fn from_density(kind: CharacteristicKind) -> Option<Self> {
        match kind {
            CharacteristicKind::Pm25Density => Some(Self::Pm25),
            CharacteristicKind::Pm10Density => Some(Self::Pm10),
            CharacteristicKind::OzoneDensity => Some(Self::Ozone),
            CharacteristicKind::No2Density => Some(Self::NitrogenDioxide),
            CharacteristicKind::So2Density => Some(Self::SulphurDioxide),
            CharacteristicKind::VocDensity => Some(Self::Voc),
            _ => None,
        }
    }

    /// Upper bounds of the Good, Fair and Inferior bands in µg/m³.
    ///
    /// `None` for pollutants the European scheme does not grade.
    const fn european_bands(self) -> Option<[f64; 3]> {
        match self {
            Self::Pm25 => Some([10.0, 20.0, 25.0]),
            Self::Pm10 => Some([20.0, 40.0, 50.0]),
            Self::Ozone => Some([50.0, 100.0, 130.0]),
            Self::NitrogenDioxide => Some([40.0, 90.0, 120.0]),
            Self::SulphurDioxide => Some([100.0, 200.0, 350.0]),
            Self::Voc => None,
        }
    }
}

/// Computes the European air quality level for one pollutant reading.
///
/// Each band is half-open: a reading equal to a band's upper bound falls
/// into the next, worse band. The scheme never yields
/// [`AirQuality::Excellent`]; the best reachable level is
/// [`AirQuality::Good`]. Pollutants without bands yield
/// [`AirQuality::Unknown`].
///
/// # Examples
///
/// ```
/// use esphome_bridge::types::{AirQuality, Pollutant, european_aqi};
///
/// assert_eq!(european_aqi(Pollutant::Pm25, 9.9), AirQuality::Good);
/// assert_eq!(european_aqi(Pollutant::Pm25, 25.0), AirQuality::Poor);
/// assert_eq!(european_aqi(Pollutant::Voc, 500.0), AirQuality::Unknown);
/// ```
#[must_use]
pub fn european_aqi(pollutant: Pollutant, concentration: f64) -> AirQuality {
    let Some([good, fair, inferior]) = pollutant.european_bands() else {
        return AirQuality::Unknown;
    };

    if concentration < good {
        AirQuality::Good
    } else if concentration < fair {
        AirQuality::Fair
    } else if concentration < inferior {
        AirQuality::Inferior
    } else {
        AirQuality::Poor
    }
}
