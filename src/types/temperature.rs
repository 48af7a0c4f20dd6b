// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature units and conversion.
//!
//! The accessory protocol only accepts Celsius, so readings reported in
//! Fahrenheit are converted before they are pushed.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Unit string for degrees Celsius as reported by ESPHome.
pub const CELSIUS: &str = "°C";

/// Unit string for degrees Fahrenheit as reported by ESPHome.
pub const FAHRENHEIT: &str = "°F";

/// Unit string for percentages.
pub const PERCENT: &str = "%";

/// A temperature unit.
///
/// # Examples
///
/// ```
/// use esphome_bridge::types::TemperatureUnit;
///
/// let unit: TemperatureUnit = "°F".parse().unwrap();
/// assert_eq!(unit, TemperatureUnit::Fahrenheit);
/// assert_eq!(unit.to_celsius(212.0), 100.0);
///
/// // Matching is exact
/// assert!("F".parse::<TemperatureUnit>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Returns the unit string as reported by ESPHome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => CELSIUS,
            Self::Fahrenheit => FAHRENHEIT,
        }
    }

    /// Parses an optional unit of measurement, `None` if it is not a
    /// temperature unit.
    #[must_use]
    pub fn from_unit(unit: Option<&str>) -> Option<Self> {
        unit.and_then(|u| u.parse().ok())
    }

    /// Converts a reading in this unit to degrees Celsius.
    #[must_use]
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => fahrenheit_to_celsius(value),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CELSIUS => Ok(Self::Celsius),
            FAHRENHEIT => Ok(Self::Fahrenheit),
            other => Err(ValueError::UnknownUnit(other.to_string())),
        }
    }
}

/// Converts degrees Fahrenheit to degrees Celsius.
///
/// # Examples
///
/// ```
/// use esphome_bridge::types::fahrenheit_to_celsius;
///
/// assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
/// assert!((fahrenheit_to_celsius(98.6) - 37.0).abs() < 0.01);
/// ```
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}
