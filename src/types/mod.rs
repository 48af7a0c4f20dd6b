// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types and pure conversions used by the binders.
//!
//! # Types
//!
//! - [`TemperatureUnit`] - Celsius/Fahrenheit, with [`fahrenheit_to_celsius`]
//! - [`AirQuality`] - Overall air quality level (0-5)
//! - [`Pollutant`] - Pollutants graded by [`european_aqi`]

mod air_quality;
mod temperature;

pub use air_quality::{AirQuality, Pollutant, european_aqi};
pub use temperature::{CELSIUS, FAHRENHEIT, PERCENT, TemperatureUnit, fahrenheit_to_celsius};
