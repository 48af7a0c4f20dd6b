// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single sensor reading.

use serde::Deserialize;

/// One state event emitted by a sensor entity.
///
/// A reading may be undefined: the device reports a missing state while a
/// sensor warms up or after a read failure. ESPHome encodes that either
/// with the `missingState` flag or with a NaN value; both become `None`.
///
/// # Examples
///
/// ```
/// use esphome_bridge::entity::SensorState;
///
/// assert_eq!(SensorState::new(21.5).value(), Some(21.5));
/// assert_eq!(SensorState::new(f64::NAN).value(), None);
/// assert_eq!(SensorState::missing().value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "RawSensorState")]
pub struct SensorState {
    state: Option<f64>,
}

impl SensorState {
    /// Creates a defined reading. NaN is treated as missing.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self::from(Some(value))
    }

    /// Creates an undefined reading.
    #[must_use]
    pub const fn missing() -> Self {
        Self { state: None }
    }

    /// Returns the reading, or `None` when it is undefined.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.state
    }

    /// Returns `true` when the reading is undefined.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.state.is_none()
    }
}

impl From<Option<f64>> for SensorState {
    fn from(state: Option<f64>) -> Self {
        Self {
            state: state.filter(|v| !v.is_nan()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSensorState {
    #[serde(default)]
    state: Option<f64>,
    #[serde(default)]
    missing_state: bool,
}

impl From<RawSensorState> for SensorState {
    fn from(raw: RawSensorState) -> Self {
        if raw.missing_state {
            Self::missing()
        } else {
            Self::from(raw.state)
        }
    }
}
