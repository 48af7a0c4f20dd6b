// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity metadata as reported by the device.

use std::fmt;

use serde::Deserialize;

/// Stable identity of an entity on its device.
///
/// ESPHome assigns each entity a 32-bit key derived from its object id.
/// Together with the entity name it seeds the accessory UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(u32);

impl EntityKey {
    /// Creates a key from its raw value.
    #[must_use]
    pub const fn new(key: u32) -> Self {
        Self(key)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityKey {
    fn from(key: u32) -> Self {
        Self(key)
    }
}

/// Metadata of an entity: identity plus the hints used for mapping.
///
/// Deserializes from the camelCase shape produced by the native API
/// client (`{"key": 1, "deviceClass": "humidity", ...}`). Empty strings
/// are treated the same as absent hints.
///
/// # Examples
///
/// ```
/// use esphome_bridge::entity::EntityConfig;
///
/// let config = EntityConfig::new(42)
///     .with_unit_of_measurement("%")
///     .with_icon("mdi:water-percent");
///
/// assert_eq!(config.key().value(), 42);
/// assert_eq!(config.device_class(), None);
/// assert_eq!(config.unit_of_measurement(), Some("%"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityConfig {
    key: EntityKey,
    #[serde(default)]
    device_class: Option<String>,
    #[serde(default)]
    unit_of_measurement: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

impl EntityConfig {
    /// Creates a configuration with only a key and no hints.
    #[must_use]
    pub fn new(key: u32) -> Self {
        Self {
            key: EntityKey::new(key),
            device_class: None,
            unit_of_measurement: None,
            icon: None,
        }
    }

    /// Sets the device class hint.
    #[must_use]
    pub fn with_device_class(mut self, device_class: impl Into<String>) -> Self {
        self.device_class = Some(device_class.into());
        self
    }

    /// Sets the unit of measurement.
    #[must_use]
    pub fn with_unit_of_measurement(mut self, unit: impl Into<String>) -> Self {
        self.unit_of_measurement = Some(unit.into());
        self
    }

    /// Sets the icon hint.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Returns the entity key.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        self.key
    }

    /// Returns the device class hint, if any.
    #[must_use]
    pub fn device_class(&self) -> Option<&str> {
        non_empty(self.device_class.as_deref())
    }

    /// Returns the unit of measurement, if any.
    #[must_use]
    pub fn unit_of_measurement(&self) -> Option<&str> {
        non_empty(self.unit_of_measurement.as_deref())
    }

    /// Returns the icon hint, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        non_empty(self.icon.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
