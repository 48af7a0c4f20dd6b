// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor mapping entry point.

use crate::accessory::{Accessory, CharacteristicKind, ServiceKind};
use crate::entity::{Entity, EntityConfig};
use crate::error::Result;
use crate::manager::PlatformConfig;
use crate::types::{PERCENT, TemperatureUnit};

use super::binder::bind_default;
use super::{CapabilityDescriptor, resolve};

/// Icon hint that marks a percentage sensor as a humidity sensor.
pub const HUMIDITY_ICON: &str = "mdi:water-percent";

/// Maps a sensor entity onto an accessory.
///
/// The device class is looked up first. Entities without a known device
/// class fall back to unit and icon heuristics (see [`legacy_descriptor`]).
/// Returns `Ok(false)` when neither applies; the accessory is then left
/// untouched.
///
/// # Errors
///
/// Propagates a binder's contract violation as [`Error::Binding`](crate::Error::Binding).
///
/// # Examples
///
/// ```
/// use esphome_bridge::accessory::Accessory;
/// use esphome_bridge::entity::{Entity, EntityConfig};
/// use esphome_bridge::manager::PlatformConfig;
/// use esphome_bridge::mapping::map_sensor;
///
/// let config = PlatformConfig::default();
///
/// let entity = Entity::new("Hall", "sensor", EntityConfig::new(1).with_device_class("pm10"));
/// let accessory = Accessory::for_entity(&entity);
/// assert!(map_sensor(&entity, &accessory, &config)?);
///
/// let entity = Entity::new("Uptime", "sensor", EntityConfig::new(2).with_unit_of_measurement("s"));
/// let accessory = Accessory::for_entity(&entity);
/// assert!(!map_sensor(&entity, &accessory, &config)?);
/// # Ok::<(), esphome_bridge::Error>(())
/// ```
pub fn map_sensor(entity: &Entity, accessory: &Accessory, config: &PlatformConfig) -> Result<bool> {
    let hints = entity.config();

    if let Some(entry) = hints.device_class().and_then(resolve) {
        entry.bind(entity, accessory, config)?;
        return Ok(true);
    }

    let Some(descriptor) = legacy_descriptor(hints) else {
        return Ok(false);
    };

    tracing::debug!(
        entity = %entity.name(),
        capability = %descriptor,
        "No known device class, using unit of measurement"
    );
    bind_default(entity, accessory, &descriptor)?;
    Ok(true)
}

/// Picks a descriptor for entities declared without a known device class.
///
/// In order:
/// 1. unit `°C` or `°F` maps to a temperature sensor;
/// 2. unit `%` with the water-percent icon or the `humidity` device class
///    maps to a humidity sensor.
///
/// # Examples
///
/// ```
/// use esphome_bridge::entity::EntityConfig;
/// use esphome_bridge::mapping::legacy_descriptor;
///
/// let config = EntityConfig::new(1).with_unit_of_measurement("%").with_icon("mdi:water-percent");
/// assert!(legacy_descriptor(&config).is_some());
///
/// let battery = EntityConfig::new(2).with_unit_of_measurement("%").with_icon("mdi:battery");
/// assert!(legacy_descriptor(&battery).is_none());
/// ```
#[must_use]
pub fn legacy_descriptor(config: &EntityConfig) -> Option<CapabilityDescriptor> {
    let unit = config.unit_of_measurement();

    if TemperatureUnit::from_unit(unit).is_some() {
        return Some(CapabilityDescriptor::new(
            ServiceKind::Temperature,
            CharacteristicKind::Temperature,
        ));
    }

    let humidity_hint =
        config.icon() == Some(HUMIDITY_ICON) || config.device_class() == Some("humidity");
    if unit == Some(PERCENT) && humidity_hint {
        return Some(CapabilityDescriptor::new(
            ServiceKind::Humidity,
            CharacteristicKind::Humidity,
        ));
    }

    None
}
