// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity-to-capability mapping.
//!
//! This module decides how an entity is exposed and wires its state stream
//! to characteristics:
//!
//! - [`resolve`] looks a device class up in a fixed, process-wide table
//! - [`MappingEntry`] selects one of the binders ([`bind_default`],
//!   [`bind_carbon_gas`], [`bind_air_quality`])
//! - [`map_sensor`] ties both together and falls back to
//!   [`legacy_descriptor`] for entities without a known device class
//! - [`component_mapper`] picks the mapper for an entity type
//!
//! # Examples
//!
//! ```
//! use esphome_bridge::accessory::{Accessory, CharacteristicKind, ServiceKind};
//! use esphome_bridge::entity::{Entity, EntityConfig, SensorState};
//! use esphome_bridge::manager::PlatformConfig;
//! use esphome_bridge::mapping::map_sensor;
//!
//! let entity = Entity::new("Balcony PM2.5", "sensor", EntityConfig::new(8).with_device_class("pm25"));
//! let accessory = Accessory::for_entity(&entity);
//! assert!(map_sensor(&entity, &accessory, &PlatformConfig::default())?);
//!
//! entity.publish(SensorState::new(30.0));
//!
//! let service = accessory.service(ServiceKind::AirQuality).unwrap();
//! let level = service.characteristic(CharacteristicKind::AirQualityIndex).unwrap();
//! assert_eq!(level.value().as_u8(), Some(5));
//! # Ok::<(), esphome_bridge::Error>(())
//! ```

mod binder;
mod descriptor;
mod sensor;
mod table;

use crate::accessory::Accessory;
use crate::entity::Entity;
use crate::error::Result;
use crate::manager::PlatformConfig;

pub use binder::{bind_air_quality, bind_carbon_gas, bind_default};
pub use descriptor::{CapabilityDescriptor, CarbonGas};
pub use sensor::{HUMIDITY_ICON, legacy_descriptor, map_sensor};
pub use table::{MappingEntry, device_classes, resolve};

/// Maps one entity onto an accessory; `Ok(false)` if it cannot be mapped.
pub type ComponentMapper = fn(&Entity, &Accessory, &PlatformConfig) -> Result<bool>;

/// Returns the mapper for an entity type.
///
/// Only sensors are supported; every other type yields `None`.
#[must_use]
pub fn component_mapper(component_type: &str) -> Option<ComponentMapper> {
    match component_type {
        "sensor" => Some(map_sensor as ComponentMapper),
        _ => None,
    }
}
