// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `esphome_bridge` - Expose ESPHome sensors as home-automation accessories.
//!
//! This library turns the sensor entities reported by an ESPHome device into
//! accessory services and characteristics, and keeps the characteristics
//! up to date as the sensors publish new readings.
//!
//! # Supported Sensors
//!
//! - **Climate**: temperature (°C and °F), humidity, illuminance
//! - **Carbon gases**: CO and CO2 levels, threshold detection, peak levels
//! - **Air quality**: PM2.5, PM10, ozone, NO2, SO2 and VOC densities,
//!   plus an overall level from the European air quality index
//!
//! Entities without a device class are recognised by their unit of
//! measurement where that is unambiguous.
//!
//! # Quick Start
//!
//! ```
//! use esphome_bridge::accessory::{Accessory, CharacteristicKind, ServiceKind};
//! use esphome_bridge::entity::{Entity, EntityConfig, SensorState};
//! use esphome_bridge::manager::PlatformConfig;
//! use esphome_bridge::mapping::map_sensor;
//!
//! let entity = Entity::new(
//!     "Outdoor Temperature",
//!     "sensor",
//!     EntityConfig::new(1)
//!         .with_device_class("temperature")
//!         .with_unit_of_measurement("°F"),
//! );
//! let accessory = Accessory::for_entity(&entity);
//!
//! assert!(map_sensor(&entity, &accessory, &PlatformConfig::default())?);
//! entity.publish(SensorState::new(212.0));
//!
//! let service = accessory.service(ServiceKind::Temperature).unwrap();
//! let current = service.characteristic(CharacteristicKind::Temperature).unwrap();
//! assert_eq!(current.value().as_f64(), Some(100.0));
//! # Ok::<(), esphome_bridge::Error>(())
//! ```
//!
//! For a full host integration, see [`manager::Bridge`].

pub mod accessory;
pub mod entity;
pub mod error;
pub mod event;
pub mod manager;
pub mod mapping;
pub mod subscription;
pub mod types;

pub use accessory::{
    Accessory, Characteristic, CharacteristicKind, CharacteristicValue, Service, ServiceKind,
};
pub use entity::{Entity, EntityConfig, EntityKey, SensorState};
pub use error::{BindingError, ConfigError, Error, Result, ValueError};
pub use event::{BridgeEvent, EventBus, SkipReason};
pub use manager::{AccessoryRegistry, AttachOutcome, Bridge, DeviceConfig, PlatformConfig};
pub use mapping::{CapabilityDescriptor, CarbonGas, MappingEntry, map_sensor};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{AirQuality, Pollutant, TemperatureUnit};
