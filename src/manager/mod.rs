// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform configuration and the entity-to-accessory bridge.
//!
//! The [`Bridge`] is the entry point for a host integration: the host
//! restores its cached accessories with
//! [`configure_accessory`](Bridge::configure_accessory), then hands every
//! entity reported by a device connection to
//! [`attach_entity`](Bridge::attach_entity). The host side is abstracted by
//! the [`AccessoryRegistry`] trait.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use esphome_bridge::accessory::{Accessory, CharacteristicKind, ServiceKind};
//! use esphome_bridge::entity::{Entity, EntityConfig, SensorState};
//! use esphome_bridge::manager::{AccessoryRegistry, Bridge, PlatformConfig};
//!
//! struct Host;
//!
//! impl AccessoryRegistry for Host {
//!     fn register(&self, _: &[Arc<Accessory>]) {}
//!     fn unregister(&self, _: &[Arc<Accessory>]) {}
//! }
//!
//! let config = PlatformConfig::from_json(r#"{
//!     "devices": [{ "host": "office.local" }],
//!     "co2Threshold": 1000
//! }"#)?;
//! let device = config.devices()[0].clone();
//! let bridge = Bridge::new(config, Host);
//!
//! let co2 = Entity::new(
//!     "Office CO2",
//!     "sensor",
//!     EntityConfig::new(12).with_device_class("carbon_dioxide"),
//! );
//! bridge.attach_entity(&co2, &device)?;
//! co2.publish(SensorState::new(1350.0));
//!
//! let accessory = &bridge.accessories()[0];
//! let service = accessory.service(ServiceKind::CarbonDioxide).unwrap();
//! let detected = service.characteristic(CharacteristicKind::Co2Detected).unwrap();
//! assert_eq!(detected.value().as_bool(), Some(true));
//! # Ok::<(), esphome_bridge::Error>(())
//! ```

mod bridge;
mod platform_config;

pub use bridge::{AccessoryRegistry, AttachOutcome, Bridge};
pub use platform_config::{
    DEFAULT_DISCOVERY_TIMEOUT, DEFAULT_PORT, DEFAULT_RETRY_AFTER, DeviceConfig, PlatformConfig,
};
