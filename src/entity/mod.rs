// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed view of the entities reported by an ESPHome device.
//!
//! The transport collaborator owns the connection and entity identity; it
//! builds an [`Entity`] from the list-entities response and feeds readings
//! into it with [`Entity::publish`]. Everything downstream only reads the
//! entity's metadata and subscribes to its state stream.
//!
//! # Examples
//!
//! ```
//! use esphome_bridge::entity::{Entity, EntityConfig, SensorState};
//!
//! let config = EntityConfig::new(3_412_229_887)
//!     .with_device_class("temperature")
//!     .with_unit_of_measurement("°C");
//! let entity = Entity::new("Living Room Temperature", "sensor", config);
//!
//! entity.publish(SensorState::new(21.5));
//! ```

mod entity_config;
mod sensor_entity;
mod sensor_state;

pub use entity_config::{EntityConfig, EntityKey};
pub use sensor_entity::Entity;
pub use sensor_state::SensorState;
