// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory model exposed to the host platform.
//!
//! An [`Accessory`] holds [`Service`]s; each service holds the
//! [`Characteristic`]s its [`ServiceKind`] offers. Binders find or create
//! services and push values into characteristics; the host reads values
//! back or subscribes to changes.
//!
//! # Examples
//!
//! ```
//! use esphome_bridge::accessory::{Accessory, CharacteristicKind, ServiceKind, accessory_uuid};
//! use esphome_bridge::entity::EntityKey;
//!
//! let accessory = Accessory::new("Balcony", accessory_uuid("Balcony", EntityKey::new(4)));
//! let service = accessory.find_or_add_service(ServiceKind::Temperature, "Balcony");
//!
//! if let Some(temperature) = service.characteristic(CharacteristicKind::Temperature) {
//!     temperature.set_value(18.5);
//!     assert_eq!(temperature.value().as_f64(), Some(18.5));
//! }
//! ```

mod characteristic;
mod platform_accessory;
mod service;

pub use characteristic::{Characteristic, CharacteristicKind, CharacteristicValue};
pub use platform_accessory::{Accessory, accessory_uuid};
pub use service::{Service, ServiceKind};
