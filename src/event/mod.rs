// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notifications about the bridge's accessory set.
//!
//! The [`Bridge`](crate::manager::Bridge) publishes a [`BridgeEvent`] for
//! every entity it attaches: a registration, a withdrawal, or a skip.
//! Subscribers receive them through the tokio broadcast channel wrapped by
//! [`EventBus`].

mod bridge_event;
mod event_bus;

pub use bridge_event::{BridgeEvent, SkipReason};
pub use event_bus::EventBus;
