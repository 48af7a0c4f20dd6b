// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for sources of sensor state events.

use crate::entity::SensorState;
use crate::subscription::SubscriptionId;

/// Trait for types that deliver a stream of sensor state events.
///
/// Binders only ever talk to an entity through this trait, so the live
/// transport connection is free to decide how events arrive. Events for a
/// single source must be delivered in the order they were received.
///
/// # Examples
///
/// ```
/// use esphome_bridge::entity::{Entity, EntityConfig, SensorState};
/// use esphome_bridge::subscription::Subscribable;
///
/// let entity = Entity::new("Outdoor", "sensor", EntityConfig::new(7));
///
/// let sub_id = entity.on_state(|state| {
///     println!("reading: {:?}", state.value());
/// });
///
/// entity.publish(SensorState::new(21.5));
/// assert!(entity.unsubscribe(sub_id));
/// ```
pub trait Subscribable {
    /// Subscribes to state events.
    ///
    /// The callback is called once per event, in delivery order.
    fn on_state<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SensorState) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
