// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The entity handle shared between the transport and the binders.

use std::sync::Arc;

use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};

use super::{EntityConfig, SensorState};

/// A device-reported entity with its live state stream.
///
/// Cloning an `Entity` is cheap and yields a handle to the same state
/// stream: a reading published through any clone reaches every subscriber.
/// Dropping the last handle tears the stream down, which is how a closed
/// connection stops delivering events to its binders.
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    component_type: String,
    config: EntityConfig,
    callbacks: Arc<CallbackRegistry<SensorState>>,
}

impl Entity {
    /// Creates an entity.
    ///
    /// `component_type` is the native API entity type, e.g. `"sensor"`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        component_type: impl Into<String>,
        config: EntityConfig,
    ) -> Self {
        Self {
            name: name.into(),
            component_type: component_type.into(),
            config,
            callbacks: Arc::new(CallbackRegistry::new()),
        }
    }

    /// Returns the entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the entity type, e.g. `"sensor"`.
    #[must_use]
    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    /// Returns the entity metadata.
    #[must_use]
    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    /// Delivers a state event to every subscriber.
    ///
    /// Called by the transport for each reading, in the order received.
    pub fn publish(&self, state: SensorState) {
        tracing::trace!(entity = %self.name, state = ?state.value(), "Publishing state");
        self.callbacks.dispatch(&state);
    }

    /// Returns the number of active state subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.callback_count()
    }
}

impl Subscribable for Entity {
    fn on_state<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SensorState) + Send + Sync + 'static,
    {
        self.callbacks.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}
