// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bridge between device entities and host accessories.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::accessory::{Accessory, accessory_uuid};
use crate::entity::Entity;
use crate::error::Result;
use crate::event::{BridgeEvent, EventBus, SkipReason};
use crate::mapping::component_mapper;

use super::{DeviceConfig, PlatformConfig};

/// The host side of the bridge: publishes and withdraws accessories.
///
/// The host persists registered accessories across restarts and hands them
/// back through [`Bridge::configure_accessory`].
pub trait AccessoryRegistry: Send + Sync {
    /// Makes the accessories visible to controllers.
    fn register(&self, accessories: &[Arc<Accessory>]);

    /// Withdraws the accessories from controllers and from the cache.
    fn unregister(&self, accessories: &[Arc<Accessory>]);
}

impl<T: AccessoryRegistry + ?Sized> AccessoryRegistry for Arc<T> {
    fn register(&self, accessories: &[Arc<Accessory>]) {
        (**self).register(accessories);
    }

    fn unregister(&self, accessories: &[Arc<Accessory>]) {
        (**self).unregister(accessories);
    }
}

/// The result of [`Bridge::attach_entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A new accessory was created and registered.
    Registered(Uuid),
    /// A cached accessory was bound to the entity again.
    Reattached(Uuid),
    /// The entity is not exposed.
    Skipped {
        /// Why the entity was skipped.
        reason: SkipReason,
        /// The cached accessory that was withdrawn, if there was one.
        unregistered: Option<Uuid>,
    },
    /// The entity's component type has no mapper.
    Unsupported,
}

impl AttachOutcome {
    /// Returns `true` if the entity is exposed through an accessory.
    #[must_use]
    pub fn is_exposed(&self) -> bool {
        matches!(self, Self::Registered(_) | Self::Reattached(_))
    }
}

/// Logs at info level in debug mode and at debug level otherwise.
macro_rules! log_if_debug {
    ($debug:expr, $($arg:tt)+) => {
        if $debug {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

/// Attaches device entities to host accessories.
///
/// The bridge owns the list of known accessories (restored from the host
/// cache or registered during this run), decides per entity whether it is
/// exposed, and keeps the host's accessory set in sync with that decision.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use esphome_bridge::accessory::Accessory;
/// use esphome_bridge::entity::{Entity, EntityConfig, SensorState};
/// use esphome_bridge::manager::{AccessoryRegistry, AttachOutcome, Bridge, DeviceConfig, PlatformConfig};
///
/// struct Host;
///
/// impl AccessoryRegistry for Host {
///     fn register(&self, _: &[Arc<Accessory>]) {}
///     fn unregister(&self, _: &[Arc<Accessory>]) {}
/// }
///
/// let bridge = Bridge::new(PlatformConfig::default(), Host);
/// let device = DeviceConfig::new("greenhouse.local");
/// let entity = Entity::new(
///     "Greenhouse Humidity",
///     "sensor",
///     EntityConfig::new(3).with_device_class("humidity"),
/// );
///
/// let outcome = bridge.attach_entity(&entity, &device)?;
/// assert!(matches!(outcome, AttachOutcome::Registered(_)));
///
/// entity.publish(SensorState::new(61.0));
/// # Ok::<(), esphome_bridge::Error>(())
/// ```
pub struct Bridge<R> {
    config: PlatformConfig,
    registry: R,
    accessories: RwLock<Vec<Arc<Accessory>>>,
    event_bus: EventBus,
}

impl<R: AccessoryRegistry> Bridge<R> {
    /// Creates a bridge with no known accessories.
    #[must_use]
    pub fn new(config: PlatformConfig, registry: R) -> Self {
        Self {
            config,
            registry,
            accessories: RwLock::new(Vec::new()),
            event_bus: EventBus::new(),
        }
    }

    /// Returns the platform configuration.
    #[must_use]
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Returns the host registry.
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Subscribes to bridge events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.event_bus.subscribe()
    }

    /// Restores an accessory from the host cache.
    ///
    /// Called by the host at start-up, before any entity is attached. An
    /// accessory whose UUID is already known replaces the old entry.
    pub fn configure_accessory(&self, accessory: Arc<Accessory>) {
        log_if_debug!(
            self.config.debug,
            name = accessory.display_name(),
            uuid = %accessory.uuid(),
            "Cached accessory restored"
        );

        let mut accessories = self.accessories.write();
        accessories.retain(|a| a.uuid() != accessory.uuid());
        accessories.push(accessory);
    }

    /// Returns a snapshot of the known accessories.
    #[must_use]
    pub fn accessories(&self) -> Vec<Arc<Accessory>> {
        self.accessories.read().clone()
    }

    /// Returns the known accessory with the given UUID.
    #[must_use]
    pub fn accessory(&self, uuid: Uuid) -> Option<Arc<Accessory>> {
        self.accessories
            .read()
            .iter()
            .find(|a| a.uuid() == uuid)
            .cloned()
    }

    /// Attaches an entity discovered on `device`.
    ///
    /// Reuses the cached accessory for the entity if there is one, runs the
    /// component mapper unless the entity is excluded, and then registers,
    /// keeps or withdraws the accessory accordingly.
    ///
    /// Exclusion by name is checked first, then exclusion by type, and only
    /// then the mapper; the reported [`SkipReason`] is the first that applies.
    /// The accessory list stays write-locked from the lookup until the
    /// accessory is added or removed, so concurrent attaches of the same
    /// entity register it once. The host registry and event listeners are
    /// called after the lock is released.
    ///
    /// # Errors
    ///
    /// Propagates binding errors from the mapper. No accessory is
    /// registered or withdrawn in that case.
    pub fn attach_entity(&self, entity: &Entity, device: &DeviceConfig) -> Result<AttachOutcome> {
        let debug = self.config.debug;

        let Some(mapper) = component_mapper(entity.component_type()) else {
            log_if_debug!(
                debug,
                name = entity.name(),
                component_type = entity.component_type(),
                "Entity type is not supported"
            );
            return Ok(AttachOutcome::Unsupported);
        };

        let uuid = accessory_uuid(entity.name(), entity.config().key());
        let mut accessories = self.accessories.write();

        let cached = accessories.iter().find(|a| a.uuid() == uuid).cloned();
        if cached.is_none() {
            log_if_debug!(debug, name = entity.name(), "Entity must be a new accessory");
        }
        let accessory = cached
            .clone()
            .unwrap_or_else(|| Arc::new(Accessory::new(entity.name(), uuid)));

        let skip = if device.is_name_excluded(entity.name()) {
            Some(SkipReason::NameExcluded)
        } else if device.is_type_excluded(entity.component_type()) {
            Some(SkipReason::TypeExcluded)
        } else if mapper(entity, &accessory, &self.config)? {
            None
        } else {
            Some(SkipReason::Unmappable)
        };

        if let Some(reason) = skip {
            if cached.is_some() {
                accessories.retain(|a| a.uuid() != uuid);
            }
            drop(accessories);
            return Ok(self.skip(entity, cached, reason));
        }

        if cached.is_some() {
            drop(accessories);
            tracing::info!(name = entity.name(), %uuid, "Entity discovered and set up");
            return Ok(AttachOutcome::Reattached(uuid));
        }

        accessories.push(Arc::clone(&accessory));
        drop(accessories);

        tracing::info!(name = entity.name(), %uuid, "Accessory added");
        self.registry.register(&[accessory]);
        self.event_bus
            .publish(BridgeEvent::registered(uuid, entity.name()));

        Ok(AttachOutcome::Registered(uuid))
    }

    /// Reports a skipped entity and withdraws its accessory, which the
    /// caller has already removed from the known list.
    fn skip(
        &self,
        entity: &Entity,
        withdrawn: Option<Arc<Accessory>>,
        reason: SkipReason,
    ) -> AttachOutcome {
        let Some(accessory) = withdrawn else {
            tracing::info!(
                name = entity.name(),
                component_type = entity.component_type(),
                %reason,
                "Entity not exposed"
            );
            self.event_bus
                .publish(BridgeEvent::skipped(entity.name(), reason));
            return AttachOutcome::Skipped {
                reason,
                unregistered: None,
            };
        };

        let uuid = accessory.uuid();
        tracing::info!(
            name = entity.name(),
            component_type = entity.component_type(),
            %reason,
            %uuid,
            "Entity not exposed, unregistering existing accessory"
        );

        self.registry.unregister(&[accessory]);
        self.event_bus
            .publish(BridgeEvent::unregistered(uuid, entity.name(), reason));

        AttachOutcome::Skipped {
            reason,
            unregistered: Some(uuid),
        }
    }
}

impl<R> std::fmt::Debug for Bridge<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &self.config)
            .field("accessories", &self.accessories.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessory::{CharacteristicKind, ServiceKind};
    use crate::entity::{EntityConfig, EntityKey, SensorState};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingRegistry {
        registered: Mutex<Vec<Uuid>>,
        unregistered: Mutex<Vec<Uuid>>,
    }

    impl AccessoryRegistry for RecordingRegistry {
        fn register(&self, accessories: &[Arc<Accessory>]) {
            self.registered
                .lock()
                .extend(accessories.iter().map(|a| a.uuid()));
        }

        fn unregister(&self, accessories: &[Arc<Accessory>]) {
            self.unregistered
                .lock()
                .extend(accessories.iter().map(|a| a.uuid()));
        }
    }

    fn bridge() -> Bridge<RecordingRegistry> {
        Bridge::new(PlatformConfig::default(), RecordingRegistry::default())
    }

    fn temperature(name: &str, key: u32) -> Entity {
        Entity::new(
            name,
            "sensor",
            EntityConfig::new(key).with_device_class("temperature"),
        )
    }

    #[test]
    fn new_mappable_entity_is_registered() {
        let bridge = bridge();
        let mut events = bridge.subscribe();
        let entity = temperature("Cellar Temperature", 1);

        let outcome = bridge
            .attach_entity(&entity, &DeviceConfig::new("cellar.local"))
            .unwrap();

        let uuid = accessory_uuid("Cellar Temperature", EntityKey::new(1));
        assert_eq!(outcome, AttachOutcome::Registered(uuid));
        assert!(outcome.is_exposed());
        assert_eq!(*bridge.registry().registered.lock(), vec![uuid]);
        assert_eq!(bridge.accessories().len(), 1);
        assert_eq!(
            events.try_recv().unwrap(),
            BridgeEvent::registered(uuid, "Cellar Temperature")
        );

        entity.publish(SensorState::new(12.5));
        let accessory = bridge.accessory(uuid).unwrap();
        let value = accessory
            .service(ServiceKind::Temperature)
            .unwrap()
            .characteristic(CharacteristicKind::Temperature)
            .unwrap()
            .value();
        assert_eq!(value.as_f64(), Some(12.5));
    }

    #[test]
    fn cached_accessory_is_reattached() {
        let bridge = bridge();
        let entity = temperature("Attic", 9);
        let cached = Arc::new(Accessory::for_entity(&entity));
        bridge.configure_accessory(Arc::clone(&cached));

        let outcome = bridge
            .attach_entity(&entity, &DeviceConfig::new("attic.local"))
            .unwrap();

        assert_eq!(outcome, AttachOutcome::Reattached(cached.uuid()));
        assert!(bridge.registry().registered.lock().is_empty());
        assert_eq!(bridge.accessories().len(), 1);
        assert_eq!(cached.services().len(), 1);
    }

    #[test]
    fn unmappable_entity_is_skipped() {
        let bridge = bridge();
        let mut events = bridge.subscribe();
        let entity = Entity::new("Uptime", "sensor", EntityConfig::new(4));

        let outcome = bridge
            .attach_entity(&entity, &DeviceConfig::new("a.local"))
            .unwrap();

        assert_eq!(
            outcome,
            AttachOutcome::Skipped {
                reason: SkipReason::Unmappable,
                unregistered: None,
            }
        );
        assert!(bridge.accessories().is_empty());
        assert!(bridge.registry().registered.lock().is_empty());
        assert_eq!(
            events.try_recv().unwrap(),
            BridgeEvent::skipped("Uptime", SkipReason::Unmappable)
        );
    }

    #[test]
    fn excluded_name_withdraws_cached_accessory() {
        let bridge = bridge();
        let entity = temperature("Garage", 2);
        let cached = Arc::new(Accessory::for_entity(&entity));
        bridge.configure_accessory(Arc::clone(&cached));
        let mut events = bridge.subscribe();

        let device = DeviceConfig::new("garage.local").with_excluded_name("Garage");
        let outcome = bridge.attach_entity(&entity, &device).unwrap();

        assert_eq!(
            outcome,
            AttachOutcome::Skipped {
                reason: SkipReason::NameExcluded,
                unregistered: Some(cached.uuid()),
            }
        );
        assert_eq!(*bridge.registry().unregistered.lock(), vec![cached.uuid()]);
        assert!(bridge.accessories().is_empty());
        assert!(events.try_recv().unwrap().is_lifecycle());
    }

    #[test]
    fn excluded_entity_is_not_bound() {
        let bridge = bridge();
        let entity = temperature("Shed", 5);
        let device = DeviceConfig::new("shed.local").with_excluded_type("sensor");

        let outcome = bridge.attach_entity(&entity, &device).unwrap();

        assert_eq!(
            outcome,
            AttachOutcome::Skipped {
                reason: SkipReason::TypeExcluded,
                unregistered: None,
            }
        );
        assert_eq!(entity.subscriber_count(), 0);
    }

    #[test]
    fn name_exclusion_is_reported_before_unmappable() {
        let bridge = bridge();
        let entity = Entity::new("Uptime", "sensor", EntityConfig::new(4));
        let device = DeviceConfig::new("a.local")
            .with_excluded_name("Uptime")
            .with_excluded_type("sensor");

        let outcome = bridge.attach_entity(&entity, &device).unwrap();

        assert_eq!(
            outcome,
            AttachOutcome::Skipped {
                reason: SkipReason::NameExcluded,
                unregistered: None,
            }
        );

        let device = DeviceConfig::new("a.local").with_excluded_type("sensor");
        let outcome = bridge.attach_entity(&entity, &device).unwrap();

        assert_eq!(
            outcome,
            AttachOutcome::Skipped {
                reason: SkipReason::TypeExcluded,
                unregistered: None,
            }
        );
    }

    #[test]
    fn concurrent_attaches_register_once() {
        let bridge = bridge();
        let entity = temperature("Boiler Room", 12);
        let device = DeviceConfig::new("boiler.local");

        let outcomes: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| bridge.attach_entity(&entity, &device).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let uuid = accessory_uuid("Boiler Room", EntityKey::new(12));
        let registered = outcomes
            .iter()
            .filter(|o| matches!(o, AttachOutcome::Registered(_)))
            .count();
        assert_eq!(registered, 1);
        assert!(outcomes.iter().all(|o| *o == AttachOutcome::Registered(uuid)
            || *o == AttachOutcome::Reattached(uuid)));
        assert_eq!(*bridge.registry().registered.lock(), vec![uuid]);
        assert_eq!(bridge.accessories().len(), 1);
    }

    #[test]
    fn unsupported_component_type() {
        let bridge = bridge();
        let mut events = bridge.subscribe();
        let entity = Entity::new("Relay", "switch", EntityConfig::new(6));

        let outcome = bridge
            .attach_entity(&entity, &DeviceConfig::new("a.local"))
            .unwrap();

        assert_eq!(outcome, AttachOutcome::Unsupported);
        assert!(!outcome.is_exposed());
        assert!(bridge.accessories().is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn configure_accessory_replaces_same_uuid() {
        let bridge = bridge();
        let entity = temperature("Loft", 8);

        bridge.configure_accessory(Arc::new(Accessory::for_entity(&entity)));
        bridge.configure_accessory(Arc::new(Accessory::for_entity(&entity)));

        assert_eq!(bridge.accessories().len(), 1);
    }

    #[test]
    fn debug_mode_attaches_the_same_way() {
        let bridge = Bridge::new(
            PlatformConfig::default().with_debug(),
            RecordingRegistry::default(),
        );
        let outcome = bridge
            .attach_entity(&temperature("Porch", 11), &DeviceConfig::new("p.local"))
            .unwrap();
        assert!(outcome.is_exposed());
    }
}
