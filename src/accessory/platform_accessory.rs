// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The accessory: a persistent container of services.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::entity::{Entity, EntityKey};

use super::{Service, ServiceKind};

/// Namespace for accessory UUIDs.
const ACCESSORY_NAMESPACE: Uuid = Uuid::from_u128(0x5c1e_0b8a_3f2d_4e61_9a07_e5b4_d2c8_1f36);

/// Derives the stable accessory UUID for an entity.
///
/// The UUID depends only on the entity name and key, so the same entity
/// maps to the same accessory across process restarts.
///
/// # Examples
///
/// ```
/// use esphome_bridge::accessory::accessory_uuid;
/// use esphome_bridge::entity::EntityKey;
///
/// let a = accessory_uuid("Outdoor", EntityKey::new(1));
/// let b = accessory_uuid("Outdoor", EntityKey::new(1));
/// assert_eq!(a, b);
/// assert_ne!(a, accessory_uuid("Outdoor", EntityKey::new(2)));
/// ```
#[must_use]
pub fn accessory_uuid(name: &str, key: EntityKey) -> Uuid {
    Uuid::new_v5(&ACCESSORY_NAMESPACE, format!("{name}{key}").as_bytes())
}

/// An accessory exposing zero or more services.
///
/// The service list is behind a lock so a binder can run "find or create"
/// atomically even if entity events are delivered from several threads.
pub struct Accessory {
    uuid: Uuid,
    display_name: String,
    services: RwLock<Vec<Arc<Service>>>,
}

impl Accessory {
    /// Creates an accessory with no services.
    #[must_use]
    pub fn new(display_name: impl Into<String>, uuid: Uuid) -> Self {
        Self {
            uuid,
            display_name: display_name.into(),
            services: RwLock::new(Vec::new()),
        }
    }

    /// Creates the accessory for an entity, keyed by [`accessory_uuid`].
    #[must_use]
    pub fn for_entity(entity: &Entity) -> Self {
        Self::new(
            entity.name(),
            accessory_uuid(entity.name(), entity.config().key()),
        )
    }

    /// Returns the accessory UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns a snapshot of the services.
    #[must_use]
    pub fn services(&self) -> Vec<Arc<Service>> {
        self.services.read().clone()
    }

    /// Returns the first service of the given kind.
    #[must_use]
    pub fn service(&self, kind: ServiceKind) -> Option<Arc<Service>> {
        self.services.read().iter().find(|s| s.kind() == kind).cloned()
    }

    /// Appends a new service, even if one of the same kind exists.
    pub fn add_service(
        &self,
        kind: ServiceKind,
        name: impl Into<String>,
        subtype: impl Into<String>,
    ) -> Arc<Service> {
        let service = Arc::new(Service::new(kind, name, subtype));
        self.services.write().push(service.clone());
        service
    }

    /// Returns the service of the given kind, creating it if missing.
    ///
    /// Lookup is by service kind only, so repeated calls never duplicate a
    /// service.
    pub fn find_or_add_service(&self, kind: ServiceKind, name: &str) -> Arc<Service> {
        let mut services = self.services.write();
        if let Some(existing) = services.iter().find(|s| s.kind() == kind) {
            return existing.clone();
        }

        tracing::debug!(accessory = %self.display_name, service = %kind, "Adding service");
        let service = Arc::new(Service::new(kind, name, ""));
        services.push(service.clone());
        service
    }
}

impl fmt::Debug for Accessory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<ServiceKind> = self.services.read().iter().map(|s| s.kind()).collect();
        f.debug_struct("Accessory")
            .field("uuid", &self.uuid)
            .field("display_name", &self.display_name)
            .field("services", &kinds)
            .finish()
    }
}
