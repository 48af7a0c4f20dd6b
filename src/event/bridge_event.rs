// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge event types.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Why an entity was not exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No capability mapping matched the entity.
    Unmappable,
    /// The entity's name is in the device's `excludedNames`.
    NameExcluded,
    /// The entity's type is in the device's `excludedTypes`.
    TypeExcluded,
}

impl SkipReason {
    /// Returns a short description for log output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unmappable => "not supported",
            Self::NameExcluded => "excluded by name",
            Self::TypeExcluded => "excluded by type",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events emitted by the bridge while attaching entities.
///
/// # Examples
///
/// ```
/// use esphome_bridge::event::{BridgeEvent, SkipReason};
/// use uuid::Uuid;
///
/// let registered = BridgeEvent::registered(Uuid::nil(), "Kitchen Humidity");
/// assert!(registered.is_lifecycle());
///
/// let skipped = BridgeEvent::EntitySkipped {
///     name: "Uptime".to_string(),
///     reason: SkipReason::Unmappable,
/// };
/// assert_eq!(skipped.name(), "Uptime");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// A new accessory was handed to the host.
    AccessoryRegistered {
        /// UUID of the accessory.
        uuid: Uuid,
        /// Display name of the accessory.
        name: String,
    },

    /// A previously known accessory was withdrawn from the host.
    AccessoryUnregistered {
        /// UUID of the accessory.
        uuid: Uuid,
        /// Display name of the accessory.
        name: String,
        /// Why the entity is no longer exposed.
        reason: SkipReason,
    },

    /// An entity was not exposed and had no accessory to withdraw.
    EntitySkipped {
        /// Name of the entity.
        name: String,
        /// Why the entity was skipped.
        reason: SkipReason,
    },
}

impl BridgeEvent {
    /// Returns the accessory or entity name carried by this event.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::AccessoryRegistered { name, .. }
            | Self::AccessoryUnregistered { name, .. }
            | Self::EntitySkipped { name, .. } => name,
        }
    }

    /// Returns the accessory UUID, if the event concerns an accessory.
    #[must_use]
    pub fn uuid(&self) -> Option<Uuid> {
        match self {
            Self::AccessoryRegistered { uuid, .. } | Self::AccessoryUnregistered { uuid, .. } => {
                Some(*uuid)
            }
            Self::EntitySkipped { .. } => None,
        }
    }

    /// Returns `true` if the host's accessory set changed.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::AccessoryRegistered { .. } | Self::AccessoryUnregistered { .. }
        )
    }

    /// Creates an accessory registered event.
    #[must_use]
    pub fn registered(uuid: Uuid, name: impl Into<String>) -> Self {
        Self::AccessoryRegistered {
            uuid,
            name: name.into(),
        }
    }

    /// Creates an accessory unregistered event.
    #[must_use]
    pub fn unregistered(uuid: Uuid, name: impl Into<String>, reason: SkipReason) -> Self {
        Self::AccessoryUnregistered {
            uuid,
            name: name.into(),
            reason,
        }
    }

    /// Creates an entity skipped event.
    #[must_use]
    pub fn skipped(name: impl Into<String>, reason: SkipReason) -> Self {
        Self::EntitySkipped {
            name: name.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_only_for_accessory_events() {
        let uuid = Uuid::from_u128(7);

        assert_eq!(BridgeEvent::registered(uuid, "A").uuid(), Some(uuid));
        assert_eq!(
            BridgeEvent::unregistered(uuid, "A", SkipReason::NameExcluded).uuid(),
            Some(uuid)
        );
        assert_eq!(
            BridgeEvent::skipped("A", SkipReason::TypeExcluded).uuid(),
            None
        );
    }

    #[test]
    fn lifecycle_classification() {
        assert!(BridgeEvent::registered(Uuid::nil(), "A").is_lifecycle());
        assert!(!BridgeEvent::skipped("A", SkipReason::Unmappable).is_lifecycle());
    }

    #[test]
    fn serializes_tagged() {
        let event = BridgeEvent::skipped("Uptime", SkipReason::Unmappable);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "event": "entity_skipped",
                "name": "Uptime",
                "reason": "unmappable"
            })
        );
    }

    #[test]
    fn registered_serializes_uuid_as_string() {
        let event = BridgeEvent::registered(Uuid::nil(), "Lab");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["uuid"], "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::Unmappable.to_string(), "not supported");
        assert_eq!(SkipReason::NameExcluded.to_string(), "excluded by name");
    }
}
