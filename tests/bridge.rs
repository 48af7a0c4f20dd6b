// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for attaching device entities through the bridge.

use std::sync::Arc;

use esphome_bridge::accessory::{Accessory, CharacteristicKind, CharacteristicValue, ServiceKind};
use esphome_bridge::entity::{Entity, EntityConfig, SensorState};
use esphome_bridge::event::{BridgeEvent, SkipReason};
use esphome_bridge::manager::{AccessoryRegistry, AttachOutcome, Bridge, PlatformConfig};
use parking_lot::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Host {
    published: Mutex<Vec<Uuid>>,
}

impl AccessoryRegistry for Host {
    fn register(&self, accessories: &[Arc<Accessory>]) {
        self.published
            .lock()
            .extend(accessories.iter().map(|a| a.uuid()));
    }

    fn unregister(&self, accessories: &[Arc<Accessory>]) {
        self.published
            .lock()
            .retain(|uuid| accessories.iter().all(|a| a.uuid() != *uuid));
    }
}

const CONFIG: &str = r#"{
    "platform": "esphome",
    "coThreshold": 35,
    "devices": [
        {
            "host": "kitchen.local",
            "excludedTypes": ["binary_sensor"],
            "excludedNames": ["Kitchen WiFi Signal"]
        }
    ]
}"#;

fn setup() -> (Bridge<Arc<Host>>, Arc<Host>) {
    let host = Arc::new(Host::default());
    let config = PlatformConfig::from_json(CONFIG).unwrap();
    (Bridge::new(config, Arc::clone(&host)), host)
}

fn entities() -> Vec<Entity> {
    vec![
        Entity::new(
            "Kitchen Temperature",
            "sensor",
            EntityConfig::new(1).with_device_class("temperature"),
        ),
        Entity::new(
            "Kitchen CO",
            "sensor",
            EntityConfig::new(2).with_device_class("carbon_monoxide"),
        ),
        Entity::new(
            "Kitchen WiFi Signal",
            "sensor",
            EntityConfig::new(3).with_unit_of_measurement("dBm"),
        ),
        Entity::new("Kitchen Door", "binary_sensor", EntityConfig::new(4)),
        Entity::new("Kitchen Uptime", "sensor", EntityConfig::new(5)),
    ]
}

#[tokio::test]
async fn first_run_registers_mappable_entities() {
    let (bridge, host) = setup();
    let mut events = bridge.subscribe();
    let device = bridge.config().devices()[0].clone();

    let outcomes: Vec<_> = entities()
        .iter()
        .map(|e| bridge.attach_entity(e, &device).unwrap())
        .collect();

    assert!(matches!(outcomes[0], AttachOutcome::Registered(_)));
    assert!(matches!(outcomes[1], AttachOutcome::Registered(_)));
    assert_eq!(
        outcomes[2],
        AttachOutcome::Skipped {
            reason: SkipReason::NameExcluded,
            unregistered: None,
        }
    );
    assert_eq!(outcomes[3], AttachOutcome::Unsupported);
    assert_eq!(
        outcomes[4],
        AttachOutcome::Skipped {
            reason: SkipReason::Unmappable,
            unregistered: None,
        }
    );

    assert_eq!(host.published.lock().len(), 2);
    assert_eq!(bridge.accessories().len(), 2);

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    assert_eq!(received.len(), 4);
    assert_eq!(received.iter().filter(|e| e.is_lifecycle()).count(), 2);
    assert_eq!(
        received[2],
        BridgeEvent::skipped("Kitchen WiFi Signal", SkipReason::NameExcluded)
    );
}

#[tokio::test]
async fn cached_accessories_survive_a_restart() {
    let (first, _) = setup();
    let device = first.config().devices()[0].clone();
    let originals = entities();
    for entity in &originals {
        first.attach_entity(entity, &device).unwrap();
    }
    let cache = first.accessories();

    let (second, host) = setup();
    for accessory in cache {
        second.configure_accessory(accessory);
    }

    let fresh = entities();
    let outcome = second.attach_entity(&fresh[1], &device).unwrap();
    assert!(matches!(outcome, AttachOutcome::Reattached(_)));
    assert!(host.published.lock().is_empty());

    fresh[1].publish(SensorState::new(40.0));

    let Some(uuid) = outcome_uuid(outcome) else {
        panic!("accessory is exposed");
    };
    let accessory = second.accessory(uuid).unwrap();
    let service = accessory.service(ServiceKind::CarbonMonoxide).unwrap();
    assert_eq!(accessory.services().len(), 1);
    assert_eq!(
        service
            .characteristic(CharacteristicKind::CoDetected)
            .unwrap()
            .value(),
        CharacteristicValue::Bool(true)
    );
}

#[tokio::test]
async fn newly_excluded_entity_is_withdrawn() {
    let (bridge, host) = setup();
    let mut device = bridge.config().devices()[0].clone();
    let entities = entities();
    let temperature = &entities[0];

    let Some(uuid) = outcome_uuid(bridge.attach_entity(temperature, &device).unwrap()) else {
        panic!("temperature is exposed");
    };
    assert_eq!(*host.published.lock(), vec![uuid]);

    device.excluded_names.push("Kitchen Temperature".to_string());
    let mut events = bridge.subscribe();
    let outcome = bridge.attach_entity(temperature, &device).unwrap();

    assert_eq!(
        outcome,
        AttachOutcome::Skipped {
            reason: SkipReason::NameExcluded,
            unregistered: Some(uuid),
        }
    );
    assert!(host.published.lock().is_empty());
    assert!(bridge.accessory(uuid).is_none());

    let event = events.recv().await.unwrap();
    assert_eq!(
        event,
        BridgeEvent::unregistered(uuid, "Kitchen Temperature", SkipReason::NameExcluded)
    );
}

#[tokio::test]
async fn events_reach_a_spawned_listener() {
    let (bridge, _) = setup();
    let mut events = bridge.subscribe();
    let device = bridge.config().devices()[0].clone();

    let listener = tokio::spawn(async move { events.recv().await.unwrap() });

    bridge.attach_entity(&entities()[0], &device).unwrap();

    let event = listener.await.unwrap();
    assert_eq!(event.name(), "Kitchen Temperature");
    assert!(event.uuid().is_some());
}

fn outcome_uuid(outcome: AttachOutcome) -> Option<Uuid> {
    match outcome {
        AttachOutcome::Registered(uuid) | AttachOutcome::Reattached(uuid) => Some(uuid),
        _ => None,
    }
}
