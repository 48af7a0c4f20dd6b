// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability binders.
//!
//! A binder makes sure the accessory exposes the right service, then
//! subscribes to the entity's state stream and pushes one or more derived
//! values per event. Services are looked up by kind before being created,
//! so binding the same entity twice never duplicates a service.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::accessory::{
    Accessory, Characteristic, CharacteristicKind, CharacteristicValue, Service, ServiceKind,
};
use crate::entity::Entity;
use crate::error::BindingError;
use crate::subscription::{Subscribable, SubscriptionId};
use crate::types::{AirQuality, Pollutant, TemperatureUnit, european_aqi};

use super::{CapabilityDescriptor, CarbonGas};

fn characteristic_of(
    service: &Service,
    kind: CharacteristicKind,
) -> Result<Arc<Characteristic>, BindingError> {
    service
        .characteristic(kind)
        .cloned()
        .ok_or(BindingError::UnsupportedCharacteristic {
            service: service.kind(),
            characteristic: kind,
        })
}

/// Binds an entity to a single characteristic.
///
/// Readings from an entity whose unit is `°F` are converted to Celsius.
/// Readings bound to the air quality level are rounded into an
/// [`AirQuality`] level. Every other reading is pushed unchanged. Undefined
/// readings are forwarded as `Null` without conversion.
///
/// # Errors
///
/// Returns [`BindingError::UnsupportedCharacteristic`] when the descriptor's
/// service does not offer its characteristic. Nothing is added to the
/// accessory in that case.
pub fn bind_default(
    entity: &Entity,
    accessory: &Accessory,
    descriptor: &CapabilityDescriptor,
) -> Result<SubscriptionId, BindingError> {
    descriptor.validate()?;

    let service = accessory.find_or_add_service(descriptor.service(), entity.name());
    let target = characteristic_of(&service, descriptor.characteristic())?;
    let unit = TemperatureUnit::from_unit(entity.config().unit_of_measurement());
    let graded = descriptor.characteristic() == CharacteristicKind::AirQualityIndex;

    tracing::debug!(
        entity = %entity.name(),
        capability = %descriptor,
        unit = ?unit,
        "Binding sensor"
    );

    Ok(entity.on_state(move |state| {
        let value = match unit {
            Some(unit) => state.value().map(|v| unit.to_celsius(v)),
            None => state.value(),
        };
        if graded {
            target.set_value(value.map_or(CharacteristicValue::Null, |v| {
                AirQuality::from_level(v).into()
            }));
        } else {
            target.set_value(value);
        }
    }))
}

/// Binds a carbon gas sensor.
///
/// Every reading goes to the gas's level characteristic. With a threshold,
/// the detected characteristic receives `reading > threshold`; an
/// undefined reading counts as not detected. Without a threshold the
/// detected characteristic is never written. The peak characteristic
/// follows the highest defined reading seen since binding, starting from
/// whatever value it already holds.
///
/// # Errors
///
/// Never fails for the built-in gas kinds; the `Result` mirrors the other
/// binders.
pub fn bind_carbon_gas(
    entity: &Entity,
    accessory: &Accessory,
    gas: CarbonGas,
    threshold: Option<f64>,
) -> Result<SubscriptionId, BindingError> {
    let service = accessory.find_or_add_service(gas.service(), entity.name());
    let level = characteristic_of(&service, gas.level())?;
    let detected = characteristic_of(&service, gas.detected())?;
    let peak_level = characteristic_of(&service, gas.peak_level())?;
    let peak = Mutex::new(peak_level.value().as_f64());

    tracing::debug!(entity = %entity.name(), gas = %gas, threshold = ?threshold, "Binding gas sensor");

    Ok(entity.on_state(move |state| {
        let ppm = state.value();
        level.set_value(ppm);

        if let Some(threshold) = threshold {
            detected.set_value(ppm.is_some_and(|ppm| ppm > threshold));
        }

        if let Some(ppm) = ppm {
            let mut peak = peak.lock();
            let previous = *peak;
            if previous.is_none_or(|p| ppm > p) {
                *peak = Some(ppm);
                peak_level.set_value(ppm);
            }
        }
    }))
}

/// Binds one pollutant of an air quality sensor.
///
/// Each reading goes to the pollutant's density characteristic and is
/// graded with [`european_aqi`] into the shared air quality level.
/// Readings must already be in µg/m³. An undefined reading clears the
/// density and sets the level to [`AirQuality::Unknown`].
///
/// # Errors
///
/// Returns [`BindingError::NotAPollutant`] when the descriptor's
/// characteristic is not a pollutant density.
pub fn bind_air_quality(
    entity: &Entity,
    accessory: &Accessory,
    descriptor: &CapabilityDescriptor,
) -> Result<SubscriptionId, BindingError> {
    let pollutant = Pollutant::from_density(descriptor.characteristic())
        .ok_or(BindingError::NotAPollutant(descriptor.characteristic()))?;

    let service = accessory.find_or_add_service(ServiceKind::AirQuality, entity.name());
    let density = characteristic_of(&service, pollutant.density_characteristic())?;
    let index = characteristic_of(&service, CharacteristicKind::AirQualityIndex)?;

    tracing::debug!(entity = %entity.name(), pollutant = ?pollutant, "Binding air quality sensor");

    Ok(entity.on_state(move |state| {
        let concentration = state.value();
        density.set_value(concentration);
        index.set_value(concentration.map_or(AirQuality::Unknown, |c| european_aqi(pollutant, c)));
    }))
}
