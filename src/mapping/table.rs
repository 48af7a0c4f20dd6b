// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device class lookup table.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::accessory::{Accessory, CharacteristicKind, ServiceKind};
use crate::entity::Entity;
use crate::error::BindingError;
use crate::manager::PlatformConfig;
use crate::subscription::SubscriptionId;

use super::binder::{bind_air_quality, bind_carbon_gas, bind_default};
use super::{CapabilityDescriptor, CarbonGas};

/// How entities of one device class are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingEntry {
    /// One characteristic receives the (unit-converted) reading.
    Default(CapabilityDescriptor),
    /// Carbon gas sensor with level, detection and peak.
    CarbonGas(CarbonGas),
    /// Pollutant density plus the derived air quality level.
    AirQualityComponent(CapabilityDescriptor),
}

impl MappingEntry {
    /// Returns the descriptor carried by the entry, if any.
    ///
    /// Carbon gas entries derive their characteristics from the gas kind.
    #[must_use]
    pub const fn descriptor(&self) -> Option<CapabilityDescriptor> {
        match self {
            Self::Default(descriptor) | Self::AirQualityComponent(descriptor) => Some(*descriptor),
            Self::CarbonGas(_) => None,
        }
    }

    /// Binds an entity to an accessory with the binder this entry selects.
    ///
    /// # Errors
    ///
    /// Propagates the binder's [`BindingError`]; entries from the lookup
    /// table never produce one.
    pub fn bind(
        &self,
        entity: &Entity,
        accessory: &Accessory,
        config: &PlatformConfig,
    ) -> Result<SubscriptionId, BindingError> {
        match self {
            Self::Default(descriptor) => bind_default(entity, accessory, descriptor),
            Self::CarbonGas(gas) => {
                bind_carbon_gas(entity, accessory, *gas, config.threshold(*gas))
            }
            Self::AirQualityComponent(descriptor) => {
                bind_air_quality(entity, accessory, descriptor)
            }
        }
    }
}

const fn default_entry(service: ServiceKind, characteristic: CharacteristicKind) -> MappingEntry {
    MappingEntry::Default(CapabilityDescriptor::new(service, characteristic))
}

const fn pollutant_entry(characteristic: CharacteristicKind) -> MappingEntry {
    MappingEntry::AirQualityComponent(CapabilityDescriptor::new(
        ServiceKind::AirQuality,
        characteristic,
    ))
}

static SENSOR_MAPPINGS: LazyLock<HashMap<&'static str, MappingEntry>> = LazyLock::new(|| {
    use CharacteristicKind as C;

    let aqi = default_entry(ServiceKind::AirQuality, C::AirQualityIndex);

    HashMap::from([
        ("aqi", aqi),
        ("air-quality-index", aqi),
        ("carbon_dioxide", MappingEntry::CarbonGas(CarbonGas::CarbonDioxide)),
        ("carbon_monoxide", MappingEntry::CarbonGas(CarbonGas::CarbonMonoxide)),
        ("humidity", default_entry(ServiceKind::Humidity, C::Humidity)),
        ("illuminance", default_entry(ServiceKind::Light, C::LightLevel)),
        ("nitrogen_dioxide", pollutant_entry(C::No2Density)),
        ("ozone", pollutant_entry(C::OzoneDensity)),
        ("pm25", pollutant_entry(C::Pm25Density)),
        ("pm10", pollutant_entry(C::Pm10Density)),
        ("sulphur_dioxide", pollutant_entry(C::So2Density)),
        ("temperature", default_entry(ServiceKind::Temperature, C::Temperature)),
        ("volatile_organic_compounds", pollutant_entry(C::VocDensity)),
    ])
});

/// Looks up the mapping for a device class.
///
/// Matching is exact and case-sensitive. `None` means the device class is
/// not in the table and the caller should try the legacy heuristics.
///
/// # Examples
///
/// ```
/// use esphome_bridge::mapping::{MappingEntry, resolve};
///
/// assert!(matches!(resolve("pm25"), Some(MappingEntry::AirQualityComponent(_))));
/// assert!(resolve("PM25").is_none());
/// assert!(resolve("battery").is_none());
/// ```
#[must_use]
pub fn resolve(device_class: &str) -> Option<&'static MappingEntry> {
    SENSOR_MAPPINGS.get(device_class)
}

/// Returns every device class in the table.
pub fn device_classes() -> impl Iterator<Item = &'static str> {
    SENSOR_MAPPINGS.keys().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pollutant;

    #[test]
    fn table_has_every_device_class() {
        let mut classes: Vec<_> = device_classes().collect();
        classes.sort_unstable();

        assert_eq!(
            classes,
            vec![
                "air-quality-index",
                "aqi",
                "carbon_dioxide",
                "carbon_monoxide",
                "humidity",
                "illuminance",
                "nitrogen_dioxide",
                "ozone",
                "pm10",
                "pm25",
                "sulphur_dioxide",
                "temperature",
                "volatile_organic_compounds",
            ]
        );
    }

    #[test]
    fn every_descriptor_is_valid() {
        for class in device_classes() {
            if let Some(descriptor) = resolve(class).and_then(MappingEntry::descriptor) {
                assert!(descriptor.validate().is_ok(), "{class}");
            }
        }
    }

    #[test]
    fn pollutant_entries_carry_density_characteristics() {
        for class in [
            "nitrogen_dioxide",
            "ozone",
            "pm25",
            "pm10",
            "sulphur_dioxide",
            "volatile_organic_compounds",
        ] {
            let Some(MappingEntry::AirQualityComponent(descriptor)) = resolve(class) else {
                panic!("{class} should be an air quality component");
            };
            assert_eq!(descriptor.service(), ServiceKind::AirQuality);
            assert!(Pollutant::from_density(descriptor.characteristic()).is_some());
        }
    }

    #[test]
    fn carbon_entries() {
        assert_eq!(
            resolve("carbon_dioxide"),
            Some(&MappingEntry::CarbonGas(CarbonGas::CarbonDioxide))
        );
        assert_eq!(
            resolve("carbon_monoxide"),
            Some(&MappingEntry::CarbonGas(CarbonGas::CarbonMonoxide))
        );
        assert_eq!(resolve("carbon_dioxide").and_then(MappingEntry::descriptor), None);
    }

    #[test]
    fn default_entries() {
        assert_eq!(
            resolve("temperature").and_then(MappingEntry::descriptor),
            Some(CapabilityDescriptor::new(
                ServiceKind::Temperature,
                CharacteristicKind::Temperature
            ))
        );
        assert_eq!(
            resolve("illuminance").and_then(MappingEntry::descriptor),
            Some(CapabilityDescriptor::new(
                ServiceKind::Light,
                CharacteristicKind::LightLevel
            ))
        );
    }

    #[test]
    fn lookup_is_exact() {
        assert!(resolve("Temperature").is_none());
        assert!(resolve("temperature ").is_none());
        assert!(resolve("").is_none());
        assert!(resolve("pm2.5").is_none());
    }
}
