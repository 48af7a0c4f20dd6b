// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Services: groups of related characteristics on an accessory.

use std::fmt;
use std::sync::Arc;

use super::{Characteristic, CharacteristicKind};

/// The service kinds the bridge can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// Air quality sensor (overall level plus pollutant densities).
    AirQuality,
    /// Carbon dioxide sensor.
    CarbonDioxide,
    /// Carbon monoxide sensor.
    CarbonMonoxide,
    /// Humidity sensor.
    Humidity,
    /// Light sensor.
    Light,
    /// Temperature sensor.
    Temperature,
}

impl ServiceKind {
    /// Returns the display name used by the accessory protocol.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AirQuality => "Air Quality Sensor",
            Self::CarbonDioxide => "Carbon Dioxide Sensor",
            Self::CarbonMonoxide => "Carbon Monoxide Sensor",
            Self::Humidity => "Humidity Sensor",
            Self::Light => "Light Sensor",
            Self::Temperature => "Temperature Sensor",
        }
    }

    /// Returns the characteristics a service of this kind offers.
    #[must_use]
    pub const fn characteristics(&self) -> &'static [CharacteristicKind] {
        use CharacteristicKind as C;

        match self {
            Self::AirQuality => &[
                C::AirQualityIndex,
                C::No2Density,
                C::OzoneDensity,
                C::Pm10Density,
                C::Pm25Density,
                C::So2Density,
                C::VocDensity,
            ],
            Self::CarbonDioxide => &[C::Co2Detected, C::Co2Level, C::Co2PeakLevel],
            Self::CarbonMonoxide => &[C::CoDetected, C::CoLevel, C::CoPeakLevel],
            Self::Humidity => &[C::Humidity],
            Self::Light => &[C::LightLevel],
            Self::Temperature => &[C::Temperature],
        }
    }

    /// Returns `true` if this service kind offers `characteristic`.
    #[must_use]
    pub fn offers(&self, characteristic: CharacteristicKind) -> bool {
        self.characteristics().contains(&characteristic)
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A service instance on an accessory.
///
/// All characteristics of the service kind are created up front, each
/// holding `Null` until a binder pushes a value.
#[derive(Debug)]
pub struct Service {
    kind: ServiceKind,
    name: String,
    subtype: String,
    characteristics: Vec<Arc<Characteristic>>,
}

impl Service {
    /// Creates a service with all of its kind's characteristics.
    #[must_use]
    pub fn new(kind: ServiceKind, name: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            subtype: subtype.into(),
            characteristics: kind
                .characteristics()
                .iter()
                .map(|&c| Arc::new(Characteristic::new(c)))
                .collect(),
        }
    }

    /// Returns the service kind.
    #[must_use]
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the subtype used to tell apart services of the same kind.
    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Returns the characteristic of the given kind, if the service offers it.
    #[must_use]
    pub fn characteristic(&self, kind: CharacteristicKind) -> Option<&Arc<Characteristic>> {
        self.characteristics.iter().find(|c| c.kind() == kind)
    }

    /// Returns all characteristics.
    #[must_use]
    pub fn characteristics(&self) -> &[Arc<Characteristic>] {
        &self.characteristics
    }
}
