// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability descriptors and carbon gas kinds.

use std::fmt;

use crate::accessory::{CharacteristicKind, ServiceKind};
use crate::error::BindingError;

/// Pairs the service an entity is exposed through with the characteristic
/// that receives its readings.
///
/// # Examples
///
/// ```
/// use esphome_bridge::accessory::{CharacteristicKind, ServiceKind};
/// use esphome_bridge::mapping::CapabilityDescriptor;
///
/// let descriptor = CapabilityDescriptor::new(ServiceKind::Humidity, CharacteristicKind::Humidity);
/// assert!(descriptor.validate().is_ok());
///
/// let broken = CapabilityDescriptor::new(ServiceKind::Humidity, CharacteristicKind::Temperature);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityDescriptor {
    service: ServiceKind,
    characteristic: CharacteristicKind,
}

impl CapabilityDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(service: ServiceKind, characteristic: CharacteristicKind) -> Self {
        Self {
            service,
            characteristic,
        }
    }

    /// Returns the service kind.
    #[must_use]
    pub const fn service(&self) -> ServiceKind {
        self.service
    }

    /// Returns the characteristic kind.
    #[must_use]
    pub const fn characteristic(&self) -> CharacteristicKind {
        self.characteristic
    }

    /// Checks that the service offers the characteristic.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::UnsupportedCharacteristic`] otherwise.
    pub fn validate(&self) -> Result<(), BindingError> {
        if self.service.offers(self.characteristic) {
            Ok(())
        } else {
            Err(BindingError::UnsupportedCharacteristic {
                service: self.service,
                characteristic: self.characteristic,
            })
        }
    }
}

impl fmt::Display for CapabilityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.service, self.characteristic)
    }
}

/// A carbon gas with level, detection and peak characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarbonGas {
    /// Carbon dioxide.
    CarbonDioxide,
    /// Carbon monoxide.
    CarbonMonoxide,
}

impl CarbonGas {
    /// Returns the service kind of the gas sensor.
    #[must_use]
    pub const fn service(&self) -> ServiceKind {
        match self {
            Self::CarbonDioxide => ServiceKind::CarbonDioxide,
            Self::CarbonMonoxide => ServiceKind::CarbonMonoxide,
        }
    }

    /// Returns the concentration characteristic.
    #[must_use]
    pub const fn level(&self) -> CharacteristicKind {
        match self {
            Self::CarbonDioxide => CharacteristicKind::Co2Level,
            Self::CarbonMonoxide => CharacteristicKind::CoLevel,
        }
    }

    /// Returns the above-threshold characteristic.
    #[must_use]
    pub const fn detected(&self) -> CharacteristicKind {
        match self {
            Self::CarbonDioxide => CharacteristicKind::Co2Detected,
            Self::CarbonMonoxide => CharacteristicKind::CoDetected,
        }
    }

    /// Returns the highest-level-seen characteristic.
    #[must_use]
    pub const fn peak_level(&self) -> CharacteristicKind {
        match self {
            Self::CarbonDioxide => CharacteristicKind::Co2PeakLevel,
            Self::CarbonMonoxide => CharacteristicKind::CoPeakLevel,
        }
    }
}

impl fmt::Display for CarbonGas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CarbonDioxide => "CO2",
            Self::CarbonMonoxide => "CO",
        })
    }
}
