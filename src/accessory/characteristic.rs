// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristics: the individual value slots exposed by a service.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::subscription::{CallbackRegistry, SubscriptionId};
use crate::types::AirQuality;

/// The characteristic kinds the bridge can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacteristicKind {
    /// Overall air quality level (0-5).
    AirQualityIndex,
    /// Carbon dioxide concentration in ppm.
    Co2Level,
    /// Whether carbon dioxide is above the configured threshold.
    Co2Detected,
    /// Highest carbon dioxide concentration seen.
    Co2PeakLevel,
    /// Carbon monoxide concentration in ppm.
    CoLevel,
    /// Whether carbon monoxide is above the configured threshold.
    CoDetected,
    /// Highest carbon monoxide concentration seen.
    CoPeakLevel,
    /// Ambient light level in lux.
    LightLevel,
    /// Relative humidity in percent.
    Humidity,
    /// Temperature in degrees Celsius.
    Temperature,
    /// Nitrogen dioxide density in µg/m³.
    No2Density,
    /// Ozone density in µg/m³.
    OzoneDensity,
    /// PM10 density in µg/m³.
    Pm10Density,
    /// PM2.5 density in µg/m³.
    Pm25Density,
    /// Sulphur dioxide density in µg/m³.
    So2Density,
    /// Volatile organic compound density in µg/m³.
    VocDensity,
}

impl CharacteristicKind {
    /// Returns the display name used by the accessory protocol.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AirQualityIndex => "Air Quality",
            Self::Co2Level => "Carbon Dioxide Level",
            Self::Co2Detected => "Carbon Dioxide Detected",
            Self::Co2PeakLevel => "Carbon Dioxide Peak Level",
            Self::CoLevel => "Carbon Monoxide Level",
            Self::CoDetected => "Carbon Monoxide Detected",
            Self::CoPeakLevel => "Carbon Monoxide Peak Level",
            Self::LightLevel => "Current Ambient Light Level",
            Self::Humidity => "Current Relative Humidity",
            Self::Temperature => "Current Temperature",
            Self::No2Density => "Nitrogen Dioxide Density",
            Self::OzoneDensity => "Ozone Density",
            Self::Pm10Density => "PM10 Density",
            Self::Pm25Density => "PM2.5 Density",
            Self::So2Density => "Sulphur Dioxide Density",
            Self::VocDensity => "VOC Density",
        }
    }
}

impl fmt::Display for CharacteristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value held by a characteristic.
///
/// `Null` is the host's "no value yet" state and is also what an undefined
/// sensor reading is forwarded as.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CharacteristicValue {
    /// No value.
    #[default]
    Null,
    /// A numeric reading.
    Float(f64),
    /// A detection flag.
    Bool(bool),
    /// A discrete level.
    UInt8(u8),
}

impl CharacteristicValue {
    /// Returns the numeric value, if this is a `Float`.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the flag, if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the level, if this is a `UInt8`.
    #[must_use]
    pub const fn as_u8(&self) -> Option<u8> {
        match self {
            Self::UInt8(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns `true` for `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<f64> for CharacteristicValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Option<f64>> for CharacteristicValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Float)
    }
}

impl From<bool> for CharacteristicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<AirQuality> for CharacteristicValue {
    fn from(value: AirQuality) -> Self {
        Self::UInt8(value.value())
    }
}

/// A live value slot on a service.
///
/// Every [`set_value`](Self::set_value) call stores the value and notifies
/// change subscribers, even when the value is unchanged: pushes are
/// "set latest value" operations and the host decides what to do with
/// repeats.
pub struct Characteristic {
    kind: CharacteristicKind,
    value: RwLock<CharacteristicValue>,
    updates: AtomicU64,
    listeners: CallbackRegistry<CharacteristicValue>,
}

impl Characteristic {
    /// Creates a characteristic holding `Null`.
    #[must_use]
    pub fn new(kind: CharacteristicKind) -> Self {
        Self {
            kind,
            value: RwLock::new(CharacteristicValue::Null),
            updates: AtomicU64::new(0),
            listeners: CallbackRegistry::new(),
        }
    }

    /// Returns the characteristic kind.
    #[must_use]
    pub fn kind(&self) -> CharacteristicKind {
        self.kind
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> CharacteristicValue {
        *self.value.read()
    }

    /// Sets the value and notifies change subscribers.
    pub fn set_value(&self, value: impl Into<CharacteristicValue>) {
        let value = value.into();
        *self.value.write() = value;
        self.updates.fetch_add(1, Ordering::Relaxed);
        self.listeners.dispatch(&value);
    }

    /// Returns how many times [`set_value`](Self::set_value) was called.
    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Subscribes to value pushes, e.g. to forward them to controllers.
    pub fn on_change<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CharacteristicValue) + Send + Sync + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Removes a change subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl fmt::Debug for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Characteristic")
            .field("kind", &self.kind)
            .field("value", &self.value())
            .field("updates", &self.update_count())
            .finish_non_exhaustive()
    }
}
