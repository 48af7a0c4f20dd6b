// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bridge.
//!
//! Unmappable entities, unsupported pollutants and undefined readings are
//! not errors: they surface as `false`, a sentinel level, or a `Null`
//! value. The errors here are either contract violations by the caller of
//! a binder, or invalid configuration.

use thiserror::Error;

use crate::accessory::{CharacteristicKind, ServiceKind};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A binder was called with a descriptor it cannot honour.
    #[error("binding error: {0}")]
    Binding(#[from] BindingError),

    /// A value could not be parsed.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The platform configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to value parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The unit string is not a temperature unit.
    #[error("unknown temperature unit: {0}")]
    UnknownUnit(String),
}

/// Contract violations raised by capability binders.
///
/// These are programming errors by the caller. The mapping table never
/// produces them; they are only reachable when a binder is invoked directly
/// with a hand-built descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The descriptor names a characteristic its service does not offer.
    #[error("{service} does not offer the {characteristic} characteristic")]
    UnsupportedCharacteristic {
        /// The service kind of the descriptor.
        service: ServiceKind,
        /// The characteristic that is not part of the service.
        characteristic: CharacteristicKind,
    },

    /// The air-quality binder received a characteristic that is not a
    /// pollutant density.
    #[error("{0} is not a pollutant density characteristic")]
    NotAPollutant(CharacteristicKind),
}

/// Errors related to loading and validating the platform configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A gas threshold is negative, infinite or NaN.
    #[error("invalid {name}: {value}")]
    InvalidThreshold {
        /// The configuration key of the threshold.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A device entry has an empty host.
    #[error("device #{index} has an empty host")]
    EmptyHost {
        /// Position of the device in the `devices` array.
        index: usize,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
