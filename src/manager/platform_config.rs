// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform and device configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::mapping::CarbonGas;

/// Default native API port.
pub const DEFAULT_PORT: u16 = 6053;

/// Default delay before the transport reconnects to a device.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_millis(90_000);

/// Default time the transport spends on mDNS discovery.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Configuration of the bridge platform.
///
/// Deserializes from the platform block of the host configuration file.
/// Connection settings are handed to the transport unchanged; the bridge
/// itself only reads the gas thresholds, the exclusion lists and `debug`.
///
/// # Examples
///
/// ```
/// use esphome_bridge::manager::PlatformConfig;
///
/// let config = PlatformConfig::from_json(r#"{
///     "platform": "esphome",
///     "devices": [{ "host": "livingroom.local", "excludedNames": ["Uptime"] }],
///     "co2Threshold": 1000
/// }"#)?;
///
/// assert_eq!(config.devices().len(), 1);
/// assert_eq!(config.co2_threshold, Some(1000.0));
/// assert_eq!(config.co_threshold, None);
/// # Ok::<(), esphome_bridge::Error>(())
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    /// Name of the platform instance.
    #[serde(default)]
    pub name: Option<String>,
    /// Explicitly configured devices.
    #[serde(default)]
    pub devices: Option<Vec<DeviceConfig>>,
    /// Log per-entity decisions at info level instead of debug.
    #[serde(default)]
    pub debug: bool,
    /// Reconnect delay in milliseconds for all devices.
    #[serde(default)]
    pub retry_after: Option<u64>,
    /// Whether to discover devices via mDNS.
    #[serde(default)]
    pub discover: bool,
    /// Discovery timeout in milliseconds.
    #[serde(default)]
    pub discovery_timeout: Option<u64>,
    /// Carbon monoxide level (ppm) above which CO counts as detected.
    #[serde(default)]
    pub co_threshold: Option<f64>,
    /// Carbon dioxide level (ppm) above which CO2 counts as detected.
    #[serde(default)]
    pub co2_threshold: Option<f64>,
}

impl PlatformConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input, or any error from
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks thresholds and hosts, and normalizes the device list.
    ///
    /// With neither devices nor discovery configured, no accessory can
    /// ever appear; this is logged and `devices` becomes an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThreshold`] for a negative or
    /// non-finite threshold and [`ConfigError::EmptyHost`] for a device
    /// without a host.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        for (name, threshold) in [
            ("coThreshold", self.co_threshold),
            ("co2Threshold", self.co2_threshold),
        ] {
            if let Some(value) = threshold
                && (!value.is_finite() || value < 0.0)
            {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if let Some(index) = self.devices().iter().position(|d| d.host.trim().is_empty()) {
            return Err(ConfigError::EmptyHost { index });
        }

        if self.devices.is_none() && !self.discover {
            tracing::error!(
                "No devices configured and discovery is disabled, no accessories will be provided"
            );
            self.devices = Some(Vec::new());
        }

        Ok(())
    }

    /// Returns the configured devices.
    #[must_use]
    pub fn devices(&self) -> &[DeviceConfig] {
        self.devices.as_deref().unwrap_or_default()
    }

    /// Returns the detection threshold for a carbon gas, if configured.
    #[must_use]
    pub fn threshold(&self, gas: CarbonGas) -> Option<f64> {
        match gas {
            CarbonGas::CarbonDioxide => self.co2_threshold,
            CarbonGas::CarbonMonoxide => self.co_threshold,
        }
    }

    /// Returns the reconnect delay.
    #[must_use]
    pub fn retry_after(&self) -> Duration {
        self.retry_after
            .map_or(DEFAULT_RETRY_AFTER, Duration::from_millis)
    }

    /// Returns the discovery timeout.
    #[must_use]
    pub fn discovery_timeout(&self) -> Duration {
        self.discovery_timeout
            .map_or(DEFAULT_DISCOVERY_TIMEOUT, Duration::from_millis)
    }

    /// Adds a device.
    #[must_use]
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.devices.get_or_insert_with(Vec::new).push(device);
        self
    }

    /// Sets the carbon monoxide threshold.
    #[must_use]
    pub fn with_co_threshold(mut self, threshold: f64) -> Self {
        self.co_threshold = Some(threshold);
        self
    }

    /// Sets the carbon dioxide threshold.
    #[must_use]
    pub fn with_co2_threshold(mut self, threshold: f64) -> Self {
        self.co2_threshold = Some(threshold);
        self
    }

    /// Enables debug logging of per-entity decisions.
    #[must_use]
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Enables mDNS discovery.
    #[must_use]
    pub fn with_discovery(mut self) -> Self {
        self.discover = true;
        self
    }
}

/// Configuration of one ESPHome device.
///
/// # Examples
///
/// ```
/// use esphome_bridge::manager::DeviceConfig;
///
/// let device = DeviceConfig::new("192.168.1.40")
///     .with_encryption_key("c2VjcmV0LWtleS1mb3ItdGVzdGluZy0xMjM0NTY3OA==")
///     .with_excluded_type("switch")
///     .with_excluded_name("WiFi Signal");
///
/// assert_eq!(device.port, 6053);
/// assert!(device.is_type_excluded("switch"));
/// assert!(device.is_name_excluded("WiFi Signal"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    /// Device host name or IP address.
    pub host: String,
    /// Native API port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Legacy API password.
    #[serde(default)]
    pub password: Option<String>,
    /// Noise encryption key (base64).
    #[serde(default)]
    pub encryption_key: Option<String>,
    /// Per-device reconnect delay in milliseconds.
    #[serde(default)]
    pub retry_after: Option<u64>,
    /// Entity types never exposed for this device.
    #[serde(default)]
    pub excluded_types: Vec<String>,
    /// Entity names never exposed for this device.
    #[serde(default)]
    pub excluded_names: Vec<String>,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl DeviceConfig {
    /// Creates a device configuration with default settings.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            password: None,
            encryption_key: None,
            retry_after: None,
            excluded_types: Vec::new(),
            excluded_names: Vec::new(),
        }
    }

    /// Sets the native API port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the legacy API password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the encryption key.
    #[must_use]
    pub fn with_encryption_key(mut self, key: impl Into<String>) -> Self {
        self.encryption_key = Some(key.into());
        self
    }

    /// Excludes an entity type.
    #[must_use]
    pub fn with_excluded_type(mut self, component_type: impl Into<String>) -> Self {
        self.excluded_types.push(component_type.into());
        self
    }

    /// Excludes an entity name.
    #[must_use]
    pub fn with_excluded_name(mut self, name: impl Into<String>) -> Self {
        self.excluded_names.push(name.into());
        self
    }

    /// Returns true if entities of this type must not be exposed.
    #[must_use]
    pub fn is_type_excluded(&self, component_type: &str) -> bool {
        self.excluded_types.iter().any(|t| t == component_type)
    }

    /// Returns true if the entity with this name must not be exposed.
    #[must_use]
    pub fn is_name_excluded(&self, name: &str) -> bool {
        self.excluded_names.iter().any(|n| n == name)
    }

    /// Returns the reconnect delay, falling back to the platform's.
    #[must_use]
    pub fn retry_after(&self, platform: &PlatformConfig) -> Duration {
        self.retry_after
            .map_or_else(|| platform.retry_after(), Duration::from_millis)
    }
}
