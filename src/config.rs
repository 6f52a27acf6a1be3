pub mod error;

use defmt::Format;
use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::monitor::encryption::{IV_LEN, KEY_LEN};
use crate::monitor::registry::{MonitorRegistry, MAX_MONITORS};
use crate::monitor::MonitorId;

pub const MAX_SSID_LEN: usize = 32;
pub const MAX_PASSPHRASE_LEN: usize = 64;
pub const MAX_HOST_LEN: usize = 64;
pub const MAX_ACCESS_KEY_LEN: usize = 64;

/// One row of the provisioning table, tokens kept as written in the source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Format)]
pub struct MonitorEntry {
    pub id: MonitorId,
    pub key: String<{ KEY_LEN * 2 }>,
    pub iv: String<{ IV_LEN * 2 }>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Format)]
pub struct WifiConfig {
    pub ssid: String<MAX_SSID_LEN>,
    pub passphrase: String<MAX_PASSPHRASE_LEN>,
}

/// Telemetry upload endpoint. The access key is optional deployment
/// configuration; when the field is present it must be filled in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Format)]
pub struct HttpConfig {
    pub host: String<MAX_HOST_LEN>,
    pub port: u16,
    pub access_key: Option<String<MAX_ACCESS_KEY_LEN>>,
}

/// The raw provisioning blob as decoded from storage, before validation.
///
/// An empty string in a required field is the unfilled-template sentinel and
/// fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Format)]
pub struct GatewayConfig {
    pub wifi: WifiConfig,
    pub http: HttpConfig,
    pub monitors: Vec<MonitorEntry, MAX_MONITORS>,
}

impl GatewayConfig {
    /// Decodes a provisioning blob without validating it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Decode` if the blob is not a well-formed
    /// postcard encoding of the schema.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|error| ConfigError::Decode { error })
    }

    /// Validates the configuration and builds the monitor registry.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a required field is left at its template
    /// placeholder, the port is out of range, or the monitor table is
    /// malformed. The gateway must not start from a rejected configuration.
    pub fn validate(self) -> Result<Provisioning, ConfigError> {
        if self.wifi.ssid.is_empty() {
            return Err(ConfigError::EmptySsid);
        }
        if self.wifi.passphrase.is_empty() {
            return Err(ConfigError::EmptyPassphrase);
        }
        if self.http.host.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort {
                port: self.http.port,
            });
        }
        if let Some(access_key) = &self.http.access_key {
            if access_key.is_empty() {
                return Err(ConfigError::EmptyAccessKey);
            }
        }

        let monitors = MonitorRegistry::from_entries(
            self.monitors
                .iter()
                .map(|entry| (entry.id, entry.key.as_str(), entry.iv.as_str())),
        )?;

        Ok(Provisioning {
            wifi: self.wifi,
            http: self.http,
            monitors,
        })
    }
}

/// The validated startup configuration. Built once, read-only thereafter.
pub struct Provisioning {
    pub wifi: WifiConfig,
    pub http: HttpConfig,
    pub monitors: MonitorRegistry,
}

impl Provisioning {
    /// Decodes and validates a provisioning blob in one step.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_bytes`] and [`GatewayConfig::validate`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        GatewayConfig::from_bytes(bytes)?.validate()
    }
}

#[cfg(test)]
mod test {
    use postcard::to_allocvec;

    use super::{GatewayConfig, HttpConfig, MonitorEntry, Provisioning, WifiConfig};
    use crate::config::error::ConfigError;
    use crate::monitor::encryption::MonitorEncryption;
    use crate::monitor::registry::RegistryError;

    fn sample_config() -> GatewayConfig {
        GatewayConfig {
            wifi: WifiConfig {
                ssid: "apiary".try_into().unwrap(),
                passphrase: "hunter22".try_into().unwrap(),
            },
            http: HttpConfig {
                host: "telemetry.example.org".try_into().unwrap(),
                port: 8080,
                access_key: Some("s3cr3t".try_into().unwrap()),
            },
            monitors: [
                MonitorEntry {
                    id: 0x0000_0000_0000_0000,
                    key: "0000000000000000".try_into().unwrap(),
                    iv: "00000000".try_into().unwrap(),
                },
                MonitorEntry {
                    id: 0x0000_0000_0000_0042,
                    key: "0123456789abcdef".try_into().unwrap(),
                    iv: "cafef00d".try_into().unwrap(),
                },
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_round_trip_and_validate() {
        let config = sample_config();
        let blob = to_allocvec(&config).unwrap();

        let decoded = GatewayConfig::from_bytes(&blob).unwrap();
        assert_eq!(decoded, config);

        let provisioning = decoded.validate().unwrap();
        assert_eq!(provisioning.wifi.ssid.as_str(), "apiary");
        assert_eq!(provisioning.http.port, 8080);
        assert_eq!(provisioning.monitors.len(), 2);
        assert_eq!(
            provisioning.monitors.lookup(0x0),
            Some(MonitorEncryption::from_tokens("0000000000000000", "00000000").unwrap())
        );
        assert_eq!(provisioning.monitors.lookup(0x1), None);
    }

    #[test]
    fn test_provisioning_from_bytes() {
        let blob = to_allocvec(&sample_config()).unwrap();

        let provisioning = Provisioning::from_bytes(&blob).unwrap();
        assert_eq!(provisioning.http.host.as_str(), "telemetry.example.org");
    }

    #[test]
    fn test_garbage_blob_is_rejected() {
        assert!(matches!(
            Provisioning::from_bytes(&[0xff; 3]),
            Err(ConfigError::Decode { .. })
        ));
    }

    #[test]
    fn test_empty_ssid_is_fatal() {
        let mut config = sample_config();
        config.wifi.ssid.clear();

        assert!(matches!(config.validate(), Err(ConfigError::EmptySsid)));
    }

    #[test]
    fn test_empty_passphrase_is_fatal() {
        let mut config = sample_config();
        config.wifi.passphrase.clear();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPassphrase)
        ));
    }

    #[test]
    fn test_empty_host_is_fatal() {
        let mut config = sample_config();
        config.http.host.clear();

        assert!(matches!(config.validate(), Err(ConfigError::EmptyHost)));
    }

    #[test]
    fn test_port_zero_is_fatal() {
        let mut config = sample_config();
        config.http.port = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPort { port: 0 })
        ));
    }

    #[test]
    fn test_access_key_is_optional_but_not_blank() {
        let mut config = sample_config();
        config.http.access_key = None;
        assert!(config.validate().is_ok());

        let mut config = sample_config();
        config.http.access_key = Some(heapless::String::new());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyAccessKey)
        ));
    }

    #[test]
    fn test_duplicate_monitor_row_is_fatal() {
        let mut config = sample_config();
        let duplicate = config.monitors[0].clone();
        config.monitors.push(duplicate).unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Registry {
                source: RegistryError::DuplicateMonitor { id: 0x0 }
            })
        ));
    }

    #[test]
    fn test_bad_monitor_token_is_fatal() {
        let mut config = sample_config();
        config.monitors[1].iv = "00".try_into().unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Registry {
                source: RegistryError::BadToken { id: 0x42, .. }
            })
        ));
    }
}
