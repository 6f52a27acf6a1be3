use defmt::Format;
use snafu::Snafu;

use crate::monitor::registry::RegistryError;

#[derive(Debug, Snafu, Format)]
pub enum ConfigError {
    #[snafu(display("Malformed provisioning data: {:?}", error))]
    Decode { error: postcard::Error },
    #[snafu(display("Wi-Fi SSID is unset"))]
    EmptySsid,
    #[snafu(display("Wi-Fi passphrase is unset"))]
    EmptyPassphrase,
    #[snafu(display("HTTP host is unset"))]
    EmptyHost,
    #[snafu(display("HTTP port {} is out of range", port))]
    InvalidPort { port: u16 },
    #[snafu(display("HTTP access key is present but empty"))]
    EmptyAccessKey,
    #[snafu(display("Monitor table error: {}", source))]
    Registry { source: RegistryError },
}

impl From<RegistryError> for ConfigError {
    fn from(source: RegistryError) -> Self {
        Self::Registry { source }
    }
}
