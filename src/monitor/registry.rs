use defmt::Format;
use heapless::FnvIndexMap;
use snafu::Snafu;

use crate::monitor::encryption::{MonitorEncryption, TokenError};
use crate::monitor::MonitorId;

/// Maximum number of provisioned monitors (must be a power of two).
pub const MAX_MONITORS: usize = 64;

/// Immutable mapping from monitor id to its key material.
///
/// Built once at startup from the provisioning table; lookups never mutate,
/// so the registry can be shared freely across readers.
pub struct MonitorRegistry {
    monitors: FnvIndexMap<MonitorId, MonitorEncryption, MAX_MONITORS>,
}

impl MonitorRegistry {
    /// Builds the registry from `(id, key token, iv token)` rows.
    ///
    /// # Errors
    ///
    /// Returns a `RegistryError` on a duplicate id, a malformed token, or a
    /// table larger than `MAX_MONITORS`. A partial registry would silently
    /// mis-map key material, so every row must be accepted.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (MonitorId, &'a str, &'a str)>,
    {
        let mut monitors = FnvIndexMap::new();
        for (id, key, iv) in entries {
            let encryption = MonitorEncryption::from_tokens(key, iv)
                .map_err(|source| RegistryError::BadToken { id, source })?;
            match monitors.insert(id, encryption) {
                Ok(None) => {}
                Ok(Some(_)) => return Err(RegistryError::DuplicateMonitor { id }),
                Err(_) => {
                    return Err(RegistryError::TableFull {
                        capacity: MAX_MONITORS,
                    })
                }
            }
        }
        Ok(Self { monitors })
    }

    /// Looks up the key material for a monitor. An unknown id is an expected
    /// condition (unprovisioned or foreign transmitter), not an error.
    #[must_use]
    pub fn lookup(&self, id: MonitorId) -> Option<MonitorEncryption> {
        self.monitors.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

#[derive(Debug, Snafu, Format)]
pub enum RegistryError {
    #[snafu(display("Duplicate monitor id: {:#018x}", id))]
    DuplicateMonitor { id: MonitorId },
    #[snafu(display("Bad token for monitor {:#018x}: {}", id, source))]
    BadToken { id: MonitorId, source: TokenError },
    #[snafu(display("Monitor table exceeds capacity of {}", capacity))]
    TableFull { capacity: usize },
}

#[cfg(test)]
mod test {
    use super::{MonitorRegistry, RegistryError};
    use crate::monitor::encryption::MonitorEncryption;

    #[test]
    fn test_lookup_returns_provisioned_descriptor() {
        let registry = MonitorRegistry::from_entries([
            (0x0000_0000_0000_0000, "0000000000000000", "00000000"),
            (0x1122_3344_5566_7788, "0123456789abcdef", "cafef00d"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.lookup(0x0),
            Some(MonitorEncryption::from_tokens("0000000000000000", "00000000").unwrap())
        );
        assert_eq!(
            registry.lookup(0x1122_3344_5566_7788),
            Some(MonitorEncryption::from_tokens("0123456789abcdef", "cafef00d").unwrap())
        );
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let registry =
            MonitorRegistry::from_entries([(0x0, "0000000000000000", "00000000")]).unwrap();

        assert_eq!(registry.lookup(0x1), None);
        assert_eq!(registry.lookup(u64::MAX), None);
    }

    #[test]
    fn test_duplicate_id_is_fatal() {
        let result = MonitorRegistry::from_entries([
            (0x7, "0000000000000000", "00000000"),
            (0x7, "ffffffffffffffff", "ffffffff"),
        ]);

        assert!(matches!(
            result,
            Err(RegistryError::DuplicateMonitor { id: 0x7 })
        ));
    }

    #[test]
    fn test_malformed_token_is_fatal() {
        let result = MonitorRegistry::from_entries([(0x9, "not hex at all!!", "00000000")]);

        assert!(matches!(result, Err(RegistryError::BadToken { id: 0x9, .. })));
    }

    #[test]
    fn test_empty_table_is_valid() {
        let registry = MonitorRegistry::from_entries([]).unwrap();

        assert!(registry.is_empty());
        assert_eq!(registry.lookup(0x0), None);
    }
}
