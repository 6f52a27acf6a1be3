pub mod encryption;
pub mod registry;

pub type MonitorId = u64;
