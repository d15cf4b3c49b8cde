use serde::{Deserialize, Serialize};

/// Settings applied when new installations are created.
///
/// Every field falls back on its own when missing from the store, so a file
/// that only sets `min-ram` still gets the stock values for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Minimum heap size in GiB.
    #[serde(rename = "min-ram", default = "default_min_ram")]
    pub min_ram: f64,
    /// Maximum heap size in GiB.
    #[serde(rename = "max-ram", default = "default_max_ram")]
    pub max_ram: f64,
    /// Minutes of inactivity before a server is stopped. `0` disables it.
    #[serde(default = "default_idle_time")]
    pub idle_time: i64,
    /// Number of backups to keep.
    #[serde(default = "default_backups")]
    pub backups: i64,
}

fn default_min_ram() -> f64 {
    0.5
}
fn default_max_ram() -> f64 {
    6.0
}
fn default_idle_time() -> i64 {
    0
}
fn default_backups() -> i64 {
    5
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            min_ram: default_min_ram(),
            max_ram: default_max_ram(),
            idle_time: default_idle_time(),
            backups: default_backups(),
        }
    }
}
