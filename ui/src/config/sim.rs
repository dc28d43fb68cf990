use std::time::Duration;

use lifescan_core::config::SessionConfig;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub session: SessionConfig,
    /// Number of generations to run before exiting.
    pub generations: u64,
    /// Minimum time between two step requests.
    pub interval: Duration,
}
impl Default for SimConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            generations: 100,
            interval: Duration::from_millis(100),
        }
    }
}
