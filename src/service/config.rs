use crate::negotiator::NegotiatorConfig;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub negotiator: NegotiatorConfig,
    /// Upper bound for a single negotiation (including waiting for a blocking thread).
    ///
    /// Defaults to 30s.
    pub negotiation_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            negotiator: NegotiatorConfig::default(),
            negotiation_timeout: Duration::from_secs(30),
        }
    }
}
