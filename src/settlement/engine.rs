use super::config::SettlementConfig;
use crate::core::Result;

/// Runs every settlement calculation with one [`SettlementConfig`].
///
/// The engine holds no state besides its configuration, so a single
/// instance can be shared freely between threads. The individual
/// operations live next to the types they produce:
///
/// - [`value_player`](SettlementEngine::value_player)
/// - [`compute_payouts`](SettlementEngine::compute_payouts)
/// - [`validate_pot`](SettlementEngine::validate_pot)
/// - [`settle`](SettlementEngine::settle)
/// - [`compute_game_results`](SettlementEngine::compute_game_results)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementEngine {
    config: SettlementConfig,
}

impl SettlementEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: SettlementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }
}
