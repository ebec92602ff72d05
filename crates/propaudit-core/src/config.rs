/// Immutable business-rule configuration for one audit run.
///
/// Passed explicitly into the engine's entry points rather than read from
/// ambient state, so tests can substitute values without process-level
/// mutation. The defaults match the operators' current policy.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// Inclusive lower bound for the management fee dollar amount.
    pub management_fee_dollar_min: f64,
    /// Inclusive upper bound for the management fee dollar amount.
    pub management_fee_dollar_max: f64,
    /// Discrete management fee percentages considered valid.
    pub management_fee_percent_allowed: Vec<f64>,
    /// Maximum number of pages decoded from one document.
    pub max_pages: usize,
    /// Tolerance when reconciling the rent-roll sum against the prepaid
    /// rent liability.
    pub reconciliation_epsilon: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            management_fee_dollar_min: 95.0,
            management_fee_dollar_max: 250.0,
            management_fee_percent_allowed: vec![3.0, 3.5, 3.75, 4.0, 4.5, 5.0, 5.5, 6.0],
            max_pages: 10_000,
            reconciliation_epsilon: 0.001,
        }
    }
}
