//! Solver configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for one constraint graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Upper bound on the number of assignments `resolve()` materializes.
    /// The underlying search stops as soon as the cap is reached; it is the
    /// only cancellation mechanism the engine has.
    pub max_solution_count: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_solution_count: 10,
        }
    }
}

impl SolverConfig {
    pub fn with_max_solutions(max_solution_count: usize) -> Self {
        SolverConfig { max_solution_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let config = SolverConfig::with_max_solutions(3);
        let json = serde_json::to_string(&config).unwrap();
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
