//! Search Fixtures

use serde::Deserialize;

use crate::solvers::{MatchPolicy, SearchConfig, SearchLimits, Strategy};

/// Search settings from YAML
#[derive(Debug, Deserialize)]
pub struct SearchFixture {
    /// Target total
    pub pick: i64,

    /// Algorithm to run
    #[serde(default)]
    pub strategy: Strategy,

    /// Leaf match policy
    #[serde(default)]
    pub policy: MatchPolicy,

    /// Resource limits, flattened so `max_nodes` sits at the top level
    #[serde(flatten)]
    pub limits: SearchLimits,
}

impl SearchFixture {
    /// Split into the target total and the solver configuration.
    pub fn into_parts(self) -> (i64, SearchConfig) {
        let config = SearchConfig {
            strategy: self.strategy,
            policy: self.policy,
            limits: self.limits,
        };

        (self.pick, config)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::tree::DEFAULT_MAX_NODES;

    use super::*;

    #[test]
    fn search_fixture_defaults() -> TestResult {
        let fixture: SearchFixture = serde_norway::from_str("pick: 7\n")?;
        let (pick, config) = fixture.into_parts();

        assert_eq!(pick, 7);
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.limits.max_nodes, Some(DEFAULT_MAX_NODES));

        Ok(())
    }

    #[test]
    fn search_fixture_reads_every_setting() -> TestResult {
        let yaml = r"
pick: 3
strategy: backtrack
policy: first-match-per-parent
max_nodes: 500
";
        let fixture: SearchFixture = serde_norway::from_str(yaml)?;
        let (pick, config) = fixture.into_parts();

        assert_eq!(pick, 3);
        assert_eq!(config.strategy, Strategy::Backtrack);
        assert_eq!(config.policy, MatchPolicy::FirstMatchPerParent);
        assert_eq!(config.limits.max_nodes, Some(500));

        Ok(())
    }

    #[test]
    fn search_fixture_rejects_unknown_strategy() {
        let result: Result<SearchFixture, _> =
            serde_norway::from_str("pick: 3\nstrategy: annealing\n");

        assert!(result.is_err(), "unknown strategies must not parse");
    }
}
