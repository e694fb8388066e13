//! Utils

use clap::Parser;

use crate::solvers::{MatchPolicy, SearchConfig, SearchLimits, Strategy};

/// Arguments for the enumeration demo
#[derive(Debug, Parser)]
pub struct ExampleSearchArgs {
    /// Fixture set to load items and search settings from
    #[clap(short, long, default_value = "pantry")]
    pub fixture: String,

    /// Target total, overriding the fixture's pick
    #[clap(short, long)]
    pub pick: Option<i64>,

    /// Search algorithm, overriding the fixture's strategy
    #[clap(short, long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Leaf match policy, overriding the fixture's policy
    #[clap(long, value_enum)]
    pub policy: Option<MatchPolicy>,

    /// Node ceiling for the tree strategy, overriding the fixture's limit
    #[clap(long, conflicts_with = "unlimited")]
    pub max_nodes: Option<u64>,

    /// Build the tree without any node ceiling
    #[clap(long)]
    pub unlimited: bool,
}

impl ExampleSearchArgs {
    /// Apply the command line overrides on top of a fixture's configuration.
    pub fn apply(&self, pick: i64, config: SearchConfig) -> (i64, SearchConfig) {
        let limits = if self.unlimited {
            SearchLimits::unlimited()
        } else {
            SearchLimits {
                max_nodes: self.max_nodes.or(config.limits.max_nodes),
            }
        };

        let config = SearchConfig {
            strategy: self.strategy.unwrap_or(config.strategy),
            policy: self.policy.unwrap_or(config.policy),
            limits,
        };

        (self.pick.unwrap_or(pick), config)
    }
}
