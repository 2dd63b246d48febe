use thiserror::Error;

/// Failures detected while constructing a component, before any tick is processed.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick_skip must be assigned when scale_by_upness is enabled")]
    MissingTickSkip,
    #[error("combined reward has {rewards} reward functions but {weights} weights")]
    WeightMismatch { rewards: usize, weights: usize },
}
