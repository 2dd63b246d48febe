use std::f32::consts::FRAC_1_PI;

use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ObsBuilderConfig {
    pub pos_coef: f32,
    // Accepted for compatibility with existing experiment files; no rotation angles are emitted.
    pub ang_coef: f32,
    pub lin_vel_coef: f32,
    pub ang_vel_coef: f32,
    pub tick_skip: u32,
}

impl Default for ObsBuilderConfig {
    fn default() -> Self {
        ObsBuilderConfig {
            pos_coef: 1.0 / 2300.0,
            ang_coef: FRAC_1_PI,
            lin_vel_coef: 1.0 / 2300.0,
            ang_vel_coef: FRAC_1_PI,
            tick_skip: 8,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AerialDistanceConfig {
    pub height_scale: f32,
    pub distance_scale: f32,
    pub scale_by_upness: bool,
    /// 0 means unassigned
    pub tick_skip: u32,
}

impl Default for AerialDistanceConfig {
    fn default() -> Self {
        AerialDistanceConfig {
            height_scale: 10.0,
            distance_scale: 10.0,
            scale_by_upness: false,
            tick_skip: 0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RewardEntry {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CombinedRewardConfig {
    pub rewards: Vec<RewardEntry>,
    /// Defaults to 1.0 for every reward function
    pub weights: Option<Vec<f32>>,
}

/// For components that take no construction arguments.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}
