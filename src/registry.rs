use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{AerialDistanceConfig, CombinedRewardConfig, NoArgs, ObsBuilderConfig};
use crate::obs_builders::{ObsBuilder, PaddedDefaultWithTimeoutsObsBuilder};
use crate::reward_functions::{
    AerialDistanceReward, CombinedReward, GoalVelocityReward, RewardFunction,
};
use crate::terminal_conditions::{AerialTaskTerminalCondition, TerminalCondition};

pub type ObsBuilderConstructor =
    Box<dyn Fn(&Registry, &Value) -> Result<Box<dyn ObsBuilder>> + Send + Sync>;
pub type RewardFunctionConstructor =
    Box<dyn Fn(&Registry, &Value) -> Result<Box<dyn RewardFunction>> + Send + Sync>;
pub type TerminalConditionConstructor =
    Box<dyn Fn(&Registry, &Value) -> Result<Box<dyn TerminalCondition>> + Send + Sync>;

/// Parses constructor arguments. `null` means "all defaults".
pub fn parse_args<T: DeserializeOwned + Default>(args: &Value) -> Result<T> {
    if args.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(args.clone())?)
}

/// String keyed factory tables for the pluggable components. Built once by the
/// composition root and handed to whatever constructs environments.
#[derive(Default)]
pub struct Registry {
    obs_builders: HashMap<String, ObsBuilderConstructor>,
    reward_functions: HashMap<String, RewardFunctionConstructor>,
    terminal_conditions: HashMap<String, TerminalConditionConstructor>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Registry::new();
        registry.register_obs_builder("padded_default_with_timeouts", |_, args| {
            let config = parse_args::<ObsBuilderConfig>(args)?;
            Ok(Box::new(PaddedDefaultWithTimeoutsObsBuilder::new(&config)))
        });
        registry.register_obs_builder("default_with_timeouts", |_, args| {
            let config = parse_args::<ObsBuilderConfig>(args)?;
            Ok(Box::new(PaddedDefaultWithTimeoutsObsBuilder::unpadded(&config)))
        });
        registry.register_reward_function("goal_velocity", |_, args| {
            parse_args::<NoArgs>(args)?;
            Ok(Box::new(GoalVelocityReward::new()))
        });
        registry.register_reward_function("rolv_aerial", |_, args| {
            let config = parse_args::<AerialDistanceConfig>(args)?;
            Ok(Box::new(AerialDistanceReward::new(&config)?))
        });
        registry.register_reward_function("combined", |registry, args| {
            let config = parse_args::<CombinedRewardConfig>(args)?;
            let reward_functions = config
                .rewards
                .iter()
                .map(|entry| registry.build_reward_function(&entry.name, &entry.args))
                .collect::<Result<Vec<_>>>()?;
            Ok(Box::new(CombinedReward::new(reward_functions, config.weights)?))
        });
        registry.register_terminal_condition("aerial_task", |_, args| {
            parse_args::<NoArgs>(args)?;
            Ok(Box::new(AerialTaskTerminalCondition::new()))
        });
        registry
    }

    pub fn register_obs_builder<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Registry, &Value) -> Result<Box<dyn ObsBuilder>> + Send + Sync + 'static,
    {
        self.obs_builders
            .insert(name.to_string(), Box::new(constructor));
    }

    pub fn register_reward_function<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Registry, &Value) -> Result<Box<dyn RewardFunction>> + Send + Sync + 'static,
    {
        self.reward_functions
            .insert(name.to_string(), Box::new(constructor));
    }

    pub fn register_terminal_condition<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&Registry, &Value) -> Result<Box<dyn TerminalCondition>> + Send + Sync + 'static,
    {
        self.terminal_conditions
            .insert(name.to_string(), Box::new(constructor));
    }

    pub fn build_obs_builder(&self, name: &str, args: &Value) -> Result<Box<dyn ObsBuilder>> {
        let constructor = self
            .obs_builders
            .get(name)
            .ok_or_else(|| anyhow!("no obs builder registered as {:?}", name))?;
        info!("building obs builder {:?}", name);
        constructor(self, args).with_context(|| format!("failed to build obs builder {:?}", name))
    }

    pub fn build_reward_function(
        &self,
        name: &str,
        args: &Value,
    ) -> Result<Box<dyn RewardFunction>> {
        let constructor = self
            .reward_functions
            .get(name)
            .ok_or_else(|| anyhow!("no reward function registered as {:?}", name))?;
        info!("building reward function {:?}", name);
        constructor(self, args)
            .with_context(|| format!("failed to build reward function {:?}", name))
    }

    pub fn build_terminal_condition(
        &self,
        name: &str,
        args: &Value,
    ) -> Result<Box<dyn TerminalCondition>> {
        let constructor = self
            .terminal_conditions
            .get(name)
            .ok_or_else(|| anyhow!("no terminal condition registered as {:?}", name))?;
        info!("building terminal condition {:?}", name);
        constructor(self, args)
            .with_context(|| format!("failed to build terminal condition {:?}", name))
    }

    pub fn obs_builder_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.obs_builders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn reward_function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.reward_functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn terminal_condition_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .terminal_conditions
            .keys()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;
    use serde_json::json;

    use super::*;
    use crate::rocket_league::test_utils::{assert_close, car, state};

    #[test]
    fn builtins_are_registered() {
        let registry = Registry::with_builtins();
        assert_eq!(
            registry.obs_builder_names(),
            vec!["default_with_timeouts", "padded_default_with_timeouts"]
        );
        assert_eq!(
            registry.reward_function_names(),
            vec!["combined", "goal_velocity", "rolv_aerial"]
        );
        assert_eq!(registry.terminal_condition_names(), vec!["aerial_task"]);
    }

    #[test]
    fn builds_obs_builder_with_defaults() {
        let registry = Registry::with_builtins();
        let mut obs_builder = registry
            .build_obs_builder("padded_default_with_timeouts", &Value::Null)
            .unwrap();
        let s = state(0, Vec3A::ZERO, vec![car(1, 0, Vec3A::ZERO)]);
        obs_builder.reset(&s);
        let obs = obs_builder.build_obs(&s.players[0], &s, &[0.0; 8]);
        assert_eq!(obs.len(), PaddedDefaultWithTimeoutsObsBuilder::obs_len(8));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = Registry::with_builtins();
        let err = registry
            .build_reward_function("log_combined", &Value::Null)
            .err()
            .unwrap();
        assert!(err.to_string().contains("log_combined"));
    }

    #[test]
    fn config_errors_carry_context() {
        let registry = Registry::with_builtins();
        let err = registry
            .build_reward_function("rolv_aerial", &json!({ "scale_by_upness": true }))
            .err()
            .unwrap();
        assert!(err.to_string().contains("rolv_aerial"));
        assert!(format!("{:#}", err).contains("tick_skip"));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let registry = Registry::with_builtins();
        assert!(registry
            .build_terminal_condition("aerial_task", &json!({ "height": 3 }))
            .is_err());
        assert!(registry
            .build_terminal_condition("aerial_task", &json!({}))
            .is_ok());
    }

    #[test]
    fn combined_builds_children_through_the_registry() {
        let registry = Registry::with_builtins();
        let mut reward_function = registry
            .build_reward_function(
                "combined",
                &json!({
                    "rewards": [
                        { "name": "rolv_aerial", "args": { "height_scale": 1.0 } },
                        { "name": "goal_velocity" }
                    ],
                    "weights": [2.0, 1.0]
                }),
            )
            .unwrap();
        let mut touch = car(1, 0, Vec3A::new(0.0, 0.0, 300.0));
        touch.ball_touched = true;
        let s = state(0, Vec3A::new(0.0, 0.0, 300.0), vec![touch.clone()]);
        reward_function.reset(&s);
        reward_function.pre_step(&s);
        let rew = reward_function.get_reward(&touch, &s, &[]);
        assert_close(rew, 2.0 * 88.0 / 10240.0);
    }

    #[test]
    fn custom_constructors_can_be_registered() {
        let mut registry = Registry::new();
        registry.register_terminal_condition("always_aerial", |_, _| {
            Ok(Box::new(AerialTaskTerminalCondition::new()))
        });
        assert!(registry
            .build_terminal_condition("always_aerial", &Value::Null)
            .is_ok());
        assert!(registry
            .build_terminal_condition("aerial_task", &Value::Null)
            .is_err());
    }
}
