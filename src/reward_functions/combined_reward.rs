use itertools::izip;

use crate::error::ConfigError;
use crate::rocket_league::{GameState, PlayerData};

use super::RewardFunction;

/// Weighted sum of several reward functions.
#[derive(Clone)]
pub struct CombinedReward {
    reward_functions: Vec<Box<dyn RewardFunction>>,
    weights: Vec<f32>,
}

impl CombinedReward {
    pub fn new(
        reward_functions: Vec<Box<dyn RewardFunction>>,
        weights: Option<Vec<f32>>,
    ) -> Result<Self, ConfigError> {
        let weights = weights.unwrap_or_else(|| vec![1.0; reward_functions.len()]);
        if weights.len() != reward_functions.len() {
            return Err(ConfigError::WeightMismatch {
                rewards: reward_functions.len(),
                weights: weights.len(),
            });
        }
        Ok(CombinedReward {
            reward_functions,
            weights,
        })
    }

    pub fn len(&self) -> usize {
        self.reward_functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reward_functions.is_empty()
    }
}

impl RewardFunction for CombinedReward {
    fn reset(&mut self, initial_state: &GameState) {
        for reward_function in self.reward_functions.iter_mut() {
            reward_function.reset(initial_state);
        }
    }

    fn pre_step(&mut self, state: &GameState) {
        for reward_function in self.reward_functions.iter_mut() {
            reward_function.pre_step(state);
        }
    }

    fn get_reward(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        previous_action: &[f32],
    ) -> f32 {
        izip!(self.reward_functions.iter_mut(), &self.weights)
            .map(|(reward_function, weight)| {
                weight * reward_function.get_reward(player, state, previous_action)
            })
            .sum()
    }

    fn get_final_reward(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        previous_action: &[f32],
    ) -> f32 {
        izip!(self.reward_functions.iter_mut(), &self.weights)
            .map(|(reward_function, weight)| {
                weight * reward_function.get_final_reward(player, state, previous_action)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use super::*;
    use crate::rocket_league::test_utils::{assert_close, car, state};

    #[derive(Clone)]
    struct Constant(f32, usize);

    impl RewardFunction for Constant {
        fn reset(&mut self, _initial_state: &GameState) {
            self.1 = 0;
        }

        fn pre_step(&mut self, _state: &GameState) {
            self.1 += 1;
        }

        fn get_reward(&mut self, _: &PlayerData, _: &GameState, _: &[f32]) -> f32 {
            self.0 * self.1 as f32
        }
    }

    #[test]
    fn weighted_sum_of_children() {
        let mut combined = CombinedReward::new(
            vec![Box::new(Constant(1.0, 0)), Box::new(Constant(2.0, 0))],
            Some(vec![0.5, -1.0]),
        )
        .unwrap();
        let s = state(0, Vec3A::ZERO, vec![car(1, 0, Vec3A::ZERO)]);
        combined.reset(&s);
        combined.pre_step(&s);
        assert_close(combined.get_reward(&s.players[0], &s, &[]), 0.5 - 2.0);
        assert_close(combined.get_final_reward(&s.players[0], &s, &[]), -1.5);
    }

    #[test]
    fn weights_default_to_one() {
        let mut combined = CombinedReward::new(
            vec![Box::new(Constant(1.0, 1)), Box::new(Constant(2.0, 1))],
            None,
        )
        .unwrap();
        let s = state(0, Vec3A::ZERO, vec![car(1, 0, Vec3A::ZERO)]);
        assert_close(combined.get_reward(&s.players[0], &s, &[]), 3.0);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn mismatched_weights_are_rejected() {
        let result = CombinedReward::new(vec![Box::new(Constant(1.0, 0))], Some(vec![1.0, 1.0]));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("combined reward has 1 reward functions but 2 weights".to_string())
        );
    }
}
