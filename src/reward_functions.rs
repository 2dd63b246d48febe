use dyn_clone::{clone_trait_object, DynClone};

use crate::rocket_league::{GameState, PlayerData};

pub mod aerial_distance;
pub mod combined_reward;
pub mod goal_velocity;

pub use aerial_distance::AerialDistanceReward;
pub use combined_reward::CombinedReward;
pub use goal_velocity::GoalVelocityReward;

pub trait RewardFunction: DynClone + Send + Sync {
    fn reset(&mut self, initial_state: &GameState);
    /// Called once per tick before any `get_reward` call for that tick.
    fn pre_step(&mut self, _state: &GameState) {}
    fn get_reward(&mut self, player: &PlayerData, state: &GameState, previous_action: &[f32])
        -> f32;
    fn get_final_reward(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        previous_action: &[f32],
    ) -> f32 {
        self.get_reward(player, state, previous_action)
    }
}

clone_trait_object!(RewardFunction);
