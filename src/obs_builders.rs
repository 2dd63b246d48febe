use dyn_clone::{clone_trait_object, DynClone};

use crate::rocket_league::{GameState, PlayerData};

pub mod padded_default_with_timeouts;
pub mod timers;

pub use padded_default_with_timeouts::PaddedDefaultWithTimeoutsObsBuilder;
pub use timers::TimerTracker;

pub trait ObsBuilder: DynClone + Send + Sync {
    fn reset(&mut self, initial_state: &GameState);
    fn pre_step(&mut self, _state: &GameState) {}
    fn build_obs(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        previous_action: &[f32],
    ) -> Vec<f32>;
}

clone_trait_object!(ObsBuilder);
