use dyn_clone::{clone_trait_object, DynClone};

use crate::rocket_league::GameState;

pub mod aerial_task;

pub use aerial_task::AerialTaskTerminalCondition;

pub trait TerminalCondition: DynClone + Send + Sync {
    fn reset(&mut self, initial_state: &GameState);
    fn is_terminal(&mut self, state: &GameState) -> bool;
}

clone_trait_object!(TerminalCondition);
