pub mod game_state;
pub mod physics_object;
pub mod player_data;
#[cfg(test)]
pub mod test_utils;

pub use game_state::GameState;
pub use physics_object::PhysicsObject;
pub use player_data::PlayerData;
