use glam::Vec3A;

use super::{GameState, PhysicsObject, PlayerData};

pub fn car(car_id: u32, team_num: u8, position: Vec3A) -> PlayerData {
    PlayerData::new(
        car_id,
        team_num,
        PhysicsObject::new(position, Vec3A::ZERO, Vec3A::ZERO),
    )
}

pub fn ball_at(position: Vec3A, linear_velocity: Vec3A) -> PhysicsObject {
    PhysicsObject::new(position, linear_velocity, Vec3A::ZERO)
}

pub fn state(tick_count: u64, ball_position: Vec3A, players: Vec<PlayerData>) -> GameState {
    GameState::new(tick_count, ball_at(ball_position, Vec3A::ZERO), players)
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= 1e-5,
        "expected {} but got {}",
        expected,
        actual
    );
}
