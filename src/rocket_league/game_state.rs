use crate::common::common_values::BOOST_PADS_LENGTH;

use super::{physics_object::PhysicsObject, player_data::PlayerData};

/// One tick's snapshot of the arena. `tick_count` is the snapshot identity:
/// two states with the same tick count are treated as the same tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub tick_count: u64,
    pub ball: PhysicsObject,
    pub inverted_ball: PhysicsObject,
    pub boost_pads: [f32; BOOST_PADS_LENGTH],
    pub inverted_boost_pads: [f32; BOOST_PADS_LENGTH],
    pub players: Vec<PlayerData>,
}

impl GameState {
    /// Builds a state with every boost pad available and the mirrored views derived.
    pub fn new(tick_count: u64, ball: PhysicsObject, players: Vec<PlayerData>) -> Self {
        GameState {
            tick_count,
            inverted_ball: ball.inverted(),
            ball,
            boost_pads: [1.0; BOOST_PADS_LENGTH],
            inverted_boost_pads: [1.0; BOOST_PADS_LENGTH],
            players,
        }
    }

    pub fn with_boost_pads(mut self, boost_pads: [f32; BOOST_PADS_LENGTH]) -> Self {
        self.boost_pads = boost_pads;
        self.inverted_boost_pads = boost_pads;
        self.inverted_boost_pads.reverse();
        self
    }

    pub fn ball(&self, inverted: bool) -> &PhysicsObject {
        if inverted {
            &self.inverted_ball
        } else {
            &self.ball
        }
    }

    pub fn boost_pads(&self, inverted: bool) -> &[f32; BOOST_PADS_LENGTH] {
        if inverted {
            &self.inverted_boost_pads
        } else {
            &self.boost_pads
        }
    }

    /// Looks up a player by car id. If an id appears more than once the last entry wins.
    pub fn player(&self, car_id: u32) -> Option<&PlayerData> {
        self.players.iter().rev().find(|p| p.car_id == car_id)
    }

    pub fn is_same_tick(&self, other: &GameState) -> bool {
        self.tick_count == other.tick_count
    }
}
