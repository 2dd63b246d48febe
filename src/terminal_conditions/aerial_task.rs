use log::debug;

use crate::common::common_values::RAMP_HEIGHT;
use crate::rocket_league::GameState;

use super::TerminalCondition;

/// Ends the episode once the ball, having been touched while in the air, comes
/// back down below ramp height.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AerialTaskTerminalCondition {
    has_flown: bool,
}

impl AerialTaskTerminalCondition {
    pub fn new() -> Self {
        AerialTaskTerminalCondition::default()
    }

    pub fn has_flown(&self) -> bool {
        self.has_flown
    }

    fn ball_has_flown(&mut self, state: &GameState) -> bool {
        if self.has_flown {
            return true;
        }
        if state.ball.position.z < RAMP_HEIGHT {
            return false;
        }
        if state.players.iter().any(|player| player.ball_touched) {
            debug!("ball took flight on tick {}", state.tick_count);
            self.has_flown = true;
        }
        self.has_flown
    }
}

impl TerminalCondition for AerialTaskTerminalCondition {
    fn reset(&mut self, _initial_state: &GameState) {
        self.has_flown = false;
    }

    fn is_terminal(&mut self, state: &GameState) -> bool {
        if !self.ball_has_flown(state) {
            return false;
        }
        let landed = state.ball.position.z < RAMP_HEIGHT;
        if landed {
            debug!("ball landed on tick {}", state.tick_count);
        }
        landed
    }
}
