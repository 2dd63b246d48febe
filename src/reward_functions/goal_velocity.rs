use std::collections::HashMap;

use log::debug;

use crate::common::common_values::BALL_MAX_SPEED;
use crate::rocket_league::{GameState, PlayerData};

use super::RewardFunction;

#[derive(Clone, Debug, PartialEq)]
struct GoalSnapshot {
    tick_count: u64,
    goals: HashMap<u32, u32>,
    ball_speed: f32,
}

impl GoalSnapshot {
    fn of(state: &GameState) -> Self {
        GoalSnapshot {
            tick_count: state.tick_count,
            goals: state
                .players
                .iter()
                .map(|player| (player.car_id, player.match_goals))
                .collect(),
            ball_speed: state.ball.linear_velocity.length(),
        }
    }
}

/// A goal reward that scales with the speed of the ball as it crosses into the goal.
/// The scorer gets `speed / BALL_MAX_SPEED`, the scorer's teammates nothing and the
/// opponents the negation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalVelocityReward {
    // state of the last tick seen by `pre_step`
    retained: Option<GoalSnapshot>,
    // what the current tick is compared against
    sampled: Option<GoalSnapshot>,
}

impl GoalVelocityReward {
    pub fn new() -> Self {
        GoalVelocityReward::default()
    }

    fn who_scored<'a>(&self, state: &'a GameState) -> Option<&'a PlayerData> {
        let sampled = self.sampled.as_ref()?;
        state.players.iter().find(|player| {
            sampled
                .goals
                .get(&player.car_id)
                .is_some_and(|&goals| player.match_goals > goals)
        })
    }
}

impl RewardFunction for GoalVelocityReward {
    fn reset(&mut self, initial_state: &GameState) {
        self.sampled = None;
        self.retained = Some(GoalSnapshot::of(initial_state));
    }

    fn pre_step(&mut self, state: &GameState) {
        if self
            .retained
            .as_ref()
            .is_some_and(|retained| retained.tick_count == state.tick_count)
        {
            return;
        }
        self.sampled = self.retained.take();
        self.retained = Some(GoalSnapshot::of(state));
    }

    fn get_reward(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        _previous_action: &[f32],
    ) -> f32 {
        let Some(scorer) = self.who_scored(state) else {
            return 0.0;
        };

        // you don't get rewarded for how fast your teammates send the ball into the goal
        let is_scorer = scorer.car_id == player.car_id;
        if !is_scorer && scorer.team_num == player.team_num {
            return 0.0;
        }

        let goal_speed = self.sampled.as_ref().map_or(0.0, |s| s.ball_speed);
        if is_scorer {
            debug!(
                "car {} scored at speed {} on tick {}",
                scorer.car_id, goal_speed, state.tick_count
            );
        }
        let reward_coeff = if is_scorer { 1.0 } else { -1.0 };
        reward_coeff * goal_speed / BALL_MAX_SPEED
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use super::*;
    use crate::common::common_values::{BLUE_TEAM, ORANGE_TEAM};
    use crate::rocket_league::test_utils::{assert_close, ball_at, car};

    fn roster(scorer_goals: u32) -> Vec<PlayerData> {
        let mut a = car(1, BLUE_TEAM, Vec3A::ZERO);
        a.match_goals = scorer_goals;
        let b = car(2, BLUE_TEAM, Vec3A::ZERO);
        let c = car(5, ORANGE_TEAM, Vec3A::ZERO);
        vec![a, b, c]
    }

    fn snapshot(tick: u64, ball_speed: f32, scorer_goals: u32) -> GameState {
        GameState::new(
            tick,
            ball_at(Vec3A::ZERO, Vec3A::new(0.0, ball_speed, 0.0)),
            roster(scorer_goals),
        )
    }

    #[test]
    fn scorer_teammate_and_opponent() {
        let mut rew_fn = GoalVelocityReward::new();
        rew_fn.reset(&snapshot(0, 4000.0, 1));
        let scored = snapshot(1, 0.0, 2);
        rew_fn.pre_step(&scored);

        let a = rew_fn.get_reward(&scored.players[0], &scored, &[]);
        let b = rew_fn.get_reward(&scored.players[1], &scored, &[]);
        let c = rew_fn.get_reward(&scored.players[2], &scored, &[]);
        assert_close(a, 4000.0 / BALL_MAX_SPEED);
        assert_eq!(b, 0.0);
        assert_close(c, -4000.0 / BALL_MAX_SPEED);
    }

    #[test]
    fn first_tick_without_history_is_zero() {
        let mut rew_fn = GoalVelocityReward::new();
        let scored = snapshot(1, 4000.0, 2);
        rew_fn.pre_step(&scored);
        for player in &scored.players {
            assert_eq!(rew_fn.get_reward(player, &scored, &[]), 0.0);
        }
    }

    #[test]
    fn no_scorer_means_no_reward() {
        let mut rew_fn = GoalVelocityReward::new();
        rew_fn.reset(&snapshot(0, 4000.0, 1));
        let next = snapshot(1, 3000.0, 1);
        rew_fn.pre_step(&next);
        for player in &next.players {
            assert_eq!(rew_fn.get_reward(player, &next, &[]), 0.0);
        }
    }

    #[test]
    fn repeated_pre_step_keeps_the_sample() {
        let mut rew_fn = GoalVelocityReward::new();
        rew_fn.reset(&snapshot(0, 4000.0, 1));
        let scored = snapshot(1, 0.0, 2);
        rew_fn.pre_step(&scored);
        rew_fn.pre_step(&scored);
        assert_close(
            rew_fn.get_reward(&scored.players[0], &scored, &[]),
            4000.0 / BALL_MAX_SPEED,
        );

        let after = snapshot(2, 0.0, 2);
        rew_fn.pre_step(&after);
        assert_eq!(rew_fn.get_reward(&after.players[0], &after, &[]), 0.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let initial = snapshot(0, 4000.0, 1);
        let mut once = GoalVelocityReward::new();
        once.pre_step(&snapshot(3, 2000.0, 1));
        once.pre_step(&snapshot(4, 1000.0, 1));
        once.reset(&initial);
        let mut twice = once.clone();
        twice.reset(&initial);
        assert_eq!(once, twice);

        let scored = snapshot(1, 0.0, 2);
        twice.pre_step(&scored);
        assert_close(
            twice.get_reward(&scored.players[0], &scored, &[]),
            4000.0 / BALL_MAX_SPEED,
        );
    }

    #[test]
    fn unknown_car_is_never_the_scorer() {
        let mut rew_fn = GoalVelocityReward::new();
        rew_fn.reset(&snapshot(0, 4000.0, 1));
        let mut players = roster(1);
        let mut newcomer = car(6, ORANGE_TEAM, Vec3A::ZERO);
        newcomer.match_goals = 3;
        players.push(newcomer);
        let next = GameState::new(1, ball_at(Vec3A::ZERO, Vec3A::ZERO), players);
        rew_fn.pre_step(&next);
        assert_eq!(rew_fn.get_reward(&next.players[0], &next, &[]), 0.0);
    }
}
