use itertools::Itertools;
use log::debug;

use crate::common::common_values::{BLUE_TEAM, BOOST_PADS_LENGTH, MAX_PLAYERS, ORANGE_TEAM};
use crate::common::misc::{extend_scaled, extend_vec3, flag};
use crate::config::ObsBuilderConfig;
use crate::rocket_league::{GameState, PlayerData};

use super::timers::TimerTracker;
use super::ObsBuilder;

/// active flag, position, forward, up, linear velocity, angular velocity and
/// (boost, on ground, has flip, demoed, demo timer)
pub const PLAYER_OBS_LEN: usize = 1 + 3 * 5 + 5;

const BALL_OBS_LEN: usize = 9;

/// The default observation plus boost pad and demo timers. When padded, every
/// missing car slot is filled with an inactive dummy block so the length never
/// depends on how many cars are in the match.
#[derive(Clone, Debug)]
pub struct PaddedDefaultWithTimeoutsObsBuilder {
    pos_coef: f32,
    lin_vel_coef: f32,
    ang_vel_coef: f32,
    padded: bool,
    timers: TimerTracker,
}

impl PaddedDefaultWithTimeoutsObsBuilder {
    pub fn new(config: &ObsBuilderConfig) -> Self {
        PaddedDefaultWithTimeoutsObsBuilder {
            pos_coef: config.pos_coef,
            lin_vel_coef: config.lin_vel_coef,
            ang_vel_coef: config.ang_vel_coef,
            padded: true,
            timers: TimerTracker::new(config.tick_skip),
        }
    }

    /// Same layout without the dummy slots; only cars present in the state are emitted.
    pub fn unpadded(config: &ObsBuilderConfig) -> Self {
        PaddedDefaultWithTimeoutsObsBuilder {
            padded: false,
            ..Self::new(config)
        }
    }

    pub fn is_padded(&self) -> bool {
        self.padded
    }

    /// Length of the padded observation for the given action size.
    pub fn obs_len(action_len: usize) -> usize {
        BALL_OBS_LEN + action_len + 2 * BOOST_PADS_LENGTH + MAX_PLAYERS * PLAYER_OBS_LEN
    }

    pub fn timers(&self) -> &TimerTracker {
        &self.timers
    }

    fn add_player_to_obs(&self, obs: &mut Vec<f32>, player: &PlayerData, inverted: bool) {
        let player_car = player.car(inverted);
        obs.push(1.0);
        extend_scaled(obs, player_car.position, self.pos_coef);
        extend_vec3(obs, player_car.forward);
        extend_vec3(obs, player_car.up);
        extend_scaled(obs, player_car.linear_velocity, self.lin_vel_coef);
        extend_scaled(obs, player_car.angular_velocity, self.ang_vel_coef);
        obs.extend_from_slice(&[
            player.boost_amount,
            flag(player.on_ground),
            flag(player.has_flip),
            flag(player.is_demoed),
            self.timers.demo_timer(player.car_id),
        ]);
    }

    fn add_dummy_player_to_obs(obs: &mut Vec<f32>) {
        obs.extend(std::iter::repeat(0.0).take(PLAYER_OBS_LEN));
    }

    /// Car ids ordered by distance from `player`, followed (when padded) by the ids
    /// of every absent slot. If car 0 is present the slots are 0..8, otherwise 1..=8.
    fn keys_by_dist(&self, player: &PlayerData, state: &GameState) -> Vec<u32> {
        let origin = player.car_data.position;
        let mut keys_by_dist = state
            .players
            .iter()
            .map(|p| p.car_id)
            .unique()
            .filter_map(|car_id| {
                state
                    .player(car_id)
                    .map(|p| (car_id, (p.car_data.position - origin).length()))
            })
            .sorted_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(car_id, _)| car_id)
            .collect_vec();

        if self.padded {
            let slots = if state.player(0).is_some() {
                0..MAX_PLAYERS as u32
            } else {
                1..MAX_PLAYERS as u32 + 1
            };
            for car_id in slots {
                if !keys_by_dist.contains(&car_id) {
                    keys_by_dist.push(car_id);
                }
            }
        }
        keys_by_dist
    }
}

impl ObsBuilder for PaddedDefaultWithTimeoutsObsBuilder {
    fn reset(&mut self, initial_state: &GameState) {
        debug!("resetting obs builder at tick {}", initial_state.tick_count);
        self.timers.reset(initial_state);
    }

    fn build_obs(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        previous_action: &[f32],
    ) -> Vec<f32> {
        self.timers.step(state);

        let inverted = player.team_num == ORANGE_TEAM;
        let ball = state.ball(inverted);

        let mut obs = Vec::with_capacity(Self::obs_len(previous_action.len()));
        extend_scaled(&mut obs, ball.position, self.pos_coef);
        extend_scaled(&mut obs, ball.linear_velocity, self.lin_vel_coef);
        extend_scaled(&mut obs, ball.angular_velocity, self.ang_vel_coef);
        obs.extend_from_slice(previous_action);
        obs.extend_from_slice(state.boost_pads(inverted));
        obs.extend_from_slice(self.timers.boost_pad_timers(inverted));

        self.add_player_to_obs(&mut obs, player, inverted);

        let mut allies = Vec::new();
        let mut enemies = Vec::new();
        for car_id in self.keys_by_dist(player, state) {
            if car_id == player.car_id {
                continue;
            }
            match state.player(car_id) {
                Some(other) => {
                    let team_obs = if other.team_num == player.team_num {
                        &mut allies
                    } else {
                        &mut enemies
                    };
                    self.add_player_to_obs(team_obs, other, inverted);
                }
                None => {
                    let team_num = if car_id < 5 { BLUE_TEAM } else { ORANGE_TEAM };
                    let team_obs = if team_num == player.team_num {
                        &mut allies
                    } else {
                        &mut enemies
                    };
                    Self::add_dummy_player_to_obs(team_obs);
                }
            }
        }

        obs.extend(allies);
        obs.extend(enemies);
        obs
    }
}
