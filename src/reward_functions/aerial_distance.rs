use glam::Vec3A;
use log::{debug, trace};

use crate::common::common_values::{BACK_WALL_Y, GRAVITY_Z, RAMP_HEIGHT, TICK_RATE};
use crate::common::misc::planar_distance;
use crate::config::AerialDistanceConfig;
use crate::error::ConfigError;
use crate::rocket_league::{GameState, PhysicsObject, PlayerData};

use super::RewardFunction;

/// Velocity change gravity alone causes over one evaluated tick.
pub fn gravity_delta_v(tick_skip: u32) -> Vec3A {
    Vec3A::new(0.0, 0.0, GRAVITY_Z) * tick_skip as f32 / TICK_RATE
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct UpnessScaling {
    gravity_delta_v: Vec3A,
}

impl UpnessScaling {
    /// Vertical component of the ball's acceleration direction net of gravity.
    /// `None` when the ball's velocity changed by exactly what gravity explains.
    fn upness(&self, prev_ball: &PhysicsObject, ball: &PhysicsObject) -> Option<f32> {
        let delta_v = ball.linear_velocity - prev_ball.linear_velocity - self.gravity_delta_v;
        delta_v.try_normalize().map(|accel| accel.dot(Vec3A::Z))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Carrier {
    car_id: u32,
    position: Vec3A,
}

/// Rewards a car for touching the ball while airborne, first by height and then,
/// on every further airborne touch, by how far car and ball travelled since the
/// last payout.
#[derive(Clone, Debug)]
pub struct AerialDistanceReward {
    height_scale: f32,
    distance_scale: f32,
    upness_scaling: Option<UpnessScaling>,
    carrier: Option<Carrier>,
    ball_distance: f32,
    car_distance: f32,
    prev_ball: Option<PhysicsObject>,
    curr_ball: Option<(u64, PhysicsObject)>,
}

impl AerialDistanceReward {
    pub fn new(config: &AerialDistanceConfig) -> Result<Self, ConfigError> {
        let upness_scaling = if config.scale_by_upness {
            if config.tick_skip == 0 {
                return Err(ConfigError::MissingTickSkip);
            }
            Some(UpnessScaling {
                gravity_delta_v: gravity_delta_v(config.tick_skip),
            })
        } else {
            None
        };
        Ok(AerialDistanceReward {
            height_scale: config.height_scale,
            distance_scale: config.distance_scale,
            upness_scaling,
            carrier: None,
            ball_distance: 0.0,
            car_distance: 0.0,
            prev_ball: None,
            curr_ball: None,
        })
    }

    pub fn carrier_id(&self) -> Option<u32> {
        self.carrier.map(|carrier| carrier.car_id)
    }

    pub fn car_distance(&self) -> f32 {
        self.car_distance
    }

    pub fn ball_distance(&self) -> f32 {
        self.ball_distance
    }

    // Every player is scored against the ball of the previous tick, whatever order
    // the players are queried in.
    fn observe_ball(&mut self, state: &GameState) {
        if let Some((tick_count, _)) = self.curr_ball {
            if tick_count == state.tick_count {
                return;
            }
        }
        self.prev_ball = self.curr_ball.map(|(_, ball)| ball);
        self.curr_ball = Some((state.tick_count, state.ball));
    }

    fn touch_upness(&self, state: &GameState) -> Option<f32> {
        let scaling = self.upness_scaling?;
        let prev_ball = self.prev_ball.as_ref().unwrap_or(&state.ball);
        let upness = scaling.upness(prev_ball, &state.ball);
        if upness.is_none() {
            trace!(
                "no net ball acceleration at tick {}, skipping upness scaling",
                state.tick_count
            );
        }
        upness
    }
}

impl RewardFunction for AerialDistanceReward {
    fn reset(&mut self, initial_state: &GameState) {
        self.carrier = None;
        self.ball_distance = 0.0;
        self.car_distance = 0.0;
        self.prev_ball = None;
        self.curr_ball = Some((initial_state.tick_count, initial_state.ball));
    }

    fn get_reward(
        &mut self,
        player: &PlayerData,
        state: &GameState,
        _previous_action: &[f32],
    ) -> f32 {
        self.observe_ball(state);

        let mut rew = 0.0;
        let position = player.car_data.position;
        let mut is_current = self
            .carrier
            .is_some_and(|carrier| carrier.car_id == player.car_id);

        if position.z < RAMP_HEIGHT {
            if is_current {
                debug!("car {} landed, aerial chain broken", player.car_id);
                is_current = false;
                self.carrier = None;
            }
        } else if player.ball_touched && !is_current {
            debug!("car {} started an aerial chain", player.car_id);
            is_current = true;
            self.ball_distance = 0.0;
            self.car_distance = 0.0;
            let upness = self.touch_upness(state).unwrap_or(1.0);
            rew = upness
                * self.height_scale
                * (position.z + state.ball.position.z - 2.0 * RAMP_HEIGHT).max(0.0);
        } else if is_current {
            if let Some(carrier) = &self.carrier {
                self.car_distance += planar_distance(position, carrier.position);
            }
            let prev_ball_position = self.prev_ball.map_or(state.ball.position, |b| b.position);
            self.ball_distance += planar_distance(state.ball.position, prev_ball_position);

            if player.ball_touched {
                let upness = self
                    .touch_upness(state)
                    .map_or(1.0, |upness| upness.clamp(0.0, 0.8) * 1.25);
                rew = upness * self.distance_scale * (self.car_distance + self.ball_distance);
                trace!(
                    "car {} cashed out car {} + ball {}",
                    player.car_id,
                    self.car_distance,
                    self.ball_distance
                );
                self.car_distance = 0.0;
                self.ball_distance = 0.0;
            }
        }

        if is_current {
            self.carrier = Some(Carrier {
                car_id: player.car_id,
                position,
            });
        }

        rew / (2.0 * BACK_WALL_Y)
    }
}
