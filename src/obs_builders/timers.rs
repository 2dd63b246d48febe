use log::trace;

use crate::common::common_values::{
    BOOST_PADS_LENGTH, LARGE_BOOST_MASK, MAX_PLAYERS, TICK_RATE,
};
use crate::rocket_league::GameState;

pub const SMALL_PAD_RESPAWN: f32 = 0.4;
pub const LARGE_PAD_EXTRA_RESPAWN: f32 = 0.6;
pub const DEMO_TIMER: f32 = 0.3;

/// Timers are kept in units of ten seconds, so a small pad's 4 second respawn is 0.4.
/// This is the game time between two evaluated ticks in those units.
pub fn timer_decay(tick_skip: u32) -> f32 {
    tick_skip as f32 / (TICK_RATE * 10.0)
}

pub fn respawn_value(pad: usize) -> f32 {
    SMALL_PAD_RESPAWN + LARGE_PAD_EXTRA_RESPAWN * LARGE_BOOST_MASK[pad]
}

/// Demo timer slot for a car id. Car ids are 1-based, so car 0 wraps to the last slot.
pub fn demo_slot(car_id: u32) -> usize {
    (car_id as usize + MAX_PLAYERS - 1) % MAX_PLAYERS
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoostPadTimers {
    timers: [f32; BOOST_PADS_LENGTH],
    inverted_timers: [f32; BOOST_PADS_LENGTH],
    waiting: [bool; BOOST_PADS_LENGTH],
    decay: f32,
}

impl BoostPadTimers {
    pub fn new(decay: f32) -> Self {
        BoostPadTimers {
            timers: [0.0; BOOST_PADS_LENGTH],
            inverted_timers: [0.0; BOOST_PADS_LENGTH],
            waiting: [false; BOOST_PADS_LENGTH],
            decay,
        }
    }

    pub fn clear(&mut self) {
        self.timers = [0.0; BOOST_PADS_LENGTH];
        self.inverted_timers = [0.0; BOOST_PADS_LENGTH];
        self.waiting = [false; BOOST_PADS_LENGTH];
    }

    pub fn update(
        &mut self,
        curr_boost_pads: &[f32; BOOST_PADS_LENGTH],
        prev_boost_pads: &[f32; BOOST_PADS_LENGTH],
    ) {
        for pad in 0..BOOST_PADS_LENGTH {
            let pad_update = curr_boost_pads[pad] - prev_boost_pads[pad];
            let grabbed = pad_update == -1.0;
            let spawned = pad_update == 1.0;

            self.waiting[pad] = (self.waiting[pad] || grabbed) && !spawned;
            if self.waiting[pad] {
                self.timers[pad] -= self.decay;
            } else {
                self.timers[pad] = 0.0;
            }

            // A freshly grabbed pad rolls over from 0 straight to its respawn value
            if self.timers[pad] < 0.0 || spawned {
                self.timers[pad] = respawn_value(pad);
            }
        }
        self.inverted_timers = self.timers;
        self.inverted_timers.reverse();
    }

    pub fn timers(&self, inverted: bool) -> &[f32; BOOST_PADS_LENGTH] {
        if inverted {
            &self.inverted_timers
        } else {
            &self.timers
        }
    }

    pub fn is_waiting(&self, pad: usize) -> bool {
        self.waiting[pad]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DemoTimers {
    timers: [f32; MAX_PLAYERS],
    decay: f32,
}

impl DemoTimers {
    pub fn new(decay: f32) -> Self {
        DemoTimers {
            timers: [0.0; MAX_PLAYERS],
            decay,
        }
    }

    pub fn clear(&mut self) {
        self.timers = [0.0; MAX_PLAYERS];
    }

    pub fn update(&mut self, state: &GameState) {
        for (slot, timer) in self.timers.iter_mut().enumerate() {
            let car_id = slot as u32 + 1;
            let demoed = match state.player(car_id) {
                Some(player) if player.is_demoed => 1.0,
                _ => 0.0,
            };
            if demoed == 1.0 && *timer == 0.0 {
                *timer = DEMO_TIMER;
            } else {
                *timer -= self.decay;
            }
            *timer *= demoed;
        }
    }

    pub fn get(&self, car_id: u32) -> f32 {
        self.timers[demo_slot(car_id)]
    }
}

/// Boost pad respawn and demolition timers, advanced once per distinct tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TimerTracker {
    boost_pads: BoostPadTimers,
    demos: DemoTimers,
    prev_boost_pads: Option<[f32; BOOST_PADS_LENGTH]>,
    last_tick: Option<u64>,
}

impl TimerTracker {
    pub fn new(tick_skip: u32) -> Self {
        let decay = timer_decay(tick_skip);
        TimerTracker {
            boost_pads: BoostPadTimers::new(decay),
            demos: DemoTimers::new(decay),
            prev_boost_pads: None,
            last_tick: None,
        }
    }

    pub fn reset(&mut self, initial_state: &GameState) {
        self.boost_pads.clear();
        self.demos.clear();
        self.prev_boost_pads = Some(initial_state.boost_pads);
        self.last_tick = Some(initial_state.tick_count);
    }

    /// Advances the timers to `state`. Repeated calls for the same tick are no-ops.
    /// Without a prior reset the first state resets the tracker and is then applied
    /// against itself, so only the demo timers can move.
    pub fn step(&mut self, state: &GameState) {
        if self.last_tick == Some(state.tick_count) {
            return;
        }
        let prev_boost_pads = match self.prev_boost_pads {
            Some(prev_boost_pads) => prev_boost_pads,
            None => {
                self.reset(state);
                state.boost_pads
            }
        };
        self.boost_pads.update(&state.boost_pads, &prev_boost_pads);
        self.demos.update(state);
        self.prev_boost_pads = Some(state.boost_pads);
        self.last_tick = Some(state.tick_count);
        trace!("timers advanced to tick {}", state.tick_count);
    }

    pub fn boost_pad_timers(&self, inverted: bool) -> &[f32; BOOST_PADS_LENGTH] {
        self.boost_pads.timers(inverted)
    }

    pub fn is_waiting(&self, pad: usize) -> bool {
        self.boost_pads.is_waiting(pad)
    }

    pub fn demo_timer(&self, car_id: u32) -> f32 {
        self.demos.get(car_id)
    }
}
