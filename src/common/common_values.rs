pub const BLUE_TEAM: u8 = 0;
pub const ORANGE_TEAM: u8 = 1;

pub const BACK_WALL_Y: f32 = 5120.0;
pub const BALL_MAX_SPEED: f32 = 6000.0;
pub const RAMP_HEIGHT: f32 = 256.0;
pub const GRAVITY_Z: f32 = -650.0;

// Physics ticks per second of game time
pub const TICK_RATE: f32 = 120.0;

pub const BOOST_PADS_LENGTH: usize = 34;
pub const MAX_PLAYERS: usize = 8;

// 1.0 marks the large (100 boost) pads, in the standard pad ordering
pub const LARGE_BOOST_MASK: [f32; BOOST_PADS_LENGTH] = [
    0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0,
];
