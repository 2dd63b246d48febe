use glam::Vec3A;
use numpy::{PyArray1, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyList;
use pyo3::{intern, PyObject};

use crate::common::common_values::BOOST_PADS_LENGTH;
use crate::config::{AerialDistanceConfig, ObsBuilderConfig};
use crate::obs_builders::{self, ObsBuilder};
use crate::reward_functions::{self, RewardFunction};
use crate::rocket_league::{GameState, PhysicsObject, PlayerData};
use crate::terminal_conditions::{self, TerminalCondition};

fn extract_f32_vec(obj: &Bound<'_, PyAny>) -> PyResult<Vec<f32>> {
    if let Ok(array) = obj.downcast::<PyArray1<f32>>() {
        return Ok(array.to_vec()?);
    }
    if let Ok(array) = obj.downcast::<PyArray1<f64>>() {
        return Ok(array.to_vec()?.into_iter().map(|v| v as f32).collect());
    }
    obj.extract::<Vec<f32>>()
}

fn extract_vec3(obj: &Bound<'_, PyAny>) -> PyResult<Vec3A> {
    let values = extract_f32_vec(obj)?;
    match values[..] {
        [x, y, z] => Ok(Vec3A::new(x, y, z)),
        _ => Err(PyValueError::new_err(format!(
            "expected a 3 component vector but got {} components",
            values.len()
        ))),
    }
}

fn extract_boost_pads(obj: &Bound<'_, PyAny>) -> PyResult<[f32; BOOST_PADS_LENGTH]> {
    let values = extract_f32_vec(obj)?;
    let len = values.len();
    values.try_into().map_err(|_| {
        PyValueError::new_err(format!(
            "expected {} boost pads but got {}",
            BOOST_PADS_LENGTH, len
        ))
    })
}

// Flags arrive as bools or as 0/1 numbers depending on the simulator
fn extract_flag(obj: &Bound<'_, PyAny>) -> PyResult<bool> {
    match obj.extract::<bool>() {
        Ok(v) => Ok(v),
        Err(_) => Ok(obj.extract::<f64>()? != 0.0),
    }
}

impl<'py> FromPyObject<'py> for PhysicsObject {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        let py = ob.py();
        Ok(PhysicsObject {
            position: extract_vec3(&ob.getattr(intern!(py, "position"))?)?,
            linear_velocity: extract_vec3(&ob.getattr(intern!(py, "linear_velocity"))?)?,
            angular_velocity: extract_vec3(&ob.getattr(intern!(py, "angular_velocity"))?)?,
            forward: extract_vec3(&ob.call_method0(intern!(py, "forward"))?)?,
            up: extract_vec3(&ob.call_method0(intern!(py, "up"))?)?,
        })
    }
}

impl<'py> FromPyObject<'py> for PlayerData {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        let py = ob.py();
        Ok(PlayerData {
            car_id: ob.getattr(intern!(py, "car_id"))?.extract()?,
            team_num: ob.getattr(intern!(py, "team_num"))?.extract()?,
            match_goals: ob.getattr(intern!(py, "match_goals"))?.extract()?,
            boost_amount: ob.getattr(intern!(py, "boost_amount"))?.extract()?,
            on_ground: extract_flag(&ob.getattr(intern!(py, "on_ground"))?)?,
            has_flip: extract_flag(&ob.getattr(intern!(py, "has_flip"))?)?,
            is_demoed: extract_flag(&ob.getattr(intern!(py, "is_demoed"))?)?,
            ball_touched: extract_flag(&ob.getattr(intern!(py, "ball_touched"))?)?,
            car_data: ob.getattr(intern!(py, "car_data"))?.extract()?,
            inverted_car_data: ob.getattr(intern!(py, "inverted_car_data"))?.extract()?,
        })
    }
}

fn extract_game_state(ob: &Bound<'_, PyAny>, tick_count: u64) -> PyResult<GameState> {
    let py = ob.py();
    let players = ob
        .getattr(intern!(py, "players"))?
        .downcast_into::<PyList>()?
        .iter()
        .map(|player| player.extract::<PlayerData>())
        .collect::<PyResult<Vec<_>>>()?;
    Ok(GameState {
        tick_count,
        ball: ob.getattr(intern!(py, "ball"))?.extract()?,
        inverted_ball: ob.getattr(intern!(py, "inverted_ball"))?.extract()?,
        boost_pads: extract_boost_pads(&ob.getattr(intern!(py, "boost_pads"))?)?,
        inverted_boost_pads: extract_boost_pads(
            &ob.getattr(intern!(py, "inverted_boost_pads"))?,
        )?,
        players,
    })
}

/// Converts Python game states, reusing the last conversion while the same
/// Python object is passed in. Each new object is a new tick.
#[derive(Default)]
struct StateCache {
    last: Option<(PyObject, GameState)>,
    tick_count: u64,
}

impl StateCache {
    fn resolve(&mut self, state: &Bound<'_, PyAny>) -> PyResult<&GameState> {
        let hit = matches!(&self.last, Some((obj, _)) if obj.bind(state.py()).is(state));
        if !hit {
            self.tick_count += 1;
            let game_state = extract_game_state(state, self.tick_count)?;
            self.last = Some((state.clone().unbind(), game_state));
        }
        match &self.last {
            Some((_, game_state)) => Ok(game_state),
            None => Err(PyValueError::new_err("game state conversion failed")),
        }
    }
}

#[pyclass(module = "project_x_backend")]
pub struct PaddedDefaultWithTimeoutsObsBuilder {
    inner: obs_builders::PaddedDefaultWithTimeoutsObsBuilder,
    states: StateCache,
}

#[pymethods]
impl PaddedDefaultWithTimeoutsObsBuilder {
    #[new]
    #[pyo3(signature = (pos_coef=None, ang_coef=None, lin_vel_coef=None, ang_vel_coef=None, tick_skip=None, padded=true))]
    fn new(
        pos_coef: Option<f32>,
        ang_coef: Option<f32>,
        lin_vel_coef: Option<f32>,
        ang_vel_coef: Option<f32>,
        tick_skip: Option<u32>,
        padded: bool,
    ) -> Self {
        let defaults = ObsBuilderConfig::default();
        let config = ObsBuilderConfig {
            pos_coef: pos_coef.unwrap_or(defaults.pos_coef),
            ang_coef: ang_coef.unwrap_or(defaults.ang_coef),
            lin_vel_coef: lin_vel_coef.unwrap_or(defaults.lin_vel_coef),
            ang_vel_coef: ang_vel_coef.unwrap_or(defaults.ang_vel_coef),
            tick_skip: tick_skip.unwrap_or(defaults.tick_skip),
        };
        let inner = if padded {
            obs_builders::PaddedDefaultWithTimeoutsObsBuilder::new(&config)
        } else {
            obs_builders::PaddedDefaultWithTimeoutsObsBuilder::unpadded(&config)
        };
        PaddedDefaultWithTimeoutsObsBuilder {
            inner,
            states: StateCache::default(),
        }
    }

    fn reset(&mut self, initial_state: &Bound<'_, PyAny>) -> PyResult<()> {
        let state = self.states.resolve(initial_state)?;
        self.inner.reset(state);
        Ok(())
    }

    fn build_obs<'py>(
        &mut self,
        player: &Bound<'py, PyAny>,
        state: &Bound<'py, PyAny>,
        previous_action: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let py = state.py();
        let player = player.extract::<PlayerData>()?;
        let previous_action = extract_f32_vec(previous_action)?;
        let game_state = self.states.resolve(state)?;
        let obs = self.inner.build_obs(&player, game_state, &previous_action);
        Ok(PyArray1::from_vec(py, obs))
    }
}

#[pyclass(module = "project_x_backend")]
pub struct AerialDistanceReward {
    inner: reward_functions::AerialDistanceReward,
    states: StateCache,
}

#[pymethods]
impl AerialDistanceReward {
    #[new]
    #[pyo3(signature = (height_scale=10.0, distance_scale=10.0, scale_by_upness=false, tick_skip=0))]
    fn new(
        height_scale: f32,
        distance_scale: f32,
        scale_by_upness: bool,
        tick_skip: u32,
    ) -> PyResult<Self> {
        let config = AerialDistanceConfig {
            height_scale,
            distance_scale,
            scale_by_upness,
            tick_skip,
        };
        let inner = reward_functions::AerialDistanceReward::new(&config)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(AerialDistanceReward {
            inner,
            states: StateCache::default(),
        })
    }

    fn reset(&mut self, initial_state: &Bound<'_, PyAny>) -> PyResult<()> {
        let state = self.states.resolve(initial_state)?;
        self.inner.reset(state);
        Ok(())
    }

    fn pre_step(&mut self, state: &Bound<'_, PyAny>) -> PyResult<()> {
        let state = self.states.resolve(state)?;
        self.inner.pre_step(state);
        Ok(())
    }

    fn get_reward(
        &mut self,
        player: &Bound<'_, PyAny>,
        state: &Bound<'_, PyAny>,
        previous_action: &Bound<'_, PyAny>,
    ) -> PyResult<f32> {
        let player = player.extract::<PlayerData>()?;
        let previous_action = extract_f32_vec(previous_action)?;
        let state = self.states.resolve(state)?;
        Ok(self.inner.get_reward(&player, state, &previous_action))
    }

    fn get_final_reward(
        &mut self,
        player: &Bound<'_, PyAny>,
        state: &Bound<'_, PyAny>,
        previous_action: &Bound<'_, PyAny>,
    ) -> PyResult<f32> {
        let player = player.extract::<PlayerData>()?;
        let previous_action = extract_f32_vec(previous_action)?;
        let state = self.states.resolve(state)?;
        Ok(self.inner.get_final_reward(&player, state, &previous_action))
    }
}

#[pyclass(module = "project_x_backend")]
pub struct GoalVelocityReward {
    inner: reward_functions::GoalVelocityReward,
    states: StateCache,
}

#[pymethods]
impl GoalVelocityReward {
    #[new]
    fn new() -> Self {
        GoalVelocityReward {
            inner: reward_functions::GoalVelocityReward::new(),
            states: StateCache::default(),
        }
    }

    #[pyo3(signature = (initial_state, optional_data=None))]
    #[allow(unused_variables)]
    fn reset(
        &mut self,
        initial_state: &Bound<'_, PyAny>,
        optional_data: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<()> {
        let state = self.states.resolve(initial_state)?;
        self.inner.reset(state);
        Ok(())
    }

    fn pre_step(&mut self, state: &Bound<'_, PyAny>) -> PyResult<()> {
        let state = self.states.resolve(state)?;
        self.inner.pre_step(state);
        Ok(())
    }

    #[pyo3(signature = (player, state, previous_action, optional_data=None))]
    #[allow(unused_variables)]
    fn get_reward(
        &mut self,
        player: &Bound<'_, PyAny>,
        state: &Bound<'_, PyAny>,
        previous_action: &Bound<'_, PyAny>,
        optional_data: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<f32> {
        let player = player.extract::<PlayerData>()?;
        let previous_action = extract_f32_vec(previous_action)?;
        let state = self.states.resolve(state)?;
        Ok(self.inner.get_reward(&player, state, &previous_action))
    }
}

#[pyclass(module = "project_x_backend")]
pub struct AerialTaskTerminalCondition {
    inner: terminal_conditions::AerialTaskTerminalCondition,
    states: StateCache,
}

#[pymethods]
impl AerialTaskTerminalCondition {
    #[new]
    fn new() -> Self {
        AerialTaskTerminalCondition {
            inner: terminal_conditions::AerialTaskTerminalCondition::new(),
            states: StateCache::default(),
        }
    }

    fn reset(&mut self, initial_state: &Bound<'_, PyAny>) -> PyResult<()> {
        let state = self.states.resolve(initial_state)?;
        self.inner.reset(state);
        Ok(())
    }

    fn is_terminal(&mut self, state: &Bound<'_, PyAny>) -> PyResult<bool> {
        let state = self.states.resolve(state)?;
        Ok(self.inner.is_terminal(state))
    }
}
