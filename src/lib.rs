#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod common;
pub mod config;
pub mod error;
pub mod obs_builders;
#[cfg(feature = "python")]
pub mod python;
pub mod registry;
pub mod reward_functions;
pub mod rocket_league;
pub mod terminal_conditions;

pub use error::ConfigError;
pub use registry::Registry;

#[cfg(feature = "python")]
#[pymodule]
#[pyo3(name = "project_x_backend")]
fn project_x_backend(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PaddedDefaultWithTimeoutsObsBuilder>()?;
    m.add_class::<python::AerialDistanceReward>()?;
    m.add_class::<python::GoalVelocityReward>()?;
    m.add_class::<python::AerialTaskTerminalCondition>()?;
    Ok(())
}
