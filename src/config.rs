/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ConfigError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub elevator: ElevatorConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/**
 * Physical parameters of the car. Times are in milliseconds.
 *
 * # Fields
 * - `floor_count`:         Number of floors served, at least 2.
 * - `floor_height`:        Distance between two floors in meters.
 * - `max_speed`:           Cruise speed in m/s.
 * - `acceleration`:        Acceleration magnitude in m/s².
 * - `deceleration`:        Braking magnitude in m/s².
 * - `door_open_time`:      How long the doors stay open before closing.
 * - `door_animation_time`: How long a full open or close stroke takes.
 */
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorConfig {
    pub floor_count: u8,
    pub floor_height: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub door_open_time: u64,
    pub door_animation_time: u64,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default)]
    pub real_time: bool,
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.elevator.validate()?;
        if self.simulation.tick_ms == 0 {
            return Err(ConfigError::NotPositive {
                name: "tick_ms",
                value: 0.0,
            });
        }
        Ok(())
    }
}

impl ElevatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floor_count < 2 {
            return Err(ConfigError::TooFewFloors(self.floor_count));
        }
        positive("floor_height", self.floor_height)?;
        positive("max_speed", self.max_speed)?;
        positive("acceleration", self.acceleration)?;
        positive("deceleration", self.deceleration)?;
        Ok(())
    }

    pub fn top_floor(&self) -> u8 {
        self.floor_count.saturating_sub(1)
    }

    /// Nominal height of a floor's landing.
    pub fn floor_position(&self, floor: u8) -> f64 {
        f64::from(floor) * self.floor_height
    }

    /// Height of the top landing; the car never goes above it.
    pub fn max_position(&self) -> f64 {
        self.floor_position(self.top_floor())
    }

    pub fn door_open_duration(&self) -> Duration {
        Duration::from_millis(self.door_open_time)
    }

    pub fn door_animation_duration(&self) -> Duration {
        Duration::from_millis(self.door_animation_time)
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            floor_count: 6,
            floor_height: 4.0,
            max_speed: 2.0,
            acceleration: 1.0,
            deceleration: 1.0,
            door_open_time: 3000,
            door_animation_time: 1000,
        }
    }
}

impl SimulationConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_ms: default_tick_ms(),
            real_time: false,
        }
    }
}

/***************************************/
/*             Helpers                 */
/***************************************/
fn default_tick_ms() -> u64 {
    16
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
