use crate::constants::{
    DEFAULT_FUNCTION_DURATION, DEFAULT_RESOLUTION, DEFAULT_TRANSITION_DURATION, MAX_RESOLUTION,
    MIN_RESOLUTION,
};
use crate::error::GraphError;
use crate::function::FunctionName;
use std::fmt;
use std::str::FromStr;

/// How the next function is chosen when a transition starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionMode {
    #[default]
    Cycle,
    Random,
}

impl TransitionMode {
    pub fn toggled(self) -> Self {
        match self {
            TransitionMode::Cycle => TransitionMode::Random,
            TransitionMode::Random => TransitionMode::Cycle,
        }
    }

    /// Pick the function that follows `current` under this mode.
    pub fn pick<R: rand::Rng + ?Sized>(self, current: FunctionName, rng: &mut R) -> FunctionName {
        match self {
            TransitionMode::Cycle => current.next(),
            TransitionMode::Random => current.random_other_than(rng),
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionMode::Cycle => f.write_str("cycle"),
            TransitionMode::Random => f.write_str("random"),
        }
    }
}

impl FromStr for TransitionMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cycle" => Ok(TransitionMode::Cycle),
            "random" => Ok(TransitionMode::Random),
            _ => Err(GraphError::UnknownTransitionMode(s.to_string())),
        }
    }
}

/// Caller-owned graph settings, read every frame.
///
/// The engine writes back only `function`, when a transition picks a new one.
/// Everything else changes through the configuration surface and should pass
/// [`GraphConfig::validate`] or [`GraphConfig::clamped`] on the way in.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
    pub resolution: u32,
    pub function: FunctionName,
    pub transition_mode: TransitionMode,
    pub function_duration: f32,
    pub transition_duration: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            function: FunctionName::default(),
            transition_mode: TransitionMode::default(),
            function_duration: DEFAULT_FUNCTION_DURATION,
            transition_duration: DEFAULT_TRANSITION_DURATION,
        }
    }
}

impl GraphConfig {
    pub fn validate(&self) -> Result<(), GraphError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(GraphError::ResolutionOutOfRange {
                resolution: self.resolution,
                min: MIN_RESOLUTION,
                max: MAX_RESOLUTION,
            });
        }
        check_duration("function_duration", self.function_duration)?;
        check_duration("transition_duration", self.transition_duration)?;
        Ok(())
    }

    /// Clamp every field into its valid range. NaN durations become zero.
    pub fn clamped(mut self) -> Self {
        self.resolution = self.resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        self.function_duration = clamp_duration(self.function_duration);
        self.transition_duration = clamp_duration(self.transition_duration);
        self
    }

    /// Step the resolution by `delta`, staying inside the valid range.
    pub fn nudge_resolution(&mut self, delta: i32) {
        let next = (self.resolution as i64 + delta as i64)
            .clamp(MIN_RESOLUTION as i64, MAX_RESOLUTION as i64);
        self.resolution = next as u32;
    }
}

fn check_duration(field: &'static str, value: f32) -> Result<(), GraphError> {
    if value.is_nan() || value < 0.0 {
        Err(GraphError::NegativeDuration { field, value })
    } else {
        Ok(())
    }
}

fn clamp_duration(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GraphConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.resolution, 10);
        assert_eq!(config.transition_mode, TransitionMode::Cycle);
    }

    #[test]
    fn rejects_resolution_outside_bounds() {
        for resolution in [0, 9, 1001, u32::MAX] {
            let config = GraphConfig {
                resolution,
                ..GraphConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(GraphError::ResolutionOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn rejects_negative_and_nan_durations() {
        let config = GraphConfig {
            function_duration: -0.5,
            ..GraphConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::NegativeDuration {
                field: "function_duration",
                ..
            })
        ));
        let config = GraphConfig {
            transition_duration: f32::NAN,
            ..GraphConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_durations_are_allowed() {
        let config = GraphConfig {
            function_duration: 0.0,
            transition_duration: 0.0,
            ..GraphConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn clamped_brings_fields_into_range() {
        let config = GraphConfig {
            resolution: 5000,
            function_duration: -1.0,
            transition_duration: f32::NAN,
            ..GraphConfig::default()
        }
        .clamped();
        assert_eq!(config.resolution, MAX_RESOLUTION);
        assert_eq!(config.function_duration, 0.0);
        assert_eq!(config.transition_duration, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nudge_resolution_saturates() {
        let mut config = GraphConfig::default();
        config.nudge_resolution(-10);
        assert_eq!(config.resolution, MIN_RESOLUTION);
        config.nudge_resolution(25);
        assert_eq!(config.resolution, 35);
        config.nudge_resolution(i32::MAX);
        assert_eq!(config.resolution, MAX_RESOLUTION);
    }

    #[test]
    fn transition_mode_parses_and_toggles() {
        assert_eq!("Random".parse::<TransitionMode>().ok(), Some(TransitionMode::Random));
        assert!("shuffle".parse::<TransitionMode>().is_err());
        assert_eq!(TransitionMode::Cycle.toggled(), TransitionMode::Random);
        assert_eq!(TransitionMode::Random.toggled(), TransitionMode::Cycle);
    }
}
