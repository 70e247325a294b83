use clap::Parser;
use graph_core::{
    FunctionName, GraphConfig, TransitionMode, DEFAULT_FUNCTION_DURATION, DEFAULT_RESOLUTION,
    DEFAULT_TRANSITION_DURATION, MAX_RESOLUTION, MIN_RESOLUTION,
};

#[derive(Debug, Parser)]
#[command(
    name = "graph-native",
    version,
    about = "Animate a grid of points with GPU-evaluated functions"
)]
pub(crate) struct Cli {
    /// Grid side length
    #[arg(
        long,
        default_value_t = DEFAULT_RESOLUTION,
        value_parser = clap::value_parser!(u32).range(MIN_RESOLUTION as i64..=MAX_RESOLUTION as i64)
    )]
    pub(crate) resolution: u32,

    /// Function shown first (wave, multi-wave, ripple, sphere, torus)
    #[arg(long, default_value_t = FunctionName::Wave)]
    pub(crate) function: FunctionName,

    /// How the next function is picked (cycle or random)
    #[arg(long, default_value_t = TransitionMode::Cycle)]
    pub(crate) mode: TransitionMode,

    /// Seconds each function is shown before transitioning
    #[arg(long, default_value_t = DEFAULT_FUNCTION_DURATION)]
    pub(crate) function_duration: f32,

    /// Seconds a transition takes
    #[arg(long, default_value_t = DEFAULT_TRANSITION_DURATION)]
    pub(crate) transition_duration: f32,

    /// Seed for random transitions
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,
}

impl Cli {
    pub(crate) fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            resolution: self.resolution,
            function: self.function,
            transition_mode: self.mode,
            function_duration: self.function_duration,
            transition_duration: self.transition_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_graph_config() {
        let cli = Cli::try_parse_from(["graph-native"]).unwrap();
        assert_eq!(cli.graph_config(), GraphConfig::default());
        assert_eq!(cli.seed, 0);
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "graph-native",
            "--resolution",
            "64",
            "--function",
            "torus",
            "--mode",
            "random",
            "--function-duration",
            "1.5",
            "--transition-duration",
            "0",
            "--seed",
            "7",
        ])
        .unwrap();
        let config = cli.graph_config();
        assert_eq!(config.resolution, 64);
        assert_eq!(config.function, FunctionName::Torus);
        assert_eq!(config.transition_mode, TransitionMode::Random);
        assert_eq!(config.function_duration, 1.5);
        assert_eq!(config.transition_duration, 0.0);
        assert_eq!(cli.seed, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_resolution_outside_bounds() {
        assert!(Cli::try_parse_from(["graph-native", "--resolution", "9"]).is_err());
        assert!(Cli::try_parse_from(["graph-native", "--resolution", "1001"]).is_err());
    }

    #[test]
    fn rejects_unknown_function() {
        assert!(Cli::try_parse_from(["graph-native", "--function", "cube"]).is_err());
    }
}
