#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("resolution {resolution} outside [{min}, {max}]")]
    ResolutionOutOfRange { resolution: u32, min: u32, max: u32 },
    #[error("{field} must be a non-negative number of seconds, got {value}")]
    NegativeDuration { field: &'static str, value: f32 },
    #[error("kernel table has {available} entries but the function catalog needs {required}")]
    KernelTableTooSmall { required: usize, available: usize },
    #[error("unknown transition mode '{0}' (expected cycle or random)")]
    UnknownTransitionMode(String),
}
