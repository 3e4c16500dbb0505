/// Errors from constructing shared geometric types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoseError {
    #[error("rotation must be a finite, non-zero quaternion, got {0:?}")]
    DegenerateRotation([f64; 4]),
}
