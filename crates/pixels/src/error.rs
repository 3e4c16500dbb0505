/// Errors from pixel taxonomy operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelError {
    #[error("unknown {kind} name: {name:?}")]
    UnknownName { kind: &'static str, name: String },
}
