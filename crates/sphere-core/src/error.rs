use thiserror::Error;

/// Errors raised while building a sphere. Runtime input is never an error:
/// bad pointer data is dropped and physics values are clamped instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SphereError {
    #[error("sphere radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),
    #[error("invalid viewport config: {0}")]
    InvalidConfig(String),
    #[error("duplicate image id `{0}`")]
    DuplicateId(String),
}
