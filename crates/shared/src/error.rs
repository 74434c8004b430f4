/// Failures raised while driving the mapping host.
///
/// A missing container or a missing mapping library is not an error: the
/// pipeline reports that as [`crate::render::Outcome::Skipped`].
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The mapping host rejected a call (a thrown JS exception in the browser).
    #[error("map host error: {0}")]
    Host(String),

    /// Option payloads could not be serialized for the mapping library.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
