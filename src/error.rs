use thiserror::Error;

/// Failure modes of the session layer. All of these are terminal for the
/// triggering call: they get logged and surfaced as a transient menu notice,
/// and the user has to re-initiate the operation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no online backend available")]
    BackendUnavailable,

    #[error("{0} request failed")]
    RequestFailed(&'static str),

    #[error("could not get connect string for session {0}")]
    ResolutionFailed(String),

    #[error("{0}")]
    PreconditionUnmet(&'static str),
}
