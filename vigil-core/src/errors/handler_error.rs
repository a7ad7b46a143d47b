/// A failed alert handler invocation. Logged by the dispatcher, never
/// propagated to the caller that raised the flag.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("handler {handler} failed: {message}")]
    Failed { handler: String, message: String },

    #[error("handler {handler} panicked")]
    Panicked { handler: String },
}
