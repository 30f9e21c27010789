mod export;
mod pitch;
mod server;
mod transport;
mod upstream;
mod validation;

pub use export::ExportError;
pub use pitch::{ErrorKind, PitchError};
pub use server::{ApiErrorBody, ApiErrorObject, ServerError};
pub use transport::TransportError;
pub use upstream::{ProviderSetupError, UpstreamError};
pub use validation::ValidationError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
