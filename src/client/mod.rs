pub mod builder;
pub mod health;
pub mod progress;
pub mod resilient;
pub mod retry;
pub mod session;
pub mod transport;
pub mod validator;

pub use builder::{GenerationOptions, build};
pub use health::{HealthMonitor, HealthProber, HealthState, HealthStatus};
pub use progress::{LoadingSequence, LoadingTicker};
pub use resilient::{DeckKind, FAILURE_GLYPH, ResilientClient, is_failure, render_failure};
pub use retry::RetryPolicy;
pub use session::PitchSession;
pub use transport::{ReqwestTransport, Transport, TransportResponse};
pub use validator::{ValidationReport, check_idea, validate};
