pub mod health;
pub mod pitch;
pub mod service_info;
pub mod upstream;

pub use health::{HEALTHY, HealthPayload};
pub use pitch::{GenerateResponse, GenerationRequest};
pub use service_info::ServiceInfo;
