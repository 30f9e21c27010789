mod generate_request;
mod generate_response;

pub use generate_request::{
    DEFAULT_FUNDING_STAGE, DEFAULT_PRESENTATION_STYLE, DEFAULT_TARGET_AUDIENCE, GenerationRequest,
};
pub use generate_response::GenerateResponse;
