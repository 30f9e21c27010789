use crate::error::ServerError;
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use cofoundr_schema::GenerationRequest;
use tracing::debug;

pub(crate) struct GenerateBody(pub(crate) GenerationRequest);

impl<S> FromRequest<S> for GenerateBody
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    /// JSON syntax and schema errors become [`ServerError::InvalidBody`] (400). Idea bounds are
    /// checked by the handler, which answers them in-band.
    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<GenerationRequest>::from_request(req, &()).await?;

        with_pretty_json_debug(&body, |pretty_body| {
            debug!(
                request_id = %body.request_id,
                body = %pretty_body,
                "Extracted generation request body"
            );
        });

        Ok(Self(body))
    }
}
