use super::extract::GenerateBody;
use crate::client::{DeckKind, check_idea};
use crate::server::deck;
use crate::server::router::CofoundrState;
use axum::{Json, extract::State};
use cofoundr_schema::{GenerateResponse, GenerationRequest};
use tracing::{error, info, warn};

pub async fn generate_handler(
    State(state): State<CofoundrState>,
    GenerateBody(req): GenerateBody,
) -> Json<GenerateResponse> {
    Json(respond(&state, DeckKind::Standard, &req).await)
}

pub async fn generate_detailed_handler(
    State(state): State<CofoundrState>,
    GenerateBody(req): GenerateBody,
) -> Json<GenerateResponse> {
    Json(respond(&state, DeckKind::Detailed, &req).await)
}

fn deck_label(kind: DeckKind) -> &'static str {
    match kind {
        DeckKind::Standard => "pitch deck",
        DeckKind::Detailed => "detailed pitch deck",
    }
}

/// Validation and provider failures are answered in-band with `success: false`.
async fn respond(
    state: &CofoundrState,
    kind: DeckKind,
    req: &GenerationRequest,
) -> GenerateResponse {
    if let Err(err) = check_idea(&req.idea_text) {
        warn!(request_id = %req.request_id, kind = ?kind, error = %err, "Idea rejected");
        return GenerateResponse::failed(err.to_string());
    }

    let engine = state.engine();
    let deck = match engine.generate(kind, req).await {
        Ok(deck) => deck,
        Err(err) => {
            error!(
                request_id = %req.request_id,
                kind = ?kind,
                provider = %engine.provider(),
                error = %err,
                "Deck generation failed"
            );
            return GenerateResponse::failed(format!(
                "Failed to generate {}: {err}",
                deck_label(kind)
            ));
        }
    };

    info!(
        request_id = %req.request_id,
        kind = ?kind,
        provider = %engine.provider(),
        theme = engine.is_template().then(|| deck::theme_for(req).label),
        deck_chars = deck.chars().count(),
        "Pitch deck generated"
    );

    let message = match (kind, engine.is_template()) {
        (DeckKind::Standard, true) => "Mock pitch deck generated successfully (no API quota used)",
        (DeckKind::Detailed, true) => {
            "Detailed mock pitch deck generated successfully (no API quota used)"
        }
        (DeckKind::Standard, false) => "Pitch deck generated successfully",
        (DeckKind::Detailed, false) => "Detailed pitch deck generated successfully",
    };
    GenerateResponse::generated(deck, message)
}
