use axum::{Json, extract::State};
use credit_scorer::{CredibilityAssessment, ScoreRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::extractors::ApiJson;
use crate::state::AppState;

/// Content to be scored
#[derive(Debug, Deserialize)]
pub struct ScoreContentRequest {
    pub headline: String,
    pub description: String,
}

/// Score suggested for the content, with how it was reached
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreContentResponse {
    pub credibility_score: f64,
    pub raw_score: f64,
    pub headline_relevant: bool,
    pub provider: String,
    pub notes: Vec<String>,
}

/// Run the configured scorer, bounded by the scorer semaphore
pub async fn assess_content(
    state: &AppState,
    headline: &str,
    description: &str,
) -> ApiResult<CredibilityAssessment> {
    if headline.trim().is_empty() || description.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "headline and description are required".to_string(),
        ));
    }

    let _permit = state
        .scorer_semaphore
        .acquire()
        .await
        .map_err(|e| ApiError::Internal(format!("Scorer semaphore closed: {}", e)))?;

    debug!("Scoring content with {}", state.scorer.provider_name());

    let assessment = state
        .scorer
        .score(&ScoreRequest::new(headline, description))
        .await?;

    Ok(assessment)
}

/// POST /api/score-content
pub async fn score_content(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScoreContentRequest>,
) -> ApiResult<Json<ScoreContentResponse>> {
    let assessment = assess_content(&state, &request.headline, &request.description).await?;
    let credibility_score = assessment.final_score();

    info!(
        "Scored content: raw={} relevant={} final={}",
        assessment.raw_score, assessment.headline_relevant, credibility_score
    );

    Ok(Json(ScoreContentResponse {
        credibility_score,
        raw_score: assessment.raw_score,
        headline_relevant: assessment.headline_relevant,
        provider: state.scorer.provider_name(),
        notes: assessment.notes,
    }))
}
