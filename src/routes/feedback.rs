//! Feedback routes — public wall, optionally attributed submissions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;

use crate::routes::auth::MaybeAuthUser;
use crate::services::feedback::{self, FeedbackView};
use crate::state::AppState;

pub(crate) fn feedback_error_response(err: feedback::FeedbackError) -> Response {
    match err {
        feedback::FeedbackError::InvalidRating => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": { "rating": "Sélectionnez entre 1 et 5 étoiles" } })),
        )
            .into_response(),
        feedback::FeedbackError::Database(e) => {
            tracing::error!(error = %e, "feedback database error");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /api/feedback` — all entries, newest first.
pub async fn list_feedback(State(state): State<AppState>) -> Result<Json<Vec<FeedbackView>>, Response> {
    let rows = feedback::list_feedback(&state.pool)
        .await
        .map_err(feedback_error_response)?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct FeedbackBody {
    pub rating: i32,
    #[serde(default)]
    pub message: String,
}

/// `POST /api/feedback` — submit a rating; attributed when signed in.
pub async fn submit_feedback(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(body): Json<FeedbackBody>,
) -> Response {
    let user_id = user.map(|u| u.id);
    match feedback::submit_feedback(&state.pool, body.rating, &body.message, user_id).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => feedback_error_response(e),
    }
}

#[cfg(test)]
#[path = "feedback_test.rs"]
mod tests;
