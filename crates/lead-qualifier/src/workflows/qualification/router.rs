use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value};

use super::followup::FollowUpPublisher;
use super::intake::LeadSubmission;
use super::service::LeadQualificationService;

/// Router builder exposing the lead qualification endpoint.
pub fn qualification_router<P>(service: Arc<LeadQualificationService<P>>) -> Router
where
    P: FollowUpPublisher + 'static,
{
    Router::new()
        .route("/qualify-lead", post(qualify_handler::<P>))
        .with_state(service)
}

pub(crate) async fn qualify_handler<P>(
    State(service): State<Arc<LeadQualificationService<P>>>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    P: FollowUpPublisher + 'static,
{
    match LeadSubmission::from_json(payload) {
        Ok(submission) => {
            let qualified = service.qualify(submission);
            (StatusCode::OK, axum::Json(qualified.result)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
