use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{delete, get, post},
};
use recommend::{BookRecord, ParsedOutcome};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::SharedState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct SampleResponse {
    pub reply: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub books: Vec<BookRecord>,
}

#[derive(Deserialize)]
pub struct NewBookRequest {
    pub title: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub result: Option<ParsedOutcome>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommendations/sample", post(sample_recommendations))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", delete(delete_session))
        .route("/sessions/:id/books", get(list_books).post(add_book))
        .route(
            "/sessions/:id/recommendations",
            get(latest_recommendations).post(request_recommendations),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn sample_recommendations(State(state): State<SharedState>) -> Json<SampleResponse> {
    let reply = match state.recommender.recommend_sample().await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(operation = "sample_recommendations", error = %e, "Recommendation request failed");
            None
        }
    };

    Json(SampleResponse { reply })
}

async fn create_session(State(state): State<SharedState>) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, books) = state.create_session();
    info!(%session_id, "Session created");

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            books: books.books().to_vec(),
        }),
    )
}

async fn delete_session(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.remove_session(id)?;
    info!(session_id = %id, remaining = state.session_count(), "Session deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn list_books(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<BookRecord>>, AppError> {
    let Path(id) = path?;
    let books = state.books(id)?;
    Ok(Json(books.books().to_vec()))
}

async fn add_book(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<NewBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookRecord>), AppError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }

    let book = state.add_book(id, title, req.author.trim())?;
    info!(session_id = %id, book_id = book.id, "Book added");

    Ok((StatusCode::CREATED, Json(book)))
}

async fn latest_recommendations(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Path(id) = path?;
    let result = state.latest(id)?;
    Ok(Json(RecommendationResponse { result }))
}

async fn request_recommendations(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Path(id) = path?;
    let in_flight = state.begin_recommendation(id)?;

    let result = match state.recommender.recommend(in_flight.books()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(
                operation = "request_recommendations",
                session_id = %id,
                error = %e,
                "Recommendation request failed"
            );
            None
        }
    };

    in_flight.finish(result.clone());
    Ok(Json(RecommendationResponse { result }))
}
