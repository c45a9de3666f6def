use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{deserialize_default_from_null, deserialize_number_from_string};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{
        app::AppState,
        error::ApiError,
        extractors::JsonBody,
        quiz::{draw, ALL_CATEGORIES},
    },
    telemetry::record_quiz_draw,
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_default_from_null")]
    previous_questions: Vec<i64>,
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
#[serde(untagged)]
enum DrawnQuestion {
    Question(Question),
    // rendered as `{}` once every candidate has been played
    Exhausted {},
}

#[derive(Serialize)]
struct QuizBody {
    success: bool,
    question: DrawnQuestion,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<QuizRequest>,
) -> ApiResponse<Json<QuizBody>> {
    let category = body.quiz_category.ok_or(ApiError::BadRequest)?;

    let candidates = if category.id == ALL_CATEGORIES {
        questions::get_all_questions(&pool).await?
    } else {
        questions::get_questions_for_category(&pool, category.id).await?
    };
    let drawn = draw(candidates, &body.previous_questions, &mut rand::thread_rng());
    record_quiz_draw(drawn.is_some());

    let question = match drawn {
        Some(question) => DrawnQuestion::Question(question),
        None => {
            tracing::debug!(category = category.id, "No questions left to play");
            DrawnQuestion::Exhausted {}
        }
    };
    Ok(Json(QuizBody {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
