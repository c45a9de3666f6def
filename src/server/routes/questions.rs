use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{deserialize_default_from_null, deserialize_number_from_string};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        error::ApiError,
        extractors::{IdPath, JsonBody},
        pagination::Page,
    },
    telemetry::record_question_write,
};

use super::{category_map, ApiResponse};

const DEFAULT_DIFFICULTY: i64 = 1;
const DEFAULT_CATEGORY: i64 = 1;

fn default_difficulty() -> i64 {
    DEFAULT_DIFFICULTY
}

fn default_category() -> i64 {
    DEFAULT_CATEGORY
}

// the front-end's form posts category and difficulty as strings
#[derive(Deserialize)]
struct CreateQuestionBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default = "default_difficulty")]
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
    #[serde(default = "default_category")]
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    #[serde(deserialize_with = "deserialize_default_from_null")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPageBody {
    success: bool,
    categories: BTreeMap<i64, String>,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct SearchResultsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct MutationBody {
    success: bool,
    message: &'static str,
    id: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    page: Page,
) -> ApiResponse<Json<QuestionsPageBody>> {
    let categories = get_all_categories(&pool).await?;
    let all = questions::get_all_questions(&pool).await?;
    let total_questions = all.len();
    let current = page.slice(all);
    if categories.is_empty() || current.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsPageBody {
        success: true,
        categories: category_map(categories),
        questions: current,
        total_questions,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    page: Page,
    JsonBody(body): JsonBody<SearchBody>,
) -> ApiResponse<Json<SearchResultsBody>> {
    let matching = questions::search_questions(&pool, &body.search_term).await?;
    tracing::debug!(term = %body.search_term, matches = matching.len(), "Searched questions");
    let total_questions = matching.len();
    Ok(Json(SearchResultsBody {
        success: true,
        questions: page.slice(matching),
        total_questions,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    JsonBody(body): JsonBody<CreateQuestionBody>,
) -> ApiResponse<(StatusCode, Json<MutationBody>)> {
    let question = body.question.unwrap_or_default();
    let answer = body.answer.unwrap_or_default();
    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::UnprocessableEntity);
    }

    let new_question = NewQuestion {
        question: &question,
        answer: &answer,
        category: body.category,
        difficulty: body.difficulty,
    };
    let id = match questions::create_question(&pool, new_question).await {
        Ok(id) => id,
        Err(error) => {
            tracing::error!("Failed to create question: {error}");
            record_question_write("create", false);
            return Err(ApiError::UnprocessableEntity);
        }
    };
    record_question_write("create", true);
    tracing::info!(id, "Question created");

    Ok((
        StatusCode::CREATED,
        Json(MutationBody {
            success: true,
            message: "question created",
            id,
        }),
    ))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    IdPath(id): IdPath,
) -> ApiResponse<Json<MutationBody>> {
    if questions::get_question(&pool, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    match questions::delete_question(&pool, id).await {
        // removed by a concurrent request between the lookup and the delete
        Ok(0) => return Err(ApiError::NotFound),
        Ok(_) => record_question_write("delete", true),
        Err(error) => {
            tracing::error!("Failed to delete question {id}: {error}");
            record_question_write("delete", false);
            return Err(ApiError::UnprocessableEntity);
        }
    }
    tracing::info!(id, "Question deleted");

    Ok(Json(MutationBody {
        success: true,
        message: "question deleted",
        id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
