use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories::get_all_categories, queries::questions, Question},
    server::{app::AppState, error::ApiError, extractors::IdPath, pagination::Page},
};

use super::{category_map, ApiResponse};

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    current_category: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesBody {
        success: true,
        categories: category_map(categories),
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    IdPath(category_id): IdPath,
    page: Page,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let matching = questions::get_questions_for_category(&pool, category_id).await?;
    let total_questions = matching.len();
    let current = page.slice(matching);
    // a page past the end and an unknown category look the same to the caller
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestionsBody {
        success: true,
        current_category: category_id,
        questions: current,
        total_questions,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
