mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use crate::db::Category;

use super::error::ApiError;

pub type ApiResponse<T> = Result<T, ApiError>;

/// Categories keyed by identifier, as the front-end expects them.
fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
