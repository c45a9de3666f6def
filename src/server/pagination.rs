use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: i64,
    size: usize,
}

impl Page {
    pub fn new(number: i64) -> Self {
        Self::with_size(number, QUESTIONS_PER_PAGE)
    }

    pub fn with_size(number: i64, size: usize) -> Self {
        Self { number, size }
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    /// `[start, end)` into the full result set. Pages below 1 have no bounds.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        let skipped = usize::try_from(self.number.checked_sub(1)?).ok()?;
        let start = skipped.checked_mul(self.size)?;
        Some((start, start.saturating_add(self.size)))
    }

    /// Items of this page. Empty when the page lies outside the result set.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        match self.bounds() {
            Some((start, end)) if start < items.len() => {
                items.into_iter().skip(start).take(end - start).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1)
    }
}

/// First `page` value of the query string. Anything that is not an integer is ignored.
fn requested_page(params: &[(String, String)]) -> Option<i64> {
    params
        .iter()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.trim().parse().ok())
}

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(params)| params)
            .unwrap_or_default();
        Ok(Page::new(requested_page(&params).unwrap_or(1)))
    }
}
