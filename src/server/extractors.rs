use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// JSON body whose every rejection (no body, wrong content type, bad JSON, wrong field types)
/// is reported as a bad request. Empty bodies such as `{}`, `[]` or `null` count as missing.
pub struct JsonBody<T>(pub T);

fn is_empty_body(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(rejection) => {
                tracing::debug!("Rejected request body: {rejection}");
                return Err(ApiError::BadRequest);
            }
        };
        if is_empty_body(&value) {
            tracing::debug!("Rejected empty request body");
            return Err(ApiError::BadRequest);
        }
        serde_json::from_value(value).map(Self).map_err(|error| {
            tracing::debug!("Rejected request body: {error}");
            ApiError::BadRequest
        })
    }
}

/// Integer identifier from the path. A segment that is not an integer does not name a resource.
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;
        Ok(Self(id))
    }
}
