//! JSON body extractor that runs `validator` checks.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body as JSON, then validates it.
///
/// Malformed or mistyped JSON is rejected with the extractor's own status;
/// validation failures become `400 VALIDATION_ERROR` with per-field details.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) -> impl IntoResponse {
///     // `input` already passed `input.validate()`
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
