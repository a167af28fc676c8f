//! Request extractors whose rejections go through `AppError`.

use crate::error::AppError;
use axum::extract::{rejection::JsonRejection, FromRequest};

/// JSON body extractor. A body that is not valid JSON for `T` becomes a 400 `validation` error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}
