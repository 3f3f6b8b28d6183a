use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `axum::extract::Path` that answers 404 instead of 400 when a segment
/// does not deserialize, so `/restaurant/abc/` is simply an unknown page.
#[derive(FromRequestParts, Debug)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
