//! Body and query extractors whose rejections render as `AppError`s.

use axum::extract::{FromRequest, FromRequestParts};

use crate::infra::errors::AppError;

/// `axum::Json` with malformed or incomplete bodies reported as 400.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with unparseable parameters reported as 400.
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
