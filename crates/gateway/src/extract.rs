//! Extractors whose rejections are reported as [`GatewayError`]s

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::GatewayError;

/// `axum::Json` that rejects malformed bodies with a 400 `ErrorResponse`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(GatewayError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` that rejects unparsable segments with a 400 `ErrorResponse`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(GatewayError))]
pub struct ApiPath<T>(pub T);
