//! Caller identity extraction.
//!
//! Identity travels in the `X-Sharer-User-Id` header. This is a trusted
//! placeholder for a real authentication scheme: the value is taken at face
//! value, so the service must only be exposed behind a gateway that sets it.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::handlers::ApiError;
use si_core::errors::DomainError;

/// Name of the identity header
pub const SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// The authenticated caller's user id, extracted from the identity header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerUserId(pub i64);

impl FromRequest for SharerUserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .headers()
            .get(SHARER_USER_ID)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok());

        ready(match parsed {
            Some(id) => Ok(SharerUserId(id)),
            None => Err(ApiError(DomainError::validation(format!(
                "Missing or invalid {SHARER_USER_ID} header"
            )))
            .into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_rt::test]
    async fn test_extracts_numeric_header() {
        let req = TestRequest::default()
            .insert_header((SHARER_USER_ID, "42"))
            .to_http_request();

        let id = SharerUserId::extract(&req).await.unwrap();
        assert_eq!(id, SharerUserId(42));
    }

    #[actix_rt::test]
    async fn test_missing_header_is_rejected() {
        let req = TestRequest::default().to_http_request();
        assert!(SharerUserId::extract(&req).await.is_err());
    }

    #[actix_rt::test]
    async fn test_non_numeric_header_is_rejected() {
        let req = TestRequest::default()
            .insert_header((SHARER_USER_ID, "forty-two"))
            .to_http_request();
        assert!(SharerUserId::extract(&req).await.is_err());
    }
}
