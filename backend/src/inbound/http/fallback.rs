//! CORS headers, preflight handling, and the catch-all route.
//!
//! Every response carries permissive CORS headers. `OPTIONS` requests answer
//! 200 before routing, so preflights succeed on any path; any other unmatched
//! request gets the standard not-found body.

use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, header};
use actix_web::middleware::DefaultHeaders;
use actix_web::{HttpResponse, http::StatusCode};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::Error;

/// Message returned for requests that match no route.
pub const ROUTE_NOT_FOUND: &str = "Could not find this route.";

const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept, Authorization";
const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE";

/// Middleware adding the CORS headers to every response.
#[must_use]
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
}

/// Middleware answering `OPTIONS` requests with an empty 200.
#[derive(Clone, Copy, Debug, Default)]
pub struct Preflight;

impl<S, B> Transform<S, ServiceRequest> for Preflight
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = PreflightMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PreflightMiddleware { service }))
    }
}

/// Service wrapper produced by [`Preflight`].
pub struct PreflightMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PreflightMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.method() == Method::OPTIONS {
            let res = req.into_response(HttpResponse::new(StatusCode::OK));
            return Box::pin(async move { Ok(res) });
        }
        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_boxed_body()) })
    }
}

/// Default service for unmatched requests.
pub async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::not_found(ROUTE_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};
    use rstest::rstest;
    use serde_json::Value;

    async fn call(req: test::TestRequest) -> ServiceResponse {
        let app = test::init_service(
            App::new()
                .wrap(Preflight)
                .wrap(cors_headers())
                .route("/known", web::get().to(|| async { HttpResponse::Ok().finish() }))
                .default_service(web::to(not_found)),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn unmatched_route_is_not_found() {
        let response = call(test::TestRequest::get().uri("/nowhere")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some(ROUTE_NOT_FOUND)
        );
    }

    #[rstest]
    #[case("/nowhere")]
    #[case("/known")]
    #[actix_web::test]
    async fn preflight_is_accepted_anywhere(#[case] uri: &str) {
        let response = call(test::TestRequest::default().method(Method::OPTIONS).uri(uri)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS)
        );
    }

    #[rstest]
    #[case(test::TestRequest::get().uri("/known"))]
    #[case(test::TestRequest::get().uri("/nowhere"))]
    #[actix_web::test]
    async fn cors_headers_are_always_present(#[case] req: test::TestRequest) {
        let response = call(req).await;
        let headers = response.headers();
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                .and_then(|v| v.to_str().ok()),
            Some(ALLOWED_METHODS)
        );
    }
}
