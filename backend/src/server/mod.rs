//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use places_backend::Trace;
#[cfg(debug_assertions)]
use places_backend::doc::ApiDoc;
use places_backend::inbound::http::fallback::{Preflight, cors_headers, not_found};
use places_backend::inbound::http::health::{HealthState, live, ready};
use places_backend::inbound::http::places::{
    create_place, delete_place, get_place, get_user_places, update_place,
};
use places_backend::inbound::http::state::HttpState;
use places_backend::inbound::http::users::{list_users, login, signup};
use places_backend::inbound::http::validation::json_error_handler;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(get_user_places)
        .service(get_place)
        .service(create_place)
        .service(update_place)
        .service(delete_place)
        .service(list_users)
        .service(signup)
        .service(login);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Preflight)
        .wrap(cors_headers())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app.default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: bind address plus the optional database pool and geocoder.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        db_pool,
        geocoder,
    } = config;
    let http_state = build_http_state(db_pool, geocoder);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Tests for app wiring and readiness signalling.

    use super::*;
    use actix_web::http::{Method, StatusCode, header};
    use actix_web::test;
    use places_backend::domain::ports::FixtureGeocoder;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
    use std::net::SocketAddr;

    #[fixture]
    fn health_state() -> web::Data<HealthState> {
        web::Data::new(HealthState::new())
    }

    #[fixture]
    fn bind_address() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    fn deps(health_state: web::Data<HealthState>) -> AppDependencies {
        AppDependencies {
            health_state,
            http_state: build_http_state(None, None),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_marks_ready(
        health_state: web::Data<HealthState>,
        bind_address: SocketAddr,
    ) {
        let server = create_server(health_state.clone(), ServerConfig::new(bind_address))
            .expect("server should bind");
        assert!(health_state.is_ready());
        server.handle().stop(false).await;
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_route_answers_not_found_with_cors(health_state: web::Data<HealthState>) {
        let app = test::init_service(build_app(deps(health_state))).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/api/nope").to_request()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
        assert!(response.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Could not find this route.")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn preflight_answers_ok(health_state: web::Data<HealthState>) {
        let app = test::init_service(build_app(deps(health_state))).await;
        let request = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/places")
            .to_request();

        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn signup_then_create_place_round_trips(health_state: web::Data<HealthState>) {
        let app = test::init_service(build_app(deps(health_state))).await;

        let signup_request = test::TestRequest::post()
            .uri("/api/users/signup")
            .set_json(json!({"name": "Ann", "email": "a@x.com", "password": "secret1"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, signup_request).await;
        let creator = created
            .pointer("/user/id")
            .and_then(Value::as_str)
            .expect("user id")
            .to_owned();

        let create = test::TestRequest::post()
            .uri("/api/places")
            .set_json(json!({
                "title": "Tower",
                "description": "tall building",
                "address": "20 W 34th St",
                "creator": creator,
            }))
            .to_request();
        let response = test::call_service(&app, create).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let place: Value = test::read_body_json(response).await;
        let id = place
            .pointer("/place/id")
            .and_then(Value::as_str)
            .expect("place id");

        let fetch = test::TestRequest::get()
            .uri(&format!("/api/places/{id}"))
            .to_request();
        let fetched: Value = test::call_and_read_body_json(&app, fetch).await;
        assert_eq!(
            fetched.pointer("/place/title").and_then(Value::as_str),
            Some("Tower")
        );
        assert_eq!(
            fetched.pointer("/place/location/lat").and_then(Value::as_f64),
            Some(FixtureGeocoder::LAT)
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_is_unprocessable(health_state: web::Data<HealthState>) {
        let app = test::init_service(build_app(deps(health_state))).await;
        let request = test::TestRequest::post()
            .uri("/api/users/login")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{")
            .to_request();

        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
