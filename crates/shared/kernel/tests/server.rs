use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use http_body_util::BodyExt;
use serde_json::Value;
use stagehand_database::Database;
use stagehand_kernel::domain::config::{ApiConfig, SessionConfig};
use stagehand_kernel::domain::registry::{FeatureSlice, InitializedSlice};
use stagehand_kernel::security::{Caller, SessionVerifier};
use stagehand_kernel::server::{ApiState, ApiStateError, system_router};
use tower::ServiceExt;

async fn state() -> ApiState {
    let database = Database::builder().url("mem://").session("test", "kernel").init().await.unwrap();
    ApiState::builder().config(ApiConfig::default()).db(database).build().unwrap()
}

async fn json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn whoami(caller: Caller) -> String {
    caller.subject().unwrap_or("anonymous").to_owned()
}

#[tokio::test]
async fn health_reports_database_reachability() {
    let state = state().await;
    let (router, _api) = system_router::<ApiState>().split_for_parts();
    let app = router.with_state(state);

    let response =
        app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::PRAGMA], "no-cache");

    let body = json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "up");
    assert_eq!(body["data"]["database"], true);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn caller_is_read_from_cookie_or_bearer() {
    let state = state().await;
    let token = state.sessions.issue("ops@stagehand", "admin").unwrap();
    let cookie = format!("{}={token}", state.sessions.cookie_name());
    let app = Router::new().route("/whoami", get(whoami)).with_state(state);

    let from_cookie = Request::get("/whoami").header(header::COOKIE, cookie).body(Body::empty());
    let response = app.clone().oneshot(from_cookie.unwrap()).await.unwrap();
    assert_eq!(response.into_body().collect().await.unwrap().to_bytes(), "ops@stagehand");

    let from_bearer = Request::get("/whoami")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty());
    let response = app.clone().oneshot(from_bearer.unwrap()).await.unwrap();
    assert_eq!(response.into_body().collect().await.unwrap().to_bytes(), "ops@stagehand");

    let anonymous = Request::get("/whoami").body(Body::empty()).unwrap();
    let response = app.oneshot(anonymous).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.into_body().collect().await.unwrap().to_bytes(), "anonymous");
}

#[tokio::test]
async fn builder_requires_config_and_missing_slices_are_reported() {
    assert!(matches!(ApiState::builder().build(), Err(ApiStateError::Validation { .. })));

    #[derive(Debug)]
    struct Unregistered;
    impl stagehand_kernel::domain::registry::FeatureSlice for Unregistered {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    let state = state().await;
    assert!(state.get_slice::<Unregistered>().is_none());
    assert!(matches!(
        state.try_get_slice::<Unregistered>(),
        Err(ApiStateError::MissingSlice { .. })
    ));
    assert_eq!(state.slice_names().count(), 0);
}

#[derive(Debug)]
struct Probe;

impl FeatureSlice for Probe {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[tokio::test]
async fn slices_register_once_and_sessions_can_be_overridden() {
    let database =
        Database::builder().url("mem://").session("test", "kernel_slices").init().await.unwrap();

    let twice = ApiState::builder()
        .config(ApiConfig::default())
        .db(database.clone())
        .register_slices([InitializedSlice::new(Probe), InitializedSlice::new(Probe)])
        .build();
    assert!(matches!(twice, Err(ApiStateError::Validation { .. })));

    let custom = SessionVerifier::new(&SessionConfig {
        secret: "rotated-secret".to_owned(),
        ..SessionConfig::default()
    });
    let token = custom.issue("ops@stagehand", "admin").unwrap();

    let state = ApiState::builder()
        .config(ApiConfig::default())
        .db(database)
        .sessions(custom)
        .register_slice(InitializedSlice::new(Probe))
        .build()
        .unwrap();
    assert!(state.get_slice::<Probe>().is_some());
    assert!(state.sessions.verify(&token).is_ok());
    assert!(SessionVerifier::new(&SessionConfig::default()).verify(&token).is_err());
}
