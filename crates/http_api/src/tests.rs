use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use app_api::AppContext;
use revisent_app::{AppPaths, AppState, ensure_app_data_dir};

use crate::HttpState;

fn build_router(temp_dir: &tempfile::TempDir) -> axum::Router {
    let paths = AppPaths::new(temp_dir.path().to_path_buf());
    ensure_app_data_dir(&paths).expect("ensure app data dir");
    let app_state = AppState::new(paths.db_path, paths.impact_defaults_path);
    app_state.setup_db().expect("setup db");

    let context = AppContext {
        app_state,
        app_data_dir: paths.app_data_dir,
    };
    crate::router(HttpState::new(context))
}

#[tokio::test]
async fn serves_health() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let app = build_router(&temp_dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let app = build_router(&temp_dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard.js")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
