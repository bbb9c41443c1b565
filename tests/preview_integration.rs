//! End-to-end tests through the axum app
//!
//! Each test builds its own content root, catalog, and views in a temporary
//! directory, loads `AppState` from it, and sends requests with `oneshot`.

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use email_preview::api::MAX_FORM_BYTES;
use email_preview::config::{ContentConfig, LoggingConfig, ServerConfig, Settings};
use email_preview::error::{AppError, INTERNAL_ERROR_BODY};
use email_preview::server::{create_app, dispatch, AppState};

const CATALOG: &str = r#"{
    "acme": {
        "welcome": { "title": "Welcome to Acme" },
        "broken": { "title": "Broken" },
        "orphan-theme-entry": { "title": "No body file" }
    },
    "plain": {
        "welcome": { "title": "Plain welcome" }
    }
}"#;

struct TestEnvironment {
    dir: tempfile::TempDir,
    state: AppState,
    app: Router,
}

impl TestEnvironment {
    fn path(&self, relative: &str) -> std::path::PathBuf {
        self.dir.path().join(relative)
    }
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn settings_for(root: &Path) -> Settings {
    Settings {
        server: ServerConfig::default(),
        content: ContentConfig {
            emails_dir: root.join("emails"),
            catalog_file: root.join("com-config.json"),
            views_dir: root.join("view"),
            extension: "hbs".to_string(),
        },
        logging: LoggingConfig::default(),
    }
}

/// Create a full test environment with content on disk
async fn create_test_environment() -> TestEnvironment {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "com-config.json", CATALOG);
    write(
        root,
        "emails/en/themes/acme.hbs",
        "<html><head><title>{{title}}</title></head><body>{{{body}}}<footer>{{company}}</footer></body></html>",
    );
    write(root, "emails/en/bodies/welcome.hbs", "<p>Hello {{name}}</p>");
    write(root, "emails/en/bodies/broken.hbs", "{{#each}}");
    write(root, "emails/fr/themes/acme.hbs", "<html>{{{body}}}</html>");
    write(root, "emails/fr/bodies/welcome.hbs", "<p>Bonjour {{name}}</p>");
    write(
        root,
        "view/variables.hbs",
        "<ul>{{#each variables}}<li>{{key}}: {{value}}</li>{{/each}}</ul>",
    );
    write(
        root,
        "view/index.hbs",
        "<main>{{{variables}}}<nav>{{#each languages}}[{{this}}]{{/each}}</nav>{{#each themes}}<section>{{name}}</section>{{/each}}</main>",
    );

    let state = AppState::load(&settings_for(root)).await.unwrap();
    let app = create_app(state.clone());

    TestEnvironment { dir, state, app }
}

async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String, String) {
    send(app, Method::GET, uri, "").await
}

async fn set_variable(app: &Router, key: &str, value: &str) -> String {
    let body = format!(
        "key={}&value={}",
        urlencoding::encode(key),
        urlencoding::encode(value)
    );
    let (status, content_type, html) = send(app, Method::POST, "/variables", &body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    html
}

// =============================================================================
// Email Rendering Tests
// =============================================================================

#[tokio::test]
async fn test_render_email() {
    let env = create_test_environment().await;

    let (status, content_type, html) = get(&env.app, "/en/acme/welcome").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(
        html,
        "<html><head><title>Welcome to Acme</title></head><body><p>Hello </p><footer></footer></body></html>"
    );
}

#[tokio::test]
async fn test_render_uses_language_directory() {
    let env = create_test_environment().await;
    set_variable(&env.app, "name", "Ada").await;

    let (status, _, html) = get(&env.app, "/fr/acme/welcome").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html, "<html><p>Bonjour Ada</p></html>");
}

#[tokio::test]
async fn test_variables_flow_into_body_and_theme() {
    let env = create_test_environment().await;
    set_variable(&env.app, "name", "Ada").await;
    set_variable(&env.app, "company", "Acme Ltd").await;

    let (status, _, html) = get(&env.app, "/en/acme/welcome").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<p>Hello Ada</p>"));
    assert!(html.contains("<footer>Acme Ltd</footer>"));
}

#[tokio::test]
async fn test_catalog_title_wins_over_stored_title() {
    let env = create_test_environment().await;
    set_variable(&env.app, "title", "X").await;

    let (status, _, html) = get(&env.app, "/en/acme/welcome").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Welcome to Acme</title>"));
    assert!(!html.contains("<title>X</title>"));
}

#[tokio::test]
async fn test_render_is_deterministic() {
    let env = create_test_environment().await;
    set_variable(&env.app, "name", "Ada").await;

    let (_, _, first) = get(&env.app, "/en/acme/welcome").await;
    let (_, _, second) = get(&env.app, "/en/acme/welcome").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_template_edits_are_picked_up() {
    let env = create_test_environment().await;

    write(env.dir.path(), "emails/en/bodies/welcome.hbs", "<p>Edited</p>");
    let (status, _, html) = get(&env.app, "/en/acme/welcome").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<p>Edited</p>"));
}

// =============================================================================
// Failure Tests
// =============================================================================

async fn assert_internal_error(app: &Router, uri: &str) {
    let (status, content_type, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri {}", uri);
    assert_eq!(content_type, "text/plain");
    assert_eq!(body, INTERNAL_ERROR_BODY);
}

#[tokio::test]
async fn test_missing_theme_file_then_server_keeps_serving() {
    let env = create_test_environment().await;

    assert_internal_error(&env.app, "/en/plain/welcome").await;

    let (status, _, _) = get(&env.app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = get(&env.app, "/en/acme/welcome").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_body_file() {
    let env = create_test_environment().await;
    assert_internal_error(&env.app, "/en/acme/orphan-theme-entry").await;
}

#[tokio::test]
async fn test_missing_language() {
    let env = create_test_environment().await;
    assert_internal_error(&env.app, "/de/acme/welcome").await;
}

#[tokio::test]
async fn test_missing_catalog_entry() {
    let env = create_test_environment().await;
    write(env.dir.path(), "emails/en/bodies/uncatalogued.hbs", "<p>hi</p>");

    assert_internal_error(&env.app, "/en/acme/uncatalogued").await;
}

#[tokio::test]
async fn test_template_syntax_error_is_not_leaked() {
    let env = create_test_environment().await;

    let (status, _, body) = get(&env.app, "/en/acme/broken").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("each"));
    assert!(!body.contains("broken.hbs"));
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    let env = create_test_environment().await;
    write(env.dir.path(), "secret/themes/acme.hbs", "SECRET {{{body}}}");
    write(env.dir.path(), "secret/bodies/welcome.hbs", "SECRET");

    assert_internal_error(&env.app, "/%2E%2E/acme/welcome").await;
    assert_internal_error(&env.app, "/..%2Fsecret/acme/welcome").await;
    assert_internal_error(&env.app, "/en/acme/..%2F..%2Fsecret%2Fbodies%2Fwelcome").await;
}

// =============================================================================
// Variables & Home Page Tests
// =============================================================================

#[tokio::test]
async fn test_update_returns_fragment() {
    let env = create_test_environment().await;

    let html = set_variable(&env.app, "name", "Ada").await;
    assert_eq!(html, "<ul><li>name: Ada</li></ul>");

    let html = set_variable(&env.app, "plan", "pro").await;
    assert_eq!(html, "<ul><li>name: Ada</li><li>plan: pro</li></ul>");
}

#[tokio::test]
async fn test_update_overwrites_in_place() {
    let env = create_test_environment().await;

    set_variable(&env.app, "name", "Ada").await;
    set_variable(&env.app, "plan", "pro").await;
    let html = set_variable(&env.app, "name", "Grace").await;

    assert_eq!(html, "<ul><li>name: Grace</li><li>plan: pro</li></ul>");
    assert_eq!(env.state.variables.len().await, 2);
}

#[tokio::test]
async fn test_update_with_empty_body_stores_empty_key() {
    let env = create_test_environment().await;

    let (status, _, _) = send(&env.app, Method::POST, "/variables", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(env.state.variables.get("").await.as_deref(), Some(""));
}

#[tokio::test]
async fn test_home_lists_variables_languages_and_themes() {
    let env = create_test_environment().await;
    set_variable(&env.app, "name", "Ada").await;

    let (status, content_type, html) = get(&env.app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(
        html,
        "<main><ul><li>name: Ada</li></ul><nav>[en][fr]</nav><section>acme</section><section>plain</section></main>"
    );
}

#[tokio::test]
async fn test_unknown_paths_fall_back_to_home() {
    let env = create_test_environment().await;
    let (_, _, home) = get(&env.app, "/").await;

    for uri in [
        "/totally/unknown/path/segments/extra",
        "/variables",
        "/en/acme",
        "/index.html?x=1",
    ] {
        let (status, _, html) = get(&env.app, uri).await;
        assert_eq!(status, StatusCode::OK, "uri {}", uri);
        assert_eq!(html, home, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_unmatched_methods_fall_back_to_home() {
    let env = create_test_environment().await;
    let (_, _, home) = get(&env.app, "/").await;

    let (status, _, html) = send(&env.app, Method::POST, "/en/acme/welcome", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(html, home);

    let (status, _, html) = send(&env.app, Method::DELETE, "/variables", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(html, home);
}

#[tokio::test]
async fn test_large_body_is_ignored_outside_variable_updates() {
    let env = create_test_environment().await;
    let (_, _, home) = get(&env.app, "/").await;
    let large = "x".repeat(3 * 1024 * 1024);

    for (method, uri) in [(Method::GET, "/"), (Method::POST, "/unknown")] {
        let (status, _, html) = send(&env.app, method.clone(), uri, &large).await;
        assert_eq!(status, StatusCode::OK, "{} {}", method, uri);
        assert_eq!(html, home, "{} {}", method, uri);
    }

    let (status, _, html) = send(&env.app, Method::GET, "/en/acme/welcome", &large).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Welcome to Acme</title>"));
}

#[tokio::test]
async fn test_oversized_variable_update_is_internal_error() {
    let env = create_test_environment().await;
    let body = format!("key=name&value={}", "x".repeat(MAX_FORM_BYTES));

    let (status, content_type, text) = send(&env.app, Method::POST, "/variables", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type, "text/plain");
    assert_eq!(text, INTERNAL_ERROR_BODY);
    assert!(env.state.variables.is_empty().await);

    // A form within the limit still goes through
    set_variable(&env.app, "name", "Ada").await;
}

#[tokio::test]
async fn test_home_failure_is_internal_error() {
    let env = create_test_environment().await;
    std::fs::remove_file(env.path("view/index.hbs")).unwrap();

    assert_internal_error(&env.app, "/").await;

    // The variable endpoint does not depend on index.hbs
    set_variable(&env.app, "name", "Ada").await;
}

// =============================================================================
// Dispatcher & Startup Tests
// =============================================================================

#[tokio::test]
async fn test_dispatch_without_http_server() {
    let env = create_test_environment().await;

    let response = dispatch(
        &env.state,
        &Method::POST,
        "/variables",
        Body::from("key=name&value=Ada"),
    ).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = dispatch(&env.state, &Method::GET, "/en/acme/welcome", Body::empty()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<p>Hello Ada</p>"));
}

#[tokio::test]
async fn test_load_fails_without_catalog() {
    let env = create_test_environment().await;
    std::fs::remove_file(env.path("com-config.json")).unwrap();

    let result = AppState::load(&settings_for(env.dir.path())).await;
    assert!(matches!(result, Err(AppError::Catalog(_))));
}

#[tokio::test]
async fn test_load_fails_on_malformed_catalog() {
    let env = create_test_environment().await;
    write(env.dir.path(), "com-config.json", r#"{ "acme": ["welcome"] }"#);

    let result = AppState::load(&settings_for(env.dir.path())).await;
    assert!(matches!(result, Err(AppError::Catalog(_))));
}

#[tokio::test]
async fn test_load_fails_without_variables_view() {
    let env = create_test_environment().await;
    std::fs::remove_file(env.path("view/variables.hbs")).unwrap();

    let result = AppState::load(&settings_for(env.dir.path())).await;
    assert!(matches!(result, Err(AppError::Preview(_))));
}
