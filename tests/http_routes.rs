use std::path::Path;
use std::sync::{Arc, Mutex};

use dayPlanner::errors::GenerationError;
use dayPlanner::handlers::cors::CorsPolicy;
use dayPlanner::handlers::http::routes;
use dayPlanner::service::artifact_store::{FileArtifactStore, PublicBase};
use dayPlanner::service::model_service::ModelClient;
use dayPlanner::service::pipeline::SchedulePipeline;
use serde_json::{json, Value};
use warp::http::StatusCode;

const LOCAL_PREFIX: &str = "http://127.0.0.1:8000";
const RESEARCH_ICS: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nSUMMARY:Research\r\nEND:VEVENT\r\nEND:VCALENDAR";

struct FakeModel {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn replying(body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: body.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl ModelClient for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

fn api(
    model: Arc<FakeModel>,
    root: &Path,
    frontend_url: Option<&str>,
) -> impl warp::Filter<Extract = (warp::reply::Response,), Error = std::convert::Infallible>
       + Clone
       + use<> {
    let store = FileArtifactStore::new(root, PublicBase::Local("127.0.0.1:8000".parse().unwrap()));
    let pipeline = Arc::new(SchedulePipeline::new(model, Arc::new(store)));
    routes(
        pipeline,
        root.to_path_buf(),
        CorsPolicy {
            frontend_url: frontend_url.map(str::to_string),
        },
    )
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn root_says_hello() {
    let dir = tempfile::tempdir().unwrap();
    let filter = api(FakeModel::replying(""), dir.path(), None);

    let res = warp::test::request().method("GET").path("/").reply(&filter).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res.body()), json!({ "Hello": "World" }));
}

#[tokio::test]
async fn create_event_returns_url_that_serves_stored_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let reply = format!("Your day:\n08:00 - 09:00 Research\n\n{}\n", RESEARCH_ICS);
    let model = FakeModel::replying(&reply);
    let filter = api(model.clone(), dir.path(), None);

    let res = warp::test::request()
        .method("POST")
        .path("/create-event")
        .json(&json!({ "user_input": "Wake up at 8am, one 1-hour task called Research" }))
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res.body());
    let url = body["ics_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("http://127.0.0.1:8000/public/"));
    assert!(url.ends_with(".ics"));

    // time_zone omitted from the body falls back to New York
    let prompts = model.prompts.lock().unwrap().clone();
    assert!(prompts[0].contains("Time Zone: \"America/New_York\""));

    let served = warp::test::request()
        .method("GET")
        .path(&url[LOCAL_PREFIX.len()..])
        .reply(&filter)
        .await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.body().as_ref(), RESEARCH_ICS.as_bytes());
}

#[tokio::test]
async fn explicit_time_zone_reaches_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let model = FakeModel::replying(RESEARCH_ICS);
    let filter = api(model.clone(), dir.path(), None);

    let res = warp::test::request()
        .method("POST")
        .path("/create-event")
        .json(&json!({ "user_input": "gym 1h", "time_zone": "Europe/Berlin" }))
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(model.prompts.lock().unwrap()[0].contains("Time Zone: \"Europe/Berlin\""));
}

#[tokio::test]
async fn reply_without_calendar_is_500_with_detail() {
    let dir = tempfile::tempdir().unwrap();
    let filter = api(FakeModel::replying("08:00 - 09:00 Research"), dir.path(), None);

    let res = warp::test::request()
        .method("POST")
        .path("/create-event")
        .json(&json!({ "user_input": "Research 1h" }))
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(res.body());
    assert!(body["detail"].as_str().unwrap().contains("Could not extract .ics content"));
    assert!(body.get("ics_url").is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn malformed_body_is_422() {
    let dir = tempfile::tempdir().unwrap();
    let model = FakeModel::replying(RESEARCH_ICS);
    let filter = api(model.clone(), dir.path(), None);

    let res = warp::test::request()
        .method("POST")
        .path("/create-event")
        .header("content-type", "application/json")
        .body(r#"{"time_zone": "UTC"}"#)
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(res.body())["detail"].is_string());
    assert!(model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_path_is_404_with_detail() {
    let dir = tempfile::tempdir().unwrap();
    let filter = api(FakeModel::replying(""), dir.path(), None);

    let res = warp::test::request().method("GET").path("/nope").reply(&filter).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res.body()), json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn preflight_allows_any_requested_header_when_frontend_unset() {
    let dir = tempfile::tempdir().unwrap();
    let filter = api(FakeModel::replying(""), dir.path(), None);

    let res = warp::test::request()
        .method("OPTIONS")
        .path("/create-event")
        .header("origin", "http://foo.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type, x-client-version")
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert_eq!(headers["access-control-allow-origin"], "http://foo.example");
    assert_eq!(headers["access-control-allow-headers"], "content-type, x-client-version");
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("HEAD"));
}

#[tokio::test]
async fn preflight_from_unlisted_origin_is_refused_when_frontend_set() {
    let dir = tempfile::tempdir().unwrap();
    let filter = api(
        FakeModel::replying(""),
        dir.path(),
        Some("https://planner.example.app"),
    );

    let res = warp::test::request()
        .method("OPTIONS")
        .path("/create-event")
        .header("origin", "http://foo.example")
        .header("access-control-request-method", "POST")
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(res.body()), json!({ "detail": "Disallowed CORS origin" }));
}

#[tokio::test]
async fn dev_origin_gets_cors_headers_on_post() {
    let dir = tempfile::tempdir().unwrap();
    let filter = api(
        FakeModel::replying(RESEARCH_ICS),
        dir.path(),
        Some("https://planner.example.app"),
    );

    let res = warp::test::request()
        .method("POST")
        .path("/create-event")
        .header("origin", "http://localhost:8081")
        .json(&json!({ "user_input": "Research 1h" }))
        .reply(&filter)
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "http://localhost:8081");
}
