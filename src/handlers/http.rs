use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use warp::http::{HeaderMap, Method, StatusCode};
use warp::{Filter, Rejection, Reply};

use crate::handlers::cors::CorsPolicy;
use crate::models::schedule::{CreateEventResponse, ErrorDetail, ScheduleRequest};
use crate::service::pipeline::{PipelineStage, SchedulePipeline};

const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn routes(
    pipeline: Arc<SchedulePipeline>,
    public_root: PathBuf,
    cors: CorsPolicy,
) -> impl Filter<Extract = (warp::reply::Response,), Error = Infallible> + Clone {
    let root = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "Hello": "World" })));

    let create_event = warp::path!("create-event")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_pipeline(pipeline))
        .and_then(create_event_handler);

    let public = warp::path("public").and(warp::fs::dir(public_root));

    let api = root
        .or(create_event)
        .or(public)
        .recover(handle_rejection);

    let cors = Arc::new(cors);
    warp::method()
        .and(warp::header::headers_cloned())
        .and(api)
        .map(move |method: Method, headers: HeaderMap, reply| cors.apply(&method, &headers, reply))
}

fn with_pipeline(
    pipeline: Arc<SchedulePipeline>,
) -> impl Filter<Extract = (Arc<SchedulePipeline>,), Error = Infallible> + Clone {
    warp::any().map(move || pipeline.clone())
}

/// Runs the pipeline and shapes the outcome: a locator, or a 500 with detail.
pub async fn create_event(
    pipeline: &SchedulePipeline,
    request: ScheduleRequest,
) -> Result<CreateEventResponse, (StatusCode, ErrorDetail)> {
    match pipeline.run(&request).await {
        Ok(stored) => {
            info!(stage = ?PipelineStage::Responded, url = %stored.locator.url, "schedule returned");
            Ok(CreateEventResponse {
                ics_url: stored.locator.url,
            })
        }
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorDetail::new(err.to_string()),
        )),
    }
}

async fn create_event_handler(
    request: ScheduleRequest,
    pipeline: Arc<SchedulePipeline>,
) -> Result<warp::reply::Response, Infallible> {
    let reply = match create_event(&pipeline, request).await {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), StatusCode::OK),
        Err((status, detail)) => warp::reply::with_status(warp::reply::json(&detail), status),
    };
    Ok(reply.into_response())
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, detail) = rejection_detail(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        warn!(rejection = ?err, "unhandled rejection");
    } else if status != StatusCode::NOT_FOUND {
        warn!(status = status.as_u16(), detail = %detail.detail, "request rejected");
    }
    Ok(warp::reply::with_status(warp::reply::json(&detail), status))
}

fn rejection_detail(err: &Rejection) -> (StatusCode, ErrorDetail) {
    if err.is_not_found() {
        (StatusCode::NOT_FOUND, ErrorDetail::new("Not Found"))
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::UNPROCESSABLE_ENTITY, ErrorDetail::new(e.to_string()))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, ErrorDetail::new("Request body too large"))
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorDetail::new("Expected a JSON request body"),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, ErrorDetail::new("Method Not Allowed"))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorDetail::new("Internal Server Error"),
        )
    }
}
