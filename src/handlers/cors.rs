use warp::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ACCESS_CONTROL_REQUEST_HEADERS,
    ACCESS_CONTROL_REQUEST_METHOD, ORIGIN, VARY,
};
use warp::http::{HeaderMap, HeaderValue, Method, StatusCode};
use warp::reply::Response;
use warp::Reply;

use crate::models::schedule::ErrorDetail;

pub const DEV_ORIGINS: [&str; 3] = [
    "http://localhost",
    "http://localhost:8081",
    "http://127.0.0.1:8081",
];

const ALLOWED_METHODS: &str = "GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS";
const MAX_AGE_SECS: &str = "600";

/// Origin allow-list. Without a production origin every origin is allowed.
/// Requested headers are always mirrored back, so any header is permitted.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    pub frontend_url: Option<String>,
}

impl CorsPolicy {
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let frontend = self.frontend_url.as_ref()?;
        let mut origins: Vec<String> = DEV_ORIGINS.iter().map(|o| o.to_string()).collect();
        let frontend = frontend.trim_end_matches('/').to_string();
        if !origins.contains(&frontend) {
            origins.push(frontend);
        }
        Some(origins)
    }

    pub fn allows(&self, origin: &str) -> bool {
        match self.allowed_origins() {
            Some(origins) => origins.iter().any(|o| o == origin),
            None => true,
        }
    }

    /// Answers preflights itself and stamps CORS headers on everything else.
    pub fn apply(&self, method: &Method, headers: &HeaderMap, reply: impl Reply) -> Response {
        let origin = headers.get(ORIGIN).cloned();
        let is_preflight = method == Method::OPTIONS && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD);

        let Some(origin) = origin else {
            return reply.into_response();
        };
        let allowed = origin.to_str().map(|o| self.allows(o)).unwrap_or(false);

        if is_preflight {
            if !allowed {
                return warp::reply::with_status(
                    warp::reply::json(&ErrorDetail::new("Disallowed CORS origin")),
                    StatusCode::FORBIDDEN,
                )
                .into_response();
            }
            let mut response = warp::reply().into_response();
            let out = response.headers_mut();
            stamp_origin(out, origin);
            out.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
            if let Some(requested) = headers.get(ACCESS_CONTROL_REQUEST_HEADERS) {
                out.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
            }
            out.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
            return response;
        }

        let mut response = reply.into_response();
        if allowed {
            stamp_origin(response.headers_mut(), origin);
        }
        response
    }
}

fn stamp_origin(out: &mut HeaderMap, origin: HeaderValue) {
    out.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    out.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    out.append(VARY, HeaderValue::from_static("Origin"));
}
