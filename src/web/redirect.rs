//! Redirect helpers

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use url::Url;

const ORIGIN: &str = "http://localhost";

/// 302 Found pointing at `location`
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// `prefix` followed by `id` as a single percent-encoded path segment
pub fn location(prefix: &str, id: &str) -> String {
    let mut url = match Url::parse(ORIGIN).and_then(|origin| origin.join(prefix)) {
        Ok(url) => url,
        Err(_) => return prefix.to_string(),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(id);
    }
    url.path().to_string()
}

/// `id` percent-encoded as a single path segment, for links built in templates
pub fn path_segment(id: &str) -> String {
    let path = location("/", id);
    match path.strip_prefix('/') {
        Some(segment) => segment.to_string(),
        None => path,
    }
}
