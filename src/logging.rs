//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

/// Form fields that hold a contact's personal details and are never written to the logs.
const REDACTED_FIELDS: [&str; 2] = ["email", "phone"];

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body_text) = extract_header_and_body_text_from_request(request).await;

    let is_form_submission = (headers.method == Method::POST || headers.method == Method::PUT)
        && headers
            .headers
            .get(CONTENT_TYPE)
            .is_some_and(|content_type| content_type == "application/x-www-form-urlencoded");

    if is_form_submission {
        let display_text = REDACTED_FIELDS
            .iter()
            .fold(body_text.clone(), |text, field_name| {
                redact_field(&text, field_name)
            });
        log_request(&headers, &display_text);
    } else {
        log_request(&headers, &body_text);
    }

    let request = Request::from_parts(headers, body_text.into());
    let response = next.run(request).await;

    let (headers, body_text) = extract_header_and_body_text_from_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, body_text.into())
}

fn redact_field(form_text: &str, field_name: &str) -> String {
    let field_start = form_text
        .split('&')
        .scan(0, |offset, pair| {
            let start = *offset;
            *offset += pair.len() + 1;
            Some((start, pair))
        })
        .find(|(_, pair)| pair.starts_with(&format!("{field_name}=")));

    let (start, pair) = match field_start {
        Some(found) => found,
        None => return form_text.to_string(),
    };

    let end = start + pair.len();

    format!(
        "{}{}=********{}",
        &form_text[..start],
        field_name,
        &form_text[end..]
    )
}

async fn extract_header_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (headers, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_header_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (headers, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

const LOG_BODY_LENGTH_LIMIT: usize = 64;

fn truncate(body: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT;

    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}
