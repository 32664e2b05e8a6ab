use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Ensures every request/response pair carries a trace identifier so that
/// engine logs can be correlated with the proctor UI and any upstream proxy.
///
/// An id supplied by the caller wins; otherwise a fresh UUID is minted and
/// echoed back on the response.
pub async fn trace_context_middleware(mut request: Request, next: Next) -> Response {
    let trace_id = match incoming_trace_id(&request) {
        Some(id) => id,
        None => {
            let minted = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&minted) {
                request
                    .headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            minted
        }
    };

    tracing::trace!(trace_id = %trace_id, "handling request");

    let mut response = next.run(request).await;

    if response.headers().get(TRACE_ID_HEADER).is_none() {
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
    }

    response
}

fn incoming_trace_id(request: &Request) -> Option<String> {
    request
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
