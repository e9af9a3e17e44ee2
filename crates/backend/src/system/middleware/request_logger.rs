use axum::body::Body;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

/// HTTP request logging middleware.
///
/// One line per request: status, method, path, duration and response size
/// (from `Content-Length` when the body has a known size).
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .map(format_number)
        .unwrap_or_else(|| "-".into());
    let elapsed_ms = start.elapsed().as_millis();

    if response.status().is_server_error() {
        tracing::error!("{} {:>6} {} | {:>5}ms | {:>12}", status, method, path, elapsed_ms, size);
    } else if response.status().is_client_error() {
        tracing::warn!("{} {:>6} {} | {:>5}ms | {:>12}", status, method, path, elapsed_ms, size);
    } else {
        tracing::info!("{} {:>6} {} | {:>5}ms | {:>12}", status, method, path, elapsed_ms, size);
    }

    response
}

/// Форматирует число с разделителями тысяч
fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
