use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// Upload form. Metrics, skill tabs and downloads render client-side from
/// `/api/v1/analyze`.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
