//! CSS utility module — serves a generated utility stylesheet and links it
//! from the app shell.

use axum::Router;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use super::AppModule;

pub const MODULE_NAME: &str = "tailwind";

/// Path the stylesheet is served under.
pub const STYLESHEET_PATH: &str = "/assets/utilities.css";

/// Utility classes the shell (and any frontend served alongside) can use.
/// Generated once; small enough to ship inline.
const UTILITIES_CSS: &str = "\
.flex { display: flex; }
.flex-col { flex-direction: column; }
.items-center { align-items: center; }
.justify-center { justify-content: center; }
.justify-between { justify-content: space-between; }
.gap-2 { gap: 0.5rem; }
.gap-4 { gap: 1rem; }
.p-2 { padding: 0.5rem; }
.p-4 { padding: 1rem; }
.mt-2 { margin-top: 0.5rem; }
.mt-4 { margin-top: 1rem; }
.text-sm { font-size: 0.875rem; }
.text-lg { font-size: 1.125rem; }
.text-center { text-align: center; }
.font-bold { font-weight: 700; }
.rounded { border-radius: 0.25rem; }
.rounded-lg { border-radius: 0.5rem; }
.line-through { text-decoration: line-through; }
.opacity-50 { opacity: 0.5; }
.w-full { width: 100%; }
.cursor-pointer { cursor: pointer; }
";

pub struct TailwindModule;

impl AppModule for TailwindModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn routes(&self) -> Router {
        Router::new().route(STYLESHEET_PATH, get(serve_stylesheet))
    }

    fn head_html(&self) -> Option<&'static str> {
        Some(r#"<link rel="stylesheet" href="/assets/utilities.css">"#)
    }
}

async fn serve_stylesheet() -> Response {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        UTILITIES_CSS,
    )
        .into_response()
}
