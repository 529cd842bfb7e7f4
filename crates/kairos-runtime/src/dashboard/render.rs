//! Page rendering.
//!
//! Templates are compiled into the binary; each page type is composed from a
//! fixed set of fragments:
//!
//! - index: `dashboard.html`, `status.html`, `index.html`
//! - jobs: `dashboard.html`, `status.html`, `jobs.html`
//! - executions: `dashboard.html`, `executions.html`

use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use kairos_core::error::{KairosError, Result};

/// Render a page to markup.
pub fn render<T: Template>(page: &T) -> Result<String> {
    page.render().map_err(|e| KairosError::Render(e.to_string()))
}

/// Render a page into an HTML response.
///
/// A render failure is logged and answered with an empty HTML body, never
/// with partial markup.
pub fn render_page<T: Template>(page: &T) -> Response {
    match render(page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template rendering failed");
            Html(String::new()).into_response()
        }
    }
}
