use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Dashboard stylesheet.
pub async fn styles_css() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLES,
    )
        .into_response()
}

const STYLES: &str = r#"
:root {
    --bg-primary: #f7f7f5;
    --bg-secondary: #ffffff;
    --text-primary: #1f2328;
    --text-secondary: #6e7781;
    --accent: #0969da;
    --success: #1a7f37;
    --warning: #9a6700;
    --error: #cf222e;
    --border: #d0d7de;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    line-height: 1.5;
}

a {
    color: var(--accent);
    text-decoration: none;
}

.dashboard {
    display: flex;
    min-height: 100vh;
}

.sidebar {
    width: 200px;
    background: var(--bg-secondary);
    border-right: 1px solid var(--border);
}

.sidebar-header {
    padding: 16px;
    border-bottom: 1px solid var(--border);
}

.sidebar-header .version {
    font-size: 0.8rem;
    color: var(--text-secondary);
}

.nav-links {
    list-style: none;
    padding: 8px 0;
}

.nav-links a {
    display: block;
    padding: 8px 16px;
    color: var(--text-primary);
}

.content {
    flex: 1;
    padding: 24px;
}

.content-header {
    margin-bottom: 16px;
}

.status-bar {
    display: flex;
    gap: 24px;
    padding: 12px 16px;
    margin-bottom: 16px;
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: 6px;
}

.status-item .label {
    margin-right: 6px;
    color: var(--text-secondary);
}

.status-item .unknown {
    color: var(--warning);
}

.notice {
    padding: 8px 16px;
    margin-bottom: 16px;
    color: var(--warning);
    border: 1px solid var(--warning);
    border-radius: 6px;
}

.panel {
    padding: 16px;
    margin-bottom: 16px;
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: 6px;
}

table {
    width: 100%;
    border-collapse: collapse;
    background: var(--bg-secondary);
}

th, td {
    padding: 6px 10px;
    text-align: left;
    border-bottom: 1px solid var(--border);
    vertical-align: top;
}

.kv-table th {
    width: 220px;
    color: var(--text-secondary);
    font-weight: normal;
}

.status-badge {
    padding: 2px 8px;
    border-radius: 10px;
    font-size: 0.8rem;
    color: #ffffff;
}

.status-success { background: var(--success); }
.status-failed { background: var(--error); }
.status-running { background: var(--accent); }
.status-disabled { background: var(--text-secondary); }

tr.status-success, tr.status-failed {
    background: transparent;
}

pre.output {
    max-height: 240px;
    overflow: auto;
    white-space: pre-wrap;
    font-size: 0.8rem;
}

.empty-state, .empty-row td {
    color: var(--text-secondary);
    text-align: center;
}
"#;
