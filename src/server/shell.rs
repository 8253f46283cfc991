//! App shell — the page served at `/`.
//!
//! With `ssr` enabled the todo list markup is rendered on the server before
//! delivery; otherwise a minimal client-boot shell loads the same data from
//! `/api/todos` in the browser. Module head contributions (stylesheet links)
//! are injected into both variants.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::warn;

use crate::domain::Todo;

use super::AppState;

const SHELL_STYLE: &str = "\
    *, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: system-ui, -apple-system, sans-serif;
      background: #0f0f0f; color: #e0e0e0;
      display: flex; align-items: center; justify-content: center;
      min-height: 100vh;
    }
    .card {
      min-width: 20rem; padding: 2rem 3rem;
      border: 1px solid #333; border-radius: 12px;
      background: #1a1a1a;
    }
    h1 { font-size: 1.5rem; margin-bottom: 0.5rem; }
    p  { font-size: 0.9rem; color: #888; margin-bottom: 1rem; }
    ul { list-style: none; }
    li { padding: 0.25rem 0; border-bottom: 1px solid #2a2a2a; }
    li.done { color: #666; text-decoration: line-through; }
";

/// Client-side boot script — fetches the todo list and fills the shell.
const CLIENT_BOOT_JS: &str = "\
    fetch('/api/todos')
      .then((r) => r.json())
      .then((todos) => {
        document.querySelector('p').textContent = todos.length + ' item(s)';
        const ul = document.getElementById('todos');
        for (const todo of todos) {
          const li = document.createElement('li');
          li.textContent = todo.title;
          if (todo.is_completed) li.className = 'done';
          ul.appendChild(li);
        }
      });
";

/// GET /
pub(super) async fn root(State(state): State<AppState>) -> Response {
    if state.ssr {
        match state.service.list() {
            Ok(todos) => {
                Html(render_ssr(&state.app_name, &state.head_html, &todos)).into_response()
            }
            Err(e) => {
                warn!("shell render failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error\n").into_response()
            }
        }
    } else {
        Html(render_client(&state.app_name, &state.head_html)).into_response()
    }
}

/// Shell with the todo list already rendered into the markup.
fn render_ssr(app_name: &str, head_extra: &str, todos: &[Todo]) -> String {
    let items: String = todos
        .iter()
        .map(|todo| {
            let class = if todo.is_completed { "done" } else { "open" };
            format!(
                "      <li class=\"{class}\">{}</li>\n",
                escape_html(&todo.title)
            )
        })
        .collect();

    let body = format!(
        "    <p>{} item(s)</p>\n    <ul id=\"todos\">\n{items}    </ul>",
        todos.len()
    );
    page(app_name, head_extra, &body)
}

/// Shell that loads the todo list in the browser.
fn render_client(app_name: &str, head_extra: &str) -> String {
    let body = format!(
        "    <p>loading…</p>\n    <ul id=\"todos\"></ul>\n    <script>\n{CLIENT_BOOT_JS}    </script>"
    );
    page(app_name, head_extra, &body)
}

fn page(app_name: &str, head_extra: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>
{style}  </style>
{head_extra}</head>
<body>
  <div class="card">
    <h1>{title}</h1>
{body}
  </div>
</body>
</html>
"#,
        title = escape_html(app_name),
        style = SHELL_STYLE,
        head_extra = head_extra,
        body = body,
    )
}

/// Minimal HTML escaping for user-supplied text nodes and the title.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn todo(title: &str, done: bool) -> Todo {
        let now = Utc::now();
        Todo {
            id: "t".into(),
            title: title.into(),
            is_completed: done,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn ssr_shell_contains_items() {
        let html = render_ssr("demo", "", &[todo("write <tests>", false), todo("ship", true)]);
        assert!(html.contains("2 item(s)"));
        assert!(html.contains("write &lt;tests&gt;"));
        assert!(html.contains(r#"<li class="done">ship</li>"#));
    }

    #[test]
    fn client_shell_boots_from_api() {
        let html = render_client("demo", "");
        assert!(html.contains("fetch('/api/todos')"));
        assert!(html.contains(r#"<ul id="todos"></ul>"#));
    }

    #[test]
    fn head_extra_is_injected() {
        let link = r#"  <link rel="stylesheet" href="/assets/utilities.css">
"#;
        let html = render_client("demo", link);
        assert!(html.contains("utilities.css"));
    }
}
