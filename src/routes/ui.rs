use axum::{response::Html, routing::get, Router};

use crate::agents::StudyMode;

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", get(upload_page))
}

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 860px; color: #1d1d1f; }
    h1 { margin-bottom: 0.5rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    .actions button, .actions a { margin-right: 0.5rem; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    .result { background: #f6f8fa; padding: 1rem; white-space: pre-wrap; border-radius: 6px; }
    .file-path { color: #555; }
"#;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title} - Study Assistant</title>
  <style>{style}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(title),
        style = STYLE,
    )
}

async fn index() -> Html<String> {
    Html(page(
        "Home",
        r#"  <h1>Study Assistant</h1>
  <p>Upload your study material and get a concise summary, structured notes, or an evaluation with a score out of 10.</p>
  <div class="card">
    <p>Supported formats: <code>.txt</code>, <code>.pdf</code>, <code>.docx</code> (save <code>.doc</code> files as <code>.docx</code> first).</p>
    <a href="/upload">Upload a document</a>
  </div>"#,
    ))
}

async fn upload_page() -> Html<String> {
    Html(page(
        "Upload",
        r#"  <h1>Upload a document</h1>
  <form class="card" method="post" action="/summarize" enctype="multipart/form-data">
    <input type="file" name="file" accept=".txt,.pdf,.doc,.docx" required />
    <div class="actions">
      <button type="submit" formaction="/summarize">Summarize</button>
      <button type="submit" formaction="/notes">Create notes</button>
      <button type="submit" formaction="/evaluate">Evaluate</button>
    </div>
  </form>
  <p><a href="/">Back</a></p>"#,
    ))
}

/// Result page of a study mode
pub fn render_result(mode: StudyMode, result: &str, file_path: &str) -> String {
    let file = html_escape(file_path);

    let other_modes: String = StudyMode::ALL
        .iter()
        .filter(|other| **other != mode && !file_path.is_empty())
        .map(|other| {
            format!(
                r#"<a href="/{route}/{file}">{title}</a>"#,
                route = other.route(),
                title = other.title(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    let body = format!(
        r#"  <h1>{title}</h1>
  <p class="file-path">File: <code>{file}</code></p>
  <div class="result">{result}</div>
  <div class="card actions">
      {other_modes}
      <a href="/upload">Upload another file</a>
  </div>"#,
        title = mode.title(),
        result = html_escape(result),
    );

    page(mode.title(), &body)
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
