//! Landing page telling users which URL to register in Plex.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

/// GET /: the webhook URL in a copy-friendly input box.
pub async fn landing(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(landing_page(&state.server.webhook_url()))
}

pub fn landing_page(url: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Landing Page - Plex Webhooks">
    <title>Plex Webhooks</title>
    <style>
      html, body {{
        width: 100%;
        height: 100%;
        margin: 0;
        padding: 0;
        background-color: rgb(31, 35, 38);
        color: rgb(255, 255, 255);
        font-family: "Helvetica Neue", Helvetica, Arial, sans-serif;
        font-size: 14px;
      }}
      .container {{
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: center;
        width: 100%;
        height: 100%;
        text-align: center;
      }}
      input {{
        width: 280px;
        height: 40px;
        padding: 4px 1em;
        border: none;
        border-radius: 4px;
        outline: none;
        box-sizing: border-box;
        text-align: center;
        font-size: 14px;
        background-color: rgba(255, 255, 255, 0.08);
        color: rgb(238, 238, 238);
      }}
      input:focus {{
        background-color: rgb(238, 238, 238);
        color: rgb(85, 85, 85);
      }}
      a {{ color: #cc7b19; text-decoration: none; }}
      a:hover {{ color: #fff; }}
    </style>
  </head>
  <body>
    <div class="container">
      <p>Add this URL on the<br />
        <a href="https://app.plex.tv/desktop#!/settings/webhooks" target="_blank">Webhooks page</a>
        of your Plex Media Server:
      </p>
      <input class="input" type="text" value="{}" onClick="this.select()" />
    </div>
  </body>
</html>
"#,
        escape_html(url)
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
