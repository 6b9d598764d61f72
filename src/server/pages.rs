//! HTML fragments served by the route layer.

/// Banner linking back to the dashboard, pinned to the top-left corner
pub const BACK_BANNER: &str = concat!(
    r#"<div class="rover-back" style="position:fixed; top:10px; left:10px; z-index:1000; "#,
    r#"background:#ff8c00; padding:10px 15px; border-radius:5px;">"#,
    r#"<a href="/dashboard" style="color:white; text-decoration:none; font-weight:bold;">"#,
    "&larr; Back to Dashboard</a></div>"
);

/// Insert the back banner right after every literal `<body>` tag.
///
/// Documents without a bare `<body>` tag are returned unchanged.
pub fn inject_back_banner(html: &str) -> String {
    html.replace("<body>", &format!("<body>{}", BACK_BANNER))
}

/// Page shown when a `/view/` path or the dashboard cannot be served
pub fn not_found_page() -> String {
    r#"<!DOCTYPE html>
<html>
  <head>
    <title>Content Not Found</title>
    <style>
      body { background: #0a0a0a; color: white; text-align: center; padding: 2rem; font-family: sans-serif; }
      a { color: #ff8c00; text-decoration: none; }
    </style>
  </head>
  <body>
    <h1>404 - Content Not Found</h1>
    <p>The requested content does not exist.</p>
    <a href="/dashboard">&larr; Back to Dashboard</a>
  </body>
</html>
"#
    .to_string()
}

/// Content type for a raw content file, keyed on its extension
pub fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "js" | "jsx" | "mjs" => "text/javascript; charset=utf-8",
        "ts" | "tsx" => "text/typescript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json",
        "md" => "text/markdown; charset=utf-8",
        _ => "text/plain; charset=utf-8",
    }
}
