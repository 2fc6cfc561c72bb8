use axum::response::Html;

const INDEX_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>pordisto</title></head>
  <body>
    <h1>Welcome</h1>
    <p>This page is public.</p>
    <ul>
      <li><a href="/login">Log in</a></li>
      <li><a href="/signup">Sign up</a></li>
      <li><a href="/private">Private page</a></li>
    </ul>
  </body>
</html>
"#;

// axum handler for the public landing page
pub async fn root() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
