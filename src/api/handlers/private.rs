//! The page behind the session gate.

use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use super::auth::AuthState;
use super::auth::principal::require_auth;

// axum handler for the private page
pub async fn private(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state).await {
        Ok(principal) => principal,
        Err(redirect) => return redirect.into_response(),
    };

    // Usernames are URL-safe by the signup validator, so inlining is fine.
    let page = format!(
        r#"<!doctype html>
<html>
  <head><title>pordisto - private</title></head>
  <body>
    <h1>Private page</h1>
    <p>Hello, {username}. Only signed-in users can see this.</p>
    <form action="/logout" method="post">
      <button type="submit">Log out</button>
    </form>
  </body>
</html>
"#,
        username = principal.username
    );

    Html(page).into_response()
}
