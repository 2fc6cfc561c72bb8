//! Login page and form submission.

use axum::{
    Form,
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{Html, IntoResponse, Redirect},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

use super::auth::AuthState;
use super::auth::authenticator::{LoginOutcome, authenticate};
use super::auth::session::{open_session, session_cookie};
use super::{ErrorFlag, valid_password, valid_username};
use crate::store::CredentialStore;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: SecretString,
}

fn login_page_html(error: bool) -> String {
    let banner = if error {
        "\n    <p class=\"error\">Invalid username or password.</p>"
    } else {
        ""
    };
    format!(
        r#"<!doctype html>
<html>
  <head><title>pordisto - log in</title></head>
  <body>
    <h1>Log in</h1>{banner}
    <form action="/login" method="post">
      <label>Username <input type="text" name="username" autocomplete="username"></label>
      <label>Password <input type="password" name="password" autocomplete="current-password"></label>
      <button type="submit">Log in</button>
    </form>
    <p>No account? <a href="/signup">Sign up</a></p>
  </body>
</html>
"#
    )
}

// axum handler for the login form page
pub async fn login_page(Query(flag): Query<ErrorFlag>) -> Html<String> {
    Html(login_page_html(flag.is_set()))
}

/// Handle a login submission.
///
/// Every way to fail lands on the same `/login?error` redirect; the reason
/// only shows up in logs.
pub async fn login(
    store: Extension<Arc<dyn CredentialStore>>,
    auth_state: Extension<Arc<AuthState>>,
    form: Option<Form<LoginForm>>,
) -> impl IntoResponse {
    let Some(Form(form)) = form else {
        warn!("Login rejected: malformed form body");
        return Redirect::to("/login?error").into_response();
    };

    // Malformed input is denied without touching the store.
    if !valid_username(&form.username) || !valid_password(form.password.expose_secret()) {
        warn!("Login rejected: input failed validation");
        return Redirect::to("/login?error").into_response();
    }

    let outcome = match authenticate(
        store.0.as_ref(),
        &form.username,
        form.password.expose_secret(),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Login lookup failed: {err}");
            return Redirect::to("/login?error").into_response();
        }
    };

    let principal = match outcome {
        LoginOutcome::Granted(principal) => principal,
        LoginOutcome::Denied(reason) => {
            warn!(username = %form.username, ?reason, "Login denied");
            return Redirect::to("/login?error").into_response();
        }
    };

    let token = match open_session(&auth_state, principal).await {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to open session: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let cookie = match session_cookie(&auth_state, &token) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    (headers, Redirect::to("/")).into_response()
}
