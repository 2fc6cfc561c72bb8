//! Signup page and account creation.

use axum::{
    Form,
    extract::{Extension, Query},
    response::{Html, IntoResponse, Redirect},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

use super::auth::password::hash_password;
use super::{ErrorFlag, valid_password, valid_username};
use crate::store::{CredentialStore, StoreError, UserRecord};

/// Role given to self-registered accounts.
const DEFAULT_ROLE: &str = "ADMIN";

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    username: String,
    password: SecretString,
}

fn signup_page_html(error: bool) -> String {
    let banner = if error {
        "\n    <p class=\"error\">Could not create that account.</p>"
    } else {
        ""
    };
    format!(
        r#"<!doctype html>
<html>
  <head><title>pordisto - sign up</title></head>
  <body>
    <h1>Sign up</h1>{banner}
    <form action="/signup" method="post">
      <label>Username <input type="text" name="username" autocomplete="username"></label>
      <label>Password <input type="password" name="password" autocomplete="new-password"></label>
      <button type="submit">Sign up</button>
    </form>
    <p>Already registered? <a href="/login">Log in</a></p>
  </body>
</html>
"#
    )
}

// axum handler for the signup form page
pub async fn signup_page(Query(flag): Query<ErrorFlag>) -> Html<String> {
    Html(signup_page_html(flag.is_set()))
}

/// Handle a signup submission.
///
/// A taken username and a store outage both land on `/signup?error`, so the
/// form cannot be used to probe which usernames exist.
pub async fn signup(
    store: Extension<Arc<dyn CredentialStore>>,
    form: Option<Form<SignupForm>>,
) -> impl IntoResponse {
    let Some(Form(form)) = form else {
        warn!("Signup rejected: malformed form body");
        return Redirect::to("/signup?error");
    };

    if !valid_username(&form.username) || !valid_password(form.password.expose_secret()) {
        warn!("Signup rejected: input failed validation");
        return Redirect::to("/signup?error");
    }

    let password = match hash_password(form.password.expose_secret()) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash password: {err}");
            return Redirect::to("/signup?error");
        }
    };

    let record = UserRecord {
        username: form.username,
        password,
        enabled: true,
        role: DEFAULT_ROLE.to_string(),
    };

    match store.insert(record).await {
        Ok(()) => Redirect::to("/login"),
        Err(StoreError::DuplicateUsername) => {
            warn!("Signup rejected: username already taken");
            Redirect::to("/signup?error")
        }
        Err(err) => {
            error!("Signup insert failed: {err}");
            Redirect::to("/signup?error")
        }
    }
}
