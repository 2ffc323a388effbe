//! Auth form submissions

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use kasweb_core::forms::{LoginForm, RegisterForm};

use super::page::{render_login_form, render_register_form};
use crate::session::{self, SessionData};
use crate::AppState;

/// Sign in and store the session cookie
pub async fn login_submit(state: State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(e) => return login_failed(&form, &e.to_string()),
    };

    match state.client.login(&credentials).await {
        Ok(login) => {
            log::info!("{} signed in as {}", login.user.email, login.user.role);
            let data = SessionData {
                token: login.token,
                user: login.user,
            };
            let cookie = session::session_cookie(&state.config.session, &data);
            ([(header::SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response()
        }
        Err(err) => {
            log::warn!("Login failed for {}: {}", credentials.email, err);
            login_failed(&form, &err.user_message("Login gagal"))
        }
    }
}

fn login_failed(form: &LoginForm, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render_login_form(&form.email, Some(message))),
    )
        .into_response()
}

/// Create an account; on success the form comes back empty
pub async fn register_submit(state: State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => return register_failed(&form, &e.to_string()),
    };

    match state.client.register(&request).await {
        Ok(()) => {
            log::info!("Registered {} as {}", request.email, request.role);
            let message = format!("User {} berhasil dibuat! Silakan login.", request.email);
            Html(render_register_form(&RegisterForm::default(), Some(("success", &message)))).into_response()
        }
        Err(err) => {
            log::warn!("Register failed for {}: {}", request.email, err);
            register_failed(&form, &err.user_message("Register gagal. Silakan coba lagi."))
        }
    }
}

fn register_failed(form: &RegisterForm, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render_register_form(form, Some(("error", message)))),
    )
        .into_response()
}

/// Drop the session cookie and go to the login page
pub async fn logout(state: State<AppState>) -> Response {
    (
        [(header::SET_COOKIE, session::clear_cookie(&state.config.session))],
        Redirect::to("/login"),
    )
        .into_response()
}
