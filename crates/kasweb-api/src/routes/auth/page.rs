//! Login and register pages
//!
//! Both forms post through HTMX and swap themselves, so a failed attempt
//! comes back as the same form with an alert and the typed values kept.

use axum::response::{Html, IntoResponse, Redirect, Response};
use kasweb_core::forms::RegisterForm;
use kasweb_core::Role;
use kasweb_utils::escape_html;

use crate::session::Session;
use crate::{alert_html, auth_page, option_html};

/// Login page; signed-in users go straight to the dashboard
pub async fn page_login(session: Session) -> Response {
    if session.is_signed_in() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(auth_page("Login", &render_login_form("", None))).into_response()
}

pub async fn page_register() -> Html<String> {
    Html(auth_page("Register", &render_register_form(&RegisterForm::default(), None)))
}

/// Login form, optionally with an alert above the fields
pub fn render_login_form(email: &str, alert: Option<&str>) -> String {
    format!(
        r#"<div id='login-card'>
    <div class='text-center mb-6'>
        <h1 class='text-2xl font-bold text-indigo-600'>Kas GKJW</h1>
        <p class='text-sm text-gray-500'>Masuk ke sistem keuangan</p>
    </div>
    {}
    <form hx-post='/login' hx-target='#login-card' hx-swap='outerHTML' hx-disabled-elt='find button' class='space-y-4'>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Email</label>
            <input type='email' name='email' value='{}' required class='w-full px-3 py-2 border rounded-lg focus:ring-2 focus:ring-indigo-500' placeholder='admin@gkjw.com'>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Password</label>
            <input type='password' name='password' required class='w-full px-3 py-2 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
        </div>
        <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Login</button>
    </form>
    <div class='mt-4 flex justify-between text-sm'>
        <a href='/dashboard' class='text-gray-500 hover:text-gray-700'>Lihat sebagai tamu</a>
        <a href='/register' class='text-indigo-600 hover:underline'>Daftar akun</a>
    </div>
</div>"#,
        alert.map(|m| alert_html("error", m)).unwrap_or_default(),
        escape_html(email)
    )
}

/// Register form; `alert` is `(kind, message)`
pub fn render_register_form(form: &RegisterForm, alert: Option<(&str, &str)>) -> String {
    let current_role = form.role.parse::<Role>().unwrap_or(Role::Member);
    let roles: String = Role::ASSIGNABLE
        .iter()
        .map(|role| option_html(&role.to_string(), role.label(), *role == current_role))
        .collect();

    format!(
        r#"<div id='register-card'>
    <div class='text-center mb-6'>
        <h1 class='text-2xl font-bold text-indigo-600'>Daftar Akun</h1>
        <p class='text-sm text-gray-500'>Buat akun baru untuk sistem keuangan</p>
    </div>
    {}
    <form hx-post='/register' hx-target='#register-card' hx-swap='outerHTML' hx-disabled-elt='find button' class='space-y-4'>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Nama</label>
            <input type='text' name='name' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Email</label>
            <input type='email' name='email' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Password</label>
            <input type='password' name='password' required class='w-full px-3 py-2 border rounded-lg'>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Role</label>
            <select name='role' class='w-full px-3 py-2 border rounded-lg'>{}</select>
        </div>
        <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Daftar</button>
    </form>
    <p class='mt-4 text-center text-sm'>Sudah punya akun? <a href='/login' class='text-indigo-600 hover:underline'>Login</a></p>
</div>"#,
        alert.map(|(kind, m)| alert_html(kind, m)).unwrap_or_default(),
        escape_html(&form.name),
        escape_html(&form.email),
        roles
    )
}
