//! Funds page rendering

use axum::extract::Query;
use axum::response::Html;
use kasweb_core::format::format_date;
use kasweb_core::{Fund, FundStatus};
use kasweb_utils::escape_html;

use crate::error::ApiResult;
use crate::session::Session;
use crate::{notice_html, option_html, render_or_alert, AppState, NoticeQuery};

pub async fn page_funds(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    session: Session,
    Query(notice): Query<NoticeQuery>,
) -> ApiResult<Html<String>> {
    let result = session.client(&state).list_funds().await;
    let list = render_or_alert(result, "Gagal memuat fund", |funds| render_fund_list(&funds))?;

    let inner_content = format!(
        r#"{}
        <div class='flex items-center justify-between mb-6'>
            <div>
                <h2 class='text-2xl font-bold'>Fund / Proker</h2>
                <p class='text-sm text-gray-500'>Kelola daftar fund untuk setiap program/kegiatan</p>
            </div>
            <button hx-get='/dashboard/funds/list' hx-target='#funds-list' class='px-4 py-2 border rounded-lg hover:bg-gray-100'>Reload</button>
        </div>
        <div id='fund-form-card' class='bg-white rounded-xl shadow-sm p-6 mb-4'>{}</div>
        <div id='fund-alert'></div>
        <div id='funds-list' hx-get='/dashboard/funds/list' hx-trigger='funds-changed from:body'>{}</div>"#,
        notice_html(notice.notice.as_deref()),
        render_fund_form(None),
        list
    );

    Ok(Html(crate::page_response(
        &headers,
        &session,
        "Fund / Proker",
        "/dashboard/funds",
        &inner_content,
    )))
}

fn status_badge(status: FundStatus) -> &'static str {
    match status {
        FundStatus::Active => "<span class='px-2 py-1 rounded-full text-xs bg-green-100 text-green-700'>Aktif</span>",
        FundStatus::Archived => "<span class='px-2 py-1 rounded-full text-xs bg-gray-100 text-gray-600'>Arsip</span>",
    }
}

/// New-fund form, or the edit form with a status select for `Some(fund)`
pub fn render_fund_form(fund: Option<&Fund>) -> String {
    let (title, action, name, description) = match fund {
        Some(f) => (
            "Edit Fund",
            format!("hx-put='/dashboard/funds/{}'", urlencoding::encode(&f.id)),
            escape_html(&f.name),
            escape_html(&f.description),
        ),
        None => ("Fund Baru", "hx-post='/dashboard/funds'".to_string(), String::new(), String::new()),
    };

    let status_field = match fund {
        Some(f) => {
            let options: String = [FundStatus::Active, FundStatus::Archived]
                .iter()
                .map(|s| option_html(&s.to_string(), &s.to_string(), *s == f.status))
                .collect();
            format!(
                r#"<div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Status</label>
                <select name='status' class='w-full px-3 py-2 border rounded-lg'>{}</select>
            </div>"#,
                options
            )
        }
        None => String::new(),
    };
    let buttons = match fund {
        Some(_) => "<button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Update Fund</button>
            <a href='/dashboard/funds' class='px-4 py-2 border rounded-lg hover:bg-gray-100'>Batal</a>",
        None => "<button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Tambah Fund</button>",
    };

    format!(
        r#"<h3 class='font-semibold mb-1'>{}</h3>
        <p class='text-xs text-gray-500 mb-4'>Isi nama dan deskripsi fund</p>
        <form {} hx-target='#form-alert' hx-disabled-elt='find button[type=submit]' class='space-y-4'>
            <div id='form-alert'></div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Nama</label>
                <input type='text' name='name' value='{}' placeholder='Contoh: Natal 2025' class='w-full px-3 py-2 border rounded-lg'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Deskripsi</label>
                <textarea name='description' rows='2' class='w-full px-3 py-2 border rounded-lg'>{}</textarea>
            </div>
            {}
            <div class='flex gap-2'>{}</div>
        </form>"#,
        title, action, name, description, status_field, buttons
    )
}

pub fn render_fund_list(funds: &[Fund]) -> String {
    if funds.is_empty() {
        return "<div class='bg-white rounded-xl shadow-sm p-6 text-center text-gray-500'>Belum ada fund</div>"
            .to_string();
    }

    let mut html = String::from("<div class='grid grid-cols-1 md:grid-cols-2 gap-4'>");
    for fund in funds {
        let id = urlencoding::encode(&fund.id);
        let description = if fund.description.trim().is_empty() {
            "<p class='text-sm text-gray-400 italic'>Tanpa deskripsi</p>".to_string()
        } else {
            format!("<p class='text-sm text-gray-600'>{}</p>", escape_html(&fund.description))
        };
        let created = if fund.created_at.is_empty() {
            String::new()
        } else {
            format!("<p class='text-xs text-gray-400 mt-2'>Dibuat {}</p>", format_date(&fund.created_at))
        };
        html.push_str(&format!(
            r#"<div class='bg-white rounded-xl shadow-sm p-4'>
                <div class='flex items-start justify-between mb-2'>
                    <h4 class='font-semibold'>{}</h4>
                    {}
                </div>
                {}
                {}
                <div class='flex gap-2 mt-3'>
                    <button hx-get='/dashboard/funds/{}/edit' hx-target='#fund-form-card' class='px-3 py-1 text-sm border rounded hover:bg-gray-100'>Edit</button>
                    <button hx-delete='/dashboard/funds/{}' hx-confirm='Hapus fund ini?' hx-target='#fund-alert' class='px-3 py-1 text-sm text-red-600 border border-red-200 rounded hover:bg-red-50'>Hapus</button>
                </div>
            </div>"#,
            escape_html(&fund.name),
            status_badge(fund.status),
            description,
            created,
            id,
            id
        ));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fund(status: FundStatus) -> Fund {
        Fund {
            id: "f1".to_string(),
            name: "Natal 2025".to_string(),
            description: "Perayaan Natal".to_string(),
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_form_has_no_status() {
        let html = render_fund_form(None);
        assert!(html.contains("hx-post='/dashboard/funds'"));
        assert!(!html.contains("name='status'"));
    }

    #[test]
    fn test_edit_form_preselects_status() {
        let html = render_fund_form(Some(&fund(FundStatus::Archived)));
        assert!(html.contains("hx-put='/dashboard/funds/f1'"));
        assert!(html.contains("value='Natal 2025'"));
        assert!(html.contains("<option value='archived' selected>"));
    }

    #[test]
    fn test_list_badges() {
        let html = render_fund_list(&[fund(FundStatus::Active)]);
        assert!(html.contains(">Aktif</span>"));
        assert!(html.contains("Perayaan Natal"));
        assert!(html.contains("hx-confirm='Hapus fund ini?'"));
    }
}
