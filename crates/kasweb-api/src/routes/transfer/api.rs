//! Transfer submission

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use kasweb_core::forms::TransferForm;

use super::page::render_method_pair;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::{with_notice, AppState};

/// Method selects with source and destination exchanged
pub async fn htmx_transfer_swap(Query(form): Query<TransferForm>) -> Html<String> {
    Html(render_method_pair(&form.swapped()))
}

/// Record both halves of a transfer, outgoing first
///
/// Nothing is undone when the second half fails; the message says which
/// half is already recorded.
pub async fn transfer_submit(
    state: State<AppState>,
    session: Session,
    Form(form): Form<TransferForm>,
) -> ApiResult<Redirect> {
    let plan = form.plan()?;
    let from = plan.outgoing.payment_method.name();
    let to = plan.incoming.payment_method.name();
    let client = session.client(&state);

    client
        .create_transaction(&plan.outgoing)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal melakukan transfer"))?;

    client.create_transaction(&plan.incoming).await.map_err(|e| {
        log::error!("Transfer {} -> {} recorded only its outgoing half: {}", from, to, e);
        match ApiError::backend(e, "Gagal melakukan transfer") {
            ApiError::Backend { status, message } => ApiError::Backend {
                status,
                message: format!(
                    "Pengeluaran dari {} sudah tercatat, tetapi pemasukan ke {} gagal: {}",
                    from, to, message
                ),
            },
            other => other,
        }
    })?;

    log::info!(
        "Transfer of {} from {} to {} by {}",
        plan.outgoing.amount,
        from,
        to,
        session.display_name()
    );
    Ok(Redirect::to(&with_notice("/dashboard/transactions", "Transfer berhasil!")))
}
