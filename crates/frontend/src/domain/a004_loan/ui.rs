//! `/loan-payment`.

use crate::domain::a004_loan::api::{fetch_loans, record_payment};
use crate::domain::a004_loan::model::{payment_total, PaymentDraft};
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::components::ui::{Input, Select};
use crate::shared::error::commit;
use crate::shared::format::{format_currency, today_ymd};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn LoanPaymentPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<AlertService>();

    let loans = RwSignal::new(Vec::<(String, String)>::new());
    let loan_id = RwSignal::new(String::new());
    let payment_date = RwSignal::new(today_ymd());
    let principal = RwSignal::new(String::new());
    let interest = RwSignal::new(String::new());
    let saving = RwSignal::new(false);

    {
        let api = api.silent();
        spawn_local(async move {
            match fetch_loans(&api).await {
                Ok(list) => {
                    let options = list.into_iter().map(|l| (l.id, l.borrower_name)).collect();
                    commit(loans, options, "loan select");
                }
                Err(err) => {
                    log::error!("loan list failed: {:?}", err);
                    alerts.error("Không thể tải danh sách khoản vay.");
                }
            }
        });
    }

    let total = Memo::new(move |_| payment_total(&principal.get(), &interest.get()));

    let submit = move || {
        let draft = PaymentDraft {
            loan_id: loan_id.get_untracked(),
            payment_date: payment_date.get_untracked(),
            principal: principal.get_untracked(),
            interest: interest.get_untracked(),
        };
        let request = match draft.to_request() {
            Ok(request) => request,
            Err(err) => {
                alerts.error(err.to_string());
                return;
            }
        };
        saving.set(true);
        let api = api.clone();
        spawn_local(async move {
            let result = record_payment(&api, &request).await;
            if !commit(saving, false, "payment form") {
                return;
            }
            if result.is_ok() {
                alerts.success("Đã ghi nhận thanh toán thành công!");
                loan_id.set(String::new());
                principal.set(String::new());
                interest.set(String::new());
                payment_date.set(today_ymd());
            }
        });
    };
    let submit_form = submit.clone();

    view! {
        <form id="payment-form" class="form payment-form" on:submit=move |ev| {
            ev.prevent_default();
            submit_form();
        }>
            <Select
                label="Khoản vay"
                name="loan-select"
                value=loan_id
                options=loans
                placeholder="-- Chọn một khoản vay --"
                required=true
                disabled=saving
            />
            <Input label="Ngày trả" name="payment-date" input_type="date" value=payment_date required=true disabled=saving />
            <Input label="Tiền gốc đã trả" name="principal-paid" input_type="number" step="any" value=principal disabled=saving />
            <Input label="Tiền lãi đã trả" name="interest-paid" input_type="number" step="any" value=interest disabled=saving />
            <div class="form__group">
                <label class="form__label" for="total-amount">"Tổng cộng"</label>
                <input id="total-amount" class="form__input" readonly=true prop:value=move || format_currency(total.get()) />
            </div>
            <div class="form-actions">
                <Button appearance=ButtonAppearance::Primary disabled=saving on_click=move |_| submit()>
                    {move || if saving.get() { "Đang lưu..." } else { "Ghi nhận thanh toán" }}
                </Button>
            </div>
        </form>
    }
}
