use crate::config::AppConfig;
use crate::dashboards::d100_home::api::{fetch_loan_page, fetch_loan_payments};
use crate::shared::api::ApiClient;
use crate::shared::api_utils::PageQuery;
use crate::shared::components::data_table::row_class;
use crate::shared::components::pagination_controls::{CursorPager, PaginationControls};
use crate::shared::error::{commit, commit_update};
use crate::shared::format::{format_currency, format_date};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::domain::a004_loan::{Loan, LoanPayment};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, PartialEq)]
struct PaymentsView {
    loan_id: String,
    borrower: String,
    /// `None` while loading.
    payments: Option<Vec<LoanPayment>>,
}

impl PaymentsView {
    fn loading(loan: &Loan) -> Self {
        Self {
            loan_id: loan.id.clone(),
            borrower: loan.borrower_name.clone(),
            payments: None,
        }
    }

    /// Applies a fetch result for `loan_id`. The modal closes on failure;
    /// results for a loan that is no longer shown are dropped.
    fn settle(opened: &mut Option<Self>, loan_id: &str, payments: Option<Vec<LoanPayment>>) {
        if opened.as_ref().map(|v| v.loan_id.as_str()) != Some(loan_id) {
            return;
        }
        match payments {
            Some(payments) => {
                if let Some(view) = opened {
                    view.payments = Some(payments);
                }
            }
            None => *opened = None,
        }
    }
}

/// Loans with cursor pagination and a payment-history modal.
#[component]
pub fn LoansTable() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let page_size = expect_context::<AppConfig>().loan_page_size;

    let pager = RwSignal::new(CursorPager::new(page_size));
    let loans = RwSignal::new(Vec::<Loan>::new());
    let loading = RwSignal::new(false);
    let history = RwSignal::new(None::<PaymentsView>);

    let load_page = Callback::new({
        let api = api.clone();
        move |page: usize| {
            let Some(req) = pager.get_untracked().request(page) else {
                log::warn!("loan page {} requested before its cursor is known", page);
                return;
            };
            loading.set(true);
            let api = api.clone();
            spawn_local(async move {
                let query = PageQuery {
                    page_size,
                    start_after: req.start_after.clone(),
                };
                if let Ok(result) = fetch_loan_page(&api, &query).await {
                    let rows = result.data.len();
                    commit_update(pager, "loans table", |p| {
                        p.record(req.page, rows, result.last_doc_id.clone(), result.total_pages, None)
                    });
                    commit(loans, result.data, "loans table");
                }
                commit(loading, false, "loans table");
            });
        }
    });
    load_page.run(1);

    let open_history = Callback::new(move |loan: Loan| {
        history.set(Some(PaymentsView::loading(&loan)));
        let api = api.clone();
        spawn_local(async move {
            let payments = fetch_loan_payments(&api, &loan.id).await.ok();
            commit_update(history, "payments modal", |h| {
                PaymentsView::settle(h, &loan.id, payments)
            });
        });
    });

    let offset = move || (pager.get().current() - 1) * page_size;

    view! {
        <div class="loans">
            <div class="table-wrapper">
                <table class="table loan-table" id="loan-table">
                    <thead>
                        <tr>
                            <th class="table__header">"Người vay"</th>
                            <th class="table__header">"Số tiền gốc"</th>
                            <th class="table__header">"Kỳ hạn"</th>
                            <th class="table__header">"Ngày bắt đầu"</th>
                            <th class="table__header">"Dư nợ"</th>
                            <th class="table__header">"Lịch sử"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = loans.get();
                            if rows.is_empty() && !loading.get() {
                                return view! {
                                    <tr><td colspan="6" class="table__cell table__cell--center">"Không có khoản vay nào."</td></tr>
                                }.into_any();
                            }
                            let start = offset();
                            rows.into_iter()
                                .enumerate()
                                .map(|(i, loan)| {
                                    let for_history = loan.clone();
                                    view! {
                                        <tr class=row_class(start + i) data-id=loan.id.clone()>
                                            <td class="table__cell">{loan.borrower_name.clone()}</td>
                                            <td class="table__cell table__cell--number">{format_currency(loan.principal_amount)}</td>
                                            <td class="table__cell">{loan.term.clone()}</td>
                                            <td class="table__cell">{loan.start_date.as_deref().map(format_date).unwrap_or_default()}</td>
                                            <td class="table__cell table__cell--number">{format_currency(loan.outstanding)}</td>
                                            <td class="table__cell table__cell--center">
                                                <button
                                                    class="button button--icon"
                                                    title="Xem lịch sử trả"
                                                    on:click=move |_| open_history.run(for_history.clone())
                                                >
                                                    {icon("eye")}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </div>
            <PaginationControls pager=pager on_page_change=load_page disabled=loading />

            {move || history.get().map(|opened| {
                let title = format!("Lịch sử trả nợ: {}", opened.borrower);
                view! {
                    <Modal title=title on_close=Callback::new(move |_| history.set(None))>
                        {match opened.payments {
                            None => view! { <div class="modal-loading"><Spinner /></div> }.into_any(),
                            Some(payments) => view! { <PaymentsTable payments=payments /> }.into_any(),
                        }}
                    </Modal>
                }
            })}
        </div>
    }
}

#[component]
fn PaymentsTable(payments: Vec<LoanPayment>) -> impl IntoView {
    view! {
        <table class="table payments-table">
            <thead>
                <tr>
                    <th class="table__header">"Ngày trả"</th>
                    <th class="table__header">"Gốc"</th>
                    <th class="table__header">"Lãi"</th>
                    <th class="table__header">"Tổng"</th>
                </tr>
            </thead>
            <tbody>
                {if payments.is_empty() {
                    view! {
                        <tr><td colspan="4" class="table__cell table__cell--center">
                            "Không có lịch sử trả lãi cho khoản vay này."
                        </td></tr>
                    }.into_any()
                } else {
                    payments
                        .into_iter()
                        .enumerate()
                        .map(|(i, p)| view! {
                            <tr class=row_class(i)>
                                <td class="table__cell">{p.paid_date.as_deref().map(format_date).unwrap_or_default()}</td>
                                <td class="table__cell table__cell--number">{format_currency(p.principal_paid)}</td>
                                <td class="table__cell table__cell--number">{format_currency(p.interest_paid)}</td>
                                <td class="table__cell table__cell--number">{format_currency(p.total_paid)}</td>
                            </tr>
                        })
                        .collect_view()
                        .into_any()
                }}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(id: &str, borrower: &str) -> Loan {
        Loan {
            id: id.into(),
            borrower_name: borrower.into(),
            principal_amount: 50_000_000.0,
            term: "12 tháng".into(),
            start_date: Some("2024-01-15".into()),
            outstanding: 30_000_000.0,
        }
    }

    fn payment(total: f64) -> LoanPayment {
        LoanPayment {
            paid_date: Some("2024-03-15".into()),
            principal_paid: total,
            interest_paid: 0.0,
            total_paid: total,
        }
    }

    #[test]
    fn late_payments_do_not_land_in_another_loans_modal() {
        // A's modal was closed and B's opened before A's request settled
        let mut opened = Some(PaymentsView::loading(&loan("b", "Chị Lan")));

        PaymentsView::settle(&mut opened, "a", Some(vec![payment(1.0)]));
        assert_eq!(opened.as_ref().and_then(|v| v.payments.clone()), None);

        PaymentsView::settle(&mut opened, "a", None);
        assert!(opened.is_some());

        PaymentsView::settle(&mut opened, "b", Some(vec![payment(2_000_000.0)]));
        let view = opened.unwrap();
        assert_eq!(view.borrower, "Chị Lan");
        assert_eq!(view.payments, Some(vec![payment(2_000_000.0)]));
    }

    #[test]
    fn failed_fetch_closes_its_own_modal() {
        let mut opened = Some(PaymentsView::loading(&loan("a", "Anh Minh")));
        PaymentsView::settle(&mut opened, "a", None);
        assert!(opened.is_none());
    }
}
