use super::context::{push_history, RouterContext};
use super::navigator::RenderedPage;
use super::table::{PageKind, Params};
use crate::dashboards::d100_home::ui::{HomeDashboard, SavingsPage};
use crate::domain::a001_collection::ui::CollectionsPage;
use crate::domain::a002_ledger::ui::LedgerPage;
use crate::domain::a003_book::ui::{BookDetailPage, LibraryPage};
use crate::domain::a004_loan::ui::LoanPaymentPage;
use crate::domain::a005_chat::ui::ChatWidget;
use crate::layout::Shell;
use crate::shared::alert::AlertHost;
use leptos::prelude::*;

fn controller(kind: PageKind, params: &Params) -> AnyView {
    let param = |name: &str| params.get(name).cloned();
    match kind {
        PageKind::Home => view! { <HomeDashboard /> }.into_any(),
        PageKind::Collections => view! { <CollectionsPage collection=param("collection").unwrap_or_default() /> }.into_any(),
        PageKind::Management => view! { <LedgerPage /> }.into_any(),
        PageKind::Library => view! { <LibraryPage /> }.into_any(),
        PageKind::BookDetail => {
            view! { <BookDetailPage book_id=param("bookId").unwrap_or_default() /> }.into_any()
        }
        PageKind::LoanPayment => view! { <LoanPaymentPage /> }.into_any(),
        PageKind::Savings => view! { <SavingsPage /> }.into_any(),
    }
}

/// Template fragment followed by the page's controller.
#[component]
fn PageView(page: RenderedPage) -> impl IntoView {
    let body = page.page.map(|kind| controller(kind, &page.params));

    if page.push_history {
        let path = page.path.clone();
        // runs after the template and controller are mounted
        Effect::new(move |_| push_history(&path));
    }

    view! {
        <section class="page" data-path=page.path.clone()>
            <div class="page__template" inner_html=page.template_html></div>
            {body}
        </section>
    }
}

/// Content region; replaced wholesale on every rendered navigation.
#[component]
fn RouteOutlet() -> impl IntoView {
    let Some(router) = use_context::<RouterContext>() else {
        log::error!("RouteOutlet mounted without RouterContext");
        return view! { <></> }.into_any();
    };
    let page = router.page();

    view! {
        <main id="content" class="app-content">
            {move || page.get().map(|p| view! { <PageView page=p /> })}
        </main>
    }
    .into_any()
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Shell>
            <RouteOutlet />
        </Shell>
        <AlertHost />
        <ChatWidget />
    }
}
