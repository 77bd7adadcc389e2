use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: Signal<String>,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    // Escape closes; the listener goes away with the modal
    let keydown = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || keydown.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" role="dialog" aria-modal="true" on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" title="Đóng" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Yes/no confirmation before a destructive action.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] message: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    /// Disables the confirm button while the action runs
    #[prop(into, optional)]
    busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <Modal title="Xác nhận".to_string() on_close=on_cancel>
            <p class="confirm-message">{message}</p>
            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Hủy"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=busy
                    on_click=move |_| on_confirm.run(())
                >
                    {move || if busy.get() { "Đang xóa..." } else { "Xóa" }}
                </Button>
            </div>
        </Modal>
    }
}
