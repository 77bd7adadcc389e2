//! Floating chat panel, mounted once next to the content region.

use crate::domain::a005_chat::api::{fetch_history, send_message};
use crate::domain::a005_chat::model::{ChatState, HistoryState, Sender};
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::error::commit_update;
use crate::shared::icons::icon;
use leptos::{ev, html};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn ChatWidget() -> impl IntoView {
    let api = expect_context::<ApiClient>().silent();
    let alerts = expect_context::<AlertService>();

    let state = RwSignal::new(ChatState::default());
    let input = RwSignal::new(String::new());
    let history_ref = NodeRef::<html::Div>::new();
    let input_ref = NodeRef::<html::Input>::new();

    // keep the newest message in view
    Effect::new(move |_| {
        state.with(|s| s.messages().len());
        if let Some(el) = history_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let toggle = {
        let api = api.clone();
        move |_: ev::MouseEvent| {
            let load = state.try_update(|s| s.toggle()).unwrap_or(false);
            if !load {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match fetch_history(&api).await {
                    Ok(entries) => {
                        commit_update(state, "chat history", |s| s.history_loaded(entries));
                    }
                    Err(err) => {
                        log::error!("chat history failed: {:?}", err);
                        commit_update(state, "chat history", |s| s.history_failed());
                        alerts.error("Không thể tải lịch sử trò chuyện. Vui lòng làm mới trang.");
                    }
                }
            });
        }
    };

    let send = move || {
        let Some(text) = state.try_update(|s| s.begin_send(&input.get_untracked())).flatten() else {
            return;
        };
        input.set(String::new());
        let api = api.clone();
        spawn_local(async move {
            let result = send_message(&api, &text).await;
            commit_update(state, "chat reply", |s| s.finish_send(result));
            if let Some(el) = input_ref.get_untracked() {
                _ = el.focus();
            }
        });
    };
    let send_on_enter = send.clone();

    let busy = Memo::new(move |_| {
        state.with(|s| s.in_flight() || s.history() == HistoryState::Loading)
    });

    view! {
        <div class="chatbot">
            <button class="chatbot__toggle" title="Trợ lý tài chính" on:click=toggle.clone()>
                {icon("message-circle")}
            </button>
            <Show when=move || state.with(|s| s.is_open())>
                <div class="chatbot__panel" role="dialog" aria-label="Trợ lý tài chính">
                    <div class="chatbot__header">
                        <span>"Trợ lý tài chính"</span>
                        <button class="button button--icon" title="Đóng" on:click=toggle.clone()>
                            {icon("x")}
                        </button>
                    </div>
                    <div id="chat-history" class="chatbot__history" node_ref=history_ref>
                        <Show when=move || state.with(|s| s.history() == HistoryState::Loading)>
                            <p class="chatbot__hint">"Đang tải lịch sử trò chuyện..."</p>
                        </Show>
                        <For
                            each=move || state.with(|s| s.messages().to_vec())
                            key=|m| m.id
                            let:msg
                        >
                            <div class=match msg.sender {
                                Sender::User => "chat-message chat-message--user",
                                Sender::Bot => "chat-message chat-message--bot",
                            }>
                                <div class=if msg.is_error { "chat-bubble chat-bubble--error" } else { "chat-bubble" }>
                                    {msg.text.clone()}
                                </div>
                            </div>
                        </For>
                    </div>
                    <div class="chatbot__input">
                        <input
                            id="chat-input"
                            class="form__input"
                            placeholder="Nhập câu hỏi..."
                            node_ref=input_ref
                            prop:value=move || input.get()
                            disabled=move || busy.get()
                            on:input=move |ev| input.set(event_target_value(&ev))
                            on:keydown={
                                let send = send_on_enter.clone();
                                move |ev| {
                                    if ev.key() == "Enter" {
                                        ev.prevent_default();
                                        send();
                                    }
                                }
                            }
                        />
                        <button
                            id="chat-send-btn"
                            class="button button--primary"
                            title="Gửi"
                            disabled=move || busy.get()
                            on:click={
                                let send = send.clone();
                                move |_| send()
                            }
                        >
                            {icon("send")}
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
