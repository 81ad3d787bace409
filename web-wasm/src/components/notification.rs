//! 通知トースト
//!
//! 一時的で閉じられる通知。モーダルでユーザ操作を塞がない

use leptos::prelude::*;

#[component]
pub fn Notification(
    message: ReadSignal<Option<String>>,
    set_message: WriteSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="notification">
                <span class="notification-text">
                    {move || message.get().unwrap_or_default()}
                </span>
                <button
                    class="notification-close"
                    on:click=move |_| set_message.set(None)
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
