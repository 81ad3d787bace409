//! メインアプリケーションコンポーネント

use leptos::prelude::*;

use crate::components::{gallery::Gallery, notification::Notification, vote_panel::VotePanel};

/// 表示中のページ
#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Gallery,
    Vote,
}

#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::Gallery);
    let (notice, set_notice) = signal(None::<String>);

    view! {
        <div class="container">
            <header class="app-header">
                <h1>"picvote"</h1>
                <nav>
                    <button
                        class:active=move || page.get() == Page::Gallery
                        on:click=move |_| set_page.set(Page::Gallery)
                    >
                        "ギャラリー"
                    </button>
                    <button
                        class:active=move || page.get() == Page::Vote
                        on:click=move |_| set_page.set(Page::Vote)
                    >
                        "投票"
                    </button>
                </nav>
            </header>

            <Notification message=notice set_message=set_notice />

            <Show when=move || page.get() == Page::Gallery>
                <Gallery set_notice=set_notice />
            </Show>
            <Show when=move || page.get() == Page::Vote>
                <VotePanel set_notice=set_notice />
            </Show>
        </div>
    }
}
