//! ギャラリーページ
//!
//! 検索・ランダムはフルリロード（リスト置換）、番兵の到達は
//! 追加読込（末尾追記）。重複リクエストの抑止と古い応答の破棄は
//! FeedState に委ねる

use leptos::prelude::*;
use picvote_common::api::ImageRecord;
use picvote_common::feed::{FeedState, FetchOutcome};
use wasm_bindgen_futures::spawn_local;

use crate::api::images::{self, BATCH_SIZE};
use crate::components::masonry_grid::MasonryGrid;
use crate::components::scroll_sentinel::ScrollSentinel;

type Feed = FeedState<ImageRecord>;

fn begin_reload(set_feed: WriteSignal<Feed>) -> u64 {
    let mut generation = 0;
    set_feed.update(|feed| generation = feed.begin_reload());
    generation
}

// 完了時にはコンポーネントが破棄済みのことがあるため try_update を使う
// （リクエスト自体はキャンセルしない）
fn finish_reload(
    set_feed: WriteSignal<Feed>,
    set_notice: WriteSignal<Option<String>>,
    generation: u64,
    outcome: FetchOutcome<ImageRecord>,
) {
    let surfaced = set_feed
        .try_update(|feed| feed.complete_reload(generation, outcome))
        .flatten();
    if let Some(error) = surfaced {
        set_notice.set(Some(error.to_string()));
    }
}

fn finish_load_more(
    set_feed: WriteSignal<Feed>,
    set_notice: WriteSignal<Option<String>>,
    generation: u64,
    outcome: FetchOutcome<ImageRecord>,
) {
    let surfaced = set_feed
        .try_update(|feed| feed.complete_load_more(generation, outcome))
        .flatten();
    if let Some(error) = surfaced {
        set_notice.set(Some(error.to_string()));
    }
}

#[component]
pub fn Gallery(set_notice: WriteSignal<Option<String>>) -> impl IntoView {
    let (feed, set_feed) = signal(Feed::new());
    let (keyword, set_keyword) = signal(String::new());

    let start_search = move || {
        let word = keyword.get_untracked();
        let generation = begin_reload(set_feed);
        spawn_local(async move {
            let outcome = images::search(&word).await;
            finish_reload(set_feed, set_notice, generation, outcome);
        });
    };

    let start_random = move || {
        let generation = begin_reload(set_feed);
        spawn_local(async move {
            let outcome = images::random(BATCH_SIZE).await;
            finish_reload(set_feed, set_notice, generation, outcome);
        });
    };

    let on_reach_end = move || {
        // 読込中の発火はここで無視される。オブザーバはアンマウント後も
        // 生きているため try_update で破棄済みアクセスも吸収する
        let Some(generation) = set_feed
            .try_update(|feed| feed.begin_load_more())
            .flatten()
        else {
            return;
        };
        spawn_local(async move {
            let outcome = images::more(BATCH_SIZE).await;
            finish_load_more(set_feed, set_notice, generation, outcome);
        });
    };

    // 初回ロードはランダム取得
    Effect::new(move |previous: Option<()>| {
        if previous.is_none() {
            start_random();
        }
    });

    let busy = move || feed.with(|f| f.is_loading());

    view! {
        <section class="gallery">
            <div class="gallery-toolbar">
                <input
                    type="text"
                    class="search-input"
                    placeholder="キーワード検索"
                    prop:value=keyword
                    on:input=move |ev| set_keyword.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            start_search();
                        }
                    }
                />
                <button class="btn" on:click=move |_| start_search() disabled=busy>
                    "検索"
                </button>
                <button class="btn btn-secondary" on:click=move |_| start_random() disabled=busy>
                    "ランダム"
                </button>
            </div>

            <Show when=busy>
                <p class="loading">"読み込み中..."</p>
            </Show>

            <MasonryGrid items=Signal::derive(move || feed.with(|f| f.items().to_vec())) />

            <Show when=move || feed.with(|f| f.is_loading_more())>
                <p class="loading-more">"さらに読み込み中..."</p>
            </Show>

            <ScrollSentinel on_reach=on_reach_end />
        </section>
    }
}
