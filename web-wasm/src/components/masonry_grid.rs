//! メイソンリーグリッド
//!
//! コンテナ幅からカラム数を決め、picvote_common::masonry::assign の
//! 結果どおりにカードを並べる。カードの高さは描画後に測って報告し、
//! 割付はそのたびに最初から再計算される（高さ判明に伴うカラムの
//! 移動は許容される見た目の揺れ）

use leptos::html::Div;
use leptos::prelude::*;
use picvote_common::api::ImageRecord;
use picvote_common::masonry::{self, MasonryState, COLUMN_WIDTH_PX};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// 画像配信のベースパス
const IMAGE_BASE: &str = "/images";

#[component]
pub fn MasonryGrid(items: Signal<Vec<ImageRecord>>) -> impl IntoView {
    let container = NodeRef::<Div>::new();
    let (columns, set_columns) = signal(1usize);
    let (layout, set_layout) = signal(MasonryState::new());

    // マウント時とウィンドウリサイズでカラム数を再計算する
    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };

        // resize リスナーはアンマウント後も残るため try_set で吸収する
        let measure = move || {
            let width = el.get_bounding_client_rect().width();
            let _ = set_columns.try_set(masonry::column_count(width, COLUMN_WIDTH_PX));
        };
        measure();

        let on_resize = Closure::<dyn FnMut()>::new(measure);
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
        on_resize.forget();
    });

    // 割付は純関数の再計算。Memo なので同値なら再描画されない
    let assignment = Memo::new(move |_| {
        let count = items.with(|v| v.len());
        layout.with(|state| masonry::assign(count, columns.get(), state.heights()))
    });

    view! {
        <div class="masonry" node_ref=container>
            {move || {
                let current = items.get();
                assignment
                    .get()
                    .into_iter()
                    .map(|indices| {
                        let cards = indices
                            .into_iter()
                            .filter_map(|index| {
                                current.get(index).cloned().map(|record| {
                                    view! {
                                        <MasonryCard
                                            index=index
                                            record=record
                                            layout=layout
                                            set_layout=set_layout
                                        />
                                    }
                                })
                            })
                            .collect_view();
                        view! { <div class="masonry-column">{cards}</div> }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn MasonryCard(
    index: usize,
    record: ImageRecord,
    layout: ReadSignal<MasonryState>,
    set_layout: WriteSignal<MasonryState>,
) -> impl IntoView {
    let node = NodeRef::<Div>::new();

    // 同値の再報告ではシグナルに触れない。高さ報告は描画から
    // 発火するため、ここで止めないと再描画ループになる
    let report = move || {
        let Some(el) = node.get_untracked() else {
            return;
        };
        let height = el.get_bounding_client_rect().height();
        let unchanged = layout.with_untracked(|state| state.height(index) == height);
        if !unchanged {
            set_layout.update(|state| {
                state.report_height(index, height);
            });
        }
    };

    // マウント直後に一度測る（キャッシュ済み画像は load が来ないことがある）
    Effect::new(move |_| {
        if node.get().is_some() {
            report();
        }
    });

    let src = record.display_url(IMAGE_BASE);

    view! {
        <div class="masonry-card" node_ref=node>
            <img src=src alt=record.title.clone() on:load=move |_| report() />
            <div class="card-info">
                <h4>{record.title.clone()}</h4>
                <span class="card-author">{record.author.clone()}</span>
            </div>
        </div>
    }
}
