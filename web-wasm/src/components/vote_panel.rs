//! 投票パネル
//!
//! Loading → Voting → Submitting → Result を駆動する。
//! マウント時に投票済み確認とグループ取得を並行して発行し、
//! 保存済み進捗があれば復元してそのラウンドから再開する。
//! グループ取得に失敗した場合はその場のエラー表示ではなく
//! 再認証フローへ遷移する

use gloo::console::warn;
use leptos::prelude::*;
use picvote_common::api::display_url;
use picvote_common::progress::ProgressStore;
use picvote_common::session::{VoteOutcome, VotePhase, VoteSession};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::storage::LocalProgressStore;

const IMAGE_BASE: &str = "/images";
const VERIFY_PATH: &str = "/verify";

fn redirect_to_verify() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(VERIFY_PATH) {
            warn!(format!("リダイレクトに失敗: {:?}", err));
        }
    }
}

#[component]
pub fn VotePanel(set_notice: WriteSignal<Option<String>>) -> impl IntoView {
    let (phase, set_phase) = signal(VotePhase::Loading);
    let (session, set_session) = signal(None::<VoteSession>);
    let (submit_failed, set_submit_failed) = signal(false);
    let (celebrate, set_celebrate) = signal(false);

    let start_submit = move || {
        let Some(request) = session.with_untracked(|slot| {
            slot.as_ref().map(|current| current.submit_request())
        }) else {
            return;
        };
        set_phase.set(VotePhase::Submitting);
        set_submit_failed.set(false);

        spawn_local(async move {
            match api::vote::submit(&request).await {
                Ok(()) => {
                    // 送信が受理されたら進捗ストアを破棄する
                    // （コンポーネントが破棄済みでもストアは消してよい）
                    LocalProgressStore.clear();
                    let _ = set_celebrate.try_set(true);
                    let _ = set_phase.try_set(VotePhase::Result);
                }
                Err(err) => {
                    // 記録とストアは破棄しない。完全な記録のまま再送できる
                    set_notice.set(Some(format!("送信に失敗しました: {}", err)));
                    let _ = set_submit_failed.try_set(true);
                }
            }
        });
    };

    // マウント時: 投票済み確認（Result への短絡）とグループ取得
    Effect::new(move |previous: Option<()>| {
        if previous.is_some() {
            return;
        }

        spawn_local(async move {
            match api::vote::fetch_finished().await {
                Ok(true) => {
                    let _ = set_phase.try_set(VotePhase::Result);
                }
                Ok(false) => {}
                // 確認に失敗しても投票フロー自体は止めない
                Err(err) => warn!(format!("投票済み確認に失敗: {}", err)),
            }
        });

        spawn_local(async move {
            match api::vote::fetch_groups().await {
                Ok(resp) => {
                    let mut fresh = VoteSession::new(resp.vote_list, resp.ext_info);
                    fresh.restore(&LocalProgressStore);
                    let already_complete = fresh.is_complete();
                    if set_session.try_set(Some(fresh)).is_some() {
                        // コンポーネントは破棄済み
                        return;
                    }

                    // 投票済み短絡で既に Result なら取得結果は表示に影響しない
                    if phase.try_get_untracked() == Some(VotePhase::Loading) {
                        set_phase.set(VotePhase::Voting);
                        if already_complete {
                            // 復元時点で全ラウンド回答済みなら直ちに送信へ
                            start_submit();
                        }
                    }
                }
                Err(err) => {
                    warn!(format!("グループ取得に失敗: {}", err));
                    redirect_to_verify();
                }
            }
        });
    });

    let on_vote = move |selected: String| {
        if phase.get_untracked() != VotePhase::Voting {
            return;
        }
        let mut outcome = None;
        set_session.update(|slot| {
            if let Some(current) = slot.as_mut() {
                match current.handle_vote(&selected, &LocalProgressStore) {
                    Ok(result) => outcome = Some(result),
                    // グループ外のIDは記録せず無視する
                    Err(err) => warn!(format!("投票を無視: {}", err)),
                }
            }
        });
        if outcome == Some(VoteOutcome::Complete) {
            start_submit();
        }
    };

    let on_undo = move |_| {
        set_session.update(|slot| {
            if let Some(current) = slot.as_mut() {
                current.handle_undo(&LocalProgressStore);
            }
        });
    };

    let undo_disabled = move || {
        session.with(|slot| {
            slot.as_ref()
                .map(|current| current.vote_count() == 0)
                .unwrap_or(true)
        })
    };

    let progress_label = move || {
        session.with(|slot| {
            slot.as_ref()
                .filter(|current| !current.is_complete())
                .map(|current| {
                    format!(
                        "ラウンド {} / {}",
                        current.current_group_index() + 1,
                        current.groups().len()
                    )
                })
                .unwrap_or_default()
        })
    };

    view! {
        <section class="vote-panel">
            <Show when=move || phase.get() == VotePhase::Loading>
                <p class="loading">"読み込み中..."</p>
            </Show>

            <Show when=move || phase.get() == VotePhase::Voting>
                <p class="vote-progress">{progress_label}</p>
                <div class="vote-choices">
                    {move || {
                        session.with(|slot| {
                            slot.as_ref()
                                .and_then(|current| {
                                    current.current_group().cloned().map(|group| {
                                        let ext_info = current.ext_info().clone();
                                        group
                                            .into_iter()
                                            .map(|id| {
                                                let src = display_url(IMAGE_BASE, &id, &ext_info);
                                                let choice = id.clone();
                                                view! {
                                                    <button
                                                        class="vote-choice"
                                                        on:click=move |_| on_vote(choice.clone())
                                                    >
                                                        <img src=src alt=id.clone() />
                                                    </button>
                                                }
                                            })
                                            .collect_view()
                                    })
                                })
                        })
                    }}
                </div>
                <button class="btn btn-secondary" on:click=on_undo disabled=undo_disabled>
                    "ひとつ戻す"
                </button>
            </Show>

            <Show when=move || phase.get() == VotePhase::Submitting>
                <Show
                    when=move || submit_failed.get()
                    fallback=|| view! { <p class="loading">"送信中..."</p> }
                >
                    <button class="btn" on:click=move |_| start_submit()>
                        "再送信"
                    </button>
                </Show>
            </Show>

            <Show when=move || phase.get() == VotePhase::Result>
                <div class="vote-result">
                    <h2>"投票ありがとうございました"</h2>
                </div>
                <Show when=move || celebrate.get()>
                    <div class="confetti">
                        {(0..24)
                            .map(|i| {
                                let style = format!(
                                    "left: {}%; animation-delay: {}ms",
                                    (i * 41) % 100,
                                    i * 80
                                );
                                view! { <span class="confetti-piece" style=style></span> }
                            })
                            .collect_view()}
                    </div>
                </Show>
            </Show>
        </section>
    }
}
