//! ギャラリーフィードとページング制御
//!
//! 読込には二系統ある:
//! - フルリロード（検索・ランダム・初回）: リストを置き換える
//! - 追加読込（無限スクロール）: 末尾へ追記する
//!
//! loading / loadingMore の二つのフラグが重複リクエストの唯一のガード。
//! 番兵のオブザーバは読込中にも発火し続けるため、その間の発火は
//! すべて無視しなければならない。
//!
//! リクエストのキャンセルは行わない。代わりにフルリロードごとに
//! 世代番号を進め、古い世代の完了は結果の適用段階で破棄する。

use thiserror::Error;

/// 取得結果のタグ付き判別
///
/// 結果0件はエラーと区別して扱う（既存リストを壊さない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    Items(Vec<T>),
    NoResult,
    Failed(String),
}

/// ユーザへ提示するフィードの失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("検索結果がありません")]
    NoResult,

    #[error("読み込みに失敗しました: {0}")]
    Failed(String),
}

/// フィードの状態
#[derive(Debug, Clone, Default)]
pub struct FeedState<T> {
    items: Vec<T>,
    loading: bool,
    loading_more: bool,
    generation: u64,
    error: Option<FeedError>,
}

impl<T> FeedState<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loading_more: false,
            generation: 0,
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn error(&self) -> Option<&FeedError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// フルリロードを開始する
    ///
    /// 世代を進めるため、飛行中だった旧世代の応答は適用時に破棄される。
    /// 追加読込フラグも降ろす（結果は世代不一致で捨てられる）
    pub fn begin_reload(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.loading_more = false;
        self.error = None;
        self.generation
    }

    /// 追加読込を開始する
    ///
    /// いずれかの読込が飛行中なら None（発火は無視される）
    pub fn begin_load_more(&mut self) -> Option<u64> {
        if self.loading || self.loading_more {
            return None;
        }
        self.loading_more = true;
        Some(self.generation)
    }

    /// フルリロードの完了を適用する
    ///
    /// 世代が現行でなければ何も変えずに None。
    /// 表示すべき失敗があればそれを返す
    pub fn complete_reload(
        &mut self,
        generation: u64,
        outcome: FetchOutcome<T>,
    ) -> Option<FeedError> {
        if generation != self.generation {
            return None;
        }
        self.loading = false;
        self.apply(outcome, true)
    }

    /// 追加読込の完了を適用する
    pub fn complete_load_more(
        &mut self,
        generation: u64,
        outcome: FetchOutcome<T>,
    ) -> Option<FeedError> {
        if generation != self.generation {
            return None;
        }
        self.loading_more = false;
        self.apply(outcome, false)
    }

    fn apply(&mut self, outcome: FetchOutcome<T>, replace: bool) -> Option<FeedError> {
        match outcome {
            FetchOutcome::Items(mut new_items) => {
                if replace {
                    self.items = new_items;
                } else {
                    self.items.append(&mut new_items);
                }
                self.error = None;
                None
            }
            FetchOutcome::NoResult => {
                // 既存リストは保持したまま明示的に知らせる
                let error = FeedError::NoResult;
                self.error = Some(error.clone());
                Some(error)
            }
            FetchOutcome::Failed(message) => {
                let error = FeedError::Failed(message);
                self.error = Some(error.clone());
                Some(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reload_replaces_items() {
        let mut feed = FeedState::new();
        let g1 = feed.begin_reload();
        feed.complete_reload(g1, FetchOutcome::Items(items(&["a", "b"])));

        let g2 = feed.begin_reload();
        feed.complete_reload(g2, FetchOutcome::Items(items(&["c"])));

        assert_eq!(feed.items(), &["c"]);
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_load_more_appends() {
        let mut feed = FeedState::new();
        let g = feed.begin_reload();
        feed.complete_reload(g, FetchOutcome::Items(items(&["a", "b"])));

        let g = feed.begin_load_more().unwrap();
        feed.complete_load_more(g, FetchOutcome::Items(items(&["c", "d"])));

        assert_eq!(feed.items(), &["a", "b", "c", "d"]);
        assert!(!feed.is_loading_more());
    }

    #[test]
    fn test_load_more_refused_while_in_flight() {
        let mut feed = FeedState::<String>::new();
        let g = feed.begin_reload();
        feed.complete_reload(g, FetchOutcome::Items(vec![]));

        // 解決しないフェッチの間、番兵が何度発火しても 1 件だけ
        let first = feed.begin_load_more();
        assert!(first.is_some());
        assert_eq!(feed.begin_load_more(), None);
        assert_eq!(feed.begin_load_more(), None);
    }

    #[test]
    fn test_load_more_refused_during_reload() {
        let mut feed = FeedState::<String>::new();
        feed.begin_reload();
        assert_eq!(feed.begin_load_more(), None);
    }

    #[test]
    fn test_stale_reload_response_discarded() {
        let mut feed = FeedState::new();
        let old = feed.begin_reload();
        // 前のリロードが未完のまま新しい検索が発行される
        let new = feed.begin_reload();

        // 遅れて届いた旧世代の応答は無視される
        assert_eq!(
            feed.complete_reload(old, FetchOutcome::Items(items(&["stale"]))),
            None
        );
        assert!(feed.items().is_empty());
        assert!(feed.is_loading());

        feed.complete_reload(new, FetchOutcome::Items(items(&["fresh"])));
        assert_eq!(feed.items(), &["fresh"]);
    }

    #[test]
    fn test_reload_supersedes_pending_load_more() {
        let mut feed = FeedState::new();
        let g = feed.begin_reload();
        feed.complete_reload(g, FetchOutcome::Items(items(&["a"])));

        let more_gen = feed.begin_load_more().unwrap();
        let reload_gen = feed.begin_reload();
        assert!(!feed.is_loading_more());

        // 追記は世代不一致で破棄され、リロード結果だけが残る
        feed.complete_load_more(more_gen, FetchOutcome::Items(items(&["late"])));
        feed.complete_reload(reload_gen, FetchOutcome::Items(items(&["b"])));
        assert_eq!(feed.items(), &["b"]);
    }

    #[test]
    fn test_no_result_preserves_items_and_surfaces_error() {
        let mut feed = FeedState::new();
        let g = feed.begin_reload();
        feed.complete_reload(g, FetchOutcome::Items(items(&["a", "b"])));

        let g = feed.begin_reload();
        let surfaced = feed.complete_reload(g, FetchOutcome::NoResult);

        assert_eq!(surfaced, Some(FeedError::NoResult));
        assert_eq!(feed.items(), &["a", "b"]);
        assert_eq!(feed.error(), Some(&FeedError::NoResult));
    }

    #[test]
    fn test_failure_leaves_list_unchanged() {
        let mut feed = FeedState::new();
        let g = feed.begin_reload();
        feed.complete_reload(g, FetchOutcome::Items(items(&["a"])));

        let g = feed.begin_load_more().unwrap();
        let surfaced = feed.complete_load_more(g, FetchOutcome::Failed("HTTP 500".into()));

        assert!(matches!(surfaced, Some(FeedError::Failed(_))));
        assert_eq!(feed.items(), &["a"]);
        // フラグは成功・失敗どちらでも必ず降りる
        assert!(!feed.is_loading_more());
        assert!(feed.begin_load_more().is_some());
    }

    #[test]
    fn test_begin_reload_clears_previous_error() {
        let mut feed = FeedState::<String>::new();
        let g = feed.begin_reload();
        feed.complete_reload(g, FetchOutcome::NoResult);
        assert!(feed.error().is_some());

        feed.begin_reload();
        assert_eq!(feed.error(), None);
    }

    #[test]
    fn test_dismiss_error() {
        let mut feed = FeedState::<String>::new();
        let g = feed.begin_reload();
        feed.complete_reload(g, FetchOutcome::Failed("x".into()));
        feed.dismiss_error();
        assert_eq!(feed.error(), None);
    }
}
