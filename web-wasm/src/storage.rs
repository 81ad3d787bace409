//! LocalStorage による投票進捗の永続化
//!
//! 固定キー1本のグローバルなスロット。複数タブ同時投票は
//! 後勝ちになるが、単一タブ利用を前提として許容する

use gloo::console::warn;
use gloo::storage::{LocalStorage, Storage};
use picvote_common::progress::{ProgressStore, SavedProgress, PROGRESS_KEY};

/// ブラウザ LocalStorage 実装
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProgressStore;

impl ProgressStore for LocalProgressStore {
    fn save(&self, progress: &SavedProgress) {
        // 容量超過などの書込み失敗はセッション継続を優先して飲み込む
        // （リロード後に復元できなくなるだけ）
        if let Err(err) = LocalStorage::set(PROGRESS_KEY, progress) {
            warn!(format!("進捗の保存に失敗: {}", err));
        }
    }

    fn load(&self) -> Option<SavedProgress> {
        // キー欠落もパース失敗も「保存なし」として扱う
        LocalStorage::get::<SavedProgress>(PROGRESS_KEY).ok()
    }

    fn clear(&self) {
        LocalStorage::delete(PROGRESS_KEY);
    }
}
