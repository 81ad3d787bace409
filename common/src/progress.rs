//! 投票進捗の永続化
//!
//! ブラウザリロードをまたいで voteRecord を保持するための
//! キーバリュー永続化の抽象。実体は web-wasm 側の LocalStorage 実装と、
//! テスト用の MemoryStore。
//!
//! グループ自体は保存しない（セッション開始時に必ず再取得する）。
//! キーはアカウント別の名前空間を持たない単一の固定キーで、
//! 同一ブラウザ複数アカウントの混在は保証外。

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// LocalStorage上の固定キー
pub const PROGRESS_KEY: &str = "picvote_vote_progress";

/// 保存される進捗
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    #[serde(rename = "voteRecord")]
    pub vote_record: Vec<String>,
}

/// 進捗の保存先
///
/// 状態機械からは必ずこの trait 経由でアクセスする。
/// LocalStorage を直接触るのは web-wasm 側の実装のみ。
pub trait ProgressStore {
    /// 進捗を上書き保存する。書込み失敗は呼び出し側へ伝播しない
    fn save(&self, progress: &SavedProgress);

    /// 保存済み進捗を読む。キー欠落・パース失敗はどちらも None
    fn load(&self) -> Option<SavedProgress>;

    /// キーを削除する。送信成功後に一度だけ呼ばれる
    fn clear(&self);
}

/// テスト用のインメモリ実装
///
/// 実装と同じく JSON 文字列を経由させ、シリアライズ経路ごと検証できるようにする
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されている生のJSON文字列
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// 生の文字列を直接書き込む（破損データの再現用）
    pub fn set_raw(&self, value: &str) {
        *self.slot.borrow_mut() = Some(value.to_string());
    }
}

impl ProgressStore for MemoryStore {
    fn save(&self, progress: &SavedProgress) {
        if let Ok(json) = serde_json::to_string(progress) {
            *self.slot.borrow_mut() = Some(json);
        }
    }

    fn load(&self) -> Option<SavedProgress> {
        self.slot
            .borrow()
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}
