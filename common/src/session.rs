//! 投票セッション状態機械
//!
//! Loading → Voting → Submitting → Result のフロー。
//! 既に投票済みのユーザは AlreadyFinished 経由で直接 Result へ短絡する
//! （グループ取得は発行済みでも、以後のUIには影響しない）。
//!
//! voteCount と currentGroupIndex は voteRecord の長さから常に導出する。
//! currentGroupIndex == groups.len() がセッション完了を意味する。

use crate::api::SubmitRequest;
use crate::error::{Error, Result};
use crate::progress::{ProgressStore, SavedProgress};
use std::collections::HashMap;

/// 1ラウンド分の選択肢ID列
pub type Group = Vec<String>;

/// セッションのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotePhase {
    Loading,
    Voting,
    Submitting,
    Result,
}

/// handle_vote の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// 次のラウンドへ
    Continue,
    /// 全ラウンド完了。直ちに送信へ移る（確認ステップは挟まない）
    Complete,
}

/// 投票セッション
///
/// groups は取得後は不変。進捗の変更は必ず ProgressStore 経由で永続化する
#[derive(Debug, Clone, Default)]
pub struct VoteSession {
    groups: Vec<Group>,
    ext_info: HashMap<String, String>,
    vote_record: Vec<String>,
}

impl VoteSession {
    pub fn new(groups: Vec<Group>, ext_info: HashMap<String, String>) -> Self {
        Self {
            groups,
            ext_info,
            vote_record: Vec::new(),
        }
    }

    /// 保存済み進捗で voteRecord を上書きする
    ///
    /// 復元された記録がグループ数を超える場合は末尾を切り詰め、
    /// currentGroupIndex が [0, groups.len()] に収まることを保証する
    pub fn restore(&mut self, store: &dyn ProgressStore) {
        if let Some(saved) = store.load() {
            self.vote_record = saved.vote_record;
            self.vote_record.truncate(self.groups.len());
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn vote_record(&self) -> &[String] {
        &self.vote_record
    }

    /// 完了ラウンド数（voteRecord の長さと常に一致）
    pub fn vote_count(&self) -> usize {
        self.vote_record.len()
    }

    /// 次の未回答ラウンドの番号
    pub fn current_group_index(&self) -> usize {
        self.vote_record.len()
    }

    pub fn is_complete(&self) -> bool {
        self.current_group_index() == self.groups.len()
    }

    /// 現在のラウンドの選択肢。完了後は None
    pub fn current_group(&self) -> Option<&Group> {
        self.groups.get(self.current_group_index())
    }

    /// ID の拡張子（表示URL構築用）
    pub fn ext_info(&self) -> &HashMap<String, String> {
        &self.ext_info
    }

    /// 1ラウンド分の選択を記録する
    ///
    /// 選択IDが現在のグループに含まれない場合は拒否する。
    /// 記録後は直ちに永続化し、最終ラウンドなら Complete を返す
    pub fn handle_vote(
        &mut self,
        selected_id: &str,
        store: &dyn ProgressStore,
    ) -> Result<VoteOutcome> {
        let Some(group) = self.current_group() else {
            return Err(Error::SessionComplete);
        };
        if !group.iter().any(|id| id == selected_id) {
            return Err(Error::NotInGroup(selected_id.to_string()));
        }

        self.vote_record.push(selected_id.to_string());
        self.persist(store);

        if self.is_complete() {
            Ok(VoteOutcome::Complete)
        } else {
            Ok(VoteOutcome::Continue)
        }
    }

    /// 直前の選択を取り消す
    ///
    /// 記録が空のときは明示的に何もしない（エラーではない）。
    /// 取り消したかどうかを返す
    pub fn handle_undo(&mut self, store: &dyn ProgressStore) -> bool {
        if self.vote_record.pop().is_none() {
            return false;
        }
        self.persist(store);
        true
    }

    /// 送信ボディを組み立てる
    pub fn submit_request(&self) -> SubmitRequest {
        SubmitRequest {
            record: self.vote_record.clone(),
        }
    }

    /// 送信成功後の後始末。保存済み進捗を破棄する
    ///
    /// 送信失敗時には呼ばない（記録を失わず再送できるようにする）
    pub fn finish(&self, store: &dyn ProgressStore) {
        store.clear();
    }

    fn persist(&self, store: &dyn ProgressStore) {
        store.save(&SavedProgress {
            vote_record: self.vote_record.clone(),
        });
    }
}
