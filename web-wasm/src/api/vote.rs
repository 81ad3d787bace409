//! 投票エンドポイント

use picvote_common::api::{FinishedResponse, SubmitRequest, SubmitResponse, VoteGroupsResponse};
use picvote_common::{Error, Result};

const GROUPS_URL: &str = "/api/vote/groups";
const FINISHED_URL: &str = "/api/vote/finished";
const SUBMIT_URL: &str = "/api/vote/submit";

/// 投票グループ一覧を取得する
///
/// レスポンス中の vote_record / vote_count はローカル進捗で
/// 上書きするため呼び出し側では使わない
pub async fn fetch_groups() -> Result<VoteGroupsResponse> {
    super::get_json(GROUPS_URL).await
}

/// このユーザが既に投票を完了しているか
pub async fn fetch_finished() -> Result<bool> {
    let resp: FinishedResponse = super::get_json(FINISHED_URL).await?;
    Ok(resp.finished)
}

/// 投票結果を送信する
///
/// HTTPが200でも status が "success" 以外なら失敗
pub async fn submit(request: &SubmitRequest) -> Result<()> {
    let resp: SubmitResponse = super::post_json(SUBMIT_URL, request).await?;
    if resp.is_success() {
        Ok(())
    } else {
        Err(Error::Api(format!("submit status: {}", resp.status)))
    }
}
