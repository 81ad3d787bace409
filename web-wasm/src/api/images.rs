//! 画像一覧エンドポイント
//!
//! 失敗はすべて FetchOutcome::Failed に畳み、呼び出し側の
//! フィード状態機械が一様に扱えるようにする

use picvote_common::api::{CountRequest, ImageListResponse, ImageRecord, SearchRequest};
use picvote_common::feed::FetchOutcome;

const SEARCH_URL: &str = "/api/images/search";
const RANDOM_URL: &str = "/api/images/random";
const MORE_URL: &str = "/api/images/more";

/// 追加読込・ランダム取得の固定バッチサイズ
pub const BATCH_SIZE: u32 = 20;

fn to_outcome(
    result: picvote_common::Result<ImageListResponse>,
) -> FetchOutcome<ImageRecord> {
    match result {
        Ok(resp) => resp.into_outcome(),
        Err(err) => FetchOutcome::Failed(err.to_string()),
    }
}

/// キーワード検索（フルリロード）
pub async fn search(keyword: &str) -> FetchOutcome<ImageRecord> {
    let body = SearchRequest {
        keyword: keyword.to_string(),
    };
    to_outcome(super::post_json(SEARCH_URL, &body).await)
}

/// ランダム取得（フルリロード）
pub async fn random(count: u32) -> FetchOutcome<ImageRecord> {
    to_outcome(super::post_json(RANDOM_URL, &CountRequest { count }).await)
}

/// 追加読込（末尾へ追記）
pub async fn more(count: u32) -> FetchOutcome<ImageRecord> {
    to_outcome(super::post_json(MORE_URL, &CountRequest { count }).await)
}
