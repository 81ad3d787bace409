//! バックエンドAPI境界型
//!
//! レスポンスの形状はすべて明示的な型へデコードし、
//! ステータス文字列は FetchOutcome のタグ付き判別へ変換する。

use crate::feed::FetchOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 成功ステータス
pub const STATUS_SUCCESS: &str = "success";
/// 結果0件ステータス（エラーとは区別される）
pub const STATUS_NO_RESULT: &str = "no result";

/// 投票グループ取得のレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteGroupsResponse {
    /// ラウンドごとの選択肢ID列
    pub vote_list: Vec<Vec<String>>,

    /// ID → 拡張子（表示URL構築用）
    #[serde(default)]
    pub ext_info: HashMap<String, String>,

    /// サーバ側の記録。クライアントではローカル進捗で上書きするため読まない
    #[serde(default)]
    pub vote_record: Vec<String>,

    #[serde(default)]
    pub vote_count: u32,
}

/// 投票済み確認のレスポンス
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FinishedResponse {
    pub finished: bool,
}

/// 投票送信のリクエストボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitRequest {
    pub record: Vec<String>,
}

/// 投票送信のレスポンス
///
/// HTTPレベルが200でも status が "success" 以外なら失敗扱い
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// キーワード検索のリクエスト
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub keyword: String,
}

/// ランダム・追加読込のリクエスト
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountRequest {
    pub count: u32,
}

/// ギャラリーの画像1件
///
/// レイアウト・ページングが要求するのは安定した id のみ。
/// 残りは表示層がそのまま使う
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,

    #[serde(default)]
    pub ext: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,
}

impl ImageRecord {
    /// 表示URLを組み立てる。拡張子不明時は jpg を仮定
    pub fn display_url(&self, base: &str) -> String {
        let ext = if self.ext.is_empty() { "jpg" } else { &self.ext };
        format!("{}/{}.{}", base, self.id, ext)
    }
}

/// 画像一覧エンドポイントのレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct ImageListResponse {
    pub status: String,

    #[serde(default)]
    pub data: Vec<ImageRecord>,
}

impl ImageListResponse {
    /// ステータス文字列をタグ付き判別へ変換する
    pub fn into_outcome(self) -> FetchOutcome<ImageRecord> {
        match self.status.as_str() {
            STATUS_SUCCESS => FetchOutcome::Items(self.data),
            STATUS_NO_RESULT => FetchOutcome::NoResult,
            other => FetchOutcome::Failed(format!("status: {}", other)),
        }
    }
}

/// ID と ext_info から表示URLを組み立てる（投票ページ用）
pub fn display_url(base: &str, id: &str, ext_info: &HashMap<String, String>) -> String {
    match ext_info.get(id) {
        Some(ext) => format!("{}/{}.{}", base, id, ext),
        None => format!("{}/{}.jpg", base, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_groups_response_deserialize() {
        let json = r#"{
            "vote_list": [["a", "b"], ["c", "d"]],
            "ext_info": {"a": "png", "b": "jpg"},
            "vote_record": ["a"],
            "vote_count": 1
        }"#;

        let resp: VoteGroupsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.vote_list.len(), 2);
        assert_eq!(resp.vote_list[0], vec!["a", "b"]);
        assert_eq!(resp.ext_info.get("a").map(String::as_str), Some("png"));
        assert_eq!(resp.vote_count, 1);
    }

    #[test]
    fn test_vote_groups_response_missing_optional_fields() {
        let json = r#"{"vote_list": [["a", "b"]]}"#;
        let resp: VoteGroupsResponse = serde_json::from_str(json).unwrap();
        assert!(resp.ext_info.is_empty());
        assert!(resp.vote_record.is_empty());
        assert_eq!(resp.vote_count, 0);
    }

    #[test]
    fn test_submit_request_serialize() {
        let request = SubmitRequest {
            record: vec!["b".to_string(), "c".to_string(), "e".to_string()],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"record":["b","c","e"]}"#);
    }

    #[test]
    fn test_submit_response_status() {
        let ok: SubmitResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(ok.is_success());

        let ng: SubmitResponse = serde_json::from_str(r#"{"status": "forbidden"}"#).unwrap();
        assert!(!ng.is_success());
    }

    #[test]
    fn test_image_list_into_outcome_success() {
        let json = r#"{"status": "success", "data": [{"id": "p1", "ext": "png"}]}"#;
        let resp: ImageListResponse = serde_json::from_str(json).unwrap();
        match resp.into_outcome() {
            FetchOutcome::Items(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].id, "p1");
            }
            other => panic!("Items を期待: {:?}", other),
        }
    }

    #[test]
    fn test_image_list_into_outcome_no_result() {
        let json = r#"{"status": "no result"}"#;
        let resp: ImageListResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(resp.into_outcome(), FetchOutcome::NoResult));
    }

    #[test]
    fn test_image_list_into_outcome_other_status_is_failure() {
        let json = r#"{"status": "unauthorized", "data": []}"#;
        let resp: ImageListResponse = serde_json::from_str(json).unwrap();
        match resp.into_outcome() {
            FetchOutcome::Failed(msg) => assert!(msg.contains("unauthorized")),
            other => panic!("Failed を期待: {:?}", other),
        }
    }

    #[test]
    fn test_image_record_display_url() {
        let record = ImageRecord {
            id: "abc".to_string(),
            ext: "webp".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_url("/images"), "/images/abc.webp");

        let no_ext = ImageRecord {
            id: "def".to_string(),
            ..Default::default()
        };
        assert_eq!(no_ext.display_url("/images"), "/images/def.jpg");
    }

    #[test]
    fn test_display_url_from_ext_info() {
        let mut ext_info = HashMap::new();
        ext_info.insert("a".to_string(), "png".to_string());

        assert_eq!(display_url("/images", "a", &ext_info), "/images/a.png");
        assert_eq!(display_url("/images", "b", &ext_info), "/images/b.jpg");
    }
}
