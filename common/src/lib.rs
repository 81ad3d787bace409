//! picvote Common Library
//!
//! WebシェルとネイティブテストでUI非依存のコアを共有する:
//! - session: 投票セッション状態機械
//! - progress: 投票進捗の永続化（LocalStorage抽象）
//! - masonry: メイソンリーレイアウト割付
//! - feed: ギャラリーフィードとページング制御
//! - api: バックエンドAPI境界型

pub mod api;
pub mod error;
pub mod feed;
pub mod masonry;
pub mod progress;
pub mod session;

pub use api::{ImageRecord, SubmitRequest, VoteGroupsResponse};
pub use error::{Error, Result};
pub use feed::{FeedError, FeedState, FetchOutcome};
pub use masonry::MasonryState;
pub use progress::{MemoryStore, ProgressStore, SavedProgress, PROGRESS_KEY};
pub use session::{VoteOutcome, VotePhase, VoteSession};
