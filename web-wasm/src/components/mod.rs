//! UIコンポーネント

pub mod gallery;
pub mod masonry_grid;
pub mod notification;
pub mod scroll_sentinel;
pub mod vote_panel;
