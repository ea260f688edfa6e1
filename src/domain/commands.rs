use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MemberId;

/// コマンド：資料を借りる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowItem {
    pub member_id: MemberId,
    pub title: String,
    pub borrowed_at: DateTime<Utc>,
}

/// コマンド：資料を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnItem {
    pub member_id: MemberId,
    pub title: String,
    pub returned_at: DateTime<Utc>,
}
