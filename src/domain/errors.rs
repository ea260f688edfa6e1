use thiserror::Error;

/// 貸出のエラー
///
/// いずれも業務上想定される結果で、状態は一切変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BorrowError {
    /// カタログにタイトルがない
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// 同じソフトウェアを既に貸出中
    #[error("Software already on loan to this member: {0}")]
    DuplicateSoftwareLoan(String),

    /// 在庫切れ
    #[error("Item is not available: {0}")]
    ItemUnavailable(String),

    /// 貸出期間が長すぎて返却期限を表せない
    #[error("Due date out of range for: {0}")]
    DueDateOutOfRange(String),
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnError {
    /// 該当タイトルの未返却の貸出がない（呼び出し側では何もしない扱い）
    #[error("No active loan for: {0}")]
    NoActiveLoan(String),

    /// 貸出中のタイトルがカタログから消えている
    #[error("Item not found: {0}")]
    ItemNotFound(String),
}
