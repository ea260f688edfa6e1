use thiserror::Error;

use crate::domain::{BorrowError, MemberId, ReturnError};

/// 貸出サービス層のエラー
///
/// いずれも想定された業務上の結果で、プロセスを止めるものではない。
/// エラー時は状態が一切変更されていないことが保証される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// 会員が登録されていない
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// タイトルがカタログにない
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// 同じソフトウェアを既に貸出中
    #[error("Software already on loan: {0}")]
    DuplicateSoftwareLoan(String),

    /// 在庫切れ
    #[error("Item is not available: {0}")]
    ItemUnavailable(String),

    /// 返却期限を表せない
    #[error("Due date out of range for: {0}")]
    DueDateOutOfRange(String),

    /// 返却対象の貸出がない（表示上は何もしない扱い）
    #[error("No active loan for: {0}")]
    NoActiveLoan(String),
}

impl From<BorrowError> for LendingError {
    fn from(err: BorrowError) -> Self {
        match err {
            BorrowError::ItemNotFound(title) => LendingError::ItemNotFound(title),
            BorrowError::DuplicateSoftwareLoan(title) => LendingError::DuplicateSoftwareLoan(title),
            BorrowError::ItemUnavailable(title) => LendingError::ItemUnavailable(title),
            BorrowError::DueDateOutOfRange(title) => LendingError::DueDateOutOfRange(title),
        }
    }
}

impl From<ReturnError> for LendingError {
    fn from(err: ReturnError) -> Self {
        match err {
            ReturnError::NoActiveLoan(title) => LendingError::NoActiveLoan(title),
            ReturnError::ItemNotFound(title) => LendingError::ItemNotFound(title),
        }
    }
}

/// サービス層の Result型
pub type Result<T> = std::result::Result<T, LendingError>;
