use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Capacity, CatalogItem, Loan, LoanId};

/// 貸出可能な資料の表示用ビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableItemView {
    pub title: String,
    pub kind: &'static str,
    pub remaining: Capacity,
}

impl From<&CatalogItem> for AvailableItemView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            title: item.title().to_string(),
            kind: item.kind().label(),
            remaining: item.remaining(),
        }
    }
}

/// 会員の未返却の貸出ビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenLoanView {
    pub loan_id: LoanId,
    pub title: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: Option<DateTime<Utc>>,
}

impl From<&Loan> for OpenLoanView {
    fn from(loan: &Loan) -> Self {
        Self {
            loan_id: loan.loan_id(),
            title: loan.title().to_string(),
            borrowed_at: loan.borrowed_at(),
            due_at: loan.due_at(),
        }
    }
}

/// 人気ランキングのビュー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularItemView {
    pub title: String,
    pub popularity: u64,
}

impl From<&CatalogItem> for PopularItemView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            title: item.title().to_string(),
            popularity: item.popularity(),
        }
    }
}
