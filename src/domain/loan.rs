use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{CatalogItem, Fine, ItemKind, LoanId};

/// 延滞料金率（1秒あたり、1/100単位）
///
/// 0.01 通貨単位/秒。
pub const FINE_RATE_CENTS_PER_SECOND: u64 = 1;

/// Loan - 1タイトルの1回の貸出
///
/// 資料は所有せず、カタログ上のタイトルで参照する。
/// ライフサイクル：
/// - 貸出成功時に作成される
/// - 返却時に1度だけ変更される（returned, returned_at, fine）
/// - 返却後は変更されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    loan_id: LoanId,
    title: String,
    kind: ItemKind,
    borrowed_at: DateTime<Utc>,
    due_at: Option<DateTime<Utc>>,
    returned_at: Option<DateTime<Utc>>,
    fine: Fine,
}

impl Loan {
    /// 貸出を開始する
    ///
    /// 返却期限は書籍の場合のみ `borrowed_at + loan_period` で設定される。
    /// 返却期限が日時の範囲を超える場合は`None`。資料の在庫には触れない。
    pub fn open(item: &CatalogItem, borrowed_at: DateTime<Utc>) -> Option<Self> {
        let kind = item.kind();
        let due_at = match kind.loan_period() {
            Some(period) => Some(borrowed_at.checked_add_signed(period)?),
            None => None,
        };
        Some(Self {
            loan_id: LoanId::new(),
            title: item.title().to_string(),
            kind,
            borrowed_at,
            due_at,
            returned_at: None,
            fine: Fine::zero(),
        })
    }

    pub fn loan_id(&self) -> LoanId {
        self.loan_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn borrowed_at(&self) -> DateTime<Utc> {
        self.borrowed_at
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    pub fn returned_at(&self) -> Option<DateTime<Utc>> {
        self.returned_at
    }

    pub fn fine(&self) -> Fine {
        self.fine
    }

    pub fn is_returned(&self) -> bool {
        self.returned_at.is_some()
    }

    /// 貸出を終了し、延滞料金を返す
    ///
    /// 1つの貸出につき1度だけ呼ぶこと（重複呼び出しの防止は呼び出し側の責務）。
    pub fn close(&mut self, item: &mut CatalogItem, returned_at: DateTime<Utc>) -> Fine {
        self.returned_at = Some(returned_at);
        item.return_one();

        self.fine = match self.due_at {
            Some(due_at) => compute_fine(due_at, returned_at),
            None => Fine::zero(),
        };
        self.fine
    }

    /// 現在時刻での延滞時間
    ///
    /// 返却期限があり、未返却で、期限を過ぎている場合のみ`Some`。
    pub fn overdue_by(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.is_returned() {
            return None;
        }
        self.due_at
            .filter(|due_at| *due_at < now)
            .map(|due_at| now - due_at)
    }
}

/// 延滞通知1件分（タイトルと延滞秒数）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueNotice {
    pub title: String,
    pub seconds_overdue: i64,
}

/// 純粋関数：延滞料金の計算
///
/// `round(overdue_seconds × 0.01, 2)`。ミリ秒精度で計算し、0.5は切り上げる。
/// 期限内の返却は0。
pub fn compute_fine(due_at: DateTime<Utc>, returned_at: DateTime<Utc>) -> Fine {
    if returned_at <= due_at {
        return Fine::zero();
    }
    let overdue_ms = (returned_at - due_at).num_milliseconds().unsigned_abs();
    Fine::from_cents((overdue_ms * FINE_RATE_CENTS_PER_SECOND + 500) / 1000)
}
