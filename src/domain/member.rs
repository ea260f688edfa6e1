use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BorrowError, Catalog, Fine, Loan, LoanId, MemberId, ReturnError};

/// 貸出成功時の受領情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowReceipt {
    pub loan_id: LoanId,
    pub title: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: Option<DateTime<Utc>>,
}

/// 返却結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReturnOutcome {
    /// 期限内、または期限のない資料の返却
    Returned { title: String },
    /// 延滞料金が発生した返却
    ReturnedWithFine { title: String, fine: Fine },
}

impl ReturnOutcome {
    pub fn title(&self) -> &str {
        match self {
            ReturnOutcome::Returned { title } | ReturnOutcome::ReturnedWithFine { title, .. } => {
                title
            }
        }
    }

    pub fn fine(&self) -> Fine {
        match self {
            ReturnOutcome::Returned { .. } => Fine::zero(),
            ReturnOutcome::ReturnedWithFine { fine, .. } => *fine,
        }
    }
}

/// Member集約 - 借り手と、その未返却の貸出
///
/// `loans`は未返却の貸出のみを保持する。返却された貸出は即座に取り除かれる。
///
/// 不変条件：ソフトウェアは同じタイトルの未返却の貸出を1件までしか持てない。
/// それ以外の種別は同じタイトルを複数借りられる（1件ごとに在庫を1つ消費）。
#[derive(Debug, Clone)]
pub struct Member {
    id: MemberId,
    name: String,
    loans: Vec<Loan>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            loans: Vec::new(),
        }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 未返却の貸出（貸出順）
    pub fn open_loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn has_open_loan(&self, title: &str) -> bool {
        self.loans.iter().any(|loan| loan.title() == title)
    }

    /// 資料を借りる
    ///
    /// ビジネスルール：
    /// - タイトルがカタログにあること
    /// - ソフトウェアは同じタイトルを二重に借りられない
    /// - 返却期限が日時の範囲に収まること
    /// - 在庫があること
    ///
    /// 状態の変更（在庫・人気度・貸出の追加）は成功時のみ、まとめて行われる。
    pub fn borrow_item(
        &mut self,
        catalog: &mut Catalog,
        title: &str,
        borrowed_at: DateTime<Utc>,
    ) -> Result<BorrowReceipt, BorrowError> {
        let item = catalog
            .get_item_mut(title)
            .ok_or_else(|| BorrowError::ItemNotFound(title.to_string()))?;

        if item.kind().single_open_loan_per_member() && self.has_open_loan(title) {
            return Err(BorrowError::DuplicateSoftwareLoan(title.to_string()));
        }

        let loan = Loan::open(item, borrowed_at)
            .ok_or_else(|| BorrowError::DueDateOutOfRange(title.to_string()))?;

        if !item.borrow() {
            return Err(BorrowError::ItemUnavailable(title.to_string()));
        }

        let receipt = BorrowReceipt {
            loan_id: loan.loan_id(),
            title: loan.title().to_string(),
            borrowed_at,
            due_at: loan.due_at(),
        };
        self.loans.push(loan);

        Ok(receipt)
    }

    /// 資料を返却する
    ///
    /// 同じタイトルを複数借りている場合は、最も早く借りた未返却の貸出を閉じる。
    /// 該当する貸出がなければ`NoActiveLoan`を返し、何も変更しない。
    pub fn return_item(
        &mut self,
        catalog: &mut Catalog,
        title: &str,
        returned_at: DateTime<Utc>,
    ) -> Result<ReturnOutcome, ReturnError> {
        let position = self
            .loans
            .iter()
            .position(|loan| loan.title() == title)
            .ok_or_else(|| ReturnError::NoActiveLoan(title.to_string()))?;

        let item = catalog
            .get_item_mut(title)
            .ok_or_else(|| ReturnError::ItemNotFound(title.to_string()))?;

        let mut loan = self.loans.remove(position);
        let fine = loan.close(item, returned_at);

        let title = loan.title().to_string();
        if fine.is_zero() {
            Ok(ReturnOutcome::Returned { title })
        } else {
            Ok(ReturnOutcome::ReturnedWithFine { title, fine })
        }
    }

    /// 未返却の貸出のタイトル（貸出順）
    pub fn view_open_loans(&self) -> Vec<&str> {
        self.loans.iter().map(|loan| loan.title()).collect()
    }
}
