use chrono::{DateTime, Utc};

use crate::config::{AppConfig, ConfigError};
use crate::domain::commands::{BorrowItem, ReturnItem};
use crate::domain::{
    BorrowReceipt, Catalog, CatalogItem, Member, MemberId, OverdueNotice, ReturnOutcome,
};

use super::errors::{LendingError, Result};
use super::overdue_detection::scan_member;
use super::views::{AvailableItemView, OpenLoanView, PopularItemView};

/// 貸出サービス
///
/// 1つのカタログと会員の集合を束ね、フロントエンドに対する唯一の入口となる。
/// 呼び出し側が1度だけ構築し、参照として各操作に渡す（グローバルな状態は持たない）。
///
/// # 並行性
///
/// 単一スレッドからの利用を前提とする。すべての変更操作は`&mut self`を取るため、
/// 複数の会員から同時に使う場合は呼び出し側でサービス全体を1つのロックで直列化すること。
/// これにより`borrowed <= total`の不変条件が保たれる。
#[derive(Debug, Clone, Default)]
pub struct LendingService {
    catalog: Catalog,
    members: Vec<Member>,
}

impl LendingService {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            members: Vec::new(),
        }
    }

    /// 設定の初期データからカタログを構築する
    pub fn from_config(config: &AppConfig) -> std::result::Result<Self, ConfigError> {
        let mut catalog = Catalog::new();
        for item in config.catalog_items()? {
            catalog.add_item(item);
        }
        tracing::info!(items = catalog.len(), "catalog seeded");
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn add_item(&mut self, item: CatalogItem) {
        tracing::debug!(title = %item.title(), kind = item.kind().label(), "item registered");
        self.catalog.add_item(item);
    }

    pub fn get_item(&self, title: &str) -> Option<&CatalogItem> {
        self.catalog.get_item(title)
    }

    /// 会員を登録する。表示名の重複は許される。
    pub fn register_member(&mut self, name: impl Into<String>) -> MemberId {
        let member = Member::new(name);
        let member_id = member.id();
        tracing::info!(member_id = %member_id, name = %member.name(), "member registered");
        self.members.push(member);
        member_id
    }

    pub fn member(&self, member_id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id() == member_id)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    fn member_or_err(&self, member_id: MemberId) -> Result<&Member> {
        self.member(member_id)
            .ok_or(LendingError::MemberNotFound(member_id))
    }

    /// 資料を借りる
    ///
    /// ビジネスルール：
    /// - 会員が登録されていること
    /// - タイトルがカタログにあること
    /// - ソフトウェアは同じ会員が同時に1件まで
    /// - 在庫があること
    ///
    /// 成功時のみ在庫・人気度・貸出記録がまとめて更新される。
    pub fn borrow(&mut self, cmd: BorrowItem) -> Result<BorrowReceipt> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id() == cmd.member_id)
            .ok_or(LendingError::MemberNotFound(cmd.member_id))?;

        match member.borrow_item(&mut self.catalog, &cmd.title, cmd.borrowed_at) {
            Ok(receipt) => {
                tracing::info!(
                    member = %member.name(),
                    title = %receipt.title,
                    loan_id = %receipt.loan_id.value(),
                    "item borrowed"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::debug!(member = %member.name(), error = %e, "borrow refused");
                Err(e.into())
            }
        }
    }

    /// 資料を返却する
    ///
    /// 該当する貸出がなければ`NoActiveLoan`を返す。呼び出し側は表示上何もしない扱いでよい。
    /// 延滞料金は返却時にのみ計算される。
    pub fn return_item(&mut self, cmd: ReturnItem) -> Result<ReturnOutcome> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id() == cmd.member_id)
            .ok_or(LendingError::MemberNotFound(cmd.member_id))?;

        match member.return_item(&mut self.catalog, &cmd.title, cmd.returned_at) {
            Ok(outcome) => {
                tracing::info!(
                    member = %member.name(),
                    title = %outcome.title(),
                    fine = %outcome.fine(),
                    "item returned"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::debug!(member = %member.name(), error = %e, "return ignored");
                Err(e.into())
            }
        }
    }

    /// 会員の未返却の貸出（貸出順）
    pub fn open_loans(&self, member_id: MemberId) -> Result<Vec<OpenLoanView>> {
        let member = self.member_or_err(member_id)?;
        Ok(member
            .open_loans()
            .iter()
            .map(OpenLoanView::from)
            .collect())
    }

    /// 会員の未返却の貸出タイトル（貸出順）
    pub fn view_open_loans(&self, member_id: MemberId) -> Result<Vec<String>> {
        let member = self.member_or_err(member_id)?;
        Ok(member
            .view_open_loans()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// 貸出可能な資料と残り在庫
    pub fn available_items(&self) -> Vec<AvailableItemView> {
        self.catalog
            .list_available()
            .into_iter()
            .map(AvailableItemView::from)
            .collect()
    }

    /// 人気ランキング上位`n`件
    pub fn top_popular(&self, n: usize) -> Vec<PopularItemView> {
        self.catalog
            .top_popular(n)
            .into_iter()
            .map(PopularItemView::from)
            .collect()
    }

    /// 延滞中の貸出を列挙する（読み取り専用）
    ///
    /// 自動返却や料金の確定は行わない。何度呼んでも状態は変わらない。
    pub fn scan_overdue(
        &self,
        member_id: MemberId,
        now: DateTime<Utc>,
    ) -> Result<Vec<OverdueNotice>> {
        let member = self.member_or_err(member_id)?;
        Ok(scan_member(member, now))
    }
}
