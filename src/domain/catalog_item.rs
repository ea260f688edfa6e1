use chrono::Duration;

use super::Capacity;

/// 書籍の既定の貸出期間（秒）
pub const DEFAULT_LOAN_PERIOD_SECS: i64 = 15;

/// 資料の種別
///
/// 種別は閉じた集合。種別ごとの振る舞いは`match`で分岐する。
///
/// | 種別 | 在庫 | 貸出期間 |
/// |---|---|---|
/// | Book | 有限 | 固定。延滞料金あり |
/// | Dvd | 有限 | なし |
/// | Magazine | 有限 | なし |
/// | Software | 無制限 | なし。会員ごとに同時1件まで |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Book { loan_period: Duration },
    Dvd,
    Magazine,
    Software,
}

impl ItemKind {
    /// 既定の貸出期間を持つ書籍
    pub fn book() -> Self {
        ItemKind::Book {
            loan_period: Duration::seconds(DEFAULT_LOAN_PERIOD_SECS),
        }
    }

    /// 返却期限の計算に使う貸出期間（書籍のみ）
    pub fn loan_period(&self) -> Option<Duration> {
        match self {
            ItemKind::Book { loan_period } => Some(*loan_period),
            ItemKind::Dvd | ItemKind::Magazine | ItemKind::Software => None,
        }
    }

    pub fn accrues_fines(&self) -> bool {
        matches!(self, ItemKind::Book { .. })
    }

    /// 同じ会員が同じタイトルを同時に1件しか借りられない種別か
    pub fn single_open_loan_per_member(&self) -> bool {
        matches!(self, ItemKind::Software)
    }

    /// 種別の在庫方針を適用する。ソフトウェアは`copies`に関わらず無制限。
    pub fn capacity_for(&self, copies: u64) -> Capacity {
        match self {
            ItemKind::Software => Capacity::Unlimited,
            ItemKind::Book { .. } | ItemKind::Dvd | ItemKind::Magazine => {
                Capacity::Finite(copies)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Book { .. } => "book",
            ItemKind::Dvd => "dvd",
            ItemKind::Magazine => "magazine",
            ItemKind::Software => "software",
        }
    }
}

/// 貸出対象の資料1タイトル
///
/// 不変条件：
/// - `borrowed <= total`（無制限なら常に成立）
/// - `is_available() ⟺ borrowed < total`
/// - `popularity`は単調増加し、貸出成功1回につきちょうど1増える
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    title: String,
    kind: ItemKind,
    capacity: Capacity,
    borrowed: u64,
    popularity: u64,
}

impl CatalogItem {
    pub fn new(title: impl Into<String>, kind: ItemKind, copies: u64) -> Self {
        Self {
            title: title.into(),
            capacity: kind.capacity_for(copies),
            kind,
            borrowed: 0,
            popularity: 0,
        }
    }

    pub fn book(title: impl Into<String>, copies: u64, loan_period: Duration) -> Self {
        Self::new(title, ItemKind::Book { loan_period }, copies)
    }

    pub fn dvd(title: impl Into<String>, copies: u64) -> Self {
        Self::new(title, ItemKind::Dvd, copies)
    }

    pub fn magazine(title: impl Into<String>, copies: u64) -> Self {
        Self::new(title, ItemKind::Magazine, copies)
    }

    pub fn software(title: impl Into<String>) -> Self {
        Self::new(title, ItemKind::Software, 0)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn borrowed(&self) -> u64 {
        self.borrowed
    }

    pub fn popularity(&self) -> u64 {
        self.popularity
    }

    pub fn is_available(&self) -> bool {
        self.capacity.admits(self.borrowed)
    }

    /// 残り在庫（一覧表示用）
    pub fn remaining(&self) -> Capacity {
        self.capacity.remaining(self.borrowed)
    }

    /// 1つ貸し出す
    ///
    /// 在庫がある場合のみ貸出数と人気度を増やし`true`を返す。
    /// 在庫切れなら何も変更せず`false`を返す。
    pub fn borrow(&mut self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.borrowed += 1;
        self.popularity += 1;
        true
    }

    /// 1つ返却する。貸出数が0なら何もしない（二重返却はエラーにしない）。
    pub fn return_one(&mut self) {
        self.borrowed = self.borrowed.saturating_sub(1);
    }
}
