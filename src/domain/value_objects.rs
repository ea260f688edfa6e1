use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 貸出ID - 1回の貸出を識別する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(Uuid);

impl LoanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for LoanId {
    fn default() -> Self {
        Self::new()
    }
}

/// 会員ID
///
/// 表示名は一意ではないため、会員の識別にはこのIDを使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 在庫数
///
/// 不変条件：無制限の在庫は浮動小数の無限大ではなく専用の値で表す。
/// 比較・減算が常に正確になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capacity {
    Finite(u64),
    Unlimited,
}

impl Capacity {
    /// 貸出中の数に対して、もう1つ貸し出せるか
    pub fn admits(&self, borrowed: u64) -> bool {
        match self {
            Capacity::Finite(total) => borrowed < *total,
            Capacity::Unlimited => true,
        }
    }

    /// 残り在庫
    pub fn remaining(&self, borrowed: u64) -> Capacity {
        match self {
            Capacity::Finite(total) => Capacity::Finite(total.saturating_sub(borrowed)),
            Capacity::Unlimited => Capacity::Unlimited,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Capacity::Unlimited)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Finite(n) => write!(f, "{}", n),
            Capacity::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// 延滞料金
///
/// 小数点以下2桁の固定小数点。内部では1/100単位の整数で保持する。
/// 負の値は作成できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fine(u64);

impl Fine {
    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Fine {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Fine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
