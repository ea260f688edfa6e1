#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use rusty_lending_inventory::application::lending::LendingService;
use rusty_lending_inventory::domain::commands::{BorrowItem, ReturnItem};
use rusty_lending_inventory::domain::{Catalog, CatalogItem, MemberId};

/// テストの基準時刻
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    t0() + Duration::seconds(seconds)
}

/// テスト用のサービス（書籍・DVD・雑誌・ソフトウェアを1つずつ以上）
pub fn seeded_service() -> LendingService {
    let mut catalog = Catalog::new();
    catalog.add_item(CatalogItem::book("1984", 6, Duration::seconds(15)));
    catalog.add_item(CatalogItem::book("Harry Potter", 8, Duration::seconds(15)));
    catalog.add_item(CatalogItem::dvd("Maatriks", 1));
    catalog.add_item(CatalogItem::magazine("Teadus ja elu", 5));
    catalog.add_item(CatalogItem::software("Photoshop"));
    LendingService::new(catalog)
}

pub fn borrow(member_id: MemberId, title: &str, seconds: i64) -> BorrowItem {
    BorrowItem {
        member_id,
        title: title.to_string(),
        borrowed_at: at(seconds),
    }
}

pub fn give_back(member_id: MemberId, title: &str, seconds: i64) -> ReturnItem {
    ReturnItem {
        member_id,
        title: title.to_string(),
        returned_at: at(seconds),
    }
}
