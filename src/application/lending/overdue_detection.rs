use chrono::{DateTime, Utc};

use crate::domain::{Member, MemberId, OverdueNotice};
use crate::ports::NotificationService;

use super::lending_service::LendingService;

/// 会員の延滞中の貸出を列挙する純粋関数
///
/// 返却期限を過ぎた未返却の書籍のみが対象。延滞秒数は切り捨て。
pub(super) fn scan_member(member: &Member, now: DateTime<Utc>) -> Vec<OverdueNotice> {
    member
        .open_loans()
        .iter()
        .filter_map(|loan| {
            loan.overdue_by(now).map(|overdue| OverdueNotice {
                title: loan.title().to_string(),
                seconds_overdue: overdue.num_seconds(),
            })
        })
        .collect()
}

/// 延滞通知（ポーリング1回分）
///
/// 呼び出し側のタイマー（例：5秒ごと）から繰り返し呼ばれる想定。
/// 内部にタイマーや状態は持たず、同じ時刻で何度呼んでも同じ通知になる。
///
/// 処理フロー：
/// 1. `scan_overdue`で延滞中の貸出を列挙
/// 2. 1件以上あれば通知ポートに渡す
/// 3. 延滞件数を返す
///
/// # エラー
/// - 会員が存在しない場合（`LendingError::MemberNotFound`）
/// - 通知ポートのエラー
pub async fn notify_overdue_loans(
    service: &LendingService,
    notifier: &dyn NotificationService,
    member_id: MemberId,
    now: DateTime<Utc>,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let notices = service.scan_overdue(member_id, now)?;
    if notices.is_empty() {
        return Ok(0);
    }

    let member_name = service
        .member(member_id)
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    notifier
        .send_overdue_notification(&member_name, &notices)
        .await?;

    Ok(notices.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, CatalogItem};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_scan_member_reports_only_overdue_books() {
        let mut catalog = Catalog::new();
        catalog.add_item(CatalogItem::book("Harry Potter", 8, Duration::seconds(15)));
        catalog.add_item(CatalogItem::book("Sõda ja rahu", 12, Duration::seconds(60)));
        catalog.add_item(CatalogItem::dvd("Maatriks", 9));
        let mut member = Member::new("Mari");

        for title in ["Harry Potter", "Sõda ja rahu", "Maatriks"] {
            member.borrow_item(&mut catalog, title, t0()).unwrap();
        }

        let notices = scan_member(&member, t0() + Duration::milliseconds(27_900));

        assert_eq!(
            notices,
            vec![OverdueNotice {
                title: "Harry Potter".to_string(),
                seconds_overdue: 12,
            }]
        );
    }

    #[test]
    fn test_scan_member_excludes_returned_loans() {
        let mut catalog = Catalog::new();
        catalog.add_item(CatalogItem::book("1984", 6, Duration::seconds(15)));
        let mut member = Member::new("Mari");
        member.borrow_item(&mut catalog, "1984", t0()).unwrap();
        member
            .return_item(&mut catalog, "1984", t0() + Duration::seconds(30))
            .unwrap();

        assert!(scan_member(&member, t0() + Duration::seconds(60)).is_empty());
    }
}
