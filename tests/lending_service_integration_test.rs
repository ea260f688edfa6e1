mod common;

use common::{borrow, give_back, seeded_service};
use rusty_lending_inventory::application::lending::{LendingError, LendingService};
use rusty_lending_inventory::config::AppConfig;
use chrono::Duration;
use rusty_lending_inventory::domain::{
    Capacity, CatalogItem, DEFAULT_TOP_N, Fine, ReturnOutcome,
};

// ============================================================================
// シナリオ
// ============================================================================

#[test]
fn test_book_borrow_and_immediate_return() {
    let mut service = seeded_service();
    let member_id = service.register_member("Mari");

    service.borrow(borrow(member_id, "1984", 0)).unwrap();

    let item = service.get_item("1984").unwrap();
    assert_eq!(item.borrowed(), 1);
    assert_eq!(item.popularity(), 1);

    let outcome = service.return_item(give_back(member_id, "1984", 0)).unwrap();

    assert_eq!(outcome.fine(), Fine::zero());
    assert!(matches!(outcome, ReturnOutcome::Returned { .. }));
    assert_eq!(service.get_item("1984").unwrap().borrowed(), 0);
    assert_eq!(service.get_item("1984").unwrap().popularity(), 1);
}

#[test]
fn test_book_returned_late_is_fined() {
    let mut service = seeded_service();
    let member_id = service.register_member("Mari");

    let receipt = service.borrow(borrow(member_id, "1984", 0)).unwrap();
    assert_eq!(receipt.due_at, Some(common::at(15)));

    // 期限（+15秒）から25秒遅れ
    let outcome = service.return_item(give_back(member_id, "1984", 40)).unwrap();

    assert_eq!(
        outcome,
        ReturnOutcome::ReturnedWithFine {
            title: "1984".to_string(),
            fine: Fine::from_cents(25),
        }
    );
    assert_eq!(outcome.fine().to_string(), "0.25");
}

#[test]
fn test_single_copy_dvd_unavailable_to_second_member() {
    let mut service = seeded_service();
    let first = service.register_member("Mari");
    let second = service.register_member("Jaan");

    service.borrow(borrow(first, "Maatriks", 0)).unwrap();
    let result = service.borrow(borrow(second, "Maatriks", 1));

    assert_eq!(
        result,
        Err(LendingError::ItemUnavailable("Maatriks".to_string()))
    );
    let item = service.get_item("Maatriks").unwrap();
    assert_eq!(item.borrowed(), 1);
    assert_eq!(item.popularity(), 1);
    assert!(service.view_open_loans(second).unwrap().is_empty());
}

#[test]
fn test_duplicate_software_loan() {
    let mut service = seeded_service();
    let member_id = service.register_member("Mari");

    service.borrow(borrow(member_id, "Photoshop", 0)).unwrap();
    let result = service.borrow(borrow(member_id, "Photoshop", 1));

    assert_eq!(
        result,
        Err(LendingError::DuplicateSoftwareLoan("Photoshop".to_string()))
    );
    assert_eq!(service.view_open_loans(member_id).unwrap(), vec!["Photoshop"]);
    assert_eq!(service.get_item("Photoshop").unwrap().popularity(), 1);
}

#[test]
fn test_software_may_be_held_by_several_members() {
    let mut service = seeded_service();
    let first = service.register_member("Mari");
    let second = service.register_member("Jaan");

    service.borrow(borrow(first, "Photoshop", 0)).unwrap();
    service.borrow(borrow(second, "Photoshop", 0)).unwrap();

    assert_eq!(service.get_item("Photoshop").unwrap().popularity(), 2);
}

#[test]
fn test_top_popular_ranking() {
    let mut service = seeded_service();
    let member_id = service.register_member("Mari");

    for i in 0..3 {
        service.borrow(borrow(member_id, "Harry Potter", i)).unwrap();
    }
    service.borrow(borrow(member_id, "Teadus ja elu", 0)).unwrap();

    let top: Vec<String> = service
        .top_popular(2)
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    assert_eq!(top, vec!["Harry Potter", "Teadus ja elu"]);

    let full = service.top_popular(DEFAULT_TOP_N);
    assert_eq!(full.len(), 5);
    assert_eq!(full[0].popularity, 3);
    assert_eq!(full[1].popularity, 1);
}

// ============================================================================
// 性質
// ============================================================================

#[test]
fn test_borrowed_never_exceeds_capacity() {
    let mut service = seeded_service();
    let member_id = service.register_member("Mari");

    let mut successes = 0;
    for i in 0..10 {
        if service.borrow(borrow(member_id, "Teadus ja elu", i)).is_ok() {
            successes += 1;
        }
        let item = service.get_item("Teadus ja elu").unwrap();
        assert!(item.borrowed() <= 5);
    }

    let item = service.get_item("Teadus ja elu").unwrap();
    assert_eq!(successes, 5);
    assert_eq!(item.borrowed(), 5);
    assert_eq!(item.popularity(), 5);
    assert!(!item.is_available());
}

#[test]
fn test_open_loans_in_borrow_order() {
    let mut service = seeded_service();
    let member_id = service.register_member("Mari");

    for (i, title) in ["Maatriks", "1984", "Photoshop", "1984"].iter().enumerate() {
        service.borrow(borrow(member_id, title, i as i64)).unwrap();
    }
    service.return_item(give_back(member_id, "1984", 10)).unwrap();

    assert_eq!(
        service.view_open_loans(member_id).unwrap(),
        vec!["Maatriks", "Photoshop", "1984"]
    );
    let loans = service.open_loans(member_id).unwrap();
    assert_eq!(loans[2].borrowed_at, common::at(3));
}

#[test]
fn test_borrow_with_due_date_beyond_calendar_is_refused() {
    let mut service = seeded_service();
    service.add_item(CatalogItem::book(
        "Kalevipoeg",
        3,
        Duration::days(365 * 300_000),
    ));
    let member_id = service.register_member("Mari");

    let result = service.borrow(borrow(member_id, "Kalevipoeg", 0));

    assert_eq!(
        result,
        Err(LendingError::DueDateOutOfRange("Kalevipoeg".to_string()))
    );
    let item = service.get_item("Kalevipoeg").unwrap();
    assert_eq!(item.borrowed(), 0);
    assert_eq!(item.popularity(), 0);
    assert!(service.view_open_loans(member_id).unwrap().is_empty());

    // 他の資料は引き続き借りられる
    assert!(service.borrow(borrow(member_id, "1984", 0)).is_ok());
}

#[test]
fn test_return_without_loan_is_a_no_op() {
    let mut service = seeded_service();
    let member_id = service.register_member("Mari");

    let result = service.return_item(give_back(member_id, "Maatriks", 0));

    assert_eq!(result, Err(LendingError::NoActiveLoan("Maatriks".to_string())));
    assert_eq!(service.get_item("Maatriks").unwrap().borrowed(), 0);
}

#[test]
fn test_available_items_feed() {
    let mut service = seeded_service();
    let member_id = service.register_member("Mari");
    service.borrow(borrow(member_id, "Maatriks", 0)).unwrap();
    service.borrow(borrow(member_id, "1984", 0)).unwrap();

    let available = service.available_items();
    let titles: Vec<&str> = available.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["1984", "Harry Potter", "Teadus ja elu", "Photoshop"]
    );
    assert_eq!(available[0].remaining, Capacity::Finite(5));
    assert_eq!(available[3].remaining, Capacity::Unlimited);

    let json = serde_json::to_value(&available[0]).unwrap();
    assert_eq!(json["title"], "1984");
    assert_eq!(json["kind"], "book");
    assert_eq!(json["remaining"]["finite"], 5);
    assert_eq!(serde_json::to_value(&available[3]).unwrap()["remaining"], "unlimited");
}

#[test]
fn test_service_from_default_config() {
    let config = AppConfig::default();
    let mut service = LendingService::from_config(&config).unwrap();
    let member_id = service.register_member(config.member.name.clone());

    assert_eq!(service.catalog().len(), 10);
    assert_eq!(service.available_items().len(), 10);
    assert!(service.borrow(borrow(member_id, "Microsoft Office", 0)).is_ok());
}

#[test]
fn test_return_outcome_serialization() {
    let outcome = ReturnOutcome::ReturnedWithFine {
        title: "1984".to_string(),
        fine: Fine::from_cents(25),
    };

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["outcome"], "returned_with_fine");
    assert_eq!(json["title"], "1984");
    assert_eq!(json["fine"], 25);
}
