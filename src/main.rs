use rusty_lending_inventory::{
    adapters::logging::NotificationService as LogNotificationService,
    application::lending::{LendingError, LendingService, notify_overdue_loans},
    config::AppConfig,
    domain::commands::{BorrowItem, ReturnItem},
};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_lending_inventory=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let mut service = LendingService::from_config(&config)?;
    let member_id = service.register_member(config.member.name.clone());

    for item in service.available_items() {
        tracing::info!(title = %item.title, kind = item.kind, remaining = %item.remaining, "available");
    }

    // コマンドライン引数のタイトルを借りる
    for title in std::env::args().skip(1) {
        let cmd = BorrowItem {
            member_id,
            title,
            borrowed_at: chrono::Utc::now(),
        };
        if let Err(e) = service.borrow(cmd) {
            tracing::warn!("{}", e);
        }
    }

    let notifier = LogNotificationService::new();
    let mut ticker =
        tokio::time::interval(Duration::from_secs(config.notifications.poll_interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!(
        poll_interval_secs = config.notifications.poll_interval_secs,
        "watching overdue loans, press Ctrl-C to return everything and exit"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // 通知の失敗は記録し、次の周期で再試行する
                if let Err(e) =
                    notify_overdue_loans(&service, &notifier, member_id, chrono::Utc::now()).await
                {
                    tracing::error!("overdue notification failed: {}", e);
                }
            }
            result = &mut shutdown => {
                result?;
                break;
            }
        }
    }

    // 終了時にすべて返却する
    for title in service.view_open_loans(member_id)? {
        let cmd = ReturnItem {
            member_id,
            title,
            returned_at: chrono::Utc::now(),
        };
        match service.return_item(cmd) {
            Ok(_) | Err(LendingError::NoActiveLoan(_)) => {}
            Err(e) => tracing::warn!("{}", e),
        }
    }

    for entry in service.top_popular(rusty_lending_inventory::domain::DEFAULT_TOP_N) {
        tracing::info!(title = %entry.title, popularity = entry.popularity, "popular");
    }

    Ok(())
}
