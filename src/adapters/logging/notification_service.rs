use crate::domain::OverdueNotice;
use crate::ports::notification_service::{NotificationService as NotificationServiceTrait, Result};
use async_trait::async_trait;

/// ログに警告を出すNotificationService実装
///
/// 画面を持たない実行環境で延滞を知らせる。
#[derive(Debug, Default)]
pub struct NotificationService;

impl NotificationService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn send_overdue_notification(
        &self,
        member_name: &str,
        notices: &[OverdueNotice],
    ) -> Result<()> {
        for notice in notices {
            tracing::warn!(
                member = %member_name,
                title = %notice.title,
                seconds_overdue = notice.seconds_overdue,
                "loan is overdue"
            );
        }
        Ok(())
    }
}
