use crate::domain::OverdueNotice;
use crate::ports::notification_service::{NotificationService as NotificationServiceTrait, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// 送信された延滞通知1回分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentOverdueNotification {
    pub member_name: String,
    pub notices: Vec<OverdueNotice>,
}

/// NotificationServiceのモック実装
///
/// 実際には送信せず、呼び出し内容を記録するだけ。
pub struct NotificationService {
    sent: Mutex<Vec<SentOverdueNotification>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// テスト用に記録された通知を取得
    pub fn sent(&self) -> Vec<SentOverdueNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn send_overdue_notification(
        &self,
        member_name: &str,
        notices: &[OverdueNotice],
    ) -> Result<()> {
        self.sent.lock().unwrap().push(SentOverdueNotification {
            member_name: member_name.to_string(),
            notices: notices.to_vec(),
        });
        Ok(())
    }
}
