use async_trait::async_trait;

use crate::domain::OverdueNotice;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 通知サービスポート
///
/// 会員への延滞通知の配信手段を抽象化する。
/// 実装は画面上の警告、ログ、メールなどが考えられる。
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// 延滞通知を会員に送信する
    ///
    /// 延滞ポーリングで1件以上見つかった場合に呼ばれる。
    async fn send_overdue_notification(
        &self,
        member_name: &str,
        notices: &[OverdueNotice],
    ) -> Result<()>;
}
