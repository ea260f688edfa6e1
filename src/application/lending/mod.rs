mod errors;
mod lending_service;
mod overdue_detection;
mod views;

pub use crate::domain::OverdueNotice;
pub use errors::{LendingError, Result};
pub use lending_service::LendingService;
pub use overdue_detection::notify_overdue_loans;
pub use views::{AvailableItemView, OpenLoanView, PopularItemView};
