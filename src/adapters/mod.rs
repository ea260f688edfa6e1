pub mod logging;
pub mod mock;
