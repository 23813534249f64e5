//! Command implementations.

pub mod ask;
pub mod config;
pub mod extract;
pub mod list;
pub mod stats;

pub use self::ask::execute_ask;
pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::list::execute_list;
pub use self::stats::execute_stats;
