//! Handlers 模块

pub mod devices;
pub mod health;
pub mod hierarchy;
pub mod metrics;
pub mod nodes;
pub mod users;

pub use devices::*;
pub use health::*;
pub use hierarchy::*;
pub use metrics::*;
pub use nodes::*;
pub use users::*;
