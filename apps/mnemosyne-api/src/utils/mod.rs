//! 工具模块

pub mod projection;
pub mod response;
pub mod validation;

pub use validation::*;
