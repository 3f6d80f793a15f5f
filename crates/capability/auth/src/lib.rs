//! 身份能力：用户注册/登录、口令哈希、管理员守卫、传输层密钥校验。
//!
//! - [`IdentityService`]：用户生命周期（注册、登录、查询、更新、改密、删除）
//! - [`AuthorizationGuard`]：要求操作者存在且为管理员
//! - [`ApiKeyGate`]：调用级共享密钥校验，与用户身份无关

mod gate;
mod guard;
mod identity;
mod password;

pub use gate::ApiKeyGate;
pub use guard::{AuthorizationGuard, Authorizer};
pub use identity::{IdentityService, SignUpInput, UserChanges};
pub use password::{hash_password, verify_password};
