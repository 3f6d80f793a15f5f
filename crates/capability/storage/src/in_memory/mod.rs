//! 内存存储实现模块
//!
//! 用于测试和无数据库的本地运行。
//!
//! 包含以下实现：
//! - UserStore: InMemoryUserStore
//! - WorkspaceStore: InMemoryWorkspaceStore
//! - GridStore: InMemoryGridStore
//! - NodeStore: InMemoryNodeStore
//! - DeviceStore: InMemoryDeviceStore

pub mod device;
pub mod grid;
pub mod node;
pub mod user;
pub mod workspace;

pub use device::*;
pub use grid::*;
pub use node::*;
pub use user::*;
pub use workspace::*;

use crate::error::StorageError;

fn lock_failed<T>(_: T) -> StorageError {
    StorageError::new("lock failed")
}

/// 在持有写锁的线程里 panic，使锁进入中毒状态。
#[cfg(test)]
fn poison<T: Send + Sync>(lock: &std::sync::RwLock<T>) {
    std::thread::scope(|scope| {
        let _ = scope
            .spawn(|| {
                let _guard = lock.write();
                panic!("poison lock");
            })
            .join();
    });
}
