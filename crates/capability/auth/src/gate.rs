//! 传输层共享密钥校验。

use domain::DomainError;
use subtle::ConstantTimeEq;

/// 调用级共享密钥闸门。
///
/// 接受当前密钥以及轮换期内的旧密钥，比较过程为常量时间。
#[derive(Debug, Clone)]
pub struct ApiKeyGate {
    keys: Vec<String>,
}

impl ApiKeyGate {
    /// 空白密钥会被丢弃。
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(Into::into)
                .filter(|key| !key.trim().is_empty())
                .collect(),
        }
    }

    /// 校验调用携带的密钥。
    pub fn check(&self, presented: Option<&str>) -> Result<(), DomainError> {
        let Some(presented) = presented else {
            return Err(Self::rejected());
        };
        let mut matched = false;
        for key in &self.keys {
            let equal: bool = key.as_bytes().ct_eq(presented.as_bytes()).into();
            matched |= equal;
        }
        if matched {
            Ok(())
        } else {
            Err(Self::rejected())
        }
    }

    fn rejected() -> DomainError {
        mnemosyne_telemetry::record_gate_rejection();
        DomainError::Unauthenticated("invalid api key".to_string())
    }
}
