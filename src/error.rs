//! 错误类型
//!
//! 核心模块统一使用的错误定义。

use thiserror::Error;

/// 核心错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// 参数非法（负数容量/长度/速率、非正的仿真时长等）
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("unknown traffic pattern `{0}`")]
    UnknownPattern(String),

    #[error("unknown service class `{0}`")]
    UnknownServiceClass(String),

    /// 记录中引用了不存在的元素
    #[error("record references unknown element `{0}`")]
    UnknownElement(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// 校验一个非负且有限的浮点参数
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid(name, format!("expected a finite value >= 0, got {value}")))
    }
}
