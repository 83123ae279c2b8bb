use modelkit_domain::error::{DomainError, RuleViolation};

/// 应用层错误：在处理器边界回收领域错误并结构化上报给外部调用方
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("aggregate not found: {0}")]
    AggregateNotFound(String),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AppError {
    /// 业务规则违反的结构化视图（code + message 列表）；
    /// 非规则类错误返回空
    pub fn violations(&self) -> &[RuleViolation] {
        match self {
            AppError::Domain(err) => err.violations(),
            _ => &[],
        }
    }
}
