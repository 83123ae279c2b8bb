//! 领域层统一错误定义
//!
//! 聚焦业务规则违反、未找到、版本冲突与事件发布等最小必要集合，
//! 便于在各实现层统一转换为 `DomainError`。
//!
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 单条业务规则违反记录（code + message，可序列化，便于边界层结构化上报）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub code: String,
    pub message: String,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

fn join_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 业务规则 ---
    #[error("business rule violated: [{}] {}", .violation.code, .violation.message)]
    RuleViolation { violation: RuleViolation },
    #[error("business rules violated: {}", join_violations(.violations))]
    RuleViolations { violations: Vec<RuleViolation> },

    // --- 仓储/并发 ---
    #[error("not found: {reason}")]
    NotFound { reason: String },
    #[error("version conflict: expected={expected}, actual={actual}")]
    VersionConflict { expected: usize, actual: usize },
    #[error("repository error: {reason}")]
    Repository { reason: String },

    // --- 事件系统 ---
    #[error("event bus error: {reason}")]
    EventBus { reason: String },
    #[error("publish failed: type={event_type}, reason={reason}")]
    Publish { event_type: String, reason: String },

    // --- 序列化/解析 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
}

impl DomainError {
    /// 单条规则违反
    pub fn rule_violation(code: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::RuleViolation {
            violation: RuleViolation {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// 多条规则违反（用于边界校验的一次性汇总上报）
    pub fn rule_violations(violations: Vec<RuleViolation>) -> Self {
        DomainError::RuleViolations { violations }
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        DomainError::NotFound {
            reason: reason.into(),
        }
    }

    pub fn event_bus(reason: impl Into<String>) -> Self {
        DomainError::EventBus {
            reason: reason.into(),
        }
    }

    /// 返回所有违反的规则记录（单条与多条统一视图；其余错误为空）
    pub fn violations(&self) -> &[RuleViolation] {
        match self {
            DomainError::RuleViolation { violation } => std::slice::from_ref(violation),
            DomainError::RuleViolations { violations } => violations,
            _ => &[],
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<uuid::Error> for DomainError {
    fn from(err: uuid::Error) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}

impl From<chrono::ParseError> for DomainError {
    fn from(err: chrono::ParseError) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}
