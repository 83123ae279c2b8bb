//! 业务规则（Business Rule）引擎
//!
//! 规则是绑定了被检查值的无状态谓词对象：暴露是否被违反、
//! 人类可读的消息与机器可读的 code。检查器以自由函数提供（无单例、无隐藏状态）：
//! - `check_rule` / `check_rules`：快速失败，用于聚合变更方法内部；
//! - `broken_rules`：收集所有违反项但不报错；
//! - `validate_all`：汇总所有违反项并一次性报错，用于输入校验边界。
//!
use crate::error::{DomainError, DomainResult, RuleViolation};

/// 未覆写 `code` 时使用的默认违规代码
pub const DEFAULT_RULE_CODE: &str = "BUSINESS_RULE_VIOLATION";

/// 业务规则：绑定具体值的可解释不变式检查
pub trait BusinessRule: Send + Sync {
    /// 规则是否被违反
    fn is_broken(&self) -> bool;

    /// 人类可读的违规消息
    fn message(&self) -> String;

    /// 机器可读的违规代码
    fn code(&self) -> &str {
        DEFAULT_RULE_CODE
    }
}

fn violation_of(rule: &dyn BusinessRule) -> RuleViolation {
    RuleViolation {
        code: rule.code().to_string(),
        message: rule.message(),
    }
}

/// 检查单条规则：违反时立即以单条违规错误返回。
///
/// 用于聚合的变更方法内部，任何一条规则失败都应整体中止变更，
/// 不允许出现部分状态修改。
pub fn check_rule(rule: &dyn BusinessRule) -> DomainResult<()> {
    if rule.is_broken() {
        return Err(DomainError::RuleViolation {
            violation: violation_of(rule),
        });
    }
    Ok(())
}

/// 按顺序检查多条规则，遇到第一条被违反的规则即停止（短路、快速失败）。
///
/// 顺序即优先级：例如“标识必填”应先于“标识格式合法”失败。
pub fn check_rules(rules: &[&dyn BusinessRule]) -> DomainResult<()> {
    for rule in rules {
        check_rule(*rule)?;
    }
    Ok(())
}

/// 评估所有规则，返回全部被违反的记录，不报错。
pub fn broken_rules(rules: &[&dyn BusinessRule]) -> Vec<RuleViolation> {
    rules
        .iter()
        .filter(|r| r.is_broken())
        .map(|r| violation_of(*r))
        .collect()
}

/// 评估所有规则；若存在违反项，以汇总违规错误返回（包含每条的 code 与消息）。
///
/// 用于输入校验边界（如命令处理器），一次性向调用方报告所有问题。
pub fn validate_all(rules: &[&dyn BusinessRule]) -> DomainResult<()> {
    let violations = broken_rules(rules);
    if !violations.is_empty() {
        return Err(DomainError::RuleViolations { violations });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MustBePositive {
        field: &'static str,
        value: i64,
    }

    impl BusinessRule for MustBePositive {
        fn is_broken(&self) -> bool {
            self.value <= 0
        }

        fn message(&self) -> String {
            format!("{} must be positive, got {}", self.field, self.value)
        }

        fn code(&self) -> &str {
            "MUST_BE_POSITIVE"
        }
    }

    struct AlwaysBroken;

    impl BusinessRule for AlwaysBroken {
        fn is_broken(&self) -> bool {
            true
        }

        fn message(&self) -> String {
            "always broken".into()
        }
    }

    #[test]
    fn check_rule_passes_when_rule_holds() {
        let rule = MustBePositive {
            field: "amount",
            value: 5,
        };
        assert!(check_rule(&rule).is_ok());
    }

    #[test]
    fn check_rule_fails_with_code_and_message() {
        let rule = MustBePositive {
            field: "amount",
            value: -1,
        };
        let err = check_rule(&rule).unwrap_err();
        match err {
            DomainError::RuleViolation { violation } => {
                assert_eq!(violation.code, "MUST_BE_POSITIVE");
                assert_eq!(violation.message, "amount must be positive, got -1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn default_code_applies_when_not_overridden() {
        let err = check_rule(&AlwaysBroken).unwrap_err();
        assert_eq!(err.violations()[0].code, DEFAULT_RULE_CODE);
    }

    #[test]
    fn check_rules_short_circuits_at_first_broken() {
        let first = MustBePositive {
            field: "quantity",
            value: 0,
        };
        let second = AlwaysBroken;
        let err = check_rules(&[&first, &second]).unwrap_err();
        // 仅报告第一条，后续规则不再参与
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].code, "MUST_BE_POSITIVE");
    }

    #[test]
    fn broken_rules_collects_all_without_failing() {
        let a = MustBePositive {
            field: "quantity",
            value: 0,
        };
        let ok = MustBePositive {
            field: "price",
            value: 10,
        };
        let b = AlwaysBroken;
        let broken = broken_rules(&[&a, &ok, &b]);
        assert_eq!(broken.len(), 2);
        assert_eq!(broken[0].code, "MUST_BE_POSITIVE");
        assert_eq!(broken[1].code, DEFAULT_RULE_CODE);
    }

    #[test]
    fn validate_all_reports_every_violation_at_once() {
        let a = MustBePositive {
            field: "quantity",
            value: 0,
        };
        let b = AlwaysBroken;
        let err = validate_all(&[&a, &b]).unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert!(err.to_string().contains("; "));
    }

    #[test]
    fn validate_all_passes_when_all_hold() {
        let a = MustBePositive {
            field: "quantity",
            value: 1,
        };
        assert!(validate_all(&[&a]).is_ok());
    }
}
