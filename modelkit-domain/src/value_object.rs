//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//! 派生 `PartialEq/Eq/Hash` 即可获得按声明字段顺序的结构相等，
//! 具体类型不应手写相等实现，构造完成后也不提供任何可变方法。
//!
use std::fmt;

use serde::{Deserialize, Serialize};

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 版本号（用于乐观锁和并发控制）
///
/// # 示例
///
/// ```
/// use modelkit_domain::value_object::Version;
///
/// let v = Version::new();
/// assert!(v.is_new());
/// assert_eq!(v.next().value(), 1);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version(usize);

impl Version {
    /// 创建初始版本（版本号为 0，表示尚未持久化）
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn from_value(value: usize) -> Self {
        Self(value)
    }

    /// 获取下一个版本号
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(&self) -> usize {
        self.0
    }

    /// 是否为初始版本（尚未持久化）
    pub fn is_new(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for Version {
    fn from(value: usize) -> Self {
        Self::from_value(value)
    }
}

impl From<Version> for usize {
    fn from(version: Version) -> Self {
        version.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 示例值对象：两个字段参与结构相等
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Quantity {
        amount: u32,
        unit: String,
    }

    impl ValueObject for Quantity {
        type Error = String;

        fn validate(&self) -> Result<(), Self::Error> {
            if self.amount == 0 {
                return Err("amount must be > 0".into());
            }
            Ok(())
        }
    }

    #[test]
    fn value_objects_compare_structurally() {
        let a = Quantity {
            amount: 3,
            unit: "pcs".into(),
        };
        let b = Quantity {
            amount: 3,
            unit: "pcs".into(),
        };
        let c = Quantity {
            amount: 4,
            unit: "pcs".into(),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn validation_rejects_invalid_values() {
        let q = Quantity {
            amount: 0,
            unit: "pcs".into(),
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn version_lifecycle() {
        let v0 = Version::new();
        assert!(v0.is_new());

        let v1 = v0.next();
        assert!(!v1.is_new());
        assert!(v1 > v0);
        assert_eq!(v1, Version::from_value(1));
        assert_eq!(format!("{v1}"), "v1");
    }

    #[test]
    fn version_converts_to_and_from_usize() {
        let v: Version = 42.into();
        assert_eq!(usize::from(v), 42);
    }
}
