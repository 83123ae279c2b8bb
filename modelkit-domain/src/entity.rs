//! 实体（Entity）基础抽象
//!
//! 为聚合与实体提供统一的标识（Id）与版本（optimistic locking）能力，
//! 以及基于标识的相等判断。
//!
use crate::value_object::Version;
use std::fmt::Display;

/// 具备唯一标识与版本的实体抽象
///
/// 相等性以标识为准：两个实例相等当且仅当标识相等且均已赋值（非默认值）。
/// 同一具体类型的约束由类型系统保证（`identity_eq` 仅接受同一实体类型）。
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可显示、可克隆、可比较，且有可识别的“未赋值”默认值
    type Id: Clone + Display + PartialEq + Default;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（用于乐观锁与并发控制）
    fn version(&self) -> Version;

    /// 设置版本（仅供仓储实现在提交时推进乐观锁版本）
    fn set_version(&mut self, version: Version);
}

/// 基于标识的相等判断。
///
/// 持久化尚未分配标识时（默认值），即便两侧标识相同也视为不相等，
/// 避免未初始化实体之间的假相等。
pub fn identity_eq<E: Entity>(a: &E, b: &E) -> bool {
    let unset = E::Id::default();
    a.id() != &unset && b.id() != &unset && a.id() == b.id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_object::Version;

    struct Customer {
        id: String,
        name: String,
    }

    impl Entity for Customer {
        type Id = String;

        fn id(&self) -> &Self::Id {
            &self.id
        }

        fn version(&self) -> Version {
            Version::new()
        }

        fn set_version(&mut self, _version: Version) {}
    }

    #[test]
    fn entities_with_same_id_are_equal() {
        let a = Customer {
            id: "c-1".into(),
            name: "alice".into(),
        };
        let b = Customer {
            id: "c-1".into(),
            name: "bob".into(),
        };
        // 标识相同即相等，内部状态不参与比较
        assert!(identity_eq(&a, &b));
    }

    #[test]
    fn entities_with_different_ids_are_not_equal() {
        let a = Customer {
            id: "c-1".into(),
            name: "alice".into(),
        };
        let b = Customer {
            id: "c-2".into(),
            name: "alice".into(),
        };
        assert!(!identity_eq(&a, &b));
    }

    #[test]
    fn unset_ids_never_compare_equal() {
        let a = Customer {
            id: String::default(),
            name: "alice".into(),
        };
        let b = Customer {
            id: String::default(),
            name: "alice".into(),
        };
        assert!(!identity_eq(&a, &b));
    }
}
