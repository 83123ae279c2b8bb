//! 规约（Specification）模式
//!
//! 可组合的业务谓词，既能在内存中直接求值，也能以谓词 AST 的形式
//! 交给存储适配层翻译为原生查询，而不是悄悄退化为仅内存过滤。
//!
//! - `Predicate`：小型谓词 AST（命名字段上的相等/比较 + and/or/not）；
//! - `QueryModel`：候选对象向查询字段的投影，内存求值即对 AST 的解释执行；
//! - `Specification<T>`：产出 `Predicate` 的规约，组合子 `and/or/not`
//!   在 AST 层组合，保持可翻译性。
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 查询字段的标量值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    String(String),
    Integer(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    /// 同类标量之间的比较；类型不一致时无序
    fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::String(a), Scalar::String(b)) => Some(a.cmp(b)),
            (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(b)),
            (Scalar::Bool(a), Scalar::Bool(b)) => Some(a.cmp(b)),
            (Scalar::Timestamp(a), Scalar::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Timestamp(value)
    }
}

/// 谓词 AST：存储适配层可将其编译为原生查询语言，
/// 内存求值则直接解释执行同一棵树。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// 恒真（空条件）
    True,
    Eq { field: String, value: Scalar },
    Ne { field: String, value: Scalar },
    Gt { field: String, value: Scalar },
    Ge { field: String, value: Scalar },
    Lt { field: String, value: Scalar },
    Le { field: String, value: Scalar },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Predicate::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Predicate::Ne {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Predicate::Gt {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn ge(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Predicate::Ge {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Predicate::Lt {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn le(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Predicate::Le {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// 对候选对象解释执行该谓词。
    ///
    /// 字段缺失或类型不一致时比较不成立（`Ne` 同样要求字段存在且同类）。
    pub fn evaluate<T: QueryModel>(&self, candidate: &T) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Eq { field, value } => {
                candidate.field(field).as_ref() == Some(value)
            }
            Predicate::Ne { field, value } => matches!(
                candidate.field(field).as_ref().and_then(|f| f.compare(value)),
                Some(Ordering::Less) | Some(Ordering::Greater)
            ),
            Predicate::Gt { field, value } => matches!(
                candidate.field(field).as_ref().and_then(|f| f.compare(value)),
                Some(Ordering::Greater)
            ),
            Predicate::Ge { field, value } => matches!(
                candidate.field(field).as_ref().and_then(|f| f.compare(value)),
                Some(Ordering::Greater) | Some(Ordering::Equal)
            ),
            Predicate::Lt { field, value } => matches!(
                candidate.field(field).as_ref().and_then(|f| f.compare(value)),
                Some(Ordering::Less)
            ),
            Predicate::Le { field, value } => matches!(
                candidate.field(field).as_ref().and_then(|f| f.compare(value)),
                Some(Ordering::Less) | Some(Ordering::Equal)
            ),
            Predicate::And(left, right) => {
                left.evaluate(candidate) && right.evaluate(candidate)
            }
            Predicate::Or(left, right) => {
                left.evaluate(candidate) || right.evaluate(candidate)
            }
            Predicate::Not(inner) => !inner.evaluate(candidate),
        }
    }
}

/// 候选对象向命名查询字段的投影
pub trait QueryModel {
    /// 按名称取出字段的标量值；未知字段返回 `None`
    fn field(&self, name: &str) -> Option<Scalar>;
}

/// 规约模式的核心 trait
///
/// 用于封装业务查询条件，使其可复用、可组合和可翻译。
/// 具体规约持有自己的参数（如阈值小时数），并据此产出底层谓词。
pub trait Specification<T>: Send + Sync
where
    T: QueryModel,
{
    /// 产出等价的谓词 AST（供存储适配层翻译）
    fn to_predicate(&self) -> Predicate;

    /// 检查候选对象是否满足规约（对 AST 的内存解释执行）
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.to_predicate().evaluate(candidate)
    }

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> AndSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        AndSpecification::new(Box::new(self), Box::new(other))
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> OrSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        OrSpecification::new(Box::new(self), Box::new(other))
    }

    /// 对规约进行 NOT 操作
    fn not(self) -> NotSpecification<T>
    where
        Self: Sized + 'static,
    {
        NotSpecification::new(Box::new(self))
    }
}

/// 为 Box<dyn Specification<T>> 实现 Specification trait，
/// 使得可以直接使用 Box 类型的规约
impl<T> Specification<T> for Box<dyn Specification<T>>
where
    T: QueryModel,
{
    fn to_predicate(&self) -> Predicate {
        self.as_ref().to_predicate()
    }

    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// AND 组合规约：两个规约都满足时才满足
pub struct AndSpecification<T>
where
    T: QueryModel,
{
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> AndSpecification<T>
where
    T: QueryModel,
{
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for AndSpecification<T>
where
    T: QueryModel,
{
    fn to_predicate(&self) -> Predicate {
        self.left.to_predicate().and(self.right.to_predicate())
    }
}

/// OR 组合规约：任意一个规约满足时就满足
pub struct OrSpecification<T>
where
    T: QueryModel,
{
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> OrSpecification<T>
where
    T: QueryModel,
{
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for OrSpecification<T>
where
    T: QueryModel,
{
    fn to_predicate(&self) -> Predicate {
        self.left.to_predicate().or(self.right.to_predicate())
    }
}

/// NOT 规约：内部规约不满足时才满足
pub struct NotSpecification<T>
where
    T: QueryModel,
{
    inner: Box<dyn Specification<T>>,
}

impl<T> NotSpecification<T>
where
    T: QueryModel,
{
    pub fn new(inner: Box<dyn Specification<T>>) -> Self {
        Self { inner }
    }
}

impl<T> Specification<T> for NotSpecification<T>
where
    T: QueryModel,
{
    fn to_predicate(&self) -> Predicate {
        self.inner.to_predicate().not()
    }
}
