/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令）所需的横切信息：
/// - `correlation_id`：跨调用链关联同一业务操作；
/// - `idempotency_key`：用于在基础设施层实现请求幂等
///   （如 API 层重复提交保护），为空则由上层决定是否参与幂等。
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    pub correlation_id: Option<String>,
    pub idempotency_key: Option<String>,
}

impl AppContext {
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            idempotency_key: None,
        }
    }
}
