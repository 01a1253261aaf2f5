//! 选择器解析服务 - 业务能力层
//!
//! 解释 `models::selectors` 中的选择器链：按优先级逐个尝试，第一个命中的策略生效，
//! 之后的策略不再执行。未命中是普通数据状态，不是错误。

use crate::error::DomError;
use crate::infrastructure::Scope;
use crate::models::SelectorChain;
use tracing::debug;

/// 单个字段的解析结果
#[derive(Debug)]
pub enum FieldOutcome {
    /// 某个策略命中，值已经过 trim / 变换
    Found(String),
    /// 所有策略都没有匹配
    Missing,
    /// 没有策略命中，且至少一个策略的查询本身失败
    Failed(DomError),
}

impl FieldOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, FieldOutcome::Found(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FieldOutcome::Failed(_))
    }

    /// 取出文本，未命中或失败时为空字符串
    pub fn into_text(self) -> String {
        match self {
            FieldOutcome::Found(text) => text,
            FieldOutcome::Missing | FieldOutcome::Failed(_) => String::new(),
        }
    }
}

/// 选择器链解释器
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorResolver;

impl SelectorResolver {
    pub fn new() -> Self {
        Self
    }

    /// 解析字段文本，永远不会失败
    pub async fn resolve<S: Scope>(&self, scope: &S, chain: &SelectorChain) -> String {
        self.resolve_outcome(scope, chain).await.into_text()
    }

    /// 解析字段，并区分"未找到"和"查询失败"
    ///
    /// 某个策略查询失败时继续尝试后面的策略
    pub async fn resolve_outcome<S: Scope>(&self, scope: &S, chain: &SelectorChain) -> FieldOutcome {
        let mut last_error = None;

        for strategy in chain.strategies {
            match scope.first_text(strategy).await {
                Ok(Some(raw)) => {
                    debug!("字段 {} 命中选择器 `{}`", chain.field, strategy);
                    return FieldOutcome::Found(chain.transform.apply(&raw));
                }
                Ok(None) => {}
                Err(e) => {
                    debug!("字段 {} 的选择器 `{}` 查询失败: {}", chain.field, strategy, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => FieldOutcome::Failed(e),
            None => FieldOutcome::Missing,
        }
    }

    /// 定位多个元素：第一个匹配到至少一个元素的策略生效
    ///
    /// 全部策略都没有匹配时返回空列表；只有在没有任何匹配且存在查询失败时返回错误
    pub async fn locate_all<S: Scope>(
        &self,
        scope: &S,
        chain: &SelectorChain,
    ) -> Result<Vec<S::Element>, DomError> {
        let mut last_error = None;

        for strategy in chain.strategies {
            match scope.select_all(strategy).await {
                Ok(elements) if !elements.is_empty() => {
                    debug!(
                        "{} 使用选择器 `{}` 找到 {} 个元素",
                        chain.field,
                        strategy,
                        elements.len()
                    );
                    return Ok(elements);
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("{} 的选择器 `{}` 查询失败: {}", chain.field, strategy, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}
