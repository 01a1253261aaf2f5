//! 单条评论提取服务 - 业务能力层
//!
//! 只处理一个评论容器，不关心页面和批次

use crate::infrastructure::Scope;
use crate::models::{FieldSelectors, ReviewRecord};
use crate::services::selector_resolver::{FieldOutcome, SelectorResolver};
use tracing::warn;

/// 一个容器内五个评论字段的解析结果，顺序与 `FieldSelectors::review_fields` 一致
#[derive(Debug)]
pub struct ExtractedFields {
    pub reviewer: FieldOutcome,
    pub review_title: FieldOutcome,
    pub rating: FieldOutcome,
    pub review_date: FieldOutcome,
    pub review_body: FieldOutcome,
}

impl ExtractedFields {
    fn outcomes(&self) -> [&FieldOutcome; 5] {
        [
            &self.reviewer,
            &self.review_title,
            &self.rating,
            &self.review_date,
            &self.review_body,
        ]
    }

    /// 所有字段的查询都失败，说明容器本身已不可用（节点失效等）
    pub fn is_structural_failure(&self) -> bool {
        self.outcomes().iter().all(|outcome| outcome.is_failed())
    }

    /// 命中的字段数量
    pub fn found_count(&self) -> usize {
        self.outcomes().iter().filter(|outcome| outcome.is_found()).count()
    }
}

/// 评论提取器
#[derive(Debug, Clone, Default)]
pub struct RecordExtractor {
    resolver: SelectorResolver,
    selectors: FieldSelectors,
}

impl RecordExtractor {
    pub fn new(selectors: FieldSelectors) -> Self {
        Self {
            resolver: SelectorResolver::new(),
            selectors,
        }
    }

    /// 从一个评论容器提取完整记录
    ///
    /// 不会失败：缺失或查询失败的字段都记为空字符串
    pub async fn extract<S: Scope>(&self, container: &S, product_title: &str) -> ReviewRecord {
        let fields = self.extract_fields(container).await;
        self.assemble(fields, product_title)
    }

    /// 逐个字段解析，保留每个字段的结果状态
    pub async fn extract_fields<S: Scope>(&self, container: &S) -> ExtractedFields {
        let [reviewer, review_title, rating, review_date, review_body] =
            self.selectors.review_fields();

        ExtractedFields {
            reviewer: self.resolver.resolve_outcome(container, reviewer).await,
            review_title: self.resolver.resolve_outcome(container, review_title).await,
            rating: self.resolver.resolve_outcome(container, rating).await,
            review_date: self.resolver.resolve_outcome(container, review_date).await,
            review_body: self.resolver.resolve_outcome(container, review_body).await,
        }
    }

    /// 组装记录，查询失败的字段记录日志后置空
    pub fn assemble(&self, fields: ExtractedFields, product_title: &str) -> ReviewRecord {
        let chains = self.selectors.review_fields();
        for (chain, outcome) in chains.iter().zip(fields.outcomes()) {
            if let FieldOutcome::Failed(e) = outcome {
                warn!("字段 {} 提取失败，置为空: {}", chain.field, e);
            }
        }

        ReviewRecord {
            product_title: product_title.to_string(),
            reviewer: fields.reviewer.into_text(),
            review_title: fields.review_title.into_text(),
            rating: fields.rating.into_text(),
            review_date: fields.review_date.into_text(),
            review_body: fields.review_body.into_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::HtmlDocument;

    const FULL_REVIEW: &str = r#"
        <div data-hook="review">
          <span class="a-profile-name">Ann</span>
          <a data-hook="review-title"><i>ignored</i><span>Boils fast</span></a>
          <i data-hook="review-star-rating"><span>5.0 out of 5 stars</span></i>
          <span data-hook="review-date">Reviewed in the United States on March 3, 2024</span>
          <span data-hook="review-body"><span> Quiet and quick. </span></span>
        </div>
    "#;

    #[tokio::test]
    async fn test_extracts_all_fields() {
        let doc = HtmlDocument::new(FULL_REVIEW);
        let record = RecordExtractor::default().extract(&doc, "Steel Kettle").await;

        assert_eq!(
            record,
            ReviewRecord {
                product_title: "Steel Kettle".to_string(),
                reviewer: "Ann".to_string(),
                review_title: "Boils fast".to_string(),
                rating: "5.0".to_string(),
                review_date: "Reviewed in the United States on March 3, 2024".to_string(),
                review_body: "Quiet and quick.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_falls_back_to_bare_markers() {
        let doc = HtmlDocument::new(
            r#"
            <div>
              <span data-hook="review-title">Plain title</span>
              <span data-hook="review-star-rating">3.0 out of 5 stars</span>
              <div data-hook="review-body">Body without inner span</div>
            </div>
            "#,
        );
        let record = RecordExtractor::default().extract(&doc, "Kettle").await;

        assert_eq!(record.review_title, "Plain title");
        assert_eq!(record.rating, "3.0");
        assert_eq!(record.review_body, "Body without inner span");
        assert_eq!(record.reviewer, "");
        assert_eq!(record.review_date, "");
    }

    #[tokio::test]
    async fn test_all_missing_yields_complete_empty_record() {
        let doc = HtmlDocument::new("<div><p>unrelated markup</p></div>");
        let extractor = RecordExtractor::default();

        let fields = extractor.extract_fields(&doc).await;
        assert_eq!(fields.found_count(), 0);
        assert!(!fields.is_structural_failure());

        let record = extractor.assemble(fields, "");
        assert_eq!(record, ReviewRecord::default());
    }

    #[test]
    fn test_structural_failure_detection() {
        use crate::error::DomError;

        let failed = || {
            FieldOutcome::Failed(DomError::QueryFailed {
                selector: "*".to_string(),
                message: "Could not find node with given id".to_string(),
            })
        };
        let fields = ExtractedFields {
            reviewer: failed(),
            review_title: failed(),
            rating: failed(),
            review_date: failed(),
            review_body: failed(),
        };
        assert!(fields.is_structural_failure());

        let record = RecordExtractor::default().assemble(fields, "Kettle");
        assert_eq!(record.product_title, "Kettle");
        assert_eq!(record.review_body, "");
    }
}
