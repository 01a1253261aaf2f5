//! 选择器链配置表
//!
//! 每个逻辑字段对应一条按优先级排列的选择器链，由
//! `services::SelectorResolver` 解释执行。修改目标站点的标记适配只需要改这里。

/// 页面上的逻辑字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProductTitle,
    Container,
    Reviewer,
    ReviewTitle,
    Rating,
    ReviewDate,
    ReviewBody,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::ProductTitle => "product_title",
            Field::Container => "container",
            Field::Reviewer => "reviewer",
            Field::ReviewTitle => "review_title",
            Field::Rating => "rating",
            Field::ReviewDate => "review_date",
            Field::ReviewBody => "review_body",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 命中后对文本的处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTransform {
    /// 只去掉首尾空白
    Trim,
    /// 去掉首尾空白后只保留第一个空白分隔的片段（"4.0 out of 5 stars" -> "4.0"）
    FirstToken,
}

impl TextTransform {
    pub fn apply(self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self {
            TextTransform::Trim => trimmed.to_string(),
            TextTransform::FirstToken => trimmed
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// 一个字段的选择器链
#[derive(Debug, Clone, Copy)]
pub struct SelectorChain {
    pub field: Field,
    /// 按优先级排列的 CSS 选择器
    pub strategies: &'static [&'static str],
    pub transform: TextTransform,
}

impl SelectorChain {
    pub const fn new(field: Field, strategies: &'static [&'static str]) -> Self {
        Self {
            field,
            strategies,
            transform: TextTransform::Trim,
        }
    }

    pub const fn with_transform(mut self, transform: TextTransform) -> Self {
        self.transform = transform;
        self
    }

    /// 链中优先级最高的选择器
    pub fn primary(&self) -> &'static str {
        self.strategies.first().copied().unwrap_or_default()
    }
}

pub const PRODUCT_TITLE: SelectorChain = SelectorChain::new(Field::ProductTitle, &["#productTitle"]);

pub const CONTAINER: SelectorChain = SelectorChain::new(
    Field::Container,
    &[
        r#"div[data-hook="review"]"#,
        r#"div[data-hook="review-card"]"#,
        ".review",
    ],
);

pub const REVIEWER: SelectorChain = SelectorChain::new(Field::Reviewer, &[".a-profile-name"]);

pub const REVIEW_TITLE: SelectorChain = SelectorChain::new(
    Field::ReviewTitle,
    &[
        r#"a[data-hook="review-title"] span"#,
        r#"[data-hook="review-title"]"#,
    ],
);

pub const RATING: SelectorChain = SelectorChain::new(
    Field::Rating,
    &[
        r#"i[data-hook="review-star-rating"] span"#,
        r#"[data-hook="review-star-rating"]"#,
    ],
)
.with_transform(TextTransform::FirstToken);

pub const REVIEW_DATE: SelectorChain =
    SelectorChain::new(Field::ReviewDate, &[r#"span[data-hook="review-date"]"#]);

pub const REVIEW_BODY: SelectorChain = SelectorChain::new(
    Field::ReviewBody,
    &[
        r#"span[data-hook="review-body"] span"#,
        r#"[data-hook="review-body"]"#,
    ],
);

/// 整套字段配置
#[derive(Debug, Clone)]
pub struct FieldSelectors {
    pub product_title: SelectorChain,
    pub container: SelectorChain,
    pub reviewer: SelectorChain,
    pub review_title: SelectorChain,
    pub rating: SelectorChain,
    pub review_date: SelectorChain,
    pub review_body: SelectorChain,
}

impl FieldSelectors {
    /// 单条评论内需要提取的字段，按记录字段顺序
    pub fn review_fields(&self) -> [&SelectorChain; 5] {
        [
            &self.reviewer,
            &self.review_title,
            &self.rating,
            &self.review_date,
            &self.review_body,
        ]
    }

    /// 就绪标记：商品标题元素
    pub fn readiness_marker(&self) -> &'static str {
        self.product_title.primary()
    }
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            product_title: PRODUCT_TITLE,
            container: CONTAINER,
            reviewer: REVIEWER,
            review_title: REVIEW_TITLE,
            rating: RATING,
            review_date: REVIEW_DATE,
            review_body: REVIEW_BODY,
        }
    }
}
