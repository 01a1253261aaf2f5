use serde::{Deserialize, Serialize};

/// 星级显示的上限
pub const MAX_STARS: usize = 5;

/// 一条评论
///
/// 所有字段都是文本，缺失的字段为空字符串而不是省略，
/// 保证每条记录的结构一致（表格渲染、CSV 导出依赖这一点）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// 商品标题，同一页面的所有评论共享
    pub product_title: String,
    pub reviewer: String,
    pub review_title: String,
    /// 评分的首个文本片段，例如 "4.0"，不保证能解析为数字
    pub rating: String,
    pub review_date: String,
    pub review_body: String,
}

impl ReviewRecord {
    /// 评分对应的星星数量
    ///
    /// 无法解析的评分记为 0，小数向零截断，结果限制在 `0..=MAX_STARS`
    pub fn star_count(&self) -> usize {
        let normalized = self.rating.trim().replace(',', ".");
        match normalized.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => {
                (value.trunc() as usize).min(MAX_STARS)
            }
            _ => 0,
        }
    }

    /// 单行文字卡片，用于日志展示
    pub fn render_card(&self) -> String {
        let stars = self.star_count();
        format!(
            "{} | {} {}{} {} | {}",
            self.product_title,
            self.reviewer,
            "★".repeat(stars),
            "☆".repeat(MAX_STARS - stars),
            self.review_date,
            self.review_title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_rating(rating: &str) -> ReviewRecord {
        ReviewRecord {
            rating: rating.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_star_count_parses_leading_numeral() {
        assert_eq!(with_rating("4.0").star_count(), 4);
        assert_eq!(with_rating("5").star_count(), 5);
        assert_eq!(with_rating("3,5").star_count(), 3);
    }

    #[test]
    fn test_star_count_hardens_bad_input() {
        assert_eq!(with_rating("").star_count(), 0);
        assert_eq!(with_rating("five").star_count(), 0);
        assert_eq!(with_rating("-2").star_count(), 0);
        assert_eq!(with_rating("NaN").star_count(), 0);
        assert_eq!(with_rating("42").star_count(), MAX_STARS);
    }

    #[test]
    fn test_json_uses_snake_case_wire_names() {
        let record = ReviewRecord {
            product_title: "Kettle".to_string(),
            rating: "4.0".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 6);
        assert_eq!(object["product_title"], "Kettle");
        assert_eq!(object["review_body"], "");
    }

    #[test]
    fn test_render_card() {
        let record = ReviewRecord {
            product_title: "Kettle".to_string(),
            reviewer: "Ann".to_string(),
            review_title: "Boils fast".to_string(),
            rating: "4.0".to_string(),
            review_date: "March 3, 2024".to_string(),
            review_body: String::new(),
        };
        assert_eq!(
            record.render_card(),
            "Kettle | Ann ★★★★☆ March 3, 2024 | Boils fast"
        );
    }
}
