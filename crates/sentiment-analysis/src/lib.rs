use signal_core::{NewsArticle, SentimentLabel, SentimentResult};

const POSITIVE_WORDS: &[&str] = &[
    "growth", "increase", "boost", "positive", "strong", "bullish", "up", "gain",
];

const NEGATIVE_WORDS: &[&str] = &[
    "decline", "decrease", "drop", "negative", "weak", "bearish", "down", "loss",
    "crisis", "disruption",
];

/// Bag-of-words sentiment aggregator over news articles.
///
/// Matching is by substring, not exact word: "upgrade" counts toward "up",
/// "downturn" toward "down". A token containing both a positive and a
/// negative word contributes to both tallies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAggregator;

impl SentimentAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, articles: &[NewsArticle]) -> SentimentResult {
        let mut score: i64 = 0;
        let mut total_tokens: usize = 0;

        for article in articles {
            let text = format!(
                "{} {}",
                article.title,
                article.description.as_deref().unwrap_or("")
            )
            .to_lowercase();

            for token in text.split_whitespace() {
                total_tokens += 1;
                if POSITIVE_WORDS.iter().any(|w| token.contains(w)) {
                    score += 1;
                }
                if NEGATIVE_WORDS.iter().any(|w| token.contains(w)) {
                    score -= 1;
                }
            }
        }

        let normalized = if total_tokens > 0 {
            score as f64 / total_tokens as f64 * 100.0
        } else {
            0.0
        };

        tracing::debug!(
            articles = articles.len(),
            total_tokens,
            raw_score = score,
            normalized,
            "aggregated sentiment"
        );

        SentimentResult {
            score: normalized,
            label: SentimentLabel::from_score(normalized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(title: &str, description: Option<&str>) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: description.map(|d| d.to_string()),
            published_at: Utc::now(),
            url: "https://example.com/article".to_string(),
        }
    }

    #[test]
    fn empty_article_list_is_neutral() {
        let result = SentimentAggregator::new().analyze(&[]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn no_matching_words_is_neutral() {
        let articles = vec![article("Quarterly filings published today", None)];
        let result = SentimentAggregator::new().analyze(&articles);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn positive_heavy_text_reads_bullish() {
        // 5 of 6 tokens hit the positive list: well past the >2 threshold
        let articles = vec![article("strong growth and bullish gain", Some("boost"))];
        let result = SentimentAggregator::new().analyze(&articles);
        assert!(result.score > 2.0);
        assert_eq!(result.label, SentimentLabel::Bullish);
    }

    #[test]
    fn negative_heavy_text_reads_bearish() {
        let articles = vec![article(
            "supply crisis triggers weak decline",
            Some("shipping disruption and loss"),
        )];
        let result = SentimentAggregator::new().analyze(&articles);
        assert!(result.score < -2.0);
        assert_eq!(result.label, SentimentLabel::Bearish);
    }

    #[test]
    fn matching_is_substring_not_exact() {
        // "upgrade" contains "up", "downturn" contains "down"; they cancel
        let articles = vec![article("upgrade amid downturn", None)];
        let result = SentimentAggregator::new().analyze(&articles);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn missing_description_counts_title_only() {
        let with = SentimentAggregator::new().analyze(&[article("gain", Some("gain"))]);
        let without = SentimentAggregator::new().analyze(&[article("gain", None)]);
        // Both fully positive, but token counts differ
        assert_eq!(with.label, SentimentLabel::Bullish);
        assert_eq!(without.label, SentimentLabel::Bullish);
        assert!(without.score >= with.score);
    }

    #[test]
    fn label_thresholds_bucket_correctly() {
        assert_eq!(SentimentLabel::from_score(2.5), SentimentLabel::Bullish);
        assert_eq!(SentimentLabel::from_score(1.0), SentimentLabel::SlightlyPositive);
        assert_eq!(SentimentLabel::from_score(0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-1.0), SentimentLabel::SlightlyNegative);
        assert_eq!(SentimentLabel::from_score(-2.5), SentimentLabel::Bearish);
    }

    #[test]
    fn token_can_hit_both_lists() {
        // A single token containing "up" and "down" nets to zero
        let articles = vec![article("updown", None)];
        let result = SentimentAggregator::new().analyze(&articles);
        assert_eq!(result.score, 0.0);
    }
}
