//! Formatting helpers shared by every presentation of the dashboard.

use chrono::{DateTime, Utc};

use crate::types::SentimentStats;

/// One tile of the sentiment summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: u64,
    pub percentage: u32,
}

/// Share of `count` in `total`, rounded to the nearest whole percent.
/// An empty total yields 0 rather than a division by zero.
pub fn percentage(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

pub fn stat_cards(stats: &SentimentStats) -> [StatCard; 4] {
    [
        StatCard {
            label: "Positive",
            value: stats.positive,
            percentage: percentage(stats.positive, stats.total),
        },
        StatCard {
            label: "Negative",
            value: stats.negative,
            percentage: percentage(stats.negative, stats.total),
        },
        StatCard {
            label: "Neutral",
            value: stats.neutral,
            percentage: percentage(stats.neutral, stats.total),
        },
        StatCard {
            label: "Total Articles",
            value: stats.total,
            percentage: 100,
        },
    ]
}

/// Signed score with two decimals; positive scores carry an explicit `+`.
pub fn format_score(score: f64) -> String {
    if score > 0.0 {
        format!("+{:.2}", score)
    } else {
        format!("{:.2}", score)
    }
}

/// "12m ago", "3h ago", "2d ago". Timestamps in the future read as "0m ago".
pub fn format_relative(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - published_at).num_minutes().max(0);
    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_stat_card_percentages() {
        let stats = SentimentStats { positive: 3, negative: 1, neutral: 0, total: 4 };
        let percentages: Vec<u32> = stat_cards(&stats).iter().map(|c| c.percentage).collect();
        assert_eq!(percentages, vec![75, 25, 0, 100]);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
    }

    #[test]
    fn test_empty_stats_do_not_divide_by_zero() {
        let cards = stat_cards(&SentimentStats::default());
        assert_eq!(cards[0].percentage, 0);
        assert_eq!(cards[3].percentage, 100);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.5), "+0.50");
        assert_eq!(format_score(-0.257), "-0.26");
        assert_eq!(format_score(0.0), "0.00");
    }

    #[test]
    fn test_format_relative() {
        let now = Utc::now();
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_relative(now - Duration::minutes(60), now), "1h ago");
        assert_eq!(format_relative(now - Duration::hours(23), now), "23h ago");
        assert_eq!(format_relative(now - Duration::days(3), now), "3d ago");
        assert_eq!(format_relative(now + Duration::minutes(10), now), "0m ago");
    }
}
