use std::fmt;

use serde::Serialize;

use crate::models::AwardCategory;

/// Evidence items a category needs before an application is worth filing.
pub fn threshold(category: AwardCategory) -> u32 {
    match category {
        AwardCategory::Leadership => 5,
        AwardCategory::Education => 3,
        AwardCategory::Emerging => 3,
        AwardCategory::Regional => 4,
        AwardCategory::Citizenship => 3,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwardCounter {
    pub category: AwardCategory,
    pub documents: u32,
    pub events: u32,
}

impl AwardCounter {
    pub fn total_content(&self) -> u32 {
        self.documents.saturating_add(self.events)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadinessStatus {
    #[serde(rename = "Ready to Apply")]
    Ready,
    Incomplete,
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessStatus::Ready => f.write_str("Ready to Apply"),
            ReadinessStatus::Incomplete => f.write_str("Incomplete"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Readiness {
    pub category: AwardCategory,
    pub total_content: u32,
    pub threshold: u32,
    pub status: ReadinessStatus,
    pub progress: u8,
}

pub fn evaluate(counter: &AwardCounter) -> Readiness {
    let total = counter.total_content();
    let threshold = threshold(counter.category);
    let status = if total >= threshold {
        ReadinessStatus::Ready
    } else {
        ReadinessStatus::Incomplete
    };
    let progress = (u64::from(total) * 100 / u64::from(threshold)).min(100) as u8;

    Readiness {
        category: counter.category,
        total_content: total,
        threshold,
        status,
        progress,
    }
}

/// One row per category in enumeration order; categories without evidence count as zero.
pub fn assess(counters: &[AwardCounter]) -> Vec<Readiness> {
    AwardCategory::ALL
        .iter()
        .map(|category| {
            let merged = counters
                .iter()
                .filter(|counter| counter.category == *category)
                .fold(
                    AwardCounter {
                        category: *category,
                        documents: 0,
                        events: 0,
                    },
                    |acc, counter| AwardCounter {
                        category: *category,
                        documents: acc.documents.saturating_add(counter.documents),
                        events: acc.events.saturating_add(counter.events),
                    },
                );
            evaluate(&merged)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_flips_at_threshold() {
        let below = evaluate(&AwardCounter {
            category: AwardCategory::Regional,
            documents: 2,
            events: 1,
        });
        assert_eq!(below.status, ReadinessStatus::Incomplete);
        assert_eq!(below.progress, 75);

        let at = evaluate(&AwardCounter {
            category: AwardCategory::Regional,
            documents: 2,
            events: 2,
        });
        assert_eq!(at.status, ReadinessStatus::Ready);
        assert_eq!(at.progress, 100);
    }

    #[test]
    fn progress_caps_at_one_hundred() {
        let over = evaluate(&AwardCounter {
            category: AwardCategory::Education,
            documents: 9,
            events: 4,
        });
        assert_eq!(over.total_content, 13);
        assert_eq!(over.progress, 100);
    }

    #[test]
    fn assess_fills_missing_categories() {
        let rows = assess(&[
            AwardCounter {
                category: AwardCategory::Citizenship,
                documents: 1,
                events: 0,
            },
            AwardCounter {
                category: AwardCategory::Citizenship,
                documents: 0,
                events: 2,
            },
        ]);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].category, AwardCategory::Leadership);
        assert_eq!(rows[0].total_content, 0);
        assert_eq!(rows[0].status, ReadinessStatus::Incomplete);
        assert_eq!(rows[4].total_content, 3);
        assert_eq!(rows[4].status, ReadinessStatus::Ready);
    }

    #[test]
    fn status_serializes_with_display_text() {
        let json = serde_json::to_value(ReadinessStatus::Ready).unwrap();
        assert_eq!(json, "Ready to Apply");
        assert_eq!(ReadinessStatus::Incomplete.to_string(), "Incomplete");
    }
}
