use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{AwardCategory, AwardMatch, ScoreSet, UploadedAward};
use crate::scoring;

pub const TOP_MATCHES: usize = 3;

/// |A ∩ B| / |A ∪ B|, with two empty sets counted as identical.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

pub fn percent(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// One keyword set per award category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSets {
    pub leadership: BTreeSet<String>,
    pub education: BTreeSet<String>,
    pub emerging: BTreeSet<String>,
    pub regional: BTreeSet<String>,
    pub citizenship: BTreeSet<String>,
}

impl KeywordSets {
    pub fn get(&self, category: AwardCategory) -> &BTreeSet<String> {
        match category {
            AwardCategory::Leadership => &self.leadership,
            AwardCategory::Education => &self.education,
            AwardCategory::Emerging => &self.emerging,
            AwardCategory::Regional => &self.regional,
            AwardCategory::Citizenship => &self.citizenship,
        }
    }

    pub fn award_criteria() -> Self {
        Self {
            leadership: words(&[
                "leadership",
                "partnership",
                "exchange",
                "global",
                "international",
                "collaboration",
                "initiative",
                "management",
                "coordination",
            ]),
            ..Self::activity_defaults()
        }
    }

    /// Keywords drawn from the activities a typical office records.
    pub fn activity_defaults() -> Self {
        Self {
            leadership: words(&[
                "partnership",
                "exchange",
                "global",
                "international",
                "collaboration",
                "initiative",
                "management",
                "coordination",
            ]),
            education: words(&[
                "education",
                "curriculum",
                "research",
                "academic",
                "program",
                "course",
                "study",
                "learning",
                "teaching",
                "scholarship",
            ]),
            emerging: words(&[
                "emerging",
                "innovation",
                "new",
                "creative",
                "pioneering",
                "breakthrough",
                "advancement",
                "development",
                "growth",
                "future",
            ]),
            regional: words(&[
                "regional",
                "local",
                "community",
                "area",
                "district",
                "province",
                "coordination",
                "management",
                "office",
                "administration",
            ]),
            citizenship: words(&[
                "citizenship",
                "global",
                "cultural",
                "exchange",
                "community",
                "awareness",
                "engagement",
                "social",
                "responsibility",
                "diversity",
            ]),
        }
    }
}

fn words(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|word| word.to_string()).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordMatch {
    pub scores: ScoreSet,
    pub overall: u8,
    pub best: AwardCategory,
}

pub fn match_keywords(criteria: &KeywordSets, activities: &KeywordSets) -> KeywordMatch {
    let scores = ScoreSet::from_fn(|category| {
        percent(jaccard(criteria.get(category), activities.get(category)))
    });

    KeywordMatch {
        overall: scoring::overall_score(&scores),
        best: scoring::best_match(&scores),
        scores,
    }
}

pub fn rank_award(award: &UploadedAward, criteria: &KeywordSets) -> AwardMatch {
    let requirements = tokenize(&award.requirements);
    let mut ranked: Vec<(AwardCategory, u8)> = AwardCategory::ALL
        .iter()
        .map(|category| (*category, percent(jaccard(&requirements, criteria.get(*category)))))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_MATCHES);

    AwardMatch {
        id: award.id,
        name: award.name.clone(),
        category: award.category.clone(),
        top_matches: ranked,
    }
}

pub fn rank_awards(awards: &[UploadedAward], criteria: &KeywordSets) -> Vec<AwardMatch> {
    awards
        .iter()
        .map(|award| rank_award(award, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn set(list: &[&str]) -> BTreeSet<String> {
        words(list)
    }

    #[test]
    fn jaccard_handles_empty_sets() {
        assert_eq!(jaccard(&set(&[]), &set(&[])), 1.0);
        assert_eq!(jaccard(&set(&["grant"]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&[]), &set(&["grant"])), 0.0);
    }

    #[test]
    fn jaccard_measures_overlap() {
        let a = set(&["publication", "patent", "grant", "conference"]);
        let b = set(&["grant", "fellowship", "publication"]);
        assert!((jaccard(&a, &b) - 0.4).abs() < 1e-9);

        let disjoint = jaccard(
            &set(&["accreditation", "community extension"]),
            &set(&["student housing", "scholarship grants"]),
        );
        assert_eq!(disjoint, 0.0);
    }

    #[test]
    fn tokenize_lowercases_and_splits_on_punctuation() {
        let tokens = tokenize("Global Citizenship: community-engagement, 2 programs!");
        assert_eq!(
            tokens,
            set(&["global", "citizenship", "community", "engagement", "2", "programs"])
        );
        assert!(tokenize("  --  ").is_empty());
    }

    #[test]
    fn default_keyword_match_is_near_perfect() {
        let result = match_keywords(
            &KeywordSets::award_criteria(),
            &KeywordSets::activity_defaults(),
        );
        // leadership misses only the "leadership" keyword itself: 8 / 9
        assert_eq!(result.scores.leadership, 89);
        assert_eq!(result.scores.education, 100);
        assert_eq!(result.scores.citizenship, 100);
        assert_eq!(result.overall, 98);
        assert_eq!(result.best, AwardCategory::Education);
    }

    #[test]
    fn award_ranking_keeps_top_three_in_order() {
        let award = UploadedAward {
            id: Uuid::new_v4(),
            name: "Regional Partner Award".to_string(),
            description: None,
            category: Some("regional".to_string()),
            requirements: "Regional community office coordination and management".to_string(),
        };

        let ranked = rank_award(&award, &KeywordSets::award_criteria());
        assert_eq!(ranked.top_matches.len(), TOP_MATCHES);
        assert_eq!(ranked.top_matches[0], (AwardCategory::Regional, 45));
        assert_eq!(ranked.top_matches[1].0, AwardCategory::Leadership);
        assert!(ranked.top_matches[1].1 >= ranked.top_matches[2].1);
    }
}
