use crate::models::{
    ActivityProfile, Analysis, Priority, Recommendation, RecommendationKind, ScoreSet,
};
use crate::scoring;

pub const CRITICAL_THRESHOLD: u8 = 30;
pub const LEADERSHIP_THRESHOLD: u8 = 50;
pub const EDUCATION_THRESHOLD: u8 = 50;
pub const CITIZENSHIP_THRESHOLD: u8 = 40;

pub const WELL_POSITIONED_MESSAGE: &str =
    "Excellent! Your university is well-positioned for all CHED awards.";

/// Rules fire independently, in a fixed order, so at most four come back.
pub fn recommend(scores: &ScoreSet, _profile: &ActivityProfile) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let lowest = scoring::lowest_category(scores);
    if scores.get(lowest) < CRITICAL_THRESHOLD {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Critical,
            title: format!("Focus on {} Development", lowest.label()),
            description: format!(
                "Your {} score is low. Consider developing more programs in this area.",
                lowest.key()
            ),
            priority: Priority::High,
        });
    }

    if scores.leadership < LEADERSHIP_THRESHOLD {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Improvement,
            title: "Enhance International Leadership".to_string(),
            description: "Increase international partnerships and student exchange programs."
                .to_string(),
            priority: Priority::Medium,
        });
    }

    if scores.education < EDUCATION_THRESHOLD {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Improvement,
            title: "Strengthen Academic Programs".to_string(),
            description: "Develop more international curriculum and research collaborations."
                .to_string(),
            priority: Priority::Medium,
        });
    }

    if scores.citizenship < CITIZENSHIP_THRESHOLD {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Opportunity,
            title: "Expand Cultural Programs".to_string(),
            description: "Increase cultural exchange and community engagement initiatives."
                .to_string(),
            priority: Priority::Low,
        });
    }

    recommendations
}

pub fn analyze(profile: &ActivityProfile) -> Analysis {
    let scores = scoring::score(profile);
    let overall = scoring::overall_score(&scores);
    let best_match = scoring::best_match(&scores);
    let recommendations = recommend(&scores, profile);

    tracing::debug!(
        overall,
        best_match = %best_match,
        recommendations = recommendations.len(),
        "activity profile analyzed"
    );

    Analysis {
        profile: *profile,
        scores,
        overall,
        best_match,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AwardCategory;

    fn scores(values: [u8; 5]) -> ScoreSet {
        ScoreSet::from_fn(|category| {
            let index = AwardCategory::ALL
                .iter()
                .position(|candidate| *candidate == category)
                .unwrap_or(0);
            values[index]
        })
    }

    #[test]
    fn sample_profile_fires_every_rule() {
        let analysis = analyze(&ActivityProfile::sample());
        let titles: Vec<&str> = analysis
            .recommendations
            .iter()
            .map(|rec| rec.title.as_str())
            .collect();

        assert_eq!(
            titles,
            vec![
                "Focus on Regional Development",
                "Enhance International Leadership",
                "Strengthen Academic Programs",
                "Expand Cultural Programs",
            ]
        );
        assert_eq!(analysis.recommendations[0].kind, RecommendationKind::Critical);
        assert_eq!(analysis.recommendations[0].priority, Priority::High);
        assert_eq!(
            analysis.recommendations[0].description,
            "Your regional score is low. Consider developing more programs in this area."
        );
        assert_eq!(analysis.recommendations[3].priority, Priority::Low);
        assert_eq!(analysis.overall, 24);
        assert_eq!(analysis.best_match, AwardCategory::Education);
    }

    #[test]
    fn well_positioned_profile_gets_no_recommendations() {
        let result = recommend(&scores([50, 50, 50, 50, 50]), &ActivityProfile::default());
        assert!(result.is_empty());

        let result = recommend(&scores([100, 90, 30, 75, 40]), &ActivityProfile::default());
        assert!(result.is_empty());
    }

    #[test]
    fn critical_rule_picks_earliest_of_tied_minimums() {
        let result = recommend(&scores([80, 80, 12, 90, 12]), &ActivityProfile::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Focus on Emerging Development");
        assert_eq!(result[1].title, "Expand Cultural Programs");
    }

    #[test]
    fn rules_fire_independently() {
        let result = recommend(&scores([49, 60, 60, 60, 60]), &ActivityProfile::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, RecommendationKind::Improvement);
        assert_eq!(result[0].priority, Priority::Medium);

        let result = recommend(&scores([60, 60, 60, 60, 39]), &ActivityProfile::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, RecommendationKind::Opportunity);
    }

    #[test]
    fn never_exceeds_one_recommendation_per_rule() {
        let result = recommend(&ScoreSet::default(), &ActivityProfile::default());
        assert_eq!(result.len(), 4);
        assert_eq!(result[0].title, "Focus on Leadership Development");
    }

    #[test]
    fn recommendation_serializes_type_field() {
        let result = recommend(&ScoreSet::default(), &ActivityProfile::default());
        let json = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(json["type"], "critical");
        assert_eq!(json["priority"], "High");
    }
}
