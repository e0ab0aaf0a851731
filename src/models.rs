use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five CHED award categories, in the order every scan and tie-break uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AwardCategory {
    Leadership,
    Education,
    Emerging,
    Regional,
    Citizenship,
}

impl AwardCategory {
    pub const ALL: [AwardCategory; 5] = [
        AwardCategory::Leadership,
        AwardCategory::Education,
        AwardCategory::Emerging,
        AwardCategory::Regional,
        AwardCategory::Citizenship,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AwardCategory::Leadership => "leadership",
            AwardCategory::Education => "education",
            AwardCategory::Emerging => "emerging",
            AwardCategory::Regional => "regional",
            AwardCategory::Citizenship => "citizenship",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AwardCategory::Leadership => "Leadership",
            AwardCategory::Education => "Education",
            AwardCategory::Emerging => "Emerging",
            AwardCategory::Regional => "Regional",
            AwardCategory::Citizenship => "Citizenship",
        }
    }

    pub fn award_name(self) -> &'static str {
        match self {
            AwardCategory::Leadership => "Internationalization (IZN) Leadership Award",
            AwardCategory::Education => "Outstanding International Education Program Award",
            AwardCategory::Emerging => "Emerging Leadership Award",
            AwardCategory::Regional => "Best Regional Office for Internationalization Award",
            AwardCategory::Citizenship => "Global Citizenship Award",
        }
    }

    /// Accepts the lowercase key plus `global`, which older records use for citizenship.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "leadership" => Some(AwardCategory::Leadership),
            "education" => Some(AwardCategory::Education),
            "emerging" => Some(AwardCategory::Emerging),
            "regional" => Some(AwardCategory::Regional),
            "citizenship" | "global" => Some(AwardCategory::Citizenship),
            _ => None,
        }
    }
}

impl fmt::Display for AwardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("counter {field} cannot be negative (got {value})")]
    NegativeCounter { field: &'static str, value: i64 },
    #[error("counter {field} is too large (got {value})")]
    CounterOverflow { field: &'static str, value: i64 },
}

/// Unvalidated counters as they arrive from JSON, CSV, or database rows.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityProfile {
    pub international_partnerships: i64,
    pub student_exchanges: i64,
    pub research_collaborations: i64,
    pub international_conferences: i64,
    pub cultural_programs: i64,
    pub regional_initiatives: i64,
    pub global_projects: i64,
    pub academic_programs: i64,
    pub leadership_programs: i64,
    pub community_engagement: i64,
}

/// Activity counts for one institution over an observation period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawActivityProfile")]
pub struct ActivityProfile {
    pub international_partnerships: u32,
    pub student_exchanges: u32,
    pub research_collaborations: u32,
    pub international_conferences: u32,
    pub cultural_programs: u32,
    pub regional_initiatives: u32,
    pub global_projects: u32,
    pub academic_programs: u32,
    pub leadership_programs: u32,
    pub community_engagement: u32,
}

impl ActivityProfile {
    pub fn from_counts(raw: RawActivityProfile) -> Result<Self, ProfileError> {
        Ok(Self {
            international_partnerships: counter(
                "internationalPartnerships",
                raw.international_partnerships,
            )?,
            student_exchanges: counter("studentExchanges", raw.student_exchanges)?,
            research_collaborations: counter(
                "researchCollaborations",
                raw.research_collaborations,
            )?,
            international_conferences: counter(
                "internationalConferences",
                raw.international_conferences,
            )?,
            cultural_programs: counter("culturalPrograms", raw.cultural_programs)?,
            regional_initiatives: counter("regionalInitiatives", raw.regional_initiatives)?,
            global_projects: counter("globalProjects", raw.global_projects)?,
            academic_programs: counter("academicPrograms", raw.academic_programs)?,
            leadership_programs: counter("leadershipPrograms", raw.leadership_programs)?,
            community_engagement: counter("communityEngagement", raw.community_engagement)?,
        })
    }

    /// Typical counts for a mid-sized university, used when no records exist yet.
    pub fn sample() -> Self {
        Self {
            international_partnerships: 8,
            student_exchanges: 12,
            research_collaborations: 15,
            international_conferences: 6,
            cultural_programs: 4,
            regional_initiatives: 7,
            global_projects: 9,
            academic_programs: 18,
            leadership_programs: 5,
            community_engagement: 11,
        }
    }

    pub fn total_activities(&self) -> u64 {
        [
            self.international_partnerships,
            self.student_exchanges,
            self.research_collaborations,
            self.international_conferences,
            self.cultural_programs,
            self.regional_initiatives,
            self.global_projects,
            self.academic_programs,
            self.leadership_programs,
            self.community_engagement,
        ]
        .iter()
        .map(|value| u64::from(*value))
        .sum()
    }
}

impl TryFrom<RawActivityProfile> for ActivityProfile {
    type Error = ProfileError;

    fn try_from(raw: RawActivityProfile) -> Result<Self, Self::Error> {
        Self::from_counts(raw)
    }
}

fn counter(field: &'static str, value: i64) -> Result<u32, ProfileError> {
    if value < 0 {
        return Err(ProfileError::NegativeCounter { field, value });
    }
    u32::try_from(value).map_err(|_| ProfileError::CounterOverflow { field, value })
}

/// Qualification percentages, one per category, each within 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreSet {
    pub leadership: u8,
    pub education: u8,
    pub emerging: u8,
    pub regional: u8,
    pub citizenship: u8,
}

impl ScoreSet {
    pub fn from_fn(mut score: impl FnMut(AwardCategory) -> u8) -> Self {
        Self {
            leadership: score(AwardCategory::Leadership).min(100),
            education: score(AwardCategory::Education).min(100),
            emerging: score(AwardCategory::Emerging).min(100),
            regional: score(AwardCategory::Regional).min(100),
            citizenship: score(AwardCategory::Citizenship).min(100),
        }
    }

    pub fn get(&self, category: AwardCategory) -> u8 {
        match category {
            AwardCategory::Leadership => self.leadership,
            AwardCategory::Education => self.education,
            AwardCategory::Emerging => self.emerging,
            AwardCategory::Regional => self.regional,
            AwardCategory::Citizenship => self.citizenship,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AwardCategory, u8)> + '_ {
        AwardCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Critical,
    Improvement,
    Opportunity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => f.write_str("High"),
            Priority::Medium => f.write_str("Medium"),
            Priority::Low => f.write_str("Low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub profile: ActivityProfile,
    pub scores: ScoreSet,
    pub overall: u8,
    pub best_match: AwardCategory,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub institution: String,
    pub observed_on: NaiveDate,
    pub profile: ActivityProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedAward {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub requirements: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardMatch {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub top_matches: Vec<(AwardCategory, u8)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_counters_by_field_name() {
        let raw = RawActivityProfile {
            cultural_programs: -2,
            ..RawActivityProfile::default()
        };

        let err = ActivityProfile::from_counts(raw).unwrap_err();
        assert_eq!(
            err,
            ProfileError::NegativeCounter {
                field: "culturalPrograms",
                value: -2
            }
        );
    }

    #[test]
    fn deserializes_camel_case_json_with_validation() {
        let json = r#"{
            "internationalPartnerships": 8, "studentExchanges": 12,
            "researchCollaborations": 15, "internationalConferences": 6,
            "culturalPrograms": 4, "regionalInitiatives": 7,
            "globalProjects": 9, "academicPrograms": 18,
            "leadershipPrograms": 5, "communityEngagement": 11
        }"#;
        let profile: ActivityProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile, ActivityProfile::sample());

        let negative = json.replace("\"globalProjects\": 9", "\"globalProjects\": -1");
        assert!(serde_json::from_str::<ActivityProfile>(&negative).is_err());
    }

    #[test]
    fn score_set_iterates_in_category_order() {
        let scores = ScoreSet {
            leadership: 1,
            education: 2,
            emerging: 3,
            regional: 4,
            citizenship: 5,
        };
        let collected: Vec<_> = scores.iter().collect();
        assert_eq!(collected[0], (AwardCategory::Leadership, 1));
        assert_eq!(collected[4], (AwardCategory::Citizenship, 5));
    }

    #[test]
    fn parses_legacy_global_key() {
        assert_eq!(AwardCategory::parse("Global"), Some(AwardCategory::Citizenship));
        assert_eq!(AwardCategory::parse("unknown"), None);
    }
}
