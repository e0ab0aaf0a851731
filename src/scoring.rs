use crate::models::{ActivityProfile, AwardCategory, ScoreSet};

/// Weighted counter sum in hundredths and the scalar multiplier in tenths.
// Domain-tuned constants with no published derivation; keep them exactly as recorded.
fn weighted_terms(profile: &ActivityProfile, category: AwardCategory) -> (u64, u64) {
    let ip = u64::from(profile.international_partnerships);
    let se = u64::from(profile.student_exchanges);
    let rc = u64::from(profile.research_collaborations);
    let ic = u64::from(profile.international_conferences);
    let cp = u64::from(profile.cultural_programs);
    let ri = u64::from(profile.regional_initiatives);
    let gp = u64::from(profile.global_projects);
    let ap = u64::from(profile.academic_programs);
    let lp = u64::from(profile.leadership_programs);
    let ce = u64::from(profile.community_engagement);

    match category {
        AwardCategory::Leadership => (ip * 30 + se * 25 + gp * 25 + lp * 20, 25),
        AwardCategory::Education => (ap * 40 + rc * 30 + ic * 20 + se * 10, 22),
        AwardCategory::Emerging => (gp * 30 + ip * 25 + rc * 25 + cp * 20, 28),
        AwardCategory::Regional => (ri * 40 + ce * 30 + ip * 20 + cp * 10, 25),
        AwardCategory::Citizenship => (cp * 35 + ce * 30 + se * 20 + gp * 15, 26),
    }
}

pub fn category_score(profile: &ActivityProfile, category: AwardCategory) -> u8 {
    let (weighted, multiplier) = weighted_terms(profile, category);

    // hundredths times tenths gives thousandths
    let rounded = (weighted * multiplier + 500) / 1000;
    rounded.min(100) as u8
}

pub fn score(profile: &ActivityProfile) -> ScoreSet {
    ScoreSet::from_fn(|category| category_score(profile, category))
}

pub fn overall_score(scores: &ScoreSet) -> u8 {
    let total: u32 = scores.iter().map(|(_, value)| u32::from(value)).sum();
    let count = AwardCategory::ALL.len() as u32;
    ((2 * total + count) / (2 * count)) as u8
}

/// Highest score wins; on a tie the earlier category is kept.
pub fn best_match(scores: &ScoreSet) -> AwardCategory {
    let mut best = AwardCategory::Leadership;
    let mut best_score = scores.get(best);

    for (category, value) in scores.iter().skip(1) {
        if value > best_score {
            best = category;
            best_score = value;
        }
    }

    best
}

/// Lowest score wins; on a tie the earlier category is kept.
pub fn lowest_category(scores: &ScoreSet) -> AwardCategory {
    scores
        .iter()
        .min_by_key(|(_, value)| *value)
        .map(|(category, _)| category)
        .unwrap_or(AwardCategory::Leadership)
}
