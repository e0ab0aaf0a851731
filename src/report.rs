use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Analysis, AwardMatch};
use crate::readiness::Readiness;
use crate::recommend::WELL_POSITIONED_MESSAGE;

pub struct ReportContext<'a> {
    pub institution: &'a str,
    pub observed_on: Option<NaiveDate>,
    pub generated_on: NaiveDate,
}

pub fn build_report(
    context: &ReportContext<'_>,
    analysis: &Analysis,
    readiness: &[Readiness],
    matches: &[AwardMatch],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# AwardMatch Report");
    match context.observed_on {
        Some(observed_on) => {
            let _ = writeln!(
                output,
                "Generated for {} on {} (activity observed {})",
                context.institution, context.generated_on, observed_on
            );
        }
        None => {
            let _ = writeln!(
                output,
                "Generated for {} on {}",
                context.institution, context.generated_on
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Qualification Scores");
    for (category, score) in analysis.scores.iter() {
        let _ = writeln!(output, "- {}: {}%", category.award_name(), score);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Overall score: {}%", analysis.overall);
    if analysis.scores.get(analysis.best_match) == 0 {
        let _ = writeln!(output, "Best match: None");
    } else {
        let _ = writeln!(output, "Best match: {}", analysis.best_match.award_name());
    }
    let _ = writeln!(
        output,
        "Activities analyzed: {}",
        analysis.profile.total_activities()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendations");
    if analysis.recommendations.is_empty() {
        let _ = writeln!(output, "{WELL_POSITIONED_MESSAGE}");
    } else {
        for rec in &analysis.recommendations {
            let _ = writeln!(
                output,
                "- **{}** ({} priority): {}",
                rec.title, rec.priority, rec.description
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Readiness");
    if readiness.is_empty() {
        let _ = writeln!(output, "No evidence recorded.");
    } else {
        for row in readiness {
            let _ = writeln!(
                output,
                "- {}: {} ({} of {} items, {}%)",
                row.category.label(),
                row.status,
                row.total_content,
                row.threshold,
                row.progress
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Uploaded Award Matches");
    if matches.is_empty() {
        let _ = writeln!(output, "No uploaded awards to match.");
    } else {
        for award in matches {
            let top = award
                .top_matches
                .iter()
                .map(|(category, score)| format!("{} {}%", category.label(), score))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(output, "- {}: {}", award.name, top);
        }
    }

    output
}
