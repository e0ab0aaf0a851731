use std::io;

use crate::models::AwardMatch;
use crate::similarity::TOP_MATCHES;

pub const HEADER: [&str; 7] = [
    "Award Name",
    "Top Match 1",
    "Score 1",
    "Top Match 2",
    "Score 2",
    "Top Match 3",
    "Score 3",
];

/// Writes one row per award; awards with fewer than three matches leave trailing cells empty.
pub fn write_matches_csv<W: io::Write>(writer: W, matches: &[AwardMatch]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for award in matches {
        let mut record = vec![award.name.clone()];
        for slot in 0..TOP_MATCHES {
            match award.top_matches.get(slot) {
                Some((category, score)) => {
                    record.push(category.key().to_string());
                    record.push(score.to_string());
                }
                None => {
                    record.push(String::new());
                    record.push(String::new());
                }
            }
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
