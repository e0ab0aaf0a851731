use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

mod config;
mod db;
mod export;
mod models;
mod readiness;
mod recommend;
mod report;
mod scoring;
mod similarity;
mod telemetry;

use config::AppConfig;
use models::{ActivityProfile, Analysis, AwardCategory};
use similarity::KeywordSets;

#[derive(Parser)]
#[command(name = "lilac-awardmatch")]
#[command(about = "CHED award qualification scoring for the LILAC office", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a sample profile, awards, and evidence
    Seed,
    /// Import activity profiles from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Score an activity profile and list recommendations
    #[command(group(
        ArgGroup::new("source")
            .args(["institution", "profile", "sample"])
            .required(true)
            .multiple(false)
    ))]
    Analyze {
        /// Use the latest recorded profile for this institution
        #[arg(long)]
        institution: Option<String>,
        /// Read the profile from a camelCase JSON file
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Use the built-in sample profile
        #[arg(long)]
        sample: bool,
        #[arg(long)]
        json: bool,
    },
    /// Match award criteria keywords against activities and uploaded awards
    Match {
        #[arg(long, default_value_t = db::MAX_AWARDS)]
        limit: i64,
        #[arg(long)]
        json: bool,
    },
    /// Store an award and its requirement text for matching
    AddAward {
        #[arg(long)]
        name: String,
        #[arg(long)]
        requirements: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = db::SAMPLE_INSTITUTION)]
        institution: String,
        #[arg(long, default_value = "awardmatch_report.md")]
        out: PathBuf,
    },
    /// Export uploaded award matches as CSV
    Export {
        #[arg(long, default_value = "awardmatch_results.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Commands::InitDb => {
            let pool = connect(&config).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect(&config).await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let pool = connect(&config).await?;
            let inserted = db::import_profiles_csv(&pool, &csv).await?;
            println!("Inserted {inserted} activity profiles from {}.", csv.display());
        }
        Commands::Analyze {
            institution,
            profile,
            sample,
            json,
        } => {
            let activity = if sample {
                ActivityProfile::sample()
            } else if let Some(path) = profile {
                read_profile_json(&path)?
            } else if let Some(institution) = institution {
                let pool = connect(&config).await?;
                let record = db::fetch_latest_profile(&pool, &institution)
                    .await?
                    .with_context(|| format!("no activity profile recorded for {institution}"))?;
                tracing::info!(
                    profile_id = %record.id,
                    observed_on = %record.observed_on,
                    "using latest recorded profile"
                );
                record.profile
            } else {
                anyhow::bail!("choose --institution, --profile, or --sample");
            };

            let analysis = recommend::analyze(&activity);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }
        Commands::Match { limit, json } => {
            let pool = connect(&config).await?;
            let criteria = KeywordSets::award_criteria();
            let keyword_match =
                similarity::match_keywords(&criteria, &KeywordSets::activity_defaults());
            let awards = db::fetch_uploaded_awards(&pool, limit).await?;
            let matches = similarity::rank_awards(&awards, &criteria);

            if json {
                let payload = serde_json::json!({
                    "scores": keyword_match.scores,
                    "overall": keyword_match.overall,
                    "best": keyword_match.best,
                    "award_matches": matches,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Keyword match by category:");
                for (category, score) in keyword_match.scores.iter() {
                    println!("- {}: {}%", category.label(), score);
                }
                println!(
                    "Overall {}%, best match {}",
                    keyword_match.overall,
                    keyword_match.best.award_name()
                );
                for award in &matches {
                    println!("{}:", award.name);
                    for (category, score) in &award.top_matches {
                        println!("  {}: {}%", category.label(), score);
                    }
                }
            }
        }
        Commands::AddAward {
            name,
            requirements,
            description,
            category,
        } => {
            if let Some(value) = category.as_deref() {
                AwardCategory::parse(value)
                    .with_context(|| format!("unknown award category '{value}'"))?;
            }
            let pool = connect(&config).await?;
            let id = db::add_award(
                &pool,
                &db::NewAward {
                    name,
                    description,
                    category,
                    requirements,
                },
            )
            .await?;
            println!("Award stored with id {id}.");
        }
        Commands::Report { institution, out } => {
            let pool = connect(&config).await?;
            let record = db::fetch_latest_profile(&pool, &institution)
                .await?
                .with_context(|| format!("no activity profile recorded for {institution}"))?;
            let analysis = recommend::analyze(&record.profile);
            let counters = db::fetch_evidence_counts(&pool, &institution).await?;
            let readiness = readiness::assess(&counters);
            let awards = db::fetch_uploaded_awards(&pool, db::MAX_AWARDS).await?;
            let matches = similarity::rank_awards(&awards, &KeywordSets::award_criteria());

            let report = report::build_report(
                &report::ReportContext {
                    institution: &record.institution,
                    observed_on: Some(record.observed_on),
                    generated_on: chrono::Utc::now().date_naive(),
                },
                &analysis,
                &readiness,
                &matches,
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { out } => {
            let pool = connect(&config).await?;
            let awards = db::fetch_uploaded_awards(&pool, db::MAX_AWARDS).await?;
            let matches = similarity::rank_awards(&awards, &KeywordSets::award_criteria());
            let file = std::fs::File::create(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            export::write_matches_csv(file, &matches)?;
            println!("Exported {} award matches to {}.", matches.len(), out.display());
        }
    }

    Ok(())
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    let url = config.database.require_url()?;
    PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(url)
        .await
        .context("failed to connect to Postgres")
}

fn read_profile_json(path: &Path) -> anyhow::Result<ActivityProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid activity profile in {}", path.display()))
}

fn print_analysis(analysis: &Analysis) {
    println!("Qualification scores:");
    for (category, score) in analysis.scores.iter() {
        println!("- {}: {}%", category.award_name(), score);
    }
    println!(
        "Overall score {}%, best match {}.",
        analysis.overall,
        analysis.best_match.award_name()
    );

    if analysis.recommendations.is_empty() {
        println!("{}", recommend::WELL_POSITIONED_MESSAGE);
        return;
    }

    println!("Recommendations:");
    for rec in &analysis.recommendations {
        println!("- [{}] {}: {}", rec.priority, rec.title, rec.description);
    }
}
