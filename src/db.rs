use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{
    ActivityProfile, AwardCategory, ProfileRecord, RawActivityProfile, UploadedAward,
};
use crate::readiness::AwardCounter;

pub const SAMPLE_INSTITUTION: &str = "Central Philippine University";
pub const MAX_AWARDS: i64 = 2000;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("schema migrations applied");
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let observed_on = NaiveDate::from_ymd_opt(2026, 1, 31).context("invalid date")?;
    insert_profile(
        pool,
        &ProfileImportRow {
            institution: SAMPLE_INSTITUTION.to_string(),
            observed_on,
            source_key: Some("seed-profile-001".to_string()),
            profile: ActivityProfile::sample(),
        },
    )
    .await?;

    let awards = vec![
        NewAward {
            name: "Regional Internationalization Office Award".to_string(),
            description: Some("Recognizes regional coordination of internationalization".to_string()),
            category: Some("regional".to_string()),
            requirements: "Regional office coordination, community engagement, and local \
                           administration of international programs"
                .to_string(),
        },
        NewAward {
            name: "Global Citizenship Award".to_string(),
            description: Some("Honors cultural exchange and social responsibility".to_string()),
            category: Some("citizenship".to_string()),
            requirements: "Global cultural exchange, community awareness, diversity and \
                           social responsibility initiatives"
                .to_string(),
        },
    ];

    for award in &awards {
        add_award(pool, award).await?;
    }

    let evidence = vec![
        ("seed-evidence-001", "leadership", "document", "MOU with Kyushu University", (2025, 11, 3)),
        ("seed-evidence-002", "leadership", "event", "ASEAN partners summit", (2025, 12, 9)),
        ("seed-evidence-003", "education", "document", "Joint curriculum proposal", (2026, 1, 12)),
        ("seed-evidence-004", "education", "document", "Research exchange report", (2026, 1, 20)),
        ("seed-evidence-005", "education", "event", "International research week", (2026, 1, 27)),
        ("seed-evidence-006", "citizenship", "event", "Cultural night", (2025, 10, 18)),
    ];

    for (source_key, category, kind, title, (year, month, day)) in evidence {
        let recorded_on = NaiveDate::from_ymd_opt(year, month, day).context("invalid date")?;
        sqlx::query(
            r#"
            INSERT INTO lilac_awards.award_evidence
            (id, institution, category, kind, title, recorded_on, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(SAMPLE_INSTITUTION)
        .bind(category)
        .bind(kind)
        .bind(title)
        .bind(recorded_on)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    tracing::info!(institution = SAMPLE_INSTITUTION, "seed data loaded");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImportRow {
    pub institution: String,
    pub observed_on: NaiveDate,
    pub source_key: Option<String>,
    pub profile: ActivityProfile,
}

pub fn read_profiles_csv(csv_path: &Path) -> anyhow::Result<Vec<ProfileImportRow>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        institution: String,
        observed_on: NaiveDate,
        source_key: Option<String>,
        international_partnerships: i64,
        student_exchanges: i64,
        research_collaborations: i64,
        international_conferences: i64,
        cultural_programs: i64,
        regional_initiatives: i64,
        global_projects: i64,
        academic_programs: i64,
        leadership_programs: i64,
        community_engagement: i64,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut rows = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = result.with_context(|| format!("malformed row on line {line}"))?;
        let profile = ActivityProfile::from_counts(RawActivityProfile {
            international_partnerships: row.international_partnerships,
            student_exchanges: row.student_exchanges,
            research_collaborations: row.research_collaborations,
            international_conferences: row.international_conferences,
            cultural_programs: row.cultural_programs,
            regional_initiatives: row.regional_initiatives,
            global_projects: row.global_projects,
            academic_programs: row.academic_programs,
            leadership_programs: row.leadership_programs,
            community_engagement: row.community_engagement,
        })
        .with_context(|| format!("invalid counters on line {line}"))?;

        rows.push(ProfileImportRow {
            institution: row.institution,
            observed_on: row.observed_on,
            source_key: row.source_key.filter(|key| !key.trim().is_empty()),
            profile,
        });
    }

    Ok(rows)
}

pub async fn import_profiles_csv(pool: &PgPool, csv_path: &Path) -> anyhow::Result<usize> {
    let rows = read_profiles_csv(csv_path)?;
    let mut inserted = 0usize;

    for row in &rows {
        if insert_profile(pool, row).await? {
            inserted += 1;
        }
    }

    tracing::info!(
        path = %csv_path.display(),
        rows = rows.len(),
        inserted,
        "activity profiles imported"
    );
    Ok(inserted)
}

async fn insert_profile(pool: &PgPool, row: &ProfileImportRow) -> anyhow::Result<bool> {
    let source_key = row
        .source_key
        .clone()
        .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));
    let profile = &row.profile;

    let result = sqlx::query(
        r#"
        INSERT INTO lilac_awards.activity_profiles
        (id, institution, observed_on, international_partnerships, student_exchanges,
         research_collaborations, international_conferences, cultural_programs,
         regional_initiatives, global_projects, academic_programs, leadership_programs,
         community_engagement, source_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&row.institution)
    .bind(row.observed_on)
    .bind(i64::from(profile.international_partnerships))
    .bind(i64::from(profile.student_exchanges))
    .bind(i64::from(profile.research_collaborations))
    .bind(i64::from(profile.international_conferences))
    .bind(i64::from(profile.cultural_programs))
    .bind(i64::from(profile.regional_initiatives))
    .bind(i64::from(profile.global_projects))
    .bind(i64::from(profile.academic_programs))
    .bind(i64::from(profile.leadership_programs))
    .bind(i64::from(profile.community_engagement))
    .bind(source_key)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_latest_profile(
    pool: &PgPool,
    institution: &str,
) -> anyhow::Result<Option<ProfileRecord>> {
    let row = sqlx::query(
        r#"
        SELECT id, institution, observed_on, international_partnerships, student_exchanges,
               research_collaborations, international_conferences, cultural_programs,
               regional_initiatives, global_projects, academic_programs, leadership_programs,
               community_engagement
        FROM lilac_awards.activity_profiles
        WHERE institution = $1
        ORDER BY observed_on DESC, created_at DESC
        LIMIT 1
        "#,
    )
    .bind(institution)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let profile = ActivityProfile::from_counts(RawActivityProfile {
        international_partnerships: row.get("international_partnerships"),
        student_exchanges: row.get("student_exchanges"),
        research_collaborations: row.get("research_collaborations"),
        international_conferences: row.get("international_conferences"),
        cultural_programs: row.get("cultural_programs"),
        regional_initiatives: row.get("regional_initiatives"),
        global_projects: row.get("global_projects"),
        academic_programs: row.get("academic_programs"),
        leadership_programs: row.get("leadership_programs"),
        community_engagement: row.get("community_engagement"),
    })
    .context("stored activity profile failed validation")?;

    Ok(Some(ProfileRecord {
        id: row.get("id"),
        institution: row.get("institution"),
        observed_on: row.get("observed_on"),
        profile,
    }))
}

#[derive(Debug, Clone)]
pub struct NewAward {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub requirements: String,
}

pub async fn add_award(pool: &PgPool, award: &NewAward) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query(
        r#"
        INSERT INTO lilac_awards.uploaded_awards (id, name, description, category, requirements)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (name) DO UPDATE
        SET description = EXCLUDED.description,
            category = EXCLUDED.category,
            requirements = EXCLUDED.requirements
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&award.name)
    .bind(&award.description)
    .bind(&award.category)
    .bind(&award.requirements)
    .fetch_one(pool)
    .await?
    .get("id");

    tracing::info!(%id, name = %award.name, "award stored");
    Ok(id)
}

pub async fn fetch_uploaded_awards(pool: &PgPool, limit: i64) -> anyhow::Result<Vec<UploadedAward>> {
    let records = sqlx::query(
        r#"
        SELECT id, name, description, category, requirements
        FROM lilac_awards.uploaded_awards
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit.clamp(1, MAX_AWARDS))
    .fetch_all(pool)
    .await?;

    let mut awards = Vec::new();

    for row in records {
        awards.push(UploadedAward {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            category: row.get("category"),
            requirements: row.get("requirements"),
        });
    }

    Ok(awards)
}

pub async fn fetch_evidence_counts(
    pool: &PgPool,
    institution: &str,
) -> anyhow::Result<Vec<AwardCounter>> {
    let records = sqlx::query(
        r#"
        SELECT category,
               COUNT(*) FILTER (WHERE kind = 'document') AS documents,
               COUNT(*) FILTER (WHERE kind = 'event') AS events
        FROM lilac_awards.award_evidence
        WHERE institution = $1
        GROUP BY category
        "#,
    )
    .bind(institution)
    .fetch_all(pool)
    .await?;

    let mut counters = Vec::new();

    for row in records {
        let raw_category: String = row.get("category");
        let Some(category) = AwardCategory::parse(&raw_category) else {
            tracing::warn!(category = %raw_category, "skipping evidence with unknown category");
            continue;
        };
        let documents: i64 = row.get("documents");
        let events: i64 = row.get("events");

        counters.push(AwardCounter {
            category,
            documents: u32::try_from(documents).unwrap_or(u32::MAX),
            events: u32::try_from(events).unwrap_or(u32::MAX),
        });
    }

    Ok(counters)
}
