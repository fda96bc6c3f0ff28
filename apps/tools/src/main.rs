use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use shared::{
    domain::{AssessmentId, Role, UserId},
    error::ApiError,
};
use storage::{AvailabilityRecord, NewFaculty, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;
use views::{
    assessors_table, buildings_table, encode, faculty_table, projects_table, rooms_table,
    tag_groups_table, tags_table, ApiContext,
};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/allocation.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill an empty database with a small demo data set.
    Seed,
    /// Print the JSON payload one of the admin tables would receive.
    Dump {
        #[arg(value_enum)]
        table: Table,
        /// Restrict the projects table to one owner.
        #[arg(long)]
        owner_id: Option<i64>,
        /// Assessment whose assessors are listed.
        #[arg(long)]
        assessment_id: Option<i64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Table {
    Buildings,
    Rooms,
    TagGroups,
    Tags,
    Faculty,
    Projects,
    Assessors,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::Seed => seed(&storage).await?,
        Command::Dump {
            table,
            owner_id,
            assessment_id,
        } => {
            let ctx = ApiContext { storage };
            let rows = match table {
                Table::Buildings => buildings_table(&ctx).await,
                Table::Rooms => rooms_table(&ctx).await,
                Table::TagGroups => tag_groups_table(&ctx).await,
                Table::Tags => tags_table(&ctx).await,
                Table::Faculty => faculty_table(&ctx).await,
                Table::Projects => projects_table(&ctx, owner_id.map(UserId)).await,
                Table::Assessors => {
                    let id = assessment_id
                        .ok_or_else(|| anyhow!("--assessment-id is required for assessors"))?;
                    assessors_table(&ctx, AssessmentId(id)).await
                }
            }
            .map_err(api_error)?;
            println!("{}", encode(&rows)?);
        }
    }

    Ok(())
}

fn api_error(err: ApiError) -> anyhow::Error {
    anyhow!("{:?}: {}", err.code, err.message)
}

async fn seed(storage: &Storage) -> Result<()> {
    let arts = storage
        .create_building("Arts A", Some("#1f77b4"), true)
        .await?;
    let pevensey = storage.create_building("Pevensey 1", None, false).await?;
    storage.create_room(arts, "2.02", 120, true, true).await?;
    storage.create_room(arts, "1.14", 40, false, false).await?;
    storage.create_room(pevensey, "1A7", 60, false, false).await?;

    let methods = storage
        .create_tag_group("Methods", true, true, true)
        .await?;
    let legacy = storage
        .create_tag_group("Legacy", false, false, false)
        .await?;
    let numerical = storage
        .create_tag(Some(methods), "Numerical", Some("#2ca02c"), true)
        .await?;
    let analytic = storage
        .create_tag(Some(methods), "Analytic", None, true)
        .await?;
    storage
        .create_tag(Some(legacy), "Fortran", None, false)
        .await?;
    storage.create_tag(None, "Unfiled", None, true).await?;

    let cosmology = storage
        .create_research_group("AST", "Astronomy Centre", Some("#9467bd"), true)
        .await?;

    let jane = storage
        .create_faculty(
            &NewFaculty {
                username: "jdoe",
                first_name: "Jane",
                last_name: "Doe",
                email: "j.doe@example.ac.uk",
                active: true,
                last_active: Some(Utc::now() - Duration::days(2)),
            },
            &[Role::Faculty, Role::Admin],
        )
        .await?;
    let alan = storage
        .create_faculty(
            &NewFaculty {
                username: "asmith",
                first_name: "Alan",
                last_name: "Smith",
                email: "a.smith@example.ac.uk",
                active: false,
                last_active: None,
            },
            &[Role::Faculty],
        )
        .await?;

    let halo = storage
        .create_project(jane, Some(cosmology), "Halo shapes in simulations", true)
        .await?;
    storage.tag_project(halo, numerical).await?;
    storage.tag_project(halo, analytic).await?;
    storage
        .create_project(alan, None, "Inflationary relics", false)
        .await?;

    let talks = storage
        .create_assessment("Year 3 presentations", true, false, false)
        .await?;
    storage
        .set_availability(
            talks,
            jane,
            &AvailabilityRecord {
                confirmed: true,
                available_sessions: 4,
                ifneeded_sessions: 1,
                unavailable_sessions: 2,
                comment: Some("Mornings only".into()),
                request_email_sent: true,
                last_reminder: None,
            },
        )
        .await?;
    storage
        .set_availability(
            talks,
            alan,
            &AvailabilityRecord {
                request_email_sent: true,
                ..AvailabilityRecord::default()
            },
        )
        .await?;

    info!(assessment_id = talks.0, "seeded demo data");
    println!("seeded demo data; assessment_id={}", talks.0);
    Ok(())
}
