//! Maintenance CLI for the planning database.
//!
//! ```text
//! plandoc-admin seed           insert demo teachers, course units and plans
//! plandoc-admin add-teacher    register one teacher
//! plandoc-admin clear          delete every row (asks for --yes)
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use plandoc_db::models::teacher::CreateTeacher;
use plandoc_db::repositories::TeacherRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "plandoc-admin")]
#[command(about = "Seed, extend or clear the planning database")]
struct Args {
    /// Database URL; falls back to the `DATABASE_URL` env var.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Skip applying the bundled migrations before running the command.
    #[arg(long)]
    skip_migrations: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert demo data. Rows that already exist are left untouched.
    Seed,
    /// Register a teacher so they can log in with their cedula.
    AddTeacher {
        /// `V-` followed by 7 or 8 digits.
        #[arg(long)]
        cedula: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Delete all teachers, course units, plans, objectives and items.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plandoc_db=info,plandoc_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let pool = plandoc_db::create_pool(&args.database_url)
        .await
        .context("Failed to connect to database")?;

    if !args.skip_migrations {
        plandoc_db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    match args.command {
        Command::Seed => {
            let summary = plandoc_db::seed::seed_demo_data(&pool)
                .await
                .context("Seeding failed")?;
            tracing::info!(
                teachers = summary.teachers,
                course_units = summary.course_units,
                learning_plans = summary.learning_plans,
                objectives = summary.objectives,
                evaluation_plans = summary.evaluation_plans,
                items = summary.items,
                "Demo data seeded"
            );
        }
        Command::AddTeacher {
            cedula,
            email,
            first_name,
            last_name,
        } => {
            let input = CreateTeacher {
                cedula,
                email,
                first_name,
                last_name,
            };
            input.validate()?;
            let teacher = TeacherRepo::create(&pool, &input)
                .await
                .with_context(|| format!("Failed to register teacher {}", input.cedula))?;
            tracing::info!(cedula = %teacher.id, name = %teacher.full_name(), "Teacher registered");
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete every row without --yes");
            }
            let removed = plandoc_db::seed::clear_all(&pool)
                .await
                .context("Clearing the database failed")?;
            tracing::info!(removed, "Database cleared");
        }
    }

    pool.close().await;
    Ok(())
}
