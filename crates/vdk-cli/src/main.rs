use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use uuid::Uuid;
use vdk_config::SchedulingConfig;
use vdk_db::{
    apply_status_change, load_index, submit, IntakeRequest, PgStore, RecordStore, SubmitOutcome,
};
use vdk_schemas::{BookingStatus, ClientType, NarrationStyle};

#[derive(Parser)]
#[command(name = "vdk")]
#[command(about = "VoiceDesk studio operations CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database commands
    Db {
        #[command(subcommand)]
        cmd: DbCmd,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> studio -> local overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Estimate production days for a word count
    Estimate {
        #[arg(long)]
        words: i64,

        /// Layered config paths in merge order (defaults when omitted)
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Availability queries against the live calendar
    Availability {
        #[command(subcommand)]
        cmd: AvailabilityCmd,
    },

    /// Booking intake and lifecycle
    Booking {
        #[command(subcommand)]
        cmd: BookingCmd,
    },

    /// Manual block-out management
    Blockout {
        #[command(subcommand)]
        cmd: BlockoutCmd,
    },
}

#[derive(Subcommand)]
enum DbCmd {
    Status,

    /// Apply SQL migrations. Guardrail: refuses when bookings are
    /// mid-pipeline unless --yes is provided.
    Migrate {
        /// Acknowledge you are migrating a DB with active production work.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AvailabilityCmd {
    /// Are N consecutive days starting at a date all free?
    Check {
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        start: String,

        #[arg(long)]
        days: i64,

        #[arg(long = "config")]
        config_paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum BookingCmd {
    /// Validate and persist a booking request.
    Submit {
        #[arg(long)]
        client: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        words: i64,
        /// Override the derived duration (days).
        #[arg(long)]
        days: Option<i64>,
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// solo | duet | dual_pov | full_cast
        #[arg(long, default_value = "solo")]
        style: String,
        #[arg(long, default_value = "fiction")]
        genre: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, default_value_t = false)]
        returning: bool,
        /// author | publisher | studio
        #[arg(long, default_value = "author")]
        client_type: String,
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Operator-triggered status transition.
    SetStatus {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: String,
    },
}

#[derive(Subcommand)]
enum BlockoutCmd {
    /// Block out an inclusive span of days.
    Add {
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// End date (inclusive), YYYY-MM-DD
        #[arg(long)]
        end: String,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Release a block-out.
    Remove {
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Db { cmd } => run_db(cmd).await,
        Commands::ConfigHash { paths } => run_config_hash(paths),
        Commands::Estimate {
            words,
            config_paths,
        } => run_estimate(words, &config_paths),
        Commands::Availability { cmd } => run_availability(cmd).await,
        Commands::Booking { cmd } => run_booking(cmd).await,
        Commands::Blockout { cmd } => run_blockout(cmd).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn load_scheduling(config_paths: &[String]) -> Result<SchedulingConfig> {
    if config_paths.is_empty() {
        return Ok(SchedulingConfig::sane_defaults());
    }
    let refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    vdk_config::load_layered_yaml(&refs)?.scheduling()
}

async fn run_db(cmd: DbCmd) -> Result<()> {
    let pool = vdk_db::connect_from_env().await?;
    match cmd {
        DbCmd::Status => {
            let st = vdk_db::status(&pool).await?;
            println!("ok={} bookings_table={}", st.ok, st.has_bookings_table);
        }
        DbCmd::Migrate { yes } => {
            if !yes {
                let active = vdk_db::count_active_bookings(&pool).await?;
                if active > 0 {
                    bail!(
                        "{} booking(s) are mid-pipeline; re-run with --yes to migrate anyway",
                        active
                    );
                }
            }
            vdk_db::migrate(&pool).await?;
            println!("migrations applied");
        }
    }
    Ok(())
}

fn run_config_hash(paths: Vec<String>) -> Result<()> {
    let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = vdk_config::load_layered_yaml(&refs)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

fn run_estimate(words: i64, config_paths: &[String]) -> Result<()> {
    let cfg = load_scheduling(config_paths)?;
    let days = vdk_scheduling::production_days(words, cfg.words_per_day);
    println!(
        "words={} words_per_day={} days={}",
        words, cfg.words_per_day, days
    );
    Ok(())
}

async fn run_availability(cmd: AvailabilityCmd) -> Result<()> {
    match cmd {
        AvailabilityCmd::Check {
            start,
            days,
            config_paths,
        } => {
            let cfg = load_scheduling(&config_paths)?;
            let start = vdk_scheduling::parse_calendar_date(&start)?;

            let pool = vdk_db::connect_from_env().await?;
            let store = PgStore::new(pool);
            let index = load_index(&store, &cfg).await?;

            let free = index.is_range_free(start, days)?;
            if free {
                println!("free: {} day(s) from {}", days, start);
            } else {
                let conflicts = index.conflicts(start, days);
                println!("busy: conflicting day(s): {:?}", conflicts);
            }
        }
    }
    Ok(())
}

async fn run_booking(cmd: BookingCmd) -> Result<()> {
    let pool = vdk_db::connect_from_env().await?;
    let store = PgStore::new(pool);

    match cmd {
        BookingCmd::Submit {
            client,
            email,
            title,
            words,
            days,
            start,
            style,
            genre,
            notes,
            returning,
            client_type,
            config_paths,
        } => {
            let cfg = load_scheduling(&config_paths)?;
            let req = IntakeRequest {
                client_name: client,
                email,
                book_title: title,
                word_count: words,
                days_needed: days,
                start_date: start,
                narration_style: NarrationStyle::parse(&style)?,
                genre,
                notes,
                is_returning: returning,
                client_type: ClientType::parse(&client_type)?,
            };

            let today = Local::now().date_naive();
            match submit(&store, &cfg, today, req).await? {
                SubmitOutcome::Created(row) => {
                    println!(
                        "created booking {} [{} -> {}] status={} discount={}",
                        row.id,
                        row.start_date.map(|d| d.to_string()).unwrap_or_default(),
                        row.end_date.map(|d| d.to_string()).unwrap_or_default(),
                        row.status.as_str(),
                        row.discount_applied.as_deref().unwrap_or("None"),
                    );
                }
                SubmitOutcome::Rejected(e) => {
                    bail!("booking refused ({}): {}", e.code(), e);
                }
            }
        }

        BookingCmd::SetStatus { id, status } => {
            let id: Uuid = id.parse().context("invalid booking id")?;
            let next = BookingStatus::parse(&status)?;
            let change = apply_status_change(&store, id, next).await?;
            println!(
                "booking {} now {}",
                change.booking.id,
                change.booking.status.as_str()
            );
            if let Some(p) = change.production {
                println!("production record {} ensured", p.id);
            }
        }
    }
    Ok(())
}

async fn run_blockout(cmd: BlockoutCmd) -> Result<()> {
    let pool = vdk_db::connect_from_env().await?;
    let store = PgStore::new(pool);

    match cmd {
        BlockoutCmd::Add { start, end, reason } => {
            let start = vdk_scheduling::parse_calendar_date(&start)?;
            let end = vdk_scheduling::parse_calendar_date(&end)?;
            let row = store.insert_blockout(start, end, reason).await?;
            println!("blockout {} added", row.id);
        }
        BlockoutCmd::Remove { id } => {
            let id: Uuid = id.parse().context("invalid blockout id")?;
            store.delete_blockout(id).await?;
            println!("blockout {} removed", id);
        }
    }
    Ok(())
}
