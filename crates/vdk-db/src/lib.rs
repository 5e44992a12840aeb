use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;
use vdk_schemas::{
    BlockoutRow, BookingRow, BookingStatus, ClientType, NarrationStyle, NewBooking, ProductionRow,
};

mod intake;
mod store;

pub use intake::{load_index, submit, IntakeRequest, SubmitOutcome};
pub use store::{
    apply_status_change, transition_guard, BlockoutNotFound, BookingNotFound, DatesTaken,
    RecordStore, StatusChange, TransitionRefused,
};

pub const ENV_DB_URL: &str = "VDK_DATABASE_URL";

/// Name of the storage-layer overlap guard on calendar-blocking bookings.
pub const EXCLUSION_CONSTRAINT: &str = "excl_bookings_active_dates";

/// Connect to Postgres using VDK_DATABASE_URL.
pub async fn connect_from_env() -> Result<PgPool> {
    let url =
        std::env::var(ENV_DB_URL).with_context(|| format!("missing env var {ENV_DB_URL}"))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .context("failed to connect to Postgres")?;

    Ok(pool)
}

/// Run embedded SQLx migrations.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("db migrate failed")?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct DbStatus {
    pub ok: bool,
    pub has_bookings_table: bool,
}

/// Simple status query (connectivity + schema presence).
pub async fn status(pool: &PgPool) -> Result<DbStatus> {
    let (one,): (i32,) = sqlx::query_as::<_, (i32,)>("select 1")
        .fetch_one(pool)
        .await
        .context("status connectivity query failed")?;
    let ok = one == 1;

    let (exists,): (bool,) = sqlx::query_as::<_, (bool,)>(
        r#"
        select exists (
            select 1
            from information_schema.tables
            where table_schema='public' and table_name='bookings'
        )
        "#,
    )
    .fetch_one(pool)
    .await
    .context("status table-exists query failed")?;

    Ok(DbStatus {
        ok,
        has_bookings_table: exists,
    })
}

/// Count bookings currently mid-pipeline (onboarding through invoiced).
/// Used by the CLI migrate guardrail: schema changes under an active
/// production pipeline need an explicit acknowledgement.
pub async fn count_active_bookings(pool: &PgPool) -> Result<i64> {
    let st = status(pool).await?;
    if !st.has_bookings_table {
        return Ok(0);
    }

    let (n,): (i64,) = sqlx::query_as::<_, (i64,)>(
        r#"
        select count(*)::bigint
        from bookings
        where status in ('onboarding','first_fifteen','production','invoiced')
        "#,
    )
    .fetch_one(pool)
    .await
    .context("count_active_bookings failed")?;

    Ok(n)
}

/// Postgres-backed [`RecordStore`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const BOOKING_COLUMNS: &str = r#"
    id, client_name, email, book_title, word_count, days_needed,
    start_date, end_date, narration_style, genre, notes, is_returning,
    discount_applied, client_type, status, created_at_utc
"#;

fn map_booking_row(row: &sqlx::postgres::PgRow) -> Result<BookingRow> {
    Ok(BookingRow {
        id: row.try_get("id")?,
        client_name: row.try_get("client_name")?,
        email: row.try_get("email")?,
        book_title: row.try_get("book_title")?,
        word_count: row.try_get("word_count")?,
        days_needed: row.try_get("days_needed")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        narration_style: NarrationStyle::parse(&row.try_get::<String, _>("narration_style")?)?,
        genre: row.try_get("genre")?,
        notes: row.try_get("notes")?,
        is_returning: row.try_get("is_returning")?,
        discount_applied: row.try_get("discount_applied")?,
        client_type: ClientType::parse(&row.try_get::<String, _>("client_type")?)?,
        status: BookingStatus::parse(&row.try_get::<String, _>("status")?)?,
        created_at_utc: row.try_get("created_at_utc")?,
    })
}

fn map_blockout_row(row: &sqlx::postgres::PgRow) -> Result<BlockoutRow> {
    Ok(BlockoutRow {
        id: row.try_get("id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        reason: row.try_get("reason")?,
    })
}

fn map_production_row(row: &sqlx::postgres::PgRow) -> Result<ProductionRow> {
    Ok(ProductionRow {
        id: row.try_get("id")?,
        booking_id: row.try_get("booking_id")?,
        book_title: row.try_get("book_title")?,
        created_at_utc: row.try_get("created_at_utc")?,
    })
}

/// Detect a Postgres exclusion/unique violation by constraint name.
fn is_constraint_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}

#[async_trait]
impl store::RecordStore for PgStore {
    async fn fetch_booking_rows(&self) -> Result<Vec<BookingRow>> {
        let rows = sqlx::query(&format!(
            "select {BOOKING_COLUMNS} from bookings order by created_at_utc"
        ))
        .fetch_all(&self.pool)
        .await
        .context("fetch_booking_rows failed")?;

        rows.iter().map(map_booking_row).collect()
    }

    async fn fetch_blockout_rows(&self) -> Result<Vec<BlockoutRow>> {
        let rows = sqlx::query(
            "select id, start_date, end_date, reason from blockouts order by start_date",
        )
        .fetch_all(&self.pool)
        .await
        .context("fetch_blockout_rows failed")?;

        rows.iter().map(map_blockout_row).collect()
    }

    async fn insert_blockout(
        &self,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
        reason: Option<String>,
    ) -> Result<BlockoutRow> {
        let row = sqlx::query(
            r#"
            insert into blockouts (start_date, end_date, reason)
            values ($1, $2, $3)
            returning id, start_date, end_date, reason
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(&reason)
        .fetch_one(&self.pool)
        .await
        .context("insert_blockout failed")?;

        map_blockout_row(&row)
    }

    async fn delete_blockout(&self, id: Uuid) -> Result<()> {
        let res = sqlx::query("delete from blockouts where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete_blockout failed")?;

        if res.rows_affected() == 0 {
            return Err(anyhow::Error::new(store::BlockoutNotFound(id)));
        }
        Ok(())
    }

    async fn fetch_booking(&self, id: Uuid) -> Result<BookingRow> {
        let row = sqlx::query(&format!(
            "select {BOOKING_COLUMNS} from bookings where id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetch_booking failed")?
        .ok_or(store::BookingNotFound(id))?;

        map_booking_row(&row)
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<BookingRow> {
        let res = sqlx::query(&format!(
            r#"
            insert into bookings (
              client_name, email, book_title, word_count, days_needed,
              start_date, end_date, narration_style, genre, notes,
              is_returning, discount_applied, client_type, status
            ) values (
              $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14
            )
            returning {BOOKING_COLUMNS}
            "#
        ))
        .bind(&booking.client_name)
        .bind(&booking.email)
        .bind(&booking.book_title)
        .bind(booking.word_count)
        .bind(booking.days_needed)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.narration_style.as_str())
        .bind(&booking.genre)
        .bind(&booking.notes)
        .bind(booking.is_returning)
        .bind(&booking.discount_applied)
        .bind(booking.client_type.as_str())
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(row) => map_booking_row(&row),
            Err(e) if is_constraint_violation(&e, EXCLUSION_CONSTRAINT) => {
                Err(anyhow::Error::new(store::DatesTaken))
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert_booking failed")),
        }
    }

    async fn set_booking_status(&self, id: Uuid, next: BookingStatus) -> Result<BookingRow> {
        let current = self.fetch_booking(id).await?;
        store::transition_guard(current.status, next)?;

        let row = sqlx::query(&format!(
            r#"
            update bookings
            set status = $2
            where id = $1
            returning {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(next.as_str())
        .fetch_one(&self.pool)
        .await
        .context("set_booking_status update failed")?;

        map_booking_row(&row)
    }

    async fn ensure_production_record(&self, booking_id: Uuid) -> Result<ProductionRow> {
        sqlx::query(
            r#"
            insert into productions (booking_id, book_title)
            select id, book_title from bookings where id = $1
            on conflict (booking_id) do nothing
            "#,
        )
        .bind(booking_id)
        .execute(&self.pool)
        .await
        .context("ensure_production_record insert failed")?;

        let row = sqlx::query(
            r#"
            select id, booking_id, book_title, created_at_utc
            from productions
            where booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .context("ensure_production_record select failed")?
        .ok_or_else(|| anyhow!("no booking {} to track production for", booking_id))?;

        map_production_row(&row)
    }
}
