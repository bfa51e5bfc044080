use serde::Serialize;
use std::collections::HashSet;

use super::{ColumnMap, Entity};
use crate::db::bookings::{self, BookingRow};
use crate::db::{rooms, users};
use crate::engine::BookingEngine;
use crate::error::{AppError, Result};
use crate::models::BookingDraft;
use crate::validation::{parse_id, parse_total, validate_booking_fields, validate_room, validate_user};

/// Counts returned after an import
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Skip booking rows that would overfill their slot instead of inserting them blindly
    pub enforce_capacity: bool,
}

/// Per-row outcome; only `Skipped` rows are tolerated failures
enum RowOutcome {
    Inserted,
    Skipped(String),
}

/// Reconcile a CSV document into `entity`'s table
///
/// The header row must map onto every required field, otherwise nothing is
/// written. Each data row is then validated and inserted on its own: rows
/// with bad fields, unknown references or store constraint violations are
/// skipped and counted. Booking rows are checked against the user and room
/// ids present when the import started.
///
/// Unless `options.enforce_capacity` is set, imported bookings are written
/// without a capacity check and can overfill a slot.
pub async fn import_csv(
    engine: &BookingEngine,
    entity: Entity,
    data: &[u8],
    options: ImportOptions,
) -> Result<ImportReport> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::resolve(entity, &headers)?;

    let snapshot = match entity {
        Entity::Bookings => ReferenceSnapshot::take(engine).await?,
        _ => ReferenceSnapshot::default(),
    };

    let mut report = ImportReport::default();
    for (index, record) in reader.records().enumerate() {
        // Header is line 1
        let line = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Skipping {} line {}: unreadable ({})", entity, line, e);
                report.skipped += 1;
                continue;
            }
        };

        let outcome = match entity {
            Entity::Users => import_user(engine, &columns, &record).await?,
            Entity::Rooms => import_room(engine, &columns, &record).await?,
            Entity::Bookings => {
                import_booking(engine, &columns, &record, &snapshot, options).await?
            }
        };

        match outcome {
            RowOutcome::Inserted => report.inserted += 1,
            RowOutcome::Skipped(reason) => {
                tracing::debug!("Skipping {} line {}: {}", entity, line, reason);
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        "Imported {}: {} inserted, {} skipped",
        entity,
        report.inserted,
        report.skipped
    );

    Ok(report)
}

/// Existing user and room ids, read once before the row loop
#[derive(Default)]
struct ReferenceSnapshot {
    users: HashSet<i64>,
    rooms: HashSet<i64>,
}

impl ReferenceSnapshot {
    async fn take(engine: &BookingEngine) -> Result<Self> {
        let pool = engine.store().pool();
        Ok(Self {
            users: users::user_ids(pool).await?.into_iter().collect(),
            rooms: rooms::room_ids(pool).await?.into_iter().collect(),
        })
    }
}

async fn import_user(
    engine: &BookingEngine,
    columns: &ColumnMap,
    record: &csv::StringRecord,
) -> Result<RowOutcome> {
    let user = match validate_user(
        columns.cell(record, "name"),
        columns.cell(record, "email"),
        columns.get(record, "phone"),
    ) {
        Ok(user) => user,
        Err(e) => return skip_on_row_error(e),
    };

    let inserted = {
        let _gate = engine.store().lock_writes().await;
        users::insert_user(engine.store().pool(), &user).await
    };
    match inserted {
        Ok(_) => Ok(RowOutcome::Inserted),
        Err(e) => skip_on_row_error(e),
    }
}

async fn import_room(
    engine: &BookingEngine,
    columns: &ColumnMap,
    record: &csv::StringRecord,
) -> Result<RowOutcome> {
    let room = match validate_room(
        columns.cell(record, "name"),
        columns.cell(record, "capacity"),
        columns.cell(record, "price"),
    ) {
        Ok(room) => room,
        Err(e) => return skip_on_row_error(e),
    };

    let inserted = {
        let _gate = engine.store().lock_writes().await;
        rooms::insert_room(engine.store().pool(), &room).await
    };
    match inserted {
        Ok(_) => Ok(RowOutcome::Inserted),
        Err(e) => skip_on_row_error(e),
    }
}

async fn import_booking(
    engine: &BookingEngine,
    columns: &ColumnMap,
    record: &csv::StringRecord,
    snapshot: &ReferenceSnapshot,
    options: ImportOptions,
) -> Result<RowOutcome> {
    let (Some(user_id), Some(room_id)) = (
        parse_id(columns.cell(record, "user_id")),
        parse_id(columns.cell(record, "room_id")),
    ) else {
        return Ok(RowOutcome::Skipped("user_id/room_id not integers".to_string()));
    };

    let fields = match validate_booking_fields(
        columns.cell(record, "checkin_date"),
        columns.cell(record, "nights"),
    ) {
        Ok(fields) => fields,
        Err(e) => return skip_on_row_error(e),
    };

    let Some(total) = parse_total(columns.get(record, "total")) else {
        return Ok(RowOutcome::Skipped("total is not a number".to_string()));
    };

    if !snapshot.users.contains(&user_id) || !snapshot.rooms.contains(&room_id) {
        return Ok(RowOutcome::Skipped(format!(
            "unknown user {user_id} or room {room_id}"
        )));
    }

    if options.enforce_capacity {
        let draft = BookingDraft {
            user_id,
            room_id,
            checkin_date: fields.checkin_date,
            nights: fields.nights,
            total: Some(total),
        };
        return match engine.commit_booking(&draft, None).await {
            Ok(_) => Ok(RowOutcome::Inserted),
            Err(e) => skip_on_row_error(e),
        };
    }

    let row = BookingRow {
        user_id,
        room_id,
        checkin_date: &fields.checkin_date,
        nights: fields.nights,
        total,
    };
    let inserted = {
        let _gate = engine.store().lock_writes().await;
        bookings::insert_booking(engine.store().pool(), &row).await
    };
    match inserted {
        Ok(_) => Ok(RowOutcome::Inserted),
        Err(e) => skip_on_row_error(e),
    }
}

/// Row-level failures become skips; store outages abort the import
fn skip_on_row_error(err: AppError) -> Result<RowOutcome> {
    match err {
        AppError::Validation(_)
        | AppError::ConstraintViolation(_)
        | AppError::NotFound { .. }
        | AppError::CapacityExceeded { .. } => Ok(RowOutcome::Skipped(err.to_string())),
        other => Err(other),
    }
}
