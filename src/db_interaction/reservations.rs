use std::{collections::HashMap, error::Error, fmt::Debug};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use diesel::{
    result::DatabaseErrorKind, sql_types::Integer, Connection, ExpressionMethods, OptionalExtension,
    PgConnection, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    availability::{resolve, Allocation},
    domain::{format_time, BoundedText, ReservationChanges, ReservationDraft, ReservationStatus, StatusTransitionError},
    models::{DiningTable, NewReservation, NewTableAssignment, Reservation},
    schema::{dining_tables, reservation_tables, reservations, users},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

// Attempts for a slot transaction that still trips the active-slot index
const MAX_SLOT_ATTEMPTS: u32 = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReservationView{
    pub id: i32,
    pub user_id: Uuid,
    pub name: String,
    pub phone: String,
    pub number_of_people: i32,
    pub date: NaiveDate,
    pub time: String,
    pub note: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tables: Vec<DiningTable>
}

impl ReservationView {
    fn new(reservation: Reservation, tables: Vec<DiningTable>) -> Result<Self, ReservationLedgerError> {
        let status = stored_status(&reservation)?;

        Ok(ReservationView{
            id: reservation.id,
            user_id: reservation.user_id,
            name: reservation.name,
            phone: reservation.phone,
            number_of_people: reservation.number_of_people,
            date: reservation.reservation_date,
            time: format_time(reservation.reservation_time),
            note: reservation.note,
            status,
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
            tables
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReservationOwner{
    pub email: String,
    #[serde(rename = "user_fname")]
    pub first_name: String,
    #[serde(rename = "user_lname")]
    pub last_name: String
}

// Staff listing: the reservation plus who booked it, as one flat object
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OwnedReservationView{
    #[serde(flatten)]
    pub reservation: ReservationView,
    #[serde(flatten)]
    pub owner: ReservationOwner
}

#[derive(Error)]
pub enum ReservationLedgerError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("{0}")]
    Infeasible(String),
    #[error("Reservation {0} not found")]
    NotFound(i32),
    #[error("Only pending reservations can be modified, this one is {0}")]
    NotEditable(ReservationStatus),
    #[error(transparent)]
    InvalidTransition(#[from] StatusTransitionError),
    #[error("Reservation has an unknown stored status: {0}")]
    UnknownStatus(String)
}

impl ReservationLedgerError {
    // Lost a race with a concurrent booking of the same slot
    fn is_slot_conflict(&self) -> bool {
        matches!(
            self,
            ReservationLedgerError::RunQueryError(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::SerializationFailure | DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }
}

impl Debug for ReservationLedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

fn stored_status(reservation: &Reservation) -> Result<ReservationStatus, ReservationLedgerError> {
    reservation.status
        .parse::<ReservationStatus>()
        .map_err(|_| ReservationLedgerError::UnknownStatus(reservation.status.clone()))
}

/// Runs `operation` in a transaction, retrying when it conflicts with
/// another transaction touching the same slot.
fn in_slot_transaction<T, F>(conn: &mut PgConnection, operation: F) -> Result<T, ReservationLedgerError>
where
    F: Fn(&mut PgConnection) -> Result<T, ReservationLedgerError>
{
    let mut attempt = 1;

    loop {
        let outcome = conn.transaction(|conn| operation(conn));

        match outcome {
            Err(e) if e.is_slot_conflict() && attempt < MAX_SLOT_ATTEMPTS => {
                tracing::warn!(attempt, "Slot transaction conflicted with a concurrent booking, retrying");
                attempt += 1;
            },
            outcome => return outcome
        }
    }
}

// Writers of one (date, time) queue behind each other until commit. Must run
// before the committed set is read so the read sees the previous writer.
fn lock_slot(conn: &mut PgConnection, date: NaiveDate, time: NaiveTime) -> QueryResult<usize> {
    let minute_of_day = (time.num_seconds_from_midnight() / 60) as i32;

    diesel::sql_query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind::<Integer, _>(date.num_days_from_ce())
        .bind::<Integer, _>(minute_of_day)
        .execute(conn)
}

fn allocate(conn: &mut PgConnection, date: NaiveDate, time: NaiveTime, party_size: i32) -> Result<Vec<DiningTable>, ReservationLedgerError> {
    match resolve(conn, date, time, party_size)? {
        Allocation::Feasible(tables) => Ok(tables),
        Allocation::Infeasible { party_size, .. } => Err(ReservationLedgerError::Infeasible(
            Allocation::infeasibility_message(party_size)
        ))
    }
}

fn assign_tables(conn: &mut PgConnection, reservation: &Reservation, tables: &[DiningTable]) -> QueryResult<usize> {
    let assignments: Vec<NewTableAssignment> = tables.iter()
        .map(|table| NewTableAssignment{
            reservation_id: reservation.id,
            table_id: table.id,
            reservation_date: reservation.reservation_date,
            reservation_time: reservation.reservation_time
        })
        .collect();

    diesel::insert_into(reservation_tables::table)
        .values(&assignments)
        .execute(conn)
}

// Assignment rows are kept for the audit trail, only marked released
fn release_tables(conn: &mut PgConnection, reservation_id: i32) -> QueryResult<usize> {
    diesel::update(
        reservation_tables::table
            .filter(reservation_tables::reservation_id.eq(reservation_id))
            .filter(reservation_tables::released_at.is_null())
    )
    .set(reservation_tables::released_at.eq(Some(Utc::now())))
    .execute(conn)
}

fn active_tables_by_reservation(conn: &mut PgConnection, reservation_ids: Vec<i32>) -> QueryResult<HashMap<i32, Vec<DiningTable>>> {
    let rows = reservation_tables::table
        .inner_join(dining_tables::table)
        .filter(reservation_tables::reservation_id.eq_any(reservation_ids))
        .filter(reservation_tables::released_at.is_null())
        .order((reservation_tables::reservation_id.asc(), dining_tables::id.asc()))
        .select((reservation_tables::reservation_id, DiningTable::as_select()))
        .load::<(i32, DiningTable)>(conn)?;

    let mut grouped: HashMap<i32, Vec<DiningTable>> = HashMap::new();
    for (reservation_id, table) in rows {
        grouped.entry(reservation_id).or_default().push(table);
    }

    Ok(grouped)
}

// Locks the row for the rest of the transaction. Someone else's reservation
// is reported exactly like a missing one.
fn lock_reservation(
    conn: &mut PgConnection,
    reservation_id: i32,
    owner_filter: Option<Uuid>
) -> Result<Reservation, ReservationLedgerError> {
    let reservation = reservations::table
        .filter(reservations::id.eq(reservation_id))
        .select(Reservation::as_select())
        .for_update()
        .first::<Reservation>(conn)
        .optional()?
        .ok_or(ReservationLedgerError::NotFound(reservation_id))?;

    match owner_filter {
        Some(owner) if owner != reservation.user_id => Err(ReservationLedgerError::NotFound(reservation_id)),
        _ => Ok(reservation)
    }
}

fn set_status(conn: &mut PgConnection, reservation_id: i32, status: ReservationStatus) -> QueryResult<usize> {
    diesel::update(reservations::table.find(reservation_id))
        .set((
            reservations::status.eq(status.as_str()),
            reservations::updated_at.eq(Utc::now())
        ))
        .execute(conn)
}

#[tracing::instrument(
    "Creating reservation and assigning tables",
    skip(conn, draft),
    fields(
        party_size = draft.party_size.get(),
        date = %draft.date.get(),
        time = %draft.time.get()
    )
)]
pub async fn create_reservation(
    mut conn: DbConnection,
    owner: Uuid,
    draft: ReservationDraft
) -> Result<ReservationView, ReservationLedgerError> {

    let res = spawn_blocking_with_tracing(move || {
        in_slot_transaction(&mut conn, |conn| {
            let date = draft.date.get();
            let time = draft.time.get();
            let party_size = draft.party_size.get();

            lock_slot(conn, date, time)?;
            let tables = allocate(conn, date, time, party_size)?;

            let new_reservation = NewReservation{
                user_id: owner,
                name: draft.name.inner(),
                phone: draft.phone.inner(),
                number_of_people: party_size,
                reservation_date: date,
                reservation_time: time,
                note: draft.note.as_ref().map(BoundedText::inner),
                status: ReservationStatus::Pending.as_str().to_string()
            };

            let reservation = diesel::insert_into(reservations::table)
                .values(&new_reservation)
                .returning(Reservation::as_returning())
                .get_result::<Reservation>(conn)?;

            assign_tables(conn, &reservation, &tables)?;

            ReservationView::new(reservation, tables)
        })
    })
    .await??;

    Ok(res)
}

/// Applies `changes` to a pending reservation. When the slot or the party
/// size moves, the reservation's own tables are released and the resolver
/// runs again; if it fails the whole edit is rolled back.
#[tracing::instrument(
    "Updating reservation",
    skip(conn, changes)
)]
pub async fn update_reservation(
    mut conn: DbConnection,
    reservation_id: i32,
    owner_filter: Option<Uuid>,
    changes: ReservationChanges
) -> Result<ReservationView, ReservationLedgerError> {

    let res = spawn_blocking_with_tracing(move || {
        in_slot_transaction(&mut conn, |conn| {
            let current = lock_reservation(conn, reservation_id, owner_filter)?;
            let status = stored_status(&current)?;

            if !status.is_editable() {
                return Err(ReservationLedgerError::NotEditable(status))
            }

            let date = changes.date.map(|d| d.get()).unwrap_or(current.reservation_date);
            let time = changes.time.map(|t| t.get()).unwrap_or(current.reservation_time);
            let party_size = changes.party_size.map(|p| p.get()).unwrap_or(current.number_of_people);

            let moved = date != current.reservation_date
                || time != current.reservation_time
                || party_size != current.number_of_people;

            let new_tables = if moved {
                lock_slot(conn, date, time)?;
                release_tables(conn, current.id)?;
                Some(allocate(conn, date, time, party_size)?)
            } else {
                None
            };

            // Present but blank clears the note, absent keeps it
            let note = match &changes.note {
                Some(note) => note.as_ref().map(BoundedText::inner),
                None => current.note.clone()
            };

            let updated = diesel::update(reservations::table.find(current.id))
                .set((
                    reservations::name.eq(changes.name.as_ref().map(BoundedText::inner).unwrap_or(current.name.clone())),
                    reservations::phone.eq(changes.phone.as_ref().map(|p| p.inner()).unwrap_or(current.phone.clone())),
                    reservations::number_of_people.eq(party_size),
                    reservations::reservation_date.eq(date),
                    reservations::reservation_time.eq(time),
                    reservations::note.eq(note),
                    reservations::updated_at.eq(Utc::now())
                ))
                .returning(Reservation::as_returning())
                .get_result::<Reservation>(conn)?;

            if let Some(tables) = &new_tables {
                assign_tables(conn, &updated, tables)?;
            }

            let tables = active_tables_by_reservation(conn, vec![updated.id])?
                .remove(&updated.id)
                .unwrap_or_default();

            ReservationView::new(updated, tables)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Cancelling reservation",
    skip(conn)
)]
pub async fn cancel_reservation(
    mut conn: DbConnection,
    reservation_id: i32,
    owner_filter: Option<Uuid>
) -> Result<i32, ReservationLedgerError> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<i32, ReservationLedgerError, _>(|conn| {
            let current = lock_reservation(conn, reservation_id, owner_filter)?;
            let next = stored_status(&current)?.cancel()?;

            set_status(conn, current.id, next)?;
            let released = release_tables(conn, current.id)?;
            tracing::info!(released, "Released reservation tables");

            Ok(current.id)
        })
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Confirming reservation",
    skip(conn)
)]
pub async fn confirm_reservation(
    mut conn: DbConnection,
    reservation_id: i32
) -> Result<i32, ReservationLedgerError> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<i32, ReservationLedgerError, _>(|conn| {
            let current = lock_reservation(conn, reservation_id, None)?;
            let next = stored_status(&current)?.confirm()?;

            set_status(conn, current.id, next)?;

            Ok(current.id)
        })
    })
    .await??;

    Ok(res)
}

/// Reservations ordered by slot, each with its active tables. `None` lists
/// everyone's.
#[tracing::instrument(
    "Listing reservations",
    skip(conn)
)]
pub async fn list_reservations(
    mut conn: DbConnection,
    owner_filter: Option<Uuid>
) -> Result<Vec<ReservationView>, ReservationLedgerError> {

    let res = spawn_blocking_with_tracing(move || {
        let mut query = reservations::table
            .order((reservations::reservation_date.asc(), reservations::reservation_time.asc(), reservations::id.asc()))
            .select(Reservation::as_select())
            .into_boxed();

        if let Some(owner) = owner_filter {
            query = query.filter(reservations::user_id.eq(owner));
        }

        let rows = query.load::<Reservation>(&mut conn)?;
        let mut tables = active_tables_by_reservation(&mut conn, rows.iter().map(|r| r.id).collect())?;

        rows.into_iter()
            .map(|reservation| {
                let assigned = tables.remove(&reservation.id).unwrap_or_default();
                ReservationView::new(reservation, assigned)
            })
            .collect::<Result<Vec<_>, ReservationLedgerError>>()
    })
    .await??;

    Ok(res)
}

// Staff view of every reservation with the booking account
#[tracing::instrument(
    "Listing reservations with owners",
    skip_all
)]
pub async fn list_reservations_with_owners(
    mut conn: DbConnection
) -> Result<Vec<OwnedReservationView>, ReservationLedgerError> {

    let res = spawn_blocking_with_tracing(move || {
        let rows = reservations::table
            .inner_join(users::table)
            .order((reservations::reservation_date.asc(), reservations::reservation_time.asc(), reservations::id.asc()))
            .select((Reservation::as_select(), (users::email, users::first_name, users::last_name)))
            .load::<(Reservation, (String, String, String))>(&mut conn)?;

        let mut tables = active_tables_by_reservation(&mut conn, rows.iter().map(|(r, _)| r.id).collect())?;

        rows.into_iter()
            .map(|(reservation, (email, first_name, last_name))| {
                let assigned = tables.remove(&reservation.id).unwrap_or_default();
                Ok(OwnedReservationView{
                    reservation: ReservationView::new(reservation, assigned)?,
                    owner: ReservationOwner{ email, first_name, last_name }
                })
            })
            .collect::<Result<Vec<_>, ReservationLedgerError>>()
    })
    .await??;

    Ok(res)
}
