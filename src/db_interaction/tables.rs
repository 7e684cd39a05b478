use std::{error::Error, fmt::Debug};

use diesel::{
    result::DatabaseErrorKind, Connection, ExpressionMethods, OptionalExtension, QueryDsl,
    RunQueryDsl, SelectableHelper
};
use thiserror::Error;

use crate::{
    domain::ReservationStatus,
    models::{DiningTable, DiningTableChanges, NewDiningTable},
    schema::{dining_tables, reservation_tables, reservations},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, DbConnection}
};

#[derive(Error)]
pub enum TableStoreError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("Table {0} not found")]
    NotFound(i32),
    #[error("Table {0} is assigned to an active reservation")]
    InUse(i32)
}

impl Debug for TableStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Getting dining tables",
    skip_all
)]
pub async fn get_tables(mut conn: DbConnection) -> Result<Vec<DiningTable>, TableStoreError> {
    let res = spawn_blocking_with_tracing(move || {
        dining_tables::table
            .order((dining_tables::seats.asc(), dining_tables::name.asc()))
            .select(DiningTable::as_select())
            .load::<DiningTable>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Inserting dining table",
    skip(conn)
)]
pub async fn insert_table(
    mut conn: DbConnection,
    table: NewDiningTable
) -> Result<DiningTable, TableStoreError> {
    let res = spawn_blocking_with_tracing(move || {
        diesel::insert_into(dining_tables::table)
            .values(&table)
            .returning(DiningTable::as_returning())
            .get_result::<DiningTable>(&mut conn)
    })
    .await??;

    Ok(res)
}

#[tracing::instrument(
    "Updating dining table",
    skip(conn)
)]
pub async fn update_table(
    mut conn: DbConnection,
    table_id: i32,
    changes: DiningTableChanges
) -> Result<DiningTable, TableStoreError> {
    let res = spawn_blocking_with_tracing(move || {
        let updated = if changes.is_empty() {
            dining_tables::table
                .find(table_id)
                .select(DiningTable::as_select())
                .first::<DiningTable>(&mut conn)
                .optional()?
        } else {
            diesel::update(dining_tables::table.find(table_id))
                .set(&changes)
                .returning(DiningTable::as_returning())
                .get_result::<DiningTable>(&mut conn)
                .optional()?
        };

        updated.ok_or(TableStoreError::NotFound(table_id))
    })
    .await??;

    Ok(res)
}

/// Deletes a table that holds no active assignment. Released assignment rows
/// pointing at it go with it.
#[tracing::instrument(
    "Deleting dining table",
    skip(conn)
)]
pub async fn delete_table(
    mut conn: DbConnection,
    table_id: i32
) -> Result<(), TableStoreError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<(), TableStoreError, _>(|conn| {
            let exists = dining_tables::table
                .find(table_id)
                .select(dining_tables::id)
                .first::<i32>(conn)
                .optional()?;

            if exists.is_none() {
                return Err(TableStoreError::NotFound(table_id))
            }

            let active_assignments = reservation_tables::table
                .inner_join(reservations::table)
                .filter(reservation_tables::table_id.eq(table_id))
                .filter(reservation_tables::released_at.is_null())
                .filter(reservations::status.eq_any(ReservationStatus::active_strs()))
                .count()
                .get_result::<i64>(conn)?;

            if active_assignments > 0 {
                return Err(TableStoreError::InUse(table_id))
            }

            diesel::delete(
                reservation_tables::table
                    .filter(reservation_tables::table_id.eq(table_id))
                    .filter(reservation_tables::released_at.is_not_null())
            )
            .execute(conn)?;

            // A booking committed since the check still holds the table
            diesel::delete(dining_tables::table.find(table_id))
                .execute(conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TableStoreError::InUse(table_id)
                    },
                    e => TableStoreError::RunQueryError(e)
                })?;

            Ok(())
        })
    })
    .await??;

    Ok(())
}
