//! Table selection for a reservation slot.
//!
//! The resolver reads the tables already committed to active reservations at
//! a (date, time) slot, removes them from the inventory, and picks tables for
//! the party from what is left:
//!
//! 1. a single free table whose capacity equals the party size, if any;
//! 2. otherwise the free tables from largest to smallest until the party is
//!    seated.
//!
//! Ties are broken by ascending table id. The greedy walk may over-allocate
//! seats; it never combines tables when one fits exactly.
//!
//! [`resolve`] must run inside the same transaction as the write of the
//! resulting assignments, see `db_interaction::reservations`.

use chrono::{NaiveDate, NaiveTime};
use diesel::{ExpressionMethods, PgConnection, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};

use crate::{
    domain::ReservationStatus,
    models::DiningTable,
    schema::{dining_tables, reservation_tables, reservations}
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation{
    Feasible(Vec<DiningTable>),
    Infeasible{
        party_size: i32,
        free_seats: i32
    }
}

impl Allocation {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Allocation::Feasible(_))
    }

    pub fn infeasibility_message(party_size: i32) -> String {
        format!("Unable to find enough free tables for {} people", party_size)
    }
}

/// Picks tables for `party_size` guests out of `free`.
pub fn select_tables(mut free: Vec<DiningTable>, party_size: i32) -> Allocation{
    let free_seats: i32 = free.iter().map(|table| table.seats).sum();

    if party_size < 1 {
        return Allocation::Infeasible { party_size, free_seats }
    }

    free.sort_by_key(|table| table.id);

    if let Some(position) = free.iter().position(|table| table.seats == party_size) {
        return Allocation::Feasible(vec![free.swap_remove(position)])
    }

    free.sort_by(|a, b| b.seats.cmp(&a.seats).then(a.id.cmp(&b.id)));

    let mut remaining = party_size;
    let mut selected = Vec::new();

    for table in free {
        if remaining <= 0 {
            break;
        }
        remaining -= table.seats;
        selected.push(table);
    }

    if remaining <= 0 {
        Allocation::Feasible(selected)
    } else {
        Allocation::Infeasible { party_size, free_seats }
    }
}

/// Ids of the tables held by active reservations at exactly this slot.
pub fn committed_table_ids(
    conn: &mut PgConnection,
    date: NaiveDate,
    time: NaiveTime
) -> QueryResult<Vec<i32>>{
    reservation_tables::table
        .inner_join(reservations::table)
        .filter(reservation_tables::reservation_date.eq(date))
        .filter(reservation_tables::reservation_time.eq(time))
        .filter(reservation_tables::released_at.is_null())
        .filter(reservations::status.eq_any(ReservationStatus::active_strs()))
        .select(reservation_tables::table_id)
        .load::<i32>(conn)
}

pub fn free_tables(
    conn: &mut PgConnection,
    date: NaiveDate,
    time: NaiveTime
) -> QueryResult<Vec<DiningTable>>{
    let committed = committed_table_ids(conn, date, time)?;

    dining_tables::table
        .filter(dining_tables::id.ne_all(committed))
        .order(dining_tables::id.asc())
        .select(DiningTable::as_select())
        .load::<DiningTable>(conn)
}

#[tracing::instrument(
    "Resolving table availability",
    skip(conn)
)]
pub fn resolve(
    conn: &mut PgConnection,
    date: NaiveDate,
    time: NaiveTime,
    party_size: i32
) -> QueryResult<Allocation>{
    let free = free_tables(conn, date, time)?;
    let allocation = select_tables(free, party_size);

    match &allocation {
        Allocation::Feasible(tables) => tracing::info!(
            table_ids = ?tables.iter().map(|t| t.id).collect::<Vec<_>>(),
            "Tables selected"
        ),
        Allocation::Infeasible { free_seats, .. } => tracing::info!(
            free_seats,
            "Not enough free seats for the party"
        )
    }

    Ok(allocation)
}
