use chrono::NaiveDate;

use super::{BoundedText, PartySize, PhoneNumberDomain, ReservationDate, ReservationTime};

pub const MAX_GUEST_NAME_CHARS: usize = 100;
pub const MAX_NOTE_CHARS: usize = 1000;

/// A validated reservation request, ready for the resolver.
#[derive(Debug, Clone)]
pub struct ReservationDraft{
    pub name: BoundedText,
    pub phone: PhoneNumberDomain,
    pub party_size: PartySize,
    pub date: ReservationDate,
    pub time: ReservationTime,
    pub note: Option<BoundedText>
}

/// Raw fields of a reservation request as received over the wire. `note` is
/// `Some(None)` when the field was sent as null.
#[derive(Debug, Clone, Default)]
pub struct ReservationFields{
    pub name: Option<String>,
    pub phone: Option<String>,
    pub number_of_people: Option<i32>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub note: Option<Option<String>>
}

impl ReservationDraft {
    pub fn parse(
        fields: ReservationFields,
        today: NaiveDate,
        max_party_size: i32
    ) -> Result<ReservationDraft, String>{
        let changes = ReservationChanges::parse(fields, today, max_party_size)?;

        Ok(ReservationDraft{
            name: changes.name.ok_or("name is required")?,
            phone: changes.phone.ok_or("phone is required")?,
            party_size: changes.party_size.ok_or("number_of_people is required")?,
            date: changes.date.ok_or("date is required")?,
            time: changes.time.ok_or("time is required")?,
            note: changes.note.flatten()
        })
    }
}

/// A validated partial update; absent fields keep their stored value and
/// `note: Some(None)` clears the note.
#[derive(Debug, Clone, Default)]
pub struct ReservationChanges{
    pub name: Option<BoundedText>,
    pub phone: Option<PhoneNumberDomain>,
    pub party_size: Option<PartySize>,
    pub date: Option<ReservationDate>,
    pub time: Option<ReservationTime>,
    pub note: Option<Option<BoundedText>>
}

impl ReservationChanges {
    pub fn parse(
        fields: ReservationFields,
        today: NaiveDate,
        max_party_size: i32
    ) -> Result<ReservationChanges, String>{
        Ok(ReservationChanges{
            name: fields.name
                .map(|name| BoundedText::parse(name, "name", MAX_GUEST_NAME_CHARS))
                .transpose()?,
            phone: fields.phone.map(PhoneNumberDomain::parse).transpose()?,
            party_size: fields.number_of_people
                .map(|n| PartySize::parse(n, max_party_size))
                .transpose()?,
            date: fields.date
                .map(|date| ReservationDate::parse(&date, today))
                .transpose()?,
            time: fields.time
                .map(|time| ReservationTime::parse(&time))
                .transpose()?,
            note: fields.note
                .map(|note| BoundedText::parse_optional(note, "note", MAX_NOTE_CHARS))
                .transpose()?
        })
    }
}
