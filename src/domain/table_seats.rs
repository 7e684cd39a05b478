pub const ALLOWED_TABLE_SEATS: [i32; 3] = [2, 4, 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSeats(i32);

impl TableSeats {
    pub fn parse(seats: i32) -> Result<TableSeats, String>{
        if ALLOWED_TABLE_SEATS.contains(&seats) {
            Ok(Self(seats))
        } else {
            Err("a table must have 2, 4 or 6 seats".to_string())
        }
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}
