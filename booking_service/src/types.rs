use serde::{Deserialize, Serialize};

/// A reserved slot. `selected_time` is the conflict key, `id` only orders bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "postgres",
    derive(diesel::Queryable, diesel::Selectable),
    diesel(table_name = crate::schema::bookings)
)]
pub struct Booking {
    pub name: String,
    pub email: String,
    pub selected_time: String,
    // Records written by the old server may lack an id.
    #[serde(default)]
    pub id: i64,
}

/// A validated booking request that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(
    feature = "postgres",
    derive(diesel::Insertable),
    diesel(table_name = crate::schema::bookings)
)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub selected_time: String,
}

impl NewBooking {
    pub fn with_id(self, id: i64) -> Booking {
        Booking {
            name: self.name,
            email: self.email,
            selected_time: self.selected_time,
            id,
        }
    }
}
