diesel::table! {
    bookings (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        selected_time -> Text,
    }
}
