//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lower-cased.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        role -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tour catalogue. `seq` records insertion order; archived tours keep
    /// their row.
    tours (id) {
        seq -> Int8,
        id -> Uuid,
        name -> Varchar,
        description -> Text,
        price -> Int8,
        duration -> Int8,
        max_group_size -> Int8,
        location -> Varchar,
        image -> Varchar,
        images -> Array<Text>,
        featured -> Bool,
        rating -> Float4,
        num_reviews -> Int8,
        difficulty -> Varchar,
        category -> Varchar,
        start_dates -> Array<Date>,
        available -> Bool,
        created_at -> Timestamptz,
        archived_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Bookings. A partial unique index keeps one active booking per
    /// user, tour and date.
    bookings (id) {
        id -> Uuid,
        user_id -> Uuid,
        tour_id -> Uuid,
        booking_date -> Date,
        participants -> Int8,
        total_price -> Int8,
        status -> Varchar,
        contact_name -> Varchar,
        contact_email -> Varchar,
        contact_phone -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Server-side sessions keyed by the SHA-256 of the client token.
    sessions (fingerprint) {
        fingerprint -> Varchar,
        user_id -> Uuid,
        user_name -> Varchar,
        user_email -> Varchar,
        user_role -> Varchar,
        created_at -> Timestamptz,
        last_seen_at -> Timestamptz,
    }
}

diesel::joinable!(bookings -> users (user_id));
diesel::joinable!(bookings -> tours (tour_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, tours, bookings, sessions);
