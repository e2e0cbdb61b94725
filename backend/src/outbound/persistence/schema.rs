//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// User documents.
    ///
    /// `email` is unique and stored normalised. `places` lists the ids of
    /// the places the user created.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password -> Text,
        image -> Text,
        places -> Array<Uuid>,
    }
}

diesel::table! {
    /// Place documents. `creator` has no foreign key; the linkage service
    /// keeps it consistent with `users.places`.
    places (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        address -> Text,
        lat -> Float8,
        lng -> Float8,
        image -> Text,
        creator -> Uuid,
    }
}

diesel::allow_tables_to_appear_in_same_query!(places, users);
