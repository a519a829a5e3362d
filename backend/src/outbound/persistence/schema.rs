//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts owned by the session provider.
    accounts (user_id) {
        user_id -> Uuid,
        /// Lowercased, unique login email.
        email -> Varchar,
        display_name -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Null until the verification link has been redeemed.
        email_confirmed_at -> Nullable<Timestamptz>,
        /// Hex SHA-256 of the outstanding verification token.
        verification_digest -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Volunteer opportunities.
    opportunities (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        /// One of `Education`, `Environment`, `Event Safety`, `Community`.
        category -> Varchar,
        location -> Varchar,
        duration -> Varchar,
        people_needed -> Int4,
        emoji -> Varchar,
        created_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applications; `(opportunity_id, user_id)` is unique.
    applications (id) {
        id -> Uuid,
        opportunity_id -> Uuid,
        user_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(applications -> opportunities (opportunity_id));
diesel::joinable!(opportunities -> accounts (created_by));

diesel::allow_tables_to_appear_in_same_query!(accounts, opportunities, applications);
