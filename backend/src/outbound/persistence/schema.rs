//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for type-safe SQL generation. Regenerate with `diesel print-schema`
//! when migrations change.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` carries a unique index and is compared case-sensitively.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login name and author identity.
        email -> Text,
        /// Opaque password hash.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Documents, draft or published.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Document title.
        title -> Text,
        /// Rich-text tree stored as JSONB.
        content -> Jsonb,
        /// DRAFT or PUBLISHED.
        status -> Text,
        /// Owner reference, fixed at creation.
        user_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Refreshed on every mutation.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(posts, users);
