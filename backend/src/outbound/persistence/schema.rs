//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! The authentication tables use singular SQL names (`user`, `session`,
//! `account`, `verification`); they are exposed here under plural Rust names
//! so `user` does not collide with the reserved word in generated code.

diesel::table! {
    /// Registered users.
    #[sql_name = "user"]
    users (id) {
        id -> Uuid,
        name -> Nullable<Text>,
        /// Unique, stored lowercased.
        email -> Text,
        email_verified -> Bool,
        image -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Server-side sessions addressed by their opaque cookie token.
    #[sql_name = "session"]
    sessions (id) {
        id -> Uuid,
        token -> Text,
        user_id -> Uuid,
        expires_at -> Timestamptz,
        ip_address -> Nullable<Text>,
        user_agent -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Provider links for a user. Email/password users have a single
    /// `credential` row holding the bcrypt hash in `password`.
    #[sql_name = "account"]
    accounts (id) {
        id -> Uuid,
        account_id -> Text,
        provider_id -> Text,
        user_id -> Uuid,
        access_token -> Nullable<Text>,
        refresh_token -> Nullable<Text>,
        id_token -> Nullable<Text>,
        access_token_expires_at -> Nullable<Timestamptz>,
        refresh_token_expires_at -> Nullable<Timestamptz>,
        scope -> Nullable<Text>,
        password -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Outreach campaigns with stored aggregate counters.
    campaigns (id) {
        id -> Uuid,
        name -> Text,
        status -> Text,
        total_leads -> Int4,
        successful_leads -> Int4,
        response_rate -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Prospective customers, optionally attached to a campaign.
    leads (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        company -> Nullable<Text>,
        campaign_id -> Nullable<Uuid>,
        status -> Text,
        last_contact_date -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(accounts -> users (user_id));
diesel::joinable!(leads -> campaigns (campaign_id));

diesel::allow_tables_to_appear_in_same_query!(users, sessions, accounts, campaigns, leads);
