//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly; `diesel print-schema` against a migrated
//! database regenerates it.

diesel::table! {
    /// Recipe headers. `id` is a `SERIAL` primary key.
    recipes (id) {
        id -> Int4,
        name -> Varchar,
        cuisine -> Nullable<Varchar>,
        description -> Varchar,
        cooking_time -> Int2,
        created_at -> Timestamp,
        views_amount -> Int4,
    }
}

diesel::table! {
    /// Ingredient lines; rows go away with their recipe (`ON DELETE CASCADE`).
    ingredients (id) {
        id -> Int4,
        name -> Varchar,
        quantity -> Varchar,
        recipe_id -> Int4,
    }
}

diesel::joinable!(ingredients -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(ingredients, recipes);
