//! Diesel schema for task persistence.

diesel::table! {
    /// Task records shown on the board.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Trimmed task description.
        #[max_length = 1024]
        description -> Varchar,
        /// Board column: `todo`, `doing`, or `done`.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
