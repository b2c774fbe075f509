//! Diesel schema for the Kanban tables.

diesel::table! {
    /// Registered users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Unique, lowercased email address.
        #[max_length = 255]
        email -> Varchar,
        /// Avatar image URL.
        image -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Boards and their owners.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Board name.
        #[max_length = 50]
        name -> Varchar,
        /// Optional description.
        #[max_length = 200]
        description -> Nullable<Varchar>,
        /// Owning user.
        owner_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Board membership rows.
    board_members (board_id, user_id) {
        /// Board identifier.
        board_id -> Uuid,
        /// Member identifier.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Concrete column rows of each board.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Parent board.
        board_id -> Uuid,
        /// Semantic key (`todo`, `in_progress`, `done`).
        #[max_length = 20]
        column_key -> Varchar,
        /// Display title.
        #[max_length = 100]
        title -> Varchar,
        /// Display color.
        #[max_length = 16]
        color -> Varchar,
        /// Column order index.
        position -> Int4,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Parent board.
        board_id -> Uuid,
        /// Column currently holding the task.
        column_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Semantic status, matching the column key.
        #[max_length = 20]
        status -> Varchar,
        /// Priority code (`LOW`, `MEDIUM`, `HIGH`).
        #[max_length = 10]
        priority -> Varchar,
        /// Assigned user.
        assignee_id -> Nullable<Uuid>,
        /// Due date.
        due_date -> Nullable<Timestamptz>,
        /// Ordered tag list.
        tags -> Array<Text>,
        /// Position within the column.
        sort_order -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task comments.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Parent task.
        task_id -> Uuid,
        /// Author.
        author_id -> Uuid,
        /// Comment body.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task attachments.
    attachments (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Parent task.
        task_id -> Uuid,
        /// File name.
        #[max_length = 255]
        name -> Varchar,
        /// File URL.
        url -> Text,
        /// MIME type.
        #[max_length = 255]
        mime_type -> Varchar,
        /// File size in bytes.
        size_bytes -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(boards -> users (owner_id));
diesel::joinable!(board_members -> boards (board_id));
diesel::joinable!(board_columns -> boards (board_id));
diesel::joinable!(tasks -> boards (board_id));
diesel::joinable!(tasks -> board_columns (column_id));
diesel::joinable!(comments -> tasks (task_id));
diesel::joinable!(attachments -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    boards,
    board_members,
    board_columns,
    tasks,
    comments,
    attachments,
);
