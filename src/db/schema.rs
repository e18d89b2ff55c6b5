//! Database schema and migrations.
//!
//! Migrations are applied in order when the database is opened. The
//! schema_version table records how many have been applied.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: posts and their replies
    r#"
-- Post documents. seq gives the listing order, id is the public identifier.
CREATE TABLE posts (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT NOT NULL UNIQUE,
    author      TEXT NOT NULL,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Replies embedded in a post, ordered by id.
CREATE TABLE replies (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id     TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    replier     TEXT NOT NULL,
    reply_text  TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_replies_post_id ON replies(post_id, id);
"#,
];
