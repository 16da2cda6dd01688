/// SQL schema for the Socialytics database
/// Creates all tables with proper constraints and foreign keys
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS Users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    email TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- Posts table
CREATE TABLE IF NOT EXISTS Posts (
    post_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    likes INTEGER NOT NULL DEFAULT 0 CHECK(likes >= 0),
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES Users(user_id) ON DELETE CASCADE
);

-- Comments table
CREATE TABLE IF NOT EXISTS Comments (
    comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (post_id) REFERENCES Posts(post_id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES Users(user_id) ON DELETE CASCADE
);

-- Relationships table (one-way follows)
CREATE TABLE IF NOT EXISTS Relationships (
    follower_id INTEGER NOT NULL,
    following_id INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (follower_id, following_id),
    FOREIGN KEY (follower_id) REFERENCES Users(user_id) ON DELETE CASCADE,
    FOREIGN KEY (following_id) REFERENCES Users(user_id) ON DELETE CASCADE
);
"#;

/// Secondary indexes backing the analytics aggregates
pub const INDEXES: &[(&str, &str)] = &[
    (
        "idx_relationships_following_id",
        "CREATE INDEX IF NOT EXISTS idx_relationships_following_id ON Relationships(following_id)",
    ),
    (
        "idx_posts_user_id",
        "CREATE INDEX IF NOT EXISTS idx_posts_user_id ON Posts(user_id)",
    ),
    (
        "idx_comments_user_id",
        "CREATE INDEX IF NOT EXISTS idx_comments_user_id ON Comments(user_id)",
    ),
    (
        "idx_comments_post_id",
        "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON Comments(post_id)",
    ),
    (
        "idx_posts_created_at",
        "CREATE INDEX IF NOT EXISTS idx_posts_created_at ON Posts(created_at DESC)",
    ),
    (
        "idx_users_created_at",
        "CREATE INDEX IF NOT EXISTS idx_users_created_at ON Users(created_at)",
    ),
];

/// A column an existing table must carry to stay data-compatible
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    /// Declared `NOT NULL` (rowid aliases report nullable and are left unflagged)
    pub not_null: bool,
}

/// Shape and constraints an existing table is checked against
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
    /// Single columns backed by a unique index
    pub unique: &'static [&'static str],
    /// `(column, referenced table)` foreign keys
    pub references: &'static [(&'static str, &'static str)],
    /// CHECK clauses, compared with whitespace removed and lowercased
    pub checks: &'static [&'static str],
}

const fn col(name: &'static str, sql_type: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        not_null: true,
    }
}

const fn key(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        sql_type: "INTEGER",
        not_null: false,
    }
}

pub const TABLES: &[TableDef] = &[
    TableDef {
        name: "Users",
        columns: &[
            key("user_id"),
            col("username", "TEXT"),
            col("email", "TEXT"),
            col("created_at", "TEXT"),
        ],
        unique: &["username"],
        references: &[],
        checks: &[],
    },
    TableDef {
        name: "Posts",
        columns: &[
            key("post_id"),
            col("user_id", "INTEGER"),
            col("content", "TEXT"),
            col("likes", "INTEGER"),
            col("created_at", "TEXT"),
        ],
        unique: &[],
        references: &[("user_id", "Users")],
        checks: &["check(likes>=0)"],
    },
    TableDef {
        name: "Comments",
        columns: &[
            key("comment_id"),
            col("post_id", "INTEGER"),
            col("user_id", "INTEGER"),
            col("content", "TEXT"),
            col("created_at", "TEXT"),
        ],
        unique: &[],
        references: &[("post_id", "Posts"), ("user_id", "Users")],
        checks: &[],
    },
    TableDef {
        name: "Relationships",
        columns: &[
            col("follower_id", "INTEGER"),
            col("following_id", "INTEGER"),
            col("created_at", "TEXT"),
        ],
        unique: &[],
        references: &[("follower_id", "Users"), ("following_id", "Users")],
        checks: &[],
    },
];
