use serde::Serialize;
use time::OffsetDateTime;

#[derive(Serialize)]
pub struct PublicPostAuthor {
    pub id: i64,
    pub username: String,
}

#[derive(Serialize)]
pub struct PublicPost {
    pub id: i64,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub author: PublicPostAuthor,
}

/// Flat row shape returned by the posts queries, before nesting the author
#[derive(sqlx::FromRow)]
pub struct PostWithAuthorRow {
    pub id: i64,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub author_id: i64,
    pub author_username: String,
}

impl From<PostWithAuthorRow> for PublicPost {
    fn from(row: PostWithAuthorRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            author: PublicPostAuthor {
                id: row.author_id,
                username: row.author_username,
            },
        }
    }
}
