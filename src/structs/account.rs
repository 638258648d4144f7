use serde::Serialize;
use time::OffsetDateTime;

#[derive(Serialize)]
pub struct PublicProfile {
    pub id: i64,
    pub username: String,
    pub biography: String,
    pub avatar_url: String,
    pub created_at: OffsetDateTime,
    pub last_seen: OffsetDateTime,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_followed: bool,
}

/// Flat row shape returned by the profile query
#[derive(sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub biography: String,
    pub created_at: OffsetDateTime,
    pub last_seen: OffsetDateTime,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_followed: bool,
}
