use std::time::Duration;

use sqlx::PgPool;
use tracing::{info, warn};

pub async fn delete_not_activated_expired_accounts(pool: &PgPool) {
    let mut interval = tokio::time::interval(Duration::from_secs(86400));
    loop {
        interval.tick().await;
        match sqlx::query_scalar::<_, i64>(
            r#"WITH deleted_rows AS (DELETE FROM users WHERE email_verified = FALSE AND created_at + INTERVAL '10 minutes' < NOW() RETURNING id) SELECT COUNT(id) FROM deleted_rows"#,
        )
        .fetch_one(pool)
        .await
        {
            Ok(total) => info!("Deleted {} useless account.s", total),
            Err(e) => warn!("Error deleting not activated expired accounts : {e}"),
        }
    }
}
