use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{Achievement, Profile, UserStats};

pub async fn find_profile(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, full_name, avatar_url, bio
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("fetch profile")?;
    Ok(profile)
}

pub async fn find_stats(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<UserStats>> {
    let stats = sqlx::query_as::<_, UserStats>(
        r#"
        SELECT workouts_count, recipes_count, calories_burned
        FROM user_stats
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("fetch user stats")?;
    Ok(stats)
}

/// Earned achievements for a user, one flat row per earned achievement.
pub async fn list_achievements(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Achievement>> {
    let rows = sqlx::query_as::<_, Achievement>(
        r#"
        SELECT a.id, a.title, a.description, a.icon, ua.earned_at
        FROM user_achievements ua
        JOIN achievements a ON a.id = ua.achievement_id
        WHERE ua.user_id = $1
        ORDER BY ua.earned_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list achievements")?;
    Ok(rows)
}

/// Insert the empty profile and zeroed stats rows for a new user.
pub async fn seed_defaults(db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("begin tx")?;
    sqlx::query(
        r#"
        INSERT INTO profiles (id)
        VALUES ($1)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await
    .context("insert profile")?;
    sqlx::query(
        r#"
        INSERT INTO user_stats (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await
    .context("insert user stats")?;
    tx.commit().await.context("commit tx")?;
    Ok(())
}
