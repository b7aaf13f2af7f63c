use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A user's display profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub avatar_url: String,
    pub bio: String,
}

/// Aggregate activity counters shown on the profile screen.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserStats {
    pub workouts_count: i32,
    pub recipes_count: i32,
    pub calories_burned: i32,
}

/// One earned achievement, flattened from the linking-table join:
/// the achievement definition plus when this user earned it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(with = "time::serde::rfc3339")]
    pub earned_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn achievements_serialize_as_a_flat_list() {
        let achievements = vec![
            Achievement {
                id: Uuid::new_v4(),
                title: "30 Day Streak".into(),
                description: "Logged meals for 30 days".into(),
                icon: "award".into(),
                earned_at: datetime!(2025-03-01 10:00 UTC),
            },
            Achievement {
                id: Uuid::new_v4(),
                title: "Goal Crusher".into(),
                description: "Hit all weekly targets".into(),
                icon: "calendar".into(),
                earned_at: datetime!(2025-03-08 10:00 UTC),
            },
        ];

        let json = serde_json::to_value(&achievements).unwrap();
        let list = json.as_array().expect("top level is an array");
        assert_eq!(list.len(), 2);
        for item in list {
            // Flat objects: no nested arrays or join wrappers per element.
            assert!(item.is_object());
            assert!(item.get("title").is_some());
            assert!(item.get("earned_at").is_some());
            assert!(item.as_object().unwrap().values().all(|v| !v.is_array()));
        }
    }

    #[test]
    fn stats_serialization_uses_store_field_names() {
        let stats = UserStats {
            workouts_count: 156,
            recipes_count: 32,
            calories_burned: 8500,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["workouts_count"], 156);
        assert_eq!(json["recipes_count"], 32);
        assert_eq!(json["calories_burned"], 8500);
    }
}
