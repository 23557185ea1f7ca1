use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::UserProfile;

/// Insert or fully replace a user's profile. Returns the stored record with
/// its new `updated_at`.
pub fn upsert_profile(conn: &Connection, profile: &UserProfile) -> Result<UserProfile, DatabaseError> {
    let updated_at = Utc::now().naive_utc();
    conn.execute(
        "INSERT INTO profiles (user_id, full_name, age, gender, height, weight, medical_history, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(user_id) DO UPDATE SET
            full_name = excluded.full_name,
            age = excluded.age,
            gender = excluded.gender,
            height = excluded.height,
            weight = excluded.weight,
            medical_history = excluded.medical_history,
            updated_at = excluded.updated_at",
        params![
            profile.user_id,
            profile.full_name,
            profile.age,
            profile.gender,
            profile.height,
            profile.weight,
            profile.medical_history,
            updated_at,
        ],
    )?;

    Ok(UserProfile {
        updated_at: Some(updated_at),
        ..profile.clone()
    })
}

pub fn get_profile(conn: &Connection, user_id: &str) -> Result<Option<UserProfile>, DatabaseError> {
    let result = conn.query_row(
        "SELECT user_id, full_name, age, gender, height, weight, medical_history, updated_at
         FROM profiles WHERE user_id = ?1",
        params![user_id],
        |row| {
            Ok(UserProfile {
                user_id: row.get(0)?,
                full_name: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                height: row.get(4)?,
                weight: row.get(5)?,
                medical_history: row.get(6)?,
                updated_at: row.get::<_, Option<NaiveDateTime>>(7)?,
            })
        },
    );

    match result {
        Ok(profile) => Ok(Some(profile)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
