use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::interpreter::Recommendations;
use crate::models::*;

const SEARCH_COLUMNS: &str = "id, user_id, symptoms, severity_level, predicted_diseases,
     recommendations, emergency_triggered, search_location, created_at";

pub fn insert_search(conn: &Connection, search: &HealthSearch) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_searches (id, user_id, symptoms, severity_level, predicted_diseases,
         recommendations, emergency_triggered, search_location, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            search.id.to_string(),
            search.user_id,
            search.symptoms,
            search.severity_level.as_str(),
            serde_json::to_string(&search.predicted_diseases)?,
            serde_json::to_string(&search.recommendations)?,
            search.emergency_triggered as i32,
            search.search_location,
            search.created_at,
        ],
    )?;
    Ok(())
}

pub fn get_search(conn: &Connection, id: &Uuid) -> Result<Option<HealthSearch>, DatabaseError> {
    let sql = format!("SELECT {SEARCH_COLUMNS} FROM health_searches WHERE id = ?1");
    let result = conn.query_row(&sql, params![id.to_string()], read_search_row);

    match result {
        Ok(row) => Ok(Some(search_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// A user's searches, newest first. `limit` of `None` returns all of them.
pub fn list_searches_for_user(
    conn: &Connection,
    user_id: &str,
    limit: Option<u32>,
) -> Result<Vec<HealthSearch>, DatabaseError> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit = limit.map_or(-1, i64::from);
    let sql = format!(
        "SELECT {SEARCH_COLUMNS} FROM health_searches WHERE user_id = ?1
         ORDER BY created_at DESC, rowid DESC LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, limit], read_search_row)?;

    let mut searches = Vec::new();
    for row in rows {
        searches.push(search_from_row(row?)?);
    }
    Ok(searches)
}

pub fn delete_search(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM health_searches WHERE id = ?1",
        params![id.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "HealthSearch".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// Internal row type for HealthSearch mapping
struct SearchRow {
    id: String,
    user_id: String,
    symptoms: String,
    severity_level: String,
    predicted_diseases: String,
    recommendations: String,
    emergency_triggered: i32,
    search_location: Option<String>,
    created_at: NaiveDateTime,
}

fn read_search_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SearchRow> {
    Ok(SearchRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        symptoms: row.get(2)?,
        severity_level: row.get(3)?,
        predicted_diseases: row.get(4)?,
        recommendations: row.get(5)?,
        emergency_triggered: row.get(6)?,
        search_location: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn search_from_row(row: SearchRow) -> Result<HealthSearch, DatabaseError> {
    let predicted_diseases: Vec<String> = serde_json::from_str(&row.predicted_diseases)?;
    let recommendations: Recommendations = serde_json::from_str(&row.recommendations)?;
    Ok(HealthSearch {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        user_id: row.user_id,
        symptoms: row.symptoms,
        severity_level: SeverityLevel::from_str(&row.severity_level)?,
        predicted_diseases,
        recommendations,
        emergency_triggered: row.emergency_triggered != 0,
        search_location: row.search_location,
        created_at: row.created_at,
    })
}
