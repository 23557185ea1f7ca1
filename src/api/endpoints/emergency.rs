//! `GET /api/emergency?location=...`: emergency call and hospital search
//! links.

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use crate::emergency::EmergencyContacts;

#[derive(Deserialize)]
pub struct EmergencyQuery {
    pub location: Option<String>,
}

pub async fn contacts(Query(query): Query<EmergencyQuery>) -> Json<EmergencyContacts> {
    Json(EmergencyContacts::for_location(query.location.as_deref()))
}
