// ABOUTME: Canned LibreLinkUp response bodies and time helpers for tests
// ABOUTME: Mirrors the shapes returned by the login, connections and graph endpoints

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

pub const TEST_EMAIL: &str = "follower@example.com";
pub const TEST_PASSWORD: &str = "correct horse battery staple";
pub const TEST_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.test-token";
pub const TEST_USER_ID: &str = "a1b2c3d4-0000-4000-8000-123456789abc";
pub const TEST_PATIENT_ID: &str = "p-9f8e7d6c";

pub fn login_ok(token: &str, user_id: &str) -> Value {
    json!({
        "status": 0,
        "data": {
            "user": { "id": user_id, "country": "DE" },
            "authTicket": { "token": token, "expires": 1_700_000_000, "duration": 15_552_000_000_i64 }
        }
    })
}

pub fn login_redirect(region: &str) -> Value {
    json!({
        "status": 0,
        "data": { "redirect": true, "region": region }
    })
}

pub fn connections(patient_id: &str) -> Value {
    json!({
        "status": 0,
        "data": [
            { "patientId": patient_id, "firstName": "Pat", "lastName": "Ient" }
        ]
    })
}

pub fn connections_empty() -> Value {
    json!({ "status": 0, "data": [] })
}

pub fn graph(value: f64, timestamp: &str, trend: i64) -> Value {
    json!({
        "status": 0,
        "data": {
            "connection": {
                "patientId": TEST_PATIENT_ID,
                "glucoseMeasurement": {
                    "FactoryTimestamp": timestamp,
                    "Timestamp": timestamp,
                    "ValueInMgPerDl": value,
                    "TrendArrow": trend,
                    "MeasurementColor": 1,
                    "isHigh": false,
                    "isLow": false
                }
            },
            "graphData": []
        }
    })
}

/// Instant of a wall-clock time in the local zone
pub fn local_instant(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap();
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}
