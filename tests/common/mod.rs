#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;
use vacancy_tracker::{database::memory::MemoryStore, utils::time::ManualClock, AppState};

pub struct TestApp {
    pub router: Router,
    pub clock: ManualClock,
}

pub fn t1() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 8, 30, 0).unwrap()
}

pub fn setup_app() -> TestApp {
    let clock = ManualClock::new(t1());
    let state = AppState::new(
        "memory",
        Arc::new(MemoryStore::new()),
        Arc::new(clock.clone()),
    );
    TestApp {
        router: vacancy_tracker::app(state),
        clock,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        match body {
            Some(body) => self.send_raw(method, uri, &body.to_string()).await,
            None => {
                let req = Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap();
                self.dispatch(req).await
            }
        }
    }

    /// Sends `body` verbatim as `application/json`, well-formed or not.
    pub async fn send_raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, JsonValue) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.dispatch(req).await
    }

    async fn dispatch(&self, req: Request<Body>) -> (StatusCode, JsonValue) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn create_user(&self, username: &str) -> Uuid {
        let (status, body) = self
            .send("POST", "/api/users", Some(json!({ "username": username })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        id_of(&body)
    }

    pub async fn create_vacancy(&self, author_id: Uuid, title: &str, status: &str) -> JsonValue {
        let (code, body) = self
            .send(
                "POST",
                "/api/vacancies",
                Some(vacancy_body(author_id, title, status)),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED, "{}", body);
        body
    }

    pub async fn create_comment(&self, vacancy_id: Uuid, author_id: Uuid, text: &str) -> JsonValue {
        let (code, body) = self
            .send(
                "POST",
                "/api/comments",
                Some(json!({
                    "text": text,
                    "vacancy_id": vacancy_id,
                    "author_id": author_id,
                })),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED, "{}", body);
        body
    }
}

pub fn vacancy_body(author_id: Uuid, title: &str, status: &str) -> JsonValue {
    json!({
        "title": title,
        "company": "Acme",
        "description": "Backend services in Rust",
        "min_salary": "3000.00",
        "max_salary": "4500.50",
        "status": status,
        "author_id": author_id,
    })
}

pub fn id_of(body: &JsonValue) -> Uuid {
    serde_json::from_value(body["id"].clone()).unwrap()
}

pub fn ts(value: &JsonValue) -> DateTime<Utc> {
    serde_json::from_value(value.clone()).unwrap()
}

pub fn ids(list: &JsonValue) -> Vec<Uuid> {
    list["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(id_of)
        .collect()
}
