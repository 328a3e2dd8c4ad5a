use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method as HttpMethod, Request, StatusCode},
    Router,
};
use reqwest::Method;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use screening_dashboard::{
    error::{Error, Result},
    gateway::{Gateway, UploadForm},
    routes, AppState,
};

type Canned = Box<dyn Fn(Option<&JsonValue>) -> Result<JsonValue> + Send + Sync>;

/// In-memory screening API: canned answers per `METHOD path`, every call recorded.
#[derive(Default)]
struct StubGateway {
    routes: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<(String, Option<JsonValue>)>>,
}

impl StubGateway {
    fn on(
        self: &Arc<Self>,
        method: Method,
        path: &str,
        answer: impl Fn(Option<&JsonValue>) -> Result<JsonValue> + Send + Sync + 'static,
    ) {
        self.routes
            .lock()
            .unwrap()
            .insert(format!("{} {}", method, path), Box::new(answer));
    }

    fn calls_to(&self, method: Method, path: &str) -> Vec<Option<JsonValue>> {
        let key = format!("{} {}", method, path);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[async_trait]
impl Gateway for StubGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        let key = format!("{} {}", method, path);
        self.calls.lock().unwrap().push((key.clone(), body.clone()));
        match self.routes.lock().unwrap().get(&key) {
            Some(answer) => answer(body.as_ref()),
            None => Err(Error::api(404, format!("No stub for {}", key))),
        }
    }

    async fn upload(&self, path: &str, form: UploadForm) -> Result<JsonValue> {
        let key = format!("UPLOAD {}", path);
        self.calls
            .lock()
            .unwrap()
            .push((key.clone(), Some(json!({ "file_name": form.file_name }))));
        match self.routes.lock().unwrap().get(&key) {
            Some(answer) => answer(None),
            None => Err(Error::api(404, format!("No stub for {}", key))),
        }
    }
}

fn app(stub: &Arc<StubGateway>) -> Router {
    let gateway: Arc<dyn Gateway> = stub.clone();
    routes::dashboard_router().with_state(AppState::new(gateway))
}

async fn call(app: &Router, method: HttpMethod, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn roster() -> JsonValue {
    json!([
        {"id": 1, "candidate_name": "Ayesha Khan", "email": "ayesha@example.com", "phone": "+8801711111111", "score": 85, "status": "shortlisted"},
        {"id": 2, "candidate_name": "Babul Mia", "email": "babul@example.com", "score": 55, "status": "pending"},
        {"id": 3, "candidate_name": "Chaity Roy", "email": "Not Provided", "score": 91, "status": "shortlisted"}
    ])
}

fn inbox() -> JsonValue {
    json!({
        "success": true,
        "emails": [
            {"ID": "m1", "From": "ceo@corp.io", "Subject": "Board meeting", "Summary": "Agenda", "Type": "Meeting", "Intention": "Schedule", "Flag": "not spam", "Score": 92},
            {"ID": "m2", "From": "promo@shop.io", "Subject": "50% off", "Summary": "Sale", "Type": "Marketing", "Intention": "Sell", "Flag": "spam", "Score": 5},
            {"ID": "m3", "From": "vendor@corp.io", "Subject": "Invoice 42", "Summary": "Payment due", "Type": "Transactional", "Intention": "Payment", "Flag": "not spam", "Score": 70, "Labels": ["finance"]}
        ]
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let stub = Arc::new(StubGateway::default());
    let (status, body) = call(&app(&stub), HttpMethod::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn roster_filter_and_selection_flow() {
    let stub = Arc::new(StubGateway::default());
    stub.on(Method::GET, "/candidates/", |_| Ok(roster()));
    let app = app(&stub);

    let (status, body) = call(&app, HttpMethod::POST, "/dashboard/candidates/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loaded"], 3);

    let (_, body) = call(
        &app,
        HttpMethod::GET,
        "/dashboard/candidates?status=shortlisted&min_score=90",
        None,
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["candidates"][0]["id"], 3);
    assert_eq!(body["candidates"][0]["candidate_name"], "Chaity Roy");

    // Select-all only reaches rendered rows.
    let (_, body) = call(
        &app,
        HttpMethod::POST,
        "/dashboard/candidates/select-all",
        Some(json!({"checked": true})),
    )
    .await;
    assert_eq!(body["selected_ids"], json!([3]));

    let (status, _) = call(&app, HttpMethod::GET, "/dashboard/candidates?status=hired", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, HttpMethod::POST, "/dashboard/candidates/77/select", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejected_status_change_surfaces_backend_message() {
    let stub = Arc::new(StubGateway::default());
    stub.on(Method::GET, "/candidates/", |_| Ok(roster()));
    stub.on(Method::PATCH, "/candidates/2/update_status/", |_| {
        Err(Error::api(400, "Candidate has a pending appeal"))
    });
    let app = app(&stub);
    call(&app, HttpMethod::POST, "/dashboard/candidates/reload", None).await;

    let (status, body) = call(
        &app,
        HttpMethod::PATCH,
        "/dashboard/candidates/2/status",
        Some(json!({"status": "rejected"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Candidate has a pending appeal");

    let (_, body) = call(&app, HttpMethod::GET, "/dashboard/candidates", None).await;
    let row = body["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == 2)
        .unwrap()
        .clone();
    assert_eq!(row["displayed_status"], "pending");
}

#[tokio::test]
async fn upstream_failures_keep_their_status() {
    let stub = Arc::new(StubGateway::default());
    stub.on(Method::GET, "/dashboard-stats/", |_| {
        Err(Error::Internal("connection refused".into()))
    });
    stub.on(Method::GET, "/emails/", |_| Err(Error::api(503, "Service Unavailable")));
    let app = app(&stub);

    let (status, _) = call(&app, HttpMethod::POST, "/dashboard/emails/reload", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = call(&app, HttpMethod::GET, "/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "connection refused");
}

#[tokio::test]
async fn bulk_notifications_require_recipients() {
    let stub = Arc::new(StubGateway::default());
    stub.on(Method::POST, "/send-notifications/", |body| {
        let ids = body.map(|b| b["candidate_ids"].clone()).unwrap_or_default();
        Ok(json!({
            "success": true,
            "success_count": if ids == json!([]) { 10 } else { 1 },
            "failed_count": 0,
            "messages": []
        }))
    });
    stub.on(Method::GET, "/candidates/", |_| Ok(roster()));
    let app = app(&stub);

    let slot = |recipients: &str| {
        json!({"recipients": recipients, "date": "2026-11-02", "time": "10:30 AM", "location": "Virtual Zoom Meeting"})
    };

    let (status, _) = call(&app, HttpMethod::POST, "/dashboard/notifications", Some(slot("selected"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(stub.calls_to(Method::POST, "/send-notifications/").is_empty());

    let (status, body) = call(
        &app,
        HttpMethod::POST,
        "/dashboard/notifications",
        Some(slot("top_shortlisted")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success_count"], 10);
    let sent = stub.calls_to(Method::POST, "/send-notifications/");
    assert_eq!(sent[0].as_ref().unwrap()["candidate_ids"], json!([]));

    let mut blank = slot("top_shortlisted");
    blank["location"] = json!("  ");
    let (status, _) = call(&app, HttpMethod::POST, "/dashboard/notifications", Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn email_triage_flow_persists_full_collection() {
    let stub = Arc::new(StubGateway::default());
    stub.on(Method::GET, "/emails/", |_| Ok(inbox()));
    stub.on(Method::POST, "/update-emails/", |_| {
        Ok(json!({"success": true, "message": "Emails updated successfully"}))
    });
    let app = app(&stub);

    let (_, body) = call(&app, HttpMethod::POST, "/dashboard/emails/reload", None).await;
    assert_eq!(body["loaded"], 3);

    let (_, body) = call(&app, HttpMethod::GET, "/dashboard/emails?flag=not%20spam", None).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["stats"]["spam"], 1);
    assert_eq!(body["stats"]["important"], 1);

    // The flagged row stays in view until the filter is re-run.
    let (status, _) = call(
        &app,
        HttpMethod::PATCH,
        "/dashboard/emails/m3/flag",
        Some(json!({"flag": "spam"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = call(&app, HttpMethod::GET, "/dashboard/emails", None).await;
    assert_eq!(body["total"], 2);
    let (_, body) = call(&app, HttpMethod::GET, "/dashboard/emails?flag=not%20spam", None).await;
    assert_eq!(body["total"], 1);

    let persisted = stub.calls_to(Method::POST, "/update-emails/");
    assert_eq!(persisted.len(), 1);
    let emails = persisted[0].as_ref().unwrap()["emails"].as_array().unwrap().clone();
    assert_eq!(emails.len(), 3);
    assert_eq!(emails[2]["Flag"], "spam");
    assert_eq!(emails[2]["Labels"], json!(["finance"]));

    // Empty selection: warning, no write-back.
    let (_, body) = call(&app, HttpMethod::POST, "/dashboard/emails/bulk/remove", None).await;
    assert_eq!(body["level"], "warning");
    assert_eq!(stub.calls_to(Method::POST, "/update-emails/").len(), 1);

    call(&app, HttpMethod::POST, "/dashboard/emails/m1/select", None).await;
    call(&app, HttpMethod::POST, "/dashboard/emails/m2/select", None).await;
    let (_, body) = call(&app, HttpMethod::POST, "/dashboard/emails/bulk/remove", None).await;
    assert_eq!(body["level"], "success");

    let persisted = stub.calls_to(Method::POST, "/update-emails/");
    let last = persisted.last().unwrap().as_ref().unwrap();
    assert_eq!(last["emails"].as_array().unwrap().len(), 1);
    assert_eq!(last["emails"][0]["ID"], "m3");

    let (_, body) = call(&app, HttpMethod::GET, "/dashboard/emails", None).await;
    assert_eq!(body["selected_ids"], json!([]));
}

#[tokio::test]
async fn flagging_unknown_email_sends_nothing() {
    let stub = Arc::new(StubGateway::default());
    stub.on(Method::GET, "/emails/", |_| Ok(inbox()));
    let app = app(&stub);
    call(&app, HttpMethod::POST, "/dashboard/emails/reload", None).await;

    let (status, body) = call(
        &app,
        HttpMethod::PATCH,
        "/dashboard/emails/ghost/flag",
        Some(json!({"flag": "spam"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level"], "info");
    assert!(stub.calls_to(Method::POST, "/update-emails/").is_empty());
}

#[tokio::test]
async fn session_reset_clears_roster() {
    let stub = Arc::new(StubGateway::default());
    stub.on(Method::GET, "/candidates/", |_| Ok(roster()));
    let app = app(&stub);
    call(&app, HttpMethod::POST, "/dashboard/candidates/reload", None).await;

    let (status, _) = call(&app, HttpMethod::POST, "/dashboard/session/reset", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, HttpMethod::GET, "/dashboard/candidates", None).await;
    assert_eq!(body["loaded"], 0);
}

#[tokio::test]
async fn missing_active_job_description_is_null() {
    let stub = Arc::new(StubGateway::default());
    stub.on(Method::GET, "/job-descriptions/active/", |_| {
        Err(Error::api(404, "No active job description"))
    });
    let app = app(&stub);

    let (status, body) = call(&app, HttpMethod::GET, "/dashboard/job-descriptions/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], JsonValue::Null);
}

#[tokio::test]
async fn openapi_document_lists_dashboard_paths() {
    let stub = Arc::new(StubGateway::default());
    let (status, body) = call(&app(&stub), HttpMethod::GET, "/dashboard/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/dashboard/emails/bulk/flag"].is_object());
}
