//! Controller tests against a recording mock backend.
//!
//! A small axum app stands in for the REST backend: it records every request
//! (method, URI, content type, JSON body) and replies with canned fixtures,
//! so the tests can assert on the exact wire traffic the controllers
//! produce.

use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use chrono::Local;
use http_body_util::BodyExt;
use serde_json::{Value, json};

use sitetrack::api::ApiClient;
use sitetrack::detail::{DocumentAction, ProjectDetailController};
use sitetrack::models::TaskStatus;
use sitetrack::phases::PhaseListController;
use sitetrack::tasks::TaskEditor;

#[derive(Clone, Debug)]
struct Recorded {
    method: String,
    uri: String,
    content_type: Option<String>,
    body: Option<Value>,
}

type RequestLog = Arc<Mutex<Vec<Recorded>>>;

#[derive(Clone)]
struct MockState {
    log: RequestLog,
    fail_progress_delete: bool,
}

fn project_fixture() -> Value {
    json!({
        "id": 5,
        "name": "Hala Brno",
        "description": "Skladová hala",
        "owner_id": 1,
        "documents": [
            {"id": 77, "project_id": 5, "filename": "pudorys.png", "category": "vykres",
             "extracted_data": []}
        ],
        "progress_logs": [
            {"id": 9, "project_id": 5, "date": "2024-02-10", "percentage_completed": 40,
             "notes": "Základy hotové"},
            {"id": 10, "project_id": 5, "date": "2024-01-15", "percentage_completed": 20,
             "notes": null}
        ],
        "phases": [
            {"id": 3, "project_id": 5, "name": "Hrubá stavba", "description": null,
             "tasks": [
                {"id": 7, "phase_id": 3, "name": "Bednění", "description": "Stropní deska",
                 "status": "in_progress"}
             ]}
        ]
    })
}

async fn handle(State(state): State<MockState>, req: Request) -> Response {
    let method = req.method().to_string();
    let uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_default();
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = req.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice::<Value>(&bytes).ok();

    state.log.lock().unwrap().push(Recorded {
        method: method.clone(),
        uri: uri.clone(),
        content_type,
        body,
    });

    let path = uri.split('?').next().unwrap_or_default().to_string();
    match (method.as_str(), path.as_str()) {
        ("GET", "/api/projects/5") => Json(project_fixture()).into_response(),
        ("GET", "/api/projects/5/overall_progress/") => {
            Json(json!({"overall_progress": 40.0})).into_response()
        }
        ("GET", "/api/projects/5/documents/") => Json(json!([
            {"id": 77, "project_id": 5, "filename": "pudorys.png", "category": "vykres",
             "extracted_data": []}
        ]))
        .into_response(),
        ("POST", "/api/projects/5/uploadfile/") => Json(json!(
            {"id": 78, "project_id": 5, "filename": "rozpocet.pdf", "category": "rozpocet",
             "extracted_data": []}
        ))
        .into_response(),
        ("POST", "/api/projects/5/phases/") => Json(json!(
            {"id": 4, "project_id": 5, "name": "Dokončovací práce", "description": "", "tasks": []}
        ))
        .into_response(),
        ("PUT", "/api/phases/3") => Json(json!(
            {"id": 3, "project_id": 5, "name": "Hrubá stavba II", "description": "", "tasks": []}
        ))
        .into_response(),
        ("DELETE", "/api/phases/3") => StatusCode::OK.into_response(),
        ("POST", "/api/phases/3/tasks/") => Json(json!(
            {"id": 8, "phase_id": 3, "name": "Izolace", "description": "", "status": "pending"}
        ))
        .into_response(),
        ("PUT", "/api/tasks/7") => Json(json!(
            {"id": 7, "phase_id": 3, "name": "Bednění", "description": "Stropní deska",
             "status": "completed"}
        ))
        .into_response(),
        ("DELETE", "/api/tasks/7") => StatusCode::OK.into_response(),
        ("POST", "/api/projects/5/progress_logs/") => Json(json!(
            {"id": 11, "project_id": 5, "date": "2024-03-01", "percentage_completed": 60,
             "notes": ""}
        ))
        .into_response(),
        ("PUT", "/api/progress_logs/9") => Json(json!(
            {"id": 9, "project_id": 5, "date": "2024-02-10", "percentage_completed": 45,
             "notes": ""}
        ))
        .into_response(),
        ("DELETE", "/api/progress_logs/9") => {
            if state.fail_progress_delete {
                (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
            } else {
                StatusCode::OK.into_response()
            }
        }
        ("POST", "/api/documents/77/ocr") => Json(json!(
            {"ocr_text": "Půdorys 1:50", "extracted_data": [{"label": "měřítko", "text": "1:50"}]}
        ))
        .into_response(),
        ("POST", "/api/documents/78/ocr") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "ocr exploded").into_response()
        }
        ("POST", "/api/documents/77/count_aisles") => Json(json!(
            {"num_aisles": 4, "message": "Nalezeny 4 uličky."}
        ))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, format!("no fixture for {} {}", method, path))
            .into_response(),
    }
}

async fn spawn_mock(fail_progress_delete: bool) -> (String, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        log: log.clone(),
        fail_progress_delete,
    };
    let app = Router::new().fallback(handle).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), log)
}

fn recorded(log: &RequestLog) -> Vec<Recorded> {
    log.lock().unwrap().clone()
}

// ── Phase creation ────────────────────────────────────────────────────

#[tokio::test]
async fn phase_creation_posts_exact_form_values_and_clears_name() {
    let (base, log) = spawn_mock(false).await;
    let mut phases = PhaseListController::new(ApiClient::new(&base), 5);

    phases.set_new_phase_name("Dokončovací práce");
    phases.set_new_phase_description("Omítky a podlahy");
    phases.add_phase().await.unwrap();

    let requests = recorded(&log);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].uri, "/api/projects/5/phases/");
    // Exact body: the two form fields and nothing else.
    assert_eq!(
        requests[0].body.as_ref().unwrap(),
        &json!({"name": "Dokončovací práce", "description": "Omítky a podlahy"})
    );
    assert!(phases.new_phase_form().name.is_empty());
    assert!(phases.new_phase_form().description.is_empty());
}

#[tokio::test]
async fn phase_creation_has_no_blank_name_guard() {
    let (base, log) = spawn_mock(false).await;
    let mut phases = PhaseListController::new(ApiClient::new(&base), 5);

    // Blank name still goes to the server; only task creation guards this.
    phases.add_phase().await.unwrap();

    let requests = recorded(&log);
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body.as_ref().unwrap(),
        &json!({"name": "", "description": ""})
    );
}

// ── Task creation ─────────────────────────────────────────────────────

#[tokio::test]
async fn blank_task_name_issues_no_request() {
    let (base, log) = spawn_mock(false).await;
    let phases = PhaseListController::new(ApiClient::new(&base), 5);

    assert!(!phases.add_task(3, "  \t ", "popis").await.unwrap());
    assert!(recorded(&log).is_empty());
}

#[tokio::test]
async fn task_creation_posts_name_and_description() {
    let (base, log) = spawn_mock(false).await;
    let phases = PhaseListController::new(ApiClient::new(&base), 5);

    assert!(phases.add_task(3, "Izolace", "Hydroizolace základů").await.unwrap());

    let requests = recorded(&log);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].uri, "/api/phases/3/tasks/");
    assert_eq!(
        requests[0].body.as_ref().unwrap(),
        &json!({"name": "Izolace", "description": "Hydroizolace základů"})
    );
}

// ── Progress log submission ───────────────────────────────────────────

#[tokio::test]
async fn progress_submit_without_edit_target_posts_with_todays_date() {
    let (base, log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);

    detail.set_percentage(60);
    detail.set_notes("Střecha hotová");
    detail.submit_progress().await.unwrap();

    let requests = recorded(&log);
    let submit = &requests[0];
    assert_eq!(submit.method, "POST");
    assert_eq!(submit.uri, "/api/projects/5/progress_logs/");
    let body = submit.body.as_ref().unwrap();
    assert_eq!(body["date"], Local::now().date_naive().to_string());
    assert_eq!(body["percentage_completed"], 60);
    assert_eq!(body["notes"], "Střecha hotová");
    // Form resets after a successful submit.
    assert_eq!(detail.progress_form().percentage_completed, 0);
    assert!(detail.progress_form().notes.is_empty());
}

#[tokio::test]
async fn progress_submit_with_edit_target_puts_with_original_date() {
    let (base, log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);
    detail.refetch().await.unwrap();

    let target = detail
        .project()
        .unwrap()
        .progress_logs
        .iter()
        .find(|l| l.id == 9)
        .cloned()
        .unwrap();
    detail.edit_progress(target);
    detail.set_percentage(45);
    detail.submit_progress().await.unwrap();

    let submit = recorded(&log)
        .into_iter()
        .find(|r| r.method == "PUT")
        .unwrap();
    assert_eq!(submit.uri, "/api/progress_logs/9");
    let body = submit.body.as_ref().unwrap();
    // Original date, not today's.
    assert_eq!(body["date"], "2024-02-10");
    assert_eq!(body["percentage_completed"], 45);
    assert!(detail.progress_form().editing.is_none());
}

#[tokio::test]
async fn failed_progress_delete_skips_the_refetch() {
    let (base, log) = spawn_mock(true).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);
    detail.refetch().await.unwrap();
    let logs_before: Vec<i64> = detail
        .project()
        .unwrap()
        .progress_logs
        .iter()
        .map(|l| l.id)
        .collect();
    let requests_before = recorded(&log).len();

    let err = detail.delete_progress(9).await.unwrap_err();
    assert_eq!(err.status(), Some(500));

    // Only the DELETE itself hit the wire; no re-fetch followed it.
    let requests = recorded(&log);
    assert_eq!(requests.len(), requests_before + 1);
    assert_eq!(requests.last().unwrap().method, "DELETE");

    // The displayed list is untouched.
    let logs_after: Vec<i64> = detail
        .project()
        .unwrap()
        .progress_logs
        .iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(logs_before, logs_after);
}

#[tokio::test]
async fn successful_progress_delete_refetches() {
    let (base, log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);
    detail.refetch().await.unwrap();
    let requests_before = recorded(&log).len();

    detail.delete_progress(9).await.unwrap();

    let requests = recorded(&log);
    // DELETE plus the two re-fetch GETs.
    assert_eq!(requests.len(), requests_before + 3);
    assert!(
        requests[requests_before + 1..]
            .iter()
            .any(|r| r.method == "GET" && r.uri == "/api/projects/5")
    );
}

// ── Document filter ───────────────────────────────────────────────────

#[tokio::test]
async fn filter_category_appends_query_only_when_non_empty() {
    let (base, log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);
    detail.refetch().await.unwrap();

    detail.set_filter("").await.unwrap();
    detail.set_filter("vykres").await.unwrap();

    let uris: Vec<String> = recorded(&log)
        .into_iter()
        .filter(|r| r.uri.starts_with("/api/projects/5/documents/"))
        .map(|r| r.uri)
        .collect();
    assert_eq!(
        uris,
        vec![
            "/api/projects/5/documents/".to_string(),
            "/api/projects/5/documents/?category=vykres".to_string(),
        ]
    );
}

// ── Document upload ───────────────────────────────────────────────────

#[tokio::test]
async fn upload_sends_multipart_then_refetches_and_clears_selection() {
    let (base, log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("rozpocet.pdf");
    std::fs::write(&file, b"%PDF-1.4 fake").unwrap();

    detail.select_file(file);
    detail.set_upload_category("rozpocet");
    assert!(detail.upload().await.unwrap());

    let requests = recorded(&log);
    let upload = &requests[0];
    assert_eq!(upload.method, "POST");
    assert_eq!(upload.uri, "/api/projects/5/uploadfile/");
    assert!(
        upload
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data")
    );
    // Success path re-fetches the project and clears the selection.
    assert!(requests.iter().any(|r| r.uri == "/api/projects/5"));
    assert!(detail.upload_selection().file.is_none());
    assert!(detail.upload_selection().category.is_empty());
}

// ── Task editor through the wire ──────────────────────────────────────

#[tokio::test]
async fn task_save_puts_full_tuple() {
    let (base, log) = spawn_mock(false).await;
    let client = ApiClient::new(&base);
    let phases = PhaseListController::new(client.clone(), 5);
    let mut detail = ProjectDetailController::new(client, 5);
    detail.refetch().await.unwrap();

    let task = detail.project().unwrap().phases[0].tasks[0].clone();
    let mut editor = TaskEditor::new(task);
    editor.begin_edit();
    editor.set_status(TaskStatus::Completed);
    assert!(editor.save(&phases).await.unwrap());

    let put = recorded(&log)
        .into_iter()
        .find(|r| r.method == "PUT")
        .unwrap();
    assert_eq!(put.uri, "/api/tasks/7");
    assert_eq!(
        put.body.as_ref().unwrap(),
        &json!({"name": "Bednění", "description": "Stropní deska", "status": "completed"})
    );
    assert!(!editor.is_editing());
}

// ── Document-triggered actions ────────────────────────────────────────

#[tokio::test]
async fn ocr_success_lands_in_result_slot() {
    let (base, _log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);

    detail.run_ocr(77).await;
    match detail.action_result().unwrap() {
        DocumentAction::Ocr { text, extracted } => {
            assert_eq!(text, "Půdorys 1:50");
            assert_eq!(extracted[0].label, "měřítko");
        }
        other => panic!("Expected OCR result, got {:?}", other),
    }

    detail.dismiss_result();
    assert!(detail.action_result().is_none());
}

#[tokio::test]
async fn ocr_failure_becomes_placeholder_message() {
    let (base, _log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);

    // Document 78's OCR fixture answers 500.
    detail.run_ocr(78).await;
    match detail.action_result().unwrap() {
        DocumentAction::Ocr { text, extracted } => {
            assert_eq!(text, "Error during OCR.");
            assert!(extracted.is_empty());
        }
        other => panic!("Expected OCR result, got {:?}", other),
    }
}

#[tokio::test]
async fn aisle_count_failure_becomes_placeholder_message() {
    let (base, _log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);

    // No fixture for document 99: the mock answers 404.
    detail.count_aisles(99).await;
    match detail.action_result().unwrap() {
        DocumentAction::AisleCount(count) => {
            assert_eq!(count.num_aisles, 0);
            assert_eq!(count.message, "Chyba při počítání uliček.");
        }
        other => panic!("Expected aisle count result, got {:?}", other),
    }
}

#[tokio::test]
async fn aisle_count_success_lands_in_result_slot() {
    let (base, _log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);

    detail.count_aisles(77).await;
    match detail.action_result().unwrap() {
        DocumentAction::AisleCount(count) => {
            assert_eq!(count.num_aisles, 4);
            assert_eq!(count.message, "Nalezeny 4 uličky.");
        }
        other => panic!("Expected aisle count result, got {:?}", other),
    }
}

// ── Aggregate fetch ───────────────────────────────────────────────────

#[tokio::test]
async fn refetch_fills_project_and_overall_progress() {
    let (base, log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);

    detail.refetch().await.unwrap();

    assert_eq!(detail.project().unwrap().name, "Hala Brno");
    assert_eq!(detail.overall_progress(), Some(40.0));
    let uris: Vec<String> = recorded(&log).into_iter().map(|r| r.uri).collect();
    assert!(uris.contains(&"/api/projects/5".to_string()));
    assert!(uris.contains(&"/api/projects/5/overall_progress/".to_string()));
}

#[tokio::test]
async fn chart_data_orders_fetched_logs_by_date() {
    let (base, _log) = spawn_mock(false).await;
    let mut detail = ProjectDetailController::new(ApiClient::new(&base), 5);
    detail.refetch().await.unwrap();

    // Fixture serves 2024-02-10 before 2024-01-15.
    let points = detail.chart_data();
    assert_eq!(points[0].date.to_string(), "2024-01-15");
    assert_eq!(points[1].date.to_string(), "2024-02-10");
}
