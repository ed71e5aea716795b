//! Integration tests against a mock duty API.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use reqwest::Url;
use serde_json::{json, Value};

use crate::cli::{parse_line, Console, Reply};
use crate::report::{LastResponse, Reporter};
use crate::transport::HttpTransport;
use crate::view::Control;

/// In-memory stand-in for the duty API.
#[derive(Default)]
struct MockApi {
    students: Mutex<Vec<Value>>,
    areas: Mutex<Vec<Value>>,
    schedules: Mutex<Vec<Value>>,
    assignments: Mutex<Vec<Value>>,
    trades: Mutex<Vec<Value>>,
    list_reads: AtomicUsize,
    fail_areas: AtomicBool,
    last_query: Mutex<Vec<(String, String)>>,
}

impl MockApi {
    fn seeded() -> Self {
        let api = Self::default();
        *api.students.lock().unwrap() = vec![
            json!({"student_pk": 1, "student_id": "10101", "name": "김하나", "grade": 1, "status": "재학", "role": "학생"}),
            json!({"student_pk": 2, "student_id": "10102", "name": "이둘", "grade": 1, "status": "졸업", "role": "학생"}),
        ];
        *api.areas.lock().unwrap() = vec![
            json!({"area_id": 1, "name": "1층 복도", "need_peoples": 2, "target_grades": [1]}),
        ];
        *api.schedules.lock().unwrap() = vec![json!({"schedule_id": 1, "cleaning_date": "2024-03-04"})];
        *api.assignments.lock().unwrap() = vec![
            json!({"assignment_id": 1, "schedule_id": 1, "student_pk": 1, "area_id": 1, "status": "배정"}),
            json!({"assignment_id": 2, "schedule_id": 1, "student_pk": 2, "area_id": 1, "status": "배정"}),
        ];
        *api.trades.lock().unwrap() = vec![
            json!({"request_id": 1, "requester_assignment_id": 1, "target_assignment_id": 2, "status": "대기"}),
        ];
        api
    }

    fn list(&self, records: &Mutex<Vec<Value>>) -> Json<Value> {
        self.list_reads.fetch_add(1, Ordering::SeqCst);
        Json(Value::Array(records.lock().unwrap().clone()))
    }
}

fn query_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    let url = Url::parse(&format!("http://mock/?{}", raw.unwrap_or_default())).unwrap();
    url.query_pairs().into_owned().collect()
}

fn field(pairs: &[(String, String)], key: &str) -> String {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"detail": message}))).into_response()
}

async fn health() -> &'static str {
    "OK"
}

async fn list_students(State(api): State<Arc<MockApi>>) -> Json<Value> {
    api.list(&api.students)
}

async fn list_areas(State(api): State<Arc<MockApi>>) -> Response {
    if api.fail_areas.load(Ordering::SeqCst) {
        api.list_reads.fetch_add(1, Ordering::SeqCst);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }
    api.list(&api.areas).into_response()
}

async fn list_schedules(State(api): State<Arc<MockApi>>) -> Json<Value> {
    api.list(&api.schedules)
}

async fn list_assignments(State(api): State<Arc<MockApi>>) -> Json<Value> {
    api.list(&api.assignments)
}

async fn list_trades(State(api): State<Arc<MockApi>>) -> Json<Value> {
    api.list(&api.trades)
}

async fn create_student(
    State(api): State<Arc<MockApi>>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    let pairs = query_pairs(query.as_deref());
    let student = json!({
        "student_pk": field(&pairs, "student_pk").parse::<i64>().unwrap_or_default(),
        "student_id": field(&pairs, "student_id"),
        "name": field(&pairs, "name"),
        "grade": field(&pairs, "grade").parse::<i64>().unwrap_or_default(),
        "status": "재학",
        "role": "학생",
    });
    api.students.lock().unwrap().push(student.clone());
    *api.last_query.lock().unwrap() = pairs;
    Json(student)
}

async fn create_area(State(api): State<Arc<MockApi>>, RawQuery(query): RawQuery) -> Json<Value> {
    let pairs = query_pairs(query.as_deref());
    let grades: Vec<i64> = pairs
        .iter()
        .filter(|(k, _)| k == "target_grades")
        .filter_map(|(_, v)| v.parse().ok())
        .collect();
    let area = json!({
        "area_id": field(&pairs, "area_id").parse::<i64>().unwrap_or_default(),
        "name": field(&pairs, "name"),
        "need_peoples": field(&pairs, "need_peoples").parse::<i64>().unwrap_or_default(),
        "target_grades": grades,
    });
    api.areas.lock().unwrap().push(area.clone());
    *api.last_query.lock().unwrap() = pairs;
    Json(area)
}

async fn create_trade(State(api): State<Arc<MockApi>>, Json(body): Json<Value>) -> Response {
    let requester = body["requester_assignment_id"].clone();
    let exists = api
        .assignments
        .lock()
        .unwrap()
        .iter()
        .any(|a| a["assignment_id"] == requester);
    if !exists {
        return detail(StatusCode::BAD_REQUEST, "배정을 찾을 수 없습니다.");
    }

    let mut trades = api.trades.lock().unwrap();
    let trade = json!({
        "request_id": trades.len() + 1,
        "requester_assignment_id": requester,
        "target_assignment_id": body["target_assignment_id"].clone(),
        "status": "대기",
    });
    trades.push(trade.clone());
    Json(trade).into_response()
}

async fn decide_trade(
    State(api): State<Arc<MockApi>>,
    Path(request_id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut trades = api.trades.lock().unwrap();
    let Some(trade) = trades.iter_mut().find(|t| t["request_id"] == request_id) else {
        return detail(StatusCode::NOT_FOUND, "요청을 찾을 수 없습니다.");
    };
    if trade["status"] != "대기" {
        return detail(StatusCode::BAD_REQUEST, "이미 처리된 요청입니다.");
    }
    trade["status"] = body["status"].clone();
    Json(trade.clone()).into_response()
}

fn mock_router(api: Arc<MockApi>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/students/", get(list_students).post(create_student))
        .route("/areas/", get(list_areas).post(create_area))
        .route("/schedules/", get(list_schedules))
        .route("/assignments/", get(list_assignments))
        .route("/trades/", get(list_trades).post(create_trade))
        .route("/trades/{id}", patch(decide_trade))
        .with_state(api)
}

/// Test fixture for integration tests.
struct TestFixture {
    api: Arc<MockApi>,
    console: Console<HttpTransport>,
}

impl TestFixture {
    async fn new() -> Self {
        let api = Arc::new(MockApi::seeded());
        let app = mock_router(api.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        let transport = HttpTransport::new(&base_url, Duration::from_secs(5)).unwrap();
        let console = Console::new(Arc::new(transport), Reporter::new(14));
        console.bootstrap().await;

        TestFixture { api, console }
    }

    async fn run(&self, line: &str) -> Reply {
        self.console
            .execute(parse_line(line).unwrap().unwrap())
            .await
    }

    fn list_reads(&self) -> usize {
        self.api.list_reads.load(Ordering::SeqCst)
    }

    fn last_message(&self) -> String {
        self.console.reporter().activity()[0].message.clone()
    }
}

#[tokio::test]
async fn test_bootstrap_syncs_every_collection() {
    let fixture = TestFixture::new().await;

    assert_eq!(fixture.list_reads(), 5);
    {
        let store = fixture.console.store().read().await;
        assert_eq!(store.students().len(), 2);
        assert_eq!(store.areas().len(), 1);
        assert_eq!(store.schedules().len(), 1);
        assert_eq!(store.assignments().len(), 2);
        assert_eq!(store.trades().len(), 1);
    }

    let state = fixture.console.reporter().server_state().unwrap();
    assert_eq!(state.text, "초기 데이터 동기화 완료");
    assert!(state.ok);

    // Bootstrap is silent.
    assert!(fixture.console.reporter().activity().is_empty());

    match fixture.run("show").await {
        Reply::Text(text) => assert!(text.contains("김하나")),
        Reply::Quit => panic!("show must not quit"),
    }
}

#[tokio::test]
async fn test_create_student_refreshes_once() {
    let fixture = TestFixture::new().await;
    let before = fixture.list_reads();

    fixture
        .run("student pk=3 id=10103 name=박 셋 grade=2")
        .await;

    assert_eq!(fixture.list_reads() - before, 5);
    assert_eq!(fixture.last_message(), "HTTP 200");

    let query = fixture.api.last_query.lock().unwrap().clone();
    assert_eq!(field(&query, "student_pk"), "3");
    assert_eq!(field(&query, "name"), "박 셋");
    assert!(query.iter().all(|(k, _)| k != "status" && k != "role"));

    let store = fixture.console.store().read().await;
    assert!(store.students().iter().any(|s| s.name == "박 셋"));
}

#[tokio::test]
async fn test_create_area_sends_repeated_grades() {
    let fixture = TestFixture::new().await;

    fixture.run("area id=2 name=3층 복도 need=3 grades=1, x, 3").await;

    let query = fixture.api.last_query.lock().unwrap().clone();
    let grades: Vec<&str> = query
        .iter()
        .filter(|(k, _)| k == "target_grades")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(grades, vec!["1", "3"]);
    assert_eq!(field(&query, "name"), "3층 복도");

    let store = fixture.console.store().read().await;
    let area = store.areas().iter().find(|a| a.area_id == 2).unwrap();
    assert_eq!(area.target_grades, vec![1, 3]);
}

#[tokio::test]
async fn test_trade_flow_through_selection() {
    let fixture = TestFixture::new().await;

    fixture.run("select requester 2").await;
    fixture.run("select target 1").await;
    fixture.run("trade").await;

    assert_eq!(fixture.last_message(), "HTTP 200");
    assert_eq!(fixture.console.store().read().await.trades().len(), 2);

    fixture.run("select request 2").await;
    assert_eq!(fixture.console.selected(Control::TradeRequest), Some(2));

    fixture.run("accept 2").await;
    {
        let store = fixture.console.store().read().await;
        let trade = store.trades().iter().find(|t| t.request_id == 2).unwrap();
        assert_eq!(trade.status, "수락");
    }
    // A decided trade is no longer pending, so the request selector drops it.
    assert_eq!(fixture.console.selected(Control::TradeRequest), None);
}

#[tokio::test]
async fn test_rejected_decision_skips_refresh() {
    let fixture = TestFixture::new().await;
    fixture.run("accept 1").await;
    let before = fixture.list_reads();

    fixture.run("reject 1").await;

    assert_eq!(fixture.list_reads(), before);
    assert_eq!(fixture.last_message(), "HTTP 400");
    match fixture.console.reporter().last() {
        Some(LastResponse::Result(detail)) => {
            assert_eq!(detail.operation, "교환 요청 거절");
            assert_eq!(detail.response, json!({"detail": "이미 처리된 요청입니다."}));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let fixture = TestFixture::new().await;
    let before = fixture.list_reads();

    fixture.run("trade requester=1 target=1").await;

    assert_eq!(fixture.list_reads(), before);
    assert_eq!(fixture.api.trades.lock().unwrap().len(), 1);
    assert_eq!(fixture.last_message(), "client error");
}

#[tokio::test]
async fn test_failing_kind_keeps_previous_data() {
    let fixture = TestFixture::new().await;
    fixture.api.fail_areas.store(true, Ordering::SeqCst);
    fixture.api.students.lock().unwrap().pop();

    fixture.run("sync").await;

    let (meta, ok) = fixture.console.reporter().meta().unwrap();
    assert!(meta.starts_with("전체 동기화 | 207"));
    assert!(!ok);

    let store = fixture.console.store().read().await;
    assert_eq!(store.areas().len(), 1);
    assert_eq!(store.students().len(), 1);

    match fixture.console.reporter().last() {
        Some(LastResponse::Result(detail)) => {
            assert_eq!(detail.response["areas"]["status"], 500);
            assert_eq!(detail.response["students"]["count"], 1);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_health_keeps_plain_text_payload() {
    let fixture = TestFixture::new().await;

    fixture.run("health").await;

    let state = fixture.console.reporter().server_state().unwrap();
    assert_eq!(state.text, "API 연결 정상");
    match fixture.console.reporter().last() {
        Some(LastResponse::Result(detail)) => assert_eq!(detail.response, json!("OK")),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_client_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let transport =
        HttpTransport::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let console = Console::new(Arc::new(transport), Reporter::new(14));

    console.bootstrap().await;
    assert_eq!(
        console.reporter().server_state().unwrap().text,
        "초기 동기화 실패"
    );
    assert_eq!(console.store().read().await.students().len(), 0);

    let reply = console
        .execute(parse_line("refresh students").unwrap().unwrap())
        .await;
    assert_eq!(reply, Reply::Text("students 조회 | client error".to_string()));
    match console.reporter().last() {
        Some(LastResponse::ClientError(report)) => {
            assert_eq!(report.code, "TRANSPORT_ERROR");
        }
        other => panic!("unexpected {:?}", other),
    }
}
