use crate::test_data::{TEST_NOTE_ID_PREFIX, TEST_TOKEN};
use notes_e2e::notes_client::{AUTH_TOKEN_HEADER, NotesClient};
use notes_e2e::telemetry::{get_subscriber, init_subscriber};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
pub static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the
    // value TEST_LOG` because the sink is part of the type returned by
    // `get_subscriber`, therefore they are not the same type.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

/// Hands out `note-1`, `note-2`, ... in creation order.
struct SequentialNoteIds(AtomicUsize);

impl Respond for SequentialNoteIds {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "status": 200,
            "message": "Note successfully created",
            "data": {
                "id": format!("{}{}", TEST_NOTE_ID_PREFIX, n),
                "title": "Test Note",
                "description": "This is a test note.",
                "category": "Home",
                "completed": false
            }
        }))
    }
}

/// A wiremock stand-in for the Notes API plus a client pointed at it.
pub struct MockNotesApi {
    pub server: MockServer,
    pub client: NotesClient,
}

impl MockNotesApi {
    pub async fn mount_registration(&self, status: u16) {
        Mock::given(path("/users/register"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_login(&self, status: u16, body: serde_json::Value) {
        Mock::given(path("/users/login"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_note_creation(&self) {
        Mock::given(path("/notes"))
            .and(method("POST"))
            .and(header(AUTH_TOKEN_HEADER, TEST_TOKEN))
            .respond_with(SequentialNoteIds(AtomicUsize::new(0)))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_note_operations(&self) {
        for verb in ["GET", "PUT", "PATCH", "DELETE"] {
            Mock::given(path_regex(r"^/notes/[^/]+$"))
                .and(method(verb))
                .and(header(AUTH_TOKEN_HEADER, TEST_TOKEN))
                .respond_with(ResponseTemplate::new(200))
                .mount(&self.server)
                .await;
        }
    }

    /// Makes `verb /notes/{note_id}` answer with `status`, overriding the defaults.
    pub async fn override_note_operation(&self, verb: &str, note_id: &str, status: u16) {
        Mock::given(path(format!("/notes/{}", note_id)))
            .and(method(verb))
            .respond_with(ResponseTemplate::new(status))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    pub async fn received_requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("Request recording is disabled.")
    }

    /// `(method, path)` of every request, in arrival order.
    pub async fn request_log(&self) -> Vec<(String, String)> {
        self.received_requests()
            .await
            .into_iter()
            .map(|r| (r.method.to_string(), r.url.path().to_string()))
            .collect()
    }

    pub async fn count_requests(&self, verb: &str, request_path: &str) -> usize {
        self.request_log()
            .await
            .iter()
            .filter(|(m, p)| m == verb && p == request_path)
            .count()
    }
}

pub fn successful_login_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "status": 200,
        "message": "Login successful",
        "data": {
            "id": "user-1",
            "name": "test",
            "email": "test@gmail.com",
            "token": TEST_TOKEN
        }
    })
}

/// An API with nothing mounted; every request gets a 404.
#[tracing::instrument(name = "Spawning bare mock Notes API")]
pub async fn spawn_bare_mock_api() -> MockNotesApi {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    LazyLock::force(&TRACING);

    let server = MockServer::start().await;
    let client = NotesClient::new(server.uri(), std::time::Duration::from_millis(1000));
    MockNotesApi { server, client }
}

/// An API that answers every suite call successfully.
#[tracing::instrument(name = "Spawning mock Notes API")]
pub async fn spawn_mock_api() -> MockNotesApi {
    let api = spawn_bare_mock_api().await;
    api.mount_registration(201).await;
    api.mount_login(200, successful_login_body()).await;
    api.mount_note_creation().await;
    api.mount_note_operations().await;
    api
}
