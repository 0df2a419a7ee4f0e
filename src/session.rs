//! Session setup: one user, one token and one pool of notes per suite run.
use crate::domain::{AuthToken, Credentials, NewNote, NoteId, NotePool, POOL_SIZE};
use crate::notes_client::NotesClient;
use reqwest::{Response, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Register,
    Login,
    CreateNote,
}

impl SetupStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupStep::Register => "register",
            SetupStep::Login => "login",
            SetupStep::CreateNote => "create note",
        }
    }
}

impl std::fmt::Display for SetupStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failure while establishing the session. Unrecoverable for the run.
#[derive(thiserror::Error, Debug)]
pub enum SetupError {
    #[error("{step} step expected HTTP {expected} but got HTTP {actual}.")]
    UnexpectedStatus {
        step: SetupStep,
        expected: u16,
        actual: u16,
    },
    #[error("{step} step response has no usable `{field}` field.")]
    MissingField {
        step: SetupStep,
        field: &'static str,
    },
    #[error("{step} step returned note id `{id}` twice.")]
    DuplicateId { step: SetupStep, id: NoteId },
    #[error("{step} step failed to reach the Notes API.")]
    Transport {
        step: SetupStep,
        #[source]
        source: reqwest::Error,
    },
}

impl SetupError {
    pub fn step(&self) -> SetupStep {
        match self {
            SetupError::UnexpectedStatus { step, .. }
            | SetupError::MissingField { step, .. }
            | SetupError::DuplicateId { step, .. }
            | SetupError::Transport { step, .. } => *step,
        }
    }
}

/// State shared read-only by every verification case of a run.
#[derive(Debug)]
pub struct SessionContext {
    pub credentials: Credentials,
    pub token: AuthToken,
    pub notes: NotePool,
}

impl SessionContext {
    /// Registers, logs in and builds the note pool, in that order.
    #[tracing::instrument(
        name = "Establishing session",
        skip_all,
        fields(base_url = %client.base_url())
    )]
    pub async fn establish(client: &NotesClient) -> Result<Self, SetupError> {
        let credentials = register_user(client).await?;
        let token = log_in(client, &credentials).await?;
        let notes = build_note_pool(client, &token).await?;
        tracing::info!(
            user = %credentials.name,
            notes = notes.ids().len(),
            "Session established"
        );
        Ok(Self {
            credentials,
            token,
            notes,
        })
    }
}

#[tracing::instrument(name = "Register user step", skip_all)]
pub async fn register_user(client: &NotesClient) -> Result<Credentials, SetupError> {
    let credentials = Credentials::generate();
    let response = client
        .register_user(&credentials)
        .await
        .map_err(transport(SetupStep::Register))?;
    expect_status(SetupStep::Register, &response, StatusCode::CREATED)?;
    Ok(credentials)
}

#[tracing::instrument(name = "Log in step", skip_all, fields(email = %credentials.email))]
pub async fn log_in(
    client: &NotesClient,
    credentials: &Credentials,
) -> Result<AuthToken, SetupError> {
    let response = client
        .login(credentials)
        .await
        .map_err(transport(SetupStep::Login))?;
    expect_status(SetupStep::Login, &response, StatusCode::OK)?;
    let body = read_json(SetupStep::Login, response).await?;
    body.pointer("/data/token")
        .and_then(|token| token.as_str())
        .and_then(|token| AuthToken::parse(token.to_string()).ok())
        .ok_or(SetupError::MissingField {
            step: SetupStep::Login,
            field: "data.token",
        })
}

/// Creates [`POOL_SIZE`] notes one after the other.
/// The first failure, or an id the API already handed out, aborts the build;
/// a partial pool is never returned.
#[tracing::instrument(name = "Build note pool step", skip_all)]
pub async fn build_note_pool(
    client: &NotesClient,
    token: &AuthToken,
) -> Result<NotePool, SetupError> {
    let note = NewNote::default();
    let mut ids = Vec::with_capacity(POOL_SIZE);
    for _ in 0..POOL_SIZE {
        let response = client
            .create_note(token, &note)
            .await
            .map_err(transport(SetupStep::CreateNote))?;
        expect_status(SetupStep::CreateNote, &response, StatusCode::OK)?;
        let body = read_json(SetupStep::CreateNote, response).await?;
        let id = body
            .pointer("/data/id")
            .and_then(NoteId::from_json)
            .ok_or(SetupError::MissingField {
                step: SetupStep::CreateNote,
                field: "data.id",
            })?;
        if ids.contains(&id) {
            tracing::error!(note_id = %id, "Note id returned twice");
            return Err(SetupError::DuplicateId {
                step: SetupStep::CreateNote,
                id,
            });
        }
        tracing::debug!(note_id = %id, "Note created");
        ids.push(id);
    }
    Ok(NotePool::from_ids(ids))
}

fn expect_status(
    step: SetupStep,
    response: &Response,
    expected: StatusCode,
) -> Result<(), SetupError> {
    let actual = response.status();
    if actual == expected {
        Ok(())
    } else {
        tracing::error!(
            %step,
            expected = expected.as_u16(),
            actual = actual.as_u16(),
            "Unexpected status"
        );
        Err(SetupError::UnexpectedStatus {
            step,
            expected: expected.as_u16(),
            actual: actual.as_u16(),
        })
    }
}

async fn read_json(step: SetupStep, response: Response) -> Result<serde_json::Value, SetupError> {
    response
        .json::<serde_json::Value>()
        .await
        .map_err(transport(step))
}

fn transport(step: SetupStep) -> impl FnOnce(reqwest::Error) -> SetupError {
    move |source| SetupError::Transport { step, source }
}
