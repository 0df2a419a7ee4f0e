use crate::domain::{AuthToken, Credentials, NewNote, NoteId, NotePatch, NoteUpdate};
use reqwest::{Client, RequestBuilder, Response};

pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Thin wrapper over the Notes REST API.
///
/// Every method issues exactly one request and hands back the raw response;
/// judging the status code is left to the caller.
#[derive(Clone, Debug)]
pub struct NotesClient {
    base_url: String,
    http_client: Client,
}

impl NotesClient {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the HTTP client.");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[tracing::instrument(name = "Registering user", skip_all, fields(email = %credentials.email))]
    pub async fn register_user(
        &self,
        credentials: &Credentials,
    ) -> Result<Response, reqwest::Error> {
        self.http_client
            .post(format!("{}/users/register", self.base_url))
            .json(&credentials.registration_request())
            .send()
            .await
    }

    #[tracing::instrument(name = "Logging in", skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Response, reqwest::Error> {
        self.http_client
            .post(format!("{}/users/login", self.base_url))
            .json(&credentials.login_request())
            .send()
            .await
    }

    #[tracing::instrument(name = "Creating note", skip(self, token))]
    pub async fn create_note(
        &self,
        token: &AuthToken,
        note: &NewNote,
    ) -> Result<Response, reqwest::Error> {
        self.authorized(self.http_client.post(self.notes_url()), token)
            .json(note)
            .send()
            .await
    }

    #[tracing::instrument(name = "Getting note", skip(self, token))]
    pub async fn get_note(
        &self,
        token: &AuthToken,
        id: &NoteId,
    ) -> Result<Response, reqwest::Error> {
        self.authorized(self.http_client.get(self.note_url(id)), token)
            .send()
            .await
    }

    #[tracing::instrument(name = "Updating note", skip(self, token))]
    pub async fn update_note(
        &self,
        token: &AuthToken,
        id: &NoteId,
        update: &NoteUpdate,
    ) -> Result<Response, reqwest::Error> {
        self.authorized(self.http_client.put(self.note_url(id)), token)
            .json(update)
            .send()
            .await
    }

    #[tracing::instrument(name = "Patching note", skip(self, token))]
    pub async fn patch_note(
        &self,
        token: &AuthToken,
        id: &NoteId,
        patch: &NotePatch,
    ) -> Result<Response, reqwest::Error> {
        self.authorized(self.http_client.patch(self.note_url(id)), token)
            .json(patch)
            .send()
            .await
    }

    #[tracing::instrument(name = "Deleting note", skip(self, token))]
    pub async fn delete_note(
        &self,
        token: &AuthToken,
        id: &NoteId,
    ) -> Result<Response, reqwest::Error> {
        self.authorized(self.http_client.delete(self.note_url(id)), token)
            .send()
            .await
    }

    fn authorized(&self, builder: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        builder.header(AUTH_TOKEN_HEADER, token.expose())
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }
}
