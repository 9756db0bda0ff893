//! reqwest implementation of `NotesApi`.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::wire::{DataEnvelope, ErrorResponse, LabelsResponse, PageEnvelope};
use super::{ListQuery, NotePage, NotesApi};
use crate::config::{normalize_base_url, ClientConfig};
use crate::error::{Error, Result};
use crate::models::{NewNote, Note, NoteId, NoteUpdate};
use crate::util::compact_text;

/// HTTP client for a notes API exposing `/tasks` and `/labels`.
#[derive(Debug, Clone)]
pub struct HttpNotesClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpNotesClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &NoteId) -> String {
        format!("{}/tasks/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    /// Send a request and map non-2xx responses onto the error taxonomy.
    ///
    /// `resource` names the note a 404 refers to; without it a 404 is an
    /// ordinary server error (e.g. a misconfigured base URL).
    async fn send(&self, request: RequestBuilder, resource: Option<&NoteId>) -> Result<Response> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = resource {
                return Err(Error::NotFound(id.to_string()));
            }
        }

        Err(Error::Server {
            status: status.as_u16(),
            message: parse_api_error(status, &body),
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl NotesApi for HttpNotesClient {
    async fn list_notes(&self, query: &ListQuery) -> Result<NotePage> {
        tracing::debug!(label = ?query.label, page = query.page, "Listing notes");
        let request = self.client.get(self.tasks_url()).query(&query.params());
        let response = self.send(request, None).await?;
        let envelope = Self::read_json::<PageEnvelope>(response).await?;
        Ok(envelope.into())
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note> {
        let response = self.send(self.client.get(self.task_url(id)), Some(id)).await?;
        let envelope = Self::read_json::<DataEnvelope<Note>>(response).await?;
        Ok(envelope.data)
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let request = self.client.post(self.tasks_url()).json(note);
        let response = self.send(request, None).await?;
        let envelope = Self::read_json::<DataEnvelope<Note>>(response).await?;
        tracing::debug!("Created note {}", envelope.data.id);
        Ok(envelope.data)
    }

    async fn update_note(&self, id: &NoteId, update: &NoteUpdate) -> Result<Note> {
        let request = self.client.put(self.task_url(id)).json(update);
        let response = self.send(request, Some(id)).await?;
        let envelope = Self::read_json::<DataEnvelope<Note>>(response).await?;
        Ok(envelope.data)
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.send(self.client.delete(self.task_url(id)), Some(id))
            .await?;
        Ok(())
    }

    async fn list_labels(&self) -> Result<Vec<String>> {
        let request = self.client.get(format!("{}/labels", self.base_url));
        let response = self.send(request, None).await?;
        let labels = Self::read_json::<LabelsResponse>(response).await?;
        Ok(labels.into())
    }
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return message.trim().to_string();
        }
    }

    let compacted = compact_text(body);
    if compacted.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        compacted
    }
}
