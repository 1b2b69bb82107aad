//! Remote HTTP note store.
//!
//! # Responsibility
//! - Speak the REST backend's wire contract (`/text`, `/errorCheck`,
//!   `/rendered`) and map it onto the store contract.
//! - Keep the wire shape (`body.text` nesting) out of the rest of the crate.
//!
//! # Invariants
//! - One outstanding request per operation; no queuing, batching, or retry.
//! - Read failures degrade to an empty collection; write failures propagate.
//! - The save request carries the note id on update so the server replaces
//!   in place instead of appending.

use super::{NoteStore, StoreError, StoreResult};
use crate::grammar::GrammarReport;
use crate::model::note::{Note, NoteId};
use chrono::{DateTime, Utc};
use log::{info, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hardcoded default backend root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Store backed by the REST service.
pub struct RemoteHttpStore {
    base_url: String,
    client: Client,
}

/// Note as the service serializes it: the Markdown source lives under
/// `body.text`, not in a flat `content` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireNote {
    id: NoteId,
    title: String,
    body: WireBody,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct WireBody {
    text: String,
}

#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct RenderedResponse {
    html: String,
}

impl WireNote {
    fn into_note(self) -> Note {
        Note {
            id: self.id,
            title: self.title,
            content: self.body.text,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            body: WireBody {
                text: note.content.clone(),
            },
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

impl RemoteHttpStore {
    /// Builds a store against the given backend root.
    ///
    /// The client keeps a cookie jar so session credentials ride along on
    /// every request, matching the original cross-origin behavior.
    pub fn new(base_url: impl Into<String>) -> StoreResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn fetch_collection(&self) -> StoreResult<Vec<Note>> {
        let response = self.client.get(self.url("/text")).send()?;
        if !response.status().is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: response.status().as_u16(),
                endpoint: "/text",
            });
        }
        let wire: Vec<WireNote> = response.json()?;
        Ok(wire.into_iter().map(WireNote::into_note).collect())
    }
}

impl NoteStore for RemoteHttpStore {
    fn list(&self) -> Vec<Note> {
        match self.fetch_collection() {
            Ok(notes) => notes,
            Err(err) => {
                warn!("event=store_list module=store backend=remote status=degraded error={err}");
                Vec::new()
            }
        }
    }

    fn save(&self, note: &Note) -> StoreResult<Note> {
        note.validate()?;

        let request = SaveRequest {
            text: &note.content,
            id: Some(&note.id),
        };
        let response = self
            .client
            .post(self.url("/text"))
            .json(&request)
            .send()?;
        if !response.status().is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: response.status().as_u16(),
                endpoint: "/text",
            });
        }

        let stored: WireNote = response.json()?;
        info!(
            "event=store_save module=store backend=remote status=ok id={}",
            stored.id
        );
        Ok(stored.into_note())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/text/{id}")))
            .send()?;
        let status = response.status();
        // 404 keeps delete a no-op for ids the server never had.
        if !status.is_success() && status.as_u16() != 404 {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: "/text/{id}",
            });
        }
        info!("event=store_delete module=store backend=remote status=ok id={id}");
        Ok(())
    }

    fn render_html(&self, content: &str) -> StoreResult<String> {
        let response = self
            .client
            .post(self.url("/rendered"))
            .json(&TextRequest { text: content })
            .send()?;
        if !response.status().is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: response.status().as_u16(),
                endpoint: "/rendered",
            });
        }
        let rendered: RenderedResponse = response.json()?;
        Ok(rendered.html)
    }

    fn check_grammar(&self, text: &str) -> StoreResult<Option<GrammarReport>> {
        let response = self
            .client
            .post(self.url("/errorCheck"))
            .json(&TextRequest { text })
            .send()?;
        if !response.status().is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: response.status().as_u16(),
                endpoint: "/errorCheck",
            });
        }
        let report: GrammarReport = response.json()?;
        Ok(Some(report))
    }
}
