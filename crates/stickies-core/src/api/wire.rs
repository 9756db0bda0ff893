//! Response envelopes used by the notes API.

use serde::Deserialize;

use super::NotePage;
use crate::models::Note;

/// `{ "data": ... }`
#[derive(Debug, Deserialize)]
pub(super) struct DataEnvelope<T> {
    pub data: T,
}

/// `{ "data": [...], "meta": { "current_page": 1, "last_page": 3 } }`
#[derive(Debug, Deserialize)]
pub(super) struct PageEnvelope {
    data: Vec<Note>,
    meta: PageMeta,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    current_page: u32,
    last_page: u32,
}

impl From<PageEnvelope> for NotePage {
    fn from(value: PageEnvelope) -> Self {
        Self {
            items: value.data,
            page: value.meta.current_page.max(1),
            total_pages: value.meta.last_page.max(1),
        }
    }
}

/// The labels endpoint returns a bare array; some deployments wrap it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum LabelsResponse {
    Bare(Vec<String>),
    Wrapped(DataEnvelope<Vec<String>>),
}

impl From<LabelsResponse> for Vec<String> {
    fn from(value: LabelsResponse) -> Self {
        match value {
            LabelsResponse::Bare(labels) | LabelsResponse::Wrapped(DataEnvelope { data: labels }) => {
                labels
            }
        }
    }
}

/// Error payloads carry a human message under one of these keys.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}
