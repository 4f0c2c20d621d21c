use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::User;
use crate::shared::SyncError;

/// Kind of a relayed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    File,
    System,
}

/// An inline-carried file attachment
///
/// The payload rides the event itself, base64-encoded; there is no
/// side-channel transfer and no size limit imposed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    /// Base64-encoded file content
    pub payload: String,
}

impl FileAttachment {
    /// Encodes raw bytes into an attachment
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        Self {
            name: name.into(),
            byte_size: bytes.len() as u64,
            mime_type: mime_type.into(),
            payload: BASE64.encode(bytes),
        }
    }

    /// Decodes the payload back into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, SyncError> {
        BASE64
            .decode(&self.payload)
            .map_err(|e| SyncError::storage(format!("decode attachment payload: {}", e)))
    }
}

/// A chat, file, or system message
///
/// Stamped once at construction and never mutated. `sender_name` is a
/// snapshot taken at send time and is not re-resolved if the sender later
/// leaves. Messages are never persisted; history lives only as long as
/// the receiving process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
    pub file: Option<FileAttachment>,
}

impl Message {
    /// Text message from a session member
    pub fn text(sender: &User, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender_id: sender.id.clone(),
            sender_name: sender.name.clone(),
            content: content.into(),
            timestamp: Utc::now(),
            kind: MessageKind::Text,
            file: None,
        }
    }

    /// File message; the content carries the file name for display
    pub fn file(sender: &User, attachment: FileAttachment) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender_id: sender.id.clone(),
            sender_name: sender.name.clone(),
            content: attachment.name.clone(),
            timestamp: Utc::now(),
            kind: MessageKind::File,
            file: Some(attachment),
        }
    }

    /// Synthetic notice not attributed to any member
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender_id: "system".to_string(),
            sender_name: "System".to_string(),
            content: content.into(),
            timestamp: Utc::now(),
            kind: MessageKind::System,
            file: None,
        }
    }
}
