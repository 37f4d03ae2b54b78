//! Upload workflow and chat state for a single legal document.
//!
//! [`DocumentSession`] owns the document lifecycle: it validates a file
//! before any network call, drives it through extraction and summarization,
//! and keeps an append-only chat transcript that resets whenever a new
//! document replaces the old one.

use base64::prelude::*;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{ClientError, DocumentApi};

pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;
pub const PDF_MIME_TYPE: &str = "application/pdf";

pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What are the key obligations for each party?",
    "What are the payment terms?",
    "How can this contract be terminated?",
    "What are the main risks or liabilities?",
    "Are there any important deadlines?",
];

const WELCOME_MESSAGE: &str = "Hi! I've analyzed your legal document. You can now ask me questions about its contents, key terms, obligations, or any specific clauses. What would you like to know?";
const ANSWER_FAILURE_MESSAGE: &str =
    "Sorry, I encountered an error while processing your question. Please try again.";
const NO_TEXT_EXTRACTED_MESSAGE: &str =
    "No text could be extracted from the document. Please ensure it's a readable PDF.";

/// Rejections raised before any request is sent.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("Please upload a PDF file only.")]
    NotPdf,
    #[error("File size must be less than 10MB.")]
    FileTooLarge,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UploadState {
    Idle,
    Uploading,
    Extracting,
    Summarizing,
    Ready,
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: MessageRole, text: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            text,
            timestamp: Utc::now(),
        }
    }
}

pub struct DocumentSession<A: DocumentApi> {
    api: A,
    state: UploadState,
    document_text: Option<String>,
    summary: Option<String>,
    messages: Vec<ChatMessage>,
}

impl<A: DocumentApi> DocumentSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: UploadState::Idle,
            document_text: None,
            summary: None,
            messages: Vec::new(),
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn document_text(&self) -> Option<&str> {
        self.document_text.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The chat transcript, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Runs a file through the extract/summarize pipeline.
    ///
    /// An unsuitable file is rejected with [`UploadError`] before any request
    /// is sent, leaving the session untouched. Pipeline failures are recorded
    /// in [`UploadState::Error`] instead; the previous document (if any) is
    /// gone at that point, matching the fact that its upload was replaced.
    pub async fn upload_document(
        &mut self,
        file_bytes: &[u8],
        mime_type: &str,
    ) -> Result<(), UploadError> {
        if mime_type != PDF_MIME_TYPE {
            return Err(UploadError::NotPdf);
        }
        if file_bytes.len() > MAX_FILE_SIZE_BYTES {
            return Err(UploadError::FileTooLarge);
        }

        self.state = UploadState::Uploading;
        self.document_text = None;
        self.summary = None;
        self.messages.clear();
        let file_base64 = BASE64_STANDARD.encode(file_bytes);

        self.state = UploadState::Extracting;
        let text = match self.api.extract_text(&file_base64).await {
            Ok(text) => text,
            Err(e) => {
                self.state = UploadState::Error(e.to_string());
                return Ok(());
            }
        };
        if text.is_empty() {
            self.state = UploadState::Error(NO_TEXT_EXTRACTED_MESSAGE.to_string());
            return Ok(());
        }

        self.state = UploadState::Summarizing;
        let summary = match self.api.summarize(&text).await {
            Ok(summary) => summary,
            Err(e) => {
                self.state = UploadState::Error(e.to_string());
                return Ok(());
            }
        };

        self.document_text = Some(text);
        self.summary = Some(summary);
        self.messages.push(ChatMessage::new(
            MessageRole::Assistant,
            WELCOME_MESSAGE.to_string(),
        ));
        self.state = UploadState::Ready;
        Ok(())
    }

    /// Sends a question about the current document.
    ///
    /// Returns `None` without sending anything when no document is ready or
    /// the question is blank. A failed request still appends an assistant
    /// message so the transcript explains what happened.
    pub async fn submit_question(&mut self, question: &str) -> Option<&ChatMessage> {
        let question = question.trim();
        if question.is_empty() || self.state != UploadState::Ready {
            return None;
        }
        let document_text = self.document_text.as_deref()?.to_string();

        self.messages
            .push(ChatMessage::new(MessageRole::User, question.to_string()));

        let reply = match self.api.ask(&document_text, question).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("question failed: {e}");
                ANSWER_FAILURE_MESSAGE.to_string()
            }
        };
        self.messages
            .push(ChatMessage::new(MessageRole::Assistant, reply));
        self.messages.last()
    }
}
