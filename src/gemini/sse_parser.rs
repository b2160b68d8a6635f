//! Server-Sent Events (SSE) parser for Gemini `streamGenerateContent` responses.
//!
//! With `alt=sse` the API sends one `GenerateContentResponse` JSON object per
//! `data:` line. Each object carries a slice of the reply text and, on the
//! last one, the finish reason.

use bytes::{Bytes, BytesMut};
use futures_util::Stream;
use serde::Deserialize;

use crate::conversation::EndpointError;

/// A decoded piece of a streamed reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamChunk {
    /// Reply text carried by this event (may be empty).
    pub text: String,
    /// Why generation stopped, or why the prompt was blocked.
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<u16>,
    #[serde(default)]
    message: String,
}

/// Converts a raw SSE byte stream into a stream of reply chunks.
///
/// Buffers raw bytes across network reads and decodes only complete lines,
/// so a character split between two reads survives intact.
pub fn sse_to_chunk_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<StreamChunk, EndpointError>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut buffer = BytesMut::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(EndpointError::Network(format!("Stream error: {e}")));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let raw = buffer.split_to(line_end + 1);
                let line = String::from_utf8_lossy(&raw).into_owned();
                if let Some(parsed) = parse_sse_line(line.trim()) {
                    yield parsed;
                }
            }
        }

        // The final event may arrive without a trailing newline
        let rest = String::from_utf8_lossy(&buffer).into_owned();
        if let Some(parsed) = parse_sse_line(rest.trim()) {
            yield parsed;
        }
    }
}

/// Parses a single trimmed SSE line.
///
/// Returns `None` for lines that carry no data (blank lines, comments, other
/// SSE fields), a parse error for malformed JSON, and an API error when the
/// server reports one inside the stream.
fn parse_sse_line(line: &str) -> Option<Result<StreamChunk, EndpointError>> {
    let json_str = line.strip_prefix("data:")?.trim_start();

    let response = match serde_json::from_str::<StreamResponse>(json_str) {
        Ok(r) => r,
        Err(e) => return Some(Err(EndpointError::Parse(e.to_string()))),
    };

    if let Some(error) = response.error {
        return Some(Err(EndpointError::Api {
            status: error.code.unwrap_or(500),
            body: error.message,
        }));
    }

    let mut chunk = StreamChunk {
        finish_reason: response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason),
        ..StreamChunk::default()
    };

    for candidate in response.candidates {
        if let Some(content) = candidate.content {
            chunk
                .text
                .extend(content.parts.into_iter().filter_map(|part| part.text));
        }
        if candidate.finish_reason.is_some() {
            chunk.finish_reason = candidate.finish_reason;
        }
    }

    Some(Ok(chunk))
}
