//! JSON bodies exchanged with the search and notification endpoints.

use serde::{Deserialize, Serialize};

/// Client → search endpoint: `{"data":[{"text": question}]}`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub data: [TextDoc<'a>; 1],
}

#[derive(Debug, Clone, Serialize)]
pub struct TextDoc<'a> {
    pub text: &'a str,
}

impl<'a> SearchRequest<'a> {
    pub fn new(question: &'a str) -> Self {
        Self {
            data: [TextDoc { text: question }],
        }
    }
}

/// Search endpoint → client. Only the fields the panel reads are modelled;
/// `data` and `data.docs` are required, everything below them is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub data: ResponseData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseData {
    pub docs: Vec<ResponseDoc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseDoc {
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// A ranked candidate answer.
#[derive(Debug, Clone, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub uri: Option<String>,
}

/// The answer shown for a question: the first document's first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub uri: Option<String>,
}

impl SearchResponse {
    pub fn first_answer(self) -> Option<Answer> {
        let first = self.data.docs.into_iter().next()?.matches.into_iter().next()?;
        Some(Answer {
            text: first.text,
            uri: first.uri,
        })
    }
}

/// Q&A report sent to the notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub question: String,
    pub answer: String,
    pub answer_uri: Option<String>,
    pub thumbup: Option<bool>,
}

impl Notification {
    pub fn new(question: &str, answer: &Answer, thumbup: Option<bool>) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.text.clone(),
            answer_uri: answer.uri.clone(),
            thumbup,
        }
    }
}

/// Client → notification endpoint: `{"data": [], "parameters": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct NotifyRequest<'a> {
    pub data: Vec<serde_json::Value>,
    pub parameters: &'a Notification,
}

impl<'a> NotifyRequest<'a> {
    pub fn new(parameters: &'a Notification) -> Self {
        Self {
            data: Vec::new(),
            parameters,
        }
    }
}
