//! Scripted collaborators for BDD scenarios

use std::collections::VecDeque;
use std::sync::Mutex;

use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;
use homework_bot::BotError;

const EMPTY_WINDOW: &str = r#"{"homeworks": []}"#;

/// HTTP client that answers GETs from a queue and POSTs with a fixed reply.
///
/// Once the GET queue is drained every request sees an empty window.
#[derive(Debug)]
pub struct ScriptedHttpClient {
    gets: Mutex<VecDeque<Result<HttpResponse, String>>>,
    post_reply: Result<HttpResponse, String>,
    get_count: Mutex<usize>,
    post_count: Mutex<usize>,
}

impl Default for ScriptedHttpClient {
    fn default() -> Self {
        Self {
            gets: Mutex::new(VecDeque::new()),
            post_reply: Ok(HttpResponse {
                status: 200,
                body: r#"{"ok":true,"result":{}}"#.to_string(),
            }),
            get_count: Mutex::new(0),
            post_count: Mutex::new(0),
        }
    }
}

impl ScriptedHttpClient {
    pub fn with_post_reply(reply: Result<HttpResponse, String>) -> Self {
        Self {
            post_reply: reply,
            ..Self::default()
        }
    }

    pub fn push_get(&self, reply: Result<HttpResponse, String>) {
        self.gets.lock().unwrap().push_back(reply);
    }

    pub fn get_count(&self) -> usize {
        *self.get_count.lock().unwrap()
    }

    pub fn post_count(&self) -> usize {
        *self.post_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        *self.get_count.lock().unwrap() += 1;
        let reply = self.gets.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                body: EMPTY_WINDOW.to_string(),
            })
        });
        reply.map_err(BotError::Http)
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        *self.post_count.lock().unwrap() += 1;
        self.post_reply.clone().map_err(BotError::Http)
    }
}

/// Notifier that records every message it is asked to send
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, message: &str) -> homework_bot::Result<()> {
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
