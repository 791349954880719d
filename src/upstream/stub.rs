//! In-process stand-ins for the upstream services, counting every call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use super::{
    CompletionRequest, ImageInput, LabelSet, SpeechRequest, SpeechSynthesizer, TextCompleter,
    VisionLabeler,
};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Fail(&'static str, String),
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T, AppError> {
        match self {
            Reply::Ok(v) => Ok(v.clone()),
            Reply::Fail(service, details) => Err(AppError::upstream(*service, details.clone())),
        }
    }
}

pub struct StubVision {
    /// Served in call order; the last one repeats.
    replies: Vec<Reply<LabelSet>>,
    calls: AtomicUsize,
    last: Mutex<Option<ImageInput>>,
}

impl StubVision {
    pub fn labels(labels: &[&str]) -> Self {
        Self::with_reply(Reply::Ok(labels.iter().map(|l| l.to_string()).collect()))
    }

    pub fn failing(details: &str) -> Self {
        Self::with_reply(Reply::Fail("Clarifai", details.to_string()))
    }

    /// Label once, then fail every later call.
    pub fn labels_then_failing(labels: &[&str], details: &str) -> Self {
        Self::with_replies(vec![
            Reply::Ok(labels.iter().map(|l| l.to_string()).collect()),
            Reply::Fail("Clarifai", details.to_string()),
        ])
    }

    fn with_reply(reply: Reply<LabelSet>) -> Self {
        Self::with_replies(vec![reply])
    }

    fn with_replies(replies: Vec<Reply<LabelSet>>) -> Self {
        Self {
            replies,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<ImageInput> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionLabeler for StubVision {
    async fn labels(&self, image: ImageInput) -> Result<LabelSet, AppError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(image);
        self.replies[call.min(self.replies.len() - 1)].get()
    }
}

pub struct StubText {
    reply: Reply<String>,
    calls: AtomicUsize,
    last: Mutex<Option<CompletionRequest>>,
}

impl StubText {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Ok(text.to_string()))
    }

    pub fn failing(details: &str) -> Self {
        Self::with_reply(Reply::Fail("OpenAI", details.to_string()))
    }

    fn with_reply(reply: Reply<String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompleter for StubText {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request);
        self.reply.get()
    }
}

pub struct StubSpeech {
    reply: Reply<Vec<u8>>,
    calls: AtomicUsize,
    last: Mutex<Option<SpeechRequest>>,
}

impl StubSpeech {
    pub fn returning(bytes: &[u8]) -> Self {
        Self::with_reply(Reply::Ok(bytes.to_vec()))
    }

    pub fn failing(details: &str) -> Self {
        Self::with_reply(Reply::Fail("OpenAI TTS", details.to_string()))
    }

    fn with_reply(reply: Reply<Vec<u8>>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SpeechRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());
        self.reply.get().map(Bytes::from)
    }
}
