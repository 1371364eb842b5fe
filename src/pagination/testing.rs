//! Scripted page sources for tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

use crate::backend::PageSource;
use crate::errors::FetchError;
use crate::pagination::PageRequest;

/// Replays a fixed list of outcomes and records every request.
/// Once the script runs out it answers with empty pages.
pub(crate) struct ScriptedSource<T> {
    script: Mutex<VecDeque<Result<Vec<T>, FetchError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl<T> ScriptedSource<T> {
    pub(crate) fn new(script: Vec<Result<Vec<T>, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: Send + 'static> PageSource for ScriptedSource<T> {
    type Item = T;

    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<T>, FetchError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Holds its single response until the test releases it.
pub(crate) struct GatedSource<T> {
    gate: tokio::sync::Mutex<Option<oneshot::Receiver<Vec<T>>>>,
}

impl<T> GatedSource<T> {
    pub(crate) fn new() -> (Self, oneshot::Sender<Vec<T>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: tokio::sync::Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl<T: Send + 'static> PageSource for GatedSource<T> {
    type Item = T;

    async fn fetch_page(&self, _request: PageRequest) -> Result<Vec<T>, FetchError> {
        let rx = self.gate.lock().await.take();
        match rx {
            Some(rx) => Ok(rx.await.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }
}
