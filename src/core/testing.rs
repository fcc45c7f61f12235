use crate::domain::ports::{CompletionService, Storage};
use crate::utils::error::{ClassifyError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub(crate) struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    writes: Arc<Mutex<HashMap<String, usize>>>,
    // (path, nth write to that path) pairs that fail once.
    failing_writes: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn put(&self, path: &str, data: &str) {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.as_bytes().to_vec());
    }

    pub(crate) async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned()
    }

    pub(crate) async fn write_count(&self, path: &str) -> usize {
        let writes = self.writes.lock().await;
        writes.get(path).copied().unwrap_or(0)
    }

    /// Makes the `nth` (1-based) write to `path` fail.
    pub(crate) async fn fail_write(&self, path: &str, nth: usize) {
        let mut failing = self.failing_writes.lock().await;
        failing.push((path.to_string(), nth));
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            ClassifyError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let attempt = {
            let mut writes = self.writes.lock().await;
            let count = writes.entry(path.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let should_fail = {
            let failing = self.failing_writes.lock().await;
            failing.iter().any(|(p, nth)| p == path && *nth == attempt)
        };
        if should_fail {
            return Err(ClassifyError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("No space left writing {}", path),
            )));
        }

        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let files = self.files.lock().await;
        Ok(files.contains_key(path))
    }

    async fn remove_file(&self, path: &str) -> Result<()> {
        let mut files = self.files.lock().await;
        files.remove(path);
        Ok(())
    }
}

/// Answers like a well-behaved service, deriving labels from the prompt.
#[derive(Default)]
pub(crate) struct StubService {
    calls: AtomicUsize,
    temperatures: std::sync::Mutex<Vec<f64>>,
}

impl StubService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn temperatures(&self) -> Vec<f64> {
        self.temperatures
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn canned_reply(prompt: &str) -> String {
    let line_value = |label: &str| {
        prompt
            .lines()
            .find_map(|line| line.strip_prefix(label))
            .unwrap_or("")
            .trim()
            .to_string()
    };
    let company = line_value("Company Name:");
    let location = line_value("Location:");

    let (industry, ownership) = if company.contains("Church") {
        ("Other services", "Private Sector")
    } else if company.starts_with("City of") {
        ("Public administration", "Local Government")
    } else {
        ("Professional and business services", "Private Sector")
    };
    let state = location
        .rsplit(", ")
        .next()
        .filter(|s| s.len() == 2 && location.contains(", "))
        .unwrap_or("NA");

    format!("Industry: {industry}\nOwnership: {ownership}\nState: {state}")
}

#[async_trait]
impl CompletionService for StubService {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut temperatures) = self.temperatures.lock() {
            temperatures.push(temperature);
        }
        Ok(canned_reply(prompt))
    }
}

/// Replays a fixed list of replies, then fails.
pub(crate) struct ScriptedService {
    replies: std::sync::Mutex<VecDeque<Result<String>>>,
}

impl ScriptedService {
    pub(crate) fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: std::sync::Mutex::new(replies.into()),
        }
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    async fn complete(&self, _prompt: &str, _temperature: f64) -> Result<String> {
        let next = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front());
        next.unwrap_or_else(|| Err(ClassifyError::malformed("script exhausted")))
    }
}
