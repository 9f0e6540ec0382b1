#![allow(dead_code)]

use std::sync::Mutex;

use mdx_engine::{ArticleRecord, ContentPage, ContentSource, FailureKind, FetchError};

pub fn record(id: &str, created_at: &str) -> ArticleRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("Title {id}"),
        "createdAt": created_at,
        "updatedAt": created_at,
        "content": format!("<p>Body {id}</p>"),
    }))
    .expect("valid record")
}

pub fn records(count: usize, first_id: usize) -> Vec<ArticleRecord> {
    (first_id..first_id + count)
        .map(|i| record(&i.to_string(), "2024-01-01T00:00:00Z"))
        .collect()
}

/// Serves a fixed script of pages and records every request.
pub struct ScriptedSource {
    pages: Mutex<Vec<Result<ContentPage, FetchError>>>,
    pub requests: Mutex<Vec<(usize, usize)>>,
}

impl ScriptedSource {
    pub fn new(pages: Vec<Result<ContentPage, FetchError>>) -> Self {
        let mut pages = pages;
        pages.reverse();
        Self {
            pages: Mutex::new(pages),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Pages of the given sizes, each reporting `total_count`.
    pub fn with_sizes(sizes: &[usize], total_count: Option<usize>) -> Self {
        let mut next_id = 0;
        let pages = sizes
            .iter()
            .map(|&size| {
                let contents = records(size, next_id);
                next_id += size;
                Ok(ContentPage {
                    contents,
                    total_count,
                })
            })
            .collect();
        Self::new(pages)
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub fn network_error() -> FetchError {
    FetchError {
        kind: FailureKind::Network,
        message: "scripted failure".to_string(),
    }
}

#[async_trait::async_trait]
impl ContentSource for ScriptedSource {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ContentPage, FetchError> {
        self.requests.lock().unwrap().push((offset, limit));
        self.pages.lock().unwrap().pop().unwrap_or(Ok(ContentPage {
            contents: Vec::new(),
            total_count: None,
        }))
    }
}
