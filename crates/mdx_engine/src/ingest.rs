use engine_logging::{engine_debug, engine_error, engine_info};

use crate::client::ContentSource;
use crate::{ArticleRecord, FetchError};

/// Page size requested from the content API; also its maximum.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Records gathered by [`fetch_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct Ingestion {
    pub records: Vec<ArticleRecord>,
    /// Pages that were fetched successfully, including a final empty one.
    pub pages: usize,
    /// Set when a page fetch failed and the loop stopped before exhaustion.
    pub stopped_early: Option<FetchError>,
}

impl Ingestion {
    pub fn is_partial(&self) -> bool {
        self.stopped_early.is_some()
    }
}

/// Walks the list endpoint with offset/limit paging until a page comes back
/// empty or the accumulated count reaches the reported total.
///
/// A failed page ends the walk; what was fetched before it is kept.
pub async fn fetch_all(source: &dyn ContentSource, limit: usize) -> Ingestion {
    let limit = limit.max(1);
    let mut records: Vec<ArticleRecord> = Vec::new();
    let mut offset = 0;
    let mut pages = 0;
    let mut stopped_early = None;

    engine_info!("Fetching articles");
    loop {
        engine_info!("Fetching page offset={} limit={}", offset, limit);
        let page = match source.fetch_page(offset, limit).await {
            Ok(page) => page,
            Err(err) => {
                engine_error!("Fetching page at offset {} failed: {}", offset, err);
                stopped_early = Some(err);
                break;
            }
        };
        pages += 1;
        engine_debug!(
            "Page received total_count={:?} current={}",
            page.total_count,
            page.contents.len()
        );

        if page.contents.is_empty() {
            break;
        }
        records.extend(page.contents);
        offset += limit;
        engine_info!("{} articles fetched", records.len());

        if let Some(total) = page.total_count.filter(|total| *total > 0) {
            if records.len() >= total {
                break;
            }
        }
    }

    engine_info!("Fetched {} articles in {} pages", records.len(), pages);
    Ingestion {
        records,
        pages,
        stopped_early,
    }
}
