use std::collections::HashMap;

use chrono::DateTime;
use engine_logging::engine_warn;

use crate::document::AssembleError;

/// Default extension for produced documents.
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Whole seconds since the Unix epoch of an RFC 3339 timestamp, rounded down.
pub fn unix_seconds(created_at: &str) -> Result<i64, AssembleError> {
    if created_at.trim().is_empty() {
        return Err(AssembleError::InvalidCreatedAt {
            value: created_at.to_string(),
            message: "missing timestamp".to_string(),
        });
    }
    DateTime::parse_from_rfc3339(created_at.trim())
        .map(|parsed| parsed.timestamp())
        .map_err(|err| AssembleError::InvalidCreatedAt {
            value: created_at.to_string(),
            message: err.to_string(),
        })
}

/// `{unix_seconds}.{extension}`.
pub fn timestamp_filename(seconds: i64, extension: &str) -> String {
    format!("{seconds}.{}", extension.trim_start_matches('.'))
}

/// Tracks which record claimed each filename during one export run.
///
/// Two records created within the same second map to the same name. By
/// default the later one overwrites the earlier and a warning is logged; with
/// `disambiguate` the later one gets `-{id}` appended to its stem instead.
#[derive(Debug, Default)]
pub struct FilenameRegistry {
    disambiguate: bool,
    claimed: HashMap<String, String>,
}

impl FilenameRegistry {
    pub fn new(disambiguate: bool) -> Self {
        Self {
            disambiguate,
            claimed: HashMap::new(),
        }
    }

    pub fn claim(&mut self, filename: String, record_id: &str) -> String {
        let Some(previous) = self.claimed.get(&filename) else {
            self.claimed.insert(filename.clone(), record_id.to_string());
            return filename;
        };

        if !self.disambiguate || record_id.is_empty() {
            engine_warn!(
                "{} is shared by records {:?} and {:?}; the later one overwrites it",
                filename,
                previous,
                record_id
            );
            self.claimed.insert(filename.clone(), record_id.to_string());
            return filename;
        }

        let alternative = match filename.rsplit_once('.') {
            Some((stem, extension)) => format!("{stem}-{record_id}.{extension}"),
            None => format!("{filename}-{record_id}"),
        };
        engine_warn!(
            "{} is already used by record {:?}; writing record {:?} to {}",
            filename,
            previous,
            record_id,
            alternative
        );
        self.claimed.insert(alternative.clone(), record_id.to_string());
        alternative
    }
}
