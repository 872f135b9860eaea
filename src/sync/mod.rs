//! Content sync: pull project pages from the content API and write the
//! project exchange file consumed by the page at load time.

pub mod client;
pub mod config;
pub mod error;
pub mod notion;

pub use client::{NotionClient, PageSource, NOTION_VERSION};
pub use config::SyncConfig;
pub use error::SyncError;
pub use notion::{NotionPage, QueryResponse};

use std::path::Path;

use log::info;

use crate::project::ProjectRecord;

/// Fetch every page, following continuation cursors
pub fn fetch_all<S: PageSource + ?Sized>(source: &S) -> Result<Vec<NotionPage>, SyncError> {
    let mut pages = Vec::new();
    let mut cursor = None;
    loop {
        let response = source.query(cursor.take())?;
        pages.extend(response.results);
        match response.next_cursor {
            Some(next) if response.has_more => cursor = Some(next),
            _ => break,
        }
    }
    Ok(pages)
}

/// Serialize records the way the page expects them (2-space indented array)
pub fn write_projects(path: &Path, records: &[ProjectRecord]) -> Result<(), SyncError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Run one sync: fetch, map and write to `output`
pub fn sync_projects<S: PageSource + ?Sized>(
    source: &S,
    output: &Path,
) -> Result<Vec<ProjectRecord>, SyncError> {
    info!("fetching project pages");
    let records: Vec<ProjectRecord> = fetch_all(source)?.iter().map(NotionPage::to_record).collect();
    write_projects(output, &records)?;
    info!("wrote {} projects to {}", records.len(), output.display());
    Ok(records)
}
