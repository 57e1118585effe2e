use std::time::Duration;

use tracing::{debug, info};

use crate::domain::{StvError, ViewerConfig};
use crate::record::Record;
use crate::table::{Row, RowContainer};

/// Fetches the record list from a fixed endpoint.
#[derive(Debug, Clone)]
pub struct Loader {
    client: reqwest::Client,
    url: String,
}

impl Loader {
    pub fn new(cfg: &ViewerConfig) -> Result<Self, StvError> {
        let url = reqwest::Url::parse(&cfg.url)
            .map_err(|e| StvError::InvalidConfig(format!("url {:?}: {e}", cfg.url)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue the single GET and decode the body as a list of records.
    pub async fn fetch(&self) -> Result<Vec<Record>, StvError> {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let records = Record::parse_list(&body)?;
        info!("Fetched {} records from {}", records.len(), self.url);
        Ok(records)
    }
}

/// One row per record, cells in field order.
pub fn build_row(record: &Record) -> Row {
    Row::new(record.fields().iter().map(|f| f.to_string()).collect())
}

/// Append one row per record, in order. Returns the number of rows appended.
pub fn render_rows<C: RowContainer + ?Sized>(container: &mut C, records: &[Record]) -> usize {
    for record in records {
        container.append_row(build_row(record));
    }
    records.len()
}
