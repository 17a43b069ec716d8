//! Query plumbing shared by tables: qualifiers, row sinks, parent hydrates.

use std::collections::HashMap;

use async_trait::async_trait;
use hostname_connector_provider::{CloudflareApi, PaginationParams, Zone};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::CoreResult;

/// Zones requested per page when walking every zone of the account.
const ZONES_PAGE_SIZE: u32 = 50;

/// Equality qualifiers (`column = value`) pushed down by the query engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quals(HashMap<String, String>);

impl Quals {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Qualifier value; empty strings count as absent.
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.0
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Receives rows as a list hydrate produces them.
pub trait RowSink<R>: Send {
    fn stream_list_item(&mut self, row: R);

    /// Once true, further rows are dropped and hydrates stop paging.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<R: Send> RowSink<R> for Vec<R> {
    fn stream_list_item(&mut self, row: R) {
        self.push(row);
    }
}

impl<R: Send> RowSink<R> for UnboundedSender<R> {
    fn stream_list_item(&mut self, row: R) {
        if self.send(row).is_err() {
            log::debug!("Row receiver dropped, discarding row");
        }
    }

    fn is_closed(&self) -> bool {
        UnboundedSender::is_closed(self)
    }
}

/// Supplies the parent zones a zone-scoped list hydrate runs against.
#[async_trait]
pub trait ParentHydrate: Send + Sync {
    async fn parent_zones(
        &self,
        api: &dyn CloudflareApi,
        quals: &Quals,
    ) -> CoreResult<Vec<Zone>>;
}

/// Lists zones through the API.
///
/// A `zone_id` qualifier short-circuits to that single zone without a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiZoneSource;

#[async_trait]
impl ParentHydrate for ApiZoneSource {
    async fn parent_zones(
        &self,
        api: &dyn CloudflareApi,
        quals: &Quals,
    ) -> CoreResult<Vec<Zone>> {
        if let Some(zone_id) = quals.get_str("zone_id") {
            return Ok(vec![Zone {
                id: zone_id.to_string(),
                name: String::new(),
                status: String::new(),
            }]);
        }

        let mut zones = Vec::new();
        let mut params = PaginationParams {
            page: 1,
            page_size: ZONES_PAGE_SIZE,
        };

        loop {
            let response = api.list_zones(&params).await.inspect_err(|e| {
                log::error!("listZones api_error: {e}");
            })?;
            let has_more = response.has_more && !response.items.is_empty();
            zones.extend(response.items);
            if !has_more {
                break;
            }
            params.page += 1;
        }

        log::debug!("listZones found {} zone(s)", zones.len());
        Ok(zones)
    }
}
