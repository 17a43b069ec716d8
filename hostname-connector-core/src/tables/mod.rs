//! Table implementations

pub mod custom_hostname;

use std::sync::Arc;

use async_trait::async_trait;
use hostname_connector_provider::{CloudflareApi, Zone};

use crate::error::{CoreError, CoreResult};
use crate::query::{Quals, RowSink};
use crate::row::Record;
use crate::schema::TableDefinition;

pub use custom_hostname::CustomHostnameTable;

/// A zone-scoped table as the plugin runtime sees it.
///
/// Rows leave the table as [`Record`]s so the runtime can hold tables of
/// different row types side by side.
#[async_trait]
pub trait Table: Send + Sync {
    fn definition(&self) -> &TableDefinition;

    /// List hydrate for one parent zone.
    async fn list(
        &self,
        api: &dyn CloudflareApi,
        zone: &Zone,
        sink: &mut dyn RowSink<Record>,
    ) -> CoreResult<()>;

    /// Get hydrate; key columns have already been checked by the caller.
    async fn get(&self, api: &dyn CloudflareApi, quals: &Quals) -> CoreResult<Record>;
}

/// Every table the plugin serves.
pub fn registered_tables() -> Vec<Arc<dyn Table>> {
    vec![Arc::new(CustomHostnameTable::new())]
}

/// Definition of a registered table; needs no API connection.
pub fn table_definition(name: &str) -> CoreResult<TableDefinition> {
    registered_tables()
        .iter()
        .map(|table| table.definition())
        .find(|definition| definition.name == name)
        .cloned()
        .ok_or_else(|| CoreError::TableNotFound(name.to_string()))
}
