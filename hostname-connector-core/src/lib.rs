//! hostname-connector core
//!
//! The `cloudflare_custom_hostname` table and the small runtime that drives it:
//! - table and column definitions ([`schema`])
//! - API object to row mapping, SSL fields flattened into columns ([`row`])
//! - list/get hydrates ([`tables`])
//! - qualifiers, row sinks and the zone parent hydrate ([`query`])
//! - the plugin registry that runs them ([`plugin`])
//!
//! Rows are always read fresh from the API; nothing is cached.

pub mod error;
pub mod plugin;
pub mod query;
pub mod row;
pub mod schema;
pub mod tables;

#[cfg(test)]
mod test_utils;

pub use error::{CoreError, CoreResult};
pub use plugin::Plugin;
pub use query::{ApiZoneSource, ParentHydrate, Quals, RowSink};
pub use row::{CustomHostnameRow, Record};
pub use schema::{Column, ColumnType, KeyColumnSet, TableDefinition, Transform};
pub use tables::custom_hostname::{
    TABLE_NAME as CUSTOM_HOSTNAME_TABLE, get_custom_hostname, list_custom_hostnames,
    table_cloudflare_custom_hostname,
};
pub use tables::{CustomHostnameTable, Table, registered_tables, table_definition};
