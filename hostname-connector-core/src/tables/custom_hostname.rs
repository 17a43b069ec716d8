//! `cloudflare_custom_hostname`
//!
//! Custom hostnames of every zone, one row per hostname, with the SSL block
//! flattened into `ssl_*` columns.

use async_trait::async_trait;
use hostname_connector_provider::{CloudflareApi, Zone};

use crate::error::{CoreError, CoreResult};
use crate::query::{Quals, RowSink};
use crate::row::{CustomHostnameRow, Record};
use crate::schema::{Column, ColumnType, KeyColumnSet, TableDefinition};
use crate::tables::Table;

pub const TABLE_NAME: &str = "cloudflare_custom_hostname";

const KEY_COLUMNS: &[&str] = &["zone_id", "id"];

pub fn table_cloudflare_custom_hostname() -> TableDefinition {
    TableDefinition {
        name: TABLE_NAME,
        description: "Custom Hostnames allow you to use your own domain name with SSL/TLS protection for your zone.",
        get_key_columns: KeyColumnSet::AllColumns(KEY_COLUMNS),
        columns: vec![
            // Top columns
            Column::new("id", ColumnType::String, "Custom hostname identifier."),
            Column::new(
                "hostname",
                ColumnType::String,
                "The custom hostname that will point to your zone.",
            ),
            Column::new("zone_id", ColumnType::String, "Zone identifier."),
            // Other columns
            Column::new(
                "created_at",
                ColumnType::Timestamp,
                "When the custom hostname was created.",
            ),
            Column::new(
                "custom_origin_server",
                ColumnType::String,
                "Custom origin server address for the hostname.",
            ),
            Column::new("status", ColumnType::String, "Status of the custom hostname."),
            // SSL columns
            Column::new(
                "certificate_authority",
                ColumnType::String,
                "Certificate authority used for the SSL certificate.",
            )
            .from_field("ssl.certificate_authority"),
            Column::new(
                "ssl_id",
                ColumnType::String,
                "Identifier of the SSL certificate.",
            )
            .from_field("ssl.id"),
            Column::new(
                "ssl_method",
                ColumnType::String,
                "Method used for SSL verification.",
            )
            .from_field("ssl.method"),
            Column::new(
                "ssl_settings",
                ColumnType::Json,
                "Additional SSL settings for the hostname.",
            )
            .from_field("ssl.settings"),
            Column::new(
                "ssl_status",
                ColumnType::String,
                "Status of the SSL certificate.",
            )
            .from_field("ssl.status"),
            Column::new("ssl_type", ColumnType::String, "Type of SSL certificate.")
                .from_field("ssl.type"),
            Column::new(
                "ssl_wildcard",
                ColumnType::Bool,
                "Whether the SSL certificate is a wildcard certificate.",
            )
            .from_field("ssl.wildcard"),
        ],
    }
}

fn log_failure(hydrate: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{hydrate} api_error: {err}");
    } else {
        log::error!("{hydrate} api_error: {err}");
    }
}

/// Streams every custom hostname of `zone`, page by page.
///
/// Pages are fetched in order until `page >= total_pages`; the first failing
/// page aborts the listing and its error is returned unchanged. Paging also
/// stops once the sink is closed.
pub async fn list_custom_hostnames<S>(
    api: &dyn CloudflareApi,
    zone: &Zone,
    sink: &mut S,
) -> CoreResult<()>
where
    S: RowSink<CustomHostnameRow> + ?Sized,
{
    let mut page = 1;

    loop {
        let (hostnames, info) = api
            .list_custom_hostnames(&zone.id, page)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure("listCustomHostnames", e))?;

        log::debug!(
            "listCustomHostnames zone={} page={page}/{} rows={}",
            zone.id,
            info.total_pages,
            hostnames.len()
        );

        for hostname in hostnames {
            sink.stream_list_item(CustomHostnameRow::from_api(&zone.id, hostname));
        }

        if sink.is_closed() {
            log::debug!("listCustomHostnames zone={} sink closed at page {page}", zone.id);
            break;
        }
        if page >= info.total_pages {
            break;
        }
        page += 1;
    }

    Ok(())
}

/// Point lookup by the `zone_id` and `id` qualifiers.
pub async fn get_custom_hostname(
    api: &dyn CloudflareApi,
    quals: &Quals,
) -> CoreResult<CustomHostnameRow> {
    let zone_id = quals
        .get_str("zone_id")
        .ok_or_else(|| CoreError::MissingKeyColumn("zone_id".to_string()))?;
    let hostname_id = quals
        .get_str("id")
        .ok_or_else(|| CoreError::MissingKeyColumn("id".to_string()))?;

    let hostname = api
        .get_custom_hostname(zone_id, hostname_id)
        .await
        .map_err(CoreError::from)
        .inspect_err(|e| log_failure("getCustomHostname", e))?;

    Ok(CustomHostnameRow::from_api(zone_id, hostname))
}

/// Converts rows to records on their way into a record sink.
struct RecordSink<'a> {
    table: &'a TableDefinition,
    inner: &'a mut dyn RowSink<Record>,
    error: Option<CoreError>,
}

impl RowSink<CustomHostnameRow> for RecordSink<'_> {
    fn stream_list_item(&mut self, row: CustomHostnameRow) {
        if self.error.is_some() {
            return;
        }
        match row.to_record(self.table) {
            Ok(record) => self.inner.stream_list_item(record),
            Err(e) => self.error = Some(e),
        }
    }

    fn is_closed(&self) -> bool {
        self.error.is_some() || self.inner.is_closed()
    }
}

pub struct CustomHostnameTable {
    definition: TableDefinition,
}

impl CustomHostnameTable {
    pub fn new() -> Self {
        Self {
            definition: table_cloudflare_custom_hostname(),
        }
    }
}

impl Default for CustomHostnameTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Table for CustomHostnameTable {
    fn definition(&self) -> &TableDefinition {
        &self.definition
    }

    async fn list(
        &self,
        api: &dyn CloudflareApi,
        zone: &Zone,
        sink: &mut dyn RowSink<Record>,
    ) -> CoreResult<()> {
        let mut records = RecordSink {
            table: &self.definition,
            inner: sink,
            error: None,
        };
        list_custom_hostnames(api, zone, &mut records).await?;
        records.error.map_or(Ok(()), Err)
    }

    async fn get(&self, api: &dyn CloudflareApi, quals: &Quals) -> CoreResult<Record> {
        get_custom_hostname(api, quals)
            .await?
            .to_record(&self.definition)
    }
}
