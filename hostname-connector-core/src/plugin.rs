//! Plugin runtime
//!
//! Owns the API client and the table registry, and drives hydrates the way
//! the host engine would: parent zones first, then the table's list hydrate
//! once per zone, strictly in sequence.

use std::collections::BTreeMap;
use std::sync::Arc;

use hostname_connector_provider::CloudflareApi;

use crate::error::{CoreError, CoreResult, ProviderError};
use crate::query::{ApiZoneSource, ParentHydrate, Quals, RowSink};
use crate::row::Record;
use crate::schema::TableDefinition;
use crate::tables::{Table, registered_tables};

pub struct Plugin {
    api: Arc<dyn CloudflareApi>,
    zones: Arc<dyn ParentHydrate>,
    tables: BTreeMap<&'static str, Arc<dyn Table>>,
}

impl Plugin {
    /// Registers every table of the plugin against `api`.
    pub fn new(api: Arc<dyn CloudflareApi>) -> Self {
        let mut plugin = Self {
            api,
            zones: Arc::new(ApiZoneSource),
            tables: BTreeMap::new(),
        };
        for table in registered_tables() {
            plugin.register(table);
        }
        plugin
    }

    /// Replaces the zone-listing parent hydrate.
    #[must_use]
    pub fn with_zone_source(mut self, zones: Arc<dyn ParentHydrate>) -> Self {
        self.zones = zones;
        self
    }

    fn register(&mut self, table: Arc<dyn Table>) {
        self.tables.insert(table.definition().name, table);
    }

    pub fn table_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tables.keys().copied()
    }

    fn table(&self, name: &str) -> CoreResult<&Arc<dyn Table>> {
        self.tables
            .get(name)
            .ok_or_else(|| CoreError::TableNotFound(name.to_string()))
    }

    pub fn definition(&self, name: &str) -> CoreResult<&TableDefinition> {
        Ok(self.table(name)?.definition())
    }

    /// Whether Cloudflare accepts the configured credentials.
    pub async fn verify(&self) -> CoreResult<bool> {
        Ok(self.api.verify_token().await?)
    }

    /// Runs the list hydrate of `table` for every parent zone.
    ///
    /// A `zone_id` qualifier narrows the parent zones to that one zone; a
    /// zone the account does not have yields no rows. Otherwise the first
    /// error from any zone aborts the whole listing. Listing stops early once
    /// the sink is closed.
    pub async fn list(
        &self,
        table: &str,
        quals: &Quals,
        sink: &mut dyn RowSink<Record>,
    ) -> CoreResult<()> {
        let table = self.table(table)?;
        let zones = self.zones.parent_zones(self.api.as_ref(), quals).await?;
        let qualified_zone = quals.get_str("zone_id");

        for zone in &zones {
            if sink.is_closed() {
                log::debug!("Row sink closed, skipping remaining zones");
                break;
            }
            log::debug!(
                "{} list hydrate for zone {}",
                table.definition().name,
                zone.id
            );

            match table.list(self.api.as_ref(), zone, sink).await {
                Err(CoreError::Provider(ProviderError::ZoneNotFound { .. }))
                    if qualified_zone == Some(zone.id.as_str()) =>
                {
                    log::debug!("Zone {} not found, no rows", zone.id);
                }
                result => result?,
            }
        }

        Ok(())
    }

    /// Runs the get hydrate of `table` once every key column has a qualifier.
    pub async fn get(&self, table: &str, quals: &Quals) -> CoreResult<Record> {
        let table = self.table(table)?;

        if let Some(missing) = table
            .definition()
            .get_key_columns
            .columns()
            .iter()
            .find(|column| quals.get_str(column).is_none())
        {
            return Err(CoreError::MissingKeyColumn((*missing).to_string()));
        }

        table.get(self.api.as_ref(), quals).await
    }
}
