//! Output rows
//!
//! A row is the API object plus the zone it was read from. Column values are
//! resolved against the row's serialized form using each column's transform,
//! which is how nested SSL fields end up as flat columns.

use chrono::{DateTime, Utc};
use hostname_connector_provider::{CustomHostname, CustomHostnameSsl};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreResult;
use crate::schema::{Column, TableDefinition};

/// One row of `cloudflare_custom_hostname`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomHostnameRow {
    pub id: String,
    pub zone_id: String,
    pub hostname: String,
    pub custom_origin_server: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Only reachable through `ssl.*` field paths.
    pub ssl: Option<CustomHostnameSsl>,
}

impl CustomHostnameRow {
    /// `zone_id` comes from the caller (parent zone or qualifier); the API
    /// object does not carry it.
    pub fn from_api(zone_id: &str, hostname: CustomHostname) -> Self {
        Self {
            id: hostname.id,
            zone_id: zone_id.to_string(),
            hostname: hostname.hostname,
            custom_origin_server: hostname.custom_origin_server,
            status: hostname.status.into(),
            created_at: hostname.created_at,
            ssl: hostname.ssl,
        }
    }

    /// Value of a single column; `null` when any segment of its path is absent.
    pub fn column_value(&self, column: &Column) -> CoreResult<Value> {
        let row = serde_json::to_value(self)?;
        Ok(resolve_path(&row, column.source_path()))
    }

    /// All column values of `table`, in schema order.
    pub fn to_record(&self, table: &TableDefinition) -> CoreResult<Record> {
        let row = serde_json::to_value(self)?;
        Ok(Record(
            table
                .columns
                .iter()
                .map(|c| (c.name.to_string(), resolve_path(&row, c.source_path())))
                .collect(),
        ))
    }
}

fn resolve_path(row: &Value, path: &str) -> Value {
    path.split('.')
        .try_fold(row, |value, segment| value.get(segment))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Column name/value pairs in schema order; serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(pub Vec<(String, Value)>);

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.iter().find(|(name, _)| name == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_nested_and_missing_paths() {
        let row = json!({"ssl": {"id": "s1", "settings": {"http2": "on"}}, "id": "h1"});
        assert_eq!(resolve_path(&row, "id"), json!("h1"));
        assert_eq!(resolve_path(&row, "ssl.settings.http2"), json!("on"));
        assert_eq!(resolve_path(&row, "ssl.wildcard"), Value::Null);
        assert_eq!(resolve_path(&row, "nope.deeper"), Value::Null);
    }

    #[test]
    fn record_serializes_in_column_order() {
        let record = Record(vec![
            ("zeta".to_string(), json!(1)),
            ("alpha".to_string(), json!(2)),
        ]);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"zeta":1,"alpha":2}"#
        );
    }
}
