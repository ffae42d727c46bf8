//! `filter` blocks shared by EC2 data sources
//!
//! ```text
//! filter = [
//!   { name = "transit-gateway-id", values = ["tgw-123"] },
//! ]
//! ```

use aws_sdk_ec2::types::Filter;
use carina_core::resource::Value;
use carina_core::schema::AttributeType;

/// One `filter` block: an EC2 filter name and the values it matches
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceFilter {
    pub name: String,
    pub values: Vec<String>,
}

impl DataSourceFilter {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Bind a filter block from its configured value
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let Value::Map(map) = value else {
            return Err("filter must be a map with 'name' and 'values'".to_string());
        };

        let name = match map.get("name") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) => return Err("filter name must not be empty".to_string()),
            Some(_) => return Err("filter name must be a string".to_string()),
            None => return Err("filter is missing 'name'".to_string()),
        };

        let values = match map.get("values") {
            Some(Value::List(items)) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(format!("filter '{}' values must be strings", name)),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(format!("filter '{}' values must be a list", name)),
            None => return Err(format!("filter '{}' is missing 'values'", name)),
        };

        if let Some(extra) = map.keys().find(|k| *k != "name" && *k != "values") {
            return Err(format!("filter has unknown key '{}'", extra));
        }

        Ok(Self { name, values })
    }

    pub fn to_value(&self) -> Value {
        Value::Map(
            [
                ("name".to_string(), Value::String(self.name.clone())),
                (
                    "values".to_string(),
                    Value::List(self.values.iter().cloned().map(Value::String).collect()),
                ),
            ]
            .into_iter()
            .collect(),
        )
    }
}

/// Schema type of a single filter block
pub fn filter_block_type() -> AttributeType {
    AttributeType::Custom {
        name: "Filter".to_string(),
        base: Box::new(AttributeType::Map(Box::new(AttributeType::String))),
        validate: |value| DataSourceFilter::from_value(value).map(|_| ()),
    }
}

/// Convert filter blocks into EC2 API filters, keeping their order
pub fn build_ec2_filters(filters: &[DataSourceFilter]) -> Vec<Filter> {
    filters
        .iter()
        .map(|f| {
            Filter::builder()
                .name(&f.name)
                .set_values(Some(f.values.clone()))
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn block(name: &str, values: &[&str]) -> Value {
        DataSourceFilter::new(name, values.iter().map(|v| v.to_string()).collect()).to_value()
    }

    #[test]
    fn from_value_binds_name_and_values() {
        let filter = DataSourceFilter::from_value(&block("transit-gateway-id", &["tgw-123"]))
            .unwrap();
        assert_eq!(filter.name, "transit-gateway-id");
        assert_eq!(filter.values, vec!["tgw-123".to_string()]);
    }

    #[test]
    fn from_value_rejects_malformed_blocks() {
        assert!(DataSourceFilter::from_value(&Value::String("x".to_string())).is_err());

        let mut missing_values = HashMap::new();
        missing_values.insert("name".to_string(), Value::String("state".to_string()));
        let err = DataSourceFilter::from_value(&Value::Map(missing_values)).unwrap_err();
        assert!(err.contains("missing 'values'"));

        let mut bad_value = HashMap::new();
        bad_value.insert("name".to_string(), Value::String("state".to_string()));
        bad_value.insert("values".to_string(), Value::List(vec![Value::Int(1)]));
        assert!(DataSourceFilter::from_value(&Value::Map(bad_value)).is_err());
    }

    #[test]
    fn filter_block_type_validates_structure() {
        let t = filter_block_type();
        assert!(t.validate(&block("state", &["available"])).is_ok());
        assert!(t.validate(&Value::Int(1)).is_err());

        let mut extra = HashMap::new();
        extra.insert("name".to_string(), Value::String("state".to_string()));
        extra.insert("values".to_string(), Value::List(vec![]));
        extra.insert("regex".to_string(), Value::String(".*".to_string()));
        assert!(t.validate(&Value::Map(extra)).is_err());
    }

    #[test]
    fn build_ec2_filters_keeps_order() {
        let filters = vec![
            DataSourceFilter::new("transit-gateway-id", vec!["tgw-123".to_string()]),
            DataSourceFilter::new(
                "state",
                vec!["available".to_string(), "pending".to_string()],
            ),
        ];
        let built = build_ec2_filters(&filters);
        assert_eq!(built.len(), 2);
        assert_eq!(built[0].name(), Some("transit-gateway-id"));
        assert_eq!(built[1].name(), Some("state"));
        assert_eq!(built[1].values(), &["available", "pending"]);
    }
}
