//! `ec2_transit_gateway_route_table` data source
//!
//! Looks up transit gateway route tables with `DescribeTransitGatewayRouteTables`
//! and exposes the one at `index`:
//!
//! ```text
//! let rtb = read aws.ec2_transit_gateway_route_table {
//!   index  = 1
//!   filter = [{ name = "transit-gateway-id", values = ["tgw-123"] }]
//! }
//! ```

use std::collections::HashMap;

use carina_core::provider::{ProviderError, ResourceType};
use carina_core::resource::{ResourceId, State, Value};
use carina_core::schema::ResourceSchema;

use crate::config::IgnoreTagsConfig;
use crate::ec2::{
    DescribeTransitGatewayRouteTablesInput, Ec2Error, TransitGatewayRouteTableApi,
    TransitGatewayRouteTableRecord,
};
use crate::filters::{DataSourceFilter, build_ec2_filters};
use crate::schemas::transit_gateway;
use crate::tags::KeyValueTags;

pub const RESOURCE_TYPE: &str = "ec2_transit_gateway_route_table";

/// Transit gateway route table data source type
pub struct TransitGatewayRouteTableType;

impl ResourceType for TransitGatewayRouteTableType {
    fn name(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        transit_gateway::transit_gateway_route_table_schema()
    }
}

/// Errors reading the data source
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("error reading EC2 Transit Gateway Route Table: {source}")]
    Query {
        #[source]
        source: Ec2Error,
    },

    #[error("error reading EC2 Transit Gateway Route Table: no results found")]
    EmptyResult,

    #[error("Index out of range: index {index}, {len} result(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("error reading EC2 Transit Gateway Route Table: empty result")]
    EmptyRecord,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<LookupError> for ProviderError {
    fn from(err: LookupError) -> Self {
        let message = err.to_string();
        match err {
            LookupError::Query { source } => ProviderError::new(message).with_cause(source),
            _ => ProviderError::new(message),
        }
    }
}

/// Configured arguments of the data source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitGatewayRouteTableQuery {
    /// Zero-based position in the query result
    pub index: usize,
    /// Restrict the query to this route table
    pub id: Option<String>,
    pub filters: Vec<DataSourceFilter>,
}

impl TransitGatewayRouteTableQuery {
    /// Validate configured attributes against the schema and bind them
    pub fn from_attributes(attributes: &HashMap<String, Value>) -> Result<Self, LookupError> {
        let schema = transit_gateway::transit_gateway_route_table_schema();
        schema.validate(attributes).map_err(|errors| {
            LookupError::InvalidConfig(
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;
        let attributes = schema.apply_defaults(attributes);

        let index = match attributes.get("index") {
            Some(Value::Int(n)) => usize::try_from(*n)
                .map_err(|_| LookupError::InvalidConfig(format!("index must not be negative, got {}", n)))?,
            _ => 0,
        };

        let id = match attributes.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        let filters = match attributes.get("filter") {
            Some(Value::List(blocks)) => blocks
                .iter()
                .map(DataSourceFilter::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map_err(LookupError::InvalidConfig)?,
            _ => Vec::new(),
        };

        Ok(Self { index, id, filters })
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_filter(mut self, filter: DataSourceFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// API input for this query
    pub fn to_input(&self) -> DescribeTransitGatewayRouteTablesInput {
        DescribeTransitGatewayRouteTablesInput {
            transit_gateway_route_table_ids: self.id.as_ref().map(|id| vec![id.clone()]),
            filters: if self.filters.is_empty() {
                None
            } else {
                Some(build_ec2_filters(&self.filters))
            },
        }
    }
}

/// The selected transit gateway route table
#[derive(Debug, Clone, PartialEq)]
pub struct TransitGatewayRouteTable {
    pub id: String,
    pub default_association_route_table: bool,
    pub default_propagation_route_table: bool,
    pub transit_gateway_id: String,
    pub tags: HashMap<String, String>,
    /// Number of route tables the query returned
    pub index_last: usize,
}

impl TransitGatewayRouteTable {
    fn from_record(
        record: &TransitGatewayRouteTableRecord,
        ignore_tags: &IgnoreTagsConfig,
        index_last: usize,
    ) -> Self {
        Self {
            id: record
                .transit_gateway_route_table_id
                .clone()
                .unwrap_or_default(),
            default_association_route_table: record
                .default_association_route_table
                .unwrap_or(false),
            default_propagation_route_table: record
                .default_propagation_route_table
                .unwrap_or(false),
            transit_gateway_id: record.transit_gateway_id.clone().unwrap_or_default(),
            tags: KeyValueTags::from_ec2(&record.tags)
                .ignore_aws()
                .ignore_config(ignore_tags)
                .into_map(),
            index_last,
        }
    }

    /// Project into a State, echoing the configured arguments
    pub fn into_state(self, id: ResourceId, query: &TransitGatewayRouteTableQuery) -> State {
        let mut attributes = HashMap::new();
        attributes.insert("id".to_string(), Value::String(self.id.clone()));
        attributes.insert("index".to_string(), Value::Int(query.index as i64));
        attributes.insert("index_last".to_string(), Value::Int(self.index_last as i64));
        attributes.insert(
            "default_association_route_table".to_string(),
            Value::Bool(self.default_association_route_table),
        );
        attributes.insert(
            "default_propagation_route_table".to_string(),
            Value::Bool(self.default_propagation_route_table),
        );
        attributes.insert(
            "transit_gateway_id".to_string(),
            Value::String(self.transit_gateway_id),
        );
        attributes.insert(
            "tags".to_string(),
            Value::Map(
                self.tags
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            ),
        );
        if !query.filters.is_empty() {
            attributes.insert(
                "filter".to_string(),
                Value::List(query.filters.iter().map(DataSourceFilter::to_value).collect()),
            );
        }

        State::existing(id, attributes).with_identifier(self.id)
    }
}

/// Query EC2 once and select the route table at `query.index`
///
/// `index == len` passes the range check and then fails as
/// [`LookupError::EmptyRecord`], matching the existing behavior of this data source.
pub async fn lookup(
    client: &dyn TransitGatewayRouteTableApi,
    ignore_tags: &IgnoreTagsConfig,
    query: &TransitGatewayRouteTableQuery,
) -> Result<TransitGatewayRouteTable, LookupError> {
    let input = query.to_input();

    log::debug!("Reading EC2 Transit Gateway Route Tables: {}", input);
    let records = client
        .describe_transit_gateway_route_tables(input)
        .await
        .map_err(|source| LookupError::Query { source })?;

    if records.is_empty() {
        return Err(LookupError::EmptyResult);
    }

    if query.index > records.len() {
        return Err(LookupError::IndexOutOfRange {
            index: query.index,
            len: records.len(),
        });
    }

    let Some(Some(record)) = records.get(query.index) else {
        return Err(LookupError::EmptyRecord);
    };

    Ok(TransitGatewayRouteTable::from_record(
        record,
        ignore_tags,
        records.len(),
    ))
}
