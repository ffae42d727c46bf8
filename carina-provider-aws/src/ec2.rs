//! EC2 API access used by data sources
//!
//! Data sources talk to EC2 through [`TransitGatewayRouteTableApi`] so the
//! provider can be constructed with the real SDK client or with a stand-in.

use std::fmt;

use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Filter, Tag};
use carina_core::provider::BoxFuture;

/// Errors returned by the EC2 API
#[derive(Debug, thiserror::Error)]
pub enum Ec2Error {
    #[error("{operation} failed: {message}")]
    Api { operation: &'static str, message: String },
}

/// Input of `DescribeTransitGatewayRouteTables`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescribeTransitGatewayRouteTablesInput {
    pub transit_gateway_route_table_ids: Option<Vec<String>>,
    pub filters: Option<Vec<Filter>>,
}

impl fmt::Display for DescribeTransitGatewayRouteTablesInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        if let Some(ids) = &self.transit_gateway_route_table_ids {
            write!(f, " TransitGatewayRouteTableIds: {:?}", ids)?;
            first = false;
        }
        if let Some(filters) = &self.filters {
            if !first {
                write!(f, ",")?;
            }
            write!(f, " Filters: [")?;
            for (i, filter) in filters.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(
                    f,
                    "{{ Name: {:?}, Values: {:?} }}",
                    filter.name().unwrap_or_default(),
                    filter.values()
                )?;
            }
            write!(f, "]")?;
        }
        write!(f, " }}")
    }
}

/// A transit gateway route table as returned by EC2
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitGatewayRouteTableRecord {
    pub transit_gateway_route_table_id: Option<String>,
    pub transit_gateway_id: Option<String>,
    pub default_association_route_table: Option<bool>,
    pub default_propagation_route_table: Option<bool>,
    pub tags: Vec<Tag>,
}

impl From<&aws_sdk_ec2::types::TransitGatewayRouteTable> for TransitGatewayRouteTableRecord {
    fn from(rt: &aws_sdk_ec2::types::TransitGatewayRouteTable) -> Self {
        Self {
            transit_gateway_route_table_id: rt.transit_gateway_route_table_id().map(String::from),
            transit_gateway_id: rt.transit_gateway_id().map(String::from),
            default_association_route_table: rt.default_association_route_table(),
            default_propagation_route_table: rt.default_propagation_route_table(),
            tags: rt.tags().to_vec(),
        }
    }
}

/// Transit gateway route table queries
///
/// A slot in the returned list is `None` when the API returned an empty entry.
pub trait TransitGatewayRouteTableApi: Send + Sync {
    fn describe_transit_gateway_route_tables(
        &self,
        input: DescribeTransitGatewayRouteTablesInput,
    ) -> BoxFuture<'_, Result<Vec<Option<TransitGatewayRouteTableRecord>>, Ec2Error>>;
}

impl TransitGatewayRouteTableApi for Ec2Client {
    fn describe_transit_gateway_route_tables(
        &self,
        input: DescribeTransitGatewayRouteTablesInput,
    ) -> BoxFuture<'_, Result<Vec<Option<TransitGatewayRouteTableRecord>>, Ec2Error>> {
        Box::pin(async move {
            // Only the first page is considered
            let output = self
                .describe_transit_gateway_route_tables()
                .set_transit_gateway_route_table_ids(input.transit_gateway_route_table_ids)
                .set_filters(input.filters)
                .send()
                .await
                .map_err(|e| Ec2Error::Api {
                    operation: "DescribeTransitGatewayRouteTables",
                    message: DisplayErrorContext(e).to_string(),
                })?;

            Ok(output
                .transit_gateway_route_tables()
                .iter()
                .map(|rt| Some(TransitGatewayRouteTableRecord::from(rt)))
                .collect())
        })
    }
}
