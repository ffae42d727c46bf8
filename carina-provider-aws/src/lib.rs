//! Carina AWS Provider
//!
//! AWS Provider implementation
//!
//! ## Module Structure
//!
//! - `config` - Provider configuration (region, endpoint, ignored tags)
//! - `ec2` - EC2 API seam used by data sources
//! - `filters` - `filter` blocks shared by EC2 data sources
//! - `schemas` - Data source schemas
//! - `tags` - Tag normalization
//! - `transit_gateway_route_table` - `ec2_transit_gateway_route_table` data source

pub mod config;
pub mod ec2;
pub mod filters;
pub mod schemas;
pub mod tags;
pub mod transit_gateway_route_table;

use std::sync::Arc;

use aws_config::Region;
use aws_sdk_ec2::Client as Ec2Client;
use carina_core::provider::{BoxFuture, Provider, ProviderError, ProviderResult, ResourceType};
use carina_core::resource::{Resource, State};

pub use config::{AwsProviderConfig, IgnoreTagsConfig};
use ec2::TransitGatewayRouteTableApi;
use transit_gateway_route_table::{TransitGatewayRouteTableQuery, TransitGatewayRouteTableType};

/// AWS Provider
pub struct AwsProvider {
    ec2_client: Arc<dyn TransitGatewayRouteTableApi>,
    config: AwsProviderConfig,
}

impl AwsProvider {
    /// Create a new AWS Provider
    pub async fn new(config: AwsProviderConfig) -> Self {
        let region = config.aws_region();
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.clone()));
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;

        log::info!("AWS provider configured for region {}", region);

        Self {
            ec2_client: Arc::new(Ec2Client::new(&sdk_config)),
            config,
        }
    }

    /// Create with a specific EC2 client (for testing)
    pub fn with_client(
        ec2_client: Arc<dyn TransitGatewayRouteTableApi>,
        config: AwsProviderConfig,
    ) -> Self {
        Self { ec2_client, config }
    }

    pub fn config(&self) -> &AwsProviderConfig {
        &self.config
    }

    /// Read an EC2 Transit Gateway Route Table data source
    async fn read_ec2_transit_gateway_route_table(
        &self,
        resource: Resource,
    ) -> ProviderResult<State> {
        let query = TransitGatewayRouteTableQuery::from_attributes(&resource.attributes)
            .map_err(|e| ProviderError::from(e).for_resource(resource.id.clone()))?;

        let route_table = transit_gateway_route_table::lookup(
            self.ec2_client.as_ref(),
            &self.config.ignore_tags,
            &query,
        )
        .await
        .map_err(|e| ProviderError::from(e).for_resource(resource.id.clone()))?;

        Ok(route_table.into_state(resource.id, &query))
    }
}

impl Provider for AwsProvider {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn data_source_types(&self) -> Vec<Box<dyn ResourceType>> {
        vec![Box::new(TransitGatewayRouteTableType)]
    }

    fn read_data_source(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move {
            if !resource.is_data_source() {
                return Err(ProviderError::new(format!(
                    "{} is not a data source",
                    resource.id.resource_type
                ))
                .for_resource(resource.id.clone()));
            }
            match resource.id.resource_type.as_str() {
                transit_gateway_route_table::RESOURCE_TYPE => {
                    self.read_ec2_transit_gateway_route_table(resource).await
                }
                _ => Err(ProviderError::new(format!(
                    "Unknown data source type: {}",
                    resource.id.resource_type
                ))
                .for_resource(resource.id.clone())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use carina_core::resource::Value;

    use super::*;
    use crate::filters::DataSourceFilter;
    use crate::transit_gateway_route_table::RESOURCE_TYPE;
    use crate::transit_gateway_route_table::tests::{MockApi, main_route_table, record};

    fn provider(api: MockApi) -> AwsProvider {
        AwsProvider::with_client(Arc::new(api), AwsProviderConfig::default())
    }

    #[test]
    fn test_data_source_type_name() {
        let provider = provider(MockApi::returning(vec![]));
        let names: Vec<_> = provider
            .data_source_types()
            .iter()
            .map(|t| t.name())
            .collect();
        assert_eq!(names, vec!["ec2_transit_gateway_route_table"]);
        assert_eq!(provider.name(), "aws");
    }

    #[tokio::test]
    async fn reads_selected_route_table() {
        let provider = provider(MockApi::returning(vec![
            Some(record("tgw-rtb-1")),
            Some(main_route_table()),
        ]));
        let resource = Resource::data_source(RESOURCE_TYPE, "main")
            .with_attribute("index", Value::Int(1))
            .with_attribute(
                "filter",
                Value::List(vec![
                    DataSourceFilter::new("transit-gateway-id", vec!["tgw-123".to_string()])
                        .to_value(),
                ]),
            );

        let state = provider.read_data_source(&resource).await.unwrap();

        assert_eq!(state.identifier.as_deref(), Some("tgw-rtb-2"));
        assert_eq!(
            state.attributes["default_association_route_table"],
            Value::Bool(true)
        );
        assert_eq!(
            state.attributes["transit_gateway_id"],
            Value::String("tgw-123".to_string())
        );
        assert_eq!(state.attributes["index_last"], Value::Int(2));
    }

    #[tokio::test]
    async fn applies_configured_ignore_tags() {
        let config = AwsProviderConfig::default().with_ignore_tags(IgnoreTagsConfig {
            keys: vec!["Name".to_string()],
            key_prefixes: vec![],
        });
        let provider = AwsProvider::with_client(
            Arc::new(MockApi::returning(vec![Some(main_route_table())])),
            config,
        );

        let state = provider
            .read_data_source(&Resource::data_source(RESOURCE_TYPE, "main"))
            .await
            .unwrap();

        assert_eq!(state.attributes["tags"], Value::Map(Default::default()));
    }

    #[tokio::test]
    async fn errors_carry_resource_id() {
        let provider = provider(MockApi::returning(vec![]));
        let err = provider
            .read_data_source(&Resource::data_source(RESOURCE_TYPE, "missing"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "[ec2_transit_gateway_route_table.missing] error reading EC2 Transit Gateway Route Table: no results found"
        );
    }

    #[tokio::test]
    async fn invalid_configuration_is_rejected_before_querying() {
        let api = Arc::new(MockApi::returning(vec![Some(main_route_table())]));
        let provider = AwsProvider::with_client(api.clone(), AwsProviderConfig::default());
        let resource = Resource::data_source(RESOURCE_TYPE, "main")
            .with_attribute("index", Value::String("first".to_string()));

        assert!(provider.read_data_source(&resource).await.is_err());
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_managed_resources_and_unknown_types() {
        let provider = provider(MockApi::returning(vec![Some(main_route_table())]));

        let managed = Resource::new(RESOURCE_TYPE, "main");
        assert!(provider.read_data_source(&managed).await.is_err());

        let unknown = Resource::data_source("ec2_vpc", "main");
        let err = provider.read_data_source(&unknown).await.unwrap_err();
        assert!(err.message.contains("Unknown data source type"));
    }
}
