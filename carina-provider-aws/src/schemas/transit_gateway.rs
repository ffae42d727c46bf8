//! Transit gateway data source schema definitions

use carina_core::resource::Value;
use carina_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::filters::filter_block_type;
use crate::transit_gateway_route_table::RESOURCE_TYPE;

/// Returns the schema for the transit gateway route table data source
///
/// Based on the EC2 DescribeTransitGatewayRouteTables API.
/// See: https://docs.aws.amazon.com/AWSEC2/latest/APIReference/API_DescribeTransitGatewayRouteTables.html
pub fn transit_gateway_route_table_schema() -> ResourceSchema {
    ResourceSchema::new(RESOURCE_TYPE)
        .with_description("Looks up an EC2 Transit Gateway Route Table")
        // ========== Arguments ==========
        .attribute(
            AttributeSchema::new("index", types::non_negative_int())
                .with_default(Value::Int(0))
                .with_description("Zero-based position of the route table to select"),
        )
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .with_description("Identifier of the route table to look up"),
        )
        .attribute(
            AttributeSchema::new("filter", AttributeType::List(Box::new(filter_block_type())))
                .with_description("EC2 filters passed to DescribeTransitGatewayRouteTables"),
        )
        // ========== Computed ==========
        .attribute(
            AttributeSchema::new("index_last", AttributeType::Int)
                .computed()
                .with_description("Number of route tables matched by the query"),
        )
        .attribute(
            AttributeSchema::new("default_association_route_table", AttributeType::Bool)
                .computed()
                .with_description("Whether this is the default association route table"),
        )
        .attribute(
            AttributeSchema::new("default_propagation_route_table", AttributeType::Bool)
                .computed()
                .with_description("Whether this is the default propagation route table"),
        )
        .attribute(
            AttributeSchema::new("transit_gateway_id", AttributeType::String)
                .computed()
                .with_description("Identifier of the owning transit gateway"),
        )
        .attribute(AttributeSchema::new("tags", types::string_map()).computed())
}

/// Returns all transit gateway schemas
pub fn schemas() -> Vec<ResourceSchema> {
    vec![transit_gateway_route_table_schema()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_not_computed() {
        let schema = transit_gateway_route_table_schema();
        for name in ["index", "id", "filter"] {
            assert!(!schema.attributes[name].computed, "{} should be configurable", name);
        }
        for name in [
            "index_last",
            "default_association_route_table",
            "default_propagation_route_table",
            "transit_gateway_id",
            "tags",
        ] {
            assert!(schema.attributes[name].computed, "{} should be computed", name);
        }
    }

    #[test]
    fn index_defaults_to_zero() {
        let schema = transit_gateway_route_table_schema();
        assert_eq!(schema.attributes["index"].default, Some(Value::Int(0)));
    }
}
