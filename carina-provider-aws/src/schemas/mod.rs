//! AWS data source schema definitions

pub mod transit_gateway;

use carina_core::schema::ResourceSchema;

/// Returns all AWS schemas
pub fn all_schemas() -> Vec<ResourceSchema> {
    let mut schemas = Vec::new();
    schemas.extend(transit_gateway::schemas());
    schemas
}
