use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use carina_core::provider::Provider;
use carina_core::resource::{Resource, State, Value};
use carina_core::schema::ResourceSchema;
use carina_provider_aws::filters::DataSourceFilter;
use carina_provider_aws::{AwsProvider, AwsProviderConfig};

#[derive(Parser)]
#[command(name = "carina")]
#[command(about = "A functional infrastructure management tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a data source and print its attributes
    Data {
        /// Data source type (e.g., ec2_transit_gateway_route_table)
        data_source: String,

        /// Binding name used in output and error messages
        #[arg(long, default_value = "this")]
        name: String,

        /// Provider configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// AWS region (overrides the config file)
        #[arg(long)]
        region: Option<String>,

        /// Endpoint URL override (e.g., LocalStack)
        #[arg(long)]
        endpoint_url: Option<String>,

        /// Identifier to look up
        #[arg(long)]
        id: Option<String>,

        /// Zero-based position in the query result
        #[arg(long)]
        index: Option<i64>,

        /// Filter as name=value1,value2 (repeatable)
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<DataSourceFilter>,

        /// Tag key to ignore (repeatable)
        #[arg(long = "ignore-tag-key")]
        ignore_tag_keys: Vec<String>,

        /// Tag key prefix to ignore (repeatable)
        #[arg(long = "ignore-tag-key-prefix")]
        ignore_tag_key_prefixes: Vec<String>,

        /// Print attributes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the schema of a data source
    Schema {
        /// Data source type (e.g., ec2_transit_gateway_route_table)
        data_source: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Data {
            data_source,
            name,
            config,
            region,
            endpoint_url,
            id,
            index,
            filters,
            ignore_tag_keys,
            ignore_tag_key_prefixes,
            json,
        } => {
            let options = DataOptions {
                data_source,
                name,
                id,
                index,
                filters,
            };
            match load_config(
                config,
                region,
                endpoint_url,
                ignore_tag_keys,
                ignore_tag_key_prefixes,
            ) {
                Ok(config) => run_data(options, config, json).await,
                Err(e) => Err(e),
            }
        }
        Commands::Schema { data_source } => run_schema(&data_source),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Lookup arguments given on the command line
struct DataOptions {
    data_source: String,
    name: String,
    id: Option<String>,
    index: Option<i64>,
    filters: Vec<DataSourceFilter>,
}

impl DataOptions {
    fn to_resource(&self) -> Resource {
        let mut resource = Resource::data_source(&self.data_source, &self.name);
        if let Some(id) = &self.id {
            resource = resource.with_attribute("id", Value::String(id.clone()));
        }
        if let Some(index) = self.index {
            resource = resource.with_attribute("index", Value::Int(index));
        }
        if !self.filters.is_empty() {
            resource = resource.with_attribute(
                "filter",
                Value::List(self.filters.iter().map(DataSourceFilter::to_value).collect()),
            );
        }
        resource
    }
}

/// Parse `name=value1,value2` into a filter
fn parse_filter(s: &str) -> Result<DataSourceFilter, String> {
    let (name, values) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{}': expected name=value1,value2", s))?;
    if name.is_empty() {
        return Err(format!("invalid filter '{}': name is empty", s));
    }
    let values = values
        .split(',')
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();
    Ok(DataSourceFilter::new(name, values))
}

/// Load the provider configuration file (if any) and apply command line overrides
fn load_config(
    path: Option<PathBuf>,
    region: Option<String>,
    endpoint_url: Option<String>,
    ignore_tag_keys: Vec<String>,
    ignore_tag_key_prefixes: Vec<String>,
) -> Result<AwsProviderConfig, String> {
    let mut config = match path {
        Some(path) => AwsProviderConfig::from_file(&path).map_err(|e| e.to_string())?,
        None => AwsProviderConfig::default(),
    };
    if let Some(region) = region {
        config.region = region;
    }
    if let Some(endpoint_url) = endpoint_url {
        config = config.with_endpoint_url(endpoint_url);
    }
    config.ignore_tags.keys.extend(ignore_tag_keys);
    config.ignore_tags.key_prefixes.extend(ignore_tag_key_prefixes);
    Ok(config)
}

async fn run_data(
    options: DataOptions,
    config: AwsProviderConfig,
    json: bool,
) -> Result<(), String> {
    if !json {
        println!(
            "{}",
            format!("Using AWS provider (region: {})", config.aws_region()).cyan()
        );
    }
    let provider = AwsProvider::new(config).await;

    let resource = options.to_resource();
    log::debug!("Reading data source {}", resource.id);
    let state = provider
        .read_data_source(&resource)
        .await
        .map_err(|e| e.to_string())?;

    if json {
        println!("{}", state_to_json(&state));
    } else {
        print_state(&state);
    }
    Ok(())
}

fn run_schema(data_source: &str) -> Result<(), String> {
    let schema = carina_provider_aws::schemas::all_schemas()
        .into_iter()
        .find(|s| s.resource_type == data_source)
        .ok_or_else(|| format!("Unknown data source type: {}", data_source))?;
    print_schema(&schema);
    Ok(())
}

fn state_to_json(state: &State) -> serde_json::Value {
    Value::Map(state.attributes.clone()).to_json()
}

fn print_state(state: &State) {
    println!(
        "{} {}",
        "Read".green().bold(),
        format!("{}", state.id).bold()
    );
    let mut keys: Vec<&String> = state.attributes.keys().collect();
    keys.sort();
    let width = keys.iter().map(|k| k.len()).max().unwrap_or(0);
    for key in keys {
        println!(
            "  {:width$} = {}",
            key,
            format_value(&state.attributes[key]),
            width = width
        );
    }
}

fn print_schema(schema: &ResourceSchema) {
    println!("{}", schema.resource_type.cyan().bold());
    if let Some(desc) = &schema.description {
        println!("  {}", desc);
    }
    let mut attrs: Vec<_> = schema.attributes.values().collect();
    attrs.sort_by(|a, b| (a.computed, &a.name).cmp(&(b.computed, &b.name)));
    for attr in attrs {
        let kind = if attr.computed {
            "computed".yellow()
        } else if attr.required {
            "required".red()
        } else {
            "optional".normal()
        };
        println!(
            "  {} ({}, {}){}",
            attr.name.bold(),
            attr.attr_type,
            kind,
            attr.description
                .as_ref()
                .map(|d| format!(" - {}", d))
                .unwrap_or_default()
        );
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => {
            let strs: Vec<_> = items.iter().map(format_value).collect();
            format!("[{}]", strs.join(", "))
        }
        Value::Map(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let strs: Vec<_> = keys
                .into_iter()
                .map(|k| format!("{} = {}", k, format_value(&map[k])))
                .collect();
            format!("{{{}}}", strs.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn parse_filter_splits_values() {
        let filter = parse_filter("transit-gateway-id=tgw-1,tgw-2").unwrap();
        assert_eq!(filter.name, "transit-gateway-id");
        assert_eq!(filter.values, vec!["tgw-1".to_string(), "tgw-2".to_string()]);
    }

    #[test]
    fn parse_filter_rejects_missing_separator() {
        assert!(parse_filter("transit-gateway-id").is_err());
        assert!(parse_filter("=tgw-1").is_err());
    }

    #[test]
    fn options_build_data_source() {
        let options = DataOptions {
            data_source: "ec2_transit_gateway_route_table".to_string(),
            name: "main".to_string(),
            id: None,
            index: Some(1),
            filters: vec![parse_filter("transit-gateway-id=tgw-123").unwrap()],
        };
        let resource = options.to_resource();
        assert!(resource.is_data_source());
        assert_eq!(resource.attributes["index"], Value::Int(1));
        assert!(!resource.attributes.contains_key("id"));
        assert!(matches!(&resource.attributes["filter"], Value::List(b) if b.len() == 1));
    }

    #[test]
    fn flags_override_config() {
        let config = load_config(
            None,
            Some("us-west-2".to_string()),
            None,
            vec!["CostCenter".to_string()],
            vec!["kubernetes.io/".to_string()],
        )
        .unwrap();
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.ignore_tags.keys, vec!["CostCenter".to_string()]);
        assert_eq!(
            config.ignore_tags.key_prefixes,
            vec!["kubernetes.io/".to_string()]
        );
    }

    #[test]
    fn format_value_sorts_map_keys() {
        let mut map = HashMap::new();
        map.insert("b".to_string(), Value::Int(1));
        map.insert("a".to_string(), Value::String("x".to_string()));
        assert_eq!(format_value(&Value::Map(map)), "{a = \"x\", b = 1}");
    }

    #[test]
    fn schema_command_knows_route_tables() {
        assert!(run_schema("ec2_transit_gateway_route_table").is_ok());
        assert!(run_schema("ec2_vpc").is_err());
    }
}
