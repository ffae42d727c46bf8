//! Tag normalization for values read back from AWS

use std::collections::HashMap;

use aws_sdk_ec2::types::Tag;
use carina_core::resource::Value;

use crate::config::IgnoreTagsConfig;

/// Prefix reserved by AWS for system tags (e.g., "aws:cloudformation:stack-name")
pub const AWS_TAG_KEY_PREFIX: &str = "aws:";

/// Key/value tags of a single AWS resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValueTags(HashMap<String, String>);

impl KeyValueTags {
    /// Build from an EC2 tag list
    ///
    /// Tags without a key are skipped; a missing value becomes "".
    pub fn from_ec2(tags: &[Tag]) -> Self {
        Self(
            tags.iter()
                .filter_map(|t| {
                    t.key()
                        .map(|k| (k.to_string(), t.value().unwrap_or_default().to_string()))
                })
                .collect(),
        )
    }

    /// Remove tags whose key starts with the AWS reserved prefix
    pub fn ignore_aws(self) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|(k, _)| !k.starts_with(AWS_TAG_KEY_PREFIX))
                .collect(),
        )
    }

    /// Remove tags the provider configuration asks to ignore
    pub fn ignore_config(self, config: &IgnoreTagsConfig) -> Self {
        Self(
            self.0
                .into_iter()
                .filter(|(k, _)| !config.is_ignored(k))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Map(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}
