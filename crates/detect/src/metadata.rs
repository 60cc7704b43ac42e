//! Value meta-data for documentation and reflection.
//!
//! Meta-data is a detached copy of dataset records; nothing here is
//! consulted while detecting.

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, ValueEntity};
use crate::error::DetectError;
use crate::types::ValueType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueMetaData {
    pub property: String,
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub category: String,
    pub generic_type: ValueType,
}

/// Builds [`ValueMetaData`] from dataset records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueMetaDataBuilder;

impl ValueMetaDataBuilder {
    /// Copy the meta-data of `value`, taking category and type from the
    /// property that owns it.
    pub fn build(dataset: &Dataset, value: &ValueEntity) -> Result<ValueMetaData, DetectError> {
        let property = dataset
            .property(&value.property)
            .ok_or_else(|| DetectError::UnknownProperty(value.property.clone()))?;
        Ok(ValueMetaData {
            property: property.name.clone(),
            name: value.name.clone(),
            description: value.description.clone().unwrap_or_default(),
            url: value.url.clone(),
            category: property.category.clone(),
            generic_type: property.value_type,
        })
    }

    /// Meta-data for every declared value of `property`.
    pub fn build_all(dataset: &Dataset, property: &str) -> Result<Vec<ValueMetaData>, DetectError> {
        if dataset.property(property).is_none() {
            return Err(DetectError::UnknownProperty(property.to_string()));
        }
        dataset
            .values_of(property)
            .map(|value| Self::build(dataset, value))
            .collect()
    }
}
