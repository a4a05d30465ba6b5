//! Coffee catalog entities and their input types.

use std::collections::HashSet;

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Flavor tag attached to coffees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct Flavor {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "chocolate")]
    pub name: String,
}

/// Coffee domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, SimpleObject)]
pub struct Coffee {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Shipwreck Roast")]
    pub name: String,
    #[schema(example = "Buddy Brew")]
    pub brand: String,
    pub flavors: Vec<Flavor>,
}

impl Coffee {
    /// Names of the attached flavors, in stored order
    pub fn flavor_names(&self) -> Vec<String> {
        self.flavors.iter().map(|f| f.name.clone()).collect()
    }
}

/// Trim names, drop blanks and keep the first occurrence of each.
pub fn normalize_flavor_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect()
}

fn not_blank(value: &str, code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(code).with_message(message.into()));
    }
    Ok(())
}

fn name_not_blank(name: &str) -> Result<(), ValidationError> {
    not_blank(name, "blank_name", "name should not be empty")
}

fn brand_not_blank(brand: &str) -> Result<(), ValidationError> {
    not_blank(brand, "blank_brand", "brand should not be empty")
}

#[allow(clippy::ptr_arg)]
fn flavor_names_not_blank(flavors: &Vec<String>) -> Result<(), ValidationError> {
    if flavors.iter().any(|f| f.trim().is_empty()) {
        return Err(ValidationError::new("blank_flavor")
            .with_message("each value in flavors must be a non-empty string".into()));
    }
    Ok(())
}

/// Coffee creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, InputObject)]
#[serde(deny_unknown_fields)]
#[graphql(name = "CreateCoffeeInput")]
pub struct CreateCoffee {
    /// Coffee name
    #[validate(custom(function = "name_not_blank"))]
    #[schema(example = "Shipwreck Roast")]
    pub name: String,
    /// Roaster or brand
    #[validate(custom(function = "brand_not_blank"))]
    #[schema(example = "Buddy Brew")]
    pub brand: String,
    /// Flavor names; unknown ones are created
    #[validate(custom(function = "flavor_names_not_blank"))]
    #[schema(example = json!(["chocolate", "vanilla"]))]
    pub flavors: Vec<String>,
}

/// Coffee partial update data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, InputObject)]
#[serde(deny_unknown_fields)]
#[graphql(name = "UpdateCoffeeInput")]
pub struct UpdateCoffee {
    #[validate(custom(function = "name_not_blank"))]
    #[schema(example = "Shipwreck Roast")]
    pub name: Option<String>,
    #[validate(custom(function = "brand_not_blank"))]
    #[schema(example = "Buddy Brew")]
    pub brand: Option<String>,
    /// Flavor names merged into the existing set
    #[validate(custom(function = "flavor_names_not_blank"))]
    #[schema(example = json!(["caramel"]))]
    pub flavors: Option<Vec<String>>,
}

/// Resolved changes handed to persistence.
///
/// `flavors` only ever adds: each name is linked unless already attached,
/// and existing links are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoffeeChanges {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub flavors: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee(flavors: &[&str]) -> Coffee {
        Coffee {
            id: 1,
            name: "Shipwreck Roast".to_string(),
            brand: "Buddy Brew".to_string(),
            flavors: flavors
                .iter()
                .enumerate()
                .map(|(i, name)| Flavor {
                    id: i as i32 + 1,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn normalize_trims_and_deduplicates_in_order() {
        let result = normalize_flavor_names(["vanilla", " chocolate ", "vanilla", "", "  "]);
        assert_eq!(result, names(&["vanilla", "chocolate"]));
    }

    #[test]
    fn flavor_names_follow_stored_order() {
        let c = coffee(&["chocolate", "vanilla"]);
        assert_eq!(c.flavor_names(), names(&["chocolate", "vanilla"]));
    }

    #[test]
    fn create_input_rejects_blank_values() {
        let input = CreateCoffee {
            name: String::new(),
            brand: "Brand".to_string(),
            flavors: names(&["ok", " "]),
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("flavors"));
        assert!(!fields.contains_key("brand"));
    }

    #[test]
    fn whitespace_only_name_and_brand_are_blank() {
        let input = CreateCoffee {
            name: "   ".to_string(),
            brand: "\t".to_string(),
            flavors: vec![],
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("brand"));

        let patch = UpdateCoffee {
            brand: Some(" \n ".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().unwrap_err().field_errors().contains_key("brand"));
    }

    #[test]
    fn update_input_allows_empty_patch() {
        assert!(UpdateCoffee::default().validate().is_ok());
    }

    #[test]
    fn create_input_rejects_unknown_fields() {
        let json = r#"{"name":"a","brand":"b","flavors":[],"isAdmin":true}"#;
        assert!(serde_json::from_str::<CreateCoffee>(json).is_err());
    }
}
