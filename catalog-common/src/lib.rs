//! Common types and utilities shared between catalog-client, catalog-cli and catalog-ui

pub mod columns;
pub mod forms;
pub mod payload;
pub mod query;
pub mod routes;
pub mod validation;

use serde::{Deserialize, Serialize};

/// Backend record identifier
pub type EntityId = i64;

/// The three record types managed by the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Expert,
    Service,
    Price,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Expert, EntityKind::Service, EntityKind::Price];

    /// REST collection path on the backend
    pub fn api_path(&self) -> &'static str {
        match self {
            Self::Expert => "/expert",
            Self::Service => "/service",
            Self::Price => "/price",
        }
    }

    /// Dashboard list page
    pub fn page_path(&self) -> &'static str {
        match self {
            Self::Expert => routes::paths::EXPERTS,
            Self::Service => routes::paths::SERVICES,
            Self::Price => routes::paths::PRICES,
        }
    }

    /// Client cache key root
    pub fn cache_key(&self) -> &'static str {
        match self {
            Self::Expert => "experts",
            Self::Service => "services",
            Self::Price => "prices",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Self::Expert => "Expert",
            Self::Service => "Service",
            Self::Price => "Price",
        }
    }

    /// Page title shown above the list
    pub fn title(&self) -> &'static str {
        match self {
            Self::Expert => "Специалисты",
            Self::Service => "Услуги",
            Self::Price => "Цены",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expert => write!(f, "expert"),
            Self::Service => write!(f, "service"),
            Self::Price => write!(f, "price"),
        }
    }
}

/// A backend-managed record
pub trait Entity: Clone + Serialize + serde::de::DeserializeOwned + 'static {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Human readable label used in notifications and select options
    fn label(&self) -> String;
}

/// Entities the backend can also look up by slug
pub trait SlugAddressable: Entity {
    fn slug(&self) -> &str;
}

/// Staff profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_in_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    /// Full service records on read; writes send identifiers instead
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Expert {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Expert {
    const KIND: EntityKind = EntityKind::Expert;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.full_name()
    }
}

impl SlugAddressable for Expert {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Catalog offering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub slug: String,
    /// Toggled server-side
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_text: Option<String>,
}

impl Entity for Service {
    const KIND: EntityKind = EntityKind::Service;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl SlugAddressable for Service {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Price-list item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: EntityId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
}

impl Entity for Price {
    const KIND: EntityKind = EntityKind::Price;

    fn id(&self) -> EntityId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// Label/value pair backing the multi-select inputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn from_entity<E: Entity>(entity: &E) -> Self {
        Self {
            label: entity.label(),
            value: entity.id().to_string(),
        }
    }

    pub fn from_entities<E: Entity>(entities: &[E]) -> Vec<Self> {
        entities.iter().map(Self::from_entity).collect()
    }
}

/// Join a static-asset base URL and a stored filename
pub fn asset_url(base: &str, filename: &str) -> String {
    if filename.starts_with("http://") || filename.starts_with("https://") {
        return filename.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        filename.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expert_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "id": 7,
            "firstName": "Anna",
            "lastName": "Petrova",
            "slug": "anna-petrova",
            "experienceInYears": 12
        }"#;

        let expert: Expert = serde_json::from_str(json).unwrap();
        assert_eq!(expert.id, 7);
        assert_eq!(expert.first_name, "Anna");
        assert_eq!(expert.experience_in_years, Some(12));
        assert!(expert.middle_name.is_none());
        assert!(expert.tags.is_empty());
        assert!(expert.services.is_empty());
    }

    #[test]
    fn test_expert_read_carries_full_services() {
        let json = r#"{
            "id": 1,
            "firstName": "Ivan",
            "lastName": "Ivanov",
            "slug": "ivan",
            "services": [{"id": 3, "name": "Massage", "slug": "massage", "published": true}]
        }"#;

        let expert: Expert = serde_json::from_str(json).unwrap();
        assert_eq!(expert.services.len(), 1);
        assert_eq!(expert.services[0].name, "Massage");
        assert!(expert.services[0].published);
    }

    #[test]
    fn test_price_serialization_skips_missing_old_price() {
        let price = Price {
            id: 2,
            name: "Consultation".to_string(),
            price: 1500.0,
            old_price: None,
        };

        let value = serde_json::to_value(&price).unwrap();
        assert_eq!(value["price"], 1500.0);
        assert!(value.get("oldPrice").is_none());
    }

    #[test]
    fn test_entity_kind_paths() {
        assert_eq!(EntityKind::Expert.api_path(), "/expert");
        assert_eq!(EntityKind::Service.page_path(), "/services");
        assert_eq!(EntityKind::Price.cache_key(), "prices");
    }

    #[test]
    fn test_select_options_from_experts() {
        let experts = vec![Expert {
            id: 4,
            first_name: "Olga".to_string(),
            last_name: "Smirnova".to_string(),
            middle_name: None,
            photo: None,
            slug: "olga".to_string(),
            experience_in_years: None,
            rank: None,
            tags: vec![],
            specializations: vec![],
            services: vec![],
        }];

        let options = SelectOption::from_entities(&experts);
        assert_eq!(
            options,
            vec![SelectOption {
                label: "Olga Smirnova".to_string(),
                value: "4".to_string(),
            }]
        );
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(
            asset_url("http://localhost:4200/static/", "/photo.png"),
            "http://localhost:4200/static/photo.png"
        );
        assert_eq!(
            asset_url("http://cdn", "https://elsewhere/icon.svg"),
            "https://elsewhere/icon.svg"
        );
    }
}
