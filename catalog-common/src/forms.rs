//! Create and update forms for every entity
//!
//! Each form holds the raw text the user typed. `validate` checks it against
//! the field rules and yields a typed submission that knows how to turn itself
//! into the request body the backend expects.

use crate::payload::{FileUpload, MultipartBody, RequestBody};
use crate::validation::{
    coerce_integer, coerce_number, coerce_required_number, format_number, FormErrors, StringRule,
};
use crate::{Expert, Price, Service};
use serde::Serialize;

const PERSON_NAME: StringRule = StringRule::new().min(3).max(50);
const SLUG: StringRule = StringRule::new().min(2);
const SERVICE_NAME: StringRule = StringRule::new().min(3).max(50);
const SHORT_DESCRIPTION: StringRule = StringRule::new().max(150);
const PRICE_NAME: StringRule = StringRule::new().min(3).max(150);

/// Trimmed, non-blank entries of a dynamic list input
fn collect_entries(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .collect()
}

// ============================================================================
// Experts
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpertForm {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub slug: String,
    pub experience_in_years: String,
    pub rank: String,
    pub tags: Vec<String>,
    pub specializations: Vec<String>,
    /// Selected service identifiers
    pub services: Vec<String>,
    pub photo: Option<FileUpload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertSubmission {
    pub first_name: String,
    pub last_name: String,
    /// Serialized only for updates, where `null` clears the stored value
    pub middle_name: Option<String>,
    pub slug: String,
    pub experience_in_years: Option<u32>,
    pub rank: Option<i32>,
    pub tags: Vec<String>,
    pub specializations: Vec<String>,
    pub services: Vec<String>,
    #[serde(skip)]
    pub photo: Option<FileUpload>,
}

impl ExpertForm {
    pub fn validate(&self) -> Result<ExpertSubmission, FormErrors> {
        let mut errors = FormErrors::new();

        errors.capture("firstName", PERSON_NAME.check(&self.first_name));
        errors.capture("lastName", PERSON_NAME.check(&self.last_name));
        let middle_name = errors
            .capture("middleName", PERSON_NAME.check_optional(&self.middle_name))
            .flatten();
        errors.capture("slug", SLUG.check(&self.slug));
        let experience_in_years = errors
            .capture("experienceInYears", coerce_integer::<u32>(&self.experience_in_years))
            .flatten();
        let rank = errors
            .capture("rank", coerce_integer::<i32>(&self.rank))
            .flatten();

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ExpertSubmission {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            middle_name,
            slug: self.slug.clone(),
            experience_in_years,
            rank,
            tags: collect_entries(&self.tags),
            specializations: collect_entries(&self.specializations),
            services: collect_entries(&self.services),
            photo: self.photo.clone(),
        })
    }
}

impl From<&Expert> for ExpertForm {
    fn from(expert: &Expert) -> Self {
        Self {
            first_name: expert.first_name.clone(),
            last_name: expert.last_name.clone(),
            middle_name: expert.middle_name.clone().unwrap_or_default(),
            slug: expert.slug.clone(),
            experience_in_years: expert
                .experience_in_years
                .map(|years| years.to_string())
                .unwrap_or_default(),
            rank: expert.rank.map(|rank| rank.to_string()).unwrap_or_default(),
            tags: expert.tags.clone(),
            specializations: expert.specializations.clone(),
            services: expert
                .services
                .iter()
                .map(|service| service.id.to_string())
                .collect(),
            photo: None,
        }
    }
}

impl ExpertSubmission {
    /// Creation goes out as multipart so the photo can ride along
    pub fn into_create_body(self) -> RequestBody {
        MultipartBody::new()
            .text("firstName", self.first_name)
            .text("lastName", self.last_name)
            .optional_text("middleName", self.middle_name)
            .text("slug", self.slug)
            .file("photo", self.photo)
            .optional_text(
                "experienceInYears",
                self.experience_in_years.map(|years| years.to_string()),
            )
            .optional_text("rank", self.rank.map(|rank| rank.to_string()))
            .json_list("services", &self.services)
            .json_list("tags", &self.tags)
            .json_list("specializations", &self.specializations)
            .into()
    }

    /// Partial update as JSON; a newly picked photo switches to multipart
    pub fn into_update_body(self) -> Result<RequestBody, serde_json::Error> {
        if self.photo.is_some() {
            return Ok(self.into_create_body());
        }
        RequestBody::json(&self)
    }
}

// ============================================================================
// Services
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceForm {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub slug: String,
    pub banner_text: String,
    /// Selected price identifiers
    pub prices: Vec<String>,
    /// Selected expert identifiers
    pub specialists: Vec<String>,
    pub icon: Option<FileUpload>,
    pub banner_image: Option<FileUpload>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCreateSubmission {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub slug: String,
    pub banner_text: String,
    pub prices: Vec<String>,
    pub specialists: Vec<String>,
    pub icon: Option<FileUpload>,
    pub banner_image: Option<FileUpload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdateSubmission {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub slug: String,
}

impl ServiceForm {
    fn check_common(&self, errors: &mut FormErrors) {
        errors.capture("name", SERVICE_NAME.check(&self.name));
        errors.capture("shortDescription", SHORT_DESCRIPTION.check(&self.short_description));
        errors.capture("slug", SLUG.check(&self.slug));
    }

    pub fn validate_create(&self) -> Result<ServiceCreateSubmission, FormErrors> {
        let mut errors = FormErrors::new();
        self.check_common(&mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ServiceCreateSubmission {
            name: self.name.clone(),
            short_description: self.short_description.clone(),
            long_description: self.long_description.clone(),
            slug: self.slug.clone(),
            banner_text: self.banner_text.clone(),
            prices: collect_entries(&self.prices),
            specialists: collect_entries(&self.specialists),
            icon: self.icon.clone(),
            banner_image: self.banner_image.clone(),
        })
    }

    pub fn validate_update(&self) -> Result<ServiceUpdateSubmission, FormErrors> {
        let mut errors = FormErrors::new();
        self.check_common(&mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ServiceUpdateSubmission {
            name: self.name.clone(),
            short_description: self.short_description.clone(),
            long_description: self.long_description.clone(),
            slug: self.slug.clone(),
        })
    }
}

impl From<&Service> for ServiceForm {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            short_description: service.short_description.clone().unwrap_or_default(),
            long_description: service.long_description.clone().unwrap_or_default(),
            slug: service.slug.clone(),
            banner_text: service.banner_text.clone().unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl ServiceCreateSubmission {
    pub fn into_body(self) -> RequestBody {
        MultipartBody::new()
            .text("name", self.name)
            .text("shortDescription", self.short_description)
            .text("longDescription", self.long_description)
            .text("slug", self.slug)
            .file("icon", self.icon)
            .file("bannerImage", self.banner_image)
            .text("bannerText", self.banner_text)
            .json_list("prices", &self.prices)
            .json_list("specialists", &self.specialists)
            .into()
    }
}

impl ServiceUpdateSubmission {
    pub fn into_body(self) -> Result<RequestBody, serde_json::Error> {
        RequestBody::json(&self)
    }
}

// ============================================================================
// Prices
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceForm {
    pub name: String,
    pub price: String,
    pub old_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSubmission {
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
}

impl PriceForm {
    pub fn validate(&self) -> Result<PriceSubmission, FormErrors> {
        let mut errors = FormErrors::new();

        errors.capture("name", PRICE_NAME.check(&self.name));
        let price = errors.capture("price", coerce_required_number(&self.price));
        let old_price = errors
            .capture("oldPrice", coerce_number(&self.old_price))
            .flatten();

        match price {
            Some(price) if errors.is_empty() => Ok(PriceSubmission {
                name: self.name.clone(),
                price,
                old_price,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Price> for PriceForm {
    fn from(price: &Price) -> Self {
        Self {
            name: price.name.clone(),
            price: format_number(price.price),
            old_price: price.old_price.map(format_number).unwrap_or_default(),
        }
    }
}

/// PATCH shape of a price: a cleared old price goes out as `null`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceUpdate<'a> {
    name: &'a str,
    price: f64,
    old_price: Option<f64>,
}

impl PriceSubmission {
    pub fn into_body(self) -> Result<RequestBody, serde_json::Error> {
        RequestBody::json(&self)
    }

    pub fn into_update_body(self) -> Result<RequestBody, serde_json::Error> {
        RequestBody::json(&PriceUpdate {
            name: &self.name,
            price: self.price,
            old_price: self.old_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PartValue;
    use crate::validation::FieldError;

    fn valid_expert_form() -> ExpertForm {
        ExpertForm {
            first_name: "Anna".to_string(),
            last_name: "Petrova".to_string(),
            slug: "anna-petrova".to_string(),
            ..ExpertForm::default()
        }
    }

    #[test]
    fn test_expert_name_too_short_is_rejected() {
        let form = ExpertForm {
            first_name: "An".to_string(),
            ..valid_expert_form()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("firstName"), Some(&FieldError::TooShort(3)));
        assert!(errors.get("lastName").is_none());
    }

    #[test]
    fn test_expert_slug_requires_two_characters() {
        let form = ExpertForm {
            slug: "a".to_string(),
            ..valid_expert_form()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("slug"), Some(&FieldError::TooShort(2)));
    }

    #[test]
    fn test_expert_numeric_fields_are_coerced() {
        let form = ExpertForm {
            experience_in_years: "100".to_string(),
            rank: "3".to_string(),
            ..valid_expert_form()
        };

        let submission = form.validate().unwrap();
        assert_eq!(submission.experience_in_years, Some(100));
        assert_eq!(submission.rank, Some(3));

        let form = ExpertForm {
            experience_in_years: "ten".to_string(),
            ..valid_expert_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("experienceInYears"), Some(&FieldError::NotANumber));
    }

    #[test]
    fn test_expert_create_body_shape() {
        let form = ExpertForm {
            tags: vec!["a".to_string(), "b".to_string()],
            specializations: vec!["x".to_string()],
            services: vec!["3".to_string(), "5".to_string()],
            photo: Some(FileUpload::from_bytes("me.png", vec![1, 2, 3])),
            ..valid_expert_form()
        };

        let RequestBody::Multipart(body) = form.validate().unwrap().into_create_body() else {
            panic!("expert creation must be multipart");
        };

        assert_eq!(body.get_text("tags"), Some(r#"["a","b"]"#));
        assert_eq!(body.get_text("specializations"), Some(r#"["x"]"#));
        assert_eq!(body.get_text("services"), Some(r#"["3","5"]"#));
        assert_eq!(body.get_text("firstName"), Some("Anna"));
        assert!(body.get("middleName").is_none());
        assert!(matches!(body.get("photo"), Some(PartValue::File(file)) if file.mime_type == "image/png"));
    }

    #[test]
    fn test_expert_blank_list_entries_are_dropped() {
        let form = ExpertForm {
            tags: vec!["  ".to_string(), "calm".to_string()],
            ..valid_expert_form()
        };

        assert_eq!(form.validate().unwrap().tags, vec!["calm".to_string()]);
    }

    #[test]
    fn test_expert_update_body_is_json() {
        let form = ExpertForm {
            tags: vec!["a".to_string()],
            ..valid_expert_form()
        };

        let RequestBody::Json(json) = form.validate().unwrap().into_update_body().unwrap() else {
            panic!("update without photo must be JSON");
        };

        assert_eq!(json["firstName"], "Anna");
        assert_eq!(json["tags"], serde_json::json!(["a"]));
        assert_eq!(json["specializations"], serde_json::json!([]));
        assert_eq!(json["middleName"], serde_json::Value::Null);
        assert!(json.get("photo").is_none());
    }

    #[test]
    fn test_expert_update_sends_null_for_cleared_fields() {
        let expert = Expert {
            id: 4,
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            middle_name: Some("Petrovich".to_string()),
            photo: None,
            slug: "ivan".to_string(),
            experience_in_years: Some(8),
            rank: Some(2),
            tags: vec![],
            specializations: vec![],
            services: vec![],
        };

        let mut form = ExpertForm::from(&expert);
        form.middle_name.clear();
        form.experience_in_years.clear();
        form.rank = "  ".to_string();

        let RequestBody::Json(json) = form.validate().unwrap().into_update_body().unwrap() else {
            panic!("update without photo must be JSON");
        };

        let object = json.as_object().unwrap();
        for key in ["middleName", "experienceInYears", "rank"] {
            assert_eq!(object.get(key), Some(&serde_json::Value::Null), "{key}");
        }
    }

    #[test]
    fn test_expert_form_prefill_round_trips() {
        let expert = Expert {
            id: 1,
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            middle_name: Some("Petrovich".to_string()),
            photo: Some("ivan.png".to_string()),
            slug: "ivan".to_string(),
            experience_in_years: Some(8),
            rank: None,
            tags: vec!["kids".to_string()],
            specializations: vec![],
            services: vec![],
        };

        let form = ExpertForm::from(&expert);
        assert_eq!(form.experience_in_years, "8");
        assert_eq!(form.rank, "");

        let submission = form.validate().unwrap();
        assert_eq!(submission.middle_name.as_deref(), Some("Petrovich"));
        assert_eq!(submission.tags, expert.tags);
    }

    #[test]
    fn test_service_create_body_shape() {
        let form = ServiceForm {
            name: "Massage".to_string(),
            short_description: "Relaxing".to_string(),
            slug: "massage".to_string(),
            prices: vec!["1".to_string()],
            specialists: vec!["2".to_string(), "4".to_string()],
            ..ServiceForm::default()
        };

        let RequestBody::Multipart(body) = form.validate_create().unwrap().into_body() else {
            panic!("service creation must be multipart");
        };

        assert_eq!(body.get_text("prices"), Some(r#"["1"]"#));
        assert_eq!(body.get_text("specialists"), Some(r#"["2","4"]"#));
        assert_eq!(body.get_text("longDescription"), Some(""));
        assert!(body.get("icon").is_none());
    }

    #[test]
    fn test_service_short_description_limit() {
        let form = ServiceForm {
            name: "Massage".to_string(),
            short_description: "x".repeat(151),
            slug: "massage".to_string(),
            ..ServiceForm::default()
        };

        let errors = form.validate_update().unwrap_err();
        assert_eq!(errors.get("shortDescription"), Some(&FieldError::TooLong(150)));
    }

    #[test]
    fn test_price_form_coerces_and_rejects() {
        let form = PriceForm {
            name: "Consultation".to_string(),
            price: "100".to_string(),
            old_price: String::new(),
        };
        let submission = form.validate().unwrap();
        assert_eq!(submission.price, 100.0);
        assert_eq!(submission.old_price, None);

        let RequestBody::Json(json) = submission.into_body().unwrap() else {
            panic!("prices are sent as JSON");
        };
        assert_eq!(json, serde_json::json!({"name": "Consultation", "price": 100.0}));

        let form = PriceForm {
            name: "Co".to_string(),
            price: "cheap".to_string(),
            old_price: "1200".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some(&FieldError::TooShort(3)));
        assert_eq!(errors.get("price"), Some(&FieldError::NotANumber));
        assert!(errors.get("oldPrice").is_none());
    }

    #[test]
    fn test_price_form_prefill() {
        let price = Price {
            id: 3,
            name: "Session".to_string(),
            price: 2500.0,
            old_price: Some(2999.5),
        };

        let form = PriceForm::from(&price);
        assert_eq!(form.price, "2500");
        assert_eq!(form.old_price, "2999.5");
    }

    #[test]
    fn test_price_update_clears_old_price() {
        let price = Price {
            id: 3,
            name: "Session".to_string(),
            price: 2500.0,
            old_price: Some(2999.0),
        };

        let mut form = PriceForm::from(&price);
        form.old_price.clear();

        let RequestBody::Json(json) = form.validate().unwrap().into_update_body().unwrap() else {
            panic!("prices are sent as JSON");
        };
        assert_eq!(
            json,
            serde_json::json!({"name": "Session", "price": 2500.0, "oldPrice": null})
        );
    }
}
