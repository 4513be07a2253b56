//! Lookup tables: tags, cuisine types, restaurant categories, regions,
//! social channels

use serde::Deserialize;

use super::validation::required_text;
use super::ValidationError;

const MAX_TAG_LEN: usize = 100;
const MAX_CUISINE_LEN: usize = 20;
const MAX_CATEGORY_LEN: usize = 20;
const MAX_REGION_PART_LEN: usize = 20;
const MAX_CHANNEL_LEN: usize = 100;

/// Single-field form shared by tags, cuisine types and social channels
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NameForm {
    pub name: String,
}

impl NameForm {
    pub fn tag(&self) -> Result<String, ValidationError> {
        required_text("name", &self.name, MAX_TAG_LEN)
    }

    pub fn cuisine_type(&self) -> Result<String, ValidationError> {
        required_text("name", &self.name, MAX_CUISINE_LEN)
    }

    pub fn social_channel(&self) -> Result<String, ValidationError> {
        required_text("name", &self.name, MAX_CHANNEL_LEN)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
    pub cuisine_type_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub cuisine_type_id: Option<i64>,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<CategoryDraft, ValidationError> {
        Ok(CategoryDraft {
            name: required_text("name", &self.name, MAX_CATEGORY_LEN)?,
            cuisine_type_id: self.cuisine_type_id,
        })
    }
}

/// Administrative region: province / district / neighborhood
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegionForm {
    pub province: String,
    pub district: String,
    pub neighborhood: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDraft {
    pub province: String,
    pub district: String,
    pub neighborhood: String,
}

impl RegionForm {
    pub fn validate(&self) -> Result<RegionDraft, ValidationError> {
        Ok(RegionDraft {
            province: required_text("province", &self.province, MAX_REGION_PART_LEN)?,
            district: required_text("district", &self.district, MAX_REGION_PART_LEN)?,
            neighborhood: required_text("neighborhood", &self.neighborhood, MAX_REGION_PART_LEN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_limits_differ_per_table() {
        let form = NameForm {
            name: "x".repeat(21),
        };
        assert!(form.tag().is_ok());
        assert!(form.social_channel().is_ok());
        assert!(matches!(
            form.cuisine_type(),
            Err(ValidationError::TooLong { max: 20, .. })
        ));
    }

    #[test]
    fn region_requires_all_parts() {
        let form = RegionForm {
            province: "서울특별시".into(),
            district: "중구".into(),
            neighborhood: " ".into(),
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Empty { field: "neighborhood" })
        ));
    }

    #[test]
    fn category_without_cuisine_type() {
        let form: CategoryForm = serde_json::from_str(r#"{"name": "Noodles"}"#).unwrap();
        let draft = form.validate().unwrap();
        assert_eq!(draft.cuisine_type_id, None);
        assert_eq!(draft.name, "Noodles");
    }
}
