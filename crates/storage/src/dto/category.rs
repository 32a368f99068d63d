use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Category, Gender};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub label: String,
    pub gender: Gender,
    pub age: u16,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            label: category.label.to_string(),
            gender: category.gender,
            age: category.age,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EligibleCategoriesQuery {
    pub birth_date: NaiveDate,
    #[param(value_type = String, example = "female")]
    pub gender: Gender,
}
