//! Catalog and teacher-browse handlers. These are readable without a
//! session.
//!
//! ```text
//! GET /api/v1/categories/
//! GET /api/v1/skills/?category_id=1&search=py
//! GET /api/v1/skills/browse/?search=&location=nyc&category_id=
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    BrowseFilters, Category, CategoryId, Skill, SkillFilter, SkillListing, TeacherEntry,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_id};

const CATEGORY_ID: FieldName = FieldName::new("category_id");

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: u32,
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().to_owned(),
            description: value.description().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkillDto {
    pub id: u32,
    pub name: String,
    /// Category name.
    pub category: String,
    pub category_id: u32,
}

impl From<Skill> for SkillDto {
    fn from(value: Skill) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().to_owned(),
            category: value.category_name().to_owned(),
            category_id: value.category_id().get(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkillsResponse {
    pub skills: Vec<SkillDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherDto {
    pub id: String,
    pub username: String,
    pub location: String,
    #[schema(example = "Advanced")]
    pub experience_level: String,
    /// Mean review rating rounded to one decimal; 0 when unrated.
    pub avg_rating: f64,
}

impl From<TeacherEntry> for TeacherDto {
    fn from(value: TeacherEntry) -> Self {
        Self {
            id: value.user_id.to_string(),
            username: value.username,
            location: value.location,
            experience_level: value.experience_level.to_string(),
            avg_rating: value.avg_rating,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkillListingDto {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub teachers: Vec<TeacherDto>,
}

impl From<SkillListing> for SkillListingDto {
    fn from(value: SkillListing) -> Self {
        let SkillListing { skill, teachers } = value;
        Self {
            id: skill.id().get(),
            name: skill.name().to_owned(),
            category: skill.category_name().to_owned(),
            description: skill.description().to_owned(),
            teachers: teachers.into_iter().map(TeacherDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrowseResponse {
    pub skills: Vec<SkillListingDto>,
}

/// Query parameters for `GET /skills/`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SkillsQuery {
    /// Case-insensitive match on skill name or description.
    pub search: Option<String>,
    pub category_id: Option<String>,
}

/// Query parameters for `GET /skills/browse/`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BrowseQuery {
    pub search: Option<String>,
    /// Case-insensitive substring of the teacher's location.
    pub location: Option<String>,
    pub category_id: Option<String>,
}

/// List skill categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories/",
    responses(
        (status = 200, description = "Categories", body = CategoriesResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categories/")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CategoriesResponse>> {
    let categories = state.catalog.categories().await?;
    Ok(web::Json(CategoriesResponse {
        categories: categories.into_iter().map(CategoryDto::from).collect(),
    }))
}

/// List catalog skills, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/v1/skills/",
    params(SkillsQuery),
    responses(
        (status = 200, description = "Skills", body = SkillsResponse),
        (status = 400, description = "Invalid category id", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "listSkills",
    security([])
)]
#[get("/skills/")]
pub async fn list_skills(
    state: web::Data<HttpState>,
    query: web::Query<SkillsQuery>,
) -> ApiResult<web::Json<SkillsResponse>> {
    let SkillsQuery {
        search,
        category_id,
    } = query.into_inner();
    let category_id: Option<CategoryId> = parse_optional_id(category_id.as_deref(), CATEGORY_ID)?;
    let filter = SkillFilter::new(category_id, search.as_deref());
    let skills = state.catalog.skills(&filter).await?;
    Ok(web::Json(SkillsResponse {
        skills: skills.into_iter().map(SkillDto::from).collect(),
    }))
}

/// Browse skills with the members who teach them.
///
/// Filters combine with AND. An unknown category yields an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/skills/browse/",
    params(BrowseQuery),
    responses(
        (status = 200, description = "Skills with teachers", body = BrowseResponse),
        (status = 400, description = "Invalid category id", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "browseSkills",
    security([])
)]
#[get("/skills/browse/")]
pub async fn browse_skills(
    state: web::Data<HttpState>,
    query: web::Query<BrowseQuery>,
) -> ApiResult<web::Json<BrowseResponse>> {
    let BrowseQuery {
        search,
        location,
        category_id,
    } = query.into_inner();
    let category_id: Option<CategoryId> = parse_optional_id(category_id.as_deref(), CATEGORY_ID)?;
    let filters = BrowseFilters::new(search.as_deref(), location.as_deref(), category_id);
    let listings = state.browse.browse(&filters).await?;
    Ok(web::Json(BrowseResponse {
        skills: listings.into_iter().map(SkillListingDto::from).collect(),
    }))
}
