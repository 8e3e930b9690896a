//! Teacher-matching browse query and catalog listings.
//!
//! Browsing is a pure read over the catalog, the teaching declarations,
//! member locations and review summaries. It takes no locks and may observe
//! slightly stale teacher or rating data while the ledger is being written.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CatalogQuery, CatalogRepository, MemberDirectory, ReviewRepository, SkillBrowseQuery,
    UserSkillRepository,
};
use crate::domain::{
    Category, CategoryId, Error, ExperienceLevel, Member, RatingSummary, Skill, SkillFilter,
    SkillId, UserId, UserSkill,
};

/// Browse filters; every field is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilters {
    skill: SkillFilter,
    location: Option<String>,
}

impl BrowseFilters {
    /// Blank `search` or `location` values count as absent.
    pub fn new(
        search: Option<&str>,
        location: Option<&str>,
        category_id: Option<CategoryId>,
    ) -> Self {
        let location = location
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        Self {
            skill: SkillFilter::new(category_id, search),
            location,
        }
    }

    pub fn skill_filter(&self) -> &SkillFilter {
        &self.skill
    }

    /// Lower-cased location needle matched against teacher locations.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// One teacher of a listed skill.
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherEntry {
    pub user_id: UserId,
    pub username: String,
    pub location: String,
    pub experience_level: ExperienceLevel,
    /// `0.0` means the teacher has no ratings yet.
    pub avg_rating: f64,
}

/// A skill with the teachers that survived the location filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillListing {
    pub skill: Skill,
    pub teachers: Vec<TeacherEntry>,
}

/// Join skills with their teachers.
///
/// `skills` must already satisfy the skill-level filters. Declarations whose
/// member is missing from `members` are dropped. A skill left with no
/// teachers is still listed.
pub fn assemble_listings(
    skills: Vec<Skill>,
    teaching: Vec<UserSkill>,
    members: &HashMap<UserId, Member>,
    ratings: &HashMap<UserId, RatingSummary>,
    location: Option<&str>,
) -> Vec<SkillListing> {
    let mut by_skill: HashMap<SkillId, Vec<TeacherEntry>> = HashMap::new();
    for declaration in teaching.into_iter().filter(UserSkill::is_teaching) {
        let Some(member) = members.get(declaration.user_id()) else {
            debug!(user_id = %declaration.user_id(), "teacher missing from directory");
            continue;
        };
        let located = location.is_none_or(|needle| {
            member.location().to_lowercase().contains(needle)
        });
        if !located {
            continue;
        }
        let avg_rating = ratings
            .get(member.id())
            .map(RatingSummary::average)
            .unwrap_or_default();
        by_skill
            .entry(declaration.skill_id())
            .or_default()
            .push(TeacherEntry {
                user_id: member.id().clone(),
                username: member.username().to_string(),
                location: member.location().to_owned(),
                experience_level: declaration.experience_level(),
                avg_rating,
            });
    }

    skills
        .into_iter()
        .map(|skill| {
            let teachers = by_skill.remove(&skill.id()).unwrap_or_default();
            SkillListing { skill, teachers }
        })
        .collect()
}

/// Serves catalog listings and the browse query.
#[derive(Clone)]
pub struct MatchingService<C, U, M, R> {
    catalog: Arc<C>,
    user_skills: Arc<U>,
    directory: Arc<M>,
    reviews: Arc<R>,
}

impl<C, U, M, R> MatchingService<C, U, M, R> {
    pub fn new(catalog: Arc<C>, user_skills: Arc<U>, directory: Arc<M>, reviews: Arc<R>) -> Self {
        Self {
            catalog,
            user_skills,
            directory,
            reviews,
        }
    }
}

#[async_trait]
impl<C, U, M, R> SkillBrowseQuery for MatchingService<C, U, M, R>
where
    C: CatalogRepository,
    U: UserSkillRepository,
    M: MemberDirectory,
    R: ReviewRepository,
{
    async fn browse(&self, filters: &BrowseFilters) -> Result<Vec<SkillListing>, Error> {
        let skills = self.catalog.list_skills(filters.skill_filter()).await?;
        if skills.is_empty() {
            return Ok(Vec::new());
        }
        let skill_ids: Vec<SkillId> = skills.iter().map(Skill::id).collect();
        let teaching = self.user_skills.list_teachers(&skill_ids).await?;

        let mut teacher_ids: Vec<UserId> = teaching.iter().map(|d| d.user_id().clone()).collect();
        teacher_ids.sort_by(|a, b| a.as_uuid().cmp(b.as_uuid()));
        teacher_ids.dedup();

        let members: HashMap<UserId, Member> = self
            .directory
            .find_many(&teacher_ids)
            .await?
            .into_iter()
            .map(|member| (member.id().clone(), member))
            .collect();
        let ratings = self.reviews.summaries(&teacher_ids).await?;

        let listings = assemble_listings(skills, teaching, &members, &ratings, filters.location());
        debug!(
            skills = listings.len(),
            location = filters.location().unwrap_or_default(),
            "browse served"
        );
        Ok(listings)
    }
}

#[async_trait]
impl<C, U, M, R> CatalogQuery for MatchingService<C, U, M, R>
where
    C: CatalogRepository,
    U: UserSkillRepository,
    M: MemberDirectory,
    R: ReviewRepository,
{
    async fn categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.catalog.list_categories().await?)
    }

    async fn skills(&self, filter: &SkillFilter) -> Result<Vec<Skill>, Error> {
        Ok(self.catalog.list_skills(filter).await?)
    }
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
