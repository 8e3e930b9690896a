//! Skill declarations and the profile read model built on them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CatalogRepository, DeclareSkillRequest, DeclaredSkill, MemberDirectory, MemberProfile,
    ProfileQuery, SkillRegistryCommand, UserSkillRepository,
};
use crate::domain::{DeclarationScope, Error, Skill, SkillFilter, SkillId, UserId, UserSkill};

#[derive(Clone)]
pub struct SkillRegistryService<U, C, M> {
    user_skills: Arc<U>,
    catalog: Arc<C>,
    directory: Arc<M>,
    clock: Arc<dyn Clock>,
    scope: DeclarationScope,
}

impl<U, C, M> SkillRegistryService<U, C, M> {
    pub fn new(
        user_skills: Arc<U>,
        catalog: Arc<C>,
        directory: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_skills,
            catalog,
            directory,
            clock,
            scope: DeclarationScope::default(),
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: DeclarationScope) -> Self {
        self.scope = scope;
        self
    }
}

fn join_with_catalog(
    declarations: Vec<UserSkill>,
    skills: &HashMap<SkillId, Skill>,
) -> Vec<DeclaredSkill> {
    declarations
        .into_iter()
        .filter_map(|declaration| {
            let skill = skills.get(&declaration.skill_id())?.clone();
            Some(DeclaredSkill { declaration, skill })
        })
        .collect()
}

#[async_trait]
impl<U, C, M> SkillRegistryCommand for SkillRegistryService<U, C, M>
where
    U: UserSkillRepository,
    C: CatalogRepository,
    M: MemberDirectory,
{
    async fn declare(
        &self,
        actor: &UserId,
        request: DeclareSkillRequest,
    ) -> Result<DeclaredSkill, Error> {
        let skill = self
            .catalog
            .find_skill(request.skill_id)
            .await?
            .ok_or_else(|| {
                Error::not_found(format!("skill {} not found", request.skill_id))
                    .with_details(json!({ "skillId": request.skill_id.get() }))
            })?;
        let declaration = UserSkill::new(
            actor.clone(),
            request.skill_id,
            request.role,
            request.experience_level,
            self.clock.utc(),
        );
        let stored = self.user_skills.upsert(declaration, self.scope).await?;
        info!(
            user_id = %actor,
            skill = %request.skill_id,
            can_teach = stored.role().can_teach(),
            level = %stored.experience_level(),
            "skill declared"
        );
        Ok(DeclaredSkill {
            declaration: stored,
            skill,
        })
    }
}

#[async_trait]
impl<U, C, M> ProfileQuery for SkillRegistryService<U, C, M>
where
    U: UserSkillRepository,
    C: CatalogRepository,
    M: MemberDirectory,
{
    async fn profile(&self, user: &UserId) -> Result<MemberProfile, Error> {
        let member = self
            .directory
            .find_by_id(user)
            .await?
            .ok_or_else(|| Error::not_found(format!("member {user} not found")))?;
        let declarations = self.user_skills.list_for_user(user).await?;
        let skills: HashMap<SkillId, Skill> = self
            .catalog
            .list_skills(&SkillFilter::default())
            .await?
            .into_iter()
            .map(|skill| (skill.id(), skill))
            .collect();
        Ok(MemberProfile {
            member,
            skills: join_with_catalog(declarations, &skills),
        })
    }
}
