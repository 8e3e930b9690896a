//! Shared builders and test doubles for unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    CategoryId, ExperienceLevel, Member, MemberDraft, Skill, SkillDraft, SkillId, SkillRole,
    UserId, UserSkill, Username,
};

/// Fixed starting instant used across tests.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.0.lock().expect("clock mutex") += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

pub fn member(username: &str, location: &str) -> Member {
    Member::new(MemberDraft {
        id: UserId::random(),
        username: Username::new(username).expect("valid username"),
        email: format!("{username}@example.com"),
        location: location.to_owned(),
        bio: String::new(),
        phone: String::new(),
    })
}

pub fn skill(id: u32, name: &str, category: u32) -> Skill {
    Skill::new(SkillDraft {
        id: SkillId::new(id),
        name: name.to_owned(),
        category_id: CategoryId::new(category),
        category_name: format!("Category {category}"),
        description: format!("Learn {name}"),
    })
}

pub fn teaches(user: &UserId, skill: u32, level: ExperienceLevel) -> UserSkill {
    UserSkill::new(
        user.clone(),
        SkillId::new(skill),
        SkillRole::Teaches,
        level,
        fixture_timestamp(),
    )
}

pub fn learns(user: &UserId, skill: u32) -> UserSkill {
    UserSkill::new(
        user.clone(),
        SkillId::new(skill),
        SkillRole::Learns,
        ExperienceLevel::Beginner,
        fixture_timestamp(),
    )
}
