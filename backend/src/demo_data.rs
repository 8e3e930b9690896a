//! Demo catalogue and members seeded into the in-memory stores at startup.
//!
//! Every demo member logs in with the shared password configured through
//! [`crate::settings::AppSettings::demo_password`].

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{CatalogRepositoryError, UserSkillRepository, UserSkillRepositoryError};
use crate::domain::{
    Category, CategoryId, DeclarationScope, ExperienceLevel, Member, MemberDraft,
    MemberValidationError, Skill, SkillDraft, SkillId, SkillRole, UserId, UserSkill, Username,
};
use crate::outbound::memory::MemoryStores;

/// Errors returned while seeding demo data.
#[derive(Debug, Error)]
pub enum DemoDataError {
    #[error("demo catalog could not be stored: {0}")]
    Catalog(#[from] CatalogRepositoryError),
    #[error("demo declaration could not be stored: {0}")]
    Registry(#[from] UserSkillRepositoryError),
    #[error("demo member is invalid: {0}")]
    Member(#[from] MemberValidationError),
    #[error("demo data refers to unknown {kind} '{name}'")]
    UnknownReference { kind: &'static str, name: String },
}

/// Counts of what [`seed_demo_data`] stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSummary {
    pub categories: usize,
    pub skills: usize,
    pub members: usize,
    pub declarations: usize,
}

const CATEGORIES: [(&str, &str); 6] = [
    ("Programming", "Software development and coding skills"),
    ("Languages", "Spoken languages and communication"),
    ("Music", "Musical instruments and theory"),
    ("Arts & Crafts", "Visual arts, painting, crafts"),
    ("Sports", "Physical activities and sports"),
    ("Cooking", "Culinary skills and cuisine types"),
];

const SKILLS: [(&str, &str, &str); 20] = [
    ("Python", "Programming", "Python programming language"),
    ("JavaScript", "Programming", "JavaScript and web development"),
    ("React", "Programming", "React.js framework"),
    ("Django", "Programming", "Django web framework"),
    ("MySQL", "Programming", "MySQL database management"),
    ("Spanish", "Languages", "Spanish language conversation"),
    ("French", "Languages", "French language and culture"),
    ("Mandarin", "Languages", "Mandarin Chinese"),
    ("Guitar", "Music", "Acoustic and electric guitar"),
    ("Piano", "Music", "Piano and keyboard"),
    ("Singing", "Music", "Vocal techniques"),
    ("Photography", "Arts & Crafts", "Digital photography"),
    ("Painting", "Arts & Crafts", "Watercolor and acrylic painting"),
    ("Pottery", "Arts & Crafts", "Ceramic arts"),
    ("Tennis", "Sports", "Tennis techniques and strategy"),
    ("Yoga", "Sports", "Yoga poses and meditation"),
    ("Swimming", "Sports", "Swimming strokes and techniques"),
    ("Italian Cuisine", "Cooking", "Italian cooking and pasta"),
    ("Baking", "Cooking", "Bread and pastry baking"),
    ("Indian Cuisine", "Cooking", "Indian spices and dishes"),
];

struct DemoMember {
    username: &'static str,
    email: &'static str,
    location: &'static str,
    bio: &'static str,
    phone: &'static str,
    teaches: &'static [&'static str],
    teach_level: ExperienceLevel,
    learns: &'static [&'static str],
}

const MEMBERS: [DemoMember; 8] = [
    DemoMember {
        username: "raj_dev",
        email: "raj@example.com",
        location: "Mumbai",
        bio: "Full-stack developer passionate about teaching coding",
        phone: "+91-9876543210",
        teaches: &["Python", "Django", "MySQL"],
        teach_level: ExperienceLevel::Advanced,
        learns: &["Photography"],
    },
    DemoMember {
        username: "maria_lang",
        email: "maria@example.com",
        location: "Delhi",
        bio: "Polyglot who loves sharing languages",
        phone: "+91-9876543211",
        teaches: &["Spanish", "French"],
        teach_level: ExperienceLevel::Advanced,
        learns: &["Piano"],
    },
    DemoMember {
        username: "arjun_music",
        email: "arjun@example.com",
        location: "Bangalore",
        bio: "Professional musician and music teacher",
        phone: "+91-9876543212",
        teaches: &["Guitar", "Piano", "Singing"],
        teach_level: ExperienceLevel::Advanced,
        learns: &["Python"],
    },
    DemoMember {
        username: "priya_art",
        email: "priya@example.com",
        location: "Chennai",
        bio: "Artist and photography enthusiast",
        phone: "+91-9876543213",
        teaches: &["Photography", "Painting"],
        teach_level: ExperienceLevel::Advanced,
        learns: &["Spanish"],
    },
    DemoMember {
        username: "vikram_fit",
        email: "vikram@example.com",
        location: "Pune",
        bio: "Fitness instructor and sports coach",
        phone: "+91-9876543214",
        teaches: &["Tennis", "Yoga", "Swimming"],
        teach_level: ExperienceLevel::Advanced,
        learns: &["Italian Cuisine"],
    },
    DemoMember {
        username: "chef_anita",
        email: "anita@example.com",
        location: "Hyderabad",
        bio: "Chef specializing in multiple cuisines",
        phone: "+91-9876543215",
        teaches: &["Italian Cuisine", "Baking", "Indian Cuisine"],
        teach_level: ExperienceLevel::Advanced,
        learns: &["Guitar"],
    },
    DemoMember {
        username: "dev_student",
        email: "student@example.com",
        location: "Mumbai",
        bio: "Software engineering student learning new skills",
        phone: "+91-9876543216",
        teaches: &["JavaScript", "React"],
        teach_level: ExperienceLevel::Intermediate,
        learns: &["Yoga"],
    },
    DemoMember {
        username: "learner_sam",
        email: "sam@example.com",
        location: "Delhi",
        bio: "Curious learner interested in skill exchange",
        phone: "+91-9876543217",
        teaches: &["Pottery"],
        teach_level: ExperienceLevel::Beginner,
        learns: &["JavaScript", "Singing"],
    },
];

fn position_id(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn category_id(name: &str) -> Result<CategoryId, DemoDataError> {
    CATEGORIES
        .iter()
        .position(|(candidate, _)| *candidate == name)
        .map(|index| CategoryId::new(position_id(index)))
        .ok_or_else(|| DemoDataError::UnknownReference {
            kind: "category",
            name: name.to_owned(),
        })
}

fn skill_id(name: &str) -> Result<SkillId, DemoDataError> {
    SKILLS
        .iter()
        .position(|(candidate, _, _)| *candidate == name)
        .map(|index| SkillId::new(position_id(index)))
        .ok_or_else(|| DemoDataError::UnknownReference {
            kind: "skill",
            name: name.to_owned(),
        })
}

fn seed_catalog(stores: &MemoryStores) -> Result<(), DemoDataError> {
    for (index, (name, description)) in CATEGORIES.iter().enumerate() {
        stores.catalog.put_category(Category::new(
            CategoryId::new(position_id(index)),
            *name,
            *description,
        ))?;
    }
    for (index, (name, category, description)) in SKILLS.iter().enumerate() {
        stores.catalog.put_skill(Skill::new(SkillDraft {
            id: SkillId::new(position_id(index)),
            name: (*name).to_owned(),
            category_id: category_id(category)?,
            category_name: (*category).to_owned(),
            description: (*description).to_owned(),
        }))?;
    }
    Ok(())
}

async fn declare_all(
    stores: &MemoryStores,
    user: &UserId,
    skills: &[&str],
    role: SkillRole,
    level: ExperienceLevel,
    now: DateTime<Utc>,
) -> Result<usize, DemoDataError> {
    for name in skills {
        let declaration = UserSkill::new(user.clone(), skill_id(name)?, role, level, now);
        stores
            .user_skills
            .upsert(declaration, DeclarationScope::SkillAndRole)
            .await?;
    }
    Ok(skills.len())
}

/// Seed the demo catalogue, members and declarations.
///
/// Members receive fresh random ids on every call, so seeding twice adds a
/// second set of members with the same usernames. Call it once at startup.
pub async fn seed_demo_data(
    stores: &MemoryStores,
    now: DateTime<Utc>,
) -> Result<DemoSummary, DemoDataError> {
    seed_catalog(stores)?;

    let mut declarations = 0;
    for demo in &MEMBERS {
        let id = UserId::random();
        stores.directory.put(Member::new(MemberDraft {
            id: id.clone(),
            username: Username::new(demo.username)?,
            email: demo.email.to_owned(),
            location: demo.location.to_owned(),
            bio: demo.bio.to_owned(),
            phone: demo.phone.to_owned(),
        }));
        declarations += declare_all(
            stores,
            &id,
            demo.teaches,
            SkillRole::Teaches,
            demo.teach_level,
            now,
        )
        .await?;
        declarations += declare_all(
            stores,
            &id,
            demo.learns,
            SkillRole::Learns,
            ExperienceLevel::Beginner,
            now,
        )
        .await?;
    }

    let summary = DemoSummary {
        categories: CATEGORIES.len(),
        skills: SKILLS.len(),
        members: MEMBERS.len(),
        declarations,
    };
    info!(
        categories = summary.categories,
        skills = summary.skills,
        members = summary.members,
        declarations = summary.declarations,
        "demo data seeded"
    );
    Ok(summary)
}
