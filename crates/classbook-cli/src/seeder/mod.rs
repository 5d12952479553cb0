//! Database seeding for local development.
//!
//! Creates fake classes, each with teachers, students and subjects.
//!
//! # Module Structure
//!
//! - [`classes`] - classes, subjects and memberships
//! - [`users`] - fake users under a dedicated email domain
//! - [`models`] - seeding configuration
//!
//! # Usage
//!
//! ```ignore
//! use classbook_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10); // 10 classes with defaults
//! seed_all(&db, config).await?;
//! ```
//!
//! Names are generated in parallel with Rayon; rows go in with multi-value
//! `INSERT` statements inside one transaction per table.

pub mod classes;
pub mod models;
pub mod users;

pub use models::{MembersPerClass, SeedConfig};

use classbook_models::memberships::MembershipRole;
use sqlx::PgPool;
use std::time::Instant;

/// Seeds classes, users, memberships and subjects.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let members = &config.members_per_class;

    println!("🌱 Starting full database seeding...");
    println!("   - Classes: {}", config.num_classes);
    println!(
        "   - Per class: {} teachers, {} students, {} subjects",
        members.teachers, members.students, config.subjects_per_class
    );

    let class_ids = classes::seed_classes(db, config.num_classes).await?;

    let mut seeds = Vec::with_capacity(config.total_users());
    let mut roles = Vec::with_capacity(config.total_users());
    for (class_idx, class_id) in class_ids.iter().enumerate() {
        for (count, prefix, role) in [
            (members.teachers, "teacher", MembershipRole::Teacher),
            (members.students, "student", MembershipRole::Student),
        ] {
            seeds.extend(users::generate_users(count, prefix, class_idx));
            roles.extend(std::iter::repeat_n((*class_id, role), count));
        }
    }

    println!("👥 Seeding {} users...", seeds.len());
    let user_ids = users::insert_users_batch(db, &seeds).await?;

    let memberships: Vec<_> = user_ids
        .into_iter()
        .zip(roles)
        .map(|(user_id, (class_id, role))| (user_id, class_id, role))
        .collect();
    classes::seed_memberships(db, &memberships).await?;

    classes::seed_subjects(db, &class_ids, config.subjects_per_class).await?;

    println!(
        "\n✅ Seeding complete! Created {} classes and {} users in {:?}",
        class_ids.len(),
        memberships.len(),
        start_time.elapsed()
    );

    Ok(())
}

/// Removes every class and every seeded user.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing all seeded data...");

    classes::clear_classes(db).await?;
    users::clear_users(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}
