//! User seeding functionality.
//!
//! Seeded users get addresses under [`SEED_EMAIL_DOMAIN`] so they can be
//! removed again without touching real accounts.

use classbook_models::ids::UserId;
use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::UserSeed;

pub const SEED_EMAIL_DOMAIN: &str = "seed.classbook.test";

/// Generates `count` users in parallel.
pub fn generate_users(count: usize, role_prefix: &str, group_idx: usize) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|user_idx| generate_user(role_prefix, group_idx, user_idx))
        .collect()
}

fn generate_user(role_prefix: &str, group_idx: usize, user_idx: usize) -> UserSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let email = format!(
        "{}.{}+{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        role_prefix,
        group_idx * 1000 + user_idx,
        SEED_EMAIL_DOMAIN
    );

    UserSeed {
        first_name,
        last_name,
        email,
    }
}

/// Inserts users in batches, returning their ids in input order.
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let mut tx = db.begin().await?;

    // 3 params per user
    const BATCH_SIZE: usize = 2000;

    let mut all_ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (first_name, last_name, email) VALUES ");

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 3;
        query.push_str(&format!(
            "(${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3
        ));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email);
    }

    let ids: Vec<UserId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes every user with a seeded address.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{SEED_EMAIL_DOMAIN}"))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_emails_use_seed_domain() {
        let users = generate_users(5, "student", 2);
        assert_eq!(users.len(), 5);
        assert!(
            users
                .iter()
                .all(|u| u.email.ends_with(&format!("@{SEED_EMAIL_DOMAIN}")))
        );
        assert!(users.iter().any(|u| u.email.contains("+student2000@")));
    }
}
