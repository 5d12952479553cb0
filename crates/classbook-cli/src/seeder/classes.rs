//! Class, subject and membership seeding.

use classbook_models::ids::{ClassId, UserId};
use classbook_models::memberships::MembershipRole;
use fake::Fake;
use fake::faker::lorem::en::Word;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::ClassSeed;

const SUBJECT_NAMES: &[&str] = &[
    "Mathematics",
    "English",
    "Biology",
    "Chemistry",
    "Physics",
    "History",
    "Geography",
    "Computer Science",
    "Art",
    "Music",
];

/// Generates class names like "Grade 7 Lorem".
pub fn generate_classes(count: usize) -> Vec<ClassSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let grade = (1..13).fake::<u8>();
            let word: String = Word().fake();
            ClassSeed {
                name: format!("Grade {} {} {}", grade, capitalize(&word), idx + 1),
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub async fn seed_classes(
    db: &PgPool,
    count: usize,
) -> Result<Vec<ClassId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} classes...", count);

    let classes = generate_classes(count);
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(classes.len());
    for chunk in classes.chunks(BATCH_SIZE) {
        all_ids.extend(insert_classes_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} classes in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

async fn insert_classes_chunk(
    tx: &mut Transaction<'_, Postgres>,
    classes: &[ClassSeed],
) -> Result<Vec<ClassId>, Box<dyn std::error::Error>> {
    if classes.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO classes (name) VALUES ");
    for i in 0..classes.len() {
        if i > 0 {
            query.push_str(", ");
        }
        query.push_str(&format!("(${})", i + 1));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for class in classes {
        q = q.bind(&class.name);
    }

    let ids: Vec<ClassId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Adds `per_class` subjects to every class, cycling through a fixed list.
pub async fn seed_subjects(
    db: &PgPool,
    class_ids: &[ClassId],
    per_class: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📘 Seeding {} subjects per class...", per_class);

    let rows: Vec<(ClassId, &str)> = class_ids
        .iter()
        .flat_map(|&class_id| {
            (0..per_class).map(move |i| (class_id, SUBJECT_NAMES[i % SUBJECT_NAMES.len()]))
        })
        .collect();

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    // 2 params per subject
    for chunk in rows.chunks(2000) {
        let mut query = String::from("INSERT INTO subjects (class_id, name) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            query.push_str(&format!("(${}, ${})", i * 2 + 1, i * 2 + 2));
        }

        let mut q = sqlx::query(&query);
        for (class_id, name) in chunk {
            q = q.bind(*class_id).bind(*name);
        }
        inserted += q.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} subjects in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Inserts `(user, class, role)` memberships, skipping pairs that exist.
pub async fn seed_memberships(
    db: &PgPool,
    memberships: &[(UserId, ClassId, MembershipRole)],
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🔗 Assigning {} memberships...", memberships.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    // 3 params per membership
    for chunk in memberships.chunks(2000) {
        let mut query = String::from("INSERT INTO class_memberships (user_id, class_id, role) VALUES ");
        for i in 0..chunk.len() {
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
        query.push_str(" ON CONFLICT (user_id, class_id) DO NOTHING");

        let mut q = sqlx::query(&query);
        for (user_id, class_id, role) in chunk {
            q = q.bind(*user_id).bind(*class_id).bind(*role);
        }
        inserted += q.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} memberships in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Deletes all classes. Subjects, exams, results and memberships cascade.
pub async fn clear_classes(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing classes...");

    let result = sqlx::query("DELETE FROM classes")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} classes in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
