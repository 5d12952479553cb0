//! One-off administrative operations backing the CLI subcommands.

use classbook_auth::create_access_token;
use classbook_config::JwtConfig;
use classbook_models::classes::{Class, CreateClassDto};
use classbook_models::ids::ClassId;
use classbook_models::memberships::{Membership, MembershipRole};
use classbook_models::users::{CreateUserDto, User};
use sqlx::PgPool;
use validator::Validate;

type AdminResult<T> = Result<T, Box<dyn std::error::Error>>;

pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> AdminResult<User> {
    dto.validate()?;

    let user = sqlx::query_as::<_, User>(
        r#"INSERT INTO users (email, first_name, last_name)
           VALUES ($1, $2, $3)
           ON CONFLICT (email) DO NOTHING
           RETURNING id, email, first_name, last_name, created_at"#,
    )
    .bind(&dto.email)
    .bind(&dto.first_name)
    .bind(&dto.last_name)
    .fetch_optional(db)
    .await?;

    user.ok_or_else(|| format!("A user with email {} already exists", dto.email).into())
}

pub async fn create_class(db: &PgPool, name: &str) -> AdminResult<Class> {
    let dto = CreateClassDto {
        name: name.trim().to_string(),
    };
    dto.validate()?;

    let class = sqlx::query_as::<_, Class>(
        r#"INSERT INTO classes (name)
           VALUES ($1)
           RETURNING id, name, created_at, updated_at"#,
    )
    .bind(&dto.name)
    .fetch_one(db)
    .await?;

    Ok(class)
}

pub async fn find_user_by_email(db: &PgPool, email: &str) -> AdminResult<User> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, first_name, last_name, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    user.ok_or_else(|| format!("No user with email {email}").into())
}

/// Makes the user with `email` a teacher of `class_id`.
///
/// Fails if the user already has a membership in the class, whatever its
/// role.
pub async fn assign_teacher(db: &PgPool, email: &str, class_id: ClassId) -> AdminResult<Membership> {
    let user = find_user_by_email(db, email).await?;

    let membership = sqlx::query_as::<_, Membership>(
        r#"INSERT INTO class_memberships (user_id, class_id, role)
           VALUES ($1, $2, $3)
           ON CONFLICT (user_id, class_id) DO NOTHING
           RETURNING id, user_id, class_id, role, created_at"#,
    )
    .bind(user.id)
    .bind(class_id)
    .bind(MembershipRole::Teacher)
    .fetch_optional(db)
    .await?;

    membership.ok_or_else(|| format!("{email} already has a membership in class {class_id}").into())
}

/// Mints an access token for an existing user, for local testing.
pub async fn issue_token(db: &PgPool, email: &str, jwt_config: &JwtConfig) -> AdminResult<String> {
    let user = find_user_by_email(db, email).await?;

    create_access_token(user.id.into_inner(), &user.email, jwt_config)
        .map_err(|e| format!("Failed to create token: {}", e.error).into())
}
