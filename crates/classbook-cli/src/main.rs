use classbook_cli::admin;
use classbook_cli::seeder::{self, MembersPerClass, SeedConfig};
use classbook_config::{DatabaseConfig, JwtConfig};
use classbook_models::ids::ClassId;
use classbook_models::users::CreateUserDto;
use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "classbook-cli")]
#[command(about = "Classbook CLI - Administrative tools for Classbook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user
    CreateUser {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Create a class
    CreateClass {
        /// Class name
        #[arg(short = 'n', long)]
        name: Option<String>,
    },
    /// Make an existing user a teacher of a class
    AssignTeacher {
        /// Teacher's email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Class ID
        #[arg(short = 'c', long)]
        class_id: Option<ClassId>,
    },
    /// Print an access token for an existing user (development only)
    IssueToken {
        /// User's email address
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Seed the database with fake classes, users and subjects
    Seed {
        /// Number of classes to create
        #[arg(short = 'c', long, default_value = "5")]
        classes: usize,

        /// Number of teachers per class
        #[arg(long, default_value = "2")]
        teachers: usize,

        /// Number of students per class
        #[arg(long, default_value = "25")]
        students: usize,

        /// Number of subjects per class
        #[arg(long, default_value = "4")]
        subjects: usize,
    },
    /// Clear all classes and seeded users
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = connect().await;

    let result = match cli.command {
        Commands::CreateUser {
            first_name,
            last_name,
            email,
        } => handle_create_user(&pool, first_name, last_name, email).await,
        Commands::CreateClass { name } => handle_create_class(&pool, name).await,
        Commands::AssignTeacher { email, class_id } => {
            handle_assign_teacher(&pool, email, class_id).await
        }
        Commands::IssueToken { email } => handle_issue_token(&pool, email).await,
        Commands::Seed {
            classes,
            teachers,
            students,
            subjects,
        } => {
            let config = SeedConfig::new(classes)
                .with_members(MembersPerClass { teachers, students })
                .with_subjects(subjects);
            seeder::seed_all(&pool, config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn connect() -> PgPool {
    let config = DatabaseConfig::from_env();
    let Some(url) = config.url.as_deref() else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    match classbook_db::init_db_pool(url, config.max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    }
}

fn prompt(value: Option<String>, label: &str) -> Result<String, Box<dyn std::error::Error>> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(label).interact_text()?),
    }
}

async fn handle_create_user(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dto = CreateUserDto {
        first_name: prompt(first_name, "First name")?,
        last_name: prompt(last_name, "Last name")?,
        email: prompt(email, "Email address")?,
    };

    let user = admin::create_user(pool, dto).await?;
    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.full_name());
    Ok(())
}

async fn handle_create_class(
    pool: &PgPool,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = prompt(name, "Class name")?;

    let class = admin::create_class(pool, &name).await?;
    println!("\n✅ Class created successfully!");
    println!("   ID: {}", class.id);
    println!("   Name: {}", class.name);
    Ok(())
}

async fn handle_assign_teacher(
    pool: &PgPool,
    email: Option<String>,
    class_id: Option<ClassId>,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = prompt(email, "Teacher email address")?;
    let class_id = match class_id {
        Some(id) => id,
        None => Input::<String>::new()
            .with_prompt("Class ID")
            .interact_text()?
            .parse()?,
    };

    admin::assign_teacher(pool, &email, class_id).await?;
    println!("\n✅ {} is now a teacher of class {}", email, class_id);
    Ok(())
}

async fn handle_issue_token(
    pool: &PgPool,
    email: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = prompt(email, "Email address")?;

    let token = admin::issue_token(pool, &email, &JwtConfig::from_env()).await?;
    println!("{}", token);
    Ok(())
}
