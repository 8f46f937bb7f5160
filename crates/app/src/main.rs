//! Sweetshop Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use sweetshop_app::{
    auth::{AuthService, NewUser, PgAuthService, UserRole},
    database,
};

#[derive(Debug, Parser)]
#[command(name = "sweetshop-app", about = "Sweetshop CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(UserCommand),
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Username for the new account
    #[arg(long)]
    username: String,

    /// Email address
    #[arg(long)]
    email: String,

    /// Plaintext password; hashed before storage
    #[arg(long)]
    password: String,

    /// Account role
    #[arg(long, default_value = "customer")]
    role: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(args).await,
    }
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    let role: UserRole = args
        .role
        .parse()
        .map_err(|_| format!("unknown role {:?}; expected customer or admin", args.role))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgAuthService::new(pool)
        .register(NewUser {
            username: args.username,
            email: args.email,
            password: args.password,
            role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("role: {}", user.role);

    Ok(())
}
