use clap::Args;
use storefront_app::domain::users::{PgUsersService, UsersService, data::NewUser};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login email, unique per user
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.email.trim().is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = super::super::connect(&args.database_url).await?;

    let user = PgUsersService::new(pool)
        .create_user(NewUser {
            name: args.name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("user_name: {}", user.name);
    println!("user_email: {}", user.email);

    Ok(())
}
