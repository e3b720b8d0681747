use clap::Args;
use storefront_app::domain::users::{
    PgUsersService, UsersService,
    data::VendorProfile,
    records::{UserId, VendorStatus},
};

#[derive(Debug, Args)]
pub(crate) struct VendorArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User that sells through this store
    #[arg(long)]
    user_id: i64,

    /// Store name shown to shoppers
    #[arg(long)]
    store_name: String,

    /// Store postal address
    #[arg(long)]
    store_address: Option<String>,

    /// pending, approved or rejected
    #[arg(long, default_value = "pending")]
    status: VendorStatus,
}

pub(crate) async fn run(args: VendorArgs) -> Result<(), String> {
    let pool = super::super::connect(&args.database_url).await?;

    let vendor = PgUsersService::new(pool)
        .save_vendor_profile(VendorProfile {
            user_id: UserId::from_i64(args.user_id),
            status: args.status,
            store_name: args.store_name,
            store_address: args.store_address,
        })
        .await
        .map_err(|error| format!("failed to save vendor profile: {error}"))?;

    println!("user_id: {}", vendor.user_id);
    println!("store_name: {}", vendor.store_name);
    println!("status: {}", vendor.status);

    Ok(())
}
