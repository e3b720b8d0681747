use clap::{Args, Subcommand};

mod create;
mod vendor;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register a shopper account
    Create(create::CreateUserArgs),

    /// Create or update the vendor profile of a user
    Vendor(vendor::VendorArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Vendor(args) => vendor::run(args).await,
    }
}
