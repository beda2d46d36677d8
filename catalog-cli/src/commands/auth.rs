///! Authentication commands

use crate::config::Config;
use crate::output;
use anyhow::Result;
use catalog_client::CatalogClient;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Log in and store the access token
    Login {
        #[arg(short, long)]
        email: String,

        /// Password (will be prompted if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Logout (clear stored credentials)
    Logout,

    /// Show current authentication status
    Status,
}

pub async fn handle_auth_command(
    command: AuthCommands,
    api: &CatalogClient,
    config: &mut Config,
) -> Result<()> {
    match command {
        AuthCommands::Login { email, password } => {
            let password = if let Some(pwd) = password {
                pwd
            } else {
                use dialoguer::Password;
                Password::new().with_prompt("Password").interact()?
            };

            let token = api.login(&email, &password).await?;

            config.token = Some(token);
            config.email = Some(email.clone());
            config.save()?;

            output::print_success(&format!("Logged in as {}", email));
        }

        AuthCommands::Logout => {
            config.token = None;
            config.email = None;
            config.save()?;

            output::print_success("Logged out successfully");
        }

        AuthCommands::Status => match (&config.token, &config.email) {
            (Some(token), email) => {
                println!(
                    "Authenticated as: {}",
                    email.as_deref().unwrap_or("(unknown account)")
                );
                let preview: String = token.chars().take(12).collect();
                println!("Token: {}...", preview);
            }
            (None, _) => {
                println!("Not authenticated");
                println!("Use 'catalog auth login' to authenticate");
            }
        },
    }

    Ok(())
}
