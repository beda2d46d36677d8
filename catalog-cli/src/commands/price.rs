///! Price list commands

use super::{confirm_delete, override_with, validated};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use catalog_client::CatalogClient;
use catalog_common::columns::price_columns;
use catalog_common::forms::PriceForm;
use catalog_common::{EntityId, EntityKind};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum PriceCommands {
    /// List all prices
    List,
    /// Show price details
    Show { id: EntityId },
    /// Create a new price
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        old_price: Option<String>,
    },
    /// Update a price; omitted fields keep their current value
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        /// Pass an empty string to clear it
        #[arg(long)]
        old_price: Option<String>,
    },
    /// Delete a price
    Delete {
        id: EntityId,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_price_command(
    command: PriceCommands,
    api: &CatalogClient,
    format: OutputFormat,
) -> Result<()> {
    let prices = api.prices();

    match command {
        PriceCommands::List => {
            let rows = prices.get_all().await?;
            output::print_records(&price_columns(), &rows, format)?;
        }
        PriceCommands::Show { id } => {
            let price = prices.get_one_by_id(id).await?;
            output::print_single(&price, format)?;
        }
        PriceCommands::Create {
            name,
            price,
            old_price,
        } => {
            let form = PriceForm {
                name,
                price,
                old_price: old_price.unwrap_or_default(),
            };

            let body = validated(form.validate())?.into_body()?;
            let created = prices.create(body).await?;
            output::print_created(EntityKind::Price.singular(), &created.name, created.id);
        }
        PriceCommands::Update {
            id,
            name,
            price,
            old_price,
        } => {
            let current = prices.get_one_by_id(id).await?;
            let mut form = PriceForm::from(&current);
            override_with(&mut form.name, name);
            override_with(&mut form.price, price);
            override_with(&mut form.old_price, old_price);

            let body = validated(form.validate())?.into_update_body()?;
            let updated = prices.update(id, body).await?;
            output::print_updated(EntityKind::Price.singular(), &updated.name, updated.id);
        }
        PriceCommands::Delete { id, yes } => {
            if !confirm_delete(EntityKind::Price, id, yes)? {
                output::print_info("Aborted");
                return Ok(());
            }
            prices.delete(id).await?;
            output::print_deleted(EntityKind::Price.singular(), id);
        }
    }

    Ok(())
}
