///! Service management commands

use super::{confirm_delete, override_with, print_assets, read_upload, validated};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use catalog_client::CatalogClient;
use catalog_common::columns::service_columns;
use catalog_common::forms::ServiceForm;
use catalog_common::{EntityId, EntityKind, Service};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ServiceCommands {
    /// List all services
    List,
    /// Show service details
    Show { id: EntityId },
    /// Show a service by slug
    ShowSlug { slug: String },
    /// Create a new service
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
        #[arg(long, default_value = "")]
        short_description: String,
        #[arg(long, default_value = "")]
        long_description: String,
        #[arg(long, default_value = "")]
        banner_text: String,
        /// Price ID (repeatable)
        #[arg(long = "price")]
        prices: Vec<String>,
        /// Expert ID (repeatable)
        #[arg(long = "specialist")]
        specialists: Vec<String>,
        #[arg(long)]
        icon: Option<PathBuf>,
        #[arg(long)]
        banner_image: Option<PathBuf>,
    },
    /// Update a service; omitted fields keep their current value
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        short_description: Option<String>,
        #[arg(long)]
        long_description: Option<String>,
    },
    /// Delete a service
    Delete {
        id: EntityId,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

fn print_service_assets(api: &CatalogClient, format: OutputFormat, service: &Service) {
    print_assets(
        api,
        format,
        &[
            ("Icon", service.icon.as_deref()),
            ("Banner", service.banner_image.as_deref()),
        ],
    );
}

pub async fn handle_service_command(
    command: ServiceCommands,
    api: &CatalogClient,
    format: OutputFormat,
) -> Result<()> {
    let services = api.services();

    match command {
        ServiceCommands::List => {
            let rows = services.get_all().await?;
            output::print_records(&service_columns(), &rows, format)?;
        }
        ServiceCommands::Show { id } => {
            let service = services.get_one_by_id(id).await?;
            output::print_single(&service, format)?;
            print_service_assets(api, format, &service);
        }
        ServiceCommands::ShowSlug { slug } => {
            let service = services.get_one_by_slug(&slug).await?;
            output::print_single(&service, format)?;
            print_service_assets(api, format, &service);
        }
        ServiceCommands::Create {
            name,
            slug,
            short_description,
            long_description,
            banner_text,
            prices,
            specialists,
            icon,
            banner_image,
        } => {
            let form = ServiceForm {
                name,
                short_description,
                long_description,
                slug,
                banner_text,
                prices,
                specialists,
                icon: read_upload(icon.as_deref())?,
                banner_image: read_upload(banner_image.as_deref())?,
            };

            let body = validated(form.validate_create())?.into_body();
            let created = services.create(body).await?;
            output::print_created(EntityKind::Service.singular(), &created.name, created.id);
        }
        ServiceCommands::Update {
            id,
            name,
            slug,
            short_description,
            long_description,
        } => {
            let current = services.get_one_by_id(id).await?;
            let mut form = ServiceForm::from(&current);
            override_with(&mut form.name, name);
            override_with(&mut form.slug, slug);
            override_with(&mut form.short_description, short_description);
            override_with(&mut form.long_description, long_description);

            let body = validated(form.validate_update())?.into_body()?;
            let updated = services.update(id, body).await?;
            output::print_updated(EntityKind::Service.singular(), &updated.name, updated.id);
        }
        ServiceCommands::Delete { id, yes } => {
            if !confirm_delete(EntityKind::Service, id, yes)? {
                output::print_info("Aborted");
                return Ok(());
            }
            services.delete(id).await?;
            output::print_deleted(EntityKind::Service.singular(), id);
        }
    }

    Ok(())
}
