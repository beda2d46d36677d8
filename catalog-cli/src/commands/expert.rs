///! Expert management commands

use super::{confirm_delete, override_with, print_assets, read_upload, validated};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use catalog_client::CatalogClient;
use catalog_common::columns::expert_columns;
use catalog_common::forms::ExpertForm;
use catalog_common::{EntityId, EntityKind};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ExpertCommands {
    /// List all experts
    List,
    /// Show expert details
    Show { id: EntityId },
    /// Show an expert by slug
    ShowSlug { slug: String },
    /// Create a new expert
    Create {
        #[command(flatten)]
        fields: ExpertFields,
        /// Profile photo to upload
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Update an expert; omitted fields keep their current value
    Update {
        id: EntityId,
        #[command(flatten)]
        fields: ExpertFields,
        /// Replace the profile photo
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Delete an expert
    Delete {
        id: EntityId,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ExpertFields {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    middle_name: Option<String>,
    #[arg(long)]
    slug: Option<String>,
    /// Experience in years
    #[arg(long)]
    experience: Option<String>,
    #[arg(long)]
    rank: Option<String>,
    /// Tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Specialization (repeatable)
    #[arg(long = "specialization")]
    specializations: Vec<String>,
    /// Service ID offered by the expert (repeatable)
    #[arg(long = "service")]
    services: Vec<String>,
    /// Remove every tag
    #[arg(long, conflicts_with = "tags")]
    clear_tags: bool,
    /// Remove every specialization
    #[arg(long, conflicts_with = "specializations")]
    clear_specializations: bool,
    /// Detach every service
    #[arg(long, conflicts_with = "services")]
    clear_services: bool,
}

/// An empty repeatable flag keeps the current list unless `clear` is set
fn replace_list(list: &mut Vec<String>, values: Vec<String>, clear: bool) {
    if clear {
        list.clear();
    } else if !values.is_empty() {
        *list = values;
    }
}

impl ExpertFields {
    fn apply(self, form: &mut ExpertForm) {
        override_with(&mut form.first_name, self.first_name);
        override_with(&mut form.last_name, self.last_name);
        override_with(&mut form.middle_name, self.middle_name);
        override_with(&mut form.slug, self.slug);
        override_with(&mut form.experience_in_years, self.experience);
        override_with(&mut form.rank, self.rank);
        replace_list(&mut form.tags, self.tags, self.clear_tags);
        replace_list(
            &mut form.specializations,
            self.specializations,
            self.clear_specializations,
        );
        replace_list(&mut form.services, self.services, self.clear_services);
    }
}

pub async fn handle_expert_command(
    command: ExpertCommands,
    api: &CatalogClient,
    format: OutputFormat,
) -> Result<()> {
    let experts = api.experts();

    match command {
        ExpertCommands::List => {
            let rows = experts.get_all().await?;
            output::print_records(&expert_columns(), &rows, format)?;
        }
        ExpertCommands::Show { id } => {
            let expert = experts.get_one_by_id(id).await?;
            output::print_single(&expert, format)?;
            print_assets(api, format, &[("Photo", expert.photo.as_deref())]);
        }
        ExpertCommands::ShowSlug { slug } => {
            let expert = experts.get_one_by_slug(&slug).await?;
            output::print_single(&expert, format)?;
            print_assets(api, format, &[("Photo", expert.photo.as_deref())]);
        }
        ExpertCommands::Create { fields, photo } => {
            let mut form = ExpertForm::default();
            fields.apply(&mut form);
            form.photo = read_upload(photo.as_deref())?;

            let body = validated(form.validate())?.into_create_body();
            let created = experts.create(body).await?;
            output::print_created(EntityKind::Expert.singular(), &created.full_name(), created.id);
        }
        ExpertCommands::Update { id, fields, photo } => {
            let current = experts.get_one_by_id(id).await?;
            let mut form = ExpertForm::from(&current);
            fields.apply(&mut form);
            form.photo = read_upload(photo.as_deref())?;

            let body = validated(form.validate())?.into_update_body()?;
            let updated = experts.update(id, body).await?;
            output::print_updated(EntityKind::Expert.singular(), &updated.full_name(), updated.id);
        }
        ExpertCommands::Delete { id, yes } => {
            if !confirm_delete(EntityKind::Expert, id, yes)? {
                output::print_info("Aborted");
                return Ok(());
            }
            experts.delete(id).await?;
            output::print_deleted(EntityKind::Expert.singular(), id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_override_prefilled_form() {
        let mut form = ExpertForm {
            first_name: "Anna".to_string(),
            last_name: "Petrova".to_string(),
            slug: "anna".to_string(),
            tags: vec!["old".to_string()],
            ..ExpertForm::default()
        };

        ExpertFields {
            last_name: Some("Sidorova".to_string()),
            tags: vec!["new".to_string()],
            ..ExpertFields::default()
        }
        .apply(&mut form);

        assert_eq!(form.first_name, "Anna");
        assert_eq!(form.last_name, "Sidorova");
        assert_eq!(form.tags, vec!["new".to_string()]);
    }

    #[test]
    fn test_clear_flags_empty_lists() {
        let mut form = ExpertForm {
            tags: vec!["calm".to_string()],
            specializations: vec!["kids".to_string()],
            services: vec!["3".to_string()],
            ..ExpertForm::default()
        };

        ExpertFields {
            clear_tags: true,
            clear_services: true,
            ..ExpertFields::default()
        }
        .apply(&mut form);

        assert!(form.tags.is_empty());
        assert!(form.services.is_empty());
        assert_eq!(form.specializations, vec!["kids".to_string()]);
    }
}
