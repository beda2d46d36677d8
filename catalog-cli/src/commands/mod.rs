pub mod auth;
pub mod expert;
pub mod price;
pub mod service;

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use catalog_client::CatalogClient;
use catalog_common::payload::FileUpload;
use catalog_common::validation::FormErrors;
use catalog_common::{EntityId, EntityKind};
use std::path::Path;

/// Stop with every field error listed when a form does not validate
pub(crate) fn validated<T>(result: Result<T, FormErrors>) -> Result<T> {
    result.map_err(|errors| {
        output::print_form_errors(&errors);
        anyhow::anyhow!("validation failed for {} field(s)", errors.len())
    })
}

pub(crate) fn read_upload(path: Option<&Path>) -> Result<Option<FileUpload>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(Some(FileUpload::from_bytes(file_name, bytes)))
}

pub(crate) fn confirm_delete(kind: EntityKind, id: EntityId, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("Delete {} {}?", kind, id))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Full URLs of a record's uploaded files, table output only
pub(crate) fn print_assets(
    api: &CatalogClient,
    format: OutputFormat,
    assets: &[(&str, Option<&str>)],
) {
    if format != OutputFormat::Table {
        return;
    }
    for (label, filename) in assets {
        if let Some(filename) = filename {
            output::print_info(&format!("{}: {}", label, api.asset_url(filename)));
        }
    }
}

/// Replace the field when a new value was given on the command line
pub(crate) fn override_with<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}
