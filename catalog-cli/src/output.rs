///! Output formatting for CLI
///!
///! Records are printed through the same column definitions the dashboard
///! table uses, or dumped as JSON/YAML.

use catalog_common::columns::{Column, TableModel};
use catalog_common::validation::FormErrors;
use colored::Colorize;
use serde::Serialize;
use tabled::builder::Builder;

const MAX_CELL_WIDTH: usize = 40;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "yaml" | "yml" => OutputFormat::Yaml,
            _ => OutputFormat::Table,
        }
    }
}

/// Print a list of records as a table, JSON or YAML
pub fn print_records<T: Serialize>(
    columns: &[Column<T>],
    rows: &[T],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(&TableModel::without_actions(columns, rows)),
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Yaml => print_yaml(&rows)?,
    }
    Ok(())
}

/// Print a single item in the specified format
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        // Single records have nested lists, so the table view falls back to JSON
        OutputFormat::Table | OutputFormat::Json => print_json(data)?,
        OutputFormat::Yaml => print_yaml(data)?,
    }
    Ok(())
}

pub fn render_table(model: &TableModel) -> String {
    let mut builder = Builder::default();
    builder.push_record(model.headers.iter().map(|header| header.to_string()));
    for row in &model.rows {
        builder.push_record(row.iter().map(|cell| truncate(&cell.as_plain(), MAX_CELL_WIDTH)));
    }
    builder.build().to_string()
}

pub fn print_table(model: &TableModel) {
    if model.is_empty() {
        println!("{}", "No results found".yellow());
        return;
    }

    println!("{}", render_table(model));
}

/// Print data as pretty-printed JSON
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    println!("{}", yaml);
    Ok(())
}

/// Print a success message with green checkmark
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print a success message for resource creation
pub fn print_created(resource_type: &str, name: &str, id: i64) {
    println!(
        "{} {} '{}' created (ID: {})",
        "✓".green().bold(),
        resource_type.green(),
        name.green().bold(),
        id.to_string().dimmed()
    );
}

pub fn print_updated(resource_type: &str, name: &str, id: i64) {
    println!(
        "{} {} '{}' updated (ID: {})",
        "✓".green().bold(),
        resource_type.green(),
        name.green().bold(),
        id.to_string().dimmed()
    );
}

/// Print a success message for resource deletion
pub fn print_deleted(resource_type: &str, id: i64) {
    println!(
        "{} {} '{}' deleted",
        "✓".green().bold(),
        resource_type.green(),
        id.to_string().green().bold()
    );
}

/// Print an error message with red X
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Print an info message with blue i
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// One line per invalid field
pub fn print_form_errors(errors: &FormErrors) {
    for (field, error) in errors.iter() {
        print_error(&format!("{}: {}", field, error));
    }
}

/// Truncate a string to max characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::columns::price_columns;
    use catalog_common::Price;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("yml"), OutputFormat::Yaml);
        assert_eq!(OutputFormat::parse("anything"), OutputFormat::Table);
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Массаж спины", 9), "Массаж...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_render_table_drops_actions_column() {
        let prices = vec![Price {
            id: 1,
            name: "Session".to_string(),
            price: 1500.0,
            old_price: None,
        }];

        let rendered = render_table(&TableModel::without_actions(&price_columns(), &prices));
        assert!(rendered.contains("Old Price"));
        assert!(rendered.contains("Session"));
        assert!(rendered.contains("1500"));
    }
}
