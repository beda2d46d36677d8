//! Table column definitions per entity

use crate::validation::format_number;
use crate::{Entity, EntityId, Expert, Price, Service};

/// Rendered content of one table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge(String),
    Empty,
    /// Row menu with edit and delete
    Actions(EntityId),
}

impl Cell {
    fn text(value: impl ToString) -> Self {
        Self::Text(value.to_string())
    }

    fn optional(value: Option<impl ToString>) -> Self {
        value.map(Self::text).unwrap_or(Self::Empty)
    }

    /// Plain-text rendering for terminals
    pub fn as_plain(&self) -> String {
        match self {
            Self::Text(text) | Self::Badge(text) => text.clone(),
            Self::Empty => "-".to_string(),
            Self::Actions(_) => String::new(),
        }
    }
}

pub struct Column<T> {
    pub id: &'static str,
    pub header: &'static str,
    pub cell: fn(&T) -> Cell,
}

impl<T> Column<T> {
    pub const fn new(id: &'static str, header: &'static str, cell: fn(&T) -> Cell) -> Self {
        Self { id, header, cell }
    }

    pub fn is_actions(&self) -> bool {
        self.id == ACTIONS_ID
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

const ACTIONS_ID: &str = "actions";

fn actions<T: Entity>() -> Column<T> {
    Column::new(ACTIONS_ID, "", |row: &T| Cell::Actions(row.id()))
}

/// Published services show as "Опубликована", the rest as drafts
pub fn published_label(published: bool) -> &'static str {
    if published {
        "Опубликована"
    } else {
        "Черновик"
    }
}

pub fn expert_columns() -> Vec<Column<Expert>> {
    vec![
        Column::new("id", "ID", |e: &Expert| Cell::text(e.id)),
        Column::new("firstName", "Name", |e: &Expert| Cell::text(&e.first_name)),
        Column::new("lastName", "Last Name", |e: &Expert| Cell::text(&e.last_name)),
        Column::new("middleName", "Middle Name", |e: &Expert| Cell::optional(e.middle_name.as_ref())),
        Column::new("slug", "Slug", |e: &Expert| Cell::text(&e.slug)),
        Column::new("experienceInYears", "Experience", |e: &Expert| {
            Cell::optional(e.experience_in_years)
        }),
        actions(),
    ]
}

pub fn service_columns() -> Vec<Column<Service>> {
    vec![
        Column::new("id", "ID", |s: &Service| Cell::text(s.id)),
        Column::new("name", "Name", |s: &Service| Cell::text(&s.name)),
        Column::new("slug", "Slug", |s: &Service| Cell::text(&s.slug)),
        Column::new("shortDescription", "Short Description", |s: &Service| {
            Cell::optional(s.short_description.as_ref())
        }),
        Column::new("published", "Published", |s: &Service| {
            Cell::Badge(published_label(s.published).to_string())
        }),
        actions(),
    ]
}

pub fn price_columns() -> Vec<Column<Price>> {
    vec![
        Column::new("id", "ID", |p: &Price| Cell::text(p.id)),
        Column::new("name", "Name", |p: &Price| Cell::text(&p.name)),
        Column::new("price", "Price", |p: &Price| Cell::text(format_number(p.price))),
        Column::new("oldPrice", "Old Price", |p: &Price| Cell::optional(p.old_price.map(format_number))),
        actions(),
    ]
}

/// Header row plus one cell per column for each row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableModel {
    pub fn new<T>(columns: &[Column<T>], rows: &[T]) -> Self {
        Self {
            headers: columns.iter().map(|column| column.header).collect(),
            rows: rows
                .iter()
                .map(|row| columns.iter().map(|column| (column.cell)(row)).collect())
                .collect(),
        }
    }

    /// Same table without the actions column, for read-only output
    pub fn without_actions<T>(columns: &[Column<T>], rows: &[T]) -> Self {
        let columns: Vec<Column<T>> = columns
            .iter()
            .filter(|column| !column.is_actions())
            .copied()
            .collect();
        Self::new(&columns, rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(published: bool) -> Service {
        Service {
            id: 5,
            name: "Massage".to_string(),
            short_description: None,
            long_description: None,
            icon: None,
            slug: "massage".to_string(),
            published,
            banner_image: None,
            banner_text: None,
        }
    }

    #[test]
    fn test_service_table_cells() {
        let columns = service_columns();
        let table = TableModel::new(&columns, &[service(true), service(false)]);

        assert_eq!(
            table.headers,
            vec!["ID", "Name", "Slug", "Short Description", "Published", ""]
        );
        assert_eq!(table.rows[0][0], Cell::Text("5".to_string()));
        assert_eq!(table.rows[0][3], Cell::Empty);
        assert_eq!(table.rows[0][4], Cell::Badge("Опубликована".to_string()));
        assert_eq!(table.rows[1][4], Cell::Badge("Черновик".to_string()));
        assert_eq!(table.rows[1][5], Cell::Actions(5));
    }

    #[test]
    fn test_price_table_without_actions() {
        let price = Price {
            id: 1,
            name: "Session".to_string(),
            price: 1500.0,
            old_price: Some(1800.0),
        };

        let table = TableModel::without_actions(&price_columns(), &[price]);
        assert_eq!(table.headers, vec!["ID", "Name", "Price", "Old Price"]);
        let plain: Vec<String> = table.rows[0].iter().map(Cell::as_plain).collect();
        assert_eq!(plain, vec!["1", "Session", "1500", "1800"]);
    }

    #[test]
    fn test_expert_columns_order() {
        let headers: Vec<&str> = expert_columns().iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            vec!["ID", "Name", "Last Name", "Middle Name", "Slug", "Experience", ""]
        );
    }
}
