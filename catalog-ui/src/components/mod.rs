pub mod data_table;
pub mod fields;
pub mod page_header;

pub use data_table::{ActionsCell, DataTable};
pub use fields::{FileField, MultiSelect, NumberField, StringListField, TextAreaField, TextField};
pub use page_header::PageHeader;
