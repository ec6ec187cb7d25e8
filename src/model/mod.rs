//! Typed wire schema of the Notion API resources.
//!
//! Unions keyed by a `type` field (blocks, property values, property schemas,
//! parents) are Rust enums; an unrecognised tag is a decode error rather than
//! an empty value.

mod block;
mod database;
mod page;
mod property;
mod query;
mod rich_text;
mod tagged;

pub use block::{
    Block, BlockKind, BlockMeta, BookmarkBlock, CalloutBlock, ChildTitle, CodeBlock,
    ContainerBlock, EquationBlock, ExternalFile, FileBlock, HeadingBlock, HostedFile, Icon,
    SyncedBlock, SyncedFrom, TableBlock, TableOfContentsBlock, TableRowBlock, TextBlock,
    ToDoBlock, UrlBlock,
};
pub use database::Database;
pub use page::{NewPage, Page, Parent};
pub use property::{
    DateRange, NumberFormat, PropertySchema, PropertySchemaKind, PropertySchemaMeta,
    PropertyValue, PropertyValueKind, PropertyValueMeta, Relation, SelectOption, SelectOptions,
    User,
};
pub use query::{
    CheckboxCondition, DatabaseQuery, DateCondition, Filter, FilterCondition,
    MultiSelectCondition, NumberCondition, PropertyFilter, SelectCondition, Sort, SortDirection,
    SortTimestamp, TextCondition,
};
pub use rich_text::{Annotations, Color, Link, RichText, TextContent};
pub use tagged::{Empty, SchemaError};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}
