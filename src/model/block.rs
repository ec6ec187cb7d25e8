use serde::{Deserialize, Serialize};

use super::is_false;
use super::rich_text::RichText;
use super::tagged::{Empty, RawTagged, SchemaError, TaggedUnion};

/// A content block, e.g. a paragraph or a heading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTagged<BlockMeta>")]
pub struct Block {
    #[serde(flatten)]
    pub meta: BlockMeta,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            meta: BlockMeta::default(),
            kind,
        }
    }
}

impl From<BlockKind> for Block {
    fn from(kind: BlockKind) -> Self {
        Self::new(kind)
    }
}

impl TryFrom<RawTagged<BlockMeta>> for Block {
    type Error = SchemaError;

    fn try_from(raw: RawTagged<BlockMeta>) -> Result<Self, Self::Error> {
        let (meta, kind) = raw.resolve()?;
        Ok(Self { meta, kind })
    }
}

/// Fields every block carries regardless of its type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_children: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub in_trash: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph(TextBlock),
    #[serde(rename = "heading_1")]
    Heading1(HeadingBlock),
    #[serde(rename = "heading_2")]
    Heading2(HeadingBlock),
    #[serde(rename = "heading_3")]
    Heading3(HeadingBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    Quote(TextBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Image(FileBlock),
    Video(FileBlock),
    Audio(FileBlock),
    File(FileBlock),
    Pdf(FileBlock),
    Bookmark(BookmarkBlock),
    Embed(UrlBlock),
    LinkPreview(UrlBlock),
    SyncedBlock(SyncedBlock),
    ChildPage(ChildTitle),
    ChildDatabase(ChildTitle),
    ColumnList(ContainerBlock),
    Column(ContainerBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    TableOfContents(TableOfContentsBlock),
    Breadcrumb(Empty),
    Divider(Empty),
    Template(TextBlock),
    /// A block type the API itself cannot expose.
    Unsupported(Empty),
}

impl TaggedUnion for BlockKind {
    const KIND: &'static str = "block";
    const TAGS: &'static [&'static str] = &[
        "paragraph",
        "heading_1",
        "heading_2",
        "heading_3",
        "bulleted_list_item",
        "numbered_list_item",
        "to_do",
        "toggle",
        "quote",
        "callout",
        "code",
        "equation",
        "image",
        "video",
        "audio",
        "file",
        "pdf",
        "bookmark",
        "embed",
        "link_preview",
        "synced_block",
        "child_page",
        "child_database",
        "column_list",
        "column",
        "table",
        "table_row",
        "table_of_contents",
        "breadcrumb",
        "divider",
        "template",
        "unsupported",
    ];
}

/// Paragraphs, list items, toggles, quotes and templates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl TextBlock {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            rich_text: vec![RichText::text(content)],
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_toggleable: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// `emoji`, `external` or `file`.
    #[serde(rename = "type", default)]
    pub icon_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<HostedFile>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationBlock {
    pub expression: String,
}

/// Images, video, audio, files and PDFs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
    /// `external` or `file`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<HostedFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FileBlock {
    /// Location of the media, wherever it is hosted.
    pub fn url(&self) -> Option<&str> {
        self.external
            .as_ref()
            .map(|external| external.url.as_str())
            .or_else(|| self.file.as_ref().map(|file| file.url.as_str()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// A file stored by Notion; `url` expires at `expiry_time`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
    pub url: String,
}

/// Embeds and link previews.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlBlock {
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncedBlock {
    /// `None` for the original block, set on every duplicate.
    #[serde(default)]
    pub synced_from: Option<SyncedFrom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedFrom {
    #[serde(rename = "type", default)]
    pub source_type: String,
    pub block_id: String,
}

/// Child pages and child databases expose only their title.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTitle {
    #[serde(default)]
    pub title: String,
}

/// Column lists and columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub table_width: u32,
    #[serde(default)]
    pub has_column_header: bool,
    #[serde(default)]
    pub has_row_header: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRowBlock {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContentsBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
