use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type BlockId = String;
pub type Fields = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub background_color: String,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    pub fields: Fields,
    #[serde(default)]
    pub children_ids: Vec<BlockId>,
    pub content: Content,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, content: Content) -> Self {
        Self {
            id: id.into(),
            background_color: String::new(),
            vertical_align: VerticalAlign::default(),
            fields: Fields::new(),
            children_ids: Vec::new(),
            content,
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<BlockId>,
    {
        self.children_ids = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn text(id: impl Into<BlockId>, text: impl Into<String>) -> Self {
        Self::new(id, Content::Text(TextContent::new(text)))
    }

    pub fn table(id: impl Into<BlockId>) -> Self {
        Self::new(id, Content::Table)
    }

    pub fn column(id: impl Into<BlockId>) -> Self {
        Self::new(id, Content::TableColumn)
    }

    pub fn row(id: impl Into<BlockId>, is_header: bool) -> Self {
        Self::new(id, Content::TableRow(TableRowContent { is_header }))
    }

    pub fn layout(id: impl Into<BlockId>, style: LayoutStyle) -> Self {
        Self::new(id, Content::Layout(LayoutContent { style }))
    }

    pub fn other(id: impl Into<BlockId>, kind: impl Into<String>) -> Self {
        Self::new(
            id,
            Content::Other(OtherContent {
                kind: kind.into(),
                attrs: Fields::new(),
            }),
        )
    }

    pub fn text_content(&self) -> Option<&TextContent> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_content_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, Content::Text(_))
    }

    pub fn is_table(&self) -> bool {
        matches!(self.content, Content::Table)
    }

    pub fn is_table_column(&self) -> bool {
        matches!(self.content, Content::TableColumn)
    }

    pub fn table_row(&self) -> Option<&TableRowContent> {
        match &self.content {
            Content::TableRow(row) => Some(row),
            _ => None,
        }
    }

    pub fn table_row_mut(&mut self) -> Option<&mut TableRowContent> {
        match &mut self.content {
            Content::TableRow(row) => Some(row),
            _ => None,
        }
    }

    pub fn layout_style(&self) -> Option<LayoutStyle> {
        match &self.content {
            Content::Layout(layout) => Some(layout.style),
            _ => None,
        }
    }

    /// A text block that carries nothing worth keeping: no text, marks, check,
    /// color, icon, block background, or vertical alignment.
    pub fn is_empty_text(&self) -> bool {
        match &self.content {
            Content::Text(text) => {
                text.is_empty()
                    && self.background_color.is_empty()
                    && self.vertical_align == VerticalAlign::default()
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text(TextContent),
    Table,
    TableColumn,
    TableRow(TableRowContent),
    Layout(LayoutContent),
    Other(OtherContent),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRowContent {
    #[serde(default)]
    pub is_header: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutContent {
    pub style: LayoutStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStyle {
    TableColumns,
    TableRows,
    Row,
    Column,
    Div,
    Header,
}

/// Content the table core does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherContent {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    pub attrs: Fields,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    #[default]
    Paragraph,
    Header1,
    Header2,
    Header3,
    Quote,
    Code,
    Checkbox,
    Marked,
    Numbered,
    Toggle,
    Title,
    Description,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub range: MarkRange,
    pub kind: MarkKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub param: String,
}

/// Half-open range in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkRange {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    Strikethrough,
    Keyboard,
    Italic,
    Bold,
    Underscored,
    Link,
    TextColor,
    BackgroundColor,
    Mention,
    Emoji,
    Object,
}

impl Mark {
    pub fn new(kind: MarkKind, from: usize, to: usize) -> Self {
        Self {
            range: MarkRange { from, to },
            kind,
            param: String::new(),
        }
    }

    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.marks.is_empty()
            && !self.checked
            && self.color.is_empty()
            && self.icon.is_empty()
    }

    /// Appends `other` to this text. Marks of `other` are shifted by the
    /// current length in chars.
    pub fn merge(&mut self, other: &TextContent) {
        let shift = self.text.chars().count();
        self.text.push_str(&other.text);
        self.marks.extend(other.marks.iter().map(|mark| Mark {
            range: MarkRange {
                from: mark.range.from + shift,
                to: mark.range.to + shift,
            },
            kind: mark.kind,
            param: mark.param.clone(),
        }));
        self.normalize_marks();
    }

    pub fn normalize_marks(&mut self) {
        let mut marks = std::mem::take(&mut self.marks);
        marks.sort_by(|a, b| {
            a.range
                .from
                .cmp(&b.range.from)
                .then(a.range.to.cmp(&b.range.to))
                .then(a.kind.cmp(&b.kind))
        });

        let mut out: Vec<Mark> = Vec::with_capacity(marks.len());
        for mark in marks {
            let fused = out.iter_mut().rev().find(|prev| {
                prev.kind == mark.kind
                    && prev.param == mark.param
                    && prev.range.to >= mark.range.from
            });
            match fused {
                Some(prev) => prev.range.to = prev.range.to.max(mark.range.to),
                None => out.push(mark),
            }
        }
        self.marks = out;
    }
}
