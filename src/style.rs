use crate::block::Block;

/// Deepest list level that still gets additional indentation.
pub const MAX_LIST_LEVEL: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSpacing {
    /// Multiple of single line height
    Multiple(f32),
    /// Exact line pitch in points
    Fixed(f32),
}

impl Default for LineSpacing {
    fn default() -> Self {
        LineSpacing::Multiple(1.0)
    }
}

/// Visual attributes for one block. All lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    pub font_latin: &'static str,
    pub font_cjk: &'static str,
    pub size: f32,
    pub bold: bool,
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
    pub line_spacing: LineSpacing,
    /// Negative values produce a hanging indent
    pub first_line_indent: f32,
    pub left_indent: f32,
    /// Hex RGB without the leading `#`
    pub color: Option<&'static str>,
}

impl StyleRecord {
    /// Start-aligned, single spaced, unindented text in the given fonts.
    pub const fn text(font_latin: &'static str, font_cjk: &'static str, size: f32) -> Self {
        Self {
            font_latin,
            font_cjk,
            size,
            bold: false,
            alignment: Alignment::Start,
            space_before: 0.0,
            space_after: 0.0,
            line_spacing: LineSpacing::Multiple(1.0),
            first_line_indent: 0.0,
            left_indent: 0.0,
            color: None,
        }
    }
}

/// What a block is styled as.
///
/// Most keys follow directly from the block kind; `Title`, `Reference` and
/// `Caption` are only reached through a profile's paragraph rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Title,
    Heading(u8),
    Body,
    ListItem(usize),
    TableHeader,
    TableBody,
    Reference,
    Caption,
}

impl StyleKey {
    /// Style for a block from its kind and level alone.
    pub fn for_block(block: &Block) -> Option<StyleKey> {
        match block {
            Block::Heading { level, .. } => Some(StyleKey::Heading(*level)),
            Block::Paragraph { .. } => Some(StyleKey::Body),
            Block::BulletItem { level, .. }
            | Block::TaskItem { level, .. }
            | Block::OrderedItem { level, .. } => Some(StyleKey::ListItem(*level)),
            Block::Table { .. } | Block::Blank | Block::Separator => None,
        }
    }
}

/// Complete mapping from style keys to records.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub title: StyleRecord,
    pub headings: [StyleRecord; 4],
    pub body: StyleRecord,
    pub list_item: StyleRecord,
    /// Extra left indent per list nesting level
    pub list_indent_step: f32,
    pub table_header: StyleRecord,
    pub table_body: StyleRecord,
    pub reference: StyleRecord,
    pub caption: StyleRecord,
}

impl StyleSheet {
    /// Resolve a key to its record. Out-of-range levels clamp to the nearest
    /// defined tier, so this never fails.
    pub fn lookup(&self, key: StyleKey) -> StyleRecord {
        match key {
            StyleKey::Title => self.title.clone(),
            StyleKey::Heading(level) => {
                let tier = usize::from(level.clamp(1, 4)) - 1;
                self.headings[tier].clone()
            }
            StyleKey::Body => self.body.clone(),
            StyleKey::ListItem(level) => {
                let level = level.min(MAX_LIST_LEVEL) as f32;
                StyleRecord {
                    left_indent: self.list_item.left_indent + self.list_indent_step * level,
                    ..self.list_item.clone()
                }
            }
            StyleKey::TableHeader => self.table_header.clone(),
            StyleKey::TableBody => self.table_body.clone(),
            StyleKey::Reference => self.reference.clone(),
            StyleKey::Caption => self.caption.clone(),
        }
    }
}
