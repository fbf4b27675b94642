/// Inline text run with a single emphasis state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub content: String,
    pub emphasized: bool,
}

impl Run {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            emphasized: true,
        }
    }
}

/// Discriminant of a [`Block`], used for style lookup and list bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Paragraph,
    BulletItem,
    TaskItem,
    OrderedItem,
    Table,
    Blank,
    Separator,
}

/// Block-level elements classified from the source lines.
///
/// Marker characters are already stripped from `text`. List `level` is the
/// leading whitespace width divided by two, rounded down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    BulletItem {
        level: usize,
        text: String,
    },
    TaskItem {
        level: usize,
        checked: bool,
        text: String,
    },
    OrderedItem {
        level: usize,
        /// Number exactly as written in the source, never recomputed
        ordinal: u64,
        text: String,
    },
    Table {
        rows: Vec<Vec<String>>,
    },
    Blank,
    Separator,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::BulletItem { .. } => BlockKind::BulletItem,
            Block::TaskItem { .. } => BlockKind::TaskItem,
            Block::OrderedItem { .. } => BlockKind::OrderedItem,
            Block::Table { .. } => BlockKind::Table,
            Block::Blank => BlockKind::Blank,
            Block::Separator => BlockKind::Separator,
        }
    }

    /// Heading depth or list nesting depth; zero for everything else.
    pub fn level(&self) -> usize {
        match self {
            Block::Heading { level, .. } => usize::from(*level),
            Block::BulletItem { level, .. }
            | Block::TaskItem { level, .. }
            | Block::OrderedItem { level, .. } => *level,
            _ => 0,
        }
    }

    /// Inline content of text-bearing blocks.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::BulletItem { text, .. }
            | Block::TaskItem { text, .. }
            | Block::OrderedItem { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Blank lines and separators produce nothing in the output.
    pub fn is_emitted(&self) -> bool {
        !matches!(self, Block::Blank | Block::Separator)
    }
}

/// A block together with its position in the list numbering stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub block: Block,
    /// Set on ordered items that begin a fresh list for native numbering
    pub list_start: bool,
}
