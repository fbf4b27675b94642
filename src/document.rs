//! Target document model.
//!
//! The emitter only talks to [`DocumentModel`]; [`RichDocument`] is the
//! in-memory implementation that the renderers and statistics read back.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::style::{Alignment, LineSpacing};

/// Page size and margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub font_latin: String,
    pub font_cjk: String,
    pub size: f32,
    pub bold: bool,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphFormat {
    pub alignment: Alignment,
    pub space_before: f32,
    pub space_after: f32,
    pub line_spacing: LineSpacing,
    pub first_line_indent: f32,
    pub left_indent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
}

/// Request for native list numbering on a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub kind: ListKind,
    pub level: usize,
    /// Start counting again from one at this level
    pub restart: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderLine {
    None,
    #[default]
    Single,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub line: BorderLine,
    pub weight: f32,
    /// Hex RGB without the leading `#`
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub format: ParagraphFormat,
    pub list: Option<ListMarker>,
    pub runs: Vec<StyledRun>,
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: usize,
    pub cols: usize,
    /// Row-major, one paragraph per cell
    pub cells: Vec<Paragraph>,
    pub borders: Option<Border>,
    pub alignment: Alignment,
}

impl Table {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Paragraph::default(); rows * cols],
            borders: None,
            alignment: Alignment::Start,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Paragraph> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Paragraph> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get_mut(row * self.cols + col)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphRef {
    Body(usize),
    Cell { table: usize, row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRef(usize);

/// Operations the emitter needs from a rich-text document.
///
/// Implementations are append-only: nodes are created in order and never
/// removed.
pub trait DocumentModel {
    fn set_page(&mut self, page: PageSetup);
    fn add_paragraph(&mut self) -> ParagraphRef;
    fn append_run(&mut self, at: ParagraphRef, run: StyledRun) -> Result<()>;
    fn format_paragraph(&mut self, at: ParagraphRef, format: ParagraphFormat) -> Result<()>;
    fn mark_list(&mut self, at: ParagraphRef, marker: ListMarker) -> Result<()>;
    fn add_table(&mut self, rows: usize, cols: usize) -> TableRef;
    fn cell(&self, table: TableRef, row: usize, col: usize) -> Result<ParagraphRef>;
    fn set_table_borders(&mut self, table: TableRef, border: Border) -> Result<()>;
    fn set_table_alignment(&mut self, table: TableRef, alignment: Alignment) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichDocument {
    pub page: Option<PageSetup>,
    pub body: Vec<Node>,
}

impl RichDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every paragraph in document order, table cells included.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().flat_map(|node| match node {
            Node::Paragraph(p) => std::slice::from_ref(p).iter(),
            Node::Table(t) => t.cells.iter(),
        })
    }

    fn table_mut(&mut self, table: TableRef) -> Result<&mut Table> {
        match self.body.get_mut(table.0) {
            Some(Node::Table(t)) => Ok(t),
            _ => Err(Error::InvalidHandle(format!("table {}", table.0))),
        }
    }

    fn paragraph_mut(&mut self, at: ParagraphRef) -> Result<&mut Paragraph> {
        let missing = || Error::InvalidHandle(format!("paragraph {at:?}"));
        match at {
            ParagraphRef::Body(index) => match self.body.get_mut(index) {
                Some(Node::Paragraph(p)) => Ok(p),
                _ => Err(missing()),
            },
            ParagraphRef::Cell { table, row, col } => match self.body.get_mut(table) {
                Some(Node::Table(t)) => t.cell_mut(row, col).ok_or_else(missing),
                _ => Err(missing()),
            },
        }
    }
}

impl DocumentModel for RichDocument {
    fn set_page(&mut self, page: PageSetup) {
        self.page = Some(page);
    }

    fn add_paragraph(&mut self) -> ParagraphRef {
        self.body.push(Node::Paragraph(Paragraph::default()));
        ParagraphRef::Body(self.body.len() - 1)
    }

    fn append_run(&mut self, at: ParagraphRef, run: StyledRun) -> Result<()> {
        self.paragraph_mut(at)?.runs.push(run);
        Ok(())
    }

    fn format_paragraph(&mut self, at: ParagraphRef, format: ParagraphFormat) -> Result<()> {
        self.paragraph_mut(at)?.format = format;
        Ok(())
    }

    fn mark_list(&mut self, at: ParagraphRef, marker: ListMarker) -> Result<()> {
        self.paragraph_mut(at)?.list = Some(marker);
        Ok(())
    }

    fn add_table(&mut self, rows: usize, cols: usize) -> TableRef {
        self.body.push(Node::Table(Table::new(rows, cols)));
        TableRef(self.body.len() - 1)
    }

    fn cell(&self, table: TableRef, row: usize, col: usize) -> Result<ParagraphRef> {
        match self.body.get(table.0) {
            Some(Node::Table(t)) if t.cell(row, col).is_some() => Ok(ParagraphRef::Cell {
                table: table.0,
                row,
                col,
            }),
            _ => Err(Error::InvalidHandle(format!(
                "cell ({row}, {col}) of table {}",
                table.0
            ))),
        }
    }

    fn set_table_borders(&mut self, table: TableRef, border: Border) -> Result<()> {
        self.table_mut(table)?.borders = Some(border);
        Ok(())
    }

    fn set_table_alignment(&mut self, table: TableRef, alignment: Alignment) -> Result<()> {
        self.table_mut(table)?.alignment = alignment;
        Ok(())
    }
}
