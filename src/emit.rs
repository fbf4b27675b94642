use crate::block::{Block, Classified, Run};
use crate::config::Numbering;
use crate::document::{
    Border, DocumentModel, ListKind, ListMarker, ParagraphFormat, ParagraphRef, StyledRun,
};
use crate::error::Result;
use crate::inline::split_runs;
use crate::profile::{CitationStyle, StyleProfile};
use crate::style::{StyleKey, StyleRecord};

#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub numbering: Numbering,
    pub border: Border,
}

/// How many body nodes were created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emitted {
    pub paragraphs: usize,
    pub tables: usize,
}

impl Emitted {
    pub fn total(&self) -> usize {
        self.paragraphs + self.tables
    }
}

/// Write classified blocks into `doc` in order, one paragraph or table per
/// emitted block.
pub fn emit<D: DocumentModel>(
    blocks: &[Classified],
    profile: &StyleProfile,
    options: &EmitOptions,
    doc: &mut D,
) -> Result<Emitted> {
    let mut emitter = Emitter {
        doc,
        profile,
        options,
        emitted: Emitted::default(),
    };
    emitter.doc.set_page(profile.page);

    for classified in blocks {
        match &classified.block {
            Block::Blank | Block::Separator => {}
            Block::Table { rows } => emitter.table(rows)?,
            block => emitter.text_block(block, classified.list_start)?,
        }
    }

    Ok(emitter.emitted)
}

fn paragraph_format(style: &StyleRecord) -> ParagraphFormat {
    ParagraphFormat {
        alignment: style.alignment,
        space_before: style.space_before,
        space_after: style.space_after,
        line_spacing: style.line_spacing,
        first_line_indent: style.first_line_indent,
        left_indent: style.left_indent,
    }
}

struct Emitter<'a, D: DocumentModel> {
    doc: &'a mut D,
    profile: &'a StyleProfile,
    options: &'a EmitOptions,
    emitted: Emitted,
}

impl<D: DocumentModel> Emitter<'_, D> {
    fn text_block(&mut self, block: &Block, list_start: bool) -> Result<()> {
        let Some(base) = StyleKey::for_block(block) else {
            return Ok(());
        };
        let text = block.text().unwrap_or_default().trim();

        let (marker, text) = match block {
            Block::OrderedItem { level, ordinal, .. } => match self.options.numbering {
                Numbering::Literal => (None, format!("{ordinal}. {text}")),
                Numbering::Native => (
                    Some(ListMarker {
                        kind: ListKind::Ordered,
                        level: *level,
                        restart: list_start,
                    }),
                    text.to_string(),
                ),
            },
            Block::BulletItem { level, .. } | Block::TaskItem { level, .. } => (
                Some(ListMarker {
                    kind: ListKind::Bullet,
                    level: *level,
                    restart: false,
                }),
                text.to_string(),
            ),
            _ => (None, text.to_string()),
        };

        let runs = split_runs(&text);
        let visible: String = runs.iter().map(|r| r.content.as_str()).collect();
        let is_first = self.emitted.total() == 0;
        let key = self.profile.style_key(base, &visible, is_first);
        let style = self.profile.sheet.lookup(key);

        let paragraph = self.doc.add_paragraph();
        self.doc
            .format_paragraph(paragraph, paragraph_format(&style))?;
        if let Some(marker) = marker {
            self.doc.mark_list(paragraph, marker)?;
        }
        let citation = self
            .profile
            .citation
            .filter(|_| key == StyleKey::Body)
            .map(|rule| (rule, visible.as_str()));
        self.append_runs(paragraph, &runs, &style, citation)?;

        self.emitted.paragraphs += 1;
        Ok(())
    }

    fn table(&mut self, rows: &[Vec<String>]) -> Result<()> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Ok(());
        }

        let table = self.doc.add_table(rows.len(), cols);
        self.doc
            .set_table_borders(table, self.options.border.clone())?;
        self.doc
            .set_table_alignment(table, self.profile.table_alignment)?;

        let header = self.profile.sheet.lookup(StyleKey::TableHeader);
        let body = self.profile.sheet.lookup(StyleKey::TableBody);

        for (r, row) in rows.iter().enumerate() {
            let style = if r == 0 { &header } else { &body };
            for (c, text) in row.iter().enumerate().take(cols) {
                let cell = self.doc.cell(table, r, c)?;
                self.doc.format_paragraph(cell, paragraph_format(style))?;
                self.append_runs(cell, &split_runs(text), style, None)?;
            }
        }

        self.emitted.tables += 1;
        Ok(())
    }

    fn append_runs(
        &mut self,
        at: ParagraphRef,
        runs: &[Run],
        style: &StyleRecord,
        citation: Option<(CitationStyle, &str)>,
    ) -> Result<()> {
        for run in runs {
            let citation =
                citation.and_then(|(rule, text)| rule.color_for(text, &run.content));
            self.doc.append_run(
                at,
                StyledRun {
                    text: run.content.clone(),
                    font_latin: style.font_latin.to_string(),
                    font_cjk: style.font_cjk.to_string(),
                    size: style.size,
                    bold: style.bold || run.emphasized,
                    color: citation.or(style.color).map(str::to_string),
                },
            )?;
        }
        Ok(())
    }
}
