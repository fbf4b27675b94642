mod block;
mod config;
mod document;
mod emit;
mod error;
mod inline;
mod numbering;
mod parser;
mod profile;
mod stats;
mod style;
mod table;
mod typst;

pub use block::{Block, BlockKind, Classified, Run};
pub use config::{Config, ListsConfig, Numbering, PageConfig, TablesConfig};
pub use document::{
    Border, BorderLine, DocumentModel, ListKind, ListMarker, Node, PageSetup, Paragraph,
    ParagraphFormat, ParagraphRef, RichDocument, StyledRun, Table, TableRef,
};
pub use emit::{EmitOptions, Emitted, emit};
pub use error::{Error, Result};
pub use inline::split_runs;
pub use numbering::ListTracker;
pub use parser::{ParseOptions, classify};
pub use profile::{CitationStyle, ParagraphRule, Profile, StyleProfile, TitleRule};
pub use stats::{FormatReport, Tally, analyze};
pub use style::{Alignment, LineSpacing, StyleKey, StyleRecord, StyleSheet};
pub use table::{RaggedRows, TableScan};

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Classify markdown and emit it into a fresh in-memory document.
pub fn markdown_to_document(markdown: &str, config: &Config) -> Result<RichDocument> {
    let blocks = classify(
        markdown,
        ParseOptions {
            ragged_rows: config.tables.ragged_rows,
        },
    );
    let options = EmitOptions {
        numbering: config.lists.numbering,
        border: config.tables.border(),
    };

    let mut doc = RichDocument::new();
    let emitted = emit(&blocks, &config.profile.build(), &options, &mut doc)?;
    tracing::debug!(
        profile = %config.profile,
        blocks = blocks.len(),
        paragraphs = emitted.paragraphs,
        tables = emitted.tables,
        "emitted document"
    );
    Ok(doc)
}

/// Formatting statistics for the document a markdown file would produce.
pub fn analyze_markdown(markdown: &str, config: &Config) -> Result<FormatReport> {
    Ok(analyze(&markdown_to_document(markdown, config)?))
}

/// Convert markdown to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> Result<String> {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> Result<String> {
    let doc = markdown_to_document(markdown, config)?;
    let options = typst::RenderOptions {
        page_numbers: config.page.numbers,
    };
    Ok(typst::document_to_typst(&doc, &options))
}

/// Compile markdown to a Typst document.
fn compile_document(markdown: &str, config: &Config) -> Result<PagedDocument> {
    let typst_content = markdown_to_typst_with_config(markdown, config)?;

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let compiled = engine.compile();
    let doc: PagedDocument = compiled
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))?;
    if !compiled.warnings.is_empty() {
        // Mostly missing fonts: CJK families fall back to embedded ones
        tracing::debug!(count = compiled.warnings.len(), "typst reported warnings");
    }
    Ok(doc)
}

/// Convert markdown to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>> {
    let doc = compile_document(markdown, config)?;

    typst_pdf::pdf(&doc, &PdfOptions::default()).map_err(|e| Error::Export {
        format: "PDF",
        message: format!("{:?}", e),
    })
}

/// Result of rendering markdown to SVG, one image per page.
pub struct SvgDocument {
    pub pages: Vec<String>,
}

/// Convert markdown to SVG pages using default config.
pub fn markdown_to_svg(markdown: &str) -> Result<SvgDocument> {
    markdown_to_svg_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to SVG pages with custom config.
pub fn markdown_to_svg_with_config(markdown: &str, config: &Config) -> Result<SvgDocument> {
    let doc = compile_document(markdown, config)?;

    let pages: Vec<String> = doc.pages.iter().map(typst_svg::svg).collect();
    if pages.is_empty() {
        return Err(Error::Export {
            format: "SVG",
            message: "document has no pages".to_string(),
        });
    }

    Ok(SvgDocument { pages })
}
