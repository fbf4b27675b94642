use std::fmt::Write;

use crate::document::{
    Border, BorderLine, ListKind, ListMarker, Node, PageSetup, Paragraph, RichDocument, StyledRun,
    Table,
};
use crate::style::{Alignment, LineSpacing};

const BULLET: &str = "•";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub page_numbers: bool,
}

/// Convert a styled document to Typst markup
pub fn document_to_typst(doc: &RichDocument, options: &RenderOptions) -> String {
    let mut out = String::new();

    emit_page(doc.page.as_ref(), options, &mut out);
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");

    let mut counters = ListCounters::default();
    for node in &doc.body {
        match node {
            Node::Paragraph(paragraph) => {
                let label = paragraph.list.map(|marker| counters.label(marker));
                emit_paragraph(paragraph, label.as_deref(), &mut out);
            }
            Node::Table(table) => emit_table(table, &mut out),
        }
    }

    out
}

/// Native list numbering: one counter per nesting level.
#[derive(Debug, Default)]
struct ListCounters {
    levels: Vec<u64>,
}

impl ListCounters {
    fn label(&mut self, marker: ListMarker) -> String {
        // Deeper levels always start over below a new item
        self.levels.truncate(marker.level + 1);
        match marker.kind {
            ListKind::Bullet => BULLET.to_string(),
            ListKind::Ordered => {
                if self.levels.len() <= marker.level {
                    self.levels.resize(marker.level + 1, 0);
                }
                if marker.restart {
                    self.levels[marker.level] = 0;
                }
                self.levels[marker.level] += 1;
                format!("{}.", self.levels[marker.level])
            }
        }
    }
}

fn pt(value: f32) -> String {
    format!("{:.2}pt", value)
}

fn emit_page(page: Option<&PageSetup>, options: &RenderOptions, out: &mut String) {
    let numbering = if options.page_numbers { "\"1\"" } else { "none" };
    match page {
        Some(page) => {
            let _ = writeln!(
                out,
                "#set page(width: {}, height: {}, margin: (top: {}, bottom: {}, left: {}, right: {}), numbering: {})",
                pt(page.width),
                pt(page.height),
                pt(page.margin_top),
                pt(page.margin_bottom),
                pt(page.margin_left),
                pt(page.margin_right),
                numbering,
            );
        }
        None => {
            let _ = writeln!(out, "#set page(numbering: {})", numbering);
        }
    }
}

fn emit_paragraph(paragraph: &Paragraph, label: Option<&str>, out: &mut String) {
    let format = &paragraph.format;
    let _ = writeln!(
        out,
        "#block(width: 100%, above: {}, below: {})[",
        pt(format.space_before),
        pt(format.space_after)
    );
    paragraph_body(paragraph, label, out);
    out.push_str("]\n");
}

/// Set rules plus runs for one paragraph; shared by body text and table cells.
fn paragraph_body(paragraph: &Paragraph, label: Option<&str>, out: &mut String) {
    let format = &paragraph.format;
    let size = paragraph.runs.first().map_or(12.0, |r| r.size);

    let leading = match format.line_spacing {
        LineSpacing::Multiple(m) => format!("{:.2}em", 0.65 + (m - 1.0) * 1.2),
        LineSpacing::Fixed(pitch) => pt((pitch - size).max(0.0)),
    };

    // Negative first-line indent hangs the rest of the paragraph instead
    let (pad, first_line, hanging) = if format.first_line_indent < 0.0 {
        (
            (format.left_indent + format.first_line_indent).max(0.0),
            0.0,
            -format.first_line_indent,
        )
    } else {
        (format.left_indent, format.first_line_indent, 0.0)
    };

    let _ = writeln!(
        out,
        "#set par(justify: {}, leading: {}, first-line-indent: (amount: {}, all: true), hanging-indent: {})",
        format.alignment == Alignment::Justify,
        leading,
        pt(first_line),
        pt(hanging),
    );
    let align = match format.alignment {
        Alignment::Center => "center",
        Alignment::Start | Alignment::Justify => "start",
    };
    let _ = writeln!(out, "#set align({})", align);

    let _ = write!(out, "#pad(left: {})[", pt(pad));
    if let Some(label) = label {
        let prefix = StyledRun {
            text: format!("{label} "),
            ..paragraph.runs.first().cloned().unwrap_or_else(|| StyledRun {
                text: String::new(),
                font_latin: String::new(),
                font_cjk: String::new(),
                size,
                bold: false,
                color: None,
            })
        };
        run_to_typst(&prefix, out);
    }
    for run in &paragraph.runs {
        run_to_typst(run, out);
    }
    out.push_str("]\n");
}

fn run_to_typst(run: &StyledRun, out: &mut String) {
    out.push_str("#text(");
    let fonts: Vec<String> = [&run.font_latin, &run.font_cjk]
        .into_iter()
        .filter(|f| !f.is_empty())
        .map(|f| format!("\"{}\"", escape_string(f)))
        .collect();
    if !fonts.is_empty() {
        // Trailing comma keeps a single font a valid array
        let _ = write!(out, "font: ({},), ", fonts.join(", "));
    }
    let _ = write!(
        out,
        "size: {}, weight: \"{}\"",
        pt(run.size),
        if run.bold { "bold" } else { "regular" }
    );
    if let Some(color) = &run.color {
        let _ = write!(out, ", fill: rgb(\"#{}\")", escape_string(color));
    }
    out.push_str(")[");
    escape_markup(&run.text, out);
    out.push(']');
}

fn stroke(border: &Border) -> String {
    let paint = format!("rgb(\"#{}\")", escape_string(&border.color));
    match border.line {
        BorderLine::None => "none".to_string(),
        BorderLine::Single => format!("{} + {}", pt(border.weight), paint),
        BorderLine::Dashed => format!(
            "(paint: {}, thickness: {}, dash: \"dashed\")",
            paint,
            pt(border.weight)
        ),
    }
}

fn emit_table(table: &Table, out: &mut String) {
    if table.cols == 0 {
        return;
    }

    let centered = table.alignment == Alignment::Center;
    if centered {
        out.push_str("#align(center)[");
    }
    out.push_str("#table(\n");
    let _ = writeln!(out, "  columns: {},", table.cols);
    if let Some(border) = &table.borders {
        let _ = writeln!(out, "  stroke: {},", stroke(border));
    }

    for cell in &table.cells {
        out.push_str("  [\n");
        paragraph_body(cell, None, out);
        out.push_str("  ],\n");
    }

    out.push(')');
    if centered {
        out.push(']');
    }
    out.push('\n');
}

fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape characters that Typst markup would otherwise interpret
fn escape_markup(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '=' | '-'
            | '+' | '~' | '.' | '\'' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}
