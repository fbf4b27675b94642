use std::collections::HashMap;
use std::fmt;

use crate::document::RichDocument;
use crate::style::LineSpacing;

/// Frequency of each distinct value, most common first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally(pub Vec<(String, usize)>);

impl Tally {
    fn from_counts(counts: HashMap<String, usize>) -> Self {
        let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Tally(entries)
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, n)| *n)
    }
}

/// Formatting statistics for a styled document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatReport {
    pub sizes: Tally,
    pub fonts: Tally,
    pub first_line_indents: Tally,
    pub line_spacings: Tally,
}

fn number(value: f32) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{rounded}")
}

/// Count run sizes and fonts, and paragraph indents and line spacing, over
/// body paragraphs and table cells alike.
pub fn analyze(doc: &RichDocument) -> FormatReport {
    let mut sizes = HashMap::new();
    let mut fonts = HashMap::new();
    let mut indents = HashMap::new();
    let mut spacings = HashMap::new();

    for paragraph in doc.paragraphs() {
        for run in &paragraph.runs {
            *sizes.entry(format!("{}pt", number(run.size))).or_insert(0) += 1;
            *fonts.entry(run.font_latin.clone()).or_insert(0) += 1;
        }

        let format = &paragraph.format;
        if format.first_line_indent != 0.0 {
            *indents
                .entry(format!("{}pt", number(format.first_line_indent)))
                .or_insert(0) += 1;
        }
        let spacing = match format.line_spacing {
            LineSpacing::Multiple(m) => format!("{}x", number(m)),
            LineSpacing::Fixed(p) => format!("{}pt", number(p)),
        };
        *spacings.entry(spacing).or_insert(0) += 1;
    }

    FormatReport {
        sizes: Tally::from_counts(sizes),
        fonts: Tally::from_counts(fonts),
        first_line_indents: Tally::from_counts(indents),
        line_spacings: Tally::from_counts(spacings),
    }
}

impl fmt::Display for FormatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            ("Font sizes", &self.sizes),
            ("Fonts", &self.fonts),
            ("First-line indents", &self.first_line_indents),
            ("Line spacing", &self.line_spacings),
        ];
        for (i, (title, tally)) in sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{title}:")?;
            if tally.0.is_empty() {
                writeln!(f, "  (none)")?;
            }
            for (value, count) in &tally.0 {
                writeln!(f, "  {value}: {count}")?;
            }
        }
        Ok(())
    }
}
