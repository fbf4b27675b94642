//! Style profiles: a style sheet plus the text rules that pick a style for a
//! paragraph from what it looks like.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::document::PageSetup;
use crate::error::Error;
use crate::inline::has_citation;
use crate::style::{Alignment, LineSpacing, StyleKey, StyleRecord, StyleSheet};

const SONG: &str = "宋体";
const HEI: &str = "黑体";
const KAI: &str = "楷体_GB2312";
const FANGSONG: &str = "仿宋_GB2312";
const TIMES: &str = "Times New Roman";
const ARIAL: &str = "Arial";
const BLACK: Option<&str> = Some("000000");

const LETTER: PageSetup = PageSetup {
    width: 612.0,
    height: 792.0,
    margin_top: 72.0,
    margin_bottom: 72.0,
    margin_left: 90.0,
    margin_right: 90.0,
};

const A4_WIDTH: f32 = 598.0;
const A4_HEIGHT: f32 = 845.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Standard,
    Academic,
    Official,
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Profile::Standard),
            "academic" => Ok(Profile::Academic),
            "official" => Ok(Profile::Official),
            _ => Err(Error::UnknownProfile(s.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Profile::Standard => "standard",
            Profile::Academic => "academic",
            Profile::Official => "official",
        };
        f.write_str(name)
    }
}

/// One classify-and-stamp rule: paragraphs whose text matches get `key`.
#[derive(Clone, Copy)]
pub struct ParagraphRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub key: StyleKey,
}

impl fmt::Debug for ParagraphRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParagraphRule")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish()
    }
}

/// Coloring for runs that carry a numeric citation like `[3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitationStyle {
    pub color: &'static str,
    /// Only body paragraphs with more visible characters than this qualify
    pub min_chars: usize,
}

impl CitationStyle {
    /// Color for a run of a body paragraph whose visible text is `text`.
    pub fn color_for(&self, text: &str, run: &str) -> Option<&'static str> {
        (text.trim().chars().count() > self.min_chars && has_citation(run)).then_some(self.color)
    }
}

/// Which leading block, if any, is restyled as the document title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRule {
    None,
    /// First block, when shorter than the given number of characters
    FirstIfShorter(usize),
    FirstAlways,
}

#[derive(Debug, Clone)]
pub struct StyleProfile {
    pub profile: Profile,
    pub sheet: StyleSheet,
    pub page: PageSetup,
    pub table_alignment: Alignment,
    pub citation: Option<CitationStyle>,
    pub title: TitleRule,
    pub rules: &'static [ParagraphRule],
}

impl StyleProfile {
    /// Pick the style for a text block. `is_first` marks the first block
    /// that produces output.
    ///
    /// `text` is the block's visible text with emphasis markers removed.
    pub fn style_key(&self, base: StyleKey, text: &str, is_first: bool) -> StyleKey {
        let text = text.trim();
        let is_titled_kind = matches!(base, StyleKey::Heading(_) | StyleKey::Body);
        if is_first && is_titled_kind {
            let title = match self.title {
                TitleRule::None => false,
                TitleRule::FirstIfShorter(limit) => text.chars().count() < limit,
                TitleRule::FirstAlways => true,
            };
            if title {
                return StyleKey::Title;
            }
        }

        if base != StyleKey::Body {
            return base;
        }

        self.rules
            .iter()
            .find(|rule| (rule.matches)(text))
            .map_or(StyleKey::Body, |rule| rule.key)
    }
}

impl Profile {
    pub fn build(self) -> StyleProfile {
        match self {
            Profile::Standard => standard(),
            Profile::Academic => academic(),
            Profile::Official => official(),
        }
    }
}

fn standard_list_item() -> StyleRecord {
    StyleRecord {
        line_spacing: LineSpacing::Multiple(1.5),
        ..StyleRecord::text(TIMES, SONG, 12.0)
    }
}

fn table_header() -> StyleRecord {
    StyleRecord {
        bold: true,
        alignment: Alignment::Center,
        ..StyleRecord::text(ARIAL, HEI, 10.5)
    }
}

fn table_body() -> StyleRecord {
    StyleRecord {
        alignment: Alignment::Center,
        ..StyleRecord::text(TIMES, SONG, 10.5)
    }
}

fn reference() -> StyleRecord {
    StyleRecord {
        alignment: Alignment::Justify,
        first_line_indent: -21.0,
        left_indent: 21.0,
        ..StyleRecord::text(TIMES, SONG, 10.5)
    }
}

fn caption() -> StyleRecord {
    StyleRecord {
        alignment: Alignment::Center,
        space_before: 6.0,
        space_after: 12.0,
        ..StyleRecord::text(TIMES, SONG, 10.5)
    }
}

fn standard() -> StyleProfile {
    let heading = |size, alignment, before| StyleRecord {
        bold: true,
        alignment,
        space_before: before,
        space_after: 6.0,
        ..StyleRecord::text(ARIAL, HEI, size)
    };
    let headings = [
        heading(15.0, Alignment::Center, 12.0),
        heading(14.0, Alignment::Start, 6.0),
        heading(12.0, Alignment::Start, 6.0),
        heading(12.0, Alignment::Start, 6.0),
    ];

    StyleProfile {
        profile: Profile::Standard,
        sheet: StyleSheet {
            title: headings[0].clone(),
            headings,
            body: StyleRecord {
                alignment: Alignment::Justify,
                line_spacing: LineSpacing::Multiple(1.5),
                first_line_indent: 24.0,
                ..StyleRecord::text(TIMES, SONG, 12.0)
            },
            list_item: standard_list_item(),
            list_indent_step: 24.0,
            table_header: table_header(),
            table_body: table_body(),
            reference: reference(),
            caption: caption(),
        },
        page: LETTER,
        table_alignment: Alignment::Start,
        citation: None,
        title: TitleRule::None,
        rules: &[],
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid profile regex"))
}

fn is_chapter(text: &str) -> bool {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    (text.starts_with('第') && text.contains('章')) || regex(&NUMBERED, r"^\d+\.\s").is_match(text)
}

fn is_section(text: &str) -> bool {
    static SECTION: OnceLock<Regex> = OnceLock::new();
    regex(&SECTION, r"^\d+\.\d+\s").is_match(text)
}

fn is_subsection(text: &str) -> bool {
    static SUBSECTION: OnceLock<Regex> = OnceLock::new();
    regex(&SUBSECTION, r"^\d+\.\d+\.\d+\s").is_match(text)
}

fn is_reference(text: &str) -> bool {
    text.starts_with('[') && text.chars().take(5).any(|c| c == ']')
}

fn is_caption(text: &str) -> bool {
    text.starts_with('图') || text.starts_with("Figure")
}

static ACADEMIC_RULES: [ParagraphRule; 5] = [
    ParagraphRule {
        name: "chapter",
        matches: is_chapter,
        key: StyleKey::Heading(1),
    },
    ParagraphRule {
        name: "section",
        matches: is_section,
        key: StyleKey::Heading(2),
    },
    ParagraphRule {
        name: "subsection",
        matches: is_subsection,
        key: StyleKey::Heading(3),
    },
    ParagraphRule {
        name: "reference",
        matches: is_reference,
        key: StyleKey::Reference,
    },
    ParagraphRule {
        name: "caption",
        matches: is_caption,
        key: StyleKey::Caption,
    },
];

fn academic() -> StyleProfile {
    let heading = |size, alignment, before| StyleRecord {
        bold: true,
        alignment,
        space_before: before,
        space_after: 6.0,
        line_spacing: LineSpacing::Multiple(1.5),
        ..StyleRecord::text(TIMES, HEI, size)
    };
    let subsection = heading(12.0, Alignment::Start, 6.0);

    StyleProfile {
        profile: Profile::Academic,
        sheet: StyleSheet {
            title: StyleRecord {
                bold: true,
                alignment: Alignment::Center,
                space_after: 18.0,
                line_spacing: LineSpacing::Multiple(1.5),
                ..StyleRecord::text(TIMES, HEI, 18.0)
            },
            headings: [
                heading(15.0, Alignment::Center, 12.0),
                heading(14.0, Alignment::Start, 6.0),
                subsection.clone(),
                subsection,
            ],
            body: StyleRecord {
                alignment: Alignment::Justify,
                line_spacing: LineSpacing::Multiple(1.5),
                first_line_indent: 24.0,
                ..StyleRecord::text(TIMES, SONG, 12.0)
            },
            list_item: standard_list_item(),
            list_indent_step: 24.0,
            table_header: table_header(),
            table_body: table_body(),
            reference: reference(),
            caption: caption(),
        },
        page: PageSetup {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 90.0,
            margin_right: 90.0,
        },
        table_alignment: Alignment::Start,
        citation: Some(CitationStyle {
            color: "0000FF",
            min_chars: 30,
        }),
        title: TitleRule::FirstIfShorter(50),
        rules: &ACADEMIC_RULES,
    }
}

const CHINESE_NUMERALS: [&str; 10] = ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

fn is_primary_heading(text: &str) -> bool {
    CHINESE_NUMERALS
        .iter()
        .any(|n| text.strip_prefix(n).is_some_and(|rest| rest.starts_with('、')))
}

fn is_secondary_heading(text: &str) -> bool {
    CHINESE_NUMERALS[..6].iter().any(|n| {
        text.strip_prefix('（')
            .and_then(|rest| rest.strip_prefix(n))
            .is_some_and(|rest| rest.starts_with('）'))
    })
}

fn is_tertiary_heading(text: &str) -> bool {
    text.chars().count() < 50
        && (text.chars().take(10).any(|c| c == '.') || text.contains('：') || text.contains(':'))
}

static OFFICIAL_RULES: [ParagraphRule; 3] = [
    ParagraphRule {
        name: "primary heading",
        matches: is_primary_heading,
        key: StyleKey::Heading(1),
    },
    ParagraphRule {
        name: "secondary heading",
        matches: is_secondary_heading,
        key: StyleKey::Heading(2),
    },
    ParagraphRule {
        name: "tertiary heading",
        matches: is_tertiary_heading,
        key: StyleKey::Heading(3),
    },
];

fn official() -> StyleProfile {
    let heading = |font_cjk, bold, before| StyleRecord {
        bold,
        space_before: before,
        space_after: 6.0,
        line_spacing: LineSpacing::Fixed(28.0),
        color: BLACK,
        ..StyleRecord::text(ARIAL, font_cjk, 16.0)
    };
    let tertiary = heading(HEI, true, 6.0);
    let cell = StyleRecord {
        alignment: Alignment::Center,
        color: BLACK,
        ..StyleRecord::text(TIMES, FANGSONG, 10.5)
    };
    let body = StyleRecord {
        alignment: Alignment::Justify,
        line_spacing: LineSpacing::Fixed(28.0),
        first_line_indent: 32.0,
        color: BLACK,
        ..StyleRecord::text(TIMES, FANGSONG, 16.0)
    };

    StyleProfile {
        profile: Profile::Official,
        sheet: StyleSheet {
            title: StyleRecord {
                bold: true,
                alignment: Alignment::Center,
                space_after: 18.0,
                color: BLACK,
                ..StyleRecord::text(ARIAL, HEI, 22.0)
            },
            headings: [
                heading(HEI, true, 12.0),
                heading(KAI, false, 6.0),
                tertiary.clone(),
                tertiary,
            ],
            list_item: StyleRecord {
                first_line_indent: 0.0,
                alignment: Alignment::Start,
                ..body.clone()
            },
            list_indent_step: 24.0,
            table_header: StyleRecord {
                bold: true,
                ..cell.clone()
            },
            table_body: cell,
            reference: body.clone(),
            caption: body.clone(),
            body,
        },
        page: PageSetup {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_top: 106.0,
            margin_bottom: 85.0,
            margin_left: 99.0,
            margin_right: 85.0,
        },
        table_alignment: Alignment::Center,
        citation: None,
        title: TitleRule::FirstAlways,
        rules: &OFFICIAL_RULES,
    }
}
