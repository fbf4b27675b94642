use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::block::{Block, Classified};
use crate::numbering::ListTracker;
use crate::table::{self, RaggedRows};

const FENCE: &str = "```";

/// Options that change how the classifier treats malformed input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub ragged_rows: RaggedRows,
}

/// Parse markdown text into blocks, dropping list restart information.
pub fn parse(markdown: &str) -> Vec<Block> {
    classify(markdown, ParseOptions::default())
        .into_iter()
        .map(|c| c.block)
        .collect()
}

/// Classify every line of `markdown` into blocks, in source order.
pub fn classify(markdown: &str, options: ParseOptions) -> Vec<Classified> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut cursor = Cursor::new(options);

    while cursor.index < lines.len() {
        cursor.step(&lines);
    }

    if let Mode::Fence { opened_at } = cursor.mode {
        tracing::debug!(line = opened_at + 1, "code fence never closed");
    }

    cursor.out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Fence { opened_at: usize },
}

/// Block-start rules, tried in this order; the first match wins and
/// anything unmatched is a paragraph.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Heading,
    Table,
    Task,
    Bullet,
    Ordered,
    Fence,
}

const RULES: [Rule; 6] = [
    Rule::Heading,
    Rule::Table,
    Rule::Task,
    Rule::Bullet,
    Rule::Ordered,
    Rule::Fence,
];

enum Matched {
    Block(Block),
    TableStart,
    FenceStart,
}

/// Line-scan state threaded through the whole document.
struct Cursor {
    index: usize,
    mode: Mode,
    tracker: ListTracker,
    options: ParseOptions,
    out: Vec<Classified>,
}

impl Cursor {
    fn new(options: ParseOptions) -> Self {
        Self {
            index: 0,
            mode: Mode::Normal,
            tracker: ListTracker::new(),
            options,
            out: Vec::new(),
        }
    }

    fn push(&mut self, block: Block) {
        let list_start = self.tracker.observe(&block);
        self.out.push(Classified { block, list_start });
    }

    fn step(&mut self, lines: &[&str]) {
        let line = lines[self.index].trim_end();

        if let Mode::Fence { .. } = self.mode {
            if line.starts_with(FENCE) {
                self.mode = Mode::Normal;
            }
            self.index += 1;
            return;
        }

        if line.is_empty() {
            self.push(Block::Blank);
            self.index += 1;
            return;
        }
        if line.trim() == "---" {
            self.push(Block::Separator);
            self.index += 1;
            return;
        }

        let matched = RULES
            .iter()
            .find_map(|rule| match_rule(*rule, line))
            .unwrap_or_else(|| {
                Matched::Block(Block::Paragraph {
                    text: line.to_string(),
                })
            });

        match matched {
            Matched::Block(block) => {
                self.push(block);
                self.index += 1;
            }
            Matched::TableStart => {
                let scan = table::scan(lines, self.index, self.options.ragged_rows);
                self.index = scan.next;
                if scan.rows.is_empty() {
                    self.tracker.interrupt();
                } else {
                    self.push(Block::Table { rows: scan.rows });
                }
            }
            Matched::FenceStart => {
                self.mode = Mode::Fence {
                    opened_at: self.index,
                };
                self.tracker.interrupt();
                self.index += 1;
            }
        }
    }
}

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid block regex"))
}

fn task_regex() -> &'static Regex {
    static TASK: OnceLock<Regex> = OnceLock::new();
    cached(&TASK, r"^(\s*)-\s+\[([ xX])\]\s+(.*)$")
}

fn bullet_regex() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    cached(&BULLET, r"^(\s*)[-*]\s+(.*)$")
}

fn ordered_regex() -> &'static Regex {
    static ORDERED: OnceLock<Regex> = OnceLock::new();
    cached(&ORDERED, r"^(\s*)(\d+)\.\s(.*)$")
}

/// Two columns of leading whitespace make one nesting level.
fn indent_level(caps: &Captures) -> usize {
    caps.get(1).map_or(0, |m| m.as_str().chars().count()) / 2
}

fn capture(caps: &Captures, group: usize) -> String {
    caps.get(group)
        .map_or_else(String::new, |m| m.as_str().to_string())
}

fn match_rule(rule: Rule, line: &str) -> Option<Matched> {
    match rule {
        Rule::Heading => {
            let hashes = line.bytes().take_while(|b| *b == b'#').count();
            if !(1..=4).contains(&hashes) {
                return None;
            }
            let text = line[hashes..].strip_prefix(' ')?;
            Some(Matched::Block(Block::Heading {
                // At most four, checked above
                level: hashes as u8,
                text: text.to_string(),
            }))
        }
        Rule::Table => line.starts_with('|').then_some(Matched::TableStart),
        Rule::Task => {
            let caps = task_regex().captures(line)?;
            Some(Matched::Block(Block::TaskItem {
                level: indent_level(&caps),
                checked: caps.get(2).is_some_and(|m| m.as_str() != " "),
                text: capture(&caps, 3),
            }))
        }
        Rule::Bullet => {
            let caps = bullet_regex().captures(line)?;
            Some(Matched::Block(Block::BulletItem {
                level: indent_level(&caps),
                text: capture(&caps, 2),
            }))
        }
        Rule::Ordered => {
            let caps = ordered_regex().captures(line)?;
            let ordinal = caps.get(2)?.as_str().parse::<u64>().ok()?;
            Some(Matched::Block(Block::OrderedItem {
                level: indent_level(&caps),
                ordinal,
                text: capture(&caps, 3),
            }))
        }
        Rule::Fence => line.starts_with(FENCE).then_some(Matched::FenceStart),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn heading(level: u8, text: &str) -> Block {
        Block::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn para(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_string(),
        }
    }

    #[rstest]
    #[case("# Title", 1, "Title")]
    #[case("## Section", 2, "Section")]
    #[case("### Sub", 3, "Sub")]
    #[case("#### Sub", 4, "Sub")]
    fn headings(#[case] line: &str, #[case] level: u8, #[case] text: &str) {
        assert_eq!(parse(line), vec![heading(level, text)]);
    }

    #[rstest]
    #[case("##### Too deep")]
    #[case("#hashtag")]
    #[case("#")]
    fn non_headings_are_paragraphs(#[case] line: &str) {
        assert_eq!(parse(line), vec![para(line)]);
    }

    #[test]
    fn paragraph_keeps_leading_whitespace() {
        assert_eq!(parse("   indented text  "), vec![para("   indented text")]);
    }

    #[test]
    fn blank_and_separator_lines() {
        assert_eq!(
            parse("a\n\n   \n---\nb"),
            vec![para("a"), Block::Blank, Block::Blank, Block::Separator, para("b")]
        );
    }

    #[rstest]
    #[case("- item", 0, "item")]
    #[case("* item", 0, "item")]
    #[case("  - nested", 1, "nested")]
    #[case("   - odd indent", 1, "odd indent")]
    #[case("    * deeper", 2, "deeper")]
    fn bullets(#[case] line: &str, #[case] level: usize, #[case] text: &str) {
        assert_eq!(
            parse(line),
            vec![Block::BulletItem {
                level,
                text: text.to_string()
            }]
        );
    }

    #[rstest]
    #[case("- [ ] open", false)]
    #[case("- [x] done", true)]
    #[case("- [X] done", true)]
    fn tasks(#[case] line: &str, #[case] checked: bool) {
        let blocks = parse(line);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::TaskItem {
                level,
                checked: got,
                ..
            } => {
                assert_eq!(*level, 0);
                assert_eq!(*got, checked);
            }
            other => panic!("expected task item, got {other:?}"),
        }
    }

    #[test]
    fn ordinals_are_preserved_verbatim() {
        assert_eq!(
            parse("1. First\n2. Second\n7. Seventh"),
            vec![
                Block::OrderedItem {
                    level: 0,
                    ordinal: 1,
                    text: "First".to_string()
                },
                Block::OrderedItem {
                    level: 0,
                    ordinal: 2,
                    text: "Second".to_string()
                },
                Block::OrderedItem {
                    level: 0,
                    ordinal: 7,
                    text: "Seventh".to_string()
                },
            ]
        );
    }

    #[rstest]
    #[case("1.5 million")]
    #[case("1.")]
    #[case("99999999999999999999999. overflow")]
    fn ordered_lookalikes_are_paragraphs(#[case] line: &str) {
        assert_eq!(parse(line), vec![para(line)]);
    }

    #[test]
    fn table_is_accumulated() {
        let md = "| A | B |\n|---|---|\n| 1 | 2 |";
        assert_eq!(
            parse(md),
            vec![Block::Table {
                rows: vec![
                    vec!["A".to_string(), "B".to_string()],
                    vec!["1".to_string(), "2".to_string()],
                ]
            }]
        );
    }

    #[test]
    fn scanning_resumes_after_table() {
        let md = "| A |\n| 1 |\nafter";
        let blocks = parse(md);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], para("after"));
    }

    #[test]
    fn separator_only_table_produces_nothing() {
        assert_eq!(parse("|---|---|\ntext"), vec![para("text")]);
    }

    #[test]
    fn code_fence_is_skipped() {
        let md = "before\n```rust\n# not a heading\n- not a list\n```\nafter";
        assert_eq!(parse(md), vec![para("before"), para("after")]);
    }

    #[test]
    fn unterminated_fence_consumes_rest() {
        let md = "before\n```\n# hidden\n| a |";
        assert_eq!(parse(md), vec![para("before")]);
    }

    #[test]
    fn rule_precedence_heading_before_paragraph_and_table_before_list() {
        assert_eq!(parse("# - x"), vec![heading(1, "- x")]);
        let blocks = parse("| - a |");
        assert_eq!(blocks[0].kind(), BlockKind::Table);
    }

    #[test]
    fn bold_line_is_not_a_bullet() {
        assert_eq!(parse("**Bold** start"), vec![para("**Bold** start")]);
    }

    #[test]
    fn classification_is_repeatable() {
        let md = "# T\n\n1. a\n- b\n2. c\n| x |\n```\ncode";
        assert_eq!(
            classify(md, ParseOptions::default()),
            classify(md, ParseOptions::default())
        );
    }

    #[test]
    fn interposed_bullet_restarts_numbering_but_keeps_ordinal() {
        let classified = classify("1. one\n- other\n2. two", ParseOptions::default());
        let flags: Vec<bool> = classified.iter().map(|c| c.list_start).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert!(matches!(
            classified[2].block,
            Block::OrderedItem { ordinal: 2, .. }
        ));
    }

    #[test]
    fn bullet_with_nested_children_restarts_numbering() {
        let classified = classify(
            "1. one\n- other\n  - deeper\n2. two",
            ParseOptions::default(),
        );
        let flags: Vec<(BlockKind, bool)> = classified
            .iter()
            .map(|c| (c.block.kind(), c.list_start))
            .collect();
        assert_eq!(
            flags,
            vec![
                (BlockKind::OrderedItem, true),
                (BlockKind::BulletItem, false),
                (BlockKind::BulletItem, false),
                (BlockKind::OrderedItem, true),
            ]
        );
    }

    #[test]
    fn fence_between_items_restarts_numbering() {
        let classified = classify("1. one\n```\nx\n```\n2. two", ParseOptions::default());
        let flags: Vec<bool> = classified.iter().map(|c| c.list_start).collect();
        assert_eq!(flags, vec![true, true]);
    }

    #[test]
    fn windows_line_endings() {
        assert_eq!(parse("# T\r\nbody\r\n"), vec![heading(1, "T"), para("body")]);
    }
}
