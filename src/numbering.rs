use crate::block::Block;

/// Remembers, per nesting level, whether the open list there is ordered, so
/// ordered items can tell whether they continue a list or start a new one.
///
/// Ordinals are never touched here; the restart signal only matters when the
/// document's native numbering is used instead of literal numbers.
#[derive(Debug, Clone, Default)]
pub struct ListTracker {
    /// `open[level]` is `Some(true)` for an ordered list, `Some(false)` for a
    /// bullet list, `None` for a level skipped by an indentation jump.
    open: Vec<Option<bool>>,
}

impl ListTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `block` and return true when it is an ordered item that starts
    /// a fresh list.
    pub fn observe(&mut self, block: &Block) -> bool {
        match block {
            Block::Blank | Block::Separator => false,
            Block::OrderedItem { level, .. } => {
                let continues = self.enter(*level, true) == Some(true);
                if !continues {
                    tracing::debug!(level, "ordered list restarts");
                }
                !continues
            }
            Block::BulletItem { level, .. } | Block::TaskItem { level, .. } => {
                self.enter(*level, false);
                false
            }
            Block::Heading { .. } | Block::Paragraph { .. } | Block::Table { .. } => {
                self.open.clear();
                false
            }
        }
    }

    /// Content that produced no block (a code fence) still ends the list.
    pub fn interrupt(&mut self) {
        self.open.clear();
    }

    /// Close lists deeper than `level` and record an item there, returning
    /// what was open at that level before.
    fn enter(&mut self, level: usize, ordered: bool) -> Option<bool> {
        self.open.resize(level + 1, None);
        self.open[level].replace(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ordered(level: usize, ordinal: u64) -> Block {
        Block::OrderedItem {
            level,
            ordinal,
            text: format!("item {ordinal}"),
        }
    }

    fn bullet(level: usize) -> Block {
        Block::BulletItem {
            level,
            text: "bullet".to_string(),
        }
    }

    fn restarts(blocks: &[Block]) -> Vec<bool> {
        let mut tracker = ListTracker::new();
        blocks.iter().map(|b| tracker.observe(b)).collect()
    }

    #[test]
    fn consecutive_items_continue() {
        assert_eq!(
            restarts(&[ordered(0, 1), ordered(0, 2), ordered(0, 3)]),
            vec![true, false, false]
        );
    }

    #[test]
    fn blank_lines_and_separators_do_not_break() {
        assert_eq!(
            restarts(&[ordered(0, 1), Block::Blank, Block::Separator, ordered(0, 2)]),
            vec![true, false, false, false]
        );
    }

    #[test]
    fn bullet_at_same_level_breaks_the_list() {
        assert_eq!(
            restarts(&[ordered(0, 1), bullet(0), ordered(0, 2)]),
            vec![true, false, true]
        );
    }

    #[test]
    fn deeper_items_keep_the_outer_list() {
        assert_eq!(
            restarts(&[ordered(0, 1), bullet(1), ordered(1, 1), ordered(0, 2)]),
            vec![true, false, true, false]
        );
    }

    #[test]
    fn bullet_before_deeper_items_still_breaks_the_list() {
        assert_eq!(
            restarts(&[ordered(0, 1), bullet(0), bullet(1), ordered(0, 2)]),
            vec![true, false, false, true]
        );
    }

    #[test]
    fn returning_from_a_deeper_ordered_list_continues_the_outer_one() {
        assert_eq!(
            restarts(&[ordered(0, 1), ordered(1, 1), ordered(1, 2), ordered(0, 2)]),
            vec![true, true, false, false]
        );
    }

    #[test]
    fn indentation_jump_starts_a_nested_list() {
        assert_eq!(
            restarts(&[ordered(0, 1), ordered(2, 1), ordered(1, 1), ordered(0, 2)]),
            vec![true, true, true, false]
        );
    }

    #[test]
    fn paragraph_breaks_the_list() {
        let para = Block::Paragraph {
            text: "between".to_string(),
        };
        assert_eq!(
            restarts(&[ordered(0, 1), para, ordered(0, 2)]),
            vec![true, false, true]
        );
    }

    #[test]
    fn interrupt_breaks_the_list() {
        let mut tracker = ListTracker::new();
        assert!(tracker.observe(&ordered(0, 1)));
        tracker.interrupt();
        assert!(tracker.observe(&ordered(0, 2)));
    }
}
