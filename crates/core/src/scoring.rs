//! Scoring module - classic line-clear scoring and level progression
//!
//! Rules:
//! - N simultaneous lines (1..=4) score `LINE_SCORES[N - 1] * (level + 1)`.
//! - A soft drop step scores 1.
//! - A hard drop scores `rows * (level + 1)`.
//! - Level is `lines / 10`, capped at 19.

use crate::types::{LEVEL_SPEEDS_MS, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL, SOFT_DROP_SCORE};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines - 1] * (level + 1)
}

/// Score for a hard drop that fell `rows` rows
pub fn calculate_hard_drop_score(rows: u32, level: u32) -> u32 {
    rows * (level + 1)
}

/// Score for one successful soft drop step
pub fn calculate_soft_drop_score() -> u32 {
    SOFT_DROP_SCORE
}

/// Level reached after `total_lines` cleared lines
pub fn calculate_level(total_lines: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Gravity interval for a level (in milliseconds)
///
/// Levels past the table use the fastest entry.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let idx = (level as usize).min(LEVEL_SPEEDS_MS.len() - 1);
    LEVEL_SPEEDS_MS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_line_score_out_of_range() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_soft_drop_score(), 1);
        assert_eq!(calculate_hard_drop_score(0, 4), 0);
        assert_eq!(calculate_hard_drop_score(16, 0), 16);
        assert_eq!(calculate_hard_drop_score(10, 2), 30);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(calculate_level(0), 0);
        assert_eq!(calculate_level(9), 0);
        assert_eq!(calculate_level(10), 1);
        assert_eq!(calculate_level(25), 2);
        assert_eq!(calculate_level(199), 19);
        assert_eq!(calculate_level(500), 19);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(0), 1000);
        assert_eq!(get_drop_interval_ms(1), 886);
        assert_eq!(get_drop_interval_ms(10), 298);
        assert_eq!(get_drop_interval_ms(19), 100);
        assert_eq!(get_drop_interval_ms(40), 100);
    }
}
