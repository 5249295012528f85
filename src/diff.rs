//! Side-by-side line diff rendering
//!
//! Aligns two line sequences with a longest-common-subsequence edit script
//! and renders them as a fixed-width two-column table. A deletion immediately
//! followed by an insertion collapses into one changed-pair row; isolated
//! edits leave the opposite column blank. Lines are padded to the column
//! width but never clipped, so long content may exceed the nominal width.

/// One aligned unit of the line-level edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffOp<'a> {
    Common(&'a str),
    Delete(&'a str),
    Insert(&'a str),
}

/// Line-level edit script via LCS alignment.
///
/// On ties a deletion is emitted before an insertion, so a changed line
/// always appears as an adjacent delete/insert pair.
fn edit_script<'a>(left: &[&'a str], right: &[&'a str]) -> Vec<DiffOp<'a>> {
    let n = left.len();
    let m = right.len();

    // lcs[i][j] = LCS length of left[i..] and right[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if left[i] == right[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if left[i] == right[j] {
            ops.push(DiffOp::Common(left[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(DiffOp::Delete(left[i]));
            i += 1;
        } else {
            ops.push(DiffOp::Insert(right[j]));
            j += 1;
        }
    }
    while i < n {
        ops.push(DiffOp::Delete(left[i]));
        i += 1;
    }
    while j < m {
        ops.push(DiffOp::Insert(right[j]));
        j += 1;
    }
    ops
}

/// Render a two-column comparison of two outputs.
///
/// `width` is the nominal total width; each column gets `width / 2 - 2`
/// characters plus the ` | ` separator.
pub fn side_by_side(left: &str, right: &str, width: usize) -> String {
    let left_lines: Vec<&str> = left.trim().lines().collect();
    let right_lines: Vec<&str> = right.trim().lines().collect();
    let ops = edit_script(&left_lines, &right_lines);

    let half = (width / 2).saturating_sub(2).max(1);
    let mut rows = Vec::with_capacity(ops.len() + 2);
    rows.push(format!("{:<half$} | {:<half$}", "Candidate B", "Candidate C"));
    rows.push(format!("{}-+-{}", "-".repeat(half), "-".repeat(half)));

    let mut i = 0;
    while i < ops.len() {
        match ops[i] {
            DiffOp::Common(line) => {
                rows.push(format!("{line:<half$} | {line:<half$}"));
                i += 1;
            }
            DiffOp::Delete(old) => {
                if let Some(DiffOp::Insert(new)) = ops.get(i + 1) {
                    let removed = format!("- {old}");
                    let added = format!("+ {new}");
                    rows.push(format!("{removed:<half$} | {added:<half$}"));
                    i += 2;
                } else {
                    let removed = format!("- {old}");
                    rows.push(format!("{removed:<half$} | {:<half$}", ""));
                    i += 1;
                }
            }
            DiffOp::Insert(new) => {
                let added = format!("+ {new}");
                rows.push(format!("{:<half$} | {added:<half$}", ""));
                i += 1;
            }
        }
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_render_only_mirrored_lines() {
        let rendered = side_by_side("1\n2\n3", "1\n2\n3", 80);
        for row in rendered.lines().skip(2) {
            assert!(!row.starts_with("- "));
            assert!(!row.contains(" | + "));
            let (left, right) = row.split_once(" | ").unwrap();
            assert_eq!(left.trim_end(), right.trim_end());
        }
    }

    #[test]
    fn changed_line_collapses_into_one_row() {
        let rendered = side_by_side("1\n2\n3", "1\n5\n3", 80);
        let rows: Vec<&str> = rendered.lines().collect();
        // header + rule + three aligned units
        assert_eq!(rows.len(), 5);
        assert!(rows[3].starts_with("- 2"));
        assert!(rows[3].contains("+ 5"));
    }

    #[test]
    fn isolated_insertion_leaves_left_column_blank() {
        let rendered = side_by_side("1\n2", "1\n2\n3", 80);
        let last = rendered.lines().last().unwrap();
        let (left, right) = last.split_once(" | ").unwrap();
        assert!(left.trim().is_empty());
        assert_eq!(right.trim_end(), "+ 3");
    }

    #[test]
    fn isolated_deletion_leaves_right_column_blank() {
        let rendered = side_by_side("1\n2\n3", "1\n2", 80);
        let last = rendered.lines().last().unwrap();
        let (left, right) = last.split_once(" | ").unwrap();
        assert_eq!(left.trim_end(), "- 3");
        assert!(right.trim().is_empty());
    }

    #[test]
    fn long_lines_are_padded_but_never_clipped() {
        let long = "x".repeat(200);
        let rendered = side_by_side(&long, &long, 80);
        assert!(rendered.lines().last().unwrap().contains(&long));
    }

    #[test]
    fn header_has_two_lines_and_a_rule() {
        let rendered = side_by_side("a", "a", 40);
        let rows: Vec<&str> = rendered.lines().collect();
        assert!(rows[0].contains("Candidate B"));
        assert!(rows[0].contains("Candidate C"));
        assert!(rows[1].contains("-+-"));
    }
}
