//! Bidirectional reordering into visual order

use crate::script::is_mark;
use unicode_bidi::BidiInfo;

/// Mirrored counterpart of paired punctuation inside right-to-left runs
fn mirror(c: char) -> char {
    match c {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        _ => c,
    }
}

/// Append a right-to-left run, reversing base characters while each
/// combining mark stays right after its base.
fn push_reversed_run(run: &str, out: &mut String) {
    let mut clusters: Vec<String> = Vec::new();
    for c in run.chars() {
        match clusters.last_mut() {
            Some(cluster) if is_mark(c) => cluster.push(c),
            _ => clusters.push(mirror(c).to_string()),
        }
    }
    for cluster in clusters.iter().rev() {
        out.push_str(cluster);
    }
}

/// Reorder logical-order text into visual (left-to-right drawing) order.
///
/// Paragraph direction comes from the first strong character. Numbers and
/// Latin words embedded in right-to-left text keep their own order.
pub fn reorder_visual(text: &str) -> String {
    let bidi_info = BidiInfo::new(text, None);
    let mut out = String::with_capacity(text.len());

    for para in &bidi_info.paragraphs {
        let (levels, runs) = bidi_info.visual_runs(para, para.range.clone());
        for run in runs {
            let slice = &text[run.clone()];
            if levels[run.start].is_rtl() {
                push_reversed_run(slice, &mut out);
            } else {
                out.push_str(slice);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ltr_only() {
        assert_eq!(reorder_visual("TICKET / BOARDING PASS"), "TICKET / BOARDING PASS");
    }

    #[test]
    fn test_marks_follow_base() {
        // ތާ ރީ ޚް
        assert_eq!(reorder_visual("ތާރީޚް"), "ޚްރީތާ");
    }

    #[test]
    fn test_rtl_words_swap() {
        assert_eq!(reorder_visual("ދާ ތަން"), "ންތަ ދާ");
    }

    #[test]
    fn test_number_inside_rtl_keeps_order() {
        assert_eq!(reorder_visual("ސީޓް 12"), "12 ޓްސީ");
    }

    #[test]
    fn test_rtl_inside_ltr_paragraph() {
        assert_eq!(reorder_visual("DATE ތާރީޚް"), "DATE ޚްރީތާ");
    }

    #[test]
    fn test_brackets_mirrored_in_rtl() {
        assert_eq!(reorder_visual("ދ (ތ)"), "(ތ) ދ");
    }

    #[test]
    fn test_empty() {
        assert_eq!(reorder_visual(""), "");
    }
}
