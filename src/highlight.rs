//! Highlighting, result counting and the summary line.

use crate::matcher::find_matches;
use crate::model::{Document, HighlightColor, Paragraph, TextRun};

/// Colour used to mark keyword occurrences.
pub const HIGHLIGHT: HighlightColor = HighlightColor::Yellow;

/// Bold the page labels and highlight every accepted term in the page texts.
///
/// Paragraphs alternate label/text as laid out by
/// [`build_document`](crate::findings::build_document).
pub fn highlight(doc: &mut Document) {
    for (index, paragraph) in doc.paragraphs.iter_mut().enumerate() {
        if index % 2 == 0 {
            for run in paragraph.runs_mut() {
                run.style.bold = true;
            }
        } else {
            highlight_terms(paragraph);
        }
    }
}

/// Rebuild a text paragraph as plain runs alternating with highlighted terms.
fn highlight_terms(paragraph: &mut Paragraph) {
    let text = paragraph.plain_text();
    let matches = find_matches(&text);
    paragraph.clear();

    let mut cursor = 0;
    for m in &matches {
        let segment = text[cursor..m.start].trim();
        if !segment.is_empty() {
            paragraph.add_text(format!("{} ", segment));
        }
        paragraph.add_run(TextRun::highlighted(format!("{} ", m.term), HIGHLIGHT));
        cursor = m.end;
    }

    let tail = text[cursor..].trim();
    if !tail.is_empty() {
        paragraph.add_text(tail);
    }
}

/// Number of highlighted runs in the document.
pub fn count_highlighted(doc: &Document) -> usize {
    doc.count_highlighted(HIGHLIGHT)
}

/// "The search found N result(s)."
pub fn summary_line(count: usize) -> String {
    if count == 1 {
        "The search found 1 result.".to_string()
    } else {
        format!("The search found {} results.", count)
    }
}

/// Prepend the bold summary line to the first paragraph, keeping its
/// previous text in bold two lines below.
pub fn add_summary(doc: &mut Document, count: usize) {
    if doc.is_empty() {
        doc.add_paragraph(Paragraph::new());
    }
    let first = &mut doc.paragraphs[0];
    let previous = first.plain_text();

    first.clear();
    first.add_run(TextRun::bold(summary_line(count)));
    first.add_line_break();
    first.add_line_break();
    first.add_run(TextRun::bold(previous));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::{build_document, Findings};
    use crate::model::InlineContent;

    fn doc_for(pages: &[(&str, &str)]) -> Document {
        let mut findings = Findings::new();
        for (label, text) in pages {
            findings.push_page(*label, *text);
        }
        build_document(&findings)
    }

    fn run_texts(p: &Paragraph) -> Vec<(String, bool)> {
        p.runs()
            .map(|r| (r.text.clone(), r.is_highlighted_with(HIGHLIGHT)))
            .collect()
    }

    #[test]
    fn test_labels_bold_and_terms_highlighted() {
        let mut doc = doc_for(&[("Page 2/3", "Goods may change without notice.\n")]);
        highlight(&mut doc);

        assert!(doc.paragraphs[0].runs().all(|r| r.style.bold));
        assert_eq!(
            run_texts(&doc.paragraphs[1]),
            vec![
                ("Goods may change ".to_string(), false),
                ("without ".to_string(), true),
                ("notice.".to_string(), false),
            ]
        );
        assert_eq!(count_highlighted(&doc), 1);
    }

    #[test]
    fn test_adjacent_matches_stay_aligned() {
        let mut doc = doc_for(&[("Page 1/1", "homeless, jobless")]);
        highlight(&mut doc);

        assert_eq!(
            run_texts(&doc.paragraphs[1]),
            vec![
                ("homeless ".to_string(), true),
                (", ".to_string(), false),
                ("jobless ".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_excluded_terms_stay_plain() {
        let mut doc = doc_for(&[("Page 1/1", "unless homeless")]);
        highlight(&mut doc);

        assert_eq!(
            run_texts(&doc.paragraphs[1]),
            vec![
                ("unless ".to_string(), false),
                ("homeless ".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_count_matches_accepted_terms() {
        let mut doc = doc_for(&[
            ("Page 1/4", "without a home, without hope"),
            ("Page 4/4", "the absence of evidence, regardless"),
        ]);
        highlight(&mut doc);
        assert_eq!(count_highlighted(&doc), 3);
    }

    #[test]
    fn test_summary_wording() {
        assert_eq!(summary_line(0), "The search found 0 results.");
        assert_eq!(summary_line(1), "The search found 1 result.");
        assert_eq!(summary_line(2), "The search found 2 results.");
    }

    #[test]
    fn test_add_summary_keeps_label_below() {
        let mut doc = doc_for(&[("Page 2/3", "without notice")]);
        highlight(&mut doc);
        add_summary(&mut doc, 1);

        let first = &doc.paragraphs[0];
        assert_eq!(first.plain_text(), "The search found 1 result.\n\nPage 2/3");
        assert!(first.runs().all(|r| r.style.bold));
        assert!(matches!(first.content[1], InlineContent::LineBreak));
        assert_eq!(doc.paragraph_count(), 2);
    }
}
