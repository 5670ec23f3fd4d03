//! Marker-anchored insertion.
//!
//! Fragments are spliced in immediately above their marker line so the
//! marker stays last and keeps anchoring later runs. The rewrite is pure:
//! it takes the current file content and returns the new one.

use std::collections::HashSet;

use crate::domain::fragments::CodeFragments;
use crate::domain::marker::Marker;

/// Result of an insertion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub content: String,
    /// Number of fragments actually written.
    pub inserted: usize,
}

impl Insertion {
    pub fn is_unchanged(&self) -> bool {
        self.inserted == 0
    }
}

/// Splice `fragments` above the owned `markers` in `content`.
///
/// - Only the first line matching a marker is an insertion point; later
///   copies are inert.
/// - A marker absent from the file is a no-op.
/// - Inserted lines take the marker line's indentation and line terminator.
///   Blank lines inside a fragment are not written, so a run of fragments
///   stays one block.
/// - A fragment is skipped when its rendered lines already appear, byte for
///   byte, in the block directly above the marker. That block starts after
///   the last blank line or owned marker line and includes fragments inserted
///   earlier in the same pass.
pub fn insert_fragments(content: &str, markers: &[Marker], fragments: &CodeFragments) -> Insertion {
    let mut out = String::with_capacity(content.len());
    let mut fired: HashSet<&Marker> = HashSet::new();
    let mut region: Vec<String> = Vec::new();
    let mut inserted = 0;

    for line in content.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);

        let Some(marker) = markers.iter().find(|m| m.matches_line(body)) else {
            out.push_str(line);
            if body.trim().is_empty() {
                region.clear();
            } else {
                region.push(body.to_string());
            }
            continue;
        };

        if fired.insert(marker) {
            if let Some(block) = fragments.get(marker) {
                let indent = leading_whitespace(body);
                let terminator = if terminator.is_empty() { "\n" } else { terminator };

                for fragment in block {
                    let rendered = render_fragment(fragment, indent);
                    if rendered.is_empty() || contains_block(&region, &rendered) {
                        continue;
                    }
                    for frag_line in &rendered {
                        out.push_str(frag_line);
                        out.push_str(terminator);
                    }
                    region.extend(rendered);
                    inserted += 1;
                }
            }
        }

        out.push_str(line);
        region.clear();
    }

    Insertion {
        content: out,
        inserted,
    }
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}

/// Fragment lines as they land in the file: indented like the marker,
/// trailing whitespace and blank lines dropped.
fn render_fragment(fragment: &str, indent: &str) -> Vec<String> {
    fragment
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("{indent}{}", l.trim_end()))
        .collect()
}

fn contains_block(region: &[String], key: &[String]) -> bool {
    region.windows(key.len()).any(|window| window == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::marker::CommentSyntaxRegistry;

    fn marker(value: &str) -> Marker {
        Marker::new(&CommentSyntaxRegistry::default(), "src/main.rs", value).unwrap()
    }

    fn fragments(entries: &[(&str, &[&str])]) -> CodeFragments {
        entries
            .iter()
            .map(|(value, frags)| {
                (
                    marker(value),
                    frags.iter().map(|f| f.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn inserts_immediately_before_marker() {
        let content = "a\n// +kubebuilder:scaffold:imports\nb\n";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["F"])]),
        );

        assert_eq!(result.content, "a\nF\n// +kubebuilder:scaffold:imports\nb\n");
        assert_eq!(result.inserted, 1);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let content = "mod a;\n// +kubebuilder:scaffold:modules\n";
        let markers = [marker("modules")];
        let frags = fragments(&[("modules", &["pub mod frigate_types;"])]);

        let first = insert_fragments(content, &markers, &frags);
        let second = insert_fragments(&first.content, &markers, &frags);

        assert_eq!(first.inserted, 1);
        assert!(second.is_unchanged());
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn inherits_marker_indentation() {
        let content = "fn main() {\n    run(vec![\n        // +kubebuilder:scaffold:runners\n    ]);\n}\n";
        let block = "tokio::spawn(async {\n    Runner::run().await;\n}),";
        let result = insert_fragments(
            content,
            &[marker("runners")],
            &fragments(&[("runners", &[block])]),
        );

        assert_eq!(
            result.content,
            "fn main() {\n    run(vec![\n        tokio::spawn(async {\n            Runner::run().await;\n        }),\n        // +kubebuilder:scaffold:runners\n    ]);\n}\n"
        );
        let again = insert_fragments(
            &result.content,
            &[marker("runners")],
            &fragments(&[("runners", &[block])]),
        );
        assert!(again.is_unchanged());
    }

    #[test]
    fn keeps_crlf_terminators() {
        let content = "a\r\n// +kubebuilder:scaffold:imports\r\n";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["use x;"])]),
        );
        assert_eq!(result.content, "a\r\nuse x;\r\n// +kubebuilder:scaffold:imports\r\n");
    }

    #[test]
    fn marker_on_last_line_without_newline() {
        let content = "a\n// +kubebuilder:scaffold:imports";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["use x;"])]),
        );
        assert_eq!(result.content, "a\nuse x;\n// +kubebuilder:scaffold:imports");
    }

    #[test]
    fn only_first_duplicate_marker_is_active() {
        let content = "// +kubebuilder:scaffold:imports\nmid\n// +kubebuilder:scaffold:imports\n";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["use x;"])]),
        );
        assert_eq!(
            result.content,
            "use x;\n// +kubebuilder:scaffold:imports\nmid\n// +kubebuilder:scaffold:imports\n"
        );
    }

    #[test]
    fn missing_marker_is_silent() {
        let content = "fn main() {}\n";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["use x;"])]),
        );
        assert_eq!(result.content, content);
        assert!(result.is_unchanged());
    }

    #[test]
    fn marker_without_fragments_is_untouched() {
        let content = "// +kubebuilder:scaffold:imports\n// +kubebuilder:scaffold:runners\n";
        let result = insert_fragments(
            content,
            &[marker("imports"), marker("runners")],
            &fragments(&[("runners", &["r();"])]),
        );
        assert_eq!(
            result.content,
            "// +kubebuilder:scaffold:imports\nr();\n// +kubebuilder:scaffold:runners\n"
        );
    }

    #[test]
    fn duplicate_fragments_in_one_list_insert_once() {
        let content = "// +kubebuilder:scaffold:imports\n";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["use x;", "use x;"])]),
        );
        assert_eq!(result.content, "use x;\n// +kubebuilder:scaffold:imports\n");
        assert_eq!(result.inserted, 1);
    }

    #[test]
    fn earlier_fragment_for_another_feature_is_recognised() {
        // A kept `use b;` between the fragment and the marker must not cause
        // `use a;` to be inserted again.
        let content = "use a;\nuse b;\n// +kubebuilder:scaffold:imports\n";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["use a;", "use c;"])]),
        );
        assert_eq!(
            result.content,
            "use a;\nuse b;\nuse c;\n// +kubebuilder:scaffold:imports\n"
        );
    }

    #[test]
    fn dedup_is_scoped_to_the_marker_region() {
        // `x();` above the imports marker does not count for the runners marker.
        let content = "x();\n// +kubebuilder:scaffold:imports\n// +kubebuilder:scaffold:runners\n";
        let result = insert_fragments(
            content,
            &[marker("imports"), marker("runners")],
            &fragments(&[("runners", &["x();"])]),
        );
        assert_eq!(
            result.content,
            "x();\n// +kubebuilder:scaffold:imports\nx();\n// +kubebuilder:scaffold:runners\n"
        );
    }

    #[test]
    fn fragment_text_inside_unrelated_code_is_still_inserted() {
        let content = "a();\nx(\n    1,\n);\n// +kubebuilder:scaffold:runners\n";
        let result = insert_fragments(
            content,
            &[marker("runners")],
            &fragments(&[("runners", &["1,"])]),
        );
        assert_eq!(
            result.content,
            "a();\nx(\n    1,\n);\n1,\n// +kubebuilder:scaffold:runners\n"
        );
        assert_eq!(result.inserted, 1);
    }

    #[test]
    fn identical_line_outside_the_block_above_the_marker_does_not_count() {
        let content = "use x;\n\nfn f() {}\n\n// +kubebuilder:scaffold:imports\n";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["use x;"])]),
        );
        assert_eq!(
            result.content,
            "use x;\n\nfn f() {}\n\nuse x;\n// +kubebuilder:scaffold:imports\n"
        );
    }

    #[test]
    fn blank_lines_inside_a_fragment_are_dropped() {
        let content = "// +kubebuilder:scaffold:runners\n";
        let markers = [marker("runners")];
        let frags = fragments(&[("runners", &["a();\n\nb();"])]);

        let first = insert_fragments(content, &markers, &frags);
        assert_eq!(first.content, "a();\nb();\n// +kubebuilder:scaffold:runners\n");
        assert!(insert_fragments(&first.content, &markers, &frags).is_unchanged());
    }

    #[test]
    fn blank_fragments_are_ignored() {
        let content = "// +kubebuilder:scaffold:imports\n";
        let result = insert_fragments(
            content,
            &[marker("imports")],
            &fragments(&[("imports", &["", "  \n"])]),
        );
        assert!(result.is_unchanged());
    }
}
