//! Behavioural tests for the scan entry points.

use crate::scanning::{
    Diagnostic, DiagnosticKind, MISSING_PROJECT_TAG, NO_ERRORS, ProjectId, ScanReport,
    scan_document, scan_lines, scan_project_document, scan_project_lines,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(&[])]
#[case(&[""])]
#[case(&["fn main() {", "    println!(\"hi\");", "}"])]
#[case(&["// @USERSTORY-", "// @PROJECT-1"])]
fn no_start_tags_yield_clean_empty_scan(#[case] lines: &[&str]) {
    let outcome = scan_lines(lines);

    assert!(outcome.stories.is_empty());
    assert_eq!(outcome.report.to_string(), NO_ERRORS);
}

#[test]
fn single_story_example() {
    let outcome = scan_lines(["@USERSTORY-1", "hello", "@USERSTORY-END"]);

    assert_eq!(outcome.stories.len(), 1);
    assert_eq!(outcome.stories[0].id(), "1");
    assert_eq!(outcome.stories[0].content(), "hello\n");
    assert_eq!(outcome.report.to_string(), "No errors found");
}

#[test]
fn orphan_end_example() {
    let outcome = scan_lines(["@USERSTORY-END"]);

    assert!(outcome.stories.is_empty());
    assert_eq!(
        outcome.report.to_string(),
        "Error: End tag found before start tag on line 1\n"
    );
}

#[test]
fn well_formed_story_keeps_every_interior_line() {
    let outcome = scan_document(
        "// @USERSTORY-12\n// As a user\n//   I can log in\n\n// @USERSTORY-END\n",
    );

    assert_eq!(outcome.stories.len(), 1);
    assert_eq!(outcome.stories[0].id(), "12");
    assert_eq!(
        outcome.stories[0].content(),
        "// As a user\n//   I can log in\n\n"
    );
    assert!(outcome.report.is_clean());
}

#[test]
fn orphan_end_does_not_touch_stories() {
    let outcome = scan_lines([
        "@USERSTORY-1",
        "a",
        "@USERSTORY-END",
        "between",
        "@USERSTORY-END",
    ]);

    assert_eq!(outcome.stories.len(), 1);
    assert_eq!(outcome.stories[0].content(), "a\n");
    assert_eq!(
        outcome.report.diagnostics(),
        &[Diagnostic {
            line: 5,
            kind: DiagnosticKind::EndBeforeStart,
        }]
    );
}

#[test]
fn nested_start_reports_line_and_drops_tag() {
    let outcome = scan_lines([
        "intro",
        "@USERSTORY-1",
        "one",
        "@USERSTORY-2",
        "two",
        "@USERSTORY-END",
    ]);

    assert_eq!(outcome.stories.len(), 1);
    assert_eq!(outcome.stories[0].id(), "1");
    assert_eq!(outcome.stories[0].content(), "one\ntwo\n");
    assert_eq!(
        outcome.report.to_string(),
        "Error: Start tag found before end tag on line 4\n"
    );
}

#[test]
fn empty_story_is_kept_and_reports_story_count() {
    let outcome = scan_lines([
        "@USERSTORY-5",
        "x",
        "@USERSTORY-END",
        "@USERSTORY-6",
        "y",
        "@USERSTORY-END",
        "@USERSTORY-30",
        "@USERSTORY-END",
    ]);

    assert_eq!(outcome.stories.len(), 3);
    assert_eq!(outcome.stories[2].id(), "30");
    assert_eq!(outcome.stories[2].content(), "");
    // The count of stories seen so far, not the id "30"
    assert_eq!(
        outcome.report.to_string(),
        "Error: No content found for user story 3\n"
    );
}

#[test]
fn errors_accumulate_in_document_order() {
    let outcome = scan_lines([
        "@USERSTORY-END",
        "@USERSTORY-1",
        "@USERSTORY-END",
        "@USERSTORY-2",
        "@USERSTORY-3",
        "body",
    ]);

    assert_eq!(outcome.stories.len(), 2);
    insta::assert_snapshot!(outcome.report.to_string().trim_end(), @r"
    Error: End tag found before start tag on line 1
    Error: No content found for user story 1
    Error: Start tag found before end tag on line 5
    ");
}

#[test]
fn duplicate_ids_are_separate_stories() {
    let outcome = scan_lines([
        "@USERSTORY-4",
        "first",
        "@USERSTORY-END",
        "@USERSTORY-4",
        "second",
        "@USERSTORY-END",
    ]);

    let ids: Vec<_> = outcome.stories.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["4", "4"]);
    assert_eq!(outcome.stories[1].content(), "second\n");
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(10)]
fn concatenated_blocks_yield_one_story_each(#[case] count: usize) {
    let text: String = (1..=count)
        .map(|n| format!("@USERSTORY-{n}\nline {n}a\nline {n}b\n@USERSTORY-END\nfiller\n"))
        .collect();

    let outcome = scan_document(&text);

    assert_eq!(outcome.stories.len(), count);
    for (index, story) in outcome.stories.iter().enumerate() {
        let n = index + 1;
        assert_eq!(story.id(), n.to_string());
        assert_eq!(story.content(), format!("line {n}a\nline {n}b\n"));
    }
    assert!(outcome.report.is_clean());
}

#[test]
fn project_scan_reads_first_line_then_stories() {
    let scan = scan_project_document(
        "// @PROJECT-42\n// @USERSTORY-1\n// body\n// @USERSTORY-END\n// @USERSTORY-END\n",
    );

    assert_eq!(scan.project, Some(ProjectId::new("42")));
    assert_eq!(scan.stories.len(), 1);
    assert_eq!(scan.stories[0].content(), "// body\n");
    // Line numbers stay relative to the whole document
    assert_eq!(
        scan.report.to_string(),
        "Error: End tag found before start tag on line 5\n"
    );
}

#[rstest]
#[case("")]
#[case("@USERSTORY-1\nbody\n@USERSTORY-END\n")]
#[case("\n@PROJECT-1\n@USERSTORY-1\nbody\n@USERSTORY-END\n")]
fn project_scan_without_tag_on_first_line_is_fatal(#[case] text: &str) {
    let scan = scan_project_document(text);

    assert_eq!(scan.project, None);
    assert!(scan.stories.is_empty());
    assert_eq!(scan.report, ScanReport::MissingProjectTag);
    assert_eq!(scan.report.to_string(), MISSING_PROJECT_TAG);
}

#[test]
fn project_scan_with_no_stories_is_clean() {
    let scan = scan_project_lines(vec!["@PROJECT-3".to_string(), "code".to_string()]);

    assert_eq!(scan.project.as_ref().map(ProjectId::as_str), Some("3"));
    assert!(scan.stories.is_empty());
    assert!(scan.report.is_clean());
}
