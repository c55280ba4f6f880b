use pocatalog::{Document, DocumentIssue, Error, Line};

/// A blank line, the header entry, then another blank line.
const GENERIC_HEADER: [&str; 4] = ["", r#"msgid """#, r#"msgstr "Language: ja\n""#, ""];

fn catalog(body: &[&str]) -> String {
    GENERIC_HEADER
        .iter()
        .chain(body)
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse(body: &[&str]) -> Document {
    let text = catalog(body);
    Document::parse(&text).unwrap_or_else(|e| panic!("failed to parse catalog: {e}\n{text}"))
}

fn document_issue(body: &[&str]) -> DocumentIssue {
    match Document::parse(&catalog(body)) {
        Err(Error::DocumentStructure { issue, .. }) => issue,
        other => panic!("expected a document structure error, got {other:?}"),
    }
}

fn has_contextual_entry(document: &Document, context: &str, id: &str) -> bool {
    document.find(Some(context), id).is_some()
}

fn has_entry(document: &Document, id: &str) -> bool {
    document.find(None, id).is_some()
}

fn comment(line: &Line) -> Option<&str> {
    if line.is_comment() { line.comment() } else { None }
}

#[test]
fn duplicate_entries_are_rejected() {
    let issue = document_issue(&[
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        r#"msgid "foo""#,
        r#"msgstr "baz""#,
    ]);
    assert!(matches!(issue, DocumentIssue::DuplicateEntry(_)));

    let issue = document_issue(&[
        r#"msgctxt "apple""#,
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        r#"msgctxt "apple""#,
        r#"msgid "foo""#,
        r#"msgstr "baz""#,
    ]);
    assert!(matches!(issue, DocumentIssue::DuplicateEntry(_)));
}

#[test]
fn context_followed_by_context_is_rejected() {
    let issue = document_issue(&[
        r#"msgctxt "apple""#,
        "",
        r#"msgctxt "orange""#,
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
    ]);
    assert_eq!(issue, DocumentIssue::ConsecutiveContexts);
}

#[test]
fn same_id_with_different_contexts() {
    let document = parse(&[
        r#"msgctxt "apple""#,
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        r#"msgctxt "orange""#,
        r#"msgid "foo""#,
        r#"msgstr "baz""#,
    ]);
    assert_eq!(document.messages().len(), 2);
    assert!(has_contextual_entry(&document, "apple", "foo"));
    assert!(has_contextual_entry(&document, "orange", "foo"));
}

#[test]
fn same_context_with_different_ids() {
    let document = parse(&[
        r#"msgctxt "apple""#,
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        r#"msgctxt "apple""#,
        r#"msgid "bar""#,
        r#"msgstr "baz""#,
    ]);
    assert_eq!(document.messages().len(), 2);
    assert!(has_contextual_entry(&document, "apple", "foo"));
    assert!(has_contextual_entry(&document, "apple", "bar"));
}

#[test]
fn only_first_entry_has_context() {
    let document = parse(&[
        r#"msgctxt "apple""#,
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        r#"msgid "foo""#,
        r#"msgstr "baz""#,
    ]);
    assert_eq!(document.messages().len(), 2);
    assert!(has_contextual_entry(&document, "apple", "foo"));
    assert!(has_entry(&document, "foo"));
}

#[test]
fn only_second_entry_has_context() {
    let document = parse(&[
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        r#"msgctxt "apple""#,
        r#"msgid "foo""#,
        r#"msgstr "baz""#,
    ]);
    assert_eq!(document.messages().len(), 2);
    assert!(has_entry(&document, "foo"));
    assert!(has_contextual_entry(&document, "apple", "foo"));
}

#[test]
fn comments_in_all_sorts_of_places() {
    let document = parse(&[
        "# comment at start",
        r#"msgid "foo" #comment inline to msgid"#,
        "#comment between keywords",
        r#"msgstr "bar""#,
        "#comment at end",
    ]);
    assert_eq!(document.messages().len(), 1);

    let lines = document.messages()[0].lines();
    assert!(lines[0].is_whitespace());
    assert_eq!(comment(&lines[1]), Some(" comment at start"));
    assert_eq!(lines[2].keyword().map(|k| k.name.as_str()), Some("msgid"));
    assert_eq!(lines[2].comment(), Some("comment inline to msgid"));
    assert_eq!(comment(&lines[3]), Some("comment between keywords"));
    assert_eq!(comment(&lines[5]), Some("comment at end"));
}

#[test]
fn trailing_comments_stay_with_entry_when_no_blank_line_follows() {
    let document = parse(&[
        "# comment at start",
        r#"msgid "foo" #comment inline to msgid"#,
        "#comment between keywords",
        r#"msgstr "bar""#,
        "#comment at end",
        "#another comment at end",
        r#"msgid "bar""#,
        r#"msgstr "baz""#,
    ]);
    assert_eq!(document.messages().len(), 2);

    let first = document.messages()[0].lines();
    assert_eq!(comment(first.last().unwrap()), Some("another comment at end"));

    let second = document.messages()[1].lines();
    assert!(second[0].has_keyword("msgid"));
}

#[test]
fn trailing_comments_split_at_blank_line() {
    let document = parse(&[
        "# comment at start",
        r#"msgid "foo" #comment inline to msgid"#,
        "#comment between keywords",
        r#"msgstr "bar""#,
        "#comment at end",
        "#another comment at end",
        "",
        "#comment at start",
        r#"msgid "bar""#,
        r#"msgstr "baz""#,
    ]);
    assert_eq!(document.messages().len(), 2);

    let first = document.messages()[0].lines();
    assert_eq!(comment(first.last().unwrap()), Some("another comment at end"));

    let second = document.messages()[1].lines();
    assert!(second[0].is_whitespace());
    assert_eq!(comment(&second[1]), Some("comment at start"));
}

#[test]
fn second_entry_keeps_everything_after_first_blank_line() {
    let document = parse(&[
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        "#comment 1",
        "",
        "#comment 2",
        "#comment 3",
        r#"msgid "bar""#,
        "",
        "",
        r#"msgstr "baz""#,
    ]);
    assert_eq!(document.messages().len(), 2);
    assert_eq!(document.messages()[0].lines().len(), 3);

    let lines = document.messages()[1].lines();
    assert!(lines[0].is_whitespace());
    assert_eq!(comment(&lines[1]), Some("comment 1"));
    assert!(lines[2].is_whitespace());
    assert_eq!(comment(&lines[3]), Some("comment 2"));
    assert_eq!(comment(&lines[4]), Some("comment 3"));
    assert!(lines[6].is_whitespace());
    assert!(lines[7].is_whitespace());
    assert_eq!(document.messages()[1].value(), "baz");
}

#[test]
fn last_entry_keeps_its_whole_tail() {
    let document = parse(&[
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        "#comment 1",
        "",
        "",
        "#comment 2",
        "",
        "",
    ]);
    assert_eq!(document.messages().len(), 1);

    let lines = document.messages()[0].lines();
    assert_eq!(lines.len(), 9);
    assert!(lines[0].is_whitespace());
    assert!(lines[3].is_whitespace());
    assert_eq!(comment(&lines[4]), Some("comment 1"));
    assert!(lines[5].is_whitespace());
    assert!(lines[6].is_whitespace());
    assert_eq!(comment(&lines[7]), Some("comment 2"));
    assert!(lines[8].is_whitespace());
}

#[test]
fn obsolete_entry_between_active_entries() {
    let document = parse(&[
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        "#comment",
        r#"#~ msgid "bar""#,
        "#comment",
        r#"#~ msgstr "baz""#,
        r##"#~ "something" #inline comment"##,
        "#comment",
        "",
        r#"msgid "baz""#,
        r#"msgstr "wat""#,
    ]);
    assert_eq!(document.messages().len(), 3);

    let entry = &document.messages()[1];
    assert_eq!(entry.id(), "bar");
    assert!(entry.is_obsolete());
    assert_eq!(entry.value(), "bazsomething");

    let lines = entry.lines();
    assert_eq!(lines.len(), 7);
    assert!(lines[0].is_whitespace());
    assert_eq!(comment(&lines[1]), Some("comment"));
    assert_eq!(comment(&lines[3]), Some("comment"));
    assert_eq!(comment(&lines[5]), Some(r#"~ "something" #inline comment"#));
    assert_eq!(comment(&lines[6]), Some("comment"));

    assert!(!document.messages()[0].is_obsolete());
    assert!(!document.messages()[2].is_obsolete());
}

#[test]
fn consecutive_obsolete_entries() {
    let mut body = Vec::new();
    for (i, id) in ["a", "b", "c"].iter().enumerate() {
        if i > 0 {
            body.push(String::new());
        }
        body.push("#comment".to_string());
        body.push(format!(r#"#~ msgid "{id}""#));
        body.push("#comment".to_string());
        body.push(r#"#~ msgstr "baz""#.to_string());
        body.push(r##"#~ "something" #inline comment"##.to_string());
        body.push("#comment".to_string());
    }
    let body: Vec<&str> = body.iter().map(String::as_str).collect();
    let document = parse(&body);

    let ids: Vec<&str> = document.messages().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    for entry in document.messages() {
        assert!(entry.is_obsolete());
        assert_eq!(entry.value(), "bazsomething");

        let lines = entry.lines();
        assert!(lines[0].is_whitespace());
        assert_eq!(comment(&lines[1]), Some("comment"));
        assert_eq!(comment(&lines[3]), Some("comment"));
        assert_eq!(comment(&lines[5]), Some(r#"~ "something" #inline comment"#));
        assert_eq!(comment(&lines[6]), Some("comment"));
    }
}

#[test]
fn obsolete_entry_with_blank_lines_inside() {
    let document = parse(&[
        r#"msgid "foo""#,
        r#"msgstr "bar""#,
        "",
        "#comment",
        "",
        r#"#~ msgid "bar""#,
        "",
        "#comment",
        "",
        r#"#~ msgstr "baz""#,
        "",
        r##"#~ "something" #inline comment"##,
        "#comment",
        "",
        r#"msgid "baz""#,
        r#"msgstr "wat""#,
    ]);
    assert_eq!(document.messages().len(), 3);

    let entry = &document.messages()[1];
    assert_eq!(entry.id(), "bar");
    assert!(entry.is_obsolete());
    assert_eq!(entry.value(), "bazsomething");

    let lines = entry.lines();
    assert_eq!(lines.len(), 11);
    assert!(lines[0].is_whitespace());
    assert_eq!(comment(&lines[1]), Some("comment"));
    assert!(lines[2].is_whitespace());
    assert!(lines[4].is_whitespace());
    assert_eq!(comment(&lines[5]), Some("comment"));
    assert!(lines[6].is_whitespace());
    assert!(lines[8].is_whitespace());
    assert_eq!(comment(&lines[9]), Some(r#"~ "something" #inline comment"#));
    assert_eq!(comment(&lines[10]), Some("comment"));
}

#[test]
fn obsolete_fuzzy_entry_with_previous_msgid() {
    let document = parse(&[
        "#, fuzzy",
        r#"#~| msgid "old""#,
        r#"#~ msgid "new""#,
        r#"#~ msgstr "neu""#,
    ]);
    assert_eq!(document.messages().len(), 1);

    let entry = &document.messages()[0];
    assert_eq!(entry.id(), "new");
    assert_eq!(entry.value(), "neu");
    assert!(entry.is_obsolete());
    assert!(entry.header().is_fuzzy());
    assert!(entry.header().translator_comments.is_empty());
    let previous = entry
        .lines()
        .iter()
        .find(|line| line.raw().starts_with("#~|"))
        .unwrap();
    assert!(previous.logical().is_comment());
    assert_eq!(previous.logical().comment(), Some(r#"| msgid "old""#));
}

#[test]
fn obsolete_and_active_lines_cannot_mix() {
    let result = Document::parse(&catalog(&[
        r#"msgid "foo""#,
        r#"#~ msgstr "bar""#,
    ]));
    assert!(matches!(
        result,
        Err(Error::EntryStructure {
            issue: pocatalog::EntryIssue::MixedObsolete,
            ..
        })
    ));
}

#[test]
fn plural_entry_values_in_order() {
    let document = parse(&[
        r#"msgctxt "foo""#,
        r#"msgid "bar""#,
        r#"msgid_plural "bars""#,
        r#"msgstr[0] "bazs0""#,
        r#"msgstr[1] "bazs1""#,
        r#"msgstr[2] "bazs2""#,
    ]);
    let entry = document.find(Some("foo"), "bar").unwrap();
    assert_eq!(entry.plural_id(), Some("bars"));
    assert_eq!(entry.plural_values(), ["bazs0", "bazs1", "bazs2"]);
}

#[test]
fn multi_line_strings_concatenate() {
    let document = parse(&[
        r#"msgid """#,
        r#""Hello, ""#,
        r#""world\n""#,
        r#"msgstr "Bonjour, ""#,
        r#""le monde\n""#,
    ]);
    let entry = &document.messages()[0];
    assert_eq!(entry.id(), "Hello, world\n");
    assert_eq!(entry.value(), "Bonjour, le monde\n");
}
