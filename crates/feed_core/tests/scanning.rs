use feed_core::{find_author_id, scan_work_ids, AuthorId, AuthorName, WorkId};

fn init_logging() {
    feed_logging::initialize_for_tests();
}

fn ids(values: &[&str]) -> Vec<WorkId> {
    values.iter().copied().map(WorkId::from).collect()
}

#[test]
fn author_id_is_segment_before_marker() {
    init_logging();
    let body = r#"<td><a href="/browse/detail/abc123">alice</a></td>"#;
    let id = find_author_id(body, &AuthorName::from("alice"));
    assert_eq!(id, Some(AuthorId::new("abc123")));
}

#[test]
fn author_match_ignores_case_and_uses_first_occurrence() {
    let body = concat!(
        r#"<a href="/browse/byuser/42">Alice</a>"#,
        r#"<a href="/browse/byuser/99">alice</a>"#,
    );
    let id = find_author_id(body, &AuthorName::from("ALICE"));
    assert_eq!(id, Some(AuthorId::new("42")));
}

#[test]
fn author_match_folds_only_ascii_case() {
    let body = r#"<a href="/browse/byuser/7">Émile</a>"#;
    assert_eq!(
        find_author_id(body, &AuthorName::from("émile")),
        None
    );
    assert_eq!(
        find_author_id(body, &AuthorName::from("Émile")),
        Some(AuthorId::new("7"))
    );
}

#[test]
fn author_missing_marker_is_not_found() {
    let body = "<html><body>No results for alicex</body></html>";
    assert_eq!(find_author_id(body, &AuthorName::from("alice")), None);
    assert_eq!(find_author_id("", &AuthorName::from("alice")), None);
}

#[test]
fn author_marker_at_start_of_body_is_not_found() {
    assert_eq!(find_author_id(">alice<", &AuthorName::from("alice")), None);
}

#[test]
fn author_segment_without_slash_uses_whole_prefix() {
    let id = find_author_id(r#"77">bob<"#, &AuthorName::from("bob"));
    assert_eq!(id, Some(AuthorId::new("77")));
}

#[test]
fn listing_scan_dedupes_in_first_seen_order() {
    let body = concat!(
        r#"<a href="/browse/detail/song2-1">x</a>"#,
        r#"<a href="/browse/detail/song1-1">y</a>"#,
        r#"<a href="/browse/detail/song2-1"><img></a>"#,
    );
    assert_eq!(scan_work_ids(body), ids(&["song2-1", "song1-1"]));
}

#[test]
fn listing_scan_is_case_sensitive_and_handles_garbage() {
    assert!(scan_work_ids(r#"<a href="/BROWSE/DETAIL/song1-1">"#).is_empty());
    assert!(scan_work_ids("").is_empty());
    // Unterminated token at the end of the body.
    assert_eq!(
        scan_work_ids(r#""/browse/detail/a-1" /browse/detail/b-2"#),
        ids(&["a-1"])
    );
}

#[test]
fn listing_scan_rejects_path_like_tokens() {
    let body = concat!(
        r#""/browse/detail/../etc""#,
        r#""/browse/detail/""#,
        r#""/browse/detail/ok-1""#,
    );
    assert_eq!(scan_work_ids(body), ids(&["ok-1"]));
}
