use std::time::Duration;

use feed_core::{
    shares_base, stale_entries, AuthorName, AuthorQueue, AuthorSummary, DownloadHistory, RunReport,
    WorkId, DEFAULT_AUTHORS,
};

#[test]
fn work_id_splits_on_first_dash() {
    let work = WorkId::from("123-4-5");
    assert_eq!(work.base_id(), "123");
    assert_eq!(work.version(), "4-5");

    let bare = WorkId::from("123");
    assert_eq!(bare.base_id(), "123");
    assert_eq!(bare.version(), "");
    assert_eq!(bare.canonical_name(), "123");
}

#[test]
fn shares_base_follows_dash_rules() {
    assert!(shares_base("song1-1", "song1"));
    assert!(shares_base("song1", "song1"));
    assert!(!shares_base("song10-1", "song1"));
    assert!(!shares_base("song10", "song1"));
    assert!(!shares_base("other-song1", "song1"));
}

#[test]
fn stale_entries_keeps_only_current_version() {
    let current = WorkId::from("song1-2");
    let names = ["song1-1", "song1-2", "song1", "song2-1", "song10-3"];
    let stale = stale_entries(&current, names.iter().copied());
    assert_eq!(stale, vec!["song1-1".to_string(), "song1".to_string()]);
}

#[test]
fn stale_entries_for_bare_identifier_keeps_bare_directory() {
    let current = WorkId::from("song1");
    let names = ["song1", "song1-1"];
    assert_eq!(
        stale_entries(&current, names.iter().copied()),
        vec!["song1-1".to_string()]
    );
}

#[test]
fn history_text_is_sorted_and_deduplicated() {
    let history = DownloadHistory::from_text("b-1\n\na-2\r\n  b-1 \nc-1");
    assert_eq!(history.len(), 3);
    assert_eq!(history.to_text(), "a-2\nb-1\nc-1\n");
    assert_eq!(DownloadHistory::from_text(&history.to_text()), history);
}

#[test]
fn history_record_reports_new_entries() {
    let mut history = DownloadHistory::new();
    assert!(history.record(WorkId::from("a-1")));
    assert!(!history.record(WorkId::from("a-1")));
    assert!(history.contains(&WorkId::from("a-1")));
    assert_eq!(history.len(), 1);
}

#[test]
fn queue_parses_favorites_in_file_order() {
    let mut queue = AuthorQueue::from_text("  freeek \n\n# comment\n; also comment\npurphoros\n");
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.pop(), Some(AuthorName::from("freeek")));
    assert_eq!(queue.pop(), Some(AuthorName::from("purphoros")));
    assert_eq!(queue.pop(), None);
    assert!(queue.is_empty());
}

#[test]
fn default_authors_parse_back() {
    let queue = AuthorQueue::from_text(&DEFAULT_AUTHORS.join("\n"));
    assert_eq!(queue.len(), DEFAULT_AUTHORS.len());
}

#[test]
fn summary_line_reports_skipped_as_difference() {
    let summary = AuthorSummary {
        author: AuthorName::from("alice"),
        elapsed: Duration::from_millis(3_400),
        total: 5,
        downloaded: 2,
    };
    assert_eq!(summary.skipped(), 3);
    assert_eq!(
        summary.to_string(),
        "Downloaded 2 songs from alice in 3 seconds. Skipped 3 songs."
    );

    let report = RunReport {
        authors: vec![summary.clone(), summary],
        unresolved: Vec::new(),
        history_saved: true,
    };
    assert_eq!(report.downloaded(), 4);
    assert_eq!(report.skipped(), 6);
}
