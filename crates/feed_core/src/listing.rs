use crate::WorkId;

/// Marker preceding every work link on a listing page.
pub const DETAIL_MARKER: &str = "/browse/detail/";

/// Number of works per listing page; offsets advance by this much.
pub const PAGE_STRIDE: u32 = 20;

/// Collect the work identifiers linked from a listing page.
///
/// Each `/browse/detail/` marker starts a token that runs up to the next `"`.
/// Duplicates are dropped keeping first-seen order. Tokens that are empty or
/// not usable as a directory name are ignored.
pub fn scan_work_ids(body: &str) -> Vec<WorkId> {
    let mut found: Vec<WorkId> = Vec::new();
    let mut rest = body;
    while let Some(index) = rest.find(DETAIL_MARKER) {
        rest = &rest[index + DETAIL_MARKER.len()..];
        let Some(end) = rest.find('"') else {
            break;
        };
        let work = WorkId::new(&rest[..end]);
        rest = &rest[end..];
        if work.is_path_safe() && !found.contains(&work) {
            found.push(work);
        }
    }
    found
}
