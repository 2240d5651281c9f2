use crate::WorkId;

/// Whether a library directory holds some version of the work `base_id`.
///
/// Dashed names match on the `{base_id}-` prefix, bare names must equal the
/// base id exactly.
pub fn shares_base(dir_name: &str, base_id: &str) -> bool {
    if dir_name.contains('-') {
        dir_name
            .strip_prefix(base_id)
            .is_some_and(|rest| rest.starts_with('-'))
    } else {
        dir_name == base_id
    }
}

/// Library directories that are older or other versions of `current` and
/// should be removed, in the order they were given.
pub fn stale_entries<'a, I>(current: &WorkId, dir_names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let base_id = current.base_id();
    dir_names
        .into_iter()
        .filter(|name| shares_base(name, base_id))
        .filter(|name| *name != current.canonical_name())
        .map(ToOwned::to_owned)
        .collect()
}
