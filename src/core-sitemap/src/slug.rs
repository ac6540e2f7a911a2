//! Filesystem-safe names for classifier groups.

use std::collections::HashSet;

/// Turns a classifier label into a slug usable inside a file name.
///
/// Lowercases and trims the label, replaces every whitespace character with `-` (runs are
/// not collapsed), then drops every character outside `[a-z0-9-]`. The result may be empty.
///
/// # Examples
///
/// ```
/// # use core_sitemap::sanitize;
/// assert_eq!(sanitize("  New York City "), "new-york-city");
/// assert_eq!(sanitize("São Paulo!"), "so-paulo");
/// assert_eq!(sanitize("Los  Angeles"), "los--angeles");
/// assert_eq!(sanitize("???"), "");
/// ```
pub fn sanitize(label: &str) -> String {
    let lowered = label.to_lowercase();
    lowered
        .trim()
        .chars()
        .map(|ch| if ch.is_whitespace() { '-' } else { ch })
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-')
        .collect()
}

/// Assigns every label a non-empty slug that no other label shares.
///
/// Output order matches input order. A label that sanitizes to nothing falls back to
/// `group-<position>` (1-based). When several labels share a slug, the first one keeps it and
/// the others get the lowest free `-2`, `-3`, ... suffix. Suffixed slugs never reuse a slug that
/// some other label produces on its own.
pub fn unique_slugs<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let natural: Vec<String> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let slug = sanitize(label.as_ref());
            if slug.is_empty() { format!("group-{}", i + 1) } else { slug }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::with_capacity(natural.len());
    let mut assigned: Vec<Option<String>> = natural
        .iter()
        .map(|slug| taken.insert(slug.clone()).then(|| slug.clone()))
        .collect();

    for (slot, slug) in assigned.iter_mut().zip(&natural) {
        if slot.is_some() {
            continue;
        }
        let mut n = 2;
        let mut candidate = format!("{slug}-{n}");
        while taken.contains(&candidate) {
            n += 1;
            candidate = format!("{slug}-{n}");
        }
        taken.insert(candidate.clone());
        *slot = Some(candidate);
    }

    assigned.into_iter().flatten().collect()
}
