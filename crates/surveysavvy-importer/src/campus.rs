//! Campus name normalization

use std::collections::HashMap;

/// Maps campus spelling variants to one canonical name
///
/// Whitespace is collapsed and a trailing `Campus` is dropped before the
/// alias lookup, which ignores case. Unknown names pass through cleaned.
#[derive(Debug, Clone, Default)]
pub struct CampusNormalizer {
    aliases: HashMap<String, String>,
}

impl CampusNormalizer {
    /// Build from `variant -> canonical` pairs
    pub fn new<'a, I>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let aliases = aliases
            .into_iter()
            .map(|(alias, canonical)| (clean(alias).to_lowercase(), canonical.trim().to_string()))
            .collect();
        Self { aliases }
    }

    /// Canonical form of a campus name
    pub fn normalize(&self, campus: &str) -> String {
        let cleaned = clean(campus);
        match self.aliases.get(&cleaned.to_lowercase()) {
            Some(canonical) => canonical.clone(),
            None => cleaned,
        }
    }
}

fn clean(campus: &str) -> String {
    let collapsed = campus.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.rsplit_once(' ') {
        Some((stem, last)) if last.eq_ignore_ascii_case("campus") => stem.to_string(),
        _ => collapsed,
    }
}
