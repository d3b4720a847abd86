use indexmap::IndexMap;
use indexmap::map::Entry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The raw input for a single [`Namespace`](super::Namespace): a multimap from names to
/// one or more string values.
///
/// Names keep the order in which they were first inserted, and so do the values
/// for each name.
/// Every name is guaranteed to have at least one value.
pub struct SourceValues {
    entries: IndexMap<String, Vec<String>>,
}

impl SourceValues {
    /// An empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the values for `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        match self.entries.entry(name.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value.into()),
            Entry::Vacant(entry) => {
                entry.insert(vec![value.into()]);
            }
        }
    }

    /// Replace all values for `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), vec![value.into()]);
    }

    /// The values for `name`, using an exact match on the name.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// The values for `name`.
    ///
    /// If there is no exact match, names are compared case-insensitively and the
    /// first match, in insertion order, is returned.
    pub fn lookup(&self, name: &str) -> Option<&[String]> {
        if let Some(values) = self.get(name) {
            return Some(values);
        }
        self.entries
            .iter()
            .find(|(key, _)| eq_ignore_case(key, name))
            .map(|(_, values)| values.as_slice())
    }

    /// Append every value in `other` after the values already present for the same name.
    pub fn merge(&mut self, other: &SourceValues) {
        for (name, values) in other.iter() {
            for value in values {
                self.append(name, value.as_str());
            }
        }
    }

    /// `true` if there are no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over names and their values, in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl<K, V> FromIterator<(K, V)> for SourceValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = SourceValues::new();
        values.extend(iter);
        values
    }
}

impl<K, V> Extend<(K, V)> for SourceValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

/// Compare two names character by character, ignoring case.
///
/// Two characters match if they are equal or if they share a single-character
/// lowercase or uppercase mapping: `ſ` matches `s` and `S`, the Kelvin sign matches `k`.
/// Characters whose mapping expands into several characters (e.g. `ß` into `SS`) only
/// match themselves.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(a, b)| chars_eq_ignore_case(a, b))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let same_mapping = |a: &mut dyn Iterator<Item = char>, b: &mut dyn Iterator<Item = char>| {
        match (a.next(), a.next(), b.next(), b.next()) {
            (Some(a), None, Some(b), None) => a == b,
            _ => false,
        }
    };
    same_mapping(&mut a.to_lowercase(), &mut b.to_lowercase())
        || same_mapping(&mut a.to_uppercase(), &mut b.to_uppercase())
}
