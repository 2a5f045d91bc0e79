/*!
Read-only, name-keyed catalogs of shapes, materials, wires, bobbins and
insulation materials (§3, §5: "loaded at library initialization and are
read-only thereafter").

Grounded on [`crate::material::Material`] and [`crate::wire::Wire`]'s
[`serde_mosaic::DatabaseEntry`] implementations - a `Catalog<T>` is the
natural generalization of the name-keyed lookup `Material`'s own doc
comment already describes.
*/

use crate::error::{Error, Result};
use std::collections::HashMap;

/// A read-only, name-keyed collection of catalog entries of one kind (e.g.
/// `Catalog<CoreShape>`, `Catalog<Material>`, `Catalog<Wire>`).
///
/// Built once from parsed catalog documents (§6: "Files are loaded once; the
/// in-memory representation is canonical") and shared thereafter; nothing in
/// this crate mutates a `Catalog` after [`Catalog::from_entries`] returns.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: HashMap<String, T>,
    kind: &'static str,
}

impl<T> Catalog<T> {
    /// Builds a catalog from `(name, entry)` pairs. `kind` names the catalog
    /// for error messages (`"shape"`, `"material"`, `"wire"`, `"bobbin"`,
    /// `"insulation"`).
    pub fn from_entries(kind: &'static str, entries: impl IntoIterator<Item = (String, T)>) -> Self {
        return Self {
            entries: entries.into_iter().collect(),
            kind,
        };
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by name, returning [`Error::UnknownEntity`] if
    /// absent.
    pub fn get(&self, name: &str) -> Result<&T> {
        return self.entries.get(name).ok_or_else(|| Error::UnknownEntity {
            kind: self.kind,
            name: name.to_string(),
        });
    }

    /// `true` if `name` resolves to an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All entry names, in arbitrary order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterates over every `(name, entry)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All entries matching `predicate`.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.entries.values().filter(|v| predicate(v)).collect()
    }
}
