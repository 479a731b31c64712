//! Values produced while binding a file: per-field mappings, per-method
//! bindings and the file's referenced types.

use indexmap::IndexSet;

/// A field's target-side declaration plus the expression that reads its value
/// back into the request.
///
/// Both halves empty means the field has no binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBinding {
    pub declaration: String,
    pub accessor: String,
}

impl FieldBinding {
    pub fn new(declaration: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            declaration: declaration.into(),
            accessor: accessor.into(),
        }
    }

    /// The "no binding" result for kinds a dialect cannot express.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.declaration.is_empty() && self.accessor.is_empty()
    }
}

/// The generated fragment for one RPC method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Identifier the fragment exports (e.g. `getFeature`).
    pub export: String,
    pub request_type: String,
    pub response_type: String,
    /// Self-contained code; never refers to another binding's locals.
    pub fragment: String,
}

impl Binding {
    pub fn new(
        export: impl Into<String>,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            export: export.into(),
            request_type: request_type.into(),
            response_type: response_type.into(),
            fragment: fragment.into(),
        }
    }

    /// Type names the fragment refers to: always request then response,
    /// whether or not any field was bound.
    pub fn referenced_types(&self) -> [&str; 2] {
        [&self.request_type, &self.response_type]
    }
}

/// Insertion-ordered set of type names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSet {
    names: IndexSet<String>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names joined by `sep`, first occurrence first.
    pub fn join(&self, sep: &str) -> String {
        self.iter().collect::<Vec<_>>().join(sep)
    }
}

impl<S: Into<String>> Extend<S> for TypeSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TypeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
