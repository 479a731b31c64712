//! In-memory index of descriptor files, messages and enums.

use std::collections::BTreeMap;

use crate::model::{File, Message};

/// Error returned when a name does not resolve in the [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("message type not found: {0}")]
    MessageNotFound(String),

    #[error("type not found: {0}")]
    TypeNotFound(String),
}

/// Error returned when a registry cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid descriptor JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate file: {0}")]
    DuplicateFile(String),

    #[error("duplicate type: {0}")]
    DuplicateType(String),
}

/// Read-only index of descriptor files.
///
/// Messages and enums are keyed by fully-qualified reference with a leading
/// dot (`.pkg.Outer.Inner`), which is the form methods and fields use for
/// the types they refer to.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    files: BTreeMap<String, File>,
    messages: BTreeMap<String, MessageEntry>,
    /// Enum reference to declaring file name.
    enums: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct MessageEntry {
    file: String,
    /// Index path through `messages` / `nested`.
    path: Vec<usize>,
}

/// Where a message or enum is declared.
#[derive(Debug, Clone, Copy)]
pub struct TypeLocation<'a> {
    pub file: &'a File,
    /// Name inside the package, nesting levels joined by dots
    /// (`Outer.Inner`).
    pub local_name: &'a str,
}

#[derive(Default)]
struct Collected {
    messages: Vec<(String, Vec<usize>)>,
    enums: Vec<String>,
}

impl Registry {
    /// Build a registry from a set of files.
    pub fn from_files(files: impl IntoIterator<Item = File>) -> Result<Self, LoadError> {
        let mut registry = Self::default();
        for file in files {
            registry.insert(file)?;
        }
        Ok(registry)
    }

    /// Build a registry from a JSON array of files.
    pub fn from_json(input: &str) -> Result<Self, LoadError> {
        let files: Vec<File> = serde_json::from_str(input)?;
        Self::from_files(files)
    }

    fn insert(&mut self, file: File) -> Result<(), LoadError> {
        if self.files.contains_key(&file.name) {
            return Err(LoadError::DuplicateFile(file.name));
        }

        let prefix = package_prefix(&file.package);
        let mut collected = Collected::default();
        for e in &file.enums {
            collected.enums.push(format!("{}.{}", prefix, e.name));
        }
        for (idx, message) in file.messages.iter().enumerate() {
            collect_types(&prefix, message, vec![idx], &mut collected);
        }

        let Collected { messages, enums } = collected;
        for type_ref in messages.iter().map(|(r, _)| r).chain(&enums) {
            if self.is_declared(type_ref) {
                return Err(LoadError::DuplicateType(type_ref.clone()));
            }
        }
        for (type_ref, path) in messages {
            self.messages.insert(
                type_ref,
                MessageEntry {
                    file: file.name.clone(),
                    path,
                },
            );
        }
        for type_ref in enums {
            self.enums.insert(type_ref, file.name.clone());
        }

        self.files.insert(file.name.clone(), file);
        Ok(())
    }

    fn is_declared(&self, key: &str) -> bool {
        self.messages.contains_key(key) || self.enums.contains_key(key)
    }

    /// Look up a file by the name protoc gave it.
    pub fn lookup_file(&self, name: &str) -> Result<&File, LookupError> {
        self.files
            .get(name)
            .ok_or_else(|| LookupError::FileNotFound(name.to_string()))
    }

    /// Resolve a fully-qualified message reference.
    ///
    /// References without a leading dot are treated as already fully
    /// qualified.
    pub fn lookup_message(&self, type_ref: &str) -> Result<&Message, LookupError> {
        let key = qualified_key(type_ref);
        let not_found = || LookupError::MessageNotFound(type_ref.to_string());

        let entry = self.messages.get(&key).ok_or_else(not_found)?;
        let file = self.files.get(&entry.file).ok_or_else(not_found)?;

        let (first, rest) = entry.path.split_first().ok_or_else(not_found)?;
        let mut message = file.messages.get(*first).ok_or_else(not_found)?;
        for idx in rest {
            message = message.nested.get(*idx).ok_or_else(not_found)?;
        }
        Ok(message)
    }

    /// Find the file declaring a message or enum, and the type's name inside
    /// its package.
    pub fn locate_type(&self, type_ref: &str) -> Result<TypeLocation<'_>, LookupError> {
        let key = qualified_key(type_ref);
        let not_found = || LookupError::TypeNotFound(type_ref.to_string());

        let (key, file_name) = match self.messages.get_key_value(&key) {
            Some((key, entry)) => (key, &entry.file),
            None => self.enums.get_key_value(&key).ok_or_else(not_found)?,
        };
        let file = self.files.get(file_name).ok_or_else(not_found)?;
        let local_name = key
            .strip_prefix(&package_prefix(&file.package))
            .and_then(|rest| rest.strip_prefix('.'))
            .ok_or_else(not_found)?;
        Ok(TypeLocation { file, local_name })
    }
}

fn qualified_key(type_ref: &str) -> String {
    if type_ref.starts_with('.') {
        type_ref.to_string()
    } else {
        format!(".{}", type_ref)
    }
}

fn package_prefix(package: &str) -> String {
    if package.is_empty() {
        String::new()
    } else {
        format!(".{}", package)
    }
}

fn collect_types(prefix: &str, message: &Message, path: Vec<usize>, out: &mut Collected) {
    let full_name = format!("{}.{}", prefix, message.name);
    for e in &message.enums {
        out.enums.push(format!("{}.{}", full_name, e.name));
    }
    for (idx, nested) in message.nested.iter().enumerate() {
        let mut nested_path = path.clone();
        nested_path.push(idx);
        collect_types(&full_name, nested, nested_path, out);
    }
    out.messages.push((full_name, path));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Enum, Field, FieldKind};

    fn sample() -> Registry {
        let file = File::new("geo.proto", "geo")
            .with_message(
                Message::new("Point", vec![Field::new("lat", FieldKind::Int32)])
                    .with_nested(Message::new("Meta", vec![Field::new("tag", FieldKind::String)]))
                    .with_enum(Enum::new("Kind", ["PIN", "AREA"])),
            )
            .with_enum(Enum::new("Unit", ["METERS"]));
        let bare = File::new("bare.proto", "").with_message(Message::new("Empty", vec![]));
        Registry::from_files([file, bare]).unwrap()
    }

    #[test]
    fn lookup_nested_message() {
        let registry = sample();
        assert_eq!(registry.lookup_message(".geo.Point").unwrap().name, "Point");
        assert_eq!(
            registry.lookup_message(".geo.Point.Meta").unwrap().fields[0].name,
            "tag"
        );
        assert_eq!(registry.lookup_message("geo.Point").unwrap().name, "Point");
    }

    #[test]
    fn lookup_without_package() {
        let registry = sample();
        assert_eq!(registry.lookup_message(".Empty").unwrap().name, "Empty");
    }

    #[test]
    fn missing_names() {
        let registry = sample();
        assert_eq!(
            registry.lookup_file("nope.proto").unwrap_err(),
            LookupError::FileNotFound("nope.proto".into())
        );
        assert_eq!(
            registry.lookup_message(".geo.Line").unwrap_err(),
            LookupError::MessageNotFound(".geo.Line".into())
        );
    }

    #[test]
    fn locate_messages_and_enums() {
        let registry = sample();
        let meta = registry.locate_type(".geo.Point.Meta").unwrap();
        assert_eq!(meta.file.name, "geo.proto");
        assert_eq!(meta.local_name, "Point.Meta");
        assert_eq!(registry.locate_type(".geo.Point.Kind").unwrap().local_name, "Point.Kind");
        assert_eq!(registry.locate_type("geo.Unit").unwrap().local_name, "Unit");
        assert_eq!(registry.locate_type(".Empty").unwrap().file.name, "bare.proto");
        assert_eq!(
            registry.locate_type(".geo.Line").unwrap_err(),
            LookupError::TypeNotFound(".geo.Line".into())
        );
    }

    #[test]
    fn enums_are_not_messages() {
        let registry = sample();
        assert_eq!(
            registry.lookup_message(".geo.Unit").unwrap_err(),
            LookupError::MessageNotFound(".geo.Unit".into())
        );
    }

    #[test]
    fn duplicate_file_rejected() {
        let err = Registry::from_files([File::new("a.proto", "a"), File::new("a.proto", "b")])
            .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateFile(name) if name == "a.proto"));
    }

    #[test]
    fn duplicate_type_rejected() {
        let a = File::new("a.proto", "pkg").with_message(Message::new("M", vec![]));
        let b = File::new("b.proto", "pkg").with_message(Message::new("M", vec![]));
        let err = Registry::from_files([a, b]).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateType(name) if name == ".pkg.M"));

        let a = File::new("a.proto", "pkg").with_message(Message::new("M", vec![]));
        let b = File::new("b.proto", "pkg").with_enum(Enum::new("M", ["ZERO"]));
        let err = Registry::from_files([a, b]).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateType(name) if name == ".pkg.M"));
    }
}
