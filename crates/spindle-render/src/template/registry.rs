//! Template registry for inline, embedded and directory templates.
//!
//! [`TemplateRegistry`] answers two questions for the view provider: does a
//! template with this name exist, and what is its source.
//!
//! # Template Resolution
//!
//! 1. Inline templates (added via [`TemplateRegistry::add_inline`] or
//!    [`TemplateRegistry::add_embedded`]) have highest priority
//! 2. Directory templates, looked up by relative path
//! 3. Names can be given with or without extension: both `"counter"` and
//!    `"counter.jinja"` resolve
//!
//! # Supported Extensions
//!
//! | Priority | Extension |
//! |----------|-----------|
//! | 1 (highest) | `.jinja` |
//! | 2 | `.jinja2` |
//! | 3 | `.j2` |
//! | 4 | `.html` |
//! | 5 (lowest) | `.txt` |
//!
//! When one directory holds `counter.jinja` and `counter.txt`, the extensionless
//! name resolves to `counter.jinja`. The same name coming from two different
//! directories is a [`RegistryError::Collision`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Recognized template file extensions in priority order.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2", ".html", ".txt"];

/// A template file discovered during directory walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Resolution name without extension (e.g. `"user/profile"`)
    pub name: String,
    /// Resolution name with extension (e.g. `"user/profile.jinja"`)
    pub name_with_ext: String,
    /// Absolute path to the template file
    pub absolute_path: PathBuf,
    /// The template directory root this file belongs to
    pub source_dir: PathBuf,
}

impl TemplateFile {
    /// Creates a new template file descriptor.
    pub fn new(
        name: impl Into<String>,
        name_with_ext: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            name_with_ext: name_with_ext.into(),
            absolute_path: absolute_path.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Returns the extension priority (lower is higher priority).
    ///
    /// Returns `usize::MAX` if the extension is not recognized.
    pub fn extension_priority(&self) -> usize {
        extension_priority(&self.name_with_ext)
    }
}

fn extension_priority(name: &str) -> usize {
    TEMPLATE_EXTENSIONS
        .iter()
        .position(|ext| name.ends_with(ext))
        .unwrap_or(usize::MAX)
}

fn strip_extension(name: &str) -> &str {
    TEMPLATE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name)
}

/// How a template's content is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTemplate {
    /// Content held in memory (inline or embedded templates).
    Inline(String),
    /// Content read from disk on each lookup, so edits show up without a restart.
    File(PathBuf),
}

/// Error type for template registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two template directories contain files that resolve to the same name.
    Collision {
        /// The template name that has conflicting sources
        name: String,
        /// Path to the existing template
        existing_path: PathBuf,
        /// Path to the conflicting template
        conflicting_path: PathBuf,
    },

    /// Template not found in registry.
    NotFound {
        /// The name that was requested
        name: String,
    },

    /// Failed to read a template file or directory.
    ReadError {
        /// Path that failed to read
        path: PathBuf,
        /// Error message
        message: String,
    },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Collision {
                name,
                existing_path,
                conflicting_path,
            } => write!(
                f,
                "Template collision detected for \"{}\":\n  - {}\n  - {}",
                name,
                existing_path.display(),
                conflicting_path.display()
            ),
            RegistryError::NotFound { name } => write!(f, "Template not found: \"{}\"", name),
            RegistryError::ReadError { path, message } => {
                write!(f, "Failed to read \"{}\": {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry for template resolution from multiple sources.
///
/// # Example
///
/// ```rust
/// use spindle_render::template::TemplateRegistry;
///
/// let mut registry = TemplateRegistry::new();
/// registry.add_inline("counter", "Count: {{ count }}");
///
/// assert!(registry.contains("counter"));
/// assert_eq!(registry.get_content("counter").unwrap(), "Count: {{ count }}");
/// ```
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    inline: HashMap<String, String>,
    /// name (with and without extension) → file on disk
    files: HashMap<String, PathBuf>,
    /// extensionless name → (path, source dir), for collision detection
    sources: HashMap<String, (PathBuf, PathBuf)>,
}

impl TemplateRegistry {
    /// Creates an empty template registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inline template. Inline templates shadow directory templates.
    pub fn add_inline(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.inline.insert(name.into(), content.into());
    }

    /// Adds embedded `(name_with_ext, content)` entries.
    ///
    /// Each entry is reachable by its full name and by its extensionless name;
    /// for the latter the highest-priority extension wins.
    pub fn add_embedded(&mut self, entries: &[(&str, &str)]) {
        let mut sorted: Vec<_> = entries.to_vec();
        sorted.sort_by_key(|(name, _)| extension_priority(name));

        for (name_with_ext, content) in sorted {
            let base = strip_extension(name_with_ext);
            self.inline
                .entry(base.to_string())
                .or_insert_with(|| content.to_string());
            self.inline
                .insert(name_with_ext.to_string(), content.to_string());
        }
    }

    /// Walks a directory and registers every template file in it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ReadError`] if the directory cannot be walked and
    /// [`RegistryError::Collision`] if a name is already provided by another
    /// directory.
    pub fn add_template_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RegistryError> {
        let root = path.as_ref();
        let files = walk_template_dir(root).map_err(|e| RegistryError::ReadError {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        self.add_from_files(files)
    }

    /// Registers template files, typically produced by [`walk_template_dir`].
    pub fn add_from_files(&mut self, files: Vec<TemplateFile>) -> Result<(), RegistryError> {
        let mut sorted_files = files;
        sorted_files.sort_by_key(|f| f.extension_priority());

        for file in sorted_files {
            if let Some((existing_path, existing_dir)) = self.sources.get(&file.name) {
                if existing_dir != &file.source_dir {
                    return Err(RegistryError::Collision {
                        name: file.name.clone(),
                        existing_path: existing_path.clone(),
                        conflicting_path: file.absolute_path.clone(),
                    });
                }
                // Same directory, lower-priority extension: reachable by full name only.
                self.files
                    .insert(file.name_with_ext.clone(), file.absolute_path);
                continue;
            }

            self.sources.insert(
                file.name.clone(),
                (file.absolute_path.clone(), file.source_dir.clone()),
            );
            self.files
                .insert(file.name.clone(), file.absolute_path.clone());
            self.files.insert(file.name_with_ext, file.absolute_path);
        }

        Ok(())
    }

    /// Returns true if a template with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.inline.contains_key(name) || self.files.contains_key(name)
    }

    /// Looks up a template by name.
    pub fn get(&self, name: &str) -> Result<ResolvedTemplate, RegistryError> {
        if let Some(content) = self.inline.get(name) {
            return Ok(ResolvedTemplate::Inline(content.clone()));
        }

        if let Some(path) = self.files.get(name) {
            return Ok(ResolvedTemplate::File(path.clone()));
        }

        Err(RegistryError::NotFound {
            name: name.to_string(),
        })
    }

    /// Gets the content of a template, reading from disk if necessary.
    pub fn get_content(&self, name: &str) -> Result<String, RegistryError> {
        match self.get(name)? {
            ResolvedTemplate::Inline(content) => Ok(content),
            ResolvedTemplate::File(path) => {
                fs::read_to_string(&path).map_err(|e| RegistryError::ReadError {
                    path,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Returns the number of registered names.
    ///
    /// Directory templates count twice: once with and once without extension.
    pub fn len(&self) -> usize {
        self.inline.len() + self.files.len()
    }

    /// Returns true if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.files.is_empty()
    }

    /// Returns an iterator over all registered template names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inline
            .keys()
            .chain(self.files.keys())
            .map(|s| s.as_str())
    }
}

/// Walks a template directory recursively and collects template files.
///
/// Names use `/` as separator regardless of platform.
pub fn walk_template_dir(root: impl AsRef<Path>) -> Result<Vec<TemplateFile>, std::io::Error> {
    let root = root.as_ref();
    let mut out = Vec::new();
    walk_into(root, root, &mut out)?;
    Ok(out)
}

fn walk_into(root: &Path, dir: &Path, out: &mut Vec<TemplateFile>) -> Result<(), std::io::Error> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_into(root, &path, out)?;
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let name_with_ext = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if extension_priority(&name_with_ext) == usize::MAX {
            continue;
        }

        let name = strip_extension(&name_with_ext).to_string();
        out.push(TemplateFile::new(name, name_with_ext, &path, root));
    }
    Ok(())
}
