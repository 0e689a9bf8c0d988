use std::collections::BTreeSet;

/// MIME type served for every stored document
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Fixed set of permitted extensions plus the content type they are served as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    extensions: BTreeSet<String>,
    content_type: String,
}

impl Default for AllowList {
    fn default() -> Self {
        Self::pdf()
    }
}

impl AllowList {
    /// The reference policy: PDF documents only
    pub fn pdf() -> Self {
        Self::new(["pdf"], PDF_CONTENT_TYPE)
    }

    pub fn new<I, S>(extensions: I, content_type: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().to_ascii_lowercase())
                .collect(),
            content_type: content_type.into(),
        }
    }

    /// True iff `filename` has a `.` and its lowercased last suffix is allow-listed.
    pub fn is_allowed(&self, filename: &str) -> bool {
        self.extension_of(filename).is_some()
    }

    /// The allow-listed extension of `filename`, lowercased.
    pub fn extension_of(&self, filename: &str) -> Option<String> {
        let (_, suffix) = filename.rsplit_once('.')?;
        let suffix = suffix.to_lowercase();
        self.extensions.contains(&suffix).then_some(suffix)
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

/// Reduce a client-supplied name to a flat, ASCII-only file name.
///
/// Path separators become word breaks, whitespace runs collapse to `_`,
/// anything outside `[A-Za-z0-9._-]` is dropped and leading or trailing
/// `.`/`_` are trimmed. The result can never name a parent directory.
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}
