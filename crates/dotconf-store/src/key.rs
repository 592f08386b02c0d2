//! Splitting dotted keys into a namespace and a residual path.

use std::fmt;

/// A dotted key broken into the namespace it addresses and the path inside that namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyParts<'a> {
    /// First segment of the key.
    pub namespace: &'a str,
    /// Everything after the first `.`; empty when the key names a whole namespace.
    pub path: &'a str,
}

impl KeyParts<'_> {
    /// Whether the key addresses the whole namespace document.
    #[must_use]
    pub const fn is_whole_namespace(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for KeyParts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(self.namespace)
        } else {
            write!(f, "{}.{}", self.namespace, self.path)
        }
    }
}

/// Split `key` on its first `.` after trimming surrounding whitespace.
///
/// `app.twig.cache` yields namespace `app` and path `twig.cache`; `app`
/// yields namespace `app` and an empty path.
pub fn split_key(key: &str) -> KeyParts<'_> {
    let key = key.trim();
    match key.split_once('.') {
        Some((namespace, path)) => KeyParts { namespace, path },
        None => KeyParts {
            namespace: key,
            path: "",
        },
    }
}
