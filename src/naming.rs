//! Filename sanitization.
//!
//! Output files follow an identifier-like naming convention: the stem starts
//! with a letter or underscore, carries a mandatory prefix, and contains no
//! characters from a disallowed set. A stem goes through three steps, always
//! in this order:
//!
//! 1. **Starting character**: a first character that is neither a letter nor
//!    the replacement is replaced (`9lives` → `_lives`).
//! 2. **Prefix**: the prefix is prepended unless already present, joined with
//!    the replacement unless the stem already starts with it
//!    (`car` → `spr_car`, `_car` → `spr_car`).
//! 3. **Special characters**: disallowed characters become the replacement and
//!    trailing replacements are stripped (`spr_a(1)` → `spr_a_1`).
//!
//! ## Idempotence
//!
//! `sanitize(sanitize(x)) == sanitize(x)` for every stem, provided the
//! [`NamingRules`] pass [`NamingRules::validate`]. Stripping *every* trailing
//! replacement (not just one) is what keeps `a__` stable: stripping only one
//! would leave `spr_a_`, which sanitizes again to `spr_a`.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Parameters of the sanitizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRules {
    /// Required leading prefix (e.g. `spr`).
    pub prefix: String,
    /// Characters replaced by [`replacement`](Self::replacement).
    pub disallowed: Vec<char>,
    /// Separator and replacement character.
    pub replacement: char,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            prefix: "spr".to_string(),
            disallowed: vec!['(', ')'],
            replacement: '_',
        }
    }
}

impl NamingRules {
    /// Reject rule sets under which sanitizing would not be idempotent.
    pub fn validate(&self) -> Result<()> {
        if self.disallowed.contains(&self.replacement) {
            return Err(Error::invalid_argument(format!(
                "naming.replacement '{}' is itself disallowed",
                self.replacement
            )));
        }
        if let Some(first) = self.prefix.chars().next()
            && !(first.is_alphabetic() || first == self.replacement)
        {
            return Err(Error::invalid_argument(format!(
                "naming.prefix '{}' must start with a letter or '{}'",
                self.prefix, self.replacement
            )));
        }
        if self.prefix.ends_with(self.replacement) {
            return Err(Error::invalid_argument(format!(
                "naming.prefix '{}' must not end with '{}'",
                self.prefix, self.replacement
            )));
        }
        if let Some(c) = self.prefix.chars().find(|c| self.disallowed.contains(c)) {
            return Err(Error::invalid_argument(format!(
                "naming.prefix '{}' contains disallowed character '{c}'",
                self.prefix
            )));
        }
        Ok(())
    }

    /// Run the three sanitization steps on a file stem.
    ///
    /// An empty stem yields the bare prefix.
    pub fn sanitize(&self, stem: &str) -> String {
        let name = self.fix_starting_character(stem);
        let name = self.enforce_prefix(name);
        self.replace_special_characters(name)
    }

    fn fix_starting_character(&self, text: &str) -> String {
        let mut chars = text.chars();
        match chars.next() {
            Some(first) if !(first.is_alphabetic() || first == self.replacement) => {
                let mut fixed = String::with_capacity(text.len());
                fixed.push(self.replacement);
                fixed.push_str(chars.as_str());
                fixed
            }
            _ => text.to_string(),
        }
    }

    fn enforce_prefix(&self, text: String) -> String {
        if text.starts_with(&self.prefix) {
            text
        } else if text.starts_with(self.replacement) {
            format!("{}{}", self.prefix, text)
        } else {
            format!("{}{}{}", self.prefix, self.replacement, text)
        }
    }

    fn replace_special_characters(&self, text: String) -> String {
        let replaced: String = text
            .chars()
            .map(|c| {
                if self.disallowed.contains(&c) {
                    self.replacement
                } else {
                    c
                }
            })
            .collect();
        replaced.trim_end_matches(self.replacement).to_string()
    }
}

/// Sanitize a stem with the default rules (`spr` prefix, parentheses disallowed).
pub fn sanitize(stem: &str) -> String {
    NamingRules::default().sanitize(stem)
}

/// Join a stem and an optional extension into a file name.
pub fn target_file_name(stem: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) if !ext.is_empty() => format!("{stem}.{ext}"),
        _ => stem.to_string(),
    }
}

/// Pick a free path for `stem.extension` inside `dir`.
///
/// If the plain name is taken by some file other than `source`, `_2`, `_3`,
/// ... are appended to the stem (joined with `separator`) until a free name is
/// found. A path equal to `source` counts as free, so an already-sanitized
/// file maps onto itself.
pub fn unique_target(
    dir: &Path,
    stem: &str,
    extension: Option<&str>,
    separator: char,
    source: &Path,
) -> PathBuf {
    let candidate = dir.join(target_file_name(stem, extension));
    if candidate == source || !candidate.exists() {
        return candidate;
    }
    (2u32..)
        .map(|n| dir.join(target_file_name(&format!("{stem}{separator}{n}"), extension)))
        .find(|p| p == source || !p.exists())
        .unwrap_or(candidate)
}
