//! Package renaming for imported source files.
//!
//! A [`PackageTransformation`] matches on whole package segments:
//! `com.foo` matches `com.foo.Bar` but not `com.foobar.Baz`.
//! [`rewrite_source`] applies a rule list to the `package` and `import`
//! lines of one file and leaves every other byte alone.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static PACKAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*package\s+)([a-zA-Z0-9_.]+)(.*)$").expect("hardcoded regex must compile")
});

static STATIC_IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*import\s+static\s+)([a-zA-Z0-9_.]+)(.*)$")
        .expect("hardcoded regex must compile")
});

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*import\s+)([a-zA-Z0-9_.]+)(.*)$").expect("hardcoded regex must compile")
});

/// Replace a source package prefix with a target prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageTransformation {
    pub source: Vec<String>,
    pub target: Vec<String>,
}

impl PackageTransformation {
    pub fn new(source: Vec<String>, target: Vec<String>) -> Self {
        Self { source, target }
    }

    pub fn matches<S: AsRef<str>>(&self, package: &[S]) -> bool {
        package.len() >= self.source.len()
            && self
                .source
                .iter()
                .zip(package)
                .all(|(expected, actual)| expected == actual.as_ref())
    }

    /// `target + package[source.len()..]` on a match, `package` otherwise.
    pub fn transform<S: AsRef<str>>(&self, package: &[S]) -> Vec<String> {
        if !self.matches(package) {
            return package.iter().map(|s| s.as_ref().to_string()).collect();
        }
        self.target
            .iter()
            .cloned()
            .chain(
                package[self.source.len()..]
                    .iter()
                    .map(|s| s.as_ref().to_string()),
            )
            .collect()
    }

    pub fn transform_str(&self, package: &str) -> String {
        let segments: Vec<&str> = package.split('.').collect();
        self.transform(&segments).join(".")
    }
}

/// Apply the first rule that changes `package`.
pub fn apply_first(rules: &[PackageTransformation], package: &str) -> String {
    rules
        .iter()
        .map(|rule| rule.transform_str(package))
        .find(|transformed| transformed != package)
        .unwrap_or_else(|| package.to_string())
}

/// Rewrite one line if it is a `package` or `import` declaration.
pub fn rewrite_line(line: &str, rules: &[PackageTransformation]) -> String {
    let trimmed = line.trim();
    let pattern: &Regex = if trimmed.starts_with("package ") {
        &PACKAGE_LINE
    } else if trimmed.starts_with("import ") {
        if STATIC_IMPORT_LINE.is_match(line) {
            &STATIC_IMPORT_LINE
        } else {
            &IMPORT_LINE
        }
    } else {
        return line.to_string();
    };

    match pattern.captures(line) {
        Some(caps) => format!(
            "{}{}{}",
            &caps[1],
            apply_first(rules, &caps[2]),
            &caps[3]
        ),
        None => line.to_string(),
    }
}

/// Marker block inserted into every imported file.
pub fn attribution_block(source_project_path: &Path, module: &str) -> Vec<String> {
    vec![
        String::new(),
        "//".into(),
        format!("// This file was imported from: {}", source_project_path.display()),
        format!("// Module: {}", module),
        "//".into(),
        "// Before editing this file, consider whether updating the source project".into(),
        "// and re-importing would be a better approach.".into(),
        "//".into(),
    ]
}

/// Rewrite a whole source file.
///
/// Lines are split on `\n` only, so `\r\n` endings and a trailing newline
/// survive unchanged. The attribution block goes after the last import,
/// else after the first `package` line, else at the top.
pub fn rewrite_source(
    content: &str,
    rules: &[PackageTransformation],
    source_project_path: &Path,
    module: &str,
) -> String {
    let mut lines: Vec<String> = content
        .split('\n')
        .map(|line| rewrite_line(line, rules))
        .collect();

    let last_import = lines
        .iter()
        .rposition(|line| line.trim().starts_with("import "));
    let first_package = || {
        lines
            .iter()
            .position(|line| line.trim().starts_with("package "))
    };
    let insert_at = last_import.or_else(first_package).map_or(0, |i| i + 1);

    let line_end = if content.contains("\r\n") { "\r" } else { "" };
    let block = attribution_block(source_project_path, module)
        .into_iter()
        .map(|line| format!("{}{}", line, line_end));
    lines.splice(insert_at..insert_at, block);
    lines.join("\n")
}
