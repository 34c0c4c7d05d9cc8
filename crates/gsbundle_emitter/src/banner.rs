//! Artifact header and unit boundary banners.

use gsbundle_options::BuildType;

/// Width of the `=` rule in unit boundary banners.
pub const RULE_WIDTH: usize = 80;

/// Build metadata stamped into the artifact header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub title: String,
    pub version: String,
    /// RFC 3339 UTC timestamp.
    pub build_date: String,
    pub build_type: BuildType,
    /// Number of modules in the build set, found or not.
    pub module_count: usize,
    pub include_tests: bool,
}

/// Render the artifact header comment.
pub fn render_header(info: &BuildInfo) -> String {
    let rule = "=".repeat(76);
    format!(
        "/**
 * {rule}
 * {title} - CONSOLIDATED BUILD
 * {rule}
 *
 * This file is AUTO-GENERATED by gsbundle
 * DO NOT EDIT THIS FILE DIRECTLY
 *
 * To make changes:
 * 1. Edit individual module files (e.g., Constants.gs, Code.gs)
 * 2. Run: gsbundle
 * 3. This file will be regenerated automatically
 *
 * Build Info:
 * - Version: {version}
 * - Build Date: {date}
 * - Build Type: {build_type}
 * - Modules: {count} files
 * - Tests Included: {tests}
 *
 * {rule}
 */

",
        rule = rule,
        title = info.title,
        version = info.version,
        date = info.build_date,
        build_type = info.build_type,
        count = info.module_count,
        tests = if info.include_tests { "Yes" } else { "No" },
    )
}

/// Render one unit: boundary banner, verbatim text, blank-line separator.
pub fn render_unit(name: &str, text: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::with_capacity(text.len() + 2 * RULE_WIDTH + 2 * name.len() + 32);
    out.push_str(&format!("\n// {}\n", rule));
    out.push_str(&format!("// MODULE: {}\n", name));
    out.push_str(&format!("// Source: {}\n", name));
    out.push_str(&format!("// {}\n\n", rule));
    out.push_str(text);
    out.push_str("\n\n");
    out
}
