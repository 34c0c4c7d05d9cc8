//! Rewrite array-destructured callback parameters to ES5.
//!
//! `.map(function([a, b]) {` becomes
//! `.map(function(item) { var a = item[0]; var b = item[1];`.

use crate::{Transformed, Transformer};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    static ref FILTER_SINGLE: Regex =
        Regex::new(r"\.filter\(function\(\[(\w+)\]\)\s*\{").unwrap();
    static ref MAP_IDENTITY: Regex = Regex::new(
        r"\.map\(function\(\[(\w+),\s*(\w+)\]\)\s*\{\s*return\s*\[(\w+),\s*(\w+)\];\s*\}\)"
    )
    .unwrap();
    static ref MAP_PAIR: Regex =
        Regex::new(r"\.map\(function\(\[(\w+),\s*(\w+)\]\)\s*\{").unwrap();
    static ref FOR_EACH_PAIR: Regex =
        Regex::new(r"\.forEach\(function\(\[(\w+),\s*(\w+)\]\)\s*\{").unwrap();
}

/// Downlevels destructured `filter`/`map`/`forEach` callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DestructuringDownlevel;

impl Transformer for DestructuringDownlevel {
    fn name(&self) -> &'static str {
        "destructuring-downlevel"
    }

    fn transform(&self, text: &str) -> Transformed {
        let mut rewrites = 0;

        let text = replace_counted(&FILTER_SINGLE, text, &mut rewrites, |caps| {
            Some(format!(".filter(function(item) {{ var {} = item[0];", &caps[1]))
        });

        // `.map(function([a, b]) { return [a, b]; })` collapses to an index copy.
        // Only exact identity maps qualify; anything else falls through to MAP_PAIR.
        let text = replace_counted(&MAP_IDENTITY, &text, &mut rewrites, |caps| {
            (caps[1] == caps[3] && caps[2] == caps[4])
                .then(|| ".map(function(item) { return [item[0], item[1]]; })".to_string())
        });

        let text = replace_counted(&MAP_PAIR, &text, &mut rewrites, |caps| {
            Some(format!(
                ".map(function(item) {{ var {} = item[0]; var {} = item[1];",
                &caps[1], &caps[2]
            ))
        });

        let text = replace_counted(&FOR_EACH_PAIR, &text, &mut rewrites, |caps| {
            Some(format!(
                ".forEach(function(entry) {{ var {} = entry[0]; var {} = entry[1];",
                &caps[1], &caps[2]
            ))
        });

        Transformed { text, rewrites }
    }
}

/// Replace every match for which `rewrite` returns `Some`, counting rewrites.
/// Matches where it returns `None` are left as they are.
fn replace_counted<F>(pattern: &Regex, text: &str, rewrites: &mut usize, rewrite: F) -> String
where
    F: Fn(&Captures<'_>) -> Option<String>,
{
    let replaced: Cow<'_, str> = pattern.replace_all(text, |caps: &Captures<'_>| match rewrite(caps) {
        Some(replacement) => {
            *rewrites += 1;
            replacement
        }
        None => caps[0].to_string(),
    });
    replaced.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn downlevel(text: &str) -> Transformed {
        DestructuringDownlevel.transform(text)
    }

    #[test]
    fn test_filter_single() {
        let out = downlevel("rows.filter(function([id]) { return id; })");
        assert_eq!(out.text, "rows.filter(function(item) { var id = item[0]; return id; })");
        assert_eq!(out.rewrites, 1);
    }

    #[test]
    fn test_map_identity() {
        let out = downlevel("pairs.map(function([k, v]) { return [k, v]; })");
        assert_eq!(out.text, "pairs.map(function(item) { return [item[0], item[1]]; })");
        assert_eq!(out.rewrites, 1);
    }

    #[test]
    fn test_map_non_identity_uses_pair_rewrite() {
        let out = downlevel("pairs.map(function([k, v]) { return [v, k]; })");
        assert_eq!(
            out.text,
            "pairs.map(function(item) { var k = item[0]; var v = item[1]; return [v, k]; })"
        );
        assert_eq!(out.rewrites, 1);
    }

    #[test]
    fn test_for_each_pair() {
        let out = downlevel("Object.entries(o).forEach(function([key, value]) {\n  log(key);\n});");
        assert_eq!(
            out.text,
            "Object.entries(o).forEach(function(entry) { var key = entry[0]; var value = entry[1];\n  log(key);\n});"
        );
    }

    #[test]
    fn test_counts_every_rewrite() {
        let src = "a.filter(function([x]) {});\nb.forEach(function([k, v]) {});\nc.forEach(function([k, v]) {});";
        assert_eq!(downlevel(src).rewrites, 3);
    }

    #[test]
    fn test_plain_callbacks_untouched() {
        let src = "rows.map(function(row) { return row[0]; });";
        let out = downlevel(src);
        assert_eq!(out.text, src);
        assert_eq!(out.rewrites, 0);
    }
}
