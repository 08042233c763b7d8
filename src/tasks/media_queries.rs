// src/tasks/media_queries.rs

//! Grouping of `@media` rules with identical queries.

use anyhow::{Result, anyhow};
use lightningcss::rules::CssRule;
use lightningcss::rules::media::MediaRule;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::traits::ToCss;

use crate::tasks::styles::browser_targets;

/// Move every top-level `@media` block after the plain rules, merging blocks
/// whose queries serialize identically.
///
/// Groups keep the order in which their query first appeared. Returns the
/// number of groups.
pub fn group_media_queries(sheet: &mut StyleSheet<'_>) -> Result<usize> {
    let rules = std::mem::take(&mut sheet.rules.0);

    let mut plain = Vec::with_capacity(rules.len());
    let mut groups: Vec<(String, MediaRule<'_>)> = Vec::new();

    for rule in rules {
        match rule {
            CssRule::Media(media) => {
                let key = media
                    .query
                    .to_css_string(PrinterOptions::default())
                    .map_err(|e| anyhow!("printing media query: {e}"))?;
                match groups.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, group)) => group.rules.0.extend(media.rules.0),
                    None => groups.push((key, media)),
                }
            }
            other => plain.push(other),
        }
    }

    let count = groups.len();
    plain.extend(groups.into_iter().map(|(_, media)| CssRule::Media(media)));
    sheet.rules.0 = plain;
    Ok(count)
}

/// Parse `css`, group its media queries and print it unminified.
pub fn group_css(css: &str) -> Result<String> {
    let mut sheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| anyhow!("parsing css: {e}"))?;
    group_media_queries(&mut sheet)?;
    let out = sheet
        .to_css(PrinterOptions {
            targets: browser_targets(),
            ..PrinterOptions::default()
        })
        .map_err(|e| anyhow!("printing css: {e}"))?;
    Ok(out.code)
}
