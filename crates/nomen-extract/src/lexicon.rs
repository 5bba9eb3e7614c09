//! Celestial-body and feature-type vocabulary, control-character cleanup.

use std::collections::HashMap;

use nomen_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical term → every surface form counted as that term.
static SYNONYMS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let entries: &[(&str, &[&str])] = &[
        // Bodies
        ("moon", &["moon", "lunar", "selenographic"]),
        ("mars", &["mars", "martian", "areographic"]),
        ("mercury", &["mercury", "mercurian", "hermean"]),
        ("venus", &["venus", "venusian", "cytherean"]),
        ("earth", &["earth", "terrestrial"]),
        ("europa", &["europa", "europan"]),
        ("ganymede", &["ganymede", "ganymedean"]),
        ("callisto", &["callisto", "callistoan"]),
        ("titan", &["titan", "titanian"]),
        ("enceladus", &["enceladus", "enceladean"]),
        ("pluto", &["pluto", "plutonian"]),
        ("ceres", &["ceres", "cererian"]),
        ("vesta", &["vesta", "vestan"]),
        ("phobos", &["phobos", "phobosian"]),
        // Feature types
        ("crater", &["crater", "craters", "cratered"]),
        ("mons", &["mons", "montes", "mountain", "mountains"]),
        ("vallis", &["vallis", "valles", "valley", "valleys"]),
        ("mare", &["mare", "maria"]),
        ("planitia", &["planitia", "planitiae", "plain", "plains"]),
        ("patera", &["patera", "paterae"]),
        ("chasma", &["chasma", "chasmata"]),
        ("dorsum", &["dorsum", "dorsa", "ridge", "ridges"]),
        ("rupes", &["rupes", "scarp", "scarps"]),
        ("terra", &["terra", "terrae"]),
        ("fossa", &["fossa", "fossae"]),
    ];
    entries.iter().copied().collect()
});

/// Every surface form of `term`, lowercased. Unknown terms expand to themselves.
pub fn synonyms(term: &str) -> Vec<String> {
    let key = term.trim().to_lowercase();
    if let Some(forms) = SYNONYMS.get(key.as_str()) {
        return forms.iter().map(|s| s.to_string()).collect();
    }
    if let Some(forms) = SYNONYMS.values().find(|forms| forms.contains(&key.as_str())) {
        return forms.iter().map(|s| s.to_string()).collect();
    }
    vec![key]
}

/// Case-insensitive, whole-word pattern matching any synonym of `term`.
pub fn synonym_pattern(term: &str) -> Result<Regex> {
    whole_word_pattern(&synonyms(term), true)
}

/// Whole-word alternation over `forms`; internal whitespace matches any whitespace run.
pub fn whole_word_pattern(forms: &[String], case_insensitive: bool) -> Result<Regex> {
    let alternation = forms
        .iter()
        .map(|f| flexible_whitespace(f))
        .collect::<Vec<_>>()
        .join("|");
    let flags = if case_insensitive { "(?i)" } else { "" };
    let pattern = format!(r"{}\b(?:{})\b", flags, alternation);
    Regex::new(&pattern).map_err(|e| Error::Pattern(e.to_string()))
}

/// Escape `literal` for a regex, letting each run of spaces match `\s+`.
pub fn flexible_whitespace(literal: &str) -> String {
    literal
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Replace control characters: whitespace-class controls become a single
/// space, every other control becomes its visible control-picture glyph.
pub fn normalize_control_chars(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' => ' ',
            '\u{00}'..='\u{1F}' => char::from_u32(0x2400 + c as u32).unwrap_or(' '),
            '\u{7F}' => '\u{2421}',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}
