//! Skill matcher: presence-only lookup of vocabulary terms in resume text.
//!
//! Every `MatchKind` is compiled to one `Regex` when the matcher is built, so
//! per-request work is a single pass over the compiled rules.

use std::collections::HashSet;

use regex::Regex;

use crate::parser::vocabulary::{display_case, MatchKind, SkillTerm, SkillVocabulary};

/// Left edge for `StrictWord`: start of text, whitespace, an opening bracket or
/// quote, or a list separator. `-`, `_` and `&` never count.
const STRICT_LEFT: &str = r#"(?:^|[\s(\[,;:/"'])"#;
/// Right edge for `StrictWord`: end of text, whitespace, a closing bracket or
/// quote, a list separator, or a full stop that ends the sentence.
const STRICT_RIGHT: &str = r#"(?:$|[\s)\],;:/!?"']|\.(?:\s|$))"#;

struct CompiledTerm {
    display: String,
    pattern: Regex,
}

/// Vocabulary rules compiled once and shared across requests.
pub struct SkillMatcher {
    rules: Vec<CompiledTerm>,
}

impl SkillMatcher {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self, regex::Error> {
        let rules = vocabulary
            .terms()
            .iter()
            .map(|term| {
                Ok(CompiledTerm {
                    display: display_case(term.term),
                    pattern: Regex::new(&rule_pattern(term))?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns the display form of every term present in `text`, once each,
    /// in vocabulary order.
    pub fn match_skills(&self, text: &str) -> Vec<String> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return vec![];
        }

        let mut seen = HashSet::new();
        let mut matched = Vec::new();
        for rule in &self.rules {
            if rule.pattern.is_match(&normalized) && seen.insert(rule.display.to_lowercase()) {
                matched.push(rule.display.clone());
            }
        }
        matched
    }
}

/// Lower-cases and collapses every whitespace run (newlines included) to a
/// single space.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn rule_pattern(term: &SkillTerm) -> String {
    let literal = regex::escape(term.term);
    match term.kind {
        MatchKind::WholeWord => format!(r"\b{literal}\b"),
        MatchKind::SymbolAlias(alias) => format!(
            r"(?:^|\W)(?:{literal}|{alias})(?:\W|$)",
            alias = regex::escape(alias)
        ),
        MatchKind::LiteralExact => literal,
        MatchKind::StrictWord => format!("{STRICT_LEFT}{literal}{STRICT_RIGHT}"),
    }
}
