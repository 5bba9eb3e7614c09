//! Adjacency heuristic as a declarative rule table.
//!
//! Each rule pairs a side of the occurrence with a class of leading
//! character. A rule fires when the neighbouring token on that side starts
//! with a character of that class and the token is not in the exception
//! set (`The`, `For`, and the capitalized target / feature-type names).

use std::collections::HashSet;

use nomen_core::DisambiguationContext;
use serde::Serialize;

/// Which neighbour of the occurrence a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Preceding,
    Following,
}

/// Class of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Uppercase,
    Digit,
    Hyphen,
    Bracket,
    Apostrophe,
}

impl TokenClass {
    fn matches(self, c: char) -> bool {
        match self {
            Self::Uppercase => c.is_uppercase(),
            Self::Digit => c.is_numeric(),
            Self::Hyphen => matches!(c, '-' | '\u{2010}' | '\u{2013}' | '\u{2014}'),
            Self::Bracket => matches!(c, '(' | ')' | '[' | ']' | '{' | '}'),
            Self::Apostrophe => matches!(c, '\'' | '\u{2018}' | '\u{2019}'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdjacencyRule {
    pub side: Side,
    pub class: TokenClass,
}

const fn rule(side: Side, class: TokenClass) -> AdjacencyRule {
    AdjacencyRule { side, class }
}

/// Exclusion rules, checked in order.
pub const RULES: &[AdjacencyRule] = &[
    rule(Side::Preceding, TokenClass::Uppercase),
    rule(Side::Preceding, TokenClass::Digit),
    rule(Side::Preceding, TokenClass::Hyphen),
    rule(Side::Preceding, TokenClass::Bracket),
    rule(Side::Following, TokenClass::Uppercase),
    rule(Side::Following, TokenClass::Digit),
    rule(Side::Following, TokenClass::Hyphen),
    rule(Side::Following, TokenClass::Bracket),
    rule(Side::Following, TokenClass::Apostrophe),
];

/// Outcome of the heuristic for one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdjacencyVerdict {
    pub include: bool,
    /// First rule that fired, if any.
    pub fired: Option<AdjacencyRule>,
}

/// Rule table bound to one job's exception set.
#[derive(Debug, Clone)]
pub struct AdjacencyRules {
    exceptions: HashSet<String>,
}

impl AdjacencyRules {
    pub fn for_context(ctx: &DisambiguationContext) -> Self {
        let mut exceptions: HashSet<String> =
            ["The", "For"].iter().map(|s| s.to_string()).collect();
        exceptions.extend(ctx.capitalized_context_names());
        Self { exceptions }
    }

    fn is_exception(&self, token: &str) -> bool {
        let bare = token.trim_end_matches([',', ';', ':', '.']);
        self.exceptions.contains(token) || self.exceptions.contains(bare)
    }

    /// The first rule firing for `token` on `side`.
    pub fn check(&self, side: Side, token: &str) -> Option<AdjacencyRule> {
        let first = token.chars().next()?;
        if self.is_exception(token) {
            return None;
        }
        RULES
            .iter()
            .find(|r| r.side == side && r.class.matches(first))
            .copied()
    }

    /// Include only when neither neighbour fires a rule.
    pub fn evaluate(&self, preceding: &str, following: &str) -> AdjacencyVerdict {
        let fired = self
            .check(Side::Preceding, preceding)
            .or_else(|| self.check(Side::Following, following));
        AdjacencyVerdict {
            include: fired.is_none(),
            fired,
        }
    }
}
