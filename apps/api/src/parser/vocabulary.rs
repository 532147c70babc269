//! Static skill vocabulary.
//!
//! Each term carries the rule it is matched with. Terms are stored in
//! lower case; display casing happens after a match.

use MatchKind::{LiteralExact, StrictWord, SymbolAlias, WholeWord};
use SkillCategory::{Data, Database, Framework, Language, Practice, Soft, Tooling};

/// How a vocabulary term is located in normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Case-insensitive whole-word match of the escaped literal.
    WholeWord,
    /// Symbol term (`c++`, `c#`) that also matches its alphabetic alias.
    SymbolAlias(&'static str),
    /// Symbol-prefixed term (`.net`); the exact literal sequence, anywhere.
    LiteralExact,
    /// Short common word; must stand alone, never inside a compound token.
    StrictWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Language,
    Framework,
    Database,
    Tooling,
    Data,
    Practice,
    Soft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTerm {
    pub term: &'static str,
    pub kind: MatchKind,
    pub category: SkillCategory,
}

/// Ordered, immutable list of known skill terms.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<SkillTerm>,
}

const BUILTIN_TERMS: &[(&str, MatchKind, SkillCategory)] = &[
    // Languages
    ("javascript", WholeWord, Language),
    ("typescript", WholeWord, Language),
    ("python", WholeWord, Language),
    ("java", WholeWord, Language),
    ("c++", SymbolAlias("cpp"), Language),
    ("c#", SymbolAlias("csharp"), Language),
    ("ruby", WholeWord, Language),
    ("php", WholeWord, Language),
    ("swift", StrictWord, Language),
    ("kotlin", WholeWord, Language),
    ("go", StrictWord, Language),
    ("golang", WholeWord, Language),
    ("rust", WholeWord, Language),
    ("scala", WholeWord, Language),
    ("r", StrictWord, Language),
    ("perl", WholeWord, Language),
    ("dart", WholeWord, Language),
    ("elixir", WholeWord, Language),
    ("haskell", WholeWord, Language),
    ("matlab", WholeWord, Language),
    ("sql", WholeWord, Language),
    ("html", WholeWord, Language),
    ("css", WholeWord, Language),
    ("bash", WholeWord, Language),
    // Frameworks and libraries
    ("react", WholeWord, Framework),
    ("react native", WholeWord, Framework),
    ("angular", WholeWord, Framework),
    ("vue", WholeWord, Framework),
    ("svelte", WholeWord, Framework),
    ("next.js", WholeWord, Framework),
    ("node.js", WholeWord, Framework),
    ("node", WholeWord, Framework),
    ("express", WholeWord, Framework),
    ("django", WholeWord, Framework),
    ("flask", WholeWord, Framework),
    ("fastapi", WholeWord, Framework),
    ("spring", WholeWord, Framework),
    ("spring boot", WholeWord, Framework),
    ("rails", WholeWord, Framework),
    ("laravel", WholeWord, Framework),
    (".net", LiteralExact, Framework),
    ("jquery", WholeWord, Framework),
    ("redux", WholeWord, Framework),
    ("tailwind", WholeWord, Framework),
    ("bootstrap", WholeWord, Framework),
    ("graphql", WholeWord, Framework),
    // Databases
    ("postgresql", WholeWord, Database),
    ("mysql", WholeWord, Database),
    ("mongodb", WholeWord, Database),
    ("redis", WholeWord, Database),
    ("sqlite", WholeWord, Database),
    ("oracle", WholeWord, Database),
    ("elasticsearch", WholeWord, Database),
    ("dynamodb", WholeWord, Database),
    ("cassandra", WholeWord, Database),
    // Cloud, devops and tools
    ("aws", WholeWord, Tooling),
    ("azure", WholeWord, Tooling),
    ("gcp", WholeWord, Tooling),
    ("docker", WholeWord, Tooling),
    ("kubernetes", WholeWord, Tooling),
    ("terraform", WholeWord, Tooling),
    ("jenkins", WholeWord, Tooling),
    ("git", WholeWord, Tooling),
    ("github", WholeWord, Tooling),
    ("gitlab", WholeWord, Tooling),
    ("linux", WholeWord, Tooling),
    ("nginx", WholeWord, Tooling),
    ("kafka", WholeWord, Tooling),
    ("rabbitmq", WholeWord, Tooling),
    ("webpack", WholeWord, Tooling),
    ("jira", WholeWord, Tooling),
    ("figma", WholeWord, Tooling),
    ("ci/cd", WholeWord, Tooling),
    // Data and ML
    ("machine learning", WholeWord, Data),
    ("deep learning", WholeWord, Data),
    ("data analysis", WholeWord, Data),
    ("tensorflow", WholeWord, Data),
    ("pytorch", WholeWord, Data),
    ("pandas", WholeWord, Data),
    ("numpy", WholeWord, Data),
    ("scikit-learn", WholeWord, Data),
    ("tableau", WholeWord, Data),
    ("excel", WholeWord, Data),
    ("spark", WholeWord, Data),
    ("hadoop", WholeWord, Data),
    // Practices
    ("rest", StrictWord, Practice),
    ("api", WholeWord, Practice),
    ("microservices", WholeWord, Practice),
    ("agile", WholeWord, Practice),
    ("scrum", WholeWord, Practice),
    ("devops", WholeWord, Practice),
    ("tdd", WholeWord, Practice),
    ("unit testing", WholeWord, Practice),
    // Soft skills
    ("leadership", WholeWord, Soft),
    ("communication", WholeWord, Soft),
    ("teamwork", WholeWord, Soft),
    ("problem solving", WholeWord, Soft),
    ("project management", WholeWord, Soft),
    ("mentoring", WholeWord, Soft),
];

impl SkillVocabulary {
    /// The vocabulary the service is started with.
    pub fn builtin() -> Self {
        Self::from_terms(
            BUILTIN_TERMS
                .iter()
                .map(|&(term, kind, category)| SkillTerm {
                    term,
                    kind,
                    category,
                })
                .collect(),
        )
    }

    pub fn from_terms(terms: Vec<SkillTerm>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[SkillTerm] {
        &self.terms
    }

    /// Number of terms per category, in first-seen category order.
    pub fn category_counts(&self) -> Vec<(SkillCategory, usize)> {
        let mut counts: Vec<(SkillCategory, usize)> = Vec::new();
        for term in &self.terms {
            match counts.iter_mut().find(|(c, _)| *c == term.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((term.category, 1)),
            }
        }
        counts
    }
}

/// Capitalizes the first letter of each whitespace-separated word.
pub fn display_case(term: &str) -> String {
    term.split_whitespace()
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().to_string() + c.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
