//! Fixed vocabularies for CTA text analysis and word-boundary matching.
//!
//! Terms match only when they start at a word boundary: "get" matches
//! "Get Started" but not "widget", while "start" still matches "started".
//! Multi-word phrases match literally across their internal spaces.

/// Time-pressure and scarcity terms with the highest conversion impact.
pub const HIGH_URGENCY_WORDS: &[&str] = &[
    "now",
    "today",
    "immediately",
    "urgent",
    "limited time",
    "expires",
    "hurry",
    "act fast",
    "don't wait",
    "last chance",
    "exclusive",
    "only",
    "few left",
    "while supplies last",
    "today only",
];

/// Softer urgency terms.
pub const MEDIUM_URGENCY_WORDS: &[&str] = &[
    "free",
    "instant",
    "quick",
    "fast",
    "easy",
    "simple",
    "get started",
];

/// Verbs and phrases that name a concrete user action.
pub const ACTION_WORDS: &[&str] = &[
    "buy",
    "purchase",
    "order",
    "get",
    "download",
    "sign up",
    "register",
    "subscribe",
    "join",
    "start",
    "begin",
    "learn more",
    "discover",
    "explore",
    "try",
    "test",
    "demo",
    "contact",
    "call",
    "email",
    "click",
    "submit",
    "send",
    "apply",
    "book",
    "reserve",
    "claim",
];

/// Primary verbs with the strongest conversion signal.
pub const PRIMARY_ACTION_WORDS: &[&str] = &[
    "buy",
    "purchase",
    "order",
    "get",
    "download",
    "sign up",
    "register",
    "subscribe",
    "join",
    "start",
    "begin",
    "try",
    "test",
    "demo",
    "contact",
];

/// Softer, exploratory verbs.
pub const SECONDARY_ACTION_WORDS: &[&str] = &[
    "learn more",
    "discover",
    "explore",
    "read more",
    "view",
    "see",
    "find out",
];

/// Verbs most associated with completed conversions.
pub const HIGH_CONVERT_WORDS: &[&str] = &[
    "buy",
    "purchase",
    "order",
    "get",
    "download",
    "sign up",
    "register",
];

/// Value-proposition terms.
pub const BENEFIT_WORDS: &[&str] = &[
    "free", "save", "get", "win", "earn", "discount", "off", "deal", "offer",
];

/// Short urgency subset used by conversion scoring.
pub const CONVERSION_URGENCY_WORDS: &[&str] = &["now", "today", "free", "limited", "exclusive"];

/// Terms that make the promised outcome concrete.
pub const SPECIFICITY_WORDS: &[&str] = &[
    "now",
    "today",
    "instantly",
    "in 30 seconds",
    "step by step",
];

/// Hedging language that undercuts urgency.
pub const HEDGING_WORDS: &[&str] = &[
    "maybe",
    "perhaps",
    "consider",
    "think about",
    "might want to",
];

/// Generic phrases penalised by clarity scoring; the single highest penalty
/// applies per text. Ordered by penalty magnitude.
pub const GENERIC_PENALTIES: &[(&str, i32)] = &[
    ("click here", -40),
    ("here", -35),
    ("read more", -30),
    ("this", -30),
    ("learn more", -25),
    ("more info", -20),
];

/// Texts that are generic CTAs when they are the whole label.
pub const GENERIC_TEXTS: &[&str] = &["click here", "read more", "learn more", "more info"];

/// True when `term` occurs in `text` starting at a word boundary.
///
/// Both arguments are compared case-insensitively; `text` is expected to be
/// pre-lowercased by the caller (the vocabularies already are).
pub fn contains_term(text: &str, term: &str) -> bool {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(term) {
        let start = search_from + rel;
        let boundary = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        if boundary {
            return true;
        }
        search_from = start + 1;
    }
    false
}

/// Number of vocabulary terms present in `text`.
pub fn count_terms(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| contains_term(text, t)).count()
}

/// True when any vocabulary term is present in `text`.
pub fn any_term(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| contains_term(text, t))
}
