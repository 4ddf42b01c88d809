// ============================================================
// Layer 4 — Review Tokenizer
// ============================================================
// Turns raw review text into normalised tokens.
//
// Steps (applied in order):
//   1. Replace every punctuation/symbol character in FILTERS with
//      a space. This is a substitution, not a deletion, so
//      "great,value" still yields two tokens.
//   2. Split into words, then peel English clitics off the end of
//      each word: "wasn't" → "was" "n't", "I'll" → "I" "'ll".
//      Bare apostrophes around a word become their own token.
//      The typographic apostrophe (’) works the same way, since
//      pasted review text is full of it.
//   3. Rewrite the clitics and auxiliary verbs:
//        n't                      → not
//        'll                      → will
//        am is are was were 's    → be
//      (and the ’ spellings of n't, 'll, 's)
//
// Lowercasing is NOT done here; the text field does it so this
// step stays case-sensitive ("N'T" is left alone).
//
// The tokenizer is an explicit handle: build it once with
// ReviewTokenizer::new() and pass it to whoever needs it.

use regex::Regex;

/// Characters replaced by a space before splitting.
/// The apostrophe is deliberately absent: clitic splitting needs it.
pub const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Auxiliary verbs collapsed to "be"
const AUXILIARIES: [&str; 7] = ["am", "is", "are", "was", "were", "'s", "’s"];

/// Apostrophes and single quotes peeled off word edges
fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '’' | '‘')
}

pub struct ReviewTokenizer {
    /// Matches a clitic suffix at the end of a word
    clitic: Regex,
}

impl ReviewTokenizer {
    /// Compile the clitic pattern.
    pub fn new() -> Result<Self, regex::Error> {
        let clitic = Regex::new(r"(?i)(?:n['’]t|['’](?:ll|s|re|ve|m|d))$")?;
        Ok(Self { clitic })
    }

    /// Full pipeline: filter, split, normalise.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = strip_filters(text);
        self.split(&cleaned)
            .into_iter()
            .map(normalize)
            .map(str::to_string)
            .collect()
    }

    /// Split already-filtered text into raw tokens.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        for word in text.split_whitespace() {
            self.split_word(word, &mut out);
        }
        // split_whitespace never yields blanks; the guard keeps the
        // "no single-space token" rule independent of the splitter
        out.retain(|t| *t != " ");
        out
    }

    fn split_word<'a>(&self, word: &'a str, out: &mut Vec<&'a str>) {
        let mut rest = word;

        // Leading quotes, unless the whole word is a clitic like "'s"
        while rest.chars().nth(1).is_some() && !self.is_clitic(rest) {
            let Some(q) = rest.chars().next().filter(|c| is_quote(*c)) else { break };
            let (quote, tail) = rest.split_at(q.len_utf8());
            out.push(quote);
            rest = tail;
        }

        // Trailing quotes are emitted after the word itself
        let mut trailing = Vec::new();
        while rest.chars().nth(1).is_some() {
            let Some(q) = rest.chars().next_back().filter(|c| is_quote(*c)) else { break };
            let (head, quote) = rest.split_at(rest.len() - q.len_utf8());
            trailing.push(quote);
            rest = head;
        }

        match self.clitic.find(rest) {
            Some(m) if m.start() > 0 => {
                out.push(&rest[..m.start()]);
                out.push(m.as_str());
            }
            _ => out.push(rest),
        }

        out.extend(trailing.into_iter().rev());
    }

    fn is_clitic(&self, word: &str) -> bool {
        self.clitic
            .find(word)
            .map_or(false, |m| m.start() == 0)
    }
}

/// Step 1: every FILTERS character becomes a space.
pub fn strip_filters(text: &str) -> String {
    text.chars()
        .map(|c| if FILTERS.contains(c) { ' ' } else { c })
        .collect()
}

/// Step 3: case-sensitive lexical rewrite of a single token.
pub fn normalize(token: &str) -> &str {
    match token {
        "n't" | "n’t" => "not",
        "'ll" | "’ll" => "will",
        t if AUXILIARIES.contains(&t) => "be",
        t => t,
    }
}
