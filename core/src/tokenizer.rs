use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Letters and digits only: every punctuation character acts as a
    // separator, so punctuation never glues two words and contractions split.
    static ref WORD: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Force one-time construction of the shared tokenizer state (word regex,
/// stemmer, stopword set). Tokenization works without calling this, but
/// calling it at startup turns a broken table into an immediate startup
/// failure instead of one discovered on the first query.
pub fn init() {
    lazy_static::initialize(&WORD);
    lazy_static::initialize(&STEMMER);
    lazy_static::initialize(&STOPWORDS);
}

/// Tokenize text into normalized terms: NFKC normalization, lowercase,
/// punctuation-as-separator word split, stopword and single-character
/// removal, then Snowball stemming to a canonical form.
///
/// The same pipeline runs over documents and query words, so query terms
/// always normalize to the forms stored in the index. Empty input yields an
/// empty sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    let mut terms = Vec::new();
    for mat in WORD.find_iter(&normalized) {
        let token = mat.as_str();
        // Length is in characters, not bytes: a lone multibyte letter is
        // still a single-character token.
        if token.chars().nth(1).is_none() || is_stopword(token) { continue; }
        terms.push(STEMMER.stem(token).to_string());
    }
    terms
}
