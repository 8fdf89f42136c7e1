// Lexicon
// Static phrase and pattern tables used by the analyzers and the rewrite
// stages: AI transition markers, telltale regexes, detection fingerprints,
// the synonym thesaurus and the rewrite phrase banks. Everything here is
// versioned, immutable configuration compiled exactly once.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub const LEXICON_VERSION: &str = "2025.2";

// ============================================================================
// Analyzer tables
// ============================================================================

/// Common AI transition phrases (weighted indicators).
pub const AI_TRANSITIONS: &[&str] = &[
    "furthermore", "moreover", "additionally", "in conclusion",
    "it is important to note", "it is worth noting", "in summary",
    "on the other hand", "in other words", "that being said",
    "with that in mind", "having said that", "in this regard",
    "to summarize", "in essence", "broadly speaking",
    "it should be noted", "it goes without saying",
    "consequently", "nevertheless", "nonetheless",
    "in addition to this", "as a result", "for instance",
    "in particular", "specifically", "notably",
    "to elaborate", "to illustrate", "in contrast",
];

/// Case-insensitive matchers for `AI_TRANSITIONS`, compiled once.
pub fn transition_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        AI_TRANSITIONS
            .iter()
            .map(|phrase| {
                Regex::new(&format!("(?i){}", regex::escape(phrase))).expect("transition regex")
            })
            .collect()
    })
}

const TELLTALE_SOURCES: &[&str] = &[
    r"(?i)as an ai",
    r"(?i)it'?s important to note",
    r"(?i)let'?s delve into",
    r"(?i)in today'?s digital landscape",
    r"(?i)in today'?s world",
    r"(?i)in today'?s (?:rapidly |ever[- ])?(?:evolving|changing)",
    r"(?i)it'?s worth mentioning",
    r"(?i)at the end of the day",
    r"(?i)in the realm of",
    r"(?i)a testament to",
    r"(?i)navigating the",
    r"(?i)the landscape of",
    r"(?i)unlock(?:ing)? the (?:full )?potential",
    r"(?i)foster(?:ing)? (?:a (?:sense|culture) of |innovation|growth)",
    r"(?i)delve deeper",
    r"(?i)tapestry of",
    r"(?i)it'?s crucial to",
    r"(?i)paramount importance",
    r"(?i)seamlessly",
    r"(?i)leverage(?:d|s|ing)?",
    r"(?i)utilize(?:d|s|ing)?",
    r"(?i)facilitate(?:d|s|ing)?",
    r"(?i)comprehensive (?:guide|overview|analysis|understanding)",
    r"(?i)embark on",
    r"(?i)cutting[- ]edge",
    r"(?i)game[- ]?changer",
    r"(?i)in this article",
    r"(?i)(?:plays?|serve[sd]?) (?:a )?(?:crucial|vital|pivotal|key) role",
    r"(?i)it cannot be (?:overstated|understated)",
    r"(?i)a myriad of",
    r"(?i)a plethora of",
    r"(?i)a multitude of",
    r"(?i)the intricacies of",
    r"(?i)the nuances of",
    r"(?i)shed(?:s|ding)? light on",
    r"(?i)pav(?:e|es|ing) the way",
    r"(?i)(?:robust|holistic|scalable) (?:solution|approach|framework)",
    r"(?i)(?:empower|equip)(?:s|ing|ed)? (?:individuals|people|users|teams)",
    r"(?i)in the (?:ever[- ])?(?:evolving|changing) (?:landscape|world)",
    r"(?i)(?:stands?|remain[sd]?) as a (?:testament|beacon|reminder)",
    r"(?i)(?:it is|it'?s) (?:essential|imperative|crucial) (?:to|that)",
    r"(?i)one cannot (?:simply|merely|just)",
    r"(?i)(?:this|it) raises the question",
    r"(?i)by and large",
    r"(?i)all things considered",
    r"(?i)in light of (?:this|these|the)",
    r"(?i)the aforementioned",
    r"(?i)as (?:previously )?mentioned (?:earlier|above|before)",
    r"(?i)in the context of",
    r"(?i)from this perspective",
    r"(?i)through the lens of",
    r"(?i)when it comes to",
    r"(?i)in order to (?:ensure|achieve|maintain)",
    r"(?i)(?:a |the )?(?:key|critical|essential) (?:aspect|component|element|factor)",
    r"(?i)not only .{5,40} but also",
    r"(?i)whether .{5,30} or .{5,30}",
    r"(?i)(?:have|has) (?:significantly|dramatically|fundamentally) (?:changed|transformed)",
    r"(?i)(?:innovative|dynamic|versatile|sustainable) (?:solution|approach|platform)",
    r"(?i)(?:by|through) (?:leveraging|utilizing|implementing|harnessing)",
    r"(?i)in (?:an|this) (?:era|age) of",
    r"(?i)(?:the|this) (?:process|journey|experience) of",
    r"(?i)(?:ensure|maintain|establish)(?:s|ing)? (?:a )?(?:strong|solid|robust)",
    r"(?i)(?:significantly|substantially|considerably) (?:impact|improve|enhance)",
    r"(?i)(?:the|this) (?:importance|significance) of (?:this|these)",
    r"(?i)(?:empower|enable|prepare|position)(?:s|ing|ed)? .{0,20} to",
    r"(?i)(?:seamlessly|effortlessly|efficiently) (?:integrate|blend|combine)",
    r"(?i)the (?:key|secret|answer|solution) (?:to|for|lies)",
    r"(?i)(?:cornerstone|pillar|foundation) of",
    r"(?i)(?:with|given) (?:the|this|these) (?:rapid|ongoing|growing)",
    r"(?i)dive (?:deep|deeper) into",
    r"(?i)take (?:a )?(?:closer|deeper) look",
    r"(?i)(?:the|a) (?:world|realm|field|domain) of",
    r"(?i)(?:have you ever|did you know|are you looking)",
    r"(?i)(?:in|throughout) (?:recent years|history|the past)",
    r"(?i)(?:there'?s no denying|it'?s no secret)",
    r"(?i)(?:first|second|third|finally),? (?:it is|it'?s|we|let)",
    r"(?i)(?:this|these|such) (?:approach|method|technique|strategy)e?s? (?:offer|provide|enable)",
    r"(?i)(?:can|could|may|will) (?:significantly|dramatically|profoundly) (?:impact|affect)",
    r"(?i)(?:rich|vast|wide) (?:array|range|spectrum|variety) of",
    r"(?i)(?:at its core|at the heart of)",
    r"(?i)(?:redefine|revolutionize|reshape|transform)(?:s|d|ing)? (?:the|how|our)",
    r"(?i)(?:boast|offer|provide)(?:s|ing)? (?:a )?(?:wide|rich|vast|broad) (?:range|array|variety)",
    r"(?i)(?:strike|strikes|striking) (?:a )?(?:balance|chord)",
    r"(?i)(?:the bottom line|long story short|to put it simply)",
    r"(?i)(?:wrapping up|to wrap up|in closing)",
    r"(?i)(?:food for thought|something to consider)",
];

/// Telltale phrase patterns strongly associated with machine prose.
pub fn telltale_patterns() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        TELLTALE_SOURCES
            .iter()
            .map(|src| Regex::new(src).expect("telltale regex"))
            .collect()
    })
}

/// English function words for stylometric distribution analysis.
pub fn function_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        [
            "the", "a", "an", "is", "are", "was", "were", "be", "been", "being",
            "have", "has", "had", "do", "does", "did", "will", "would", "could",
            "should", "may", "might", "shall", "can", "need", "dare", "ought",
            "used", "to", "of", "in", "for", "on", "with", "at", "by", "from",
            "as", "into", "through", "during", "before", "after", "above", "below",
            "between", "out", "off", "over", "under", "again", "further", "then",
            "once", "and", "but", "or", "nor", "not", "so", "yet", "both",
            "either", "neither", "each", "every", "all", "any", "few", "more",
            "most", "other", "some", "such", "no", "only", "own", "same",
            "than", "too", "very", "just", "because", "if", "when", "where",
            "how", "what", "which", "who", "whom", "this", "that", "these",
            "those", "i", "me", "my", "myself", "we", "our", "ours", "ourselves",
            "you", "your", "yours", "yourself", "he", "him", "his", "himself",
            "she", "her", "hers", "herself", "it", "its", "itself", "they",
            "them", "their", "theirs", "themselves",
        ]
        .into_iter()
        .collect()
    })
}

// ============================================================================
// Fingerprint tables
// ============================================================================

/// Known AI-phrase substrings, matched against lowercased text.
pub const FINGERPRINT_PHRASES: &[&str] = &[
    "as an ai language model",
    "i cannot fulfill",
    "it is important to note that",
    "in today's fast-paced world",
    "a tapestry of",
    "a testament to",
    "unlock the full potential",
    "in the realm of",
    "embark on a journey",
    "navigating the complexities",
    "paradigm shift",
    "holistic approach",
    "seamless integration",
    "transformative force",
    "comprehensive overview",
    "key takeaways",
    "in this article, we will",
    "let's explore",
    "dive deep into",
    "revolutionize the way",
    "harness the power",
    "ever-evolving landscape",
    "delve into the world",
    "cutting-edge technology",
];

const FINGERPRINT_PATTERN_SOURCES: &[&str] = &[
    r"(?im)^(?:introduction|conclusion|overview):",
    r"(?m)^\d+\.\s+[A-Z][^.!?\n]{3,60}:",
    r"(?i)(?:furthermore|moreover|additionally),",
    r"(?i)it'?s (?:crucial|essential|important) to (?:note|remember|understand)",
    r"(?i)in (?:summary|conclusion|essence),?",
    r"(?i)(?:significantly|greatly|substantially) (?:enhances?|improves?|impacts?)",
    r"(?i)plays? a (?:crucial|vital|key|pivotal) role",
    r"(?i)a wide range of",
    r"(?i)best practices",
    r"(?i)key (?:considerations|factors|aspects|benefits)",
    r"(?i)whether you(?:'re| are) a .{3,40} or a",
    r"(?i)(?:let'?s|we will) (?:explore|examine|unpack)",
];

const FINGERPRINT_OPENING_SOURCES: &[&str] = &[
    r"(?i)^in today'?s",
    r"(?i)^in the (?:ever-)?(?:evolving|changing|modern|digital)",
    r"(?i)^(?:artificial intelligence|technology|the world) (?:has|is)",
    r"(?i)^in recent years",
    r"(?i)^imagine a world",
    r"(?i)^(?:have you ever|did you know)",
    r"(?i)^as (?:technology|the world|society) (?:continues|evolves)",
    r"(?i)^in an era (?:of|where)",
    r"(?i)^the (?:rise|advent|emergence) of",
];

const FINGERPRINT_CLOSING_SOURCES: &[&str] = &[
    r"(?i)in conclusion",
    r"(?i)to (?:summarize|sum up|wrap up)",
    r"(?i)ultimately,",
    r"(?i)as we (?:move|look) (?:forward|ahead)",
    r"(?i)the future (?:of|is)",
    r"(?i)by (?:embracing|adopting|implementing) these",
    r"(?i)with the right (?:approach|strategy|tools)",
    r"(?i)only time will tell",
    r"(?i)the journey (?:has just begun|is just beginning)",
];

fn compile_all(sources: &[&str], what: &str) -> Vec<Regex> {
    sources
        .iter()
        .map(|src| Regex::new(src).unwrap_or_else(|e| panic!("{} regex {:?}: {}", what, src, e)))
        .collect()
}

/// Structural regexes associated with AI-generated prose.
pub fn fingerprint_patterns() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| compile_all(FINGERPRINT_PATTERN_SOURCES, "fingerprint"))
}

/// Boilerplate opening patterns (anchored to the start of the text).
pub fn fingerprint_opening() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| compile_all(FINGERPRINT_OPENING_SOURCES, "opening"))
}

/// Boilerplate closing patterns (checked against the tail of the text).
pub fn fingerprint_closing() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| compile_all(FINGERPRINT_CLOSING_SOURCES, "closing"))
}

// ============================================================================
// Synonym thesaurus
// ============================================================================

/// One replaceable trigger word. Part-of-speech-aware entries carry separate
/// noun/verb alternative lists; flat entries carry a single list.
pub struct SynonymRule {
    pub word: &'static str,
    pub flat: &'static [&'static str],
    pub noun: &'static [&'static str],
    pub verb: &'static [&'static str],
}

const fn flat(word: &'static str, alts: &'static [&'static str]) -> SynonymRule {
    SynonymRule { word, flat: alts, noun: &[], verb: &[] }
}

const fn pos(
    word: &'static str,
    noun: &'static [&'static str],
    verb: &'static [&'static str],
) -> SynonymRule {
    SynonymRule { word, flat: &[], noun, verb }
}

static THESAURUS: &[SynonymRule] = &[
    flat("important", &["key", "major", "big", "central"]),
    flat("significant", &["notable", "meaningful", "real", "sizable"]),
    flat("crucial", &["critical", "vital", "key"]),
    flat("fundamental", &["basic", "core", "underlying"]),
    flat("substantial", &["sizable", "hefty", "considerable"]),
    flat("comprehensive", &["thorough", "complete", "full"]),
    flat("notable", &["striking", "remarkable"]),
    flat("utilize", &["use", "employ"]),
    flat("leverage", &["use", "tap into", "draw on"]),
    flat("facilitate", &["help", "ease", "enable"]),
    flat("demonstrate", &["show", "prove"]),
    flat("implement", &["carry out", "put in place", "roll out"]),
    flat("optimize", &["improve", "fine-tune", "sharpen"]),
    flat("enhance", &["improve", "boost", "strengthen"]),
    flat("numerous", &["many", "plenty of", "countless"]),
    flat("various", &["different", "several", "assorted"]),
    flat("innovative", &["new", "fresh", "inventive"]),
    flat("transformative", &["game-changing", "far-reaching"]),
    flat("seamless", &["smooth", "effortless"]),
    flat("robust", &["sturdy", "solid", "strong"]),
    flat("pivotal", &["key", "central", "decisive"]),
    flat("myriad", &["countless", "many", "loads of"]),
    flat("plethora", &["plenty", "abundance", "heap"]),
    flat("delve", &["dig", "look"]),
    flat("embark", &["start", "set out", "begin"]),
    flat("foster", &["encourage", "nurture", "build"]),
    flat("garner", &["gain", "collect", "earn"]),
    flat("bolster", &["boost", "strengthen", "shore up"]),
    flat("underscore", &["highlight", "stress", "emphasize"]),
    flat("exemplify", &["illustrate", "show", "typify"]),
    flat("culminate", &["end", "peak", "wind up"]),
    flat("endeavor", &["effort", "attempt", "try"]),
    flat("paradigm", &["model", "pattern", "framework"]),
    flat("synergy", &["teamwork", "combined effect"]),
    flat("holistic", &["well-rounded", "big-picture", "complete"]),
    flat("meticulously", &["carefully", "painstakingly"]),
    flat("profoundly", &["deeply", "greatly"]),
    flat("invaluable", &["priceless", "essential", "precious"]),
    flat("imperative", &["essential", "urgent", "necessary"]),
    flat("commence", &["begin", "start", "kick off"]),
    flat("ascertain", &["find out", "determine", "figure out"]),
    flat("elucidate", &["explain", "clarify", "spell out"]),
    pos("run", &["stretch", "spell", "streak"], &["sprint", "dash", "jog"]),
    pos("impact", &["effect", "influence", "mark"], &["affect", "influence", "shape"]),
    pos("focus", &["emphasis", "priority", "spotlight"], &["concentrate", "zero in", "home in"]),
    pos("increase", &["rise", "uptick", "growth"], &["grow", "climb", "go up"]),
];

/// Compiled whole-word matchers paired with their thesaurus rules.
pub fn synonym_rules() -> &'static Vec<(Regex, &'static SynonymRule)> {
    static RES: OnceLock<Vec<(Regex, &'static SynonymRule)>> = OnceLock::new();
    RES.get_or_init(|| {
        THESAURUS
            .iter()
            .map(|rule| {
                let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(rule.word)))
                    .expect("synonym regex");
                (re, rule)
            })
            .collect()
    })
}

/// AI-flagged words with a single plain replacement (suffix-tolerant),
/// for entries deliberately kept out of the thesaurus.
static AI_VOCABULARY: &[(&str, &str)] = &[
    ("paramount", "top"),
    ("aforementioned", "mentioned"),
    ("utilization", "use"),
    ("necessitate", "require"),
];

pub fn ai_vocabulary_res() -> &'static Vec<(Regex, &'static str)> {
    static RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RES.get_or_init(|| {
        AI_VOCABULARY
            .iter()
            .map(|(word, replacement)| {
                let re = Regex::new(&format!(r"(?i)\b{}(?:s|d|ing|ed)?\b", regex::escape(word)))
                    .expect("vocabulary regex");
                (re, *replacement)
            })
            .collect()
    })
}

// ============================================================================
// Discourse replacement tables
// ============================================================================

static TRANSITION_REPLACEMENTS: &[(&str, &[&str])] = &[
    (r"(?i)\bfurthermore\b", &["also", "plus", "on top of that", "and besides"]),
    (r"(?i)\bmoreover\b", &["also", "besides", "what's more"]),
    (r"(?i)\badditionally\b", &["also", "plus", "on top of that"]),
    (r"(?i)\bconsequently\b", &["so", "as a result", "because of that"]),
    (r"(?i)\btherefore\b", &["so", "that's why", "which means"]),
    (r"(?i)\bnevertheless\b", &["still", "even so", "all the same"]),
    (r"(?i)\bnonetheless\b", &["still", "even so", "anyway"]),
    (r"(?i)\bin addition\b", &["also", "plus", "on top of that"]),
    (r"(?i)\bin essence\b", &["basically", "at heart", "really"]),
    (r"(?i)\bit is important to note that\b", &["note that", "keep in mind that", "one thing worth knowing:"]),
    (r"(?i)\bit is worth noting that\b", &["worth knowing:", "interestingly,", "note that"]),
    (r"(?i)\bdue to the fact that\b", &["because", "since"]),
    (r"(?i)\bin order to\b", &["to"]),
    (r"(?i)\ba wide range of\b", &["all kinds of", "lots of", "plenty of"]),
    (r"(?i)\bplays a crucial role in\b", &["matters a lot for", "is a big part of"]),
    (r"(?i)\bin today's world\b", &["these days", "right now", "nowadays"]),
];

/// Formulaic transitions paired with human-sounding alternatives.
pub fn transition_replacement_res() -> &'static Vec<(Regex, &'static [&'static str])> {
    static RES: OnceLock<Vec<(Regex, &'static [&'static str])>> = OnceLock::new();
    RES.get_or_init(|| {
        TRANSITION_REPLACEMENTS
            .iter()
            .map(|(src, alts)| (Regex::new(src).expect("transition replacement regex"), *alts))
            .collect()
    })
}

// ============================================================================
// Vocabulary enrichment tables
// ============================================================================

static CONTRACTIONS: &[(&str, &str)] = &[
    (r"(?i)\bdo not\b", "don't"),
    (r"(?i)\bcannot\b", "can't"),
    (r"(?i)\bwill not\b", "won't"),
    (r"(?i)\bit is\b", "it's"),
    (r"(?i)\bthey are\b", "they're"),
    (r"(?i)\bwe are\b", "we're"),
    (r"(?i)\byou are\b", "you're"),
    (r"(?i)\bwould not\b", "wouldn't"),
    (r"(?i)\bcould not\b", "couldn't"),
    (r"(?i)\bshould not\b", "shouldn't"),
    (r"(?i)\bthat is\b", "that's"),
    (r"(?i)\bthere is\b", "there's"),
    (r"\bI am\b", "I'm"),
    (r"\bI have\b", "I've"),
    (r"\bI will\b", "I'll"),
];

static EXPANSIONS: &[(&str, &str)] = &[
    (r"(?i)\bdon't\b", "do not"),
    (r"(?i)\bcan't\b", "cannot"),
    (r"(?i)\bwon't\b", "will not"),
    (r"(?i)\bit's\b", "it is"),
    (r"(?i)\bthey're\b", "they are"),
    (r"(?i)\bwe're\b", "we are"),
];

fn compile_pairs(pairs: &[(&str, &'static str)], what: &str) -> Vec<(Regex, &'static str)> {
    pairs
        .iter()
        .map(|(src, out)| {
            (
                Regex::new(src).unwrap_or_else(|e| panic!("{} regex {:?}: {}", what, src, e)),
                *out,
            )
        })
        .collect()
}

/// Phrase pairs contracted for conversational styles.
pub fn contraction_res() -> &'static Vec<(Regex, &'static str)> {
    static RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RES.get_or_init(|| compile_pairs(CONTRACTIONS, "contraction"))
}

/// Contractions expanded back out for academic style.
pub fn expansion_res() -> &'static Vec<(Regex, &'static str)> {
    static RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RES.get_or_init(|| compile_pairs(EXPANSIONS, "expansion"))
}

static INTENSIFIERS: &[(&str, &[&str])] = &[
    ("very", &["incredibly", "remarkably", "strikingly"]),
    ("really", &["genuinely", "truly", "absolutely"]),
    ("extremely", &["wildly", "breathtakingly", "mind-bogglingly"]),
    ("highly", &["enormously", "immensely", "seriously"]),
];

/// Bland intensifiers with expressive alternatives (creative style).
pub fn intensifier_res() -> &'static Vec<(Regex, &'static [&'static str])> {
    static RES: OnceLock<Vec<(Regex, &'static [&'static str])>> = OnceLock::new();
    RES.get_or_init(|| {
        INTENSIFIERS
            .iter()
            .map(|(word, alts)| {
                let re = Regex::new(&format!(r"(?i)\b{}\b", word)).expect("intensifier regex");
                (re, *alts)
            })
            .collect()
    })
}

static SIMILE_PATTERNS: &[(&str, &[&str])] = &[
    (
        r"(?i)is (?:very |really |extremely )?important",
        &["matters more than people realize", "carries real weight", "is the kind of thing that sticks with you"],
    ),
    (
        r"(?i)is (?:very |really )?difficult",
        &["is no walk in the park", "is trickier than it sounds", "takes real effort"],
    ),
    (
        r"(?i)is (?:very |really )?easy",
        &["is a breeze", "is simpler than you might think", "comes naturally"],
    ),
    (
        r"(?i)is (?:very |really )?interesting",
        &["is fascinating when you dig into it", "grabs your attention", "is surprisingly captivating"],
    ),
];

/// Banal "is (very) X" predicates with descriptive rewrites (creative style).
pub fn simile_res() -> &'static Vec<(Regex, &'static [&'static str])> {
    static RES: OnceLock<Vec<(Regex, &'static [&'static str])>> = OnceLock::new();
    RES.get_or_init(|| {
        SIMILE_PATTERNS
            .iter()
            .map(|(src, alts)| (Regex::new(src).expect("simile regex"), *alts))
            .collect()
    })
}

pub const CREATIVE_OPENERS: &[&str] = &[
    "Picture this: ",
    "Here is the thing -- ",
    "Think of it this way: ",
    "Imagine for a moment: ",
    "What strikes me is that ",
];

// ============================================================================
// Perturbation tables
// ============================================================================

pub const PARENTHETICALS: &[&str] = &[
    " (well, mostly)",
    " (at least in theory)",
    " (which is interesting)",
    " (surprisingly enough)",
    " (for better or worse)",
    " (if that makes sense)",
    " (or so they say)",
];

pub const RHETORICAL_QUESTIONS: &[&str] = &[
    "But why does this matter?",
    "So what does this mean in practice?",
    "Sounds simple, right?",
    "Makes sense so far?",
    "But here's the catch.",
];

pub const HEDGING_PHRASES: &[&str] = &[
    "I think",
    "honestly",
    "to be fair",
    "from what I can tell",
    "in my experience",
    "as far as I know",
    "frankly",
];

pub const HUMAN_FRAGMENTS: &[&str] = &[
    "Funny thing is, ",
    "Here's the kicker -- ",
    "No joke, ",
    "Real talk: ",
    "Honestly? ",
];

pub const IDIOMS: &[&str] = &[
    "At the end of the day, it is what it is.",
    "Not rocket science, really.",
    "It's a mixed bag.",
    "Your mileage may vary.",
    "That ship has sailed.",
    "Easier said than done.",
    "Go figure.",
];

// ============================================================================
// Paraphrase and rewrite phrase banks
// ============================================================================

pub const SENTENCE_OPENERS: &[&str] = &[
    "Interestingly, ", "As it turns out, ", "In practice, ",
    "Looking at it closely, ", "When you think about it, ", "Broadly speaking, ",
    "From a practical standpoint, ", "On closer inspection, ",
];

/// Guard against stacking a second opener onto an already-opened sentence.
pub fn opener_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:Interestingly|As it|In practice|Looking|When you|Broadly|From a|On closer)")
            .expect("opener prefix regex")
    })
}

pub const CREATIVE_FRAGMENTS: &[&str] = &[
    "Bold claim.",
    "Worth noting.",
    "A subtle shift.",
    "Not always, though.",
    "And yet.",
];

/// Leading-transition detector for sentence parsing.
pub fn transition_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:furthermore|moreover|additionally|consequently|nevertheless|however|therefore|thus|hence|indeed|specifically|notably)")
            .expect("transition start regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_compile() {
        assert_eq!(transition_res().len(), AI_TRANSITIONS.len());
        assert!(telltale_patterns().len() >= 80);
        assert!(function_words().len() >= 110);
        assert!(!fingerprint_patterns().is_empty());
        assert!(!fingerprint_opening().is_empty());
        assert!(!fingerprint_closing().is_empty());
        assert!(!synonym_rules().is_empty());
        assert!(!ai_vocabulary_res().is_empty());
        assert!(!transition_replacement_res().is_empty());
        assert_eq!(contraction_res().len(), 15);
        assert_eq!(expansion_res().len(), 6);
        assert!(!intensifier_res().is_empty());
        assert!(!simile_res().is_empty());
    }

    #[test]
    fn test_telltales_match_known_phrases() {
        let hits = |text: &str| telltale_patterns().iter().filter(|re| re.is_match(text)).count();
        assert!(hits("Let's delve into the tapestry of modern life.") >= 2);
        assert_eq!(hits("She bought apples at the corner market."), 0);
    }

    #[test]
    fn test_function_words_membership() {
        assert!(function_words().contains("the"));
        assert!(function_words().contains("themselves"));
        assert!(!function_words().contains("machine"));
    }

    #[test]
    fn test_opening_pattern_anchoring() {
        let first = &fingerprint_opening()[0];
        assert!(first.is_match("In today's economy, nothing is certain."));
        assert!(!first.is_match("Nothing in today's economy is certain."));
    }

    #[test]
    fn test_pos_rules_present() {
        let has_pos = synonym_rules()
            .iter()
            .any(|(_, rule)| !rule.noun.is_empty() && !rule.verb.is_empty());
        assert!(has_pos);
    }
}
