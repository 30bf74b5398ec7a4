//! Random filler sentence synthesis.
//!
//! Stands in for prose the mock backend cannot write: plausible-looking
//! sentences of 8–15 words drawn from an embedded word list, grouped into
//! paragraphs of 3–5 sentences. Every function takes the random source
//! explicitly so generation is reproducible under a fixed seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Words per sentence.
const SENTENCE_WORDS_MIN: usize = 8;
const SENTENCE_WORDS_MAX: usize = 15;

/// Sentences per paragraph.
const PARAGRAPH_SENTENCES_MIN: usize = 3;
const PARAGRAPH_SENTENCES_MAX: usize = 5;

/// Embedded vocabulary for filler prose.
const WORDS: &[&str] = &[
    "shadow", "lantern", "river", "whisper", "ember", "garden", "mirror", "thunder", "harbor",
    "sparrow", "velvet", "copper", "silence", "memory", "stranger", "doorway", "compass",
    "fortune", "letter", "winter", "voyage", "market", "tower", "signal", "engine", "orchard",
    "ribbon", "anchor", "beacon", "canyon", "cinder", "dagger", "echo", "feather", "glacier",
    "hollow", "ivory", "jasmine", "keel", "lattice", "meadow", "nocturne", "opal", "parchment",
    "quarry", "relic", "saffron", "tide", "umbra", "vessel", "willow", "zephyr", "the", "a",
    "beneath", "beyond", "against", "toward", "between", "through", "under", "over", "within",
    "wandered", "lingered", "trembled", "gathered", "vanished", "glimmered", "drifted",
    "murmured", "beckoned", "unraveled", "shimmered", "flickered", "settled", "stirred",
    "waited", "listened", "remembered", "followed", "crossed", "carried", "opened", "closed",
    "ancient", "silver", "quiet", "restless", "hidden", "distant", "pale", "crooked", "gentle",
    "hollowed", "luminous", "weathered", "forgotten", "curious", "solemn", "brittle", "amber",
    "slow", "sudden", "secret", "narrow", "endless", "cold", "warm", "dim", "bright", "early",
    "late", "old", "new", "and", "but", "while", "until", "before", "after", "again", "almost",
    "quietly", "slowly", "suddenly", "somewhere", "nowhere", "everywhere", "once", "twice",
];

/// One random sentence: 8–15 words, capitalized, period-terminated.
pub fn sentence(rng: &mut StdRng) -> String {
    let count = rng.gen_range(SENTENCE_WORDS_MIN..=SENTENCE_WORDS_MAX);
    let mut words = Vec::with_capacity(count);
    for _ in 0..count {
        // WORDS is non-empty, choose cannot fail
        words.push(*WORDS.choose(rng).unwrap_or(&"shadow"));
    }
    let mut out = words.join(" ");
    if let Some(first) = out.get(..1) {
        let upper = first.to_uppercase();
        out.replace_range(..1, &upper);
    }
    out.push('.');
    out
}

/// One paragraph of 3–5 sentences.
pub fn paragraph(rng: &mut StdRng) -> String {
    let count = rng.gen_range(PARAGRAPH_SENTENCES_MIN..=PARAGRAPH_SENTENCES_MAX);
    let sentences: Vec<String> = (0..count).map(|_| sentence(rng)).collect();
    sentences.join(" ")
}

/// `count` paragraphs joined by blank lines.
pub fn paragraphs(rng: &mut StdRng, count: usize) -> String {
    let blocks: Vec<String> = (0..count).map(|_| paragraph(rng)).collect();
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_sentence_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let s = sentence(&mut rng);
            assert!(s.ends_with('.'), "not period-terminated: {s}");
            let first = s.chars().next().unwrap();
            assert!(first.is_uppercase(), "not capitalized: {s}");
            let words = s.trim_end_matches('.').split_whitespace().count();
            assert!(
                (SENTENCE_WORDS_MIN..=SENTENCE_WORDS_MAX).contains(&words),
                "bad word count {words}: {s}"
            );
        }
    }

    #[test]
    fn test_paragraph_sentence_count() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let p = paragraph(&mut rng);
            let sentences = p.matches('.').count();
            assert!(
                (PARAGRAPH_SENTENCES_MIN..=PARAGRAPH_SENTENCES_MAX).contains(&sentences),
                "bad sentence count {sentences}: {p}"
            );
        }
    }

    #[test]
    fn test_paragraphs_joined_by_blank_lines() {
        let mut rng = StdRng::seed_from_u64(3);
        let block = paragraphs(&mut rng, 3);
        assert_eq!(block.matches("\n\n").count(), 2);
    }

    #[test]
    fn test_same_seed_reproduces_output() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(paragraphs(&mut a, 2), paragraphs(&mut b, 2));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        // Vanishingly unlikely to collide across two full paragraphs
        assert_ne!(paragraph(&mut a), paragraph(&mut b));
    }
}
