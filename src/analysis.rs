//! Word frequencies and Jaccard similarity between users' vocabularies.

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::dataset::UserRecord;

/// Whitespace tokens. Case and punctuation are kept, so `Quia` and `quia.`
/// are different words.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Word counts that remember the order words were first seen in.
#[derive(Debug, Clone, Default)]
pub struct WordCounts {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = WordCounts::new();
        for text in texts {
            counts.add_text(text.as_ref());
        }
        counts
    }

    pub fn add_text(&mut self, text: &str) {
        for word in tokenize(text) {
            self.add_word(word);
        }
    }

    pub fn add_word(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(word.to_string(), self.counts.len());
                self.counts.push((word.to_string(), 1));
            }
        }
    }

    pub fn get(&self, word: &str) -> usize {
        self.index.get(word).map_or(0, |&slot| self.counts[slot].1)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of tokens counted.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// The `k` most frequent words, highest count first. Equal counts keep
    /// first-seen order.
    pub fn most_common(&self, k: usize) -> Vec<(String, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

/// Every tweet of every user in one table.
pub fn corpus_word_counts(dataset: &[UserRecord]) -> WordCounts {
    WordCounts::from_texts(dataset.iter().flat_map(|user| user.tweets.iter()))
}

/// A user's most frequent words, most frequent first.
#[derive(Debug, Clone, PartialEq)]
pub struct TopWords {
    pub username: String,
    pub words: Vec<(String, usize)>,
}

impl TopWords {
    pub fn word_set(&self) -> HashSet<&str> {
        self.words.iter().map(|(w, _)| w.as_str()).collect()
    }
}

/// Top `k` words per user, in dataset order. A username seen twice keeps its
/// first position and its last record's words.
pub fn user_top_words(dataset: &[UserRecord], k: usize) -> Vec<TopWords> {
    let computed: Vec<TopWords> = dataset
        .par_iter()
        .map(|user| TopWords {
            username: user.username.clone(),
            words: WordCounts::from_texts(&user.tweets).most_common(k),
        })
        .collect();

    let mut position: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<TopWords> = Vec::with_capacity(computed.len());
    for top in computed {
        match position.get(&top.username) {
            Some(&slot) => merged[slot] = top,
            None => {
                position.insert(top.username.clone(), merged.len());
                merged.push(top);
            }
        }
    }
    merged
}

/// |a ∩ b| / |a ∪ b|, and 0 when both sets are empty.
pub fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Unordered pair of usernames, stored smaller-first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserPair {
    first: String,
    second: String,
}

impl UserPair {
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        UserPair {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.first, self.second)
    }
}

/// Symmetric pair → score map. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScores {
    scores: Vec<(UserPair, f64)>,
    index: HashMap<UserPair, usize>,
}

impl SimilarityScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score every unordered pair of distinct users once.
    pub fn compute(top_words: &[TopWords]) -> Self {
        let sets: Vec<HashSet<&str>> = top_words.iter().map(TopWords::word_set).collect();

        let mut scores = SimilarityScores::new();
        for (i, left) in top_words.iter().enumerate() {
            for (j, right) in top_words.iter().enumerate().skip(i + 1) {
                if left.username == right.username {
                    continue;
                }
                scores.insert(&left.username, &right.username, jaccard(&sets[i], &sets[j]));
            }
        }
        debug!(pairs = scores.len(), "similarity scores computed");
        scores
    }

    /// Overwrites any score already stored for the pair in either order.
    pub fn insert(&mut self, a: &str, b: &str, score: f64) {
        let pair = UserPair::new(a, b);
        match self.index.get(&pair) {
            Some(&slot) => self.scores[slot].1 = score,
            None => {
                self.index.insert(pair.clone(), self.scores.len());
                self.scores.push((pair, score));
            }
        }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.index
            .get(&UserPair::new(a, b))
            .map(|&slot| self.scores[slot].1)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UserPair, f64)> {
        self.scores.iter().map(|(pair, score)| (pair, *score))
    }

    /// Highest `n` scores, descending. Ties keep insertion order.
    pub fn top(&self, n: usize) -> Vec<(UserPair, f64)> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Pairs scoring strictly above `threshold`.
    pub fn above(&self, threshold: f64) -> impl Iterator<Item = (&UserPair, f64)> {
        self.iter().filter(move |(_, score)| *score > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn user(username: &str, tweets: &[&str]) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            name: String::new(),
            followers_count: 30,
            following_count: 30,
            language: "en".to_string(),
            region: "US".to_string(),
            tweets: tweets.iter().map(|t| t.to_string()).collect(),
            followers: vec![],
            following: vec![],
        }
    }

    fn set<'a>(words: &[&'a str]) -> HashSet<&'a str> {
        words.iter().copied().collect()
    }

    #[test]
    fn ranking_breaks_ties_by_first_appearance() {
        let counts = WordCounts::from_texts(["b a c", "a Quia quia. c", "c"]);
        let ranked = format!("{:?}", counts.most_common(10));
        expect![[r#"[("c", 3), ("a", 2), ("b", 1), ("Quia", 1), ("quia.", 1)]"#]]
            .assert_eq(&ranked);
        assert_eq!(counts.total(), 8);
        assert_eq!(counts.get("quia"), 0);
    }

    #[test]
    fn ranking_is_repeatable() {
        let text = ["et sed et ut", "ut ut Et sed"];
        let a = WordCounts::from_texts(text).most_common(3);
        let b = WordCounts::from_texts(text).most_common(3);
        assert_eq!(a, b);
    }

    #[test]
    fn two_user_scenario_scores_one_half() {
        let dataset = vec![user("A", &["a b c"]), user("B", &["a b d"])];
        let top = user_top_words(&dataset, 5);
        assert_eq!(top[0].word_set(), set(&["a", "b", "c"]));
        assert_eq!(top[1].word_set(), set(&["a", "b", "d"]));

        let scores = SimilarityScores::compute(&top);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get("A", "B"), Some(0.5));
        assert_eq!(scores.get("B", "A"), Some(0.5));
    }

    #[test]
    fn jaccard_bounds() {
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["x"]), &set(&["y"])), 0.0);
        assert_eq!(jaccard(&set(&["x", "y"]), &set(&["y", "x"])), 1.0);
        assert_eq!(jaccard(&set(&["x"]), &set(&[])), 0.0);
    }

    #[test]
    fn each_pair_is_scored_once() {
        let dataset = vec![
            user("carol", &["x y z"]),
            user("alice", &["x y"]),
            user("bob", &["z"]),
            user("dave", &[]),
        ];
        let scores = SimilarityScores::compute(&user_top_words(&dataset, 200));
        assert_eq!(scores.len(), 6);
        let pairs: HashSet<_> = scores.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(pairs.len(), 6);
        for (pair, score) in scores.iter() {
            assert!(pair.first() < pair.second());
            assert!((0.0..=1.0).contains(&score));
            assert_eq!(scores.get(pair.second(), pair.first()), Some(score));
        }
        assert_eq!(scores.get("dave", "alice"), Some(0.0));
    }

    #[test]
    fn top_k_limits_the_word_set() {
        let dataset = vec![user("u", &["a a a b b c d"])];
        let top = user_top_words(&dataset, 2);
        assert_eq!(top[0].word_set(), set(&["a", "b"]));
    }

    #[test]
    fn duplicate_usernames_collapse() {
        let dataset = vec![user("u", &["a"]), user("v", &["a"]), user("u", &["b"])];
        let top = user_top_words(&dataset, 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].username, "u");
        assert_eq!(top[0].word_set(), set(&["b"]));
        let scores = SimilarityScores::compute(&top);
        assert_eq!(scores.get("u", "v"), Some(0.0));
    }

    #[test]
    fn top_and_threshold() {
        let mut scores = SimilarityScores::new();
        scores.insert("a", "b", 0.2);
        scores.insert("c", "a", 0.9);
        scores.insert("b", "c", 0.3);
        scores.insert("d", "a", 0.9);
        scores.insert("b", "a", 0.25);

        let labels: Vec<_> = scores
            .top(3)
            .iter()
            .map(|(p, s)| format!("{} {s}", p.label()))
            .collect();
        expect![[r#"["a - c 0.9", "a - d 0.9", "b - c 0.3"]"#]].assert_eq(&format!("{labels:?}"));

        let above: Vec<_> = scores.above(0.3).map(|(p, _)| p.label()).collect();
        assert_eq!(above, vec!["a - c", "a - d"]);
        assert_eq!(scores.get("a", "b"), Some(0.25));
    }
}
