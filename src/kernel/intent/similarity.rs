//! String similarity for fuzzy alias and FAQ matching.
//!
//! Aliases are scored with the normalized InDel ratio: the insert/delete edit
//! distance between two strings, scaled into 0.0 - 1.0 by their combined
//! length. `ratio = 1 - indel(a, b) / (|a| + |b|)`, which equals
//! `2 * lcs(a, b) / (|a| + |b|)`.
//!
//! FAQ questions are scored with the stricter matching-block ratio
//! (Ratcliff/Obershelp): `2 * M / (|a| + |b|)` where `M` counts the chars in
//! the recursively found longest common substrings. It never exceeds the
//! InDel ratio. All lengths are counted in chars, not bytes.

/// Canonical form used for every comparison: trimmed and lowercased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Insert/delete edit distance (no substitutions).
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    a.len() + b.len() - 2 * lcs_len(&a, &b)
}

/// Similarity in 0.0 - 1.0. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    1.0 - indel_distance(a, b) as f64 / total as f64
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Matching-block ratio of `a` against `b`.
///
/// Blocks are searched in `a` first, so the score can differ slightly when
/// the arguments are swapped. Two empty strings are identical.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Sum of all matching block sizes.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_block(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among equally long blocks the one starting earliest in `a` wins, then the
/// one starting earliest in `b`.
fn longest_block(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[k] = length of the common run ending at a[i - 1], b[blo + k - 1]
    let mut prev = vec![0usize; bhi - blo + 1];
    let mut curr = vec![0usize; bhi - blo + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            curr[k] = if a[i] == b[j] { prev[k - 1] + 1 } else { 0 };
            if curr[k] > best_size {
                best_size = curr[k];
                best_i = i + 1 - best_size;
                best_j = j + 1 - best_size;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    /// Position of the winning candidate in the input sequence.
    pub index: usize,
    pub candidate: String,
    pub score: f64,
}

/// Best-scoring candidate by [`similarity_ratio`] if its score reaches
/// `threshold`.
///
/// Ties keep the earliest candidate, so callers control precedence through
/// candidate order.
pub fn best_match<'a, I>(query: &str, candidates: I, threshold: f64) -> Option<BestMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    best_match_by(query, candidates, threshold, similarity_ratio)
}

/// Same as [`best_match`] with a custom scorer, called as
/// `scorer(query, candidate)`.
pub fn best_match_by<'a, I, F>(query: &str, candidates: I, threshold: f64, scorer: F) -> Option<BestMatch>
where
    I: IntoIterator<Item = &'a str>,
    F: Fn(&str, &str) -> f64,
{
    let mut best: Option<BestMatch> = None;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let score = scorer(query, candidate);
        let better = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if better {
            best = Some(BestMatch {
                index,
                candidate: candidate.to_string(),
                score,
            });
        }
    }

    best.filter(|m| m.score >= threshold)
}
