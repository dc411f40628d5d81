//! Canonical-order `k`-subset enumeration
//!
//! Grounded in the original `CombinIter`: a lazy enumerator over strictly
//! decreasing `k`-tuples of `{0 .. n-1}`, advanced by incrementing the
//! least-significant coordinate until it hits its ceiling, then carrying
//! into the next coordinate, the same scheme an odometer with
//! per-digit ceilings uses.

/// Iterator over all `k`-combinations of `{0 .. n-1}`, yielded as strictly
/// decreasing `Vec<usize>` in the canonical order produced by repeated
/// `Next`.
pub struct CombinationIter {
    n: usize,
    k: usize,
    tuple: Vec<usize>,
    done: bool,
}

impl CombinationIter {
    /// Start enumerating `k`-subsets of `{0 .. n-1}`. Panics (debug) if
    /// `k > n`.
    pub fn new(n: usize, k: usize) -> Self {
        debug_assert!(k <= n, "cannot draw {k} items from {n}");
        if k == 0 {
            return CombinationIter {
                n,
                k,
                tuple: Vec::new(),
                done: false,
            };
        }
        let tuple = (0..k).map(|i| k - 1 - i).collect();
        CombinationIter {
            n,
            k,
            tuple,
            done: false,
        }
    }

    /// Advance the internal tuple starting at coordinate `start`. Returns
    /// `false` once the enumeration has rolled over (no more tuples).
    fn advance(&mut self, start: usize) -> bool {
        if start == self.k {
            return false;
        }
        let ceiling = self.n - 1 - start;
        if self.tuple[start] < ceiling {
            self.tuple[start] += 1;
            true
        } else {
            let more = self.advance(start + 1);
            if !more {
                return false;
            }
            self.tuple[start] = self.tuple[start + 1] + 1;
            true
        }
    }
}

impl Iterator for CombinationIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if self.k == 0 {
            self.done = true;
            return Some(Vec::new());
        }
        let current = self.tuple.clone();
        self.done = !self.advance(0);
        Some(current)
    }
}
