/// Iterator over the index sets of every 5-card subset of `n` cards, in lexicographic order.
///
/// `n` = 5, 6, 7 yields 1, 6, 21 subsets.
pub struct ChooseFive {
    n: usize,
    indices: [usize; 5],
    done: bool,
}

impl ChooseFive {
    pub fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2, 3, 4], done: n < 5 }
    }
}

impl Iterator for ChooseFive {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find the rightmost index that can be incremented
        let mut i = 4;
        loop {
            if self.indices[i] < self.n - (5 - i) {
                self.indices[i] += 1;
                for j in (i + 1)..5 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }
}

/// All `k`-element combinations of `items`, preserving the input order inside each
/// combination and emitting combinations in lexicographic order of positions.
///
/// With `items` sorted from high to low this lists kicker sets from best to worst.
pub(crate) fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn walk<T: Copy>(items: &[T], k: usize, start: usize, acc: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if acc.len() == k {
            out.push(acc.clone());
            return;
        }
        let needed = k - acc.len();
        for i in start..items.len() {
            if items.len() - i < needed {
                break;
            }
            acc.push(items[i]);
            walk(items, k, i + 1, acc, out);
            acc.pop();
        }
    }

    let mut out = Vec::new();
    walk(items, k, 0, &mut Vec::with_capacity(k), &mut out);
    out
}

/// All multisets of size `k` drawn from `items` (repetition allowed).
pub(crate) fn multisets<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn walk<T: Copy>(items: &[T], k: usize, start: usize, acc: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if acc.len() == k {
            out.push(acc.clone());
            return;
        }
        for i in start..items.len() {
            acc.push(items[i]);
            walk(items, k, i, acc, out);
            acc.pop();
        }
    }

    let mut out = Vec::new();
    walk(items, k, 0, &mut Vec::with_capacity(k), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_counts() {
        assert_eq!(ChooseFive::new(4).count(), 0);
        assert_eq!(ChooseFive::new(5).count(), 1);
        assert_eq!(ChooseFive::new(6).count(), 6);
        assert_eq!(ChooseFive::new(7).count(), 21);
    }

    #[test]
    fn subsets_are_strictly_ascending_and_in_range() {
        for combo in ChooseFive::new(7) {
            assert!(combo.iter().all(|&i| i < 7));
            assert!(combo.windows(2).all(|w| w[1] > w[0]));
        }
        assert_eq!(ChooseFive::new(7).next(), Some([0, 1, 2, 3, 4]));
        assert_eq!(ChooseFive::new(7).last(), Some([2, 3, 4, 5, 6]));
    }

    #[test]
    fn combinations_keep_order() {
        let xs = combinations(&[9, 5, 3, 1], 2);
        assert_eq!(xs, vec![vec![9, 5], vec![9, 3], vec![9, 1], vec![5, 3], vec![5, 1], vec![3, 1]]);
        assert_eq!(combinations(&(0..13).collect::<Vec<_>>(), 3).len(), 286);
    }

    #[test]
    fn multisets_count() {
        assert_eq!(multisets(&[1, 2, 3], 2).len(), 6);
        assert_eq!(multisets(&(0..13).collect::<Vec<_>>(), 3).len(), 455);
    }
}
