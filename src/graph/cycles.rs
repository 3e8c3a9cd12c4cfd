//! Reachability checks on weight matrices using the [`NO_EDGE`] sentinel.

use std::collections::VecDeque;

use super::NO_EDGE;

/// Returns `true` if `node` can reach itself through at least one other node.
///
/// Self-loops (diagonal entries) are ignored. Rows are assumed to be as long
/// as the matrix is tall.
pub fn has_cycle_through(matrix: &[Vec<i64>], node: usize) -> bool {
    let n = matrix.len();
    if node >= n {
        return false;
    }
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([node]);
    seen[node] = true;

    while let Some(current) = queue.pop_front() {
        for (next, &w) in matrix[current].iter().enumerate().take(n) {
            if next == current || w == NO_EDGE {
                continue;
            }
            if next == node {
                return true;
            }
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

/// Returns `true` if no cycle passes through an inner node `1..=n-2`.
///
/// Node 0 and node n-1 are the source and sink of the layered graphs handed
/// to [`ShortestPathSolver`](super::ShortestPathSolver) and are not checked.
///
/// # Examples
///
/// ```
/// use u_toptw::graph::{is_acyclic, NO_EDGE};
///
/// let mut m = vec![vec![NO_EDGE; 4]; 4];
/// m[0][1] = 1;
/// m[1][2] = 1;
/// m[2][3] = 1;
/// assert!(is_acyclic(&m));
/// m[2][1] = 1;
/// assert!(!is_acyclic(&m));
/// ```
pub fn is_acyclic(matrix: &[Vec<i64>]) -> bool {
    let inner = matrix.len().saturating_sub(2);
    !(1..=inner).any(|node| has_cycle_through(matrix, node))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(n: usize) -> Vec<Vec<i64>> {
        vec![vec![NO_EDGE; n]; n]
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut m = empty(3);
        m[1][1] = 0;
        assert!(!has_cycle_through(&m, 1));
        assert!(is_acyclic(&m));
    }

    #[test]
    fn test_long_cycle() {
        let mut m = empty(5);
        m[1][2] = 3;
        m[2][3] = 3;
        m[3][1] = 3;
        assert!(has_cycle_through(&m, 2));
        assert!(!has_cycle_through(&m, 0));
        assert!(!is_acyclic(&m));
    }

    #[test]
    fn test_cycle_through_endpoints_only() {
        let mut m = empty(3);
        m[0][2] = 1;
        m[2][0] = 1;
        assert!(has_cycle_through(&m, 0));
        assert!(is_acyclic(&m));
    }

    #[test]
    fn test_small_and_out_of_range() {
        assert!(is_acyclic(&[]));
        assert!(is_acyclic(&empty(2)));
        assert!(!has_cycle_through(&empty(2), 5));
    }
}
