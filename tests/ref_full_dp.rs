use motif_align::{
    aligners::{global, linear, local},
    Coord, MatchScorer, Score, Symbol, SymbolScorer, SENTINEL,
};
use proptest::prelude::*;

const BOUNDARY: i64 = -(1 << 40);

fn sigma(scorer: &MatchScorer, a: Symbol, b: Symbol) -> i64 {
    match scorer.score(a, b) {
        Score::MIN => BOUNDARY,
        s => i64::from(s),
    }
}

fn full_global(q: &[Symbol], t: &[Symbol], gap: Score, scorer: &MatchScorer) -> i64 {
    let g = i64::from(gap);
    let (m, n) = (q.len(), t.len());
    let mut dp = vec![vec![0i64; n + 1]; m + 1];
    for i in 1..=m {
        dp[i][0] = dp[i - 1][0] - g;
    }
    for j in 1..=n {
        dp[0][j] = dp[0][j - 1] - g;
    }
    for i in 1..=m {
        for j in 1..=n {
            let up = dp[i - 1][j] - g;
            let left = dp[i][j - 1] - g;
            let diag = dp[i - 1][j - 1] + sigma(scorer, q[i - 1], t[j - 1]);
            dp[i][j] = up.max(left).max(diag);
        }
    }
    dp[m][n]
}

fn full_local(q: &[Symbol], t: &[Symbol], gap: Score, scorer: &MatchScorer) -> Vec<Vec<i64>> {
    let g = i64::from(gap);
    let (m, n) = (q.len(), t.len());
    let mut dp = vec![vec![0i64; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            let up = if q[i - 1] == SENTINEL { BOUNDARY } else { dp[i - 1][j] - g };
            let left = if t[j - 1] == SENTINEL { BOUNDARY } else { dp[i][j - 1] - g };
            let diag = dp[i - 1][j - 1] + sigma(scorer, q[i - 1], t[j - 1]);
            dp[i][j] = up.max(left).max(diag).max(0);
        }
    }
    dp
}

fn path_monotone(path: &[Coord]) -> bool {
    path.windows(2).all(|w| {
        let (a, b) = (w[0], w[1]);
        matches!(
            (a.x - b.x, a.y - b.y),
            (1, 0) | (0, 1) | (1, 1)
        )
    })
}

fn symbols(max_len: usize) -> impl Strategy<Value = Vec<Symbol>> {
    // Small alphabet for frequent matches, with the odd sentinel.
    prop::collection::vec(
        prop_oneof![9 => -3i8..=3, 1 => Just(SENTINEL)],
        0..max_len,
    )
}

fn scorer() -> impl Strategy<Value = MatchScorer> {
    (1..6i32, 0..4i32).prop_map(|(bonus, penalty)| MatchScorer::new(bonus, penalty))
}

#[test]
fn reference_matches_known_values() {
    let scorer = MatchScorer::default();
    assert_eq!(full_global(&[1, 2, 3, 4, 5], &[1, 2, 3, 4, 5], 5, &scorer), 15);
    let dp = full_local(&[1, 1, 1], &[1, 1, 1], 5, &scorer);
    assert_eq!(dp[3][3], 9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn global_score_matches_reference(
        q in symbols(14),
        t in symbols(14),
        gap in 0..6i32,
        scorer in scorer(),
    ) {
        let a = global::align(&q, &t, gap, &scorer);
        prop_assert_eq!(i64::from(a.score), full_global(&q, &t, gap, &scorer));
        prop_assert_eq!(a.end(), Some(Coord::new(q.len(), t.len())));
        prop_assert_eq!(a.origin(), Some(Coord::new(0, 0)));
        prop_assert!(path_monotone(&a.path));
    }

    #[test]
    fn local_grid_matches_reference(
        q in symbols(14),
        t in symbols(20),
        gap in 0..6i32,
        scorer in scorer(),
    ) {
        let reference = full_local(&q, &t, gap, &scorer);
        let (grid, best) = local::fill(&q, &t, gap, &scorer);
        for i in 0..=q.len() {
            for j in 0..=t.len() {
                prop_assert_eq!(i64::from(grid.get(i, j)), reference[i][j], "cell ({}, {})", i, j);
            }
        }
        let max = reference.iter().flatten().copied().max().unwrap_or(0);
        prop_assert_eq!(i64::from(best.value), max);
        prop_assert_eq!(i64::from(grid.at(best.coord)), max);
    }

    #[test]
    fn local_best_cell_is_first_in_row_major_order(
        q in symbols(10),
        t in symbols(16),
        gap in 0..4i32,
    ) {
        let scorer = MatchScorer::default();
        let reference = full_local(&q, &t, gap, &scorer);
        let max = reference.iter().flatten().copied().max().unwrap_or(0);
        let first = (0..=q.len())
            .flat_map(|i| (0..=t.len()).map(move |j| (i, j)))
            .find(|&(i, j)| reference[i][j] == max)
            .map(Coord::from);
        let (_, best) = local::fill(&q, &t, gap, &scorer);
        prop_assert_eq!(Some(best.coord), first);
    }

    #[test]
    fn linear_space_agrees_with_full_matrix(
        q in symbols(14),
        t in symbols(24),
        gap in 0..6i32,
        scorer in scorer(),
    ) {
        let (_, best) = local::fill(&q, &t, gap, &scorer);
        prop_assert_eq!(linear::score(&q, &t, gap, &scorer), best.value);
        prop_assert_eq!(linear::best_cell(&q, &t, gap, &scorer), best);
    }

    #[test]
    fn local_path_is_valid(
        q in symbols(12),
        t in symbols(18),
        gap in 0..6i32,
    ) {
        let scorer = MatchScorer::default();
        let a = local::align(&q, &t, gap, &scorer);
        prop_assert!(!a.path.is_empty());
        prop_assert!(path_monotone(&a.path));
        prop_assert!(a.score >= 0);
        if a.score == 0 {
            prop_assert_eq!(a.path.clone(), vec![Coord::new(0, 0)]);
        }
    }
}
