//! Property tests for the element-level guarantees of the engine.

use ironstream::testing::TestPipeline;
use ironstream::*;
use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

const SETTLE: Duration = Duration::from_secs(5);

fn data() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50i32..50, 0..60)
}

proptest! {
    // Every case spawns a handful of threads; keep the case count modest.
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn filter_keeps_matching_subsequence(v in data(), m in 1i32..5) {
        let p = TestPipeline::new();
        let out = from_slice(&p, &v).filter(move |x| x % m == 0).collect().unwrap();
        let expected: Vec<i32> = v.iter().copied().filter(|x| x % m == 0).collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn limit_takes_a_prefix_and_terminates(v in data(), n in 0usize..80) {
        let p = TestPipeline::new();
        let out = from_slice(&p, &v).limit(n).collect().unwrap();
        prop_assert_eq!(out.len(), n.min(v.len()));
        prop_assert_eq!(&out[..], &v[..n.min(v.len())]);
        prop_assert!(p.wait_until_settled(SETTLE));
    }

    #[test]
    fn sorted_is_an_ordered_permutation(v in data()) {
        let p = TestPipeline::new();
        let asc = from_slice(&p, &v).sorted_by(SortOrder::Ascending).collect().unwrap();
        let desc = from_slice(&p, &v).sorted_by(SortOrder::Descending).collect().unwrap();

        prop_assert!(asc.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(desc.windows(2).all(|w| w[0] >= w[1]));

        let mut expected = v.clone();
        expected.sort_unstable();
        prop_assert_eq!(&asc, &expected);

        let reversed = from_vec(&p, desc).reverse().collect().unwrap();
        prop_assert_eq!(reversed, asc);
    }

    #[test]
    fn distinct_keeps_first_occurrences(v in data()) {
        let p = TestPipeline::new();
        let out = from_slice(&p, &v).distinct().collect().unwrap();

        let mut seen = HashSet::new();
        let expected: Vec<i32> = v.iter().copied().filter(|x| seen.insert(*x)).collect();
        prop_assert!(out.len() <= v.len());
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn reduce_matches_numeric_sum(v in data()) {
        let p = TestPipeline::new();
        let reduced = from_slice(&p, &v).reduce(0i64, |acc, x| acc + i64::from(x)).unwrap();
        let summed = from_iter(&p, v.iter().map(|x| i64::from(*x))).numeric().sum().unwrap();
        prop_assert_eq!(reduced, summed);
        prop_assert_eq!(reduced, v.iter().map(|x| i64::from(*x)).sum::<i64>());
    }

    #[test]
    fn find_first_is_the_head(v in data()) {
        let p = TestPipeline::new();
        let first = from_slice(&p, &v).find_first().unwrap();
        prop_assert_eq!(first, v.first().copied());
        prop_assert!(p.wait_until_settled(SETTLE));
    }

    #[test]
    fn take_while_then_drop_while_partition(v in data(), cut in -50i32..50) {
        let p = TestPipeline::new();
        let head = from_slice(&p, &v).take_while(move |x| *x < cut).collect().unwrap();
        let tail = from_slice(&p, &v).drop_while(move |x| *x < cut).collect().unwrap();
        prop_assert_eq!([head, tail].concat(), v);
        prop_assert!(p.wait_until_settled(SETTLE));
    }
}
