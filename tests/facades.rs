
use anyhow::Result;
use ironstream::testing::*;
use ironstream::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

#[test]
fn sum_and_average() -> Result<()> {
    let p = TestPipeline::new();
    assert_eq!(from_vec(&p, vec![1, 2, 3, 4, 5]).numeric().sum()?, 15);
    assert_approx_eq!(from_vec(&p, vec![1, 2, 3, 4, 5]).numeric().average()?, 3.0);
    assert_approx_eq!(from_vec(&p, vec![0.5f32, 1.5]).numeric().average()?, 1.0);
    Ok(())
}

#[test]
fn empty_numeric_stream_aggregates() -> Result<()> {
    let p = TestPipeline::new();
    assert_eq!(empty::<u32>(&p).numeric().sum()?, 0);
    assert_approx_eq!(empty::<i64>(&p).numeric().average()?, 0.0);
    assert_eq!(empty::<i64>(&p).numeric().min()?, None);
    assert_eq!(empty::<i64>(&p).numeric().max()?, None);
    assert_eq!(empty::<i64>(&p).numeric().count()?, 0);
    Ok(())
}

#[test]
fn min_max_over_numbers() -> Result<()> {
    let p = TestPipeline::new();
    let data = vec![4.0, -1.5, 9.25, 0.0];
    assert_eq!(from_slice(&p, &data).numeric().min()?, Some(-1.5));
    assert_eq!(from_slice(&p, &data).numeric().max()?, Some(9.25));
    Ok(())
}

#[test]
fn ties_keep_the_first_element_seen() -> Result<()> {
    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Score(u8, char);

    impl PartialOrd for Score {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    let p = TestPipeline::new();
    let data = vec![Score(1, 'a'), Score(5, 'b'), Score(1, 'c'), Score(5, 'd')];
    assert_eq!(from_slice(&p, &data).ordered().min()?, Some(Score(1, 'a')));
    assert_eq!(from_slice(&p, &data).ordered().max()?, Some(Score(5, 'b')));
    Ok(())
}

#[test]
fn numeric_intermediates_stay_numeric() -> Result<()> {
    let p = TestPipeline::new();
    let total = from_iter(&p, 1..=10u64)
        .numeric()
        .filter(|x| x % 2 == 0)
        .map(|x| x * 3)
        .skip(1)
        .limit(3)
        .sum()?;
    // 12 + 18 + 24
    assert_eq!(total, 54);

    let top = from_vec(&p, vec![3, 9, 1, 7])
        .numeric()
        .sorted_by(SortOrder::Descending)
        .limit(2)
        .collect()?;
    assert_collections_equal(&top, &[9, 7]);

    let head = from_vec(&p, vec![1, 2, 10, 3])
        .numeric()
        .take_while(|x| *x < 5)
        .reverse()
        .collect()?;
    assert_collections_equal(&head, &[2, 1]);

    let tail = from_vec(&p, vec![1, 2, 10, 3])
        .numeric()
        .drop_while(|x| *x < 5)
        .sum()?;
    assert_eq!(tail, 13);
    Ok(())
}

#[test]
fn numeric_peek_and_into_stream() -> Result<()> {
    let p = TestPipeline::new();
    let peeked = Arc::new(AtomicI32::new(0));
    let c = Arc::clone(&peeked);
    let out = from_vec(&p, vec![1, 2, 3])
        .numeric()
        .peek(move |x| {
            c.fetch_add(*x, Ordering::SeqCst);
        })
        .into_stream()
        .map(|x| x.to_string())
        .collect()?;
    assert_eq!(peeked.load(Ordering::SeqCst), 6);
    assert_collections_equal(&out, &["1".to_string(), "2".into(), "3".into()]);
    Ok(())
}

#[test]
fn numeric_from_conversion_wraps_the_same_stage() -> Result<()> {
    let p = TestPipeline::new();
    let stream = from_vec(&p, vec![2u16, 4]);
    let numbers = NumberStream::from(stream.clone());
    assert_eq!(numbers.max()?, Some(4));
    assert!(stream.is_activated());
    Ok(())
}

#[test]
fn ordered_and_comparable_facades_unwrap_to_streams() -> Result<()> {
    let p = TestPipeline::new();
    let sorted = from_vec(&p, vec![3, 1, 2]).ordered().sorted_by(SortOrder::Ascending).collect()?;
    assert_collections_equal(&sorted, &[1, 2, 3]);

    let doubled = from_vec(&p, vec![2, 2, 5])
        .comparable()
        .distinct()
        .into_stream()
        .map(|x| x * 2)
        .collect()?;
    assert_collections_equal(&doubled, &[4, 10]);

    let top = from_vec(&p, vec![4, 9, 1]).ordered().into_stream().limit(2).collect()?;
    assert_collections_equal(&top, &[4, 9]);
    Ok(())
}
