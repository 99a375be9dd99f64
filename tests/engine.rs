//! Execution-engine behavior: laziness, exactly-once activation, early stop
//! and release of abandoned producers.

use anyhow::Result;
use ironstream::testing::*;
use ironstream::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

const SETTLE: Duration = Duration::from_secs(5);

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

#[test]
fn building_a_chain_runs_nothing() -> Result<()> {
    let p = TestPipeline::new();
    let seen = counter();
    let s = Arc::clone(&seen);

    let chain = from_vec(&p, vec![1, 2, 3])
        .peek(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        })
        .map(|x| x * 2);

    thread::sleep(Duration::from_millis(30));
    assert_eq!(seen.load(Ordering::SeqCst), 0);
    assert!(!chain.is_activated());
    assert_eq!(p.stage_count(), 3);
    assert_eq!(p.metrics().snapshot().stages_activated, 0);

    assert_collections_equal(&chain.collect()?, &[2, 4, 6]);
    assert_eq!(seen.load(Ordering::SeqCst), 3);
    Ok(())
}

#[test]
fn filter_map_sort_end_to_end() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, vec![3, 1, 2])
        .filter(|x| *x > 1)
        .map(|x| x * 10)
        .sorted_by(SortOrder::Ascending)
        .collect()?;
    assert_collections_equal(&out, &[20, 30]);
    Ok(())
}

#[test]
fn limit_drains_the_rest_of_upstream() -> Result<()> {
    let p = TestPipeline::new();
    let seen = counter();
    let s = Arc::clone(&seen);

    let out = from_iter(&p, 0..1000)
        .peek(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        })
        .limit(3)
        .collect()?;

    assert_collections_equal(&out, &[0, 1, 2]);
    assert!(p.wait_until_settled(SETTLE), "producers still running");
    // Drained elements still pass through upstream stages.
    assert_eq!(seen.load(Ordering::SeqCst), 1000);
    let m = p.metrics().snapshot();
    assert_eq!(m.drains_started, 1);
    assert_eq!(m.elements_drained, 997);
    Ok(())
}

#[test]
fn limit_larger_than_input_forwards_everything() -> Result<()> {
    let p = TestPipeline::new();
    assert_stream_yields(from_vec(&p, vec![1, 2]).limit(10), &[1, 2]);
    assert_stream_yields(from_vec(&p, vec![1, 2]).limit(0), &[]);
    assert!(p.wait_until_settled(SETTLE));
    Ok(())
}

#[test]
fn take_while_stops_at_first_failure_and_releases_upstream() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, vec![1, 2, 5, 1, 2])
        .take_while(|x| *x < 3)
        .collect()?;
    assert_collections_equal(&out, &[1, 2]);
    assert!(p.wait_until_settled(SETTLE));
    assert_eq!(p.metrics().snapshot().elements_drained, 2);
    Ok(())
}

#[test]
fn drop_while_and_skip() -> Result<()> {
    let p = TestPipeline::new();
    assert_stream_yields(
        from_vec(&p, vec![1, 2, 5, 1, 2]).drop_while(|x| *x < 3),
        &[5, 1, 2],
    );
    assert_stream_yields(from_vec(&p, vec![1, 2, 3, 4]).skip(2), &[3, 4]);
    assert_stream_yields(from_vec(&p, vec![1, 2]).skip(5), &[]);
    Ok(())
}

#[test]
fn find_first_on_large_source_returns_promptly() -> Result<()> {
    let p = TestPipeline::new();
    let first = from_iter(&p, 0..100_000).map(|x| x + 1).find_first()?;
    assert_eq!(first, Some(1));
    assert!(p.wait_until_settled(SETTLE));
    Ok(())
}

#[test]
fn disconnect_policy_skips_unneeded_work() -> Result<()> {
    let p = TestPipeline::with_config(
        EngineConfig::default().with_abandon_policy(AbandonPolicy::Disconnect),
    );
    let seen = counter();
    let s = Arc::clone(&seen);

    let out = from_iter(&p, 0..1000)
        .peek(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        })
        .limit(3)
        .collect()?;

    assert_collections_equal(&out, &[0, 1, 2]);
    assert!(p.wait_until_settled(SETTLE), "producers still running");
    // At most one element beyond the cap is peeked before the send fails.
    assert!(seen.load(Ordering::SeqCst) <= 4);
    assert_eq!(p.metrics().snapshot().drains_started, 0);
    Ok(())
}

#[test]
fn concurrent_consumers_of_one_stage_run_it_once() -> Result<()> {
    let p = TestPipeline::new();
    let runs = counter();
    let r = Arc::clone(&runs);
    let stream = from_iter(&p, 0..50).peek(move |_| {
        r.fetch_add(1, Ordering::SeqCst);
    });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let s = stream.clone();
            thread::spawn(move || s.collect())
        })
        .collect();
    drop(stream);

    let mut lengths = Vec::new();
    for h in handles {
        let out = h.join().map_err(|_| anyhow::anyhow!("consumer panicked"))??;
        lengths.push(out.len());
    }
    lengths.sort_unstable();
    assert_eq!(lengths, vec![0, 0, 0, 50]);
    assert_eq!(runs.load(Ordering::SeqCst), 50);
    Ok(())
}

#[test]
fn rebinding_a_facade_shares_the_stage() -> Result<()> {
    let p = TestPipeline::new();
    let stream = from_vec(&p, vec![4, 5, 6]);
    let numbers = stream.clone().numeric();

    assert_eq!(numbers.sum()?, 15);
    assert!(stream.is_activated());
    assert_stream_yields(stream, &[]);
    Ok(())
}

#[test]
fn activate_without_consuming_blocks_only_the_producer() -> Result<()> {
    let p = TestPipeline::new();
    let stream = from_vec(&p, vec![1, 2, 3]);
    stream.activate();
    stream.activate();
    assert_eq!(p.metrics().snapshot().stages_activated, 1);
    assert_stream_yields(stream, &[1, 2, 3]);
    Ok(())
}

#[test]
fn deep_chain_preserves_order() -> Result<()> {
    let p = TestPipeline::new();
    let mut stream = from_iter(&p, 0..100u64);
    for _ in 0..150 {
        stream = stream.map(|x| x + 1);
    }
    let out = stream.collect()?;
    let expected: Vec<u64> = (150..250).collect();
    assert_collections_equal(&out, &expected);
    assert!(p.wait_until_settled(SETTLE));
    Ok(())
}

#[test]
fn flat_map_is_depth_first() -> Result<()> {
    let p = TestPipeline::new();
    let inner = p.clone();
    let out = from_vec(&p, vec![1, 2, 3])
        .flat_map(move |n| from_iter(&inner, (0..n).map(move |i| n * 10 + i)))
        .collect()?;
    assert_collections_equal(&out, &[10, 20, 21, 30, 31, 32]);
    Ok(())
}

#[test]
fn flat_map_followed_by_limit_releases_nested_streams() -> Result<()> {
    let p = TestPipeline::new();
    let inner = p.clone();
    let out = from_iter(&p, 0..100)
        .flat_map(move |n| from_vec(&inner, vec![n; 3]))
        .limit(4)
        .collect()?;
    assert_collections_equal(&out, &[0, 0, 0, 1]);
    assert!(p.wait_until_settled(SETTLE));
    Ok(())
}

#[test]
fn flat_map_iter_expands_in_order() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, vec!["a b", "", "c"])
        .flat_map_iter(|s| s.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect()?;
    assert_collections_equal(&out, &["a".to_string(), "b".into(), "c".into()]);
    Ok(())
}

#[test]
fn producer_threads_carry_the_configured_prefix() -> Result<()> {
    let p = TestPipeline::with_config(EngineConfig::default().with_thread_name_prefix("ingest"));
    let names = from_vec(&p, vec![()])
        .map(|()| thread::current().name().map(str::to_string))
        .collect()?;
    let name = names.into_iter().flatten().next().unwrap_or_default();
    assert!(name.starts_with("ingest-stage-"), "unexpected thread name {name:?}");
    Ok(())
}
