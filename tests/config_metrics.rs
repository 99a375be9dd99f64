use anyhow::Result;
use ironstream::testing::*;
use ironstream::*;
use std::fs;
use std::time::Duration;

const SETTLE: Duration = Duration::from_secs(5);

#[test]
fn pipeline_from_json_config() -> Result<()> {
    let p = Pipeline::from_json_config(
        r#"{ "thread_name_prefix": "etl", "abandon_policy": "disconnect", "metrics": false }"#,
    )?;
    assert_eq!(p.config().thread_name_prefix, "etl");
    assert_eq!(p.config().abandon_policy, AbandonPolicy::Disconnect);
    assert!(!p.metrics().is_enabled());

    assert_eq!(from_vec(&p, vec![1, 2, 3]).limit(1).collect()?, vec![1]);
    assert_eq!(p.metrics().snapshot(), MetricsSnapshot::default());
    Ok(())
}

#[test]
fn invalid_config_is_reported() {
    let err = Pipeline::from_json_config(r#"{ "abandon_policy": "sometimes" }"#).err();
    assert!(matches!(err, Some(StreamError::Config(_))));
    assert!(err.and_then(|e| e.stage()).is_none());
}

#[test]
fn config_round_trips_through_json() -> Result<()> {
    let cfg = EngineConfig {
        stack_size: Some(256 * 1024),
        ..EngineConfig::default().with_abandon_policy(AbandonPolicy::Disconnect)
    };
    let json = serde_json::to_string(&cfg)?;
    let back = EngineConfig::from_json_str(&json)?;
    assert_eq!(back.stack_size, Some(256 * 1024));
    assert_eq!(back.abandon_policy, AbandonPolicy::Disconnect);

    let p = TestPipeline::with_config(back);
    assert_eq!(from_iter(&p, 0..10).count()?, 10);
    Ok(())
}

#[test]
fn metrics_count_stages_and_elements() -> Result<()> {
    let p = TestPipeline::new();
    let out = from_vec(&p, vec![1, 2, 3, 4]).filter(|x| x % 2 == 0).collect()?;
    assert_eq!(out, vec![2, 4]);
    assert!(p.wait_until_settled(SETTLE));

    let m = p.metrics().snapshot();
    assert_eq!(m.stages_activated, 2);
    assert_eq!(m.stages_completed, 2);
    // 4 from the source, 2 from the filter.
    assert_eq!(m.elements_emitted, 6);
    assert_eq!(m.producer_failures, 0);
    assert_eq!(p.metrics().drains_in_flight(), 0);
    Ok(())
}

#[test]
fn metrics_save_to_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("metrics.json");

    let p = TestPipeline::new();
    let first = from_iter(&p, 0..20).find_first()?;
    assert_eq!(first, Some(0));
    assert!(p.wait_until_settled(SETTLE));

    p.metrics().save_to_file(&path)?;
    let saved: MetricsSnapshot = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(saved, p.metrics().snapshot());
    assert_eq!(saved.elements_drained, 19);
    assert_eq!(saved.drains_completed, 1);
    Ok(())
}

#[test]
fn save_to_missing_directory_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing").join("metrics.json");
    let p = TestPipeline::new();
    assert!(p.metrics().save_to_file(path).is_err());
    Ok(())
}

#[test]
fn metrics_json_has_every_counter() {
    let p = TestPipeline::new();
    let json = p.metrics().to_json();
    for key in [
        "stages_activated",
        "stages_completed",
        "elements_emitted",
        "drains_started",
        "drains_completed",
        "elements_drained",
        "producer_failures",
    ] {
        assert_eq!(json[key], 0, "{key}");
    }
}

#[test]
fn pipelines_keep_separate_counters() -> Result<()> {
    let a = TestPipeline::new();
    let b = TestPipeline::new();
    from_vec(&a, vec![1]).count()?;
    assert_eq!(b.stage_count(), 0);
    assert_eq!(b.metrics().snapshot().stages_activated, 0);
    assert_eq!(a.stage_count(), 1);
    Ok(())
}
