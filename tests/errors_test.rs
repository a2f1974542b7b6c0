//! The shared error counter.

use hugin::Metrics;
use prometheus::proto::MetricFamily;

fn metrics_with_prefix(prefix: &str) -> (Metrics, prometheus::Registry) {
    let registry = prometheus::Registry::new();
    let metrics = Metrics::builder()
        .prefix(prefix)
        .registry(registry.clone())
        .build();
    (metrics, registry)
}

fn family(registry: &prometheus::Registry, name: &str) -> MetricFamily {
    registry
        .gather()
        .into_iter()
        .find(|f| f.get_name() == name)
        .unwrap_or_else(|| panic!("metric {name} was not gathered"))
}

fn error_count(fam: &MetricFamily, error_type: &str) -> f64 {
    fam.get_metric()
        .iter()
        .find(|m| {
            m.get_label()
                .iter()
                .any(|p| p.get_name() == "error_type" && p.get_value() == error_type)
        })
        .unwrap_or_else(|| panic!("no series for error_type={error_type}"))
        .get_counter()
        .get_value()
}

#[test]
fn all_error_types_share_one_counter() {
    let (metrics, registry) = metrics_with_prefix("z");

    metrics.error("bad");
    metrics.error("generic");
    metrics.error("generic");
    metrics.error("worse");

    let gathered = registry.gather();
    assert_eq!(gathered.len(), 1, "one lazily created counter, nothing else");

    let fam = family(&registry, "z_errors");
    assert_eq!(fam.get_metric().len(), 3);
    assert_eq!(error_count(&fam, "bad"), 1.0);
    assert_eq!(error_count(&fam, "generic"), 2.0);
    assert_eq!(error_count(&fam, "worse"), 1.0);
}

#[test]
fn error_counter_is_not_created_until_first_use() {
    let (metrics, registry) = metrics_with_prefix("z");

    metrics.counter("unrelated").inc();
    assert!(
        registry
            .gather()
            .iter()
            .all(|f| f.get_name() != "z_errors")
    );

    metrics.error("late");
    assert_eq!(error_count(&family(&registry, "z_errors"), "late"), 1.0);
}

#[test]
fn error_counter_description_is_its_exported_name() {
    let (metrics, registry) = metrics_with_prefix("svc");

    metrics.error("oops");

    let fam = family(&registry, "svc_errors");
    assert_eq!(fam.get_help(), "svc_errors");
}
