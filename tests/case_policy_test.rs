//! Case policy: folding by default, spelling-sensitive on request.

use hugin::Metrics;
use prometheus::proto::MetricFamily;

fn family(registry: &prometheus::Registry, name: &str) -> MetricFamily {
    registry
        .gather()
        .into_iter()
        .find(|f| f.get_name() == name)
        .unwrap_or_else(|| panic!("metric {name} was not gathered"))
}

#[test]
fn insensitive_mode_folds_spellings_into_one_metric() {
    let registry = prometheus::Registry::new();
    let metrics = Metrics::builder()
        .prefix("blah")
        .registry(registry.clone())
        .build();

    metrics.counter("abcd").inc();
    metrics.counter("AbCd").inc();
    metrics.counter("ABCD").inc();

    assert_eq!(registry.gather().len(), 1);
    let fam = family(&registry, "blah_abcd");
    assert_eq!(fam.get_metric()[0].get_counter().get_value(), 3.0);
}

#[test]
fn sensitive_mode_keeps_spellings_independent() {
    let registry = prometheus::Registry::new();
    let metrics = Metrics::builder()
        .prefix("blah")
        .case_sensitive(true)
        .registry(registry.clone())
        .build();

    metrics.counter("abcd").inc();
    metrics.counter("AbCd").inc();
    metrics.counter("ABCD").inc();

    assert_eq!(registry.gather().len(), 3);
    for name in ["blah_abcd", "blah_AbCd", "blah_ABCD"] {
        let fam = family(&registry, name);
        assert_eq!(fam.get_metric()[0].get_counter().get_value(), 1.0, "{name}");
    }
}

#[test]
fn prefix_is_lowercased_even_in_sensitive_mode() {
    let registry = prometheus::Registry::new();
    let metrics = Metrics::builder()
        .prefix("BLAH")
        .case_sensitive(true)
        .registry(registry.clone())
        .build();

    metrics.counter("MyCounter").inc();

    let fam = family(&registry, "blah_MyCounter");
    assert_eq!(fam.get_metric()[0].get_counter().get_value(), 1.0);
}

#[test]
fn observations_through_any_spelling_accumulate_together() {
    let registry = prometheus::Registry::new();
    let metrics = Metrics::builder()
        .prefix("x-service#123")
        .registry(registry.clone())
        .build();

    metrics.gauge("MyGauge").set(100.0);
    metrics.gauge("mygauge").inc();
    metrics.gauge("MYGAUGE").inc();

    let fam = family(&registry, "x_service_123_mygauge");
    assert_eq!(fam.get_metric().len(), 1);
    assert_eq!(fam.get_metric()[0].get_gauge().get_value(), 102.0);
}
