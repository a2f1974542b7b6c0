//! Counter behaviour through the get-or-create registry.

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

fn counter_value(fam: &MetricFamily, label: &str, value: &str) -> f64 {
    fam.get_metric()
        .iter()
        .find(|m| {
            m.get_label()
                .iter()
                .any(|p| p.get_name() == label && p.get_value() == value)
        })
        .unwrap_or_else(|| panic!("no series with {label}={value}"))
        .get_counter()
        .get_value()
}

#[test]
fn counter_accumulates_across_lookups() {
    let (metrics, registry) = metrics_with_prefix("z");

    let c = metrics.counter("Mine");
    c.inc();
    metrics.counter("Mine").inc();
    c.inc_by(7.0);

    let fam = family(&registry, "z_mine");
    assert_eq!(fam.get_metric().len(), 1);
    assert_eq!(fam.get_metric()[0].get_counter().get_value(), 9.0);
    assert_eq!(fam.get_help(), "z_mine");
}

#[test]
fn repeated_lookup_registers_one_family() {
    let (metrics, registry) = metrics_with_prefix("z");

    for _ in 0..10 {
        metrics.counter("repeat").inc();
    }

    assert_eq!(registry.gather().len(), 1);
    assert_eq!(
        family(&registry, "z_repeat").get_metric()[0]
            .get_counter()
            .get_value(),
        10.0
    );
}

#[test]
fn labelled_counter_partitions_by_value() {
    let (metrics, registry) = metrics_with_prefix("v");

    let c = metrics.labelled_counter_with_description("visitors", &["country"], "desc");
    c.inc(&["uk"]);
    c.inc_by(&["usa"], 16.0);
    c.inc(&["uk"]);
    c.inc(&["usa"]);
    c.inc_by(&["usa"], 3.0);

    let fam = family(&registry, "v_visitors");
    assert_eq!(fam.get_help(), "desc");
    assert_eq!(counter_value(&fam, "country", "uk"), 2.0);
    assert_eq!(counter_value(&fam, "country", "usa"), 20.0);
}

#[test]
fn labelled_counter_with_two_dimensions() {
    let (metrics, registry) = metrics_with_prefix("v");

    let c = metrics.labelled_counter("animals", &["animal", "breed"]);
    c.inc(&["cat", "persian"]);
    c.inc_by(&["dog", "spaniel"], 16.0);
    c.inc(&["cat", "black"]);
    c.inc(&["dog", "greyhound"]);
    c.inc_by(&["cat", "black"], 3.0);

    let fam = family(&registry, "v_animals");
    assert_eq!(fam.get_metric().len(), 4);

    let series = |animal: &str, breed: &str| -> f64 {
        fam.get_metric()
            .iter()
            .find(|m| {
                let labels = m.get_label();
                labels
                    .iter()
                    .any(|p| p.get_name() == "animal" && p.get_value() == animal)
                    && labels
                        .iter()
                        .any(|p| p.get_name() == "breed" && p.get_value() == breed)
            })
            .unwrap_or_else(|| panic!("no series for {animal}/{breed}"))
            .get_counter()
            .get_value()
    };
    assert_eq!(series("cat", "persian"), 1.0);
    assert_eq!(series("cat", "black"), 4.0);
    assert_eq!(series("dog", "spaniel"), 16.0);
    assert_eq!(series("dog", "greyhound"), 1.0);
}

#[test]
fn custom_prefix_separator() {
    let registry = prometheus::Registry::new();
    let metrics = Metrics::builder()
        .prefix("v")
        .separator(":")
        .registry(registry.clone())
        .build();

    metrics.counter("animals").inc();

    let fam = family(&registry, "v:animals");
    assert_eq!(fam.get_metric()[0].get_counter().get_value(), 1.0);
}
