use async_trait::async_trait;
use generate::{GenerationError, Schema, StructuredGenerator};
use pipeline::{SupplyChainPipeline, UNKNOWN_ADDRESS};
use places::{Coordinates, Place, PlaceResolver, PlaceResult, PlacesError};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Barrier;

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

struct StubGenerator {
    output: Result<Value, String>,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn returning(output: Value) -> Self {
        Self {
            output: Ok(output),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            output: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StructuredGenerator for StubGenerator {
    async fn generate(&self, prompt: &str, _shape: &Schema) -> Result<Value, GenerationError> {
        assert!(!prompt.is_empty());
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.output {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(GenerationError::Transport(message.clone())),
        }
    }
}

#[derive(Clone)]
enum Answer {
    Found(Coordinates),
    NotFound,
    Fail,
}

struct StubResolver {
    answers: HashMap<String, (Duration, Answer)>,
    barrier: Option<Barrier>,
    calls: AtomicUsize,
}

impl StubResolver {
    fn new() -> Self {
        Self {
            answers: HashMap::new(),
            barrier: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn answer(mut self, query: &str, delay_ms: u64, answer: Answer) -> Self {
        self.answers
            .insert(query.to_string(), (Duration::from_millis(delay_ms), answer));
        self
    }

    /// Every lookup waits until `n` lookups are in flight at once.
    fn rendezvous(mut self, n: usize) -> Self {
        self.barrier = Some(Barrier::new(n));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceResolver for StubResolver {
    async fn resolve(&self, query: &str) -> Result<PlaceResult, PlacesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        let (delay, answer) = self
            .answers
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, Answer::NotFound));
        tokio::time::sleep(delay).await;

        match answer {
            Answer::Found(coordinates) => Ok(PlaceResult::Found(Place {
                name: query.to_string(),
                address: format!("Address of {query}"),
                place_id: format!("id-{query}"),
                coordinates,
            })),
            Answer::NotFound => Ok(PlaceResult::NotFound),
            Answer::Fail => Err(PlacesError::Transport("connection reset".to_string())),
        }
    }
}

fn generated(product: &str, nodes: &[(&str, &str, &str)]) -> Value {
    let supply_chain: Vec<Value> = nodes
        .iter()
        .map(|(name, role, query)| {
            json!({ "company_name": name, "role": role, "location_query": query })
        })
        .collect();
    json!({ "product": product, "supply_chain": supply_chain })
}

fn coords(n: f64) -> Coordinates {
    Coordinates { lat: n, lng: -n }
}

fn build_pipeline(generator: Arc<StubGenerator>, resolver: Arc<StubResolver>) -> SupplyChainPipeline {
    SupplyChainPipeline::new(generator, resolver)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_bicycle_scenario_marks_single_missing_node() {
    let nodes = [
        ("Shimano", "Drivetrain components", "Shimano HQ Sakai Japan"),
        ("Giant", "Frame manufacturing", "Giant factory Taichung Taiwan"),
        ("Ghost Metals", "Aluminium tubing", "Ghost Metals smelter"),
        ("Michelin", "Tires", "Michelin HQ Clermont-Ferrand France"),
        ("SRAM", "Brakes and shifters", "SRAM HQ Chicago USA"),
    ];
    let generator = Arc::new(StubGenerator::returning(generated("Bicycle", &nodes)));
    let resolver = Arc::new(
        StubResolver::new()
            .answer("Shimano HQ Sakai Japan", 0, Answer::Found(coords(1.0)))
            .answer("Giant factory Taichung Taiwan", 0, Answer::Found(coords(2.0)))
            .answer("Ghost Metals smelter", 0, Answer::NotFound)
            .answer("Michelin HQ Clermont-Ferrand France", 0, Answer::Found(coords(4.0)))
            .answer("SRAM HQ Chicago USA", 0, Answer::Found(coords(5.0))),
    );

    let response = build_pipeline(generator, resolver.clone()).run("bicycle").await.unwrap();

    assert_eq!(response.product, "bicycle");
    assert_eq!(response.supply_chain.len(), 5);
    assert_eq!(resolver.calls(), 5);

    let missing: Vec<usize> = response
        .supply_chain
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.found)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(missing, vec![2]);

    let ghost = &response.supply_chain[2];
    assert_eq!(ghost.company_name, "Ghost Metals");
    assert_eq!(ghost.coordinates, None);
    assert_eq!(ghost.address, UNKNOWN_ADDRESS);

    for (i, node) in response.supply_chain.iter().enumerate().filter(|(i, _)| *i != 2) {
        assert!(node.found);
        assert_eq!(node.coordinates, Some(coords((i + 1) as f64)));
        assert_eq!(node.address, format!("Address of {}", node.location_query));
    }
}

#[tokio::test]
async fn test_output_keeps_generated_order_not_completion_order() {
    // Latencies: C < A < B
    let nodes = [("A", "a", "qa"), ("B", "b", "qb"), ("C", "c", "qc")];
    let generator = Arc::new(StubGenerator::returning(generated("thing", &nodes)));
    let resolver = Arc::new(
        StubResolver::new()
            .answer("qa", 40, Answer::Found(coords(1.0)))
            .answer("qb", 80, Answer::Found(coords(2.0)))
            .answer("qc", 5, Answer::Found(coords(3.0))),
    );

    let response = build_pipeline(generator, resolver).run("thing").await.unwrap();

    let names: Vec<&str> = response
        .supply_chain
        .iter()
        .map(|n| n.company_name.as_str())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(response.supply_chain[2].coordinates, Some(coords(3.0)));
}

#[tokio::test]
async fn test_lookups_run_concurrently() {
    let nodes = [("A", "a", "qa"), ("B", "b", "qb"), ("C", "c", "qc")];
    let generator = Arc::new(StubGenerator::returning(generated("thing", &nodes)));
    // Each lookup blocks until all three are in flight; sequential execution
    // would never get past the first one.
    let resolver = Arc::new(
        StubResolver::new()
            .rendezvous(3)
            .answer("qa", 0, Answer::Found(coords(1.0)))
            .answer("qb", 0, Answer::Found(coords(2.0)))
            .answer("qc", 0, Answer::Found(coords(3.0))),
    );

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        build_pipeline(generator, resolver).run("thing"),
    )
    .await
    .expect("lookups were not dispatched concurrently")
    .unwrap();

    assert!(response.supply_chain.iter().all(|n| n.found));
}

#[tokio::test]
async fn test_generation_failure_skips_resolution() {
    let generator = Arc::new(StubGenerator::failing("provider unreachable"));
    let resolver = Arc::new(StubResolver::new());

    let err = build_pipeline(generator.clone(), resolver.clone())
        .run("bicycle")
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Transport(_)));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_generated_output_with_wrong_shape_is_an_error() {
    let generator = Arc::new(StubGenerator::returning(json!({ "companies": ["Shimano"] })));
    let resolver = Arc::new(StubResolver::new());

    let err = build_pipeline(generator, resolver.clone()).run("bicycle").await.unwrap_err();

    assert!(matches!(err, GenerationError::SchemaMismatch(_)));
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_transport_failure_degrades_only_that_node() {
    let nodes = [("A", "a", "qa"), ("B", "b", "qb")];
    let generator = Arc::new(StubGenerator::returning(generated("thing", &nodes)));
    let resolver = Arc::new(
        StubResolver::new()
            .answer("qa", 0, Answer::Fail)
            .answer("qb", 0, Answer::Found(coords(2.0))),
    );

    let response = build_pipeline(generator, resolver).run("thing").await.unwrap();

    assert!(!response.supply_chain[0].found);
    assert_eq!(response.supply_chain[0].address, UNKNOWN_ADDRESS);
    assert_eq!(response.supply_chain[0].coordinates, None);
    assert!(response.supply_chain[1].found);
}

#[tokio::test]
async fn test_node_count_other_than_five_passes_through() {
    let nodes: Vec<(String, String, String)> = (0..7)
        .map(|i| (format!("C{i}"), format!("role {i}"), format!("q{i}")))
        .collect();
    let refs: Vec<(&str, &str, &str)> = nodes
        .iter()
        .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
        .collect();
    let generator = Arc::new(StubGenerator::returning(generated("thing", &refs)));
    let resolver = Arc::new(StubResolver::new());

    let response = build_pipeline(generator, resolver.clone()).run("thing").await.unwrap();

    assert_eq!(response.supply_chain.len(), 7);
    assert_eq!(resolver.calls(), 7);
    assert!(response.supply_chain.iter().all(|n| !n.found));
}

#[tokio::test]
async fn test_empty_generation_yields_empty_supply_chain() {
    let generator = Arc::new(StubGenerator::returning(generated("thing", &[])));
    let resolver = Arc::new(StubResolver::new());

    let response = build_pipeline(generator, resolver.clone()).run("thing").await.unwrap();

    assert_eq!(response.product, "thing");
    assert!(response.supply_chain.is_empty());
    assert_eq!(resolver.calls(), 0);
}
