//! Bounded Counter
//!
//! This example explores a one-location program graph whose only
//! transition increments `x` forever, and stops it with a depth limit.
//!
//! Key concepts:
//! - Building a program graph with the fluent builder
//! - Bounding an infinite state space with `ExploreConfig`
//! - Reading states, transitions and labels back from the result
//!
//! Run with: cargo run --example bounded_counter

use statespace::enumerate::ProgramGraphStateEnumerator;
use statespace::{
    Definitions, ExploreConfig, PgTransition, ProgramGraphBuilder, TransitionSystemBuilder,
};

fn main() {
    println!("=== Bounded Counter Example ===\n");

    let graph = ProgramGraphBuilder::new()
        .name("counter")
        .initial("loop")
        .initialization(["x := 0"])
        .add_transition(PgTransition::new("loop", "", "x := x + 1", "loop"))
        .build()
        .unwrap();

    let defs = Definitions::parser_based();
    let enumerator = ProgramGraphStateEnumerator::new(&graph, &defs);

    // Without a bound this exploration never terminates.
    let exploration = TransitionSystemBuilder::new(ExploreConfig::unbounded().with_max_depth(5))
        .explore(&enumerator)
        .unwrap();
    let ts = &exploration.system;

    println!("Outcome: {}", exploration.outcome);
    println!("Depth reached: {}", exploration.depth);
    println!("States: {}", ts.state_count());
    println!("Transitions: {}\n", ts.transition_count());

    for (id, state) in ts.iter() {
        let mut labels: Vec<_> = ts.labels_by_id(id).into_iter().flatten().collect();
        labels.sort();
        println!("  #{} {} labels={:?}", id.index(), state, labels);
    }

    println!("\n=== Example Complete ===");
}
