//! Mutual Exclusion
//!
//! This example composes two workers sharing a `lock` variable into a
//! channel system, plus a monitor that hands out a token over a channel,
//! and checks that no reachable state has both workers critical.
//!
//! Key concepts:
//! - Channel systems over one shared environment
//! - Rendezvous between a send (`c!e`) and a receive (`c?x`)
//! - Inspecting the explored transition system
//!
//! Run with: cargo run --example mutual_exclusion

use statespace::{
    transition_system_from_channel_system, ChannelSystem, Definitions, PgTransition,
    ProgramGraph, ProgramGraphBuilder,
};

fn worker(id: i64) -> ProgramGraph<&'static str> {
    ProgramGraphBuilder::new()
        .name(format!("worker{id}"))
        .initial("idle")
        .add_transition(PgTransition::new(
            "idle",
            "lock == 0",
            format!("lock := {id}"),
            "critical",
        ))
        .add_transition(PgTransition::new("critical", "", "lock := 0", "idle"))
        .build()
        .unwrap()
}

fn main() {
    println!("=== Mutual Exclusion Example ===\n");

    let mut first = worker(1);
    first.add_initialization(["lock := 0", "token := 0", "round := 0"]);

    // The monitor hands a token to whoever takes it, one round at a time.
    let monitor = ProgramGraphBuilder::new()
        .name("monitor")
        .initial("ready")
        .add_transition(PgTransition::new("ready", "round < 2", "grant!round + 1", "sent"))
        .add_transition(PgTransition::new("sent", "", "round := round + 1", "ready"))
        .build()
        .unwrap();
    let receiver = ProgramGraphBuilder::new()
        .name("receiver")
        .initial("wait")
        .add_transition(PgTransition::new("wait", "", "grant?token", "wait"))
        .build()
        .unwrap();

    let system = ChannelSystem::new(vec![first, worker(2), monitor, receiver]);
    let ts = transition_system_from_channel_system(&system, &Definitions::parser_based()).unwrap();

    println!("States: {}", ts.state_count());
    println!("Transitions: {}", ts.transition_count());

    let mut actions: Vec<_> = ts.actions().iter().collect();
    actions.sort();
    println!("Actions: {actions:?}");

    let violations = ts
        .states()
        .filter(|s| s.locations[0] == "critical" && s.locations[1] == "critical")
        .count();
    println!("States with both workers critical: {violations}");

    println!("\n=== Example Complete ===");
}
