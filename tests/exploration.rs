//! End-to-end exploration scenarios.

use statespace::enumerate::ProgramGraphStateEnumerator;
use statespace::eval::EvalError;
use statespace::graph::{PgTransitionBuilder, ProgramGraph};
use statespace::{
    transition_system_from_channel_system, transition_system_from_program_graph, ChannelSystem,
    Definitions, Environment, ExplorationOutcome, ExploreConfig, ExploreError, PgTransition,
    ProgramGraphBuilder, ProgramState, TransitionSystemBuilder, Value,
};
use std::collections::{BTreeSet, HashSet};

fn single(
    from: &'static str,
    action: &str,
    to: &'static str,
    initialization: &[&str],
) -> ProgramGraph<&'static str> {
    let mut builder = ProgramGraphBuilder::new()
        .initial(from)
        .add_transition(PgTransition::new(from, "", action, to));
    if !initialization.is_empty() {
        builder = builder.initialization(initialization.iter().copied());
    }
    builder.build().unwrap()
}

#[test]
fn bounded_counter_stops_after_five_steps() {
    let graph = ProgramGraphBuilder::new()
        .initial("s")
        .initialization(["x := 0"])
        .transition(
            PgTransitionBuilder::new()
                .from("s")
                .to("s")
                .when("true")
                .action("x := x + 1"),
        )
        .unwrap()
        .build()
        .unwrap();
    let defs = Definitions::parser_based();
    let enumerator = ProgramGraphStateEnumerator::new(&graph, &defs);

    let exploration = TransitionSystemBuilder::new(ExploreConfig::unbounded().with_max_depth(5))
        .explore(&enumerator)
        .unwrap();
    let ts = &exploration.system;

    assert_eq!(exploration.outcome, ExplorationOutcome::DepthLimit);
    assert_eq!(ts.state_count(), 6);
    assert_eq!(ts.transition_count(), 5);

    let values: BTreeSet<i64> = ts
        .states()
        .filter_map(|s| s.env.get("x").and_then(Value::as_int))
        .collect();
    assert_eq!(values, (0..=5).collect());
}

#[test]
fn finite_counter_reaches_fixed_point() {
    let graph = ProgramGraphBuilder::new()
        .initial("loop")
        .initialization(["x := 0"])
        .add_transition(PgTransition::new("loop", "x < 3", "x := x + 1", "loop"))
        .add_transition(PgTransition::new("loop", "x == 3", "x := 0", "loop"))
        .build()
        .unwrap();
    let defs = Definitions::parser_based();
    let enumerator = ProgramGraphStateEnumerator::new(&graph, &defs);

    let exploration = TransitionSystemBuilder::default().explore(&enumerator).unwrap();

    assert!(exploration.outcome.is_complete());
    assert_eq!(exploration.system.state_count(), 4);
    assert_eq!(exploration.system.transition_count(), 4);
    assert_eq!(exploration.system.actions().len(), 2);
}

#[test]
fn rendezvous_produces_one_joint_transition() {
    let system = ChannelSystem::new(vec![
        single("a0", "ch!1", "a1", &["v := 0"]),
        single("b0", "ch?v", "b1", &[]),
    ]);
    let defs = Definitions::parser_based();

    let ts = transition_system_from_channel_system(&system, &defs).unwrap();

    assert_eq!(ts.initial_ids().len(), 1);
    assert_eq!(ts.state_count(), 2);
    assert_eq!(ts.transition_count(), 1);
    assert_eq!(
        ts.actions().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["ch!1|ch?v"]
    );

    let transition = ts.transitions().next().unwrap();
    assert_eq!(transition.from.locations, vec!["a0", "b0"]);
    assert_eq!(transition.to.locations, vec!["a1", "b1"]);
    assert_eq!(transition.to.env.get("v"), Some(&Value::Int(1)));
}

#[test]
fn false_guard_blocks_rendezvous() {
    let sender = ProgramGraphBuilder::new()
        .initial("a0")
        .initialization(["v := 0", "open := false"])
        .add_transition(PgTransition::new("a0", "open", "ch!1", "a1"))
        .build()
        .unwrap();
    let system = ChannelSystem::new(vec![sender, single("b0", "ch?v", "b1", &[])]);

    let ts = transition_system_from_channel_system(&system, &Definitions::parser_based()).unwrap();

    assert_eq!(ts.state_count(), 1);
    assert_eq!(ts.transition_count(), 0);
}

#[test]
fn producer_serves_consumers_in_either_order() {
    let producer = ProgramGraphBuilder::new()
        .initial("p0")
        .initialization(["a := 0", "b := 0"])
        .add_transition(PgTransition::new("p0", "", "ch!1", "p1"))
        .add_transition(PgTransition::new("p1", "", "ch!2", "p2"))
        .build()
        .unwrap();
    let system = ChannelSystem::new(vec![
        producer,
        single("c0", "ch?a", "c1", &[]),
        single("d0", "ch?b", "d1", &[]),
    ]);

    let ts = transition_system_from_channel_system(&system, &Definitions::parser_based()).unwrap();

    assert_eq!(ts.state_count(), 5);
    assert_eq!(ts.transition_count(), 4);

    let finals: HashSet<(i64, i64)> = ts
        .states()
        .filter(|s| s.locations == ["p2", "c1", "d1"])
        .map(|s| {
            (
                s.env.get("a").and_then(Value::as_int).unwrap(),
                s.env.get("b").and_then(Value::as_int).unwrap(),
            )
        })
        .collect();
    assert_eq!(finals, HashSet::from([(1, 2), (2, 1)]));
}

#[test]
fn shared_lock_gives_mutual_exclusion() {
    let worker = |id: i64| {
        ProgramGraphBuilder::new()
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
    };
    let mut first = worker(1);
    first.add_initialization(["lock := 0"]);
    let system = ChannelSystem::new(vec![first, worker(2)]);

    let ts = transition_system_from_channel_system(&system, &Definitions::parser_based()).unwrap();

    assert_eq!(ts.state_count(), 3);
    assert_eq!(ts.transition_count(), 4);
    assert!(ts
        .states()
        .all(|s| s.locations != ["critical", "critical"]));
}

#[test]
fn interleaving_forms_a_diamond() {
    let system = ChannelSystem::new(vec![
        single("a0", "x := x + 1", "a1", &["x := 0", "y := 0"]),
        single("b0", "y := y + 1", "b1", &[]),
    ]);

    let ts = transition_system_from_channel_system(&system, &Definitions::parser_based()).unwrap();

    assert_eq!(ts.state_count(), 4);
    assert_eq!(ts.transition_count(), 4);
}

#[test]
fn labels_are_environment_bindings() {
    let graph = ProgramGraphBuilder::new()
        .initial("s")
        .initialization(["x := 0", "done := false"])
        .add_transition(PgTransition::new("s", "!done", "x := x + 2; done := true", "t"))
        .build()
        .unwrap();

    let ts = transition_system_from_program_graph(&graph, &Definitions::parser_based()).unwrap();

    assert_eq!(ts.state_count(), 2);
    for state in ts.states() {
        let expected: HashSet<String> = state.env.propositions().into_iter().collect();
        assert_eq!(ts.labels_of(state), Some(&expected));
    }

    let end = ProgramState {
        location: "t",
        env: Environment::new().with("x", 2).with("done", true),
    };
    assert!(ts.contains_state(&end));
    assert!(ts.atomic_propositions().contains("done = true"));
}

#[test]
fn unrecognized_action_is_reported() {
    let graph = single("s", "x := := 1", "s", &[]);

    let result = transition_system_from_program_graph(&graph, &Definitions::parser_based());
    assert!(matches!(
        result,
        Err(ExploreError::Eval(EvalError::UnrecognizedAction { .. }))
    ));
}

#[test]
fn states_round_trip_through_json() {
    let state = ProgramState {
        location: "loop".to_string(),
        env: Environment::new().with("x", 3).with("ok", true),
    };

    let json = serde_json::to_string(&state).unwrap();
    assert_eq!(json, r#"{"location":"loop","env":{"ok":true,"x":3}}"#);

    let back: ProgramState<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}
