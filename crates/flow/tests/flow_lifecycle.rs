use flow::stubs::{FixedClock, InMemoryFileStore, ScriptedPrompt};
use flow::{CalculusStep, DisplayStep, EndStep, Flow, FlowError, FlowState, NumberInputStep, OperationKind, RunIo, Step,
           StepKind, StepRef, TextInputStep, TextStep};

fn demo_flow() -> Flow {
  let mut flow = Flow::create("Demo", &FixedClock::epoch());
  flow.add_step(TextInputStep::new("name")).unwrap();
  flow.add_step(NumberInputStep::new("age")).unwrap();
  flow.add_step(EndStep).unwrap();
  flow
}

#[test]
fn demo_end_to_end() {
  let mut flow = demo_flow();
  assert_eq!(flow.state(), FlowState::Created);

  // gate, valor, gate, valor (End no pregunta)
  let mut prompt = ScriptedPrompt::new(["", "Alice", "y", "30"]);
  let files = InMemoryFileStore::new();
  let summary = flow.run(&mut RunIo::new(&mut prompt, &files)).expect("run");

  assert_eq!(flow.state(), FlowState::Completed);
  let a = flow.analytics();
  assert_eq!(a.starts, 1);
  assert_eq!(a.completions, 1);
  assert_eq!(a.total_skips(), 0);
  assert_eq!(a.total_errors, 0);
  assert_eq!(summary.executed, 3);
  assert_eq!(summary.final_result, None);

  match &flow.steps()[0] {
    Step::TextInput(s) => assert_eq!(s.value(), Some("Alice")),
    other => panic!("unexpected step {:?}", other),
  }
  match &flow.steps()[1] {
    Step::NumberInput(s) => assert_eq!(s.value(), Some(30.0)),
    other => panic!("unexpected step {:?}", other),
  }
  assert_eq!(&prompt.output()[prompt.output().len() - 2..], &["End of the flow", "Flow completed."]);
}

#[test]
fn completions_count_every_clean_run() {
  let mut flow = demo_flow();
  let files = InMemoryFileStore::new();
  for n in 1..=3u64 {
    let mut prompt = ScriptedPrompt::new(["", "Bob", "", "7"]);
    flow.run(&mut RunIo::new(&mut prompt, &files)).expect("run");
    assert_eq!(flow.analytics().completions, n);
    assert!(flow.analytics().starts >= flow.analytics().completions);
  }
}

#[test]
fn divide_by_zero_is_recorded_and_flow_completes() {
  let mut flow = Flow::create("calc", &FixedClock::epoch());
  let calc = flow.add_step(CalculusStep::parse("10 / 0", OperationKind::Divide).unwrap()).unwrap();
  flow.add_step(EndStep).unwrap();

  let mut prompt = ScriptedPrompt::new([""]);
  let files = InMemoryFileStore::new();
  let summary = flow.run(&mut RunIo::new(&mut prompt, &files)).expect("run");

  assert_eq!(flow.state(), FlowState::Completed);
  assert_eq!(flow.analytics().errors_for(StepKind::Calculus), 1);
  assert_eq!(flow.analytics().total_errors, 1);
  assert_eq!(flow.analytics().completions, 1);
  match flow.step(calc) {
    Some(Step::Calculus(c)) => assert_eq!(c.result(), Some(10.0)),
    other => panic!("unexpected step {:?}", other),
  }
  assert_eq!(summary.failures.len(), 1);
  assert!(matches!(summary.failures[0].kind, StepKind::Calculus));
  assert_eq!(summary.final_result, Some(10.0));
  assert_eq!(prompt.errors().len(), 1);
}

#[test]
fn delete_with_matching_name_resets_everything() {
  let mut flow = demo_flow();
  let files = InMemoryFileStore::new();
  let mut prompt = ScriptedPrompt::new(["n", "n"]);
  flow.run(&mut RunIo::new(&mut prompt, &files)).expect("run");
  assert_eq!(flow.analytics().total_skips(), 2);

  flow.delete("Demo").expect("delete");
  assert_eq!(flow.state(), FlowState::Deleted);
  assert_eq!(flow.steps().len(), 0);
  assert_eq!(flow.name(), None);
  assert_eq!(flow.analytics().starts, 0);
  assert_eq!(flow.analytics().completions, 0);
  assert!(flow.analytics().skips.is_empty());
  assert!(flow.analytics().errors.is_empty());

  // un flujo eliminado ya no acepta pasos ni ejecuciones
  assert!(matches!(flow.add_step(EndStep), Err(FlowError::NotFound(_))));
  let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
  assert!(matches!(flow.run(&mut RunIo::new(&mut prompt, &files)), Err(FlowError::NotFound(_))));
}

#[test]
fn delete_with_other_name_is_a_no_op() {
  let mut flow = demo_flow();
  let files = InMemoryFileStore::new();
  let mut prompt = ScriptedPrompt::new(["", "Ann", "", "1"]);
  flow.run(&mut RunIo::new(&mut prompt, &files)).expect("run");
  let before = flow.report();

  let err = flow.delete("Other").unwrap_err();
  assert!(matches!(err, FlowError::NotFound(_)));
  assert_eq!(flow.report(), before);
  assert_eq!(flow.steps().len(), 3);
}

#[test]
fn rename_only_before_first_run() {
  let mut flow = demo_flow();
  flow.rename("Renamed").expect("rename while created");
  assert_eq!(flow.name(), Some("Renamed"));

  let files = InMemoryFileStore::new();
  let mut prompt = ScriptedPrompt::new(["", "x", "", "2"]);
  flow.run(&mut RunIo::new(&mut prompt, &files)).expect("run");
  assert!(matches!(flow.rename("Again"), Err(FlowError::Config(_))));
  assert!(flow.delete("Renamed").is_ok());
}

#[test]
fn references_are_validated_when_added() {
  let mut flow = Flow::create("refs", &FixedClock::epoch());
  let text = flow.add_step(TextStep::new("t", "c")).unwrap();
  let name = flow.add_step(TextInputStep::new("name")).unwrap();

  // referencia a sí mismo o a un paso posterior
  let err = flow.add_step(DisplayStep::new(StepRef(2))).unwrap_err();
  assert!(matches!(err, FlowError::Config(_)));
  // TextStep no captura nada
  let err = flow.add_step(DisplayStep::new(text)).unwrap_err();
  assert!(matches!(err, FlowError::Config(_)));
  // un texto no es un operando numérico
  let err = flow.add_step(CalculusStep::parse("#2 + 1", OperationKind::Add).unwrap()).unwrap_err();
  assert!(matches!(err, FlowError::Config(_)));

  assert_eq!(flow.steps().len(), 2);
  assert!(flow.add_step(DisplayStep::new(name)).is_ok());
}

#[test]
fn calculus_needs_two_operands_before_it_reaches_the_flow() {
  let err = CalculusStep::parse("42", OperationKind::Add).unwrap_err();
  assert!(matches!(err, FlowError::Config(_)));
}

#[test]
fn report_serializes_and_prints_not_applicable() {
  let flow = demo_flow();
  let report = flow.report();
  assert_eq!(report.average_errors_per_completion, None);
  let text = report.to_string();
  assert!(text.contains("Average errors per completion: not applicable"));
  assert!(text.contains("Flow: Demo"));

  let json = serde_json::to_value(&report).expect("json");
  assert_eq!(json["state"], "created");
  assert_eq!(json["step_count"], 3);
  assert!(json["average_errors_per_completion"].is_null());
}
