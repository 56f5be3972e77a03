//! Turtle programs end to end: text to instructions, rendering and execution

use pll::pll::parsing::parse;
use pll::pll::turtle::{
    compile, compile_str, compute_bounds, Call, CompileError, Instr, MockTurtle,
    RecordingBackend, TurtleBackend, TurtleError,
};
use rstest::rstest;

fn compile_error(text: &str) -> CompileError {
    match compile_str(text) {
        Err(TurtleError::Compile(e)) => e,
        other => panic!("expected a compile error, got {other:?}"),
    }
}

#[test]
fn test_repeat_block_holds_two_primitives() {
    let program = compile_str("repeat 4\n\tmove 5\n\tturn 15").unwrap();
    assert_eq!(program.instrs().len(), 1);
    match &program.instrs()[0] {
        Instr::Repeat(4, body) => {
            assert_eq!(body, &vec![Instr::MoveForward(5.0), Instr::Turn(15.0)])
        }
        other => panic!("expected a repeat block, got {other:?}"),
    }
}

#[test]
fn test_three_consecutive_at_blocks() {
    let text = "
\tat 0, 0
\t\tmove 10
\tat 10, 0
\t\tmove 10
\tat 20, 0
\t\tmove 10
";
    let program = compile_str(text).unwrap();
    let instrs = program.instrs();
    let saves = instrs.iter().filter(|i| **i == Instr::SaveState).count();
    let restores = instrs.iter().filter(|i| **i == Instr::RestoreState).count();
    assert_eq!((saves, restores), (1, 1));
    assert_eq!(instrs.first(), Some(&Instr::SaveState));
    assert_eq!(instrs.last(), Some(&Instr::RestoreState));
    assert_eq!(program.instruction_count(), 8);
}

#[test]
fn test_at_separated_by_other_command_keeps_both_pairs() {
    let program = compile_str("at 1, 1\n\tmove 1\nturn 90\nat 2, 2\n\tmove 2").unwrap();
    let saves = program
        .instrs()
        .iter()
        .filter(|i| **i == Instr::SaveState)
        .count();
    assert_eq!(saves, 2);
}

#[rstest]
#[case::unknown("jump 10")]
#[case::unknown_nested("repeat 2\n\tfly 3")]
fn test_unknown_commands(#[case] text: &str) {
    assert!(matches!(
        compile_error(text),
        CompileError::UnknownCommand { .. }
    ));
}

#[rstest]
#[case::move_with_children("move 10\n\tturn 5")]
#[case::turn_with_children("turn 10\n\tmove 5")]
#[case::center_with_children("center\n\tmove 5")]
fn test_children_forbidden(#[case] text: &str) {
    assert!(matches!(
        compile_error(text),
        CompileError::ChildrenForbidden { .. }
    ));
}

#[rstest]
#[case::bare_at("at 5, 5")]
#[case::bare_repeat("repeat 3\nmove 1")]
fn test_children_required(#[case] text: &str) {
    assert!(matches!(
        compile_error(text),
        CompileError::ChildrenRequired { .. }
    ));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        compile_error("jump 10").to_string(),
        "Unknown command 'jump' in 'jump 10'"
    );
    assert_eq!(
        compile_error("at 5, 5").to_string(),
        "Malformed command 'at 5, 5': 'at' must have children"
    );
    assert_eq!(
        compile_error("repeat x\n\tmove 1").to_string(),
        "Malformed command 'repeat x': invalid arguments for 'repeat': unexpected 'x'"
    );
}

#[test]
fn test_recorded_calls_follow_program_order() {
    let program = compile_str("center\nat 3, 4\n\trepeat 2\n\t\tmove 1\n\t\tturn 180").unwrap();
    let mut backend = RecordingBackend::new();
    backend.reset();
    program.run(&mut backend);
    assert_eq!(
        backend.calls,
        vec![
            Call::Reset,
            Call::CenterView,
            Call::SaveState,
            Call::MoveTo(3.0, 4.0),
            Call::MoveForward(1.0),
            Call::Turn(180.0),
            Call::MoveForward(1.0),
            Call::Turn(180.0),
            Call::RestoreState,
        ]
    );
}

#[test]
fn test_rendered_program() {
    let text = "
\tat 5, 5
\t\trepeat 4
\t\t\tmove 5
\t\t\tturn 90
\tat -5, 5
\t\tmove 2.5
\tcenter
";
    let program = compile_str(text).unwrap();
    insta::assert_snapshot!(program.render_text("    "), @r###"
    save_state()
    move_to(5, 5)
    repeat 4 times:
        move_forward(5)
        turn(90)
    move_to(-5, 5)
    move_forward(2.5)
    restore_state()
    center_view()
    "###);
}

#[test]
fn test_compile_from_tagged_subtree() {
    let text = "App\n\t*program\n\t\tmove 10\n\t\tturn 90\n\t\tmove 10";
    let result = parse(text).unwrap();
    let program_node = result.tag("program").unwrap();
    let program = compile(program_node.first_child().unwrap()).unwrap();
    assert_eq!(program.instruction_count(), 3);

    let mut mock = MockTurtle::new();
    program.run(&mut mock);
    assert_eq!(mock.bounds(2).as_tuple(), (0.0, 0.0, 10.0, 10.0));
    assert_eq!(mock.heading(), 90.0);
}

#[test]
fn test_compute_bounds_for_square_at_offset() {
    let text = "
\tat 10, 20
\t\trepeat 4
\t\t\tmove 5
\t\t\tturn 90
";
    let bounds = compute_bounds(text).unwrap();
    assert_eq!(bounds.as_tuple(), (0.0, 0.0, 15.0, 25.0));
}

#[test]
fn test_compute_bounds_reports_parse_errors() {
    assert!(matches!(
        compute_bounds("move 1\n  move 2"),
        Err(TurtleError::Parse(_))
    ));
}
