use repeatquill::config::Config;
use repeatquill::file::script::parse_script;
use repeatquill::host::ScriptRunner;

fn run(script: &str) -> Vec<String> {
    let lines = parse_script(script).unwrap();
    let mut runner = ScriptRunner::new(Config::default());
    runner.run(&lines).to_vec()
}

fn repeats(transcript: &[String]) -> Vec<&str> {
    transcript
        .iter()
        .filter(|line| line.starts_with("repeat "))
        .map(String::as_str)
        .collect()
}

#[test]
fn test_operator_pending_registration() {
    let transcript = run("
        open 1
        edit 1 4
        register 1 X 2
        edit 1
        event 1 cursor-moved
        repeat 1
    ");
    assert_eq!(repeats(&transcript), vec!["repeat #1 -> replay 2X"]);
}

#[test]
fn test_invalidate_then_repeat_with_count() {
    let transcript = run("
        open 1
        register 1 Y
        invalidate 1
        repeat 1 3
    ");
    assert_eq!(repeats(&transcript), vec!["repeat #1 -> native 3."]);
}

#[test]
fn test_explicit_register_beats_association() {
    let transcript = run("
        open 1
        register 1 Y
        associate 1 Y b
        repeat 1 0 a
        repeat 1
    ");
    assert_eq!(
        repeats(&transcript),
        vec!["repeat #1 -> replay \"aY", "repeat #1 -> replay \"bY"]
    );
}

#[test]
fn test_undo_redo_transcript() {
    let transcript = run("
        open 1
        register 1 X
        undo 1
        redo 1 2
        repeat 1
    ");
    assert!(transcript.contains(&"undo #1 -> r2 (was synced: true)".to_string()));
    assert!(transcript.contains(&"redo #1 -> r3 (was synced: true)".to_string()));
    assert_eq!(repeats(&transcript), vec!["repeat #1 -> replay X"]);
}

#[test]
fn test_typed_input_stays_behind_replay() {
    let transcript = run("
        open 1
        register 1 X 2
        type jj
        repeat 1 0 a
    ");
    assert_eq!(transcript.last().unwrap(), "pending: \"a2Xjj");
}

#[test]
fn test_flush_clears_pending() {
    let transcript = run("
        open 1
        repeat 1
        flush
    ");
    assert!(transcript.contains(&"flush .".to_string()));
    assert_eq!(transcript.last().unwrap(), "pending: ");
}

#[test]
fn test_expression_register_in_script() {
    let transcript = run("
        open 1
        register 1 p
        associate 1 p =
        expr 6 * 7
        repeat 1
    ");
    assert_eq!(repeats(&transcript), vec!["repeat #1 -> replay \"=6 * 7<CR>p"]);
}

#[test]
fn test_reject_and_accept() {
    let transcript = run("
        open 1
        reject busy
        repeat 1
        accept
        repeat 1
    ");
    let repeats = repeats(&transcript);
    assert!(repeats[0].contains("error"));
    assert_eq!(repeats[1], "repeat #1 -> native .");
}
