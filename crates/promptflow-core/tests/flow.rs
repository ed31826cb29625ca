use promptflow_core::{
    parse_keys, FlowBuilder, FlowDefinition, FlowExecutor, FlowStatus, Key, ScriptedTerminal,
};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn wizard() -> FlowDefinition {
    FlowBuilder::new()
        .with_text_input("field1")
        .name("Field1")
        .default_value("defaultField1Value")
        .and()
        .with_text_input("field2")
        .name("Field2")
        .and()
        .with_path_input("path1")
        .name("Path1")
        .and()
        .with_single_selector("single1")
        .name("Single1")
        .select_items([("key1", "value1"), ("key2", "value2")])
        .and()
        .with_multi_selector("multi1")
        .name("Multi1")
        .select_items([("key1", "value1"), ("key2", "value2"), ("key3", "value3")])
        .and()
        .build()
        .unwrap()
}

#[test]
fn test_full_flow_on_worker_thread() {
    let flow = wizard();
    let (feeder, mut terminal) = ScriptedTerminal::channel();
    let (done_tx, done_rx) = mpsc::channel();

    let worker = thread::spawn(move || {
        let result = FlowExecutor::new(&mut terminal).run(&flow);
        let _ = done_tx.send(());
        (result, terminal)
    });

    // field1
    feeder.send(Key::Enter);
    // field2
    feeder.type_text("Field2Value");
    feeder.send(Key::Enter);
    // path1
    feeder.type_text("fakedir");
    feeder.send(Key::Enter);
    // single1
    feeder.send(Key::Enter);
    // multi1
    feeder.send_all([Key::Down, Key::Char(' '), Key::Enter]);

    done_rx
        .recv_timeout(Duration::from_secs(4))
        .expect("flow did not finish");
    let (result, terminal) = worker.join().unwrap();
    let result = result.unwrap();

    assert_eq!(result.status(), FlowStatus::Completed);
    let field1: String = result.get("field1").unwrap();
    let field2: String = result.get("field2").unwrap();
    let path1: PathBuf = result.get("path1").unwrap();
    let single1: String = result.get("single1").unwrap();
    let multi1: Vec<String> = result.get("multi1").unwrap();
    assert_eq!(field1, "defaultField1Value");
    assert_eq!(field2, "Field2Value");
    assert!(path1.to_string_lossy().contains("fakedir"));
    assert_eq!(single1, "value1");
    assert_eq!(multi1, vec!["value2"]);

    assert!(terminal.output().contains("Field1 defaultField1Value"));
    let ids: Vec<&str> = result.context().iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["field1", "field2", "path1", "single1", "multi1"]);
}

#[test]
fn test_full_flow_from_key_script() {
    let keys = parse_keys("enter, type:V2, enter, type:dir1, enter, enter, down, space, enter")
        .unwrap();
    let mut terminal = ScriptedTerminal::from_keys(keys);
    let result = wizard().run(&mut terminal).unwrap();

    assert!(result.is_completed());
    assert_eq!(result.context().text("field2").unwrap(), "V2");
    assert!(result
        .context()
        .path("path1")
        .unwrap()
        .to_string_lossy()
        .contains("dir1"));
    assert_eq!(result.context().selected("single1").unwrap(), "value1");
    assert_eq!(result.context().selections("multi1").unwrap(), ["value2"]);
}

#[test]
fn test_abort_in_middle_step() {
    let flow = FlowBuilder::new()
        .with_text_input("a")
        .default_value("A")
        .and()
        .with_text_input("b")
        .and()
        .with_text_input("c")
        .and()
        .build()
        .unwrap();

    let mut terminal = ScriptedTerminal::from_keys([
        Key::Enter,
        Key::Char('x'),
        Key::Interrupt,
        Key::Enter,
    ]);
    let result = flow.run(&mut terminal).unwrap();

    assert_eq!(result.status(), FlowStatus::Aborted);
    assert_eq!(result.context().text("a").unwrap(), "A");
    assert!(result.get::<String>("b").is_err());
    assert!(result.get::<String>("c").is_err());
}

#[tokio::test]
async fn test_flow_on_blocking_task() {
    let flow = wizard();
    let keys = parse_keys("type:x, enter, enter, enter, down, enter, enter").unwrap();

    let handle = tokio::task::spawn_blocking(move || {
        let mut terminal = ScriptedTerminal::from_keys(keys);
        flow.run(&mut terminal)
    });

    let result = handle.await.unwrap().unwrap();
    assert!(result.is_completed());
    assert_eq!(result.context().text("field1").unwrap(), "x");
    assert_eq!(result.context().text("field2").unwrap(), "");
    assert_eq!(result.context().selected("single1").unwrap(), "value2");
    assert!(result.context().selections("multi1").unwrap().is_empty());
}
