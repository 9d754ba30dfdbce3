use std::sync::OnceLock;

use super::*;

fn log_sink() -> SharedLogBuffer {
    static LOG_SINK: OnceLock<SharedLogBuffer> = OnceLock::new();
    LOG_SINK
        .get_or_init(|| {
            let sink = SharedLogBuffer(Arc::new(std::sync::Mutex::new(Vec::new())));
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .without_time()
                .with_target(false)
                .with_max_level(tracing::Level::DEBUG)
                .with_writer(sink.clone())
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("global test subscriber should initialize");
            tracing::callsite::rebuild_interest_cache();
            sink
        })
        .clone()
}

fn captured(sink: &SharedLogBuffer) -> String {
    String::from_utf8(sink.0.lock().unwrap().clone()).unwrap()
}

#[test]
#[serial_test::serial]
fn test_parse_logs_each_phase() {
    let sink = log_sink();
    sink.0.lock().unwrap().clear();

    parse(FULL).unwrap();

    let logs = captured(&sink);
    for phase in ["Subconf", "Group", "Repo", "Desc", "Rule", "ProjectGroup", "Complete"] {
        assert!(logs.contains(phase), "missing phase {phase} in logs: {logs}");
    }
    assert!(logs.contains("Kind"), "kind resolution should be logged: {logs}");
    assert!(
        logs.contains("configs=2") || logs.contains("configs: 2"),
        "completion summary missing: {logs}"
    );
}

#[test]
#[serial_test::serial]
fn test_nested_parse_logs_inheritance() {
    let sink = log_sink();
    let parent = Arc::new(parse(FULL).unwrap());
    sink.0.lock().unwrap().clear();

    parse_nested("repo sub\n    RW = @admins\n", parent).unwrap();

    let logs = captured(&sink);
    assert!(logs.contains("Inherit"), "inherited group not logged: {logs}");
    assert!(logs.contains("nested=true") || logs.contains("nested: true"));
}
