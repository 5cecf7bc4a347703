use chrono::Utc;
use heist_core::{TraceEvent, TraceLog};
use heist_sim::{MatchEvent, MatchRecorder};

#[test]
fn events_append_as_parseable_jsonl() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out/events.jsonl");
    let recorder = MatchRecorder::new(&path);

    for tick in 0..3u64 {
        recorder
            .emit(&MatchEvent {
                timestamp: Utc::now(),
                tick,
                tag: "objective.pickup".to_string(),
                a: 1,
                b: 0,
                metadata: serde_json::Value::Null,
            })
            .expect("emit");
    }

    let raw = std::fs::read_to_string(&path).expect("read back");
    let events: Vec<MatchEvent> = raw
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is one event"))
        .collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2].tick, 2);
    assert_eq!(events[0].tag, "objective.pickup");
}

#[test]
fn trace_flush_preserves_tick_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("events.jsonl");
    let recorder = MatchRecorder::new(&path);

    let mut trace = TraceLog::default();
    trace.push(TraceEvent::new(5, "plan.issued").with_a(1).with_b(4));
    trace.push(TraceEvent::new(9, "role.claimed").with_a(1));
    recorder.emit_trace(&trace).expect("flush");

    let raw = std::fs::read_to_string(&path).expect("read back");
    let ticks: Vec<u64> = raw
        .lines()
        .map(|line| {
            let event: MatchEvent = serde_json::from_str(line).expect("event");
            event.tick
        })
        .collect();
    assert_eq!(ticks, vec![5, 9]);
}
