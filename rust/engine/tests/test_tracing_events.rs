use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

use suited_engine::game::Blinds;
use suited_engine::player::PlayerAction;
use suited_engine::table::{Table, TableConfig};

#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    entries: Arc<Mutex<Vec<Captured>>>,
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.entries.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

fn capture(f: impl FnOnce()) -> Vec<Captured> {
    let layer = CaptureLayer::default();
    let entries = Arc::clone(&layer.entries);
    let subscriber = Registry::default().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = entries.lock().unwrap().clone();
    captured
}

#[test]
fn hand_lifecycle_emits_structured_events() {
    let events = capture(|| {
        let mut table = Table::new("evt", TableConfig::new(Blinds::new(5, 10)).with_seed(1)).unwrap();
        table.seat_player("a", 100).unwrap();
        table.seat_player("b", 100).unwrap();
        table.start_hand().unwrap();
        table.act("a", PlayerAction::Fold).unwrap();
    });

    let started = events
        .iter()
        .find(|e| e.message == "hand started")
        .expect("hand start event");
    assert_eq!(started.level, Level::INFO);
    assert!(started.fields.iter().any(|(k, v)| k == "players" && v == "2"));

    assert!(events
        .iter()
        .any(|e| e.level == Level::DEBUG && e.message == "action applied"));
    assert!(events
        .iter()
        .any(|e| e.level == Level::INFO && e.message == "hand settled uncontested"));
}

#[test]
fn rejected_actions_are_warned() {
    let events = capture(|| {
        let mut table = Table::new("warn", TableConfig::new(Blinds::new(5, 10))).unwrap();
        for p in ["a", "b", "c"] {
            table.seat_player(p, 100).unwrap();
        }
        table.start_hand().unwrap();
        assert!(table.act("c", PlayerAction::Check).is_err());
    });

    let warning = events
        .iter()
        .find(|e| e.level == Level::WARN)
        .expect("warning for rejected action");
    assert_eq!(warning.message, "action rejected");
    assert!(warning
        .fields
        .iter()
        .any(|(k, v)| k == "player_id" && v.contains('c')));
}
