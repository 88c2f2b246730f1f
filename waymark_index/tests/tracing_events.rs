// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured logging from tree maintenance.
//!
//!   cargo test -p waymark_index --features tracing --test tracing_events

use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use waymark_index::{Aabb2D, Params, RStarTree};

/// Message and fields of one captured event.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: Vec<(String, String)>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });
    tracing::subscriber::with_default(subscriber, f);
    events.lock().unwrap().clone()
}

#[test]
fn split_and_root_growth_are_logged() {
    let events = with_captured_events(|| {
        let mut tree = RStarTree::<i64, u32>::with_params(Params::with_max_children(4));
        for i in 0..5 {
            tree.insert(Aabb2D::new(i * 10, 0, i * 10 + 1, 1), 0);
        }
    });
    let split = events
        .iter()
        .find(|e| e.message == "split node")
        .expect("a split event");
    assert_eq!(split.level, tracing::Level::DEBUG);
    assert_eq!(split.field("level"), Some("0"));
    let grew = events
        .iter()
        .find(|e| e.message == "grew root")
        .expect("a root growth event");
    assert_eq!(grew.field("height"), Some("2"));
    let inserts = events.iter().filter(|e| e.message == "insert").count();
    assert_eq!(inserts, 5);
}

#[test]
fn forced_reinsertion_is_logged() {
    let events = with_captured_events(|| {
        let mut tree = RStarTree::<i64, u32>::with_params(Params::with_max_children(4));
        for i in 0..40 {
            tree.insert(Aabb2D::new(i, i % 7, i + 1, i % 7 + 1), 0);
        }
    });
    assert!(
        events
            .iter()
            .any(|e| e.message == "forced reinsertion" && e.field("count") == Some("1"))
    );
}

#[test]
fn bulk_build_is_logged() {
    let events = with_captured_events(|| {
        let tree: RStarTree<i64, usize> = (0..100_i64)
            .map(|i| (Aabb2D::<i64>::from_xywh(i, 0, 1, 1), 0))
            .collect();
        assert_eq!(tree.len(), 100);
    });
    let build = events
        .iter()
        .find(|e| e.message == "bulk build")
        .expect("a bulk build event");
    assert_eq!(build.field("entries"), Some("100"));
    assert_eq!(build.field("height"), Some("2"));
}
