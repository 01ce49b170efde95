//! Integration tests for text widgets bound to variables and their
//! `change` action.

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use widget_actions::{
    update_text, Action, AddToSize, Command, Engine, EngineContext, TextBinding, Variable, Vec2,
    Widget,
};

/// Counts how often it runs
#[derive(Debug, Default)]
struct Counter {
    runs: Cell<u32>,
}

impl Action for Counter {
    fn execute(&self, _ctx: &mut dyn EngineContext) -> bool {
        self.runs.set(self.runs.get() + 1);
        true
    }
}

fn gold_label(counter: &Rc<Counter>) -> Engine {
    let mut engine = Engine::new();
    engine.set_variable("gold", 10);
    engine.add_widget(
        "label",
        Widget::new()
            .with_text(TextBinding::new("Gold: [1]").with_binding("gold"))
            .with_action("change", counter.clone()),
    );
    engine
}

fn text(engine: &Engine, id: &str) -> String {
    engine
        .widget(id)
        .and_then(Widget::text)
        .map(|t| t.text().to_string())
        .unwrap_or_default()
}

#[test]
fn test_change_fires_once_per_change() {
    let counter = Rc::new(Counter::default());
    let mut engine = gold_label(&counter);

    engine.update();
    assert_eq!(text(&engine, "label"), "Gold: 10");
    assert_eq!(counter.runs.get(), 1);

    engine.update();
    engine.update();
    assert_eq!(counter.runs.get(), 1);

    engine.set_variable("gold", 25);
    engine.update();
    assert_eq!(text(&engine, "label"), "Gold: 25");
    assert_eq!(counter.runs.get(), 2);

    engine.update();
    assert_eq!(counter.runs.get(), 2);
}

#[test]
fn test_hidden_text_is_not_updated() {
    let counter = Rc::new(Counter::default());
    let mut engine = gold_label(&counter);
    engine.update();

    engine.widget_mut("label").unwrap().set_visible(false);
    engine.set_variable("gold", 99);
    engine.update();
    assert_eq!(text(&engine, "label"), "Gold: 10");
    assert_eq!(counter.runs.get(), 1);

    engine.widget_mut("label").unwrap().set_visible(true);
    engine.update();
    assert_eq!(text(&engine, "label"), "Gold: 99");
    assert_eq!(counter.runs.get(), 2);
}

#[test]
fn test_initial_text_matching_binding_does_not_fire() {
    let counter = Rc::new(Counter::default());
    let mut engine = Engine::new();
    engine.set_variable("name", "Aria");
    engine.add_widget(
        "label",
        Widget::new()
            .with_text(
                TextBinding::new("")
                    .with_binding("name")
                    .with_text("Aria"),
            )
            .with_action("change", counter.clone()),
    );

    engine.update();
    assert_eq!(counter.runs.get(), 0);
}

#[test]
fn test_change_command_runs_in_same_update() {
    let mut engine = Engine::new();
    engine.set_variable("hp", 3);
    engine.add_widget("flash", Widget::new());
    let grow: Command = AddToSize {
        id: "flash".to_string(),
        offset: Vec2::new(1.0, 0.0),
    }
    .into();
    engine.add_widget(
        "hp_text",
        Widget::new()
            .with_text(TextBinding::new("[1] HP").with_binding("hp"))
            .with_action("change", Rc::new(grow)),
    );

    engine.update();
    engine.set_variable("hp", 2);
    engine.update();
    engine.update();

    assert_eq!(engine.widget("flash").unwrap().size(), Vec2::new(2.0, 0.0));
}

#[test]
fn test_multiple_bindings_and_properties() {
    let mut engine = Engine::new();
    engine.set_variable("level", 4);
    engine.add_widget("bar", Widget::new().with_size((75.0, 5.0)));
    engine.add_widget(
        "status",
        Widget::new().with_text(
            TextBinding::new("Lv [1] - [2]px").with_bindings(["level", "bar.width"]),
        ),
    );

    engine.update();
    assert_eq!(text(&engine, "status"), "Lv 4 - 75px");
    assert_eq!(
        engine.resolve(&Variable::from("status.text")),
        Some(Variable::from("Lv 4 - 75px"))
    );
}

#[test]
fn test_update_text_without_widget_or_action() {
    let mut engine = Engine::new();
    assert!(update_text(&mut engine, "nothing"));

    engine.set_variable("score", 1);
    engine.add_widget(
        "score",
        Widget::new().with_text(TextBinding::new("[1]").with_binding("score")),
    );
    assert!(update_text(&mut engine, "score"));
    assert_eq!(text(&engine, "score"), "1");
}

#[test]
fn test_unbound_text_fires_after_external_set() {
    let counter = Rc::new(Counter::default());
    let mut engine = Engine::new();
    engine.add_widget(
        "title",
        Widget::new()
            .with_text(TextBinding::new(""))
            .with_action("change", counter.clone()),
    );

    engine.update();
    assert_eq!(counter.runs.get(), 0);

    engine
        .widget_mut("title")
        .and_then(Widget::text_mut)
        .unwrap()
        .set_text("Paused");
    engine.update();
    engine.update();
    assert_eq!(counter.runs.get(), 1);
}
