//! Demo components and views.

use serde::Serialize;
use serde_json::Value;
use spindle::{
    ActionArgs, ActionTable, BuildError, Component, ComponentArgs, Config, Listeners, Props,
    RenderOutput, Spindle, Vars, ViewHandle,
};

/// Counter with a public API and a protected reset reachable through an event.
#[derive(Debug, Default)]
pub struct Counter {
    count: i64,
    step: i64,
}

impl Counter {
    fn increment(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
        self.count += args.i64(0, "by").unwrap_or(self.step);
        Ok(())
    }

    fn decrement(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
        self.count -= args.i64(0, "by").unwrap_or(self.step);
        Ok(())
    }

    fn describe(&mut self, _args: &ActionArgs) -> anyhow::Result<String> {
        Ok(format!("counter at {}", self.count))
    }

    fn reset(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
        self.count = args.i64(0, "to").unwrap_or(0);
        Ok(())
    }
}

impl Component for Counter {
    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .public("increment", Counter::increment)
            .public("decrement", Counter::decrement)
            .public("describe", Counter::describe)
            .protected("reset", Counter::reset)
    }

    fn boot(&mut self, props: &Props<'_>) -> anyhow::Result<()> {
        self.count = props.variables.get("count").and_then(Value::as_i64).unwrap_or(0);
        self.step = props.variables.get("step").and_then(Value::as_i64).unwrap_or(1);
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        Ok("<button>-</button> {{ count }} <button>+</button>".into())
    }

    fn listeners(&self) -> Listeners {
        Listeners::from([("reset-requested".to_string(), "reset".to_string())])
    }

    fn public_vars(&self) -> Vars {
        let mut vars = Vars::new();
        vars.insert("count".into(), self.count.into());
        vars
    }

    fn default_public_vars(&self) -> Vars {
        let mut vars = Vars::new();
        vars.insert("count".into(), 0.into());
        vars
    }

    fn query_string(&self) -> Vec<String> {
        vec!["count".into()]
    }
}

#[derive(Debug, Clone, Serialize)]
struct Task {
    title: String,
    done: bool,
}

/// Task list rendered through a named view.
#[derive(Debug, Default)]
pub struct TaskList {
    owner: String,
    tasks: Vec<Task>,
}

impl TaskList {
    fn add(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
        let title = args
            .str(0, "title")
            .ok_or_else(|| anyhow::anyhow!("a task needs a title"))?;
        self.tasks.push(Task {
            title: title.to_string(),
            done: false,
        });
        Ok(())
    }

    fn complete(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
        let index = args
            .i64(0, "index")
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| anyhow::anyhow!("a task index is required"))?;
        let task = self
            .tasks
            .get_mut(index)
            .ok_or_else(|| anyhow::anyhow!("no task at index {index}"))?;
        task.done = true;
        Ok(())
    }
}

impl Component for TaskList {
    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .public("add", TaskList::add)
            .public("complete", TaskList::complete)
    }

    fn boot(&mut self, props: &Props<'_>) -> anyhow::Result<()> {
        if let Some(tasks) = props.variables.get("tasks").and_then(Value::as_array) {
            self.tasks = tasks
                .iter()
                .filter_map(Value::as_str)
                .map(|title| Task {
                    title: title.to_string(),
                    done: false,
                })
                .collect();
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        let view = ViewHandle::new(
            "tasks.list",
            &serde_json::json!({"owner": self.owner, "tasks": self.tasks}),
        )?;
        Ok(view.into())
    }
}

/// Greeting provided under the `demo` namespace hint.
#[derive(Debug)]
pub struct Greeting {
    name: String,
}

impl Component for Greeting {
    fn actions() -> ActionTable<Self> {
        ActionTable::new()
    }

    fn boot(&mut self, props: &Props<'_>) -> anyhow::Result<()> {
        if let Some(name) = props.attributes.get("name").and_then(Value::as_str) {
            self.name = name.to_string();
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        Ok(format!("Hello, {}!", self.name).into())
    }
}

const TASK_LIST: &str = "\
{{ owner }}'s tasks
{% for task in tasks %}[{% if task.done %}x{% else %} {% endif %}] {{ loop.index0 }}. {{ task.title }}
{% endfor %}";

/// Builds the demo application.
pub fn app(config: Config) -> Result<Spindle, BuildError> {
    Spindle::builder()
        .config(config)
        .hint("demo", "Demo::Widgets")
        .provide("App::Components::Counter", |_: &ComponentArgs| {
            Ok(Counter::default())
        })
        .provide("Demo::Tasks", |args: &ComponentArgs| {
            Ok(TaskList {
                owner: args.id.clone(),
                tasks: Vec::new(),
            })
        })
        .provide("Demo::Widgets::Greeting", |_: &ComponentArgs| {
            Ok(Greeting {
                name: "world".to_string(),
            })
        })
        .register("tasks", Some("Demo::Tasks"))
        .register("badge", None)
        .template("tasks/list", TASK_LIST)
        .template("alert", "[{{ attributes.level | default('info') }}] {{ message }}")
        .template("badge", "({{ label }})")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use spindle::{DispatchError, Invocation, Request};

    fn render(request: &Request, call: &Invocation) -> Result<String, DispatchError> {
        let app = app(Config::default()).unwrap();
        let output = app.dispatch(request, call)?;
        Ok(app.render(output)?)
    }

    #[test]
    fn test_counter_increment() {
        let request = Request::post().with("actionArgs", "2");
        let call = Invocation::new("counter", "increment").variable("count", 5);
        assert_eq!(
            render(&request, &call).unwrap(),
            "<button>-</button> 7 <button>+</button>"
        );
    }

    #[test]
    fn test_counter_reset_via_event() {
        let request = Request::post().with("eventParams", json!({"to": 3}));
        let call = Invocation::new("counter", "reset-requested").variable("count", 9);
        assert_eq!(
            render(&request, &call).unwrap(),
            "<button>-</button> 3 <button>+</button>"
        );
    }

    #[test]
    fn test_counter_reset_rejected_directly() {
        let call = Invocation::new("counter", "reset");
        assert!(matches!(
            render(&Request::post(), &call),
            Err(DispatchError::NonPublicComponentMethodCall { .. })
        ));
    }

    #[test]
    fn test_task_list_view() {
        let request = Request::post().with("actionArgs", "'write docs'");
        let call = Invocation::new("tasks", "add")
            .id("ada")
            .variable("tasks", json!(["ship"]));
        assert_eq!(
            render(&request, &call).unwrap(),
            "ada's tasks\n[ ] 0. ship\n[ ] 1. write docs\n"
        );
    }

    #[test]
    fn test_task_complete_out_of_range() {
        let request = Request::post().with("actionArgs", "4");
        let call = Invocation::new("tasks", "complete");
        assert!(matches!(
            render(&request, &call),
            Err(DispatchError::Lifecycle { .. })
        ));
    }

    #[test]
    fn test_namespaced_greeting() {
        let app = app(Config::default()).unwrap();
        let request = Request::get();
        let mut attributes = Vars::new();
        attributes.insert("name".into(), json!("Ada"));

        let mut manager = app.manager(&request, "g", "demo:greeting", false).unwrap();
        let output = manager.refresh(&Vars::new(), &attributes).unwrap();
        assert_eq!(app.render(output).unwrap(), "Hello, Ada!");
    }

    #[test]
    fn test_anonymous_alert() {
        let call = Invocation::new("alert", "").variable("message", "Saved");
        assert_eq!(render(&Request::get(), &call).unwrap(), "[info] Saved");
    }
}
