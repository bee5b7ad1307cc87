//! Shared fixtures for dispatch tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use spindle_dispatch::{
    ActionArgs, ActionTable, Component, ComponentArgs, Config, Container, Listeners, Props,
    Registry, Resolver, Vars,
};
use spindle_render::{RenderOutput, TemplateViews, ViewHandle};

/// A counter with actions of every visibility and a listener map.
#[derive(Debug, Default)]
pub struct Counter {
    pub count: i64,
    pub spinning: bool,
    pub last_event: Option<ActionArgs>,
}

impl Counter {
    fn increment(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
        self.count += args.i64(0, "by").unwrap_or(1);
        Ok(())
    }

    fn on_saved(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
        if let Some(count) = args.i64(0, "count") {
            self.count = count;
        }
        self.last_event = Some(args.clone());
        Ok(())
    }
}

impl Component for Counter {
    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .public("increment", Counter::increment)
            .public("label", |c: &mut Counter, _: &ActionArgs| {
                Ok::<_, anyhow::Error>(format!("count is {}", c.count))
            })
            .public("total", |c: &mut Counter, _: &ActionArgs| {
                Ok::<_, anyhow::Error>(c.count)
            })
            .public("fail", |_: &mut Counter, _: &ActionArgs| {
                Err::<(), _>(anyhow::anyhow!("counter overflow"))
            })
            .protected("on_saved", Counter::on_saved)
            .protected("reset", |c: &mut Counter, _: &ActionArgs| {
                c.count = 0;
                Ok::<_, anyhow::Error>(())
            })
            .private("secret", |_: &mut Counter, _: &ActionArgs| {
                Ok::<_, anyhow::Error>(())
            })
    }

    fn boot(&mut self, props: &Props<'_>) -> anyhow::Result<()> {
        if let Some(count) = props.variables.get("count").and_then(Value::as_i64) {
            self.count = count;
        }
        self.spinning = props.spinning;
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        Ok("Count: {{ count }}{% if spinning %} (spinning){% endif %}".into())
    }

    fn listeners(&self) -> Listeners {
        [
            ("saved", "on_saved"),
            ("cleared", "reset"),
            ("rerender", "render"),
            ("ghost", "missing"),
            ("blank", ""),
        ]
        .into_iter()
        .map(|(event, method)| (event.to_string(), method.to_string()))
        .collect()
    }

    fn public_vars(&self) -> Vars {
        let mut vars = Vars::new();
        vars.insert("count".into(), self.count.into());
        vars.insert("spinning".into(), self.spinning.into());
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

/// Renders a view handle instead of a template string.
pub struct ProfileEdit {
    pub user: String,
}

impl Component for ProfileEdit {
    fn actions() -> ActionTable<Self> {
        ActionTable::new().public("rename", |p: &mut ProfileEdit, args: &ActionArgs| {
            p.user = args.str(0, "name").unwrap_or_default().to_string();
            Ok::<_, anyhow::Error>(())
        })
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        Ok(ViewHandle::new("profile.card", &json!({"user": self.user}))?.into())
    }
}

/// Renders nothing.
pub struct Silent;

impl Component for Silent {
    fn actions() -> ActionTable<Self> {
        ActionTable::new().public("ping", |_: &mut Silent, _: &ActionArgs| {
            Ok::<_, anyhow::Error>(())
        })
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        Ok(RenderOutput::Empty)
    }
}

/// Fails in `mount`.
pub struct Unmountable;

impl Component for Unmountable {
    fn actions() -> ActionTable<Self> {
        ActionTable::new().public("go", |_: &mut Unmountable, _: &ActionArgs| {
            Ok::<_, anyhow::Error>(())
        })
    }

    fn mount(&mut self) -> anyhow::Result<()> {
        anyhow::bail!("no session")
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        Ok(RenderOutput::Empty)
    }
}

/// Everything a resolver borrows.
pub struct Fixture {
    pub config: Config,
    pub container: Container,
    pub registry: Registry,
    pub views: TemplateViews,
}

impl Fixture {
    pub fn new() -> Self {
        let config = Config::default()
            .with_hint("admin", "Admin::Ui")
            .with_hint("flaky", "App::Flaky");

        let mut container = Container::new();
        container
            .provide("App::Components::Counter", |_: &ComponentArgs| {
                Ok(Counter::default())
            })
            .provide("App::Widgets::Tally", |_: &ComponentArgs| Ok(Counter::default()))
            .provide("App::Components::User::Profile::Edit", |args: &ComponentArgs| {
                Ok(ProfileEdit {
                    user: args.id.clone(),
                })
            })
            .provide("App::Components::Silent", |_: &ComponentArgs| Ok(Silent))
            .provide("App::Components::Unmountable", |_: &ComponentArgs| {
                Ok(Unmountable)
            })
            .provide("Admin::Ui::Users::Table", |_: &ComponentArgs| Ok(Silent))
            .provide("App::Flaky::Widget", |_: &ComponentArgs| {
                Err::<Silent, _>(anyhow::anyhow!("dependency missing"))
            })
            .provide("App::Components::Flaky", |_: &ComponentArgs| {
                Err::<Silent, _>(anyhow::anyhow!("dependency missing"))
            });

        let mut views = TemplateViews::new();
        views.add_inline("counter", "anonymous counter view");
        views.add_inline("alert", "[{{ attributes.type }}] {{ message }}");
        views.add_inline("profile/card", "Profile of {{ user }}");
        views.add_inline("flaky:widget", "flaky fallback view");
        views.add_inline("flaky", "flaky view");
        views.add_inline("banner", "Banner {{ title }}");

        Self {
            config,
            container,
            registry: Registry::new(),
            views,
        }
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.config, &self.registry, &self.container, &self.views)
    }
}

pub fn vars(value: Value) -> Vars {
    value.as_object().cloned().unwrap_or_default()
}
