use std::fs;

use insta::assert_snapshot;
use serde_json::json;
use spindle::{
    ActionArgs, ActionTable, BuildError, Component, ComponentArgs, Config, DispatchError,
    Invocation, Listeners, RenderOutput, Request, Spindle, Vars, ViewHandle, EVENT_PARAMS_KEY,
};

#[derive(Default)]
struct Cart {
    items: Vec<String>,
}

impl Cart {
    fn add(&mut self, args: &ActionArgs) -> anyhow::Result<()> {
        let item = args
            .str(0, "item")
            .ok_or_else(|| anyhow::anyhow!("missing item"))?;
        self.items.push(item.to_string());
        Ok(())
    }

    fn clear(&mut self, _args: &ActionArgs) -> anyhow::Result<()> {
        self.items.clear();
        Ok(())
    }
}

impl Component for Cart {
    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .public("add", Cart::add)
            .protected("clear", Cart::clear)
    }

    fn boot(&mut self, props: &spindle::Props<'_>) -> anyhow::Result<()> {
        if let Some(items) = props.variables.get("items").and_then(|v| v.as_array()) {
            self.items = items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<RenderOutput> {
        Ok(ViewHandle::new("cart.summary", &json!({"items": self.items}))?.into())
    }

    fn listeners(&self) -> Listeners {
        Listeners::from([("checkout".to_string(), "clear".to_string())])
    }
}

fn app() -> Spindle {
    Spindle::builder()
        .provide("Shop::Cart", |_: &ComponentArgs| Ok(Cart::default()))
        .register("cart", Some("Shop::Cart"))
        .register_many(["notice"])
        .template("cart/summary", "{{ items | length }} item(s): {{ items | join(', ') }}")
        .template("notice", "<p class=\"{{ attributes.class }}\">{{ text }}</p>")
        .build()
        .unwrap()
}

#[test]
fn test_dispatch_renders_structured_output() {
    let app = app();
    let request = Request::post().with("actionArgs", "'pear'");
    let call = Invocation::new("cart", "add").variable("items", json!(["apple"]));

    let output = app.dispatch(&request, &call).unwrap();
    assert!(output.is_structured());
    assert_snapshot!(app.render(output).unwrap(), @"2 item(s): apple, pear");
}

#[test]
fn test_event_reaches_protected_method() {
    let app = app();
    let request = Request::post().with(EVENT_PARAMS_KEY, json!({}));
    let call = Invocation::new("cart", "checkout").variable("items", json!(["apple"]));

    let output = app.dispatch(&request, &call).unwrap();
    assert_eq!(app.render(output).unwrap(), "0 item(s): ");
}

#[test]
fn test_protected_method_rejected_directly() {
    let app = app();
    let err = app
        .dispatch(&Request::post(), &Invocation::new("cart", "clear"))
        .unwrap_err();
    assert_snapshot!(err.to_string(), @"component [Shop::Cart] method [clear] cannot be called");
}

#[test]
fn test_action_error_keeps_source() {
    let app = app();
    let err = app
        .dispatch(&Request::post(), &Invocation::new("cart", "add"))
        .unwrap_err();

    assert!(matches!(err, DispatchError::Lifecycle { .. }));
    let source = std::error::Error::source(&err).map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("missing item"));
}

#[test]
fn test_registered_anonymous_component() {
    let app = app();
    let mut attributes = Vars::new();
    attributes.insert("class".into(), json!("info"));
    let call = Invocation::new("notice", "ignored")
        .variable("text", "Saved")
        .attributes(attributes);

    let output = app.dispatch(&Request::get(), &call).unwrap();
    assert_snapshot!(app.render(output).unwrap(), @r#"<p class="info">Saved</p>"#);
}

#[test]
fn test_manager_exposes_request_state() {
    let app = app();
    let request = Request::get()
        .with("component", "notice")
        .with("id", "n-1")
        .with("page", 2);

    let manager = app.manager(&request, "n-1", "notice", false).unwrap();
    assert_eq!(manager.public_vars(), json!({"page": 2}).as_object().cloned().unwrap());
    assert_eq!(manager.query_string(), vec!["page".to_string()]);
}

#[test]
fn test_template_dir_views() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("alerts")).unwrap();
    fs::write(dir.path().join("alerts/banner.jinja"), "Banner: {{ title }}").unwrap();

    let app = Spindle::builder()
        .template_dir(dir.path())
        .unwrap()
        .build()
        .unwrap();

    let call = Invocation::new("alerts.banner", "").variable("title", "Welcome");
    let output = app.dispatch(&Request::get(), &call).unwrap();
    assert_snapshot!(app.render(output).unwrap(), @"Banner: Welcome");
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spindle.yaml");
    fs::write(
        &path,
        "namespace: \"Shop::\"\nid_key: shop-id\nhints:\n  store: \"Shop\"\n",
    )
    .unwrap();

    let app = Spindle::builder()
        .config_file(&path)
        .unwrap()
        .provide("Shop::Cart", |_: &ComponentArgs| Ok(Cart::default()))
        .build()
        .unwrap();

    assert_eq!(app.config().namespace, "Shop::");
    assert_eq!(app.config().id_key, "shop-id");

    let by_convention = app.resolver().resolve("c", "cart").unwrap();
    let by_hint = app.resolver().resolve("c", "store:cart").unwrap();
    assert_eq!(by_convention.as_dynamic().unwrap().type_path(), "Shop::Cart");
    assert_eq!(by_hint.as_dynamic().unwrap().type_path(), "Shop::Cart");
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Spindle::builder().config_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(BuildError::Config(_))));
}

#[test]
fn test_unknown_component() {
    let app = Spindle::builder()
        .config(Config::default())
        .build()
        .unwrap();
    let err = app
        .dispatch(&Request::get(), &Invocation::new("nope", "render"))
        .unwrap_err();
    assert_snapshot!(err.to_string(), @"component [nope] not found");
}
