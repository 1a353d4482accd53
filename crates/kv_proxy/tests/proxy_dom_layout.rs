mod support;

use std::collections::BTreeSet;

use futures::executor::block_on;
use kv_proxy::{LocalKeyValueProxy, Operation, ProxyConfig, Record};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use support::{user_schema, users_proxy, DomLayoutBackend};

fn read_names(proxy: &LocalKeyValueProxy<DomLayoutBackend>) -> BTreeSet<String> {
    let read = block_on(proxy.read(Operation::read_all(), |_| {})).expect("read all");
    assert!(read.was_successful());
    read.result_set()
        .expect("result set")
        .records()
        .iter()
        .filter_map(|record| record.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn create(proxy: &LocalKeyValueProxy<DomLayoutBackend>, records: Vec<Record>) -> Vec<Record> {
    let created = block_on(proxy.create(Operation::create(records), |_| {})).expect("create");
    assert!(created.was_successful());
    created.into_records()
}

#[test]
fn bob_and_carl_scenario_runs_on_the_browser_layout() {
    let backend = DomLayoutBackend::default();
    let proxy = users_proxy(backend.clone());
    let schema = user_schema();

    let bob = create(&proxy, vec![schema.record_with([("name", json!("Bob"))])]);
    assert!(bob[0].id().is_some());
    assert_eq!(read_names(&proxy), BTreeSet::from(["Bob".to_string()]));

    let carl = create(&proxy, vec![schema.record_with([("name", json!("Carl"))])]);
    assert_eq!(
        read_names(&proxy),
        BTreeSet::from(["Bob".to_string(), "Carl".to_string()])
    );

    let mut renamed = bob;
    renamed[0].set("name", "newName");
    let updated =
        block_on(proxy.update(Operation::update(renamed.clone()), |_| {})).expect("update");
    assert!(updated.was_successful());
    assert_eq!(
        read_names(&proxy),
        BTreeSet::from(["Carl".to_string(), "newName".to_string()])
    );

    let everyone = renamed.into_iter().chain(carl).collect();
    let destroyed =
        block_on(proxy.destroy(Operation::destroy(everyone), |_| {})).expect("destroy");
    assert!(destroyed.was_successful());
    assert!(read_names(&proxy).is_empty());

    block_on(proxy.clear()).expect("clear");
    assert!(backend.items.keys().is_empty());
}

#[test]
fn caller_chosen_ids_survive_the_browser_layout() {
    let proxy = users_proxy(DomLayoutBackend::default());
    let schema = user_schema();

    create(
        &proxy,
        ["index", "_index_", "item", "a.b"]
            .into_iter()
            .map(|key| schema.record_with([("key", json!(key)), ("name", json!(key))]))
            .collect(),
    );

    for key in ["index", "_index_", "item", "a.b"] {
        let read = block_on(proxy.read(Operation::read_one(key), |_| {})).expect("read");
        assert!(read.was_successful());
        let result = read.result_set().expect("result set");
        assert_eq!(result.total(), 1);
        assert_eq!(result.records()[0].id(), Some(key));
        assert_eq!(result.records()[0].get("name"), Some(&json!(key)));
    }
    assert_eq!(read_names(&proxy).len(), 4);
}

#[test]
fn dotted_proxy_ids_stay_isolated() {
    let backend = DomLayoutBackend::default();
    let schema = user_schema();
    let outer = LocalKeyValueProxy::new(&ProxyConfig::new("a"), schema.clone(), backend.clone())
        .expect("construct proxy");
    let inner = LocalKeyValueProxy::new(&ProxyConfig::new("a.b"), schema.clone(), backend)
        .expect("construct proxy");

    create(
        &inner,
        vec![schema.record_with([("key", json!("c")), ("name", json!("in a.b"))])],
    );
    create(
        &outer,
        vec![schema.record_with([("key", json!("b.c")), ("name", json!("in a"))])],
    );

    assert_eq!(read_names(&outer), BTreeSet::from(["in a".to_string()]));
    assert_eq!(read_names(&inner), BTreeSet::from(["in a.b".to_string()]));

    block_on(outer.clear()).expect("clear");
    assert!(read_names(&outer).is_empty());
    assert_eq!(read_names(&inner), BTreeSet::from(["in a.b".to_string()]));
}
