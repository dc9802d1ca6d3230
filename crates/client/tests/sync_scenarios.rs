use std::sync::Arc;
use std::time::Duration;

use rulesync_client::{MemoryStore, RuleSyncClient, WorkerPool};
use rulesync_common::entity::{AuthorityRuleEntity, FlowRuleEntity, ParamFlowRuleEntity};
use rulesync_common::rules::{
    AuthorityRule, DegradeRule, FlowRule, GatewayFlowRule, ParamFlowItem, ParamFlowRule,
    SystemRule, AUTHORITY_BLACK,
};
use rulesync_common::GROUP_ID;

const IP: &str = "10.0.0.7";
const PORT: u16 = 8719;

fn client_with(store: &MemoryStore) -> RuleSyncClient {
    RuleSyncClient::new(Arc::new(store.clone()), WorkerPool::new(4).unwrap())
}

#[test]
fn fetch_flow_rules_maps_to_entities() {
    let store = MemoryStore::new();
    store.put(
        "order-svc.sentinel.rule.flow",
        "SENTINEL_GROUP",
        r#"[{"resource":"getOrder","count":100}]"#,
    );
    let client = client_with(&store);

    let rules = client.fetch_flow_rules("order-svc", IP, PORT).expect("rules present");

    assert_eq!(rules.len(), 1);
    let entity: &FlowRuleEntity = &rules[0];
    assert_eq!(entity.rule.resource, "getOrder");
    assert_eq!(entity.rule.count, 100.0);
    assert_eq!(entity.app, "order-svc");
    assert_eq!(entity.ip, IP);
    assert_eq!(entity.port, PORT);
}

#[test]
fn publish_authority_rules_strips_decoration() {
    let store = MemoryStore::new();
    let client = client_with(&store);

    let rules: Vec<AuthorityRuleEntity> = ["getOrder", "cancelOrder"]
        .into_iter()
        .map(|resource| {
            AuthorityRuleEntity::from_rule(
                "order-svc",
                IP,
                PORT,
                AuthorityRule {
                    resource: resource.into(),
                    limit_app: "crawler".into(),
                    strategy: AUTHORITY_BLACK,
                },
            )
        })
        .collect();

    assert!(client.set_authority_rules("order-svc", IP, PORT, Some(rules)));
    assert_eq!(store.publish_count(), 1);

    let stored = store
        .content("order-svc.sentinel.rule.authority", GROUP_ID)
        .expect("published");
    let payload: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
    assert_eq!(payload.len(), 2);
    assert_eq!(payload[0]["resource"], "getOrder");
    assert_eq!(payload[1]["resource"], "cancelOrder");
    for record in &payload {
        assert!(record.get("app").is_none());
        assert!(record.get("ip").is_none());
        assert!(record.get("port").is_none());
    }
}

#[test]
fn store_failure_never_escapes() {
    let store = MemoryStore::new();
    store.set_unavailable(true);
    let client = client_with(&store);

    assert!(client.fetch_flow_rules("order-svc", IP, PORT).is_none());
    assert!(client.fetch_gateway_flow_rules("order-svc", IP, PORT).wait().is_err());
    assert!(client.fetch_param_flow_rules("order-svc", IP, PORT).wait().is_err());
    assert!(!client.set_system_rules(
        "order-svc",
        IP,
        PORT,
        Some(vec![rulesync_common::RuleEntity::from_rule("order-svc", IP, PORT, SystemRule::default())]),
    ));
}

#[test]
fn blank_service_name_is_rejected_without_store_calls() {
    let store = MemoryStore::new();
    let client = client_with(&store);

    assert!(client.fetch_flow_rules("", IP, PORT).is_none());
    assert!(client.fetch_degrade_rules("order-svc", "", PORT).is_none());
    let err = client.fetch_param_flow_rules("order-svc", IP, 0).wait().unwrap_err();
    assert!(err.is_invalid_argument());
    let err = client
        .set_flow_rules_async("", IP, PORT, Some(Vec::new()))
        .wait()
        .unwrap_err();
    assert!(err.is_invalid_argument());

    assert_eq!(store.get_count(), 0);
    assert_eq!(store.publish_count(), 0);
}

#[test]
fn param_rule_order_survives_publish_and_fetch() {
    let store = MemoryStore::new();
    let client = client_with(&store);

    let rules: Vec<ParamFlowRuleEntity> = (0..3)
        .map(|i| {
            ParamFlowRuleEntity::from_rule(
                "search-svc",
                IP,
                PORT,
                ParamFlowRule {
                    resource: format!("query-{i}"),
                    param_idx: Some(i),
                    count: 10.0,
                    param_flow_item_list: vec![
                        ParamFlowItem {
                            object: Some(format!("hot-{i}")),
                            count: Some(100),
                            class_type: Some("java.lang.String".into()),
                        },
                        ParamFlowItem {
                            object: Some(format!("cold-{i}")),
                            count: Some(1),
                            class_type: Some("java.lang.String".into()),
                        },
                    ],
                    ..Default::default()
                },
            )
        })
        .collect();

    client
        .set_param_flow_rules("search-svc", IP, PORT, Some(rules.clone()))
        .wait()
        .unwrap();
    let fetched = client.fetch_param_flow_rules("search-svc", IP, PORT).wait().unwrap();

    assert_eq!(fetched, rules);
}

#[test]
fn flow_publish_then_fetch() {
    let store = MemoryStore::new();
    let client = client_with(&store);
    let rule = FlowRule {
        resource: "getOrder".into(),
        count: 50.0,
        ..Default::default()
    };

    client
        .set_flow_rules_async(
            "order-svc",
            IP,
            PORT,
            Some(vec![FlowRuleEntity::from_rule("order-svc", IP, PORT, rule.clone())]),
        )
        .wait()
        .unwrap();

    let fetched = client.fetch_flow_rules("order-svc", IP, PORT).unwrap();
    assert_eq!(fetched[0].rule, rule);
}

#[test]
fn concurrent_fetches_resolve_independently() {
    let store = MemoryStore::new().with_delay(Duration::from_millis(20));
    let services: Vec<String> = (0..4).map(|i| format!("svc-{i}")).collect();
    for (i, svc) in services.iter().enumerate() {
        store.put(
            &format!("{svc}.sentinel.rule.flow"),
            GROUP_ID,
            format!(r#"[{{"resource":"flow-{i}","count":{i}}}]"#),
        );
        store.put(
            &format!("{svc}.sentinel.rule.degrade"),
            GROUP_ID,
            format!(r#"[{{"resource":"degrade-{i}","grade":2}}]"#),
        );
        store.put(
            &format!("{svc}.sentinel.rule.gateway.flow"),
            GROUP_ID,
            format!(r#"[{{"resource":"gw-{i}","count":{i}}}]"#),
        );
    }
    let client = client_with(&store);

    let gateway: Vec<_> = services
        .iter()
        .map(|svc| client.fetch_gateway_flow_rules(svc, IP, PORT))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = services
            .iter()
            .enumerate()
            .map(|(i, svc)| {
                let client = &client;
                scope.spawn(move || {
                    let flow = client.fetch_flow_rules(svc, IP, PORT).unwrap();
                    let degrade = client.fetch_degrade_rules(svc, IP, PORT).unwrap();
                    assert_eq!(flow[0].rule.resource, format!("flow-{i}"));
                    assert_eq!(flow[0].app, *svc);
                    assert_eq!(degrade[0].rule.resource, format!("degrade-{i}"));
                    assert_eq!(degrade[0].rule.grade, 2);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    });

    for (i, pending) in gateway.into_iter().enumerate() {
        let rules: Vec<_> = pending.wait().unwrap();
        assert_eq!(rules.len(), 1);
        let rule: &GatewayFlowRule = &rules[0].rule;
        assert_eq!(rule.resource, format!("gw-{i}"));
        assert_eq!(rule.count, i as f64);
    }
    assert_eq!(store.get_count(), services.len() * 3);
}

#[test]
fn categories_do_not_share_keys() {
    let store = MemoryStore::new();
    store.put(
        "order-svc.sentinel.rule.degrade",
        GROUP_ID,
        r#"[{"resource":"getOrder","count":0.5}]"#,
    );
    let client = client_with(&store);

    assert!(client.fetch_flow_rules("order-svc", IP, PORT).is_none());
    let degrade = client.fetch_degrade_rules("order-svc", IP, PORT).unwrap();
    let only: &DegradeRule = &degrade[0].rule;
    assert_eq!(only.count, 0.5);
}

#[test]
fn shutdown_cancels_in_flight_fetch() {
    let store = MemoryStore::new().with_delay(Duration::from_secs(30));
    let client = client_with(&store);

    let pending = client.fetch_apis("gw", IP, PORT);
    std::thread::sleep(Duration::from_millis(50));
    client.shutdown(Duration::from_millis(20));

    assert!(matches!(
        pending.wait(),
        Err(rulesync_client::SyncError::Cancelled)
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn blocking_shapes_work_inside_a_host_runtime() {
    let store = MemoryStore::new();
    store.put(
        "order-svc.sentinel.rule.flow",
        GROUP_ID,
        r#"[{"resource":"getOrder","count":100}]"#,
    );
    let hosted = RuleSyncClient::new(
        Arc::new(store.clone()),
        WorkerPool::from_handle(tokio::runtime::Handle::current(), 4),
    );

    let flow = hosted.fetch_flow_rules("order-svc", IP, PORT).expect("rules present");
    assert_eq!(flow[0].rule.resource, "getOrder");
    assert!(hosted.fetch_system_rules("order-svc", IP, PORT).is_none());

    let owned = client_with(&store);
    assert!(owned.set_degrade_rules("order-svc", IP, PORT, Some(Vec::new())));
    assert_eq!(
        store.content("order-svc.sentinel.rule.degrade", GROUP_ID).as_deref(),
        Some("[]")
    );
}

#[tokio::test]
async fn blocking_shapes_degrade_on_a_current_thread_runtime() {
    let store = MemoryStore::new();
    store.put("order-svc.sentinel.rule.flow", GROUP_ID, "[]");
    let client = client_with(&store);

    assert!(client.fetch_flow_rules("order-svc", IP, PORT).is_none());
    assert!(!client.set_authority_rules("order-svc", IP, PORT, Some(Vec::new())));
    assert_eq!(store.get_count(), 0);
    assert_eq!(store.publish_count(), 0);
    assert!(matches!(
        client.fetch_apis("order-svc", IP, PORT).wait(),
        Err(rulesync_client::SyncError::BlockedInRuntime)
    ));
    assert!(client.fetch_apis("order-svc", IP, PORT).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_from_async_host_cancels_in_flight_fetch() {
    let store = MemoryStore::new().with_delay(Duration::from_secs(30));
    let client = client_with(&store);

    let pending = client.fetch_apis("gw", IP, PORT);
    tokio::time::sleep(Duration::from_millis(50)).await;
    client.shutdown(Duration::from_millis(20));

    assert!(matches!(
        pending.await,
        Err(rulesync_client::SyncError::Cancelled)
    ));
}
