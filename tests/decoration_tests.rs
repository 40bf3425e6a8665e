//! End-to-end decoration tests
//!
//! Drive `TreeProcessor` against a recording transport and check the
//! request batches it sends and the state it leaves on the tree.

mod common;

use anyhow::Result;
use common::*;
use jrbac::client::{FixedAclResource, JolokiaClient, JolokiaStatus, ListMethod};
use jrbac::core::prelude::{Request, ResourceNode};
use jrbac::decorator::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn processor_for(
    transport: Arc<RecordingTransport>,
    status: Arc<JolokiaStatus>,
) -> TreeProcessor {
    TreeProcessor::new(
        JolokiaClient::new(transport),
        status,
        Arc::new(FixedAclResource::new(ACL)),
    )
}

#[tokio::test]
async fn test_general_mode_scenario() -> Result<()> {
    init_tracing();
    let transport = RecordingTransport::new(acl_answer(
        |identifier| identifier == "dom:type=B",
        json!({"dom:type=B": {"start()": {"CanInvoke": true, "Method": "start()", "ObjectName": "dom:type=B"}}}),
    ));
    let processor = processor_for(
        transport.clone(),
        Arc::new(JolokiaStatus::new(ListMethod::General)),
    );
    let mut tree = scenario_tree();

    let outcome = processor.process(&mut tree).await;

    assert_eq!(
        outcome,
        DecorationOutcome::Resolved {
            nodes: 2,
            operations: 1
        }
    );

    let batch = transport.last_batch().await;
    assert_eq!(
        batch,
        vec![
            Request::exec(ACL, "canInvoke(java.lang.String)", vec![json!("dom:type=A")]),
            Request::exec(ACL, "canInvoke(java.lang.String)", vec![json!("dom:type=B")]),
            Request::exec(
                ACL,
                "canInvoke(java.util.Map)",
                vec![json!({"dom:type=B": ["start()"]})]
            ),
        ]
    );

    let a = &tree.children[0];
    assert!(a.classes.contains(CANT_INVOKE_CLASS));
    assert_eq!(a.icon.as_deref(), Some("fa fa-lock"));
    assert_eq!(a.can_invoke(), Some(false));

    let b = &tree.children[1];
    assert!(b.classes.contains(CAN_INVOKE_CLASS));
    assert!(b.icon.is_none());
    assert_eq!(
        b.descriptor.as_ref().unwrap().signature("start()").unwrap().can_invoke,
        Some(true)
    );

    // the grouping folder has no remote counterpart and stays untouched
    assert!(tree.classes.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_single_round_trip_for_large_tree() -> Result<()> {
    let transport = RecordingTransport::new(acl_answer(|_| true, json!({})));
    let processor = processor_for(
        transport.clone(),
        Arc::new(JolokiaStatus::new(ListMethod::CantDetermine)),
    );

    let mut tree = ResourceNode::folder("root");
    for i in 0..50 {
        let mut descriptor = jrbac::core::Descriptor::new();
        for op in 0..4 {
            descriptor = descriptor.with_operation(
                &format!("op{op}"),
                jrbac::core::OperationSignature::new(&["int"]),
            );
        }
        tree = tree.with_child(ResourceNode::object(
            &format!("dom:type=Node,id={i}"),
            &i.to_string(),
            descriptor,
        ));
    }

    processor.process(&mut tree).await;

    assert_eq!(transport.batch_count().await, 1);
    let batch = transport.last_batch().await;
    assert_eq!(batch.len(), 50 + 1);
    let Request::Exec { arguments, .. } = batch.last().unwrap() else {
        panic!("bulk request must be an exec");
    };
    let bulk = arguments[0].as_object().unwrap();
    assert_eq!(bulk.len(), 50);
    assert!(bulk.values().all(|sigs| sigs.as_array().unwrap().len() == 4));
    Ok(())
}

#[tokio::test]
async fn test_mutual_exclusion_after_every_pass() -> Result<()> {
    let status = Arc::new(JolokiaStatus::new(ListMethod::General));
    let mut tree = broker_tree();

    // first pass denies everything, second grants everything
    for grant in [false, true] {
        let transport = RecordingTransport::new(acl_answer(move |_| grant, json!({})));
        let processor = processor_for(transport, status.clone());
        processor.process(&mut tree).await;

        for node in all_nodes(&tree).into_iter().filter(|n| n.is_addressable()) {
            let can = node.classes.contains(CAN_INVOKE_CLASS);
            let cant = node.classes.contains(CANT_INVOKE_CLASS);
            assert!(can ^ cant, "{} has classes '{}'", node.identifier, node.classes);
            assert_eq!(can, grant);
        }
    }
    // unrelated classes survive
    assert!(tree.classes.contains("org-apache-activemq"));
    Ok(())
}

#[tokio::test]
async fn test_overloads_resolved_separately() -> Result<()> {
    let broker = "org.apache.activemq:type=Broker,brokerName=localhost";
    let transport = RecordingTransport::new(acl_answer(
        |_| true,
        json!({
            broker: {
                "addQueue(java.lang.String)": {"CanInvoke": true},
                "removeQueue(java.lang.String)": {"CanInvoke": true},
                "removeQueue(java.lang.String,boolean)": {"CanInvoke": false}
            }
        }),
    ));
    let processor = processor_for(
        transport.clone(),
        Arc::new(JolokiaStatus::new(ListMethod::General)),
    );
    let mut tree = broker_tree();

    processor.process(&mut tree).await;

    let Request::Exec { arguments, .. } = transport.last_batch().await.pop().unwrap() else {
        panic!("bulk request must be an exec");
    };
    assert_eq!(
        arguments[0][broker],
        json!([
            "addQueue(java.lang.String)",
            "removeQueue(java.lang.String)",
            "removeQueue(java.lang.String,boolean)"
        ])
    );

    let descriptor = tree.children[0].descriptor.as_ref().unwrap();
    assert_eq!(
        descriptor
            .signature("removeQueue(java.lang.String)")
            .unwrap()
            .can_invoke,
        Some(true)
    );
    assert_eq!(
        descriptor
            .signature("removeQueue(java.lang.String,boolean)")
            .unwrap()
            .can_invoke,
        Some(false)
    );
    Ok(())
}

#[tokio::test]
async fn test_optimised_mode_is_idempotent_after_general_pass() -> Result<()> {
    let status = Arc::new(JolokiaStatus::new(ListMethod::General));
    let transport = RecordingTransport::new(acl_answer(
        |identifier| !identifier.ends_with("type=Health"),
        json!({}),
    ));
    let processor = processor_for(transport.clone(), status.clone());
    let mut tree = broker_tree();

    processor.process(&mut tree).await;
    assert_eq!(transport.batch_count().await, 1);
    let decorated = tree.clone();

    status.set_list_method(ListMethod::Optimised);
    let outcome = processor.process(&mut tree).await;

    assert!(matches!(outcome, DecorationOutcome::AlreadyDecorated { nodes: 3 }));
    assert_eq!(transport.batch_count().await, 1);
    assert_eq!(tree, decorated);
    Ok(())
}

#[tokio::test]
async fn test_optimised_mode_falls_back_when_not_decorated() -> Result<()> {
    let transport = RecordingTransport::new(acl_answer(|_| true, json!({})));
    let processor = processor_for(
        transport.clone(),
        Arc::new(JolokiaStatus::new(ListMethod::Optimised)),
    );
    let mut tree = scenario_tree();

    let outcome = processor.process(&mut tree).await;

    assert!(matches!(outcome, DecorationOutcome::Resolved { nodes: 2, .. }));
    assert_eq!(transport.batch_count().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_pre_decorated_tree_default_allows() -> Result<()> {
    let transport = RecordingTransport::failing();
    let processor = processor_for(
        transport.clone(),
        Arc::new(JolokiaStatus::new(ListMethod::Optimised)),
    );

    // shape of an optimised listing decorated on the server side
    let mut tree: ResourceNode = serde_json::from_value(json!({
        "title": "dom",
        "folder": true,
        "children": [
            {
                "objectName": "dom:type=Open",
                "title": "Open",
                "mbean": {"op": {"start": {"args": [], "canInvoke": true}},
                          "opByString": {"start()": {"args": [], "canInvoke": true}}}
            },
            {
                "objectName": "dom:type=Locked",
                "title": "Locked",
                "class": "dom-locked",
                "mbean": {"op": {"stop": {"args": [], "canInvoke": false}},
                          "opByString": {"stop()": {"args": [], "canInvoke": false}},
                          "canInvoke": false}
            },
            {"objectName": "dom:type=Plain", "title": "Plain", "mbean": {"desc": "no ops"}}
        ]
    }))?;

    let outcome = processor.process(&mut tree).await;

    assert_eq!(outcome, DecorationOutcome::AlreadyDecorated { nodes: 3 });
    assert_eq!(transport.batch_count().await, 0);
    assert!(tree.children[0].classes.contains(CAN_INVOKE_CLASS));
    assert_eq!(tree.children[1].classes.to_string(), "dom-locked cant-invoke");
    assert_eq!(tree.children[1].icon.as_deref(), Some("fa fa-lock"));
    assert!(tree.children[2].classes.contains(CAN_INVOKE_CLASS));
    Ok(())
}

#[tokio::test]
async fn test_transport_failure_is_swallowed() -> Result<()> {
    let transport = RecordingTransport::failing();
    let processor = processor_for(
        transport.clone(),
        Arc::new(JolokiaStatus::new(ListMethod::General)),
    );
    let mut tree = scenario_tree();

    let outcome = processor.process(&mut tree).await;

    let DecorationOutcome::Dropped { reason } = outcome else {
        panic!("expected a dropped pass");
    };
    assert!(reason.contains("connection refused"));
    assert!(
        all_nodes(&tree)
            .iter()
            .all(|n| n.classes.is_empty() && n.icon.is_none() && n.can_invoke().is_none())
    );
    Ok(())
}

#[tokio::test]
async fn test_configured_locked_icon() -> Result<()> {
    let transport = RecordingTransport::new(acl_answer(|_| false, json!({})));
    let processor = processor_for(
        transport,
        Arc::new(JolokiaStatus::new(ListMethod::General)),
    )
    .with_locked_icon("pficon pficon-locked");
    let mut tree = scenario_tree();

    processor.process(&mut tree).await;

    assert_eq!(tree.children[0].icon.as_deref(), Some("pficon pficon-locked"));
    Ok(())
}

#[tokio::test]
async fn test_from_config_discovers_acl_object() -> Result<()> {
    let custom_acl = "org.example:type=security,area=jmx,name=Custom";
    let transport = RecordingTransport::new(move |requests| {
        if let [Request::Search { .. }] = requests {
            return Ok(vec![jrbac::core::Response::success(None, json!([custom_acl]))]);
        }
        acl_answer(|_| true, json!({}))(requests)
    });
    let processor = TreeProcessor::from_config(
        JolokiaClient::new(transport.clone()),
        Arc::new(JolokiaStatus::new(ListMethod::General)),
        RbacConfig::default(),
    );
    let mut tree = scenario_tree();

    processor.process(&mut tree).await;
    processor.process(&mut tree).await;

    let batches = transport.batches.lock().await;
    // one search, then one decoration batch per pass
    assert_eq!(batches.len(), 3);
    assert_eq!(
        batches[0],
        vec![Request::search("*:type=security,area=jmx,*")]
    );
    assert!(batches[1..].iter().flatten().all(|r| r.mbean() == custom_acl));
    Ok(())
}
