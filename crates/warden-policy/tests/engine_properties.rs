// engine_properties.rs — End-to-end properties of the permission engine.
//
// Exercises the engine the way a host does: register permissions, register
// plugin checkers, evaluate from many callers, then inspect the audit log.
//
// VERIFY:
//   - permissions with no checkers fall back to their default
//   - earlier checkers win and later ones are never called
//   - the audit log keeps the newest records, most recent first
//   - actor filters select by the snapshot's id
//   - history is immune to later mutation of the caller's actor
//   - concurrent evaluations all get recorded with distinct ids

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use warden_audit::ActorFilter;
use warden_policy::{
    checker_fn, Actor, Permission, PermissionEngine, PolicyError, ResourceScope, RootChecker,
    Verdict,
};

fn view_table() -> Permission {
    Permission::new("view-table", "View table", false).takes_resource()
}

#[test]
fn no_checkers_means_default_for_every_scope() {
    let engine = PermissionEngine::new(32).unwrap();
    engine
        .register_permission(Permission::new("view-instance", "", true))
        .unwrap();
    engine.register_permission(view_table()).unwrap();

    let scopes = [
        ResourceScope::instance(),
        ResourceScope::database("mydb"),
        ResourceScope::resource("mydb", "mytable"),
    ];
    let actors = [Actor::with_id("root"), Actor::anonymous()];

    for actor in &actors {
        for scope in &scopes {
            let open = engine.evaluate(actor, "view-instance", scope).unwrap();
            assert!(open.result);
            assert!(open.used_default);

            let closed = engine.evaluate(actor, "view-table", scope).unwrap();
            assert!(!closed.result);
            assert!(closed.used_default);
        }
    }
}

#[test]
fn view_table_without_checkers_is_denied_by_default() {
    let engine = PermissionEngine::new(8).unwrap();
    engine.register_permission(view_table()).unwrap();

    let actor: Actor = serde_json::from_value(json!({"id": "root"})).unwrap();
    let decision = engine
        .evaluate(&actor, "view-table", &ResourceScope::resource("mydb", "mytable"))
        .unwrap();

    assert!(!decision.result);
    assert!(decision.used_default);
}

#[test]
fn earlier_allow_beats_later_deny() {
    let engine = PermissionEngine::new(8).unwrap();
    engine.register_permission(view_table()).unwrap();

    let deny_calls = Arc::new(AtomicUsize::new(0));
    let counter = deny_calls.clone();
    engine.add_checker(checker_fn("c1", |_, _, _| Ok(Verdict::Allow)));
    engine.add_checker(checker_fn("c2", move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Verdict::Deny)
    }));

    let decision = engine
        .evaluate(
            &Actor::with_id("guest"),
            "view-table",
            &ResourceScope::resource("mydb", "mytable"),
        )
        .unwrap();

    assert!(decision.result);
    assert_eq!(decision.outcome, Verdict::Allow);
    assert_eq!(deny_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn audit_log_keeps_newest_records() {
    let engine = PermissionEngine::new(3).unwrap();
    engine
        .register_permission(Permission::new("view-instance", "", true))
        .unwrap();

    for i in 0..5 {
        engine
            .evaluate(
                &Actor::with_id(format!("user-{}", i)),
                "view-instance",
                &ResourceScope::instance(),
            )
            .unwrap();
    }

    let recent = engine.recent(10, &ActorFilter::All);
    assert_eq!(recent.len(), 3);
    let ids: Vec<Option<String>> = recent.iter().map(|r| r.entry.actor.id()).collect();
    assert_eq!(
        ids,
        vec![
            Some("user-4".to_string()),
            Some("user-3".to_string()),
            Some("user-2".to_string())
        ]
    );
    // Most recent first: ids strictly decrease down the list, i.e. they
    // strictly increase in append order.
    assert!(recent.windows(2).all(|pair| pair[0].seq > pair[1].seq));
}

#[test]
fn history_filters_by_actor() {
    let engine = PermissionEngine::with_defaults(10).unwrap();
    let scope = ResourceScope::instance();
    engine
        .evaluate(&Actor::with_id("root"), "view-instance", &scope)
        .unwrap();
    engine
        .evaluate(&Actor::with_id("guest"), "view-instance", &scope)
        .unwrap();

    let mine = engine.recent(10, &ActorFilter::only("root"));
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].entry.actor.id().as_deref(), Some("root"));

    let theirs = engine.recent(10, &ActorFilter::exclude("root"));
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].entry.actor.id().as_deref(), Some("guest"));
}

#[test]
fn history_is_frozen_at_record_time() {
    let engine = PermissionEngine::with_defaults(10).unwrap();
    let mut actor = Actor::with_id("root");
    actor.insert("roles", json!(["staff"]));

    engine
        .evaluate(&actor, "view-instance", &ResourceScope::instance())
        .unwrap();

    actor.insert("id", json!("mallory"));
    actor.insert("roles", json!(["admin"]));

    let recorded = &engine.recent(1, &ActorFilter::All)[0].entry.actor;
    assert_eq!(recorded.id().as_deref(), Some("root"));
    assert_eq!(recorded.get("roles"), Some(&json!(["staff"])));
}

#[test]
fn duplicate_registration_keeps_single_entry() {
    let engine = PermissionEngine::new(4).unwrap();
    engine.register_permission(view_table()).unwrap();
    engine.register_permission(view_table()).unwrap();

    let matching = engine
        .registry()
        .list()
        .iter()
        .filter(|p| p.name == "view-table")
        .count();
    assert_eq!(matching, 1);

    let err = engine
        .register_permission(Permission::new("view-table", "changed", false).takes_resource())
        .unwrap_err();
    assert!(matches!(err, PolicyError::DuplicateName { .. }));
}

#[test]
fn root_mode_grants_root_only() {
    let engine = PermissionEngine::with_defaults(16).unwrap();
    engine.add_checker(RootChecker);

    let root = engine
        .evaluate(&Actor::with_id("root"), "permissions-debug", &ResourceScope::instance())
        .unwrap();
    assert!(root.result);
    assert_eq!(root.decided_by.as_deref(), Some("root"));

    let guest = engine
        .evaluate(&Actor::with_id("guest"), "permissions-debug", &ResourceScope::instance())
        .unwrap();
    assert!(!guest.result);
    assert!(guest.used_default);
}

#[test]
fn concurrent_evaluations_are_all_recorded() {
    let engine = Arc::new(PermissionEngine::with_defaults(1_000).unwrap());
    engine.add_checker(checker_fn("even-users", |actor, _, _| {
        let id = actor.id().unwrap_or_default();
        Ok(if id.ends_with('0') {
            Verdict::Allow
        } else {
            Verdict::NoOpinion
        })
    }));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                for i in 0..100 {
                    let actor = Actor::with_id(format!("{}-{}", t, i));
                    engine
                        .evaluate(&actor, "create-table", &ResourceScope::database("mydb"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let recent = engine.recent(usize::MAX, &ActorFilter::All);
    assert_eq!(recent.len(), 800);
    let mut seqs: Vec<u64> = recent.iter().map(|r| r.seq).collect();
    seqs.dedup();
    assert_eq!(seqs.len(), 800);

    let allowed = recent.iter().filter(|r| r.entry.result).count();
    assert_eq!(allowed, 80);
}
