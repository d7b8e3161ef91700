//! Tests for the action recorder and reactor dispatch

#[cfg(test)]
mod tests {
    use crate::action::{Action, GenericAction, Verb};
    use crate::fake::Fake;
    use crate::reactor::Reaction;
    use crate::Error;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // ============================================================================
    // Dispatch
    // ============================================================================

    #[test]
    fn test_invoke_without_reactors_is_noop_success() {
        let fake = Fake::new();
        let result = fake.invoke(Action::get("triggers", "test-ns", "t1")).unwrap();
        assert!(result.is_none());
        assert_eq!(fake.actions().len(), 1);
    }

    #[test]
    fn test_first_matching_reactor_wins() {
        let fake = Fake::new();
        fake.add_reactor("get", "triggers", |_| Reaction::object(json!({"from": "first"})));
        fake.add_reactor("get", "triggers", |_| Reaction::object(json!({"from": "second"})));

        let result = fake.invoke(Action::get("triggers", "test-ns", "t1")).unwrap();
        assert_eq!(result, Some(json!({"from": "first"})));
    }

    #[test]
    fn test_prepend_reactor_runs_first() {
        let fake = Fake::new();
        fake.add_reactor("get", "triggers", |_| Reaction::object(json!({"from": "added"})));
        fake.prepend_reactor("get", "triggers", |_| {
            Reaction::object(json!({"from": "prepended"}))
        });

        let result = fake.invoke(Action::get("triggers", "test-ns", "t1")).unwrap();
        assert_eq!(result, Some(json!({"from": "prepended"})));
        let reactors = fake.reactors();
        assert_eq!(reactors.len(), 2);
        assert_eq!(reactors[0].verb(), "get");
        assert_eq!(reactors[0].resource(), "triggers");
    }

    #[test]
    fn test_unhandled_reaction_falls_through() {
        let fake = Fake::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        fake.add_reactor("*", "*", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Reaction::unhandled()
        });
        fake.add_reactor("delete", "triggers", |_| Reaction::failed("second"));

        let err = fake
            .invoke(Action::delete("triggers", "test-ns", "t1"))
            .unwrap_err();
        assert_eq!(err.to_string(), "second");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_all_unhandled_returns_none() {
        let fake = Fake::new();
        fake.add_reactor("get", "triggers", |_| Reaction::unhandled());
        fake.add_reactor("get", "triggers", |_| Reaction::unhandled());

        let result = fake.invoke(Action::get("triggers", "test-ns", "t1")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_non_matching_reactors_are_skipped() {
        let fake = Fake::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        fake.add_reactor("create", "triggers", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Reaction::empty()
        });
        fake.add_reactor("get", "brokers", |_| Reaction::failed("wrong resource"));

        let result = fake.invoke(Action::get("triggers", "test-ns", "t1")).unwrap();
        assert!(result.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_wildcard_matches_any_verb_and_resource() {
        let fake = Fake::new();
        fake.add_reactor("*", "*", |action| {
            Reaction::object(json!({ "verb": action.verb().to_string() }))
        });

        for action in [
            Action::list("brokers", "test-ns"),
            Action::update("triggers", "test-ns", json!({})),
        ] {
            let verb = action.verb().to_string();
            let result = fake.invoke(action).unwrap();
            assert_eq!(result, Some(json!({ "verb": verb })));
        }
    }

    #[test]
    fn test_handler_error_is_passed_through() {
        let fake = Fake::new();
        fake.add_reactor("get", "triggers", |action| {
            Reaction::error(Error::NotFound {
                resource: action.resource().to_string(),
                name: action.name().unwrap_or_default().to_string(),
                namespace: action.namespace().to_string(),
            })
        });

        let err = fake
            .invoke(Action::get("triggers", "test-ns", "missing"))
            .unwrap_err();
        match err {
            Error::NotFound {
                resource,
                name,
                namespace,
            } => {
                assert_eq!(resource, "triggers");
                assert_eq!(name, "missing");
                assert_eq!(namespace, "test-ns");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_invocations_are_idempotent() {
        let fake = Fake::new();
        fake.add_reactor("get", "triggers", |action| match action.name() {
            Some("errorTrigger") => Reaction::failed("error while getting trigger errorTrigger"),
            name => Reaction::object(json!({ "metadata": { "name": name } })),
        });

        let action = Action::get("triggers", "test-ns", "t1");
        let first = fake.invoke(action.clone()).unwrap();
        let second = fake.invoke(action.clone()).unwrap();
        assert_eq!(first, second);

        let failing = Action::get("triggers", "test-ns", "errorTrigger");
        let first = fake.invoke(failing.clone()).unwrap_err().to_string();
        let second = fake.invoke(failing).unwrap_err().to_string();
        assert_eq!(first, second);

        let actions = fake.actions();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0], actions[1]);
    }

    #[test]
    fn test_handler_can_register_reactors() {
        let fake = Fake::new();
        let inner = fake.clone();
        fake.add_reactor("create", "triggers", move |_| {
            inner.add_reactor("get", "triggers", |_| Reaction::object(json!({"seen": true})));
            Reaction::empty()
        });

        fake.invoke(Action::create("triggers", "test-ns", json!({}))).unwrap();
        let result = fake.invoke(Action::get("triggers", "test-ns", "t1")).unwrap();
        assert_eq!(result, Some(json!({"seen": true})));
    }

    // ============================================================================
    // Action log
    // ============================================================================

    #[test]
    fn test_actions_are_logged_in_order() {
        let fake = Fake::new();
        fake.invoke(Action::create(
            "triggers",
            "test-ns",
            json!({"metadata": {"name": "t1"}}),
        ))
        .unwrap();
        fake.invoke(Action::get("triggers", "test-ns", "t1")).unwrap();
        fake.invoke(Action::delete("triggers", "test-ns", "t1")).unwrap();

        let actions = fake.actions();
        let verbs: Vec<Verb> = actions.iter().map(Action::verb).collect();
        assert_eq!(verbs, vec![Verb::Create, Verb::Get, Verb::Delete]);
        assert!(actions.iter().all(|a| a.name() == Some("t1")));

        fake.clear_actions();
        assert!(fake.actions().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let fake = Fake::new();
        let other = fake.clone();
        other.add_reactor("get", "triggers", |_| Reaction::failed("shared"));

        assert!(fake.invoke(Action::get("triggers", "ns", "t1")).is_err());
        assert_eq!(other.actions().len(), 1);
    }

    // ============================================================================
    // Actions
    // ============================================================================

    #[test]
    fn test_action_accessors() {
        let create = Action::create(
            "triggers",
            "test-ns",
            json!({"metadata": {"name": "t1", "namespace": "ignored"}}),
        );
        assert_eq!(create.verb(), Verb::Create);
        assert_eq!(create.resource(), "triggers");
        assert_eq!(create.namespace(), "test-ns");
        assert_eq!(create.name(), Some("t1"));
        assert!(create.object().is_some());

        let list = Action::list("triggers", "test-ns");
        assert_eq!(list.name(), None);
        assert!(list.object().is_none());
    }

    #[test]
    fn test_action_matches() {
        let action = Action::delete("triggers", "test-ns", "t1");
        assert!(action.matches("delete", "triggers"));
        assert!(action.matches("DELETE", "triggers"));
        assert!(action.matches("*", "triggers"));
        assert!(action.matches("delete", "*"));
        assert!(!action.matches("get", "triggers"));
        assert!(!action.matches("delete", "brokers"));
    }

    #[test]
    fn test_generic_action_verb() {
        let action = Action::Generic(GenericAction {
            verb: "patch".to_string(),
            resource: "triggers".to_string(),
            namespace: "test-ns".to_string(),
            name: Some("t1".to_string()),
            object: None,
        });
        assert_eq!(action.verb(), Verb::Other("patch".to_string()));
        assert!(action.matches("patch", "triggers"));
        assert_eq!(action.name(), Some("t1"));
    }

    #[test]
    fn test_verb_parse() {
        assert_eq!("create".parse::<Verb>().unwrap(), Verb::Create);
        assert_eq!("List".parse::<Verb>().unwrap(), Verb::List);
        assert_eq!(Verb::from("watch"), Verb::Other("watch".to_string()));
        assert_eq!(Verb::Update.to_string(), "update");
    }
}
