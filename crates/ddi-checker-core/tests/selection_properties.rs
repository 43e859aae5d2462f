//! Property tests for the selection set.

use ddi_checker_core::{Drug, SelectionStore};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Remove(String),
}

fn op() -> impl Strategy<Value = Op> {
    let name = prop::sample::select(vec!["Aspirin", "aspirin", "Warfarin", "Ibuprofen", "Heparin"]);
    prop_oneof![
        name.clone().prop_map(|n| Op::Add(n.to_string())),
        name.prop_map(|n| Op::Remove(n.to_string())),
    ]
}

proptest! {
    #[test]
    fn names_unique_in_first_insertion_order(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = SelectionStore::new();
        let mut model: Vec<String> = Vec::new();

        for op in ops {
            match op {
                Op::Add(name) => {
                    store.add(Drug::new(name.clone()));
                    if !model.contains(&name) {
                        model.push(name);
                    }
                }
                Op::Remove(name) => {
                    store.remove(&name);
                    model.retain(|n| n != &name);
                }
            }
        }

        prop_assert_eq!(store.names(), model);
    }

    #[test]
    fn add_is_idempotent(ops in prop::collection::vec(op(), 0..20), name in "[A-Za-z]{1,12}") {
        let mut store = SelectionStore::new();
        for op in ops {
            match op {
                Op::Add(n) => { store.add(Drug::new(n)); }
                Op::Remove(n) => { store.remove(&n); }
            }
        }

        store.add(Drug::new(name.clone()));
        let once = store.names();
        let version = store.version();
        store.add(Drug::new(name));

        prop_assert_eq!(store.names(), once);
        prop_assert_eq!(store.version(), version);
    }
}
