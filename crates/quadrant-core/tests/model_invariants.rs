//! Property tests for the task model's structural invariants.
//!
//! Random operation sequences must never duplicate a task id, lose a
//! task that was not deleted, or let the report drift out of sync with
//! the model it summarizes.

use std::collections::HashSet;

use proptest::prelude::*;
use quadrant_core::{generate_report, Quadrant, TaskStore};

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Move(usize, usize),
    Reorder(usize, usize, usize),
    Edit(usize, String),
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}"
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_text().prop_map(Op::Add),
        any::<usize>().prop_map(Op::Toggle),
        any::<usize>().prop_map(Op::Delete),
        (any::<usize>(), 0usize..4).prop_map(|(i, q)| Op::Move(i, q)),
        (0usize..4, any::<usize>(), any::<usize>()).prop_map(|(q, f, t)| Op::Reorder(q, f, t)),
        (any::<usize>(), arb_text()).prop_map(|(i, s)| Op::Edit(i, s)),
    ]
}

/// Every task id currently in the model, in iteration order.
fn all_ids(store: &TaskStore) -> Vec<String> {
    store
        .model()
        .iter()
        .flat_map(|(_, tasks)| tasks.iter().map(|t| t.id.clone()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn task_ids_stay_unique_and_nothing_leaks(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut store = TaskStore::in_memory();
        let mut live = 0usize;

        for op in ops {
            match op {
                Op::Add(text) => {
                    if store.add_task(&text).is_ok() {
                        live += 1;
                    }
                }
                Op::Toggle(i) => {
                    let ids = all_ids(&store);
                    if !ids.is_empty() {
                        prop_assert!(store.toggle_task(&ids[i % ids.len()]).is_some());
                    }
                }
                Op::Delete(i) => {
                    let ids = all_ids(&store);
                    if !ids.is_empty() {
                        prop_assert!(store.delete_task(&ids[i % ids.len()]));
                        live -= 1;
                    }
                }
                Op::Move(i, q) => {
                    let ids = all_ids(&store);
                    if !ids.is_empty() {
                        let id = &ids[i % ids.len()];
                        let target = Quadrant::ALL[q];
                        let stays = store.model().locate(id).map(|(at, _)| at) == Some(target);
                        // Moving reports true exactly when the quadrant changes.
                        prop_assert_eq!(store.move_task(id, target), !stays);
                    }
                }
                Op::Reorder(q, f, t) => {
                    let quadrant = Quadrant::ALL[q];
                    let len = store.model().tasks(quadrant).len();
                    if len > 0 {
                        prop_assert!(store.reorder_task(quadrant, f % len, t % len).is_ok());
                    }
                }
                Op::Edit(i, text) => {
                    let ids = all_ids(&store);
                    if !ids.is_empty() {
                        let result = store.edit_task(&ids[i % ids.len()], &text);
                        if text.trim().is_empty() {
                            prop_assert!(result.is_err());
                        } else {
                            prop_assert_eq!(result, Ok(true));
                        }
                    }
                }
            }

            let ids = all_ids(&store);
            let unique: HashSet<&String> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
            prop_assert_eq!(store.model().len(), live);
        }
    }

    #[test]
    fn report_counts_match_the_model(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut store = TaskStore::in_memory();
        for op in ops {
            match op {
                Op::Add(text) => {
                    let _ = store.add_task(&text);
                }
                Op::Toggle(i) => {
                    let ids = all_ids(&store);
                    if !ids.is_empty() {
                        store.toggle_task(&ids[i % ids.len()]);
                    }
                }
                Op::Delete(i) => {
                    let ids = all_ids(&store);
                    if !ids.is_empty() {
                        store.delete_task(&ids[i % ids.len()]);
                    }
                }
                Op::Move(i, q) => {
                    let ids = all_ids(&store);
                    if !ids.is_empty() {
                        store.move_task(&ids[i % ids.len()], Quadrant::ALL[q]);
                    }
                }
                Op::Reorder(q, f, t) => {
                    let quadrant = Quadrant::ALL[q];
                    let len = store.model().tasks(quadrant).len();
                    if len > 0 {
                        let _ = store.reorder_task(quadrant, f % len, t % len);
                    }
                }
                Op::Edit(i, text) => {
                    let ids = all_ids(&store);
                    if !ids.is_empty() {
                        let _ = store.edit_task(&ids[i % ids.len()], &text);
                    }
                }
            }
        }

        let report = generate_report(store.model());
        let completed = store
            .model()
            .iter()
            .flat_map(|(_, tasks)| tasks)
            .filter(|t| t.completed)
            .count();

        prop_assert_eq!(report.total, store.model().len());
        prop_assert_eq!(report.completed, completed);
        let expected = if report.total == 0 {
            0.0
        } else {
            let rate = completed as f64 / report.total as f64 * 100.0;
            (rate * 10.0).round() / 10.0
        };
        prop_assert_eq!(report.rate, expected);
        prop_assert!((0.0..=100.0).contains(&report.rate));
    }
}
