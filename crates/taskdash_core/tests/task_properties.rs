use proptest::prelude::*;
use std::collections::BTreeSet;
use taskdash_core::{Filter, MemoryKvStore, TaskId, TaskRepository};

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Edit(usize, String),
    Delete(usize),
    ClearCompleted,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => "[ a-z]{0,12}".prop_map(Op::Add),
        3 => any::<usize>().prop_map(Op::Toggle),
        2 => (any::<usize>(), "[ a-z]{0,12}").prop_map(|(i, text)| Op::Edit(i, text)),
        1 => any::<usize>().prop_map(Op::Delete),
        1 => Just(Op::ClearCompleted),
    ]
}

fn pick(repo: &TaskRepository<&MemoryKvStore>, index: usize) -> Option<TaskId> {
    let all = repo.list_by_filter(Filter::All);
    if all.is_empty() {
        None
    } else {
        Some(all[index % all.len()].id.clone())
    }
}

fn ids(repo: &TaskRepository<&MemoryKvStore>, filter: Filter) -> BTreeSet<TaskId> {
    repo.list_by_filter(filter)
        .into_iter()
        .map(|task| task.id)
        .collect()
}

proptest! {
    #[test]
    fn stats_and_filters_stay_consistent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let store = MemoryKvStore::new();
        let mut repo = TaskRepository::load(&store, "tasks").unwrap();

        for op in ops {
            match op {
                Op::Add(text) => {
                    let _ = repo.add(&text);
                }
                Op::Toggle(index) => {
                    if let Some(id) = pick(&repo, index) {
                        repo.toggle_completion(&id).unwrap();
                    }
                }
                Op::Edit(index, text) => {
                    if let Some(id) = pick(&repo, index) {
                        let _ = repo.edit(&id, &text);
                    }
                }
                Op::Delete(index) => {
                    if let Some(id) = pick(&repo, index) {
                        repo.delete(&id).unwrap();
                    }
                }
                Op::ClearCompleted => {
                    repo.clear_completed().unwrap();
                }
            }

            let stats = repo.stats();
            prop_assert_eq!(stats.pending, stats.total - stats.completed);
            prop_assert_eq!(stats.total, repo.len());

            let completed = ids(&repo, Filter::Completed);
            let pending = ids(&repo, Filter::Pending);
            prop_assert!(completed.is_disjoint(&pending));
            let union: BTreeSet<_> = completed.union(&pending).cloned().collect();
            prop_assert_eq!(union, ids(&repo, Filter::All));

            prop_assert!(repo
                .list_by_filter(Filter::All)
                .iter()
                .all(|task| !task.description.trim().is_empty()));
        }

        let reloaded = TaskRepository::load(&store, "tasks").unwrap();
        prop_assert_eq!(reloaded.list_by_filter(Filter::All), repo.list_by_filter(Filter::All));
    }

    #[test]
    fn toggle_twice_is_identity(texts in prop::collection::vec("[a-z]{1,8}", 1..10), index in any::<usize>()) {
        let store = MemoryKvStore::new();
        let mut repo = TaskRepository::load(&store, "tasks").unwrap();
        for text in &texts {
            repo.add(text).unwrap();
        }
        let before = repo.list_by_filter(Filter::All);
        let id = pick(&repo, index).unwrap();

        repo.toggle_completion(&id).unwrap();
        repo.toggle_completion(&id).unwrap();

        prop_assert_eq!(repo.list_by_filter(Filter::All), before);
    }
}
