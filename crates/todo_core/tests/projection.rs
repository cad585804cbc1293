use chrono::{DateTime, Duration, TimeZone, Utc};
use todo_core::{
    aggregate_stats, filter_by_criterion, kanban_grouping, search_and_sort, PriorityCounts,
    PriorityFilter, Priority, SearchCriteria, SortOrder, StatusFilter, Todo, TodoFilter, TodoId,
    TodoStats, TodoStatus,
};

fn at(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

fn todo(id: &str, text: &str, hours: i64, status: TodoStatus, priority: Priority) -> Todo {
    let mut todo = Todo::new(TodoId::from(id), text, at(hours)).unwrap();
    todo.set_status(status);
    todo.set_priority(priority);
    todo
}

/// Newest-first, as the collection is stored.
fn board() -> Vec<Todo> {
    vec![
        todo("e", "Email the landlord", 5, TodoStatus::Todo, Priority::Low),
        todo("d", "deploy staging", 4, TodoStatus::InProgress, Priority::High),
        todo("c", "Buy milk", 3, TodoStatus::Done, Priority::Medium),
        todo("b", "buy stamps", 2, TodoStatus::Todo, Priority::High),
        todo("a", "Archive old mail", 1, TodoStatus::Todo, Priority::High),
    ]
}

fn ids(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(|todo| todo.id.as_str()).collect()
}

#[test]
fn filter_by_criterion_selects_by_completed_flag() {
    let todos = board();
    assert_eq!(ids(&filter_by_criterion(&todos, TodoFilter::All)), ids(&todos));
    assert_eq!(
        ids(&filter_by_criterion(&todos, TodoFilter::Active)),
        vec!["e", "d", "b", "a"]
    );
    assert_eq!(
        ids(&filter_by_criterion(&todos, TodoFilter::Completed)),
        vec!["c"]
    );
}

#[test]
fn two_todo_scenario_orders_match_each_sort() {
    let a = todo("a", "A", 1, TodoStatus::Todo, Priority::High);
    let b = todo("b", "B", 2, TodoStatus::Todo, Priority::Low);
    let todos = vec![a, b];

    let order = |sort: SortOrder| {
        let criteria = SearchCriteria {
            sort,
            ..SearchCriteria::default()
        };
        search_and_sort(&todos, &criteria)
            .into_iter()
            .map(|todo| todo.text)
            .collect::<Vec<_>>()
    };

    assert_eq!(order(SortOrder::Priority), vec!["A", "B"]);
    assert_eq!(order(SortOrder::Alphabetical), vec!["A", "B"]);
    assert_eq!(order(SortOrder::Oldest), vec!["A", "B"]);
    assert_eq!(order(SortOrder::Newest), vec!["B", "A"]);
}

#[test]
fn empty_query_with_all_filters_returns_everything_sorted() {
    let todos = board();
    let criteria = SearchCriteria {
        sort: SortOrder::Oldest,
        ..SearchCriteria::default()
    };
    assert_eq!(
        ids(&search_and_sort(&todos, &criteria)),
        vec!["a", "b", "c", "d", "e"]
    );

    let whitespace = SearchCriteria::new("   ");
    assert_eq!(ids(&search_and_sort(&todos, &whitespace)), ids(&todos));
}

#[test]
fn query_is_trimmed_case_insensitive_substring() {
    let todos = board();
    let hits = search_and_sort(&todos, &SearchCriteria::new("  BUY "));
    assert_eq!(ids(&hits), vec!["c", "b"]);

    let none = search_and_sort(&todos, &SearchCriteria::new("nothing here"));
    assert!(none.is_empty());
}

#[test]
fn field_filters_match_exactly_and_commute_with_query() {
    let todos = board();
    let criteria = SearchCriteria {
        query: "a".to_string(),
        priority: PriorityFilter::High,
        status: StatusFilter::Todo,
        sort: SortOrder::Newest,
    };
    let hits = search_and_sort(&todos, &criteria);
    assert_eq!(ids(&hits), vec!["b", "a"]);
    assert!(hits.iter().all(|todo| criteria.matches(todo)));

    let staged: Vec<Todo> = todos
        .iter()
        .filter(|todo| criteria.status.matches(todo.status))
        .filter(|todo| criteria.priority.matches(todo.priority))
        .cloned()
        .collect();
    assert_eq!(ids(&search_and_sort(&staged, &criteria)), ids(&hits));

    let in_progress = SearchCriteria {
        status: StatusFilter::InProgress,
        ..SearchCriteria::default()
    };
    assert_eq!(ids(&search_and_sort(&todos, &in_progress)), vec!["d"]);
}

#[test]
fn priority_and_alphabetical_sorts_are_stable() {
    let todos = board();
    let by_priority = SearchCriteria {
        sort: SortOrder::Priority,
        ..SearchCriteria::default()
    };
    assert_eq!(
        ids(&search_and_sort(&todos, &by_priority)),
        vec!["d", "b", "a", "c", "e"]
    );

    let alphabetical = SearchCriteria {
        sort: SortOrder::Alphabetical,
        ..SearchCriteria::default()
    };
    assert_eq!(
        ids(&search_and_sort(&todos, &alphabetical)),
        vec!["a", "c", "b", "d", "e"]
    );
}

#[test]
fn alphabetical_sort_collates_accented_and_mixed_case_text() {
    let todos = vec![
        todo("1", "fig", 1, TodoStatus::Todo, Priority::Medium),
        todo("2", "éclair", 2, TodoStatus::Todo, Priority::Medium),
        todo("3", "zucchini", 3, TodoStatus::Todo, Priority::Medium),
        todo("4", "Apfel", 4, TodoStatus::Todo, Priority::Medium),
        todo("5", "Äpfel schälen", 5, TodoStatus::Todo, Priority::Medium),
    ];
    let criteria = SearchCriteria {
        sort: SortOrder::Alphabetical,
        ..SearchCriteria::default()
    };

    let texts: Vec<String> = search_and_sort(&todos, &criteria)
        .into_iter()
        .map(|todo| todo.text)
        .collect();
    assert_eq!(
        texts,
        vec!["Apfel", "Äpfel schälen", "éclair", "fig", "zucchini"]
    );
}

#[test]
fn kanban_grouping_partitions_by_status_and_orders_cards() {
    let board = kanban_grouping(&board());

    assert_eq!(ids(&board.todo.cards), vec!["b", "a", "e"]);
    assert_eq!(ids(&board.in_progress.cards), vec!["d"]);
    assert_eq!(ids(&board.done.cards), vec!["c"]);
    assert_eq!(board.total_cards(), 5);

    let titles: Vec<_> = board.columns().iter().map(|column| column.title()).collect();
    assert_eq!(titles, vec!["TODO", "IN PROGRESS", "DONE"]);
    assert_eq!(board.column(TodoStatus::Done).status, TodoStatus::Done);
}

#[test]
fn kanban_grouping_of_empty_collection_has_three_empty_columns() {
    let board = kanban_grouping(&[]);
    assert_eq!(board.columns().len(), 3);
    assert!(board.columns().iter().all(|column| column.is_empty()));
}

#[test]
fn stats_scenario_counts_completion_and_priority() {
    let todos = vec![
        todo("a", "one", 1, TodoStatus::Todo, Priority::High),
        todo("b", "two", 2, TodoStatus::InProgress, Priority::High),
        todo("c", "three", 3, TodoStatus::Done, Priority::Low),
    ];

    assert_eq!(
        aggregate_stats(&todos),
        TodoStats {
            total: 3,
            completed: 1,
            active: 2,
            priority: PriorityCounts {
                high: 2,
                medium: 0,
                low: 1,
            },
        }
    );
}

#[test]
fn stats_reflect_the_supplied_subset() {
    let todos = board();
    let hits = search_and_sort(&todos, &SearchCriteria::new("buy"));
    let stats = aggregate_stats(&hits);

    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.priority.get(Priority::High), 1);
    assert_eq!(stats.priority.get(Priority::Medium), 1);
    assert_eq!(aggregate_stats(&[]), TodoStats::default());
}
