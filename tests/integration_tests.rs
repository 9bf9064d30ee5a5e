use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use share_ledger::analysis::filter::{DateRange, ExpenseFilter};
use share_ledger::core::category::Category;
use share_ledger::core::expense::Expense;
use share_ledger::core::participant::ParticipantName;
use share_ledger::group::expense_group::ExpenseGroup;
use share_ledger::settlement::aggregator::BalanceAggregator;
use share_ledger::settlement::optimizer::{SettlementMarker, SettlementOptimizer};

fn name(n: &str) -> ParticipantName {
    ParticipantName::new(n)
}

fn names(list: &[&str]) -> Vec<ParticipantName> {
    list.iter().map(|n| name(n)).collect()
}

/// Full pipeline: roster + expenses → balances → settlements.
#[test]
fn full_pipeline_flat_share() {
    let roster = names(&["Alice", "Bob", "Carol", "Dan"]);
    let expenses = vec![
        Expense::new(name("Alice"), 1200.0, vec![]).with_description("Rent"),
        Expense::new(name("Bob"), 84.6, vec![]).with_description("Internet"),
        Expense::new(name("Carol"), 63.3, names(&["Carol", "Dan"])).with_description("Takeaway"),
        Expense::new(name("Dan"), 17.25, names(&["Alice", "Bob"])).with_description("Cleaning"),
    ];

    let balances = BalanceAggregator::compute_balances(&roster, &expenses);
    assert_eq!(balances.len(), 4);
    assert_abs_diff_eq!(balances.total_balance(), 0.0, epsilon = 1e-9);

    // Alice: paid 1200, owes 300 + 21.15 + 8.625
    assert_abs_diff_eq!(balances.net(&name("Alice")), 870.225, epsilon = 1e-9);
    // Dan: paid 17.25, owes 300 + 21.15 + 31.65
    assert_abs_diff_eq!(balances.net(&name("Dan")), -335.55, epsilon = 1e-9);

    let plan = SettlementOptimizer::compute_settlements(&roster, &balances);
    assert_eq!(plan.marker(), SettlementMarker::Recommended);
    assert!(plan.instructions().len() <= 3);

    // Every instruction flows from a debtor to a creditor.
    for instruction in plan.instructions() {
        assert!(balances.get(&instruction.from).unwrap().is_debtor());
        assert!(balances.get(&instruction.to).unwrap().is_creditor());
        assert!(instruction.amount > 0.0);
    }

    // Each debtor pays off their debt to the cent.
    for (participant, balance) in balances.iter() {
        if balance.is_debtor() {
            assert_abs_diff_eq!(
                plan.paid_by(participant),
                -balance.balance,
                epsilon = 0.011
            );
        }
    }
}

/// The worked example: +30, +10, -40.
#[test]
fn one_debtor_pays_two_creditors() {
    let roster = names(&["A", "B", "C"]);
    let expenses = vec![
        Expense::new(name("A"), 30.0, names(&["C"])),
        Expense::new(name("B"), 10.0, names(&["C"])),
    ];

    let balances = BalanceAggregator::compute_balances(&roster, &expenses);
    let plan = SettlementOptimizer::compute_settlements(&roster, &balances);

    let pairs: Vec<(&str, &str, f64)> = plan
        .instructions()
        .iter()
        .map(|i| (i.from.as_str(), i.to.as_str(), i.amount))
        .collect();
    assert_eq!(pairs, vec![("C", "A", 30.0), ("C", "B", 10.0)]);
}

#[test]
fn everyone_even_needs_no_settlement() {
    let roster = names(&["A", "B"]);
    let expenses = vec![
        Expense::new(name("A"), 20.0, vec![]),
        Expense::new(name("B"), 20.0, vec![]),
    ];

    let balances = BalanceAggregator::compute_balances(&roster, &expenses);
    let plan = SettlementOptimizer::compute_settlements(&roster, &balances);

    assert!(plan.is_settled());
    assert!(plan.instructions().is_empty());
    assert_eq!(plan.items().len(), 1);
    assert_eq!(plan.items()[0].key(), "no-settlements");
}

#[test]
fn repeated_runs_are_identical() {
    let roster = names(&["A", "B", "C", "D"]);
    let expenses = vec![
        Expense::new(name("A"), 10.0, vec![]),
        Expense::new(name("B"), 33.33, names(&["A", "C", "D"])),
        Expense::new(name("D"), 7.77, names(&["B"])),
    ];

    let first = BalanceAggregator::compute_balances(&roster, &expenses);
    let second = BalanceAggregator::compute_balances(&roster, &expenses);
    assert_eq!(first, second);

    let plan_a = SettlementOptimizer::compute_settlements(&roster, &first);
    let plan_b = SettlementOptimizer::compute_settlements(&roster, &second);
    assert_eq!(plan_a, plan_b);
}

#[test]
fn group_loads_from_json() {
    let json = r#"{
        "participants": ["Alice", "Bob", "Carol"],
        "expenses": [
            { "description": "Groceries", "amount": 90.0, "paid_by": "Alice",
              "category": "Groceries", "date": "2024-01-10" },
            { "description": "Cinema", "amount": 24.0, "paid_by": "Bob",
              "split_with": ["Bob", "Carol"], "category": "Entertainment",
              "date": "2024-02-02" }
        ]
    }"#;

    let group: ExpenseGroup = serde_json::from_str(json).unwrap();
    assert_eq!(group.participants().len(), 3);
    assert_eq!(group.expenses().len(), 2);
    // Missing categories fall back to the defaults.
    assert!(group.categories().contains(&Category::new("Rent")));

    let summary = group.summary();
    assert_eq!(summary.balances.net(&name("Alice")), 60.0);
    assert_eq!(summary.balances.net(&name("Bob")), -18.0);
    assert_eq!(summary.balances.net(&name("Carol")), -42.0);

    let january = ExpenseFilter::new().with_date_range(DateRange::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    ));
    let stats = group.filtered_stats(&january);
    assert_eq!(stats.total, 90.0);
    assert_eq!(stats.average_per_participant, 30.0);
}

#[test]
fn group_loads_mobile_app_document() {
    let json = r#"{
        "roommates": ["Alice", "Bob"],
        "expenses": [
            { "id": 1717171717171, "description": "Pizza", "amount": 30.0,
              "paidBy": "Alice", "splitWith": [], "date": "2024-05-31",
              "time": "8:15:02 PM", "category": "Other" }
        ],
        "categories": ["Other", "Takeaway"]
    }"#;

    let group: ExpenseGroup = serde_json::from_str(json).unwrap();
    assert_eq!(group.participants().len(), 2);
    assert!(group.categories().contains(&Category::new("Takeaway")));

    let plan = group.settlements();
    assert_eq!(plan.instructions().len(), 1);
    assert_eq!(plan.instructions()[0].from.as_str(), "Bob");
    assert_eq!(plan.instructions()[0].amount, 15.0);
}

#[test]
fn group_json_rejects_duplicate_participants() {
    let json = r#"{ "participants": ["Alice", "Alice"], "expenses": [] }"#;
    let result: Result<ExpenseGroup, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn group_round_trips_through_json() {
    let mut group = ExpenseGroup::new();
    group.add_participant("Alice").unwrap();
    group.add_participant("Bob").unwrap();
    group.add_category("Travel").unwrap();
    group
        .add_expense(
            Expense::new(name("Bob"), 18.5, vec![])
                .with_description("Train")
                .with_category(Category::new("Travel")),
        )
        .unwrap();

    let json = serde_json::to_string(&group).unwrap();
    let back: ExpenseGroup = serde_json::from_str(&json).unwrap();
    assert_eq!(back, group);
}

#[test]
fn settlement_items_serialize_tagged() {
    let roster = names(&["A", "B"]);
    let expenses = vec![Expense::new(name("A"), 50.0, vec![])];
    let balances = BalanceAggregator::compute_balances(&roster, &expenses);
    let plan = SettlementOptimizer::compute_settlements(&roster, &balances);

    let json = serde_json::to_value(plan.items()).unwrap();
    assert_eq!(json[0]["kind"], "marker");
    assert_eq!(json[0]["text"], "Recommended Settlements");
    assert_eq!(json[1]["kind"], "transfer");
    assert_eq!(json[1]["from"], "B");
    assert_eq!(json[1]["to"], "A");
    assert_eq!(json[1]["amount"], 25.0);
    assert_eq!(plan.items()[1].key(), "payment-0-0");

    let balances_json = serde_json::to_value(&balances).unwrap();
    assert_eq!(balances_json["A"]["paid"], 50.0);
    assert_eq!(balances_json["B"]["balance"], -25.0);
}
