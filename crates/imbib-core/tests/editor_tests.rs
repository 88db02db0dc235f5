//! Editor model integration tests
//!
//! Display order of dynamic field sets, the user summary tab, and the
//! row-weight law.

use imbib_core::{
    BaseFields, BibEntry, DynamicFieldSet, EditorConfig, EntryType, Field, FieldRegistry,
    RowKind, RowLayout, RowWeights, StandardField, UserSummaryTab,
};
use proptest::prelude::*;
use rstest::rstest;

fn owner_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ._-]{0,12}"
}

proptest! {
    #[test]
    fn adding_twice_equals_adding_once(owners in prop::collection::vec(owner_strategy(), 0..12)) {
        let registry = FieldRegistry::new();
        let entry = BibEntry::new("k", EntryType::Article);

        let mut once = DynamicFieldSet::for_entry_types();
        let mut twice = DynamicFieldSet::for_entry_types();
        for owner in &owners {
            let field = registry.dynamic_field(owner);
            once.add(field.clone());
            twice.add(field.clone());
            twice.add(field);
        }

        prop_assert_eq!(once.display_order(&entry), twice.display_order(&entry));
    }

    #[test]
    fn sentinel_is_last_exactly_once(owners in prop::collection::vec(owner_strategy(), 0..12)) {
        let mut set = DynamicFieldSet::empty();
        set.add(StandardField::UserSummary);
        for owner in &owners {
            set.add(Field::summary(owner));
        }
        let order = set.display_order(&BibEntry::new("k", EntryType::Misc));
        let sentinel = Field::standard(StandardField::UserSummary);
        prop_assert_eq!(order.last(), Some(&sentinel));
        prop_assert_eq!(order.iter().filter(|f| **f == sentinel).count(), 1);
    }

    #[test]
    fn row_shares_sum_to_one_hundred(n in 0usize..500) {
        let layout = RowLayout::compressed(n, RowWeights::default());
        let total: f64 = layout.percent_heights().iter().sum();
        prop_assert!((total - 100.0).abs() < 1e-6);
        prop_assert_eq!(layout.total_weight() as usize, 3 * n + 1);
    }

    #[test]
    fn action_row_shrinks_but_stays_positive(n in 0usize..500) {
        let smaller = RowLayout::compressed(n, RowWeights::default()).action_row().share;
        let larger = RowLayout::compressed(n + 1, RowWeights::default()).action_row().share;
        prop_assert!(larger < smaller);
        prop_assert!(larger > 0.0);
    }
}

#[rstest]
#[case(0, 100.0, None)]
#[case(1, 25.0, Some(75.0))]
#[case(2, 100.0 / 7.0, Some(300.0 / 7.0))]
#[case(3, 10.0, Some(30.0))]
fn test_compressed_layout_percentages(
    #[case] n: usize,
    #[case] action: f64,
    #[case] content: Option<f64>,
) {
    let layout = RowLayout::compressed(n, RowWeights::default());
    assert!((layout.action_row().percent_height() - action).abs() < 1e-9);
    for row in layout.rows().iter().filter(|r| r.kind == RowKind::Content) {
        let expected = content.unwrap();
        assert!((row.percent_height() - expected).abs() < 1e-9);
    }
    assert_eq!(layout.rows().last().map(|r| r.kind), Some(RowKind::Action));
}

#[test]
fn test_editor_config_weights() {
    let config = EditorConfig {
        content_row_weight: 4,
        action_row_weight: 2,
    };
    let layout = RowLayout::compressed(2, RowWeights::from(&config));
    assert_eq!(layout.total_weight(), 10);
    assert!((layout.action_row().share - 0.2).abs() < 1e-9);
}

#[test]
fn test_display_order_tracks_entry_type() {
    let mut set = DynamicFieldSet::for_entry_types();
    set.add(Field::summary("alice"));

    let article = set.display_order(&BibEntry::new("a", EntryType::Article));
    let thesis = set.display_order(&BibEntry::new("t", EntryType::PhdThesis));

    assert!(article.contains(&Field::standard(StandardField::Journal)));
    assert!(thesis.contains(&Field::standard(StandardField::School)));
    for order in [&article, &thesis] {
        let n = order.len();
        assert_eq!(order[n - 2], Field::summary("alice"));
        assert_eq!(order[n - 1].name(), "usersummary");
    }
}

#[test]
fn test_fixed_base_fields() {
    let set = DynamicFieldSet::new(BaseFields::Fixed(vec![
        StandardField::Abstract.into(),
        Field::custom("x-rating"),
    ]));
    let names: Vec<_> = set
        .display_order(&BibEntry::new("k", EntryType::Book))
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    assert_eq!(names, vec!["abstract", "x-rating", "usersummary"]);
}

#[test]
fn test_user_tab_shares_registry_fields() {
    let registry = FieldRegistry::new();
    let mut tab = UserSummaryTab::new(&registry);
    tab.add_user_summary("alice");
    tab.add_user_summary("bob");

    let entry = BibEntry::new("k", EntryType::Article)
        .with_field(registry.dynamic_field("alice"), "Great intro");
    let shown = tab.fields_to_show(&entry);

    assert_eq!(entry.get(&shown[0]), Some("Great intro"));
    assert_eq!(registry.len(), 2);

    let layout = tab.layout(&entry, RowWeights::default());
    assert_eq!(layout.content_rows(), 3);
    assert!((layout.action_row().percent_height() - 10.0).abs() < 1e-9);
}

#[test]
fn test_independent_registries_agree() {
    let a = FieldRegistry::new();
    let b = FieldRegistry::new();
    let mut tab_a = UserSummaryTab::new(&a);
    let mut tab_b = UserSummaryTab::new(&b);
    let (fa, _) = tab_a.add_user_summary("dana");
    let (fb, _) = tab_b.add_user_summary("dana");
    assert_eq!(fa, fb);
}
