//! Group-by primitives shared by every chart.
//!
//! Groups come out in first-encounter order and all sorts are stable, so
//! ties always resolve by the order in which groups first appear.

use contracts::dashboards::d100_stock_profitability::CategoryValue;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Running sum and row count of one group.
struct Acc {
    key: String,
    sum: f64,
    count: usize,
}

fn accumulate<'a, T, K, V>(items: impl IntoIterator<Item = &'a T>, key: K, value: V) -> Vec<Acc>
where
    T: 'a,
    K: Fn(&T) -> &str,
    V: Fn(&T) -> f64,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Acc> = Vec::new();

    for item in items {
        let k = key(item);
        let slot = match index.get(k) {
            Some(&i) => i,
            None => {
                index.insert(k.to_string(), groups.len());
                groups.push(Acc {
                    key: k.to_string(),
                    sum: 0.0,
                    count: 0,
                });
                groups.len() - 1
            }
        };
        let acc = &mut groups[slot];
        acc.sum += value(item);
        acc.count += 1;
    }

    groups
}

/// Sum of `value` per `key`, in first-encounter order.
pub fn group_sum<'a, T, K, V>(
    items: impl IntoIterator<Item = &'a T>,
    key: K,
    value: V,
) -> Vec<CategoryValue>
where
    T: 'a,
    K: Fn(&T) -> &str,
    V: Fn(&T) -> f64,
{
    accumulate(items, key, value)
        .into_iter()
        .map(|acc| CategoryValue::new(acc.key, acc.sum))
        .collect()
}

/// Mean of `value` per `key`, in first-encounter order.
pub fn group_mean<'a, T, K, V>(
    items: impl IntoIterator<Item = &'a T>,
    key: K,
    value: V,
) -> Vec<CategoryValue>
where
    T: 'a,
    K: Fn(&T) -> &str,
    V: Fn(&T) -> f64,
{
    accumulate(items, key, value)
        .into_iter()
        .map(|acc| CategoryValue::new(acc.key, acc.sum / acc.count as f64))
        .collect()
}

fn by_value(a: &CategoryValue, b: &CategoryValue) -> Ordering {
    a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal)
}

/// First `n` groups by value, largest first.
pub fn top_desc(mut groups: Vec<CategoryValue>, n: usize) -> Vec<CategoryValue> {
    groups.sort_by(|a, b| by_value(b, a));
    groups.truncate(n);
    groups
}

/// First `n` groups by value, smallest first.
pub fn top_asc(mut groups: Vec<CategoryValue>, n: usize) -> Vec<CategoryValue> {
    groups.sort_by(by_value);
    groups.truncate(n);
    groups
}

/// Groups ordered by category name, ascending.
pub fn sort_by_category(mut groups: Vec<CategoryValue>) -> Vec<CategoryValue> {
    groups.sort_by(|a, b| a.category.cmp(&b.category));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        key: &'static str,
        value: f64,
    }

    fn row(key: &'static str, value: f64) -> Row {
        Row { key, value }
    }

    fn key(r: &Row) -> &str {
        r.key
    }

    fn value(r: &Row) -> f64 {
        r.value
    }

    fn categories(groups: &[CategoryValue]) -> Vec<&str> {
        groups.iter().map(|g| g.category.as_str()).collect()
    }

    #[test]
    fn test_group_sum_keeps_encounter_order() {
        let rows = vec![row("b", 1.0), row("a", 2.0), row("b", 3.0), row("c", -1.0)];
        let groups = group_sum(&rows, key, value);
        assert_eq!(
            groups,
            vec![
                CategoryValue::new("b", 4.0),
                CategoryValue::new("a", 2.0),
                CategoryValue::new("c", -1.0),
            ]
        );
    }

    #[test]
    fn test_group_mean() {
        let rows = vec![row("x", 10.0), row("y", 4.0), row("x", 20.0)];
        let groups = group_mean(&rows, key, value);
        assert_eq!(groups, vec![CategoryValue::new("x", 15.0), CategoryValue::new("y", 4.0)]);
    }

    #[test]
    fn test_top_desc_breaks_ties_by_encounter_order() {
        let rows = vec![row("first", 5.0), row("big", 9.0), row("second", 5.0), row("third", 5.0)];
        let top = top_desc(group_sum(&rows, key, value), 3);
        assert_eq!(categories(&top), vec!["big", "first", "second"]);
    }

    #[test]
    fn test_top_asc_breaks_ties_by_encounter_order() {
        let rows = vec![row("p", -1.0), row("q", -7.0), row("r", -1.0)];
        let top = top_asc(group_sum(&rows, key, value), 10);
        assert_eq!(categories(&top), vec!["q", "p", "r"]);
    }

    #[test]
    fn test_top_n_bounds() {
        let rows = vec![row("a", 1.0), row("b", 2.0)];
        assert_eq!(top_desc(group_sum(&rows, key, value), 10).len(), 2);
        assert!(top_desc(group_sum(&rows, key, value), 0).is_empty());
        assert!(top_asc(Vec::new(), 5).is_empty());
    }

    #[test]
    fn test_sort_by_category() {
        let rows = vec![row("2024-03", 1.0), row("2023-12", 2.0), row("2024-01", 3.0)];
        let sorted = sort_by_category(group_sum(&rows, key, value));
        assert_eq!(categories(&sorted), vec!["2023-12", "2024-01", "2024-03"]);
    }
}
