//! Materialized clustering results.

use std::borrow::Cow;
use std::fmt;

/// The outcome of a k-medoids run.
///
/// Groups are ordered by the medoid that seeded them. Within a group the
/// medoid comes first, followed by the other members in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<T> {
    groups: Vec<Vec<T>>,
    labels: Vec<usize>,
    iterations: usize,
    converged: bool,
}

impl<T: Clone> Grouping<T> {
    /// Build from index groups over `items`.
    pub(crate) fn from_indices(
        items: &[T],
        index_groups: &[Vec<usize>],
        iterations: usize,
        converged: bool,
    ) -> Self {
        let mut labels = vec![0usize; items.len()];
        let mut groups = Vec::with_capacity(index_groups.len());
        for (label, members) in index_groups.iter().enumerate() {
            let mut group = Vec::with_capacity(members.len());
            for &idx in members {
                labels[idx] = label;
                group.push(items[idx].clone());
            }
            groups.push(group);
        }

        Self {
            groups,
            labels,
            iterations,
            converged,
        }
    }
}

impl<T> Grouping<T> {
    /// The groups, in group order.
    pub fn groups(&self) -> &[Vec<T>] {
        &self.groups
    }

    /// Consume the result and return the groups.
    pub fn into_groups(self) -> Vec<Vec<T>> {
        self.groups
    }

    /// The medoid of each group, in group order.
    pub fn medoids(&self) -> Vec<&T> {
        self.groups.iter().filter_map(|g| g.first()).collect()
    }

    /// Group index of each input item, aligned with the input order.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of groups.
    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// Number of assignment passes performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// `false` when the iteration cap was hit before the medoids settled.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl<T: fmt::Display> Grouping<T> {
    /// Render as text: a `Group {i}:` header per group, then one
    /// tab-indented line per member.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Render as CSV with one row per member: `group,medoid,element`.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("group,medoid,element\n");
        for (i, group) in self.groups.iter().enumerate() {
            let Some(medoid) = group.first() else {
                continue;
            };
            let medoid = medoid.to_string();
            for member in group {
                let member = member.to_string();
                out.push_str(&format!(
                    "{},{},{}\n",
                    i,
                    csv_field(&medoid),
                    csv_field(&member)
                ));
            }
        }
        out
    }
}

impl<T: fmt::Display> fmt::Display for Grouping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            writeln!(f, "Group {i}:")?;
            for member in group {
                writeln!(f, "\t{member}")?;
            }
        }
        Ok(())
    }
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grouping<String> {
        let items: Vec<String> = ["cat", "hat", "dog"].iter().map(|s| s.to_string()).collect();
        Grouping::from_indices(&items, &[vec![0, 1], vec![2]], 1, true)
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(sample().to_text(), "Group 0:\n\tcat\n\that\nGroup 1:\n\tdog\n");
    }

    #[test]
    fn test_csv_rendering() {
        assert_eq!(
            sample().to_csv(),
            "group,medoid,element\n0,cat,cat\n0,cat,hat\n1,dog,dog\n"
        );
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let items = vec!["a,b".to_string(), "say \"hi\"".to_string()];
        let grouping = Grouping::from_indices(&items, &[vec![0, 1]], 1, true);
        assert_eq!(
            grouping.to_csv(),
            "group,medoid,element\n0,\"a,b\",\"a,b\"\n0,\"a,b\",\"say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_labels_follow_input_order() {
        let items = vec!["x", "y", "z", "w"];
        let grouping = Grouping::from_indices(&items, &[vec![2, 0], vec![1, 3]], 2, false);

        assert_eq!(grouping.labels(), &[0, 1, 0, 1]);
        assert_eq!(grouping.medoids(), vec![&"z", &"y"]);
        assert_eq!(grouping.n_groups(), 2);
        assert_eq!(grouping.iterations(), 2);
        assert!(!grouping.converged());
    }
}
