//! # Fact Tree
//!
//! Facts are named system attributes. A fact either carries a scalar value
//! (a *leaf*) or a list of sub-facts (a *category*). Tables render one level
//! of nesting, so lookups search top-level facts and their direct sub-facts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fact identifier, unique within one fact tree.
pub type FactId = u64;

/// Value carried by a fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Scalar value of a leaf fact
    Scalar(String),
    /// Sub-facts of a category
    Category(Vec<Fact>),
}

/// A named fact in the tree.
///
/// A tree is at most two levels deep: sub-facts of a category are always
/// leaves. Sub-categories, whether built or deserialized, are replaced by
/// their leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFact")]
pub struct Fact {
    /// Identifier used by selection
    pub id: FactId,
    /// Display name; category names key the expansion set
    pub name: String,
    /// Scalar value or sub-facts
    pub(crate) value: FactValue,
}

/// Wire shape of a fact before nesting is normalized.
#[derive(Deserialize)]
struct RawFact {
    id: FactId,
    name: String,
    value: FactValue,
}

impl From<RawFact> for Fact {
    fn from(raw: RawFact) -> Self {
        match raw.value {
            FactValue::Scalar(value) => Self::leaf(raw.id, raw.name, value),
            FactValue::Category(sub_facts) => Self::category(raw.id, raw.name, sub_facts),
        }
    }
}

impl Fact {
    /// Create a leaf fact.
    pub fn leaf(id: FactId, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: FactValue::Scalar(value.into()),
        }
    }

    /// Create a category fact.
    ///
    /// Sub-facts that are themselves categories are replaced by their leaves;
    /// the sub-category's own id is dropped.
    pub fn category(id: FactId, name: impl Into<String>, sub_facts: Vec<Fact>) -> Self {
        let name = name.into();
        let mut leaves = Vec::with_capacity(sub_facts.len());
        for sub in sub_facts {
            match sub.value {
                FactValue::Scalar(_) => leaves.push(sub),
                FactValue::Category(nested) => {
                    tracing::debug!(category = %name, sub_category = %sub.name, "flattening nested category");
                    leaves.extend(nested);
                }
            }
        }

        Self {
            id,
            name,
            value: FactValue::Category(leaves),
        }
    }

    /// Scalar value or sub-facts.
    pub fn value(&self) -> &FactValue {
        &self.value
    }

    /// Whether this fact is a category.
    pub fn is_category(&self) -> bool {
        matches!(self.value, FactValue::Category(_))
    }

    /// Sub-facts of a category; empty for leaves.
    pub fn sub_facts(&self) -> &[Fact] {
        match &self.value {
            FactValue::Category(sub_facts) => sub_facts,
            FactValue::Scalar(_) => &[],
        }
    }

    /// Scalar value of a leaf; `None` for categories.
    pub fn scalar_value(&self) -> Option<&str> {
        match &self.value {
            FactValue::Scalar(value) => Some(value),
            FactValue::Category(_) => None,
        }
    }

    /// This fact's id followed by the ids of its sub-facts.
    pub fn ids(&self) -> impl Iterator<Item = FactId> + '_ {
        std::iter::once(self.id).chain(self.sub_facts().iter().map(|sub| sub.id))
    }
}

/// Find a fact by id among top-level facts and their sub-facts.
pub fn find_fact(facts: &[Fact], id: FactId) -> Option<&Fact> {
    facts.iter().find_map(|fact| {
        if fact.id == id {
            Some(fact)
        } else {
            fact.sub_facts().iter().find(|sub| sub.id == id)
        }
    })
}

/// Find a top-level category by name.
pub fn find_category<'a>(facts: &'a [Fact], name: &str) -> Option<&'a Fact> {
    facts
        .iter()
        .find(|fact| fact.is_category() && fact.name == name)
}

/// Every id in the tree: top-level facts and their sub-facts.
pub fn all_fact_ids(facts: &[Fact]) -> impl Iterator<Item = FactId> + '_ {
    facts.iter().flat_map(Fact::ids)
}

/// Ids of the rows a count covers: leaves and sub-facts, never category rows.
pub(crate) fn countable_ids(facts: &[Fact]) -> impl Iterator<Item = FactId> + '_ {
    facts.iter().flat_map(|fact| {
        let own = (!fact.is_category()).then_some(fact.id);
        own.into_iter()
            .chain(fact.sub_facts().iter().map(|sub| sub.id))
    })
}

/// Count leaves and sub-facts for display. Category rows are not counted.
pub fn count_facts(facts: &[Fact]) -> usize {
    countable_ids(facts).count()
}

// =============================================================================
// Baseline Documents
// =============================================================================

/// A fact as stored on a baseline: scalar `value` or nested `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineFact {
    /// Fact name
    pub name: String,
    /// Scalar value (leaf facts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Nested facts (categories)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<BaselineFact>>,
}

/// A named, user-edited reference set of facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    /// Baseline identifier
    pub id: Uuid,
    /// Name shown in headers and exports
    pub display_name: String,
    /// Server-reported fact count, if provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_count: Option<u64>,
    /// Facts in document order
    #[serde(default)]
    pub baseline_facts: Vec<BaselineFact>,
}

impl Baseline {
    /// Convert the baseline's facts into a fact tree.
    ///
    /// Ids are assigned depth-first in document order starting at 0, so a
    /// category's id always precedes the ids of its sub-facts. Nested
    /// categories below the first level are flattened into their parent.
    pub fn fact_tree(&self) -> Vec<Fact> {
        let mut next_id: FactId = 0;
        let mut tree = Vec::with_capacity(self.baseline_facts.len());

        for fact in &self.baseline_facts {
            let id = next_id;
            next_id += 1;

            match &fact.values {
                Some(values) => {
                    let mut sub_facts = Vec::with_capacity(values.len());
                    for (name, value) in flatten_leaves(values) {
                        sub_facts.push(Fact::leaf(next_id, name, value));
                        next_id += 1;
                    }
                    tree.push(Fact::category(id, fact.name.clone(), sub_facts));
                }
                None => {
                    let value = fact.value.clone().unwrap_or_default();
                    tree.push(Fact::leaf(id, fact.name.clone(), value));
                }
            }
        }

        tree
    }
}

fn flatten_leaves(values: &[BaselineFact]) -> Vec<(String, String)> {
    let mut leaves = Vec::with_capacity(values.len());
    for fact in values {
        match &fact.values {
            Some(nested) => leaves.extend(flatten_leaves(nested)),
            None => leaves.push((fact.name.clone(), fact.value.clone().unwrap_or_default())),
        }
    }
    leaves
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Fact;

    /// `A` leaf followed by category `B` with sub-facts `B1`, `B2`.
    pub fn scenario_tree() -> Vec<Fact> {
        vec![
            Fact::leaf(1, "A", "x"),
            Fact::category(
                2,
                "B",
                vec![Fact::leaf(3, "B1", "y"), Fact::leaf(4, "B2", "z")],
            ),
        ]
    }

    /// Two categories of three sub-facts each plus one standalone leaf.
    pub fn counting_tree() -> Vec<Fact> {
        vec![
            Fact::category(
                0,
                "cpu",
                vec![
                    Fact::leaf(1, "cores", "4"),
                    Fact::leaf(2, "sockets", "1"),
                    Fact::leaf(3, "model", "Xeon"),
                ],
            ),
            Fact::leaf(4, "arch", "x86_64"),
            Fact::category(
                5,
                "network",
                vec![
                    Fact::leaf(6, "eth0", "10.0.0.2"),
                    Fact::leaf(7, "eth1", "10.0.0.3"),
                    Fact::leaf(8, "lo", "127.0.0.1"),
                ],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{counting_tree, scenario_tree};
    use super::*;

    #[test]
    fn count_facts_skips_category_rows() {
        assert_eq!(count_facts(&counting_tree()), 7);
        assert_eq!(count_facts(&scenario_tree()), 3);
        assert_eq!(count_facts(&[]), 0);
    }

    #[test]
    fn find_fact_searches_sub_facts() {
        let facts = scenario_tree();
        assert_eq!(find_fact(&facts, 1).map(|f| f.name.as_str()), Some("A"));
        assert_eq!(find_fact(&facts, 4).map(|f| f.name.as_str()), Some("B2"));
        assert!(find_fact(&facts, 99).is_none());
    }

    #[test]
    fn find_category_ignores_leaves() {
        let facts = scenario_tree();
        assert!(find_category(&facts, "B").is_some());
        assert!(find_category(&facts, "A").is_none());
    }

    #[test]
    fn fact_deserializes_scalar_and_category_values() {
        let json = r#"[
            {"id": 1, "name": "A", "value": "x"},
            {"id": 2, "name": "B", "value": [
                {"id": 3, "name": "B1", "value": "y"},
                {"id": 4, "name": "B2", "value": "z"}
            ]}
        ]"#;
        let facts: Vec<Fact> = serde_json::from_str(json).unwrap();
        assert_eq!(facts, scenario_tree());
    }

    #[test]
    fn baseline_fact_tree_assigns_depth_first_ids() {
        let json = r#"{
            "id": "4d8d7c4a-2b0a-4a55-9a0e-6a3f0c1d2e3f",
            "display_name": "web servers",
            "baseline_facts": [
                {"name": "arch", "value": "x86_64"},
                {"name": "cpu", "values": [
                    {"name": "cores", "value": "4"},
                    {"name": "model", "value": "Xeon"}
                ]},
                {"name": "kernel", "value": "5.14"}
            ]
        }"#;
        let baseline: Baseline = serde_json::from_str(json).unwrap();
        let tree = baseline.fact_tree();

        let ids: Vec<_> = all_fact_ids(&tree).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert!(tree[1].is_category());
        assert_eq!(tree[1].sub_facts()[1].scalar_value(), Some("Xeon"));
        assert_eq!(tree[2].name, "kernel");
    }

    #[test]
    fn deserialized_sub_category_is_replaced_by_its_leaves() {
        let json = r#"[
            {"id": 1, "name": "net", "value": [
                {"id": 2, "name": "eth0", "value": [
                    {"id": 3, "name": "ip", "value": "10.0.0.1"}
                ]},
                {"id": 4, "name": "lo", "value": "127.0.0.1"}
            ]}
        ]"#;
        let facts: Vec<Fact> = serde_json::from_str(json).unwrap();

        assert_eq!(
            facts,
            vec![Fact::category(
                1,
                "net",
                vec![Fact::leaf(3, "ip", "10.0.0.1"), Fact::leaf(4, "lo", "127.0.0.1")]
            )]
        );
        assert!(find_fact(&facts, 2).is_none());
        assert_eq!(all_fact_ids(&facts).collect::<Vec<_>>(), vec![1, 3, 4]);
        assert_eq!(count_facts(&facts), 2);
    }

    #[test]
    fn category_constructor_keeps_sub_facts_as_leaves() {
        let nested = Fact::category(2, "eth0", vec![Fact::leaf(3, "ip", "10.0.0.1")]);
        let empty = Fact::category(5, "bond0", Vec::new());
        let net = Fact::category(1, "net", vec![nested, empty]);

        assert!(net.sub_facts().iter().all(|sub| !sub.is_category()));
        assert_eq!(net.ids().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn baseline_fact_tree_flattens_deep_categories() {
        let baseline = Baseline {
            id: Uuid::nil(),
            display_name: "deep".to_string(),
            fact_count: None,
            baseline_facts: vec![BaselineFact {
                name: "outer".to_string(),
                value: None,
                values: Some(vec![BaselineFact {
                    name: "inner".to_string(),
                    value: None,
                    values: Some(vec![BaselineFact {
                        name: "leaf".to_string(),
                        value: Some("1".to_string()),
                        values: None,
                    }]),
                }]),
            }],
        };

        let tree = baseline.fact_tree();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].sub_facts().len(), 1);
        assert_eq!(tree[0].sub_facts()[0].name, "leaf");
    }
}
