use crate::chunkable::Chunkable;
use crate::group::GroupedNode;
use crate::node::SourceUnit;

/// Grammar-specific sibling grouping, injected into the splitter.
///
/// Implementations must be pure and deterministic, preserve source order,
/// and neither drop nor duplicate elements; the only permitted rewrite is
/// fusing an adjacent run of siblings into a single unit. The splitter
/// validates these obligations on every pass.
pub trait SiblingGrouping<U: Chunkable> {
    fn group(&self, siblings: Vec<U>) -> Vec<U>;
}

impl<U, F> SiblingGrouping<U> for F
where
    U: Chunkable,
    F: Fn(Vec<U>) -> Vec<U>,
{
    fn group(&self, siblings: Vec<U>) -> Vec<U> {
        self(siblings)
    }
}

/// One grouping rule: a run of `leading` kinds fuses with the next sibling
/// whose kind is listed in `primary`.
#[derive(Debug, Clone)]
pub struct GroupingRule {
    /// Kinds that attach forward to the next primary sibling
    pub leading: &'static [&'static str],
    /// Definition kinds a leading run attaches to
    pub primary: &'static [&'static str],
}

/// Declarative rule set consumed by the grouping pass.
///
/// Rules are data, not code: the mechanism below is grammar-agnostic, and
/// each language ships its own table of kinds. Already-fused units pass
/// through untouched, so applying the same rules twice is the identity.
#[derive(Debug, Clone, Default)]
pub struct GroupingRules {
    rules: Vec<GroupingRule>,
}

impl GroupingRules {
    /// No grouping: every sibling stays an individual unit
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a rule set from custom rules
    pub fn with_rules(rules: Vec<GroupingRule>) -> Self {
        Self { rules }
    }

    /// Attributes and comments bind to the item they annotate
    pub fn rust() -> Self {
        Self::with_rules(vec![GroupingRule {
            leading: &["attribute_item", "line_comment", "block_comment"],
            primary: &[
                "function_item",
                "struct_item",
                "enum_item",
                "union_item",
                "impl_item",
                "trait_item",
                "mod_item",
                "const_item",
                "static_item",
                "type_item",
                "macro_definition",
            ],
        }])
    }

    /// Decorators and comments bind to the following definition.
    ///
    /// tree-sitter-python already wraps a decorator with its definition in a
    /// `decorated_definition` node; the decorator kind is listed for rule
    /// sets applied below that level.
    pub fn python() -> Self {
        Self::with_rules(vec![GroupingRule {
            leading: &["comment", "decorator"],
            primary: &[
                "function_definition",
                "class_definition",
                "decorated_definition",
            ],
        }])
    }

    pub fn javascript() -> Self {
        Self::with_rules(vec![GroupingRule {
            leading: &["comment", "decorator"],
            primary: &[
                "function_declaration",
                "generator_function_declaration",
                "class_declaration",
                "lexical_declaration",
                "variable_declaration",
                "export_statement",
            ],
        }])
    }

    pub fn typescript() -> Self {
        Self::with_rules(vec![GroupingRule {
            leading: &["comment", "decorator"],
            primary: &[
                "function_declaration",
                "generator_function_declaration",
                "class_declaration",
                "abstract_class_declaration",
                "interface_declaration",
                "type_alias_declaration",
                "enum_declaration",
                "lexical_declaration",
                "variable_declaration",
                "export_statement",
                "ambient_declaration",
            ],
        }])
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn is_leading(&self, kind: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.leading.iter().any(|k| *k == kind))
    }

    /// Whether a non-empty run of leading units attaches to `kind` under
    /// some rule. The run must be leading under the same rule that names
    /// `kind` as primary.
    fn fuses_with(&self, run: &[SourceUnit<'_>], kind: &str) -> bool {
        if run.is_empty() {
            return false;
        }
        self.rules.iter().any(|rule| {
            rule.primary.iter().any(|k| *k == kind)
                && run
                    .iter()
                    .all(|unit| rule.leading.iter().any(|k| *k == unit.kind()))
        })
    }
}

impl<'tree> SiblingGrouping<SourceUnit<'tree>> for GroupingRules {
    fn group(&self, siblings: Vec<SourceUnit<'tree>>) -> Vec<SourceUnit<'tree>> {
        if self.rules.is_empty() {
            return siblings;
        }

        let mut out = Vec::with_capacity(siblings.len());
        let mut run: Vec<SourceUnit<'tree>> = Vec::new();

        for unit in siblings {
            if !unit.is_fused() && self.is_leading(unit.kind()) {
                run.push(unit);
                continue;
            }
            if !unit.is_fused() && self.fuses_with(&run, unit.kind()) {
                run.push(unit);
                let group = GroupedNode::new(std::mem::take(&mut run))
                    .expect("fused run always contains the primary unit");
                out.push(SourceUnit::Group(group));
                continue;
            }
            // Not part of a run: flush any dangling leaders, keep the unit.
            out.append(&mut run);
            out.push(unit);
        }

        out.append(&mut run);
        out
    }
}
