use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::a001_catalog_item::CatalogColumn;

/// A form value that names no known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// How many values an operator needs from the filter row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueArity {
    /// IS NULL / IS NOT NULL
    None,
    Single,
    /// BETWEEN value AND value2
    Double,
}

/// Advanced filter operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    NotContains,
    Between,
    IsNull,
    IsNotNull,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 11] = [
        FilterOperator::Eq,
        FilterOperator::Neq,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::Contains,
        FilterOperator::NotContains,
        FilterOperator::Between,
        FilterOperator::IsNull,
        FilterOperator::IsNotNull,
    ];

    pub fn arity(&self) -> ValueArity {
        match self {
            FilterOperator::IsNull | FilterOperator::IsNotNull => ValueArity::None,
            FilterOperator::Between => ValueArity::Double,
            _ => ValueArity::Single,
        }
    }

    /// Wire name, also used as `<option value>`
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::Between => "between",
            FilterOperator::IsNull => "is_null",
            FilterOperator::IsNotNull => "is_not_null",
        }
    }

    /// Get display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "equals",
            FilterOperator::Neq => "not equals",
            FilterOperator::Gt => "greater than",
            FilterOperator::Gte => "greater or equal",
            FilterOperator::Lt => "less than",
            FilterOperator::Lte => "less or equal",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "does not contain",
            FilterOperator::Between => "between",
            FilterOperator::IsNull => "is empty",
            FilterOperator::IsNotNull => "is not empty",
        }
    }

    /// Get display symbol for filter tags
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Neq => "≠",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => "≥",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "≤",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "does not contain",
            FilterOperator::Between => "between",
            FilterOperator::IsNull => "is empty",
            FilterOperator::IsNotNull => "is not empty",
        }
    }
}

/// How a condition joins the chain built so far (strictly left to right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterLogic {
    And,
    Or,
}

impl FilterLogic {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterLogic::And => "AND",
            FilterLogic::Or => "OR",
        }
    }

}

impl FromStr for FilterOperator {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("filter operator", s))
    }
}

impl FromStr for FilterLogic {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(FilterLogic::And),
            "OR" => Ok(FilterLogic::Or),
            _ => Err(UnknownVariant::new("filter logic", s)),
        }
    }
}

/// One validated predicate of the advanced filter chain as sent to the table endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub id: u32,
    pub column: CatalogColumn,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
    /// `None` for the first condition (implicit WHERE)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<FilterLogic>,
}

impl FilterCondition {
    /// Whether the values satisfy the operator's arity
    pub fn has_required_values(&self) -> bool {
        match self.operator.arity() {
            ValueArity::None => true,
            ValueArity::Single => !self.value.trim().is_empty(),
            ValueArity::Double => {
                !self.value.trim().is_empty()
                    && self
                        .value2
                        .as_deref()
                        .map(|v| !v.trim().is_empty())
                        .unwrap_or(false)
            }
        }
    }

    /// Human-readable text for filter tags, e.g. `Product Price > 10`
    pub fn display_text(&self) -> String {
        let field = self.column.label();
        let body = match self.operator.arity() {
            ValueArity::None => format!("{} {}", field, self.operator.symbol()),
            ValueArity::Single => format!("{} {} {}", field, self.operator.symbol(), self.value),
            ValueArity::Double => format!(
                "{} between {} and {}",
                field,
                self.value,
                self.value2.as_deref().unwrap_or_default()
            ),
        };
        match self.logic {
            Some(logic) => format!("{} {}", logic.as_str(), body),
            None => body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(op: FilterOperator, value: &str, value2: Option<&str>) -> FilterCondition {
        FilterCondition {
            id: 1,
            column: CatalogColumn::ProductPrice,
            operator: op,
            value: value.to_string(),
            value2: value2.map(str::to_string),
            logic: None,
        }
    }

    #[test]
    fn test_operator_wire_names() {
        for op in FilterOperator::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
            assert_eq!(op.as_str().parse::<FilterOperator>(), Ok(op));
        }
        assert_eq!(serde_json::to_string(&FilterLogic::Or).unwrap(), "\"OR\"");
        assert_eq!("OR".parse::<FilterLogic>(), Ok(FilterLogic::Or));
        assert_eq!(
            "like".parse::<FilterOperator>(),
            Err(UnknownVariant::new("filter operator", "like"))
        );
    }

    #[test]
    fn test_required_values_by_arity() {
        assert!(cond(FilterOperator::Gt, "10", None).has_required_values());
        assert!(!cond(FilterOperator::Gt, " ", None).has_required_values());
        assert!(cond(FilterOperator::Between, "1", Some("5")).has_required_values());
        assert!(!cond(FilterOperator::Between, "1", Some("")).has_required_values());
        assert!(!cond(FilterOperator::Between, "", Some("5")).has_required_values());
        assert!(cond(FilterOperator::IsNull, "", None).has_required_values());
        assert!(cond(FilterOperator::IsNotNull, "", None).has_required_values());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(
            cond(FilterOperator::Gt, "10", None).display_text(),
            "Product Price > 10"
        );
        let mut c = cond(FilterOperator::Between, "1", Some("5"));
        c.logic = Some(FilterLogic::Or);
        assert_eq!(c.display_text(), "OR Product Price between 1 and 5");
    }
}
