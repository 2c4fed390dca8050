//! Heuristic column-role detection.
//!
//! Datasets arrive without a declared schema, so every consumer finds the
//! columns it cares about by looking for keywords in the column names. The
//! rules live in one table, [`ROLE_RULES`], and are evaluated fresh for each
//! dataset. All comparisons are case-insensitive substring tests, and matches
//! keep the dataset's original column order.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Names containing `sla` or `sta`.
    Sla,
    /// SLA columns that also mention `breach`. Drives the normal/delayed split.
    BreachFlag,
    /// Names containing `sla` or `breach`. Reported as flag distributions.
    SlaMetric,
    Delay,
    /// Names containing `exception` or `reject`.
    Exception,
    Status,
    TransporterName,
    /// Route names or route codes.
    Route,
}

/// A name matches when it contains one of `any_of` and, if `and_any_of` is
/// non-empty, also one of `and_any_of`.
#[derive(Debug)]
pub struct RoleRule {
    pub role: ColumnRole,
    pub any_of: &'static [&'static str],
    pub and_any_of: &'static [&'static str],
}

impl RoleRule {
    pub fn matches(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|kw| lower.contains(kw));
        contains_any(self.any_of) && (self.and_any_of.is_empty() || contains_any(self.and_any_of))
    }
}

pub const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        role: ColumnRole::Sla,
        any_of: &["sla", "sta"],
        and_any_of: &[],
    },
    RoleRule {
        role: ColumnRole::BreachFlag,
        any_of: &["sla", "sta"],
        and_any_of: &["breach"],
    },
    RoleRule {
        role: ColumnRole::SlaMetric,
        any_of: &["sla", "breach"],
        and_any_of: &[],
    },
    RoleRule {
        role: ColumnRole::Delay,
        any_of: &["delay"],
        and_any_of: &[],
    },
    RoleRule {
        role: ColumnRole::Exception,
        any_of: &["exception", "reject"],
        and_any_of: &[],
    },
    RoleRule {
        role: ColumnRole::Status,
        any_of: &["status"],
        and_any_of: &[],
    },
    RoleRule {
        role: ColumnRole::TransporterName,
        any_of: &["transporter"],
        and_any_of: &["name"],
    },
    RoleRule {
        role: ColumnRole::Route,
        any_of: &["route"],
        and_any_of: &["name", "code"],
    },
];

/// Role → matching column names for one dataset.
#[derive(Debug, Clone, Default)]
pub struct ColumnRoles {
    matches: HashMap<ColumnRole, Vec<String>>,
}

impl ColumnRoles {
    pub fn classify<S: AsRef<str>>(column_names: &[S]) -> Self {
        let mut matches = HashMap::new();
        for rule in ROLE_RULES {
            let columns: Vec<String> = column_names
                .iter()
                .map(AsRef::<str>::as_ref)
                .filter(|name| rule.matches(name))
                .map(str::to_owned)
                .collect();
            matches.insert(rule.role, columns);
        }
        Self { matches }
    }

    /// All matching columns, in dataset order.
    pub fn columns(&self, role: ColumnRole) -> &[String] {
        self.matches.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    /// The column single-column consumers use: the first match.
    pub fn first(&self, role: ColumnRole) -> Option<&str> {
        self.columns(role).first().map(String::as_str)
    }

    /// Rule order, skipping roles with no match.
    pub fn detected(&self) -> impl Iterator<Item = (ColumnRole, &[String])> + '_ {
        ROLE_RULES
            .iter()
            .map(|rule| (rule.role, self.columns(rule.role)))
            .filter(|(_, cols)| !cols.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive() {
        let roles = ColumnRoles::classify(&["Trip_ID", "SLA_Breach", "Current_STATUS"]);
        assert_eq!(roles.columns(ColumnRole::SlaMetric), ["SLA_Breach"]);
        assert_eq!(roles.first(ColumnRole::Status), Some("Current_STATUS"));
    }

    #[test]
    fn test_breach_flag_requires_both_keywords() {
        let roles =
            ColumnRoles::classify(&["sla_hours", "breach_reason", "sla_breach", "status_breach"]);
        // `status` carries `sta`, so it qualifies as an SLA column too.
        assert_eq!(
            roles.columns(ColumnRole::BreachFlag),
            ["sla_breach", "status_breach"]
        );
        assert_eq!(
            roles.columns(ColumnRole::SlaMetric),
            ["sla_hours", "breach_reason", "sla_breach", "status_breach"]
        );
    }

    #[test]
    fn test_compound_roles() {
        let roles = ColumnRoles::classify(&[
            "transporter_id",
            "transporter_name",
            "route",
            "route_code",
            "route_name",
        ]);
        assert_eq!(roles.columns(ColumnRole::TransporterName), ["transporter_name"]);
        assert_eq!(roles.columns(ColumnRole::Route), ["route_code", "route_name"]);
        assert_eq!(roles.first(ColumnRole::Route), Some("route_code"));
    }

    #[test]
    fn test_exception_matches_reject() {
        let roles = ColumnRoles::classify(&["trip_id", "Reject_Reason", "exception_type"]);
        assert_eq!(roles.first(ColumnRole::Exception), Some("Reject_Reason"));
        assert_eq!(roles.columns(ColumnRole::Exception).len(), 2);
    }

    #[test]
    fn test_unmatched_roles_are_empty() {
        let roles = ColumnRoles::classify(&["a", "b"]);
        assert!(roles.columns(ColumnRole::Delay).is_empty());
        assert!(roles.first(ColumnRole::Status).is_none());
        assert_eq!(roles.detected().count(), 0);
    }
}
