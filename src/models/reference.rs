//! Reference data used by the transaction import
//!
//! Accounts map bank account numbers to display names; matching rules map
//! transaction descriptions to expense categories.

use super::money::Money;

/// A bank account listed in the `Accounts` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub number: String,
    pub name: String,
}

/// A rule from the `MatchingRules` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingRule {
    pub match_1: String,
    pub match_2: String,
    pub amount: String,
    pub expense: String,
}

impl MatchingRule {
    /// Check whether a transaction satisfies this rule
    ///
    /// The description must satisfy both match strings. When the rule's
    /// `Amount` is set, the transaction amount must also equal it, ignoring
    /// sign; such a rule never matches a lookup without an amount, nor when
    /// its `Amount` cell cannot be read as money.
    pub fn matches(&self, description: &str, amount: Option<Money>) -> bool {
        self.matches_description(description) && self.matches_amount(amount)
    }

    /// Check the rule's amount constraint
    pub fn matches_amount(&self, amount: Option<Money>) -> bool {
        let expected = self.amount.trim();
        if expected.is_empty() {
            return true;
        }
        match (Money::parse(expected), amount) {
            (Ok(expected), Some(amount)) => {
                expected.cents().unsigned_abs() == amount.cents().unsigned_abs()
            }
            _ => false,
        }
    }

    /// Check whether a transaction description satisfies this rule
    ///
    /// Both match strings must occur in the description (case-insensitive);
    /// an empty match string always matches.
    pub fn matches_description(&self, description: &str) -> bool {
        let haystack = description.to_lowercase();
        [&self.match_1, &self.match_2]
            .iter()
            .all(|needle| needle.is_empty() || haystack.contains(&needle.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_rule() {
        let rule = MatchingRule {
            match_1: "WOOLWORTHS".into(),
            match_2: String::new(),
            amount: String::new(),
            expense: "Groceries".into(),
        };

        assert!(rule.matches_description("Woolworths Metro 1234"));
        assert!(!rule.matches_description("Coles 55"));
    }

    #[test]
    fn test_matching_rule_requires_both_terms() {
        let rule = MatchingRule {
            match_1: "transfer".into(),
            match_2: "savings".into(),
            amount: String::new(),
            expense: "Savings".into(),
        };

        assert!(rule.matches_description("TRANSFER TO SAVINGS"));
        assert!(!rule.matches_description("TRANSFER TO CHEQUE"));
    }

    #[test]
    fn test_matching_rule_amount_constraint() {
        let rule = MatchingRule {
            match_1: "netflix".into(),
            match_2: String::new(),
            amount: "15.99".into(),
            expense: "Subscriptions".into(),
        };

        assert!(rule.matches("NETFLIX.COM", Some(Money::from_cents(-1599))));
        assert!(rule.matches("NETFLIX.COM", Some(Money::from_cents(1599))));
        assert!(!rule.matches("NETFLIX.COM", Some(Money::from_cents(-2299))));
        assert!(!rule.matches("NETFLIX.COM", None));
        assert!(!rule.matches("Spotify", Some(Money::from_cents(-1599))));
    }

    #[test]
    fn test_matching_rule_without_amount_matches_any_amount() {
        let rule = MatchingRule {
            match_1: "bakery".into(),
            match_2: String::new(),
            amount: "  ".into(),
            expense: "Groceries".into(),
        };

        assert!(rule.matches("Corner Bakery", None));
        assert!(rule.matches("Corner Bakery", Some(Money::from_cents(-450))));
    }

    #[test]
    fn test_matching_rule_unreadable_amount_never_matches() {
        let rule = MatchingRule {
            match_1: "bakery".into(),
            match_2: String::new(),
            amount: "about ten".into(),
            expense: "Groceries".into(),
        };

        assert!(!rule.matches("Corner Bakery", Some(Money::from_cents(-1000))));
    }
}
