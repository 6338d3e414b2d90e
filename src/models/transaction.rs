use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Literal value the interactive API docs submit for optional fields the
/// caller never touched. Treated everywhere as "field not supplied".
pub const PLACEHOLDER: &str = "string";

/// Payment lookup request, shared by the Tron and Ethereum endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsQuery {
    /// Sender wallet; absent means any sender matches.
    pub from_wallet: Option<String>,
    /// Recipient wallet, matched exactly.
    pub to_wallet: String,
    /// Expected amount in human-scale token units, e.g. "1.5".
    pub amount: String,
    /// Window start, "dd-mm-yyyy HH:MM:SS". Defaults to six hours ago.
    pub date_start: Option<String>,
    /// Window end, same format. Defaults to now.
    pub date_end: Option<String>,
    /// Advisory cap on how many transfers the upstream returns.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Advisory confirmed-only filter, where the upstream supports it.
    #[serde(default = "default_only_confirmed")]
    pub only_confirmed: bool,
}

fn default_limit() -> u32 {
    20
}

fn default_only_confirmed() -> bool {
    true
}

impl TransactionsQuery {
    /// Sender filter with the docs placeholder collapsed to "unspecified".
    pub fn sender(&self) -> Option<&str> {
        match self.from_wallet.as_deref() {
            None | Some(PLACEHOLDER) => None,
            other => other,
        }
    }
}

/// One entry from an upstream transaction list, considered for matching.
#[derive(Debug, Clone)]
pub struct CandidateTransaction {
    pub id: String,
    pub from: String,
    pub to: String,
    /// Upstream-native integer minor units, as received.
    pub raw_value: String,
    /// Token precision; 6 for TRC20 unless the transfer says otherwise,
    /// fixed 18 for native Ethereum value.
    pub decimals: u32,
}

impl CandidateTransaction {
    /// Raw minor units scaled down to a human-scale amount, as an exact
    /// fixed-point value. `None` when the raw value is not an integer or
    /// the precision exceeds what the representation holds; such a
    /// candidate can never match.
    pub fn normalized_value(&self) -> Option<Decimal> {
        let units: i128 = self.raw_value.trim().parse().ok()?;
        Decimal::try_from_i128_with_scale(units, self.decimals).ok()
    }
}

/// The yes/no payment confirmation answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchAnswer {
    pub answer: bool,
    pub transaction_id: Option<String>,
    pub from_address: Option<String>,
}

impl MatchAnswer {
    pub fn matched(transaction_id: String, from_address: String) -> Self {
        Self {
            answer: true,
            transaction_id: Some(transaction_id),
            from_address: Some(from_address),
        }
    }

    pub fn no_match() -> Self {
        Self {
            answer: false,
            transaction_id: None,
            from_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn candidate(raw_value: &str, decimals: u32) -> CandidateTransaction {
        CandidateTransaction {
            id: "tx".to_string(),
            from: String::new(),
            to: String::new(),
            raw_value: raw_value.to_string(),
            decimals,
        }
    }

    #[test]
    fn normalizes_trc20_minor_units() {
        let value = candidate("1000000", 6).normalized_value().unwrap();
        assert_eq!(value, Decimal::from_str("1.0").unwrap());
    }

    #[test]
    fn normalizes_wei() {
        let value = candidate("1000000000000000000", 18)
            .normalized_value()
            .unwrap();
        assert_eq!(value, Decimal::from_str("1.0").unwrap());
    }

    #[test]
    fn fractional_amounts_stay_exact() {
        let value = candidate("1500000", 6).normalized_value().unwrap();
        assert_eq!(value, Decimal::from_str("1.5").unwrap());
    }

    #[test]
    fn garbage_raw_value_never_matches() {
        assert!(candidate("not-a-number", 6).normalized_value().is_none());
    }

    #[test]
    fn unrepresentable_precision_never_matches() {
        assert!(candidate("1", 40).normalized_value().is_none());
    }

    #[test]
    fn placeholder_sender_means_unspecified() {
        let query: TransactionsQuery = serde_json::from_value(serde_json::json!({
            "from_wallet": "string",
            "to_wallet": "TReceiver",
            "amount": "1.0"
        }))
        .unwrap();
        assert_eq!(query.sender(), None);
        assert_eq!(query.limit, 20);
        assert!(query.only_confirmed);
    }

    #[test]
    fn explicit_sender_is_kept() {
        let query: TransactionsQuery = serde_json::from_value(serde_json::json!({
            "from_wallet": "TSender",
            "to_wallet": "TReceiver",
            "amount": "1.0",
            "limit": 5,
            "only_confirmed": false
        }))
        .unwrap();
        assert_eq!(query.sender(), Some("TSender"));
        assert_eq!(query.limit, 5);
        assert!(!query.only_confirmed);
    }
}
