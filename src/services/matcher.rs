use crate::{
    error::GatewayError,
    models::{CandidateTransaction, MatchAnswer, TransactionsQuery, PLACEHOLDER},
};
use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Every date bound accepted by the gateway uses this format, naive time,
/// no timezone.
pub const DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

const DEFAULT_LOOKBACK_HOURS: i64 = 6;

/// Time range a query is interested in, computed once per request and
/// discarded after use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ResolvedWindow {
    pub fn start_millis(&self) -> i64 {
        self.start.and_utc().timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.and_utc().timestamp_millis()
    }
}

/// Resolves the query's date bounds against `now`. A missing bound, or one
/// equal to the docs placeholder, falls back to the default window of the
/// last six hours. A supplied bound must parse strictly.
pub fn resolve_window(
    date_start: Option<&str>,
    date_end: Option<&str>,
    now: NaiveDateTime,
) -> Result<ResolvedWindow, GatewayError> {
    let start = match supplied(date_start) {
        Some(raw) => parse_bound(raw)?,
        None => now - Duration::hours(DEFAULT_LOOKBACK_HOURS),
    };
    let end = match supplied(date_end) {
        Some(raw) => parse_bound(raw)?,
        None => now,
    };
    Ok(ResolvedWindow { start, end })
}

fn supplied(raw: Option<&str>) -> Option<&str> {
    match raw {
        None | Some(PLACEHOLDER) => None,
        other => other,
    }
}

fn parse_bound(raw: &str) -> Result<NaiveDateTime, GatewayError> {
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT).map_err(|_| GatewayError::InvalidDateFormat)
}

/// The expected amount must be a finite decimal.
pub fn parse_amount(raw: &str) -> Result<Decimal, GatewayError> {
    Decimal::from_str(raw.trim()).map_err(|_| GatewayError::InvalidAmount)
}

/// One upstream transaction list the matcher can draw candidates from.
///
/// Implementations build the outbound request, perform the single network
/// call, and decode the response leniently. How much of the query the
/// upstream honors varies: Trongrid applies the window and limit
/// server-side, Etherscan ignores both and returns full account history.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn fetch_candidates(
        &self,
        query: &TransactionsQuery,
        window: &ResolvedWindow,
    ) -> Result<Vec<CandidateTransaction>, GatewayError>;
}

/// Answers whether the payment described by `query` shows up in `source`.
///
/// Validation happens before the outbound call: a malformed amount or date
/// bound never reaches the network. "No match" is a normal successful
/// answer, not an error.
pub async fn confirm_payment(
    source: &dyn LedgerSource,
    query: &TransactionsQuery,
) -> Result<MatchAnswer, GatewayError> {
    let amount = parse_amount(&query.amount)?;
    let now = Utc::now().naive_utc();
    let window = resolve_window(query.date_start.as_deref(), query.date_end.as_deref(), now)?;

    let candidates = source.fetch_candidates(query, &window).await?;
    Ok(scan(&candidates, query.sender(), &query.to_wallet, amount))
}

/// Forward scan over the candidates in upstream order, returning the first
/// one whose sender, recipient, and exact normalized value all line up.
pub fn scan(
    candidates: &[CandidateTransaction],
    sender: Option<&str>,
    recipient: &str,
    amount: Decimal,
) -> MatchAnswer {
    for tx in candidates {
        if sender.is_some_and(|s| tx.from != s) {
            continue;
        }
        if tx.to != recipient {
            continue;
        }
        if tx.normalized_value() == Some(amount) {
            return MatchAnswer::matched(tx.id.clone(), tx.from.clone());
        }
    }
    MatchAnswer::no_match()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, from: &str, to: &str, raw_value: &str, decimals: u32) -> CandidateTransaction {
        CandidateTransaction {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            raw_value: raw_value.to_string(),
            decimals,
        }
    }

    fn query(amount: &str) -> TransactionsQuery {
        serde_json::from_value(serde_json::json!({
            "to_wallet": "TReceiver",
            "amount": amount,
        }))
        .unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("15-03-2024 12:00:00", DATE_FORMAT).unwrap()
    }

    struct Fixed(Vec<CandidateTransaction>);

    #[async_trait]
    impl LedgerSource for Fixed {
        async fn fetch_candidates(
            &self,
            _query: &TransactionsQuery,
            _window: &ResolvedWindow,
        ) -> Result<Vec<CandidateTransaction>, GatewayError> {
            Ok(self.0.clone())
        }
    }

    struct MustNotCall;

    #[async_trait]
    impl LedgerSource for MustNotCall {
        async fn fetch_candidates(
            &self,
            _query: &TransactionsQuery,
            _window: &ResolvedWindow,
        ) -> Result<Vec<CandidateTransaction>, GatewayError> {
            panic!("validation must reject before any outbound call");
        }
    }

    #[test]
    fn default_window_is_last_six_hours() {
        let window = resolve_window(None, None, now()).unwrap();
        assert_eq!(window.start, now() - Duration::hours(6));
        assert_eq!(window.end, now());
    }

    #[test]
    fn placeholder_bounds_take_the_default() {
        let window = resolve_window(Some("string"), Some("string"), now()).unwrap();
        assert_eq!(window.start, now() - Duration::hours(6));
        assert_eq!(window.end, now());
    }

    #[test]
    fn explicit_bounds_parse_strictly() {
        let window =
            resolve_window(Some("01-03-2024 08:30:00"), Some("02-03-2024 09:00:00"), now())
                .unwrap();
        assert_eq!(
            window.start,
            NaiveDateTime::parse_from_str("01-03-2024 08:30:00", DATE_FORMAT).unwrap()
        );
        assert_eq!(
            window.end,
            NaiveDateTime::parse_from_str("02-03-2024 09:00:00", DATE_FORMAT).unwrap()
        );
    }

    #[test]
    fn malformed_bound_is_a_validation_error() {
        let err = resolve_window(Some("2024-03-01 08:30:00"), None, now()).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidDateFormat));
    }

    #[test]
    fn window_converts_to_epoch_millis() {
        let window = resolve_window(Some("01-01-2024 00:00:00"), None, now()).unwrap();
        assert_eq!(window.start_millis(), 1_704_067_200_000);
    }

    #[test]
    fn amount_must_be_numeric() {
        assert!(parse_amount("1.5").is_ok());
        assert!(matches!(
            parse_amount("one and a half"),
            Err(GatewayError::InvalidAmount)
        ));
    }

    #[tokio::test]
    async fn bad_amount_rejected_before_fetch() {
        let err = confirm_payment(&MustNotCall, &query("not-a-number"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidAmount));
    }

    #[tokio::test]
    async fn bad_date_rejected_before_fetch() {
        let mut q = query("1.0");
        q.date_start = Some("yesterday".to_string());
        let err = confirm_payment(&MustNotCall, &q).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidDateFormat));
    }

    #[tokio::test]
    async fn first_qualifying_candidate_wins() {
        let source = Fixed(vec![
            candidate("tx-1", "TOther", "TSomeoneElse", "1000000", 6),
            candidate("tx-2", "TAlice", "TReceiver", "1000000", 6),
            candidate("tx-3", "TBob", "TReceiver", "1000000", 6),
        ]);
        let answer = confirm_payment(&source, &query("1.0")).await.unwrap();
        assert_eq!(
            answer,
            MatchAnswer::matched("tx-2".to_string(), "TAlice".to_string())
        );
    }

    #[tokio::test]
    async fn sender_filter_is_exact_when_supplied() {
        let source = Fixed(vec![
            candidate("tx-1", "TAlice", "TReceiver", "1000000", 6),
            candidate("tx-2", "TBob", "TReceiver", "1000000", 6),
        ]);
        let mut q = query("1.0");
        q.from_wallet = Some("TBob".to_string());
        let answer = confirm_payment(&source, &q).await.unwrap();
        assert_eq!(
            answer,
            MatchAnswer::matched("tx-2".to_string(), "TBob".to_string())
        );
    }

    #[tokio::test]
    async fn no_match_is_a_successful_negative() {
        let source = Fixed(vec![candidate("tx-1", "TAlice", "TReceiver", "2000000", 6)]);
        let answer = confirm_payment(&source, &query("1.0")).await.unwrap();
        assert_eq!(answer, MatchAnswer::no_match());
    }

    #[test]
    fn recipient_match_is_case_sensitive() {
        let candidates = vec![candidate("tx-1", "TAlice", "treceiver", "1000000", 6)];
        let answer = scan(&candidates, None, "TReceiver", parse_amount("1.0").unwrap());
        assert_eq!(answer, MatchAnswer::no_match());
    }

    #[test]
    fn amount_comparison_is_exact_across_scales() {
        // 1.5 must match 1500000 at 6 decimals and nothing close to it
        let candidates = vec![
            candidate("tx-1", "TAlice", "TReceiver", "1500001", 6),
            candidate("tx-2", "TAlice", "TReceiver", "1500000", 6),
        ];
        let answer = scan(&candidates, None, "TReceiver", parse_amount("1.5").unwrap());
        assert_eq!(
            answer,
            MatchAnswer::matched("tx-2".to_string(), "TAlice".to_string())
        );
    }
}
