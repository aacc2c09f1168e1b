//! Integration tests for the wager calculator.
//!
//! These exercise the public API end to end: quotation strings in,
//! rounded quotes out, and scraped pick payloads through to a settlement.
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use wager_calc::api::{create_router, AppState};
use wager_calc::error::{OddsError, SettlementError, WagerError};
use wager_calc::ingest::{extract_embedded_json, settlement_inputs, transform_picks, FieldMapping};
use wager_calc::odds::{decimal_to_american_odds, normalize_american_odds, parse_american_odds};
use wager_calc::settlement::{compute_settlement, SettlementInput, SettlementRecord};
use wager_calc::wager::{
    effective_odds, odds_from_stake_payout, payout_from_odds, stake_from_odds,
};

const EXPERT_PICKS: &str = include_str!("../data/expert_picks.json");

fn approx(actual: Decimal, expected: Decimal) -> bool {
    (actual - expected).abs() < dec!(0.0001)
}

#[test]
fn literal_conversion_scenarios() {
    assert_eq!(parse_american_odds("+150").unwrap(), dec!(2.5));
    assert_eq!(parse_american_odds("-200").unwrap(), dec!(1.5));

    let quote = payout_from_odds("+150", dec!(100)).unwrap();
    assert_eq!((quote.payout, quote.profit), (dec!(250.0), dec!(150.0)));

    let quote = payout_from_odds("-200", dec!(100)).unwrap();
    assert_eq!((quote.payout, quote.profit), (dec!(150.0), dec!(50.0)));

    let quote = stake_from_odds("+150", dec!(250)).unwrap();
    assert_eq!((quote.stake, quote.profit), (dec!(100.00), dec!(150.00)));

    assert_eq!(odds_from_stake_payout(dec!(100), dec!(250)).unwrap().odds.to_string(), "+150");
    assert_eq!(odds_from_stake_payout(dec!(200), dec!(300)).unwrap().odds.to_string(), "-200");
}

#[test]
fn literal_failure_scenarios() {
    assert!(matches!(
        parse_american_odds("invalid"),
        Err(OddsError::InvalidOddsFormat(_))
    ));
    assert_eq!(
        payout_from_odds("+150", dec!(-50)),
        Err(WagerError::InvalidStake(dec!(-50)))
    );
    assert!(matches!(
        odds_from_stake_payout(dec!(100), dec!(100)),
        Err(WagerError::InvalidPayoutRelation { .. })
    ));
}

#[test]
fn format_of_parse_reproduces_quotation() {
    for odds in ["+100", "+105", "+150", "+240", "+500", "-105", "-110", "-125", "-200", "-450"] {
        assert_eq!(normalize_american_odds(odds).unwrap().to_string(), odds);
    }
    // Even money always resolves to the underdog form.
    assert_eq!(normalize_american_odds("-100").unwrap().to_string(), "+100");
    assert_eq!(decimal_to_american_odds(Decimal::ONE).unwrap().to_string(), "Undefined");
}

#[test]
fn chained_calculations_agree() {
    // Stake for a target payout, then payout for that stake.
    for odds in ["+150", "-110", "+333", "-275"] {
        let stake = stake_from_odds(odds, dec!(500)).unwrap();
        let payout = payout_from_odds(odds, stake.stake).unwrap();
        assert!((payout.payout - dec!(500)).abs() <= dec!(0.01), "{odds}: {payout:?}");
    }
}

#[test]
fn zero_fee_effective_odds_is_identity() {
    for odds in ["+150", "-200", "-110", "+100"] {
        assert_eq!(
            effective_odds(odds, Decimal::ZERO).unwrap(),
            normalize_american_odds(odds).unwrap()
        );
    }
}

#[test]
fn settlement_literal_scenario() {
    let records = vec![
        SettlementInput::new("Push", dec!(0.25), dec!(-179)),
        SettlementInput::new("Win", dec!(1.0), dec!(-150)),
    ];

    let result = compute_settlement(&records).unwrap();

    assert_eq!(
        result.record,
        SettlementRecord {
            wins: 1,
            losses: 0,
            draws: 1
        }
    );
    assert!(approx(result.net_result, dec!(0.6667)));
    assert_eq!(result.total_units, dec!(1.25));
    assert!(approx(result.roi, dec!(0.5333)));
}

#[test]
fn picks_payload_settles_end_to_end() {
    let payload: Value = serde_json::from_str(EXPERT_PICKS).unwrap();
    let mapping = FieldMapping::default();

    let picks = transform_picks(&payload, &mapping).unwrap();
    assert_eq!(picks.len(), 5);
    assert_eq!(picks[1].get("selection.label"), Some(&json!("Seattle +1.5 -179")));
    assert_eq!(picks[1].get("unit"), Some(&json!(0.25)));

    let inputs = settlement_inputs(&picks, &mapping, None).unwrap();
    let result = compute_settlement(&inputs).unwrap();

    assert_eq!(
        result.record,
        SettlementRecord {
            wins: 1,
            losses: 4,
            draws: 0
        }
    );
    // -2.25 lost, 0.5 * 100/165 won
    assert!(approx(result.net_result, dec!(-1.9470)), "{}", result.net_result);
    assert_eq!(result.total_units, dec!(2.75));
    assert!(approx(result.roi, dec!(-0.7080)), "{}", result.roi);
}

#[test]
fn picks_embedded_in_page_settle() {
    let html = format!(
        r#"<!DOCTYPE html><html><body><div id="__next"></div>
<script id="__NEXT_DATA__" type="application/json">{EXPERT_PICKS}</script>
</body></html>"#
    );

    let payload = extract_embedded_json(&html).unwrap();
    let mapping = FieldMapping::default();
    let picks = transform_picks(&payload, &mapping).unwrap();

    assert_eq!(picks.len(), 5);
    assert!(compute_settlement(&settlement_inputs(&picks, &mapping, None).unwrap()).is_ok());
}

#[test]
fn unknown_status_in_payload_fails_settlement() {
    let mut payload: Value = serde_json::from_str(EXPERT_PICKS).unwrap();
    payload["props"]["pageProps"]["expertPicksContainerProps"]["pastData"]["expertPicks"]["edges"][2]
        ["node"]["resultStatus"] = json!("Pending");

    let mapping = FieldMapping::default();
    let picks = transform_picks(&payload, &mapping).unwrap();
    let inputs = settlement_inputs(&picks, &mapping, None).unwrap();

    assert_eq!(
        compute_settlement(&inputs),
        Err(SettlementError::UnknownResultStatus("Pending".to_string()))
    );
}

async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
    let response = create_router(AppState::default())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn api_calculations() {
    let (status, body) = post_json("/calculate/payout", json!({"odds": "-200", "stake": 100})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"payout": 150.0, "profit": 50.0}));

    let (status, body) = post_json("/calculate/stake", json!({"odds": "+150", "payout": 250})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"stake": 100.0, "profit": 150.0}));

    let (status, body) = post_json("/calculate/odds", json!({"stake": 100, "payout": 250})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"odds": "+150", "decimal_odds": 2.5}));

    let (status, body) =
        post_json("/calculate/effective-odds", json!({"odds": "+125", "fee": 0.03})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"odds": "+125", "effective_odds": "+121", "fee": 0.03}));
}

#[tokio::test]
async fn api_rejects_invalid_input() {
    let (status, _) = post_json("/calculate/odds", json!({"stake": 100, "payout": 50})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json("/calculate/payout", json!({"odds": "+150", "stake": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(
        "/settlement",
        json!([{"result_status": "Cancelled", "unit_size": 1, "odds": -110}]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "unknown result status: \"Cancelled\""}));
}

#[tokio::test]
async fn api_index_lists_endpoints() {
    let response = create_router(AppState::default())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["endpoints"]["/calculate/payout"].is_string());
}
