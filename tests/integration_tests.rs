//! Integration tests for tailrisk.
//!
//! These tests exercise the full assessment and stress pipeline with
//! realistic portfolios and deterministic return histories.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tailrisk::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// A diversified multi-asset portfolio with ~8 positions.
fn create_balanced_portfolio() -> Portfolio {
    PortfolioBuilder::new()
        .id("BAL-001")
        .name("Balanced Multi-Asset")
        .benchmark_id("SPX")
        .add_position(position("SPY", dec!(250), dec!(400), AssetClass::EquityLargeCap))
        .add_position(position("IWM", dec!(200), dec!(180), AssetClass::EquitySmallCap))
        .add_position(position("AGG", dec!(500), dec!(100), AssetClass::GovernmentBond))
        .add_position(position("LQD", dec!(300), dec!(110), AssetClass::CorporateBond))
        .add_position(position("GLD", dec!(100), dec!(185), AssetClass::Commodity))
        .add_position(position("VNQ", dec!(150), dec!(90), AssetClass::RealEstate))
        .add_position(position("BTC", dec!(0.5), dec!(60000), AssetClass::Crypto))
        .add_position(position("USD", dec!(25000), dec!(1), AssetClass::Cash))
        .build()
        .unwrap()
}

fn position(symbol: &str, qty: Decimal, price: Decimal, class: AssetClass) -> Position {
    Position::builder(symbol)
        .quantity(qty)
        .price(price)
        .asset_class(class)
        .build()
        .unwrap()
}

/// Deterministic daily return series with the given amplitude.
fn returns(seed: u64, n: usize, amplitude: f64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let u = (state >> 33) as f64 / f64::from(u32::MAX);
            (u - 0.5) * 2.0 * amplitude
        })
        .collect()
}

/// Provider where every symbol moves with the same market series, so
/// portfolio volatility is not diversified away.
fn provider_for(portfolio: &Portfolio, amplitude: f64) -> StaticReturns {
    let market = returns(7, 252, amplitude);
    let mut provider = StaticReturns::new();
    for p in &portfolio.positions {
        provider = provider.with_series(p.symbol.clone(), market.clone());
    }
    provider.with_series("SPX", market)
}

fn build_engine(
    provider: StaticReturns,
) -> (RiskEngine, Arc<InMemoryStore>, Arc<InMemoryNotifier>) {
    let store = Arc::new(InMemoryStore::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let engine = RiskEngine::new(Arc::new(provider), store.clone(), notifier.clone());
    (engine, store, notifier)
}

// =============================================================================
// ASSESSMENT PIPELINE
// =============================================================================

#[test]
fn test_full_assessment_cycle() {
    let portfolio = create_balanced_portfolio();
    let (engine, store, _) = build_engine(provider_for(&portfolio, 0.01));

    let assessment = engine.assess(&portfolio, &[]).unwrap();
    let metrics = &assessment.metrics;

    assert_eq!(metrics.portfolio_id, "BAL-001");
    assert_eq!(metrics.data_quality, DataQuality::Measured);
    assert!(metrics.var_1d_95 > 0.0);
    assert!(metrics.var_1d_99 >= metrics.var_1d_95);
    assert!(metrics.cvar_95 >= metrics.var_1d_95);
    assert!((metrics.var_10d_95 - metrics.var_1d_95 * 10.0_f64.sqrt()).abs() < 1e-9);
    assert!(metrics.volatility > 0.0);
    assert!((0.0..=1.0).contains(&metrics.concentration_risk));
    assert!((0.0..=1.0).contains(&metrics.liquidity_score));

    // The snapshot was persisted.
    assert_eq!(store.metrics().len(), 1);
    assert_eq!(store.metrics()[0], *metrics);
}

#[test]
fn test_quiet_portfolio_raises_no_alerts() {
    let portfolio = create_balanced_portfolio();
    let (engine, _, notifier) = build_engine(provider_for(&portfolio, 0.004));

    let assessment = engine.assess(&portfolio, &[]).unwrap();
    assert!(assessment.alerts.raised.is_empty());
    assert!(notifier.delivered().is_empty());
    assert_eq!(assessment.metrics.risk_level, RiskLevel::Low);
}

#[test]
fn test_volatile_history_raises_and_then_resolves() {
    let portfolio = create_balanced_portfolio();

    // Cycle 1: violent history breaches VaR and volatility ceilings.
    let (engine, _, notifier) = build_engine(provider_for(&portfolio, 0.06));
    let first = engine.assess(&portfolio, &[]).unwrap();
    assert!(!first.alerts.raised.is_empty());
    assert_eq!(notifier.delivered().len(), first.alerts.raised.len());

    // Cycle 2 on a calm engine: the prior alerts resolve.
    let prior = first.alerts.open();
    let (calm_engine, _, calm_notifier) = build_engine(provider_for(&portfolio, 0.004));
    let second = calm_engine.assess(&portfolio, &prior).unwrap();

    assert!(second.alerts.raised.is_empty());
    assert_eq!(second.alerts.resolved.len(), prior.len());
    for resolved in &second.alerts.resolved {
        assert_eq!(resolved.status, AlertStatus::Resolved);
        assert!(resolved.resolved_at.is_some());
        assert!(prior.iter().any(|p| p.id == resolved.id));
    }
    // Each resolution notified exactly once.
    assert_eq!(calm_notifier.delivered().len(), prior.len());
}

#[test]
fn test_missing_data_degrades_without_alerts() {
    let portfolio = create_balanced_portfolio();
    let (engine, store, notifier) = build_engine(StaticReturns::new());

    let assessment = engine.assess(&portfolio, &[]).unwrap();
    assert!(assessment.metrics.is_degraded());
    assert_eq!(assessment.metrics.risk_level, RiskLevel::Medium);
    assert!(assessment.alerts.raised.is_empty());
    assert!(notifier.delivered().is_empty());
    // Degraded snapshots are persisted like any other.
    assert_eq!(store.metrics().len(), 1);
}

// =============================================================================
// STRESS PIPELINE
// =============================================================================

#[test]
fn test_single_equity_position_crash_arithmetic() {
    // 100 shares at $100, -30% equity shock: $10,000 -> $7,000.
    let portfolio = PortfolioBuilder::new()
        .name("Single")
        .add_position(position("SPY", dec!(100), dec!(100), AssetClass::EquityLargeCap))
        .build()
        .unwrap();

    let scenario = StressScenario::builder("equity-down-30")
        .name("Equity -30%")
        .severity(Severity::Severe)
        .shocks(ShockMap::uniform(0.0).with(AssetClass::EquityLargeCap, -0.30))
        .build()
        .unwrap();

    let executor = StressTestExecutor::default();
    let result = executor.run(&portfolio, &scenario).unwrap();

    assert_eq!(result.pre_stress_value, dec!(10000));
    assert_eq!(result.post_stress_value, dec!(7000));
    assert_eq!(result.absolute_loss, dec!(3000));
    assert!((result.percentage_loss - 0.30).abs() < 1e-9);
}

#[test]
fn test_standard_suite_against_balanced_portfolio() {
    let portfolio = create_balanced_portfolio();
    let (engine, store, _) = build_engine(StaticReturns::new());

    let ids: Vec<String> = engine.library().ids().map(String::from).collect();
    assert_eq!(ids.len(), 6);

    let outcome = engine.stress(&portfolio, &ids, &CancelToken::new());
    assert!(!outcome.cancelled);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.results.len(), 6);
    assert_eq!(store.stress_results().len(), 6);

    // 2008 hits this mix harder than a moderate rate shock.
    let crisis = &outcome.results["credit-crisis-2008"];
    let rates = &outcome.results["rate-shock"];
    assert!(crisis.percentage_loss > rates.percentage_loss);

    for result in outcome.results.values() {
        assert!(result.post_stress_value > Decimal::ZERO);
        assert!(result.cvar_impact >= result.var_impact);
        assert!(result.estimated_recovery_days <= 1095);
        assert_eq!(result.position_impacts.len(), portfolio.position_count());
    }
}

#[test]
fn test_unknown_scenario_fails_cleanly() {
    let portfolio = create_balanced_portfolio();
    let (engine, store, _) = build_engine(StaticReturns::new());

    let outcome = engine.stress(
        &portfolio,
        &["no-such-scenario".to_string()],
        &CancelToken::new(),
    );
    assert!(outcome.results.is_empty());
    assert!(store.stress_results().is_empty());
    assert!(matches!(
        outcome.failures["no-such-scenario"],
        RiskError::ScenarioNotFound { .. }
    ));

    let err = outcome.into_result().unwrap_err();
    assert_eq!(
        err,
        RiskError::PartialSuiteFailure {
            failed: vec!["no-such-scenario".to_string()]
        }
    );
}

#[test]
fn test_cancellation_stops_remaining_scenarios() {
    let portfolio = create_balanced_portfolio();
    let (engine, _, _) = build_engine(StaticReturns::new());

    let cancel = CancelToken::new();
    cancel.cancel();

    let ids: Vec<String> = engine.library().ids().map(String::from).collect();
    let outcome = engine.stress(&portfolio, &ids, &cancel);
    assert!(outcome.cancelled);
    assert!(outcome.results.is_empty());
    assert!(outcome.failures.is_empty());
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[test]
fn test_dashboard_rollup_end_to_end() {
    let portfolio = create_balanced_portfolio();
    let (engine, store, _) = build_engine(provider_for(&portfolio, 0.06));

    let assessment = engine.assess(&portfolio, &[]).unwrap();
    let ids: Vec<String> = engine.library().ids().map(String::from).collect();
    engine.stress(&portfolio, &ids, &CancelToken::new());

    let dashboard = aggregate(
        &store.metrics(),
        &store.stress_results(),
        &assessment.alerts.open(),
        ReportingWindow::trailing_days(1),
    );

    assert_eq!(dashboard.latest_metrics.len(), 1);
    assert!(dashboard.latest_metrics.contains_key("BAL-001"));
    assert!(!dashboard.active_alerts_by_level.is_empty());

    let stress = dashboard.stress.unwrap();
    assert_eq!(stress.scenario_count, 6);
    assert!(stress.worst_loss_pct >= stress.best_loss_pct);
    assert!(stress.avg_loss_pct <= stress.worst_loss_pct);
    assert_eq!(stress.worst_scenario_id, "credit-crisis-2008");
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[test]
fn test_public_records_serde_round_trip() {
    let portfolio = create_balanced_portfolio();
    let (engine, _, _) = build_engine(provider_for(&portfolio, 0.01));

    let metrics = engine.assess(&portfolio, &[]).unwrap().metrics;
    let json = serde_json::to_string(&metrics).unwrap();
    let parsed: RiskMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, metrics);

    let result = engine
        .stress(&portfolio, &["rate-shock".to_string()], &CancelToken::new())
        .into_result()
        .unwrap()
        .remove("rate-shock")
        .unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let parsed: StressTestResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);

    let library = ScenarioLibrary::standard();
    let scenario = library.get("pandemic-shock").unwrap();
    let json = serde_json::to_string(scenario).unwrap();
    let parsed: StressScenario = serde_json::from_str(&json).unwrap();
    assert_eq!(&parsed, scenario);
}
