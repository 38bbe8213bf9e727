//! Then step definitions
//!
//! Steps that verify outcomes and assertions.

use cucumber::then;
use propdiv_engine::{EngineError, Spouse};

use crate::helpers::table::amounts_equal;
use crate::world::PropdivWorld;

// =============================================================================
// Ratio steps
// =============================================================================

#[then(expr = "spouse 1 receives a share of {float}")]
fn assert_spouse1_share(world: &mut PropdivWorld, expected: f64) {
    let actual = world.division().spouse1_share;
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected spouse1Share {expected}, got {actual}"
    );
}

#[then(expr = "spouse 2 receives a share of {float}")]
fn assert_spouse2_share(world: &mut PropdivWorld, expected: f64) {
    let actual = world.division().spouse2_share;
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected spouse2Share {expected}, got {actual}"
    );
}

#[then("the shares add up to one")]
fn assert_shares_sum(world: &mut PropdivWorld) {
    let division = world.division();
    let sum = division.spouse1_share + division.spouse2_share;
    assert!((sum - 1.0).abs() < 1e-9, "Shares sum to {sum}");
}

#[then(expr = "the distribution type is {string}")]
fn assert_distribution_type(world: &mut PropdivWorld, expected: String) {
    let actual = world.division().distribution_type.to_string();
    assert_eq!(actual, expected, "Unexpected distribution type");
}

#[then(expr = "the equity score is {float}")]
fn assert_equity_score(world: &mut PropdivWorld, expected: f64) {
    let actual = world.score.expect("No score computed");
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected equity score {expected}, got {actual}"
    );
}

// =============================================================================
// Totals steps
// =============================================================================

#[then(expr = "the total marital assets are {float}")]
fn assert_marital_assets(world: &mut PropdivWorld, expected: f64) {
    let actual = world.division().total_marital_assets;
    assert!(
        amounts_equal(actual, expected),
        "Expected totalMaritalAssets {expected}, got {actual}"
    );
}

#[then(expr = "the total separate assets are {float}")]
fn assert_separate_assets(world: &mut PropdivWorld, expected: f64) {
    let actual = world.division().total_separate_assets;
    assert!(
        amounts_equal(actual, expected),
        "Expected totalSeparateAssets {expected}, got {actual}"
    );
}

#[then(expr = "the total marital debts are {float}")]
fn assert_marital_debts(world: &mut PropdivWorld, expected: f64) {
    let actual = world.division().total_marital_debts;
    assert!(
        amounts_equal(actual, expected),
        "Expected totalMaritalDebts {expected}, got {actual}"
    );
}

#[then(expr = "spouse {int} ends up with {float}")]
fn assert_total_value(world: &mut PropdivWorld, spouse: u8, expected: f64) {
    let division = world.division();
    let actual = match spouse {
        1 => division.total_spouse1_value,
        2 => division.total_spouse2_value,
        other => panic!("No spouse {other}"),
    };
    assert!(
        amounts_equal(actual, expected),
        "Expected spouse {spouse} total {expected}, got {actual}"
    );
}

// =============================================================================
// Item steps
// =============================================================================

#[then(expr = "asset {string} is split {float} to spouse 1 and {float} to spouse 2")]
fn assert_asset_split(world: &mut PropdivWorld, id: String, spouse1: f64, spouse2: f64) {
    let division = world.asset(&id);
    assert!(
        amounts_equal(division.spouse1_share, spouse1)
            && amounts_equal(division.spouse2_share, spouse2),
        "Expected {id} split {spouse1}/{spouse2}, got {}/{}",
        division.spouse1_share,
        division.spouse2_share
    );
}

#[then(expr = "asset {string} is explained as {string}")]
fn assert_asset_reasoning(world: &mut PropdivWorld, id: String, expected: String) {
    let actual = world.asset(&id).reasoning.render();
    assert_eq!(actual, expected, "Unexpected reasoning for {id}");
}

// =============================================================================
// Equalization steps
// =============================================================================

#[then("no equalization payment is due")]
fn assert_no_equalization(world: &mut PropdivWorld) {
    let division = world.division();
    assert_eq!(division.equalization_payment, None);
    assert_eq!(division.payment_from, None);
}

#[then(expr = "spouse {int} pays an equalization payment of {float}")]
fn assert_equalization(world: &mut PropdivWorld, payer: u8, amount: f64) {
    let division = world.division();
    let expected_payer = if payer == 1 { Spouse::One } else { Spouse::Two };
    assert_eq!(division.payment_from, Some(expected_payer));
    let actual = division.equalization_payment.unwrap_or_default();
    assert!(
        amounts_equal(actual, amount),
        "Expected equalization payment {amount}, got {actual}"
    );
}

// =============================================================================
// Confidence and error steps
// =============================================================================

#[then(expr = "the confidence level is {float}")]
fn assert_confidence(world: &mut PropdivWorld, expected: f64) {
    let actual = world.division().confidence_level;
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected confidence {expected}, got {actual}"
    );
}

#[then(expr = "the confidence level is below {float}")]
fn assert_confidence_below(world: &mut PropdivWorld, bound: f64) {
    let actual = world.division().confidence_level;
    assert!(actual < bound, "Expected confidence below {bound}, got {actual}");
}

#[then("the division is rejected for an unknown jurisdiction")]
fn assert_unknown_jurisdiction(world: &mut PropdivWorld) {
    assert!(
        matches!(world.error, Some(EngineError::UnknownJurisdiction(_))),
        "Expected UnknownJurisdiction, got {:?}",
        world.error_message()
    );
}

#[then("the division is rejected for an invalid date")]
fn assert_invalid_date(world: &mut PropdivWorld) {
    assert!(
        matches!(world.error, Some(EngineError::InvalidDate(_))),
        "Expected InvalidDate, got {:?}",
        world.error_message()
    );
}
