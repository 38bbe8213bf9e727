//! Given step definitions
//!
//! Steps that set up the request for a scenario.

use cucumber::{gherkin::Step, given};
use propdiv_engine::{Asset, Debt, EquitableDistributionFactors, FinancialAccount, Spouse};

use crate::helpers::table::{parse_key_value_table, parse_records};
use crate::world::PropdivWorld;

#[given(expr = "the jurisdiction is {string}")]
fn set_jurisdiction(world: &mut PropdivWorld, jurisdiction: String) {
    world.request.personal_info.jurisdiction = jurisdiction;
}

#[given(expr = "the spouses married on {string} and separated on {string}")]
fn set_dates(world: &mut PropdivWorld, married: String, separated: String) {
    world.request.personal_info.marriage_date = Some(married);
    world.request.personal_info.separation_date = Some(separated);
}

#[given(expr = "unowned separate property defaults to {string}")]
fn set_default_owner(world: &mut PropdivWorld, owner: String) {
    let owner: Spouse = owner.parse().unwrap();
    world.config = world.config.clone().with_default_separate_owner(owner);
}

#[given("the following assets:")]
fn set_assets(world: &mut PropdivWorld, step: &Step) {
    if let Some(table) = &step.table {
        world.request.assets = parse_records::<Asset>(table);
    }
}

#[given("the following debts:")]
fn set_debts(world: &mut PropdivWorld, step: &Step) {
    if let Some(table) = &step.table {
        world.request.debts = parse_records::<Debt>(table);
    }
}

#[given("the following financial accounts:")]
fn set_accounts(world: &mut PropdivWorld, step: &Step) {
    if let Some(table) = &step.table {
        world.request.financial_accounts = parse_records::<FinancialAccount>(table);
    }
}

/// Table fields are laid over any factors set by earlier steps.
#[given("the following equity factors:")]
fn set_equity_factors(world: &mut PropdivWorld, step: &Step) {
    if let Some(table) = &step.table {
        let mut object = match &world.request.equity_factors {
            Some(existing) => match serde_json::to_value(existing).unwrap() {
                serde_json::Value::Object(fields) => fields,
                other => panic!("Factors serialized as {other}"),
            },
            None => serde_json::Map::new(),
        };
        object.extend(parse_key_value_table(table));
        let factors: EquitableDistributionFactors =
            serde_json::from_value(serde_json::Value::Object(object)).unwrap();
        world.request.equity_factors = Some(factors);
    }
}

#[given(expr = "the marriage lasted {int} years")]
fn set_marriage_duration(world: &mut PropdivWorld, years: u32) {
    let factors = world
        .request
        .equity_factors
        .get_or_insert_with(EquitableDistributionFactors::default);
    factors.marriage_duration = Some(f64::from(years));
}
