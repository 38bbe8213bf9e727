//! When step definitions
//!
//! Steps that run the engine.

use cucumber::when;
use propdiv_engine::score_equity_factors;

use crate::world::PropdivWorld;

#[when("the property is divided")]
fn divide_property(world: &mut PropdivWorld) {
    world.divide();
}

#[when("the equity factors are scored")]
fn score_factors(world: &mut PropdivWorld) {
    let factors = world.request.equity_factors.clone().unwrap_or_default();
    world.score = Some(score_equity_factors(&factors));
}
