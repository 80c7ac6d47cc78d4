//! Per-invocation environment overlay (spec §4.2 step 2, §4.8, §9).
//!
//! `locals` must never be applied to the parent's real environment: they
//! are visible only to the child being spawned. `std::process::Command`
//! already gives us exactly that: `.env(..)` calls only affect the child's
//! environment, leaving `std::env` in the current process untouched. The
//! same call also synthesizes the `?` variable for this one child without
//! writing it into the real process environment, per the design note in
//! `state.rs`.

use std::process::Command;

/// Apply `locals` and the synthesized `?` to a `Command` that is about to
/// be spawned. Order doesn't matter for the engine's own `?` unless a
/// script's `locals` itself redefines `?`, which locals always wins since
/// it's applied after.
pub fn overlay(command: &mut Command, locals: &[(String, String)], last_status: i32) {
    command.env("?", last_status.to_string());
    for (key, value) in locals {
        command.env(key, value);
    }
}

/// Build the `(key, value)` pairs a raw-forked child (pipeline/subshell
/// stage) should apply to its own process environment via `std::env::set_var`
/// before recursively interpreting its body or exec'ing. Unlike `overlay`,
/// there is no parent `Command` to scope the overlay to: the forked child
/// *is* a fresh copy of the process image, so mutating its own `std::env`
/// is safe and only ever observed by that child and its descendants.
pub fn overlay_pairs(locals: &[(String, String)], last_status: i32) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(locals.len() + 1);
    pairs.push(("?".to_string(), last_status.to_string()));
    pairs.extend(locals.iter().cloned());
    pairs
}
