//! CLI commands
//!
//! Each command returns its output as pretty JSON; `main` prints it.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use fraudguard_core::{Severity, Transaction};

use crate::context::AppContext;

fn render<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Read a transaction payload from a JSON file
pub fn load_transaction(path: &Path) -> anyhow::Result<Transaction> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading transaction from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing transaction in {}", path.display()))
}

/// List all rules
pub fn list(ctx: &AppContext) -> anyhow::Result<String> {
    render(&ctx.detector.store().list())
}

/// Filter rules by term and optional severity
pub fn filter(ctx: &AppContext, term: &str, severity: Option<&str>) -> anyhow::Result<String> {
    let severity = severity.map(Severity::parse).transpose()?;
    render(&ctx.detector.store().filter(term, severity))
}

/// Rule statistics
pub fn summary(ctx: &AppContext) -> anyhow::Result<String> {
    render(&ctx.detector.store().summary())
}

/// Evaluate a transaction against every enabled rule
pub fn evaluate(ctx: &AppContext, transaction: &Path) -> anyhow::Result<String> {
    let tx = load_transaction(transaction)?;
    render(&ctx.detector.evaluate(&tx))
}

/// Evaluate a transaction against one rule, by id or name
pub fn test_rule(ctx: &AppContext, rule: &str, transaction: &Path) -> anyhow::Result<String> {
    let rule = ctx.find_rule(rule)?;
    let tx = load_transaction(transaction)?;
    render(&ctx.detector.test_rule(&rule.id, &tx)?)
}
