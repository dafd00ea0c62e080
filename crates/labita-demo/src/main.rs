//! LabITA Demo — command-line stand-in for the measurement form.
//!
//! Reads a JSON object of field name → string from the file given as the
//! first argument (or stdin), then runs sanitize → validate → calculate and
//! prints the JSON result followed by the text recap.
//!
//! A form with `lValue1`/`bValue1`.. goes through the multi-measurement path.
//! A form with the legacy `lValue`/`aValue`/`bValue` fields goes through the
//! single-measurement plain-arctangent path.

mod config;

use std::io::Read;

use anyhow::{Context, bail};
use labita_core::calculation::{generate_multi_summary, generate_summary};
use labita_core::field::Channel;
use labita_core::{FieldName, FormData, ItaCalculator, ItaFormula, Validator};
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labita_core=info,labita_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = AppConfig::default();
    let core = app.load_core().context("loading LabITA config")?;
    let validator = Validator::new(&core);
    let calculator = ItaCalculator::new(&core);

    let raw = read_form()?;
    let form: FormData = raw
        .iter()
        .map(|(name, value)| (name.to_string(), validator.sanitize_input(value, name)))
        .collect();

    let legacy = [Channel::L, Channel::A, Channel::B]
        .into_iter()
        .any(|channel| !raw.get(FieldName::legacy(channel)).is_empty());

    if legacy {
        let validation = validator.validate_form(&form);
        if !validation.is_valid {
            print_json(&validation, app.pretty)?;
            bail!("form has {} validation error(s)", validation.errors.len());
        }
        let field = |channel| form.get(FieldName::legacy(channel));
        let result = calculator.calculate_ita_with(
            ItaFormula::LegacyAtan,
            field(Channel::L),
            field(Channel::A),
            field(Channel::B),
        );
        print_json(&result, app.pretty)?;
        println!("{}", generate_summary(&result));
        return Ok(());
    }

    let validation = validator.validate_multiple_measurements(&form);
    if !validation.is_valid {
        print_json(&validation, app.pretty)?;
        bail!("form has {} validation error(s)", validation.errors.len());
    }
    tracing::info!(
        measurements = validation.valid_measurements.len(),
        "form validated"
    );

    let result = calculator.calculate_multiple_ita(&validation.valid_measurements);
    print_json(&result, app.pretty)?;
    println!("{}", generate_multi_summary(&result));
    Ok(())
}

fn read_form() -> anyhow::Result<FormData> {
    let json = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading form from {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading form from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json).context("form must be a JSON object of strings")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
