// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use ear::TrustVector;
use imabaseline::appraisal::{ima_trust_vector, pcr_trust_vector};
use imabaseline::baseline::{
    BaselineDocument, BaselineKind, BaselineRecord, ImaBaselineRecord, ImaPolicy, MatchKind,
    MeasurementRecord, MemoRecordStore,
};
use imabaseline::pcr::{parse_quote, PcrPolicy};
use std::error::Error;
use std::fs;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
enum ImaBaselineCli {
    Appraise(AppraiseArgs),
    Pcrs(PcrsArgs),
    Golden(GoldenArgs),
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Appraise the supplied IMA measurements against a baseline")]
struct AppraiseArgs {
    #[arg(short, long, default_value = "measurements.json")]
    measurements: String,

    #[arg(short, long, default_value = "baseline.json")]
    baseline: String,

    /// IMA policy; built-in defaults when absent
    #[arg(short, long)]
    policy: Option<String>,

    /// Match on digests only, ignoring paths
    #[arg(long)]
    hashes: bool,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Compare the PCR values of a quote against a PCR policy")]
struct PcrsArgs {
    #[arg(short, long, default_value = "quote.json")]
    quote: String,

    #[arg(short, long, default_value = "pcr-policy.json")]
    policy: String,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Create a baseline from the measurements of a trusted system")]
struct GoldenArgs {
    #[arg(short, long, default_value = "measurements.json")]
    measurements: String,

    #[arg(short, long, default_value = "golden")]
    name: String,

    #[arg(short, long, default_value = "baseline.json")]
    output: String,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match ImaBaselineCli::parse() {
        ImaBaselineCli::Appraise(args) => match appraise(&args) {
            Ok((tv, true)) => {
                show(&tv);
                println!("appraisal successful");
                ExitCode::SUCCESS
            }
            Ok((tv, false)) => {
                show(&tv);
                eprintln!("appraisal failed");
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("appraisal failed: {e}");
                ExitCode::FAILURE
            }
        },

        ImaBaselineCli::Pcrs(args) => match pcrs(&args) {
            Ok(d) if d.is_empty() => {
                show(&pcr_trust_vector(&d));
                println!("PCR validation successful");
                ExitCode::SUCCESS
            }
            Ok(d) => {
                print!("{d}");
                show(&pcr_trust_vector(&d));
                eprintln!("PCR validation failed");
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("PCR validation failed: {e}");
                ExitCode::FAILURE
            }
        },

        ImaBaselineCli::Golden(args) => match golden(&args) {
            Ok(_) => {
                println!("golden baseline extraction successful");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("golden baseline extraction failed: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn show(tv: &TrustVector) {
    match serde_json::to_string_pretty(tv) {
        Ok(j) => println!("{j}"),
        Err(e) => eprintln!("cannot serialise trust vector: {e}"),
    }
}

fn appraise(args: &AppraiseArgs) -> Result<(TrustVector, bool), Box<dyn Error>> {
    let policy = match &args.policy {
        Some(p) => ImaPolicy::from_json(&fs::read_to_string(p)?)?,
        None => ImaPolicy::default(),
    };

    let store = MemoRecordStore::new();
    let baseline = store.load_json(&fs::read_to_string(&args.baseline)?)?;

    let records = MeasurementRecord::parse_list(&fs::read_to_string(&args.measurements)?)?;

    let rp = store.provider(&baseline);

    let batch = if args.hashes {
        baseline.contains_hashes(&records, &rp)?
    } else {
        baseline.contains(&records, &rp, &policy)?
    };

    for r in &records {
        let verdict = if batch.found_match(r)? {
            "match"
        } else if batch.found_mismatch(r)? {
            "mismatch"
        } else {
            "unknown"
        };

        println!("{verdict:>8} {r:?}");
    }

    let hits = |k| !batch.records_with(k).is_empty();

    let ok = match baseline.kind() {
        BaselineKind::Blacklist => !hits(MatchKind::Match),
        BaselineKind::IgnoreSet => true,
        _ => !hits(MatchKind::Mismatch) && !(policy.fail_on_unknowns && hits(MatchKind::Unknown)),
    };

    Ok((ima_trust_vector(baseline.kind(), &batch), ok))
}

fn pcrs(args: &PcrsArgs) -> Result<String, Box<dyn Error>> {
    let policy = PcrPolicy::from_json(&fs::read_to_string(&args.policy)?)?;

    let quote = parse_quote(&fs::read_to_string(&args.quote)?)?;

    Ok(policy.validate(&quote))
}

fn golden(args: &GoldenArgs) -> Result<(), Box<dyn Error>> {
    let records = MeasurementRecord::parse_list(&fs::read_to_string(&args.measurements)?)?;

    let mut baseline_records: Vec<BaselineRecord> = vec![];

    for m in &records {
        let r: BaselineRecord = ImaBaselineRecord::new(m.path(), m.hash().clone())?.into();

        if !baseline_records.contains(&r) {
            baseline_records.push(r);
        }
    }

    let doc = BaselineDocument {
        name: args.name.clone(),
        description: Some(format!("golden values from {}", args.measurements)),
        kind: BaselineKind::Simple,
        records: baseline_records,
    };

    let j = serde_json::to_string_pretty(&doc)?;
    fs::write(&args.output, j)?;

    Ok(())
}
