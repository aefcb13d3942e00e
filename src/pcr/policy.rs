// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use bitmask::*;
use serde::Deserialize;
use tracing::warn;

/// Number of PCRs in a TPM 2.0 bank
pub const PCR_COUNT: usize = 24;

/// PCR extended by IMA for every measurement
pub const IMA_PCR: usize = 10;

/// PCRs extended by tboot during a measured launch
pub const TBOOT_PCRS: [usize; 3] = [17, 18, 19];

/// PCR holding the GPT / partition table measurement
pub const GPT_PCR: usize = 5;

bitmask! {
    #[derive(Debug)]
    pub mask PcrExclusions: u8 where flags PcrExclusion {
        Ima   = 0x01,
        Tboot = 0x02,
        Gpt   = 0x04,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PcrPolicyConfig {
    baseline_pcrs: Vec<String>,
    #[serde(default)]
    ignore_ima_pcr: bool,
    #[serde(default)]
    ignore_tboot_pcrs: bool,
    #[serde(default)]
    ignore_gpt_pcr: bool,
}

/// Expected PCR values and the PCRs that are not compared
#[derive(Debug)]
pub struct PcrPolicy {
    baseline_pcrs: [String; PCR_COUNT],
    exclusions: PcrExclusions,
}

fn check_pcr(i: usize, v: &str) -> Result<(), Error> {
    if v.is_empty() {
        return Err(Error::Sema(format!("baseline PCR {i} is empty")));
    }

    hex::decode(v).map_err(|e| Error::Syntax(format!("baseline PCR {i}: {e}")))?;

    Ok(())
}

fn to_pcr_array(v: Vec<String>) -> Result<[String; PCR_COUNT], Error> {
    let n = v.len();

    v.try_into()
        .map_err(|_| Error::Sema(format!("expecting {PCR_COUNT} PCR values, got {n}")))
}

/// Parse the PCR values of a quote: a JSON array of 24 hex strings
pub fn parse_quote(j: &str) -> Result<[String; PCR_COUNT], Error> {
    let v: Vec<String> = serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))?;

    to_pcr_array(v)
}

impl PcrPolicy {
    /// A policy comparing every PCR against `baseline_pcrs`
    pub fn new(baseline_pcrs: [String; PCR_COUNT]) -> Result<Self, Error> {
        for (i, v) in baseline_pcrs.iter().enumerate() {
            check_pcr(i, v)?;
        }

        Ok(Self {
            baseline_pcrs,
            exclusions: PcrExclusions::none(),
        })
    }

    pub fn from_json(j: &str) -> Result<Self, Error> {
        let c: PcrPolicyConfig =
            serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))?;

        let mut p = Self::new(to_pcr_array(c.baseline_pcrs)?)?;

        p.set_ignore_ima_pcr(c.ignore_ima_pcr);
        p.set_ignore_tboot_pcrs(c.ignore_tboot_pcrs);
        p.set_ignore_gpt_pcr(c.ignore_gpt_pcr);

        Ok(p)
    }

    pub fn baseline_pcrs(&self) -> &[String; PCR_COUNT] {
        &self.baseline_pcrs
    }

    fn toggle(&mut self, f: PcrExclusion, on: bool) {
        if on {
            self.exclusions.set(f);
        } else {
            self.exclusions.unset(f);
        }
    }

    pub fn set_ignore_ima_pcr(&mut self, on: bool) {
        self.toggle(PcrExclusion::Ima, on)
    }

    pub fn set_ignore_tboot_pcrs(&mut self, on: bool) {
        self.toggle(PcrExclusion::Tboot, on)
    }

    pub fn set_ignore_gpt_pcr(&mut self, on: bool) {
        self.toggle(PcrExclusion::Gpt, on)
    }

    pub fn ignore_ima_pcr(&self) -> bool {
        self.exclusions.contains(PcrExclusion::Ima)
    }

    pub fn ignore_tboot_pcrs(&self) -> bool {
        self.exclusions.contains(PcrExclusion::Tboot)
    }

    pub fn ignore_gpt_pcr(&self) -> bool {
        self.exclusions.contains(PcrExclusion::Gpt)
    }

    /// True if PCR `i` is left out of the comparison
    pub fn is_excluded(&self, i: usize) -> bool {
        (i == IMA_PCR && self.ignore_ima_pcr())
            || (TBOOT_PCRS.contains(&i) && self.ignore_tboot_pcrs())
            || (i == GPT_PCR && self.ignore_gpt_pcr())
    }

    /// Compare the quoted PCR values against the baseline.  Returns one line
    /// per mismatching PCR, or an empty string when everything that is
    /// compared matches.
    pub fn validate<S: AsRef<str>>(&self, quoted: &[S; PCR_COUNT]) -> String {
        let mut diagnostic = String::new();

        for (i, (expected, found)) in self.baseline_pcrs.iter().zip(quoted.iter()).enumerate() {
            if self.is_excluded(i) {
                continue;
            }

            let found = found.as_ref();

            if !expected.eq_ignore_ascii_case(found) {
                warn!(pcr = i, expected = expected.as_str(), found, "PCR mismatch");

                diagnostic.push_str(&format!(
                    "PCR {i} does not match: expected {expected}, found {found}\n"
                ));
            }
        }

        diagnostic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcrs(fill: &str) -> [String; PCR_COUNT] {
        std::array::from_fn(|_| fill.to_string())
    }

    fn policy() -> PcrPolicy {
        PcrPolicy::new(pcrs(&"00".repeat(20))).unwrap()
    }

    #[test]
    fn identical_quote() {
        let p = policy();

        assert_eq!(p.validate(&pcrs(&"00".repeat(20))), "");
    }

    #[test]
    fn case_insensitive() {
        let p = PcrPolicy::new(pcrs(&"ab".repeat(20))).unwrap();

        assert_eq!(p.validate(&pcrs(&"AB".repeat(20))), "");
    }

    #[test]
    fn mismatch_diagnostic() {
        let p = policy();
        let zero = "00".repeat(20);
        let ones = "11".repeat(20);

        let mut quote = pcrs(&zero);
        quote[0] = ones.clone();
        quote[23] = ones.clone();

        assert_eq!(
            p.validate(&quote),
            format!(
                "PCR 0 does not match: expected {zero}, found {ones}\n\
                 PCR 23 does not match: expected {zero}, found {ones}\n"
            )
        );
    }

    #[test]
    fn exclusions() {
        let mut p = policy();
        let ones = "11".repeat(20);

        let mut quote = pcrs(&"00".repeat(20));
        quote[GPT_PCR] = ones.clone();
        quote[IMA_PCR] = ones.clone();
        for i in TBOOT_PCRS {
            quote[i] = ones.clone();
        }

        assert_eq!(p.validate(&quote).lines().count(), 5);

        p.set_ignore_ima_pcr(true);
        assert!(p.is_excluded(IMA_PCR));
        assert_eq!(p.validate(&quote).lines().count(), 4);

        p.set_ignore_tboot_pcrs(true);
        assert_eq!(p.validate(&quote).lines().count(), 1);

        p.set_ignore_gpt_pcr(true);
        assert_eq!(p.validate(&quote), "");

        p.set_ignore_ima_pcr(false);
        assert!(!p.is_excluded(IMA_PCR));
        assert!(p.validate(&quote).starts_with("PCR 10 does not match"));
    }

    #[test]
    fn error_messages() {
        let e = PcrPolicy::from_json("{").unwrap_err();
        assert!(e.to_string().starts_with("Malformed PCR input: "));

        let e = parse_quote(r#"["00"]"#).unwrap_err();
        assert_eq!(e.to_string(), "Invalid PCR set: expecting 24 PCR values, got 1");
    }

    #[test]
    fn bad_baseline() {
        let mut v = pcrs(&"00".repeat(20));
        v[3] = String::new();
        assert!(matches!(PcrPolicy::new(v), Err(Error::Sema(_))));

        let mut v = pcrs(&"00".repeat(20));
        v[4] = "xyz".to_string();
        assert!(matches!(PcrPolicy::new(v), Err(Error::Syntax(_))));
    }

    #[test]
    fn from_json() {
        let pcrs: Vec<String> = (0..PCR_COUNT).map(|_| "00".repeat(32)).collect();
        let j = serde_json::json!({
            "baseline-pcrs": pcrs,
            "ignore-ima-pcr": true
        })
        .to_string();

        let p = PcrPolicy::from_json(&j).unwrap();
        assert!(p.ignore_ima_pcr());
        assert!(!p.ignore_tboot_pcrs());
        assert!(!p.ignore_gpt_pcr());

        let j = serde_json::json!({ "baseline-pcrs": ["00"] }).to_string();
        assert!(matches!(PcrPolicy::from_json(&j), Err(Error::Sema(_))));
    }

    #[test]
    fn quote_parsing() {
        let v: Vec<String> = (0..PCR_COUNT).map(|i| format!("{i:02x}")).collect();
        let q = parse_quote(&serde_json::to_string(&v).unwrap()).unwrap();
        assert_eq!(q[16], "10");

        assert!(parse_quote("[]").is_err());
        assert!(parse_quote("{").is_err());
    }
}
