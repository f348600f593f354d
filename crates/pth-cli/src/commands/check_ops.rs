//! Regression corpus: positions with the reading they must derive to.
//!
//! ```toml
//! [[cases]]
//! position = "見三東平"
//! expected = "jiong1"
//! note = "扃"
//! ```

use std::fs;
use std::process;

use serde::{Deserialize, Serialize};

use pth_core::{Options, Position, RuleSet};

use super::{die, CliError, EngineArgs};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Corpus {
    pub cases: Vec<CorpusCase>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusCase {
    pub position: String,
    pub expected: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub skip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

#[derive(Debug, Serialize)]
pub struct CaseResult {
    pub position: String,
    pub expected: String,
    pub actual: String,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub error: usize,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub results: Vec<CaseResult>,
    pub summary: Summary,
}

pub fn parse_corpus(content: &str) -> Result<Corpus, CliError> {
    toml::from_str(content).map_err(|e| CliError::Corpus(e.to_string()))
}

fn run_case(rules: &RuleSet, opts: &Options, case: &CorpusCase) -> CaseResult {
    let (status, actual) = if case.skip {
        (CaseStatus::Skip, String::new())
    } else {
        let derived = Position::from_description(&case.position)
            .map_err(CliError::from)
            .and_then(|pos| Ok(rules.derive(&pos, opts)?));
        match derived {
            Ok(actual) if actual == case.expected => (CaseStatus::Pass, actual),
            Ok(actual) => (CaseStatus::Fail, actual),
            Err(e) => (CaseStatus::Error, e.to_string()),
        }
    };
    CaseResult {
        position: case.position.clone(),
        expected: case.expected.clone(),
        actual,
        status,
        note: case.note.clone(),
    }
}

pub fn run_corpus(rules: &RuleSet, opts: &Options, corpus: &Corpus) -> Report {
    let results: Vec<CaseResult> = corpus
        .cases
        .iter()
        .map(|case| run_case(rules, opts, case))
        .collect();

    let mut summary = Summary {
        total: results.len(),
        ..Summary::default()
    };
    for r in &results {
        match r.status {
            CaseStatus::Pass => summary.pass += 1,
            CaseStatus::Fail => summary.fail += 1,
            CaseStatus::Skip => summary.skip += 1,
            CaseStatus::Error => summary.error += 1,
        }
    }
    Report { results, summary }
}

pub fn check(corpus_file: &str, verbose: bool, json: bool, args: &EngineArgs) {
    let content = die!(
        fs::read_to_string(corpus_file),
        "Error reading {corpus_file}: {}"
    );
    let corpus = die!(parse_corpus(&content), "Error: {}");
    let (rules, opts) = die!(args.load(), "Error: {}");
    let report = run_corpus(rules, &opts, &corpus);

    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "JSON error: {}")
        );
    } else {
        for r in &report.results {
            if r.status == CaseStatus::Pass && !verbose {
                continue;
            }
            let tag = match r.status {
                CaseStatus::Pass => "PASS",
                CaseStatus::Fail => "FAIL",
                CaseStatus::Skip => "SKIP",
                CaseStatus::Error => "ERR ",
            };
            print!("{tag} {} expected={} actual={}", r.position, r.expected, r.actual);
            match &r.note {
                Some(note) => println!("  ({note})"),
                None => println!(),
            }
        }
        let s = &report.summary;
        println!(
            "\n{} cases: {} pass, {} fail, {} error, {} skip",
            s.total, s.pass, s.fail, s.error, s.skip
        );
    }

    if report.summary.fail > 0 || report.summary.error > 0 {
        process::exit(1);
    }
}
