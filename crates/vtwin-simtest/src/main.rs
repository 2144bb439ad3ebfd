//! Virtual Twin Headless Simulation Harness
//!
//! Runs a treatment scenario end to end and checks the model's invariants.
//! Runs entirely in-process, with no UI or networking.
//!
//! Usage:
//!   cargo run -p vtwin-simtest
//!   cargo run -p vtwin-simtest -- --verbose --seed 42
//!   cargo run -p vtwin-simtest -- --scenario scenario.json --cohort cohort.json
//!   cargo run -p vtwin-simtest -- --csv timeline.csv --json report.json
//!
//! Log level follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use serde::Serialize;
use vtwin_logic::cohort::{example_cohort, run_cohort, CohortPatient, CohortSummary};
use vtwin_logic::config::{validate_scenario, Scenario};
use vtwin_logic::disease::GENERIC_DISEASE;
use vtwin_logic::drug::Drug;
use vtwin_logic::patient::Patient;
use vtwin_logic::ranking::{rank_treatments, TreatmentRanking};
use vtwin_logic::report::timeline_to_csv;
use vtwin_logic::simulation::{run_simulation, seeded_rng, Timeline};
use vtwin_logic::validation::{validate_patient, ValidationError};

/// Seed used by the determinism check when the scenario has none.
const CHECK_SEED: u64 = 0x5EED;

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug)]
enum HarnessError {
    Io(std::io::Error),
    Json(serde_json::Error),
    BadArgument(String),
    InvalidInput(Vec<ValidationError>),
}

impl From<std::io::Error> for HarnessError {
    fn from(e: std::io::Error) -> Self {
        HarnessError::Io(e)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        HarnessError::Json(e)
    }
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Io(e) => write!(f, "IO error: {}", e),
            HarnessError::Json(e) => write!(f, "JSON error: {}", e),
            HarnessError::BadArgument(msg) => write!(f, "Bad argument: {}", msg),
            HarnessError::InvalidInput(errors) => {
                write!(f, "Invalid input:")?;
                for e in errors {
                    write!(f, "\n  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for HarnessError {}

// ── Options ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Options {
    verbose: bool,
    seed: Option<u64>,
    scenario: Option<PathBuf>,
    cohort: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, HarnessError> {
        let mut options = Options::default();
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| HarnessError::BadArgument(format!("{} needs a value", flag)))
            };
            match arg.as_str() {
                "--verbose" => options.verbose = true,
                "--seed" => {
                    let raw = value("--seed")?;
                    let seed = raw
                        .parse::<u64>()
                        .map_err(|_| HarnessError::BadArgument(format!("bad seed {:?}", raw)))?;
                    options.seed = Some(seed);
                }
                "--scenario" => options.scenario = Some(value("--scenario")?.into()),
                "--cohort" => options.cohort = Some(value("--cohort")?.into()),
                "--csv" => options.csv = Some(value("--csv")?.into()),
                "--json" => options.json = Some(value("--json")?.into()),
                other => {
                    return Err(HarnessError::BadArgument(format!("unknown flag {}", other)));
                }
            }
        }
        Ok(options)
    }
}

fn load_scenario(options: &Options) -> Result<Scenario, HarnessError> {
    let mut scenario = match &options.scenario {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => Scenario::default(),
    };
    if options.seed.is_some() {
        scenario.seed = options.seed;
    }

    let errors = validate_scenario(&scenario);
    if !errors.is_empty() {
        return Err(HarnessError::InvalidInput(errors));
    }
    Ok(scenario)
}

fn load_cohort(options: &Options) -> Result<Vec<Patient>, HarnessError> {
    let rows: Vec<CohortPatient> = match &options.cohort {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => example_cohort(),
    };
    let patients: Vec<Patient> = rows.iter().map(Patient::from).collect();

    let errors: Vec<ValidationError> = patients.iter().flat_map(validate_patient).collect();
    if !errors.is_empty() {
        return Err(HarnessError::InvalidInput(errors));
    }
    Ok(patients)
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Serialize)]
struct RunReport<'a> {
    scenario: &'a Scenario,
    timeline: &'a Timeline,
    ranking: &'a TreatmentRanking,
    cohort: &'a [CohortSummary],
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether every check passed.
fn run(args: &[String]) -> Result<bool, HarnessError> {
    let options = Options::parse(args)?;
    let verbose = options.verbose;
    let scenario = load_scenario(&options)?;
    let cohort = load_cohort(&options)?;

    println!("=== Virtual Twin Simulation Harness ===\n");
    println!(
        "Patient: {} (age {}, immune {}) | Disease: {} | Days: {} | Seed: {}",
        scenario.patient.name,
        scenario.patient.age,
        scenario.patient.immune,
        scenario.disease,
        scenario.days,
        scenario
            .seed
            .map_or("entropy".to_string(), |s| s.to_string())
    );

    let mut rng = seeded_rng(scenario.seed);

    // 1. Combined run
    let timeline = run_simulation(
        &scenario.patient,
        &scenario.disease,
        &scenario.drugs,
        scenario.days,
        &mut rng,
    );
    print_timeline(&timeline, verbose);

    // 2. Per-drug ranking over the same horizon
    let ranking = rank_treatments(timeline.days(), &scenario.drugs, &scenario.patient, &mut rng);
    print_ranking(&ranking);

    // 3. Cohort
    let summaries = run_cohort(
        &cohort,
        &scenario.disease,
        &scenario.drugs,
        scenario.days,
        &mut rng,
    );
    print_cohort(&summaries);

    // 4. Invariant checks
    let mut results = Vec::new();
    results.extend(validate_timeline(&timeline, &scenario));
    results.extend(validate_determinism(&scenario));
    results.extend(validate_ranking(&ranking, &scenario));
    results.extend(validate_decay());

    // 5. Outputs
    if let Some(path) = &options.csv {
        std::fs::write(path, timeline_to_csv(&timeline))?;
        log::info!("Wrote timeline CSV to {}", path.display());
    }
    if let Some(path) = &options.json {
        let report = RunReport {
            scenario: &scenario,
            timeline: &timeline,
            ranking: &ranking,
            cohort: &summaries,
        };
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        log::info!("Wrote JSON report to {}", path.display());
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    Ok(failed == 0)
}

// ── Printing ────────────────────────────────────────────────────────────

fn print_timeline(timeline: &Timeline, verbose: bool) {
    println!("\n--- Timeline ({}) ---", timeline.disease);
    println!(
        "  {:>3} {:>7} {:>8} {:>7} {:>7} {:>7}",
        "day", "viral", "symptom", "effect", "toxic", "organs"
    );
    for r in &timeline.records {
        println!(
            "  {:>3} {:>7.2} {:>8.2} {:>7.3} {:>7.3} {:>7.2}",
            r.day,
            r.viral_load,
            r.symptom_severity,
            r.drug_effect_total,
            r.drug_toxicity,
            r.avg_organ_health
        );
        if verbose {
            println!(
                "      heart={:.2} liver={:.2} kidney={:.2} lungs={:.2} immune={:.0}",
                r.heart, r.liver, r.kidney, r.lungs, r.immune_strength
            );
        }
    }
    println!(
        "  peak viral={:.2}, lowest avg organ health={:.2}",
        timeline.peak_viral_load(),
        timeline.lowest_avg_organ_health().unwrap_or(0.0)
    );
}

fn print_ranking(ranking: &TreatmentRanking) {
    println!("\n--- Treatment Ranking ---");
    for (i, e) in ranking.entries.iter().enumerate() {
        println!(
            "  {}. {:<28} score={:>7.2} viral={:>6.2} symptoms={:>6.2} organs={:>6.2} tox={:.3}",
            i + 1,
            e.name,
            e.score,
            e.final_viral,
            e.final_symptoms,
            e.avg_organ_health,
            e.drug_toxicity
        );
    }
    if let Some(explain) = &ranking.explainability {
        println!("  {}: {}", explain.note, explain.logic);
    }
}

fn print_cohort(summaries: &[CohortSummary]) {
    println!("\n--- Cohort ---");
    for s in summaries {
        println!(
            "  {:<12} viral={:>6.2} symptoms={:>6.2} organs={:>6.2} best={} ({})",
            s.patient,
            s.final_viral,
            s.final_symptoms,
            s.final_avg_organ_health,
            s.best_drug.as_deref().unwrap_or("-"),
            s.best_score.map_or("-".to_string(), |v| format!("{:.2}", v))
        );
    }
}

// ── Checks ──────────────────────────────────────────────────────────────

fn validate_timeline(timeline: &Timeline, scenario: &Scenario) -> Vec<TestResult> {
    let mut results = Vec::new();

    results.push(TestResult {
        name: "timeline_length".into(),
        passed: timeline.records.len() == scenario.days as usize + 1,
        detail: format!(
            "{} records for {} days",
            timeline.records.len(),
            scenario.days
        ),
    });

    let contiguous = timeline
        .records
        .iter()
        .enumerate()
        .all(|(i, r)| r.day as usize == i);
    results.push(TestResult {
        name: "timeline_days_contiguous".into(),
        passed: contiguous,
        detail: "days ascend from 0 with no gaps".into(),
    });

    let out_of_bounds: Vec<u32> = timeline
        .records
        .iter()
        .filter(|r| {
            [
                r.viral_load,
                r.symptom_severity,
                r.heart,
                r.liver,
                r.kidney,
                r.lungs,
                r.immune_strength,
            ]
            .iter()
            .any(|v| !(0.0..=100.0).contains(v))
        })
        .map(|r| r.day)
        .collect();
    results.push(TestResult {
        name: "timeline_scores_in_range".into(),
        passed: out_of_bounds.is_empty(),
        detail: if out_of_bounds.is_empty() {
            "all scores within [0, 100]".into()
        } else {
            format!("out of range on days {:?}", out_of_bounds)
        },
    });

    let baseline = scenario.patient.immune;
    results.push(TestResult {
        name: "immune_static".into(),
        passed: timeline
            .records
            .iter()
            .all(|r| r.immune_strength == baseline),
        detail: format!("immune stays at {}", baseline),
    });

    results
}

fn validate_determinism(scenario: &Scenario) -> Vec<TestResult> {
    let seed = scenario.seed.unwrap_or(CHECK_SEED);
    let simulate = || {
        let mut rng = seeded_rng(Some(seed));
        run_simulation(
            &scenario.patient,
            &scenario.disease,
            &scenario.drugs,
            scenario.days,
            &mut rng,
        )
    };

    vec![TestResult {
        name: "deterministic_under_seed".into(),
        passed: simulate() == simulate(),
        detail: format!("two runs with seed {} match", seed),
    }]
}

fn validate_ranking(ranking: &TreatmentRanking, scenario: &Scenario) -> Vec<TestResult> {
    let mut results = Vec::new();

    results.push(TestResult {
        name: "ranking_one_entry_per_drug".into(),
        passed: ranking.entries.len() == scenario.drugs.len(),
        detail: format!(
            "{} entries for {} drugs",
            ranking.entries.len(),
            scenario.drugs.len()
        ),
    });

    results.push(TestResult {
        name: "ranking_sorted".into(),
        passed: ranking
            .entries
            .windows(2)
            .all(|w| w[0].score >= w[1].score),
        detail: "scores descend".into(),
    });

    // Twin drugs differing only in toxicity
    let twin = |name: &str, toxicity: f64| Drug {
        name: name.to_string(),
        efficacy: 0.8,
        half_life: 12.0,
        toxicity,
        dose: 1.0,
    };
    let mut rng = seeded_rng(Some(scenario.seed.unwrap_or(CHECK_SEED)));
    let twins = rank_treatments(
        scenario.days,
        &[twin("toxic", 0.9), twin("clean", 0.0)],
        &scenario.patient,
        &mut rng,
    );
    let order: Vec<&str> = twins.entries.iter().map(|e| e.name.as_str()).collect();
    results.push(TestResult {
        name: "ranking_toxicity_penalized".into(),
        passed: order == ["clean", "toxic"],
        detail: format!("order {:?}", order),
    });

    let empty = rank_treatments(scenario.days, &[], &scenario.patient, &mut rng);
    results.push(TestResult {
        name: "ranking_empty_input".into(),
        passed: empty.entries.is_empty() && empty.explainability.is_none(),
        detail: "no drugs, no entries".into(),
    });

    results
}

fn validate_decay() -> Vec<TestResult> {
    let drug = Drug {
        name: "probe".to_string(),
        efficacy: 0.5,
        half_life: 12.0,
        toxicity: 0.0,
        dose: 1.0,
    };
    let mut rng = seeded_rng(Some(CHECK_SEED));
    let timeline = run_simulation(
        &Patient::default(),
        GENERIC_DISEASE,
        std::slice::from_ref(&drug),
        24,
        &mut rng,
    );
    let at_12 = timeline.records[12].drug_effect_total;
    let at_24 = timeline.records[24].drug_effect_total;

    vec![TestResult {
        name: "drug_effect_half_life".into(),
        passed: (at_24 - at_12 / 2.0).abs() < 1e-9,
        detail: format!("effect day 12={:.4}, day 24={:.4}", at_12, at_24),
    }]
}
