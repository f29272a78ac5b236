use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use implantx_core::constants::{BASELINE_SUCCESS, CEILING_SUCCESS, FLOOR_SUCCESS};
use implantx_core::tables::{classification_bands, deduction_rows, synergy_rows};
use implantx_core::{
    AssessmentResult, AssessmentService, FreeSummary, FullReport, PatientAnswers, Report,
    ReportTier, RiskFactor, TreatmentTimeline,
};
use questionnaire::Questionnaire;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "implantx")]
#[command(about = "ImplantX dental implant risk assessment CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a completed questionnaire (YAML, or JSON by .json extension)
    Evaluate {
        /// Questionnaire answers file
        file: PathBuf,
        /// Report tier
        #[arg(long, value_enum, default_value_t = TierArg::Free)]
        tier: TierArg,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the scoring tables
    Tables,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TierArg {
    Free,
    Paid,
}

impl From<TierArg> for ReportTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Free => ReportTier::Free,
            TierArg::Paid => ReportTier::Paid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Evaluate { file, tier, format }) => {
            let answers = load_answers(&file)?;
            let report = AssessmentService::new().assess(&answers, tier.into());
            let output = match format {
                Format::Text => render_report(&report)?,
                Format::Json => serde_json::to_string_pretty(&report)?,
                Format::Yaml => serde_yaml::to_string(&report)?,
            };
            println!("{}", output.trim_end());
        }
        Some(Commands::Tables) => {
            println!("{}", render_tables()?.trim_end());
        }
        None => {
            println!("Use 'implantx --help' for commands");
        }
    }

    Ok(())
}

fn load_answers(path: &Path) -> anyhow::Result<PatientAnswers> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let answers = if is_json(path) {
        Questionnaire::load_json(&text)
    } else {
        Questionnaire::load_yaml(&text)
    };
    answers.with_context(|| format!("invalid questionnaire in {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

// ============================================================================
// Text rendering
// ============================================================================

fn render_report(report: &Report) -> Result<String, fmt::Error> {
    let mut out = String::new();
    match report {
        Report::Free(summary) => render_free(&mut out, summary)?,
        Report::Paid(full) => render_full(&mut out, full)?,
    }
    Ok(out)
}

fn render_free(out: &mut String, summary: &FreeSummary) -> fmt::Result {
    writeln!(out, "Classification: {}", summary.classification)?;
    writeln!(out, "Success probability: {}", summary.success_probability)?;

    if summary.optimal_profile {
        writeln!(out, "Optimal profile: no risk factors to address")?;
    }
    render_risk_factors(out, &summary.top_risk_factors)?;
    if summary.hidden_risk_factors > 0 {
        writeln!(
            out,
            "{} more risk factor(s) in the full report",
            summary.hidden_risk_factors
        )?;
    }
    Ok(())
}

fn render_full(out: &mut String, full: &FullReport) -> fmt::Result {
    let result: &AssessmentResult = &full.assessment;
    writeln!(out, "Classification: {}", result.classification)?;
    writeln!(out, "Success probability: {}", result.success_probability)?;

    if result.optimal_profile {
        writeln!(out, "Optimal profile: no risk factors to address")?;
    }
    render_risk_factors(out, &result.risk_factors)?;

    if !result.protective_factors.is_empty() {
        writeln!(out, "Protective factors:")?;
        for factor in &result.protective_factors {
            writeln!(
                out,
                "  + {}: {} (+{})",
                factor.name, factor.situation, factor.benefit
            )?;
        }
    }

    if !result.synergies.is_empty() {
        writeln!(out, "Combined risks:")?;
        for synergy in &result.synergies {
            writeln!(out, "  ! {} (-{})", synergy.description, synergy.penalty)?;
        }
    }

    if !result.recommendations.is_empty() {
        writeln!(out, "Recommendations:")?;
        for rec in &result.recommendations {
            writeln!(out, "  [{}] {}", rec.priority, rec.advice)?;
            writeln!(out, "        {}", rec.evidence)?;
        }
    }

    render_timeline(out, &full.timeline)
}

fn render_risk_factors(out: &mut String, factors: &[RiskFactor]) -> fmt::Result {
    if factors.is_empty() {
        return Ok(());
    }
    writeln!(out, "Risk factors:")?;
    for factor in factors {
        writeln!(
            out,
            "  - {}: {} (-{}, {})",
            factor.name, factor.situation, factor.impact, factor.severity
        )?;
    }
    Ok(())
}

fn render_timeline(out: &mut String, timeline: &TreatmentTimeline) -> fmt::Result {
    writeln!(
        out,
        "Treatment timeline: {}-{} weeks",
        timeline.total_min_weeks, timeline.total_max_weeks
    )?;
    for phase in &timeline.phases {
        writeln!(
            out,
            "  {}: {}-{} weeks",
            phase.phase.label(),
            phase.min_weeks,
            phase.max_weeks
        )?;
    }
    Ok(())
}

fn render_tables() -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "Baseline {}%, floor {}%, ceiling {}%",
        BASELINE_SUCCESS, FLOOR_SUCCESS, CEILING_SUCCESS
    )?;

    writeln!(out, "Deductions:")?;
    for row in deduction_rows() {
        writeln!(
            out,
            "  {:<20} {:<45} {:>3}",
            row.dimension.display_name(),
            row.answer,
            row.penalty
        )?;
    }

    writeln!(out, "Synergies:")?;
    for row in synergy_rows() {
        writeln!(out, "  {:<36} {:>3}  {}", row.id, row.penalty, row.description)?;
    }

    writeln!(out, "Classification bands:")?;
    for band in classification_bands() {
        writeln!(out, "  >= {:>3}%  {}", band.min_probability, band.classification)?;
    }
    Ok(out)
}
