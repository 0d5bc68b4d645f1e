//! Plain-text report rendering.

use std::fmt::Write as _;

use rubrica_core::{Issue, ValidationResult};

const RULE: &str = "────────────────────────────────────────────────────────────";

pub fn text_report(result: &ValidationResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &ValidationResult) -> std::fmt::Result {
    writeln!(out, "REPORTE DE VALIDACIÓN")?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Fecha: {}",
        result.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(
        out,
        "Nivel: {} (umbral {:.0}%)",
        result.level, result.threshold
    )?;
    writeln!(
        out,
        "Puntuación: {}/{} ({:.1}%)",
        result.total_score, result.max_score, result.percentage
    )?;
    writeln!(
        out,
        "Estado: {}",
        if result.passed { "APROBADO" } else { "NO APROBADO" }
    )?;

    writeln!(out)?;
    writeln!(out, "CATEGORÍAS")?;
    writeln!(out, "{RULE}")?;
    for category in &result.categories {
        writeln!(
            out,
            "  {:<30} {:>3}/{:<3} ({:.0}%)",
            category.name,
            category.score,
            category.max_score,
            category.ratio() * 100.0
        )?;
    }

    write_issues(out, "ERRORES", result.errors())?;
    write_issues(out, "ADVERTENCIAS", result.warnings())?;

    if !result.recommendations.is_empty() {
        writeln!(out)?;
        writeln!(out, "RECOMENDACIONES")?;
        writeln!(out, "{RULE}")?;
        for (idx, recommendation) in result.recommendations.iter().enumerate() {
            writeln!(out, "  {}. {recommendation}", idx + 1)?;
        }
    }
    Ok(())
}

fn write_issues<'a>(
    out: &mut String,
    heading: &str,
    issues: impl Iterator<Item = &'a Issue>,
) -> std::fmt::Result {
    let issues: Vec<&Issue> = issues.collect();
    if issues.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{heading} ({})", issues.len())?;
    writeln!(out, "{RULE}")?;
    for issue in issues {
        writeln!(out, "  • [{}] {}", issue.location, issue.message)?;
    }
    Ok(())
}
