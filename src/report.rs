//! Report rendering and export
//!
//! Presentation layer over the engine output: plain-text report,
//! CSV export, and pretty JSON. The engine itself only returns raw
//! numbers; all formatting lives here.

use std::io::Write;

use crate::error::Result;
use crate::model::{Analysis, Improvement};

/// Format a currency amount as `$1,234` (rounded to whole units).
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let mut digits = format!("{}", rounded.abs() as u64);

    // Insert thousands separators right-to-left.
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    while digits.len() > 3 {
        let tail = digits.split_off(digits.len() - 3);
        grouped = if grouped.is_empty() {
            tail
        } else {
            format!("{},{}", tail, grouped)
        };
    }
    grouped = if grouped.is_empty() {
        digits
    } else {
        format!("{},{}", digits, grouped)
    };

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a percentage with two decimals, e.g. `12.34%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn format_improvement(improvement: Improvement) -> String {
    match improvement {
        Improvement::Relative(p) => format!("{:+.2}%", p),
        Improvement::Undefined => "undefined (control rate is zero)".to_string(),
    }
}

/// Render the full analysis as a plain-text report.
pub fn render_report(analysis: &Analysis) -> String {
    let results = &analysis.results;
    let mut out = String::new();

    let header = format!(
        "A/B test report - generated {}",
        analysis.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.chars().count()));
    out.push('\n');

    out.push_str(&format!(
        "{:22} {:>10} {:>10} {:>8} {:>19} {:>12}\n",
        "Variant", "Visitors", "Conv", "Rate %", "95% CI", "Revenue"
    ));

    for v in &results.variants {
        let name = if v.is_control {
            format!("{} (control)", v.name)
        } else {
            v.name.clone()
        };
        // Truncate on char boundaries; names are arbitrary user text.
        let name: String = name.chars().take(22).collect();
        let ci = format!(
            "[{:.2}, {:.2}]",
            v.confidence_interval.lower, v.confidence_interval.upper
        );
        out.push_str(&format!(
            "{:22} {:>10} {:>10} {:>8.2} {:>19} {:>12}\n",
            name,
            v.visitors,
            v.conversions,
            v.rate,
            ci,
            format_currency(v.revenue)
        ));
        if let Some(sig) = v.significance {
            let z_text = sig
                .z_score
                .map(|z| format!("{:.2}", z))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  vs control: z = {}, {}\n",
                z_text,
                if sig.significant {
                    "significant"
                } else {
                    "not significant"
                }
            ));
        }
    }

    out.push('\n');
    out.push_str(&format!("Winner:          {}\n", results.winner));
    out.push_str(&format!(
        "Improvement:     {}\n",
        format_improvement(results.improvement)
    ));
    out.push_str(&format!(
        "Monthly impact:  {}\n",
        format_currency(results.monthly_revenue_impact)
    ));
    out.push_str(&format!(
        "Annual impact:   {}\n",
        format_currency(results.annual_revenue_impact)
    ));
    out.push_str(&format!("Risk level:      {}\n", results.risk_level));
    out.push_str(&format!(
        "Recommendation:  {} ({} confidence)\n",
        analysis.recommendation.label, analysis.recommendation.confidence
    ));
    out.push_str(&format!("  {}\n", analysis.recommendation.action_text));

    out
}

/// Print the report to stdout.
pub fn print_report(analysis: &Analysis) {
    print!("{}", render_report(analysis));
}

/// Export one CSV row per included variant.
pub fn write_csv<W: Write>(analysis: &Analysis, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "name",
        "is_control",
        "visitors",
        "conversions",
        "rate",
        "standard_error",
        "ci_lower",
        "ci_upper",
        "revenue",
        "z_score",
        "significant",
    ])?;

    for v in &analysis.results.variants {
        let (z_text, significant_text) = match v.significance {
            Some(sig) => (
                sig.z_score.map(|z| format!("{:.4}", z)).unwrap_or_default(),
                sig.significant.to_string(),
            ),
            None => (String::new(), String::new()),
        };
        csv_writer.write_record([
            v.name.clone(),
            v.is_control.to_string(),
            v.visitors.to_string(),
            v.conversions.to_string(),
            format!("{:.4}", v.rate),
            format!("{:.4}", v.standard_error),
            format!("{:.4}", v.confidence_interval.lower),
            format!("{:.4}", v.confidence_interval.upper),
            format!("{:.2}", v.revenue),
            z_text,
            significant_text,
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Serialize the analysis as pretty-printed JSON.
pub fn to_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}
