//! Text rendering of the input form, benchmark table and assessments.

use std::fmt::Write;

use crate::assessment::Assessment;
use crate::benchmark::BenchmarkStore;
use crate::metric::{MetricKey, PitchType};
use crate::percentile::PercentileMethod;

/// `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`, `50th`, `-1th`.
pub fn ordinal(n: i64) -> String {
    let suffix = if n < 0 {
        "th"
    } else {
        match (n % 10, n % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

/// Format a measured value the way it was entered, without trailing zeros.
fn format_value(value: f64) -> String {
    format!("{value}")
}

/// The input form: one section per pitch type, one field per metric.
pub fn render_form(store: &BenchmarkStore) -> String {
    let mut out = String::new();
    for pitch in PitchType::ALL {
        let _ = writeln!(out, "{}", pitch.label());
        for key in MetricKey::all().filter(|k| k.pitch == pitch) {
            let def = store.definition(key);
            let _ = writeln!(out, "  {:<24} {:<24} unit:{}", def.name, key, def.unit.trim());
        }
    }
    out
}

/// Anchor table with the estimation method each metric will use.
pub fn render_benchmarks(store: &BenchmarkStore) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:>9} {:>9} {:>9} {:<5} {:>8} {:<12}",
        "Metric", "P10", "P50", "P90", "Unit", "Samples", "Method"
    );
    let _ = writeln!(out, "{}", "-".repeat(84));
    for key in MetricKey::all() {
        let def = store.definition(key);
        let a = def.anchors;
        let _ = writeln!(
            out,
            "{:<24} {:>9} {:>9} {:>9} {:<5} {:>8} {:<12}",
            key.to_string(),
            format_value(a.p10),
            format_value(a.p50),
            format_value(a.p90),
            def.unit.trim(),
            store.samples(key).len(),
            PercentileMethod::for_metric(store, key).label(),
        );
    }
    out
}

/// Overall score followed by one block per metric, in form order.
pub fn render_assessment(assessment: &Assessment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Overall percentile: {}", ordinal(assessment.overall));
    let _ = writeln!(out);

    for (key, entry) in &assessment.results {
        let _ = writeln!(out, "{} - {}", key.pitch.label(), entry.benchmark.name);
        let _ = writeln!(
            out,
            "  Your value: {}{}",
            format_value(entry.value),
            entry.benchmark.unit
        );
        let _ = writeln!(out, "  {} percentile", ordinal(entry.percentile));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{assess, Measurements};
    use crate::metric::Dimension;

    #[test]
    fn ordinals() {
        let cases = [
            (0, "0th"),
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (50, "50th"),
            (100, "100th"),
            (101, "101st"),
            (-1, "-1th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
    }

    #[test]
    fn value_formatting_drops_trailing_zeros() {
        assert_eq!(format_value(93.8), "93.8");
        assert_eq!(format_value(2300.0), "2300");
        assert_eq!(format_value(-6.1), "-6.1");
    }

    #[test]
    fn assessment_lines() {
        let store = BenchmarkStore::default();
        let key = MetricKey::new(PitchType::FourSeam, Dimension::Velocity);
        let a = assess(&store, &Measurements::new().with(key, "93.8")).unwrap();
        let text = render_assessment(&a);
        assert!(text.starts_with("Overall percentile: 50th\n"));
        assert!(text.contains("4-Seam Fastball - Velocity\n"));
        assert!(text.contains("  Your value: 93.8 mph\n"));
        assert!(text.contains("  50th percentile\n"));
    }

    #[test]
    fn break_values_render_with_inch_mark() {
        let store = BenchmarkStore::default();
        let key = MetricKey::new(PitchType::Slider, Dimension::HorizontalBreak);
        let a = assess(&store, &Measurements::new().with(key, "3.5")).unwrap();
        let text = render_assessment(&a);
        assert!(text.contains("Slider - Horizontal Break\n"));
        assert!(text.contains("  Your value: 3.5\"\n"));
    }

    #[test]
    fn form_lists_every_metric_under_its_pitch() {
        let text = render_form(&BenchmarkStore::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3 + 15);
        assert_eq!(lines[0], "4-Seam Fastball");
        assert_eq!(lines[6], "Slider");
        assert_eq!(lines[12], "Splitter");
        assert!(lines[1].contains("ff_avg_speed"));
        assert!(lines[17].contains("fs_avg_break_z_induced"));
    }

    #[test]
    fn benchmark_table_reports_method() {
        let key = MetricKey::new(PitchType::Splitter, Dimension::SpinRate);
        let store = BenchmarkStore::default()
            .with_samples(key, vec![1200.0, 1500.0])
            .unwrap();
        let text = render_benchmarks(&store);
        let row = text.lines().find(|l| l.starts_with("fs_avg_spin")).unwrap();
        assert!(row.contains("empirical"));
        assert!(row.contains(" 2 "));
        let row = text.lines().find(|l| l.starts_with("ff_avg_speed")).unwrap();
        assert!(row.contains("interpolated"));
        assert!(row.contains("93.8"));
    }
}
