use follicle_axis::config::{self, OutputFormat};
use follicle_axis::io::{read_json_file, write_json_file};
use follicle_axis::report::AnalysisReport;
use follicle_axis::{AnalysisOutput, AxisPipeline, StrengthCategory};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <config.json>")
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "axis_report".to_string());
    let config_path = match (args.next(), args.next()) {
        (Some(path), None) => PathBuf::from(path),
        _ => return Err(usage(&program)),
    };

    let config = config::load_config(&config_path).map_err(|e| e.to_string())?;
    let response = read_json_file(&config.input_path).map_err(|e| e.to_string())?;

    let pipeline = AxisPipeline::new(config.params.clone());
    let output = pipeline.process_with_diagnostics(&response);

    if config.output.format.includes_text() {
        print_text_summary(&output);
    }

    if config.output.format.includes_json() {
        if let Some(path) = &config.output.json_out {
            write_json_file(path, &output).map_err(|e| e.to_string())?;
            if config.output.format.includes_text() {
                println!("\nJSON report written to {}", path.display());
            } else {
                println!("JSON report written to {}", path.display());
            }
        } else {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            if config.output.format == OutputFormat::Both {
                println!("\nJSON report:\n{json}");
            } else {
                println!("{json}");
            }
        }
    }

    Ok(())
}

fn print_text_summary(output: &AnalysisOutput) {
    let report = &output.analysis.report;
    let trace = &output.trace;

    println!("Follicle axis summary");
    println!(
        "  input: shape={:?} entries={} below_threshold={} analysed={}",
        trace.shape, trace.entries_seen, trace.rejected_low_confidence, trace.detections
    );
    if let Some(info) = &report.image_info {
        println!(
            "  image: {}x{} ({} px)",
            info.width, info.height, info.total_pixels
        );
    }
    println!("  total: {}", report.total_count);

    print_buckets(report);

    println!(
        "\nTriangles: {}/{} ({:.1}%) too_few_points={} degenerate_hull={} bbox_fallbacks={}",
        report.triangle_analysis.successful_triangles,
        report.total_count,
        report.triangle_analysis.success_rate,
        trace.failures.too_few_points,
        trace.failures.degenerate_hull,
        trace.bbox_fallbacks
    );
    println!(
        "Ratios: terminal_vellus={} strong_medium={}",
        report.ratios.terminal_vellus, report.ratios.strong_medium
    );
    let overall = &report.overall_confidence;
    println!(
        "Confidence: avg={:.3} min={:.3} max={:.3} std={:.3} n={}",
        overall.average, overall.min, overall.max, overall.std, overall.count
    );
    println!(
        "Dominant: {}",
        report
            .dominant_category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string())
    );

    println!("\nTimings (ms): total={:.3}", trace.timing.total_ms);
    for stage in &trace.timing.stages {
        println!("  {}: {:.3}", stage.label, stage.elapsed_ms);
    }
}

fn print_buckets(report: &AnalysisReport) {
    for category in StrengthCategory::BUCKETS {
        let (Some(count), Some(pct), Some(conf)) = (
            report.class_counts.get(category),
            report.class_percentages.get(category),
            report.confidence_stats.get(category),
        ) else {
            continue;
        };
        println!(
            "  {:<6} count={} ({:.1}%) conf avg={:.3} min={:.3} max={:.3}",
            category, count, pct, conf.average, conf.min, conf.max
        );
    }
}
