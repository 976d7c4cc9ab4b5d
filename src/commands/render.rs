//! Render command implementation.
//!
//! The render command:
//! 1. Loads a trace (from a file or the execution service)
//! 2. Builds step graphs
//! 3. Writes the graph document
//! 4. Optionally prints a text summary

use crate::commands::models::RenderArgs;
use crate::graph::{StepGraph, StepGraphCache};
use crate::output::{render_step_summary, to_document, write_graph_document};
use crate::parser::{load_trace_file, ExecutionTrace};
use crate::rpc::{ExecutionClient, ExecutionRequest};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace file or execution service failures (never rendered as an empty graph)
/// * Step index out of range
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Load trace
    info!("Step 1/3: Loading trace...");
    let (source, trace) = load_trace(&args)?;
    debug!("Trace has {} steps", trace.steps.len());

    let code = trace.code.clone();
    let step_count = trace.steps.len();

    // Step 2: Build graphs
    info!("Step 2/3: Building step graphs...");
    let mut cache = StepGraphCache::new(trace);
    let graphs: Vec<StepGraph> = match args.step {
        Some(index) => vec![cache
            .get_by_step_index(index)
            .context("Failed to select trace step")?
            .clone()],
        None => cache.into_graphs(),
    };

    // Step 3: Write outputs
    info!("Step 3/3: Writing graph document...");
    let document = to_document(source, code, step_count, args.step, graphs);

    write_graph_document(&document, &args.output_json)
        .context("Failed to write graph document")?;

    info!("✓ Graph document written to: {}", args.output_json.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("TRACE GRAPH SUMMARY");
        println!("{}", "=".repeat(80));
        for graph in &document.steps {
            println!("--- step {} ---", graph.step_index);
            print!("{}", render_step_summary(graph));
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Load the trace named by the arguments
///
/// **Private** - internal helper for execute_render
fn load_trace(args: &RenderArgs) -> Result<(String, ExecutionTrace)> {
    if let Some(path) = &args.trace_file {
        let trace = load_trace_file(path)
            .with_context(|| format!("Failed to load trace file {}", path.display()))?;
        return Ok((path.display().to_string(), trace));
    }

    let Some(code_path) = &args.code_file else {
        anyhow::bail!("Either a trace file or a code file is required");
    };

    let code = std::fs::read_to_string(code_path)
        .with_context(|| format!("Failed to read code file {}", code_path.display()))?;

    let session_id = args
        .session_id
        .clone()
        .unwrap_or_else(generate_session_id);

    let request = ExecutionRequest::new(code, args.language.clone(), session_id);

    let client = ExecutionClient::new(&args.exec_url).context("Failed to create execution client")?;
    let trace = client
        .execute(&request)
        .context("Failed to fetch trace from execution service")?;

    Ok((args.exec_url.clone(), trace))
}

/// Session id for ad-hoc CLI runs
fn generate_session_id() -> String {
    format!("cli-{}", chrono::Utc::now().timestamp_millis())
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    match (&args.trace_file, &args.code_file) {
        (Some(_), Some(_)) => anyhow::bail!("Use either --trace or --code, not both"),
        (None, None) => anyhow::bail!("One of --trace or --code is required"),
        _ => {}
    }

    if args.code_file.is_some() {
        if args.exec_url.is_empty() {
            anyhow::bail!("Execution service URL cannot be empty");
        }

        if !args.exec_url.starts_with("http://") && !args.exec_url.starts_with("https://") {
            anyhow::bail!("Execution service URL must start with http:// or https://");
        }

        if args.language.trim().is_empty() {
            anyhow::bail!("Language cannot be empty");
        }
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    Ok(())
}
