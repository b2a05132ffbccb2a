use anyhow::Context;
use clap::Parser;
use log::info;
use generator::fixture::{build_fixture_batch, FixtureConfig};
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::VisualizationModel;
use retrieval::SensorApiClient;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod retrieval;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Rx-LIVE acoustic tag detection decode driver")]
struct Args {
    /// Decode a synthetic fixture batch offline and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Fetch readings from the sensor-data API before decoding
    #[arg(long, default_value_t = false)]
    fetch: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value = "SPOT-32255C")]
    spotter_id: String,
    /// Sensor-data API token, passed through opaquely
    #[arg(long, default_value = "")]
    token: String,
    #[arg(long, default_value = "2025-06-07T00:00:00Z")]
    start_date: String,
    /// Reference tag identity to drop from results
    #[arg(long, default_value = "A69-9001-65011")]
    reference_tag: String,
    /// Keep reference-tag detections instead of excluding them
    #[arg(long, default_value_t = false)]
    keep_reference_tag: bool,
    /// Render display timestamps in the local zone
    #[arg(long, default_value_t = false)]
    local_time: bool,
    /// Reject payloads whose declared record count is wrong
    #[arg(long, default_value_t = false)]
    strict_count: bool,
    /// Keep the GUI bridge alive for incoming readings
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let exclude = if args.keep_reference_tag {
            None
        } else {
            Some(args.reference_tag.clone())
        };
        WorkflowConfig::from_args(
            args.spotter_id.clone(),
            args.start_date.clone(),
            exclude,
            args.local_time,
            args.strict_count,
        )
    };

    let runner = Runner::new(workflow_config.clone());
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));

    if args.offline {
        let readings = build_fixture_batch(&FixtureConfig::default())?;
        let result = runner.execute(&readings)?;
        publish_and_report(&gui_bridge, &result, "Offline fixture decode ready.")?;
    }

    if args.fetch {
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for the sensor-data fetch")?;
        let client = SensorApiClient::new();
        let readings = runtime.block_on(client.fetch_readings(
            &args.token,
            &workflow_config.spotter_id,
            &workflow_config.start_date,
        ))?;
        println!(
            "Fetched {} reading(s) for {}",
            readings.len(),
            workflow_config.spotter_id
        );
        let result = runner.execute(&readings)?;
        publish_and_report(&gui_bridge, &result, "Fetched batch decoded.")?;
    }

    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

fn publish_and_report(
    gui_bridge: &GuiBridge,
    result: &workflow::runner::WorkflowResult,
    status: &str,
) -> anyhow::Result<()> {
    println!(
        "Found {} detection(s) ({} reading(s) skipped, {} record(s) skipped, {} excluded)",
        result.detection_count,
        result.readings_skipped,
        result.records_skipped,
        result.records_excluded
    );
    for detection in &result.detections {
        println!(
            "  {} pings={} {} ({:.5}, {:.5})",
            detection.tag_identity,
            detection.detection_count,
            detection.display_time,
            detection.latitude,
            detection.longitude
        );
    }

    gui_bridge.publish(&VisualizationModel::from_result(result))?;
    gui_bridge.publish_status(status);

    let report = format!(
        "detections={} readings_skipped={} records_skipped={} records_excluded={}\n",
        result.detection_count,
        result.readings_skipped,
        result.records_skipped,
        result.records_excluded
    );
    let report_path = PathBuf::from("tools/data/decode_report.log");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(report_path)?;
    file.write_all(report.as_bytes())?;
    info!("decode report appended to tools/data/decode_report.log");
    Ok(())
}
