use crate::gui_bridge::model::VisualizationModel;
use crate::retrieval::{FetchRequest, SensorApiClient};
use crate::workflow::runner::Runner;
use anyhow::Result;
use rxcore::receiver::SensorReading;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that hosts the detection HTTP endpoint and decodes incoming
/// readings for the visualizer.
pub struct GuiBridge {
    state: Arc<RwLock<VisualizationModel>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(VisualizationModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("detections")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<VisualizationModel>>| {
                warp::reply::json(&*state.read().unwrap())
            });

        let ingest_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |readings: Vec<SensorReading>,
                 state: Arc<RwLock<VisualizationModel>>,
                 runner: Arc<Runner>| async move {
                    match runner.execute(&readings) {
                        Ok(result) => {
                            let mut guard = state.write().unwrap();
                            *guard = VisualizationModel::from_result(&result);
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "detections": result.detection_count,
                                    "readings_skipped": result.readings_skipped
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("ingest error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let fetch_route = warp::path("fetch-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |request: FetchRequest,
                 state: Arc<RwLock<VisualizationModel>>,
                 runner: Arc<Runner>| async move {
                    let client = SensorApiClient::new();
                    let fetched = client
                        .fetch_readings(&request.token, &request.spotter_id, &request.start_date)
                        .await;
                    match fetched.and_then(|readings| {
                        let mut config = runner.config().clone();
                        config.spotter_id = request.spotter_id.clone();
                        config.start_date = request.start_date.clone();
                        if request.exclude_reference_tag.is_some() {
                            config.exclude_reference_tag =
                                request.exclude_reference_tag.clone();
                        }
                        Runner::new(config).execute(&readings)
                    }) {
                        Ok(result) => {
                            let mut guard = state.write().unwrap();
                            *guard = VisualizationModel::from_result(&result);
                            println!(
                                "[GUI] Spotter {} -> {} detection(s)",
                                request.spotter_id, result.detection_count
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "detections": result.detection_count,
                                    "readings_skipped": result.readings_skipped,
                                    "records_excluded": result.records_excluded
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("fetch-config error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(ingest_route).or(fetch_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &VisualizationModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[GUI] detections: {}, readings skipped: {}",
            guard.detection_count, guard.readings_skipped
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fixture::{build_fixture_batch, FixtureConfig};
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;
    use std::sync::Arc;

    #[test]
    fn gui_bridge_updates_state() {
        let cfg = WorkflowConfig::from_args(
            "SPOT-32255C".into(),
            "2025-06-07T00:00:00Z".into(),
            None,
            false,
            false,
        );
        let runner = Arc::new(Runner::new(cfg));
        let gui = GuiBridge::new(runner.clone());
        let readings = build_fixture_batch(&FixtureConfig::default()).unwrap();
        let result = runner.execute(&readings).unwrap();
        let model = VisualizationModel::from_result(&result);
        gui.publish(&model).unwrap();
        assert_eq!(gui.snapshot().detection_count, result.detection_count);
    }
}
