use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme,
};
use rxcore::receiver::EnrichedDetection;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn main() -> iced::Result {
    iced::application(Visualizer::boot, Visualizer::update, Visualizer::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Visualizer) -> String {
    "Rx-LIVE Detection Visualizer".into()
}

fn application_subscription(_: &Visualizer) -> Subscription<Message> {
    time::every(Duration::from_secs(1)).map(|_| Message::Tick)
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Visualizer {
    config: FetchForm,
    payload: Option<DetectionPayload>,
    ping_series: Vec<f32>,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    PayloadFetched(Result<DetectionPayload, String>),
    ConfigFieldChanged(ConfigField, String),
    SubmitFetch,
    FetchSubmitted(Result<String, String>),
}

#[derive(Debug, Clone, Copy)]
enum ConfigField {
    SpotterId,
    Token,
    StartDate,
    ReferenceTag,
}

impl Visualizer {
    fn boot() -> (Self, Task<Message>) {
        (
            Visualizer {
                config: FetchForm::default(),
                payload: None,
                ping_series: Vec::new(),
                status: "Waiting for detections...".into(),
                history: Vec::new(),
            },
            Task::perform(fetch_payload(), Message::PayloadFetched),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => Task::perform(fetch_payload(), Message::PayloadFetched),
            Message::PayloadFetched(Ok(payload)) => {
                state.ping_series = payload
                    .detections
                    .iter()
                    .map(|detection| detection.detection_count as f32)
                    .collect();
                let summary = format!(
                    "Detections: {} ({} reading(s) skipped)",
                    payload.detection_count, payload.readings_skipped
                );
                if state
                    .payload
                    .as_ref()
                    .map(|previous| previous.detection_count != payload.detection_count)
                    .unwrap_or(true)
                {
                    state.push_history(summary.clone());
                }
                state.status = summary;
                state.payload = Some(payload);
                Task::none()
            }
            Message::PayloadFetched(Err(err)) => {
                state.status = format!("Bridge error: {err}");
                Task::none()
            }
            Message::ConfigFieldChanged(field, value) => {
                state.config.update_field(field, value);
                Task::none()
            }
            Message::SubmitFetch => {
                let request = state.config.to_request();
                Task::perform(post_fetch(request), Message::FetchSubmitted)
            }
            Message::FetchSubmitted(Ok(message)) => {
                state.status = message;
                state.push_history("Fetch submitted".into());
                Task::none()
            }
            Message::FetchSubmitted(Err(err)) => {
                state.status = format!("Fetch error: {err}");
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let detections = state
            .payload
            .as_ref()
            .map(|payload| payload.detections.clone())
            .unwrap_or_default();

        let config_column = column![
            text("Fetch Parameters").size(26),
            text_input("Spotter ID", &state.config.spotter_id)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::SpotterId, value))
                .padding(6),
            text_input("API token", &state.config.token)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::Token, value))
                .padding(6),
            text_input("Start date (ISO)", &state.config.start_date)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::StartDate, value))
                .padding(6),
            text_input("Reference tag to exclude", &state.config.reference_tag)
                .on_input(|value| Message::ConfigFieldChanged(ConfigField::ReferenceTag, value))
                .padding(6),
            button("Fetch & decode")
                .on_press(Message::SubmitFetch)
                .padding(10),
            text(&state.status).size(14),
            column![
                text("Parameter definitions").size(16),
                text("Spotter ID: the buoy whose Rx-LIVE payloads should be decoded.").size(12),
                text("API token: opaque sensor-data credential, passed through unchanged.")
                    .size(12),
                text("Start date: earliest reading to request, ISO-8601 UTC.").size(12),
                text("Reference tag: calibration transmitter identity dropped from results; leave empty to keep everything.")
                    .size(12),
            ]
            .spacing(4)
            .padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let detection_info = if let Some(payload) = &state.payload {
            text(format!(
                "Detections: {} / {} record(s) skipped / {} excluded",
                payload.detection_count, payload.records_skipped, payload.records_excluded
            ))
            .size(18)
        } else {
            text("Detections: n/a").size(18)
        };

        let ping_chart = Canvas::new(PingSeries {
            data: state.ping_series.clone(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(220.0));

        let position_canvas = Canvas::new(PositionMap::new(&detections))
            .width(Length::Fill)
            .height(Length::Fixed(260.0));

        let detection_entries = if detections.is_empty() {
            Column::new().push(text("No detections to list").size(12))
        } else {
            detections.iter().enumerate().take(8).fold(
                Column::new().spacing(4),
                |col, (idx, detection)| {
                    col.push(
                        text(format!(
                            "#{}: {} | pings {} | {} | ({:.5}, {:.5})",
                            idx + 1,
                            detection.tag_identity,
                            detection.detection_count,
                            detection.display_time,
                            detection.latitude,
                            detection.longitude
                        ))
                        .size(12),
                    )
                },
            )
        };

        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let telemetry_column = column![
            text("Detections").size(26),
            detection_info,
            text("Positions (marker size = ping count)").size(16),
            position_canvas,
            text("Ping counts in time order").size(16),
            ping_chart,
            text("Detection table").size(16),
            Container::new(scrollable(detection_entries).height(Length::Fixed(140.0))).padding(6),
            text("Activity log").size(16),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![config_column, telemetry_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

async fn fetch_payload() -> Result<DetectionPayload, String> {
    let response = reqwest::get("http://127.0.0.1:9000/detections")
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<DetectionPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn post_fetch(request: FetchRequest) -> Result<String, String> {
    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:9000/fetch-config")
        .json(&request)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status().is_success() {
        Ok("Fetch submitted".into())
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|_| "".into());
        Err(format!("{}: {}", status, text))
    }
}

#[derive(Debug, Clone)]
struct FetchForm {
    spotter_id: String,
    token: String,
    start_date: String,
    reference_tag: String,
}

impl Default for FetchForm {
    fn default() -> Self {
        Self {
            spotter_id: "SPOT-32255C".into(),
            token: String::new(),
            start_date: "2025-06-07T00:00:00Z".into(),
            reference_tag: "A69-9001-65011".into(),
        }
    }
}

impl FetchForm {
    fn update_field(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::SpotterId => self.spotter_id = value,
            ConfigField::Token => self.token = value,
            ConfigField::StartDate => self.start_date = value,
            ConfigField::ReferenceTag => self.reference_tag = value,
        }
    }

    fn to_request(&self) -> FetchRequest {
        FetchRequest {
            spotter_id: self.spotter_id.clone(),
            token: self.token.clone(),
            start_date: self.start_date.clone(),
            exclude_reference_tag: if self.reference_tag.trim().is_empty() {
                None
            } else {
                Some(self.reference_tag.clone())
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct FetchRequest {
    spotter_id: String,
    token: String,
    start_date: String,
    exclude_reference_tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DetectionPayload {
    #[serde(default)]
    detections: Vec<EnrichedDetection>,
    #[serde(default)]
    detection_count: usize,
    #[serde(default)]
    readings_skipped: usize,
    #[serde(default)]
    records_skipped: usize,
    #[serde(default)]
    records_excluded: usize,
}

#[derive(Clone)]
struct PingSeries {
    data: Vec<f32>,
}

impl canvas::Program<Message> for PingSeries {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        if self.data.len() > 1 {
            let min = self.data.iter().cloned().fold(f32::INFINITY, f32::min);
            let max = self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            let range = (max - min).max(1.0);
            let width = bounds.width;
            let step = width / (self.data.len() as f32 - 1.0);
            let path = Path::new(|builder| {
                for (i, value) in self.data.iter().enumerate() {
                    let x = i as f32 * step;
                    let normalized = (value - min) / range;
                    let y = bounds.height - normalized * bounds.height;
                    if i == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });

            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(2.5)
                    .with_color(Color::from_rgb(0.18, 0.72, 0.89)),
            );
        }

        vec![frame.into_geometry()]
    }
}

#[derive(Clone)]
struct PositionMap {
    detections: Vec<EnrichedDetection>,
}

impl PositionMap {
    fn new(detections: &[EnrichedDetection]) -> Self {
        Self {
            detections: detections.to_vec(),
        }
    }
}

impl canvas::Program<Message> for PositionMap {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.02, 0.02, 0.04),
        );

        let margin = 16.0;
        let plot_width = (bounds.width - 2.0 * margin).max(1.0);
        let plot_height = (bounds.height - 2.0 * margin).max(1.0);

        let border = Path::new(|builder| {
            builder.rectangle(
                Point::new(margin, margin),
                iced::Size::new(plot_width, plot_height),
            );
        });
        frame.stroke(
            &border,
            Stroke::default()
                .with_color(Color::from_rgb(0.35, 0.35, 0.45))
                .with_width(1.0),
        );

        if self.detections.is_empty() {
            return vec![frame.into_geometry()];
        }

        let min_lat = self
            .detections
            .iter()
            .map(|d| d.latitude)
            .fold(f64::INFINITY, f64::min);
        let max_lat = self
            .detections
            .iter()
            .map(|d| d.latitude)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_lon = self
            .detections
            .iter()
            .map(|d| d.longitude)
            .fold(f64::INFINITY, f64::min);
        let max_lon = self
            .detections
            .iter()
            .map(|d| d.longitude)
            .fold(f64::NEG_INFINITY, f64::max);

        let lat_span = (max_lat - min_lat).max(1e-6);
        let lon_span = (max_lon - min_lon).max(1e-6);

        for detection in &self.detections {
            let x_fraction = ((detection.longitude - min_lon) / lon_span) as f32;
            let y_fraction = ((detection.latitude - min_lat) / lat_span) as f32;
            let x = margin + x_fraction * plot_width;
            // Latitude grows upward, canvas y grows downward.
            let y = margin + (1.0 - y_fraction) * plot_height;

            let marker_radius = 3.0 + (detection.detection_count as f32).min(20.0) * 0.35;
            let marker = Path::new(|builder| builder.circle(Point::new(x, y), marker_radius));
            frame.fill(&marker, Color::from_rgb(0.95, 0.55, 0.2));
        }

        vec![frame.into_geometry()]
    }
}
