use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use crate::api::{ApiError, ApiFailure, RoadmapClient, SalaryData};
use crate::insights::{salary_summary, ChartKind, DemandChart, SalaryChart, PRESET_TOPICS};
use crate::outline::{self, OutlineNode};
use crate::storage::{ClientState, Storage};

pub const MODEL_OPTIONS: [&str; 4] = [
    "auto",
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-2.5-flash-8b",
];
pub const LENGTH_OPTIONS: [&str; 3] = ["short", "medium", "long"];
pub const EXPERIENCE_OPTIONS: [&str; 5] = ["entry", "junior", "mid", "senior", "lead"];

const MAX_SUGGESTIONS: usize = 6;
// Toast lifetime in 300ms ticks (3 seconds).
const TOAST_TICKS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    History,
    Presets,
    Content,
}

/// The two mutually exclusive result views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Markdown,
    Outline,
}

impl View {
    /// Deep-link parsing: anything other than "outline" means markdown.
    pub fn parse(value: &str) -> Self {
        if value == "outline" {
            View::Outline
        } else {
            View::Markdown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Markdown => "markdown",
            View::Outline => "outline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picker {
    Model,
    Length,
    Experience,
}

impl Picker {
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Picker::Model => &MODEL_OPTIONS,
            Picker::Length => &LENGTH_OPTIONS,
            Picker::Experience => &EXPERIENCE_OPTIONS,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Picker::Model => " Select Model ",
            Picker::Length => " Select Length ",
            Picker::Experience => " Select Experience ",
        }
    }
}

/// What the primary (markdown) view is currently showing.
#[derive(Debug, Clone)]
pub enum RoadmapPane {
    Empty,
    Notice(String),
    Failure(ApiFailure),
    Roadmap,
}

/// What the outline view is currently showing.
#[derive(Debug, Clone)]
pub enum OutlinePane {
    Idle,
    NoContent,
    NoHeadings,
    Tree(Vec<OutlineNode>),
}

impl OutlinePane {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            OutlinePane::Idle => Some("Switch to Markdown and generate to see outline."),
            OutlinePane::NoContent => Some("No outline available."),
            OutlinePane::NoHeadings => Some("No headings found."),
            OutlinePane::Tree(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub ticks_left: u8,
}

/// Color palette; one constructor per theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub dark: bool,
    pub text: Color,
    pub text_dim: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub border_focus: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub header_bg: Color,
    pub series: [Color; 5],
}

// Series palette carried over from the web client's chart colors.
const SERIES_COLORS: [Color; 5] = [
    Color::Rgb(79, 70, 229),
    Color::Rgb(6, 182, 212),
    Color::Rgb(16, 185, 129),
    Color::Rgb(245, 158, 11),
    Color::Rgb(236, 72, 153),
];

impl Theme {
    pub fn dark() -> Self {
        Self {
            dark: true,
            text: Color::White,
            text_dim: Color::DarkGray,
            accent: Color::Cyan,
            accent_alt: Color::Yellow,
            border: Color::DarkGray,
            border_focus: Color::Cyan,
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
            header_bg: Color::DarkGray,
            series: SERIES_COLORS,
        }
    }

    pub fn light() -> Self {
        Self {
            dark: false,
            text: Color::Black,
            text_dim: Color::Gray,
            accent: Color::Blue,
            accent_alt: Color::Magenta,
            border: Color::Gray,
            border_focus: Color::Blue,
            highlight_bg: Color::LightBlue,
            highlight_fg: Color::Black,
            header_bg: Color::Gray,
            series: SERIES_COLORS,
        }
    }
}

/// The roadmap UI controller. Every piece of state the browser original
/// kept in module-level globals lives here, created in `new` and dropped
/// with the app.
pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,
    pub view: View,

    // Topic input
    pub topic_input: String,
    pub topic_cursor: usize,

    // Selectors
    pub model: String,
    pub length: String,
    pub experience: String,
    pub chart_kind: ChartKind,

    // Primary result
    pub pane: RoadmapPane,
    pub last_markdown: String,
    pub outline: OutlinePane,
    pub markdown_scroll: u16,
    pub outline_scroll: u16,
    pub content_height: u16,
    pub content_lines: u16,

    // History and presets
    pub state: ClientState,
    pub history_state: ListState,
    pub presets_state: ListState,

    // Suggestions
    pub suggestions: Vec<&'static str>,
    pub suggestion_state: ListState,
    pub show_suggestions: bool,

    // Charts (one model per slot; rebuilt wholesale)
    pub demand_chart: Option<DemandChart>,
    pub salary_chart: Option<SalaryChart>,
    pub salary_summary: String,

    // Background work
    pub generate_task: Option<JoinHandle<Result<String, ApiError>>>,
    pub salary_task: Option<JoinHandle<Result<SalaryData, ApiError>>>,
    pub loading: bool,
    pub animation_frame: u8,
    pending_topic: Option<String>,

    // Popups
    pub picker: Option<Picker>,
    pub picker_state: ListState,
    pub notice: Option<Toast>,

    // Panel areas for mouse hit-testing (updated during render)
    pub input_area: Option<Rect>,
    pub tab_markdown_area: Option<Rect>,
    pub tab_outline_area: Option<Rect>,
    pub content_area: Option<Rect>,
    pub history_area: Option<Rect>,
    pub presets_area: Option<Rect>,
    pub suggestions_area: Option<Rect>,

    // IO
    pub client: RoadmapClient,
    storage: Storage,
    pub theme: Theme,

    /// Deep link requested generation at startup.
    pub auto_generate: bool,
}

impl App {
    pub fn new(server: &str, topic: Option<String>, view: View) -> anyhow::Result<Self> {
        let storage = Storage::open()?;
        Ok(Self::with_storage(storage, server, topic, view))
    }

    fn with_storage(storage: Storage, server: &str, topic: Option<String>, view: View) -> Self {
        let state = storage.load();
        let theme = if state.dark_theme() {
            Theme::dark()
        } else {
            Theme::light()
        };

        let topic_input = topic.unwrap_or_default();
        let auto_generate = !topic_input.trim().is_empty();
        let topic_cursor = topic_input.chars().count();

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: FocusPane::Content,
            view,

            topic_input,
            topic_cursor,

            model: MODEL_OPTIONS[0].to_string(),
            length: "medium".to_string(),
            experience: "mid".to_string(),
            chart_kind: ChartKind::default(),

            pane: RoadmapPane::Empty,
            last_markdown: String::new(),
            outline: OutlinePane::Idle,
            markdown_scroll: 0,
            outline_scroll: 0,
            content_height: 0,
            content_lines: 0,

            state,
            history_state: ListState::default(),
            presets_state: ListState::default(),

            suggestions: Vec::new(),
            suggestion_state: ListState::default(),
            show_suggestions: false,

            demand_chart: None,
            salary_chart: None,
            salary_summary: "Enter a topic to view mock salary insights.".to_string(),

            generate_task: None,
            salary_task: None,
            loading: false,
            animation_frame: 0,
            pending_topic: None,

            picker: None,
            picker_state: ListState::default(),
            notice: None,

            input_area: None,
            tab_markdown_area: None,
            tab_outline_area: None,
            content_area: None,
            history_area: None,
            presets_area: None,
            suggestions_area: None,

            client: RoadmapClient::new(server),
            storage,
            theme,

            auto_generate,
        }
    }

    // ---- Generation pipeline -------------------------------------------

    /// Validate and kick off a roadmap request. Inert while one is already
    /// in flight, so overlapping generations cannot race.
    pub fn start_generate(&mut self) {
        let topic = self.topic_input.trim().to_string();
        self.hide_suggestions();
        if topic.is_empty() {
            self.pane = RoadmapPane::Notice("Please enter a topic.".to_string());
            return;
        }
        if self.generate_task.is_some() {
            return;
        }

        self.loading = true;
        self.animation_frame = 0;
        self.pending_topic = Some(topic.clone());

        let client = self.client.clone();
        let model = self.model.clone();
        let length = self.length.clone();
        self.generate_task = Some(tokio::spawn(async move {
            client.generate(&topic, &model, &length).await
        }));
    }

    /// Fold finished background work back into the UI. Called from the
    /// event loop; the tick event guarantees it runs at least every 300ms.
    pub async fn poll_tasks(&mut self) {
        if self
            .generate_task
            .as_ref()
            .is_some_and(|task| task.is_finished())
        {
            if let Some(task) = self.generate_task.take() {
                match task.await {
                    Ok(result) => self.finish_generate(result),
                    Err(err) => {
                        tracing::error!(%err, "generate task aborted");
                        self.finish_generate(Err(ApiError::Api(ApiFailure::default())));
                    }
                }
            }
        }

        if self
            .salary_task
            .as_ref()
            .is_some_and(|task| task.is_finished())
        {
            if let Some(task) = self.salary_task.take() {
                match task.await {
                    Ok(result) => self.finish_salary(result),
                    Err(err) => {
                        tracing::error!(%err, "salary task aborted");
                        self.salary_summary = "Failed to load salary data.".to_string();
                    }
                }
            }
        }
    }

    fn finish_generate(&mut self, result: Result<String, ApiError>) {
        self.loading = false;
        match result {
            Ok(markdown) => {
                self.last_markdown = markdown;
                self.pane = RoadmapPane::Roadmap;
                self.rebuild_outline();
                self.markdown_scroll = 0;
                self.outline_scroll = 0;
            }
            Err(ApiError::Api(failure)) => {
                self.toast(failure.message().to_string());
                self.pane = RoadmapPane::Failure(failure);
            }
            Err(err @ ApiError::Transport(_)) => {
                tracing::error!(%err, "generate request failed");
                self.pane = RoadmapPane::Notice("❌ Error generating roadmap.".to_string());
                self.toast("Error generating roadmap");
            }
        }
        self.run_post_actions();
    }

    fn rebuild_outline(&mut self) {
        if self.last_markdown.trim().is_empty() {
            self.outline = OutlinePane::NoContent;
            return;
        }
        let headings = outline::scan_headings(&self.last_markdown);
        self.outline = if headings.is_empty() {
            OutlinePane::NoHeadings
        } else {
            OutlinePane::Tree(outline::build_outline(&headings))
        };
    }

    /// Post-generation side effects in a fixed order: history, demand
    /// chart, salary fetch. Each is contained; none can disturb the
    /// rendered roadmap.
    fn run_post_actions(&mut self) {
        let Some(topic) = self.pending_topic.take() else {
            return;
        };
        self.record_history(&topic);
        self.demand_chart = Some(DemandChart::build(&topic));
        self.start_salary_fetch(&topic);
    }

    // ---- Salary --------------------------------------------------------

    pub fn start_salary_fetch(&mut self, topic: &str) {
        if topic.is_empty() {
            self.salary_summary = "Enter a topic to view mock salary insights.".to_string();
            return;
        }
        self.salary_summary = "Loading salary data...".to_string();

        // One slot: a newer fetch supersedes any in-flight one.
        if let Some(task) = self.salary_task.take() {
            task.abort();
        }
        let client = self.client.clone();
        let tech = topic.to_string();
        let experience = self.experience.clone();
        self.salary_task = Some(tokio::spawn(async move {
            client.salary(&tech, &experience).await
        }));
    }

    fn finish_salary(&mut self, result: Result<SalaryData, ApiError>) {
        match result {
            Ok(data) => {
                self.salary_chart = Some(SalaryChart::build(&data));
                self.salary_summary = salary_summary(&data);
            }
            Err(err) => {
                tracing::warn!(%err, "salary fetch failed");
                self.salary_summary = "Failed to load salary data.".to_string();
            }
        }
    }

    // ---- History -------------------------------------------------------

    fn record_history(&mut self, topic: &str) {
        self.state.record_topic(topic);
        if let Err(err) = self.storage.save(&self.state) {
            tracing::warn!(%err, "failed to persist history");
        }
        let len = self.state.sf_history.len();
        if self.history_state.selected().is_some_and(|i| i >= len) {
            self.history_state
                .select(if len == 0 { None } else { Some(len - 1) });
        }
    }

    pub fn clear_history(&mut self) {
        self.state.clear_history();
        self.history_state.select(None);
        if let Err(err) = self.storage.save(&self.state) {
            tracing::warn!(%err, "failed to persist history");
        }
        self.toast("History cleared");
    }

    pub fn history_nav_down(&mut self) {
        let len = self.state.sf_history.len();
        if len > 0 {
            let i = self.history_state.selected().unwrap_or(0);
            self.history_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn history_nav_up(&mut self) {
        let i = self.history_state.selected().unwrap_or(0);
        self.history_state.select(Some(i.saturating_sub(1)));
    }

    /// Fill the input from a past topic and regenerate.
    pub fn use_history_entry(&mut self, index: usize) {
        if let Some(topic) = self.state.sf_history.get(index).cloned() {
            self.set_topic(topic);
            self.start_generate();
        }
    }

    pub fn presets_nav_down(&mut self) {
        let len = PRESET_TOPICS.len();
        let i = self.presets_state.selected().unwrap_or(0);
        self.presets_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn presets_nav_up(&mut self) {
        let i = self.presets_state.selected().unwrap_or(0);
        self.presets_state.select(Some(i.saturating_sub(1)));
    }

    pub fn use_preset(&mut self, index: usize) {
        if let Some(topic) = PRESET_TOPICS.get(index) {
            self.set_topic(topic.to_string());
            self.start_generate();
        }
    }

    fn set_topic(&mut self, topic: String) {
        self.topic_cursor = topic.chars().count();
        self.topic_input = topic;
        self.hide_suggestions();
    }

    // ---- Theme ---------------------------------------------------------

    pub fn set_theme(&mut self, dark: bool) {
        self.theme = if dark { Theme::dark() } else { Theme::light() };
        self.state.set_theme(dark);
        if let Err(err) = self.storage.save(&self.state) {
            tracing::warn!(%err, "failed to persist theme");
        }
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(!self.theme.dark);
    }

    // ---- Views, scrolling ----------------------------------------------

    pub fn activate_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.content_lines.saturating_sub(self.content_height);
        let scroll = self.active_scroll();
        *scroll = scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        let scroll = self.active_scroll();
        *scroll = scroll.saturating_sub(lines);
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_down(self.content_height / 2)
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_up(self.content_height / 2)
    }

    pub fn scroll_top(&mut self) {
        *self.active_scroll() = 0;
    }

    pub fn scroll_bottom(&mut self) {
        let max = self.content_lines.saturating_sub(self.content_height);
        *self.active_scroll() = max;
    }

    fn active_scroll(&mut self) -> &mut u16 {
        match self.view {
            View::Markdown => &mut self.markdown_scroll,
            View::Outline => &mut self.outline_scroll,
        }
    }

    // ---- Suggestions ---------------------------------------------------

    /// Refilter presets against the current input; called on every edit.
    pub fn update_suggestions(&mut self) {
        let query = self.topic_input.trim().to_lowercase();
        self.suggestions = PRESET_TOPICS
            .iter()
            .copied()
            .filter(|preset| query.is_empty() || preset.to_lowercase().contains(&query))
            .take(MAX_SUGGESTIONS)
            .collect();
        self.show_suggestions = !self.suggestions.is_empty();
        self.suggestion_state.select(None);
    }

    pub fn hide_suggestions(&mut self) {
        self.show_suggestions = false;
        self.suggestion_state.select(None);
    }

    pub fn accept_suggestion(&mut self, index: usize) {
        if let Some(text) = self.suggestions.get(index).copied() {
            self.set_topic(text.to_string());
            self.input_mode = InputMode::Normal;
            self.start_generate();
        }
    }

    pub fn suggestions_nav_down(&mut self) {
        let len = self.suggestions.len();
        if len > 0 {
            let i = self
                .suggestion_state
                .selected()
                .map(|i| (i + 1).min(len - 1))
                .unwrap_or(0);
            self.suggestion_state.select(Some(i));
        }
    }

    pub fn suggestions_nav_up(&mut self) {
        match self.suggestion_state.selected() {
            Some(0) | None => self.suggestion_state.select(None),
            Some(i) => self.suggestion_state.select(Some(i - 1)),
        }
    }

    // ---- Selectors and charts ------------------------------------------

    pub fn open_picker(&mut self, picker: Picker) {
        let current = self.picker_value(picker).to_string();
        let index = picker
            .options()
            .iter()
            .position(|option| *option == current)
            .unwrap_or(0);
        self.picker = Some(picker);
        self.picker_state.select(Some(index));
    }

    pub fn picker_value(&self, picker: Picker) -> &str {
        match picker {
            Picker::Model => &self.model,
            Picker::Length => &self.length,
            Picker::Experience => &self.experience,
        }
    }

    pub fn apply_picker(&mut self) {
        if let (Some(picker), Some(index)) = (self.picker, self.picker_state.selected()) {
            if let Some(choice) = picker.options().get(index) {
                match picker {
                    Picker::Model => self.model = choice.to_string(),
                    Picker::Length => self.length = choice.to_string(),
                    Picker::Experience => {
                        self.experience = choice.to_string();
                        // A new tier refetches salary data for the topic.
                        let topic = self.topic_input.trim().to_string();
                        self.start_salary_fetch(&topic);
                    }
                }
            }
        }
        self.picker = None;
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    /// Cycle bar -> line -> combo and rebuild the demand chart.
    pub fn cycle_chart_kind(&mut self) {
        self.chart_kind = self.chart_kind.next();
        let topic = self.topic_input.trim();
        let label = if topic.is_empty() { "Topic" } else { topic };
        self.demand_chart = Some(DemandChart::build(label));
    }

    // ---- Share, roadmap actions ----------------------------------------

    /// Deep link to this topic and view on the web UI the server hosts.
    pub fn share_url(&self) -> String {
        let topic = self.topic_input.trim();
        let view = self.view.as_str();
        if topic.is_empty() {
            format!("{}/?view={view}", self.client.base_url())
        } else {
            format!(
                "{}/?topic={}&view={view}",
                self.client.base_url(),
                urlencoding::encode(topic)
            )
        }
    }

    pub fn roadmap_text(&self) -> Option<&str> {
        if self.last_markdown.trim().is_empty() {
            None
        } else {
            Some(&self.last_markdown)
        }
    }

    pub fn download_markdown(&mut self) {
        let Some(text) = self.roadmap_text().map(str::to_string) else {
            return;
        };
        let topic = self.topic_input.trim();
        let name = if topic.is_empty() { "roadmap" } else { topic };
        let path = format!("{name}.md");
        match std::fs::write(&path, text) {
            Ok(()) => self.toast(format!("Saved {path}")),
            Err(err) => {
                tracing::warn!(%err, %path, "failed to write roadmap");
                self.toast("Save failed");
            }
        }
    }

    pub fn clear_output(&mut self) {
        self.topic_input.clear();
        self.topic_cursor = 0;
        self.last_markdown.clear();
        self.pane = RoadmapPane::Empty;
        self.outline = OutlinePane::Idle;
        self.markdown_scroll = 0;
        self.outline_scroll = 0;
        self.hide_suggestions();
    }

    // ---- Toast and animation -------------------------------------------

    pub fn toast(&mut self, message: impl Into<String>) {
        self.notice = Some(Toast {
            message: message.into(),
            ticks_left: TOAST_TICKS,
        });
    }

    /// Advance the busy animation and expire the toast.
    pub fn tick(&mut self) {
        if self.loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Point persistence at a scratch dir so tests never touch the real
    // config directory. The TempDir must outlive the app.
    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::at(dir.path().join("state.json"));
        let app = App::with_storage(storage, "http://localhost:5000", None, View::Markdown);
        (app, dir)
    }

    #[test]
    fn empty_topic_shows_prompt_without_spawning_a_request() {
        let (mut app, _dir) = test_app();
        app.topic_input = "   ".to_string();
        app.start_generate();
        assert!(app.generate_task.is_none());
        assert!(!app.loading);
        match &app.pane {
            RoadmapPane::Notice(msg) => assert_eq!(msg, "Please enter a topic."),
            other => panic!("expected prompt notice, got {other:?}"),
        }
    }

    #[test]
    fn share_url_carries_topic_and_view() {
        let (mut app, _dir) = test_app();
        app.topic_input = "aws".to_string();
        app.view = View::Outline;
        assert_eq!(
            app.share_url(),
            "http://localhost:5000/?topic=aws&view=outline"
        );

        app.topic_input.clear();
        app.view = View::Markdown;
        assert_eq!(app.share_url(), "http://localhost:5000/?view=markdown");
    }

    #[test]
    fn share_url_percent_encodes_the_topic() {
        let (mut app, _dir) = test_app();
        app.topic_input = "data science & ml".to_string();
        assert!(app.share_url().contains("topic=data%20science%20%26%20ml"));
    }

    #[test]
    fn deep_link_view_parsing_defaults_to_markdown() {
        assert_eq!(View::parse("outline"), View::Outline);
        assert_eq!(View::parse("markdown"), View::Markdown);
        assert_eq!(View::parse("garbage"), View::Markdown);
    }

    #[test]
    fn deep_link_topic_arms_auto_generation() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::at(dir.path().join("state.json"));
        let app = App::with_storage(
            storage,
            "http://localhost:5000",
            Some("aws".into()),
            View::Outline,
        );
        assert!(app.auto_generate);
        assert_eq!(app.topic_input, "aws");
        assert_eq!(app.view, View::Outline);
    }

    #[tokio::test]
    async fn successful_generation_renders_roadmap_and_outline() {
        let (mut app, _dir) = test_app();
        app.topic_input = "aws".to_string();
        app.pending_topic = Some("aws".to_string());
        app.loading = true;

        app.finish_generate(Ok("# AWS\n## Compute\n## Storage".to_string()));

        assert!(!app.loading);
        assert!(matches!(app.pane, RoadmapPane::Roadmap));
        match &app.outline {
            OutlinePane::Tree(roots) => {
                assert_eq!(roots.len(), 1);
                assert_eq!(roots[0].children.len(), 2);
            }
            other => panic!("expected outline tree, got {other:?}"),
        }
        // Post actions ran: history recorded, demand chart rebuilt,
        // salary fetch in flight.
        assert_eq!(app.state.sf_history, ["aws"]);
        assert!(app.demand_chart.is_some());
        assert!(app.salary_task.is_some());
        assert_eq!(app.salary_summary, "Loading salary data...");
    }

    #[tokio::test]
    async fn failed_generation_keeps_auxiliary_side_effects() {
        let (mut app, _dir) = test_app();
        app.topic_input = "aws".to_string();
        app.pending_topic = Some("aws".to_string());
        app.loading = true;

        let failure = ApiFailure {
            error: Some("Topic not allowed".to_string()),
            ..ApiFailure::default()
        };
        app.finish_generate(Err(ApiError::Api(failure)));

        assert!(!app.loading);
        assert!(matches!(app.pane, RoadmapPane::Failure(_)));
        assert!(app.notice.is_some());
        // The original chained history/charts after the attempt either way.
        assert_eq!(app.state.sf_history, ["aws"]);
        assert!(app.demand_chart.is_some());
    }

    #[test]
    fn salary_failure_shows_message_and_builds_no_chart() {
        let (mut app, _dir) = test_app();
        app.finish_salary(Err(ApiError::Api(ApiFailure::default())));
        assert_eq!(app.salary_summary, "Failed to load salary data.");
        assert!(app.salary_chart.is_none());
    }

    #[test]
    fn suggestions_filter_case_insensitively_and_cap() {
        let (mut app, _dir) = test_app();
        app.topic_input = "PYTHON".to_string();
        app.update_suggestions();
        assert_eq!(app.suggestions, ["Python programming"]);
        assert!(app.show_suggestions);

        app.topic_input = "zzz".to_string();
        app.update_suggestions();
        assert!(app.suggestions.is_empty());
        assert!(!app.show_suggestions);

        // Empty query offers every preset.
        app.topic_input.clear();
        app.update_suggestions();
        assert_eq!(app.suggestions.len(), PRESET_TOPICS.len());
    }

    #[tokio::test]
    async fn accepting_a_suggestion_fills_input_and_generates() {
        let (mut app, _dir) = test_app();
        app.input_mode = InputMode::Editing;
        app.topic_input = "aws".to_string();
        app.update_suggestions();
        app.accept_suggestion(0);
        assert_eq!(app.topic_input, "AWS cloud");
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.generate_task.is_some());
        assert!(!app.show_suggestions);
    }

    #[tokio::test]
    async fn generation_trigger_is_inert_while_in_flight() {
        let (mut app, _dir) = test_app();
        app.topic_input = "aws".to_string();
        app.start_generate();
        assert!(app.generate_task.is_some());
        assert_eq!(app.pending_topic.as_deref(), Some("aws"));

        // A second trigger while in flight must not replace the pending
        // request state.
        app.topic_input = "python".to_string();
        app.start_generate();
        assert_eq!(app.pending_topic.as_deref(), Some("aws"));
    }

    #[test]
    fn theme_toggle_persists_preference() {
        let (mut app, _dir) = test_app();
        assert!(app.theme.dark);
        app.toggle_theme();
        assert!(!app.theme.dark);
        assert_eq!(app.state.sf_theme.as_deref(), Some("light"));
        app.toggle_theme();
        assert_eq!(app.state.sf_theme.as_deref(), Some("dark"));
    }

    #[test]
    fn chart_kind_cycle_rebuilds_demand_chart_with_placeholder() {
        let (mut app, _dir) = test_app();
        assert!(app.demand_chart.is_none());
        app.cycle_chart_kind();
        assert_eq!(app.chart_kind, ChartKind::Line);
        let chart = app.demand_chart.as_ref().unwrap();
        assert_eq!(chart.labels[0], "Topic");
    }

    #[tokio::test]
    async fn history_entry_refills_input_and_regenerates() {
        let (mut app, _dir) = test_app();
        app.state.record_topic("rust");
        app.use_history_entry(0);
        assert_eq!(app.topic_input, "rust");
        assert!(app.generate_task.is_some());
    }
}
