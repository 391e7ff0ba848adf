use std::time::{Duration, SystemTime};

use eframe::egui;
use egui::{Color32, RichText, Separator};
use tokio::sync::mpsc::UnboundedReceiver;

use strimly::{
    config::Config,
    session::{Session, Theme},
    storage::Storage,
    stream::{Platform, StreamRef},
    stream_list::ListEvent,
    twitch,
};

const TILE_WIDTH: f32 = 300.0;
const KICK_GREEN: Color32 = Color32::from_rgb(46, 234, 106);

#[derive(Clone)]
struct Toast {
    start: SystemTime,
    duration: Duration,
    msg: String,
}

impl Toast {
    fn new(duration: Duration, msg: String) -> Self {
        Self {
            start: SystemTime::now(),
            duration,
            msg,
        }
    }

    fn warning(msg: impl Into<String>) -> Self {
        Self::new(Duration::from_secs_f32(2.5), msg.into())
    }

    fn is_alive(&self, now: SystemTime) -> bool {
        now.duration_since(self.start).unwrap_or_default() < self.duration
    }
}

struct Strimly<S: Storage> {
    session: Session<S>,
    events: UnboundedReceiver<ListEvent>,
    config: Config,
    input: String,
    toasts: Vec<Toast>,
    /// Index picked up for reordering, dropped onto another tile.
    drag_source: Option<usize>,
}

impl<S: Storage> Strimly<S> {
    fn new(mut session: Session<S>, config: Config) -> Self {
        let events = session.subscribe();
        Self {
            session,
            events,
            config,
            input: String::new(),
            toasts: Vec::new(),
            drag_source: None,
        }
    }

    fn submit_input(&mut self) {
        match self.session.add_input(&self.input) {
            Ok(stream) => {
                log::info!("added {stream}");
                self.input.clear();
            }
            Err(err) => {
                log::debug!("rejected input {:?}: {err}", self.input);
                self.toasts.push(Toast::warning(err.to_string()));
            }
        }
    }

    fn share(&mut self, ctx: &egui::Context) {
        if self.session.streams().is_empty() {
            self.toasts.push(Toast::warning("Add some streams first before sharing!"));
            return;
        }
        match self.session.share_url(&self.config.share_base_url) {
            Ok(url) => {
                ctx.output_mut(|o| o.copied_text = url);
                self.toasts.push(Toast::warning("Share URL copied to clipboard!"));
            }
            Err(err) => {
                log::error!("cannot build share url: {err:?}");
                self.toasts.push(Toast::warning(format!("Cannot build share URL: {err}")));
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            log::debug!("stream list changed: {event:?}");
            // Any change invalidates a picked-up index.
            self.drag_source = None;
        }
    }

    fn set_theme(&mut self, ctx: &egui::Context, theme: Theme) {
        self.session.set_theme(theme);
        apply_theme(ctx, theme);
    }

    fn stream_tile(&mut self, ui: &mut egui::Ui, index: usize, stream: &StreamRef) {
        let len = self.session.streams().len();
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(TILE_WIDTH);
            ui.horizontal(|ui| {
                ui.strong(format!("{} {}", stream.platform.icon(), stream.label()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("❌").on_hover_text("Remove stream").clicked() {
                        self.session.remove(&stream.platform, &stream.id);
                    }
                });
            });

            if stream.platform == Platform::Twitch && !twitch::is_valid_parent(&self.config.embed_parent) {
                ui.colored_label(
                    Color32::YELLOW,
                    "⚠ Twitch streams need a web server parent. Set embed_parent to localhost or your domain.",
                );
            }
            let embed_url = stream.embed_url(&self.config.embed_parent);
            if embed_url.is_empty() {
                ui.weak(format!("No player for platform {}", stream.platform));
            } else {
                ui.hyperlink_to("Open player", embed_url);
            }
            if let Some(watch_url) = stream.watch_url() {
                ui.hyperlink_to("Open page", watch_url);
            }

            ui.horizontal(|ui| {
                if ui.add_enabled(index > 0, egui::Button::new("◀")).clicked() {
                    self.move_stream(index, index - 1);
                }
                if ui.add_enabled(index + 1 < len, egui::Button::new("▶")).clicked() {
                    self.move_stream(index, index + 1);
                }
                match self.drag_source {
                    None => {
                        if ui.button("Pick up").clicked() {
                            self.drag_source = Some(index);
                        }
                    }
                    Some(source) if source == index => {
                        if ui.button("Cancel").clicked() {
                            self.drag_source = None;
                        }
                    }
                    Some(source) => {
                        if ui.button("Drop here").clicked() {
                            self.move_stream(source, index);
                        }
                    }
                }
            });
        });
    }

    fn move_stream(&mut self, from: usize, to: usize) {
        if let Err(err) = self.session.move_stream(from, to) {
            log::warn!("cannot move stream: {err}");
        }
        self.drag_source = None;
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    });
}

pub fn run<S: Storage + 'static>(session: Session<S>, config: Config) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1024.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Strimly",
        options,
        Box::new(move |cc| {
            apply_theme(&cc.egui_ctx, session.theme());
            Box::new(Strimly::new(session, config))
        }),
    )
}

impl<S: Storage> eframe::App for Strimly<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        //  _______________________________________
        // | Strimly   [ input ] [Add] [Share] 🌙  |
        // |---------------------------------------|
        // | kick banner                           |
        // | tile  tile  tile                      |
        // | tile  ...                             |
        // |---------------------------------------|
        // | toasts                                |
        //  ---------------------------------------
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Strimly");
                ui.add_space(12.0);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .hint_text("Twitch/Kick channel or YouTube URL/ID")
                        .desired_width(320.0),
                );
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    self.submit_input();
                }
                if ui.button("Share").clicked() {
                    self.share(ctx);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme = self.session.theme();
                    let (icon, next) = match theme {
                        Theme::Light => ("☀", Theme::Dark),
                        Theme::Dark => ("🌙", Theme::Light),
                    };
                    if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                        self.set_theme(ctx, next);
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("toasts").show(ctx, |ui| {
            let now = SystemTime::now();
            self.toasts.retain(|toast| toast.is_alive(now));
            for toast in &self.toasts {
                ui.label(&toast.msg);
            }
            if !self.toasts.is_empty() {
                ctx.request_repaint_after(Duration::from_millis(250));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.streams().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.heading("No streams yet");
                    ui.label("Paste a Twitch or Kick channel, or a YouTube video, above.");
                    if ui.button("Try an example").clicked() {
                        // already present is fine, the list just ignores it
                        let _ = self.session.add(StreamRef::twitch("shroud"));
                    }
                });
                return;
            }

            if self.session.streams().has_platform(&Platform::Kick) {
                ui.label(
                    RichText::new(
                        "🟢 Kick streams may be unstable and occasionally fail to load. \
                         If a Kick stream doesn't work, try removing and re-adding it.",
                    )
                    .color(KICK_GREEN),
                );
                ui.add(Separator::default().horizontal());
            }

            // Tiles call back into the session, so render from a snapshot.
            let streams: Vec<StreamRef> = self.session.streams().iter().cloned().collect();
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for (index, stream) in streams.iter().enumerate() {
                        self.stream_tile(ui, index, stream);
                    }
                });
            });
        });
    }
}
