mod surface;

use chrono::{Local, Weekday};
use eyecare_core::{
    CommandReceiver, ControlPanel, OverlayLayer, OverlayRenderer, Preset, Shortcut, ThemeMode,
    Transition, command_channel, week, weekday_label,
};
use iced::keyboard::{self, Event as KeyboardEvent, Key};
use iced::widget::{button, column, container, row, slider, space, text, text_input, toggler};
use iced::{Background, Color, Element, Length, Subscription, Task, Theme, window};
use std::time::Duration;
use surface::IcedSurface;

const SCHEDULE_TICK: Duration = Duration::from_secs(30);

pub fn main() -> iced::Result {
    env_logger::init();

    iced::daemon(EyeCareApp::new, EyeCareApp::update, EyeCareApp::view)
        .title(EyeCareApp::title)
        .subscription(EyeCareApp::subscription)
        .theme(EyeCareApp::theme)
        .style(EyeCareApp::style)
        .run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Display,
    Schedule,
    Settings,
}

struct EyeCareApp {
    main_window: window::Id,
    page: Page,
    panel: ControlPanel,
    commands: CommandReceiver,
    renderer: OverlayRenderer<IcedSurface>,
    error_message: Option<String>,

    // Schedule text fields, committed on submit
    enable_time_input: String,
    disable_time_input: String,
}

#[derive(Debug, Clone)]
enum Message {
    // Display page
    WarmthChanged(f32),
    BrightnessChanged(f32),
    ApplyPreset(Preset),
    Day,
    Night,
    ToggleFilter,

    // Schedule page
    ScheduleToggled(bool),
    EnableTimeInput(String),
    DisableTimeInput(String),
    CommitTimes,
    SetTransition(Transition),
    ToggleDay(Weekday),
    ScheduleTick,

    // Settings page
    LaunchAtStartupToggled(bool),
    MinimizeToTrayToggled(bool),
    NotificationsToggled(bool),
    ResetSettings,

    // Navigation
    ShowPage(Page),

    // Windows
    WindowOpened(window::Id),
    WindowClosed(window::Id),
    MonitorSize(Option<iced::Size>),

    // Keyboard event
    KeyboardEvent(KeyboardEvent),
}

impl EyeCareApp {
    fn new() -> (Self, Task<Message>) {
        let (main_window, open) = window::open(window::Settings {
            size: iced::Size::new(900.0, 650.0),
            ..window::Settings::default()
        });

        let (tx, rx) = command_channel();
        let panel = ControlPanel::new(tx);
        let schedule = panel.schedule();
        let enable_time_input = schedule.enable_time.format("%H:%M").to_string();
        let disable_time_input = schedule.disable_time.format("%H:%M").to_string();

        let app = Self {
            main_window,
            page: Page::Display,
            panel,
            commands: rx,
            renderer: OverlayRenderer::new(IcedSurface::new(main_window)),
            error_message: None,
            enable_time_input,
            disable_time_input,
        };

        (app, open.map(Message::WindowOpened))
    }

    fn title(&self, window: window::Id) -> String {
        if window == self.main_window {
            "EyeCare".to_string()
        } else {
            "EyeCare Overlay".to_string()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        // Clear previous errors on new actions
        if !matches!(
            message,
            Message::ScheduleTick
                | Message::KeyboardEvent(_)
                | Message::WindowOpened(_)
                | Message::WindowClosed(_)
                | Message::MonitorSize(_)
        ) {
            self.error_message = None;
        }

        match message {
            Message::WarmthChanged(value) => self.panel.set_warmth(value),
            Message::BrightnessChanged(value) => self.panel.set_brightness(value),
            Message::ApplyPreset(preset) => self.panel.apply_preset(preset),
            Message::Day => self.panel.apply_day(),
            Message::Night => self.panel.apply_night(),
            Message::ToggleFilter => self.panel.toggle_enabled(),

            Message::ScheduleToggled(enabled) => {
                self.panel.schedule_mut().enabled = enabled;
                self.panel.tick_schedule(Local::now().naive_local());
            }

            Message::EnableTimeInput(value) => self.enable_time_input = value,
            Message::DisableTimeInput(value) => self.disable_time_input = value,

            Message::CommitTimes => {
                let result = self
                    .panel
                    .schedule_mut()
                    .set_window(&self.enable_time_input, &self.disable_time_input);
                if let Err(e) = result {
                    self.error_message = Some(format!("Schedule error: {}", e));
                }
            }

            Message::SetTransition(transition) => {
                self.panel.schedule_mut().transition = transition;
            }

            Message::ToggleDay(day) => self.panel.schedule_mut().toggle_day(day),

            Message::ScheduleTick => self.panel.tick_schedule(Local::now().naive_local()),

            Message::LaunchAtStartupToggled(value) => {
                self.panel.settings_mut().launch_at_startup = value;
            }
            Message::MinimizeToTrayToggled(value) => {
                self.panel.settings_mut().minimize_to_tray = value;
            }
            Message::NotificationsToggled(value) => {
                self.panel.settings_mut().show_notifications = value;
            }

            Message::ResetSettings => {
                self.panel.reset_settings();
                let schedule = self.panel.schedule();
                self.enable_time_input = schedule.enable_time.format("%H:%M").to_string();
                self.disable_time_input = schedule.disable_time.format("%H:%M").to_string();
                self.error_message = Some("Settings reset".to_string());
            }

            Message::ShowPage(page) => self.page = page,

            Message::WindowOpened(id) => {
                log::debug!("window {:?} opened", id);
                if id == self.main_window {
                    return window::monitor_size(id).map(Message::MonitorSize);
                }
            }

            Message::MonitorSize(size) => match size {
                Some(size) => self.renderer.surface_mut().set_monitor_size(size),
                None => log::warn!("no monitor reported for the control window"),
            },

            Message::WindowClosed(id) => {
                if id == self.main_window {
                    self.renderer.shutdown();
                    return self.renderer.surface_mut().take_tasks().chain(iced::exit());
                }
                if self.renderer.surface().window() == Some(id) {
                    log::warn!("overlay window closed by the system");
                    self.renderer.shutdown();
                    self.panel.sync_enabled(false);
                }
            }

            Message::KeyboardEvent(event) => {
                if let KeyboardEvent::KeyPressed { key, modifiers, .. } = event {
                    if let Key::Character(c) = key.as_ref() {
                        let shortcut = c
                            .chars()
                            .next()
                            .and_then(|ch| Shortcut::from_key(modifiers.control(), modifiers.alt(), ch));
                        match shortcut {
                            Some(Shortcut::ToggleOverlay) => self.panel.toggle_overlay_shortcut(),
                            Some(Shortcut::ShowDashboard) => {
                                self.page = Page::Display;
                                return window::gain_focus(self.main_window);
                            }
                            Some(Shortcut::ShowSettings) => {
                                self.page = Page::Settings;
                                return window::gain_focus(self.main_window);
                            }
                            None => {}
                        }
                    }
                }
            }
        }

        self.deliver_commands()
    }

    /// Hand queued commands to the renderer and run the window tasks it asks for.
    fn deliver_commands(&mut self) -> Task<Message> {
        let errors = self.commands.pump(&mut self.renderer);
        if let Some(e) = errors.last() {
            if self.panel.settings().show_notifications {
                self.error_message = Some(format!("Overlay error: {}", e));
            }
        }
        self.panel.sync_enabled(self.renderer.is_visible());
        self.renderer.surface_mut().take_tasks()
    }

    fn view(&self, window: window::Id) -> Element<'_, Message> {
        if window == self.main_window {
            self.control_view()
        } else {
            match self.renderer.surface().layer() {
                Some(layer) if self.renderer.surface().window() == Some(window) => {
                    overlay_view(layer)
                }
                _ => space::horizontal().into(),
            }
        }
    }

    fn control_view(&self) -> Element<'_, Message> {
        let nav = row![
            nav_button("Display", Page::Display, self.page),
            nav_button("Schedule", Page::Schedule, self.page),
            nav_button("Settings", Page::Settings, self.page),
        ]
        .spacing(10);

        // Error/status message
        let status = if let Some(ref msg) = self.error_message {
            text(msg).size(14)
        } else {
            text("").size(14)
        };

        let page = match self.page {
            Page::Display => self.display_page(),
            Page::Schedule => self.schedule_page(),
            Page::Settings => self.settings_page(),
        };

        let content = column![text("EyeCare").size(24), nav, status, page]
            .spacing(15)
            .padding(20);

        // The daemon background is transparent for the overlay, so paint our own
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|theme: &Theme| container::Style {
                background: Some(Background::Color(theme.palette().background)),
                ..container::Style::default()
            })
            .into()
    }

    fn display_page(&self) -> Element<'_, Message> {
        let filter = self.panel.filter();

        let warmth_section = column![
            text(format!("Color Temperature: {}K", self.panel.color_temperature())).size(16),
            row![
                text("Cool").size(14),
                slider(0.0..=1.0, filter.warmth(), Message::WarmthChanged).step(0.01),
                text("Warm").size(14),
            ]
            .spacing(10),
        ]
        .spacing(5);

        let brightness_section = column![
            text(format!("Brightness: {}%", self.panel.brightness_percent())).size(16),
            row![
                text("Dimmer").size(14),
                slider(
                    eyecare_core::MIN_BRIGHTNESS..=1.0,
                    filter.brightness(),
                    Message::BrightnessChanged
                )
                .step(0.01),
                text("Brighter").size(14),
            ]
            .spacing(10),
        ]
        .spacing(5);

        let day_night = row![
            text("Day / Night:").size(16),
            button("Day").on_press(Message::Day),
            button("Night").on_press(Message::Night),
        ]
        .spacing(10);

        let active = self.panel.active_preset();
        let mut preset_rows = column![text("Presets").size(16)].spacing(10);
        for chunk in Preset::ALL.chunks(4) {
            let mut preset_row = row![].spacing(10);
            for preset in chunk {
                preset_row = preset_row.push(preset_button(*preset, active));
            }
            preset_rows = preset_rows.push(preset_row);
        }
        if let Some(preset) = active {
            preset_rows = preset_rows.push(text(preset.description()).size(14));
        }

        let status = row![
            text(if filter.enabled {
                "Filter Active"
            } else {
                "Filter Disabled"
            })
            .size(16),
            button(if filter.enabled {
                "Disable Filter"
            } else {
                "Enable Filter"
            })
            .on_press(Message::ToggleFilter),
        ]
        .spacing(15);

        column![
            warmth_section,
            brightness_section,
            day_night,
            preset_rows,
            status
        ]
        .spacing(20)
        .into()
    }

    fn schedule_page(&self) -> Element<'_, Message> {
        let schedule = self.panel.schedule();
        let enabled = schedule.enabled;

        let toggle = toggler(enabled)
            .label("Auto Schedule")
            .on_toggle(Message::ScheduleToggled);

        let mut enable_input = text_input("20:00", &self.enable_time_input);
        let mut disable_input = text_input("06:00", &self.disable_time_input);
        if enabled {
            enable_input = enable_input
                .on_input(Message::EnableTimeInput)
                .on_submit(Message::CommitTimes);
            disable_input = disable_input
                .on_input(Message::DisableTimeInput)
                .on_submit(Message::CommitTimes);
        }

        let times = row![
            text("Enable Filter At").size(14),
            enable_input.width(Length::Fixed(100.0)),
            text("Disable Filter At").size(14),
            disable_input.width(Length::Fixed(100.0)),
        ]
        .spacing(10);

        let transitions = row![
            transition_button("Gradual", Transition::Gradual, schedule.transition, enabled),
            transition_button("Instant", Transition::Instant, schedule.transition, enabled),
        ]
        .spacing(10);

        let mut days = row![].spacing(6);
        for day in week() {
            let label = if schedule.is_day_active(day) {
                format!("[{}]", weekday_label(day))
            } else {
                weekday_label(day).to_string()
            };
            days = days.push(
                button(text(label)).on_press_maybe(enabled.then_some(Message::ToggleDay(day))),
            );
        }

        column![
            toggle,
            text("Automatically enable filter during evening hours to reduce eye strain").size(14),
            times,
            text("Transition").size(16),
            transitions,
            text("Active Days").size(16),
            days,
            text(schedule.summary()).size(14),
        ]
        .spacing(15)
        .into()
    }

    fn settings_page(&self) -> Element<'_, Message> {
        let settings = self.panel.settings();

        let general = column![
            toggler(settings.launch_at_startup)
                .label("Launch at Startup")
                .on_toggle(Message::LaunchAtStartupToggled),
            toggler(settings.minimize_to_tray)
                .label("Minimize to Tray")
                .on_toggle(Message::MinimizeToTrayToggled),
            toggler(settings.show_notifications)
                .label("Show Notifications")
                .on_toggle(Message::NotificationsToggled),
        ]
        .spacing(10);

        let mut shortcuts = column![text("Keyboard Shortcuts").size(16)].spacing(5);
        for shortcut in Shortcut::ALL {
            shortcuts = shortcuts.push(
                text(format!("{}: {}", shortcut.description(), shortcut.label())).size(14),
            );
        }

        column![
            text("General").size(16),
            general,
            shortcuts,
            button("Reset All Settings").on_press(Message::ResetSettings),
        ]
        .spacing(20)
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            keyboard::listen().map(Message::KeyboardEvent),
            window::close_events().map(Message::WindowClosed),
        ];
        if self.panel.schedule().enabled {
            subscriptions.push(iced::time::every(SCHEDULE_TICK).map(|_| Message::ScheduleTick));
        }
        Subscription::batch(subscriptions)
    }

    fn theme(&self, _window: window::Id) -> Theme {
        match self.panel.theme() {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
        }
    }

    fn style(&self, theme: &Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: Color::TRANSPARENT,
            text_color: theme.palette().text,
        }
    }
}

fn overlay_view<'a>(layer: OverlayLayer) -> Element<'a, Message> {
    let darkness = to_color(layer.darkness);
    let tint = to_color(layer.tint);

    // Darkness is painted over the tint
    container(
        container(space::horizontal())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| filled(darkness)),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(move |_| filled(tint))
    .into()
}

fn to_color(rgba: eyecare_core::Rgba) -> Color {
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn filled(color: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(color)),
        ..container::Style::default()
    }
}

fn nav_button(label: &str, page: Page, current: Page) -> Element<'_, Message> {
    let btn = button(text(label));
    if page == current {
        // Selected state - don't allow clicking
        btn.into()
    } else {
        btn.on_press(Message::ShowPage(page)).into()
    }
}

fn preset_button(preset: Preset, active: Option<Preset>) -> Element<'static, Message> {
    let btn = button(text(preset.name()));
    if active == Some(preset) {
        btn.into()
    } else {
        btn.on_press(Message::ApplyPreset(preset)).into()
    }
}

fn transition_button(
    label: &str,
    transition: Transition,
    current: Transition,
    enabled: bool,
) -> Element<'_, Message> {
    let selectable = enabled && transition != current;
    button(text(label))
        .on_press_maybe(selectable.then_some(Message::SetTransition(transition)))
        .into()
}
