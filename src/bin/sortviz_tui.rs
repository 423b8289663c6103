//! Sorting visualizer TUI.
//!
//! Run with: `cargo run --bin sortviz-tui [config.yaml]`

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use sortviz::config::VizConfig;
    use sortviz::tui::VizApp;

    let app = match std::env::args().nth(1) {
        Some(path) => match VizApp::from_config_file(&path) {
            Ok(app) => app,
            Err(e) => {
                eprintln!("Error loading '{path}': {e}");
                eprintln!("Usage: sortviz-tui [path/to/config.yaml]");
                std::process::exit(1);
            }
        },
        None => VizApp::new(VizConfig::terminal()),
    };

    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin sortviz-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Flex, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap},
        Frame, Terminal,
    };
    use sortviz::algorithms::Algorithm;
    use sortviz::model::{BarColor, MAX_VALUE};
    use sortviz::renderers::{BarView, RenderFrame};
    use sortviz::tui::VizApp;
    use std::io;
    use std::time::{Duration, Instant};

    const IDLE_TICK: Duration = Duration::from_millis(100);
    /// Columns taken by the outer margin and the chart border.
    const CHART_CHROME: u16 = 4;

    pub fn run(mut app: VizApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let size = terminal.size()?;
        app.resize(size.width.saturating_sub(CHART_CHROME));

        let result = run_main_loop(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut VizApp,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|f| ui(f, app))?;

            let timeout = app.time_until_next(Instant::now(), IDLE_TICK);
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key.code);
                    }
                    Event::Resize(width, _) => app.resize(width.saturating_sub(CHART_CHROME)),
                    _ => {}
                }
            }

            app.update(Instant::now());

            if app.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn ui(f: &mut Frame, app: &VizApp) {
        let frame = RenderFrame::capture(&app.session);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], &frame);
        render_chart(f, chunks[1], &frame);
        render_controls(f, chunks[2], &frame);
        render_status_bar(f, chunks[3], app);

        if let Some(announcement) = &app.announcement {
            render_announcement(f, chunks[1], &announcement.to_string());
        }
    }

    fn render_title(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let state = frame.running.map_or_else(
            || Span::styled("IDLE", Style::default().fg(Color::Green)),
            |algorithm| {
                Span::styled(
                    format!("RUNNING {}", algorithm.title()),
                    Style::default().fg(Color::Yellow),
                )
            },
        );
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " Sorting Visualizer ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("- "),
            state,
            Span::styled(
                format!("  bars: {}  speed: {}/5", frame.bars.len(), frame.speed),
                Style::default().fg(Color::Gray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title("sortviz"));
        f.render_widget(title, area);
    }

    /// Terminal color for a bar, darkened by its opacity.
    fn bar_color(view: &BarView) -> Color {
        let (r, g, b) = view.color.rgb();
        let scale = |c: u8| (f32::from(c) * view.alpha).round() as u8;
        Color::Rgb(scale(r), scale(g), scale(b))
    }

    fn render_chart(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let bars: Vec<Bar> = frame
            .bars
            .iter()
            .map(|view| {
                let color = bar_color(view);
                Bar::default()
                    .value(u64::from(view.value))
                    .text_value(view.label.clone().unwrap_or_default())
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color))
            })
            .collect();

        let bar_width = u16::try_from(frame.layout.bar_width).unwrap_or(u16::MAX);
        let gap = u16::try_from(frame.layout.gap).unwrap_or(0);
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(legend()))
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(gap)
            .max(u64::from(MAX_VALUE));
        f.render_widget(chart, area);
    }

    fn legend() -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        for color in BarColor::ALL {
            let (r, g, b) = color.rgb();
            spans.push(Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))));
            spans.push(Span::raw(format!("{}  ", color.label())));
        }
        Line::from(spans)
    }

    fn render_controls(f: &mut Frame, area: Rect, frame: &RenderFrame) {
        let enabled = if frame.controls_enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let triggers: Vec<Span> = Algorithm::ALL
            .iter()
            .enumerate()
            .map(|(slot, algorithm)| Span::styled(format!(" {}:{} ", slot + 1, algorithm.name()), enabled))
            .collect();
        let text = vec![
            Line::from(triggers),
            Line::from(vec![
                Span::styled(" r: shuffle  +/-: size ", enabled),
                Span::raw(" </>: speed  Enter: dismiss  q: quit"),
            ]),
        ];
        let controls = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(controls, area);
    }

    fn render_status_bar(f: &mut Frame, area: Rect, app: &VizApp) {
        let status = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::raw(app.status.as_str()),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }

    fn render_announcement(f: &mut Frame, area: Rect, message: &str) {
        let [row] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Percentage(60)])
            .flex(Flex::Center)
            .areas(row);
        let text = vec![
            Line::from(Span::styled(message, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to continue",
                Style::default().fg(Color::Gray),
            )),
        ];
        let dialog = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title("Notice"),
            );
        f.render_widget(Clear, popup);
        f.render_widget(dialog, popup);
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use ratatui::backend::TestBackend;
        use sortviz::algorithms::Announcement;
        use sortviz::config::VizConfig;

        fn create_test_terminal() -> Terminal<TestBackend> {
            let backend = TestBackend::new(100, 30);
            Terminal::new(backend).expect("Failed to create test terminal")
        }

        fn app() -> VizApp {
            VizApp::new(VizConfig::builder().preset(VizConfig::terminal()).seed(42).build())
        }

        fn screen(terminal: &Terminal<TestBackend>) -> String {
            let buffer = terminal.backend().buffer();
            buffer.content().iter().map(|c| c.symbol()).collect()
        }

        #[test]
        fn test_ui_renders_without_panic() {
            let mut terminal = create_test_terminal();
            let app = app();
            terminal
                .draw(|f| ui(f, &app))
                .expect("UI should render without panic");
        }

        #[test]
        fn test_title_shows_idle() {
            let mut terminal = create_test_terminal();
            let app = app();
            terminal.draw(|f| ui(f, &app)).unwrap();
            let text = screen(&terminal);
            assert!(text.contains("Sorting Visualizer"));
            assert!(text.contains("IDLE"));
        }

        #[test]
        fn test_title_shows_running() {
            let mut terminal = create_test_terminal();
            let mut app = app();
            app.trigger(Algorithm::Quick);
            terminal.draw(|f| ui(f, &app)).unwrap();
            assert!(screen(&terminal).contains("RUNNING Quick Sort"));
        }

        #[test]
        fn test_announcement_popup() {
            let mut terminal = create_test_terminal();
            let mut app = app();
            app.announcement = Some(Announcement::SearchTarget { target: 42 });
            terminal.draw(|f| ui(f, &app)).unwrap();
            let text = screen(&terminal);
            assert!(text.contains("Searching for target: 42"));
            assert!(text.contains("Press Enter to continue"));
        }

        #[test]
        fn test_controls_listed() {
            let mut terminal = create_test_terminal();
            let app = app();
            terminal.draw(|f| ui(f, &app)).unwrap();
            let text = screen(&terminal);
            assert!(text.contains("1:Bubble"));
            assert!(text.contains("7:Binary"));
        }

        #[test]
        fn test_bar_color_dims_with_alpha() {
            let frame = RenderFrame::capture(&app().session);
            let mut view = frame.bars[0].clone();
            assert_eq!(bar_color(&view), Color::Rgb(0x3b, 0x82, 0xf6));
            view.alpha = 0.5;
            assert_eq!(bar_color(&view), Color::Rgb(30, 65, 123));
        }

        #[test]
        fn test_small_terminal() {
            let backend = TestBackend::new(30, 16);
            let mut terminal = Terminal::new(backend).unwrap();
            let app = app();
            terminal.draw(|f| ui(f, &app)).unwrap();
        }
    }
}
