use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::{Constraint, Layout, Position};
use ratatui::text::Line;
use ratatui::{DefaultTerminal, Frame};
use rustc_hash::FxHashSet;

use tui_listbox::{
    ListboxEvent, ListboxNode, ListboxState, ListboxStyle, ListboxView, RowKind, TextRows, Theme,
};

struct Character {
    name: &'static str,
    race: &'static str,
    job: &'static str,
    origin: &'static str,
    description: &'static str,
}

const ROSTER: &[Character] = &[
    Character {
        name: "Cloud Strife",
        race: "Human",
        job: "Mercenary",
        origin: "Nibelheim",
        description: "Ex-SOLDIER wielding the Buster Sword.",
    },
    Character {
        name: "Tifa Lockhart",
        race: "Human",
        job: "Monk",
        origin: "Nibelheim",
        description: "Runs Seventh Heaven in the Sector 7 slums.",
    },
    Character {
        name: "Barret Wallace",
        race: "Human",
        job: "Gunner",
        origin: "Corel",
        description: "Leader of Avalanche.",
    },
    Character {
        name: "Aerith Gainsborough",
        race: "Cetra",
        job: "Flower Seller",
        origin: "Icicle Inn",
        description: "The last of the Ancients.",
    },
    Character {
        name: "Red XIII",
        race: "Beast",
        job: "Scholar",
        origin: "Cosmo Canyon",
        description: "Guardian of the canyon. (disabled row)",
    },
    Character {
        name: "Vincent Valentine",
        race: "Human",
        job: "Gunner",
        origin: "Nibelheim",
        description: "Sleeps in a coffin below the Shinra mansion.",
    },
    Character {
        name: "Cid Highwind",
        race: "Human",
        job: "Pilot",
        origin: "Rocket Town",
        description: "Dreams of space flight.",
    },
];

/// Unique job names in first-seen order, like the `<select>` options of the
/// original demo.
fn job_list() -> Vec<&'static str> {
    let mut seen = FxHashSet::default();
    ROSTER
        .iter()
        .map(|c| c.job)
        .filter(|job| seen.insert(*job))
        .collect()
}

fn group_label(character: &Character, job: &str) -> String {
    format!("{} ({}) - {}  ✖", character.name, character.race, job)
}

/// Builds the whole accordion: a header label, one group per character
/// (label row plus origin/description items), and a footer trigger.
fn build_tree(theme: Theme) -> ListboxNode<usize> {
    let mut tree = ListboxNode::container()
        .with_header("Final Fantasy Characters")
        .with_children(ROSTER.iter().enumerate().map(|(idx, character)| {
            ListboxNode::group()
                .with_value(idx)
                .child(ListboxNode::label(group_label(character, character.job)))
                .child(ListboxNode::item(character.origin).with_value(idx))
                .child(
                    ListboxNode::item(character.description)
                        .with_value(idx)
                        .with_disabled(character.name == "Red XIII"),
                )
        }))
        .with_footer("+ Add Character");
    tree.set_theme(theme);
    tree.attach();
    tree
}

/// The acknowledgment channel: the original pops an alert, here the message
/// lands on the status line.
fn ack(name: &str, character: Option<&Character>) -> String {
    let stamp = Local::now().format("%H:%M:%S");
    match character {
        Some(c) => format!("[{stamp}] {name}: {} ({}) from {}", c.name, c.race, c.origin),
        None => format!("[{stamp}] {name}"),
    }
}

struct App {
    tree: ListboxNode<usize>,
    state: ListboxState,
    theme: Theme,
    jobs: Vec<&'static str>,
    // Current job index per character, driven by the `j` key.
    job_of: Vec<usize>,
    last_group: Option<usize>,
    status: String,
}

impl App {
    fn new() -> Self {
        let jobs = job_list();
        let job_of = ROSTER
            .iter()
            .map(|c| jobs.iter().position(|job| *job == c.job).unwrap_or(0))
            .collect();
        Self {
            tree: build_tree(Theme::Light),
            state: ListboxState::new(),
            theme: Theme::Light,
            jobs,
            job_of,
            last_group: None,
            status: String::from("click rows | t theme | j cycle job | q quit"),
        }
    }

    /// Path of the group node for a character: header label is child 0.
    const fn group_path(index: usize) -> [usize; 1] {
        [index + 1]
    }

    fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.tree.set_theme(self.theme);
    }

    /// Cycles the job of the last clicked group, editing its label in place.
    fn cycle_job(&mut self) {
        let Some(index) = self.last_group else {
            self.status = String::from("click a group first, then press j");
            return;
        };
        self.job_of[index] = (self.job_of[index] + 1) % self.jobs.len();
        let job = self.jobs[self.job_of[index]];
        if let Some(group) = self.tree.node_at_mut(&Self::group_path(index))
            && let Some(label) = group.label_child_mut()
        {
            label.set_text(group_label(&ROSTER[index], job));
        }
        self.status = ack(&format!("Job changed to {job}"), Some(&ROSTER[index]));
    }

    /// Demo-owned button zones run before the widget sees the click, the
    /// way the original buttons stop propagation.
    fn intercept_click(&mut self, mouse: MouseEvent) -> bool {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return false;
        }
        let position = Position::new(mouse.column, mouse.row);
        if self.state.footer_area().contains(position) {
            self.status = ack("Add Character button was clicked", None);
            return true;
        }
        let body = self.state.body_area();
        if let Some(row) = self.state.row_at(position)
            && row.kind() == RowKind::Group
            && position.x >= body.right().saturating_sub(3)
        {
            let character = self
                .tree
                .node_at(row.path())
                .and_then(ListboxNode::value)
                .map(|idx| &ROSTER[*idx]);
            self.status = ack("Delete Character button was clicked", character);
            return true;
        }
        false
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.intercept_click(mouse) {
            return;
        }
        let events = self.state.handle_mouse(&mut self.tree, mouse);
        for event in events {
            match event {
                ListboxEvent::SelectHeader { .. } => {
                    self.status = ack("Roster header was clicked", None);
                }
                ListboxEvent::SelectGroup { value, .. } => {
                    self.last_group = value;
                    if let Some(index) = value {
                        let open = self
                            .tree
                            .node_at(&Self::group_path(index))
                            .is_some_and(ListboxNode::is_open);
                        self.status = format!(
                            "select-group: {} (open: {open})",
                            ROSTER[index].name
                        );
                    }
                }
                ListboxEvent::SelectItem { value, .. } => {
                    self.status = ack("select-item", Some(&ROSTER[value]));
                }
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [main, bar] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let widget = ListboxView::new(&self.tree, &TextRows, ListboxStyle::default());
        frame.render_stateful_widget(widget, main, &mut self.state);
        frame.render_widget(Line::from(self.status.as_str()), bar);
    }
}

fn run_app(mut terminal: DefaultTerminal) -> io::Result<()> {
    let mut app = App::new();

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(Duration::from_millis(200))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('t') => app.toggle_theme(),
                    KeyCode::Char('j') => app.cycle_job(),
                    _ => {}
                },
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let terminal = ratatui::init();
    let mouse = execute!(io::stdout(), EnableMouseCapture);
    let result = run_app(terminal);
    if mouse.is_ok() {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();
    result
}
