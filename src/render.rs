use crate::model::{Mode, Outcome};
use crate::session::Session;
use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Span {
    pub(crate) text: String,
    pub(crate) fg: Color,
    pub(crate) bold: bool,
}

impl Span {
    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self::colored(text, Color::White)
    }
    pub(crate) fn colored(text: impl Into<String>, fg: Color) -> Self {
        Self {
            text: text.into(),
            fg,
            bold: false,
        }
    }
    pub(crate) fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// One terminal row of styled text.
pub(crate) type Line = Vec<Span>;

fn tint(color: bool, fg: Color) -> Color {
    if color {
        fg
    } else {
        Color::White
    }
}

/// Alternate-screen text output. Rows are only rewritten when their content changes.
pub(crate) struct Screen {
    out: io::Stdout,
    cols: u16,
    rows: u16,
    shown: Vec<Line>,
    color: bool,
}

impl Screen {
    pub(crate) fn begin(color: bool) -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            shown: Vec::new(),
            color,
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        execute!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn width(&self) -> u16 {
        self.cols
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<()> {
        let size = terminal::size()?;
        if size != (self.cols, self.rows) {
            (self.cols, self.rows) = size;
            self.shown.clear();
            queue!(self.out, Clear(ClearType::All))?;
        }
        Ok(())
    }

    pub(crate) fn present(&mut self, lines: &[Line]) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        let rows = self.rows as usize;
        for row in 0..rows.min(lines.len().max(self.shown.len())) {
            let next = lines.get(row);
            if next == self.shown.get(row) {
                continue;
            }
            queue!(
                self.out,
                cursor::MoveTo(0, row as u16),
                Clear(ClearType::CurrentLine)
            )?;
            if let Some(line) = next {
                self.print_line(row as u16, line)?;
            }
        }
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.shown = lines.iter().take(rows).cloned().collect();
        Ok(())
    }

    fn print_line(&mut self, row: u16, line: &[Span]) -> anyhow::Result<()> {
        // one column of left margin
        let mut budget = self.cols.saturating_sub(1) as usize;
        queue!(self.out, cursor::MoveTo(1, row))?;
        for span in line {
            if budget == 0 {
                break;
            }
            let text: String = span.text.chars().take(budget).collect();
            budget -= text.chars().count();
            let weight = if span.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            queue!(
                self.out,
                SetAttribute(weight),
                SetForegroundColor(tint(self.color, span.fg)),
                Print(text)
            )?;
        }
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }
}

/* -----------------------------
   Text layout
------------------------------ */

/// Greedy word wrap. Explicit newlines always break.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for para in text.split('\n') {
        let mut line = String::new();
        for word in para.split_whitespace() {
            let wlen = word.chars().count();
            let llen = line.chars().count();
            if llen > 0 && llen + 1 + wlen > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/* -----------------------------
   Screens
------------------------------ */

const INTRO: &str = "In this incremental game, you are the lead developer for a tiny and new startup, \
HipsterTech. You hate it. Officially, while your job is to write code, you only get paid when you debug something. \
You are paid 2$ per bug solved. Further, the codebase is absolutely terrible. It's constantly generating bugs, \
and the larger it becomes, the more bugs it generates. The CEO is also constantly watching. \
If you ever have more than 500 unsolved bugs, you will be fired immediately.\n\n\
Eventually, you decide you've had enough, so you tell Carol in HR that you are quitting in 30 days. \
You want to make as much cash as possible before leaving, but you aren't motivated to do much for HipsterTech. \
Maybe you can outsource?";

fn paragraphs(out: &mut Vec<Line>, text: &str, width: usize, bold: bool) {
    for row in wrap(text, width) {
        let span = Span::plain(row);
        out.push(vec![if bold { span.bold() } else { span }]);
    }
}

/// Everything on screen for the current frame, one entry per row.
pub(crate) fn compose(s: &Session, width: u16, tick_ms: u64) -> Vec<Line> {
    let width = width.saturating_sub(2) as usize;
    match s.state.outcome() {
        Some(outcome) => ending(s, outcome, width),
        None if s.state.started => playing(s, tick_ms),
        None => intro(width),
    }
}

fn intro(width: usize) -> Vec<Line> {
    let mut out = vec![
        vec![Span::plain("==== Debug-RPG v1.0 ====").bold()],
        vec![Span::colored("- Created By: NigelMNZ -", Color::DarkGrey)],
        Vec::new(),
    ];
    paragraphs(&mut out, INTRO, width, false);
    out.push(Vec::new());
    paragraphs(
        &mut out,
        "Make money. Don't get fired. You have 30 days. Press [ENTER] to start.",
        width,
        true,
    );
    out
}

fn ending(s: &Session, outcome: Outcome, width: usize) -> Vec<Line> {
    let st = &s.state;
    let cash = st.cash.floor();
    let text = match outcome {
        Outcome::Fired => format!(
            "You were fired. A shame. Well, at least you made ${cash} before getting canned."
        ),
        Outcome::Survived => format!(
            "You made it! You left HipsterTech with a grand total of ${cash}! \
             You only needed to hire a total of {} monkeys and {} interns to boot. \
             Or was it the other way around? Who cares, you're free!",
            st.owned_count(crate::shop::MONKEY),
            st.owned_count(crate::shop::INTERN)
        ),
    };
    let mut out = Vec::new();
    paragraphs(&mut out, &text, width, false);
    out.extend([Vec::new(), Vec::new()]);
    paragraphs(&mut out, "Press [ESC] to quit. Thanks for playing!", width, true);
    out
}

pub(crate) fn status_spans(s: &Session, tick_ms: u64) -> (Vec<Span>, Vec<Span>) {
    let st = &s.state;
    let per = s.rates.per_second(st, tick_ms);

    let filled = (st.time.floor().max(0.0) as usize).min(st.time_max as usize);
    let empty = (st.time_max as usize).saturating_sub(filled);
    let day = vec![
        Span::plain(format!("DAY {} of {} ~ [", st.day.min(st.day_max), st.day_max)),
        Span::colored("▓".repeat(filled), Color::Yellow),
        Span::colored("-".repeat(empty), Color::DarkGrey),
        Span::plain("]"),
    ];

    let bug_count = Span::plain(format!("{}", st.bugs.floor()));
    let bug_count = if st.bugs >= st.bug_warning {
        Span::colored(bug_count.text, Color::Red).bold()
    } else {
        bug_count
    };
    let stats = vec![
        Span::plain(format!("=== Cash: {}$ ", st.cash.floor())),
        Span::colored(format!("(+{:.2}/s)", per.cash), Color::Green),
        Span::plain("   Bugs: "),
        bug_count,
        Span::plain(" "),
        Span::colored(format!("(+{:.2}/s)", per.bugs), Color::Green),
        Span::plain(format!("   Codebase: {:.2}{} ", st.size, st.size_unit)),
        Span::colored(format!("(+{:.2}/s)", per.code), Color::Green),
        Span::plain(" ==="),
    ];
    (day, stats)
}

/// Splits `line` around the first `needle`, colouring the match.
fn highlight(line: &str, needle: &str, fg: Color) -> Vec<Span> {
    match line.find(needle) {
        Some(at) if !needle.is_empty() => vec![
            Span::plain(&line[..at]),
            Span::colored(needle, fg).bold(),
            Span::plain(&line[at + needle.len()..]),
        ],
        _ => vec![Span::plain(line)],
    }
}

pub(crate) fn display_spans(s: &Session) -> Vec<Line> {
    let st = &s.state;
    let display = &s.panel().display;
    match st.mode {
        Mode::Debug if st.bugs >= 1.0 => {
            vec![highlight(display, &st.current_bug.to_string(), Color::Green)]
        }
        Mode::Buy => {
            let cost = s.catalog.cost(st, st.shop_index);
            let fg = if st.cash >= cost {
                Color::Green
            } else {
                Color::Red
            };
            vec![highlight(display, &format!("({cost}$)"), fg)]
        }
        _ => display.lines().map(|l| vec![Span::plain(l)]).collect(),
    }
}

fn playing(s: &Session, tick_ms: u64) -> Vec<Line> {
    let (day, stats) = status_spans(s, tick_ms);
    let mut out = vec![
        day,
        Vec::new(),
        stats,
        Vec::new(),
        vec![Span::plain(s.panel().commands.as_str())],
        Vec::new(),
    ];
    out.extend(display_spans(s));
    out
}
