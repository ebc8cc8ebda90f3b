/// One user trigger, parsed from a console input line. Each variant maps to
/// exactly one panel handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// `lookup <spk-id>` — the id may be empty; validation happens in the
    /// panel so an empty trigger surfaces the same error a button click would.
    Lookup(String),
    /// `feed`
    Feed,
    /// `factsheet`
    Factsheet,
    /// `impact <spk-id>`
    AssessImpact(String),
    /// `quit` / `exit`
    Quit,
}

impl UiEvent {
    pub fn parse(line: &str) -> Option<UiEvent> {
        let trimmed = line.trim();
        let (command, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(c, r)| (c, r.trim()));
        match command {
            "lookup" => Some(UiEvent::Lookup(String::from(rest))),
            "feed" => Some(UiEvent::Feed),
            "factsheet" => Some(UiEvent::Factsheet),
            "impact" => Some(UiEvent::AssessImpact(String::from(rest))),
            "quit" | "exit" => Some(UiEvent::Quit),
            _ => None,
        }
    }
}
