/// Operator commands read from stdin, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `p`: pause or resume polling.
    Toggle,
    /// `r <ms>`: switch to another refresh preset.
    Refresh(u64),
    /// `n [name...]`: suggest the next free camera name.
    NextCamera(Vec<String>),
    /// `q`: quit.
    Quit,
    /// `h`: print the command list.
    Help,
}

impl Command {
    pub const USAGE: &'static str =
        "commands: p = pause/resume, r <ms> = refresh rate, n [names...] = next camera name, q = quit";

    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Help);
        };

        match head {
            "p" | "pause" | "resume" => Ok(Self::Toggle),
            "r" | "rate" => {
                let raw = words.next().ok_or("missing refresh rate in ms")?;
                raw.parse::<u64>()
                    .map(Self::Refresh)
                    .map_err(|_| format!("'{raw}' is not a number of milliseconds"))
            }
            "n" | "next" => Ok(Self::NextCamera(words.map(String::from).collect())),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            "h" | "help" | "?" => Ok(Self::Help),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}
