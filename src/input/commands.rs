pub struct CommandDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "refresh",
        aliases: &["r"],
        description: "Reload events",
    },
    CommandDef {
        name: "poll",
        aliases: &[],
        description: "Pause/resume polling",
    },
    CommandDef {
        name: "help",
        aliases: &["h"],
        description: "Show help",
    },
    CommandDef {
        name: "quit",
        aliases: &["q"],
        description: "Quit evlog",
    },
];

pub fn matching_commands(input: &str) -> Vec<&'static CommandDef> {
    let input_lower = input.to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| {
            cmd.name.starts_with(&input_lower)
                || cmd.aliases.iter().any(|a| a.starts_with(&input_lower))
        })
        .collect()
}
