use crate::cli::{Commands, SettingsCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Add(args) => args.json,
        Commands::List { json, .. } | Commands::Convert { json, .. } => *json,
        Commands::Settings { command } => match command {
            SettingsCommand::Show { json } | SettingsCommand::Set { json, .. } => *json,
        },
    };
    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
