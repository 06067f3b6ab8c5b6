use clap::ValueEnum;
use serde::Serialize;

/// A single sampling operation that can run on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Cpu,
    Memory,
    Processes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Operation),
    Continuous,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    Choice(MenuChoice),
    /// A number that is not on the menu.
    Unknown(i64),
    /// Not a number at all.
    Invalid,
}

pub fn parse_menu_input(line: &str) -> MenuInput {
    let Ok(number) = line.trim().parse::<i64>() else {
        return MenuInput::Invalid;
    };
    match number {
        1 => MenuInput::Choice(MenuChoice::Run(Operation::Cpu)),
        2 => MenuInput::Choice(MenuChoice::Run(Operation::Memory)),
        3 => MenuInput::Choice(MenuChoice::Run(Operation::Processes)),
        4 => MenuInput::Choice(MenuChoice::Continuous),
        5 => MenuInput::Choice(MenuChoice::Exit),
        other => MenuInput::Unknown(other),
    }
}
