use clap::Subcommand;
use serde::Serialize;
use stickydesk_core::widget::default_arrangement;
use stickydesk_core::{Desk, HexColor, Position, Size, StorePaths, WidgetName, WidgetState};

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum WidgetAction {
    /// Show resolved attributes for one widget, or all of them
    Show {
        /// calendar, todo, day_planner, weekly_planner, monthly_planner, pomodoro
        name: Option<WidgetName>,
    },
    /// Set a widget's background color
    Color {
        name: WidgetName,
        /// #RRGGBB
        color: HexColor,
    },
    /// Move a widget's top-left corner
    Move {
        name: WidgetName,
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
    /// Resize a widget
    Resize {
        name: WidgetName,
        width: u32,
        height: u32,
    },
    /// Flip a widget between collapsed and expanded
    Expand {
        name: WidgetName,
    },
    /// Forget saved positions and sizes
    ResetLayout,
    /// Place every widget for a screen of the given size
    Arrange {
        screen_width: i32,
        screen_height: i32,
        /// Overwrite positions that were already saved
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct WidgetView {
    name: WidgetName,
    title: &'static str,
    #[serde(flatten)]
    state: WidgetState,
}

fn view(desk: &Desk, name: WidgetName) -> WidgetView {
    WidgetView {
        name,
        title: name.title(),
        state: desk.widget(name),
    }
}

pub fn run(action: WidgetAction, paths: &StorePaths) -> CommandResult {
    let mut desk = Desk::open(paths);

    match action {
        WidgetAction::Show { name: Some(name) } => print_json(&view(&desk, name))?,
        WidgetAction::Show { name: None } => {
            let all: Vec<WidgetView> = WidgetName::ALL.iter().map(|&n| view(&desk, n)).collect();
            print_json(&all)?;
        }
        WidgetAction::Color { name, color } => {
            desk.set_color(name, color.clone());
            println!("{name} color {color}");
        }
        WidgetAction::Move { name, x, y } => {
            desk.set_position(name, Position { x, y });
            println!("{name} at {x},{y}");
        }
        WidgetAction::Resize {
            name,
            width,
            height,
        } => {
            desk.set_size(name, Size { width, height });
            println!("{name} size {width}x{height}");
        }
        WidgetAction::Expand { name } => {
            let expanded = desk.toggle_expanded(name);
            println!(
                "{name} {}",
                if expanded { "expanded" } else { "collapsed" }
            );
        }
        WidgetAction::ResetLayout => {
            if desk.reset_layout() {
                println!("Layout reset to defaults");
            } else {
                println!("Layout already at defaults");
            }
        }
        WidgetAction::Arrange {
            screen_width,
            screen_height,
            force,
        } => {
            if desk.config().has_saved_positions() && !force {
                println!("Positions already saved; pass --force to overwrite");
                return Ok(());
            }
            for (name, position) in default_arrangement(screen_width, screen_height) {
                desk.set_position(name, position);
                println!("{name} at {},{}", position.x, position.y);
            }
        }
    }

    Ok(())
}
