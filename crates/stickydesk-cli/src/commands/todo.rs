use clap::Subcommand;
use serde::Serialize;
use stickydesk_core::{Desk, StorePaths, TodoItem};

use super::{list_index, print_json, CommandResult};

#[derive(Subcommand)]
pub enum TodoAction {
    /// Append an item
    Add {
        /// Item text
        text: String,
    },
    /// List items with their numbers
    List,
    /// Flip an item between open and done
    Toggle {
        /// 1-based item number
        number: usize,
    },
    /// Mark an item done
    Done {
        number: usize,
    },
    /// Mark an item open again
    Undone {
        number: usize,
    },
    /// Delete an item
    Delete {
        number: usize,
    },
    /// Delete every finished item
    ClearDone,
    /// Delete every item
    ClearAll,
}

#[derive(Serialize)]
struct NumberedItem<'a> {
    number: usize,
    #[serde(flatten)]
    item: &'a TodoItem,
}

#[derive(Serialize)]
struct TodoView<'a> {
    items: Vec<NumberedItem<'a>>,
    done: usize,
    total: usize,
}

pub fn run(action: TodoAction, paths: &StorePaths) -> CommandResult {
    let mut desk = Desk::open(paths);

    match action {
        TodoAction::Add { text } => {
            if desk.todo_add(&text) {
                println!("Added #{}", desk.todos().len());
            } else {
                println!("Nothing to add: item text is empty");
            }
        }
        TodoAction::List => {
            let (done, total) = desk.data().todos.progress();
            let items = desk
                .todos()
                .iter()
                .enumerate()
                .map(|(i, item)| NumberedItem {
                    number: i + 1,
                    item,
                })
                .collect();
            print_json(&TodoView { items, done, total })?;
        }
        TodoAction::Toggle { number } => {
            match list_index(number).and_then(|i| desk.todo_toggle(i)) {
                Some(true) => println!("#{number} done"),
                Some(false) => println!("#{number} open"),
                None => println!("No item #{number}"),
            }
        }
        TodoAction::Done { number } => set_done(&mut desk, number, true),
        TodoAction::Undone { number } => set_done(&mut desk, number, false),
        TodoAction::Delete { number } => {
            match list_index(number).and_then(|i| desk.todo_delete(i)) {
                Some(item) => println!("Deleted: {}", item.text),
                None => println!("No item #{number}"),
            }
        }
        TodoAction::ClearDone => {
            let removed = desk.todo_clear_completed();
            println!("Removed {removed} finished item(s)");
        }
        TodoAction::ClearAll => {
            let removed = desk.todo_clear_all();
            println!("Removed {removed} item(s)");
        }
    }

    Ok(())
}

fn set_done(desk: &mut Desk, number: usize, done: bool) {
    let Some(index) = list_index(number).filter(|&i| i < desk.todos().len()) else {
        println!("No item #{number}");
        return;
    };
    desk.todo_set_done(index, done);
    println!("#{number} {}", if done { "done" } else { "open" });
}
