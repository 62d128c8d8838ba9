use stickydesk_core::storage::verify;
use stickydesk_core::StorePaths;

use super::CommandResult;

pub fn run(paths: &StorePaths) -> CommandResult {
    println!("data:   {}", describe(&paths.data));
    println!("config: {}", describe(&paths.config));
    verify(paths)?;
    println!("Both documents load cleanly");
    Ok(())
}

fn describe(path: &std::path::Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (missing, defaults apply)", path.display())
    }
}
