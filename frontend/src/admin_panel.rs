use std::io::{self, Write};

use tokio::io::AsyncBufRead;
use backend::ElectionApp;

use crate::console::{back_label, settle, unknown_choice, Console, Flow};

pub async fn show<R: AsyncBufRead + Unpin, W: Write>(app: &mut ElectionApp, console: &mut Console<R, W>) -> io::Result<Flow> {
    console.header(app)?;
    console.menu(&[
        ("1", "Add candidate"),
        ("2", "Remove candidate"),
        ("3", "Refresh voters"),
        ("4", "Refresh results"),
        ("b", back_label(app.screen())),
    ])?;

    let Some(choice) = console.choose().await? else { return Ok(Flow::Quit) };
    let panel = match app.admin_panel() {
        Ok(panel) => panel,
        Err(e) => {
            console.say(&e.message)?;
            app.go_home();
            return Ok(Flow::Continue);
        }
    };

    match choice.as_str() {
        "1" | "2" => {
            let Some(mut name) = console.ask("Candidate name").await? else { return Ok(Flow::Quit) };
            if choice == "1" {
                settle(panel.add_candidate(&mut name).await);
            } else {
                settle(panel.remove_candidate(&mut name).await);
            }
        }
        "3" => {
            settle(panel.refresh_voters().await);
        }
        "4" => {
            settle(panel.refresh_results().await);
        }
        "b" => panel.logout(),
        other => return unknown_choice(console, other),
    }
    Ok(Flow::Continue)
}
