use std::io::{self, Write};

use tokio::io::AsyncBufRead;
use backend::ElectionApp;

use crate::console::{back_label, settle, unknown_choice, Console, Flow};

pub async fn show<R: AsyncBufRead + Unpin, W: Write>(app: &mut ElectionApp, console: &mut Console<R, W>) -> io::Result<Flow> {
    console.header(app)?;
    console.menu(&[("1", "Enter password"), ("b", back_label(app.screen()))])?;

    let Some(choice) = console.choose().await? else { return Ok(Flow::Quit) };
    match choice.as_str() {
        "1" => {
            let Some(mut password) = console.ask("Password").await? else { return Ok(Flow::Quit) };
            settle(app.admin_login().submit(&mut password));
        }
        "b" => app.go_home(),
        other => return unknown_choice(console, other),
    }
    Ok(Flow::Continue)
}
