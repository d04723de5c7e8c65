use std::io::{self, Write};

use tokio::io::AsyncBufRead;
use backend::ElectionApp;

use crate::console::{back_label, unknown_choice, Console, Flow};

pub async fn show<R: AsyncBufRead + Unpin, W: Write>(app: &mut ElectionApp, console: &mut Console<R, W>) -> io::Result<Flow> {
    console.header(app)?;
    match app.results().refresh().await {
        Ok(tally) => console.say(tally.render())?,
        Err(e) => console.say(&e.message)?,
    }
    console.menu(&[("r", "Refresh"), ("b", back_label(app.screen()))])?;

    let Some(choice) = console.choose().await? else { return Ok(Flow::Quit) };
    match choice.as_str() {
        "r" => {}
        "b" => app.go_home(),
        other => return unknown_choice(console, other),
    }
    Ok(Flow::Continue)
}
