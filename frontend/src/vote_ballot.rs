use std::io::{self, Write};

use tokio::io::AsyncBufRead;
use backend::{Candidate, ElectionApp};

use crate::console::{back_label, settle, unknown_choice, Console, Flow};

pub async fn show<R: AsyncBufRead + Unpin, W: Write>(app: &mut ElectionApp, console: &mut Console<R, W>) -> io::Result<Flow> {
    let entries: Vec<Candidate> = match app.ballot() {
        Ok(ballot) => ballot.entries().to_vec(),
        Err(e) => {
            console.say(&e.message)?;
            app.go_home();
            return Ok(Flow::Continue);
        }
    };

    console.header(app)?;
    if entries.is_empty() {
        console.say("No candidates")?;
    }
    for (n, candidate) in entries.iter().enumerate() {
        console.say(format_args!("  {}) {}", n + 1, candidate.name))?;
    }
    console.menu(&[("r", "Reload candidates"), ("b", back_label(app.screen()))])?;

    let Some(choice) = console.choose().await? else { return Ok(Flow::Quit) };
    let Ok(ballot) = app.ballot() else { return Ok(Flow::Continue) };

    match choice.as_str() {
        "r" => {
            settle(ballot.refresh().await);
        }
        "b" => ballot.leave(),
        other => {
            let picked = other.parse::<usize>().ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| entries.get(i));
            match picked {
                Some(candidate) => {
                    settle(ballot.select(candidate.id).await);
                }
                None => return unknown_choice(console, other),
            }
        }
    }
    Ok(Flow::Continue)
}
