use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use viper_common::game::{Direction, InputEvent, SharedTaskHost};
use viper_common::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Game(InputEvent),
    Quit,
}

/// Every character of a line is one key press. Unknown keys are skipped.
pub fn parse_line(line: &str) -> Vec<Command> {
    line.chars().filter_map(parse_key).collect()
}

fn parse_key(key: char) -> Option<Command> {
    let direction = match key.to_ascii_lowercase() {
        'w' | 'k' => Direction::Up,
        's' | 'j' => Direction::Down,
        'a' | 'h' => Direction::Left,
        'd' | 'l' => Direction::Right,
        'p' | ' ' => return Some(Command::Game(InputEvent::PauseToggled)),
        'q' => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Game(InputEvent::DirectionRequested(direction)))
}

/// Forwards key presses from `reader` until it closes, the game stops
/// listening, or the player quits.
pub async fn read_commands<R: AsyncRead + Unpin>(
    reader: R,
    tx: mpsc::UnboundedSender<InputEvent>,
    cancel: SharedTaskHost,
) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                log!("Input closed");
                return;
            }
            Err(e) => {
                log!("Failed to read input: {}", e);
                return;
            }
        };

        for command in parse_line(&line) {
            match command {
                Command::Game(event) => {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                Command::Quit => {
                    log!("Quit requested");
                    cancel.cancel();
                    return;
                }
            }
        }
    }
}
