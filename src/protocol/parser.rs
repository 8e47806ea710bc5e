//! Driver command parser.
//!
//! Parses incoming lines from raw text into structured `Command` variants
//! that the driver main loop can dispatch on. Order text is kept raw here
//! and resolved against the board by [`super::notation`].

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a player: `player <name>`.
    Player { name: String },

    /// Register a territory: `territory <name> <owner> <armies>`.
    Territory {
        name: String,
        owner: String,
        armies: u32,
    },

    /// Issue an order in notation form: `order <notation>`.
    Order { raw: String },

    /// Print a player's orders list: `orders <player>`.
    Orders { player: String },

    /// Reposition an order: `move <player> <from> <to>`.
    Move { player: String, from: usize, to: usize },

    /// Delete an order: `remove <player> <index>`.
    Remove { player: String, index: usize },

    /// Execute every pending order.
    Execute,

    /// Print every territory.
    Board,

    /// Terminate the driver.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "execute" => Some(Command::Execute),
        "board" => Some(Command::Board),
        "quit" => Some(Command::Quit),

        "player" => parse_player(&tokens),
        "territory" => parse_territory(&tokens),
        "order" => parse_order_line(&tokens),
        "orders" => parse_orders(&tokens),
        "move" => parse_move(&tokens),
        "remove" => parse_remove(&tokens),

        other => {
            tracing::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `player <name>`.
fn parse_player(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        tracing::warn!("malformed player: expected 'player <name>'");
        return None;
    }
    Some(Command::Player { name: tokens[1].to_string() })
}

/// Parses `territory <name> <owner> <armies>`.
fn parse_territory(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        tracing::warn!("malformed territory: expected 'territory <name> <owner> <armies>'");
        return None;
    }
    let armies = parse_number::<u32>(tokens[3], "armies")?;
    Some(Command::Territory {
        name: tokens[1].to_string(),
        owner: tokens[2].to_string(),
        armies,
    })
}

/// Parses `order <notation>`, keeping the notation as one string.
fn parse_order_line(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        tracing::warn!("malformed order: expected 'order <notation>'");
        return None;
    }
    Some(Command::Order { raw: tokens[1..].join(" ") })
}

/// Parses `orders <player>`.
fn parse_orders(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        tracing::warn!("malformed orders: expected 'orders <player>'");
        return None;
    }
    Some(Command::Orders { player: tokens[1].to_string() })
}

/// Parses `move <player> <from> <to>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        tracing::warn!("malformed move: expected 'move <player> <from> <to>'");
        return None;
    }
    Some(Command::Move {
        player: tokens[1].to_string(),
        from: parse_number::<usize>(tokens[2], "from")?,
        to: parse_number::<usize>(tokens[3], "to")?,
    })
}

/// Parses `remove <player> <index>`.
fn parse_remove(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        tracing::warn!("malformed remove: expected 'remove <player> <index>'");
        return None;
    }
    Some(Command::Remove {
        player: tokens[1].to_string(),
        index: parse_number::<usize>(tokens[2], "index")?,
    })
}

fn parse_number<T: std::str::FromStr>(token: &str, what: &str) -> Option<T> {
    match token.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("invalid {} value: '{}'", what, token);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("execute"), Some(Command::Execute));
        assert_eq!(parse_command("board"), Some(Command::Board));
        assert_eq!(parse_command("  quit  "), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn parse_unknown_returns_none() {
        assert_eq!(parse_command("loadmap europe.map"), None);
    }

    #[test]
    fn parse_player_and_territory() {
        assert_eq!(
            parse_command("player Thong"),
            Some(Command::Player { name: "Thong".to_string() })
        );
        assert_eq!(
            parse_command("territory Columbia Thong 10"),
            Some(Command::Territory {
                name: "Columbia".to_string(),
                owner: "Thong".to_string(),
                armies: 10,
            })
        );
        assert_eq!(parse_command("territory Columbia Thong ten"), None);
        assert_eq!(parse_command("player"), None);
    }

    #[test]
    fn parse_order_keeps_raw_text() {
        assert_eq!(
            parse_command("order advance  thong 3 columbia   california"),
            Some(Command::Order { raw: "advance thong 3 columbia california".to_string() })
        );
        assert_eq!(parse_command("order"), None);
    }

    #[test]
    fn parse_list_edits() {
        assert_eq!(
            parse_command("move thong 4 1"),
            Some(Command::Move { player: "thong".to_string(), from: 4, to: 1 })
        );
        assert_eq!(
            parse_command("remove thong 2"),
            Some(Command::Remove { player: "thong".to_string(), index: 2 })
        );
        assert_eq!(parse_command("remove thong -1"), None);
        assert_eq!(
            parse_command("orders khoa"),
            Some(Command::Orders { player: "khoa".to_string() })
        );
    }
}
