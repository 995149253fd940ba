//! Line-oriented commands read from stdin.

use anyhow::{bail, Context};
use archivist_core::{LocationQuery, Msg, QueueStatus, ViewStyle};

pub const HELP: &str = "\
Commands:
  page N                  show page N
  search [TEXT]           filter by free text (empty clears)
  location [QUERY]        apply a location query, e.g. ?channel=UC1&ignored=true
  type [TEXT]             edit the add-to-queue input
  add [TEXT]              submit TEXT (or the current input) to the queue
  ignore-all | pending-all | priority-all
                          change the status of everything matching the filters
  delete-all              remove everything matching the filters
  ignore ID | pending ID | priority ID | delete ID
                          act on a single item
  view list|grid          switch layout
  grid N                  items per grid row
  default-ignored on|off  stored default for showing ignored items
  refresh | dismiss | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Core(Vec<Msg>),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msgs = match word {
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        "page" => {
            let page = rest
                .parse::<u32>()
                .with_context(|| format!("not a page number: {rest:?}"))?;
            vec![Msg::PageSelected(page)]
        }
        "search" => vec![Msg::SearchChanged(rest.to_string())],
        "location" => vec![Msg::LocationChanged(LocationQuery::parse(rest))],
        "type" => vec![Msg::EnqueueInputChanged(rest.to_string())],
        "add" if rest.is_empty() => vec![Msg::EnqueueSubmitted],
        "add" => vec![
            Msg::EnqueueInputChanged(rest.to_string()),
            Msg::EnqueueSubmitted,
        ],
        "ignore-all" => vec![Msg::BulkStatusRequested(QueueStatus::Ignore)],
        "pending-all" => vec![Msg::BulkStatusRequested(QueueStatus::Pending)],
        "priority-all" => vec![Msg::BulkStatusRequested(QueueStatus::Priority)],
        "delete-all" => vec![Msg::BulkDeleteRequested],
        "ignore" | "pending" | "priority" => vec![Msg::ItemStatusRequested {
            youtube_id: required_id(word, rest)?,
            status: QueueStatus::parse(word),
        }],
        "delete" => vec![Msg::ItemDeleteRequested {
            youtube_id: required_id(word, rest)?,
        }],
        "view" => match ViewStyle::parse(rest) {
            Some(style) => vec![Msg::ViewStyleSelected(style)],
            None => bail!("view must be list or grid"),
        },
        "grid" => {
            let items = rest
                .parse::<u8>()
                .with_context(|| format!("not a grid size: {rest:?}"))?;
            vec![Msg::GridItemsSelected(items)]
        }
        "default-ignored" => match rest {
            "on" | "true" => vec![Msg::ShowIgnoredDefaultSelected(true)],
            "off" | "false" => vec![Msg::ShowIgnoredDefaultSelected(false)],
            _ => bail!("default-ignored takes on or off"),
        },
        "refresh" => vec![Msg::RefreshRequested],
        "dismiss" => vec![Msg::NotificationDismissed],
        _ => bail!("unknown command {word:?}, try help"),
    };
    Ok(Some(Command::Core(msgs)))
}

fn required_id(word: &str, rest: &str) -> anyhow::Result<String> {
    if rest.is_empty() {
        bail!("{word} needs a video id");
    }
    Ok(rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn msgs(line: &str) -> Vec<Msg> {
        match parse_command(line).unwrap() {
            Some(Command::Core(msgs)) => msgs,
            other => panic!("expected messages for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn page_and_search() {
        assert_eq!(msgs("page 3"), vec![Msg::PageSelected(3)]);
        assert_eq!(
            msgs("search  cat videos "),
            vec![Msg::SearchChanged("cat videos".to_string())]
        );
        assert_eq!(msgs("search"), vec![Msg::SearchChanged(String::new())]);
        assert!(parse_command("page two").is_err());
    }

    #[test]
    fn add_with_text_fills_input_then_submits() {
        assert_eq!(
            msgs("add https://youtu.be/abc"),
            vec![
                Msg::EnqueueInputChanged("https://youtu.be/abc".to_string()),
                Msg::EnqueueSubmitted,
            ]
        );
        assert_eq!(msgs("add"), vec![Msg::EnqueueSubmitted]);
    }

    #[test]
    fn bulk_and_item_actions() {
        assert_eq!(
            msgs("ignore-all"),
            vec![Msg::BulkStatusRequested(QueueStatus::Ignore)]
        );
        assert_eq!(msgs("delete-all"), vec![Msg::BulkDeleteRequested]);
        assert_eq!(
            msgs("priority abc123"),
            vec![Msg::ItemStatusRequested {
                youtube_id: "abc123".to_string(),
                status: QueueStatus::Priority,
            }]
        );
        assert!(parse_command("delete").is_err());
    }

    #[test]
    fn location_goes_through_query_parser() {
        let expected = LocationQuery::parse("?channel=UC1&ignored=true");
        assert_eq!(
            msgs("location ?channel=UC1&ignored=true"),
            vec![Msg::LocationChanged(expected)]
        );
    }

    #[test]
    fn preference_commands() {
        assert_eq!(msgs("view grid"), vec![Msg::ViewStyleSelected(ViewStyle::Grid)]);
        assert_eq!(msgs("grid 5"), vec![Msg::GridItemsSelected(5)]);
        assert_eq!(
            msgs("default-ignored on"),
            vec![Msg::ShowIgnoredDefaultSelected(true)]
        );
        assert!(parse_command("view tiles").is_err());
    }

    #[test]
    fn help_quit_and_unknown() {
        assert_eq!(parse_command("help").unwrap(), Some(Command::Help));
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert!(parse_command("frobnicate").is_err());
    }
}
