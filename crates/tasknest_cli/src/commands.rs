//! Line command grammar for the interactive shell.
//!
//! Item numbers are 1-based positions in the list the current view shows.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Help,
    Quit,
    Open(usize),
    Back,
    Next,
    Prev,
    NewProject(String),
    Rename { item: usize, name: String },
    DeleteProject(usize),
    Add(String),
    Toggle(usize),
    Edit {
        item: usize,
        text: String,
        description: String,
    },
    Remove(usize),
}

pub const HELP: &str = "\
projects view:
  open <n>                 show tasks of project n
  new <name>               create a project
  rename <n> <name>        rename project n
  delete <n>               delete project n and its tasks (asks first)
task view:
  add <text>               add a task to the open project
  done <n>                 toggle task n
  edit <n> <text> | <desc> replace title and description of task n
  rm <n>                   delete task n
  next | prev              move to the neighbouring project
  back                     return to the project list
anywhere:
  ls | help | quit";

/// Parses one input line. Blank lines mean `Show`.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" | "ls" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "back" => Ok(Command::Back),
        "next" => Ok(Command::Next),
        "prev" => Ok(Command::Prev),
        "open" => item(rest).map(Command::Open),
        "new" => Ok(Command::NewProject(rest.to_string())),
        "rename" => {
            let (item_text, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Ok(Command::Rename {
                item: item(item_text)?,
                name: name.trim().to_string(),
            })
        }
        "delete" => item(rest).map(Command::DeleteProject),
        "add" => Ok(Command::Add(rest.to_string())),
        "done" => item(rest).map(Command::Toggle),
        "rm" => item(rest).map(Command::Remove),
        "edit" => {
            let (item_text, body) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let (text, description) = body.split_once('|').unwrap_or((body, ""));
            Ok(Command::Edit {
                item: item(item_text)?,
                text: text.trim().to_string(),
                description: description.trim().to_string(),
            })
        }
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn item(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("expected an item number, got `{value}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, Command};

    #[test]
    fn blank_line_shows_current_view() {
        assert_eq!(parse("   "), Ok(Command::Show));
    }

    #[test]
    fn parses_text_arguments_verbatim_after_verb() {
        assert_eq!(
            parse("add  Buy oat milk"),
            Ok(Command::Add("Buy oat milk".to_string()))
        );
        assert_eq!(
            parse("rename 2 Side projects"),
            Ok(Command::Rename {
                item: 2,
                name: "Side projects".to_string()
            })
        );
    }

    #[test]
    fn edit_splits_title_and_description() {
        assert_eq!(
            parse("edit 3 Call bank | before noon"),
            Ok(Command::Edit {
                item: 3,
                text: "Call bank".to_string(),
                description: "before noon".to_string(),
            })
        );
        assert_eq!(
            parse("edit 1 Only title"),
            Ok(Command::Edit {
                item: 1,
                text: "Only title".to_string(),
                description: String::new(),
            })
        );
    }

    #[test]
    fn rejects_bad_item_numbers_and_verbs() {
        assert!(parse("open zero").is_err());
        assert!(parse("done 0").is_err());
        assert!(parse("frobnicate").is_err());
    }
}
