//! The task-creation mini-language.
//!
//! Free-form input is tokenized on whitespace. `+tag` keeps the word in
//! the task name, `@tag` drops it, and `-c`/`-t`/`-p`/`-d` flags accept
//! both glued (`-t30m`) and spaced (`-t 30m`) values. Unrecognized
//! hyphen-prefixed tokens are discarded. Used by the create-task modal and
//! the non-interactive `add` command.

/// Optional flags extracted from the input.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFlags {
    /// `-c`: resolve the task immediately after creation.
    pub complete: bool,
    /// `-t <dur>`: raw duration string, validated later by the duration
    /// grammar.
    pub time: Option<String>,
    /// `-p <level>`: priority string, validated by the server.
    pub priority: Option<String>,
    /// `-d <date>`: opaque date string, passed through.
    pub date: Option<String>,
}

/// Result of parsing one line of task input.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    pub name: String,
    pub tags: Vec<String>,
    pub flags: TaskFlags,
}

/// Parse free-form creation input into `(clean_name, tags, flags)`.
/// Empty names are left for the caller to reject.
///
pub fn parse_task_input(input: &str) -> ParsedTask {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let mut name_words: Vec<&str> = Vec::new();
    let mut tags: Vec<String> = Vec::new();
    let mut flags = TaskFlags::default();

    let mut index = 0;
    while index < tokens.len() {
        let token = tokens[index];
        if let Some(tag) = token.strip_prefix('+') {
            if tag.is_empty() {
                name_words.push(token);
            } else {
                tags.push(tag.to_string());
                name_words.push(tag);
            }
        } else if let Some(tag) = token.strip_prefix('@') {
            if tag.is_empty() {
                name_words.push(token);
            } else {
                tags.push(tag.to_string());
            }
        } else if token == "-c" {
            flags.complete = true;
        } else if let Some(value) = flag_value(token, "-t", &tokens, &mut index) {
            flags.time = Some(value);
        } else if let Some(value) = flag_value(token, "-p", &tokens, &mut index) {
            flags.priority = Some(value);
        } else if let Some(value) = flag_value(token, "-d", &tokens, &mut index) {
            flags.date = Some(value);
        } else if token.starts_with('-') {
            // Unknown flag, dropped.
        } else {
            name_words.push(token);
        }
        index += 1;
    }

    ParsedTask {
        name: name_words.join(" ").trim().to_string(),
        tags,
        flags,
    }
}

/// Match `-t30m` or `-t 30m` style flags, consuming the following token
/// in the spaced form. A flag with no value at end of input is dropped.
fn flag_value(token: &str, flag: &str, tokens: &[&str], index: &mut usize) -> Option<String> {
    let rest = token.strip_prefix(flag)?;
    if rest.is_empty() {
        if *index + 1 < tokens.len() {
            *index += 1;
            Some(tokens[*index].to_string())
        } else {
            None
        }
    } else {
        Some(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words_become_the_name() {
        let parsed = parse_task_input("fix the build");
        assert_eq!(parsed.name, "fix the build");
        assert!(parsed.tags.is_empty());
        assert_eq!(parsed.flags, TaskFlags::default());
    }

    #[test]
    fn plus_tags_stay_in_the_name() {
        let parsed = parse_task_input("deploy +urgent service");
        assert_eq!(parsed.name, "deploy urgent service");
        assert_eq!(parsed.tags, vec!["urgent"]);
    }

    #[test]
    fn at_tags_disappear_from_the_name() {
        let parsed = parse_task_input("restart @docker +urgent");
        assert_eq!(parsed.name, "restart urgent");
        assert_eq!(parsed.tags, vec!["docker", "urgent"]);
    }

    #[test]
    fn spaced_and_glued_flags_are_equivalent() {
        let spaced = parse_task_input("task -t 1h -p high -d 2024-01-01");
        let glued = parse_task_input("task -t1h -phigh -d2024-01-01");
        assert_eq!(spaced, glued);
        assert_eq!(spaced.flags.time.as_deref(), Some("1h"));
        assert_eq!(spaced.flags.priority.as_deref(), Some("high"));
        assert_eq!(spaced.flags.date.as_deref(), Some("2024-01-01"));
        assert_eq!(spaced.name, "task");
    }

    #[test]
    fn complete_flag() {
        let parsed = parse_task_input("restart @docker +urgent -t 30m -c");
        assert!(parsed.flags.complete);
        assert_eq!(parsed.flags.time.as_deref(), Some("30m"));
        assert_eq!(parsed.name, "restart urgent");
        assert_eq!(parsed.tags, vec!["docker", "urgent"]);
    }

    #[test]
    fn unknown_hyphen_tokens_are_dropped() {
        let parsed = parse_task_input("name -x --weird -q5 word");
        assert_eq!(parsed.name, "name word");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn trailing_flag_without_value_is_dropped() {
        let parsed = parse_task_input("name -t");
        assert_eq!(parsed.name, "name");
        assert_eq!(parsed.flags.time, None);
    }

    #[test]
    fn bare_sigils_are_kept_as_words() {
        let parsed = parse_task_input("add + thing");
        assert_eq!(parsed.name, "add + thing");
        assert!(parsed.tags.is_empty());
    }
}
