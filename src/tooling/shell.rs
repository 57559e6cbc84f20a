//! Interactive session: line splitting and the per-line command grammar.

use clap::{Parser, Subcommand};

/// One shell line, parsed without a binary name.
#[derive(Parser, Debug)]
#[command(name = "storyforge", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Print the document tree
    Ls {
        /// Only show branches whose names contain this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show one document or folder
    Show { id: String },
    /// Create a document (or folder with --folder)
    New {
        name: String,
        #[arg(long)]
        folder: bool,
        /// Folder to create the node in (default: top level)
        #[arg(long)]
        parent: Option<String>,
        /// Draft the opening content with the generation service
        #[arg(long, conflicts_with = "folder")]
        generate: bool,
    },
    /// Change a node's display name
    Rename { id: String, name: String },
    /// Change a document's title (and display name)
    Title { id: String, title: String },
    /// Replace a document's content
    Write { id: String, content: String },
    /// Append a paragraph to a document
    Append { id: String, text: String },
    /// Replace a document's notes
    Notes { id: String, notes: String },
    /// Delete a node and everything under it
    Rm {
        id: String,
        /// Skip the confirmation for non-empty folders
        #[arg(long, short)]
        yes: bool,
    },
    /// Move a node into a folder, or to the top level without --to
    Mv {
        id: String,
        #[arg(long)]
        to: Option<String>,
    },
    /// Search names (case-insensitive)
    Find { query: String },
    /// Document, folder, and word totals
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List project templates
    Templates,
    /// Create a document from a template
    Template { id: String },
    /// Ask the assistant and append its answer to a document
    Assist {
        id: String,
        prompt: String,
        /// continue, improve, summarize, brainstorm, outline, character, dialogue
        #[arg(long)]
        kind: Option<String>,
    },
    /// Print the forest as JSON
    Export,
    /// Replace the forest with one read from a JSON export
    Load { path: std::path::PathBuf },
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Split a line into words, honoring single and double quotes.
///
/// Inside double quotes a backslash escapes the next character.
pub fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match quote {
            Some('"') if ch == '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => return Err("Trailing backslash".to_string()),
            },
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
