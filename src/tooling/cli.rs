//! CLI Tooling
//!
//! Command-line front end over one in-memory `DocumentStore`. One-shot
//! commands read the seeded project; `shell` keeps a session open so the tree
//! can be edited interactively.

use crate::config::{ConfigLoader, StudioConfig};
use crate::error::ApiError;
use crate::generation::{AssistKind, DemoGenerator, GenerationService};
use crate::logging::{LogFormat, LogOutput, LoggingConfig};
use crate::store::{DocumentPatch, DocumentStore};
use crate::tooling::format::{
    format_node_text, format_stats_text, format_templates_text, format_tree,
};
use crate::tooling::shell::{split_args, ShellCommand, ShellLine};
use crate::tree::NodeRecord;
use crate::types::{NodeId, NodeKind};
use crate::workflow::{self, TEMPLATES};
use clap::{Parser, Subcommand};
use std::future::Future;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Storyforge CLI - document tree for a writing studio
#[derive(Parser)]
#[command(name = "storyforge")]
#[command(about = "Organize chapters, notes, and outlines in a document tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start from an empty tree instead of the sample project
    #[arg(long)]
    pub empty: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<LogOutput>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply `--log-*` flags on top of the loaded logging config.
    pub fn apply_logging_overrides(&self, logging: &mut LoggingConfig) {
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            logging.format = format;
        }
        if let Some(output) = self.log_output {
            logging.output = output;
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the document tree
    Tree {
        /// Only show branches whose names contain this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Document, folder, and word totals
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one document or folder
    Show { id: String },
    /// List project templates
    Templates,
    /// Print the effective configuration as TOML
    Config,
    /// Print the forest as JSON
    Export,
    /// Interactive editing session
    Shell,
}

/// CLI context owning the session's store
pub struct CliContext {
    store: DocumentStore,
    config: StudioConfig,
    generator: Option<Arc<dyn GenerationService>>,
    color: bool,
    /// Drives generation calls from the synchronous command loop
    runtime: tokio::runtime::Runtime,
}

impl CliContext {
    /// Load configuration and build a context.
    pub fn new(config_path: Option<PathBuf>, empty: bool) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::with_config(config, empty)
    }

    /// Build a context from an already-loaded configuration.
    pub fn with_config(config: StudioConfig, empty: bool) -> Result<Self, ApiError> {
        let store = if config.seed_sample_project && !empty {
            DocumentStore::from_views(&workflow::sample_project())?
        } else {
            DocumentStore::new()
        };
        let generator: Option<Arc<dyn GenerationService>> =
            if config.generation.use_demo_generator {
                Some(Arc::new(DemoGenerator::new()))
            } else {
                None
            };
        let color = config.color && std::io::stdout().is_terminal();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            store,
            config,
            generator,
            color,
            runtime,
        })
    }

    /// Replace the generation service.
    pub fn with_generator(mut self, generator: Arc<dyn GenerationService>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Execute a one-shot command. `Shell` must go through `run_shell`.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Tree { filter } => Ok(self.render_tree(filter.as_deref())),
            Commands::Stats { format } => self.render_stats(format),
            Commands::Show { id } => self.render_node(id),
            Commands::Templates => Ok(format_templates_text(TEMPLATES)),
            Commands::Config => self.config.to_toml(),
            Commands::Export => self.export(),
            Commands::Shell => Err(ApiError::ConfigError(
                "The shell command needs an input stream; use run_shell".to_string(),
            )),
        }
    }

    /// Execute one shell command against the session store.
    pub fn execute_shell(&self, command: &ShellCommand) -> Result<String, ApiError> {
        debug!(?command, "Executing shell command");
        match command {
            ShellCommand::Ls { filter } => Ok(self.render_tree(filter.as_deref())),
            ShellCommand::Show { id } => self.render_node(id),
            ShellCommand::New {
                name,
                folder,
                parent,
                generate,
            } => {
                let parent = parent.as_deref().map(NodeId::from);
                let id = if *folder {
                    self.store.create(name, NodeKind::Folder, parent.as_ref())?
                } else if *generate {
                    let generator = self.generator()?;
                    self.block_on(workflow::compose_document(
                        &self.store,
                        generator.as_ref(),
                        name,
                        parent.as_ref(),
                    ))?
                } else {
                    workflow::new_document(&self.store, name, parent.as_ref())?
                };
                Ok(format!("Created {}", id))
            }
            ShellCommand::Rename { id, name } => {
                let view = self
                    .store
                    .update(&NodeId::from(id.as_str()), &DocumentPatch::new().name(name))?;
                Ok(format!("Renamed {} to {}", view.id, view.name))
            }
            ShellCommand::Title { id, title } => {
                let view = workflow::retitle(&self.store, &NodeId::from(id.as_str()), title)?;
                Ok(format!("Retitled {} to {}", view.id, view.name))
            }
            ShellCommand::Write { id, content } => {
                let view = workflow::edit_content(&self.store, &NodeId::from(id.as_str()), content)?;
                Ok(format!("Saved {} ({} words)", view.id, view.word_count()))
            }
            ShellCommand::Append { id, text } => {
                let view =
                    workflow::insert_paragraph(&self.store, &NodeId::from(id.as_str()), text)?;
                Ok(format!("Saved {} ({} words)", view.id, view.word_count()))
            }
            ShellCommand::Notes { id, notes } => {
                let view = self
                    .store
                    .update(&NodeId::from(id.as_str()), &DocumentPatch::new().notes(notes))?;
                Ok(format!("Saved notes for {}", view.id))
            }
            ShellCommand::Rm { id, .. } => {
                let removed = self.store.delete(&NodeId::from(id.as_str()))?;
                Ok(format!("Deleted {} ({} node(s))", id, removed))
            }
            ShellCommand::Mv { id, to } => {
                let target = to.as_deref().map(NodeId::from);
                self.store
                    .move_node(&NodeId::from(id.as_str()), target.as_ref())?;
                Ok(match to {
                    Some(folder) => format!("Moved {} into {}", id, folder),
                    None => format!("Moved {} to the top level", id),
                })
            }
            ShellCommand::Find { query } => {
                let hits = self.store.count_matches(query);
                if hits == 0 {
                    return Ok(format!("No documents found for \"{}\"\n", query));
                }
                Ok(format!(
                    "Found {} result(s)\n{}",
                    hits,
                    format_tree(&self.store.filtered_view(query), self.color)
                ))
            }
            ShellCommand::Stats { format } => self.render_stats(format),
            ShellCommand::Templates => Ok(format_templates_text(TEMPLATES)),
            ShellCommand::Template { id } => {
                let node = workflow::create_from_template(&self.store, id)?;
                Ok(format!("Created {}", node))
            }
            ShellCommand::Assist { id, prompt, kind } => {
                let kind = match kind {
                    Some(k) => k.parse::<AssistKind>()?,
                    None => self.config.generation.default_kind,
                };
                let generator = self.generator()?;
                let view = self.block_on(workflow::assist(
                    &self.store,
                    generator.as_ref(),
                    &NodeId::from(id.as_str()),
                    kind,
                    prompt,
                ))?;
                let mut out = format!("Saved {} ({} words)", view.id, view.word_count());
                for suggestion in kind.suggestions() {
                    out.push_str(&format!("\n  - {}", suggestion));
                }
                Ok(out)
            }
            ShellCommand::Export => self.export(),
            ShellCommand::Load { path } => {
                let raw = std::fs::read_to_string(path)?;
                let records: Vec<NodeRecord> = serde_json::from_str(&raw)?;
                self.store.restore_records(&records)?;
                Ok(format!("Loaded {} node(s)", self.store.len()))
            }
            ShellCommand::Quit => Ok(String::new()),
        }
    }

    /// Read commands line by line until `quit` or end of input.
    ///
    /// Errors from individual commands are printed and the session continues.
    /// With `interactive`, a prompt is shown and deleting a non-empty folder
    /// asks for confirmation unless `--yes` is given.
    pub fn run_shell<R: BufRead, W: Write>(
        &self,
        input: R,
        mut output: W,
        interactive: bool,
    ) -> Result<(), ApiError> {
        info!(project = %self.config.project_name, "Shell session started");
        if interactive {
            write!(output, "storyforge> ")?;
            output.flush()?;
        }
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                match self.shell_line(trimmed, interactive) {
                    Ok(None) => break,
                    Ok(Some(text)) => write_block(&mut output, &text)?,
                    Err(message) => write_block(&mut output, &message)?,
                }
            }
            if interactive {
                write!(output, "storyforge> ")?;
                output.flush()?;
            }
        }
        info!("Shell session ended");
        Ok(())
    }

    /// `Ok(None)` means quit; `Err` carries a message to print.
    fn shell_line(&self, line: &str, interactive: bool) -> Result<Option<String>, String> {
        let words = split_args(line).map_err(|e| format!("Error: {}", e))?;
        let parsed = ShellLine::try_parse_from(words).map_err(|e| e.to_string())?;
        if parsed.command == ShellCommand::Quit {
            return Ok(None);
        }
        if let ShellCommand::Rm { id, yes: false } = &parsed.command {
            if interactive && !self.confirm_delete(id) {
                return Ok(Some("Cancelled".to_string()));
            }
        }
        self.execute_shell(&parsed.command)
            .map(Some)
            .map_err(|e| format!("Error: {}", e))
    }

    /// Ask before deleting a folder that still has children.
    fn confirm_delete(&self, id: &str) -> bool {
        let Some(view) = self.store.find(&NodeId::from(id)) else {
            return true;
        };
        if view.children.is_empty() {
            return true;
        }
        let descendants = view.subtree_ids().len() - 1;
        dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete {} and {} node(s) inside it?",
                view.name, descendants
            ))
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn generator(&self) -> Result<Arc<dyn GenerationService>, ApiError> {
        self.generator.clone().ok_or_else(|| {
            ApiError::GenerationFailed("No generation service configured".to_string())
        })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn render_tree(&self, filter: Option<&str>) -> String {
        let views = match filter {
            Some(query) => self.store.filtered_view(query),
            None => self.store.snapshot(),
        };
        format_tree(&views, self.color)
    }

    fn render_stats(&self, format: &str) -> Result<String, ApiError> {
        let stats = self.store.stats();
        match format {
            "json" => Ok(serde_json::to_string_pretty(&stats)?),
            "text" => Ok(format_stats_text(
                &self.config.project_name,
                &stats,
                self.color,
            )),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn render_node(&self, id: &str) -> Result<String, ApiError> {
        let view = self.store.get(&NodeId::from(id))?;
        Ok(format_node_text(&view, self.color))
    }

    /// Flat record list, so export depth never nests the JSON.
    fn export(&self) -> Result<String, ApiError> {
        Ok(serde_json::to_string_pretty(&self.store.records())?)
    }
}

fn write_block<W: Write>(output: &mut W, text: &str) -> Result<(), ApiError> {
    if text.ends_with('\n') {
        write!(output, "{}", text)?;
    } else {
        writeln!(output, "{}", text)?;
    }
    Ok(())
}
