use clap::{CommandFactory, Parser};
use std::io::Cursor;
use std::sync::Arc;

use storyforge::config::StudioConfig;
use storyforge::generation::DemoGenerator;
use storyforge::logging::LogFormat;
use storyforge::tooling::cli::{Cli, CliContext, Commands};
use storyforge::types::{NodeId, NodeKind};

fn plain_config() -> StudioConfig {
    StudioConfig {
        color: false,
        ..StudioConfig::default()
    }
}

fn sample_context() -> CliContext {
    CliContext::with_config(plain_config(), false).unwrap()
}

fn run(ctx: &CliContext, script: &str) -> String {
    let mut output = Vec::new();
    ctx.run_shell(Cursor::new(script.as_bytes()), &mut output, false)
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["storyforge", "tree"],
        vec!["storyforge", "tree", "--filter", "chapter"],
        vec!["storyforge", "stats", "--format", "json"],
        vec!["storyforge", "show", "chapter-1"],
        vec!["storyforge", "templates"],
        vec!["storyforge", "config"],
        vec!["storyforge", "export"],
        vec!["storyforge", "--empty", "shell"],
        vec!["storyforge", "--log-level", "debug", "--log-output", "stderr", "tree"],
        vec!["storyforge", "--log-output", "file+stderr", "--log-format", "json", "stats"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_and_incomplete_commands() {
    assert!(Cli::try_parse_from(["storyforge"]).is_err());
    assert!(Cli::try_parse_from(["storyforge", "show"]).is_err());
    assert!(Cli::try_parse_from(["storyforge", "publish"]).is_err());
    assert!(Cli::try_parse_from(["storyforge", "--log-output", "syslog", "tree"]).is_err());
    Cli::command().debug_assert();
}

#[test]
fn logging_flags_override_config() {
    let cli = Cli::try_parse_from([
        "storyforge",
        "--log-level",
        "trace",
        "--log-format",
        "json",
        "--log-file",
        "/tmp/storyforge-test.log",
        "tree",
    ])
    .unwrap();
    let mut logging = StudioConfig::default().logging;
    cli.apply_logging_overrides(&mut logging);
    assert_eq!(logging.level, "trace");
    assert_eq!(logging.format, LogFormat::Json);
    assert_eq!(
        logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/storyforge-test.log"))
    );
}

#[test]
fn one_shot_tree_and_filter() {
    let ctx = sample_context();
    let tree = ctx.execute(&Commands::Tree { filter: None }).unwrap();
    assert!(tree.contains("Research/  [research]"));
    assert!(tree.contains("Story Outline  [outline]  180 words"));

    let filtered = ctx
        .execute(&Commands::Tree {
            filter: Some("chapter".to_string()),
        })
        .unwrap();
    assert!(filtered.starts_with("Draft/"));
    assert!(!filtered.contains("Research"));
}

#[test]
fn one_shot_show_missing_node_fails() {
    let ctx = sample_context();
    let err = ctx
        .execute(&Commands::Show {
            id: "nope".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Node not found: nope");
}

#[test]
fn config_command_prints_toml() {
    let ctx = sample_context();
    let text = ctx.execute(&Commands::Config).unwrap();
    assert!(text.contains("project_name = \"My Writing Project\""));
    assert!(text.contains("[generation]"));
}

#[test]
fn export_round_trips_through_load() {
    let ctx = sample_context();
    let exported = ctx.execute(&Commands::Export).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    std::fs::write(&path, &exported).unwrap();

    let fresh = CliContext::with_config(plain_config(), true).unwrap();
    let out = run(&fresh, &format!("load \"{}\"\n", path.display()));
    assert_eq!(out, "Loaded 8 node(s)\n");
    assert_eq!(fresh.store().snapshot(), ctx.store().snapshot());
}

#[test]
fn deep_export_reloads_past_json_nesting_limits() {
    let ctx = CliContext::with_config(plain_config(), true).unwrap();
    let mut parent: Option<NodeId> = None;
    for level in 0..400 {
        let id = ctx
            .store()
            .create(&format!("Level {}", level), NodeKind::Folder, parent.as_ref())
            .unwrap();
        parent = Some(id);
    }
    let exported = ctx.execute(&Commands::Export).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.json");
    std::fs::write(&path, &exported).unwrap();

    let fresh = CliContext::with_config(plain_config(), true).unwrap();
    let out = run(&fresh, &format!("load \"{}\"\n", path.display()));
    assert_eq!(out, "Loaded 400 node(s)\n");
    assert_eq!(fresh.store().records(), ctx.store().records());
    assert_eq!(
        fresh.store().parent_of(&parent.unwrap()).unwrap(),
        Some(NodeId::from("folder-399"))
    );
}

#[test]
fn load_rejects_child_before_parent_and_keeps_tree() {
    let ctx = sample_context();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    let stamp = "2024-01-15T10:00:00Z";
    let raw = format!(
        r#"[
  {{"id": "scene", "name": "Scene", "kind": "folder", "parent_id": "act", "created_at": "{stamp}", "updated_at": "{stamp}"}},
  {{"id": "act", "name": "Act", "kind": "folder", "created_at": "{stamp}", "updated_at": "{stamp}"}}
]"#
    );
    std::fs::write(&path, raw).unwrap();

    let out = run(&ctx, &format!("load \"{}\"\n", path.display()));
    assert!(out.starts_with("Error: Invalid operation"), "{}", out);
    assert_eq!(ctx.store().len(), 8);
}

#[test]
fn shell_session_edits_the_tree() {
    let ctx = sample_context();
    let script = r#"
new "Chapter 4: The Harbor" --parent draft
write chapter-3 "<p>The gulls went quiet.</p>"
rename outline "Beat Sheet"
mv characters --to draft
rm research
quit
stats
"#;
    let out = run(&ctx, script);
    let lines: Vec<_> = out.lines().collect();
    assert!(lines[0].starts_with("Created doc-"));
    assert_eq!(lines[1], "Saved chapter-3 (4 words)");
    assert_eq!(lines[2], "Renamed outline to Beat Sheet");
    assert_eq!(lines[3], "Moved characters into draft");
    assert_eq!(lines[4], "Deleted research (3 node(s))");
    assert_eq!(lines.len(), 5, "commands after quit must not run");

    let store = ctx.store();
    assert!(store.find(&NodeId::from("worldbuilding")).is_none());
    assert_eq!(
        store.parent_of(&NodeId::from("characters")).unwrap(),
        Some(NodeId::from("draft"))
    );
    assert_eq!(store.get(&NodeId::from("draft")).unwrap().children.len(), 5);
}

#[test]
fn shell_reports_errors_and_continues() {
    let ctx = sample_context();
    let out = run(
        &ctx,
        "mv draft --to chapter-1\nmv draft --to draft\nshow ghost\nnew \"unclosed\nstats --format json\n",
    );
    assert!(out.contains("Error: Invalid operation"));
    assert!(out.contains("Error: Node not found: ghost"));
    assert!(out.contains("Error: Unterminated \" quote"));
    assert!(out.contains("\"document_count\": 6"));
}

#[test]
fn shell_generates_documents_and_assists() {
    let ctx = CliContext::with_config(plain_config(), true)
        .unwrap()
        .with_generator(Arc::new(DemoGenerator::new()));
    let out = run(
        &ctx,
        "new Research --folder\nnew \"Chapter 1\" --parent folder-1 --generate\nassist doc-2 \"Summarize this\" --kind summarize\n",
    );
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "Created folder-1");
    assert_eq!(lines[1], "Created doc-2");
    assert!(lines[2].starts_with("Saved doc-2"));

    let doc = ctx.store().get(&NodeId::from("doc-2")).unwrap();
    assert!(doc.content().unwrap().starts_with("<h1>Chapter 1</h1>"));
    assert!(doc.content().unwrap().contains("<p>Summary:"));
    assert_eq!(doc.parent_id, Some(NodeId::from("folder-1")));
}

#[test]
fn shell_template_creates_document() {
    let ctx = CliContext::with_config(plain_config(), true).unwrap();
    let out = run(&ctx, "template novel\ntemplate poem\n");
    assert!(out.starts_with("Created doc-"));
    assert!(out.contains("Error: Unknown template: poem"));
    assert_eq!(ctx.store().stats().document_count, 1);
}
