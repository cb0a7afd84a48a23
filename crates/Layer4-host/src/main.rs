//! AlumNet host - Main entry point

mod features;

use alumnet_core::{ConfigLoader, HostBuilder, LoadState, ShellSnapshot, UserProfile, UserRole};
use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// AlumNet - boots the extensibility host and prints what a user would see
#[derive(Parser, Debug)]
#[command(name = "alumnet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Additional configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sign in as a user with this role before rendering the shell
    #[arg(short, long, value_enum)]
    user: Option<Role>,

    /// Micro-frontend id to open (as if navigating to /apps/<id>)
    #[arg(short, long)]
    open: Option<String>,

    /// Print the shell snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Role {
    Student,
    Alumni,
    Mentor,
    Admin,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => UserRole::Student,
            Role::Alumni => UserRole::Alumni,
            Role::Mentor => UserRole::Mentor,
            Role::Admin => UserRole::Admin,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let mut loader = ConfigLoader::new(&cwd);
    if let Some(path) = &args.config {
        if !path.exists() {
            bail!("config file not found: {}", path.display());
        }
        loader.add_path(path.clone());
    }
    let config = loader.load_all();

    // Build host with built-in features
    let mut builder = HostBuilder::new().with_config(config);
    for plugin in features::plugins() {
        builder = builder.plugin(plugin);
    }
    for (manifest, module) in features::catalog() {
        let entry = manifest.entry_point.clone();
        builder = builder.micro_frontend(manifest).module(entry, module);
    }
    let host = builder.build().context("failed to build host")?;

    if let Some(role) = args.user {
        let role = UserRole::from(role);
        host.services()
            .session
            .sign_in(UserProfile::new(format!("demo-{}", role), "Demo User", role));
    }

    let report = host.start()?;
    for (id, reason) in &report.failed {
        eprintln!("⚠ plugin '{}' failed to initialize: {}", id, reason);
    }

    let snapshot = host.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }

    if let Some(id) = &args.open {
        let route = alumnet_core::mfe::app_route(id);
        let state = host.open(&route).wait().await;
        print_load_state(&route, &state);
    }

    host.shutdown();
    Ok(())
}

fn print_snapshot(snapshot: &ShellSnapshot) {
    if snapshot.is_empty() {
        println!("(nothing to show)");
        return;
    }

    let menus = [
        ("Header", &snapshot.header),
        ("Sidebar", &snapshot.sidebar),
        ("Footer", &snapshot.footer),
    ];
    for (zone, items) in menus {
        if items.is_empty() {
            continue;
        }
        println!("{}:", zone);
        for item in items {
            println!("  {:<16} {}", item.label, item.route);
        }
    }

    if !snapshot.widgets.is_empty() {
        println!("Dashboard:");
        for widget in &snapshot.widgets {
            println!("  {:<16} <{}>", widget.title, widget.component);
        }
    }

    if !snapshot.profile_sections.is_empty() {
        println!("Profile:");
        for section in &snapshot.profile_sections {
            println!("  {:<16} <{}>", section.title, section.component);
        }
    }

    if !snapshot.skills.is_empty() {
        let names: Vec<&str> = snapshot.skills.iter().map(|s| s.name.as_str()).collect();
        println!("Skills: {}", names.join(", "));
    }

    if !snapshot.apps.is_empty() {
        println!("Apps:");
        for app in &snapshot.apps {
            println!("  {:<16} {} (v{})", app.name, app.route, app.version);
        }
    }
}

fn print_load_state(route: &str, state: &LoadState) {
    match state {
        LoadState::Loaded(module) => println!(
            "✓ {} mounted <{}> in {}ms",
            route, module.component, module.duration_ms
        ),
        LoadState::Failed(failure) => {
            println!("✗ {}", failure.user_message());
            println!("  suggested: {:?}", failure.remedy());
        }
        LoadState::Pending => println!("… {} is still loading", route),
    }
}
